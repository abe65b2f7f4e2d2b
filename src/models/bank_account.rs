use serde::{Deserialize, Serialize};

use super::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AccountType {
    #[default]
    Current,
    Savings,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "Current",
            Self::Savings => "Savings",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "savings" => Self::Savings,
            _ => Self::Current,
        }
    }

    pub fn all() -> &'static [AccountType] {
        &[Self::Current, Self::Savings]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    #[serde(default = "RecordId::unassigned", skip_serializing_if = "RecordId::is_unsent")]
    pub id: RecordId,
    pub bank_name: String,
    pub account_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_holder_name: Option<String>,
    pub ifsc_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
    #[serde(default)]
    pub account_type: AccountType,
    #[serde(default)]
    pub is_default: bool,
}

impl BankAccount {
    pub fn new(bank_name: String, account_number: String, ifsc_code: String) -> Self {
        Self {
            id: RecordId::pending(),
            bank_name,
            account_number,
            account_holder_name: None,
            ifsc_code,
            branch_name: None,
            account_type: AccountType::default(),
            is_default: false,
        }
    }

    pub fn masked_account_number(&self) -> String {
        mask_account_number(&self.account_number)
    }
}

/// "****" followed by the last four characters of the account number.
pub fn mask_account_number(number: &str) -> String {
    let chars: Vec<char> = number.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("****{}", tail)
}
