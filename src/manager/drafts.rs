//! Scratch forms for nested records and the list operations on a profile draft.

use crate::models::{AccountType, BankAccount, Location, ProfileDraft, RecordId, DEFAULT_COUNTRY};

pub const LOCATION_FIELDS_REQUIRED: &str = "Please fill in all required location fields";
pub const BANK_FIELDS_REQUIRED: &str = "Please fill in all required bank fields";

/// Editor tab. Presentation only; switching never touches a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Locations,
    Banking,
}

impl Tab {
    pub fn label(self) -> &'static str {
        match self {
            Self::Locations => "Locations",
            Self::Banking => "Banking",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Locations => Self::Banking,
            Self::Banking => Self::Locations,
        }
    }
}

/// A scratch record is missing required fields. The message is the single
/// aggregate shown to the user; `missing` names every empty field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: &'static str,
    pub missing: Vec<&'static str>,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// ==================== LOCATION FORM ====================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationForm {
    pub location_name: String,
    pub address_line_1: String,
    pub address_line_2: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
    pub phone: String,
    pub email: String,
    pub gst_number: String,
    pub is_default: bool,
}

impl Default for LocationForm {
    fn default() -> Self {
        Self {
            location_name: String::new(),
            address_line_1: String::new(),
            address_line_2: String::new(),
            city: String::new(),
            state: String::new(),
            pincode: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
            phone: String::new(),
            email: String::new(),
            gst_number: String::new(),
            is_default: false,
        }
    }
}

impl LocationForm {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("location_name", &self.location_name),
            ("address_line_1", &self.address_line_1),
            ("city", &self.city),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(name, _)| name)
        .collect()
    }

    /// Build the record to append, with a fresh pending id.
    pub fn to_location(&self) -> Result<Location, ValidationError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError {
                message: LOCATION_FIELDS_REQUIRED,
                missing,
            });
        }

        Ok(Location {
            id: RecordId::pending(),
            location_name: self.location_name.trim().to_string(),
            address_line_1: self.address_line_1.trim().to_string(),
            address_line_2: optional(&self.address_line_2),
            city: self.city.trim().to_string(),
            state: optional(&self.state),
            pincode: optional(&self.pincode),
            country: optional(&self.country).unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
            phone: optional(&self.phone),
            email: optional(&self.email),
            gst_number: optional(&self.gst_number),
            is_default: self.is_default,
        })
    }
}

// ==================== BANK FORM ====================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BankForm {
    pub bank_name: String,
    pub account_number: String,
    pub account_holder_name: String,
    pub ifsc_code: String,
    pub branch_name: String,
    pub account_type: AccountType,
    pub is_default: bool,
}

impl BankForm {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("bank_name", &self.bank_name),
            ("account_number", &self.account_number),
            ("ifsc_code", &self.ifsc_code),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(name, _)| name)
        .collect()
    }

    pub fn to_bank_account(&self) -> Result<BankAccount, ValidationError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError {
                message: BANK_FIELDS_REQUIRED,
                missing,
            });
        }

        Ok(BankAccount {
            id: RecordId::pending(),
            bank_name: self.bank_name.trim().to_string(),
            account_number: self.account_number.trim().to_string(),
            account_holder_name: optional(&self.account_holder_name),
            ifsc_code: self.ifsc_code.trim().to_string(),
            branch_name: optional(&self.branch_name),
            account_type: self.account_type,
            is_default: self.is_default,
        })
    }
}

// ==================== DRAFT LIST OPERATIONS ====================

/// Mark `index` as the only default entry. Out of range leaves the list alone.
fn mark_default<T>(items: &mut [T], index: usize, flag: impl Fn(&mut T) -> &mut bool) -> bool {
    if index >= items.len() {
        return false;
    }
    for (i, item) in items.iter_mut().enumerate() {
        *flag(item) = i == index;
    }
    true
}

fn remove_at<T>(items: &mut Vec<T>, index: usize) -> Option<T> {
    if index < items.len() {
        Some(items.remove(index))
    } else {
        None
    }
}

impl ProfileDraft {
    /// Append a location. A location flagged default becomes the only default.
    pub fn push_location(&mut self, location: Location) {
        let is_default = location.is_default;
        self.locations.push(location);
        if is_default {
            let last = self.locations.len() - 1;
            mark_default(&mut self.locations, last, |loc| &mut loc.is_default);
        }
    }

    pub fn remove_location(&mut self, index: usize) -> Option<Location> {
        remove_at(&mut self.locations, index)
    }

    pub fn set_default_location(&mut self, index: usize) -> bool {
        mark_default(&mut self.locations, index, |loc| &mut loc.is_default)
    }

    pub fn push_bank_account(&mut self, bank: BankAccount) {
        let is_default = bank.is_default;
        self.bank_details.push(bank);
        if is_default {
            let last = self.bank_details.len() - 1;
            mark_default(&mut self.bank_details, last, |bank| &mut bank.is_default);
        }
    }

    pub fn remove_bank_account(&mut self, index: usize) -> Option<BankAccount> {
        remove_at(&mut self.bank_details, index)
    }

    pub fn set_default_bank_account(&mut self, index: usize) -> bool {
        mark_default(&mut self.bank_details, index, |bank| &mut bank.is_default)
    }
}
