use serde::{Deserialize, Serialize};

use super::{BankAccount, Location};

/// A company profile as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub id: String,
    pub company_name: String,
    #[serde(default)]
    pub company_logo: Option<String>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub bank_details: Vec<BankAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_location_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_bank_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl CompanyProfile {
    pub fn default_location(&self) -> Option<&Location> {
        self.locations.iter().find(|loc| loc.is_default)
    }

    pub fn default_bank(&self) -> Option<&BankAccount> {
        self.bank_details.iter().find(|bank| bank.is_default)
    }

    /// Editable copy used to seed the editor.
    pub fn to_draft(&self) -> ProfileDraft {
        ProfileDraft {
            company_name: self.company_name.clone(),
            company_logo: self.company_logo.clone().filter(|logo| !logo.is_empty()),
            locations: self.locations.clone(),
            bank_details: self.bank_details.clone(),
        }
    }
}

/// The profile being created or edited; also the POST/PUT request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub company_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub bank_details: Vec<BankAccount>,
}

impl ProfileDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordId;

    fn sample_profile() -> CompanyProfile {
        let json = r#"{
            "id": "p-1",
            "company_name": "Activus Industrial Design & Build",
            "company_logo": null,
            "locations": [
                {"id": "l-1", "location_name": "HQ", "address_line_1": "1 Main St", "city": "Pune", "is_default": false},
                {"id": "l-2", "location_name": "Plant", "address_line_1": "Plot 7", "city": "Bengaluru", "is_default": true}
            ],
            "bank_details": [
                {"id": "b-1", "bank_name": "HDFC", "account_number": "50100012345678", "ifsc_code": "HDFC0000001", "account_type": "Savings", "is_default": true}
            ],
            "default_location_id": "l-2",
            "created_by": "u-1",
            "created_at": "2024-05-01T10:00:00.123456"
        }"#;
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_defaults_lookup() {
        let profile = sample_profile();
        assert_eq!(profile.default_location().unwrap().location_name, "Plant");
        assert_eq!(profile.default_bank().unwrap().bank_name, "HDFC");
    }

    #[test]
    fn test_to_draft_copies_lists() {
        let profile = sample_profile();
        let draft = profile.to_draft();
        assert_eq!(draft.company_name, profile.company_name);
        assert_eq!(draft.company_logo, None);
        assert_eq!(draft.locations.len(), 2);
        assert_eq!(draft.locations[0].id, RecordId::persisted("l-1"));
        assert_eq!(draft.bank_details.len(), 1);
    }

    #[test]
    fn test_draft_body_has_no_profile_id() {
        let draft = sample_profile().to_draft();
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["locations"][1]["id"], "l-2");
    }

    #[test]
    fn test_missing_lists_default_empty() {
        let profile: CompanyProfile =
            serde_json::from_str(r#"{"id":"p-2","company_name":"Acme"}"#).unwrap();
        assert!(profile.locations.is_empty());
        assert!(profile.default_location().is_none());
        assert!(profile.to_draft().bank_details.is_empty());
    }
}
