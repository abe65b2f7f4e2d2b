use serde::{Deserialize, Serialize};

use super::RecordId;

pub const DEFAULT_COUNTRY: &str = "India";

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

/// A shipping/billing address of a company profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default = "RecordId::unassigned", skip_serializing_if = "RecordId::is_unsent")]
    pub id: RecordId,
    pub location_name: String,
    pub address_line_1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line_2: Option<String>,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gst_number: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

impl Location {
    pub fn new(location_name: String, address_line_1: String, city: String) -> Self {
        Self {
            id: RecordId::pending(),
            location_name,
            address_line_1,
            address_line_2: None,
            city,
            state: None,
            pincode: None,
            country: default_country(),
            phone: None,
            email: None,
            gst_number: None,
            is_default: false,
        }
    }

    /// Single-line address: "1 Main St, Suite 4, Pune, MH 411001"
    pub fn address_line(&self) -> String {
        let mut line = self.address_line_1.clone();
        if let Some(ref second) = self.address_line_2 {
            line.push_str(", ");
            line.push_str(second);
        }
        line.push_str(", ");
        line.push_str(&self.city);
        match (&self.state, &self.pincode) {
            (Some(s), Some(p)) => line.push_str(&format!(", {} {}", s, p)),
            (Some(s), None) => line.push_str(&format!(", {}", s)),
            (None, Some(p)) => line.push_str(&format!(" {}", p)),
            (None, None) => {}
        }
        line
    }
}
