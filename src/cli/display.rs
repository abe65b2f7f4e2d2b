use crate::manager::{ACCESS_DENIED_MESSAGE, ACCESS_DENIED_TITLE};
use crate::models::{BankAccount, CompanyProfile, Location, ProfileDraft};

use super::ui::fit;

pub const EMPTY_TITLE: &str = "No Company Profiles";
pub const EMPTY_HINT: &str = "Create your first company profile with `profilecmd add`.";

const NAME_WIDTH: usize = 28;
const COUNT_WIDTH: usize = 6;
const LOCATION_WIDTH: usize = 26;

pub fn print_access_denied() {
    println!("{}\n", ACCESS_DENIED_TITLE);
    println!("  {}", ACCESS_DENIED_MESSAGE);
}

pub fn print_empty_state() {
    println!("{}\n", EMPTY_TITLE);
    println!("  {}", EMPTY_HINT);
}

/// Print the profile list as a table with a header row
pub fn print_profile_table(profiles: &[CompanyProfile]) {
    println!("{}", table_header());
    for profile in profiles {
        println!("{}", profile_row(profile));
    }
}

fn table_header() -> String {
    format!(
        "{}  {}  {}  {}  {}",
        fit("COMPANY", NAME_WIDTH),
        fit("LOCS", COUNT_WIDTH),
        fit("BANKS", COUNT_WIDTH),
        fit("DEFAULT LOCATION", LOCATION_WIDTH),
        "DEFAULT BANK"
    )
}

pub fn profile_row(profile: &CompanyProfile) -> String {
    let location = profile
        .default_location()
        .map(|loc| format!("{} ({})", loc.location_name, loc.city))
        .unwrap_or_else(|| "-".to_string());
    let bank = profile
        .default_bank()
        .map(|bank| format!("{} {}", bank.bank_name, bank.masked_account_number()))
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{}  {}  {}  {}  {}",
        fit(&profile.company_name, NAME_WIDTH),
        fit(&profile.locations.len().to_string(), COUNT_WIDTH),
        fit(&profile.bank_details.len().to_string(), COUNT_WIDTH),
        fit(&location, LOCATION_WIDTH),
        bank
    )
}

/// Short label for selection lists
pub fn profile_label(profile: &CompanyProfile) -> String {
    format!(
        "{} ({} locations, {} banks)",
        profile.company_name,
        profile.locations.len(),
        profile.bank_details.len()
    )
}

pub fn default_marker(is_default: bool) -> &'static str {
    if is_default {
        " [default]"
    } else {
        ""
    }
}

pub fn location_summary(location: &Location) -> String {
    format!(
        "{}{}: {}",
        location.location_name,
        default_marker(location.is_default),
        location.address_line()
    )
}

pub fn bank_summary(bank: &BankAccount) -> String {
    format!(
        "{}{}: {} {} ({})",
        bank.bank_name,
        default_marker(bank.is_default),
        bank.account_type.as_str(),
        bank.masked_account_number(),
        bank.ifsc_code
    )
}

/// Lines for a full location entry, only non-empty fields
pub fn location_lines(location: &Location) -> Vec<String> {
    let mut lines = vec![location_summary(location)];
    if location.country != crate::models::DEFAULT_COUNTRY {
        lines.push(format!("    {}", location.country));
    }
    for value in [&location.phone, &location.email].into_iter().flatten() {
        lines.push(format!("    {}", value));
    }
    if let Some(ref gst) = location.gst_number {
        lines.push(format!("    GST {}", gst));
    }
    lines
}

pub fn bank_lines(bank: &BankAccount) -> Vec<String> {
    let mut lines = vec![bank_summary(bank)];
    if let Some(ref holder) = bank.account_holder_name {
        lines.push(format!("    {}", holder));
    }
    if let Some(ref branch) = bank.branch_name {
        lines.push(format!("    {} branch", branch));
    }
    lines
}

/// Print a full company profile
pub fn print_profile_detail(profile: &CompanyProfile) {
    println!("{}\n", profile.company_name);
    println!("  id: {}", profile.id);
    if let Some(ref logo) = profile.company_logo {
        if !logo.is_empty() {
            println!("  logo: {}", logo);
        }
    }
    if let Some(ref created) = profile.created_at {
        println!("  created: {}", created);
    }

    println!("\nLocations");
    print_entries(profile.locations.iter().map(location_lines));

    println!("\nBanking");
    print_entries(profile.bank_details.iter().map(bank_lines));
}

fn print_entries(entries: impl Iterator<Item = Vec<String>>) {
    let mut any = false;
    for lines in entries {
        any = true;
        for line in lines {
            println!("  {}", line);
        }
    }
    if !any {
        println!("  (none)");
    }
}

/// Lines describing the profile draft in the editor
pub fn draft_lines(draft: &ProfileDraft) -> Vec<String> {
    let name = if draft.company_name.is_empty() {
        "(unnamed)"
    } else {
        draft.company_name.as_str()
    };
    let mut lines = vec![name.to_string()];
    if let Some(ref logo) = draft.company_logo {
        lines.push(format!("  logo: {}", logo));
    }
    lines.push(format!(
        "  {} locations, {} bank accounts",
        draft.locations.len(),
        draft.bank_details.len()
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountType;

    fn sample() -> CompanyProfile {
        let mut profile: CompanyProfile =
            serde_json::from_str(r#"{"id":"p-1","company_name":"Activus"}"#).unwrap();
        let mut hq = Location::new("HQ".into(), "1 Main St".into(), "Pune".into());
        hq.is_default = true;
        profile.locations.push(hq);
        profile
            .locations
            .push(Location::new("Plant".into(), "Plot 7".into(), "Nashik".into()));
        let mut bank = BankAccount::new("HDFC".into(), "50100012345678".into(), "HDFC0000001".into());
        bank.is_default = true;
        bank.account_type = AccountType::Savings;
        profile.bank_details.push(bank);
        profile
    }

    #[test]
    fn test_profile_row_shows_defaults() {
        let row = profile_row(&sample());
        assert!(row.starts_with("Activus "));
        assert!(row.contains("HQ (Pune)"));
        assert!(row.ends_with("HDFC ****5678"));
        assert!(!row.contains("50100012345678"));
    }

    #[test]
    fn test_profile_row_without_defaults() {
        let profile: CompanyProfile =
            serde_json::from_str(r#"{"id":"p-2","company_name":"Acme"}"#).unwrap();
        let row = profile_row(&profile);
        assert!(row.ends_with("-"));
        assert!(row.contains("0 "));
    }

    #[test]
    fn test_header_aligns_with_rows() {
        let header = table_header();
        let row = profile_row(&sample());
        let header_bank = header.find("DEFAULT BANK").unwrap();
        let row_bank = row.find("HDFC").unwrap();
        assert_eq!(header_bank, row_bank);
    }

    #[test]
    fn test_location_summary() {
        let profile = sample();
        assert_eq!(
            location_summary(&profile.locations[0]),
            "HQ [default]: 1 Main St, Pune"
        );
        assert_eq!(location_summary(&profile.locations[1]), "Plant: Plot 7, Nashik");
    }

    #[test]
    fn test_bank_lines_mask_number() {
        let mut bank = sample().bank_details.remove(0);
        bank.branch_name = Some("Baner".into());
        let lines = bank_lines(&bank);
        assert_eq!(lines[0], "HDFC [default]: Savings ****5678 (HDFC0000001)");
        assert_eq!(lines[1], "    Baner branch");
    }

    #[test]
    fn test_draft_lines() {
        let draft = sample().to_draft();
        assert_eq!(draft_lines(&draft), vec!["Activus", "  2 locations, 1 bank accounts"]);
        assert_eq!(draft_lines(&ProfileDraft::new())[0], "(unnamed)");
    }
}
