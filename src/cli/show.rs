use anyhow::{anyhow, Result};

use super::display::print_profile_detail;
use super::{require_access, take_error};
use crate::api::ProfileApi;
use crate::manager::ProfileManager;
use crate::models::CompanyProfile;

/// Execute the show command
pub fn run_show<A: ProfileApi>(manager: &mut ProfileManager<A>, id: &str) -> Result<()> {
    let profile = find_profile(manager, id)?;
    print_profile_detail(&profile);
    Ok(())
}

/// Look a profile up by ID, from the loaded list or the backend.
pub(crate) fn find_profile<A: ProfileApi>(
    manager: &mut ProfileManager<A>,
    id: &str,
) -> Result<CompanyProfile> {
    require_access(manager)?;

    let id = id.trim();
    if id.is_empty() {
        return Err(anyhow!("Profile ID cannot be empty."));
    }

    match manager.find_profile(id) {
        Some(profile) => Ok(profile),
        None => {
            take_error(manager)?;
            Err(anyhow!("No company profile found with ID: {}", id))
        }
    }
}
