use anyhow::{anyhow, Result};

use super::display::profile_label;
use super::take_error;
use super::ui::{confirm_destructive, status};
use crate::api::ProfileApi;
use crate::manager::{Outcome, ProfileManager};

/// Execute the delete command
pub fn run_delete<A: ProfileApi>(manager: &mut ProfileManager<A>, id: &str, force: bool) -> Result<()> {
    let id = id.trim();
    if id.is_empty() {
        return Err(anyhow!("Profile ID cannot be empty."));
    }

    if manager.access().can_delete() {
        if let Some(profile) = manager.profiles().iter().find(|p| p.id == id) {
            println!("{}\n", profile_label(profile));
        }
    }

    let outcome = if force {
        manager.delete_profile(id, &|_: &str| true)
    } else {
        manager.delete_profile(id, &confirm_destructive)
    };

    match outcome {
        Outcome::Completed => {
            status("Deleted.");
            Ok(())
        }
        Outcome::Cancelled => Ok(()),
        Outcome::Failed | Outcome::Denied => take_error(manager),
    }
}
