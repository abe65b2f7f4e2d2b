use anyhow::Result;

use super::display::{print_access_denied, print_empty_state, print_profile_table};
use super::{require_access, take_error};
use crate::api::ProfileApi;
use crate::manager::{ListView, ProfileManager};

/// Execute the list command
pub fn run_list<A: ProfileApi>(manager: &mut ProfileManager<A>) -> Result<()> {
    require_access(manager)?;

    if !manager.load_profiles() {
        return take_error(manager);
    }
    print_list(manager);
    Ok(())
}

/// Print whatever the list area currently shows, without fetching.
pub fn print_list<A: ProfileApi>(manager: &ProfileManager<A>) {
    match manager.view() {
        ListView::Denied => print_access_denied(),
        ListView::Loading => println!("Loading..."),
        ListView::Empty => print_empty_state(),
        ListView::Profiles(profiles) => print_profile_table(profiles),
    }
}
