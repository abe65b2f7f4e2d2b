use anyhow::{anyhow, Result};

use super::editor::run_editor;
use super::ui::{is_interactive, status};
use super::{read_draft, require_access, take_error};
use crate::api::ProfileApi;
use crate::manager::{Outcome, ProfileManager};

/// Execute the add command
///
/// With `file` the profile is created straight from JSON. Otherwise the
/// interactive editor opens, seeded with `name` and `logo`; without a
/// terminal a name alone is enough to create a bare profile.
pub fn run_add<A: ProfileApi>(
    manager: &mut ProfileManager<A>,
    name: Option<String>,
    logo: Option<String>,
    file: Option<String>,
) -> Result<()> {
    require_access(manager)?;

    manager.open_create();
    if let Some(ref path) = file {
        manager.replace_draft(read_draft(path)?);
    }
    if let Some(ref name) = name {
        manager.set_company_name(name);
    }
    if let Some(ref logo) = logo {
        manager.set_company_logo(logo);
    }

    let outcome = if file.is_some() {
        manager.submit()
    } else if is_interactive() {
        run_editor(manager)?
    } else if name.is_some() {
        manager.submit()
    } else {
        manager.cancel_edit();
        return Err(anyhow!(
            "No terminal for the editor. Use --file <PATH> or --name <NAME>."
        ));
    };

    finish(manager, outcome)
}

pub(crate) fn finish<A: ProfileApi>(manager: &mut ProfileManager<A>, outcome: Outcome) -> Result<()> {
    match outcome {
        Outcome::Completed => {
            status("Saved.");
            Ok(())
        }
        Outcome::Cancelled => Ok(()),
        Outcome::Failed | Outcome::Denied => {
            manager.cancel_edit();
            take_error(manager)
        }
    }
}
