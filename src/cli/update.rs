use anyhow::{anyhow, Result};

use super::add::finish;
use super::editor::run_editor;
use super::read_draft;
use super::show::find_profile;
use super::ui::is_interactive;
use crate::api::ProfileApi;
use crate::manager::ProfileManager;

/// Execute the edit command
pub fn run_edit<A: ProfileApi>(
    manager: &mut ProfileManager<A>,
    id: &str,
    file: Option<String>,
) -> Result<()> {
    let profile = find_profile(manager, id)?;
    manager.start_edit(&profile);

    let outcome = match file {
        Some(ref path) => {
            manager.replace_draft(read_draft(path)?);
            manager.submit()
        }
        None if is_interactive() => run_editor(manager)?,
        None => {
            manager.cancel_edit();
            return Err(anyhow!("No terminal for the editor. Use --file <PATH>."));
        }
    };

    finish(manager, outcome)
}
