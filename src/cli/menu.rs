//! Main menu for profilecmd
//!
//! Uses inquire for clean, reliable terminal interaction.

use anyhow::{anyhow, Result};
use inquire::Select;

use super::add::finish;
use super::display::{print_profile_detail, profile_label, EMPTY_TITLE};
use super::editor::run_editor;
use super::list::print_list;
use super::ui::{
    clear_screen, confirm_destructive, error, is_interactive, minimal_render_config, select, status,
    wait_for_continue,
};
use super::{require_access, take_error};
use crate::api::ProfileApi;
use crate::manager::{Outcome, ProfileManager};

/// Menu options with type-safe variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    List,
    Show,
    Add,
    Edit,
    Delete,
    DismissError,
    Quit,
}

impl MenuOption {
    const ALL: &'static [MenuOption] = &[
        MenuOption::List,
        MenuOption::Show,
        MenuOption::Add,
        MenuOption::Edit,
        MenuOption::Delete,
        MenuOption::DismissError,
        MenuOption::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            MenuOption::List => "Refresh",
            MenuOption::Show => "Show",
            MenuOption::Add => "Add",
            MenuOption::Edit => "Edit",
            MenuOption::Delete => "Delete",
            MenuOption::DismissError => "Dismiss error",
            MenuOption::Quit => "Quit",
        }
    }

    fn from_label(s: &str) -> Option<MenuOption> {
        MenuOption::ALL.iter().find(|opt| opt.label() == s).copied()
    }

    /// Options offered for the current state
    fn available(has_error: bool, can_delete: bool) -> Vec<MenuOption> {
        MenuOption::ALL
            .iter()
            .copied()
            .filter(|opt| match opt {
                MenuOption::DismissError => has_error,
                MenuOption::Delete => can_delete,
                _ => true,
            })
            .collect()
    }
}

/// Run the interactive main menu
pub fn run_menu<A: ProfileApi>(manager: &mut ProfileManager<A>) -> Result<()> {
    // TTY check: interactive menu requires a terminal
    if !is_interactive() {
        return Err(anyhow!(
            "Interactive menu requires a terminal. Use subcommands for non-interactive use:\n  \
            profilecmd list\n  \
            profilecmd show <id>\n  \
            Run 'profilecmd --help' for all options."
        ));
    }
    require_access(manager)?;

    loop {
        let _ = clear_screen();
        print_list(manager);
        if let Some(message) = manager.error() {
            println!();
            error(message);
        }
        println!();

        let options = MenuOption::available(manager.error().is_some(), manager.access().can_delete());
        let labels: Vec<&str> = options.iter().map(|opt| opt.label()).collect();

        let selection = Select::new("profilecmd", labels.clone())
            .with_render_config(minimal_render_config())
            .with_page_size(labels.len())
            .with_vim_mode(true)
            .prompt_skippable();

        // Escape or Ctrl+C leaves quietly
        let Ok(Some(choice_label)) = selection else {
            return Ok(());
        };
        let Some(choice) = MenuOption::from_label(choice_label) else {
            continue;
        };
        if choice == MenuOption::Quit {
            return Ok(());
        }

        if let Err(e) = execute_command(manager, choice) {
            eprintln!("\nError: {}", e);
            wait_for_continue();
        }
    }
}

fn execute_command<A: ProfileApi>(manager: &mut ProfileManager<A>, choice: MenuOption) -> Result<()> {
    match choice {
        MenuOption::List => {
            manager.load_profiles();
        }
        MenuOption::Show => {
            if let Some(id) = pick_profile(manager, "show: ")? {
                let _ = clear_screen();
                if let Some(profile) = manager.find_profile(&id) {
                    print_profile_detail(&profile);
                    wait_for_continue();
                }
            }
        }
        MenuOption::Add => {
            manager.open_create();
            let outcome = run_editor(manager)?;
            finish(manager, outcome)?;
        }
        MenuOption::Edit => {
            if let Some(id) = pick_profile(manager, "edit: ")? {
                if let Some(profile) = manager.find_profile(&id) {
                    manager.start_edit(&profile);
                    let outcome = run_editor(manager)?;
                    finish(manager, outcome)?;
                }
            }
        }
        MenuOption::Delete => {
            if let Some(id) = pick_profile(manager, "delete: ")? {
                if manager.delete_profile(&id, &confirm_destructive) == Outcome::Completed {
                    status("Deleted.");
                }
                take_error(manager)?;
            }
        }
        MenuOption::DismissError => manager.dismiss_error(),
        MenuOption::Quit => {}
    }
    Ok(())
}

/// Choose a loaded profile, returning its ID
fn pick_profile<A: ProfileApi>(manager: &ProfileManager<A>, prompt: &str) -> Result<Option<String>> {
    let profiles = manager.profiles();
    if profiles.is_empty() {
        status(EMPTY_TITLE);
        wait_for_continue();
        return Ok(None);
    }
    let labels: Vec<String> = profiles.iter().map(profile_label).collect();
    Ok(select(prompt, &labels)?.map(|i| profiles[i].id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        for opt in MenuOption::ALL {
            assert_eq!(MenuOption::from_label(opt.label()), Some(*opt));
        }
    }

    #[test]
    fn test_available_options() {
        let admin = MenuOption::available(false, false);
        assert!(!admin.contains(&MenuOption::Delete));
        assert!(!admin.contains(&MenuOption::DismissError));
        assert_eq!(admin.last(), Some(&MenuOption::Quit));

        let super_admin = MenuOption::available(true, true);
        assert!(super_admin.contains(&MenuOption::Delete));
        assert!(super_admin.contains(&MenuOption::DismissError));
    }
}
