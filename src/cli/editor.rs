//! Interactive profile editor
//!
//! Drives the manager's drafts: company fields, the pending location and
//! bank forms, removal and default selection, then save or cancel.

use anyhow::Result;
use inquire::Select;

use super::display::{bank_summary, draft_lines, location_summary};
use super::ui::{
    clear_screen, error, minimal_render_config, prompt_field, prompt_flag, select, status,
    wait_for_continue, FormResult,
};
use crate::api::ProfileApi;
use crate::manager::{Outcome, ProfileManager, Tab};
use crate::models::AccountType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditorAction {
    Name,
    Logo,
    SwitchTab,
    Add,
    Remove,
    SetDefault,
    Save,
    Cancel,
}

impl EditorAction {
    const ALL: &'static [EditorAction] = &[
        EditorAction::Name,
        EditorAction::Logo,
        EditorAction::SwitchTab,
        EditorAction::Add,
        EditorAction::Remove,
        EditorAction::SetDefault,
        EditorAction::Save,
        EditorAction::Cancel,
    ];

    fn label(self, tab: Tab) -> String {
        let entry = match tab {
            Tab::Locations => "location",
            Tab::Banking => "bank account",
        };
        match self {
            EditorAction::Name => "Company name".to_string(),
            EditorAction::Logo => "Logo URL".to_string(),
            EditorAction::SwitchTab => format!("Switch to {}", tab.toggle().label()),
            EditorAction::Add => format!("Add {}", entry),
            EditorAction::Remove => format!("Remove {}", entry),
            EditorAction::SetDefault => format!("Set default {}", entry),
            EditorAction::Save => "Save".to_string(),
            EditorAction::Cancel => "Cancel".to_string(),
        }
    }

    fn from_label(s: &str, tab: Tab) -> Option<EditorAction> {
        EditorAction::ALL.iter().find(|a| a.label(tab) == s).copied()
    }
}

/// Run the editor until the draft is saved or discarded.
/// The manager must already be in create or edit mode.
pub fn run_editor<A: ProfileApi>(manager: &mut ProfileManager<A>) -> Result<Outcome> {
    loop {
        let _ = clear_screen();
        print_editor(manager);

        let tab = manager.active_tab();
        let labels: Vec<String> = EditorAction::ALL.iter().map(|a| a.label(tab)).collect();

        let selection = Select::new("", labels.clone())
            .with_render_config(minimal_render_config())
            .with_page_size(labels.len())
            .with_vim_mode(true)
            .prompt_skippable();

        // Escape or Ctrl+C discards the draft, same as Cancel
        let Ok(Some(label)) = selection else {
            manager.cancel_edit();
            return Ok(Outcome::Cancelled);
        };
        let Some(action) = EditorAction::from_label(&label, tab) else {
            continue;
        };

        match action {
            EditorAction::Name => {
                let current = manager.draft().company_name.clone();
                if let FormResult::Value(name) = prompt_field("company name", Some(&current))? {
                    manager.set_company_name(&name);
                }
            }
            EditorAction::Logo => {
                let current = manager.draft().company_logo.clone().unwrap_or_default();
                if let FormResult::Value(logo) = prompt_field("logo url", Some(&current))? {
                    manager.set_company_logo(&logo);
                }
            }
            EditorAction::SwitchTab => manager.set_active_tab(tab.toggle()),
            EditorAction::Add => {
                let added = match tab {
                    Tab::Locations => fill_location_form(manager)? && manager.add_location(),
                    Tab::Banking => fill_bank_form(manager)? && manager.add_bank_details(),
                };
                if !added {
                    show_error(manager);
                }
            }
            EditorAction::Remove => {
                if let Some(index) = pick_entry(manager, tab, "remove: ")? {
                    match tab {
                        Tab::Locations => manager.remove_location(index),
                        Tab::Banking => manager.remove_bank_details(index),
                    }
                }
            }
            EditorAction::SetDefault => {
                if let Some(index) = pick_entry(manager, tab, "default: ")? {
                    match tab {
                        Tab::Locations => manager.set_default_location(index),
                        Tab::Banking => manager.set_default_bank(index),
                    }
                }
            }
            EditorAction::Save => match manager.submit() {
                Outcome::Completed => return Ok(Outcome::Completed),
                outcome => {
                    show_error(manager);
                    if outcome == Outcome::Denied {
                        manager.cancel_edit();
                        return Ok(outcome);
                    }
                }
            },
            EditorAction::Cancel => {
                manager.cancel_edit();
                return Ok(Outcome::Cancelled);
            }
        }
    }
}

fn print_editor<A: ProfileApi>(manager: &ProfileManager<A>) {
    let heading = match manager.editing_id() {
        Some(_) => "Edit Company Profile",
        None => "Create Company Profile",
    };
    println!("{}\n", heading);
    for line in draft_lines(manager.draft()) {
        println!("{}", line);
    }

    let tab = manager.active_tab();
    println!("\n{}", tab.label());
    let entries = entry_labels(manager, tab);
    if entries.is_empty() {
        println!("  (none)");
    }
    for entry in entries {
        println!("  {}", entry);
    }
    println!();
}

fn entry_labels<A: ProfileApi>(manager: &ProfileManager<A>, tab: Tab) -> Vec<String> {
    match tab {
        Tab::Locations => manager.draft().locations.iter().map(location_summary).collect(),
        Tab::Banking => manager.draft().bank_details.iter().map(bank_summary).collect(),
    }
}

fn pick_entry<A: ProfileApi>(
    manager: &ProfileManager<A>,
    tab: Tab,
    prompt: &str,
) -> Result<Option<usize>> {
    let entries = entry_labels(manager, tab);
    if entries.is_empty() {
        status("Nothing to choose from.");
        wait_for_continue();
        return Ok(None);
    }
    select(prompt, &entries)
}

fn show_error<A: ProfileApi>(manager: &mut ProfileManager<A>) {
    if let Some(message) = manager.error() {
        error(message);
        wait_for_continue();
    }
    manager.dismiss_error();
}

/// Prompt each location field. Returns false when the user backs out;
/// whatever was typed so far stays in the form.
fn fill_location_form<A: ProfileApi>(manager: &mut ProfileManager<A>) -> Result<bool> {
    let form = manager.location_form_mut();
    let fields: [(&str, &mut String); 10] = [
        ("location name*", &mut form.location_name),
        ("address line 1*", &mut form.address_line_1),
        ("address line 2", &mut form.address_line_2),
        ("city*", &mut form.city),
        ("state", &mut form.state),
        ("pincode", &mut form.pincode),
        ("country", &mut form.country),
        ("phone", &mut form.phone),
        ("email", &mut form.email),
        ("gst number", &mut form.gst_number),
    ];
    for (label, value) in fields {
        match prompt_field(label, Some(value.as_str()))? {
            FormResult::Value(v) => *value = v,
            FormResult::Cancelled => return Ok(false),
        }
    }

    match prompt_flag("default location?", form.is_default)? {
        FormResult::Value(flag) => form.is_default = flag,
        FormResult::Cancelled => return Ok(false),
    }
    Ok(true)
}

fn fill_bank_form<A: ProfileApi>(manager: &mut ProfileManager<A>) -> Result<bool> {
    let form = manager.bank_form_mut();
    let fields: [(&str, &mut String); 5] = [
        ("bank name*", &mut form.bank_name),
        ("account number*", &mut form.account_number),
        ("account holder", &mut form.account_holder_name),
        ("ifsc code*", &mut form.ifsc_code),
        ("branch", &mut form.branch_name),
    ];
    for (label, value) in fields {
        match prompt_field(label, Some(value.as_str()))? {
            FormResult::Value(v) => *value = v,
            FormResult::Cancelled => return Ok(false),
        }
    }

    let types: Vec<&str> = AccountType::all().iter().map(|t| t.as_str()).collect();
    match select("account type: ", &types)? {
        Some(index) => form.account_type = AccountType::all()[index],
        None => return Ok(false),
    }

    match prompt_flag("default account?", form.is_default)? {
        FormResult::Value(flag) => form.is_default = flag,
        FormResult::Cancelled => return Ok(false),
    }
    Ok(true)
}
