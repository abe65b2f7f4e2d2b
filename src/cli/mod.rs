use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;

pub mod add;
pub mod auth;
pub mod delete;
pub mod display;
pub mod editor;
pub mod list;
pub mod menu;
pub mod settings;
pub mod show;
pub mod ui;
pub mod update;

pub use add::run_add;
pub use auth::{run_login, run_logout, run_whoami};
pub use delete::run_delete;
pub use editor::run_editor;
pub use list::run_list;
pub use menu::run_menu;
pub use settings::run_config;
pub use show::run_show;
pub use update::run_edit;

use crate::api::ProfileApi;
use crate::manager::{ProfileManager, ACCESS_DENIED_MESSAGE, ACCESS_DENIED_TITLE};
use crate::models::ProfileDraft;

#[derive(Parser)]
#[command(name = "profilecmd")]
#[command(about = "Manage company profiles from the command line")]
#[command(version)]
pub struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    Login(LoginArgs),
    /// Forget the stored session
    Logout,
    /// Show the signed-in user and their permissions
    Whoami,
    /// Show or change the backend URL and request timeout
    Config(ConfigArgs),
    /// List company profiles
    List,
    /// Show one company profile in full
    Show(ShowArgs),
    /// Create a company profile
    Add(AddArgs),
    /// Edit a company profile
    Edit(EditArgs),
    /// Delete a company profile (super admin only)
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct LoginArgs {
    #[arg(short, long)]
    pub email: Option<String>,
    /// Prompted (masked) when omitted
    #[arg(short, long)]
    pub password: Option<String>,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Backend base URL, e.g. https://invoices.example.com
    #[arg(long, value_name = "URL")]
    pub backend_url: Option<String>,
    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Profile ID
    pub id: String,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(short, long)]
    pub name: Option<String>,
    #[arg(short, long)]
    pub logo: Option<String>,
    /// Read the whole profile (locations, bank details) from a JSON file
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Profile ID
    pub id: String,
    /// Replace the profile with the contents of a JSON file
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<String>,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Profile ID
    pub id: String,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Fail with the access-denied text unless the user may manage profiles.
pub(crate) fn require_access<A: ProfileApi>(manager: &ProfileManager<A>) -> Result<()> {
    if manager.access().is_granted() {
        Ok(())
    } else {
        Err(anyhow!("{}: {}", ACCESS_DENIED_TITLE, ACCESS_DENIED_MESSAGE))
    }
}

/// Move the manager's error slot into a command error.
pub(crate) fn take_error<A: ProfileApi>(manager: &mut ProfileManager<A>) -> Result<()> {
    match manager.error().map(str::to_string) {
        Some(message) => {
            manager.dismiss_error();
            Err(anyhow!(message))
        }
        None => Ok(()),
    }
}

/// Read a profile draft from a JSON file.
pub(crate) fn read_draft(path: &str) -> Result<ProfileDraft> {
    let text = fs::read_to_string(path).with_context(|| format!("Could not read {}", path))?;
    parse_draft(&text).with_context(|| format!("Invalid profile JSON in {}", path))
}

fn parse_draft(text: &str) -> Result<ProfileDraft> {
    let draft: ProfileDraft = serde_json::from_str(text)?;
    if draft.company_name.trim().is_empty() {
        return Err(anyhow!("company_name is required"));
    }
    Ok(draft)
}
