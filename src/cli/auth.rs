use anyhow::{anyhow, Result};
use inquire::{Password, PasswordDisplayMode};

use super::ui::{is_interactive, is_valid_email, minimal_render_config, status, text_input, warning};
use crate::api::{ApiError, ErrorKind, HttpProfileApi, TokenSource};
use crate::db::Database;
use crate::manager::Access;
use crate::models::CurrentUser;

/// Execute the login command
pub fn run_login<S: TokenSource>(
    db: &Database,
    api: &HttpProfileApi<S>,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None if is_interactive() => text_input("email: ", None)?.unwrap_or_default(),
        None => return Err(anyhow!("Email is required. Use --email <EMAIL>.")),
    };
    let email = email.trim().to_string();
    if !is_valid_email(&email) {
        return Err(anyhow!("Invalid email: {}", email));
    }

    let password = match password {
        Some(password) => password,
        None if is_interactive() => Password::new("password: ")
            .with_render_config(minimal_render_config())
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt_skippable()?
            .unwrap_or_default(),
        None => return Err(anyhow!("Password is required. Use --password <PASSWORD>.")),
    };
    if password.is_empty() {
        return Err(anyhow!("Password cannot be empty."));
    }

    let response = api.login(&email, &password).map_err(login_error)?;
    db.save_session(&response.access_token, &response.user)?;
    tracing::info!("signed in as {} against {}", response.user.email, api.base_url());

    status(&format!("Logged in as {} ({}).", display_email(&response.user, &email), response.user.role));
    if !Access::check(Some(&response.user)).is_granted() {
        warning("this role cannot manage company profiles.");
    }
    Ok(())
}

fn login_error(err: ApiError) -> anyhow::Error {
    match err.kind() {
        ErrorKind::Rejected => anyhow!("{}", err.detail().unwrap_or("Login failed")),
        ErrorKind::Transport => anyhow!("Network error logging in: {}", err),
    }
}

fn display_email<'a>(user: &'a CurrentUser, fallback: &'a str) -> &'a str {
    if user.email.is_empty() {
        fallback
    } else {
        &user.email
    }
}

/// Execute the logout command
pub fn run_logout(db: &Database) -> Result<()> {
    db.clear_session()?;
    status("Logged out.");
    Ok(())
}

/// Execute the whoami command
pub fn run_whoami(db: &Database) -> Result<()> {
    let Some(user) = db.current_user()? else {
        status("Not logged in.");
        return Ok(());
    };

    for line in whoami_lines(&user) {
        println!("{}", line);
    }
    Ok(())
}

fn whoami_lines(user: &CurrentUser) -> Vec<String> {
    let access = Access::check(Some(user));
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };

    let mut lines = vec![user.email.clone()];
    if let Some(ref company) = user.company_name {
        lines.push(format!("  company: {}", company));
    }
    lines.push(format!("  role: {}", user.role));
    lines.push(format!("  manage profiles: {}", yes_no(access.is_granted())));
    lines.push(format!("  delete profiles: {}", yes_no(access.can_delete())));
    lines
}
