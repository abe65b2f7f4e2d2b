//! Shared UI primitives for profilecmd
//!
//! Conventions:
//! - Prompts: lowercase with colon and space: `company name: `
//! - Feedback: single word when possible: `Saved.`
//! - Errors go to stderr as `Error: <message>`

use anyhow::Result;
use crossterm::{
    cursor,
    terminal::{Clear, ClearType},
    ExecutableCommand,
};
use inquire::{ui::RenderConfig, Confirm, InquireError, Select, Text};
use std::io::{self, IsTerminal, Write};

// ============================================================================
// Layout Primitives
// ============================================================================

/// Truncate a string to max_chars, adding ellipsis if needed.
/// Result will be at most max_chars characters (including ellipsis if truncated).
pub fn truncate(s: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars - 1).collect();
    format!("{}…", kept)
}

/// Pad or truncate to exactly `width` characters.
pub fn fit(s: &str, width: usize) -> String {
    let cell = truncate(s, width);
    let pad = width.saturating_sub(cell.chars().count());
    format!("{}{}", cell, " ".repeat(pad))
}

// ============================================================================
// Message Functions
// ============================================================================

/// Print a status message to stdout
#[inline]
pub fn status(msg: &str) {
    println!("{}", msg);
}

/// Print an error message to stderr
#[inline]
pub fn error(msg: &str) {
    eprintln!("Error: {}", msg);
}

/// Print a warning message to stderr
#[inline]
pub fn warning(msg: &str) {
    eprintln!("Warning: {}", msg);
}

// ============================================================================
// Terminal
// ============================================================================

pub fn is_interactive() -> bool {
    io::stdin().is_terminal()
}

pub fn clear_screen() -> Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(Clear(ClearType::All))?;
    stdout.execute(cursor::MoveTo(0, 0))?;
    stdout.flush()?;
    Ok(())
}

/// Get terminal dimensions, defaulting to 80x24 if unavailable
pub fn term_size() -> (usize, usize) {
    crossterm::terminal::size()
        .map(|(w, h)| (w as usize, h as usize))
        .unwrap_or((80, 24))
}

/// Number of rows available to a selection list.
pub fn visible_lines() -> usize {
    let (_, height) = term_size();
    height.saturating_sub(4).max(5)
}

// ============================================================================
// Prompts
// ============================================================================

/// Get a minimal render config for inquire prompts
pub fn minimal_render_config() -> RenderConfig<'static> {
    RenderConfig::default_colored()
        .with_prompt_prefix(inquire::ui::Styled::new(""))
        .with_answered_prompt_prefix(inquire::ui::Styled::new(""))
}

/// Display a selection menu and return the chosen index
pub fn select<T: ToString>(prompt: &str, options: &[T]) -> Result<Option<usize>> {
    if options.is_empty() {
        return Ok(None);
    }

    // Index prefix keeps labels unique so the position can be recovered.
    let items: Vec<String> = options
        .iter()
        .enumerate()
        .map(|(i, o)| format!("{}. {}", i + 1, o.to_string()))
        .collect();

    let result = Select::new(prompt, items.clone())
        .with_render_config(minimal_render_config())
        .with_page_size(visible_lines())
        .with_vim_mode(true)
        .prompt_skippable()?;

    Ok(result.and_then(|selected| items.iter().position(|item| *item == selected)))
}

/// Prompt for text input with optional default value
pub fn text_input(prompt: &str, default: Option<&str>) -> Result<Option<String>> {
    let mut builder = Text::new(prompt).with_render_config(minimal_render_config());

    if let Some(d) = default {
        if !d.is_empty() {
            builder = builder.with_default(d);
        }
    }

    let result = builder.prompt_skippable()?;
    Ok(result)
}

/// Prompt for yes/no confirmation (default: no)
pub fn confirm(prompt: &str) -> Result<bool> {
    let result = Confirm::new(prompt)
        .with_render_config(minimal_render_config())
        .with_default(false)
        .prompt()?;
    Ok(result)
}

/// Confirmation for destructive actions. Any prompt failure counts as "no".
pub fn confirm_destructive(prompt: &str) -> bool {
    Confirm::new(prompt)
        .with_render_config(minimal_render_config())
        .with_default(false)
        .prompt()
        .unwrap_or(false)
}

/// Wait for user to press enter to continue
pub fn wait_for_continue() {
    println!();
    let _ = Text::new("[enter]")
        .with_render_config(minimal_render_config())
        .prompt_skippable();
}

// ============================================================================
// Form Input
// ============================================================================

/// Result type for form inputs that can be cancelled
pub enum FormResult<T> {
    Value(T),
    Cancelled,
}

/// Prompt for a field with optional current value
/// Format: `field [current]: ` or `field: ` if no current value
/// Empty input keeps the current value; `-` clears it.
pub fn prompt_field(field: &str, current: Option<&str>) -> Result<FormResult<String>> {
    let has_value = current.map(|v| !v.is_empty()).unwrap_or(false);
    let prompt = match current {
        Some(val) if !val.is_empty() => format!("{} [{}] (- clears): ", field, truncate(val, 30)),
        _ => format!("{}: ", field),
    };

    let result = Text::new(&prompt)
        .with_render_config(minimal_render_config())
        .prompt();

    match result {
        Ok(input) => Ok(FormResult::Value(resolve_field_input(&input, current, has_value))),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
            Ok(FormResult::Cancelled)
        }
        Err(e) => Err(e.into()),
    }
}

fn resolve_field_input(input: &str, current: Option<&str>, has_value: bool) -> String {
    let input = input.trim();
    if input == "-" && has_value {
        String::new()
    } else if input.is_empty() {
        current.unwrap_or("").to_string()
    } else {
        input.to_string()
    }
}

/// Prompt for a yes/no field with the current value as default
pub fn prompt_flag(field: &str, current: bool) -> Result<FormResult<bool>> {
    let result = Confirm::new(field)
        .with_render_config(minimal_render_config())
        .with_default(current)
        .prompt();

    match result {
        Ok(value) => Ok(FormResult::Value(value)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
            Ok(FormResult::Cancelled)
        }
        Err(e) => Err(e.into()),
    }
}

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }
    let (local, domain) = (parts[0], parts[1]);
    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}
