//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::Entry;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print the welcome banner shown when the shell starts.
pub fn banner() {
    println!();
    println!(
        "{}",
        style("Tessera - A terminal password manager, built simply")
            .cyan()
            .bold()
    );
    println!("{}", style("Type 'help' to see available commands").dim());
    println!();
}

/// Print a single entry as a Field/Value table, skipping empty fields.
pub fn print_entry(entry: &Entry) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);

    table.add_row(vec!["Site", entry.site.as_str()]);
    if let Some(username) = &entry.username {
        table.add_row(vec!["Username", username.as_str()]);
    }
    if let Some(email) = &entry.email {
        table.add_row(vec!["Email", email.as_str()]);
    }
    table.add_row(vec!["Type", entry.kind.as_str()]);
    table.add_row(vec!["Secret", entry.secret.as_str()]);

    println!("{table}");
}

/// Print an overview of entries (Site, Type, Username, Email). Secrets
/// are never shown here.
pub fn print_entries_table<'a>(entries: impl IntoIterator<Item = &'a Entry>) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Site", "Type", "Username", "Email"]);

    let mut rows = 0;
    for e in entries {
        table.add_row(vec![
            e.site.as_str(),
            e.kind.as_str(),
            e.username.as_deref().unwrap_or("-"),
            e.email.as_deref().unwrap_or("-"),
        ]);
        rows += 1;
    }

    if rows == 0 {
        info("No entries in this vault yet.");
        tip("Run `add` to store your first credential.");
        return;
    }

    println!("{table}");
}

/// Print the command reference as a two-column table.
pub fn print_help(commands: &[(&str, &str)]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Command", "Usage"]);

    for (command, usage) in commands {
        table.add_row(vec![*command, *usage]);
    }

    println!("{table}");
}

/// Print a two-column key/value table without a header.
pub fn print_pairs(rows: &[(&str, String)]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    for (label, value) in rows {
        table.add_row(vec![label.to_string(), value.clone()]);
    }

    println!("{table}");
}
