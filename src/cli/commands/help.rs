//! `help` — the command reference.

use crate::cli::output;

/// Commands understood by the shell, as shown by `help`.
pub const COMMANDS: &[(&str, &str)] = &[
    ("generate-key [path]  (generate)", "Generate a new encryption key"),
    ("load-key <path>", "Load an existing encryption key"),
    ("new-vault [path]  (new)", "Create a new password file"),
    ("load-vault <path>  (load-pw-file)", "Load an existing password file"),
    ("add [site]", "Add or replace an entry"),
    ("fetch <site>  (get)", "Show an entry, including its secret"),
    ("delete <site>  (rm)", "Delete an entry"),
    ("list  (ls)", "List all entries (secrets hidden)"),
    ("status", "Show the active key and vault"),
    ("help  (?)", "Show this help message again"),
    ("quit  (exit)", "Close Tessera"),
];

/// Execute the `help` command.
pub fn execute() {
    output::print_help(COMMANDS);
}
