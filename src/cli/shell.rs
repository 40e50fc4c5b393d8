//! The interactive `tessera >` prompt loop.
//!
//! Each line is parsed into a `ShellCommand` and dispatched to a
//! command handler together with the session's `VaultEngine`. Errors
//! are reported and the loop keeps going; only `quit` or end of input
//! ends the session.

use console::style;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use super::commands;
use super::output;
use super::Workspace;
use crate::errors::{Result, TesseraError};
use crate::vault::VaultEngine;

/// A parsed shell line. Optional arguments are prompted for when missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    GenerateKey(Option<String>),
    LoadKey(Option<String>),
    NewVault(Option<String>),
    LoadVault(Option<String>),
    Add(Option<String>),
    Delete(Option<String>),
    Fetch(Option<String>),
    List,
    Status,
    Help,
    Quit,
}

/// Parse one non-empty input line.
///
/// Everything after the command word is a single argument, so site
/// names may contain spaces. Unknown commands are returned as `Err`.
pub fn parse(line: &str) -> std::result::Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let arg = (!rest.is_empty()).then(|| rest.to_string());

    let command = match word.to_ascii_lowercase().as_str() {
        "generate-key" | "generate" => ShellCommand::GenerateKey(arg),
        "load-key" => ShellCommand::LoadKey(arg),
        "new-vault" | "new" => ShellCommand::NewVault(arg),
        "load-vault" | "load-pw-file" => ShellCommand::LoadVault(arg),
        "add" => ShellCommand::Add(arg),
        "delete" | "rm" => ShellCommand::Delete(arg),
        "fetch" | "get" => ShellCommand::Fetch(arg),
        "list" | "ls" => ShellCommand::List,
        "status" => ShellCommand::Status,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        _ => return Err(word.to_string()),
    };
    Ok(command)
}

/// Run one command against the engine.
pub fn dispatch(engine: &mut VaultEngine, ws: &Workspace, command: ShellCommand) -> Result<()> {
    match command {
        ShellCommand::GenerateKey(path) => {
            commands::generate_key::execute(engine, ws, path.as_deref())
        }
        ShellCommand::LoadKey(path) => commands::load_key::execute(engine, ws, path.as_deref()),
        ShellCommand::NewVault(path) => commands::new_vault::execute(engine, ws, path.as_deref()),
        ShellCommand::LoadVault(path) => commands::load_vault::execute(engine, ws, path.as_deref()),
        ShellCommand::Add(site) => commands::add::execute(engine, site.as_deref()),
        ShellCommand::Delete(site) => commands::delete::execute(engine, site.as_deref()),
        ShellCommand::Fetch(site) => commands::fetch::execute(engine, site.as_deref()),
        ShellCommand::List => commands::list::execute(engine),
        ShellCommand::Status => commands::status::execute(engine, ws),
        ShellCommand::Help => {
            commands::help::execute();
            Ok(())
        }
        ShellCommand::Quit => Ok(()),
    }
}

/// Read commands until `quit` or end of input.
pub fn run(engine: &mut VaultEngine, ws: &Workspace) -> Result<()> {
    let mut editor = DefaultEditor::new()
        .map_err(|e| TesseraError::CommandFailed(format!("line editor: {e}")))?;
    let prompt = format!("{} ", style("tessera >").cyan().bold());

    loop {
        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);

                match parse(line) {
                    Ok(ShellCommand::Quit) => break,
                    Ok(command) => {
                        if let Err(e) = dispatch(engine, ws, command) {
                            output::error(&e.to_string());
                        }
                    }
                    Err(unknown) => output::warning(&format!(
                        "Hmm. Looks like '{unknown}' doesn't exist. Type 'help' to see available commands."
                    )),
                }
            }
            Err(ReadlineError::Interrupted) => output::info("Use 'quit' to exit."),
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                return Err(TesseraError::CommandFailed(format!("reading input: {e}")));
            }
        }
    }

    println!("Goodbye! Thank you for using Tessera!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_and_aliases() {
        assert_eq!(parse("generate"), Ok(ShellCommand::GenerateKey(None)));
        assert_eq!(
            parse("load-key /tmp/a.key"),
            Ok(ShellCommand::LoadKey(Some("/tmp/a.key".into())))
        );
        assert_eq!(parse("new"), Ok(ShellCommand::NewVault(None)));
        assert_eq!(
            parse("load-pw-file v.json"),
            Ok(ShellCommand::LoadVault(Some("v.json".into())))
        );
        assert_eq!(parse("ls"), Ok(ShellCommand::List));
        assert_eq!(parse("exit"), Ok(ShellCommand::Quit));
        assert_eq!(parse("?"), Ok(ShellCommand::Help));
    }

    #[test]
    fn command_word_is_case_insensitive() {
        assert_eq!(
            parse("FETCH github.com"),
            Ok(ShellCommand::Fetch(Some("github.com".into())))
        );
    }

    #[test]
    fn argument_keeps_inner_spaces() {
        assert_eq!(
            parse("delete   my bank  "),
            Ok(ShellCommand::Delete(Some("my bank".into())))
        );
    }

    #[test]
    fn unknown_command_is_reported() {
        assert_eq!(parse("frobnicate now"), Err("frobnicate".to_string()));
    }
}
