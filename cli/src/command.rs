//! One line of input, parsed.

use country_core::Action;
use thiserror::Error;

pub const HELP: &str = "\
commands:
  refresh               reload the country list
  name <text>           set the form name
  code <text>           set the form code
  submit                create, or update the country being edited
  clear                 reset the form
  edit <id>             load a country into the form
  delete <id>           delete a country (asks first)
  code-of <name>        look up a country's code
  name-of <code>        look up a code's country
  dismiss <notice-id>   hide a notice
  help                  show this text
  quit                  leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Act(Action),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a valid id")]
    BadId(String),
}

/// Parse one input line. Blank lines are `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "refresh" | "list" => Command::Act(Action::Refresh),
        // Empty text is allowed so a field can be blanked.
        "name" => Command::Act(Action::SetName(rest.to_string())),
        "code" => Command::Act(Action::SetCode(rest.to_string())),
        "submit" | "save" => Command::Act(Action::Submit),
        "clear" => Command::Act(Action::Clear),
        "edit" => Command::Act(Action::BeginEdit(id_arg("edit", rest)?)),
        "delete" => Command::Act(Action::Remove(id_arg("delete", rest)?)),
        // Lookups pass empty input through; the controller reports it.
        "code-of" => Command::Act(Action::LookupCode(rest.to_string())),
        "name-of" => Command::Act(Action::LookupName(rest.to_string())),
        "dismiss" => {
            let id = rest.parse().map_err(|_| CommandError::BadId(rest.to_string()))?;
            Command::Act(Action::Dismiss(id))
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// Answers to the delete prompt. Anything but yes is no.
pub fn is_yes(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn id_arg(command: &'static str, rest: &str) -> Result<i32, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    rest.parse().map_err(|_| CommandError::BadId(rest.to_string()))
}
