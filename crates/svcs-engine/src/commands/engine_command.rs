//! Tagged command type and its single dispatch.
//!
//! One invocation maps to exactly one `EngineCommand`; `apply_engine_command`
//! runs it against a [`Repository`] and returns a typed result whose
//! `Display` is the text shown to the user.

use svcs_core::errors::ExErrorKind;
use svcs_core::{MatchMode, Repository, Result};

use crate::commands::checkout::{checkout, CheckoutOutcome};
use crate::commands::commit::{commit, CommitOutcome};
use crate::commands::config::{config_get, config_set, ConfigOutcome};
use crate::commands::index::{add, list_tracked, AddOutcome, TrackedListing};
use crate::commands::log::{show_log, LogOutcome};

/// Per-invocation engine settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    pub match_mode: MatchMode,
}

/// User-visible commands, in listing order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Config,
    Add,
    Log,
    Commit,
    Checkout,
}

impl CommandKind {
    pub const ALL: [CommandKind; 5] = [
        CommandKind::Config,
        CommandKind::Add,
        CommandKind::Log,
        CommandKind::Commit,
        CommandKind::Checkout,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::Config => "config",
            CommandKind::Add => "add",
            CommandKind::Log => "log",
            CommandKind::Commit => "commit",
            CommandKind::Checkout => "checkout",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CommandKind::Config => "Get and set a username.",
            CommandKind::Add => "Add a file to the index.",
            CommandKind::Log => "Show commit logs.",
            CommandKind::Commit => "Save changes.",
            CommandKind::Checkout => "Restore a file.",
        }
    }

    pub fn from_name(name: &str) -> Option<CommandKind> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

/// The command listing shown for no arguments or `--help`
pub fn command_listing() -> String {
    let mut out = String::from("These are SVCS commands:");
    for kind in CommandKind::ALL {
        out.push_str(&format!("\n{:<11}{}", kind.name(), kind.description()));
    }
    out
}

/// First argument names no known command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand {
    pub name: String,
}

impl std::fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' is not a SVCS command.", self.name)
    }
}

impl std::error::Error for UnknownCommand {}

/// One engine invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    /// Show the command listing
    Help,
    /// Show the author, or replace it with `name`
    Config { name: Option<String> },
    /// List tracked files, or stage `path`
    Add { path: Option<String> },
    Log,
    Commit { message: Option<String> },
    Checkout { id: Option<String> },
}

impl EngineCommand {
    /// Build a command from positional arguments
    ///
    /// The first argument selects the command and the second, if any, is its
    /// argument. Further arguments are ignored.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> std::result::Result<Self, UnknownCommand> {
        let Some(name) = args.first().map(AsRef::as_ref) else {
            return Ok(EngineCommand::Help);
        };
        if name == "--help" {
            return Ok(EngineCommand::Help);
        }
        let arg = args.get(1).map(|a| a.as_ref().to_string());

        match CommandKind::from_name(name) {
            Some(CommandKind::Config) => Ok(EngineCommand::Config { name: arg }),
            Some(CommandKind::Add) => Ok(EngineCommand::Add { path: arg }),
            Some(CommandKind::Log) => Ok(EngineCommand::Log),
            Some(CommandKind::Commit) => Ok(EngineCommand::Commit { message: arg }),
            Some(CommandKind::Checkout) => Ok(EngineCommand::Checkout { id: arg }),
            None => Err(UnknownCommand {
                name: name.to_string(),
            }),
        }
    }

    pub fn kind(&self) -> Option<CommandKind> {
        match self {
            EngineCommand::Help => None,
            EngineCommand::Config { .. } => Some(CommandKind::Config),
            EngineCommand::Add { .. } => Some(CommandKind::Add),
            EngineCommand::Log => Some(CommandKind::Log),
            EngineCommand::Commit { .. } => Some(CommandKind::Commit),
            EngineCommand::Checkout { .. } => Some(CommandKind::Checkout),
        }
    }
}

/// Result of applying an engine command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommandResult {
    Listing,
    Config(ConfigOutcome),
    Tracked(TrackedListing),
    Add(AddOutcome),
    Log(LogOutcome),
    Commit(CommitOutcome),
    Checkout(CheckoutOutcome),
}

impl EngineCommandResult {
    /// Classification of a reported condition; `None` on success
    pub fn kind(&self) -> Option<ExErrorKind> {
        match self {
            EngineCommandResult::Config(ConfigOutcome::Unset) => {
                Some(ExErrorKind::PreconditionUnmet)
            }
            EngineCommandResult::Add(outcome) => outcome.kind(),
            EngineCommandResult::Commit(outcome) => outcome.kind(),
            EngineCommandResult::Checkout(outcome) => outcome.kind(),
            _ => None,
        }
    }
}

impl std::fmt::Display for EngineCommandResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineCommandResult::Listing => f.write_str(&command_listing()),
            EngineCommandResult::Config(o) => write!(f, "{}", o),
            EngineCommandResult::Tracked(o) => write!(f, "{}", o),
            EngineCommandResult::Add(o) => write!(f, "{}", o),
            EngineCommandResult::Log(o) => write!(f, "{}", o),
            EngineCommandResult::Commit(o) => write!(f, "{}", o),
            EngineCommandResult::Checkout(o) => write!(f, "{}", o),
        }
    }
}

/// Apply an engine command
///
/// # Errors
///
/// Only storage-level failures are returned as `Err`; every user-facing
/// condition is part of the result.
pub fn apply_engine_command(
    cmd: EngineCommand,
    repo: &mut dyn Repository,
    options: &EngineOptions,
) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::Help => Ok(EngineCommandResult::Listing),
        EngineCommand::Config { name: None } => config_get(repo).map(EngineCommandResult::Config),
        EngineCommand::Config { name: Some(name) } => {
            config_set(&name, repo).map(EngineCommandResult::Config)
        }
        EngineCommand::Add { path: None } => list_tracked(repo).map(EngineCommandResult::Tracked),
        EngineCommand::Add { path: Some(path) } => {
            add(&path, options, repo).map(EngineCommandResult::Add)
        }
        EngineCommand::Log => show_log(repo).map(EngineCommandResult::Log),
        EngineCommand::Commit { message } => {
            commit(message.as_deref(), options, repo).map(EngineCommandResult::Commit)
        }
        EngineCommand::Checkout { id } => {
            checkout(id.as_deref(), options, repo).map(EngineCommandResult::Checkout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_is_help() {
        let args: [&str; 0] = [];
        assert_eq!(EngineCommand::from_args(&args), Ok(EngineCommand::Help));
        assert_eq!(EngineCommand::from_args(&["--help"]), Ok(EngineCommand::Help));
    }

    #[test]
    fn test_command_with_argument() {
        assert_eq!(
            EngineCommand::from_args(&["commit", "first", "ignored"]),
            Ok(EngineCommand::Commit {
                message: Some("first".to_string())
            })
        );
        assert_eq!(
            EngineCommand::from_args(&["checkout"]),
            Ok(EngineCommand::Checkout { id: None })
        );
    }

    #[test]
    fn test_unknown_command() {
        let err = EngineCommand::from_args(&["push"]).unwrap_err();
        assert_eq!(err.to_string(), "'push' is not a SVCS command.");
    }

    #[test]
    fn test_listing_layout() {
        let listing = command_listing();
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines[0], "These are SVCS commands:");
        assert_eq!(lines[1], "config     Get and set a username.");
        assert_eq!(lines[5], "checkout   Restore a file.");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_kind_round_trips_through_name() {
        for kind in CommandKind::ALL {
            assert_eq!(CommandKind::from_name(kind.name()), Some(kind));
        }
    }
}
