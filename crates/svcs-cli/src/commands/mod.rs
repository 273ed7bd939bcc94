//! Invocation handling: bootstrap the storage root, parse the positional
//! arguments into one engine command, apply it and render the result.

use std::path::PathBuf;

use svcs_core::{ExError, MatchMode};
use svcs_core_types::RequestContext;
use svcs_engine::{apply_engine_command, EngineCommand, EngineOptions};
use svcs_store::FsRepository;

use crate::Cli;

/// Resolved locations and options for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub root: PathBuf,
    pub work_dir: PathBuf,
    pub options: EngineOptions,
}

impl Invocation {
    pub fn from_cli(cli: &Cli) -> Self {
        let root = if cli.root.is_absolute() {
            cli.root.clone()
        } else {
            cli.work_dir.join(&cli.root)
        };
        let match_mode = if cli.exact {
            MatchMode::Exact
        } else {
            MatchMode::Substring
        };
        Self {
            root,
            work_dir: cli.work_dir.clone(),
            options: EngineOptions { match_mode },
        }
    }
}

/// Run one invocation and return the text to print
///
/// An unknown command is reported as text. Only storage failures are errors.
pub fn execute(cli: Cli) -> Result<String, ExError> {
    let invocation = Invocation::from_cli(&cli);

    let parsed = if cli.help {
        Ok(EngineCommand::Help)
    } else {
        EngineCommand::from_args(&cli.args)
    };

    let ctx = RequestContext::new()
        .with_command(cli.args.first().cloned().unwrap_or_else(|| "help".to_string()));
    let span = tracing::info_span!(
        "svcs",
        request_id = %ctx.request_id,
        command = ctx.command.as_deref().unwrap_or_default()
    );
    let _guard = span.enter();

    let mut repo = FsRepository::open_or_init(&invocation.root, &invocation.work_dir)
        .map_err(|e| e.with_request_id(ctx.request_id.clone()))?;

    let cmd = match parsed {
        Ok(cmd) => cmd,
        Err(unknown) => {
            tracing::debug!(name = %unknown.name, "unknown command");
            return Ok(unknown.to_string());
        }
    };

    let result = apply_engine_command(cmd, &mut repo, &invocation.options)
        .map_err(|e| e.with_request_id(ctx.request_id.clone()))?;
    if let Some(kind) = result.kind() {
        tracing::debug!(err_code = kind.code(), "command reported a condition");
    }
    Ok(result.to_string())
}
