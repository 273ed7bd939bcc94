//! Command orchestration layer.
//!
//! The engine layer owns lifecycle logging (`log_op_start!` / `log_op_end!`
//! / `log_op_error!`). Core and store only emit `tracing::debug!` details.

pub mod checkout;
pub mod commit;
pub mod config;
pub mod engine_command;
pub mod index;
pub mod log;

pub use engine_command::{
    apply_engine_command, command_listing, CommandKind, EngineCommand, EngineCommandResult,
    EngineOptions, UnknownCommand,
};
