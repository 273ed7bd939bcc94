//! svcs engine - command orchestration
//!
//! Reads persisted state through a [`svcs_core::Repository`], runs the core
//! decisions, applies them, and reports typed outcomes.

pub mod commands;

pub use commands::{
    apply_engine_command, command_listing, CommandKind, EngineCommand, EngineCommandResult,
    EngineOptions, UnknownCommand,
};
