//! Author configuration command.

use std::time::Instant;

use svcs_core::{log_op_end, log_op_error, log_op_start, Repository};
use svcs_core::Result;

/// Outcome of `config [name]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOutcome {
    /// The configured author name
    Current(String),
    /// No author configured yet
    Unset,
    /// The author name was replaced
    Updated(String),
}

impl std::fmt::Display for ConfigOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigOutcome::Current(name) | ConfigOutcome::Updated(name) => {
                write!(f, "The username is {}.", name)
            }
            ConfigOutcome::Unset => f.write_str("Please, tell me who you are."),
        }
    }
}

/// Report the configured author
pub fn config_get(repo: &dyn Repository) -> Result<ConfigOutcome> {
    log_op_start!("config_get");
    let start = Instant::now();

    let outcome = repo
        .read_config()
        .map(|author| author.map_or(ConfigOutcome::Unset, ConfigOutcome::Current))
        .map_err(|e| {
            log_op_error!("config_get", e, duration_ms = start.elapsed().as_millis() as u64);
            e
        })?;

    log_op_end!(
        "config_get",
        duration_ms = start.elapsed().as_millis() as u64,
        configured = !matches!(outcome, ConfigOutcome::Unset)
    );
    Ok(outcome)
}

/// Replace the configured author and report the stored value
pub fn config_set(name: &str, repo: &mut dyn Repository) -> Result<ConfigOutcome> {
    log_op_start!("config_set");
    let start = Instant::now();

    let outcome = config_set_impl(name, repo).map_err(|e| {
        log_op_error!("config_set", e, duration_ms = start.elapsed().as_millis() as u64);
        e
    })?;

    log_op_end!("config_set", duration_ms = start.elapsed().as_millis() as u64);
    Ok(outcome)
}

fn config_set_impl(name: &str, repo: &mut dyn Repository) -> Result<ConfigOutcome> {
    repo.write_config(name)?;
    let stored = repo.read_config()?.unwrap_or_else(|| name.to_string());
    Ok(ConfigOutcome::Updated(stored))
}

#[cfg(test)]
mod tests {
    use super::*;
    use svcs_core::MemoryRepository;

    #[test]
    fn test_unset_then_set() {
        let mut repo = MemoryRepository::new();
        assert_eq!(config_get(&repo).unwrap(), ConfigOutcome::Unset);

        let outcome = config_set("alice", &mut repo).unwrap();
        assert_eq!(outcome, ConfigOutcome::Updated("alice".to_string()));
        assert_eq!(outcome.to_string(), "The username is alice.");
        assert_eq!(
            config_get(&repo).unwrap(),
            ConfigOutcome::Current("alice".to_string())
        );
    }

    #[test]
    fn test_unset_text() {
        assert_eq!(
            ConfigOutcome::Unset.to_string(),
            "Please, tell me who you are."
        );
    }
}
