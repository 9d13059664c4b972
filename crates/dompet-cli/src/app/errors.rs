//! Errors that carry a process exit code and a user-facing hint.

use std::fmt;

use dompet_core::LedgerError;

use crate::constants::exit_codes;

#[derive(Debug)]
pub struct CliError {
    code: i32,
    message: String,
    hint: Option<String>,
}

impl CliError {
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            code: exit_codes::NOT_FOUND,
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            code: exit_codes::INVALID_INPUT,
            message: message.into(),
            hint: None,
        }
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Map any error bubbling out of a command to its exit code.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.code();
    }
    if let Some(ledger_err) = err.downcast_ref::<LedgerError>() {
        if ledger_err.is_validation() {
            return exit_codes::INVALID_INPUT;
        }
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let not_found = anyhow::Error::new(CliError::not_found("No transaction 7", "dompet list"));
        let invalid = anyhow::Error::new(CliError::invalid_input("bad month"));
        let validation =
            anyhow::Error::new(LedgerError::Validation("amount must be positive".to_string()));
        let other = anyhow::anyhow!("disk on fire");

        assert_eq!(exit_code_for(&not_found), exit_codes::NOT_FOUND);
        assert_eq!(exit_code_for(&invalid), exit_codes::INVALID_INPUT);
        assert_eq!(exit_code_for(&validation), exit_codes::INVALID_INPUT);
        assert_eq!(exit_code_for(&other), 1);
    }
}
