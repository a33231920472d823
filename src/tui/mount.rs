//! Render target check.

use std::io::{self, IsTerminal};

use crate::table::TableError;

/// Proof that the UI has a terminal to draw on.
#[derive(Debug)]
pub struct Mount {
    _private: (),
}

impl Mount {
    /// Checks stdout. Fails before any drawing when it is not a terminal.
    pub fn stdout() -> Result<Self, TableError> {
        Self::from_is_terminal(io::stdout().is_terminal())
    }

    pub fn from_is_terminal(is_terminal: bool) -> Result<Self, TableError> {
        if is_terminal {
            Ok(Self { _private: () })
        } else {
            Err(TableError::MissingMount(
                "stdout is not a terminal".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_terminal_is_missing_mount() {
        let err = Mount::from_is_terminal(false).unwrap_err();
        assert!(matches!(err, TableError::MissingMount(_)));
        assert!(err.to_string().contains("not a terminal"));
        assert!(Mount::from_is_terminal(true).is_ok());
    }
}
