// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Login prompt reading from the operator's terminal.

use std::io::{BufRead, IsTerminal, Write};

use async_trait::async_trait;
use relay_core::{LoginPrompt, RelayError};
use secrecy::SecretString;

/// Asks the operator on stderr and reads the answer from stdin.
///
/// Fails when stdin is not a terminal, naming the variable that would have
/// supplied the value instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsolePrompt;

#[async_trait]
impl LoginPrompt for ConsolePrompt {
    async fn login_code(&self) -> Result<String, RelayError> {
        blocking(|| {
            require_terminal("TELEGRAM_LOGIN_CODE")?;
            eprint!("Enter the login code: ");
            let _ = std::io::stderr().flush();
            let mut line = String::new();
            std::io::stdin()
                .lock()
                .read_line(&mut line)
                .map_err(|e| auth_error(format!("failed to read login code: {e}")))?;
            Ok(line)
        })
        .await
    }

    async fn password(&self) -> Result<SecretString, RelayError> {
        blocking(|| {
            require_terminal("TELEGRAM_PASSWORD")?;
            eprint!("Enter the account password: ");
            let password = rpassword::read_password()
                .map_err(|e| auth_error(format!("failed to read password: {e}")))?;
            Ok(SecretString::from(password.trim().to_string()))
        })
        .await
    }
}

async fn blocking<T, F>(f: F) -> Result<T, RelayError>
where
    F: FnOnce() -> Result<T, RelayError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| RelayError::Internal(format!("prompt task failed: {e}")))?
}

fn require_terminal(var: &str) -> Result<(), RelayError> {
    if std::io::stdin().is_terminal() {
        Ok(())
    } else {
        Err(auth_error(format!(
            "stdin is not a terminal. Set {var} or run interactively."
        )))
    }
}

fn auth_error(message: String) -> RelayError {
    RelayError::Auth {
        message,
        source: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn blocking_returns_closure_result() {
        let value = blocking(|| Ok(7)).await.unwrap();
        assert_eq!(value, 7);

        let err = blocking::<(), _>(|| Err(auth_error("nope".into())))
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::Auth { ref message, .. } if message == "nope"));
    }

    #[test]
    fn non_terminal_names_the_variable() {
        // Under a test harness stdin is usually not a terminal.
        if std::io::stdin().is_terminal() {
            return;
        }
        let err = require_terminal("TELEGRAM_LOGIN_CODE").unwrap_err();
        assert!(err.to_string().contains("TELEGRAM_LOGIN_CODE"));
    }
}
