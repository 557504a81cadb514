// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-time interactive login against the messaging account.
//!
//! The login runs once at startup before any request is served:
//!
//! ```text
//! Unauthenticated -> CodeRequested -> Authenticated
//!                                  -> PasswordRequired -> Authenticated
//! ```
//!
//! There are no backward transitions. A rejected code or password is fatal.

use relay_config::model::LoginConfig;
use relay_core::types::{LoginCodeToken, SignInOutcome};
use relay_core::{LoginPrompt, MessagingClient, RelayError};
use secrecy::SecretString;
use tracing::{debug, info};

/// Login values supplied up front instead of at the prompt.
#[derive(Default, Clone)]
pub struct LoginSecrets {
    code: Option<String>,
    password: Option<SecretString>,
}

impl LoginSecrets {
    /// Take the configured code and the first configured password
    /// (`password` before `login_password`). Empty values count as unset.
    pub fn from_config(config: &LoginConfig) -> Self {
        let code = present(config.code.as_deref()).map(str::to_string);
        let password = present(config.password.as_deref())
            .or_else(|| present(config.login_password.as_deref()))
            .map(|p| SecretString::from(p.to_string()));
        Self { code, password }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug)]
enum LoginState {
    Unauthenticated,
    CodeRequested(LoginCodeToken),
    PasswordRequired,
    Authenticated,
}

/// Drives the login state machine for one account.
pub struct Authenticator<'a> {
    secrets: LoginSecrets,
    prompt: &'a dyn LoginPrompt,
}

impl<'a> Authenticator<'a> {
    pub fn new(secrets: LoginSecrets, prompt: &'a dyn LoginPrompt) -> Self {
        Self { secrets, prompt }
    }

    /// Log `phone` in unless the session is already authorized.
    ///
    /// Calling this on an authorized session makes no login-protocol calls.
    pub async fn ensure_logged_in(
        &self,
        client: &dyn MessagingClient,
        phone: &str,
    ) -> Result<(), RelayError> {
        if client.is_authorized().await? {
            debug!("session already authorized");
            return Ok(());
        }

        let mut state = LoginState::Unauthenticated;
        loop {
            state = match state {
                LoginState::Unauthenticated => {
                    let token = client.request_login_code(phone).await?;
                    info!("login code requested");
                    LoginState::CodeRequested(token)
                }
                LoginState::CodeRequested(token) => {
                    let code = self.login_code().await?;
                    match client.sign_in(phone, &token, &code).await? {
                        SignInOutcome::Authorized => LoginState::Authenticated,
                        SignInOutcome::PasswordRequired => {
                            info!("account requires a second-factor password");
                            LoginState::PasswordRequired
                        }
                    }
                }
                LoginState::PasswordRequired => {
                    let password = self.password().await?;
                    client.check_password(&password).await?;
                    LoginState::Authenticated
                }
                LoginState::Authenticated => {
                    info!("login complete");
                    return Ok(());
                }
            };
        }
    }

    async fn login_code(&self) -> Result<String, RelayError> {
        match &self.secrets.code {
            Some(code) => Ok(code.clone()),
            None => Ok(self.prompt.login_code().await?.trim().to_string()),
        }
    }

    async fn password(&self) -> Result<SecretString, RelayError> {
        match &self.secrets.password {
            Some(password) => Ok(password.clone()),
            None => self.prompt.password().await,
        }
    }
}
