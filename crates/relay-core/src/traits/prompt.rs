// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Human-in-the-loop input for the one-time account login.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::RelayError;

/// Supplies login secrets that were not configured up front.
///
/// Production wires this to the console; tests inject canned values.
#[async_trait]
pub trait LoginPrompt: Send + Sync {
    /// Returns the one-time login code the network just sent.
    async fn login_code(&self) -> Result<String, RelayError>;

    /// Returns the account's second-factor password.
    async fn password(&self) -> Result<SecretString, RelayError>;
}
