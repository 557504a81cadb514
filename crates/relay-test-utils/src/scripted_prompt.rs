// SPDX-FileCopyrightText: 2026 Relay Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Login prompt that answers from canned values.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::Mutex;

use relay_core::{LoginPrompt, RelayError};

/// Answers login prompts from queues; an empty queue is an auth error.
#[derive(Default)]
pub struct ScriptedPrompt {
    codes: Mutex<VecDeque<String>>,
    passwords: Mutex<VecDeque<String>>,
    code_prompts: AtomicUsize,
    password_prompts: AtomicUsize,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_code(mut self, code: &str) -> Self {
        self.codes.get_mut().push_back(code.to_string());
        self
    }

    pub fn with_password(mut self, password: &str) -> Self {
        self.passwords.get_mut().push_back(password.to_string());
        self
    }

    /// How many times a login code was asked for.
    pub fn code_prompts(&self) -> usize {
        self.code_prompts.load(Ordering::SeqCst)
    }

    /// How many times a password was asked for.
    pub fn password_prompts(&self) -> usize {
        self.password_prompts.load(Ordering::SeqCst)
    }
}

fn exhausted(what: &str) -> RelayError {
    RelayError::Auth {
        message: format!("no scripted {what} left"),
        source: None,
    }
}

#[async_trait]
impl LoginPrompt for ScriptedPrompt {
    async fn login_code(&self) -> Result<String, RelayError> {
        self.code_prompts.fetch_add(1, Ordering::SeqCst);
        self.codes
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| exhausted("login code"))
    }

    async fn password(&self) -> Result<SecretString, RelayError> {
        self.password_prompts.fetch_add(1, Ordering::SeqCst);
        self.passwords
            .lock()
            .await
            .pop_front()
            .map(SecretString::from)
            .ok_or_else(|| exhausted("password"))
    }
}
