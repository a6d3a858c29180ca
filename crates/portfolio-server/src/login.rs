use anyhow::Result;
use std::sync::Arc;

use crate::auth::verify_dummy_password;
use crate::store::{UserRecord, UserStore};
use crate::token::{issue_token, TokenConfig};

/// Result of a login attempt. Token and user are only ever returned together.
#[derive(Debug)]
pub enum LoginOutcome {
    Success { token: String, user: UserRecord },
    Failure,
}

/// Email/password login: look up, verify, issue.
///
/// Unknown email and wrong password both end in [`LoginOutcome::Failure`].
/// Only store errors and signing failures are returned as `Err`.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: Arc<TokenConfig>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: Arc<TokenConfig>) -> Self {
        Self { users, tokens }
    }

    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                // Same hashing cost as a real mismatch
                verify_dummy_password(password);
                tracing::debug!("Login failed: unknown email");
                return Ok(LoginOutcome::Failure);
            }
        };

        if !user.credential.verify(password) {
            tracing::debug!("Login failed: password mismatch");
            return Ok(LoginOutcome::Failure);
        }

        if user.credential.is_plaintext() {
            tracing::warn!(user_id = user.id, "User still has a plaintext credential");
        }

        let token = issue_token(&user.email, &self.tokens)?;
        tracing::info!(user_id = user.id, "User logged in");
        Ok(LoginOutcome::Success { token, user })
    }
}
