use crate::login::AuthService;
use crate::store::{CertificateStore, PgStore, UserStore};
use crate::token::TokenConfig;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub certificates: Arc<dyn CertificateStore>,
    pub tokens: Arc<TokenConfig>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    /// Create a new app state over arbitrary stores
    pub fn new(
        users: Arc<dyn UserStore>,
        certificates: Arc<dyn CertificateStore>,
        tokens: TokenConfig,
    ) -> Self {
        let tokens = Arc::new(tokens);
        let auth = Arc::new(AuthService::new(users.clone(), tokens.clone()));
        Self {
            users,
            certificates,
            tokens,
            auth,
        }
    }

    /// App state backed by Postgres for both users and certificates
    pub fn with_pool(pool: PgPool, tokens: TokenConfig) -> Self {
        let store = Arc::new(PgStore::new(pool));
        Self::new(store.clone(), store, tokens)
    }
}
