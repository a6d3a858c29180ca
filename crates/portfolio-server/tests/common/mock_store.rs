use anyhow::Result;
use async_trait::async_trait;
use portfolio_common::models::certificate::Certificate;
use portfolio_server::auth::Credential;
use portfolio_server::store::{CertificateStore, UserRecord, UserStore};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default, Clone)]
pub struct MockStore {
    users: Arc<Mutex<HashMap<String, UserRecord>>>,
    certificates: Arc<Mutex<Vec<Certificate>>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user whose stored credential is `stored_password` verbatim
    pub fn insert_user(&self, id: i32, name: &str, email: &str, stored_password: &str) {
        let record = UserRecord {
            id,
            name: name.to_string(),
            email: email.to_string(),
            credential: Credential::parse(stored_password),
        };
        self.users
            .lock()
            .unwrap()
            .insert(email.to_string(), record);
    }

    #[allow(dead_code)]
    pub fn remove_user(&self, email: &str) {
        self.users.lock().unwrap().remove(email);
    }

    #[allow(dead_code)]
    pub fn insert_certificate(&self, id: i32, user_id: i32, title: &str) {
        self.certificates.lock().unwrap().push(Certificate {
            id,
            user_id,
            title: title.to_string(),
            image_url: format!("https://img.example.com/{}.png", id),
        });
    }
}

#[async_trait]
impl UserStore for MockStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        Ok(self.users.lock().unwrap().get(email).cloned())
    }
}

#[async_trait]
impl CertificateStore for MockStore {
    async fn list_for_user(&self, user_id: i32) -> Result<Vec<Certificate>> {
        let mut certs: Vec<Certificate> = self
            .certificates
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        certs.sort_by_key(|c| c.id);
        Ok(certs)
    }
}
