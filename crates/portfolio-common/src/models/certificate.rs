use serde::{Deserialize, Serialize};

/// A certificate shown on a user's portfolio
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub image_url: String,
}
