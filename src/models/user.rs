use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct User {
    pub user_id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
}
