use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod user {
    use super::*;

    /// Request body of `POST /register`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserCreate {
        pub name: String,
        pub phone: String,
        pub password: String,
    }

    /// Form body of `POST /token`. `username` carries the phone.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TokenRequest {
        pub username: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Token {
        pub access_token: String,
        pub token_type: String,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct UserView {
        pub id: i64,
        pub name: String,
        pub phone: String,
    }
}

pub mod category {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: i64,
        pub name: String,
    }
}

pub mod transaction {
    use super::*;
    use crate::category::CategoryView;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Expense,
        Income,
    }

    /// Request body of `POST /transactions`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub amount: f64,
        pub description: Option<String>,
        pub category_id: Option<i64>,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: i64,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub amount: f64,
        pub description: Option<String>,
        pub created_at: DateTime<Utc>,
        pub user_id: i64,
        pub category: Option<CategoryView>,
    }
}

pub mod webhook {
    use super::*;

    /// Inbound chat message. Nothing proves the sender owns `phone`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct MessageIn {
        pub phone: String,
        pub message: String,
    }

    /// Result of an ingestion, serialized untagged:
    /// `{"success": true, "transaction_id": 1}` or `{"error": "invalid_message"}`.
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum IngestResult {
        Created { success: bool, transaction_id: i64 },
        Rejected { error: String },
    }

    pub const INVALID_MESSAGE: &str = "invalid_message";
}

pub mod status {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Status {
        pub message: String,
    }
}
