//! Personal-finance engine.
//!
//! Stores users, categories and income/expense transactions, and turns
//! free-text messages (`expense 50 lunch #food`) into transactions through
//! [`Engine::ingest`].

pub use categories::Category;
pub use error::EngineError;
pub use message::{ParsedIntent, parse};
pub use ops::{Engine, EngineBuilder, IngestOutcome};
pub use transactions::{NewTransaction, Transaction, TransactionDetail, TransactionKind};
pub use users::User;

mod categories;
mod error;
pub mod message;
mod ops;
mod transactions;
mod users;

type ResultEngine<T> = Result<T, EngineError>;
