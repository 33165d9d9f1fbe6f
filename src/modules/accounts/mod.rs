//! Shared credential machinery behind the three role modules: the
//! credential record, the store seam, and the role-parameterized account
//! service that owns the token and recovery lifecycle.

pub mod model;
pub mod service;
pub mod store;

pub use model::{AccountRole, AccountSummary, CredentialRecord, TokenPair};
pub use service::AccountService;
pub use store::{CredentialStore, PgCredentialStore};
