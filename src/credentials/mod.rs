//! Credential lifecycle: password policy, digests, account storage and the
//! service that ties them together.

pub mod account;
pub mod error;
pub mod hasher;
pub mod policy;
pub mod service;
pub mod store;

pub use self::account::Account;
pub use self::error::{CredentialError, ErrorKind, StoreError};
pub use self::service::CredentialService;
pub use self::store::{SqliteUserStore, UserStore};
