//! # Credo (credential management service)
//!
//! `credo` registers usernames with passwords, authenticates login attempts
//! and lets users change their password. Accounts live in a single `SQLite`
//! table with a UNIQUE constraint on `username`.
//!
//! ## Passwords
//!
//! A password is accepted when it has at least 8 characters, only ASCII
//! letters and digits, and at least one of each. Only a digest is stored:
//! one unsalted SHA-256 round, hex encoded. This is weak against offline
//! brute force and identical passwords share a digest; see
//! [`credentials::hasher`].
//!
//! ## Layout
//!
//! - [`credentials`]: policy, hasher, store and service.
//! - [`credo`]: HTTP routes mapping service results to status codes.
//! - [`cli`]: argument parsing, telemetry and the server action.

pub mod cli;
pub mod credentials;
pub mod credo;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
