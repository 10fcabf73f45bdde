//! In-memory account ledger with atomic, deadlock-free transfers.
//!
//! Accounts live in an [`AccountStore`](domain::ports::AccountStore); the
//! [`TransferEngine`](application::engine::TransferEngine) moves funds between
//! two of them inside a single critical section, locking in canonical id
//! order so that opposing transfers can never deadlock.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
