//! Application layer containing the core business logic orchestration.
//!
//! `TransferEngine` owns the transfer algorithm; `Ledger` is the service
//! facade adapters call into. Both are written against the `AccountStore`
//! port and never hold balance state themselves.

pub mod engine;
pub mod ledger;
