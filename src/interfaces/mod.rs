//! Adapters translating external formats into ledger calls.

pub mod csv;
