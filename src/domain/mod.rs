//! Domain layer: account values, transfer requests, batch commands and the
//! storage port the application layer is written against.

pub mod account;
pub mod command;
pub mod ports;
pub mod transfer;
