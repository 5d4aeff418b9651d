//! Transaction listing, month reports and re-seeding

pub mod handlers;
pub mod service;

pub use service::{InitializeOutcome, TransactionService};
