//! Server module for building the HTTP server
//!
//! `ServerBuilder` wires a record store and a seed source into a
//! [`TransactionService`](crate::transactions::TransactionService) and exposes
//! it through the routes in [`router`].

pub mod builder;
pub mod router;

pub use builder::ServerBuilder;
pub use router::{build_router, build_transaction_routes, health_routes};
