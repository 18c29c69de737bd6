//! Splitwise HTTP API
//!
//! - `transport`: the HTTP seam and its reqwest implementation
//! - `client`: authentication and the typed REST operations

pub mod client;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ExpenseScope, SplitwiseClient};
pub use transport::{ReqwestTransport, Transport};
