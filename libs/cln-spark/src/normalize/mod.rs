//! Reshapes raw results of the remote node into the records the wallet uses.
//!
//! Every function in here is pure. The caller fetches the raw results
//! and passes them in.
pub mod channels;
pub mod fees;
pub mod funds;
pub mod invoices;
pub mod nodes;
pub mod routes;
