//! The backend-agnostic shapes used by the wallet.
//!
//! Every monetary field is in satoshi unless the name ends in `_msat`.
pub mod requests;
pub mod schema;

pub use requests::*;
pub use schema::*;
