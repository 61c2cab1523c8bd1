//! Requests and responses of the remote node as exposed by the Spark server.
//!
//! The structs only cover the fields we use. Fields that are missing in
//! some versions of the node are optional or default to zero.
pub mod funds;
pub mod invoices;
pub mod node;
pub mod peers;

pub use funds::*;
pub use invoices::*;
pub use node::*;
pub use peers::*;
