//! Wire types shared by the Spark backend.
//!
//! - `json_rpc`: the envelope posted to the Spark server, range directives
//!   and call fingerprints
//! - `methods`: typed descriptors for every remote method we call
//! - `remote`: the raw shapes returned by the remote node
//! - `wallet`: canonical records and typed requests exposed to the wallet
pub mod common_schemas;
pub mod json_rpc;
pub mod methods;
pub mod no_params;
pub mod remote;
pub mod validation;
pub mod wallet;

pub use secp256k1;
