//! Core Lightning as a wallet backend, reached through a Spark wallet server.
//!
//! - [`primitives`]: wire types and the canonical wallet records
//! - [`spark`]: the dispatcher and the [`NodeBackend`] implementation
pub use cln_spark as spark;
pub use spark_primitives as primitives;

pub use cln_spark::{
    DispatchError, Dispatcher, NodeBackend, Settings, SettingsProvider, SharedSettings,
    SparkBackend,
};
