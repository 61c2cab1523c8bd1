//! A node backend that talks to Core Lightning through a Spark wallet server.
//!
//! The [`Dispatcher`] posts calls to the `/rpc`-endpoint of the Spark server
//! and coalesces identical calls that are in flight at the same time.
//! The [`SparkBackend`] implements the wallet operations of [`NodeBackend`]
//! on top of it and reshapes the responses into the records the wallet uses.
pub mod backend;
pub mod dispatcher;
pub mod error;
pub mod normalize;
pub mod settings;
pub mod spark;
pub mod transport;

pub use backend::NodeBackend;
pub use dispatcher::Dispatcher;
pub use error::DispatchError;
pub use settings::{Settings, SettingsProvider, SharedSettings};
pub use spark::SparkBackend;
