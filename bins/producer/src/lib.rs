pub mod cmd;
pub mod config;
pub mod error;
pub mod http;
pub mod store;

pub use error::ProducerError;
pub use store::MessageStore;
