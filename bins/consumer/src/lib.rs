pub mod checker;
pub mod client;
pub mod cmd;
pub mod config;
pub mod error;
pub mod http;

pub use client::ProducerClient;
pub use error::{ClientError, ConsumerError};
