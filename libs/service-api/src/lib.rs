pub mod error;
pub mod http;
pub mod shutdown;
pub mod types;

pub use error::{ApiError, ServeError};
pub use http::{ServiceIdentity, bind, identity_routes, resolve_hostname, serve};
pub use shutdown::cancel_on_shutdown_signal;
pub use types::{FetchResponse, Message, NewMessage, StatusResponse, rfc3339_now};
