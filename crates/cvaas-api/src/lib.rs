// cvaas-api: Async Rust client for the CloudVision resource APIs.
//
// The resource services (inventory, workspace, tag) are reached through
// their HTTPS/JSON gateway. Server-streaming `GetAll` calls come back as
// newline-delimited frames; unary `Set` calls as a single JSON object.

pub mod channel;
pub mod client;
pub mod error;
pub mod frame;
pub mod resources;
pub mod transport;

pub use channel::{Resource, ResourceChannel, ResultStream};
pub use client::GatewayClient;
pub use error::Error;
pub use frame::{RpcStatus, StreamResult};
pub use transport::{CONNECT_TIMEOUT, TlsMode, TransportConfig};
