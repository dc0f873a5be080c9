// cvaas-core: Filters, stream draining and mutations on top of cvaas-api.

pub mod deadline;
pub mod error;
pub mod filter;
pub mod model;
pub mod mutation;
pub mod session;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use deadline::{CancelHandle, DEFAULT_TIMEOUT, Deadline};
pub use error::{CoreError, ErrorKind};
pub use filter::{DeviceCriteria, Feature, build_device_filter, build_workspace_filter};
pub use model::{DeviceRecord, WorkspaceRecord};
pub use mutation::{Ack, Tag, request_id};
pub use session::{Credentials, Session, SessionOptions, connect, connect_with};
pub use stream::drain;
