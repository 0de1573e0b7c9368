// userdeck-api: Async Rust client for the user directory provider.
//
// The provider exposes a single collection endpoint (`GET /usuarios`)
// returning a JSON array of user records. This crate owns the wire shape
// and the transport; `userdeck-core` maps both into domain types.

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::DirectoryClient;
pub use error::Error;
pub use models::{RawId, RawInterests, UserRecord};
pub use transport::{TlsMode, TransportConfig};
