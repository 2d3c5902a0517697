// ubusly-api: Async Rust client for OpenWrt's ubus JSON-RPC endpoint

pub mod call;
pub mod client;
pub mod codec;
pub mod discriminator;
pub mod error;
pub mod response;
pub mod sections;
pub mod session;
pub mod transport;
pub mod uci;

pub use client::{SessionStatus, Uci, UbusClient};
pub use codec::{UciBool, UciInt, UciList};
pub use discriminator::Discriminator;
pub use error::{BusStatus, Error};
pub use response::{Change, ChangeOperation, ChangeSet, Response, ResultBody, SectionSet};
pub use sections::{ConfigSection, SectionOptions, SectionRegistry};
pub use session::{LoginOptions, Session, SessionId};
pub use transport::{HttpTransport, TlsMode, Transport, TransportConfig};
