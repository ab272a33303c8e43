mod connection_registry;

pub use connection_registry::{ClosedConnection, ConnectionEntry, ConnectionRegistry};
