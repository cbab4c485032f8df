//! Server module for building the HTTP server
//!
//! `ServerBuilder` wires repositories, authentication and error mapping into
//! a `ServerHost`, then exposes it over REST with health checks.

pub mod builder;
pub mod exposure;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::ServerHost;
