//! Terminal host for the country client.
//!
//! # Overview
//! `country-core` never touches the network; this crate supplies the I/O.
//! `UreqTransport` executes the requests the controller issues, `command`
//! turns input lines into actions, and `Session` ties them to a reader and a
//! writer.

pub mod command;
pub mod session;
pub mod transport;

pub use session::Session;
pub use transport::UreqTransport;

/// Base URL used when `COUNTRY_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
