//! Client core for the country service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the client-side
//! state (form, list, lookups, notices) in one `CountryListClient`.
//!
//! # Design
//! - `CountryClient` is stateless: it holds only `base_url` and has one
//!   `build_*` / `parse_*` pair per endpoint.
//! - `CountryListClient` owns all mutable state. User actions go through
//!   `dispatch`, responses through `complete`; every mutation ends with a
//!   full reload of the list.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod controller;
pub mod error;
pub mod form;
pub mod http;
pub mod notice;
pub mod types;
pub mod view;

pub use client::CountryClient;
pub use controller::{Action, CountryListClient, Effect, Ticket, Transport};
pub use error::{ApiError, ErrorKind};
pub use form::{FormMode, FormState};
pub use http::{HttpMethod, HttpRequest, HttpResponse, TransportError};
pub use notice::{Notice, NoticeBoard, NoticeKind, NOTICE_TTL};
pub use types::{Country, CountryInput};
pub use view::{ListState, Lookup, LookupState, Placeholder, Row, RowAction};
