//! Request/response mapping subsystem.
//!
//! # Data Flow
//! ```text
//! Request<Body> / Response<Body>
//!     → headers.rs (headers, cookies)
//!     → form.rs (query, urlencoded form)
//!     → body.rs (buffer, reinstall)
//!     → parser::dispatch (body, authorization)
//!     → dict.rs (Dict + collected errors = Mapping)
//! ```
//!
//! # Design Decisions
//! - Keys are only present when their value is non-empty
//! - One composite error per call, the partial map is always returned
//! - Only a failed body read aborts the call

pub mod body;
pub mod dict;
pub mod form;
pub mod headers;
pub mod request;
pub mod response;

pub use dict::{map_values, omit_empty, Dict, Mapping};
pub use request::map_request;
pub use response::map_response;
