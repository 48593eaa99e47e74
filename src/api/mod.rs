//! Upstream REST API subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → client.rs (defaults, metrics)
//!     → transport.rs (reqwest exchange → RawResponse | TransportError)
//!     → normalize.rs (UpstreamBody variant → Envelope)
//!     → status.rs (reason phrase when none is supplied)
//!     → Envelope back to the handler
//! ```
//!
//! # Design Decisions
//! - The Envelope is the only thing callers ever read
//! - The status table is resolved during construction and never mutated
//! - Transports are pluggable behind the `Transport` trait

pub mod client;
pub mod envelope;
pub mod normalize;
pub mod posts;
pub mod status;
pub mod transport;

pub use client::ApiClient;
pub use envelope::Envelope;
pub use normalize::{Normalizer, UpstreamBody};
pub use posts::{NewPost, Post};
pub use status::{StatusMessageTable, StatusTableError};
pub use transport::{
    ApiRequest, HttpTransport, RawResponse, Transport, TransportError, TransportErrorKind,
};
