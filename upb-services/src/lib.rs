//! # upb-services
//!
//! Adapters for the public information services behind the uPB browser:
//! encyclopedia summaries, instant answers, comics, news, quotes, jokes,
//! weather, definitions, prices, stock quotes, world time, and IP lookup.
//!
//! ## Design
//!
//! - One GET (or a small fixed number) per command through a shared
//!   [`http::HttpClient`]; status codes >= 400 are failures
//! - Upstream payloads are untrusted and schema-optional: every field is
//!   decoded leniently and has a fixed fallback
//! - Adapters never fail: errors are logged and rendered into a
//!   [`Reply`] titled `"Error"`
//! - Base URLs live in [`ServiceConfig`] so everything can run against a
//!   mock server
//!
//! # Examples
//!
//! ```no_run
//! # async fn example() -> upb_services::Result<()> {
//! let services = upb_services::Services::new(upb_services::ServiceConfig::default())?;
//! let reply = services.xkcd(Some(353)).await;
//! println!("{}\n{}", reply.title, reply.body);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod encode;
pub mod error;
pub mod http;
pub mod lenient;
pub mod services;
pub mod types;

pub use config::{Endpoints, ServiceConfig};
pub use error::{Result, ServiceError};
pub use services::Services;
pub use types::{Reply, Service};
