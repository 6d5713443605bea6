//! uPB: a command-line JSON information browser.
//!
//! Reads one command per line and prints a titled result fetched from a
//! public web service:
//! Prompt → [`Command::parse`] → [`Session::execute`] → service adapter → output
//!
//! # Architecture
//!
//! - **Adapters**: live in the `upb-services` crate, one per upstream API,
//!   each reducing every failure to an `"Error"` reply
//! - **Command loop**: [`session`] owns the current encyclopedia term and
//!   dispatches parsed commands in sequence
//! - **Network association**: [`network`] optionally joins a wireless
//!   network once at startup; never fatal
//! - **Configuration**: [`config`] loads TOML from the user config directory

pub mod command;
pub mod config;
pub mod error;
pub mod network;
pub mod session;

pub use command::{Command, USAGE};
pub use config::BrowserConfig;
pub use error::{BrowserError, Result};
pub use session::{Flow, Session};
