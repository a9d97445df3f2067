//! Bulk SMS dispatch over the Pushbullet REST API.
//!
//! Resolves a recipient roster (named people and named groups, plus a
//! universal set appended to every group) into deterministic per-group send
//! lists, asks for confirmation, then fans one send per group out
//! concurrently and reports each group's outcome independently — one
//! group's failure never aborts the others.
//!
//! # Architecture
//!
//! - **domain**: validated value objects (phone numbers, message identifiers)
//! - **error**: custom error types for precise error handling
//! - **config**: configuration management from environment variables
//! - **roster**: the recipient document model and the resolver
//! - **client**: Pushbullet HTTP client and the transport abstraction
//! - **dispatch**: concurrent fan-out with per-group outcome capture
//! - **cli**: argument parsing, confirmation gate, console report

pub mod cli;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod roster;

pub use client::{ApiVariant, AsyncPushbulletTransport, PushbulletClient, SmsTransport};
pub use config::Config;
pub use dispatch::{DispatchResult, Dispatcher};
pub use domain::{MessageId, PhoneFormat, PhoneNumber};
pub use error::{ConfigError, RosterError, TransportError};
pub use roster::{resolve, GroupEntry, ResolvedGroup, Roster};
