//! Domain value objects and types.
//!
//! This module contains type-safe wrappers for domain concepts like phone
//! numbers and message identifiers. These value objects provide validation
//! at construction time and prevent invalid data from being represented in
//! the system.

pub mod errors;
pub mod message_id;
pub mod phone;

pub use errors::ValidationError;
pub use message_id::MessageId;
pub use phone::{PhoneFormat, PhoneNumber};
