//! Database models split into entity-specific modules.

pub mod department;
pub mod employee;
pub mod timecard;

pub use department::*;
pub use employee::*;
pub use timecard::*;

/// A raw request field as it arrived in the JSON body.
///
/// Clients send identifiers and amounts either as JSON numbers or as strings,
/// so request DTOs keep the untyped value and leave coercion to validation.
pub type Field = Option<serde_json::Value>;
