//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Deserialize` DTOs for inserts and patches where the repository needs them
//! - `Serialize` derives shaping the wire representation (fields the API must
//!   not expose carry `#[serde(skip_serializing)]`)

pub mod category;
pub mod comment;
pub mod genre;
pub mod review;
pub mod title;
pub mod user;
