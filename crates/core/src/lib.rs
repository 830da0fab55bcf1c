//! Domain primitives shared by the database and API crates.
//!
//! - [`types`] -- database id and timestamp aliases.
//! - [`roles`] -- well-known role name constants.
//! - [`error`] -- the domain error taxonomy.
//! - [`validators`] -- pure field validators (username, year, slug).

pub mod error;
pub mod roles;
pub mod types;
pub mod validators;
