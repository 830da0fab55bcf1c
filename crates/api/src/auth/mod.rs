//! Authentication primitives: JWT access tokens and signup confirmation codes.

pub mod confirmation;
pub mod jwt;
