//! Authentication primitives.
//!
//! - [`password`]: Argon2id password hashing and the sign-up length policy.
//! - [`jwt`]: access-token issue/validation and refresh-token hashing.

pub mod jwt;
pub mod password;
