//! Collection of general utility functions.
//!
//! Holds the credential primitives shared by the auth flow: password digests
//! and JWT issuing/verification.

pub mod jwt;
pub mod password;
