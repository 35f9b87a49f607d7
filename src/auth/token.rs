//! Token value objects returned by the token endpoint.

pub mod access;
pub mod secret;
