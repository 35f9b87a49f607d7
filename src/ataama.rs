//! Ataama identity provider: endpoint hooks, response sniffing, and the typed resource owner.
//!
//! [`AtaamaProvider`] plugs into [`Client`](crate::flows::Client) through the
//! [`Provider`](crate::provider::Provider) hooks. Ataama's edge can answer gateway failures with
//! HTML or plain text, so the adapter rejects 5xx and HTML responses before the generic decoder
//! sees them, and turns any `error` field in a decoded body into an
//! [`IdentityProviderError`](crate::error::IdentityProviderError).

mod config;
mod owner;
mod provider;

pub use config::*;
pub use owner::*;
pub use provider::*;
