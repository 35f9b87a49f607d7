//! Provider-facing hooks (behavior), grants, and client registration options (data).
//!
//! `hooks` defines [`Provider`] and [`ResourceOwner`], the seam between the generic
//! authorization-code client and a concrete identity provider. `grant` describes what is sent
//! to the token endpoint, and `options` carries the client registration the flows need.

pub mod grant;
pub mod hooks;
pub mod options;

pub use grant::*;
pub use hooks::*;
pub use options::*;
