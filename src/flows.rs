//! Authorization-code client driving a [`Provider`] over a [`ProviderHttpClient`].

pub mod authorize;

mod common;
mod owner;
mod token;

pub use authorize::*;

// self
use crate::{
	_prelude::*,
	http::ProviderHttpClient,
	provider::{ClientOptions, Provider},
};
#[cfg(feature = "reqwest")] use crate::{ataama::AtaamaProvider, http::ReqwestHttpClient};

#[cfg(feature = "reqwest")]
/// Ataama client specialized for the crate's default reqwest transport.
pub type ReqwestAtaamaClient = Client<AtaamaProvider, ReqwestHttpClient>;

/// Runs the authorization-code flow against a single provider.
///
/// The client owns the provider hooks, the client registration, and a shared transport. It
/// builds requests and hands every response to the provider's `parse_response` and
/// `check_response` hooks before interpreting the body. The provider is a plain field, so
/// reconfiguring it (for example switching the Ataama site) needs `&mut` access.
#[derive(Clone)]
pub struct Client<P, C>
where
	P: Provider,
	C: ?Sized + ProviderHttpClient,
{
	/// Provider hooks.
	pub provider: P,
	/// Client registration sent with every request.
	pub options: ClientOptions,
	/// Transport used for every outbound request.
	pub http_client: Arc<C>,
}
impl<P, C> Client<P, C>
where
	P: Provider,
	C: ?Sized + ProviderHttpClient,
{
	/// Creates a client over a caller-provided transport.
	pub fn with_http_client(
		provider: P,
		options: ClientOptions,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self { provider, options, http_client: http_client.into() }
	}
}
#[cfg(feature = "reqwest")]
impl<P> Client<P, ReqwestHttpClient>
where
	P: Provider,
{
	/// Creates a client with its own reqwest transport.
	pub fn new(provider: P, options: ClientOptions) -> Result<Self> {
		Ok(Self::with_http_client(provider, options, ReqwestHttpClient::build()?))
	}
}
impl<P, C> Debug for Client<P, C>
where
	P: Provider + Debug,
	C: ?Sized + ProviderHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("provider", &self.provider)
			.field("options", &self.options)
			.finish_non_exhaustive()
	}
}
