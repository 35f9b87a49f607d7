// self
use crate::{
	_prelude::*,
	ataama::{AtaamaProvider, DEFAULT_HOST_TEMPLATE, DEFAULT_SITE},
	flows::Client,
	http::ProviderHttpClient,
	provider::ClientOptions,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Complete Ataama client configuration.
///
/// Client registration fields sit at the top level next to `site`, so a config file reads
/// `{ "client_id": "...", "client_secret": "...", "redirect_uri": "...", "site": "acme" }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtaamaConfig {
	/// Client registration.
	#[serde(flatten)]
	pub client: ClientOptions,
	/// Tenant subdomain; defaults to `"site"`.
	#[serde(default = "default_site")]
	pub site: String,
	/// Host template with a `{site}` placeholder.
	#[serde(default = "default_host_template")]
	pub host_template: String,
}
impl AtaamaConfig {
	/// Creates a configuration for the default site and host.
	pub fn new(client: ClientOptions) -> Self {
		Self { client, site: default_site(), host_template: default_host_template() }
	}

	/// Overrides the site.
	pub fn with_site(mut self, site: impl Into<String>) -> Self {
		self.site = site.into();

		self
	}

	/// Builds the provider adapter described by this configuration.
	pub fn provider(&self) -> AtaamaProvider {
		AtaamaProvider::new(self.site.clone()).with_host_template(self.host_template.clone())
	}

	/// Builds a client over a caller-provided transport.
	pub fn into_client_with<C>(self, http_client: impl Into<Arc<C>>) -> Client<AtaamaProvider, C>
	where
		C: ?Sized + ProviderHttpClient,
	{
		let provider = self.provider();

		Client::with_http_client(provider, self.client, http_client)
	}

	/// Builds a client over the default reqwest transport.
	#[cfg(feature = "reqwest")]
	pub fn into_client(self) -> Result<Client<AtaamaProvider, ReqwestHttpClient>> {
		Ok(self.into_client_with(ReqwestHttpClient::build()?))
	}
}

fn default_site() -> String {
	DEFAULT_SITE.into()
}

fn default_host_template() -> String {
	DEFAULT_HOST_TEMPLATE.into()
}
