// crates.io
use oauth2::HttpResponse;
// self
use crate::{
	_prelude::*,
	ataama::AtaamaResourceOwner,
	auth::AccessToken,
	error::IdentityProviderError,
	provider::{GrantType, Provider},
	response::{self, DecodedBody},
};

/// Public Ataama API host; `{site}` is replaced with the tenant subdomain.
pub const DEFAULT_HOST_TEMPLATE: &str = "https://{site}.api.ataama.com";
/// Site used when none is configured.
pub const DEFAULT_SITE: &str = "site";

const SITE_PLACEHOLDER: &str = "{site}";
const DEFAULT_SCOPES: &[&str] = &["user"];

/// Ataama identity provider adapter.
///
/// All endpoints hang off a per-tenant host built from [`DEFAULT_HOST_TEMPLATE`]. The site is
/// not validated: a malformed site yields a malformed URL that only fails once the client
/// tries to use it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtaamaProvider {
	host_template: String,
	site: String,
}
impl AtaamaProvider {
	/// Creates an adapter for the given site on the public host.
	pub fn new(site: impl Into<String>) -> Self {
		Self { host_template: DEFAULT_HOST_TEMPLATE.into(), site: site.into() }
	}

	/// Overrides the site.
	pub fn with_site(mut self, site: impl Into<String>) -> Self {
		self.site = site.into();

		self
	}

	/// Overrides the host template. A template without `{site}` ignores the site.
	pub fn with_host_template(mut self, template: impl Into<String>) -> Self {
		self.host_template = template.into();

		self
	}

	/// Replaces the site in place.
	pub fn set_site(&mut self, site: impl Into<String>) {
		self.site = site.into();
	}

	/// Configured site.
	pub fn site(&self) -> &str {
		&self.site
	}

	/// Configured host template.
	pub fn host_template(&self) -> &str {
		&self.host_template
	}

	/// Host template with the site substituted in.
	pub fn base_url(&self) -> String {
		self.host_template.replace(SITE_PLACEHOLDER, &self.site)
	}
}
impl Default for AtaamaProvider {
	fn default() -> Self {
		Self::new(DEFAULT_SITE)
	}
}
impl Provider for AtaamaProvider {
	type Owner = AtaamaResourceOwner;

	fn base_authorization_url(&self) -> String {
		format!("{}/oauth2/authorize", self.base_url())
	}

	fn base_access_token_url(&self, _grant: GrantType) -> String {
		format!("{}/oauth2/token", self.base_url())
	}

	fn resource_owner_details_url(&self, _token: &AccessToken) -> String {
		format!("{}/v1/user/whoami", self.base_url())
	}

	fn default_scopes(&self) -> &[&str] {
		DEFAULT_SCOPES
	}

	fn scope_separator(&self) -> &str {
		" "
	}

	fn authorization_header(&self, token: &AccessToken) -> Option<String> {
		Some(format!("Bearer {}", token.token()))
	}

	/// Rejects 5xx and HTML responses before decoding.
	///
	/// The edge in front of the API answers gateway failures with HTML or plain text pages;
	/// those must become an [`IdentityProviderError`] rather than a decoder failure.
	fn parse_response(&self, response: &HttpResponse) -> Result<DecodedBody> {
		if response.status().as_u16() >= 500 || is_html(response) {
			return Err(IdentityProviderError::unexpected_response(response).into());
		}

		response::decode_body(response)
	}

	/// Any non-null `error` field, even an empty one, fails the response. Blank values fall back
	/// to the reason phrase for the message.
	fn check_response(
		&self,
		response: &HttpResponse,
		body: &DecodedBody,
	) -> Result<(), IdentityProviderError> {
		let Some(error) = body.fields().and_then(|fields| fields.get("error")) else {
			return Ok(());
		};
		let message = match error {
			Value::Null => return Ok(()),
			value if response::is_blank(value) => response::reason_phrase(response).into(),
			Value::String(text) => text.clone(),
			value => value.to_string(),
		};

		Err(IdentityProviderError::from_response(message, response))
	}

	fn create_resource_owner(&self, payload: Payload, _token: &AccessToken) -> Self::Owner {
		AtaamaResourceOwner::new(payload)
	}
}

fn is_html(response: &HttpResponse) -> bool {
	response::content_type_line(response).to_ascii_lowercase().starts_with("text/html")
}
