//! Client registration options shared by every flow.

// self
use crate::_prelude::*;

/// Supported PKCE challenge methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PkceCodeChallengeMethod {
	/// SHA-256 based PKCE (RFC 7636 S256).
	S256,
	/// Verifier sent verbatim as the challenge.
	#[serde(rename = "plain")]
	Plain,
}
impl PkceCodeChallengeMethod {
	/// Returns the RFC 7636 identifier for the challenge method.
	pub fn as_str(self) -> &'static str {
		match self {
			PkceCodeChallengeMethod::S256 => "S256",
			PkceCodeChallengeMethod::Plain => "plain",
		}
	}
}

/// Client registration shared by every provider.
///
/// Deserializes from configuration files; only `client_id` is mandatory.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientOptions {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// Client secret for confidential clients.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub client_secret: Option<String>,
	/// Redirect URI registered with the provider.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub redirect_uri: Option<Url>,
	/// PKCE method to apply to authorization requests, when enabled.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pkce: Option<PkceCodeChallengeMethod>,
}
impl ClientOptions {
	/// Creates options for a public client without redirect URI or PKCE.
	pub fn new(client_id: impl Into<String>) -> Self {
		Self { client_id: client_id.into(), client_secret: None, redirect_uri: None, pkce: None }
	}

	/// Sets the client secret.
	pub fn with_client_secret(mut self, secret: impl Into<String>) -> Self {
		self.client_secret = Some(secret.into());

		self
	}

	/// Sets the redirect URI.
	pub fn with_redirect_uri(mut self, redirect_uri: Url) -> Self {
		self.redirect_uri = Some(redirect_uri);

		self
	}

	/// Enables PKCE with the given challenge method.
	pub fn with_pkce(mut self, method: PkceCodeChallengeMethod) -> Self {
		self.pkce = Some(method);

		self
	}
}
impl Debug for ClientOptions {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientOptions")
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.field("redirect_uri", &self.redirect_uri)
			.field("pkce", &self.pkce)
			.finish()
	}
}
