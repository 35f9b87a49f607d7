//! Grants sent to the token endpoint and their form parameters.

// self
use crate::_prelude::*;

/// OAuth 2.0 grant types supported by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Authorization Code grant.
	AuthorizationCode,
	/// Refresh Token grant.
	RefreshToken,
	/// Client Credentials grant for app-only tokens.
	ClientCredentials,
}
impl GrantType {
	/// Returns the RFC 6749 identifier for the grant type.
	pub fn as_str(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "authorization_code",
			GrantType::RefreshToken => "refresh_token",
			GrantType::ClientCredentials => "client_credentials",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Grant plus the parameters it sends to the token endpoint.
#[derive(Clone, PartialEq, Eq)]
pub enum Grant {
	/// Exchange an authorization code returned to the redirect URI.
	AuthorizationCode {
		/// Code received by the redirect handler.
		code: String,
		/// PKCE verifier matching the challenge sent in the authorization URL.
		pkce_verifier: Option<String>,
	},
	/// Trade a refresh token for a new access token.
	RefreshToken {
		/// Refresh token previously issued by the provider.
		refresh_token: String,
	},
	/// Request an app-only token.
	ClientCredentials,
}
impl Grant {
	/// Authorization Code grant without PKCE.
	pub fn authorization_code(code: impl Into<String>) -> Self {
		Self::AuthorizationCode { code: code.into(), pkce_verifier: None }
	}

	/// Refresh Token grant.
	pub fn refresh_token(refresh_token: impl Into<String>) -> Self {
		Self::RefreshToken { refresh_token: refresh_token.into() }
	}

	/// Returns the grant type label.
	pub fn grant_type(&self) -> GrantType {
		match self {
			Self::AuthorizationCode { .. } => GrantType::AuthorizationCode,
			Self::RefreshToken { .. } => GrantType::RefreshToken,
			Self::ClientCredentials => GrantType::ClientCredentials,
		}
	}

	/// Writes `grant_type` and the grant-specific form fields into `form`.
	pub fn write_params(&self, form: &mut BTreeMap<String, String>) {
		form.insert("grant_type".into(), self.grant_type().as_str().into());

		match self {
			Self::AuthorizationCode { code, pkce_verifier } => {
				form.insert("code".into(), code.clone());

				if let Some(verifier) = pkce_verifier {
					form.insert("code_verifier".into(), verifier.clone());
				}
			},
			Self::RefreshToken { refresh_token } => {
				form.insert("refresh_token".into(), refresh_token.clone());
			},
			Self::ClientCredentials => {},
		}
	}
}
impl Debug for Grant {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Grant").field("grant_type", &self.grant_type()).finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn grants_write_their_form_fields() {
		let mut form = BTreeMap::new();

		Grant::AuthorizationCode {
			code: "mock_authorization_code".into(),
			pkce_verifier: Some("verifier".into()),
		}
		.write_params(&mut form);

		assert_eq!(form.get("grant_type").map(String::as_str), Some("authorization_code"));
		assert_eq!(form.get("code").map(String::as_str), Some("mock_authorization_code"));
		assert_eq!(form.get("code_verifier").map(String::as_str), Some("verifier"));

		let mut form = BTreeMap::new();

		Grant::refresh_token("mock_refresh_token").write_params(&mut form);

		assert_eq!(form.get("grant_type").map(String::as_str), Some("refresh_token"));
		assert_eq!(form.get("refresh_token").map(String::as_str), Some("mock_refresh_token"));
	}

	#[test]
	fn debug_output_hides_secrets() {
		let rendered = format!("{:?}", Grant::refresh_token("super-secret"));

		assert!(rendered.contains("RefreshToken"));
		assert!(!rendered.contains("super-secret"));
	}
}
