//! Token endpoint exchange.

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	flows::{AuthorizationSession, Client, common},
	http::ProviderHttpClient,
	obs::{FlowKind, FlowSpan},
	provider::{Grant, Provider},
};

impl<P, C> Client<P, C>
where
	P: Provider,
	C: ?Sized + ProviderHttpClient,
{
	/// Requests an access token for `grant`.
	///
	/// Posts `grant_type`, `client_id`, `client_secret` and `redirect_uri` (each when
	/// configured) plus the grant's own parameters as a form. The response must pass the
	/// provider's checks and decode into a mapping carrying `access_token`.
	pub async fn access_token(&self, grant: Grant) -> Result<AccessToken> {
		self.request_token(grant, self.options.redirect_uri.as_ref()).await
	}

	/// Exchanges the authorization `code` returned to the redirect handler.
	///
	/// Reuses the session's redirect URI and PKCE verifier. Validate the returned `state` with
	/// [`AuthorizationSession::validate_state`] first.
	pub async fn exchange_code(
		&self,
		session: AuthorizationSession,
		code: impl Into<String>,
	) -> Result<AccessToken> {
		let (redirect_uri, pkce_verifier) = session.into_exchange_parts();
		let grant = Grant::AuthorizationCode { code: code.into(), pkce_verifier };

		self.request_token(grant, redirect_uri.as_ref()).await
	}

	async fn request_token(&self, grant: Grant, redirect_uri: Option<&Url>) -> Result<AccessToken> {
		FlowSpan::new(FlowKind::AccessToken, "access_token")
			.run(async move {
				let url =
					common::parse_endpoint(self.provider.base_access_token_url(grant.grant_type()))?;
				let mut form = BTreeMap::new();

				form.insert("client_id".into(), self.options.client_id.clone());

				if let Some(secret) = &self.options.client_secret {
					form.insert("client_secret".into(), secret.clone());
				}
				if let Some(redirect_uri) = redirect_uri {
					form.insert("redirect_uri".into(), redirect_uri.to_string());
				}

				grant.write_params(&mut form);

				let payload = self.fetch_fields(common::form_request(&url, &form)?).await?;

				AccessToken::from_payload(payload)
			})
			.await
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// crates.io
	use httpmock::prelude::*;
	// self
	use super::*;
	use crate::{_preludet::*, error::DecodeError};

	#[tokio::test]
	async fn refresh_grant_posts_refresh_token() {
		let server = MockServer::start_async().await;
		let mock = server
			.mock_async(|when, then| {
				when.method(POST)
					.path("/oauth2/token")
					.header("content-type", "application/x-www-form-urlencoded")
					.body(
						"client_id=mock_client_id&client_secret=mock_secret&grant_type=refresh_token&redirect_uri=https%3A%2F%2Fapp.example.com%2Fcallback&refresh_token=mock_refresh",
					);
				then.status(200)
					.header("content-type", "application/json")
					.body("{\"access_token\":\"rotated\",\"refresh_token\":\"next\",\"expires_in\":60}");
			})
			.await;
		let client = build_reqwest_test_client(&server.base_url());
		let token = client
			.access_token(Grant::refresh_token("mock_refresh"))
			.await
			.expect("Refresh grant should succeed.");

		mock.assert_async().await;

		assert_eq!(token.token(), "rotated");
		assert_eq!(token.refresh_token.as_ref().map(|secret| secret.expose()), Some("next"));
		assert!(token.expires_at.is_some());
		assert!(!token.has_expired());
	}

	#[tokio::test]
	async fn non_object_bodies_are_rejected() {
		let server = MockServer::start_async().await;

		server
			.mock_async(|when, then| {
				when.method(POST).path("/oauth2/token");
				then.status(200).header("content-type", "text/plain").body("ok");
			})
			.await;

		let client = build_reqwest_test_client(&server.base_url());
		let err = client
			.access_token(Grant::ClientCredentials)
			.await
			.expect_err("Plain text bodies cannot become tokens.");

		assert!(matches!(err, Error::Decode(DecodeError::ExpectedJsonObject { status: 200 })));
	}

	#[tokio::test]
	async fn missing_access_token_is_invalid() {
		let server = MockServer::start_async().await;

		server
			.mock_async(|when, then| {
				when.method(POST).path("/oauth2/token");
				then.status(200)
					.header("content-type", "application/json")
					.body("{\"token_type\":\"bearer\"}");
			})
			.await;

		let client = build_reqwest_test_client(&server.base_url());
		let err = client
			.access_token(Grant::authorization_code("mock_code"))
			.await
			.expect_err("Tokens without access_token are invalid.");

		assert!(matches!(err, Error::InvalidTokenResponse { .. }));
	}
}
