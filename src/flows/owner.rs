//! User-info lookup for an issued token.

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	flows::{Client, common},
	http::ProviderHttpClient,
	obs::{FlowKind, FlowSpan},
	provider::Provider,
};

impl<P, C> Client<P, C>
where
	P: Provider,
	C: ?Sized + ProviderHttpClient,
{
	/// Fetches the raw user-info mapping for `token`.
	///
	/// Sends a `GET` to the provider's user-info URL with the provider's `Authorization` header.
	pub async fn resource_owner_details(&self, token: &AccessToken) -> Result<Payload> {
		FlowSpan::new(FlowKind::ResourceOwner, "resource_owner_details")
			.run(async move {
				let url = common::parse_endpoint(self.provider.resource_owner_details_url(token))?;
				let authorization = self.provider.authorization_header(token);
				let request = common::get_request(&url, authorization.as_deref())?;

				self.fetch_fields(request).await
			})
			.await
	}

	/// Fetches the user-info mapping and wraps it in the provider's resource owner type.
	pub async fn resource_owner(&self, token: &AccessToken) -> Result<P::Owner> {
		let details = self.resource_owner_details(token).await?;

		Ok(self.provider.create_resource_owner(details, token))
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// crates.io
	use httpmock::prelude::*;
	// self
	use super::*;
	use crate::{_preludet::*, error::IdentityProviderError};

	#[tokio::test]
	async fn bearer_header_reaches_user_info() {
		let server = MockServer::start_async().await;
		let mock = server
			.mock_async(|when, then| {
				when.method(GET)
					.path("/v1/user/whoami")
					.header("authorization", "Bearer mock_access_token");
				then.status(200)
					.header("content-type", "application/json")
					.body("{\"user_id\":\"123\",\"username\":\"ALICE123456\",\"type\":\"admin\"}");
			})
			.await;
		let client = build_reqwest_test_client(&server.base_url());
		let owner = client
			.resource_owner(&AccessToken::new("mock_access_token"))
			.await
			.expect("User info should load.");

		mock.assert_async().await;

		assert_eq!(owner.id().as_deref(), Some("123"));
		assert_eq!(owner.name().as_deref(), Some("ALICE123456"));
		assert_eq!(owner.user_type().as_deref(), Some("admin"));
	}

	#[tokio::test]
	async fn user_info_errors_surface_from_the_provider() {
		let server = MockServer::start_async().await;

		server
			.mock_async(|when, then| {
				when.method(GET).path("/v1/user/whoami");
				then.status(401)
					.header("content-type", "application/json")
					.body("{\"error\":\"invalid_token\"}");
			})
			.await;

		let client = build_reqwest_test_client(&server.base_url());
		let err = client
			.resource_owner_details(&AccessToken::new("expired"))
			.await
			.expect_err("Error bodies must be rejected.");
		let Error::IdentityProvider(IdentityProviderError { message, status, .. }) = err else {
			panic!("Expected an identity provider error.");
		};

		assert_eq!(message, "invalid_token");
		assert_eq!(status, 401);
	}
}
