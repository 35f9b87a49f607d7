//! Provider hooks invoked by the generic authorization-code client.
//!
//! A provider supplies endpoint URLs, scope defaults, and response validation, while
//! [`Client`](crate::flows::Client) owns the HTTP exchange. The hooks are synchronous and only
//! borrow the raw response, so implementations stay independent of any HTTP client.

// crates.io
use oauth2::HttpResponse;
// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	error::IdentityProviderError,
	provider::GrantType,
	response::{self, DecodedBody},
};

/// Authenticated end user as described by a provider's user-info response.
pub trait ResourceOwner: Debug + Send + Sync {
	/// Provider-side identifier of the user, if the payload carries one.
	fn id(&self) -> Option<Cow<'_, str>>;

	/// Full decoded payload the owner was built from.
	fn to_raw(&self) -> &Payload;
}

/// Provider-specific hooks consumed by [`Client`](crate::flows::Client).
///
/// URL hooks return plain strings and are not validated here; the client parses them when it
/// builds a request, so a malformed endpoint surfaces as a configuration error at call time.
/// Override `scope_separator`, `authorization_header`, or `parse_response` only when the
/// provider departs from the generic behavior.
pub trait Provider: Send + Sync {
	/// Resource owner type built from user-info payloads.
	type Owner: ResourceOwner;

	/// Authorization endpoint the end user is redirected to.
	fn base_authorization_url(&self) -> String;

	/// Token endpoint used for the given grant.
	fn base_access_token_url(&self, grant: GrantType) -> String;

	/// User-info endpoint for the given token.
	fn resource_owner_details_url(&self, token: &AccessToken) -> String;

	/// Scopes requested when the caller does not supply any.
	fn default_scopes(&self) -> &[&str];

	/// Separator used to join scopes in the authorization URL.
	fn scope_separator(&self) -> &str {
		","
	}

	/// `Authorization` header value attached to user-info requests, if any.
	fn authorization_header(&self, _token: &AccessToken) -> Option<String> {
		None
	}

	/// Decodes a raw response. The default delegates to [`response::decode_body`].
	fn parse_response(&self, response: &HttpResponse) -> Result<DecodedBody> {
		response::decode_body(response)
	}

	/// Rejects responses whose decoded body signals an error.
	fn check_response(
		&self,
		response: &HttpResponse,
		body: &DecodedBody,
	) -> Result<(), IdentityProviderError>;

	/// Builds the resource owner from a decoded user-info payload.
	fn create_resource_owner(&self, payload: Payload, token: &AccessToken) -> Self::Owner;
}
