//! Authorization URL construction, state round-trip, and optional PKCE.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};
// self
use crate::{
	_prelude::*,
	auth::ScopeSet,
	error::ConfigError,
	flows::{Client, common},
	http::ProviderHttpClient,
	obs::{FlowKind, FlowSpan},
	provider::{PkceCodeChallengeMethod, Provider},
};

const STATE_LEN: usize = 32;
const PKCE_VERIFIER_LEN: usize = 64;

/// Per-request overrides for [`Client::authorization_url`].
#[derive(Clone, Debug, Default)]
pub struct AuthorizationOptions {
	/// Explicit `state`; a random value is generated when absent.
	pub state: Option<String>,
	/// Scopes to request; the provider's default scopes are used when absent or empty.
	pub scopes: Option<ScopeSet>,
	/// Redirect URI overriding the one in the client registration.
	pub redirect_uri: Option<Url>,
	/// Additional query parameters appended verbatim.
	pub extra_params: Vec<(String, String)>,
}
impl AuthorizationOptions {
	/// Uses a caller-chosen `state`.
	pub fn with_state(mut self, state: impl Into<String>) -> Self {
		self.state = Some(state.into());

		self
	}

	/// Requests `scopes` instead of the provider defaults. An empty set keeps the defaults.
	pub fn with_scopes(mut self, scopes: ScopeSet) -> Self {
		self.scopes = Some(scopes);

		self
	}

	/// Overrides the redirect URI for this request.
	pub fn with_redirect_uri(mut self, redirect_uri: Url) -> Self {
		self.redirect_uri = Some(redirect_uri);

		self
	}

	/// Appends an extra query parameter.
	pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.extra_params.push((key.into(), value.into()));

		self
	}
}

/// Authorization handshake metadata returned by [`Client::authorization_url`].
///
/// Keep it (for example in the user's session) until the redirect comes back, then call
/// [`validate_state`](AuthorizationSession::validate_state) and
/// [`Client::exchange_code`].
#[derive(Clone)]
pub struct AuthorizationSession {
	/// Opaque state value that must round-trip via the redirect handler.
	pub state: String,
	/// Fully-formed authorize URL that callers should send end users to.
	pub authorize_url: Url,
	/// Scopes requested in the URL.
	pub scope: ScopeSet,
	/// Redirect URI sent in the URL, if any.
	pub redirect_uri: Option<Url>,
	pkce: Option<PkcePair>,
}
impl AuthorizationSession {
	/// PKCE code challenge sent in the URL, when PKCE is enabled.
	pub fn code_challenge(&self) -> Option<&str> {
		self.pkce.as_ref().map(|pkce| pkce.challenge.as_str())
	}

	/// PKCE challenge method, when PKCE is enabled.
	pub fn code_challenge_method(&self) -> Option<PkceCodeChallengeMethod> {
		self.pkce.as_ref().map(|pkce| pkce.method)
	}

	/// Validates the returned `state` parameter after the authorization redirect.
	pub fn validate_state(&self, returned_state: &str) -> Result<()> {
		if returned_state == self.state { Ok(()) } else { Err(Error::StateMismatch) }
	}

	pub(super) fn into_exchange_parts(self) -> (Option<Url>, Option<String>) {
		let AuthorizationSession { redirect_uri, pkce, .. } = self;

		(redirect_uri, pkce.map(|pkce| pkce.verifier))
	}
}
impl Debug for AuthorizationSession {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthorizationSession")
			.field("state", &self.state)
			.field("authorize_url", &self.authorize_url)
			.field("scope", &self.scope)
			.field("redirect_uri", &self.redirect_uri)
			.field("code_challenge", &self.code_challenge())
			.field("code_challenge_method", &self.code_challenge_method())
			.finish()
	}
}

#[derive(Clone)]
struct PkcePair {
	verifier: String,
	challenge: String,
	method: PkceCodeChallengeMethod,
}
impl PkcePair {
	fn generate(method: PkceCodeChallengeMethod) -> Self {
		let verifier = random_string(PKCE_VERIFIER_LEN);
		let challenge = match method {
			PkceCodeChallengeMethod::S256 => compute_pkce_challenge(&verifier),
			PkceCodeChallengeMethod::Plain => verifier.clone(),
		};

		Self { verifier, challenge, method }
	}
}

impl<P, C> Client<P, C>
where
	P: Provider,
	C: ?Sized + ProviderHttpClient,
{
	/// Builds the URL the end user is redirected to, plus the state needed to finish the flow.
	///
	/// Query parameters: `state`, `scope` (caller scopes or else the provider defaults, joined
	/// with the provider's separator, omitted when both are empty), `response_type=code`, `approval_prompt=auto`, `redirect_uri` (omitted when neither
	/// the options nor the registration carry one), `client_id`, the PKCE challenge when enabled,
	/// then any extra parameters.
	pub fn authorization_url(&self, options: AuthorizationOptions) -> Result<AuthorizationSession> {
		FlowSpan::new(FlowKind::AuthorizationUrl, "authorization_url")
			.in_scope(|| self.build_session(options))
	}

	fn build_session(&self, options: AuthorizationOptions) -> Result<AuthorizationSession> {
		let AuthorizationOptions { state, scopes, redirect_uri, extra_params } = options;
		let scope = match scopes {
			Some(scopes) if !scopes.is_empty() => scopes,
			_ => ScopeSet::new(self.provider.default_scopes().iter().copied())
				.map_err(ConfigError::from)?,
		};
		let state = state.unwrap_or_else(|| random_string(STATE_LEN));
		let redirect_uri = redirect_uri.or_else(|| self.options.redirect_uri.clone());
		let pkce = self.options.pkce.map(PkcePair::generate);
		let mut authorize_url = common::parse_endpoint(self.provider.base_authorization_url())?;
		let mut pairs = authorize_url.query_pairs_mut();

		pairs.append_pair("state", &state);

		if !scope.is_empty() {
			pairs.append_pair("scope", &scope.join(self.provider.scope_separator()));
		}

		pairs.append_pair("response_type", "code");
		pairs.append_pair("approval_prompt", "auto");

		if let Some(redirect_uri) = &redirect_uri {
			pairs.append_pair("redirect_uri", redirect_uri.as_str());
		}

		pairs.append_pair("client_id", &self.options.client_id);

		if let Some(pkce) = &pkce {
			pairs.append_pair("code_challenge", &pkce.challenge);
			pairs.append_pair("code_challenge_method", pkce.method.as_str());
		}
		for (key, value) in &extra_params {
			pairs.append_pair(key, value);
		}

		drop(pairs);

		Ok(AuthorizationSession { state, authorize_url, scope, redirect_uri, pkce })
	}
}

fn random_string(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}

fn compute_pkce_challenge(verifier: &str) -> String {
	let digest = Sha256::digest(verifier.as_bytes());

	URL_SAFE_NO_PAD.encode(digest)
}
