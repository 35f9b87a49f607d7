// std
use std::{
	borrow::Cow,
	collections::{BTreeMap, VecDeque},
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::Future,
	mem,
	pin::Pin,
	sync::{Arc, Mutex},
};
// self
use oauth2_ataama::{
	ataama::AtaamaProvider,
	auth::{AccessToken, ScopeSet},
	error::{DecodeError, Error, IdentityProviderError, Result, TransportError},
	flows::{AuthorizationOptions, Client},
	http::ProviderHttpClient,
	oauth2::{
		AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
		http::{
			HeaderValue, Method, StatusCode,
			header::{AUTHORIZATION, CONTENT_TYPE},
		},
	},
	provider::{ClientOptions, GrantType, PkceCodeChallengeMethod, Provider, ResourceOwner},
	response::{DecodedBody, Payload},
	url::{Url, form_urlencoded},
};

#[derive(Debug)]
struct FakeTransportError;
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Connection refused.")
	}
}
impl StdError for FakeTransportError {}

#[derive(Default)]
struct Script {
	responses: Mutex<VecDeque<Result<HttpResponse, FakeTransportError>>>,
	requests: Mutex<Vec<HttpRequest>>,
}

#[derive(Clone, Default)]
struct ScriptedHttpClient(Arc<Script>);
impl ScriptedHttpClient {
	fn respond(self, response: HttpResponse) -> Self {
		self.0
			.responses
			.lock()
			.expect("Script lock should not be poisoned.")
			.push_back(Ok(response));

		self
	}

	fn fail(self) -> Self {
		self.0
			.responses
			.lock()
			.expect("Script lock should not be poisoned.")
			.push_back(Err(FakeTransportError));

		self
	}

	fn take_requests(&self) -> Vec<HttpRequest> {
		mem::take(&mut *self.0.requests.lock().expect("Script lock should not be poisoned."))
	}
}
impl ProviderHttpClient for ScriptedHttpClient {
	type Handle = ScriptedHandle;
	type TransportError = FakeTransportError;

	fn handle(&self) -> Self::Handle {
		ScriptedHandle(Arc::clone(&self.0))
	}
}

struct ScriptedHandle(Arc<Script>);
impl<'a> AsyncHttpClient<'a> for ScriptedHandle {
	type Error = HttpClientError<FakeTransportError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'a + Send + Sync>>;

	fn call(&'a self, request: HttpRequest) -> Self::Future {
		let script = Arc::clone(&self.0);

		Box::pin(async move {
			script.requests.lock().expect("Script lock should not be poisoned.").push(request);

			script
				.responses
				.lock()
				.expect("Script lock should not be poisoned.")
				.pop_front()
				.expect("Every request should have a scripted response.")
				.map_err(|e| HttpClientError::Reqwest(Box::new(e)))
		})
	}
}

fn response(status: u16, content_type: &str, body: &str) -> HttpResponse {
	let mut response = HttpResponse::new(body.as_bytes().to_vec());

	*response.status_mut() = StatusCode::from_u16(status).expect("Status fixture is valid.");
	response.headers_mut().insert(
		CONTENT_TYPE,
		HeaderValue::from_str(content_type).expect("Content type fixture is valid."),
	);

	response
}

fn form(request: &HttpRequest) -> BTreeMap<String, String> {
	form_urlencoded::parse(request.body()).into_owned().collect()
}

fn ataama_client(
	transport: &ScriptedHttpClient,
	options: ClientOptions,
) -> Client<AtaamaProvider, ScriptedHttpClient> {
	Client::with_http_client(AtaamaProvider::new("mock"), options, transport.clone())
}

#[tokio::test]
async fn exchange_code_sends_session_redirect_and_verifier() {
	let transport = ScriptedHttpClient::default().respond(response(
		200,
		"application/json",
		"{\"access_token\":\"mock_access_token\",\"expires_in\":\"120\"}",
	));
	let options = ClientOptions::new("mock_client_id").with_pkce(PkceCodeChallengeMethod::S256);
	let client = ataama_client(&transport, options);
	let redirect =
		Url::parse("https://app.example.com/alt-callback").expect("Redirect fixture should parse.");
	let session = client
		.authorization_url(AuthorizationOptions::default().with_redirect_uri(redirect.clone()))
		.expect("Authorization URL should build.");
	let token = client
		.exchange_code(session, "mock_code")
		.await
		.expect("Exchange should succeed.");
	let requests = transport.take_requests();
	let sent = form(&requests[0]);

	assert_eq!(requests.len(), 1);
	assert_eq!(requests[0].method(), Method::POST);
	assert_eq!(requests[0].uri(), "https://mock.api.ataama.com/oauth2/token");
	assert_eq!(sent["grant_type"], GrantType::AuthorizationCode.as_str());
	assert_eq!(sent["code"], "mock_code");
	assert_eq!(sent["client_id"], "mock_client_id");
	assert_eq!(sent["redirect_uri"], redirect.as_str());
	assert_eq!(sent["code_verifier"].len(), 64);
	assert!(!sent.contains_key("client_secret"));
	assert_eq!(token.token(), "mock_access_token");
	assert!(token.expires_at.is_some());
}

#[tokio::test]
async fn resource_owner_uses_bearer_header() {
	let transport = ScriptedHttpClient::default().respond(response(
		200,
		"application/json; charset=utf-8",
		"{\"user_id\":\"123\",\"username\":\"ALICE123456\"}",
	));
	let client = ataama_client(&transport, ClientOptions::new("mock_client_id"));
	let owner = client
		.resource_owner(&AccessToken::new("mock_access_token"))
		.await
		.expect("Resource owner should load.");
	let requests = transport.take_requests();

	assert_eq!(requests[0].method(), Method::GET);
	assert_eq!(requests[0].uri(), "https://mock.api.ataama.com/v1/user/whoami");
	assert_eq!(requests[0].headers()[AUTHORIZATION], "Bearer mock_access_token");
	assert_eq!(owner.name().as_deref(), Some("ALICE123456"));
}

#[tokio::test]
async fn transport_failures_surface_as_transport_errors() {
	let transport = ScriptedHttpClient::default().fail();
	let client = ataama_client(&transport, ClientOptions::new("mock_client_id"));
	let err = client
		.resource_owner_details(&AccessToken::new("mock_access_token"))
		.await
		.expect_err("Transport failures must propagate.");

	assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
}

#[derive(Debug)]
struct PlainOwner(Payload);
impl ResourceOwner for PlainOwner {
	fn id(&self) -> Option<Cow<'_, str>> {
		self.0.get("sub").and_then(|value| value.as_str()).map(Cow::Borrowed)
	}

	fn to_raw(&self) -> &Payload {
		&self.0
	}
}

/// Provider relying on every default hook.
struct PlainProvider;
impl Provider for PlainProvider {
	type Owner = PlainOwner;

	fn base_authorization_url(&self) -> String {
		"https://plain.example.com/authorize?tenant=1".into()
	}

	fn base_access_token_url(&self, _grant: GrantType) -> String {
		"https://plain.example.com/token".into()
	}

	fn resource_owner_details_url(&self, _token: &AccessToken) -> String {
		"https://plain.example.com/me".into()
	}

	fn default_scopes(&self) -> &[&str] {
		&["read", "write"]
	}

	fn check_response(
		&self,
		response: &HttpResponse,
		body: &DecodedBody,
	) -> Result<(), IdentityProviderError> {
		match body.fields().and_then(|fields| fields.get("error")).and_then(|value| value.as_str()) {
			Some(message) => Err(IdentityProviderError::from_response(message, response)),
			None => Ok(()),
		}
	}

	fn create_resource_owner(&self, payload: Payload, _token: &AccessToken) -> Self::Owner {
		PlainOwner(payload)
	}
}

fn plain_client(transport: &ScriptedHttpClient) -> Client<PlainProvider, ScriptedHttpClient> {
	Client::with_http_client(PlainProvider, ClientOptions::new("plain"), transport.clone())
}

#[test]
fn default_hooks_join_scopes_with_commas() {
	let client = plain_client(&ScriptedHttpClient::default());
	let session = client
		.authorization_url(AuthorizationOptions::default())
		.expect("Authorization URL should build.");
	let query: BTreeMap<_, _> = session.authorize_url.query_pairs().into_owned().collect();

	assert_eq!(query["tenant"], "1");
	assert_eq!(query["scope"], "read,write");
	assert_eq!(session.scope, ScopeSet::new(["read", "write"]).expect("Scopes are valid."));
}

#[tokio::test]
async fn default_hooks_send_no_authorization_header() {
	let transport = ScriptedHttpClient::default().respond(response(
		200,
		"application/x-www-form-urlencoded",
		"sub=42&name=plain",
	));
	let client = plain_client(&transport);
	let owner = client
		.resource_owner(&AccessToken::new("mock_access_token"))
		.await
		.expect("Form-encoded user info should decode.");

	assert!(transport.take_requests()[0].headers().get(AUTHORIZATION).is_none());
	assert_eq!(owner.id().as_deref(), Some("42"));
}

#[tokio::test]
async fn default_decoder_errors_reach_the_caller() {
	let transport = ScriptedHttpClient::default()
		.respond(response(500, "text/plain", "upstream exploded"))
		.respond(response(200, "application/json", "{\"access_token\":"))
		.respond(response(400, "application/json", "{\"error\":\"invalid_client\"}"));
	let client = plain_client(&transport);
	let token = AccessToken::new("mock_access_token");
	let err = client.resource_owner_details(&token).await.expect_err("500 without JSON fails.");

	assert!(matches!(err, Error::Decode(DecodeError::ServerErrorWithoutJson { status: 500 })));

	let err = client.resource_owner_details(&token).await.expect_err("Malformed JSON fails.");

	assert!(matches!(err, Error::Decode(DecodeError::MalformedJson { status: 200, .. })));

	let err = client.resource_owner_details(&token).await.expect_err("Error fields fail.");

	assert!(matches!(
		err,
		Error::IdentityProvider(IdentityProviderError { ref message, status: 400, .. })
			if message == "invalid_client"
	));
}
