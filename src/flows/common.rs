//! Request plumbing shared by the flows: endpoint parsing, dispatch, and response checks.

// crates.io
use oauth2::{
	AsyncHttpClient, HttpRequest, HttpResponse,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
use url::form_urlencoded::Serializer;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, DecodeError, TransportError},
	flows::Client,
	http::ProviderHttpClient,
	provider::Provider,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_ACCEPT: &str = "application/json";

/// Parses an endpoint produced by a provider hook.
pub(crate) fn parse_endpoint(url: String) -> Result<Url> {
	Url::parse(&url).map_err(|source| ConfigError::InvalidEndpoint { url, source }.into())
}

/// Builds a form-encoded `POST` request.
pub(crate) fn form_request(url: &Url, form: &BTreeMap<String, String>) -> Result<HttpRequest> {
	let body = Serializer::new(String::new()).extend_pairs(form).finish();

	Request::builder()
		.method(Method::POST)
		.uri(url.as_str())
		.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
		.header(ACCEPT, JSON_ACCEPT)
		.body(body.into_bytes())
		.map_err(|e| ConfigError::from(e).into())
}

/// Builds a `GET` request, optionally carrying an `Authorization` header.
pub(crate) fn get_request(url: &Url, authorization: Option<&str>) -> Result<HttpRequest> {
	let mut builder =
		Request::builder().method(Method::GET).uri(url.as_str()).header(ACCEPT, JSON_ACCEPT);

	if let Some(value) = authorization {
		builder = builder.header(AUTHORIZATION, value);
	}

	builder.body(Vec::new()).map_err(|e| ConfigError::from(e).into())
}

impl<P, C> Client<P, C>
where
	P: Provider,
	C: ?Sized + ProviderHttpClient,
{
	/// Sends `request` and returns the checked field mapping of the response.
	///
	/// The response goes through the provider's `parse_response` and `check_response` hooks in
	/// that order; a body that is not a mapping is rejected afterwards.
	pub(crate) async fn fetch_fields(&self, request: HttpRequest) -> Result<Payload> {
		let response = self.send(request).await?;

		self.interpret(&response)
	}

	async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
		let handle = self.http_client.handle();
		let response = handle.call(request).await.map_err(TransportError::network)?;

		Ok(response)
	}

	fn interpret(&self, response: &HttpResponse) -> Result<Payload> {
		let body = self.provider.parse_response(response)?;

		self.provider.check_response(response, &body)?;

		let status = response.status().as_u16();

		body.into_fields().ok_or_else(|| DecodeError::ExpectedJsonObject { status }.into())
	}
}
