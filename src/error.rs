//! Client-level error types shared across flows, providers, and the body decoder.

// crates.io
use oauth2::HttpResponse;
// self
use crate::{_prelude::*, response};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Identity provider signalled a failure (5xx, HTML page, or an `error` field).
	#[error(transparent)]
	IdentityProvider(#[from] IdentityProviderError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Response body could not be decoded into fields.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Token endpoint answered without the fields an access token requires.
	#[error("Token endpoint returned an invalid token response: {reason}.")]
	InvalidTokenResponse {
		/// Which field was missing or malformed.
		reason: String,
	},
	/// The `state` returned to the redirect handler does not match the session.
	#[error("Authorization state mismatch.")]
	StateMismatch,
}

/// Typed failure raised by provider hooks while validating a response.
///
/// Carries the message chosen by the provider, the HTTP status code, and the raw body so callers
/// can surface or log whatever they need. Nothing is retried locally.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Identity provider returned status {status}: {message}.")]
pub struct IdentityProviderError {
	/// Provider-supplied message, or a fallback derived from the response.
	pub message: String,
	/// HTTP status code of the failing response.
	pub status: u16,
	/// Raw response body (lossy UTF-8).
	pub body: String,
}
impl IdentityProviderError {
	/// Message used when the response is rejected before decoding.
	pub const UNEXPECTED_RESPONSE: &'static str = "The OAuth server returned an unexpected response";

	/// Builds an error with `message`, taking status and body from `response`.
	pub fn from_response(message: impl Into<String>, response: &HttpResponse) -> Self {
		Self {
			message: message.into(),
			status: response.status().as_u16(),
			body: response::body_text(response).into_owned(),
		}
	}

	/// Builds the error used when a response is rejected before decoding.
	pub fn unexpected_response(response: &HttpResponse) -> Self {
		Self::from_response(Self::UNEXPECTED_RESPONSE, response)
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// A provider hook produced an endpoint that is not a valid URL.
	#[error("Provider endpoint `{url}` is not a valid URL.")]
	InvalidEndpoint {
		/// Endpoint string produced by the provider.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Requested scopes cannot be normalized.
	#[error("Requested scopes are invalid.")]
	InvalidScope(#[from] crate::auth::ScopeValidationError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures raised by the generic body decoder.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Body was declared as JSON but could not be parsed.
	#[error("Provider returned malformed JSON.")]
	MalformedJson {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// Body was declared as JSON but carried trailing data after the document.
	#[error("Provider returned JSON followed by trailing data.")]
	TrailingJson {
		/// Parser failure raised at the trailing bytes.
		#[source]
		source: serde_json::Error,
		/// HTTP status code of the response.
		status: u16,
	},
	/// Server error whose body was not JSON.
	#[error("An OAuth server error was encountered that did not contain a JSON body.")]
	ServerErrorWithoutJson {
		/// HTTP status code of the response.
		status: u16,
	},
	/// Body decoded, but not into a field mapping.
	#[error("Invalid response received from the authorization server; expected a JSON object.")]
	ExpectedJsonObject {
		/// HTTP status code of the response.
		status: u16,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
