//! Generic response decoding shared by every provider.
//!
//! Providers run their own sniffing in [`Provider::parse_response`](crate::provider::Provider)
//! and then hand the response to [`decode_body`], which picks form-urlencoded or JSON decoding
//! from the `Content-Type` header the same way for every provider.

// crates.io
use oauth2::{
	HttpResponse,
	http::{StatusCode, header::CONTENT_TYPE},
};
// self
use crate::{_prelude::*, error::DecodeError};

/// Decoded field mapping produced from a token or user-info response.
pub type Payload = serde_json::Map<String, Value>;

/// Result of decoding a response body.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodedBody {
	/// Body decoded into a key/value mapping (JSON object or form-urlencoded).
	Fields(Payload),
	/// Body could not be decoded into fields and is kept verbatim.
	Text(String),
}
impl DecodedBody {
	/// Returns the decoded fields, if any.
	pub fn fields(&self) -> Option<&Payload> {
		match self {
			Self::Fields(fields) => Some(fields),
			Self::Text(_) => None,
		}
	}

	/// Consumes the body and returns the decoded fields, if any.
	pub fn into_fields(self) -> Option<Payload> {
		match self {
			Self::Fields(fields) => Some(fields),
			Self::Text(_) => None,
		}
	}
}

/// Decodes `response` based on its `Content-Type`.
///
/// - `*urlencoded*` content types decode as form fields (string values).
/// - Anything else is tried as JSON; objects become [`DecodedBody::Fields`], other JSON values
///   become [`DecodedBody::Text`].
/// - When JSON parsing fails, declared JSON content is an error, a 500 status is an error, and
///   everything else is returned as text.
pub fn decode_body(response: &HttpResponse) -> Result<DecodedBody> {
	let content_type = content_type(response, ";");
	let status = response.status();
	let body = response.body();

	if content_type.contains("urlencoded") {
		let fields = url::form_urlencoded::parse(body)
			.into_owned()
			.map(|(key, value)| (key, Value::String(value)))
			.collect();

		return Ok(DecodedBody::Fields(fields));
	}

	match parse_json(body, status) {
		Ok(Value::Object(fields)) => Ok(DecodedBody::Fields(fields)),
		Ok(_) => Ok(DecodedBody::Text(body_text(response).into_owned())),
		Err(e) if content_type.contains("json") => Err(e.into()),
		Err(_) if status == StatusCode::INTERNAL_SERVER_ERROR =>
			Err(DecodeError::ServerErrorWithoutJson { status: status.as_u16() }.into()),
		Err(_) => Ok(DecodedBody::Text(body_text(response).into_owned())),
	}
}

/// Joins every `Content-Type` header value with a single space.
pub fn content_type_line(response: &HttpResponse) -> String {
	content_type(response, " ")
}

/// Returns the canonical reason phrase for the response status (empty when unknown).
pub fn reason_phrase(response: &HttpResponse) -> &'static str {
	response.status().canonical_reason().unwrap_or_default()
}

/// Returns `true` for field values a loosely typed server means as "nothing": `null`, `false`,
/// zero, `""`, `"0"`, and empty arrays or objects.
pub fn is_blank(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::Bool(flag) => !flag,
		Value::Number(number) => number.as_f64() == Some(0.0),
		Value::String(text) => text.is_empty() || text == "0",
		Value::Array(items) => items.is_empty(),
		Value::Object(fields) => fields.is_empty(),
	}
}

/// Returns the response body as text, replacing invalid UTF-8 sequences.
pub fn body_text(response: &HttpResponse) -> Cow<'_, str> {
	String::from_utf8_lossy(response.body())
}

fn content_type(response: &HttpResponse, separator: &str) -> String {
	response
		.headers()
		.get_all(CONTENT_TYPE)
		.iter()
		.map(|value| String::from_utf8_lossy(value.as_bytes()))
		.collect::<Vec<_>>()
		.join(separator)
}

fn parse_json(body: &[u8], status: StatusCode) -> Result<Value, DecodeError> {
	let mut de = serde_json::Deserializer::from_slice(body);
	let value: Value = serde_path_to_error::deserialize(&mut de)
		.map_err(|source| DecodeError::MalformedJson { source, status: status.as_u16() })?;

	de.end().map_err(|source| DecodeError::TrailingJson { source, status: status.as_u16() })?;

	Ok(value)
}
