//! Access token value object built from token endpoint payloads.

// self
use crate::{_prelude::*, auth::token::secret::TokenSecret, response};

/// Values above this are treated as absolute unix timestamps when reading `expires`.
///
/// Anything smaller is a relative lifetime in seconds. The constant is the publication date of
/// the OAuth 2.0 draft that introduced `expires`.
const EXPIRATION_TIMESTAMP_FLOOR: i64 = 1_359_936_000;

/// Token issued by the provider, passed through to callers unmodified.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Expiry instant, when the provider supplied `expires_in` or `expires`.
	pub expires_at: Option<OffsetDateTime>,
	/// Refresh token secret, if the provider issued one.
	pub refresh_token: Option<TokenSecret>,
	/// Resource owner identifier attached to the token response, if any.
	pub resource_owner_id: Option<String>,
	/// Every other field of the token response (e.g. `token_type`).
	pub values: Payload,
}
impl AccessToken {
	/// Creates a bare token without expiry or extra values.
	pub fn new(access_token: impl Into<String>) -> Self {
		Self {
			access_token: TokenSecret::new(access_token),
			expires_at: None,
			refresh_token: None,
			resource_owner_id: None,
			values: Payload::new(),
		}
	}

	/// Builds a token from a decoded token endpoint payload using the current UTC clock.
	pub fn from_payload(payload: Payload) -> Result<Self> {
		Self::from_payload_at(payload, OffsetDateTime::now_utc())
	}

	/// Builds a token from a decoded token endpoint payload, resolving relative lifetimes
	/// against `now`.
	pub fn from_payload_at(mut payload: Payload, now: OffsetDateTime) -> Result<Self> {
		let access_token = match payload.remove("access_token") {
			Some(Value::String(token)) if !token.is_empty() => token,
			_ => return Err(invalid("access_token is required")),
		};
		let resource_owner_id = payload.remove("resource_owner_id").and_then(scalar_string);
		let refresh_token = payload
			.remove("refresh_token")
			.and_then(scalar_string)
			.filter(|token| !token.is_empty())
			.map(TokenSecret::new);
		let expires_in = payload.remove("expires_in").filter(|value| !value.is_null());
		let expires = payload.remove("expires").filter(|value| !response::is_blank(value));
		let expires_at = match (expires_in, expires) {
			(Some(value), _) => {
				let secs =
					integer(&value).ok_or_else(|| invalid("expires_in value must be an integer"))?;

				// A zero lifetime means the provider did not say.
				if secs == 0 { None } else { Some(relative_expiry(now, secs)?) }
			},
			(None, Some(value)) => {
				let raw = integer(&value).ok_or_else(|| invalid("expires value must be an integer"))?;

				if raw > EXPIRATION_TIMESTAMP_FLOOR {
					Some(
						OffsetDateTime::from_unix_timestamp(raw)
							.map_err(|_| invalid("expires value is out of range"))?,
					)
				} else {
					Some(relative_expiry(now, raw)?)
				}
			},
			(None, None) => None,
		};

		Ok(Self {
			access_token: TokenSecret::new(access_token),
			expires_at,
			refresh_token,
			resource_owner_id,
			values: payload,
		})
	}

	/// Returns the raw access token string. Callers must avoid logging it.
	pub fn token(&self) -> &str {
		self.access_token.expose()
	}

	/// Returns `true` when the token carries an expiry at or before `instant`.
	///
	/// Tokens without a known expiry never report as expired.
	pub fn has_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at.is_some_and(|expires_at| expires_at <= instant)
	}

	/// Returns `true` when the token has expired relative to the current clock.
	pub fn has_expired(&self) -> bool {
		self.has_expired_at(OffsetDateTime::now_utc())
	}
}

fn relative_expiry(now: OffsetDateTime, secs: i64) -> Result<OffsetDateTime> {
	now.checked_add(Duration::seconds(secs)).ok_or_else(|| invalid("token lifetime is out of range"))
}

/// Reads a whole number of seconds from a JSON number or a numeric string; `3600.0` counts.
fn integer(value: &Value) -> Option<i64> {
	match value {
		Value::Number(number) => number.as_i64().or_else(|| number.as_f64().and_then(whole)),
		Value::String(text) => {
			let text = text.trim();

			text.parse().ok().or_else(|| text.parse().ok().and_then(whole))
		},
		_ => None,
	}
}

fn whole(value: f64) -> Option<i64> {
	(value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64)
		.then_some(value as i64)
}

fn scalar_string(value: Value) -> Option<String> {
	match value {
		Value::String(text) => Some(text),
		Value::Number(number) => Some(number.to_string()),
		_ => None,
	}
}

fn invalid(reason: &str) -> Error {
	Error::InvalidTokenResponse { reason: reason.into() }
}
