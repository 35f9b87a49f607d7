//! Redacting wrapper for token secrets.

// self
use crate::_prelude::*;

const REDACTED: &str = "<redacted>";

/// Access or refresh token string that never prints itself.
///
/// `Debug` and `Display` both render a placeholder; serde sees the raw string so tokens can be
/// persisted by the caller.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSecret {
	value: String,
}
impl TokenSecret {
	/// Wraps a secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self { value: value.into() }
	}

	/// Raw secret. Do not log it.
	pub fn expose(&self) -> &str {
		&self.value
	}

	/// Consumes the wrapper and returns the raw secret.
	pub fn into_inner(self) -> String {
		self.value
	}
}
impl From<String> for TokenSecret {
	fn from(value: String) -> Self {
		Self { value }
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "TokenSecret({REDACTED})")
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(REDACTED)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn formatting_never_leaks_the_value() {
		let secret = TokenSecret::from(String::from("mock_access_token"));

		assert_eq!(format!("{secret:?}"), "TokenSecret(<redacted>)");
		assert_eq!(secret.to_string(), "<redacted>");
		assert_eq!(
			serde_json::to_string(&secret).expect("Secret should serialize."),
			"\"mock_access_token\""
		);
		assert_eq!(secret.into_inner(), "mock_access_token");
	}
}
