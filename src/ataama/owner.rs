// std
use std::convert::Infallible;
// self
use crate::{_prelude::*, provider::ResourceOwner};

/// Account type reported in the `type` field of the user-info payload.
///
/// The set is open: values this crate does not know yet are kept verbatim in
/// [`UserType::Other`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserType {
	/// Deactivated account; also used for deleted and banned accounts.
	Deactivated,
	/// Lead.
	Lead,
	/// Student.
	Student,
	/// Affiliate.
	Affiliate,
	/// Coach.
	Coach,
	/// Supercoach.
	Supercoach,
	/// Administrator.
	Admin,
	/// Any value not listed above.
	Other(String),
}
impl UserType {
	/// Returns the wire value.
	pub fn as_str(&self) -> &str {
		match self {
			Self::Deactivated => "deactivated",
			Self::Lead => "lead",
			Self::Student => "student",
			Self::Affiliate => "affiliate",
			Self::Coach => "coach",
			Self::Supercoach => "supercoach",
			Self::Admin => "admin",
			Self::Other(value) => value,
		}
	}
}
impl From<&str> for UserType {
	fn from(value: &str) -> Self {
		match value {
			"deactivated" => Self::Deactivated,
			"lead" => Self::Lead,
			"student" => Self::Student,
			"affiliate" => Self::Affiliate,
			"coach" => Self::Coach,
			"supercoach" => Self::Supercoach,
			"admin" => Self::Admin,
			other => Self::Other(other.to_owned()),
		}
	}
}
impl From<String> for UserType {
	fn from(value: String) -> Self {
		Self::from(value.as_str())
	}
}
impl From<UserType> for String {
	fn from(value: UserType) -> Self {
		match value {
			UserType::Other(value) => value,
			known => known.as_str().to_owned(),
		}
	}
}
impl FromStr for UserType {
	type Err = Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self::from(s))
	}
}
impl Display for UserType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Ataama user as returned by `/v1/user/whoami`.
///
/// Wraps the decoded payload as-is. Accessors never fail: a missing key, `null`, or a
/// non-scalar value reads as `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AtaamaResourceOwner {
	payload: Payload,
}
impl AtaamaResourceOwner {
	/// Wraps a decoded user-info payload.
	pub fn new(payload: Payload) -> Self {
		Self { payload }
	}

	/// User identifier (`user_id`).
	pub fn id(&self) -> Option<Cow<'_, str>> {
		self.scalar("user_id")
	}

	/// Username (`username`).
	pub fn name(&self) -> Option<Cow<'_, str>> {
		self.scalar("username")
	}

	/// Avatar URL (`usericon`).
	///
	/// The URL always ends with `?N`, where `N` is a cache-busting integer bumped on every avatar
	/// change, so it can serve as a weak version token. It is returned untouched.
	pub fn icon(&self) -> Option<Cow<'_, str>> {
		self.scalar("usericon")
	}

	/// Raw account type (`type`), including values outside [`UserType`]'s known set.
	pub fn user_type(&self) -> Option<Cow<'_, str>> {
		self.scalar("type")
	}

	/// Account type as a [`UserType`].
	pub fn kind(&self) -> Option<UserType> {
		self.user_type().map(|value| UserType::from(value.as_ref()))
	}

	/// Full decoded payload.
	pub fn to_raw(&self) -> &Payload {
		&self.payload
	}

	/// Consumes the owner and returns the decoded payload.
	pub fn into_raw(self) -> Payload {
		self.payload
	}

	fn scalar(&self, key: &str) -> Option<Cow<'_, str>> {
		match self.payload.get(key)? {
			Value::String(text) => Some(Cow::Borrowed(text.as_str())),
			Value::Number(number) => Some(Cow::Owned(number.to_string())),
			Value::Bool(flag) => Some(Cow::Owned(flag.to_string())),
			Value::Null | Value::Array(_) | Value::Object(_) => None,
		}
	}
}
impl ResourceOwner for AtaamaResourceOwner {
	fn id(&self) -> Option<Cow<'_, str>> {
		AtaamaResourceOwner::id(self)
	}

	fn to_raw(&self) -> &Payload {
		AtaamaResourceOwner::to_raw(self)
	}
}
impl From<Payload> for AtaamaResourceOwner {
	fn from(payload: Payload) -> Self {
		Self::new(payload)
	}
}
