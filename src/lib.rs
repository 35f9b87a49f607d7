//! Ataama OAuth 2.0 provider adapter: endpoint hooks, response sniffing, and typed resource
//! owners on top of a small async authorization-code client.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod ataama;
pub mod auth;
pub mod error;
pub mod flows;
pub mod http;
pub mod obs;
pub mod provider;
pub mod response;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		ataama::AtaamaProvider,
		flows::Client,
		http::ReqwestHttpClient,
		provider::ClientOptions,
	};

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = Client<AtaamaProvider, ReqwestHttpClient>;

	/// Client identifier used by test clients.
	pub const TEST_CLIENT_ID: &str = "mock_client_id";
	/// Client secret used by test clients.
	pub const TEST_CLIENT_SECRET: &str = "mock_secret";
	/// Redirect URI used by test clients.
	pub const TEST_REDIRECT_URI: &str = "https://app.example.com/callback";

	/// Builds a reqwest HTTP client suitable for talking to `httpmock` servers.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		ReqwestHttpClient::build().expect("Failed to build Reqwest client for tests.")
	}

	/// Client options shared by the test helpers.
	pub fn test_client_options() -> ClientOptions {
		ClientOptions::new(TEST_CLIENT_ID)
			.with_client_secret(TEST_CLIENT_SECRET)
			.with_redirect_uri(
				Url::parse(TEST_REDIRECT_URI).expect("Test redirect URI should parse successfully."),
			)
	}

	/// Constructs a [`Client`] whose Ataama provider points at `base_url` (typically a mock
	/// server) instead of the public `{site}.api.ataama.com` host.
	pub fn build_reqwest_test_client(base_url: &str) -> ReqwestTestClient {
		let provider = AtaamaProvider::default().with_host_template(base_url);

		Client::with_http_client(provider, test_client_options(), test_reqwest_http_client())
	}
}

mod _prelude {
	pub use std::{
		borrow::Cow,
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::{
		error::{Error, Result},
		response::Payload,
	};
}

pub use oauth2;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
