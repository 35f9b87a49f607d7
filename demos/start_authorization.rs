//! Builds an Ataama authorization URL from a JSON config and shows how the redirect handler
//! validates `state` before exchanging the code.

// std
use std::collections::HashMap;
// crates.io
use color_eyre::Result;
// self
use oauth2_ataama::{
	ataama::AtaamaConfig,
	auth::ScopeSet,
	flows::AuthorizationOptions,
	provider::PkceCodeChallengeMethod,
};

const CONFIG: &str = r#"{
	"client_id": "demo-client",
	"client_secret": "demo-secret",
	"redirect_uri": "https://app.example.com/oauth/callback",
	"pkce": "S256",
	"site": "acme"
}"#;

fn main() -> Result<()> {
	color_eyre::install()?;

	let config: AtaamaConfig = serde_json::from_str(CONFIG)?;
	let client = config.into_client()?;
	let session = client
		.authorization_url(AuthorizationOptions::default().with_scopes(ScopeSet::new(["user"])?))?;

	println!("Send your user to {}.", &session.authorize_url);

	if session.code_challenge_method() == Some(PkceCodeChallengeMethod::S256) {
		println!("PKCE challenge: {}.", session.code_challenge().unwrap_or_default());
	}

	let mut sessions = HashMap::new();

	sessions.insert(session.state.clone(), session.clone());

	// Redirect handler: look the session up by the returned `state`.
	let returned_state = session.state.clone();

	if let Some(stashed) = sessions.remove(&returned_state) {
		stashed.validate_state(&returned_state)?;
		println!("Validated state; call Client::exchange_code with the returned code next.");
	} else {
		eprintln!("State `{returned_state}` was not recognized.");
	}

	Ok(())
}
