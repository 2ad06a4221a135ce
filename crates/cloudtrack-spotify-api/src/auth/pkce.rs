use crate::auth::callback::CallbackListener;
use crate::auth::callback::await_code;
use crate::bearer_token::BearerToken;
use crate::config::SpotifyConfig;
use base64::Engine;
use chrono::TimeDelta;
use chrono::Utc;
use eyre::Result;
use eyre::WrapErr;
use open::that as open_browser;
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use std::path::Path;
use tracing::debug;
use tracing::info;
use tracing::warn;
use url::Url;

pub const AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";
pub const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const SCOPE: &str = "user-top-read";

/// Seconds shaved off the provider's lifetime so a token is not used at the edge.
const EXPIRY_MARGIN_SECS: i64 = 60;

pub async fn get_saved_token(path: &Path) -> Result<Option<BearerToken>> {
    let Ok(token) = tokio::fs::read(path).await else {
        return Ok(None);
    };
    let token: BearerToken = match serde_json::from_slice(&token) {
        Ok(x) => x,
        Err(e) => {
            warn!("Ignoring unreadable token cache {}: {}", path.display(), e);
            return Ok(None);
        }
    };
    if token.is_expired() {
        debug!("Cached token expired at {}", token.expires_at);
        return Ok(None);
    }
    Ok(Some(token))
}

pub async fn save_token(path: &Path, token: &BearerToken) -> Result<()> {
    tokio::fs::write(path, serde_json::to_string_pretty(token)?).await?;
    Ok(())
}

/// Log in through the browser, or reuse a cached token that is still valid.
///
/// Any failure along the way, including a forged state, ends the login with an error.
pub async fn get_bearer_token_via_pkce(config: &SpotifyConfig) -> Result<BearerToken> {
    debug!("Getting bearer token");
    if let Some(x) = get_saved_token(&config.token_file).await? {
        return Ok(x);
    }

    let verifier = generate_code_verifier();
    let challenge = code_challenge(&verifier);
    let state = generate_state();
    let auth_url = authorize_url(config, &challenge, &state)?;

    let listener = CallbackListener::bind(&config.redirect_uri, state)
        .await
        .wrap_err_with(|| format!("Failed to listen on {}", config.redirect_uri))?;
    let rx = listener.spawn();

    println!("Please log in to Spotify by visiting the following page in your browser:");
    println!("{}", auth_url);
    info!("Opening browser for auth");
    if let Err(e) = open_browser(auth_url.as_str()) {
        warn!("Could not open browser: {}", e);
    }

    let code = await_code(rx, config.login_timeout).await?;
    let rtn = exchange_code(config, &code, &verifier).await?;
    save_token(&config.token_file, &rtn).await?;

    Ok(rtn)
}

pub fn authorize_url(config: &SpotifyConfig, challenge: &str, state: &str) -> Result<Url> {
    Ok(Url::parse_with_params(
        AUTHORIZE_URL,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("code_challenge_method", "S256"),
            ("code_challenge", challenge),
            ("state", state),
            ("scope", SCOPE),
        ],
    )?)
}

async fn exchange_code(config: &SpotifyConfig, code: &str, verifier: &str) -> Result<BearerToken> {
    let client = reqwest::Client::new();
    let resp = client
        .post(TOKEN_URL)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("client_id", config.client_id.as_str()),
            ("code_verifier", verifier),
        ])
        .send()
        .await?
        .error_for_status()
        .wrap_err("Token exchange failed")?
        .json::<TokenResponse>()
        .await?;

    debug!("Access Token: len={}", resp.access_token.len());
    debug!("Scope: {}", resp.scope);
    debug!("Expires in: {}s", resp.expires_in);

    Ok(resp.into_bearer())
}

fn generate_code_verifier() -> String {
    random_alphanumeric(128)
}

fn generate_state() -> String {
    random_alphanumeric(32)
}

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

fn code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(hash)
}

#[derive(Debug, Deserialize, Serialize)]
struct TokenResponse {
    access_token: String,
    token_type: String,
    #[serde(default)]
    scope: String,
    expires_in: i64,
    refresh_token: Option<String>,
}

impl TokenResponse {
    fn into_bearer(self) -> BearerToken {
        let lifetime = (self.expires_in - EXPIRY_MARGIN_SECS).max(0);
        BearerToken {
            access_token: self.access_token,
            expires_at: Utc::now() + TimeDelta::seconds(lifetime),
        }
    }
}
