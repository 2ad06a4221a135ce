use eyre::WrapErr;
use eyre::eyre;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8080/callback";
pub const DEFAULT_TOKEN_FILE: &str = "bearer_token.json";

#[derive(Debug, Clone, PartialEq)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub redirect_uri: Url,
    /// How long to wait for the browser to hit the callback.
    pub login_timeout: Duration,
    pub token_file: PathBuf,
}

impl SpotifyConfig {
    pub fn new(client_id: impl Into<String>) -> eyre::Result<Self> {
        Ok(Self {
            client_id: client_id.into(),
            redirect_uri: Url::parse(DEFAULT_REDIRECT_URI)?,
            login_timeout: Duration::from_secs(300),
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
        })
    }

    /// Read `SPOTIFY_*` variables; only the client id is required.
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let client_id =
            lookup("SPOTIFY_CLIENT_ID").ok_or_else(|| eyre!("Missing env var: SPOTIFY_CLIENT_ID"))?;
        let mut config = Self::new(client_id)?;
        if let Some(x) = lookup("SPOTIFY_REDIRECT_URI") {
            config.redirect_uri = Url::parse(&x).wrap_err("Invalid SPOTIFY_REDIRECT_URI")?;
        }
        if let Some(x) = lookup("SPOTIFY_LOGIN_TIMEOUT_SECS") {
            let secs = x
                .trim()
                .parse::<u64>()
                .wrap_err("Invalid SPOTIFY_LOGIN_TIMEOUT_SECS")?;
            config.login_timeout = Duration::from_secs(secs);
        }
        if let Some(x) = lookup("SPOTIFY_TOKEN_FILE") {
            config.token_file = PathBuf::from(x);
        }
        if config.redirect_uri.scheme() != "http" {
            return Err(eyre!(
                "Redirect URI must be plain http for the local listener: {}",
                config.redirect_uri
            ));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_id_is_required() {
        assert!(SpotifyConfig::from_lookup(|_| None).is_err());
    }

    #[test]
    fn defaults_to_local_callback() {
        let config = SpotifyConfig::from_lookup(|name| {
            (name == "SPOTIFY_CLIENT_ID").then(|| "abc".to_string())
        })
        .unwrap();
        assert_eq!(config.client_id, "abc");
        assert_eq!(config.redirect_uri.as_str(), DEFAULT_REDIRECT_URI);
        assert_eq!(config.login_timeout, Duration::from_secs(300));
    }

    #[test]
    fn rejects_https_redirect() {
        let result = SpotifyConfig::from_lookup(|name| match name {
            "SPOTIFY_CLIENT_ID" => Some("abc".to_string()),
            "SPOTIFY_REDIRECT_URI" => Some("https://localhost:8080/callback".to_string()),
            _ => None,
        });
        assert!(result.is_err());
    }
}
