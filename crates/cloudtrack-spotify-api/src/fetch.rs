use crate::bearer_token::BearerToken;
use eyre::eyre;
use tracing::debug;

/// GET an authenticated Web API endpoint and decode its JSON body.
///
/// Error statuses are reported together with the body Spotify sent back.
pub async fn fetch<T>(url: &str, bearer: &BearerToken) -> eyre::Result<T>
where
    T: serde::de::DeserializeOwned,
{
    debug!("GET {}", url);
    let client = reqwest::Client::new();
    let resp = client
        .get(url)
        .bearer_auth(&bearer.access_token)
        .send()
        .await?;
    let status = resp.status();
    let res = resp.text().await?;
    if !status.is_success() {
        return Err(eyre!("Spotify returned {} for {}: {}", status, url, res));
    }

    serde_json::from_str(&res)
        .map_err(|e| eyre::Error::new(e).wrap_err(format!("Failed to deserialize:\n{}", res)))
}
