use crate::query::Query;
use crate::report::WeatherReport;
use crate::wttr::WttrResponse;
use eyre::eyre;
use std::future::Future;
use tracing::debug;
use url::Url;

/// Anything that can turn one query into one report.
pub trait ReportSource: Send + Sync + 'static {
    fn fetch_report(
        &self,
        query: &Query,
    ) -> impl Future<Output = eyre::Result<WeatherReport>> + Send;
}

/// Fetches `<base>/<city>?format=j1` from a wttr.in compatible endpoint.
#[derive(Debug, Clone)]
pub struct WttrClient {
    client: reqwest::Client,
    base_url: Url,
}

impl WttrClient {
    pub fn new(base_url: &str) -> eyre::Result<Self> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> eyre::Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(eyre!("Weather base URL cannot be a base: {}", base_url));
        }
        Ok(Self { client, base_url })
    }

    pub fn url_for(&self, query: &Query) -> eyre::Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| eyre!("Weather base URL cannot be a base: {}", self.base_url))?
            .pop_if_empty()
            .push(query);
        url.query_pairs_mut().append_pair("format", "j1");
        Ok(url)
    }
}

impl ReportSource for WttrClient {
    async fn fetch_report(&self, query: &Query) -> eyre::Result<WeatherReport> {
        let url = self.url_for(query)?;
        debug!("Fetching {}", url);
        let res = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let response = decode(&res)?;
        WeatherReport::from_response(query, response)
    }
}

pub fn decode(body: &str) -> eyre::Result<WttrResponse> {
    match serde_json::from_str(body) {
        Ok(x) => Ok(x),
        Err(e) => Err(eyre::Error::new(e).wrap_err(format!("Failed to deserialize:\n{}", body))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_encodes_city_as_path_segment() {
        let client = WttrClient::new("https://wttr.in").unwrap();
        let url = client.url_for(&Query::from("New York")).unwrap();
        assert_eq!(url.as_str(), "https://wttr.in/New%20York?format=j1");
    }

    #[test]
    fn url_keeps_base_path() {
        let client = WttrClient::new("http://127.0.0.1:9000/api/").unwrap();
        let url = client.url_for(&Query::from("Oslo")).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/api/Oslo?format=j1");
    }

    #[test]
    fn rejects_non_base_url() {
        assert!(WttrClient::new("mailto:weather@example.com").is_err());
    }

    #[test]
    fn decode_requires_current_condition() {
        let body = r#"{"weather": [{"hourly": []}]}"#;
        assert!(decode(body).is_err());
    }

    #[test]
    fn decode_reports_body_on_failure() {
        let err = decode("not json").unwrap_err();
        assert!(format!("{:?}", err).contains("not json"));
    }

    #[test]
    fn decode_ignores_unknown_fields() {
        let body = r#"{
            "current_condition": [{
                "temp_C": "3", "humidity": "90", "windspeedKmph": "7",
                "winddir16Point": "N", "weatherDesc": [{"value": "Mist"}],
                "FeelsLikeC": "1"
            }],
            "nearest_area": [],
            "weather": [{"hourly": [
                {"time": "0", "tempC": "2", "weatherDesc": [{"value": "Fog"}]}
            ]}]
        }"#;
        let response = decode(body).unwrap();
        assert_eq!(response.current_condition[0].temp_c, "3");
        assert_eq!(response.weather[0].hourly.len(), 1);
    }
}
