use crate::track::ExternalUrls;
use crate::track::Image;
use crate::uri::Uri;
use serde::Deserialize;
use serde::Serialize;

/// Artist as embedded in a track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedArtist {
    #[serde(rename = "external_urls")]
    pub external_urls: ExternalUrls,
    pub href: Uri,
    pub id: String,
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    #[serde(rename = "external_urls")]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub genres: Vec<String>,
    pub href: Uri,
    pub id: String,
    #[serde(default)]
    pub images: Vec<Image>,
    pub name: String,
    #[serde(default)]
    pub popularity: i64,
    pub uri: String,
}
