use serde::Deserialize;
use serde::Serialize;

/// API link carried in Spotify objects, validated on decode.
#[derive(Debug, Clone, PartialEq)]
pub struct Uri(pub http::Uri);

impl std::fmt::Display for Uri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Uri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        http::Uri::try_from(raw.as_str())
            .map(Uri)
            .map_err(serde::de::Error::custom)
    }
}

impl Serialize for Uri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(&self.0)
    }
}
