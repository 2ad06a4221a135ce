use std::ops::Deref;

/// A city name submitted for one independent lookup.
///
/// Queries are not deduplicated; the same city given twice is fetched twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(pub String);
impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl Deref for Query {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
impl From<&str> for Query {
    fn from(value: &str) -> Self {
        Query(value.to_string())
    }
}
impl From<String> for Query {
    fn from(value: String) -> Self {
        Query(value)
    }
}
