use serde::Deserialize;
use serde::Serialize;

/// Subset of the `?format=j1` document served by wttr.in.
///
/// Numeric values arrive as strings and are kept that way.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WttrResponse {
    #[serde(rename = "current_condition")]
    pub current_condition: Vec<CurrentCondition>,
    #[serde(default)]
    pub weather: Vec<WeatherDay>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentCondition {
    #[serde(rename = "temp_C")]
    pub temp_c: String,
    pub humidity: String,
    #[serde(rename = "windspeedKmph")]
    pub windspeed_kmph: String,
    #[serde(rename = "winddir16Point")]
    pub winddir_16_point: String,
    #[serde(rename = "weatherDesc")]
    pub weather_desc: Vec<TextValue>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherDay {
    pub hourly: Vec<Hourly>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hourly {
    pub time: String,
    #[serde(rename = "tempC")]
    pub temp_c: String,
    #[serde(rename = "weatherDesc")]
    pub weather_desc: Vec<TextValue>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextValue {
    pub value: String,
}
