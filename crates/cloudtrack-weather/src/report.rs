use crate::query::Query;
use crate::wttr::Hourly;
use crate::wttr::TextValue;
use crate::wttr::WttrResponse;
use eyre::OptionExt;
use eyre::Result;
use serde::Deserialize;
use serde::Serialize;

/// Forecast entries kept per report.
pub const FORECAST_ENTRIES: usize = 5;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One city's conditions, as printed and as stored in the history file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: String,
    pub temperature: String,
    pub condition: String,
    pub humidity: String,
    pub wind: String,
    pub forecast: Vec<String>,
    pub timestamp: String,
}

impl WeatherReport {
    /// Build a report from a decoded response.
    ///
    /// Fails as a whole when the current conditions, their description, or
    /// the first day's hourly list is missing. A partial report is never built.
    pub fn from_response(query: &Query, response: WttrResponse) -> Result<Self> {
        let WttrResponse {
            current_condition,
            weather,
        } = response;
        let current = current_condition
            .into_iter()
            .next()
            .ok_or_eyre("Response has no current_condition entry")?;
        let condition = first_text(&current.weather_desc)
            .ok_or_eyre("Current condition has no description")?;
        let day = weather
            .into_iter()
            .next()
            .ok_or_eyre("Response has no weather entry")?;
        let forecast = day
            .hourly
            .iter()
            .take(FORECAST_ENTRIES)
            .map(forecast_line)
            .collect::<Result<Vec<_>>>()?;

        Ok(WeatherReport {
            location: query.to_string(),
            temperature: format!("{}°C", current.temp_c),
            condition,
            humidity: format!("{}%", current.humidity),
            wind: format!("{} km/h {}", current.windspeed_kmph, current.winddir_16_point),
            forecast,
            timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
        })
    }
}

fn first_text(values: &[TextValue]) -> Option<String> {
    values.first().map(|x| x.value.clone())
}

fn forecast_line(hourly: &Hourly) -> Result<String> {
    let condition =
        first_text(&hourly.weather_desc).ok_or_eyre("Hourly entry has no description")?;
    Ok(format!(
        "{} - {}°C, {}",
        clock_time(&hourly.time),
        hourly.temp_c,
        condition
    ))
}

/// wttr.in encodes hours as `"0"`, `"300"`, `"1200"`.
fn clock_time(raw: &str) -> String {
    match raw.trim().parse::<u32>() {
        Ok(x) => format!("{:02}:{:02}", x / 100, x % 100),
        Err(_) => raw.to_string(),
    }
}
