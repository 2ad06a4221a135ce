use crate::report::WeatherReport;
use std::fmt;

/// One report as the block printed after a lookup.
pub struct ReportView<'a>(pub &'a WeatherReport);

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "\nWeather for {}", report.location)?;
        writeln!(f, "{}", "-".repeat(30))?;
        writeln!(f, "Temperature: {}", report.temperature)?;
        writeln!(f, "Condition:   {}", report.condition)?;
        writeln!(f, "Humidity:    {}", report.humidity)?;
        writeln!(f, "Wind:        {}", report.wind)?;
        if !report.forecast.is_empty() {
            writeln!(f, "Forecast:")?;
            for line in &report.forecast {
                writeln!(f, "  {}", line)?;
            }
        }
        Ok(())
    }
}

/// Numbered listing of stored searches.
pub struct HistoryView<'a>(pub &'a [WeatherReport]);

impl fmt::Display for HistoryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Recent searches:")?;
        for (i, entry) in self.0.iter().enumerate() {
            writeln!(
                f,
                "{}. [{}] {} - {}, {}",
                i + 1,
                entry.timestamp,
                entry.location,
                entry.temperature,
                entry.condition
            )?;
        }
        Ok(())
    }
}

pub fn format_report(report: &WeatherReport) -> String {
    ReportView(report).to_string()
}

pub fn format_history(entries: &[WeatherReport]) -> String {
    HistoryView(entries).to_string()
}
