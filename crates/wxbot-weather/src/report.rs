//! Render the single-line weather reply.

use crate::types::WeatherReport;
use crate::units::{fahrenheit_to_celsius, mph_to_kph};

/// IRC bold toggle; wraps the forecast segment on both sides.
const BOLD: char = '\u{2}';

/// Build the reply line. Temperatures and speeds get one fractional digit;
/// humidity is printed as the provider sent it.
pub fn format_report(report: &WeatherReport) -> String {
    let obs = &report.observation;
    format!(
        "{address}: {condition}, {t_f:.1}F/{t_c:.1}C\
         (H:{h_f:.1}F/{h_c:.1}C L:{l_f:.1}F/{l_c:.1}C), \
         Humidity: {humidity}%, Wind: {mph:.1}mph/{kph:.1}kph, \
         Forecast for the next hour: {BOLD}{forecast}{BOLD}",
        address = report.address,
        condition = obs.condition,
        t_f = obs.temp_f,
        t_c = fahrenheit_to_celsius(obs.temp_f),
        h_f = obs.high_f,
        h_c = fahrenheit_to_celsius(obs.high_f),
        l_f = obs.low_f,
        l_c = fahrenheit_to_celsius(obs.low_f),
        humidity = obs.humidity,
        mph = obs.wind_mph,
        kph = mph_to_kph(obs.wind_mph),
        forecast = obs.next_hour_condition,
    )
}
