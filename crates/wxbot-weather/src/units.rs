//! Unit conversions for report rendering.

/// Convert Fahrenheit to Celsius.
pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

/// Convert miles per hour to kilometres per hour.
pub fn mph_to_kph(mph: f64) -> f64 {
    mph * 1.609
}
