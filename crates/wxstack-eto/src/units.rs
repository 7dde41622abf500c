//! Stateless unit conversions feeding the ETo engine.
//!
//! The Penman-Monteith formula only ever sees SI inputs (degrees C,
//! m/s). These helpers are defined for all finite reals; negative
//! inputs pass through arithmetically and are not validated here.

const MPH_TO_MS: f64 = 0.44704;
const KPH_TO_MS: f64 = 1000.0 / 3600.0;

/// Fahrenheit to Celsius.
pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

/// Celsius to Fahrenheit.
pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

/// Miles per hour to meters per second.
pub fn mph_to_ms(mph: f64) -> f64 {
    mph * MPH_TO_MS
}

/// Kilometers per hour to meters per second.
pub fn kph_to_ms(kph: f64) -> f64 {
    kph * KPH_TO_MS
}
