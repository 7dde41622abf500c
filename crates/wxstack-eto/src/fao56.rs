//! FAO-56 Penman-Monteith reference evapotranspiration.
//!
//! Implements the daily reference-crop combination equation with the
//! Hargreaves-style radiation fallback for sources that report only
//! temperature extremes (no measured solar radiation). Equation and
//! constant numbering follow FAO Irrigation and Drainage Paper 56.

use crate::error::EtoError;

/// Solar constant, MJ m^-2 min^-1.
const SOLAR_CONSTANT: f64 = 0.0820;

/// Stefan-Boltzmann constant, MJ K^-4 m^-2 day^-1.
const STEFAN_BOLTZMANN: f64 = 4.903e-9;

/// Hargreaves radiation adjustment coefficient for interior locations.
const K_RS: f64 = 0.16;

/// Wind speed floor, m/s. Calm readings are clamped here rather than
/// rejected; the combination equation degrades badly as u2 -> 0.
const MIN_WIND_SPEED: f64 = 0.5;

/// Saturation vapor pressure at temperature `t` (C), in kPa.
/// FAO-56 Eq. 11.
fn saturation_vapor_pressure(t: f64) -> f64 {
    0.6108 * (17.27 * t / (t + 237.3)).exp()
}

/// Slope of the saturation vapor pressure curve at `t` (C), kPa/C.
/// FAO-56 Eq. 13.
fn vapor_pressure_slope(t: f64) -> f64 {
    4098.0 * saturation_vapor_pressure(t) / (t + 237.3).powi(2)
}

/// Atmospheric pressure at `elevation` meters, kPa. FAO-56 Eq. 7.
fn atmospheric_pressure(elevation: f64) -> f64 {
    101.3 * ((293.0 - 0.0065 * elevation) / 293.0).powf(5.26)
}

/// Extraterrestrial radiation for a given latitude (degrees) and day
/// of year, in MJ m^-2 day^-1. FAO-56 Eqs. 21-25.
pub fn extraterrestrial_radiation(latitude_deg: f64, day_of_year: u16) -> f64 {
    let phi = latitude_deg.to_radians();
    let j = f64::from(day_of_year);

    // Inverse relative Earth-Sun distance and solar declination.
    let dr = 1.0 + 0.033 * (2.0 * std::f64::consts::PI / 365.0 * j).cos();
    let decl = 0.409 * (2.0 * std::f64::consts::PI / 365.0 * j - 1.39).sin();

    // Sunset hour angle; the clamp covers polar day/night where
    // -tan(phi)tan(decl) leaves [-1, 1].
    let ws = (-phi.tan() * decl.tan()).clamp(-1.0, 1.0).acos();

    24.0 * 60.0 / std::f64::consts::PI
        * SOLAR_CONSTANT
        * dr
        * (ws * phi.sin() * decl.sin() + phi.cos() * decl.cos() * ws.sin())
}

fn check_finite(value: f64, field: &'static str) -> Result<f64, EtoError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EtoError::NonFinite { field })
    }
}

/// Daily reference evapotranspiration in mm/day.
///
/// All inputs must already be SI: temperatures in C, wind in m/s,
/// elevation in meters, humidities in percent. `mean_temp` defaults to
/// the arithmetic mean of the extremes. `plant_coefficient` enters the
/// net shortwave term as the surface albedo; 0.23 reproduces the FAO
/// reference crop.
///
/// # Errors
///
/// Rejects non-finite inputs, latitudes outside [-90, 90], and day of
/// year outside 1-366. Non-positive wind is clamped to 0.5 m/s, not
/// rejected.
pub fn compute_eto(
    max_temp: f64,
    min_temp: f64,
    mean_temp: Option<f64>,
    wind_speed: f64,
    elevation: f64,
    max_humidity: f64,
    min_humidity: f64,
    latitude: f64,
    plant_coefficient: f64,
    day_of_year: u16,
) -> Result<f64, EtoError> {
    let t_max = check_finite(max_temp, "max_temp")?;
    let t_min = check_finite(min_temp, "min_temp")?;
    let wind = check_finite(wind_speed, "wind_speed")?;
    let elevation = check_finite(elevation, "elevation")?;
    let h_max = check_finite(max_humidity, "max_humidity")?;
    let h_min = check_finite(min_humidity, "min_humidity")?;
    let latitude = check_finite(latitude, "latitude")?;
    let albedo = check_finite(plant_coefficient, "plant_coefficient")?;

    if let Some(t) = mean_temp {
        check_finite(t, "mean_temp")?;
    }

    if !(-90.0..=90.0).contains(&latitude) {
        return Err(EtoError::LatitudeOutOfRange(latitude));
    }
    if !(1..=366).contains(&day_of_year) {
        return Err(EtoError::DayOfYearOutOfRange(day_of_year));
    }

    let t_mean = mean_temp.unwrap_or((t_max + t_min) / 2.0);
    let u2 = wind.max(MIN_WIND_SPEED);

    // Psychrometric constant from elevation-derived pressure.
    let pressure = atmospheric_pressure(elevation);
    let gamma = 0.000665 * pressure;

    // Vapor pressure terms. The actual vapor pressure weights the
    // extreme-temperature saturation pressures by the opposite
    // humidity extremes (FAO-56 Eq. 17).
    let es_max = saturation_vapor_pressure(t_max);
    let es_min = saturation_vapor_pressure(t_min);
    let es = (es_max + es_min) / 2.0;
    let ea = (es_min * h_max / 100.0 + es_max * h_min / 100.0) / 2.0;

    let delta = vapor_pressure_slope(t_mean);

    // Radiation balance: Hargreaves estimate for solar radiation from
    // the diurnal temperature range, then net shortwave and longwave.
    let ra = extraterrestrial_radiation(latitude, day_of_year);
    let rs = K_RS * (t_max - t_min).abs().sqrt() * ra;
    let rso = (0.75 + 2e-5 * elevation) * ra;
    let rns = (1.0 - albedo) * rs;

    let relative_shortwave = if rso > 0.0 { (rs / rso).min(1.0) } else { 1.0 };
    let t_max_k = t_max + 273.16;
    let t_min_k = t_min + 273.16;
    let rnl = STEFAN_BOLTZMANN * (t_max_k.powi(4) + t_min_k.powi(4)) / 2.0
        * (0.34 - 0.14 * ea.max(0.0).sqrt())
        * (1.35 * relative_shortwave - 0.35);

    let rn = rns - rnl;
    // Soil heat flux is negligible at a daily time step (FAO-56 Eq. 42).
    let g = 0.0;

    let numerator =
        0.408 * delta * (rn - g) + gamma * (900.0 / (t_mean + 273.0)) * u2 * (es - ea);
    let denominator = delta + gamma * (1.0 + 0.34 * u2);

    Ok(numerator / denominator)
}
