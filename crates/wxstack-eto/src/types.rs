use serde::{Deserialize, Serialize};

use crate::error::EtoError;
use crate::fao56::compute_eto;
use crate::units::{fahrenheit_to_celsius, kph_to_ms, mph_to_ms};

/// Unit system of the values a weather source hands us.
///
/// Governs which conversion path runs before the ETo formula. Note
/// that metric sources deliver wind in km/h, so metric input still
/// needs a wind conversion to m/s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Metric,
    #[default]
    Imperial,
}

/// One day of forecast weather, in the source's ambient units.
///
/// Immutable value type; units are declared by the caller through
/// [`UnitSystem`], not self-described.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyObservation {
    /// Daily minimum temperature (degrees C or F).
    pub min_temp: f64,
    /// Daily maximum temperature (degrees C or F).
    pub max_temp: f64,
    /// Average relative humidity, percent.
    pub avg_humidity: f64,
    /// Maximum wind speed (km/h or mph).
    pub max_wind_speed: f64,
    /// Total precipitation (mm or inches).
    pub total_precip: f64,
    /// Average visibility (km or miles).
    pub avg_visibility: f64,
    /// Ordinal date, 1 = Jan 1, up to 366.
    pub day_of_year: u16,
}

impl DailyObservation {
    /// Temperatures in degrees C and wind in m/s, regardless of the
    /// source unit system.
    pub fn to_si(self, units: UnitSystem) -> Self {
        match units {
            UnitSystem::Metric => Self {
                max_wind_speed: kph_to_ms(self.max_wind_speed),
                ..self
            },
            UnitSystem::Imperial => Self {
                min_temp: fahrenheit_to_celsius(self.min_temp),
                max_temp: fahrenheit_to_celsius(self.max_temp),
                max_wind_speed: mph_to_ms(self.max_wind_speed),
                ..self
            },
        }
    }

    /// Reference evapotranspiration for this day, in mm/day.
    ///
    /// Normalizes to SI first, then runs the FAO-56 computation. The
    /// single average humidity is fed in as both the minimum and
    /// maximum humidity term, a carry-over approximation from sources
    /// that only report a daily average.
    pub fn eto(self, site: SiteParameters, units: UnitSystem) -> Result<f64, EtoError> {
        let si = self.to_si(units);
        compute_eto(
            si.max_temp,
            si.min_temp,
            None,
            si.max_wind_speed,
            site.elevation_m,
            si.avg_humidity,
            si.avg_humidity,
            site.latitude_deg,
            site.plant_coefficient,
            si.day_of_year,
        )
    }
}

/// Fixed site characteristics used by the radiation terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiteParameters {
    /// Elevation above sea level, meters.
    pub elevation_m: f64,
    /// Latitude, degrees, positive north.
    pub latitude_deg: f64,
    /// Crop/plant coefficient; 0.23 is the FAO reference surface.
    pub plant_coefficient: f64,
}

impl SiteParameters {
    pub fn new(elevation_m: f64, latitude_deg: f64) -> Self {
        Self {
            elevation_m,
            latitude_deg,
            plant_coefficient: DEFAULT_PLANT_COEFFICIENT,
        }
    }
}

/// Reference-crop coefficient applied when none is configured.
pub const DEFAULT_PLANT_COEFFICIENT: f64 = 0.23;

#[cfg(test)]
mod tests {
    use super::*;

    fn observation() -> DailyObservation {
        DailyObservation {
            min_temp: 59.0, // 15 C
            max_temp: 77.0, // 25 C
            avg_humidity: 60.0,
            max_wind_speed: 4.4738725841088, // 2 m/s in mph
            total_precip: 0.0,
            avg_visibility: 6.0,
            day_of_year: 182,
        }
    }

    #[test]
    fn test_imperial_to_si_converts_temps_and_wind() {
        let si = observation().to_si(UnitSystem::Imperial);
        assert!((si.min_temp - 15.0).abs() < 1e-9);
        assert!((si.max_temp - 25.0).abs() < 1e-9);
        assert!((si.max_wind_speed - 2.0).abs() < 1e-9);
        // untouched fields
        assert_eq!(si.avg_humidity, 60.0);
        assert_eq!(si.day_of_year, 182);
    }

    #[test]
    fn test_metric_to_si_only_converts_wind() {
        let obs = DailyObservation {
            min_temp: 15.0,
            max_temp: 25.0,
            max_wind_speed: 7.2, // km/h -> 2 m/s
            ..observation()
        };
        let si = obs.to_si(UnitSystem::Metric);
        assert_eq!(si.min_temp, 15.0);
        assert_eq!(si.max_temp, 25.0);
        assert!((si.max_wind_speed - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_eto_matches_across_unit_systems() {
        let site = SiteParameters::new(100.0, 35.0);

        let imperial = observation().eto(site, UnitSystem::Imperial).unwrap();
        let metric = DailyObservation {
            min_temp: 15.0,
            max_temp: 25.0,
            max_wind_speed: 7.2,
            ..observation()
        }
        .eto(site, UnitSystem::Metric)
        .unwrap();

        assert!(
            (imperial - metric).abs() < 1e-9,
            "imperial {} vs metric {}",
            imperial,
            metric
        );
    }

    #[test]
    fn test_default_plant_coefficient() {
        let site = SiteParameters::new(0.0, 45.0);
        assert_eq!(site.plant_coefficient, 0.23);
    }
}
