//! Per-day forecast mapping, including the ETo driver.

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike};
use wxstack_client::DailyForecastRecord;
use wxstack_eto::{DailyObservation, SiteParameters, UnitSystem};

use crate::drivers::{Driver, DriverValue};

/// Day of week for a UTC epoch, 0 = Sunday.
pub fn day_of_week(epoch: i64) -> Result<f64> {
    let dt = timestamp(epoch)?;
    Ok(f64::from(dt.weekday().num_days_from_sunday()))
}

/// Ordinal day of year (1 = Jan 1) for a UTC epoch.
pub fn day_of_year(epoch: i64) -> Result<u16> {
    let dt = timestamp(epoch)?;
    // ordinal() is 1-366, always in u16 range
    Ok(dt.ordinal() as u16)
}

fn timestamp(epoch: i64) -> Result<DateTime<chrono::Utc>> {
    DateTime::from_timestamp(epoch, 0)
        .with_context(|| format!("forecast epoch {} out of range", epoch))
}

/// Millimeters to inches, for logging ETo in both systems.
pub fn mm_to_inches(mm: f64) -> f64 {
    mm / 25.4
}

/// Map one forecast day onto the daily node's driver set.
///
/// Publishes the raw forecast fields in the source unit system, then
/// normalizes to SI and runs the ETo engine; the ETo driver is always
/// mm/day, rounded to two decimals.
pub fn forecast_drivers(
    record: &DailyForecastRecord,
    site: SiteParameters,
    units: UnitSystem,
) -> Result<Vec<DriverValue>> {
    let dow = day_of_week(record.date_epoch)?;

    let observation = DailyObservation {
        min_temp: record.min_temp,
        max_temp: record.max_temp,
        avg_humidity: record.avg_humidity,
        max_wind_speed: record.max_wind_speed,
        total_precip: record.total_precip,
        avg_visibility: record.avg_visibility,
        day_of_year: day_of_year(record.date_epoch)?,
    };

    let eto = observation
        .eto(site, units)
        .context("ETo computation failed")?;
    let eto = (eto * 100.0).round() / 100.0;

    tracing::info!(
        eto_mm = eto,
        eto_in = mm_to_inches(eto),
        day_of_year = observation.day_of_year,
        "computed reference evapotranspiration"
    );

    Ok(vec![
        Driver::DayOfWeek.value(dow, units),
        Driver::HighTemp.value(record.max_temp, units),
        Driver::LowTemp.value(record.min_temp, units),
        Driver::Precipitation.value(record.total_precip, units),
        Driver::Humidity.value(record.avg_humidity.round(), units),
        Driver::Conditions.value(record.condition_code as f64, units),
        Driver::WindSpeed.value(record.max_wind_speed, units),
        Driver::Visibility.value(record.avg_visibility, units),
        Driver::UvIndex.value(record.uv_index, units),
        Driver::Evapotranspiration.value(eto, units),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2026-07-01T00:00:00Z, a Wednesday, day 182 of a non-leap year.
    const JULY_FIRST: i64 = 1_782_864_000;

    fn record() -> DailyForecastRecord {
        DailyForecastRecord {
            date_epoch: JULY_FIRST,
            condition_code: 116,
            avg_humidity: 60.0,
            uv_index: 7.0,
            min_temp: 15.0,
            max_temp: 25.0,
            total_precip: 2.5,
            avg_visibility: 10.0,
            max_wind_speed: 7.2,
        }
    }

    fn site() -> SiteParameters {
        SiteParameters::new(100.0, 35.0)
    }

    #[test]
    fn test_day_of_week() {
        assert_eq!(day_of_week(JULY_FIRST).unwrap(), 3.0); // Wednesday
        assert_eq!(day_of_week(JULY_FIRST + 4 * 86_400).unwrap(), 0.0); // Sunday
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(day_of_year(JULY_FIRST).unwrap(), 182);
        assert_eq!(day_of_year(1_767_225_600).unwrap(), 1); // 2026-01-01
    }

    #[test]
    fn test_mm_to_inches() {
        assert!((mm_to_inches(25.4) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_forecast_drivers_complete() {
        let values = forecast_drivers(&record(), site(), UnitSystem::Metric).unwrap();
        assert_eq!(values.len(), 10);

        let high = values
            .iter()
            .find(|v| v.driver == Driver::HighTemp)
            .unwrap();
        assert_eq!(high.value, 25.0);
        assert_eq!(high.uom, 4);

        let dow = values
            .iter()
            .find(|v| v.driver == Driver::DayOfWeek)
            .unwrap();
        assert_eq!(dow.value, 3.0);
    }

    #[test]
    fn test_forecast_eto_driver() {
        // 25/15 C, 7.2 km/h (2 m/s), 60% humidity, 35N at 100 m on
        // day 182: the FAO-56 worked value is ~4.48 mm/day.
        let values = forecast_drivers(&record(), site(), UnitSystem::Metric).unwrap();
        let eto = values
            .iter()
            .find(|v| v.driver == Driver::Evapotranspiration)
            .unwrap();
        assert_eq!(eto.uom, 106);
        assert!((eto.value - 4.48).abs() < 0.1, "ETo = {}", eto.value);
        // rounded to two decimals
        assert_eq!(eto.value, (eto.value * 100.0).round() / 100.0);
    }

    #[test]
    fn test_forecast_drivers_bad_latitude() {
        let mut bad_site = site();
        bad_site.latitude_deg = 120.0;
        assert!(forecast_drivers(&record(), bad_site, UnitSystem::Metric).is_err());
    }
}
