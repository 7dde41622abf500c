//! ISY driver table for the node.
//!
//! Each reported value is published under a fixed driver ID together
//! with a unit-of-measure (UOM) code. The UOM depends on the
//! configured unit system; the mapping lives here in one place so no
//! call site resolves units on its own.

use serde::{Deserialize, Serialize};
use wxstack_client::CurrentConditions;
use wxstack_eto::UnitSystem;

/// Everything the node publishes, across the controller node (current
/// conditions) and the daily forecast nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Driver {
    Status,
    Temperature,
    FeelsLike,
    Humidity,
    Pressure,
    WindSpeed,
    WindDirection,
    Conditions,
    CloudCover,
    Visibility,
    Precipitation,
    UvIndex,
    DayOfWeek,
    HighTemp,
    LowTemp,
    Evapotranspiration,
}

impl Driver {
    /// ISY driver ID.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Status => "ST",
            Self::Temperature => "CLITEMP",
            Self::FeelsLike => "GV2",
            Self::Humidity => "CLIHUM",
            Self::Pressure => "BARPRES",
            Self::WindSpeed => "GV4",
            Self::WindDirection => "WINDDIR",
            Self::Conditions => "GV13",
            Self::CloudCover => "GV14",
            Self::Visibility => "GV15",
            Self::Precipitation => "GV6",
            Self::UvIndex => "GV16",
            Self::DayOfWeek => "GV19",
            Self::HighTemp => "GV0",
            Self::LowTemp => "GV1",
            Self::Evapotranspiration => "GV20",
        }
    }

    /// ISY unit-of-measure code for the configured unit system.
    ///
    /// ETo is always published in mm/day (UOM 106) regardless of the
    /// unit system, matching how the value is computed.
    pub fn uom(&self, units: UnitSystem) -> u8 {
        let metric = units == UnitSystem::Metric;
        match self {
            Self::Status => 2,
            Self::Temperature | Self::FeelsLike | Self::HighTemp | Self::LowTemp => {
                if metric {
                    4 // degrees C
                } else {
                    17 // degrees F
                }
            }
            Self::Humidity | Self::CloudCover => 22, // percent
            Self::Pressure => {
                if metric {
                    117 // millibar
                } else {
                    23 // inches of mercury
                }
            }
            Self::WindSpeed => {
                if metric {
                    49 // km/h
                } else {
                    48 // mph
                }
            }
            Self::WindDirection => 76, // degrees
            Self::Conditions | Self::DayOfWeek => 25, // index
            Self::Visibility => {
                if metric {
                    38 // km
                } else {
                    116 // miles
                }
            }
            Self::Precipitation => {
                if metric {
                    82 // mm
                } else {
                    105 // inches
                }
            }
            Self::UvIndex => 71,
            Self::Evapotranspiration => 106, // mm/day
        }
    }

    /// Build a reportable value for this driver.
    pub fn value(self, value: f64, units: UnitSystem) -> DriverValue {
        DriverValue {
            driver: self,
            value,
            uom: self.uom(units),
        }
    }
}

/// A single driver update, ready to hand to a report sink.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriverValue {
    pub driver: Driver,
    pub value: f64,
    pub uom: u8,
}

/// Map current conditions onto the controller node's driver set.
pub fn current_drivers(current: &CurrentConditions, units: UnitSystem) -> Vec<DriverValue> {
    vec![
        Driver::Temperature.value(current.temperature, units),
        Driver::FeelsLike.value(current.feelslike, units),
        Driver::Humidity.value(current.humidity, units),
        Driver::Pressure.value(current.pressure, units),
        Driver::WindSpeed.value(current.wind_speed, units),
        Driver::WindDirection.value(current.wind_degree, units),
        Driver::Conditions.value(current.weather_code as f64, units),
        Driver::CloudCover.value(current.cloudcover, units),
        Driver::Visibility.value(current.visibility, units),
        Driver::Precipitation.value(current.precip, units),
        Driver::UvIndex.value(current.uv_index, units),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_ids_match_profile() {
        assert_eq!(Driver::Temperature.id(), "CLITEMP");
        assert_eq!(Driver::Humidity.id(), "CLIHUM");
        assert_eq!(Driver::HighTemp.id(), "GV0");
        assert_eq!(Driver::LowTemp.id(), "GV1");
        assert_eq!(Driver::Evapotranspiration.id(), "GV20");
    }

    #[test]
    fn test_metric_uom_codes() {
        let m = UnitSystem::Metric;
        assert_eq!(Driver::Temperature.uom(m), 4);
        assert_eq!(Driver::Pressure.uom(m), 117);
        assert_eq!(Driver::WindSpeed.uom(m), 49);
        assert_eq!(Driver::Precipitation.uom(m), 82);
        assert_eq!(Driver::Visibility.uom(m), 38);
    }

    #[test]
    fn test_imperial_uom_codes() {
        let i = UnitSystem::Imperial;
        assert_eq!(Driver::Temperature.uom(i), 17);
        assert_eq!(Driver::Pressure.uom(i), 23);
        assert_eq!(Driver::WindSpeed.uom(i), 48);
        assert_eq!(Driver::Precipitation.uom(i), 105);
        assert_eq!(Driver::Visibility.uom(i), 116);
    }

    #[test]
    fn test_unit_independent_uom_codes() {
        for units in [UnitSystem::Metric, UnitSystem::Imperial] {
            assert_eq!(Driver::Humidity.uom(units), 22);
            assert_eq!(Driver::UvIndex.uom(units), 71);
            assert_eq!(Driver::DayOfWeek.uom(units), 25);
            assert_eq!(Driver::Evapotranspiration.uom(units), 106);
        }
    }

    #[test]
    fn test_current_drivers_mapping() {
        let current = CurrentConditions {
            temperature: 22.0,
            weather_code: 116,
            humidity: 55.0,
            wind_speed: 9.0,
            wind_degree: 250.0,
            pressure: 1016.0,
            precip: 0.0,
            cloudcover: 25.0,
            feelslike: 21.0,
            uv_index: 6.0,
            visibility: 16.0,
        };

        let values = current_drivers(&current, UnitSystem::Metric);
        assert_eq!(values.len(), 11);

        let temp = values
            .iter()
            .find(|v| v.driver == Driver::Temperature)
            .unwrap();
        assert_eq!(temp.value, 22.0);
        assert_eq!(temp.uom, 4);

        let cond = values
            .iter()
            .find(|v| v.driver == Driver::Conditions)
            .unwrap();
        assert_eq!(cond.value, 116.0);
    }
}
