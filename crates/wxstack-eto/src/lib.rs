//! Reference evapotranspiration (ETo) engine for wxstack.
//!
//! Pure, synchronous computations only: unit conversions and the FAO-56
//! Penman-Monteith combination equation. No I/O, no shared state; every
//! call is a deterministic transformation of its inputs.

pub mod error;
pub mod fao56;
pub mod types;
pub mod units;

pub use error::EtoError;
pub use fao56::{compute_eto, extraterrestrial_radiation};
pub use types::{DailyObservation, SiteParameters, UnitSystem};
pub use units::{celsius_to_fahrenheit, fahrenheit_to_celsius, kph_to_ms, mph_to_ms};
