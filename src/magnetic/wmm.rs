//! World Magnetic Model (WMM) integration
//!
//! Uses the world_magnetic_model crate, which implements NOAA's WMM
//! (https://www.ngdc.noaa.gov/geomag/WMM/). Results are east-positive, the
//! same convention the rest of the crate uses for variation.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use tracing::warn;
use world_magnetic_model::{
    GeomagneticField, time::Date as WmmDate, uom::si::angle::degree, uom::si::f32::*,
    uom::si::length::meter,
};

/// First day covered by the bundled model, used when a date cannot be converted
const FALLBACK_ORDINAL: (i32, u16) = (2025, 1);

fn to_wmm_date(date: NaiveDate) -> WmmDate {
    WmmDate::from_ordinal_date(date.year(), date.ordinal() as u16).unwrap_or_else(|e| {
        warn!(
            "Cannot use {} for the magnetic model ({:?}), falling back to {}-{:03}",
            date, e, FALLBACK_ORDINAL.0, FALLBACK_ORDINAL.1
        );
        // The fallback is a constant, valid ordinal date
        WmmDate::from_ordinal_date(FALLBACK_ORDINAL.0, FALLBACK_ORDINAL.1)
            .unwrap_or(WmmDate::MIN)
    })
}

/// Magnetic variation in degrees (east-positive) at a location, altitude and date
///
/// # Errors
/// Returns an error if the model rejects the inputs (e.g. a date outside the
/// model's validity window)
pub fn calculate_variation(
    latitude: f64,
    longitude: f64,
    altitude_ft: f64,
    date: NaiveDate,
) -> Result<f64> {
    let altitude_meters = altitude_ft * 0.3048;
    let field = GeomagneticField::new(
        Length::new::<meter>(altitude_meters as f32),
        Angle::new::<degree>(latitude as f32),
        Angle::new::<degree>(longitude as f32),
        to_wmm_date(date),
    )
    .with_context(|| {
        format!(
            "Magnetic model rejected lat={}, lon={}, alt={}ft on {}",
            latitude, longitude, altitude_ft, date
        )
    })?;

    Ok(field.declination().get::<degree>() as f64)
}
