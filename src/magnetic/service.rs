use anyhow::Result;
use chrono::{Datelike, NaiveDate, Utc};
use metrics::{counter, gauge};
use moka::sync::Cache;
use tracing::debug;

use super::wmm;
use crate::geodesy;

/// Quantize a coordinate to tenths of a degree (~11 km at the equator).
/// Variation changes slowly enough that neighbouring samples share an entry.
fn round_coord_for_cache(coord: f64) -> i32 {
    (coord * 10.0).round() as i32
}

/// (lat_tenths, lon_tenths, year)
type CacheKey = (i32, i32, i32);

/// Magnetic variation lookups for callers that have no variation figure from
/// their navdata.
///
/// Clones share one cache, so a single service can be handed to several
/// approach evaluations at once.
#[derive(Clone)]
pub struct MagneticService {
    variation_cache: Cache<CacheKey, f64>,
}

impl MagneticService {
    pub fn new() -> Self {
        Self::with_cache_size(10_000)
    }

    pub fn with_cache_size(cache_size: u64) -> Self {
        Self {
            variation_cache: Cache::builder().max_capacity(cache_size).build(),
        }
    }

    /// Variation in degrees (east-positive) at a location. Uses today's date
    /// when `date` is `None`. Altitude is ignored for caching purposes.
    pub fn variation(
        &self,
        latitude: f64,
        longitude: f64,
        altitude_ft: f64,
        date: Option<NaiveDate>,
    ) -> Result<f64> {
        if !latitude.is_finite() || !longitude.is_finite() || !altitude_ft.is_finite() {
            anyhow::bail!("Invalid coordinates or altitude");
        }

        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            anyhow::bail!(
                "Coordinates out of range: lat={}, lon={}",
                latitude,
                longitude
            );
        }

        let date = date.unwrap_or_else(|| Utc::now().date_naive());
        let cache_key = (
            round_coord_for_cache(latitude),
            round_coord_for_cache(longitude),
            date.year(),
        );

        if let Some(cached) = self.variation_cache.get(&cache_key) {
            counter!("magnetic.cache_hits_total").increment(1);
            return Ok(cached);
        }
        counter!("magnetic.cache_misses_total").increment(1);

        let variation = wmm::calculate_variation(latitude, longitude, altitude_ft, date)?;
        debug!(
            "Calculated magnetic variation at ({:.3}, {:.3}): {:.2}°",
            latitude, longitude, variation
        );

        self.variation_cache.insert(cache_key, variation);
        gauge!("magnetic.cache_entries").set(self.variation_cache.entry_count() as f64);

        Ok(variation)
    }

    /// Convert a true heading to magnetic at a location
    pub fn true_to_magnetic(
        &self,
        true_heading: f64,
        latitude: f64,
        longitude: f64,
        date: Option<NaiveDate>,
    ) -> Result<f64> {
        let variation = self.variation(latitude, longitude, 0.0, date)?;
        Ok(geodesy::normalize_heading(true_heading - variation))
    }

    /// Convert a magnetic heading to true at a location
    pub fn magnetic_to_true(
        &self,
        magnetic_heading: f64,
        latitude: f64,
        longitude: f64,
        date: Option<NaiveDate>,
    ) -> Result<f64> {
        let variation = self.variation(latitude, longitude, 0.0, date)?;
        Ok(geodesy::normalize_heading(magnetic_heading + variation))
    }
}

impl Default for MagneticService {
    fn default() -> Self {
        Self::new()
    }
}
