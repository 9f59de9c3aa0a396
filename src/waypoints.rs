//! Five numbered slots for points the pilot wants to keep an eye on.
//!
//! The tracker does no locking; wrap it in a lock if more than one thread
//! writes to it.

use std::fmt::{Display, Formatter};

use crate::geodesy;
use crate::navdata::TrackedWaypoint;

pub const SLOT_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum WaypointError {
    /// Slot number outside 1..=5
    SlotOutOfRange(usize),
    /// Waypoint without an identifier or usable coordinates
    MissingWaypoint,
}

impl Display for WaypointError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            WaypointError::SlotOutOfRange(slot) => {
                write!(f, "Waypoint slot {} is out of range (1-{})", slot, SLOT_COUNT)
            }
            WaypointError::MissingWaypoint => {
                write!(f, "Waypoint must have an identifier and finite coordinates")
            }
        }
    }
}

impl std::error::Error for WaypointError {}

/// Live distance and bearing from the aircraft to a tracked point
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointFix {
    pub ident: String,
    pub distance_nm: f64,
    /// Magnetic bearing from the aircraft
    pub bearing_mag: f64,
}

impl Display for WaypointFix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let bearing = (self.bearing_mag.round() as i64).rem_euclid(360);
        let bearing = if bearing == 0 { 360 } else { bearing };
        write!(
            f,
            "{}: {:.1} miles, bearing {:03}",
            self.ident, self.distance_nm, bearing
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct WaypointTracker {
    slots: [Option<TrackedWaypoint>; SLOT_COUNT],
}

fn slot_index(slot: usize) -> Result<usize, WaypointError> {
    if (1..=SLOT_COUNT).contains(&slot) {
        Ok(slot - 1)
    } else {
        Err(WaypointError::SlotOutOfRange(slot))
    }
}

impl WaypointTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a waypoint in `slot`, replacing whatever was there
    pub fn track(&mut self, slot: usize, waypoint: TrackedWaypoint) -> Result<(), WaypointError> {
        let index = slot_index(slot)?;
        if waypoint.ident.trim().is_empty()
            || !waypoint.latitude.is_finite()
            || !waypoint.longitude.is_finite()
        {
            return Err(WaypointError::MissingWaypoint);
        }
        self.slots[index] = Some(waypoint);
        Ok(())
    }

    /// Distance and magnetic bearing from the aircraft, or `None` for an empty slot
    pub fn fix(
        &self,
        slot: usize,
        aircraft_latitude: f64,
        aircraft_longitude: f64,
        variation: f64,
    ) -> Result<Option<WaypointFix>, WaypointError> {
        let index = slot_index(slot)?;
        Ok(self.slots[index].as_ref().map(|waypoint| WaypointFix {
            ident: waypoint.ident.clone(),
            distance_nm: geodesy::distance(
                aircraft_latitude,
                aircraft_longitude,
                waypoint.latitude,
                waypoint.longitude,
            ),
            bearing_mag: geodesy::magnetic_bearing(
                aircraft_latitude,
                aircraft_longitude,
                waypoint.latitude,
                waypoint.longitude,
                variation,
            ),
        }))
    }

    /// Announcement text for a slot, or `None` when the slot is empty
    pub fn query(
        &self,
        slot: usize,
        aircraft_latitude: f64,
        aircraft_longitude: f64,
        variation: f64,
    ) -> Result<Option<String>, WaypointError> {
        Ok(self
            .fix(slot, aircraft_latitude, aircraft_longitude, variation)?
            .map(|fix| fix.to_string()))
    }

    pub fn clear(&mut self, slot: usize) -> Result<(), WaypointError> {
        let index = slot_index(slot)?;
        self.slots[index] = None;
        Ok(())
    }

    pub fn clear_all(&mut self) {
        self.slots = Default::default();
    }

    pub fn is_empty(&self, slot: usize) -> Result<bool, WaypointError> {
        Ok(self.slots[slot_index(slot)?].is_none())
    }

    pub fn ident_of(&self, slot: usize) -> Result<Option<&str>, WaypointError> {
        Ok(self.slots[slot_index(slot)?]
            .as_ref()
            .map(|waypoint| waypoint.ident.as_str()))
    }

    pub fn get(&self, slot: usize) -> Result<Option<&TrackedWaypoint>, WaypointError> {
        Ok(self.slots[slot_index(slot)?].as_ref())
    }
}
