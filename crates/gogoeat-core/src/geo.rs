//! Coordinates, viewport bounds, and great-circle distance.
//!
//! Distances use the Haversine formula on a spherical earth. Viewport bounds
//! are derived from a center point and zoom level using Web-Mercator ground
//! resolution, so the map window a user would see can be reproduced without
//! a rendering surface.

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;
const METERS_PER_LAT_DEGREE: f64 = 111_320.0;
/// Ground resolution of zoom level 0 at the equator, in meters per pixel.
const MERCATOR_METERS_PER_PX_Z0: f64 = 156_543.033_92;

/// A point on the earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Unit in which [`distance`] reports its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceUnit {
    Kilometers,
    Meters,
}

impl DistanceUnit {
    fn earth_radius(self) -> f64 {
        match self {
            DistanceUnit::Kilometers => EARTH_RADIUS_KM,
            DistanceUnit::Meters => EARTH_RADIUS_KM * 1000.0,
        }
    }
}

/// Great-circle distance between `a` and `b` via the Haversine formula.
///
/// NaN inputs propagate to a NaN result; nothing is clamped.
#[must_use]
pub fn distance(a: Coordinate, b: Coordinate, unit: DistanceUnit) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lng / 2.0).sin().powi(2);
    2.0 * unit.earth_radius() * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Shorthand for [`distance`] in kilometers.
#[must_use]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    distance(a, b, DistanceUnit::Kilometers)
}

/// Human-readable distance: `<100m`, whole meters under 1 km, else `x.ykm`.
#[must_use]
pub fn format_distance(km: f64) -> String {
    if km < 0.1 {
        "<100m".to_string()
    } else if km < 1.0 {
        format!("{:.0}m", km * 1000.0)
    } else {
        format!("{km:.1}km")
    }
}

/// A rectangular lat/lng window, south-west to north-east corner.
///
/// When `south_west.longitude > north_east.longitude` the window crosses the
/// antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl Bounds {
    #[must_use]
    pub const fn new(south_west: Coordinate, north_east: Coordinate) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Returns `true` if `point` lies inside the window (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        let lat_ok =
            point.latitude >= self.south_west.latitude && point.latitude <= self.north_east.latitude;
        let lng_ok = if self.south_west.longitude <= self.north_east.longitude {
            point.longitude >= self.south_west.longitude
                && point.longitude <= self.north_east.longitude
        } else {
            point.longitude >= self.south_west.longitude
                || point.longitude <= self.north_east.longitude
        };
        lat_ok && lng_ok
    }

    /// Geometric center of the window.
    #[must_use]
    pub fn center(&self) -> Coordinate {
        let lat = (self.south_west.latitude + self.north_east.latitude) / 2.0;
        let mut lng = (self.south_west.longitude + self.north_east.longitude) / 2.0;
        if self.south_west.longitude > self.north_east.longitude {
            lng += 180.0;
            if lng > 180.0 {
                lng -= 360.0;
            }
        }
        Coordinate::new(lat, lng)
    }
}

/// Derive the visible map window for a viewport of `width_px` × `height_px`
/// centered on `center` at `zoom`.
///
/// Longitude span widens with latitude so the physical width stays equal to
/// what the map renders.
#[must_use]
pub fn viewport_for_zoom(center: Coordinate, zoom: u8, width_px: u32, height_px: u32) -> Bounds {
    let cos_lat = center.latitude.to_radians().cos();
    let meters_per_px = MERCATOR_METERS_PER_PX_Z0 * cos_lat / 2f64.powi(i32::from(zoom));
    let half_width_m = meters_per_px * f64::from(width_px) / 2.0;
    let half_height_m = meters_per_px * f64::from(height_px) / 2.0;

    let d_lat = half_height_m / METERS_PER_LAT_DEGREE;
    let d_lng = half_width_m / (METERS_PER_LAT_DEGREE * cos_lat);

    Bounds::new(
        Coordinate::new(center.latitude - d_lat, center.longitude - d_lng),
        Coordinate::new(center.latitude + d_lat, center.longitude + d_lng),
    )
}
