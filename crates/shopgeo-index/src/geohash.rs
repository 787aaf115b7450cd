//! Geohash cell keys.
//!
//! A geohash of precision `p` interleaves `5 * p` bits, longitude first, each
//! bit halving the remaining longitude or latitude range. Keys are kept as raw
//! bits and rendered as base32 only for display.

use std::fmt;

use shopgeo_core::{Coordinate, CoreError, MAX_GEOHASH_PRECISION};

const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Row/column offsets of the eight cells around a center cell.
const NEIGHBOR_OFFSETS: [(f64, f64); 8] = [
    (1.0, 0.0),
    (1.0, 1.0),
    (0.0, 1.0),
    (-1.0, 1.0),
    (-1.0, 0.0),
    (-1.0, -1.0),
    (0.0, -1.0),
    (1.0, -1.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeoHash {
    bits: u64,
    precision: u8,
}

/// Latitude/longitude extent of one geohash cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl CellBounds {
    #[must_use]
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    #[cfg(test)]
    fn contains(&self, point: Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat)
            && (self.min_lng..=self.max_lng).contains(&point.lng)
    }
}

/// Validates `precision` and narrows it to the stored width.
///
/// # Errors
///
/// Returns [`CoreError::InvalidPrecision`] outside `1..=12`.
pub fn check_precision(precision: usize) -> Result<u8, CoreError> {
    if (1..=MAX_GEOHASH_PRECISION).contains(&precision) {
        u8::try_from(precision).map_err(|_| CoreError::InvalidPrecision(precision))
    } else {
        Err(CoreError::InvalidPrecision(precision))
    }
}

impl GeoHash {
    /// Encodes `point` at `precision` characters.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPrecision`] outside `1..=12`.
    pub fn encode(point: Coordinate, precision: usize) -> Result<Self, CoreError> {
        Ok(Self::encode_checked(point, check_precision(precision)?))
    }

    /// `precision` must already have passed [`check_precision`].
    pub(crate) fn encode_checked(point: Coordinate, precision: u8) -> Self {
        let total = u32::from(precision) * 5;
        let (mut min_lat, mut max_lat) = (-90.0_f64, 90.0_f64);
        let (mut min_lng, mut max_lng) = (-180.0_f64, 180.0_f64);
        let mut bits = 0_u64;

        for i in 0..total {
            bits <<= 1;
            if i % 2 == 0 {
                let mid = (min_lng + max_lng) / 2.0;
                if point.lng >= mid {
                    bits |= 1;
                    min_lng = mid;
                } else {
                    max_lng = mid;
                }
            } else {
                let mid = (min_lat + max_lat) / 2.0;
                if point.lat >= mid {
                    bits |= 1;
                    min_lat = mid;
                } else {
                    max_lat = mid;
                }
            }
        }

        Self { bits, precision }
    }

    #[must_use]
    pub fn precision(&self) -> usize {
        usize::from(self.precision)
    }

    #[must_use]
    pub fn bounds(&self) -> CellBounds {
        let total = u32::from(self.precision) * 5;
        let mut b = CellBounds {
            min_lat: -90.0,
            max_lat: 90.0,
            min_lng: -180.0,
            max_lng: 180.0,
        };

        for i in 0..total {
            let set = (self.bits >> (total - 1 - i)) & 1 == 1;
            if i % 2 == 0 {
                let mid = (b.min_lng + b.max_lng) / 2.0;
                if set {
                    b.min_lng = mid;
                } else {
                    b.max_lng = mid;
                }
            } else {
                let mid = (b.min_lat + b.max_lat) / 2.0;
                if set {
                    b.min_lat = mid;
                } else {
                    b.max_lat = mid;
                }
            }
        }

        b
    }

    /// Cell height and width in degrees for a precision, as `(lat, lng)`.
    #[must_use]
    pub fn cell_size_degrees(precision: usize) -> (f64, f64) {
        let total = u32::try_from(precision.min(MAX_GEOHASH_PRECISION)).unwrap_or(0) * 5;
        let lng_bits = total.div_ceil(2);
        let lat_bits = total / 2;
        (
            180.0 / f64::from(1_u32 << lat_bits),
            360.0 / f64::from(1_u32 << lng_bits),
        )
    }

    /// The eight surrounding cells. Rows beyond a pole are omitted;
    /// columns wrap across the antimeridian.
    #[must_use]
    pub fn neighbors(&self) -> Vec<GeoHash> {
        let (lat_step, lng_step) = Self::cell_size_degrees(self.precision());
        let center = self.bounds().center();

        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(rows, cols)| {
                let lat = center.lat + rows * lat_step;
                if !(-90.0..=90.0).contains(&lat) {
                    return None;
                }
                let lng = wrap_lng(center.lng + cols * lng_step);
                Some(Self::encode_checked(Coordinate::new(lat, lng), self.precision))
            })
            .collect()
    }

    /// This cell plus its neighbors, sorted and without duplicates.
    #[must_use]
    pub fn neighborhood(&self) -> Vec<GeoHash> {
        let mut cells = self.neighbors();
        cells.push(*self);
        cells.sort_unstable();
        cells.dedup();
        cells
    }
}

fn wrap_lng(lng: f64) -> f64 {
    if lng > 180.0 {
        lng - 360.0
    } else if lng < -180.0 {
        lng + 360.0
    } else {
        lng
    }
}

impl fmt::Display for GeoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..u32::from(self.precision)).rev() {
            let index = (self.bits >> (i * 5)) & 0x1f;
            let c = BASE32[usize::try_from(index).map_err(|_| fmt::Error)?];
            write!(f, "{}", char::from(c))?;
        }
        Ok(())
    }
}
