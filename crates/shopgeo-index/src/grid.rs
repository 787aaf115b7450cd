//! Spatial grid index keyed by geohash.
//!
//! Radius queries scan the 3×3 block of cells around the center. Results are
//! exact while the radius stays within [`GridIndex::exact_radius_km`]; beyond
//! that, entries whose cell lies outside the block are not returned.

use std::collections::HashMap;

use shopgeo_core::{haversine_km, Coordinate, CoreError, EARTH_RADIUS_KM};

use crate::geohash::{check_precision, GeoHash};

/// Shrinks the analytic coverage bound so that the difference between a
/// parallel and a great circle never pushes a point past it.
const EXACT_RADIUS_MARGIN: f64 = 0.9;

#[derive(Debug, Clone)]
struct GridEntry<T> {
    location: Coordinate,
    item: T,
}

#[derive(Debug, Clone)]
pub struct GridIndex<T> {
    precision: u8,
    buckets: HashMap<GeoHash, Vec<GridEntry<T>>>,
    len: usize,
}

impl<T> GridIndex<T> {
    /// Creates an empty index whose cells are geohashes of `precision`
    /// characters.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPrecision`] outside `1..=12`.
    pub fn new(precision: usize) -> Result<Self, CoreError> {
        Ok(Self {
            precision: check_precision(precision)?,
            buckets: HashMap::new(),
            len: 0,
        })
    }

    /// Adds `item` at `location`. Duplicate locations are kept.
    pub fn insert(&mut self, location: Coordinate, item: T) {
        self.buckets
            .entry(self.cell_of(location))
            .or_default()
            .push(GridEntry { location, item });
        self.len += 1;
    }

    #[must_use]
    pub fn cell_of(&self, location: Coordinate) -> GeoHash {
        GeoHash::encode_checked(location, self.precision)
    }

    /// Lazily yields every entry in the center's 3×3 neighborhood whose
    /// haversine distance to `center` is at most `radius_km`, paired with that
    /// distance. Order is unspecified.
    pub fn query_radius(
        &self,
        center: Coordinate,
        radius_km: f64,
    ) -> impl Iterator<Item = (&T, f64)> + '_ {
        self.cell_of(center)
            .neighborhood()
            .into_iter()
            .filter_map(move |cell| self.buckets.get(&cell))
            .flatten()
            .filter_map(move |entry| {
                let distance = haversine_km(center, entry.location);
                (distance <= radius_km).then_some((&entry.item, distance))
            })
    }

    /// Largest radius around `center` for which [`Self::query_radius`] is
    /// guaranteed to return every entry a full scan would.
    #[must_use]
    pub fn exact_radius_km(&self, center: Coordinate) -> f64 {
        let (lat_deg, lng_deg) = GeoHash::cell_size_degrees(self.precision());
        let widest_lat = (center.lat.abs() + lat_deg).min(90.0);

        let lat_km = lat_deg.to_radians() * EARTH_RADIUS_KM;
        let lng_km = lng_deg.to_radians() * EARTH_RADIUS_KM * widest_lat.to_radians().cos();

        EXACT_RADIUS_MARGIN * lat_km.min(lng_km).max(0.0)
    }

    #[must_use]
    pub fn precision(&self) -> usize {
        usize::from(self.precision)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}
