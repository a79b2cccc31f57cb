use crate::{CartesianCoordinate, SphericCoordinate};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use lazy_static::lazy_static;
use log::trace;
use std::sync::Arc;

/// Order-sensitive structural key derived from the bit patterns of the three
/// numeric components of a coordinate.
///
/// Keying on bits (rather than on the floats themselves) keeps the map `Eq` +
/// `Hash` without caveats; it also means `-0.0` and `0.0` intern separately,
/// which is fine since interning identity is stricter than tolerance equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct TripleKey([u64; 3]);

impl TripleKey {
    fn new(a: f64, b: f64, c: f64) -> Self {
        Self([a.to_bits(), b.to_bits(), c.to_bits()])
    }
}

lazy_static! {
    static ref GLOBAL_CACHE: CoordinateCache = CoordinateCache::new();
}

/// Value-interning cache mapping coordinate components to their canonical
/// shared instance.
///
/// The lookup-or-insert sequence is linearizable, so two concurrent requests
/// for the same components are guaranteed to observe the same [`Arc`] -- there
/// is at most one canonical instance per distinct value. The Cartesian and
/// spheric tables are disjoint; a Cartesian triple never aliases a spheric one.
///
/// Entries are never evicted; the canonical instances live as long as the
/// cache does.
///
/// The constructors on [`CartesianCoordinate`] and [`SphericCoordinate`] use
/// the [process-wide instance](CoordinateCache::global) by default. Tests that
/// want isolation can pass their own instance to the `of_in` constructors.
#[derive(Debug)]
pub struct CoordinateCache {
    cartesian: DashMap<TripleKey, Arc<CartesianCoordinate>>,
    spheric: DashMap<TripleKey, Arc<SphericCoordinate>>,
}

impl CoordinateCache {
    /// Constructs an empty, isolated cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cartesian: DashMap::new(),
            spheric: DashMap::new(),
        }
    }

    /// Returns the process-wide cache, initialized on first use and never torn
    /// down mid-process.
    #[must_use]
    pub fn global() -> &'static CoordinateCache {
        &GLOBAL_CACHE
    }

    /// Returns the number of canonical instances held, across both
    /// representations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cartesian.len() + self.spheric.len()
    }

    /// Returns whether the cache holds no canonical instances.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cartesian.is_empty() && self.spheric.is_empty()
    }

    /// Looks up the canonical instance for an already-validated Cartesian
    /// value, registering `coordinate` as canonical if none exists yet.
    pub(crate) fn intern_cartesian(
        &self,
        coordinate: CartesianCoordinate,
    ) -> Arc<CartesianCoordinate> {
        let key = TripleKey::new(coordinate.x(), coordinate.y(), coordinate.z());
        match self.cartesian.entry(key) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                trace!("interning new cartesian coordinate {coordinate}");
                let canonical = Arc::new(coordinate);
                entry.insert(Arc::clone(&canonical));
                canonical
            }
        }
    }

    /// Looks up the canonical instance for an already-validated spheric value,
    /// registering `coordinate` as canonical if none exists yet.
    pub(crate) fn intern_spheric(&self, coordinate: SphericCoordinate) -> Arc<SphericCoordinate> {
        let key = TripleKey::new(coordinate.polar(), coordinate.azimuth(), coordinate.radius());
        match self.spheric.entry(key) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                trace!("interning new spheric coordinate {coordinate}");
                let canonical = Arc::new(coordinate);
                entry.insert(Arc::clone(&canonical));
                canonical
            }
        }
    }
}

impl Default for CoordinateCache {
    fn default() -> Self {
        Self::new()
    }
}
