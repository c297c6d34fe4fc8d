//! Grid metadata: boundary policies and coordinate-system descriptions.
//!
//! Arrays are indexed `[y, x]` in 2D and `[z, y, x]` in 3D, so "x" is always
//! the fast axis. Coordinate axes must be monotonic and, wherever a scalar
//! spacing is derived from them, evenly spaced. Neither property is checked;
//! malformed axes yield undefined derivatives and distances.

use ndarray::{ArrayView1, ArrayView2};

/// Default circumference of the sphere for lat-lon grids, in kilometers.
pub const EARTH_CIRCUMFERENCE_KM: f64 = 40075.0;

/// Boundary policy for the shift/wrap machinery.
///
/// A periodic axis wraps (index `N` is index `0`), which also halves the
/// range of separation offsets worth iterating; an open axis pads shifted
/// entries with NaN instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    /// every axis wraps
    PeriodicAll,
    /// only the x axis wraps
    PeriodicX,
    /// only the y axis wraps
    PeriodicY,
    /// only the z axis wraps (3D data only)
    PeriodicZ,
    /// no axis wraps; shifted-out entries become NaN
    Open,
}

impl Default for Boundary {
    fn default() -> Self {
        Boundary::PeriodicAll
    }
}

impl Boundary {
    pub(crate) fn periodic_x(&self) -> bool {
        matches!(self, Boundary::PeriodicAll | Boundary::PeriodicX)
    }

    pub(crate) fn periodic_y(&self) -> bool {
        matches!(self, Boundary::PeriodicAll | Boundary::PeriodicY)
    }

    pub(crate) fn periodic_z(&self) -> bool {
        matches!(self, Boundary::PeriodicAll | Boundary::PeriodicZ)
    }
}

/// Coordinate system for 2D fields.
///
/// The three cases mirror the three spacing regimes the finite differences
/// understand: a scalar spacing recovered from an evenly spaced axis,
/// per-axis spacing arrays cumulatively summed into a stretched axis, and
/// angular lat-lon grids converted to physical lengths on a sphere.
#[derive(Clone)]
pub enum Coords2d<'a> {
    /// evenly spaced 1D axes
    Uniform {
        x: ArrayView1<'a, f64>,
        y: ArrayView1<'a, f64>,
    },
    /// 1D axes with per-axis spacing arrays (uneven spacing)
    Stretched {
        x: ArrayView1<'a, f64>,
        y: ArrayView1<'a, f64>,
        dx: ArrayView1<'a, f64>,
        dy: ArrayView1<'a, f64>,
    },
    /// 2D latitude/longitude arrays, in degrees
    LatLon {
        lats: ArrayView2<'a, f64>,
        lons: ArrayView2<'a, f64>,
    },
}

impl Coords2d<'_> {
    /// the number of grid points along x
    pub(crate) fn nx(&self) -> usize {
        match self {
            Coords2d::Uniform { x, .. } | Coords2d::Stretched { x, .. } => x.len(),
            Coords2d::LatLon { lons, .. } => lons.ncols(),
        }
    }

    /// the number of grid points along y
    pub(crate) fn ny(&self) -> usize {
        match self {
            Coords2d::Uniform { y, .. } | Coords2d::Stretched { y, .. } => y.len(),
            Coords2d::LatLon { lats, .. } => lats.nrows(),
        }
    }

    pub(crate) fn is_latlon(&self) -> bool {
        matches!(self, Coords2d::LatLon { .. })
    }
}
