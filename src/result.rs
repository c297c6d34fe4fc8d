//! Result containers and the canonical result-key table.
//!
//! A generation run returns a map from result key to array. Every requested
//! statistic contributes one populated array per direction; unrequested
//! statistics are entirely absent (never zero-filled placeholders). The
//! distance and map-geometry arrays are always present under the keys below.

use std::collections::HashMap;

use ndarray::{Array1, Array2};

use crate::stats::{Direction, SfKind};

/// separation distances along x (`Array1` on uniform grids, per-latitude
/// `Array2` on lat-lon grids)
pub const X_DIFFS: &str = "x-diffs";
/// separation distances along y
pub const Y_DIFFS: &str = "y-diffs";
/// separation distances along z
pub const Z_DIFFS: &str = "z-diffs";
/// polar map: magnitude of the separation vector
pub const SEPARATION_DISTANCES: &str = "separation_distances";
/// polar map: angle of the separation vector
pub const SEPARATION_ANGLES: &str = "separation_angles";
/// polar map: x component of the separation vector
pub const X_SEPARATIONS: &str = "x_separations";
/// polar map: y component of the separation vector
pub const Y_SEPARATIONS: &str = "y_separations";

/// One result array: a per-separation curve or a 2D map.
#[derive(Clone, Debug, PartialEq)]
pub enum SfArray {
    D1(Array1<f64>),
    D2(Array2<f64>),
}

impl SfArray {
    /// the contained curve, if 1D
    pub fn as_d1(&self) -> Option<&Array1<f64>> {
        match self {
            SfArray::D1(a) => Some(a),
            SfArray::D2(_) => None,
        }
    }

    /// the contained map, if 2D
    pub fn as_d2(&self) -> Option<&Array2<f64>> {
        match self {
            SfArray::D1(_) => None,
            SfArray::D2(a) => Some(a),
        }
    }
}

impl From<Array1<f64>> for SfArray {
    fn from(a: Array1<f64>) -> Self {
        SfArray::D1(a)
    }
}

impl From<Array2<f64>> for SfArray {
    fn from(a: Array2<f64>) -> Self {
        SfArray::D2(a)
    }
}

/// The map a generation run returns.
pub type SfResult = HashMap<&'static str, SfArray>;

/// The canonical key a statistic's result is stored under for a given
/// separation direction.
pub(crate) fn result_key(kind: SfKind, dir: Direction) -> &'static str {
    use Direction::*;
    use SfKind::*;
    match (kind, dir) {
        (AsfV, X) => "SF_advection_velocity_x",
        (AsfV, Y) => "SF_advection_velocity_y",
        (AsfV, Z) => "SF_advection_velocity_z",
        (AsfV, XY) => "SF_advection_velocity_xy",
        (AsfV, Track) => "SF_advection_velocity",
        (AsfS, X) => "SF_advection_scalar_x",
        (AsfS, Y) => "SF_advection_scalar_y",
        (AsfS, Z) => "SF_advection_scalar_z",
        (AsfS, XY) => "SF_advection_scalar_xy",
        (AsfS, Track) => "SF_advection_scalar",
        (LL, X) => "SF_LL_x",
        (LL, Y) => "SF_LL_y",
        (LL, Z) => "SF_LL_z",
        (LL, XY) => "SF_LL_xy",
        (LL, Track) => "SF_LL",
        (TT, X) => "SF_TT_x",
        (TT, Y) => "SF_TT_y",
        (TT, Z) => "SF_TT_z",
        (TT, XY) => "SF_TT_xy",
        (TT, Track) => "SF_TT",
        (SS, X) => "SF_SS_x",
        (SS, Y) => "SF_SS_y",
        (SS, Z) => "SF_SS_z",
        (SS, XY) => "SF_SS_xy",
        (SS, Track) => "SF_SS",
        (LLL, X) => "SF_LLL_x",
        (LLL, Y) => "SF_LLL_y",
        (LLL, Z) => "SF_LLL_z",
        (LLL, XY) => "SF_LLL_xy",
        (LLL, Track) => "SF_LLL",
        (LTT, X) => "SF_LTT_x",
        (LTT, Y) => "SF_LTT_y",
        (LTT, Z) => "SF_LTT_z",
        (LTT, XY) => "SF_LTT_xy",
        (LTT, Track) => "SF_LTT",
        (LSS, X) => "SF_LSS_x",
        (LSS, Y) => "SF_LSS_y",
        (LSS, Z) => "SF_LSS_z",
        (LSS, XY) => "SF_LSS_xy",
        (LSS, Track) => "SF_LSS",
    }
}
