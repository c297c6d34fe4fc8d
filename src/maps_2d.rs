//! 2D polar maps: structure functions over in-plane separation vectors.
//!
//! Instead of sweeping each axis separately, the map generator walks every
//! separation vector `(sx·dx, sy·dy)` with `sx ∈ [0, Nx/2)` and
//! `sy ∈ [−Ny/2, Ny/2)` — the half plane suffices because structure
//! functions are invariant under reflection of the separation vector. The
//! traditional statistics are rotated onto the separation direction, so the
//! maps resolve anisotropy that the axis sweeps average away.
//!
//! Output arrays are `[n_x_shifts, n_y_shifts]`, with the y shift mapped to
//! column `sy + Ny/2`. The separation geometry (distance, angle, and both
//! components) is always included. Only periodic, evenly spaced data is
//! accepted; anything else fails at construction.

use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::advection::{advect_scalar_2d, advect_velocity_2d};
use crate::error::Error;
use crate::grid::{Boundary, Coords2d, EARTH_CIRCUMFERENCE_KM};
use crate::result::{
    SEPARATION_ANGLES, SEPARATION_DISTANCES, SfArray, SfResult, X_SEPARATIONS,
    Y_SEPARATIONS, result_key,
};
use crate::stats::{Direction, SfKind, SfSet, sf_maps_2d};

/// Optional knobs for [`SfMapGenerator2d`].
#[derive(Clone, Default)]
pub struct MapOptions2d<'a> {
    /// scalar field; required iff a scalar statistic is requested
    pub scalar: Option<ArrayView2<'a, f64>>,
    /// boundary policy; maps require [`Boundary::PeriodicAll`] (the default)
    pub boundary: Boundary,
}

/// Polar-map structure-function generator for 2D planar fields.
pub struct SfMapGenerator2d<'a> {
    u: ArrayView2<'a, f64>,
    v: ArrayView2<'a, f64>,
    x: ArrayView1<'a, f64>,
    y: ArrayView1<'a, f64>,
    set: SfSet,
    scalar: Option<ArrayView2<'a, f64>>,
}

impl<'a> SfMapGenerator2d<'a> {
    /// Validate a polar-map configuration. Arrays are indexed `[y, x]`.
    pub fn new(
        u: ArrayView2<'a, f64>,
        v: ArrayView2<'a, f64>,
        coords: Coords2d<'a>,
        set: SfSet,
        options: MapOptions2d<'a>,
    ) -> Result<Self, Error> {
        set.check_scalar(options.scalar.is_some())?;
        if options.boundary != Boundary::PeriodicAll {
            return Err(Error::polar_map_input("both axes must be periodic"));
        }
        let (x, y) = match coords {
            Coords2d::Uniform { x, y } => (x, y),
            _ => {
                return Err(Error::polar_map_input(
                    "coordinates must be evenly spaced 1D axes",
                ));
            }
        };
        Ok(SfMapGenerator2d {
            u,
            v,
            x,
            y,
            set,
            scalar: options.scalar,
        })
    }

    /// Run the half-plane sweep and return the result map.
    pub fn compute(&self) -> SfResult {
        let n_x_shifts = self.x.len() / 2;
        let half_y = (self.y.len() / 2) as isize;
        let n_y_shifts = 2 * half_y as usize;
        let shape = (n_x_shifts, n_y_shifts);

        let dx = self.x[1] - self.x[0];
        let dy = self.y[1] - self.y[0];

        let coords = Coords2d::Uniform { x: self.x, y: self.y };
        let adv = if self.set.contains(SfKind::AsfV) {
            Some(advect_velocity_2d(
                &self.u,
                &self.v,
                &coords,
                EARTH_CIRCUMFERENCE_KM,
            ))
        } else {
            None
        };
        let adv_scalar = match (self.set.contains(SfKind::AsfS), &self.scalar) {
            (true, Some(s)) => Some(advect_scalar_2d(
                &self.u,
                &self.v,
                s,
                &coords,
                EARTH_CIRCUMFERENCE_KM,
            )),
            _ => None,
        };

        let mut distances = Array2::zeros(shape);
        let mut angles = Array2::zeros(shape);
        let mut x_separations = Array2::zeros(shape);
        let mut y_separations = Array2::zeros(shape);
        let mut maps: Vec<(SfKind, Array2<f64>)> = self
            .set
            .kinds()
            .iter()
            .map(|&k| (k, Array2::zeros(shape)))
            .collect();

        for sx in 0..n_x_shifts {
            for sy in -half_y..half_y {
                let col = (sy + half_y) as usize;
                let x_sep = sx as f64 * dx;
                let y_sep = sy as f64 * dy;

                distances[[sx, col]] = (x_sep * x_sep + y_sep * y_sep).sqrt();
                x_separations[[sx, col]] = x_sep;
                y_separations[[sx, col]] = y_sep;
                // a pure y separation points straight up or down
                angles[[sx, col]] = if sx == 0 {
                    sign(y_sep) * std::f64::consts::FRAC_PI_2
                } else {
                    (y_sep / x_sep).atan()
                };

                let out = sf_maps_2d(
                    self.u,
                    self.v,
                    adv.as_ref().map(|a| &a.0),
                    adv.as_ref().map(|a| &a.1),
                    self.scalar,
                    adv_scalar.as_ref(),
                    (x_sep, y_sep),
                    (sx as isize, sy),
                    &self.set,
                );
                for (kind, map) in maps.iter_mut() {
                    if let Some(&val) = out.get(result_key(*kind, Direction::XY)) {
                        map[[sx, col]] = val;
                    }
                }
            }
        }

        let mut result = SfResult::new();
        for (kind, map) in maps {
            result.insert(result_key(kind, Direction::XY), SfArray::D2(map));
        }
        result.insert(SEPARATION_DISTANCES, SfArray::D2(distances));
        result.insert(SEPARATION_ANGLES, SfArray::D2(angles));
        result.insert(X_SEPARATIONS, SfArray::D2(x_separations));
        result.insert(Y_SEPARATIONS, SfArray::D2(y_separations));
        result
    }
}

/// the sign convention of the angle special case: zero stays zero
fn sign(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v.signum() }
}
