//! Structure functions of 2D planar fields along the two axis directions.
//!
//! The generator validates its whole configuration up front and then runs a
//! fixed pipeline: precompute the advection fields (if an advective
//! statistic was requested), sweep the x offsets with the y offset held at
//! 1, sweep the y offsets with the x offset held at 1, record the physical
//! separation distance of every offset, and optionally bin-average the
//! curves against those distances.
//!
//! Offsets run from 1 to half the axis length on a periodic axis (the wrap
//! makes larger separations redundant) and to the axis length minus one on
//! an open axis. Result arrays are indexed directly by offset, so they have
//! one more entry than the offset range and index 0 stays zero.

use ndarray::{Array1, Array2, ArrayView2};

use crate::advection::{advect_scalar_2d, advect_velocity_2d};
use crate::bins::{bin_quantile, bin_uniform};
use crate::error::Error;
use crate::grid::{Boundary, Coords2d, EARTH_CIRCUMFERENCE_KM};
use crate::result::{SfArray, SfResult, X_DIFFS, Y_DIFFS, result_key};
use crate::separation::{separation_distances_latlon, separation_distances_uniform};
use crate::shift::shift_1d;
use crate::stats::{Direction, SfKind, SfSet, sf_2d};

/// Optional knobs for [`SfGenerator2d`].
#[derive(Clone, Default)]
pub struct Options2d<'a> {
    /// scalar field; required iff a scalar statistic is requested
    pub scalar: Option<ArrayView2<'a, f64>>,
    /// boundary policy (periodic everywhere by default)
    pub boundary: Boundary,
    /// bin-average the curves into this many distance bins
    pub nbins: Option<usize>,
    /// sphere radius for lat-lon distances, in km (Earth by default)
    pub sphere_radius_km: Option<f64>,
    /// sphere circumference for lat-lon advection, in km (Earth when `None`)
    pub sphere_circumference_km: Option<f64>,
}

/// Structure-function generator for 2D planar fields.
pub struct SfGenerator2d<'a> {
    u: ArrayView2<'a, f64>,
    v: ArrayView2<'a, f64>,
    coords: Coords2d<'a>,
    set: SfSet,
    scalar: Option<ArrayView2<'a, f64>>,
    boundary: Boundary,
    nbins: Option<usize>,
    sphere_radius_km: Option<f64>,
    sphere_circumference_km: f64,
}

impl<'a> SfGenerator2d<'a> {
    /// Validate a 2D configuration. Arrays are indexed `[y, x]`.
    pub fn new(
        u: ArrayView2<'a, f64>,
        v: ArrayView2<'a, f64>,
        coords: Coords2d<'a>,
        set: SfSet,
        options: Options2d<'a>,
    ) -> Result<Self, Error> {
        set.check_scalar(options.scalar.is_some())?;
        if options.boundary == Boundary::PeriodicZ {
            return Err(Error::unsupported_grid(
                "periodic-z applies to 3D volumes only",
            ));
        }
        if coords.is_latlon()
            && !matches!(options.boundary, Boundary::PeriodicX | Boundary::Open)
        {
            return Err(Error::unsupported_grid(
                "lat-lon grids support only the periodic-x and open boundaries",
            ));
        }
        if options.nbins == Some(0) {
            return Err(Error::bin_count());
        }
        Ok(SfGenerator2d {
            u,
            v,
            coords,
            set,
            scalar: options.scalar,
            boundary: options.boundary,
            nbins: options.nbins,
            sphere_radius_km: options.sphere_radius_km,
            sphere_circumference_km: options
                .sphere_circumference_km
                .unwrap_or(EARTH_CIRCUMFERENCE_KM),
        })
    }

    /// Run the sweep and return the result map.
    pub fn compute(&self) -> SfResult {
        let len_x = curve_len(self.coords.nx(), self.boundary.periodic_x());
        let len_y = curve_len(self.coords.ny(), self.boundary.periodic_y());

        let adv = if self.set.contains(SfKind::AsfV) {
            Some(advect_velocity_2d(
                &self.u,
                &self.v,
                &self.coords,
                self.sphere_circumference_km,
            ))
        } else {
            None
        };
        let adv_scalar = match (self.set.contains(SfKind::AsfS), &self.scalar) {
            (true, Some(s)) => Some(advect_scalar_2d(
                &self.u,
                &self.v,
                s,
                &self.coords,
                self.sphere_circumference_km,
            )),
            _ => None,
        };

        let mut curves: Vec<(SfKind, Array1<f64>, Array1<f64>)> = self
            .set
            .kinds()
            .iter()
            .map(|&k| (k, Array1::zeros(len_x), Array1::zeros(len_y)))
            .collect();

        for (dir, len) in [(Direction::X, len_x), (Direction::Y, len_y)] {
            for offset in 1..len {
                // the non-iterated axis keeps an offset of 1
                let (shift_x, shift_y) = if dir == Direction::X {
                    (offset, 1)
                } else {
                    (1, offset)
                };
                let out = sf_2d(
                    self.u,
                    self.v,
                    adv.as_ref().map(|a| &a.0),
                    adv.as_ref().map(|a| &a.1),
                    self.scalar,
                    adv_scalar.as_ref(),
                    shift_x,
                    shift_y,
                    &self.set,
                    self.boundary,
                );
                for (kind, xs, ys) in curves.iter_mut() {
                    if let Some(&val) = out.get(result_key(*kind, dir)) {
                        if dir == Direction::X {
                            xs[offset] = val;
                        } else {
                            ys[offset] = val;
                        }
                    }
                }
            }
        }

        let xd = self.axis_distances(Direction::X, len_x);
        let yd = self.axis_distances(Direction::Y, len_y);

        self.assemble(curves, xd, yd)
    }

    /// Physical separation distances of every offset along one axis,
    /// evaluated from the grid origin. Lat-lon grids yield a per-starting-
    /// latitude 2D array; NaN entries mark offsets that rolled off an open
    /// axis.
    fn axis_distances(&self, dir: Direction, len: usize) -> SfArray {
        let periodic = if dir == Direction::X {
            self.boundary.periodic_x()
        } else {
            self.boundary.periodic_y()
        };
        match &self.coords {
            Coords2d::Uniform { x, y } | Coords2d::Stretched { x, y, .. } => {
                let axis = if dir == Direction::X { x } else { y };
                let mut out = Array1::zeros(len);
                for offset in 1..len {
                    let rolled = shift_1d(*axis, offset, periodic);
                    let (d, _) =
                        separation_distances_uniform(axis[0], rolled[0], None, None);
                    out[offset] = d;
                }
                SfArray::D1(out)
            }
            Coords2d::LatLon { lats, lons } => {
                let nlat = lats.nrows();
                let mut out = Array2::zeros((len, nlat - 1));
                for offset in 1..len {
                    if dir == Direction::X {
                        let lonroll = shift_1d(lons.row(0), offset, periodic);
                        for lat in 0..nlat - 1 {
                            let (d, _) = separation_distances_latlon(
                                lons[[0, 0]],
                                lats[[lat, 0]],
                                lonroll[0],
                                lats[[lat, 0]],
                                self.sphere_radius_km,
                            );
                            out[[offset, lat]] = d;
                        }
                    } else {
                        let latroll = shift_1d(lats.column(0), offset, periodic);
                        for lat in 0..nlat - 1 {
                            let (_, d) = separation_distances_latlon(
                                lons[[0, 0]],
                                lats[[lat, 0]],
                                lons[[0, 0]],
                                latroll[lat],
                                self.sphere_radius_km,
                            );
                            out[[offset, lat]] = d;
                        }
                    }
                }
                SfArray::D2(out)
            }
        }
    }

    /// Insert the curves and distances, bin-averaging first if requested.
    fn assemble(
        &self,
        curves: Vec<(SfKind, Array1<f64>, Array1<f64>)>,
        xd: SfArray,
        yd: SfArray,
    ) -> SfResult {
        let mut result = SfResult::new();
        match self.nbins {
            Some(nbins) => {
                let mut xd_centers = None;
                let mut yd_centers = None;
                for (kind, xs, ys) in curves {
                    let (cx, vx) = bin_distances(&xd, &xs, nbins);
                    let (cy, vy) = bin_distances(&yd, &ys, nbins);
                    result.insert(result_key(kind, Direction::X), SfArray::D1(vx));
                    result.insert(result_key(kind, Direction::Y), SfArray::D1(vy));
                    xd_centers = Some(cx);
                    yd_centers = Some(cy);
                }
                // the statistic set is never empty, so the centers exist
                if let (Some(cx), Some(cy)) = (xd_centers, yd_centers) {
                    result.insert(X_DIFFS, SfArray::D1(cx));
                    result.insert(Y_DIFFS, SfArray::D1(cy));
                }
            }
            None => {
                for (kind, xs, ys) in curves {
                    result.insert(result_key(kind, Direction::X), SfArray::D1(xs));
                    result.insert(result_key(kind, Direction::Y), SfArray::D1(ys));
                }
                result.insert(X_DIFFS, xd);
                result.insert(Y_DIFFS, yd);
            }
        }
        result
    }
}

/// length of a per-offset result array (offsets run `1..len`, index 0
/// stays zero)
pub(crate) fn curve_len(n: usize, periodic: bool) -> usize {
    if periodic { n / 2 } else { n - 1 }
}

/// bin one curve against its distance array with the scheme the distance
/// array's shape selects
fn bin_distances(
    distances: &SfArray,
    curve: &Array1<f64>,
    nbins: usize,
) -> (Array1<f64>, Array1<f64>) {
    match distances {
        SfArray::D1(d) => bin_uniform(d.view(), curve.view(), nbins),
        SfArray::D2(d) => bin_quantile(d.view(), curve.view(), nbins),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    fn uniform_axes(n: usize) -> (Array1<f64>, Array1<f64>) {
        (
            Array1::linspace(0.0, (n - 1) as f64, n),
            Array1::linspace(0.0, (n - 1) as f64, n),
        )
    }

    #[test]
    fn scalar_mismatch_is_rejected() {
        let u = Array2::zeros((4, 4));
        let v = Array2::zeros((4, 4));
        let (x, y) = uniform_axes(4);
        let coords = Coords2d::Uniform {
            x: x.view(),
            y: y.view(),
        };
        let set = SfSet::parse(&["SS"]).unwrap();
        let res = SfGenerator2d::new(u.view(), v.view(), coords, set, Options2d::default());
        assert!(res.is_err());
    }

    #[test]
    fn latlon_rejects_fully_periodic_boundaries() {
        let u = Array2::zeros((4, 4));
        let v = Array2::zeros((4, 4));
        let lats = Array2::from_shape_fn((4, 4), |(j, _)| j as f64);
        let lons = Array2::from_shape_fn((4, 4), |(_, i)| i as f64);
        let coords = Coords2d::LatLon {
            lats: lats.view(),
            lons: lons.view(),
        };
        let set = SfSet::parse(&["LL"]).unwrap();
        let res = SfGenerator2d::new(u.view(), v.view(), coords, set, Options2d::default());
        assert!(res.is_err());
    }

    #[test]
    fn zero_bins_is_rejected() {
        let u = Array2::zeros((4, 4));
        let v = Array2::zeros((4, 4));
        let (x, y) = uniform_axes(4);
        let coords = Coords2d::Uniform {
            x: x.view(),
            y: y.view(),
        };
        let set = SfSet::parse(&["LL"]).unwrap();
        let options = Options2d {
            nbins: Some(0),
            ..Options2d::default()
        };
        let res = SfGenerator2d::new(u.view(), v.view(), coords, set, options);
        assert!(res.is_err());
    }

    #[test]
    fn unrequested_statistics_are_absent() {
        let u = array![
            [1.0, 2.0, 3.0, 4.0],
            [2.0, 3.0, 4.0, 5.0],
            [3.0, 4.0, 5.0, 6.0],
            [4.0, 5.0, 6.0, 7.0]
        ];
        let v = u.clone();
        let (x, y) = uniform_axes(4);
        let coords = Coords2d::Uniform {
            x: x.view(),
            y: y.view(),
        };
        let set = SfSet::parse(&["LL"]).unwrap();
        let generator =
            SfGenerator2d::new(u.view(), v.view(), coords, set, Options2d::default()).unwrap();
        let result = generator.compute();
        assert!(result.contains_key("SF_LL_x"));
        assert!(result.contains_key("SF_LL_y"));
        assert!(result.contains_key("x-diffs"));
        assert!(result.contains_key("y-diffs"));
        assert!(!result.contains_key("SF_TT_x"));
        assert!(!result.contains_key("SF_advection_velocity_x"));
    }

    #[test]
    fn periodic_curve_lengths_are_half_the_axis() {
        let u = Array2::zeros((8, 8));
        let v = Array2::zeros((8, 8));
        let (x, y) = uniform_axes(8);
        let coords = Coords2d::Uniform {
            x: x.view(),
            y: y.view(),
        };
        let set = SfSet::parse(&["LL"]).unwrap();
        let generator =
            SfGenerator2d::new(u.view(), v.view(), coords, set, Options2d::default()).unwrap();
        let result = generator.compute();
        let ll = result["SF_LL_x"].as_d1().unwrap();
        assert_eq!(ll.len(), 4);
        // a zero field has identically zero structure functions
        assert!(ll.iter().all(|&v| v == 0.0));
        let xd = result["x-diffs"].as_d1().unwrap();
        assert_eq!(xd.to_vec(), vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn open_boundary_extends_the_offset_range() {
        let u = Array2::zeros((8, 8));
        let v = Array2::zeros((8, 8));
        let (x, y) = uniform_axes(8);
        let coords = Coords2d::Uniform {
            x: x.view(),
            y: y.view(),
        };
        let set = SfSet::parse(&["LL"]).unwrap();
        let options = Options2d {
            boundary: Boundary::Open,
            ..Options2d::default()
        };
        let generator = SfGenerator2d::new(u.view(), v.view(), coords, set, options).unwrap();
        let result = generator.compute();
        assert_eq!(result["SF_LL_x"].as_d1().unwrap().len(), 7);
    }
}
