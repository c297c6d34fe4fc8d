//! Structure functions of 3D volumes along the three axis directions.
//!
//! Same pipeline as the 2D generator, with one more sweep: each axis is
//! iterated in turn while the other two offsets stay at 1. Only evenly
//! spaced coordinate axes are supported in 3D.

use ndarray::{Array1, ArrayView1, ArrayView3};

use crate::advection::{advect_scalar_3d, advect_velocity_3d};
use crate::bins::bin_uniform;
use crate::error::Error;
use crate::generate_2d::curve_len;
use crate::grid::Boundary;
use crate::result::{SfArray, SfResult, X_DIFFS, Y_DIFFS, Z_DIFFS, result_key};
use crate::separation::separation_distances_3d;
use crate::shift::shift_1d;
use crate::stats::{Direction, SfKind, SfSet, sf_3d};

/// Optional knobs for [`SfGenerator3d`].
#[derive(Clone, Default)]
pub struct Options3d<'a> {
    /// scalar field; required iff a scalar statistic is requested
    pub scalar: Option<ArrayView3<'a, f64>>,
    /// boundary policy (periodic everywhere by default)
    pub boundary: Boundary,
    /// bin-average the curves into this many distance bins
    pub nbins: Option<usize>,
}

/// Structure-function generator for 3D volumes.
pub struct SfGenerator3d<'a> {
    u: ArrayView3<'a, f64>,
    v: ArrayView3<'a, f64>,
    w: ArrayView3<'a, f64>,
    x: ArrayView1<'a, f64>,
    y: ArrayView1<'a, f64>,
    z: ArrayView1<'a, f64>,
    set: SfSet,
    scalar: Option<ArrayView3<'a, f64>>,
    boundary: Boundary,
    nbins: Option<usize>,
}

impl<'a> SfGenerator3d<'a> {
    /// Validate a 3D configuration. Arrays are indexed `[z, y, x]`; the
    /// coordinate axes must be evenly spaced.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        u: ArrayView3<'a, f64>,
        v: ArrayView3<'a, f64>,
        w: ArrayView3<'a, f64>,
        x: ArrayView1<'a, f64>,
        y: ArrayView1<'a, f64>,
        z: ArrayView1<'a, f64>,
        set: SfSet,
        options: Options3d<'a>,
    ) -> Result<Self, Error> {
        set.check_scalar(options.scalar.is_some())?;
        if options.nbins == Some(0) {
            return Err(Error::bin_count());
        }
        Ok(SfGenerator3d {
            u,
            v,
            w,
            x,
            y,
            z,
            set,
            scalar: options.scalar,
            boundary: options.boundary,
            nbins: options.nbins,
        })
    }

    /// Run the sweep and return the result map.
    pub fn compute(&self) -> SfResult {
        let lens = [
            curve_len(self.x.len(), self.boundary.periodic_x()),
            curve_len(self.y.len(), self.boundary.periodic_y()),
            curve_len(self.z.len(), self.boundary.periodic_z()),
        ];

        let adv = if self.set.contains(SfKind::AsfV) {
            let (ax, ay, az) =
                advect_velocity_3d(&self.u, &self.v, &self.w, self.x, self.y, self.z);
            Some([ax, ay, az])
        } else {
            None
        };
        let adv_scalar = match (self.set.contains(SfKind::AsfS), &self.scalar) {
            (true, Some(s)) => Some(advect_scalar_3d(
                &self.u, &self.v, &self.w, s, self.x, self.y, self.z,
            )),
            _ => None,
        };

        let mut curves: Vec<(SfKind, [Array1<f64>; 3])> = self
            .set
            .kinds()
            .iter()
            .map(|&k| (k, lens.map(|n| Array1::zeros(n))))
            .collect();

        let directions = [Direction::X, Direction::Y, Direction::Z];
        for (axis, dir) in directions.into_iter().enumerate() {
            for offset in 1..lens[axis] {
                // the two non-iterated axes keep an offset of 1
                let mut shifts = [1usize; 3];
                shifts[axis] = offset;
                let out = sf_3d(
                    self.u,
                    self.v,
                    self.w,
                    adv.as_ref().map(|[ax, ay, az]| [ax, ay, az]),
                    self.scalar,
                    adv_scalar.as_ref(),
                    (shifts[0], shifts[1], shifts[2]),
                    &self.set,
                    self.boundary,
                );
                for (kind, per_axis) in curves.iter_mut() {
                    if let Some(&val) = out.get(result_key(*kind, dir)) {
                        per_axis[axis][offset] = val;
                    }
                }
            }
        }

        let distances = [
            self.axis_distances(self.x, lens[0], self.boundary.periodic_x()),
            self.axis_distances(self.y, lens[1], self.boundary.periodic_y()),
            self.axis_distances(self.z, lens[2], self.boundary.periodic_z()),
        ];

        let mut result = SfResult::new();
        let diff_keys = [X_DIFFS, Y_DIFFS, Z_DIFFS];
        match self.nbins {
            Some(nbins) => {
                let mut centers: [Option<Array1<f64>>; 3] = [None, None, None];
                for (kind, per_axis) in curves {
                    for ((axis, dir), curve) in
                        directions.iter().enumerate().zip(per_axis)
                    {
                        let (c, v) =
                            bin_uniform(distances[axis].view(), curve.view(), nbins);
                        result.insert(result_key(kind, *dir), SfArray::D1(v));
                        centers[axis] = Some(c);
                    }
                }
                for (key, center) in diff_keys.into_iter().zip(centers) {
                    if let Some(c) = center {
                        result.insert(key, SfArray::D1(c));
                    }
                }
            }
            None => {
                for (kind, per_axis) in curves {
                    for (dir, curve) in directions.iter().zip(per_axis) {
                        result.insert(result_key(kind, *dir), SfArray::D1(curve));
                    }
                }
                for (key, d) in diff_keys.into_iter().zip(distances) {
                    result.insert(key, SfArray::D1(d));
                }
            }
        }
        result
    }

    /// separation distances of every offset along one axis, from the origin
    fn axis_distances(
        &self,
        axis: ArrayView1<'a, f64>,
        len: usize,
        periodic: bool,
    ) -> Array1<f64> {
        let mut out = Array1::zeros(len);
        for offset in 1..len {
            let rolled = shift_1d(axis, offset, periodic);
            let (d, _, _) =
                separation_distances_3d(axis[0], 0.0, 0.0, rolled[0], 0.0, 0.0);
            out[offset] = d;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn axes(n: usize) -> Array1<f64> {
        Array1::linspace(0.0, (n - 1) as f64, n)
    }

    #[test]
    fn scalar_statistics_require_a_scalar_field() {
        let f = Array3::zeros((4, 4, 4));
        let x = axes(4);
        let set = SfSet::parse(&["LSS"]).unwrap();
        let res = SfGenerator3d::new(
            f.view(),
            f.view(),
            f.view(),
            x.view(),
            x.view(),
            x.view(),
            set,
            Options3d::default(),
        );
        assert!(res.is_err());
    }

    #[test]
    fn zero_field_gives_zero_curves_on_all_axes() {
        let f = Array3::zeros((6, 6, 6));
        let x = axes(6);
        let set = SfSet::parse(&["LL", "TT"]).unwrap();
        let generator = SfGenerator3d::new(
            f.view(),
            f.view(),
            f.view(),
            x.view(),
            x.view(),
            x.view(),
            set,
            Options3d::default(),
        )
        .unwrap();
        let result = generator.compute();
        for key in ["SF_LL_x", "SF_LL_y", "SF_LL_z", "SF_TT_x", "SF_TT_y", "SF_TT_z"] {
            let curve = result[key].as_d1().unwrap();
            assert_eq!(curve.len(), 3);
            assert!(curve.iter().all(|&v| v == 0.0));
        }
        let zd = result["z-diffs"].as_d1().unwrap();
        assert_eq!(zd.to_vec(), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn mixed_boundaries_set_per_axis_lengths() {
        let f = Array3::zeros((6, 6, 6));
        let x = axes(6);
        let set = SfSet::parse(&["LL"]).unwrap();
        let options = Options3d {
            boundary: Boundary::PeriodicZ,
            ..Options3d::default()
        };
        let generator = SfGenerator3d::new(
            f.view(),
            f.view(),
            f.view(),
            x.view(),
            x.view(),
            x.view(),
            set,
            options,
        )
        .unwrap();
        let result = generator.compute();
        // open axes iterate to n - 1, the periodic axis to n / 2
        assert_eq!(result["SF_LL_x"].as_d1().unwrap().len(), 5);
        assert_eq!(result["SF_LL_y"].as_d1().unwrap().len(), 5);
        assert_eq!(result["SF_LL_z"].as_d1().unwrap().len(), 3);
    }
}
