//! Traditional structure functions along a 1D data track.
//!
//! A track carries a longitudinal velocity component, optionally a
//! transverse component and a scalar, sampled along either a uniform
//! coordinate axis or a (latitude, longitude) path on a sphere. Advective
//! statistics are not defined on tracks. Transverse statistics are simply
//! skipped when no transverse component exists; the scalar pairing, by
//! contrast, is validated up front like everywhere else.
//!
//! Unlike the planar generators, the track distance for an offset is
//! evaluated at the offset's own index rather than at the origin, so uneven
//! tracks report representative distances; bin-averaging then merges
//! offsets with similar physical separations.

use ndarray::{Array1, ArrayView1};

use crate::bins::bin_uniform;
use crate::error::Error;
use crate::generate_2d::curve_len;
use crate::geodesy::great_circle_distance;
use crate::result::{SfArray, SfResult, X_DIFFS, result_key};
use crate::separation::separation_distances_uniform;
use crate::shift::shift_1d;
use crate::stats::{Direction, SfKind, SfSet, sf_1d};

/// The coordinate description of a 1D track.
#[derive(Clone)]
pub enum Track<'a> {
    /// positions along a straight coordinate axis
    Uniform { x: ArrayView1<'a, f64> },
    /// a path on a sphere, in degrees; distances come out in meters
    LatLon {
        lats: ArrayView1<'a, f64>,
        lons: ArrayView1<'a, f64>,
    },
}

impl Track<'_> {
    fn len(&self) -> usize {
        match self {
            Track::Uniform { x } => x.len(),
            Track::LatLon { lats, .. } => lats.len(),
        }
    }
}

/// Optional knobs for [`SfGenerator1d`].
#[derive(Clone)]
pub struct Options1d<'a> {
    /// transverse velocity component
    pub v: Option<ArrayView1<'a, f64>>,
    /// scalar field; required iff a scalar statistic is requested
    pub scalar: Option<ArrayView1<'a, f64>>,
    /// whether the track wraps around
    pub periodic: bool,
    /// bin-average the curves into this many distance bins
    pub nbins: Option<usize>,
    /// sphere radius for lat-lon distances, in km (Earth by default)
    pub sphere_radius_km: Option<f64>,
}

impl Default for Options1d<'_> {
    fn default() -> Self {
        Options1d {
            v: None,
            scalar: None,
            periodic: true,
            nbins: None,
            sphere_radius_km: None,
        }
    }
}

/// Structure-function generator for 1D tracks.
pub struct SfGenerator1d<'a> {
    u: ArrayView1<'a, f64>,
    track: Track<'a>,
    set: SfSet,
    v: Option<ArrayView1<'a, f64>>,
    scalar: Option<ArrayView1<'a, f64>>,
    periodic: bool,
    nbins: Option<usize>,
    sphere_radius_km: Option<f64>,
}

impl<'a> SfGenerator1d<'a> {
    /// Validate a track configuration.
    pub fn new(
        u: ArrayView1<'a, f64>,
        track: Track<'a>,
        set: SfSet,
        options: Options1d<'a>,
    ) -> Result<Self, Error> {
        if set.has_advective() {
            return Err(Error::unsupported_grid(
                "advective statistics require a 2D or 3D grid",
            ));
        }
        set.check_scalar(options.scalar.is_some())?;
        if options.nbins == Some(0) {
            return Err(Error::bin_count());
        }
        Ok(SfGenerator1d {
            u,
            track,
            set,
            v: options.v,
            scalar: options.scalar,
            periodic: options.periodic,
            nbins: options.nbins,
            sphere_radius_km: options.sphere_radius_km,
        })
    }

    /// Run the sweep and return the result map.
    pub fn compute(&self) -> SfResult {
        let len = curve_len(self.track.len(), self.periodic);

        // transverse statistics only materialize when v exists
        let active: Vec<SfKind> = self
            .set
            .kinds()
            .iter()
            .copied()
            .filter(|k| self.v.is_some() || !matches!(k, SfKind::TT | SfKind::LTT))
            .collect();

        let mut curves: Vec<(SfKind, Array1<f64>)> = active
            .iter()
            .map(|&k| (k, Array1::zeros(len)))
            .collect();
        let mut xd = Array1::zeros(len);

        for sep_id in 1..len {
            let out = sf_1d(self.u, self.v, self.scalar, sep_id, &self.set, self.periodic);
            for (kind, curve) in curves.iter_mut() {
                if let Some(&val) = out.get(result_key(*kind, Direction::Track)) {
                    curve[sep_id] = val;
                }
            }
            xd[sep_id] = self.track_distance(sep_id);
        }

        let mut result = SfResult::new();
        match self.nbins {
            Some(nbins) => {
                let mut centers = None;
                for (kind, curve) in curves {
                    let (c, v) = bin_uniform(xd.view(), curve.view(), nbins);
                    result.insert(result_key(kind, Direction::Track), SfArray::D1(v));
                    centers = Some(c);
                }
                if let Some(c) = centers {
                    result.insert(X_DIFFS, SfArray::D1(c));
                }
            }
            None => {
                for (kind, curve) in curves {
                    result.insert(result_key(kind, Direction::Track), SfArray::D1(curve));
                }
                result.insert(X_DIFFS, SfArray::D1(xd));
            }
        }
        result
    }

    /// Physical separation of one offset, evaluated at the offset's own
    /// track index. NaN when the shifted index rolled off an open track.
    fn track_distance(&self, sep_id: usize) -> f64 {
        match &self.track {
            Track::Uniform { x } => {
                let xroll = shift_1d(*x, sep_id, self.periodic);
                separation_distances_uniform(x[sep_id], xroll[sep_id], None, None).0
            }
            Track::LatLon { lats, lons } => {
                let latroll = shift_1d(*lats, sep_id, self.periodic);
                let lonroll = shift_1d(*lons, sep_id, self.periodic);
                great_circle_distance(
                    lats[sep_id],
                    lons[sep_id],
                    latroll[sep_id],
                    lonroll[sep_id],
                    self.sphere_radius_km,
                )
            }
        }
    }
}
