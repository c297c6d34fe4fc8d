//! The structure-function statistic families and their per-separation
//! evaluation.
//!
//! Every statistic is a NaN-aware domain mean of pointwise products of
//! increment arrays `Δq = q_shifted − q`. The eight families fall into two
//! groups: advective correlations (`ASF_V`, `ASF_S`) and traditional moments
//! built from a longitudinal increment, the transverse increments, and the
//! scalar increment (`LL`, `TT`, `SS`, `LLL`, `LTT`, `LSS`). Which velocity
//! component is longitudinal depends on the separation direction; the
//! evaluation here is written once against that axis descriptor instead of
//! once per direction.
//!
//! NaN entries (from open-boundary shifts or missing data) never poison a
//! statistic: they simply drop out of the averaging denominator.

use std::collections::HashMap;

use ndarray::{Array, Array2, ArrayView1, ArrayView2, ArrayView3, Dimension};

use crate::error::Error;
use crate::grid::Boundary;
use crate::result::result_key;
use crate::shift::{shift_1d, shift_2d, shift_3d, shift_xy};

/// One structure-function family from the closed vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SfKind {
    /// advective velocity structure function, `mean[Σ_i Δadv_i · Δu_i]`
    AsfV,
    /// advective scalar structure function, `mean[Δadv_s · Δs]`
    AsfS,
    /// second-order longitudinal, `mean[(Δu_∥)²]`
    LL,
    /// second-order transverse, `mean[Σ(Δu_⊥)²]`
    TT,
    /// second-order scalar, `mean[(Δs)²]`
    SS,
    /// third-order longitudinal, `mean[(Δu_∥)³]`
    LLL,
    /// longitudinal-transverse-transverse, `mean[Δu_∥ · Σ(Δu_⊥)²]`
    LTT,
    /// longitudinal-scalar-scalar, `mean[Δu_∥ · (Δs)²]`
    LSS,
}

impl SfKind {
    /// Parse a statistic name (the closed vocabulary: `ASF_V`, `ASF_S`,
    /// `LL`, `TT`, `SS`, `LLL`, `LTT`, `LSS`).
    pub fn parse(name: &str) -> Result<Self, Error> {
        match name {
            "ASF_V" => Ok(SfKind::AsfV),
            "ASF_S" => Ok(SfKind::AsfS),
            "LL" => Ok(SfKind::LL),
            "TT" => Ok(SfKind::TT),
            "SS" => Ok(SfKind::SS),
            "LLL" => Ok(SfKind::LLL),
            "LTT" => Ok(SfKind::LTT),
            "LSS" => Ok(SfKind::LSS),
            _ => Err(Error::unknown_stat_name(name.to_string())),
        }
    }

    /// The statistic's canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            SfKind::AsfV => "ASF_V",
            SfKind::AsfS => "ASF_S",
            SfKind::LL => "LL",
            SfKind::TT => "TT",
            SfKind::SS => "SS",
            SfKind::LLL => "LLL",
            SfKind::LTT => "LTT",
            SfKind::LSS => "LSS",
        }
    }

    /// whether the statistic consumes the scalar field
    pub(crate) fn needs_scalar(&self) -> bool {
        matches!(self, SfKind::AsfS | SfKind::SS | SfKind::LSS)
    }

    /// whether the statistic is an advective correlation
    pub(crate) fn is_advective(&self) -> bool {
        matches!(self, SfKind::AsfV | SfKind::AsfS)
    }
}

/// A validated, deduplicated set of requested statistics.
#[derive(Clone, Debug)]
pub struct SfSet {
    kinds: Vec<SfKind>,
}

impl SfSet {
    /// Build a set from statistic kinds. Duplicates are dropped; an empty
    /// input is a configuration error.
    pub fn new(kinds: &[SfKind]) -> Result<Self, Error> {
        if kinds.is_empty() {
            return Err(Error::empty_stat_set());
        }
        let mut deduped = Vec::with_capacity(kinds.len());
        for &k in kinds {
            if !deduped.contains(&k) {
                deduped.push(k);
            }
        }
        Ok(SfSet { kinds: deduped })
    }

    /// Build a set from statistic names.
    pub fn parse(names: &[&str]) -> Result<Self, Error> {
        let kinds = names
            .iter()
            .map(|n| SfKind::parse(n))
            .collect::<Result<Vec<_>, _>>()?;
        SfSet::new(&kinds)
    }

    pub fn contains(&self, kind: SfKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// The member kinds, in request order.
    pub fn kinds(&self) -> &[SfKind] {
        &self.kinds
    }

    /// whether any member consumes the scalar field
    pub(crate) fn needs_scalar(&self) -> bool {
        self.kinds.iter().any(SfKind::needs_scalar)
    }

    /// whether any member is an advective correlation
    pub(crate) fn has_advective(&self) -> bool {
        self.kinds.iter().any(SfKind::is_advective)
    }

    /// Reject a set / scalar-field pairing where one side is present
    /// without the other.
    pub(crate) fn check_scalar(&self, scalar_supplied: bool) -> Result<(), Error> {
        if scalar_supplied != self.needs_scalar() {
            return Err(Error::scalar_mismatch(scalar_supplied));
        }
        Ok(())
    }
}

/// The separation direction a statistic was evaluated along. Picks the
/// result key and which velocity component is longitudinal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    X,
    Y,
    Z,
    /// along a 1D data track
    Track,
    /// an (x, y) separation vector in the plane (polar maps)
    XY,
}

/// Mean of the non-NaN entries; NaN when every entry is NaN.
pub(crate) fn nanmean<D: Dimension>(a: &Array<f64, D>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for &v in a.iter() {
        if !v.is_nan() {
            sum += v;
            count += 1;
        }
    }
    if count == 0 { f64::NAN } else { sum / count as f64 }
}

/// elementwise sum of squares over the transverse increments
fn sum_of_squares<D: Dimension>(parts: &[&Array<f64, D>]) -> Option<Array<f64, D>> {
    let (first, rest) = parts.split_first()?;
    let mut acc = first.mapv(|v| v * v);
    for p in rest {
        acc.zip_mut_with(p, |a, &b| *a += b * b);
    }
    Some(acc)
}

/// Evaluate every requested statistic for one separation direction and
/// insert the results under their canonical keys.
///
/// `longitudinal` is `Δu_∥`, `transverse` the remaining velocity increments
/// (possibly empty on a 1D track without a second component — transverse
/// statistics are then skipped), `advective` the precomputed
/// `Σ_i Δadv_i · Δu_i` array and `scalar_advective` the `Δadv_s · Δs` array.
fn accumulate_direction<D: Dimension>(
    out: &mut HashMap<&'static str, f64>,
    set: &SfSet,
    dir: Direction,
    longitudinal: Option<&Array<f64, D>>,
    transverse: &[&Array<f64, D>],
    dscalar: Option<&Array<f64, D>>,
    advective: Option<&Array<f64, D>>,
    scalar_advective: Option<&Array<f64, D>>,
) {
    if set.contains(SfKind::AsfV) {
        if let Some(a) = advective {
            out.insert(result_key(SfKind::AsfV, dir), nanmean(a));
        }
    }
    if set.contains(SfKind::AsfS) {
        if let Some(a) = scalar_advective {
            out.insert(result_key(SfKind::AsfS, dir), nanmean(a));
        }
    }
    if set.contains(SfKind::SS) {
        if let Some(ds) = dscalar {
            out.insert(result_key(SfKind::SS, dir), nanmean(&ds.mapv(|v| v * v)));
        }
    }

    let tt_sum = if set.contains(SfKind::TT) || set.contains(SfKind::LTT) {
        sum_of_squares(transverse)
    } else {
        None
    };

    if set.contains(SfKind::TT) {
        if let Some(tt) = &tt_sum {
            out.insert(result_key(SfKind::TT, dir), nanmean(tt));
        }
    }

    let dl = match longitudinal {
        Some(dl) => dl,
        None => return,
    };
    if set.contains(SfKind::LL) {
        out.insert(result_key(SfKind::LL, dir), nanmean(&dl.mapv(|v| v * v)));
    }
    if set.contains(SfKind::LLL) {
        out.insert(result_key(SfKind::LLL, dir), nanmean(&dl.mapv(|v| v * v * v)));
    }
    if set.contains(SfKind::LTT) {
        if let Some(tt) = &tt_sum {
            out.insert(result_key(SfKind::LTT, dir), nanmean(&(dl * tt)));
        }
    }
    if set.contains(SfKind::LSS) {
        if let Some(ds) = dscalar {
            let dss = ds.mapv(|v| v * v);
            out.insert(result_key(SfKind::LSS, dir), nanmean(&(dl * &dss)));
        }
    }
}

/// Statistics of one separation offset along a 1D track.
///
/// Transverse statistics are evaluated only when a `v` component exists;
/// scalar statistics only when a scalar exists (both are enforced upstream,
/// except for `v`, which may legitimately be absent).
pub(crate) fn sf_1d(
    u: ArrayView1<f64>,
    v: Option<ArrayView1<f64>>,
    scalar: Option<ArrayView1<f64>>,
    sep_id: usize,
    set: &SfSet,
    periodic: bool,
) -> HashMap<&'static str, f64> {
    let du = &shift_1d(u, sep_id, periodic) - &u;
    let dv = v.map(|v| &shift_1d(v, sep_id, periodic) - &v);
    let ds = scalar.map(|s| &shift_1d(s, sep_id, periodic) - &s);

    let transverse: Vec<_> = dv.iter().collect();
    let mut out = HashMap::new();
    accumulate_direction(
        &mut out,
        set,
        Direction::Track,
        Some(&du),
        &transverse,
        ds.as_ref(),
        None,
        None,
    );
    out
}

/// Statistics of one (x-offset, y-offset) pair on a 2D plane, evaluated for
/// the x direction and the y direction in a single pass.
///
/// Each present field is shifted exactly once per direction; the advection
/// arrays are only supplied (and only shifted) when an advective statistic
/// was requested.
#[allow(clippy::too_many_arguments)]
pub(crate) fn sf_2d(
    u: ArrayView2<f64>,
    v: ArrayView2<f64>,
    adv_x: Option<&Array2<f64>>,
    adv_y: Option<&Array2<f64>>,
    scalar: Option<ArrayView2<f64>>,
    adv_scalar: Option<&Array2<f64>>,
    shift_x: usize,
    shift_y: usize,
    set: &SfSet,
    boundary: Boundary,
) -> HashMap<&'static str, f64> {
    // increments along x (index 0) and y (index 1)
    let deltas = |f: ArrayView2<f64>| {
        let (fx, fy) = shift_2d(f, shift_x, shift_y, boundary);
        [&fx - &f, &fy - &f]
    };

    let du = deltas(u);
    let dv = deltas(v);
    let ds = scalar.map(deltas);

    let advective = match (adv_x, adv_y) {
        (Some(ax), Some(ay)) => {
            let dax = deltas(ax.view());
            let day = deltas(ay.view());
            Some([
                &(&dax[0] * &du[0]) + &(&day[0] * &dv[0]),
                &(&dax[1] * &du[1]) + &(&day[1] * &dv[1]),
            ])
        }
        _ => None,
    };
    let scalar_advective = match (adv_scalar, &ds) {
        (Some(a), Some(ds)) => {
            let da = deltas(a.view());
            Some([&da[0] * &ds[0], &da[1] * &ds[1]])
        }
        _ => None,
    };

    let mut out = HashMap::new();
    for (i, dir) in [Direction::X, Direction::Y].into_iter().enumerate() {
        let (longitudinal, transverse) = match dir {
            Direction::X => (&du[i], [&dv[i]]),
            _ => (&dv[i], [&du[i]]),
        };
        accumulate_direction(
            &mut out,
            set,
            dir,
            Some(longitudinal),
            &transverse,
            ds.as_ref().map(|d| &d[i]),
            advective.as_ref().map(|a| &a[i]),
            scalar_advective.as_ref().map(|a| &a[i]),
        );
    }
    out
}

/// Statistics of one (x, y, z) offset triple on a 3D volume, evaluated for
/// all three axis directions in a single pass.
#[allow(clippy::too_many_arguments)]
pub(crate) fn sf_3d(
    u: ArrayView3<f64>,
    v: ArrayView3<f64>,
    w: ArrayView3<f64>,
    adv: Option<[&ndarray::Array3<f64>; 3]>,
    scalar: Option<ArrayView3<f64>>,
    adv_scalar: Option<&ndarray::Array3<f64>>,
    shifts: (usize, usize, usize),
    set: &SfSet,
    boundary: Boundary,
) -> HashMap<&'static str, f64> {
    let (shift_x, shift_y, shift_z) = shifts;
    let deltas = |f: ArrayView3<f64>| {
        let (fx, fy, fz) = shift_3d(f, shift_x, shift_y, shift_z, boundary);
        [&fx - &f, &fy - &f, &fz - &f]
    };

    let du = deltas(u);
    let dv = deltas(v);
    let dw = deltas(w);
    let ds = scalar.map(deltas);

    let advective = adv.map(|[ax, ay, az]| {
        let dax = deltas(ax.view());
        let day = deltas(ay.view());
        let daz = deltas(az.view());
        [0, 1, 2].map(|i| {
            let mut acc = &dax[i] * &du[i];
            acc.zip_mut_with(&(&day[i] * &dv[i]), |a, &b| *a += b);
            acc.zip_mut_with(&(&daz[i] * &dw[i]), |a, &b| *a += b);
            acc
        })
    });
    let scalar_advective = match (adv_scalar, &ds) {
        (Some(a), Some(ds)) => {
            let da = deltas(a.view());
            Some([0, 1, 2].map(|i| &da[i] * &ds[i]))
        }
        _ => None,
    };

    let mut out = HashMap::new();
    for (i, dir) in [Direction::X, Direction::Y, Direction::Z].into_iter().enumerate() {
        let (longitudinal, transverse) = match dir {
            Direction::X => (&du[i], [&dv[i], &dw[i]]),
            Direction::Y => (&dv[i], [&du[i], &dw[i]]),
            _ => (&dw[i], [&du[i], &dv[i]]),
        };
        accumulate_direction(
            &mut out,
            set,
            dir,
            Some(longitudinal),
            &transverse,
            ds.as_ref().map(|d| &d[i]),
            advective.as_ref().map(|a| &a[i]),
            scalar_advective.as_ref().map(|a| &a[i]),
        );
    }
    out
}

/// Statistics of one in-plane separation vector for the polar map.
///
/// The traditional families first rotate the increment pair onto the
/// separation direction (cosine/sine of the separation angle) to get the
/// longitudinal and transverse components; the advective families use the
/// unrotated dot form. Both axes must be periodic; the shift wraps.
#[allow(clippy::too_many_arguments)]
pub(crate) fn sf_maps_2d(
    u: ArrayView2<f64>,
    v: ArrayView2<f64>,
    adv_x: Option<&Array2<f64>>,
    adv_y: Option<&Array2<f64>>,
    scalar: Option<ArrayView2<f64>>,
    adv_scalar: Option<&Array2<f64>>,
    separation: (f64, f64),
    shifts: (isize, isize),
    set: &SfSet,
) -> HashMap<&'static str, f64> {
    let (shift_x, shift_y) = shifts;
    let delta = |f: ArrayView2<f64>| &shift_xy(f, shift_x, shift_y) - &f;

    let du = delta(u);
    let dv = delta(v);
    let ds = scalar.map(delta);

    let advective = match (adv_x, adv_y) {
        (Some(ax), Some(ay)) => {
            Some(&(&delta(ax.view()) * &du) + &(&delta(ay.view()) * &dv))
        }
        _ => None,
    };
    let scalar_advective = match (adv_scalar, &ds) {
        (Some(a), Some(ds)) => Some(&delta(a.view()) * ds),
        _ => None,
    };

    // rotate the increment pair onto the separation direction; the zero
    // vector leaves NaN factors, which propagate into the (0, 0) entry
    let (x_sep, y_sep) = separation;
    let norm = (x_sep * x_sep + y_sep * y_sep).sqrt();
    let (cos_a, sin_a) = (x_sep / norm, y_sep / norm);
    let longitudinal = &du.mapv(|v| v * cos_a) + &dv.mapv(|v| v * sin_a);
    let transverse = &dv.mapv(|v| v * cos_a) - &du.mapv(|v| v * sin_a);

    let mut out = HashMap::new();
    accumulate_direction(
        &mut out,
        set,
        Direction::XY,
        Some(&longitudinal),
        &[&transverse],
        ds.as_ref(),
        advective.as_ref(),
        scalar_advective.as_ref(),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn parse_round_trips_every_name() {
        for name in ["ASF_V", "ASF_S", "LL", "TT", "SS", "LLL", "LTT", "LSS"] {
            assert_eq!(SfKind::parse(name).unwrap().name(), name);
        }
        assert!(SfKind::parse("LLLL").is_err());
    }

    #[test]
    fn set_rejects_empty_and_dedupes() {
        assert!(SfSet::new(&[]).is_err());
        let set = SfSet::parse(&["LL", "LL", "TT"]).unwrap();
        assert_eq!(set.kinds(), &[SfKind::LL, SfKind::TT]);
    }

    #[test]
    fn scalar_pairing_is_checked_both_ways() {
        let set = SfSet::parse(&["SS"]).unwrap();
        assert!(set.check_scalar(true).is_ok());
        assert!(set.check_scalar(false).is_err());
        let set = SfSet::parse(&["LL"]).unwrap();
        assert!(set.check_scalar(false).is_ok());
        assert!(set.check_scalar(true).is_err());
    }

    #[test]
    fn nanmean_skips_missing_entries() {
        let a = array![1.0, f64::NAN, 3.0];
        assert_eq!(nanmean(&a), 2.0);
        let all_nan = array![f64::NAN, f64::NAN];
        assert!(nanmean(&all_nan).is_nan());
    }

    #[test]
    fn advective_oracle_2x2() {
        // u, v and their advection fields on a 2x2 periodic grid with unit
        // offsets give 88 in x and 138 in y
        let u = array![[1.0, 2.0], [3.0, 4.0]];
        let v = array![[1.0, -2.0], [-3.0, 4.0]];
        let adv_x = array![[3.0, -2.0], [-3.0, 12.0]];
        let adv_y = array![[-7.0, -18.0], [33.0, 52.0]];
        let set = SfSet::parse(&["ASF_V"]).unwrap();
        let out = sf_2d(
            u.view(),
            v.view(),
            Some(&adv_x),
            Some(&adv_y),
            None,
            None,
            1,
            1,
            &set,
            Boundary::PeriodicAll,
        );
        assert_eq!(out["SF_advection_velocity_x"], 88.0);
        assert_eq!(out["SF_advection_velocity_y"], 138.0);
    }

    #[test]
    fn longitudinal_component_follows_the_direction() {
        // u varies along x only, v along y only; LL picks the component
        // longitudinal to each direction
        let u = array![[0.0, 1.0], [0.0, 1.0]];
        let v = array![[0.0, 0.0], [2.0, 2.0]];
        let set = SfSet::parse(&["LL", "TT"]).unwrap();
        let out = sf_2d(
            u.view(),
            v.view(),
            None,
            None,
            None,
            None,
            1,
            1,
            &set,
            Boundary::PeriodicAll,
        );
        // Δu along x is ±1 everywhere, Δv along y is ±2 everywhere
        assert_eq!(out["SF_LL_x"], 1.0);
        assert_eq!(out["SF_LL_y"], 4.0);
        assert_eq!(out["SF_TT_x"], 0.0);
        assert_eq!(out["SF_TT_y"], 0.0);
    }

    #[test]
    fn track_without_second_component_skips_transverse() {
        let u = array![1.0, 2.0, 4.0, 8.0];
        let set = SfSet::parse(&["LL", "TT", "LTT"]).unwrap();
        let out = sf_1d(u.view(), None, None, 1, &set, true);
        assert!(out.contains_key("SF_LL"));
        assert!(!out.contains_key("SF_TT"));
        assert!(!out.contains_key("SF_LTT"));
    }

    #[test]
    fn third_order_sign_is_preserved() {
        // a monotone ramp with periodic wrap: most increments are +1, the
        // wrap increment is -(n-1)
        let u = array![0.0, 1.0, 2.0, 3.0];
        let set = SfSet::parse(&["LLL"]).unwrap();
        let out = sf_1d(u.view(), None, None, 1, &set, true);
        // increments (1, 1, 1, -3): mean of cubes = (3 - 27) / 4
        assert_eq!(out["SF_LLL"], -6.0);
    }

    #[test]
    fn transverse_additivity_3d() {
        // TT along x sums the squared increments of both transverse
        // components
        let v = ndarray::Array3::from_shape_fn((2, 2, 2), |(_, _, i)| i as f64);
        let w = v.mapv(|val| 2.0 * val);
        let u = ndarray::Array3::zeros((2, 2, 2));
        let set = SfSet::parse(&["TT"]).unwrap();
        let out = sf_3d(
            u.view(),
            v.view(),
            w.view(),
            None,
            None,
            None,
            (1, 1, 1),
            &set,
            Boundary::PeriodicAll,
        );
        // Δv along x is ±1, Δw along x is ±2: TT_x = 1 + 4
        assert_eq!(out["SF_TT_x"], 5.0);
    }

    #[test]
    fn map_rotation_reduces_to_axis_form_on_the_x_axis() {
        let u = array![[1.0, 2.0], [3.0, 4.0]];
        let v = array![[1.0, -2.0], [-3.0, 4.0]];
        let set = SfSet::parse(&["LL", "TT"]).unwrap();
        let map_out = sf_maps_2d(
            u.view(),
            v.view(),
            None,
            None,
            None,
            None,
            (1.0, 0.0),
            (1, 0),
            &set,
        );
        let axis_out = sf_2d(
            u.view(),
            v.view(),
            None,
            None,
            None,
            None,
            1,
            1,
            &set,
            Boundary::PeriodicAll,
        );
        // a pure x separation leaves cos = 1, sin = 0
        assert_eq!(map_out["SF_LL_xy"], axis_out["SF_LL_x"]);
        assert_eq!(map_out["SF_TT_xy"], axis_out["SF_TT_x"]);
    }
}
