//! Bin-averaging of per-separation statistics.
//!
//! Two schemes cover the two grid regimes. On uniform grids the distance
//! axis is cut into `nbins` equal-width intervals (right edge inclusive,
//! with the leftmost edge nudged down so the minimum lands in the first
//! bin), and every non-empty bin reports the mean distance and mean
//! statistic of its members; empty bins are dropped, so fewer than `nbins`
//! pairs may come back. On lat-lon grids the separation distances form a 2D
//! per-latitude array, and equal-width cuts would leave sparsely populated
//! bins at the extremes; there the finite (distance, statistic) pairs are
//! split into `nbins` equal-population groups instead, which keeps the bin
//! centers monotonically non-decreasing by construction.

use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::error::Error;

/// Bin a statistic curve against its distances using equal-width bins.
///
/// NaN distances are excluded entirely; a NaN statistic still lets its
/// distance count toward the bin center. Returns the bin centers (mean
/// member distance) and bin-averaged statistic of every non-empty bin.
pub fn bin_data(
    dd: ArrayView1<f64>,
    sf: ArrayView1<f64>,
    nbins: usize,
) -> Result<(Array1<f64>, Array1<f64>), Error> {
    if nbins == 0 {
        return Err(Error::bin_count());
    }
    Ok(bin_uniform(dd, sf, nbins))
}

/// equal-width binning with a pre-validated bin count
pub(crate) fn bin_uniform(
    dd: ArrayView1<f64>,
    sf: ArrayView1<f64>,
    nbins: usize,
) -> (Array1<f64>, Array1<f64>) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &d in dd.iter() {
        if !d.is_nan() {
            lo = lo.min(d);
            hi = hi.max(d);
        }
    }
    if lo > hi {
        // every distance was NaN
        return (Array1::zeros(0), Array1::zeros(0));
    }
    let width = hi - lo;

    let mut dd_sum = vec![0.0; nbins];
    let mut dd_count = vec![0usize; nbins];
    let mut sf_sum = vec![0.0; nbins];
    let mut sf_count = vec![0usize; nbins];

    for (&d, &s) in dd.iter().zip(sf.iter()) {
        if d.is_nan() {
            continue;
        }
        // interval (edge[j], edge[j+1]]; d == lo falls in bin 0
        let j = if width == 0.0 {
            0
        } else {
            let p = (d - lo) / width * nbins as f64;
            (p.ceil() as usize).max(1).min(nbins) - 1
        };
        dd_sum[j] += d;
        dd_count[j] += 1;
        if !s.is_nan() {
            sf_sum[j] += s;
            sf_count[j] += 1;
        }
    }

    let mut centers = Vec::with_capacity(nbins);
    let mut values = Vec::with_capacity(nbins);
    for j in 0..nbins {
        if dd_count[j] == 0 {
            continue;
        }
        centers.push(dd_sum[j] / dd_count[j] as f64);
        values.push(if sf_count[j] == 0 {
            f64::NAN
        } else {
            sf_sum[j] / sf_count[j] as f64
        });
    }
    (Array1::from(centers), Array1::from(values))
}

/// Bin a statistic curve against a 2D per-latitude distance array using
/// equal-population bins.
///
/// Row `i` of `dd` holds the per-starting-latitude distances of shift `i`,
/// so the statistic value of that shift pairs with every finite distance in
/// its row. The sorted pairs are split into `nbins` near-equal groups.
pub fn bin_data_latlon(
    dd: ArrayView2<f64>,
    sf: ArrayView1<f64>,
    nbins: usize,
) -> Result<(Array1<f64>, Array1<f64>), Error> {
    if nbins == 0 {
        return Err(Error::bin_count());
    }
    Ok(bin_quantile(dd, sf, nbins))
}

/// equal-population binning with a pre-validated bin count
pub(crate) fn bin_quantile(
    dd: ArrayView2<f64>,
    sf: ArrayView1<f64>,
    nbins: usize,
) -> (Array1<f64>, Array1<f64>) {
    let mut pairs: Vec<(f64, f64)> = Vec::new();
    for (row, &s) in dd.rows().into_iter().zip(sf.iter()) {
        if s.is_nan() {
            continue;
        }
        for &d in row.iter() {
            if !d.is_nan() {
                pairs.push((d, s));
            }
        }
    }
    // NaNs were filtered above, so the ordering is total
    pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let n = pairs.len();
    let mut centers = Vec::with_capacity(nbins);
    let mut values = Vec::with_capacity(nbins);
    for k in 0..nbins {
        let start = k * n / nbins;
        let stop = (k + 1) * n / nbins;
        if start == stop {
            continue;
        }
        let group = &pairs[start..stop];
        let count = group.len() as f64;
        centers.push(group.iter().map(|p| p.0).sum::<f64>() / count);
        values.push(group.iter().map(|p| p.1).sum::<f64>() / count);
    }
    (Array1::from(centers), Array1::from(values))
}
