//! Centered finite differences along one axis of an n-dimensional array.
//!
//! Interior points use second-order central differences; the two boundary
//! points fall back to one-sided first-order differences. The coordinate
//! variant uses the standard three-point weights for unevenly spaced axes.
//! Both match the behavior of numpy's `gradient` (default edge order).

use ndarray::{Array, ArrayView, ArrayView1, ArrayViewMut1, Axis, Dimension};

/// derivative of one lane with a constant spacing `h`
fn lane_uniform(f: ArrayView1<f64>, h: f64, mut out: ArrayViewMut1<f64>) {
    let n = f.len();
    debug_assert!(n >= 2);
    out[0] = (f[1] - f[0]) / h;
    out[n - 1] = (f[n - 1] - f[n - 2]) / h;
    for i in 1..n - 1 {
        out[i] = (f[i + 1] - f[i - 1]) / (2.0 * h);
    }
}

/// derivative of one lane against a coordinate array `x`
pub(crate) fn lane_coords(f: ArrayView1<f64>, x: ArrayView1<f64>, mut out: ArrayViewMut1<f64>) {
    let n = f.len();
    debug_assert!(n >= 2);
    debug_assert_eq!(x.len(), n);
    out[0] = (f[1] - f[0]) / (x[1] - x[0]);
    out[n - 1] = (f[n - 1] - f[n - 2]) / (x[n - 1] - x[n - 2]);
    for i in 1..n - 1 {
        let a = x[i] - x[i - 1];
        let b = x[i + 1] - x[i];
        out[i] = -(b / (a * (a + b))) * f[i - 1] + ((b - a) / (a * b)) * f[i]
            + (a / (b * (a + b))) * f[i + 1];
    }
}

/// Differentiate `f` along `axis` assuming an even spacing `h`.
pub(crate) fn gradient_uniform<D: Dimension>(
    f: &ArrayView<f64, D>,
    h: f64,
    axis: Axis,
) -> Array<f64, D> {
    let mut out = Array::zeros(f.raw_dim());
    for (lane, lane_out) in f.lanes(axis).into_iter().zip(out.lanes_mut(axis)) {
        lane_uniform(lane, h, lane_out);
    }
    out
}

/// Differentiate `f` along `axis` against a shared coordinate axis.
pub(crate) fn gradient_coords<D: Dimension>(
    f: &ArrayView<f64, D>,
    coords: ArrayView1<f64>,
    axis: Axis,
) -> Array<f64, D> {
    let mut out = Array::zeros(f.raw_dim());
    for (lane, lane_out) in f.lanes(axis).into_iter().zip(out.lanes_mut(axis)) {
        lane_coords(lane, coords, lane_out);
    }
    out
}
