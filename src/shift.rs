//! Integer-offset array shifts with per-axis boundary handling.
//!
//! A shifted array has the same shape as its input; entry `i` of the output
//! holds entry `i + offset` of the input. On a periodic axis the index wraps;
//! on an open axis the trailing `offset` entries (the ones whose source fell
//! off the domain) become NaN. An offset of 0 is the identity.
//!
//! Callers are responsible for keeping `|offset|` below the axis length
//! (periodic sweeps stop at the half-domain anyway); this is not checked.

use crate::grid::Boundary;
use ndarray::{Array1, Array2, Array3, ArrayView1, ArrayView2, ArrayView3};

/// Shift a 1D array by `shift_by` entries, wrapping if `periodic`.
pub fn shift_1d(input: ArrayView1<f64>, shift_by: usize, periodic: bool) -> Array1<f64> {
    let n = input.len();
    Array1::from_shape_fn(n, |i| {
        let src = i + shift_by;
        if periodic {
            input[src % n]
        } else if src < n {
            input[src]
        } else {
            f64::NAN
        }
    })
}

/// Shift a 2D array along x and along y (independently), returning the pair
/// `(x_shifted, y_shifted)`. The boundary policy decides wrap vs NaN-pad per
/// axis.
pub fn shift_2d(
    input: ArrayView2<f64>,
    shift_x: usize,
    shift_y: usize,
    boundary: Boundary,
) -> (Array2<f64>, Array2<f64>) {
    let (ny, nx) = input.dim();

    let x_shifted = Array2::from_shape_fn((ny, nx), |(j, i)| {
        let src = i + shift_x;
        if boundary.periodic_x() {
            input[[j, src % nx]]
        } else if src < nx {
            input[[j, src]]
        } else {
            f64::NAN
        }
    });

    let y_shifted = Array2::from_shape_fn((ny, nx), |(j, i)| {
        let src = j + shift_y;
        if boundary.periodic_y() {
            input[[src % ny, i]]
        } else if src < ny {
            input[[src, i]]
        } else {
            f64::NAN
        }
    });

    (x_shifted, y_shifted)
}

/// Shift a 3D array along x, y, and z (independently), returning
/// `(x_shifted, y_shifted, z_shifted)`.
pub fn shift_3d(
    input: ArrayView3<f64>,
    shift_x: usize,
    shift_y: usize,
    shift_z: usize,
    boundary: Boundary,
) -> (Array3<f64>, Array3<f64>, Array3<f64>) {
    let (nz, ny, nx) = input.dim();

    let x_shifted = Array3::from_shape_fn((nz, ny, nx), |(k, j, i)| {
        let src = i + shift_x;
        if boundary.periodic_x() {
            input[[k, j, src % nx]]
        } else if src < nx {
            input[[k, j, src]]
        } else {
            f64::NAN
        }
    });

    let y_shifted = Array3::from_shape_fn((nz, ny, nx), |(k, j, i)| {
        let src = j + shift_y;
        if boundary.periodic_y() {
            input[[k, src % ny, i]]
        } else if src < ny {
            input[[k, src, i]]
        } else {
            f64::NAN
        }
    });

    let z_shifted = Array3::from_shape_fn((nz, ny, nx), |(k, j, i)| {
        let src = k + shift_z;
        if boundary.periodic_z() {
            input[[src % nz, j, i]]
        } else if src < nz {
            input[[src, j, i]]
        } else {
            f64::NAN
        }
    });

    (x_shifted, y_shifted, z_shifted)
}

/// Shift a 2D array by a combined (x, y) offset with both axes wrapping.
///
/// This is the polar-map shift: offsets may be negative (the half-plane
/// sweep walks `y` through negative offsets) and the data must be doubly
/// periodic.
pub fn shift_xy(input: ArrayView2<f64>, shift_x: isize, shift_y: isize) -> Array2<f64> {
    let (ny, nx) = input.dim();
    Array2::from_shape_fn((ny, nx), |(j, i)| {
        let jj = (j as isize + shift_y).rem_euclid(ny as isize) as usize;
        let ii = (i as isize + shift_x).rem_euclid(nx as isize) as usize;
        input[[jj, ii]]
    })
}
