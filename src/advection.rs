//! Finite-difference advection of vector and scalar fields.
//!
//! The advection of a velocity component is `adv_i = Σ_j u_j ∂u_i/∂x_j`; for
//! a scalar it is `adv_s = Σ_j u_j ∂s/∂x_j`. Derivatives come from
//! [`crate::gradient`]: a scalar spacing on evenly spaced axes, a
//! cumulative-sum coordinate axis for stretched spacing arrays, and
//! degree-to-meter converted coordinates (longitude scaled by the cosine of
//! latitude) on lat-lon grids.

use crate::gradient::{gradient_coords, gradient_uniform, lane_coords};
use crate::grid::Coords2d;
use ndarray::{Array1, Array2, Array3, ArrayView1, ArrayView2, ArrayView3, Axis};

/// cumulative sum of a spacing array into a coordinate axis
fn cumsum(spacing: ArrayView1<f64>) -> Array1<f64> {
    let mut total = 0.0;
    spacing.mapv(|d| {
        total += d;
        total
    })
}

/// x-derivative on a lat-lon grid: each row gets its own coordinate axis,
/// scaled by the cosine of that row's latitude
fn latlon_x_gradient(
    f: &ArrayView2<f64>,
    lats: &ArrayView2<f64>,
    lons: &ArrayView2<f64>,
    meters_per_degree: f64,
) -> Array2<f64> {
    let mut out = Array2::zeros(f.raw_dim());
    for (j, (lane, lane_out)) in f.rows().into_iter().zip(out.rows_mut()).enumerate() {
        let cos_lat = lats[[j, 0]].to_radians().cos();
        let coords = lons.row(j).mapv(|lon| lon * meters_per_degree * cos_lat);
        lane_coords(lane, coords.view(), lane_out);
    }
    out
}

/// gradient of a 2D field along both axes, honoring the coordinate system.
/// Returns `(d/dx, d/dy)`.
fn gradient_2d(
    f: &ArrayView2<f64>,
    coords: &Coords2d,
    sphere_circumference_km: f64,
) -> (Array2<f64>, Array2<f64>) {
    match coords {
        Coords2d::Uniform { x, y } => {
            let dx = (x[0] - x[1]).abs();
            let dy = (y[0] - y[1]).abs();
            (
                gradient_uniform(f, dx, Axis(1)),
                gradient_uniform(f, dy, Axis(0)),
            )
        }
        Coords2d::Stretched { dx, dy, .. } => {
            let xcoords = cumsum(dx.view());
            let ycoords = cumsum(dy.view());
            (
                gradient_coords(f, xcoords.view(), Axis(1)),
                gradient_coords(f, ycoords.view(), Axis(0)),
            )
        }
        Coords2d::LatLon { lats, lons } => {
            let meters_per_degree = sphere_circumference_km * 1000.0 / 360.0;
            let ycoords = lats.column(0).mapv(|lat| lat * meters_per_degree);
            (
                latlon_x_gradient(f, lats, lons, meters_per_degree),
                gradient_coords(f, ycoords.view(), Axis(0)),
            )
        }
    }
}

/// Advection of a 2D velocity field. Returns `(adv_x, adv_y)`.
pub fn advect_velocity_2d(
    u: &ArrayView2<f64>,
    v: &ArrayView2<f64>,
    coords: &Coords2d,
    sphere_circumference_km: f64,
) -> (Array2<f64>, Array2<f64>) {
    let (dudx, dudy) = gradient_2d(u, coords, sphere_circumference_km);
    let (dvdx, dvdy) = gradient_2d(v, coords, sphere_circumference_km);
    let adv_x = u * &dudx + v * &dudy;
    let adv_y = u * &dvdx + v * &dvdy;
    (adv_x, adv_y)
}

/// Advection of a 2D scalar field.
pub fn advect_scalar_2d(
    u: &ArrayView2<f64>,
    v: &ArrayView2<f64>,
    scalar: &ArrayView2<f64>,
    coords: &Coords2d,
    sphere_circumference_km: f64,
) -> Array2<f64> {
    let (dsdx, dsdy) = gradient_2d(scalar, coords, sphere_circumference_km);
    u * &dsdx + v * &dsdy
}

/// gradient of a 3D field along all three axes (evenly spaced axes only).
/// Returns `(d/dx, d/dy, d/dz)`.
fn gradient_3d(
    f: &ArrayView3<f64>,
    x: ArrayView1<f64>,
    y: ArrayView1<f64>,
    z: ArrayView1<f64>,
) -> (Array3<f64>, Array3<f64>, Array3<f64>) {
    let dx = (x[0] - x[1]).abs();
    let dy = (y[0] - y[1]).abs();
    let dz = (z[0] - z[1]).abs();
    (
        gradient_uniform(f, dx, Axis(2)),
        gradient_uniform(f, dy, Axis(1)),
        gradient_uniform(f, dz, Axis(0)),
    )
}

/// Advection of a 3D velocity field. Returns `(adv_x, adv_y, adv_z)`.
pub fn advect_velocity_3d(
    u: &ArrayView3<f64>,
    v: &ArrayView3<f64>,
    w: &ArrayView3<f64>,
    x: ArrayView1<f64>,
    y: ArrayView1<f64>,
    z: ArrayView1<f64>,
) -> (Array3<f64>, Array3<f64>, Array3<f64>) {
    let (dudx, dudy, dudz) = gradient_3d(u, x, y, z);
    let (dvdx, dvdy, dvdz) = gradient_3d(v, x, y, z);
    let (dwdx, dwdy, dwdz) = gradient_3d(w, x, y, z);
    let adv_x = u * &dudx + v * &dudy + w * &dudz;
    let adv_y = u * &dvdx + v * &dvdy + w * &dvdz;
    let adv_z = u * &dwdx + v * &dwdy + w * &dwdz;
    (adv_x, adv_y, adv_z)
}

/// Advection of a 3D scalar field.
pub fn advect_scalar_3d(
    u: &ArrayView3<f64>,
    v: &ArrayView3<f64>,
    w: &ArrayView3<f64>,
    scalar: &ArrayView3<f64>,
    x: ArrayView1<f64>,
    y: ArrayView1<f64>,
    z: ArrayView1<f64>,
) -> Array3<f64> {
    let (dsdx, dsdy, dsdz) = gradient_3d(scalar, x, y, z);
    u * &dsdx + v * &dsdy + w * &dsdz
}
