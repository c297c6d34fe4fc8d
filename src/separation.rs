//! Physical separation distances between a point and its shifted counterpart.
//!
//! On uniform grids the distance is the signed coordinate difference
//! (`shifted − base`); on lat-lon grids it is a great-circle distance in
//! meters, evaluated per axis (longitude shift at fixed latitude, latitude
//! shift at fixed longitude).

use crate::geodesy::great_circle_distance;

/// Per-axis separation on a uniform grid. The y separation is only computed
/// when both y coordinates are present (1D tracks pass `None`).
pub fn separation_distances_uniform(
    x: f64,
    x_shifted: f64,
    y: Option<f64>,
    y_shifted: Option<f64>,
) -> (f64, Option<f64>) {
    let xd = x_shifted - x;
    let yd = match (y, y_shifted) {
        (Some(y), Some(y_shifted)) => Some(y_shifted - y),
        _ => None,
    };
    (xd, yd)
}

/// Per-axis separation on a lat-lon grid, in meters.
///
/// The x separation holds latitude fixed and moves along longitude; the y
/// separation holds longitude fixed and moves along latitude.
pub fn separation_distances_latlon(
    lon: f64,
    lat: f64,
    lon_shifted: f64,
    lat_shifted: f64,
    radius_km: Option<f64>,
) -> (f64, f64) {
    let xd = great_circle_distance(lat, lon_shifted, lat, lon, radius_km);
    let yd = great_circle_distance(lat_shifted, lon, lat, lon, radius_km);
    (xd, yd)
}

/// Signed per-axis separations on a uniform 3D grid.
pub fn separation_distances_3d(
    x: f64,
    y: f64,
    z: f64,
    x_shifted: f64,
    y_shifted: f64,
    z_shifted: f64,
) -> (f64, f64, f64) {
    (x_shifted - x, y_shifted - y, z_shifted - z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_differences_are_signed() {
        let (xd, yd) = separation_distances_uniform(1.0, 4.0, Some(2.0), Some(0.5));
        assert_eq!(xd, 3.0);
        assert_eq!(yd, Some(-1.5));
    }

    #[test]
    fn uniform_track_without_y() {
        let (xd, yd) = separation_distances_uniform(0.0, 2.5, None, None);
        assert_eq!(xd, 2.5);
        assert_eq!(yd, None);
    }

    #[test]
    fn latlon_axes_are_independent() {
        let (xd, yd) = separation_distances_latlon(10.0, 45.0, 11.0, 46.0, None);
        // one degree of longitude at 45N is shorter than one degree of latitude
        assert!(xd > 0.0 && yd > 0.0);
        assert!(xd < yd);
    }

    #[test]
    fn separations_3d() {
        let d = separation_distances_3d(0.0, 0.0, 0.0, 1.0, -2.0, 3.0);
        assert_eq!(d, (1.0, -2.0, 3.0));
    }
}
