//! Great-circle distance on a sphere.

/// Mean Earth radius in kilometers (IUGG value).
pub const EARTH_RADIUS_KM: f64 = 6371.009;

/// Great-circle distance in meters between two (lat, lon) points given in
/// degrees.
///
/// Uses the atan2 form of the spherical law of cosines, which stays accurate
/// for small separations. `radius_km` overrides the sphere radius; `None`
/// uses the Earth's mean radius.
pub fn great_circle_distance(
    lat1: f64,
    lon1: f64,
    lat2: f64,
    lon2: f64,
    radius_km: Option<f64>,
) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let (sin_phi1, cos_phi1) = phi1.sin_cos();
    let (sin_phi2, cos_phi2) = phi2.sin_cos();
    let (sin_dl, cos_dl) = dlambda.sin_cos();

    let y = ((cos_phi2 * sin_dl).powi(2)
        + (cos_phi1 * sin_phi2 - sin_phi1 * cos_phi2 * cos_dl).powi(2))
    .sqrt();
    let x = sin_phi1 * sin_phi2 + cos_phi1 * cos_phi2 * cos_dl;

    let central_angle = y.atan2(x);
    radius_km.unwrap_or(EARTH_RADIUS_KM) * 1000.0 * central_angle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_separation() {
        assert_eq!(great_circle_distance(12.0, 34.0, 12.0, 34.0, None), 0.0);
    }

    #[test]
    fn one_degree_of_longitude_at_the_equator() {
        let d = great_circle_distance(0.0, 0.0, 0.0, 1.0, None);
        let expected = EARTH_RADIUS_KM * 1000.0 * std::f64::consts::PI / 180.0;
        assert!((d - expected).abs() < 1e-6);
    }

    #[test]
    fn pole_to_pole_is_half_a_circumference() {
        let d = great_circle_distance(-90.0, 0.0, 90.0, 0.0, None);
        let expected = EARTH_RADIUS_KM * 1000.0 * std::f64::consts::PI;
        assert!((d - expected).abs() < 1e-6);
    }

    #[test]
    fn radius_override_scales_linearly() {
        let d1 = great_circle_distance(10.0, 20.0, 11.0, 21.0, Some(1.0));
        let d2 = great_circle_distance(10.0, 20.0, 11.0, 21.0, Some(2.0));
        assert!((2.0 * d1 - d2).abs() < 1e-9);
    }
}
