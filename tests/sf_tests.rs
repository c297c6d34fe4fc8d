mod common;

use common::{assert_allclose, random_field};
use gridsf::{Coords2d, Options2d, SfGenerator2d, SfSet, shift_xy};
use ndarray::{Array1, Array2};

fn compute<'a>(
    u: &'a Array2<f64>,
    v: &'a Array2<f64>,
    x: &'a Array1<f64>,
    names: &[&str],
    scalar: Option<&'a Array2<f64>>,
) -> gridsf::SfResult {
    let coords = Coords2d::Uniform {
        x: x.view(),
        y: x.view(),
    };
    let set = SfSet::parse(names).unwrap();
    let options = Options2d {
        scalar: scalar.map(|s| s.view()),
        ..Options2d::default()
    };
    SfGenerator2d::new(u.view(), v.view(), coords, set, options)
        .unwrap()
        .compute()
}

#[test]
fn second_order_statistics_are_reflection_symmetric() {
    // on a periodic axis the increments of shift k and shift -k pair the
    // same grid points with opposite signs, which squaring erases
    let n = 8;
    let u = random_field((n, n), 101);
    let v = random_field((n, n), 102);
    let x = Array1::linspace(0.0, (n - 1) as f64, n);
    let result = compute(&u, &v, &x, &["LL"], None);
    let ll = result["SF_LL_x"].as_d1().unwrap();

    for k in 1..ll.len() {
        let du = &shift_xy(u.view(), -(k as isize), 0) - &u;
        let reflected = du.mapv(|d| d * d).sum() / du.len() as f64;
        assert!(
            (ll[k] - reflected).abs() < 1e-13,
            "shift {k}: {} vs {reflected}",
            ll[k]
        );
    }
}

#[test]
fn ll_plus_tt_is_invariant_under_velocity_rotation() {
    // rotating every velocity vector by a fixed angle preserves increment
    // magnitudes, so the sum of the second-order moments cannot change
    let n = 8;
    let u = random_field((n, n), 111);
    let v = random_field((n, n), 112);
    let theta: f64 = 0.6;
    let (sin_t, cos_t) = theta.sin_cos();
    let u_rot = &u.mapv(|a| a * cos_t) - &v.mapv(|a| a * sin_t);
    let v_rot = &u.mapv(|a| a * sin_t) + &v.mapv(|a| a * cos_t);
    let x = Array1::linspace(0.0, (n - 1) as f64, n);

    let base = compute(&u, &v, &x, &["LL", "TT"], None);
    let rotated = compute(&u_rot, &v_rot, &x, &["LL", "TT"], None);

    for (ll_key, tt_key) in [("SF_LL_x", "SF_TT_x"), ("SF_LL_y", "SF_TT_y")] {
        let sum = |r: &gridsf::SfResult| {
            r[ll_key].as_d1().unwrap() + r[tt_key].as_d1().unwrap()
        };
        assert_allclose(&sum(&base), &sum(&rotated), 1e-12, 1e-14);
    }
}

#[test]
fn scalar_statistics_ignore_the_velocity_field() {
    let n = 8;
    let scalar = random_field((n, n), 121);
    let u1 = random_field((n, n), 122);
    let v1 = random_field((n, n), 123);
    let u2 = random_field((n, n), 124);
    let v2 = random_field((n, n), 125);
    let x = Array1::linspace(0.0, (n - 1) as f64, n);

    let a = compute(&u1, &v1, &x, &["SS"], Some(&scalar));
    let b = compute(&u2, &v2, &x, &["SS"], Some(&scalar));
    for dir in ["SF_SS_x", "SF_SS_y"] {
        assert_eq!(a[dir].as_d1().unwrap(), b[dir].as_d1().unwrap());
    }
}

#[test]
fn a_scalar_equal_to_u_collapses_lss_onto_lll() {
    // with s = u the scalar increment is the x-longitudinal increment, so
    // LSS along x is the third-order longitudinal moment
    let n = 8;
    let u = random_field((n, n), 131);
    let v = random_field((n, n), 132);
    let x = Array1::linspace(0.0, (n - 1) as f64, n);

    let with_scalar = compute(&u, &v, &x, &["SS", "LSS"], Some(&u));
    let without = compute(&u, &v, &x, &["LL", "LLL"], None);

    assert_allclose(
        with_scalar["SF_LSS_x"].as_d1().unwrap(),
        without["SF_LLL_x"].as_d1().unwrap(),
        1e-12,
        1e-14,
    );
    assert_allclose(
        with_scalar["SF_SS_x"].as_d1().unwrap(),
        without["SF_LL_x"].as_d1().unwrap(),
        1e-12,
        1e-14,
    );
}

#[test]
fn both_advective_families_come_back_under_their_own_keys() {
    let n = 8;
    let u = random_field((n, n), 141);
    let v = random_field((n, n), 142);
    let scalar = random_field((n, n), 143);
    let x = Array1::linspace(0.0, (n - 1) as f64, n);

    let result = compute(&u, &v, &x, &["ASF_V", "ASF_S"], Some(&scalar));
    let velocity = result["SF_advection_velocity_x"].as_d1().unwrap();
    let scalar_sf = result["SF_advection_scalar_x"].as_d1().unwrap();
    assert_eq!(velocity.len(), scalar_sf.len());
    // different fields, different statistics
    assert!(velocity[1] != scalar_sf[1]);
}
