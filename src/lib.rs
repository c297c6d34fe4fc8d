/*!
Computes turbulence structure functions from gridded velocity and scalar
fields on 1D tracks, 2D planes, and 3D volumes.

# High-Level: Structure Functions

A [structure function](https://en.wikipedia.org/wiki/Turbulence#Kolmogorov's_theory_of_1941)
is a statistical moment of field increments over a spatial separation: shift
a field by an offset, subtract, and average a product of the increments over
the whole domain. Repeating this over a range of offsets yields a curve
against physical separation distance that diagnoses how energy (or scalar
variance) moves across scales in a turbulent flow.

This crate evaluates eight statistic families in one pass per separation —
the advective correlations `ASF_V`/`ASF_S` used for cascade-rate estimates
and the traditional longitudinal/transverse/scalar moments `LL`, `TT`, `SS`,
`LLL`, `LTT`, `LSS` — over the axis directions of the grid, with

- periodic or open boundaries per axis (open shifts pad with NaN, which
  simply drops out of the averages),
- uniform, stretched-spacing, or spherical lat-lon coordinates,
- optional bin-averaging of the curves against separation distance, and
- a 2D "polar map" mode that resolves the full in-plane separation vector
  instead of the axis directions.

# Example

```
use gridsf::{Coords2d, Options2d, SfGenerator2d, SfSet};
use ndarray::Array2;

let n = 16;
let x = ndarray::Array1::linspace(0.0, 15.0, n);
let u = Array2::from_shape_fn((n, n), |(j, i)| (i as f64).sin() * j as f64);
let v = Array2::from_shape_fn((n, n), |(j, i)| (j as f64).cos() + i as f64);

let coords = Coords2d::Uniform { x: x.view(), y: x.view() };
let set = SfSet::parse(&["LL", "TT"])?;
let generator = SfGenerator2d::new(u.view(), v.view(), coords, set, Options2d::default())?;
let result = generator.compute();

let ll_x = result["SF_LL_x"].as_d1().unwrap();
let distances = result["x-diffs"].as_d1().unwrap();
assert_eq!(ll_x.len(), distances.len());
# Ok::<(), gridsf::Error>(())
```
*/

#![deny(rustdoc::broken_intra_doc_links)]

mod advection;
mod bins;
mod error;
mod generate_1d;
mod generate_2d;
mod generate_3d;
mod geodesy;
mod gradient;
mod grid;
mod maps_2d;
mod result;
mod separation;
mod shift;
mod stats;

pub use advection::{
    advect_scalar_2d, advect_scalar_3d, advect_velocity_2d, advect_velocity_3d,
};
pub use bins::{bin_data, bin_data_latlon};
pub use error::Error;
pub use generate_1d::{Options1d, SfGenerator1d, Track};
pub use generate_2d::{Options2d, SfGenerator2d};
pub use generate_3d::{Options3d, SfGenerator3d};
pub use geodesy::{EARTH_RADIUS_KM, great_circle_distance};
pub use grid::{Boundary, Coords2d, EARTH_CIRCUMFERENCE_KM};
pub use maps_2d::{MapOptions2d, SfMapGenerator2d};
pub use result::{
    SEPARATION_ANGLES, SEPARATION_DISTANCES, SfArray, SfResult, X_DIFFS, X_SEPARATIONS,
    Y_DIFFS, Y_SEPARATIONS, Z_DIFFS,
};
pub use separation::{
    separation_distances_3d, separation_distances_latlon, separation_distances_uniform,
};
pub use shift::{shift_1d, shift_2d, shift_3d, shift_xy};
pub use stats::{SfKind, SfSet};
