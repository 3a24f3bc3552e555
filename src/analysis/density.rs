//! Seeded Poisson samples standing in for per-cell innovation density
//!
//! The values carry no meaning beyond feeding the choropleth. They are drawn in
//! one batch of exactly `n_cells` values from a freshly seeded generator, so a
//! given seed and cell count always give the same sequence, while different
//! grid sizes do not share a common prefix.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Poisson};

use crate::io::configuration::POISSON_MEAN;
use crate::io::error::{Result, computation_error, invalid_parameter};

/// Draw `n_cells` independent Poisson(10) counts from a generator seeded with `seed`
///
/// # Errors
///
/// Returns an error if the distribution cannot be constructed or a draw falls
/// outside the `u32` range
pub fn sample_density(n_cells: usize, seed: u64) -> Result<Vec<u32>> {
    sample_poisson(n_cells, POISSON_MEAN, seed)
}

/// Draw `n_cells` independent Poisson counts with the given mean
///
/// # Errors
///
/// Returns an error if:
/// - `mean` is not a positive finite number
/// - A draw is not representable as `u32`
pub fn sample_poisson(n_cells: usize, mean: f64, seed: u64) -> Result<Vec<u32>> {
    if !(mean.is_finite() && mean > 0.0) {
        return Err(invalid_parameter(
            "mean",
            &mean,
            &"Poisson mean must be positive and finite",
        ));
    }

    let poisson = Poisson::new(mean).map_err(|e| computation_error("poisson", &e))?;
    let mut rng = StdRng::seed_from_u64(seed);

    (0..n_cells)
        .map(|_| {
            let draw: f64 = poisson.sample(&mut rng);
            to_count(draw)
        })
        .collect()
}

fn to_count(draw: f64) -> Result<u32> {
    if draw.is_finite() && draw >= 0.0 && draw <= f64::from(u32::MAX) {
        Ok(draw as u32)
    } else {
        Err(computation_error(
            "poisson",
            &format!("draw {draw} is not a valid count"),
        ))
    }
}
