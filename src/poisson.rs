// Photon-count sampling: direct CDF inversion at low means, Gaussian
// approximation above, with physical clamps instead of error paths.

use rand::Rng;

/// Mean above which the Poisson draw switches to the Gaussian approximation.
const GAUSSIAN_BRANCH_THRESHOLD: f64 = 16.0;

/// Saturation value of the Gaussian branch.
const COUNT_LIMIT: f64 = 2e9;

/// Draw a photon count for a given expected yield from two uniform(0,1)
/// variates supplied by the caller.
///
/// For `mean <= 16` the count is found by walking the Poisson CDF until it
/// passes `position_draw`; a draw exactly equal to the first CDF term
/// `exp(-mean)` yields 0. For larger means, `phase_draw` and
/// `position_draw` feed a Box-Muller normal variate and the count is
/// `mean + sqrt(mean) * N(0,1) + 0.5`, clamped into `[0, 2e9]`. Extreme
/// draws saturate at the clamp values rather than failing.
pub fn photon_count_from_draws(mean: f64, position_draw: f64, phase_draw: f64) -> u64 {
    if mean <= GAUSSIAN_BRANCH_THRESHOLD {
        let mut count: u64 = 0;
        let mut term = (-mean).exp();
        let mut cumulative = term;
        while cumulative < position_draw {
            count += 1;
            term *= mean / count as f64;
            cumulative += term;
            if term == 0.0 {
                // underflow: the CDF can no longer advance
                break;
            }
        }
        return count;
    }

    let amplitude = (-2.0 * position_draw.ln()).sqrt();
    let phase = 2.0 * std::f64::consts::PI * phase_draw;
    let value = mean + amplitude * phase.cos() * mean.sqrt() + 0.5;
    if !(value > 0.0) {
        return 0;
    }
    if value >= COUNT_LIMIT {
        return COUNT_LIMIT as u64;
    }
    value as u64
}

/// Draw a photon count for a given expected yield.
pub fn sample_photon_count<R: Rng + ?Sized>(mean: f64, rng: &mut R) -> u64 {
    photon_count_from_draws(mean, rng.gen(), rng.gen())
}
