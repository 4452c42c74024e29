// Stitched arrival-time densities: a Landau rising edge below the crossover
// and either an exponential or a second Landau tail at and above it.

use rand::Rng;

use crate::landau::{landau, landau_peak_x};

/// Upper edge of the photon signal window in nanoseconds; transported light
/// arrives no later than 1 us after scintillation.
pub const SIGNAL_T_RANGE: f64 = 1000.0;

/// Shape parameters of one scaled Landau component.
#[derive(Debug, Clone, Copy)]
pub struct LandauParams {
    /// Location (most probable value) in ns.
    pub mpv: f64,
    /// Width parameter in ns.
    pub width: f64,
    /// Unnormalized scale factor.
    pub norm: f64,
}

impl LandauParams {
    pub fn density(&self, t: f64) -> f64 {
        self.norm * landau(t, self.mpv, self.width)
    }

    /// Abscissa of the component's maximum, restricted to the signal window.
    pub fn peak_time(&self) -> f64 {
        landau_peak_x(self.mpv, self.width)
    }
}

/// The late-time component of a stitched density.
#[derive(Debug, Clone, Copy)]
pub enum LateComponent {
    /// `exp(constant + slope * t)`
    Exponential { constant: f64, slope: f64 },
    /// A second scaled Landau.
    Landau(LandauParams),
}

impl LateComponent {
    pub fn density(&self, t: f64) -> f64 {
        match self {
            LateComponent::Exponential { constant, slope } => (constant + slope * t).exp(),
            LateComponent::Landau(params) => params.density(t),
        }
    }
}

/// An unnormalized arrival-time density over `[0, SIGNAL_T_RANGE]` ns:
/// the early component strictly below the crossover, the late component at
/// and above it. Continuity at the stitch point is only as good as the
/// crossover search that produced it.
#[derive(Debug, Clone)]
pub struct CompositeDensity {
    pub early: LandauParams,
    pub late: LateComponent,
    pub crossover: f64,
}

impl CompositeDensity {
    pub fn density(&self, t: f64) -> f64 {
        if t < self.crossover {
            self.early.density(t)
        } else {
            self.late.density(t)
        }
    }

    /// Draw one arrival time; see [`CompositeDensity::sample_many`].
    pub fn sample<R: Rng + ?Sized>(&self, grid_points: usize, rng: &mut R) -> f64 {
        self.sample_many(grid_points, 1, rng)[0]
    }

    /// Draw `count` i.i.d. arrival times by inverse transform against a
    /// piecewise-linear CDF built from `grid_points` evenly spaced samples
    /// of the density. Sharply peaked short-distance densities need the
    /// finer grids the regime samplers request.
    pub fn sample_many<R: Rng + ?Sized>(
        &self,
        grid_points: usize,
        count: usize,
        rng: &mut R,
    ) -> Vec<f64> {
        let n = grid_points.max(1);
        let dt = SIGNAL_T_RANGE / n as f64;

        // Cumulative trapezoid integral at the grid knots.
        let mut cdf = Vec::with_capacity(n + 1);
        cdf.push(0.0);
        let mut running = 0.0;
        let mut prev = self.density(0.0);
        for i in 1..=n {
            let value = self.density(i as f64 * dt);
            running += 0.5 * (prev + value) * dt;
            cdf.push(running);
            prev = value;
        }
        let total = *cdf.last().unwrap();

        let mut times = Vec::with_capacity(count);
        if !(total > 0.0) || !total.is_finite() {
            // Degenerate density over the whole window; pin to the origin.
            times.resize(count, 0.0);
            return times;
        }

        for _ in 0..count {
            let target = rng.gen::<f64>() * total;
            // Binary search for the knot interval containing the target mass.
            let mut low = 0usize;
            let mut high = n;
            while high - low > 1 {
                let mid = (low + high) >> 1;
                if cdf[mid] <= target {
                    low = mid;
                } else {
                    high = mid;
                }
            }
            let mass = cdf[high] - cdf[low];
            let frac = if mass > 0.0 {
                (target - cdf[low]) / mass
            } else {
                0.0
            };
            times.push((low as f64 + frac) * dt);
        }
        times
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn example_density() -> CompositeDensity {
        CompositeDensity {
            early: LandauParams {
                mpv: 10.0,
                width: 1.5,
                norm: 100.0,
            },
            late: LateComponent::Exponential {
                constant: 4.0,
                slope: -0.05,
            },
            crossover: 13.0,
        }
    }

    #[test]
    fn test_component_selection_across_crossover() {
        let d = example_density();
        assert_eq!(d.density(12.0), d.early.density(12.0));
        assert_eq!(d.density(13.0), d.late.density(13.0));
        assert_eq!(d.density(200.0), d.late.density(200.0));
    }

    #[test]
    fn test_samples_stay_in_signal_window() {
        let d = example_density();
        let mut rng = StdRng::seed_from_u64(7);
        for t in d.sample_many(1000, 500, &mut rng) {
            assert!((0.0..=SIGNAL_T_RANGE).contains(&t));
        }
    }

    #[test]
    fn test_sample_count_matches_request() {
        let d = example_density();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(d.sample_many(1000, 250, &mut rng).len(), 250);
        assert!(d.sample_many(1000, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_mass_concentrates_near_the_peak() {
        let d = example_density();
        let mut rng = StdRng::seed_from_u64(11);
        let times = d.sample_many(10_000, 2000, &mut rng);
        let early = times.iter().filter(|&&t| t < 100.0).count();
        // rising edge at ~10 ns and a tail constant of 20 ns keep nearly
        // all the mass well below 100 ns
        assert!(early as f64 / times.len() as f64 > 0.9);
    }

    #[test]
    fn test_two_landau_family() {
        let d = CompositeDensity {
            early: LandauParams {
                mpv: 20.0,
                width: 2.0,
                norm: 50.0,
            },
            late: LateComponent::Landau(LandauParams {
                mpv: 45.0,
                width: 10.0,
                norm: 80.0,
            }),
            crossover: 32.0,
        };
        let mut rng = StdRng::seed_from_u64(3);
        let times = d.sample_many(1500, 300, &mut rng);
        assert_eq!(times.len(), 300);
        assert!(times.iter().all(|t| (0.0..=SIGNAL_T_RANGE).contains(t)));
    }

    #[test]
    fn test_degenerate_density_pins_to_origin() {
        let d = CompositeDensity {
            early: LandauParams {
                mpv: 0.0,
                width: 0.0,
                norm: 0.0,
            },
            late: LateComponent::Landau(LandauParams {
                mpv: 0.0,
                width: 0.0,
                norm: 0.0,
            }),
            crossover: 10.0,
        };
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(d.sample(1000, &mut rng), 0.0);
    }
}
