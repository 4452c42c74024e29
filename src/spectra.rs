// Parametric energy-spectrum and decay-time shape functions. All are
// stateless, unnormalized density evaluators consumed by the host
// simulation's own fitting and sampling layer.

/// Electron rest mass in MeV/c^2.
pub const ELECTRON_MASS_MEV: f64 = 0.510998910;

/// Gaussian width of the Radon-222 alpha line in MeV.
const RADON_LINE_SIGMA_MEV: f64 = 0.01;

/// Allowed beta-decay spectrum shape as a function of the electron kinetic
/// energy `ke` (MeV) for a decay with Q-value `q_value` (MeV).
///
/// Zero outside the physical domain `0 <= ke <= q_value`.
pub fn beta_spectrum(ke: f64, q_value: f64) -> f64 {
    if ke < 0.0 || ke > q_value {
        return 0.0;
    }
    (ke * ke + 2.0 * ke * ELECTRON_MASS_MEV).sqrt() * (q_value - ke).powi(2)
        * (ke + ELECTRON_MASS_MEV)
}

/// Supernova neutrino energy spectrum `E^3 exp(-4 E / E_av)` for a galactic
/// burst, with `mean_energy` the average neutrino energy (MeV).
pub fn supernova_spectrum(energy: f64, mean_energy: f64) -> f64 {
    if energy < 0.0 {
        return 0.0;
    }
    energy.powi(3) * (-4.0 * energy / mean_energy).exp()
}

/// Radon-222 decay line: a narrow Gaussian about the alpha decay energy
/// `q_alpha` (MeV).
pub fn radon_line(energy: f64, q_alpha: f64) -> f64 {
    let sigma_sq = RADON_LINE_SIGMA_MEV * RADON_LINE_SIGMA_MEV;
    let norm = 1.0 / (RADON_LINE_SIGMA_MEV * (2.0 * std::f64::consts::PI).sqrt());
    norm * (-(energy - q_alpha).powi(2) / (2.0 * sigma_sq)).exp()
}

/// Particle species driving the scintillation singlet/triplet population
/// split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScintillatedParticle {
    Electron,
    Alpha,
}

impl ScintillatedParticle {
    /// Fractions of light emitted through the singlet and triplet states.
    fn singlet_triplet_fractions(self) -> (f64, f64) {
        match self {
            ScintillatedParticle::Electron => (0.25, 0.75),
            ScintillatedParticle::Alpha => (0.75, 0.25),
        }
    }
}

/// Scintillation photon emission-time density: the sum of singlet and
/// triplet exponential decays with lifetimes `tau_singlet` and
/// `tau_triplet` (ns), weighted by the species-dependent population split.
pub fn scintillation_decay(
    time: f64,
    tau_singlet: f64,
    tau_triplet: f64,
    particle: ScintillatedParticle,
) -> f64 {
    if time < 0.0 {
        return 0.0;
    }
    let (singlet, triplet) = particle.singlet_triplet_fractions();
    (-time / tau_singlet).exp() * singlet / tau_singlet
        + (-time / tau_triplet).exp() * triplet / tau_triplet
}
