// Statistical utilities for liquid-argon TPC photon-transport Monte Carlo:
// photon-count sampling, energy-spectrum shape functions, and empirical
// arrival-time parametrizations for direct (VUV) and reflected visible
// scintillation light.

mod composite;
mod curves;
mod geometry;
mod intersection;
mod landau;
mod poisson;
mod spectra;
mod timing;

pub use composite::{CompositeDensity, LandauParams, LateComponent, SIGNAL_T_RANGE};
pub use curves::ParamCurve;
pub use geometry::{Axis, DetectorGeometry, ReflectingPlane};
pub use intersection::{crossing_point, Crossing};
pub use landau::{landau, landau_peak_x, LANDAU_MODE_SHIFT};
pub use poisson::{photon_count_from_draws, sample_photon_count};
pub use spectra::{
    beta_spectrum, radon_line, scintillation_decay, supernova_spectrum, ScintillatedParticle,
    ELECTRON_MASS_MEV,
};
pub use timing::{
    population_divide, reflected_population, sample_cathode_arrival_times,
    sample_full_coverage_arrival_times, sample_reflected_arrival_times, sample_vuv_arrival_times,
    ArrivalTimes, ReflectedPopulation, VUV_GROUP_VELOCITY_CM_PER_NS,
};
