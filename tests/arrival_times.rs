// End-to-end checks of the arrival-time samplers against the documented
// qualitative behavior of the parametrizations.

use nalgebra::Vector3;
use photon_timing_for_mc::{
    crossing_point, reflected_population, sample_cathode_arrival_times,
    sample_full_coverage_arrival_times, sample_vuv_arrival_times, ArrivalTimes, CompositeDensity,
    DetectorGeometry, LandauParams, LateComponent, ReflectedPopulation, SIGNAL_T_RANGE,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn vuv_timing_at_100cm_has_landau_rise_and_exponential_tail() {
    let mut rng = StdRng::seed_from_u64(42);
    let times = sample_vuv_arrival_times(100.0, 1000, &mut rng).into_times();

    assert_eq!(times.len(), 1000);
    assert!(times.iter().all(|t| (0.0..=SIGNAL_T_RANGE).contains(t)));

    // the density is a Landau edge peaking near the ~10 ns direct time with
    // an exponential tail of a few tens of ns: almost all of the mass sits
    // well below 100 ns
    let below_100 = times.iter().filter(|&&t| t < 100.0).count();
    assert!(below_100 as f64 / times.len() as f64 > 0.85);

    let mut sorted = times.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let median = sorted[sorted.len() / 2];
    assert!((5.0..50.0).contains(&median), "median {}", median);

    // coarse histogram: the most populated 5 ns bin is on the rising edge
    let mut bins = [0usize; 200];
    for &t in &times {
        bins[(t / 5.0) as usize % 200] += 1;
    }
    let peak_bin = bins.iter().enumerate().max_by_key(|(_, &n)| n).unwrap().0;
    assert!(peak_bin < 6, "peak bin {}", peak_bin);
}

#[test]
fn out_of_range_inputs_yield_the_sentinel_for_every_regime() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
        sample_vuv_arrival_times(5.0, 1000, &mut rng),
        ArrivalTimes::OutOfRange
    );
    assert_eq!(
        sample_cathode_arrival_times(2.0, 1000, &mut rng),
        ArrivalTimes::OutOfRange
    );
    assert_eq!(
        sample_full_coverage_arrival_times(2.0, 10.0, 100.0, 1000, &mut rng),
        ArrivalTimes::OutOfRange
    );
    // the sentinel carries no times regardless of the requested count
    assert!(sample_vuv_arrival_times(5.0, 1000, &mut rng)
        .into_times()
        .is_empty());
}

#[test]
fn estimator_feeds_the_full_coverage_sampler() {
    let geometry = DetectorGeometry::default();
    let scint = Vector3::new(0.5, 0.5, 2.0);
    let detector = Vector3::new(1.9, 0.0, 2.5);

    let t_mean = geometry.weighted_mean_bounce_time(scint, detector);
    assert!(t_mean.is_finite() && t_mean > 0.0);

    // straight-line distance in cm for the decorrelated width input
    let distance_cm = (scint - detector).norm() * 100.0;
    let t0 = 15.0;
    let population = reflected_population(t0, t_mean);
    assert!(matches!(
        population,
        ReflectedPopulation::One | ReflectedPopulation::Two
    ));

    let mut rng = StdRng::seed_from_u64(7);
    let times =
        sample_full_coverage_arrival_times(t0, t_mean, distance_cm, 500, &mut rng).into_times();
    assert_eq!(times.len(), 500);
    assert!(times.iter().all(|t| (0.0..=SIGNAL_T_RANGE).contains(t)));
}

#[test]
fn stitched_density_components_meet_at_the_reported_residual() {
    // parameters in the ballpark of the 100 cm direct-light fit
    let early = LandauParams {
        mpv: 9.8,
        width: 1.32,
        norm: 1980.0,
    };
    let late = LateComponent::Exponential {
        constant: 5.85,
        slope: -0.0566,
    };
    let crossing = crossing_point(
        |t| early.density(t),
        |t| late.density(t),
        early.peak_time(),
        3.0 * 9.87,
    );
    let density = CompositeDensity {
        early,
        late,
        crossover: crossing.abscissa,
    };

    let gap = (density.early.density(crossing.abscissa)
        - density.late.density(crossing.abscissa))
    .abs();
    assert!((gap - crossing.residual).abs() < 1e-9);
    // these components genuinely cross, so the stitch is nearly seamless
    assert!(crossing.residual < 1.0);
}
