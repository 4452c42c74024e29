// Empirical arrival-time parametrizations for scintillation light transport.
//
// Each regime sampler turns a source-to-detector handle (distance, or time
// of the first photon) into the shape parameters of a two-component
// arrival-time density via fitted coefficient curves, stitches the
// components at their crossing point and draws the requested number of
// photon arrival times. The three regimes share one pipeline; only the
// coefficient tables, breakpoints and density family differ.

use rand::Rng;

use crate::composite::{CompositeDensity, LandauParams, LateComponent};
use crate::curves::ParamCurve;
use crate::intersection::crossing_point;

/// VUV group velocity in LAr, cm/ns.
pub const VUV_GROUP_VELOCITY_CM_PER_NS: f64 = 10.13;

/// Density grid resolution for the Landau+exponential regimes.
const BASE_GRID_POINTS: usize = 1000;
/// Finer grid for sharply peaked short-distance densities.
const FINE_GRID_POINTS: usize = 10_000;
/// Grid resolution for the full-coverage two-Landau regime.
const REFLECTED_GRID_POINTS: usize = 1500;

/// Outcome of a timing draw: either the requested arrival times, or a
/// marker that the parametrization does not apply at the given input.
///
/// `OutOfRange` is not an error; the host simulation treats it as "no
/// photons timed here". It is kept distinct from `Sampled(vec![])`
/// (a valid draw of zero photons) so callers *can* tell the two apart;
/// [`ArrivalTimes::into_times`] collapses both to an empty vector.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrivalTimes {
    Sampled(Vec<f64>),
    OutOfRange,
}

impl ArrivalTimes {
    pub fn times(&self) -> &[f64] {
        match self {
            ArrivalTimes::Sampled(times) => times,
            ArrivalTimes::OutOfRange => &[],
        }
    }

    pub fn into_times(self) -> Vec<f64> {
        match self {
            ArrivalTimes::Sampled(times) => times,
            ArrivalTimes::OutOfRange => Vec::new(),
        }
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self, ArrivalTimes::OutOfRange)
    }
}

/// Landau shape-parameter curves of one density component: log10 of the
/// normalization, location and width, each as a function of the regime's
/// input handle.
struct LandauCurves {
    log10_norm: ParamCurve,
    mpv: ParamCurve,
    width: ParamCurve,
}

impl LandauCurves {
    fn eval(&self, x: f64) -> LandauParams {
        LandauParams {
            mpv: self.mpv.eval(x),
            width: self.width.eval(x),
            norm: 10f64.powf(self.log10_norm.eval(x)),
        }
    }
}

// ---------------------------------------------------------------------------
// Direct (VUV) light: distance handle in cm, valid over [10, 750] cm.
// Near-field curves were fit up to 500 cm; beyond that the location and
// normalization switch to dedicated far-field refits and the remaining
// curves hold their fit-edge values. The exponential tail switches at
// 450 cm.
// ---------------------------------------------------------------------------

const VUV_DISTANCE_RANGE: (f64, f64) = (10.0, 750.0);
const VUV_DISTANCE_BREAK: f64 = 500.0;
const VUV_TAIL_BREAK: f64 = 450.0;

const VUV_LANDAU: LandauCurves = LandauCurves {
    log10_norm: ParamCurve::poly(
        &[
            7.85903,
            -0.108075,
            0.00110999,
            -6.90009e-06,
            2.52576e-08,
            -5.39078e-11,
            6.20863e-14,
            -2.97559e-17,
        ],
        0.0,
        VUV_DISTANCE_BREAK,
    ),
    mpv: ParamCurve::poly(
        &[1.20259, 0.0582674, 0.000308053, -2.71782e-07, -3.37159e-10],
        0.0,
        VUV_DISTANCE_BREAK,
    ),
    width: ParamCurve::poly(
        &[0.346667, -0.00768231, 0.000211825, -3.81361e-07],
        0.0,
        VUV_DISTANCE_BREAK,
    ),
};

const VUV_LOG10_NORM_FAR: ParamCurve = ParamCurve::expo(
    &[2.23151, -0.00627503],
    VUV_DISTANCE_BREAK,
    VUV_DISTANCE_RANGE.1,
);
const VUV_MPV_FAR: ParamCurve = ParamCurve::poly(
    &[-3.04952, 0.128638],
    VUV_DISTANCE_BREAK,
    VUV_DISTANCE_RANGE.1,
);

const VUV_TAIL_CONSTANT: ParamCurve = ParamCurve::poly(
    &[
        13.6592,
        -0.188798,
        0.00192431,
        -1.10689e-05,
        3.38425e-08,
        -5.20737e-11,
        3.17657e-14,
    ],
    0.0,
    VUV_TAIL_BREAK,
);
const VUV_TAIL_SLOPE: ParamCurve = ParamCurve::poly(
    &[
        -0.57011,
        0.0156393,
        -0.000197461,
        1.34491e-06,
        -5.24544e-09,
        1.1703e-11,
        -1.38811e-14,
        6.78368e-18,
    ],
    0.0,
    VUV_TAIL_BREAK,
);
const VUV_TAIL_CONSTANT_FAR: ParamCurve = ParamCurve::expo(
    &[3.69578, -0.00989582],
    VUV_TAIL_BREAK,
    VUV_DISTANCE_RANGE.1,
);

/// Arrival times of direct (VUV) light at `distance_cm` from the emission
/// point, from transport plus Rayleigh scattering only.
///
/// Returns [`ArrivalTimes::OutOfRange`] outside [10, 750] cm, where the
/// parametrization is not reliable.
pub fn sample_vuv_arrival_times<R: Rng + ?Sized>(
    distance_cm: f64,
    number_photons: usize,
    rng: &mut R,
) -> ArrivalTimes {
    if !(VUV_DISTANCE_RANGE.0..=VUV_DISTANCE_RANGE.1).contains(&distance_cm) {
        return ArrivalTimes::OutOfRange;
    }
    let t_direct = distance_cm / VUV_GROUP_VELOCITY_CM_PER_NS;

    let early = if distance_cm > VUV_DISTANCE_BREAK {
        LandauParams {
            mpv: VUV_MPV_FAR.eval(distance_cm),
            width: VUV_LANDAU.width.eval(distance_cm),
            norm: 10f64.powf(VUV_LOG10_NORM_FAR.eval(distance_cm)),
        }
    } else {
        VUV_LANDAU.eval(distance_cm)
    };

    let constant = if distance_cm > VUV_TAIL_BREAK {
        VUV_TAIL_CONSTANT_FAR.eval(distance_cm)
    } else {
        VUV_TAIL_CONSTANT.eval(distance_cm)
    };
    let late = LateComponent::Exponential {
        constant,
        slope: VUV_TAIL_SLOPE.eval(distance_cm),
    };

    let grid = if distance_cm < 50.0 {
        FINE_GRID_POINTS
    } else {
        BASE_GRID_POINTS
    };
    ArrivalTimes::Sampled(draw_arrival_times(
        early,
        late,
        3.0 * t_direct,
        grid,
        number_photons,
        rng,
    ))
}

// ---------------------------------------------------------------------------
// Visible light reflected off a cathode-only foil coverage: handle is the
// time of the first photon, valid over [8, 55] ns. The fits lose
// statistics beyond 42 ns; past that point every curve holds its 42 ns
// value except the location, which follows a dedicated linear refit.
// ---------------------------------------------------------------------------

const CATHODE_T0_RANGE: (f64, f64) = (8.0, 55.0);
const CATHODE_T0_BREAK: f64 = 42.0;

const CATHODE_LANDAU: LandauCurves = LandauCurves {
    log10_norm: ParamCurve::poly(
        &[7.54642, -0.441946, 0.0107579, -9.53399e-05],
        0.0,
        CATHODE_T0_BREAK,
    ),
    mpv: ParamCurve::poly(
        &[-1.61482, 1.18624, 0.00105223, -9.52016e-05],
        0.0,
        CATHODE_T0_BREAK,
    ),
    width: ParamCurve::poly(
        &[0.440124, -0.0557912, 0.00544957, -9.39128e-05],
        0.0,
        CATHODE_T0_BREAK,
    ),
};

/// Linear refit of the Landau location beyond the 42 ns breakpoint; the
/// polynomial itself is unreliable there, so this is an override, not a
/// clamp.
const CATHODE_MPV_REFIT: ParamCurve = ParamCurve::poly(
    &[-0.798934, 1.06216],
    CATHODE_T0_BREAK,
    CATHODE_T0_RANGE.1,
);

const CATHODE_TAIL_CONSTANT: ParamCurve = ParamCurve::poly(
    &[14.6874, -0.896761, 0.0214977, -0.000185728],
    0.0,
    CATHODE_T0_BREAK,
);
const CATHODE_TAIL_SLOPE: ParamCurve = ParamCurve::poly(
    &[-0.650584, 0.0800897, -0.00379933, 7.91909e-05, -6.10836e-07],
    0.0,
    CATHODE_T0_BREAK,
);

/// Arrival times of reflected visible light for a foil coverage limited to
/// the cathode, given the time of the first photon `t0_ns`.
///
/// Returns [`ArrivalTimes::OutOfRange`] outside [8, 55] ns.
pub fn sample_cathode_arrival_times<R: Rng + ?Sized>(
    t0_ns: f64,
    number_photons: usize,
    rng: &mut R,
) -> ArrivalTimes {
    if !(CATHODE_T0_RANGE.0..=CATHODE_T0_RANGE.1).contains(&t0_ns) {
        return ArrivalTimes::OutOfRange;
    }

    let mpv = if t0_ns > CATHODE_T0_BREAK {
        CATHODE_MPV_REFIT.eval(t0_ns)
    } else {
        CATHODE_LANDAU.mpv.eval(t0_ns)
    };
    let early = LandauParams {
        mpv,
        width: CATHODE_LANDAU.width.eval(t0_ns),
        norm: 10f64.powf(CATHODE_LANDAU.log10_norm.eval(t0_ns)),
    };
    let late = LateComponent::Exponential {
        constant: CATHODE_TAIL_CONSTANT.eval(t0_ns),
        slope: CATHODE_TAIL_SLOPE.eval(t0_ns),
    };

    let grid = if t0_ns < 20.0 {
        FINE_GRID_POINTS
    } else {
        BASE_GRID_POINTS
    };
    ArrivalTimes::Sampled(draw_arrival_times(
        early,
        late,
        2.0 * t0_ns,
        grid,
        number_photons,
        rng,
    ))
}

// ---------------------------------------------------------------------------
// Visible light with full foil coverage: two Landau components, with two
// parametrizations covering the two populations the arrival-time
// distributions split into. The population is selected from the weighted
// mean single-bounce path time (see `reflected_population`).
// ---------------------------------------------------------------------------

/// Which of the two full-coverage parametrizations applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflectedPopulation {
    One,
    Two,
}

/// Threshold on the first-photon time splitting the two full-coverage
/// populations, as a function of the weighted mean path time (ns).
pub fn population_divide(t_mean_ns: f64) -> f64 {
    0.43 * t_mean_ns + 7.0
}

/// Select the full-coverage population for a first-photon time and a
/// weighted mean path time (both ns).
pub fn reflected_population(t0_ns: f64, t_mean_ns: f64) -> ReflectedPopulation {
    if t0_ns < population_divide(t_mean_ns) {
        ReflectedPopulation::One
    } else {
        ReflectedPopulation::Two
    }
}

struct ReflectedTables {
    t0_range: (f64, f64),
    direct_time_cap: Option<f64>,
    early: LandauCurves,
    late: LandauCurves,
    /// Evaluate the late-component width against the direct (straight-line)
    /// time instead of t0, decorrelating it from the first-photon handle.
    late_width_from_direct_time: bool,
}

const REFLECTED_POPULATION_ONE: ReflectedTables = ReflectedTables {
    t0_range: (4.0, 52.0),
    direct_time_cap: None,
    early: LandauCurves {
        log10_norm: ParamCurve::poly(&[4.80632, -0.227272, 0.00409071], 0.0, 52.0),
        mpv: ParamCurve::poly(&[4.27391, 0.48747, 0.0312366], 0.0, 52.0),
        width: ParamCurve::poly(&[0.789521, -0.0763977, 0.0094536], 0.0, 52.0),
    },
    late: LandauCurves {
        log10_norm: ParamCurve::poly(&[2.88774, -0.0188192, -0.00111117], 0.0, 52.0),
        // below 6 ns the location polynomial misbehaves for lack of fit
        // statistics; the lower validity edge pins it to its 6 ns value
        mpv: ParamCurve::poly(&[-55.8751, 14.6612, -0.878218, 0.0198729], 6.0, 52.0),
        width: ParamCurve::poly(&[10.5582, -0.539349, 0.0360326], 0.0, 52.0),
    },
    late_width_from_direct_time: false,
};

const REFLECTED_POPULATION_TWO: ReflectedTables = ReflectedTables {
    t0_range: (10.0, 52.0),
    direct_time_cap: Some(60.0),
    // curves other than the locations lose statistics beyond 35 ns and
    // hold their fit-edge values there
    early: LandauCurves {
        log10_norm: ParamCurve::poly(&[9.78924, -0.808646, 0.0286551, -0.000342326], 0.0, 35.0),
        mpv: ParamCurve::poly(&[-9.04501, 1.76972], 0.0, 52.0),
        width: ParamCurve::poly(
            &[24.7515, -5.71531, 0.45703, -0.0144995, 0.000163086],
            0.0,
            35.0,
        ),
    },
    late: LandauCurves {
        log10_norm: ParamCurve::poly(&[3.44352, -0.0812814, 0.00118423], 0.0, 35.0),
        mpv: ParamCurve::poly(
            &[282.128, -57.8334, 4.50742, -0.143848, 0.00164436],
            0.0,
            35.0,
        ),
        width: ParamCurve::poly(&[15.1667, -0.0786729, -0.000696796], 0.0, 60.0),
    },
    late_width_from_direct_time: true,
};

/// Arrival times of reflected visible light with full foil coverage, for
/// an explicitly chosen population.
///
/// `distance_cm` is the straight-line emission-to-detector distance; its
/// derived direct time feeds the decorrelated late-component width and, for
/// population two, a validity cap. Returns [`ArrivalTimes::OutOfRange`]
/// outside the population's t0 validity window or beyond the cap.
pub fn sample_reflected_arrival_times<R: Rng + ?Sized>(
    population: ReflectedPopulation,
    t0_ns: f64,
    distance_cm: f64,
    number_photons: usize,
    rng: &mut R,
) -> ArrivalTimes {
    let tables = match population {
        ReflectedPopulation::One => &REFLECTED_POPULATION_ONE,
        ReflectedPopulation::Two => &REFLECTED_POPULATION_TWO,
    };
    let t_direct = distance_cm / VUV_GROUP_VELOCITY_CM_PER_NS;

    if !(tables.t0_range.0..=tables.t0_range.1).contains(&t0_ns) {
        return ArrivalTimes::OutOfRange;
    }
    if let Some(cap) = tables.direct_time_cap {
        if t_direct > cap {
            return ArrivalTimes::OutOfRange;
        }
    }

    let early = tables.early.eval(t0_ns);
    let late_width_input = if tables.late_width_from_direct_time {
        t_direct
    } else {
        t0_ns
    };
    let late = LandauParams {
        mpv: tables.late.mpv.eval(t0_ns),
        width: tables.late.width.eval(late_width_input),
        norm: 10f64.powf(tables.late.log10_norm.eval(t0_ns)),
    };

    ArrivalTimes::Sampled(draw_arrival_times(
        early,
        LateComponent::Landau(late),
        2.0 * t0_ns,
        REFLECTED_GRID_POINTS,
        number_photons,
        rng,
    ))
}

/// Full-coverage reflected-light draw with the population selected from
/// the weighted mean path time (see
/// [`crate::geometry::DetectorGeometry::weighted_mean_bounce_time`]).
pub fn sample_full_coverage_arrival_times<R: Rng + ?Sized>(
    t0_ns: f64,
    t_mean_ns: f64,
    distance_cm: f64,
    number_photons: usize,
    rng: &mut R,
) -> ArrivalTimes {
    sample_reflected_arrival_times(
        reflected_population(t0_ns, t_mean_ns),
        t0_ns,
        distance_cm,
        number_photons,
        rng,
    )
}

/// The shared regime pipeline: anchor the crossover search at the early
/// component's peak, stitch the components at the crossing point and draw
/// the requested number of arrival times.
fn draw_arrival_times<R: Rng + ?Sized>(
    early: LandauParams,
    late: LateComponent,
    search_limit: f64,
    grid_points: usize,
    number_photons: usize,
    rng: &mut R,
) -> Vec<f64> {
    let crossing = crossing_point(
        |t| early.density(t),
        |t| late.density(t),
        early.peak_time(),
        search_limit,
    );
    let density = CompositeDensity {
        early,
        late,
        crossover: crossing.abscissa,
    };
    density.sample_many(grid_points, number_photons, rng)
}
