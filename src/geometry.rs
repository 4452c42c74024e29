// Single-bounce reflected-light timing estimator.
//
// Models photon arrival for a TPC whose field-cage walls and cathode are
// covered in wavelength-shifting reflector foil: VUV scintillation light
// reaches a foil "hotspot", is shifted to the visible, and travels to the
// optical detector. There is no clean "distance to detector" handle in a
// fully reflective volume, so the estimator averages the hotspot-path
// travel times over the reflecting planes with an empirical hotspot
// weighting.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Coordinate axis a reflecting plane is normal to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// One foil-covered plane, normal to `axis` at `offset` meters in
/// detector-centered coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReflectingPlane {
    pub axis: Axis,
    pub offset: f64,
}

/// Detector description consumed by the reflected-light estimator: the
/// foil-covered planes, the LAr group velocities for the two wavelength
/// regimes, and the world-to-centered coordinate offset.
///
/// [`DetectorGeometry::default`] describes the 2 x 4 x 5 m half-TPC the
/// reflected-light parametrizations were fit for; other detector designs
/// supply their own values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorGeometry {
    /// Foil-covered planes contributing single-bounce paths. The entrance
    /// (photon-detector) plane is not listed; it does not reflect.
    pub reflecting_planes: Vec<ReflectingPlane>,
    /// VUV group velocity in m/ns.
    pub vuv_speed: f64,
    /// Visible-light group velocity in m/ns.
    pub visible_speed: f64,
    /// World coordinates of the detector center in meters. Points are
    /// recentered on this, with x reversed to run from the detector plane
    /// towards the cathode.
    pub center: [f64; 3],
}

impl Default for DetectorGeometry {
    fn default() -> Self {
        // visible-light refractive index in LAr
        const N_VISIBLE: f64 = 1.23;
        Self {
            // plane offsets match the foil positions in the detector
            // description, half a foil thickness beyond the active volume
            reflecting_planes: vec![
                ReflectingPlane { axis: Axis::X, offset: 1.0 },    // cathode
                ReflectingPlane { axis: Axis::Y, offset: -2.015 }, // bottom
                ReflectingPlane { axis: Axis::Y, offset: 2.015 },  // top
                ReflectingPlane { axis: Axis::Z, offset: -2.515 }, // upstream
                ReflectingPlane { axis: Axis::Z, offset: 2.515 },  // downstream
            ],
            vuv_speed: 0.12,
            visible_speed: 0.29979 / N_VISIBLE,
            center: [1.0, 0.0, 2.5],
        }
    }
}

/// Travel time and weight contributed by one reflecting plane.
#[derive(Debug, Clone, Copy)]
struct HotspotContribution {
    time: f64,
    weight: f64,
}

impl DetectorGeometry {
    /// Weighted mean single-bounce arrival time (ns) for light emitted at
    /// `scint_point` and detected at `detector_point`, both in world meters.
    ///
    /// Deterministic: this is the "weighted mean path time" input of the
    /// full-coverage reflected-light sampler, not a random draw. The
    /// weighted sum is order-independent over the plane list.
    pub fn weighted_mean_bounce_time(
        &self,
        scint_point: Vector3<f64>,
        detector_point: Vector3<f64>,
    ) -> f64 {
        let scint = self.to_centered(scint_point);
        let detector = self.to_centered(detector_point);

        let mut weighted_time = 0.0;
        let mut total_weight = 0.0;
        for plane in &self.reflecting_planes {
            let c = self.hotspot_contribution(plane, scint, detector);
            weighted_time += c.time * c.weight;
            total_weight += c.weight;
        }
        weighted_time / total_weight
    }

    /// Recenter a world point, reversing x to run from the detector plane
    /// towards the cathode (right-handed convention).
    fn to_centered(&self, p: Vector3<f64>) -> Vector3<f64> {
        Vector3::new(
            -(p.x - self.center[0]),
            p.y - self.center[1],
            p.z - self.center[2],
        )
    }

    /// Time and weight of one plane's contribution, both built from the
    /// direct point-to-hotspot legs: a VUV leg from the scintillation point
    /// to the hotspot and a visible leg from the hotspot to the detector.
    fn hotspot_contribution(
        &self,
        plane: &ReflectingPlane,
        scint: Vector3<f64>,
        detector: Vector3<f64>,
    ) -> HotspotContribution {
        let k = plane.axis.index();

        // hotspot: the point on the foil lit most intensely by the
        // scintillation, i.e. the normal projection onto the plane
        let mut to_wall = Vector3::zeros();
        to_wall[k] = plane.offset - scint[k];
        let hotspot = scint + to_wall;

        let d_scint = (scint - hotspot).norm();
        let d_detector = (detector - hotspot).norm();

        let time = d_scint / self.vuv_speed + d_detector / self.visible_speed;

        let hotspot_weight = 1.0 / d_scint.powi(2) - 0.0294 / d_scint.powi(3);
        let weight = hotspot_weight / (1.0 + d_detector * d_detector);

        HotspotContribution { time, weight }
    }
}
