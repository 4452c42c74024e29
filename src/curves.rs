// Coefficient curves mapping a distance or first-photon time to the shape
// parameters of an arrival-time density.

/// Functional form of a [`ParamCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveShape {
    /// `c[0] + c[1]*x + c[2]*x^2 + ...`
    Polynomial,
    /// `exp(c[0] + c[1]*x)`
    Exponential,
}

/// A fitted coefficient curve with a validity interval on its input.
///
/// The fits are only trusted inside the interval they were performed on, so
/// the input is clamped into `[valid_from, valid_to]` before evaluation.
/// Callers with inputs beyond the interval therefore get the boundary value,
/// which is the intended extrapolation policy for every parametrization in
/// this crate.
#[derive(Debug, Clone, Copy)]
pub struct ParamCurve {
    shape: CurveShape,
    coeffs: &'static [f64],
    valid_from: f64,
    valid_to: f64,
}

impl ParamCurve {
    pub const fn poly(coeffs: &'static [f64], valid_from: f64, valid_to: f64) -> Self {
        Self {
            shape: CurveShape::Polynomial,
            coeffs,
            valid_from,
            valid_to,
        }
    }

    pub const fn expo(coeffs: &'static [f64], valid_from: f64, valid_to: f64) -> Self {
        Self {
            shape: CurveShape::Exponential,
            coeffs,
            valid_from,
            valid_to,
        }
    }

    /// Evaluate the curve, clamping `x` into the validity interval first.
    ///
    /// Panics if the coefficient slice does not match the declared shape;
    /// the tables are compile-time constants, so a mismatch is a programming
    /// error rather than a recoverable condition.
    pub fn eval(&self, x: f64) -> f64 {
        let x = x.clamp(self.valid_from, self.valid_to);
        match self.shape {
            CurveShape::Polynomial => {
                assert!(
                    !self.coeffs.is_empty(),
                    "polynomial curve needs at least one coefficient"
                );
                self.coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
            }
            CurveShape::Exponential => {
                assert!(
                    self.coeffs.len() == 2,
                    "exponential curve needs exactly two coefficients"
                );
                (self.coeffs[0] + self.coeffs[1] * x).exp()
            }
        }
    }
}
