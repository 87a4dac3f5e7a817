//! Empirical sieve curves and their re-basing to the simulated window.

use crate::error::{GradationError, GradationResult};

/// An empirically measured particle size distribution: ordered
/// (diameter, cumulative fraction passing) samples.
///
/// Diameters strictly increase; passing fractions lie in `[0, 1]` and never
/// decrease. The curve must bracket the simulated diameter window before it
/// can be re-based (see [`SieveCurve::rebased`]).
///
/// # Example
///
/// ```
/// use meso_gradation::SieveCurve;
///
/// let curve = SieveCurve::new(
///     vec![0.1, 1.0, 4.0, 8.0, 16.0],
///     vec![0.0, 0.2, 0.5, 0.8, 1.0],
/// ).unwrap();
///
/// assert_eq!(curve.len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SieveCurve {
    diameters: Vec<f64>,
    passing: Vec<f64>,
}

impl SieveCurve {
    /// Create a sieve curve from parallel diameter and passing arrays.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the arrays differ in length, hold
    /// fewer than two points, the diameters do not strictly increase, or a
    /// passing fraction is out of range or decreasing.
    pub fn new(diameters: Vec<f64>, passing: Vec<f64>) -> GradationResult<Self> {
        if diameters.len() != passing.len() {
            return Err(GradationError::SieveLengthMismatch {
                diameters: diameters.len(),
                passing: passing.len(),
            });
        }
        if diameters.len() < 2 {
            return Err(GradationError::SieveTooShort {
                points: diameters.len(),
            });
        }
        for (i, window) in diameters.windows(2).enumerate() {
            if !window[0].is_finite() || window[0] <= 0.0 || window[1] <= window[0] {
                return Err(GradationError::SieveDiametersNotIncreasing { index: i + 1 });
            }
        }
        for (i, &p) in passing.iter().enumerate() {
            let decreasing = i > 0 && p < passing[i - 1];
            if !p.is_finite() || !(0.0..=1.0).contains(&p) || decreasing {
                return Err(GradationError::SievePassingInvalid { index: i, value: p });
            }
        }
        Ok(Self { diameters, passing })
    }

    /// Number of points in the curve.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.diameters.len()
    }

    /// A sieve curve always holds at least two points.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The diameter samples, ascending.
    #[must_use]
    pub fn diameters(&self) -> &[f64] {
        &self.diameters
    }

    /// The cumulative passing fractions, aligned with
    /// [`diameters`](Self::diameters).
    #[must_use]
    pub fn passing(&self) -> &[f64] {
        &self.passing
    }

    /// Linearly interpolated passing fraction at `diameter`.
    ///
    /// # Errors
    ///
    /// Returns [`GradationError::CurveDoesNotBracket`] when `diameter` falls
    /// outside the curve's support.
    pub fn passing_at(&self, diameter: f64) -> GradationResult<f64> {
        let segment = self
            .diameters
            .windows(2)
            .position(|w| w[0] <= diameter && diameter <= w[1])
            .ok_or(GradationError::CurveDoesNotBracket { diameter })?;

        let (d0, d1) = (self.diameters[segment], self.diameters[segment + 1]);
        let (p0, p1) = (self.passing[segment], self.passing[segment + 1]);
        Ok(p0 + (p1 - p0) / (d1 - d0) * (diameter - d0))
    }

    /// Re-base the curve to the `[min_diameter, max_diameter]` window.
    ///
    /// The passing fraction is interpolated at the two window endpoints and
    /// the in-between points are re-normalized so the new curve spans exactly
    /// `[0, 1]` across the window. The share of the source curve's mass that
    /// falls inside the window is reported as
    /// [`RebasedSieve::window_fraction`].
    ///
    /// # Errors
    ///
    /// Returns [`GradationError::CurveDoesNotBracket`] when either endpoint
    /// falls outside the curve, and
    /// [`GradationError::SievePassingInvalid`] when the curve is flat across
    /// the window (no mass to re-normalize).
    pub fn rebased(&self, min_diameter: f64, max_diameter: f64) -> GradationResult<RebasedSieve> {
        let w_min = self.passing_at(min_diameter)?;
        let w_max = self.passing_at(max_diameter)?;
        let window = w_max - w_min;
        if window <= 0.0 {
            return Err(GradationError::SievePassingInvalid {
                index: 0,
                value: window,
            });
        }

        let mut diameters = vec![min_diameter];
        let mut passing = vec![0.0];
        for (&d, &p) in self.diameters.iter().zip(&self.passing) {
            if d > min_diameter && d < max_diameter {
                diameters.push(d);
                passing.push((p - w_min) / window);
            }
        }
        diameters.push(max_diameter);
        passing.push(1.0);

        Ok(RebasedSieve {
            diameters,
            passing,
            window_fraction: window,
        })
    }
}

/// A sieve curve re-based to the simulated diameter window.
///
/// The passing fraction spans exactly `[0, 1]` between the first and last
/// diameter; `window_fraction` records how much of the source curve's mass
/// the window captures.
#[derive(Debug, Clone, PartialEq)]
pub struct RebasedSieve {
    /// Diameters, ascending, first = window minimum, last = window maximum.
    pub diameters: Vec<f64>,
    /// Re-normalized passing fractions, from 0 at the window minimum to 1 at
    /// the window maximum.
    pub passing: Vec<f64>,
    /// Share of the source curve's passing mass inside the window.
    pub window_fraction: f64,
}
