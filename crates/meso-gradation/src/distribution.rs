//! Particle size distributions and inverse-CDF sampling.
//!
//! The distribution over particle *diameter* is derived once per run, either
//! from Fuller's power law or from a supplied sieve curve re-based to the
//! simulated window, and then sampled by inverse transform.

use crate::error::{GradationError, GradationResult};
use crate::mix::MixDesign;
use crate::sieve::SieveCurve;

/// The source of the particle size distribution.
///
/// Absence of a sieve curve is an explicit variant, never an empty
/// collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Gradation {
    /// Fuller power law: fraction passing = `(d / d_max)^exponent`.
    Fuller {
        /// The Fuller exponent, in `(0, 3)`. Typically near 0.5.
        exponent: f64,
    },
    /// An empirical sieve curve bracketing the diameter window.
    Sieve(SieveCurve),
}

/// Configuration for distribution construction and diameter sampling.
///
/// # Example
///
/// ```
/// use meso_gradation::GradationConfig;
///
/// let config = GradationConfig::fuller(0.05, 0.2, 0.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GradationConfig {
    /// Minimum simulated particle diameter.
    pub min_diameter: f64,
    /// Maximum simulated particle diameter.
    pub max_diameter: f64,
    /// Distribution source.
    pub gradation: Gradation,
}

impl GradationConfig {
    /// Create a Fuller-law configuration.
    #[must_use]
    pub const fn fuller(min_diameter: f64, max_diameter: f64, exponent: f64) -> Self {
        Self {
            min_diameter,
            max_diameter,
            gradation: Gradation::Fuller { exponent },
        }
    }

    /// Create a sieve-curve configuration.
    #[must_use]
    pub const fn sieve(min_diameter: f64, max_diameter: f64, curve: SieveCurve) -> Self {
        Self {
            min_diameter,
            max_diameter,
            gradation: Gradation::Sieve(curve),
        }
    }

    /// Validate the diameter window and the distribution source.
    ///
    /// # Errors
    ///
    /// Returns [`GradationError::InvalidDiameterWindow`] for an empty or
    /// non-positive window, [`GradationError::InvalidFullerExponent`] for an
    /// exponent outside `(0, 3)`, and the sieve bracket errors when the
    /// curve does not cover the window.
    pub fn validate(&self) -> GradationResult<()> {
        if !self.min_diameter.is_finite()
            || !self.max_diameter.is_finite()
            || self.min_diameter <= 0.0
            || self.max_diameter <= self.min_diameter
        {
            return Err(GradationError::InvalidDiameterWindow {
                min: self.min_diameter,
                max: self.max_diameter,
            });
        }
        match &self.gradation {
            Gradation::Fuller { exponent } => {
                if !exponent.is_finite() || *exponent <= 0.0 || *exponent >= 3.0 {
                    return Err(GradationError::InvalidFullerExponent {
                        exponent: *exponent,
                    });
                }
            }
            Gradation::Sieve(curve) => {
                curve.passing_at(self.min_diameter)?;
                curve.passing_at(self.max_diameter)?;
            }
        }
        Ok(())
    }
}

/// Piecewise segments of a sieve-derived CDF.
#[derive(Debug, Clone, PartialEq)]
struct PiecewiseCdf {
    /// Segment endpoints, ascending, spanning the diameter window.
    diameters: Vec<f64>,
    /// Cumulative sampling distribution at each endpoint, from 0 to 1.
    cdf: Vec<f64>,
    /// Per-segment intensity coefficients.
    kappa: Vec<f64>,
    /// Re-based volume passing fraction at each endpoint, from 0 to 1.
    passing: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
enum CdfKind {
    /// Closed-form Fuller inverse with effective exponent `q = 3 - nF`.
    Fuller { q: f64 },
    Piecewise(PiecewiseCdf),
}

/// The cumulative particle volume distribution over diameter, ready for
/// inverse-transform sampling.
///
/// Built once from a [`GradationConfig`]; immutable afterwards. Sampling a
/// variate `u` in `[0, 1)` yields a diameter inside the configured window.
///
/// For Fuller gradations the inversion uses the effective exponent
/// `q = 3 - exponent`, so equal CDF increments carry equal volume shares
/// under the passing curve. A two-point sieve curve spanning exactly the
/// window reproduces Fuller with exponent 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleCdf {
    min_diameter: f64,
    max_diameter: f64,
    window_fraction: f64,
    kind: CdfKind,
}

impl ParticleCdf {
    /// Build the distribution from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns any error of [`GradationConfig::validate`]; the configuration
    /// is re-validated here so the CDF can never be built from bad inputs.
    pub fn build(config: &GradationConfig) -> GradationResult<Self> {
        config.validate()?;
        let (min_d, max_d) = (config.min_diameter, config.max_diameter);

        match &config.gradation {
            Gradation::Fuller { exponent } => Ok(Self {
                min_diameter: min_d,
                max_diameter: max_d,
                window_fraction: 1.0 - (min_d / max_d).powf(*exponent),
                kind: CdfKind::Fuller { q: 3.0 - exponent },
            }),
            Gradation::Sieve(curve) => {
                let rebased = curve.rebased(min_d, max_d)?;

                // kappa = 2 / sum_i slope_i (1/d_i^2 - 1/d_{i+1}^2), slope in
                // passing-fraction per diameter.
                let n = rebased.diameters.len() - 1;
                let mut slope = Vec::with_capacity(n);
                let mut inv_sq_drop = Vec::with_capacity(n);
                for i in 0..n {
                    let (d0, d1) = (rebased.diameters[i], rebased.diameters[i + 1]);
                    let (p0, p1) = (rebased.passing[i], rebased.passing[i + 1]);
                    slope.push((p1 - p0) / (d1 - d0));
                    inv_sq_drop.push(1.0 / (d0 * d0) - 1.0 / (d1 * d1));
                }
                let total: f64 = slope
                    .iter()
                    .zip(&inv_sq_drop)
                    .map(|(s, drop)| s * drop)
                    .sum();
                let kappa_total = 2.0 / total;

                let kappa: Vec<f64> = slope.iter().map(|s| kappa_total * s).collect();
                let mut cdf = Vec::with_capacity(n + 1);
                cdf.push(0.0);
                for i in 0..n {
                    cdf.push(cdf[i] + kappa[i] * inv_sq_drop[i] / 2.0);
                }

                Ok(Self {
                    min_diameter: min_d,
                    max_diameter: max_d,
                    window_fraction: rebased.window_fraction,
                    kind: CdfKind::Piecewise(PiecewiseCdf {
                        diameters: rebased.diameters,
                        cdf,
                        kappa,
                        passing: rebased.passing,
                    }),
                })
            }
        }
    }

    /// Minimum diameter of the window.
    #[inline]
    #[must_use]
    pub const fn min_diameter(&self) -> f64 {
        self.min_diameter
    }

    /// Maximum diameter of the window.
    #[inline]
    #[must_use]
    pub const fn max_diameter(&self) -> f64 {
        self.max_diameter
    }

    /// Share of the total particle volume that falls inside the simulated
    /// window.
    ///
    /// For Fuller gradations this is `1 - (min/max)^exponent`; for sieve
    /// curves it is the passing-fraction span the window captures.
    #[inline]
    #[must_use]
    pub const fn window_fraction(&self) -> f64 {
        self.window_fraction
    }

    /// CDF breakpoint values at the segment endpoints.
    ///
    /// Fuller gradations have a single segment; the values are `[0, 1]`.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        match &self.kind {
            CdfKind::Fuller { .. } => vec![0.0, 1.0],
            CdfKind::Piecewise(pw) => pw.cdf.clone(),
        }
    }

    /// Cumulative sampling distribution at `diameter`, clamped to the
    /// window: the inverse of [`sample`](Self::sample), *not* the passing
    /// curve (see [`volume_passing`](Self::volume_passing)).
    #[must_use]
    pub fn cumulative(&self, diameter: f64) -> f64 {
        let d = diameter.clamp(self.min_diameter, self.max_diameter);
        match &self.kind {
            CdfKind::Fuller { q } => {
                let lo = self.min_diameter.powf(-q);
                let hi = self.max_diameter.powf(-q);
                (lo - d.powf(-q)) / (lo - hi)
            }
            CdfKind::Piecewise(pw) => {
                let i = pw
                    .diameters
                    .windows(2)
                    .position(|w| w[0] <= d && d <= w[1])
                    .unwrap_or(pw.kappa.len() - 1);
                let d0 = pw.diameters[i];
                pw.cdf[i] + pw.kappa[i] * (1.0 / (d0 * d0) - 1.0 / (d * d)) / 2.0
            }
        }
    }

    /// Fraction of the in-window particle *volume* at or below `diameter`,
    /// clamped to the window.
    ///
    /// For Fuller gradations this is the passing curve re-based to span
    /// `[0, 1]` across the window; for sieve gradations it is the re-based
    /// curve itself. This is the target curve a gradation report compares
    /// the generated population against; it differs from
    /// [`cumulative`](Self::cumulative), which weights draws by count.
    #[must_use]
    pub fn volume_passing(&self, diameter: f64) -> f64 {
        let d = diameter.clamp(self.min_diameter, self.max_diameter);
        match &self.kind {
            CdfKind::Fuller { q } => {
                let exponent = 3.0 - q;
                let lo = self.min_diameter.powf(exponent);
                let hi = self.max_diameter.powf(exponent);
                (d.powf(exponent) - lo) / (hi - lo)
            }
            CdfKind::Piecewise(pw) => {
                let i = pw
                    .diameters
                    .windows(2)
                    .position(|w| w[0] <= d && d <= w[1])
                    .unwrap_or(pw.kappa.len() - 1);
                let (d0, d1) = (pw.diameters[i], pw.diameters[i + 1]);
                let (p0, p1) = (pw.passing[i], pw.passing[i + 1]);
                p0 + (p1 - p0) / (d1 - d0) * (d - d0)
            }
        }
    }

    /// Invert a uniform variate `u` in `[0, 1)` to a diameter.
    ///
    /// Monotone in `u`: 0 maps to the window minimum, 1 to the maximum.
    #[must_use]
    pub fn sample(&self, u: f64) -> f64 {
        let u = u.clamp(0.0, 1.0);
        match &self.kind {
            CdfKind::Fuller { q } => {
                let lo = self.min_diameter.powf(-q);
                let hi = self.max_diameter.powf(-q);
                (lo - u * (lo - hi)).powf(-1.0 / q)
            }
            CdfKind::Piecewise(pw) => {
                // Find the segment whose CDF range contains u, skipping flat
                // plateaus (zero kappa, no mass to invert).
                let i = pw
                    .cdf
                    .windows(2)
                    .position(|w| w[0] <= u && u <= w[1] && w[1] > w[0])
                    .unwrap_or(pw.kappa.len() - 1);
                let d0 = pw.diameters[i];
                let inv_sq = 1.0 / (d0 * d0) - 2.0 * (u - pw.cdf[i]) / pw.kappa[i];
                inv_sq.powf(-0.5)
            }
        }
    }
}

/// A uniform variate in `[0, 1)` from 53 random bits.
#[must_use]
pub fn uniform_unit(rng: &mut dyn rand::RngCore) -> f64 {
    #[allow(clippy::cast_precision_loss)] // 53 bits fit an f64 mantissa exactly
    {
        (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// The particle volume budget for one generation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleTarget {
    /// Volume fraction of all particles in the mix (from the mix design).
    pub particle_fraction: f64,
    /// Share of the particle volume inside the simulated diameter window.
    pub window_fraction: f64,
    /// Volume fraction of simulated particles: `particle_fraction x
    /// window_fraction`.
    pub simulated_fraction: f64,
    /// Target particle volume: `simulated_fraction x domain_volume`.
    pub target_volume: f64,
}

/// Compute the particle volume budget from the mix design, the
/// distribution, and the domain volume.
///
/// # Errors
///
/// Returns [`GradationError::NonPositiveDomainVolume`] for a degenerate
/// domain and any mix validation error.
pub fn compute_target(
    mix: &MixDesign,
    cdf: &ParticleCdf,
    domain_volume: f64,
) -> GradationResult<ParticleTarget> {
    mix.validate()?;
    if !domain_volume.is_finite() || domain_volume <= 0.0 {
        return Err(GradationError::NonPositiveDomainVolume {
            volume: domain_volume,
        });
    }

    let particle_fraction = mix.particle_volume_fraction();
    let window_fraction = cdf.window_fraction();
    let simulated_fraction = particle_fraction * window_fraction;
    Ok(ParticleTarget {
        particle_fraction,
        window_fraction,
        simulated_fraction,
        target_volume: simulated_fraction * domain_volume,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;

    fn fuller_cdf() -> ParticleCdf {
        ParticleCdf::build(&GradationConfig::fuller(0.05, 0.2, 0.5)).unwrap()
    }

    #[test]
    fn test_fuller_window_fraction() {
        // 1 - (0.05 / 0.2)^0.5 = 0.5
        assert_relative_eq!(fuller_cdf().window_fraction(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_fuller_sample_spans_window() {
        let cdf = fuller_cdf();
        assert_relative_eq!(cdf.sample(0.0), 0.05, epsilon = 1e-12);
        assert_relative_eq!(cdf.sample(1.0), 0.2, epsilon = 1e-12);
        let mid = cdf.sample(0.5);
        assert!(mid > 0.05 && mid < 0.2);
    }

    #[test]
    fn test_fuller_sample_is_monotone() {
        let cdf = fuller_cdf();
        let mut last = 0.0;
        for i in 0..=100 {
            let d = cdf.sample(f64::from(i) / 100.0);
            assert!(d >= last);
            last = d;
        }
    }

    #[test]
    fn test_fuller_cumulative_inverts_sample() {
        let cdf = fuller_cdf();
        for &u in &[0.1, 0.35, 0.6, 0.92] {
            assert_relative_eq!(cdf.cumulative(cdf.sample(u)), u, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_volume_passing_differs_from_sampling_cdf() {
        // Sampling weights draws by count, so it runs well ahead of the
        // volume curve: small diameters are numerous but carry little
        // volume.
        let cdf = fuller_cdf();
        let expected = (0.1_f64.sqrt() - 0.05_f64.sqrt()) / (0.2_f64.sqrt() - 0.05_f64.sqrt());
        assert_relative_eq!(cdf.volume_passing(0.1), expected, epsilon = 1e-12);
        assert!(cdf.cumulative(0.1) > cdf.volume_passing(0.1) + 0.3);

        assert_relative_eq!(cdf.volume_passing(0.05), 0.0, epsilon = 1e-12);
        assert_relative_eq!(cdf.volume_passing(0.2), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sieve_volume_passing_is_the_rebased_curve() {
        let curve = SieveCurve::new(
            vec![0.02, 0.05, 0.1, 0.2, 0.4],
            vec![0.0, 0.1, 0.4, 0.8, 1.0],
        )
        .unwrap();
        let cdf = ParticleCdf::build(&GradationConfig::sieve(0.05, 0.2, curve)).unwrap();

        // Window captures passing 0.1 .. 0.8; 0.1 re-bases to 3/7.
        assert_relative_eq!(cdf.volume_passing(0.1), 3.0 / 7.0, epsilon = 1e-12);
        assert_relative_eq!(cdf.volume_passing(0.05), 0.0, epsilon = 1e-12);
        assert_relative_eq!(cdf.volume_passing(0.2), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_leading_segment_samples_finite() {
        // A curve with no mass below 0.1: the first rebased segment is
        // flat, so inversion must skip it instead of dividing by zero.
        let curve =
            SieveCurve::new(vec![0.05, 0.1, 0.2], vec![0.0, 0.0, 1.0]).unwrap();
        let cdf = ParticleCdf::build(&GradationConfig::sieve(0.05, 0.2, curve)).unwrap();

        let lowest = cdf.sample(0.0);
        assert!(lowest.is_finite());
        assert_relative_eq!(lowest, 0.1, epsilon = 1e-12);

        for i in 0..=20 {
            let d = cdf.sample(f64::from(i) / 20.0);
            assert!(d.is_finite());
            assert!((0.1..=0.2).contains(&d));
        }
    }

    #[test]
    fn test_uniform_unit_stays_in_range() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(8);
        for _ in 0..512 {
            let u = uniform_unit(&mut rng);
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_sieve_cdf_is_monotone_and_reaches_one() {
        let curve = SieveCurve::new(
            vec![0.02, 0.05, 0.1, 0.2, 0.4],
            vec![0.0, 0.1, 0.4, 0.8, 1.0],
        )
        .unwrap();
        let cdf = ParticleCdf::build(&GradationConfig::sieve(0.05, 0.2, curve)).unwrap();

        let values = cdf.values();
        for w in values.windows(2) {
            assert!(w[1] >= w[0]);
        }
        assert_relative_eq!(values[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(*values.last().unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(cdf.cumulative(0.2), 1.0, epsilon = 1e-12);
        // Window captures passing 0.1 .. 0.8.
        assert_relative_eq!(cdf.window_fraction(), 0.7, epsilon = 1e-12);
    }

    #[test]
    fn test_sieve_build_is_deterministic() {
        let curve = SieveCurve::new(
            vec![0.02, 0.05, 0.1, 0.2, 0.4],
            vec![0.0, 0.1, 0.4, 0.8, 1.0],
        )
        .unwrap();
        let config = GradationConfig::sieve(0.05, 0.2, curve);
        let a = ParticleCdf::build(&config).unwrap();
        let b = ParticleCdf::build(&config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_two_point_sieve_matches_fuller_exponent_one() {
        let curve = SieveCurve::new(vec![0.05, 0.2], vec![0.0, 1.0]).unwrap();
        let sieve = ParticleCdf::build(&GradationConfig::sieve(0.05, 0.2, curve)).unwrap();
        let fuller = ParticleCdf::build(&GradationConfig::fuller(0.05, 0.2, 1.0)).unwrap();

        for i in 0..=20 {
            let u = f64::from(i) / 20.0;
            assert_relative_eq!(sieve.sample(u), fuller.sample(u), epsilon = 1e-10);
        }
    }

    #[test]
    fn test_validate_rejects_inverted_window() {
        let config = GradationConfig::fuller(0.2, 0.05, 0.5);
        assert!(matches!(
            config.validate(),
            Err(GradationError::InvalidDiameterWindow { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_exponent() {
        let config = GradationConfig::fuller(0.05, 0.2, 3.5);
        assert!(matches!(
            config.validate(),
            Err(GradationError::InvalidFullerExponent { .. })
        ));
    }

    #[test]
    fn test_target_volume_scales_with_domain() {
        let target = compute_target(&MixDesign::default(), &fuller_cdf(), 2.0).unwrap();
        assert_relative_eq!(target.particle_fraction, 1.0, epsilon = 1e-12);
        assert_relative_eq!(target.simulated_fraction, 0.5, epsilon = 1e-12);
        assert_relative_eq!(target.target_volume, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_target_rejects_degenerate_domain() {
        assert!(matches!(
            compute_target(&MixDesign::default(), &fuller_cdf(), 0.0),
            Err(GradationError::NonPositiveDomainVolume { .. })
        ));
    }
}
