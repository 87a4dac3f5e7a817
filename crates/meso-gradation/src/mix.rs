//! Mix design: component contents, densities, and the particle volume
//! fraction they leave.

use crate::error::{GradationError, GradationResult};

/// A mix design expressed as component contents and densities.
///
/// Contents are masses per unit volume of mix; densities are masses per
/// unit volume of component. Any consistent unit system works, because only
/// the content/density ratios enter the computation. Water is specified
/// through the water/cement ratio.
///
/// The particle volume fraction is whatever remains of unity after cement,
/// water, supplementary binders, and entrained air:
///
/// ```
/// use meso_gradation::MixDesign;
///
/// // An empty mix is all particles.
/// let mix = MixDesign::default();
/// assert!((mix.particle_volume_fraction() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixDesign {
    /// Cement content (mass per unit mix volume).
    pub cement_content: f64,
    /// Cement density.
    pub cement_density: f64,
    /// Water to cement mass ratio.
    pub water_cement_ratio: f64,
    /// Water density.
    pub water_density: f64,
    /// Fly ash content.
    pub flyash_content: f64,
    /// Fly ash density.
    pub flyash_density: f64,
    /// Silica fume content.
    pub silica_fume_content: f64,
    /// Silica fume density.
    pub silica_fume_density: f64,
    /// Other supplementary cementitious material content.
    pub scm_content: f64,
    /// Supplementary cementitious material density.
    pub scm_density: f64,
    /// Entrained air volume fraction, in [0, 1].
    pub air_fraction: f64,
}

impl Default for MixDesign {
    fn default() -> Self {
        Self {
            cement_content: 0.0,
            cement_density: 3150.0,
            water_cement_ratio: 0.0,
            water_density: 1000.0,
            flyash_content: 0.0,
            flyash_density: 2300.0,
            silica_fume_content: 0.0,
            silica_fume_density: 2200.0,
            scm_content: 0.0,
            scm_density: 2650.0,
            air_fraction: 0.0,
        }
    }
}

impl MixDesign {
    /// Create an empty mix design (all particles, no binder phases).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A typical structural concrete mix in SI units (kg/m^3).
    ///
    /// 400 kg/m^3 cement at w/c 0.42 with 3% entrained air, leaving roughly
    /// two thirds of the volume to aggregate particles.
    #[must_use]
    pub fn typical_structural() -> Self {
        Self {
            cement_content: 400.0,
            water_cement_ratio: 0.42,
            air_fraction: 0.03,
            ..Self::default()
        }
    }

    /// Sets the cement content.
    #[must_use]
    pub const fn with_cement_content(mut self, content: f64) -> Self {
        self.cement_content = content;
        self
    }

    /// Sets the water/cement ratio.
    #[must_use]
    pub const fn with_water_cement_ratio(mut self, ratio: f64) -> Self {
        self.water_cement_ratio = ratio;
        self
    }

    /// Sets the fly ash content.
    #[must_use]
    pub const fn with_flyash_content(mut self, content: f64) -> Self {
        self.flyash_content = content;
        self
    }

    /// Sets the silica fume content.
    #[must_use]
    pub const fn with_silica_fume_content(mut self, content: f64) -> Self {
        self.silica_fume_content = content;
        self
    }

    /// Sets the supplementary cementitious material content.
    #[must_use]
    pub const fn with_scm_content(mut self, content: f64) -> Self {
        self.scm_content = content;
        self
    }

    /// Sets the entrained air fraction.
    #[must_use]
    pub const fn with_air_fraction(mut self, fraction: f64) -> Self {
        self.air_fraction = fraction;
        self
    }

    /// Volume fraction of each non-particle phase, then the remainder.
    ///
    /// Assumes a validated mix; call [`validate`](Self::validate) first when
    /// the values come from user input.
    #[must_use]
    pub fn particle_volume_fraction(&self) -> f64 {
        let cement = self.cement_content / self.cement_density;
        let flyash = self.flyash_content / self.flyash_density;
        let silica = self.silica_fume_content / self.silica_fume_density;
        let scm = self.scm_content / self.scm_density;
        let water = self.water_cement_ratio * self.cement_content / self.water_density;
        1.0 - cement - flyash - silica - scm - water - self.air_fraction
    }

    /// Validate contents, densities, and the resulting particle fraction.
    ///
    /// # Errors
    ///
    /// Returns [`GradationError::InvalidMixComponent`] for a negative
    /// content, non-positive density, or out-of-range air fraction, and
    /// [`GradationError::ParticleFractionOutOfRange`] when the mix leaves
    /// no valid particle fraction.
    pub fn validate(&self) -> GradationResult<()> {
        let contents = [
            ("cement_content", self.cement_content),
            ("flyash_content", self.flyash_content),
            ("silica_fume_content", self.silica_fume_content),
            ("scm_content", self.scm_content),
            ("water_cement_ratio", self.water_cement_ratio),
        ];
        for (component, value) in contents {
            if !value.is_finite() || value < 0.0 {
                return Err(GradationError::InvalidMixComponent { component, value });
            }
        }

        let densities = [
            ("cement_density", self.cement_density),
            ("water_density", self.water_density),
            ("flyash_density", self.flyash_density),
            ("silica_fume_density", self.silica_fume_density),
            ("scm_density", self.scm_density),
        ];
        for (component, value) in densities {
            if !value.is_finite() || value <= 0.0 {
                return Err(GradationError::InvalidMixComponent { component, value });
            }
        }

        if !(0.0..=1.0).contains(&self.air_fraction) {
            return Err(GradationError::InvalidMixComponent {
                component: "air_fraction",
                value: self.air_fraction,
            });
        }

        let fraction = self.particle_volume_fraction();
        if !(0.0..=1.0).contains(&fraction) {
            return Err(GradationError::ParticleFractionOutOfRange { fraction });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_mix_is_all_particles() {
        let mix = MixDesign::default();
        assert!(mix.validate().is_ok());
        assert_relative_eq!(mix.particle_volume_fraction(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_typical_structural_fraction() {
        let mix = MixDesign::typical_structural();
        assert!(mix.validate().is_ok());
        // 1 - 400/3150 - 0.42*400/1000 - 0.03
        let expected = 1.0 - 400.0 / 3150.0 - 0.42 * 400.0 / 1000.0 - 0.03;
        assert_relative_eq!(mix.particle_volume_fraction(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_validate_rejects_negative_content() {
        let mix = MixDesign::default().with_cement_content(-1.0);
        assert_eq!(
            mix.validate(),
            Err(GradationError::InvalidMixComponent {
                component: "cement_content",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_validate_rejects_overfull_mix() {
        // Air alone fills the volume, leaving a negative particle fraction
        // once cement and water are added.
        let mix = MixDesign::typical_structural().with_air_fraction(0.9);
        assert!(matches!(
            mix.validate(),
            Err(GradationError::ParticleFractionOutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_density() {
        let mut mix = MixDesign::default();
        mix.cement_density = 0.0;
        assert!(matches!(
            mix.validate(),
            Err(GradationError::InvalidMixComponent {
                component: "cement_density",
                ..
            })
        ));
    }
}
