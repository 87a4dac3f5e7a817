//! Diameter list generation by inverse-CDF sampling.

use rand::RngCore;
use tracing::debug;

use meso_types::sphere_volume;

use crate::distribution::{uniform_unit, ParticleCdf};

/// The ordered list of particle diameters to place, largest first.
///
/// Diameters are drawn from the distribution until their cumulative sphere
/// volume would meet or exceed the target; the final overshooting draw is
/// discarded, not rescaled. The descending order is established before the
/// list is ever observable and is a placement contract: large particles are
/// placed while space is least constrained.
#[derive(Debug, Clone, PartialEq)]
pub struct DiameterList {
    diameters: Vec<f64>,
    target_volume: f64,
    total_volume: f64,
    discarded: Option<f64>,
    window_min: f64,
    window_max: f64,
}

impl DiameterList {
    /// Generate the list for a target particle volume.
    ///
    /// Randomness is injected so callers can seed for reproducibility. A
    /// non-positive target yields an empty list.
    #[must_use]
    pub fn generate(target_volume: f64, cdf: &ParticleCdf, rng: &mut dyn RngCore) -> Self {
        let mut diameters = Vec::new();
        let mut total_volume = 0.0;
        let mut discarded = None;

        while total_volume < target_volume {
            let u = uniform_unit(rng);
            let diameter = cdf.sample(u);
            let volume = sphere_volume(diameter);
            if total_volume + volume >= target_volume {
                discarded = Some(diameter);
                break;
            }
            diameters.push(diameter);
            total_volume += volume;
        }

        // Largest-first placement order, fixed here once: no consumer sorts.
        diameters.sort_by(|a, b| b.total_cmp(a));

        debug!(
            particles = diameters.len(),
            total_volume,
            target_volume,
            "Generated diameter list"
        );

        Self {
            diameters,
            target_volume,
            total_volume,
            discarded,
            window_min: cdf.min_diameter(),
            window_max: cdf.max_diameter(),
        }
    }

    /// Number of diameters in the list.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.diameters.len()
    }

    /// True when no particle fits the target volume.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diameters.is_empty()
    }

    /// The diameters, descending.
    #[must_use]
    pub fn diameters(&self) -> &[f64] {
        &self.diameters
    }

    /// The target particle volume the list was generated against.
    #[inline]
    #[must_use]
    pub const fn target_volume(&self) -> f64 {
        self.target_volume
    }

    /// Cumulative sphere volume of all diameters in the list.
    ///
    /// Always at most [`target_volume`](Self::target_volume); adding the
    /// discarded draw would meet or exceed it.
    #[inline]
    #[must_use]
    pub const fn total_volume(&self) -> f64 {
        self.total_volume
    }

    /// The final draw that overshot the target, if any.
    #[inline]
    #[must_use]
    pub const fn discarded_draw(&self) -> Option<f64> {
        self.discarded
    }

    /// Minimum diameter of the window the list was sampled from.
    #[inline]
    #[must_use]
    pub const fn window_min(&self) -> f64 {
        self.window_min
    }

    /// Maximum diameter of the window the list was sampled from.
    #[inline]
    #[must_use]
    pub const fn window_max(&self) -> f64 {
        self.window_max
    }
}
