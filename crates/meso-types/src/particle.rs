//! Spherical particle primitive.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Volume of a sphere with the given diameter.
///
/// # Example
///
/// ```
/// use meso_types::sphere_volume;
///
/// let v = sphere_volume(2.0);
/// assert!((v - 4.0 / 3.0 * std::f64::consts::PI).abs() < 1e-12);
/// ```
#[inline]
#[must_use]
pub fn sphere_volume(diameter: f64) -> f64 {
    std::f64::consts::PI * diameter * diameter * diameter / 6.0
}

/// A spherical particle placed in the domain.
///
/// Particles are index-aligned with the diameter list that produced them:
/// slot `i` of the placed set holds the particle for diameter `i`.
///
/// # Example
///
/// ```
/// use meso_types::{Particle, Point3};
///
/// let a = Particle::new(Point3::new(0.0, 0.0, 0.0), 1.0);
/// let b = Particle::new(Point3::new(2.0, 0.0, 0.0), 1.0);
///
/// // Surfaces are 1.0 apart: centers 2.0, radii 0.5 each.
/// assert!((a.gap_to(&b) - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Particle {
    /// Center of the particle.
    pub center: Point3<f64>,
    /// Diameter of the particle.
    pub diameter: f64,
}

impl Particle {
    /// Create a new particle from center and diameter.
    #[inline]
    #[must_use]
    pub const fn new(center: Point3<f64>, diameter: f64) -> Self {
        Self { center, diameter }
    }

    /// Radius of the particle.
    #[inline]
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    /// Volume of the particle.
    #[inline]
    #[must_use]
    pub fn volume(&self) -> f64 {
        sphere_volume(self.diameter)
    }

    /// Surface-to-surface gap between two particles.
    ///
    /// Negative when the spheres overlap.
    #[inline]
    #[must_use]
    pub fn gap_to(&self, other: &Self) -> f64 {
        (other.center - self.center).norm() - self.radius() - other.radius()
    }

    /// Check whether two particles keep at least `clearance` between their
    /// surfaces.
    #[inline]
    #[must_use]
    pub fn clear_of(&self, other: &Self, clearance: f64) -> bool {
        self.gap_to(other) >= clearance
    }
}
