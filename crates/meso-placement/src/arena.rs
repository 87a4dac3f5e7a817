//! Slot arena for confirmed particles.

use meso_gradation::DiameterList;
use meso_types::{sphere_volume, Particle, Point3};

/// The placed-particle set: one pre-sized slot per diameter-list entry.
///
/// Slots are index-aligned with the diameter list and never reallocated
/// mid-run. Unconfirmed slots hold a sentinel position guaranteed outside
/// the domain, so overlap tests against the full slot array never falsely
/// hit an unplaced particle. Confirmation is monotonic and in list order: a
/// confirmed particle is never moved again.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleArena {
    slots: Vec<Particle>,
    confirmed: usize,
}

impl ParticleArena {
    /// Create an arena with one sentinel-positioned slot per diameter.
    #[must_use]
    pub fn new(diameters: &DiameterList, sentinel: Point3<f64>) -> Self {
        let slots = diameters
            .diameters()
            .iter()
            .map(|&d| Particle::new(sentinel, d))
            .collect();
        Self {
            slots,
            confirmed: 0,
        }
    }

    /// Total number of slots.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when the arena holds no slots.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of confirmed particles.
    #[inline]
    #[must_use]
    pub const fn confirmed_count(&self) -> usize {
        self.confirmed
    }

    /// True when every slot is confirmed.
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.confirmed == self.slots.len()
    }

    /// All slots, confirmed and sentinel-positioned alike.
    ///
    /// Safe to test candidates against as a whole: sentinel slots are too
    /// far away to conflict.
    #[must_use]
    pub fn slots(&self) -> &[Particle] {
        &self.slots
    }

    /// The confirmed prefix of the slot array, in placement order.
    #[must_use]
    pub fn confirmed(&self) -> &[Particle] {
        &self.slots[..self.confirmed]
    }

    /// Diameter reserved for the next unconfirmed slot at `index`.
    #[inline]
    #[must_use]
    pub fn diameter(&self, index: usize) -> f64 {
        self.slots[index].diameter
    }

    /// Confirm the next slot in list order at `center` and return its index.
    ///
    /// # Panics
    ///
    /// Panics when every slot is already confirmed.
    pub fn confirm_next(&mut self, center: Point3<f64>) -> usize {
        assert!(self.confirmed < self.slots.len(), "arena already complete");
        let index = self.confirmed;
        self.slots[index].center = center;
        self.confirmed += 1;
        index
    }

    /// Cumulative volume of the confirmed particles.
    #[must_use]
    pub fn placed_volume(&self) -> f64 {
        self.confirmed()
            .iter()
            .map(|p| sphere_volume(p.diameter))
            .sum()
    }
}
