//! Batch orchestrator: optimistic parallel search with serial repair.
//!
//! The clearance invariant is inherently sequential (every particle's
//! validity depends on all previously confirmed ones), so the orchestrator
//! splits each batch into two phases: a parallel search phase where every
//! worker places its particle against an immutable snapshot of the arena at
//! batch start, and a serial replay phase that re-checks each candidate
//! against the peers accepted earlier in the same batch and re-places the
//! few that now conflict. Workers share no mutable state and the iteration
//! cap is only written between batches, so no locks are needed.

use meso_gradation::DiameterList;
use meso_types::Particle;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::arena::ParticleArena;
use crate::config::PlacementConfig;
use crate::domain::DomainAdapter;
use crate::engine::{conflicts, place_particle, PlacementSample};
use crate::error::{PlacementError, PlacementResult};

/// Statistics from one placement run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementStats {
    /// Number of particles placed.
    pub particle_count: usize,
    /// Target particle volume the diameter list was generated against.
    pub target_volume: f64,
    /// Cumulative volume of the placed particles.
    pub placed_volume: f64,
    /// High-water mark of the adaptive iteration cap.
    pub iteration_cap_high_water: usize,
    /// Total candidate draws across the run.
    pub total_iterations: usize,
    /// Candidates discarded and re-placed during serial repair.
    pub repairs: usize,
    /// Batches dispatched to the parallel phase.
    pub parallel_batches: usize,
}

impl std::fmt::Display for PlacementStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Placement: {} particles, volume {:.6} of {:.6} target \
             ({} iterations, cap high-water {}, {} repairs)",
            self.particle_count,
            self.placed_volume,
            self.target_volume,
            self.total_iterations,
            self.iteration_cap_high_water,
            self.repairs
        )
    }
}

/// One worker's answer for a batch slot.
#[derive(Debug, Clone, Copy)]
struct WorkerOutcome {
    /// Accepted center, or `None` when the iteration ceiling was exhausted.
    center: Option<meso_types::Point3<f64>>,
    /// Candidate draws spent, across cap doublings.
    iterations: usize,
}

/// Place every particle of the diameter list into the domain.
///
/// Runs fully serially for `workers = 1` or short lists; otherwise
/// partitions the list into `batch_count` batches and runs the
/// optimistic-parallel/serial-repair protocol per batch. Either way the
/// returned arena satisfies the clearance invariant for every confirmed
/// pair and against the domain boundary.
///
/// # Errors
///
/// Returns [`PlacementError::InvalidConfig`] for a bad configuration and
/// [`PlacementError::Exhausted`] when a particle cannot be placed within
/// the iteration ceiling. No partial arena is ever returned.
pub fn place_all(
    domain: &DomainAdapter,
    diameters: &DiameterList,
    config: &PlacementConfig,
) -> PlacementResult<(ParticleArena, PlacementStats)> {
    config.validate()?;

    let clearance = config.offset_coefficient * diameters.window_min();
    let max_diameter = diameters.window_max();
    let mut arena = ParticleArena::new(diameters, domain.sentinel());

    info!(
        particles = arena.len(),
        target_volume = diameters.target_volume(),
        clearance,
        workers = config.workers,
        "Starting particle placement"
    );

    let mut run = RunState {
        domain,
        config,
        clearance,
        max_diameter,
        cap: config.initial_iteration_cap,
        total_iterations: 0,
        repairs: 0,
        parallel_batches: 0,
    };

    let total = arena.len();
    if config.workers > 1 && total >= config.parallel_threshold {
        let batch_len = total.div_ceil(config.batch_count);
        let mut start = 0;
        while start < total {
            let end = (start + batch_len).min(total);
            if end - start < config.parallel_threshold {
                run.place_serial(&mut arena, start..end)?;
            } else {
                run.place_batch_parallel(&mut arena, start..end)?;
            }
            start = end;
        }
    } else {
        run.place_serial(&mut arena, 0..total)?;
    }

    let stats = PlacementStats {
        particle_count: arena.confirmed_count(),
        target_volume: diameters.target_volume(),
        placed_volume: arena.placed_volume(),
        iteration_cap_high_water: run.cap,
        total_iterations: run.total_iterations,
        repairs: run.repairs,
        parallel_batches: run.parallel_batches,
    };
    info!(%stats, "Placement complete");
    Ok((arena, stats))
}

/// Mutable run state threaded through the batches.
struct RunState<'a> {
    domain: &'a DomainAdapter,
    config: &'a PlacementConfig,
    clearance: f64,
    max_diameter: f64,
    /// Adaptive soft cap: running maximum of iterations any placement
    /// needed. Read-only within a batch, written between batches.
    cap: usize,
    total_iterations: usize,
    repairs: usize,
    parallel_batches: usize,
}

impl RunState<'_> {
    /// Place a contiguous slot range serially, confirming in list order.
    fn place_serial(
        &mut self,
        arena: &mut ParticleArena,
        range: std::ops::Range<usize>,
    ) -> PlacementResult<()> {
        for index in range {
            let diameter = arena.diameter(index);
            let mut rng = self.slot_rng(index, 0);
            let mut cap = self.cap;
            let sample = place_with_doubling(
                self.domain,
                arena.slots(),
                diameter,
                self.max_diameter,
                self.clearance,
                &mut cap,
                self.config.iteration_ceiling,
                rng.as_mut(),
            )
            .map_err(|iterations| PlacementError::Exhausted {
                index,
                diameter,
                iterations,
            })?;
            self.cap = cap;
            self.total_iterations += sample.iterations;
            arena.confirm_next(sample.center);
        }
        Ok(())
    }

    /// Place one batch: parallel search against a snapshot, then serial
    /// replay with conflict repair.
    fn place_batch_parallel(
        &mut self,
        arena: &mut ParticleArena,
        range: std::ops::Range<usize>,
    ) -> PlacementResult<()> {
        self.parallel_batches += 1;
        let snapshot: Vec<Particle> = arena.slots().to_vec();
        let batch_cap = self.cap;

        let outcomes: Vec<WorkerOutcome> = range
            .clone()
            .into_par_iter()
            .map(|index| {
                let diameter = snapshot[index].diameter;
                let mut rng = self.slot_rng(index, 0);
                let mut cap = batch_cap;
                match place_with_doubling(
                    self.domain,
                    &snapshot,
                    diameter,
                    self.max_diameter,
                    self.clearance,
                    &mut cap,
                    self.config.iteration_ceiling,
                    rng.as_mut(),
                ) {
                    Ok(sample) => WorkerOutcome {
                        center: Some(sample.center),
                        iterations: sample.iterations,
                    },
                    // No cancellation mid-batch: report the marker and let
                    // the replay phase surface it.
                    Err(iterations) => WorkerOutcome {
                        center: None,
                        iterations,
                    },
                }
            })
            .collect();

        // Serial replay in list order. The first candidate stands as-is;
        // later ones are re-checked against everything the arena has
        // confirmed so far, which covers the snapshot plus the peers
        // accepted earlier in this replay.
        let mut repaired = 0_usize;
        for (offset, outcome) in outcomes.iter().enumerate() {
            let index = range.start + offset;
            let diameter = arena.diameter(index);
            self.total_iterations += outcome.iterations;

            let center = outcome.center.ok_or(PlacementError::Exhausted {
                index,
                diameter,
                iterations: outcome.iterations,
            })?;

            let accepted = if offset > 0
                && conflicts(
                    &center,
                    diameter,
                    arena.slots(),
                    self.max_diameter,
                    self.clearance,
                ) {
                // The independent worker could not see this conflict;
                // discard its candidate and re-place synchronously against
                // the up-to-date arena.
                repaired += 1;
                let mut rng = self.slot_rng(index, 1);
                let mut cap = self.cap;
                let sample = place_with_doubling(
                    self.domain,
                    arena.slots(),
                    diameter,
                    self.max_diameter,
                    self.clearance,
                    &mut cap,
                    self.config.iteration_ceiling,
                    rng.as_mut(),
                )
                .map_err(|iterations| PlacementError::Exhausted {
                    index,
                    diameter,
                    iterations,
                })?;
                self.cap = cap;
                self.total_iterations += sample.iterations;
                sample.center
            } else {
                center
            };

            // Cap adapts to what the workers actually needed.
            self.cap = self
                .cap
                .max(outcome.iterations.min(self.config.iteration_ceiling));
            arena.confirm_next(accepted);
        }

        self.repairs += repaired;
        debug!(
            batch_start = range.start,
            batch_len = range.len(),
            repaired,
            cap = self.cap,
            "Batch replayed"
        );
        Ok(())
    }

    /// Per-slot random stream: deterministic for a seeded run regardless of
    /// batch structure, thread-local otherwise. `salt` separates the repair
    /// stream from the worker stream.
    fn slot_rng(&self, slot: usize, salt: u64) -> Box<dyn RngCore> {
        match self.config.seed {
            Some(seed) => {
                let stream = (slot as u64 + 1)
                    .wrapping_mul(0x9E37_79B9_7F4A_7C15)
                    .wrapping_add(salt);
                Box::new(StdRng::seed_from_u64(seed ^ stream))
            }
            None => Box::new(rand::thread_rng()),
        }
    }
}

/// Run the engine with the adaptive cap, doubling on exhaustion up to the
/// ceiling.
///
/// On success `cap` holds the running maximum of iterations required (it
/// never shrinks); on failure the total iterations spent are returned.
fn place_with_doubling(
    domain: &DomainAdapter,
    others: &[Particle],
    diameter: f64,
    max_diameter: f64,
    clearance: f64,
    cap: &mut usize,
    ceiling: usize,
    rng: &mut dyn RngCore,
) -> Result<PlacementSample, usize> {
    let mut spent = 0_usize;
    loop {
        match place_particle(domain, others, diameter, max_diameter, clearance, *cap, rng) {
            Some(sample) => {
                let iterations = spent + sample.iterations;
                *cap = (*cap).max(iterations.min(ceiling));
                return Ok(PlacementSample {
                    center: sample.center,
                    iterations,
                });
            }
            None => {
                spent += *cap;
                if *cap >= ceiling {
                    return Err(spent);
                }
                *cap = (*cap * 2).min(ceiling);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meso_gradation::{DiameterList, GradationConfig, ParticleCdf};
    use meso_types::DomainMesh;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup(target: f64) -> (DomainAdapter, DiameterList) {
        let domain = DomainAdapter::new(DomainMesh::unit_cube()).unwrap();
        let cdf = ParticleCdf::build(&GradationConfig::fuller(0.05, 0.2, 0.5)).unwrap();
        let mut rng = StdRng::seed_from_u64(77);
        let list = DiameterList::generate(target, &cdf, &mut rng);
        (domain, list)
    }

    fn assert_invariants(domain: &DomainAdapter, arena: &ParticleArena, clearance: f64) {
        let confirmed = arena.confirmed();
        for (i, a) in confirmed.iter().enumerate() {
            assert!(domain.contains(&a.center));
            assert!(domain.clear_of_boundary(&a.center, a.radius(), clearance));
            for b in &confirmed[i + 1..] {
                assert!(
                    a.clear_of(b, clearance),
                    "particles {i} and a later one overlap"
                );
            }
        }
    }

    #[test]
    fn test_serial_run_satisfies_invariants() {
        let (domain, list) = setup(0.2);
        let config = PlacementConfig::default().with_seed(11);
        let (arena, stats) = place_all(&domain, &list, &config).unwrap();

        assert!(arena.is_complete());
        assert_eq!(stats.particle_count, list.len());
        assert!(stats.placed_volume <= stats.target_volume);
        assert_eq!(stats.parallel_batches, 0);
        assert_invariants(&domain, &arena, config.offset_coefficient * 0.05);
    }

    #[test]
    fn test_parallel_run_satisfies_invariants() {
        let (domain, list) = setup(0.25);
        let config = PlacementConfig {
            workers: 4,
            parallel_threshold: 4,
            batch_count: 4,
            seed: Some(13),
            ..PlacementConfig::default()
        };
        let (arena, stats) = place_all(&domain, &list, &config).unwrap();

        assert!(arena.is_complete());
        assert!(stats.parallel_batches > 0);
        assert_invariants(&domain, &arena, config.offset_coefficient * 0.05);
    }

    #[test]
    fn test_worker_counts_agree_on_validity() {
        let (domain, list) = setup(0.2);
        for workers in [1, 4] {
            let config = PlacementConfig {
                workers,
                parallel_threshold: 4,
                seed: Some(29),
                ..PlacementConfig::default()
            };
            let (arena, _) = place_all(&domain, &list, &config).unwrap();
            assert_eq!(arena.confirmed_count(), list.len());
            assert_invariants(&domain, &arena, config.offset_coefficient * 0.05);
        }
    }

    #[test]
    fn test_seeded_serial_run_is_reproducible() {
        let (domain, list) = setup(0.15);
        let config = PlacementConfig::default().with_seed(41);
        let (a, _) = place_all(&domain, &list, &config).unwrap();
        let (b, _) = place_all(&domain, &list, &config).unwrap();
        assert_eq!(a.confirmed(), b.confirmed());
    }

    #[test]
    fn test_overpacked_domain_exhausts() {
        // Demand more volume than rejection sampling can pack into a unit
        // cube with generous clearance; a tight ceiling makes it fail fast.
        let (domain, list) = setup(0.45);
        let config = PlacementConfig {
            offset_coefficient: 1.0,
            iteration_ceiling: 200,
            seed: Some(3),
            ..PlacementConfig::default()
        };
        let err = place_all(&domain, &list, &config).unwrap_err();
        assert!(matches!(err, PlacementError::Exhausted { .. }));
    }

    #[test]
    fn test_cap_never_shrinks() {
        let (domain, list) = setup(0.3);
        let config = PlacementConfig::default().with_seed(55);
        let (_, stats) = place_all(&domain, &list, &config).unwrap();
        assert!(stats.iteration_cap_high_water >= config.initial_iteration_cap);
    }
}
