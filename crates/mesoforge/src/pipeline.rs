//! One-call generation driver.

use meso_gradation::{
    compute_target, gradation_report, DiameterList, GradationReport, ParticleCdf,
};
use meso_lattice::{extract_lattice, Lattice};
use meso_placement::{place_all, DomainAdapter, PlacementStats};
use meso_tetgen::tetrahedralize;
use meso_types::{DomainMesh, LatticeFacet, Particle, Point3, TetMesh};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::GenerationConfig;
use crate::error::GenerationResult;
use crate::stats::GenerationStats;

/// Evaluation points for the gradation report.
const REPORT_SAMPLES: usize = 64;

/// Placed particles and their gradation report, before tessellation.
///
/// Produced by [`generate_particles`]; useful when the external engine is
/// unavailable or the caller runs tessellation separately.
#[derive(Debug, Clone)]
pub struct ParticleAssembly {
    /// Confirmed particles in placement order (largest first).
    pub particles: Vec<Particle>,
    /// Simulated vs target passing curves.
    pub report: GradationReport,
    /// Placement-stage figures.
    pub placement: PlacementStats,
    /// Domain volume the target was computed against.
    pub domain_volume: f64,
}

/// The complete generated mesostructure.
#[derive(Debug, Clone)]
pub struct Mesostructure {
    /// Confirmed particles in placement order (largest first), index-aligned
    /// with the first `particles.len()` tessellation nodes.
    pub particles: Vec<Particle>,
    /// The tetrahedralization of particle centers and boundary points.
    pub mesh: TetMesh,
    /// Lattice facets, associations, and statistics.
    pub lattice: Lattice,
    /// Simulated vs target passing curves.
    pub report: GradationReport,
    /// Run-level statistics.
    pub stats: GenerationStats,
}

impl Mesostructure {
    /// Particle centers, index-aligned with [`diameters`](Self::diameters).
    #[must_use]
    pub fn centers(&self) -> Vec<Point3<f64>> {
        self.particles.iter().map(|p| p.center).collect()
    }

    /// Particle diameters, index-aligned with [`centers`](Self::centers).
    #[must_use]
    pub fn diameters(&self) -> Vec<f64> {
        self.particles.iter().map(|p| p.diameter).collect()
    }

    /// All lattice facets.
    #[must_use]
    pub fn facets(&self) -> &[LatticeFacet] {
        &self.lattice.facets
    }
}

/// Run the gradation and placement stages: derive the target particle
/// volume from the mix design, sample the diameter list, and place every
/// particle into the domain.
///
/// # Errors
///
/// Propagates configuration, gradation, and placement errors; see
/// [`GenerationError`](crate::GenerationError).
pub fn generate_particles(
    domain: DomainMesh,
    config: &GenerationConfig,
) -> GenerationResult<ParticleAssembly> {
    let (_, assembly) = place_into_domain(domain, config)?;
    Ok(assembly)
}

/// Run the full pipeline: gradation, placement, external
/// tetrahedralization, and lattice facet extraction.
///
/// # Errors
///
/// Propagates every stage error; see
/// [`GenerationError`](crate::GenerationError). Requires the configured
/// tetrahedralization binary to be runnable.
pub fn generate(
    domain: DomainMesh,
    config: &GenerationConfig,
) -> GenerationResult<Mesostructure> {
    let (adapter, assembly) = place_into_domain(domain, config)?;

    let centers: Vec<Point3<f64>> = assembly.particles.iter().map(|p| p.center).collect();
    let mesh = tetrahedralize(
        &centers,
        adapter.boundary_points(),
        adapter.boundary_triangles(),
        &config.tetgen,
    )?;
    let lattice = extract_lattice(&mesh, centers.len())?;

    let stats = GenerationStats {
        domain_volume: assembly.domain_volume,
        placement: assembly.placement,
        lattice: lattice.stats,
    };
    info!(%stats, "Generation complete");

    Ok(Mesostructure {
        particles: assembly.particles,
        mesh,
        lattice,
        report: assembly.report,
        stats,
    })
}

fn place_into_domain(
    domain: DomainMesh,
    config: &GenerationConfig,
) -> GenerationResult<(DomainAdapter, ParticleAssembly)> {
    config.validate()?;

    let cdf = ParticleCdf::build(&config.gradation)?;
    let adapter = DomainAdapter::new(domain)?;
    let target = compute_target(&config.mix, &cdf, adapter.volume())?;

    info!(
        domain_volume = adapter.volume(),
        particle_fraction = target.particle_fraction,
        target_volume = target.target_volume,
        "Starting particle generation"
    );

    let mut rng = match config.placement.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let list = DiameterList::generate(target.target_volume, &cdf, &mut rng);
    let report = gradation_report(&list, &cdf, REPORT_SAMPLES);

    let (arena, placement) = place_all(&adapter, &list, &config.placement)?;

    let assembly = ParticleAssembly {
        particles: arena.confirmed().to_vec(),
        report,
        placement,
        domain_volume: adapter.volume(),
    };
    Ok((adapter, assembly))
}
