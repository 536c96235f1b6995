// ImpactRisk - Asteroid Impact Consequence & Deflection Assessment
// Library entry point: resolve -> energy -> classify -> zones -> casualties -> report

pub mod casualty;
pub mod catalog;
pub mod damage;
pub mod deflection;
pub mod error;
pub mod orbital;
pub mod physics_engine;
pub mod report;
pub mod resolver;
pub mod site;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub use catalog::{CatalogRecord, SmallBodyCatalog, StaticCatalog};
pub use error::{ImpactError, Result};
pub use physics_engine::{Composition, ExponentialAtmosphere, ImpactType};
pub use report::ImpactReport;
pub use resolver::{resolve, AsteroidInput, ResolvedInputs, ScenarioInput};

use casualty::estimate_casualties;
use damage::generate_damage_zones;
use deflection::assess_deflection;
use orbital::OrbitalAnalysis;
use physics_engine::{calculate_energy, classify_impact};
use report::ReportParts;
use site::describe_site;

/// One analysis request: asteroid plus optional scenario overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactRequest {
    pub asteroid: AsteroidInput,
    #[serde(default)]
    pub scenario: ScenarioInput,
}

impl ImpactRequest {
    pub fn new(asteroid: AsteroidInput, scenario: ScenarioInput) -> Self {
        Self { asteroid, scenario }
    }
}

// =============================================================================
// PIPELINE
// =============================================================================

/// Run the full assessment for a single asteroid and scenario.
pub fn analyze_impact(asteroid: &AsteroidInput, scenario: &ScenarioInput) -> Result<ImpactReport> {
    let resolved = resolve(asteroid, scenario)?;
    analyze_resolved(&resolved)
}

pub fn analyze_request(request: &ImpactRequest) -> Result<ImpactReport> {
    analyze_impact(&request.asteroid, &request.scenario)
}

/// Run every stage after resolution. Pure: identical inputs give identical reports.
pub fn analyze_resolved(resolved: &ResolvedInputs) -> Result<ImpactReport> {
    let energy = calculate_energy(resolved.asteroid.mass_kg, resolved.scenario.velocity_ms);
    if !(energy.kinetic_energy_j.is_finite() && energy.kinetic_energy_j >= 0.0) {
        return Err(ImpactError::degenerate("kinetic_energy_joules", energy.kinetic_energy_j));
    }

    let atmosphere = ExponentialAtmosphere::standard();
    let mechanics = classify_impact(&atmosphere, &resolved.entry_body(), &energy);
    let zones = generate_damage_zones(&energy);
    let casualties = estimate_casualties(&zones, resolved.scenario.population_density_per_km2);

    let deflection = resolved
        .deflection
        .as_ref()
        .map(|params| assess_deflection(resolved.asteroid.mass_kg, params))
        .transpose()?;

    let orbital = resolved
        .orbital_elements
        .as_ref()
        .map(|elements| OrbitalAnalysis::from_elements(elements, resolved.asteroid.diameter_m));

    let site = match (resolved.scenario.impact_latitude, resolved.scenario.impact_longitude) {
        (Some(lat), Some(lon)) => Some(describe_site(lat, lon)),
        _ => None,
    };

    tracing::debug!(
        tnt_mt = energy.tnt_equivalent_mt,
        impact_type = %mechanics.impact_type,
        zones = zones.len(),
        fatalities = casualties.fatalities,
        deflection = deflection.is_some(),
        "impact analysis complete"
    );

    Ok(ImpactReport::assemble(ReportParts {
        resolved,
        energy,
        mechanics,
        zones: &zones,
        casualties,
        deflection,
        orbital,
        site,
    }))
}

/// Analyze many requests on the rayon pool. Output order matches input order.
pub fn analyze_batch(requests: &[ImpactRequest]) -> Vec<Result<ImpactReport>> {
    requests.par_iter().map(analyze_request).collect()
}

/// Look up a catalog object by name and analyze it under the given scenario.
pub fn analyze_catalog_object(
    catalog: &impl SmallBodyCatalog,
    name: &str,
    scenario: &ScenarioInput,
) -> Result<ImpactReport> {
    let record = catalog.lookup(name)?;
    let input = record.to_input()?;
    tracing::debug!(
        object = record.name().unwrap_or(name),
        diameter_m = input.diameter_m,
        "catalog record mapped"
    );
    analyze_impact(&input, scenario)
}

// =============================================================================
// TESTS
// =============================================================================
