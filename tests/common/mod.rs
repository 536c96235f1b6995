//! Common fixtures for integration tests.

#![allow(dead_code)]

use impactrisk::{AsteroidInput, Composition, ImpactRequest, ScenarioInput};

/// 2013 Chelyabinsk superbolide.
pub fn chelyabinsk() -> ImpactRequest {
    ImpactRequest::new(
        AsteroidInput::new(20.0).with_composition(Composition::Rocky),
        ScenarioInput::default()
            .with_velocity(19_000.0)
            .with_angle(20.0)
            .with_population_density(100.0),
    )
}

/// Tunguska-class icy body.
pub fn icy_60m() -> ImpactRequest {
    ImpactRequest::new(
        AsteroidInput::new(60.0).with_composition(Composition::Icy),
        ScenarioInput::default().with_velocity(27_000.0).with_angle(30.0),
    )
}

/// Small iron body strong enough to reach the ground.
pub fn metallic_100m() -> ImpactRequest {
    ImpactRequest::new(
        AsteroidInput::new(100.0).with_composition(Composition::Metallic),
        ScenarioInput::default().with_velocity(20_000.0).with_angle(45.0),
    )
}

/// Deflection scenario: one year of warning, 1 TJ available.
pub fn deflection_case() -> ImpactRequest {
    ImpactRequest::new(
        AsteroidInput::new(300.0).with_mass(2.7e10),
        ScenarioInput::default().with_deflection(1.17e7, 3.1536e7, 1.0e12),
    )
}
