// Parameter Resolver
// Validates raw asteroid / scenario inputs and fills every default in a single pass

use serde::{Deserialize, Serialize};

use crate::deflection::DeflectionParameters;
use crate::error::{ImpactError, Result};
use crate::orbital::{estimate_approach_velocity, estimate_impact_angle, OrbitalElements};
use crate::physics_engine::{sphere_volume, Composition, EntryBody};

/// Default entry speed when neither given nor derivable (m/s)
pub const DEFAULT_VELOCITY: f64 = 20_000.0;

/// Default entry angle above horizon (degrees)
pub const DEFAULT_ANGLE: f64 = 45.0;

/// Default population density (people/km²)
pub const DEFAULT_POPULATION_DENSITY: f64 = 100.0;

// =============================================================================
// RAW INPUTS
// =============================================================================

/// Asteroid parameters as supplied by a user or a catalog record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AsteroidInput {
    /// Diameter (m), required
    pub diameter_m: f64,
    #[serde(default)]
    pub mass_kg: Option<f64>,
    #[serde(default)]
    pub density_kg_m3: Option<f64>,
    /// One of ROCKY, METALLIC, ICY, CARBONACEOUS (case-insensitive)
    #[serde(default)]
    pub composition: Option<String>,
    #[serde(default)]
    pub geometric_albedo: Option<f64>,
    #[serde(default)]
    pub color_b_v: Option<f64>,
    #[serde(default)]
    pub color_u_b: Option<f64>,
    #[serde(default)]
    pub orbital_elements: Option<OrbitalElements>,
}

impl AsteroidInput {
    pub fn new(diameter_m: f64) -> Self {
        Self {
            diameter_m,
            ..Default::default()
        }
    }

    pub fn with_composition(mut self, composition: Composition) -> Self {
        self.composition = Some(composition.as_str().to_string());
        self
    }

    pub fn with_mass(mut self, mass_kg: f64) -> Self {
        self.mass_kg = Some(mass_kg);
        self
    }

    pub fn with_density(mut self, density_kg_m3: f64) -> Self {
        self.density_kg_m3 = Some(density_kg_m3);
        self
    }

    pub fn with_orbital_elements(mut self, elements: OrbitalElements) -> Self {
        self.orbital_elements = Some(elements);
        self
    }
}

/// Impact scenario and optional deflection mission parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioInput {
    pub velocity_ms: Option<f64>,
    pub angle_deg: Option<f64>,
    pub impact_latitude: Option<f64>,
    pub impact_longitude: Option<f64>,
    pub population_density_per_km2: Option<f64>,
    pub deflection_distance_m: Option<f64>,
    pub warning_time_s: Option<f64>,
    pub available_energy_j: Option<f64>,
}

impl ScenarioInput {
    pub fn with_velocity(mut self, velocity_ms: f64) -> Self {
        self.velocity_ms = Some(velocity_ms);
        self
    }

    pub fn with_angle(mut self, angle_deg: f64) -> Self {
        self.angle_deg = Some(angle_deg);
        self
    }

    pub fn with_population_density(mut self, per_km2: f64) -> Self {
        self.population_density_per_km2 = Some(per_km2);
        self
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.impact_latitude = Some(latitude);
        self.impact_longitude = Some(longitude);
        self
    }

    pub fn with_deflection(
        mut self,
        deflection_distance_m: f64,
        warning_time_s: f64,
        available_energy_j: f64,
    ) -> Self {
        self.deflection_distance_m = Some(deflection_distance_m);
        self.warning_time_s = Some(warning_time_s);
        self.available_energy_j = Some(available_energy_j);
        self
    }
}

// =============================================================================
// RESOLVED VALUES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterSource {
    Explicit,
    Orbital,
    Photometric,
    Derived,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSources {
    pub mass: ParameterSource,
    pub density: ParameterSource,
    pub composition: ParameterSource,
    pub velocity: ParameterSource,
    pub angle: ParameterSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AsteroidProperties {
    pub diameter_m: f64,
    pub mass_kg: f64,
    pub density_kg_m3: f64,
    pub composition: Composition,
}

impl AsteroidProperties {
    /// Material strength of the composition class (Pa)
    pub fn strength_pa(&self) -> f64 {
        self.composition.strength()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactScenario {
    pub velocity_ms: f64,
    pub angle_deg: f64,
    pub impact_latitude: Option<f64>,
    pub impact_longitude: Option<f64>,
    pub population_density_per_km2: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInputs {
    pub asteroid: AsteroidProperties,
    pub scenario: ImpactScenario,
    pub sources: ParameterSources,
    pub orbital_elements: Option<OrbitalElements>,
    pub deflection: Option<DeflectionParameters>,
}

impl ResolvedInputs {
    pub fn entry_body(&self) -> EntryBody {
        EntryBody {
            diameter: self.asteroid.diameter_m,
            density: self.asteroid.density_kg_m3,
            strength: self.asteroid.strength_pa(),
            velocity: self.scenario.velocity_ms,
            angle_deg: self.scenario.angle_deg,
        }
    }
}

// =============================================================================
// VALIDATION HELPERS
// =============================================================================

pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ImpactError::validation(field, format!("must be a finite number, got {}", value)))
    }
}

pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<f64> {
    let value = require_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ImpactError::validation(field, format!("must be greater than zero, got {}", value)))
    }
}

pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<f64> {
    let value = require_finite(field, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ImpactError::validation(field, format!("must not be negative, got {}", value)))
    }
}

fn require_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64> {
    let value = require_finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ImpactError::validation(
            field,
            format!("must be within [{}, {}], got {}", min, max, value),
        ))
    }
}

// =============================================================================
// COMPOSITION INFERENCE
// =============================================================================

/// Infer composition from geometric albedo and colour indices.
///
/// Bright objects split on B-V into metallic (blue) and stony; dark objects
/// are carbonaceous unless a low U-B suggests a volatile-rich, comet-like body.
pub fn infer_composition(
    albedo: Option<f64>,
    color_b_v: Option<f64>,
    color_u_b: Option<f64>,
) -> Option<Composition> {
    let albedo = albedo.filter(|a| a.is_finite() && *a > 0.0);
    let color_b_v = color_b_v.filter(|c| c.is_finite() && *c > 0.0);
    if albedo.is_none() && color_b_v.is_none() {
        return None;
    }

    let albedo = albedo.unwrap_or(0.15);
    let b_v = color_b_v.unwrap_or(0.7);

    let composition = if albedo > 0.4 {
        if b_v < 0.6 {
            Composition::Metallic
        } else {
            Composition::Rocky
        }
    } else if b_v > 0.8 {
        Composition::Carbonaceous
    } else if color_u_b.is_some_and(|u_b| u_b < 0.3) {
        Composition::Icy
    } else {
        Composition::Carbonaceous
    };
    Some(composition)
}

// =============================================================================
// RESOLVER
// =============================================================================

/// Validate the raw inputs and produce fully resolved values.
///
/// Explicit values always win over orbital estimates, photometric inference
/// and composition defaults. Nothing is returned on failure.
pub fn resolve(asteroid: &AsteroidInput, scenario: &ScenarioInput) -> Result<ResolvedInputs> {
    let diameter = require_positive("diameter_m", asteroid.diameter_m)?;
    let explicit_mass = asteroid
        .mass_kg
        .map(|m| require_positive("mass_kg", m))
        .transpose()?;
    let explicit_density = asteroid
        .density_kg_m3
        .map(|d| require_positive("density_kg_m3", d))
        .transpose()?;
    let explicit_composition = asteroid
        .composition
        .as_deref()
        .map(str::parse::<Composition>)
        .transpose()?;

    let explicit_velocity = scenario
        .velocity_ms
        .map(|v| require_positive("velocity_ms", v))
        .transpose()?;
    let explicit_angle = scenario
        .angle_deg
        .map(|a| require_range("angle_deg", a, 0.0, 90.0))
        .transpose()?;
    let population_density = scenario
        .population_density_per_km2
        .map(|p| require_non_negative("population_density_per_km2", p))
        .transpose()?;

    let latitude = scenario
        .impact_latitude
        .map(|lat| require_range("impact_latitude", lat, -90.0, 90.0))
        .transpose()?;
    let longitude = scenario
        .impact_longitude
        .map(|lon| require_range("impact_longitude", lon, -180.0, 180.0))
        .transpose()?;
    match (latitude, longitude) {
        (Some(_), None) => {
            return Err(ImpactError::validation(
                "impact_longitude",
                "must be supplied together with impact_latitude",
            ))
        }
        (None, Some(_)) => {
            return Err(ImpactError::validation(
                "impact_latitude",
                "must be supplied together with impact_longitude",
            ))
        }
        _ => {}
    }

    let deflection = DeflectionParameters::from_scenario(scenario)?;

    // Composition
    let (composition, composition_source) = match explicit_composition {
        Some(c) => (c, ParameterSource::Explicit),
        None => match infer_composition(
            asteroid.geometric_albedo,
            asteroid.color_b_v,
            asteroid.color_u_b,
        ) {
            Some(c) => (c, ParameterSource::Photometric),
            None => (Composition::default(), ParameterSource::Default),
        },
    };

    // Mass and density
    let volume = sphere_volume(diameter);
    let (mass, density, mass_source, density_source) = match (explicit_mass, explicit_density) {
        (Some(m), Some(d)) => (m, d, ParameterSource::Explicit, ParameterSource::Explicit),
        (Some(m), None) => (m, m / volume, ParameterSource::Explicit, ParameterSource::Derived),
        (None, Some(d)) => (d * volume, d, ParameterSource::Derived, ParameterSource::Explicit),
        (None, None) => {
            let d = composition.density();
            let density_source = match composition_source {
                ParameterSource::Photometric => ParameterSource::Photometric,
                _ => ParameterSource::Default,
            };
            (d * volume, d, ParameterSource::Derived, density_source)
        }
    };
    if !(mass.is_finite() && mass > 0.0) {
        return Err(ImpactError::degenerate("mass_kg", mass));
    }
    if !(density.is_finite() && density > 0.0) {
        return Err(ImpactError::degenerate("density_kg_m3", density));
    }

    // Velocity and angle
    let elements = asteroid.orbital_elements.as_ref();
    let (velocity, velocity_source) = match explicit_velocity {
        Some(v) => (v, ParameterSource::Explicit),
        None => match elements.and_then(estimate_approach_velocity) {
            Some(v) => (v, ParameterSource::Orbital),
            None => (DEFAULT_VELOCITY, ParameterSource::Default),
        },
    };
    let (angle, angle_source) = match explicit_angle {
        Some(a) => (a, ParameterSource::Explicit),
        None => match elements.and_then(estimate_impact_angle) {
            Some(a) => (a, ParameterSource::Orbital),
            None => (DEFAULT_ANGLE, ParameterSource::Default),
        },
    };

    let resolved = ResolvedInputs {
        asteroid: AsteroidProperties {
            diameter_m: diameter,
            mass_kg: mass,
            density_kg_m3: density,
            composition,
        },
        scenario: ImpactScenario {
            velocity_ms: velocity,
            angle_deg: angle,
            impact_latitude: latitude,
            impact_longitude: longitude,
            population_density_per_km2: population_density.unwrap_or(DEFAULT_POPULATION_DENSITY),
        },
        sources: ParameterSources {
            mass: mass_source,
            density: density_source,
            composition: composition_source,
            velocity: velocity_source,
            angle: angle_source,
        },
        orbital_elements: asteroid.orbital_elements.clone(),
        deflection,
    };

    tracing::debug!(
        diameter_m = diameter,
        mass_kg = mass,
        composition = %composition,
        velocity_ms = velocity,
        angle_deg = angle,
        "resolved impact inputs"
    );

    Ok(resolved)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_defaults_filled() {
        let resolved = resolve(&AsteroidInput::new(20.0), &ScenarioInput::default()).unwrap();
        assert_eq!(resolved.asteroid.composition, Composition::Rocky);
        assert_eq!(resolved.asteroid.density_kg_m3, 2600.0);
        let expected_mass = 2600.0 * (4.0 / 3.0) * PI * 10.0_f64.powi(3);
        assert!((resolved.asteroid.mass_kg - expected_mass).abs() / expected_mass < 1e-12);
        assert_eq!(resolved.scenario.velocity_ms, DEFAULT_VELOCITY);
        assert_eq!(resolved.scenario.angle_deg, DEFAULT_ANGLE);
        assert_eq!(resolved.scenario.population_density_per_km2, DEFAULT_POPULATION_DENSITY);
        assert_eq!(resolved.sources.velocity, ParameterSource::Default);
        assert!(resolved.deflection.is_none());
    }

    #[test]
    fn test_explicit_density_beats_composition() {
        let input = AsteroidInput::new(100.0)
            .with_composition(Composition::Metallic)
            .with_density(3000.0);
        let resolved = resolve(&input, &ScenarioInput::default()).unwrap();
        assert_eq!(resolved.asteroid.density_kg_m3, 3000.0);
        assert_eq!(resolved.asteroid.composition, Composition::Metallic);
        assert_eq!(resolved.sources.density, ParameterSource::Explicit);
    }

    #[test]
    fn test_explicit_mass_derives_density() {
        let input = AsteroidInput::new(270.0).with_mass(2.7e10);
        let resolved = resolve(&input, &ScenarioInput::default()).unwrap();
        assert_eq!(resolved.asteroid.mass_kg, 2.7e10);
        let expected_density = 2.7e10 / sphere_volume(270.0);
        assert!((resolved.asteroid.density_kg_m3 - expected_density).abs() < 1e-9);
        assert_eq!(resolved.sources.density, ParameterSource::Derived);
    }

    #[test]
    fn test_validation_failures_name_field() {
        let cases: Vec<(AsteroidInput, ScenarioInput, &str)> = vec![
            (AsteroidInput::new(0.0), ScenarioInput::default(), "diameter_m"),
            (AsteroidInput::new(-5.0), ScenarioInput::default(), "diameter_m"),
            (AsteroidInput::new(10.0).with_mass(0.0), ScenarioInput::default(), "mass_kg"),
            (AsteroidInput::new(10.0).with_density(-1.0), ScenarioInput::default(), "density_kg_m3"),
            (AsteroidInput::new(10.0), ScenarioInput::default().with_velocity(0.0), "velocity_ms"),
            (AsteroidInput::new(10.0), ScenarioInput::default().with_angle(95.0), "angle_deg"),
            (AsteroidInput::new(10.0), ScenarioInput::default().with_angle(-1.0), "angle_deg"),
            (
                AsteroidInput::new(10.0),
                ScenarioInput::default().with_population_density(-3.0),
                "population_density_per_km2",
            ),
            (
                AsteroidInput::new(10.0),
                ScenarioInput::default().with_location(91.0, 0.0),
                "impact_latitude",
            ),
            (AsteroidInput::new(f64::NAN), ScenarioInput::default(), "diameter_m"),
        ];

        for (asteroid, scenario, field) in cases {
            let err = resolve(&asteroid, &scenario).unwrap_err();
            assert_eq!(err.field(), Some(field), "{:?}", err);
        }
    }

    #[test]
    fn test_unknown_composition_rejected() {
        let mut input = AsteroidInput::new(10.0);
        input.composition = Some("plasma".to_string());
        let err = resolve(&input, &ScenarioInput::default()).unwrap_err();
        assert_eq!(err.field(), Some("composition"));
    }

    #[test]
    fn test_half_location_rejected() {
        let scenario = ScenarioInput {
            impact_latitude: Some(10.0),
            ..Default::default()
        };
        let err = resolve(&AsteroidInput::new(10.0), &scenario).unwrap_err();
        assert_eq!(err.field(), Some("impact_longitude"));
    }

    #[test]
    fn test_orbital_estimates_used_when_missing() {
        let elements = OrbitalElements {
            semi_major_axis_au: Some(1.24),
            eccentricity: Some(0.69),
            inclination_deg: Some(20.0),
            ..Default::default()
        };
        let input = AsteroidInput::new(20.0).with_orbital_elements(elements);
        let resolved = resolve(&input, &ScenarioInput::default()).unwrap();
        assert_eq!(resolved.sources.velocity, ParameterSource::Orbital);
        assert_eq!(resolved.sources.angle, ParameterSource::Orbital);
        assert_eq!(resolved.scenario.angle_deg, 40.0);

        let explicit = ScenarioInput::default().with_velocity(19_000.0);
        let resolved = resolve(&input, &explicit).unwrap();
        assert_eq!(resolved.scenario.velocity_ms, 19_000.0);
        assert_eq!(resolved.sources.velocity, ParameterSource::Explicit);
    }

    #[test]
    fn test_partial_elements_fall_back_to_defaults() {
        let elements = OrbitalElements {
            moid_au: Some(0.01),
            ..Default::default()
        };
        let input = AsteroidInput::new(20.0).with_orbital_elements(elements);
        let resolved = resolve(&input, &ScenarioInput::default()).unwrap();
        assert_eq!(resolved.scenario.velocity_ms, DEFAULT_VELOCITY);
        assert_eq!(resolved.scenario.angle_deg, DEFAULT_ANGLE);
    }

    #[test]
    fn test_photometric_composition() {
        assert_eq!(infer_composition(Some(0.65), Some(0.45), None), Some(Composition::Metallic));
        assert_eq!(infer_composition(Some(0.51), Some(0.774), None), Some(Composition::Rocky));
        assert_eq!(infer_composition(Some(0.04), Some(0.85), None), Some(Composition::Carbonaceous));
        assert_eq!(infer_composition(Some(0.1), None, Some(0.2)), Some(Composition::Icy));
        assert_eq!(infer_composition(None, None, Some(0.2)), None);

        let mut input = AsteroidInput::new(100.0);
        input.geometric_albedo = Some(0.65);
        input.color_b_v = Some(0.45);
        let resolved = resolve(&input, &ScenarioInput::default()).unwrap();
        assert_eq!(resolved.asteroid.composition, Composition::Metallic);
        assert_eq!(resolved.sources.composition, ParameterSource::Photometric);

        // Explicit composition wins over photometry
        let input = input.with_composition(Composition::Icy);
        let resolved = resolve(&input, &ScenarioInput::default()).unwrap();
        assert_eq!(resolved.asteroid.composition, Composition::Icy);
    }
}
