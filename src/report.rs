// Report Assembler
// Wire-compatible impact report built from the per-stage results

use serde::{Deserialize, Serialize};

use crate::casualty::CasualtyEstimate;
use crate::damage::{DamageZone, ZoneKind};
use crate::deflection::{DeflectionAssessment, DeflectionParameters};
use crate::orbital::OrbitalAnalysis;
use crate::physics_engine::{Composition, EnergyResult, ImpactMechanicsResult, ImpactType};
use crate::resolver::{ParameterSources, ResolvedInputs};
use crate::site::ImpactSite;

// =============================================================================
// SERIALIZABLE REPORT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidSummary {
    pub diameter_m: f64,
    pub mass_kg: f64,
    pub density_kg_m3: f64,
    pub composition: Composition,
    pub velocity_ms: f64,
    pub angle_deg: f64,
    pub population_density_per_km2: f64,
    pub sources: ParameterSources,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyAnalysis {
    pub kinetic_energy_joules: f64,
    pub tnt_equivalent_megatons: f64,
    pub impact_type: ImpactType,
    pub airburst_altitude_km: Option<f64>,
    pub crater_diameter_m: Option<f64>,
    pub seismic_magnitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneReport {
    #[serde(rename = "type")]
    pub zone_type: ZoneKind,
    pub description: String,
    pub radius_meters: f64,
    pub radius_km: f64,
    pub severity_level: u8,
    pub color_code: String,
}

impl From<&DamageZone> for ZoneReport {
    fn from(zone: &DamageZone) -> Self {
        Self {
            zone_type: zone.kind,
            description: zone.description().to_string(),
            radius_meters: zone.radius_m,
            radius_km: zone.radius_m / 1000.0,
            severity_level: zone.severity_level(),
            color_code: zone.color_code().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeflectionReport {
    pub feasible: bool,
    pub required_energy_joules: f64,
    pub available_energy_joules: f64,
    pub energy_ratio: f64,
    pub success_probability: f64,
    pub delta_v_ms: f64,
    pub deflection_parameters: DeflectionParameters,
}

impl From<&DeflectionAssessment> for DeflectionReport {
    fn from(a: &DeflectionAssessment) -> Self {
        Self {
            feasible: a.feasible,
            required_energy_joules: a.required_energy_j,
            available_energy_joules: a.available_energy_j,
            energy_ratio: a.energy_ratio,
            success_probability: a.success_probability,
            delta_v_ms: a.delta_v_ms,
            deflection_parameters: a.parameters,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactReport {
    pub asteroid: AsteroidSummary,
    pub energy_analysis: EnergyAnalysis,
    pub impact_radii_gradient: Vec<ZoneReport>,
    pub casualty_estimates: CasualtyEstimate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deflection_analysis: Option<DeflectionReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbital_analysis: Option<OrbitalAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_site: Option<ImpactSite>,
}

/// Per-stage results gathered by the pipeline
pub struct ReportParts<'a> {
    pub resolved: &'a ResolvedInputs,
    pub energy: EnergyResult,
    pub mechanics: ImpactMechanicsResult,
    pub zones: &'a [DamageZone],
    pub casualties: CasualtyEstimate,
    pub deflection: Option<DeflectionAssessment>,
    pub orbital: Option<OrbitalAnalysis>,
    pub site: Option<ImpactSite>,
}

impl ImpactReport {
    pub fn assemble(parts: ReportParts<'_>) -> Self {
        let asteroid = &parts.resolved.asteroid;
        let scenario = &parts.resolved.scenario;

        Self {
            asteroid: AsteroidSummary {
                diameter_m: asteroid.diameter_m,
                mass_kg: asteroid.mass_kg,
                density_kg_m3: asteroid.density_kg_m3,
                composition: asteroid.composition,
                velocity_ms: scenario.velocity_ms,
                angle_deg: scenario.angle_deg,
                population_density_per_km2: scenario.population_density_per_km2,
                sources: parts.resolved.sources,
            },
            energy_analysis: EnergyAnalysis {
                kinetic_energy_joules: parts.energy.kinetic_energy_j,
                tnt_equivalent_megatons: parts.energy.tnt_equivalent_mt,
                impact_type: parts.mechanics.impact_type,
                airburst_altitude_km: parts.mechanics.airburst_altitude_km,
                crater_diameter_m: parts.mechanics.crater_diameter_m,
                seismic_magnitude: parts.mechanics.seismic_magnitude,
            },
            impact_radii_gradient: parts.zones.iter().map(ZoneReport::from).collect(),
            casualty_estimates: parts.casualties,
            deflection_analysis: parts.deflection.as_ref().map(DeflectionReport::from),
            orbital_analysis: parts.orbital,
            impact_site: parts.site,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
