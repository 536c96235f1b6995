// Deflection Feasibility Analyzer
// First-order energy budget for pushing an asteroid off an impact trajectory

use serde::{Deserialize, Serialize};

use crate::error::{ImpactError, Result};
use crate::resolver::{require_non_negative, require_positive, ScenarioInput};

/// Characteristic warning time for mission readiness (s), 30 days
pub const MISSION_READINESS_TIME: f64 = 30.0 * 86_400.0;

/// Mission parameters; all three must be supplied for an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeflectionParameters {
    /// Required miss distance (m)
    pub deflection_distance_m: f64,
    /// Time between launch decision and impact (s)
    pub warning_time_s: f64,
    /// Energy the mission can deliver to the body (J)
    pub available_energy_j: f64,
}

impl DeflectionParameters {
    /// Extract and validate mission parameters.
    ///
    /// Returns `Ok(None)` unless all three inputs are present.
    pub fn from_scenario(scenario: &ScenarioInput) -> Result<Option<Self>> {
        let (Some(distance), Some(warning), Some(available)) = (
            scenario.deflection_distance_m,
            scenario.warning_time_s,
            scenario.available_energy_j,
        ) else {
            return Ok(None);
        };

        Ok(Some(Self {
            deflection_distance_m: require_positive("deflection_distance_m", distance)?,
            warning_time_s: require_positive("warning_time_s", warning)?,
            available_energy_j: require_non_negative("available_energy_j", available)?,
        }))
    }

    /// Velocity change needed to shift arrival by the deflection distance (m/s)
    pub fn delta_v(&self) -> f64 {
        self.deflection_distance_m / self.warning_time_s
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeflectionAssessment {
    pub feasible: bool,
    pub required_energy_j: f64,
    pub available_energy_j: f64,
    pub energy_ratio: f64,
    pub success_probability: f64,
    pub delta_v_ms: f64,
    pub parameters: DeflectionParameters,
}

/// Energy required: 0.5 * m * Δv².
///
/// Ignores momentum-transfer efficiency and multi-body dynamics.
pub fn required_energy(mass: f64, parameters: &DeflectionParameters) -> f64 {
    let delta_v = parameters.delta_v();
    0.5 * mass * delta_v * delta_v
}

/// Mission success probability in [0, 1].
///
/// P = (1 - exp(-ratio)) * (1 - exp(-t / 30 days)). Rises monotonically with
/// the energy margin and with warning time, saturating at 1.0.
pub fn success_probability(energy_ratio: f64, warning_time_s: f64) -> f64 {
    let margin = 1.0 - (-energy_ratio.max(0.0)).exp();
    let readiness = 1.0 - (-warning_time_s.max(0.0) / MISSION_READINESS_TIME).exp();
    (margin * readiness).clamp(0.0, 1.0)
}

pub fn assess_deflection(mass: f64, parameters: &DeflectionParameters) -> Result<DeflectionAssessment> {
    let required = required_energy(mass, parameters);
    if !(required.is_finite() && required > 0.0) {
        return Err(ImpactError::degenerate("required_energy_j", required));
    }

    let available = parameters.available_energy_j;
    let energy_ratio = available / required;
    if !energy_ratio.is_finite() {
        return Err(ImpactError::degenerate("energy_ratio", energy_ratio));
    }

    let assessment = DeflectionAssessment {
        feasible: available >= required,
        required_energy_j: required,
        available_energy_j: available,
        energy_ratio,
        success_probability: success_probability(energy_ratio, parameters.warning_time_s),
        delta_v_ms: parameters.delta_v(),
        parameters: *parameters,
    };

    tracing::debug!(
        required_energy_j = required,
        energy_ratio,
        feasible = assessment.feasible,
        "deflection assessed"
    );

    Ok(assessment)
}

// =============================================================================
// TESTS
// =============================================================================
