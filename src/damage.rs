// Damage Zone Generator
// Thermal and blast-overpressure radii, ordered as a largest-first gradient

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

use crate::physics_engine::EnergyResult;

/// Fraction of impact energy radiated as thermal pulse (luminous efficiency)
pub const LUMINOUS_EFFICIENCY: f64 = 3.0e-3;

/// Thermal fluence causing third-degree burns (J/m²)
pub const THIRD_DEGREE_BURN_FLUENCE: f64 = 4.2e5;

/// Pa per psi
pub const PSI: f64 = 6895.0;

/// Blast scaling constant C in r = C * E^(1/3) / P^(1/3).
/// Equivalent to 45 m * (yield in kg TNT / overpressure in Pa)^(1/3).
pub fn blast_scaling_constant() -> f64 {
    45.0 / 4.184e6_f64.cbrt()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    ThermalBurns,
    #[serde(rename = "overpressure_total_destruction")]
    TotalDestruction,
    #[serde(rename = "overpressure_severe_damage")]
    SevereDamage,
    #[serde(rename = "overpressure_moderate_damage")]
    ModerateDamage,
    #[serde(rename = "overpressure_light_damage")]
    LightDamage,
}

impl ZoneKind {
    pub const ALL: [ZoneKind; 5] = [
        ZoneKind::ThermalBurns,
        ZoneKind::TotalDestruction,
        ZoneKind::SevereDamage,
        ZoneKind::ModerateDamage,
        ZoneKind::LightDamage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ZoneKind::ThermalBurns => "thermal_burns",
            ZoneKind::TotalDestruction => "overpressure_total_destruction",
            ZoneKind::SevereDamage => "overpressure_severe_damage",
            ZoneKind::ModerateDamage => "overpressure_moderate_damage",
            ZoneKind::LightDamage => "overpressure_light_damage",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ZoneKind::ThermalBurns => "Third-degree burns from the thermal pulse",
            ZoneKind::TotalDestruction => "Total destruction, 20 psi overpressure",
            ZoneKind::SevereDamage => "Severe structural damage, 5 psi overpressure",
            ZoneKind::ModerateDamage => "Moderate damage and collapsed houses, 2 psi overpressure",
            ZoneKind::LightDamage => "Light damage and shattered windows, 1 psi overpressure",
        }
    }

    /// 1 = most severe category, 4 = least
    pub fn severity_level(self) -> u8 {
        match self {
            ZoneKind::ThermalBurns | ZoneKind::TotalDestruction => 1,
            ZoneKind::SevereDamage => 2,
            ZoneKind::ModerateDamage => 3,
            ZoneKind::LightDamage => 4,
        }
    }

    pub fn color_code(self) -> &'static str {
        match self {
            ZoneKind::ThermalBurns => "#FF4500",
            ZoneKind::TotalDestruction => "#8B0000",
            ZoneKind::SevereDamage => "#FF0000",
            ZoneKind::ModerateDamage => "#FFA500",
            ZoneKind::LightDamage => "#FFD700",
        }
    }

    /// Peak overpressure threshold (Pa), `None` for the thermal zone
    pub fn overpressure_pa(self) -> Option<f64> {
        match self {
            ZoneKind::ThermalBurns => None,
            ZoneKind::TotalDestruction => Some(20.0 * PSI),
            ZoneKind::SevereDamage => Some(5.0 * PSI),
            ZoneKind::ModerateDamage => Some(2.0 * PSI),
            ZoneKind::LightDamage => Some(1.0 * PSI),
        }
    }

    /// Radius (m) of this zone for the given impact energy
    pub fn radius(self, kinetic_energy: f64) -> f64 {
        match self.overpressure_pa() {
            None => thermal_radius(kinetic_energy),
            Some(pressure) => overpressure_radius(kinetic_energy, pressure),
        }
    }
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageZone {
    pub kind: ZoneKind,
    pub radius_m: f64,
}

impl DamageZone {
    pub fn description(&self) -> &'static str {
        self.kind.description()
    }

    pub fn severity_level(&self) -> u8 {
        self.kind.severity_level()
    }

    pub fn color_code(&self) -> &'static str {
        self.kind.color_code()
    }
}

/// Radius (m) inside which the hemispherical thermal fluence
/// η E / (2π r²) exceeds the third-degree burn threshold
pub fn thermal_radius(kinetic_energy: f64) -> f64 {
    (LUMINOUS_EFFICIENCY * kinetic_energy / (2.0 * PI * THIRD_DEGREE_BURN_FLUENCE)).sqrt()
}

/// Cube-root blast scaling: r = C * E^(1/3) / P^(1/3)
pub fn overpressure_radius(kinetic_energy: f64, pressure_pa: f64) -> f64 {
    blast_scaling_constant() * kinetic_energy.cbrt() / pressure_pa.cbrt()
}

/// Build the damage gradient.
///
/// Zones come back sorted by radius, largest first, regardless of severity.
/// Zones whose radius is not a positive number are left out entirely, as are
/// exact radius ties after the first (more severe) zone.
pub fn generate_damage_zones(energy: &EnergyResult) -> Vec<DamageZone> {
    let mut zones: Vec<DamageZone> = ZoneKind::ALL
        .iter()
        .filter_map(|&kind| {
            let radius_m = kind.radius(energy.kinetic_energy_j);
            if radius_m.is_finite() && radius_m > 0.0 {
                Some(DamageZone { kind, radius_m })
            } else {
                tracing::warn!(zone = %kind, radius_m, "omitting damage zone with unusable radius");
                None
            }
        })
        .collect();

    // Stable sort keeps catalog (severity) order among equal radii
    zones.sort_by(|a, b| b.radius_m.total_cmp(&a.radius_m));
    zones.dedup_by(|later, earlier| later.radius_m == earlier.radius_m);

    tracing::debug!(zones = zones.len(), "damage gradient generated");
    zones
}

// =============================================================================
// TESTS
// =============================================================================
