// Physics Engine - Impact Energetics & Atmospheric Entry
// Implements kinetic energy, airburst/surface classification, crater scaling and seismic coupling

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::ImpactError;

// =============================================================================
// PHYSICAL CONSTANTS (SI Units)
// =============================================================================

/// Gravitational constant (m³/(kg·s²))
pub const G: f64 = 6.67430e-11;

/// Astronomical Unit in meters
pub const AU: f64 = 1.495978707e11;

/// Sun's gravitational parameter μ = G * M_sun (m³/s²)
pub const MU_SUN: f64 = 1.32712440018e20;

/// Earth's mean heliocentric orbital speed (m/s)
pub const EARTH_ORBITAL_VELOCITY: f64 = 29_780.0;

/// Surface gravity (m/s²)
pub const GRAVITY: f64 = 9.81;

/// Energy released by one megaton of TNT (J)
pub const MEGATON_TNT: f64 = 4.184e15;

/// Below one tonne of TNT (J) an event is reported as a negligible airburst
pub const NEGLIGIBLE_ENERGY: f64 = 4.184e9;

/// Sea-level air density (kg/m³)
pub const SEA_LEVEL_AIR_DENSITY: f64 = 1.225;

/// Atmospheric scale height (m)
pub const ATMOSPHERE_SCALE_HEIGHT: f64 = 8000.0;

/// Drag coefficient of the fragmenting body
pub const DRAG_COEFFICIENT: f64 = 2.0;

/// Fragment cloud diameter / initial diameter at which the cloud bursts
/// Reference: Collins, Melosh & Marcus (2005)
pub const PANCAKE_FACTOR: f64 = 7.0;

/// Target rock density for crater scaling (kg/m³)
pub const TARGET_DENSITY: f64 = 2500.0;

/// Empirical crater scaling constant K in D = K * (E / (ρ g))^(1/3.4)
pub const CRATER_SCALING: f64 = 1.8;

/// Crater scaling exponent
pub const CRATER_EXPONENT: f64 = 1.0 / 3.4;

/// Seismic magnitude calibration: M = 0.67 * log10(E) - 5.87
pub const SEISMIC_SLOPE: f64 = 2.0 / 3.0;
pub const SEISMIC_OFFSET: f64 = 5.87;

/// Bulk density by composition class (kg/m³)
pub mod asteroid_density {
    pub const ROCKY: f64 = 2600.0;
    pub const METALLIC: f64 = 7800.0;
    pub const ICY: f64 = 1000.0;
    pub const CARBONACEOUS: f64 = 1380.0;
}

/// Material strength by composition class (Pa)
pub mod material_strength {
    pub const ROCKY: f64 = 1.0e6;
    pub const METALLIC: f64 = 5.0e8;
    pub const ICY: f64 = 1.0e5;
    pub const CARBONACEOUS: f64 = 5.0e5;
}

// =============================================================================
// COMPOSITION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Composition {
    Rocky,
    Metallic,
    Icy,
    Carbonaceous,
}

impl Composition {
    pub const ALL: [Composition; 4] = [
        Composition::Rocky,
        Composition::Metallic,
        Composition::Icy,
        Composition::Carbonaceous,
    ];

    /// Default bulk density (kg/m³)
    pub fn density(self) -> f64 {
        match self {
            Composition::Rocky => asteroid_density::ROCKY,
            Composition::Metallic => asteroid_density::METALLIC,
            Composition::Icy => asteroid_density::ICY,
            Composition::Carbonaceous => asteroid_density::CARBONACEOUS,
        }
    }

    /// Material strength (Pa)
    pub fn strength(self) -> f64 {
        match self {
            Composition::Rocky => material_strength::ROCKY,
            Composition::Metallic => material_strength::METALLIC,
            Composition::Icy => material_strength::ICY,
            Composition::Carbonaceous => material_strength::CARBONACEOUS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Composition::Rocky => "ROCKY",
            Composition::Metallic => "METALLIC",
            Composition::Icy => "ICY",
            Composition::Carbonaceous => "CARBONACEOUS",
        }
    }
}

impl Default for Composition {
    fn default() -> Self {
        Composition::Rocky
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Composition {
    type Err = ImpactError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ROCKY" => Ok(Composition::Rocky),
            "METALLIC" => Ok(Composition::Metallic),
            "ICY" => Ok(Composition::Icy),
            "CARBONACEOUS" => Ok(Composition::Carbonaceous),
            other => Err(ImpactError::validation(
                "composition",
                format!(
                    "unknown composition '{}', expected one of ROCKY, METALLIC, ICY, CARBONACEOUS",
                    other
                ),
            )),
        }
    }
}

/// Volume of a sphere of the given diameter (m³)
pub fn sphere_volume(diameter: f64) -> f64 {
    let radius = diameter / 2.0;
    (4.0 / 3.0) * PI * radius.powi(3)
}

// =============================================================================
// ENERGY
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyResult {
    pub kinetic_energy_j: f64,
    pub tnt_equivalent_mt: f64,
}

impl EnergyResult {
    pub fn is_negligible(&self) -> bool {
        self.kinetic_energy_j < NEGLIGIBLE_ENERGY
    }
}

/// Kinetic energy 0.5 * m * v² and its TNT equivalent
pub fn calculate_energy(mass: f64, velocity: f64) -> EnergyResult {
    let kinetic_energy_j = 0.5 * mass * velocity * velocity;
    EnergyResult {
        kinetic_energy_j,
        tnt_equivalent_mt: tnt_equivalent(kinetic_energy_j),
    }
}

/// Convert Joules to megatons of TNT
pub fn tnt_equivalent(kinetic_energy: f64) -> f64 {
    kinetic_energy / MEGATON_TNT
}

// =============================================================================
// EXPONENTIAL ATMOSPHERE
// =============================================================================

/// Isothermal atmosphere: ρ(h) = ρ₀ × exp(-h / H)
#[derive(Debug, Clone, Copy)]
pub struct ExponentialAtmosphere {
    /// Reference density at sea level (kg/m³)
    pub rho0: f64,
    /// Scale height (meters)
    pub scale_height: f64,
}

impl Default for ExponentialAtmosphere {
    fn default() -> Self {
        Self::standard()
    }
}

impl ExponentialAtmosphere {
    pub fn standard() -> Self {
        Self {
            rho0: SEA_LEVEL_AIR_DENSITY,
            scale_height: ATMOSPHERE_SCALE_HEIGHT,
        }
    }

    /// Air density at altitude (kg/m³)
    pub fn density_at(&self, altitude: f64) -> f64 {
        self.rho0 * (-altitude / self.scale_height).exp()
    }

    /// Ram pressure q = 0.5 * ρ(h) * v² (Pa)
    pub fn dynamic_pressure(&self, altitude: f64, velocity: f64) -> f64 {
        0.5 * self.density_at(altitude) * velocity * velocity
    }

    /// Altitude at which the ram pressure reaches `pressure`.
    ///
    /// Returns `None` when the pressure is never reached above ground.
    pub fn altitude_for_pressure(&self, pressure: f64, velocity: f64) -> Option<f64> {
        let surface_pressure = self.dynamic_pressure(0.0, velocity);
        if !(pressure > 0.0) || surface_pressure <= pressure {
            return None;
        }
        let altitude = self.scale_height * (surface_pressure / pressure).ln();
        (altitude.is_finite() && altitude > 0.0).then_some(altitude)
    }
}

// =============================================================================
// IMPACT MECHANICS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactType {
    Airburst,
    Surface,
}

impl fmt::Display for ImpactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImpactType::Airburst => f.write_str("airburst"),
            ImpactType::Surface => f.write_str("surface"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactMechanicsResult {
    pub impact_type: ImpactType,
    /// Present iff airburst
    pub airburst_altitude_km: Option<f64>,
    /// Present iff surface impact
    pub crater_diameter_m: Option<f64>,
    pub seismic_magnitude: f64,
}

/// Body parameters the entry model needs
#[derive(Debug, Clone, Copy)]
pub struct EntryBody {
    pub diameter: f64,     // meters
    pub density: f64,      // kg/m³
    pub strength: f64,     // Pa
    pub velocity: f64,     // m/s
    pub angle_deg: f64,    // degrees above horizon
}

/// Altitude (m) where ram pressure first exceeds the body's strength
pub fn breakup_altitude(atmosphere: &ExponentialAtmosphere, body: &EntryBody) -> Option<f64> {
    atmosphere.altitude_for_pressure(body.strength, body.velocity)
}

/// Altitude (m) at which the fragment cloud bursts.
///
/// After breakup the debris flattens and spreads under aerodynamic loading
/// (pancake model). Burst occurs when the cloud reaches PANCAKE_FACTOR times
/// the initial diameter:
///
///   z_b = z* - 2H ln(1 + (l / 2H) sqrt(f_p² - 1))
///   l   = D sin(θ) sqrt(ρ_i / (C_D ρ(z*)))
///
/// Returns `None` if the body never breaks up, or the cloud reaches the
/// ground before bursting.
pub fn burst_altitude(atmosphere: &ExponentialAtmosphere, body: &EntryBody) -> Option<f64> {
    let breakup = breakup_altitude(atmosphere, body)?;
    let air_density = atmosphere.density_at(breakup);
    let dispersion_length = body.diameter
        * body.angle_deg.to_radians().sin()
        * (body.density / (DRAG_COEFFICIENT * air_density)).sqrt();

    let two_h = 2.0 * atmosphere.scale_height;
    let spread = (PANCAKE_FACTOR * PANCAKE_FACTOR - 1.0).sqrt();
    let altitude = breakup - two_h * (1.0 + dispersion_length / two_h * spread).ln();

    (altitude.is_finite() && altitude > 0.0).then_some(altitude)
}

/// Transient crater diameter (m) from the simplified scaling law
pub fn crater_diameter(kinetic_energy: f64) -> f64 {
    CRATER_SCALING * (kinetic_energy / (TARGET_DENSITY * GRAVITY)).powf(CRATER_EXPONENT)
}

/// Richter-equivalent magnitude of the ground shaking, floored at zero
pub fn seismic_magnitude(kinetic_energy: f64) -> f64 {
    if !(kinetic_energy > 0.0) {
        return 0.0;
    }
    (SEISMIC_SLOPE * kinetic_energy.log10() - SEISMIC_OFFSET).max(0.0)
}

/// Decide between airburst and surface impact
pub fn classify_impact(
    atmosphere: &ExponentialAtmosphere,
    body: &EntryBody,
    energy: &EnergyResult,
) -> ImpactMechanicsResult {
    if energy.is_negligible() {
        tracing::debug!(
            kinetic_energy_j = energy.kinetic_energy_j,
            "negligible entry energy, reporting as airburst"
        );
        return ImpactMechanicsResult {
            impact_type: ImpactType::Airburst,
            airburst_altitude_km: Some(0.0),
            crater_diameter_m: None,
            seismic_magnitude: 0.0,
        };
    }

    let seismic = seismic_magnitude(energy.kinetic_energy_j);

    match burst_altitude(atmosphere, body) {
        Some(altitude) => ImpactMechanicsResult {
            impact_type: ImpactType::Airburst,
            airburst_altitude_km: Some(altitude / 1000.0),
            crater_diameter_m: None,
            seismic_magnitude: seismic,
        },
        None => ImpactMechanicsResult {
            impact_type: ImpactType::Surface,
            airburst_altitude_km: None,
            crater_diameter_m: Some(crater_diameter(energy.kinetic_energy_j)),
            seismic_magnitude: seismic,
        },
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn body(diameter: f64, composition: Composition, velocity: f64, angle_deg: f64) -> EntryBody {
        EntryBody {
            diameter,
            density: composition.density(),
            strength: composition.strength(),
            velocity,
            angle_deg,
        }
    }

    #[test]
    fn test_composition_table() {
        assert_eq!(Composition::Rocky.density(), 2600.0);
        assert_eq!(Composition::Metallic.strength(), 5e8);
        assert_eq!(Composition::Icy.density(), 1000.0);
        assert_eq!(Composition::Carbonaceous.strength(), 5e5);
    }

    #[test]
    fn test_composition_parse() {
        assert_eq!("icy".parse::<Composition>().unwrap(), Composition::Icy);
        assert_eq!(" Metallic ".parse::<Composition>().unwrap(), Composition::Metallic);
        let err = "GASEOUS".parse::<Composition>().unwrap_err();
        assert_eq!(err.field(), Some("composition"));
    }

    #[test]
    fn test_energy_and_tnt() {
        let energy = calculate_energy(2.0, 10.0);
        assert!((energy.kinetic_energy_j - 100.0).abs() < 1e-10);
        let mt = tnt_equivalent(MEGATON_TNT * 3.0);
        assert!((mt - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_atmosphere_profile() {
        let atm = ExponentialAtmosphere::standard();
        assert!((atm.density_at(0.0) - 1.225).abs() < 1e-12);
        let ratio = atm.density_at(8000.0) / atm.density_at(0.0);
        assert!((ratio - (-1.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_altitude_for_pressure_inverts_profile() {
        let atm = ExponentialAtmosphere::standard();
        let h = atm.altitude_for_pressure(1e6, 19_000.0).unwrap();
        let q = atm.dynamic_pressure(h, 19_000.0);
        assert!((q - 1e6).abs() / 1e6 < 1e-9);
    }

    #[test]
    fn test_strong_body_never_breaks_up() {
        let atm = ExponentialAtmosphere::standard();
        let iron = body(100.0, Composition::Metallic, 20_000.0, 45.0);
        assert!(breakup_altitude(&atm, &iron).is_none());
    }

    #[test]
    fn test_chelyabinsk_like_burst_altitude() {
        let atm = ExponentialAtmosphere::standard();
        let rock = body(20.0, Composition::Rocky, 19_000.0, 20.0);
        let breakup = breakup_altitude(&atm, &rock).unwrap();
        let burst = burst_altitude(&atm, &rock).unwrap();
        assert!(burst < breakup);
        assert!((burst / 1000.0 - 29.0).abs() < 1.0, "burst at {} m", burst);
    }

    #[test]
    fn test_vertical_entry_bursts_lower_than_grazing() {
        let atm = ExponentialAtmosphere::standard();
        let steep = burst_altitude(&atm, &body(20.0, Composition::Rocky, 19_000.0, 80.0));
        let shallow = burst_altitude(&atm, &body(20.0, Composition::Rocky, 19_000.0, 10.0));
        assert!(steep.unwrap() < shallow.unwrap());
    }

    #[test]
    fn test_large_rocky_body_reaches_ground() {
        let atm = ExponentialAtmosphere::standard();
        let big = body(1000.0, Composition::Rocky, 20_000.0, 45.0);
        assert!(breakup_altitude(&atm, &big).is_some());
        assert!(burst_altitude(&atm, &big).is_none());
    }

    #[test]
    fn test_seismic_floor() {
        assert_eq!(seismic_magnitude(0.0), 0.0);
        assert_eq!(seismic_magnitude(10.0), 0.0);
        let m = seismic_magnitude(1e18);
        assert!((m - (12.0 - 5.87)).abs() < 1e-9);
    }

    #[test]
    fn test_negligible_energy_is_airburst() {
        let atm = ExponentialAtmosphere::standard();
        let pebble = body(0.1, Composition::Rocky, 1.0, 45.0);
        let mass = pebble.density * sphere_volume(pebble.diameter);
        let energy = calculate_energy(mass, pebble.velocity);
        let result = classify_impact(&atm, &pebble, &energy);
        assert_eq!(result.impact_type, ImpactType::Airburst);
        assert_eq!(result.crater_diameter_m, None);
        assert_eq!(result.seismic_magnitude, 0.0);
    }

    #[test]
    fn test_km_scale_body_stays_finite() {
        let atm = ExponentialAtmosphere::standard();
        let giant = body(10_000.0, Composition::Metallic, 70_000.0, 90.0);
        let mass = giant.density * sphere_volume(giant.diameter);
        let energy = calculate_energy(mass, giant.velocity);
        let result = classify_impact(&atm, &giant, &energy);
        assert_eq!(result.impact_type, ImpactType::Surface);
        assert!(result.crater_diameter_m.unwrap().is_finite());
        assert!(result.seismic_magnitude.is_finite());
    }
}
