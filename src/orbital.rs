// Orbital Approach Estimator
// Derives entry velocity / angle and orbit family from catalog orbital elements

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::physics_engine::{AU, EARTH_ORBITAL_VELOCITY, MU_SUN};

/// MOID below which an object is flagged potentially hazardous (AU)
pub const PHA_MOID_AU: f64 = 0.05;

/// Minimum diameter for the potentially hazardous flag (m)
pub const PHA_MIN_DIAMETER: f64 = 140.0;

// =============================================================================
// KEPLERIAN ORBITAL ELEMENTS
// =============================================================================

/// Heliocentric elements as delivered by a small-body catalog.
/// Every field is optional; partially populated records are expected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitalElements {
    /// Eccentricity (0-1 for elliptical)
    pub eccentricity: Option<f64>,
    /// Semi-major axis (AU)
    pub semi_major_axis_au: Option<f64>,
    /// Perihelion distance q (AU)
    pub perihelion_distance_au: Option<f64>,
    /// Aphelion distance Q (AU)
    pub aphelion_distance_au: Option<f64>,
    /// Inclination (degrees)
    pub inclination_deg: Option<f64>,
    /// Longitude of ascending node (degrees)
    pub longitude_ascending_node_deg: Option<f64>,
    /// Argument of perihelion (degrees)
    pub argument_perihelion_deg: Option<f64>,
    /// Mean anomaly (degrees)
    pub mean_anomaly_deg: Option<f64>,
    /// Minimum orbit intersection distance with Earth (AU)
    pub moid_au: Option<f64>,
}

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

impl OrbitalElements {
    fn semi_major_axis(&self) -> Option<f64> {
        usable(self.semi_major_axis_au).filter(|a| *a > 0.0)
    }

    fn inclination(&self) -> Option<f64> {
        usable(self.inclination_deg)
    }

    /// q, falling back to a(1 - e)
    pub fn perihelion(&self) -> Option<f64> {
        usable(self.perihelion_distance_au).or_else(|| {
            let a = self.semi_major_axis()?;
            let e = usable(self.eccentricity)?;
            Some(a * (1.0 - e))
        })
    }

    /// Q, falling back to a(1 + e)
    pub fn aphelion(&self) -> Option<f64> {
        usable(self.aphelion_distance_au).or_else(|| {
            let a = self.semi_major_axis()?;
            let e = usable(self.eccentricity)?;
            Some(a * (1.0 + e))
        })
    }
}

// =============================================================================
// APPROACH ESTIMATES
// =============================================================================

/// Circular orbital speed at the semi-major axis (m/s)
pub fn circular_speed(semi_major_axis_au: f64) -> f64 {
    (MU_SUN / (semi_major_axis_au * AU)).sqrt()
}

/// Approximate Earth-entry speed (m/s).
///
/// Combines Earth's and the asteroid's orbital speeds as a scalar sum of
/// squares, v = sqrt(v_earth² + v_ast²). This ignores the encounter geometry
/// entirely; it is not a relative-velocity vector.
pub fn estimate_approach_velocity(elements: &OrbitalElements) -> Option<f64> {
    let v_asteroid = circular_speed(elements.semi_major_axis()?);
    let velocity = (EARTH_ORBITAL_VELOCITY.powi(2) + v_asteroid.powi(2)).sqrt();
    velocity.is_finite().then_some(velocity)
}

/// Approximate entry angle (degrees above horizon): clamp(i/2 + 30, 15, 90)
pub fn estimate_impact_angle(elements: &OrbitalElements) -> Option<f64> {
    let inclination = elements.inclination()?;
    Some((inclination * 0.5 + 30.0).clamp(15.0, 90.0))
}

// =============================================================================
// ORBIT FAMILY
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrbitClass {
    Apollo,
    Aten,
    Amor,
    #[serde(rename = "Jupiter Trojan")]
    JupiterTrojan,
    #[serde(rename = "Main Belt")]
    MainBelt,
    Other,
}

impl fmt::Display for OrbitClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrbitClass::Apollo => "Apollo",
            OrbitClass::Aten => "Aten",
            OrbitClass::Amor => "Amor",
            OrbitClass::JupiterTrojan => "Jupiter Trojan",
            OrbitClass::MainBelt => "Main Belt",
            OrbitClass::Other => "Other",
        };
        f.write_str(name)
    }
}

/// Classify by semi-major axis and perihelion/aphelion against Earth's orbit
/// (Earth perihelion 0.983 AU, aphelion 1.017 AU).
pub fn classify_orbit(elements: &OrbitalElements) -> Option<OrbitClass> {
    let a = elements.semi_major_axis()?;
    let q = elements.perihelion();
    let big_q = elements.aphelion();

    let class = if a > 1.0 && q.is_some_and(|q| q < 1.017) {
        OrbitClass::Apollo
    } else if a < 1.0 && big_q.is_some_and(|big_q| big_q > 0.983) {
        OrbitClass::Aten
    } else if q.is_some_and(|q| q > 1.017 && q < 1.3) {
        OrbitClass::Amor
    } else if a > 5.2 {
        OrbitClass::JupiterTrojan
    } else if a > 2.0 && a < 3.2 {
        OrbitClass::MainBelt
    } else {
        OrbitClass::Other
    };
    Some(class)
}

// =============================================================================
// SUMMARY
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitalAnalysis {
    pub approach_velocity_ms: Option<f64>,
    pub approach_angle_deg: Option<f64>,
    pub orbit_class: Option<OrbitClass>,
    pub moid_au: Option<f64>,
    pub potentially_hazardous: bool,
}

impl OrbitalAnalysis {
    pub fn from_elements(elements: &OrbitalElements, diameter_m: f64) -> Self {
        let moid_au = usable(elements.moid_au);
        let potentially_hazardous =
            moid_au.is_some_and(|moid| moid <= PHA_MOID_AU) && diameter_m >= PHA_MIN_DIAMETER;

        Self {
            approach_velocity_ms: estimate_approach_velocity(elements),
            approach_angle_deg: estimate_impact_angle(elements),
            orbit_class: classify_orbit(elements),
            moid_au,
            potentially_hazardous,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn elements(a: f64, e: f64, i: f64) -> OrbitalElements {
        OrbitalElements {
            semi_major_axis_au: Some(a),
            eccentricity: Some(e),
            inclination_deg: Some(i),
            ..Default::default()
        }
    }

    #[test]
    fn test_circular_speed_at_one_au() {
        let v = circular_speed(1.0);
        assert!((v - 29_784.7).abs() < 5.0, "v = {}", v);
    }

    #[test]
    fn test_approach_velocity_scalar_sum() {
        let v = estimate_approach_velocity(&elements(1.0, 0.0, 0.0)).unwrap();
        let expected = (EARTH_ORBITAL_VELOCITY.powi(2) + circular_speed(1.0).powi(2)).sqrt();
        assert!((v - expected).abs() < 1e-9);
        assert!(v > 42_000.0 && v < 42_200.0);
    }

    #[test]
    fn test_missing_axis_gives_no_velocity() {
        let partial = OrbitalElements {
            inclination_deg: Some(10.0),
            ..Default::default()
        };
        assert!(estimate_approach_velocity(&partial).is_none());
        assert_eq!(estimate_impact_angle(&partial), Some(35.0));
    }

    #[test]
    fn test_impact_angle_clamped() {
        assert_eq!(estimate_impact_angle(&elements(1.0, 0.1, 0.0)), Some(30.0));
        assert_eq!(estimate_impact_angle(&elements(1.0, 0.1, 170.0)), Some(90.0));
        assert_eq!(estimate_impact_angle(&elements(1.0, 0.1, -60.0)), Some(15.0));
    }

    #[test]
    fn test_orbit_classes() {
        assert_eq!(classify_orbit(&elements(1.24, 0.69, 20.0)), Some(OrbitClass::Apollo));
        assert_eq!(classify_orbit(&elements(0.922, 0.191, 3.3)), Some(OrbitClass::Aten));
        assert_eq!(classify_orbit(&elements(1.5, 0.2, 5.0)), Some(OrbitClass::Amor));
        assert_eq!(classify_orbit(&elements(2.8, 0.12, 12.0)), Some(OrbitClass::MainBelt));
        assert_eq!(classify_orbit(&elements(5.3, 0.05, 12.0)), Some(OrbitClass::JupiterTrojan));
        assert_eq!(classify_orbit(&OrbitalElements::default()), None);
    }

    #[test]
    fn test_potentially_hazardous_flag() {
        let mut apophis = elements(0.922, 0.191, 3.34);
        apophis.moid_au = Some(0.0002);
        assert!(OrbitalAnalysis::from_elements(&apophis, 270.0).potentially_hazardous);
        assert!(!OrbitalAnalysis::from_elements(&apophis, 20.0).potentially_hazardous);
        apophis.moid_au = Some(0.2);
        assert!(!OrbitalAnalysis::from_elements(&apophis, 270.0).potentially_hazardous);
    }
}
