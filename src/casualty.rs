// Casualty Estimator
// Converts the damage gradient into population-weighted casualty tiers

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::damage::{DamageZone, ZoneKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasualtyTier {
    Fatality,
    SevereInjury,
    ModerateInjury,
    LightInjury,
}

/// Casualty tier and fraction of the exposed population it applies to
pub fn lethality(kind: ZoneKind) -> (CasualtyTier, f64) {
    match kind {
        ZoneKind::ThermalBurns => (CasualtyTier::Fatality, 0.4),
        ZoneKind::TotalDestruction => (CasualtyTier::Fatality, 0.9),
        ZoneKind::SevereDamage => (CasualtyTier::SevereInjury, 0.6),
        ZoneKind::ModerateDamage => (CasualtyTier::ModerateInjury, 0.3),
        ZoneKind::LightDamage => (CasualtyTier::LightInjury, 0.1),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasualtyEstimate {
    pub fatalities: u64,
    pub severe_injuries: u64,
    pub moderate_injuries: u64,
    pub light_injuries: u64,
}

/// Ring areas (km²) between consecutive zones of a largest-first gradient.
///
/// The innermost zone counts its full disc. Rings are clamped to zero if
/// the radii are not strictly decreasing.
pub fn annulus_areas_km2(zones: &[DamageZone]) -> Vec<f64> {
    zones
        .iter()
        .enumerate()
        .map(|(i, zone)| {
            let outer_km = zone.radius_m / 1000.0;
            let inner_km = zones.get(i + 1).map_or(0.0, |z| z.radius_m / 1000.0);
            let area = PI * (outer_km * outer_km - inner_km * inner_km);
            if area.is_finite() && area >= 0.0 {
                area
            } else {
                tracing::warn!(zone = %zone.kind, area, "clamping inconsistent annulus to zero");
                0.0
            }
        })
        .collect()
}

pub fn estimate_casualties(zones: &[DamageZone], population_density: f64) -> CasualtyEstimate {
    let mut fatalities = 0.0;
    let mut severe = 0.0;
    let mut moderate = 0.0;
    let mut light = 0.0;

    for (zone, area) in zones.iter().zip(annulus_areas_km2(zones)) {
        let (tier, fraction) = lethality(zone.kind);
        let affected = area * population_density * fraction;
        match tier {
            CasualtyTier::Fatality => fatalities += affected,
            CasualtyTier::SevereInjury => severe += affected,
            CasualtyTier::ModerateInjury => moderate += affected,
            CasualtyTier::LightInjury => light += affected,
        }
    }

    CasualtyEstimate {
        fatalities: to_count(fatalities),
        severe_injuries: to_count(severe),
        moderate_injuries: to_count(moderate),
        light_injuries: to_count(light),
    }
}

/// Floor to a whole number of people; negatives and NaN become zero
fn to_count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.floor() as u64
    } else {
        0
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(kind: ZoneKind, radius_m: f64) -> DamageZone {
        DamageZone { kind, radius_m }
    }

    #[test]
    fn test_annuli_partition_outer_disc() {
        let zones = vec![
            zone(ZoneKind::LightDamage, 3000.0),
            zone(ZoneKind::ModerateDamage, 2000.0),
            zone(ZoneKind::TotalDestruction, 1000.0),
        ];
        let areas = annulus_areas_km2(&zones);
        assert!((areas[0] - PI * 5.0).abs() < 1e-12);
        assert!((areas[1] - PI * 3.0).abs() < 1e-12);
        assert!((areas[2] - PI * 1.0).abs() < 1e-12);
        let total: f64 = areas.iter().sum();
        assert!((total - PI * 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_order_radii_clamped() {
        let zones = vec![
            zone(ZoneKind::ModerateDamage, 1000.0),
            zone(ZoneKind::LightDamage, 2000.0),
        ];
        let areas = annulus_areas_km2(&zones);
        assert_eq!(areas[0], 0.0);
        assert!(areas[1] > 0.0);
    }

    #[test]
    fn test_tiers_accumulate() {
        let zones = vec![
            zone(ZoneKind::LightDamage, 10_000.0),
            zone(ZoneKind::ThermalBurns, 8_000.0),
            zone(ZoneKind::ModerateDamage, 6_000.0),
            zone(ZoneKind::SevereDamage, 4_000.0),
            zone(ZoneKind::TotalDestruction, 2_000.0),
        ];
        let estimate = estimate_casualties(&zones, 100.0);

        let ring = |outer: f64, inner: f64| PI * (outer * outer - inner * inner);
        let fatalities = ring(8.0, 6.0) * 100.0 * 0.4 + ring(2.0, 0.0) * 100.0 * 0.9;
        assert_eq!(estimate.fatalities, fatalities.floor() as u64);
        assert_eq!(estimate.severe_injuries, (ring(4.0, 2.0) * 100.0 * 0.6).floor() as u64);
        assert_eq!(estimate.moderate_injuries, (ring(6.0, 4.0) * 100.0 * 0.3).floor() as u64);
        assert_eq!(estimate.light_injuries, (ring(10.0, 8.0) * 100.0 * 0.1).floor() as u64);
    }

    #[test]
    fn test_empty_area_no_casualties() {
        let zones = vec![zone(ZoneKind::LightDamage, 5_000.0)];
        assert_eq!(estimate_casualties(&zones, 0.0), CasualtyEstimate::default());
        assert_eq!(estimate_casualties(&[], 1000.0), CasualtyEstimate::default());
    }
}
