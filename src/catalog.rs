// Small-Body Catalog Records
// Maps SBDB-style lookup records into resolver inputs; the lookup service itself is external

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ImpactError, Result};
use crate::orbital::OrbitalElements;
use crate::physics_engine::G;
use crate::resolver::AsteroidInput;

/// Albedo assumed when converting absolute magnitude to diameter
pub const DEFAULT_ALBEDO: f64 = 0.14;

// =============================================================================
// RECORD TYPES
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub object: Option<CatalogObject>,
    pub orbit: Option<CatalogOrbit>,
    pub phys_par: Option<Vec<CatalogField>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogObject {
    pub fullname: Option<String>,
    pub des: Option<String>,
    pub pdes: Option<String>,
    pub neo: Option<bool>,
    pub pha: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogOrbit {
    pub moid: Option<String>,
    pub elements: Option<Vec<CatalogField>>,
}

/// Name/value pair; the catalog delivers numbers as strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogField {
    pub name: String,
    pub value: Option<String>,
    pub units: Option<String>,
}

/// Search hit returned by the external lookup service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCandidate {
    pub pdes: String,
    pub name: String,
}

/// Contract of the external small-body lookup service.
pub trait SmallBodyCatalog {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<CatalogCandidate>>;
    fn lookup(&self, name: &str) -> Result<CatalogRecord>;
}

// =============================================================================
// MAPPING
// =============================================================================

fn field_map(fields: Option<&Vec<CatalogField>>) -> BTreeMap<&str, f64> {
    fields
        .map(|fields| {
            fields
                .iter()
                .filter_map(|f| {
                    let value = f.value.as_ref()?.trim().parse::<f64>().ok()?;
                    value.is_finite().then_some((f.name.as_str(), value))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Diameter (km) from absolute magnitude H and geometric albedo
pub fn diameter_from_magnitude(absolute_magnitude: f64, albedo: f64) -> f64 {
    1329.0 / albedo.sqrt() * 10f64.powf(-absolute_magnitude / 5.0)
}

impl CatalogRecord {
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| ImpactError::UpstreamUnavailable(format!("Failed to parse record: {}", e)))
    }

    pub fn name(&self) -> Option<&str> {
        let object = self.object.as_ref()?;
        object
            .fullname
            .as_deref()
            .or(object.des.as_deref())
            .or(object.pdes.as_deref())
            .map(str::trim)
    }

    pub fn orbital_elements(&self) -> Option<OrbitalElements> {
        let orbit = self.orbit.as_ref()?;
        let elements = field_map(orbit.elements.as_ref());
        let moid_au = orbit
            .moid
            .as_ref()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|m| m.is_finite());

        if elements.is_empty() && moid_au.is_none() {
            return None;
        }

        Some(OrbitalElements {
            eccentricity: elements.get("e").copied(),
            semi_major_axis_au: elements.get("a").copied(),
            perihelion_distance_au: elements.get("q").copied(),
            aphelion_distance_au: elements.get("ad").copied(),
            inclination_deg: elements.get("i").copied(),
            longitude_ascending_node_deg: elements.get("om").copied(),
            argument_perihelion_deg: elements.get("w").copied(),
            mean_anomaly_deg: elements.get("ma").copied(),
            moid_au,
        })
    }

    /// Convert into raw resolver input.
    ///
    /// Missing physical parameters stay unset so the resolver falls back to
    /// composition defaults. Fails only when no diameter can be obtained.
    pub fn to_input(&self) -> Result<AsteroidInput> {
        let phys = field_map(self.phys_par.as_ref());
        let albedo = phys.get("albedo").copied().filter(|a| *a > 0.0);

        let diameter_km = phys
            .get("diameter")
            .copied()
            .filter(|d| *d > 0.0)
            .or_else(|| {
                let h = phys.get("H").copied()?;
                Some(diameter_from_magnitude(h, albedo.unwrap_or(DEFAULT_ALBEDO)))
            })
            .ok_or_else(|| {
                ImpactError::UpstreamUnavailable(format!(
                    "record for '{}' has neither diameter nor absolute magnitude",
                    self.name().unwrap_or("unknown")
                ))
            })?;

        // GM in km³/s², density in g/cm³
        let mass_kg = phys
            .get("GM")
            .copied()
            .filter(|gm| *gm > 0.0)
            .map(|gm| gm * 1e9 / G);
        let density_kg_m3 = phys
            .get("density")
            .copied()
            .filter(|d| *d > 0.0)
            .map(|d| d * 1000.0);

        Ok(AsteroidInput {
            diameter_m: diameter_km * 1000.0,
            mass_kg,
            density_kg_m3,
            composition: None,
            geometric_albedo: albedo,
            color_b_v: phys.get("BV").copied(),
            color_u_b: phys.get("UB").copied(),
            orbital_elements: self.orbital_elements(),
        })
    }
}

// =============================================================================
// IN-MEMORY CATALOG
// =============================================================================

/// Catalog backed by records already fetched by the caller.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    records: BTreeMap<String, CatalogRecord>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: CatalogRecord) -> Result<()> {
        let name = record
            .name()
            .ok_or_else(|| ImpactError::UpstreamUnavailable("record has no object name".into()))?
            .to_string();
        self.records.insert(name, record);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SmallBodyCatalog for StaticCatalog {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<CatalogCandidate>> {
        let needle = query.trim().to_lowercase();
        Ok(self
            .records
            .iter()
            .filter(|(name, _)| name.to_lowercase().contains(&needle))
            .take(limit)
            .map(|(name, record)| CatalogCandidate {
                pdes: record
                    .object
                    .as_ref()
                    .and_then(|o| o.pdes.clone().or_else(|| o.des.clone()))
                    .unwrap_or_default(),
                name: name.clone(),
            })
            .collect())
    }

    fn lookup(&self, name: &str) -> Result<CatalogRecord> {
        let needle = name.trim().to_lowercase();
        self.records
            .iter()
            .find(|(key, _)| key.to_lowercase() == needle)
            .or_else(|| {
                self.records
                    .iter()
                    .find(|(key, _)| key.to_lowercase().contains(&needle))
            })
            .map(|(_, record)| record.clone())
            .ok_or_else(|| ImpactError::UpstreamUnavailable(format!("no record for '{}'", name)))
    }
}

// =============================================================================
// TESTS
// =============================================================================
