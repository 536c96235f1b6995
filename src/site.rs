// Impact Site Describer
// Coarse geography for a supplied impact point: land/ocean, nearest city, UTC offset

use serde::{Deserialize, Serialize};

/// Mean Earth radius (km)
pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0;

/// Reference cities (name, latitude, longitude)
pub const MAJOR_CITIES: [(&str, f64, f64); 10] = [
    ("New York", 40.7128, -74.0060),
    ("London", 51.5074, -0.1278),
    ("Tokyo", 35.6762, 139.6503),
    ("Sydney", -33.8688, 151.2093),
    ("Cairo", 30.0444, 31.2357),
    ("Rio de Janeiro", -22.9068, -43.1729),
    ("Mumbai", 19.0760, 72.8777),
    ("Los Angeles", 34.0522, -118.2437),
    ("Beijing", 39.9042, 116.4074),
    ("Moscow", 55.7558, 37.6176),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiteRegion {
    Land,
    Ocean,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactSite {
    pub latitude: f64,
    pub longitude: f64,
    pub region: SiteRegion,
    pub nearest_city: String,
    pub distance_to_city_km: f64,
    pub utc_offset_hours: i32,
}

/// Great-circle distance (km) via the haversine formula
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_MEAN_RADIUS_KM * a.sqrt().min(1.0).asin()
}

/// Very rough ocean mask: open-ocean longitude bands between ±60° latitude,
/// everything poleward of 60°S, and high northern latitudes away from Eurasia.
pub fn classify_region(latitude: f64, longitude: f64) -> SiteRegion {
    let mid_latitudes = (-60.0..=60.0).contains(&latitude);
    let ocean = (mid_latitudes && longitude <= -30.0)
        || (mid_latitudes && longitude >= 30.0)
        || latitude < -60.0
        || (latitude > 60.0 && longitude.abs() > 30.0);
    if ocean {
        SiteRegion::Ocean
    } else {
        SiteRegion::Land
    }
}

pub fn describe_site(latitude: f64, longitude: f64) -> ImpactSite {
    let (nearest_city, distance_to_city_km) = MAJOR_CITIES
        .iter()
        .map(|&(name, lat, lon)| (name, haversine_km(latitude, longitude, lat, lon)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap_or(("", f64::NAN));

    ImpactSite {
        latitude,
        longitude,
        region: classify_region(latitude, longitude),
        nearest_city: nearest_city.to_string(),
        distance_to_city_km,
        utc_offset_hours: (longitude / 15.0).trunc() as i32,
    }
}
