const EARTH_RADIUS_KM: f64 = 6371.0;
const KM_PER_MILE: f64 = 1.609_344;

/// Calculate distance between two coordinates using Haversine formula
/// Returns distance in kilometers
pub fn haversine_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

pub fn km_to_miles(km: f64) -> f64 {
    km / KM_PER_MILE
}

/// Format a distance in miles the way the maps service does ("12.3 mi")
pub fn format_miles(miles: f64) -> String {
    if miles < 0.1 {
        "1 ft".to_string()
    } else {
        format!("{:.1} mi", miles)
    }
}

/// Format a travel time the way the maps service does ("25 mins", "1 hour 5 mins")
pub fn format_duration(total_minutes: u64) -> String {
    let minutes = total_minutes.max(1);
    let hours = minutes / 60;
    let rest = minutes % 60;

    let unit = |n: u64, one: &str, many: &str| format!("{} {}", n, if n == 1 { one } else { many });

    match (hours, rest) {
        (0, m) => unit(m, "min", "mins"),
        (h, 0) => unit(h, "hour", "hours"),
        (h, m) => format!("{} {}", unit(h, "hour", "hours"), unit(m, "min", "mins")),
    }
}
