use crate::error::GeoError;
use serde_json::Value;
use std::fmt;

const NOT_AVAILABLE: &str = "N/A";

/// A successful geolocation answer. Every field may be absent upstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoRecord {
    pub query: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub region_name: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub isp: Option<String>,
    pub org: Option<String>,
}

pub type GeoResult = Result<GeoRecord, GeoError>;

impl GeoRecord {
    /// Pull the known fields out of an API body, ignoring anything else.
    pub fn from_value(body: &Value) -> Self {
        let text = |key: &str| body[key].as_str().map(|s| s.to_string());

        Self {
            query: text("query"),
            country: text("country"),
            country_code: text("countryCode"),
            region_name: text("regionName"),
            region: text("region"),
            city: text("city"),
            lat: body["lat"].as_f64(),
            lon: body["lon"].as_f64(),
            isp: text("isp"),
            org: text("org"),
        }
    }
}

fn or_na<T: fmt::Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

impl fmt::Display for GeoRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- IP Geolocation ---")?;
        writeln!(f, "IP: {}", or_na(&self.query))?;
        writeln!(
            f,
            "Country: {} ({})",
            or_na(&self.country),
            or_na(&self.country_code)
        )?;
        writeln!(
            f,
            "Region: {} ({})",
            or_na(&self.region_name),
            or_na(&self.region)
        )?;
        writeln!(f, "City: {}", or_na(&self.city))?;
        writeln!(f, "Coordinates: {}, {}", or_na(&self.lat), or_na(&self.lon))?;
        writeln!(f, "ISP: {}", or_na(&self.isp))?;
        writeln!(f, "Organization: {}", or_na(&self.org))?;
        write!(f, "----------------------")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_full() {
        let body = json!({
            "status": "success",
            "query": "8.8.8.8",
            "country": "United States",
            "countryCode": "US",
            "regionName": "Virginia",
            "region": "VA",
            "city": "Ashburn",
            "lat": 39.03,
            "lon": -77.5,
            "isp": "Google LLC",
            "org": "Google Public DNS",
            "as": "AS15169 Google LLC"
        });

        let record = GeoRecord::from_value(&body);
        assert_eq!(record.query.as_deref(), Some("8.8.8.8"));
        assert_eq!(record.country_code.as_deref(), Some("US"));
        assert_eq!(record.region_name.as_deref(), Some("Virginia"));
        assert_eq!(record.lat, Some(39.03));
        assert_eq!(record.lon, Some(-77.5));
        assert_eq!(record.org.as_deref(), Some("Google Public DNS"));
    }

    #[test]
    fn test_missing_and_mistyped_fields_are_none() {
        let body = json!({ "query": "1.1.1.1", "lat": "not a number", "city": 42 });
        let record = GeoRecord::from_value(&body);
        assert_eq!(record.query.as_deref(), Some("1.1.1.1"));
        assert_eq!(record.lat, None);
        assert_eq!(record.city, None);
        assert_eq!(record.country, None);
    }

    #[test]
    fn test_render_fills_na() {
        let record = GeoRecord {
            query: Some("1.1.1.1".to_string()),
            country: Some("Australia".to_string()),
            lat: Some(-33.494),
            ..Default::default()
        };

        let out = record.to_string();
        assert!(out.starts_with("--- IP Geolocation ---\n"));
        assert!(out.contains("IP: 1.1.1.1\n"));
        assert!(out.contains("Country: Australia (N/A)\n"));
        assert!(out.contains("Region: N/A (N/A)\n"));
        assert!(out.contains("Coordinates: -33.494, N/A\n"));
        assert!(out.contains("Organization: N/A\n"));
        assert!(out.ends_with("----------------------"));
    }
}
