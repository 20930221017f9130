use serde::{Deserialize, Serialize};

/// A stored geolocation record, keyed by IP address. The store holds at most
/// one record per `ip`; records are never updated in place.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Geolocation {
    pub ip: String,
    pub ip_type: String,
    pub city: String,
    pub country: String,
    pub region: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Request body for creating a record: an IP address or a URL/hostname.
#[derive(Deserialize, Debug)]
pub struct GeolocationRequest {
    pub geo_identifier: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ManyGeolocations {
    pub geolocations: Vec<Geolocation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn geolocation_serializes_with_nullable_region() {
        let record = Geolocation {
            ip: "93.184.216.34".to_string(),
            ip_type: "ipv4".to_string(),
            city: "Lombard".to_string(),
            country: "United States".to_string(),
            region: None,
            latitude: 41.877628326416016,
            longitude: -88.0197982788086,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "ip": "93.184.216.34",
                "ip_type": "ipv4",
                "city": "Lombard",
                "country": "United States",
                "region": null,
                "latitude": 41.877628326416016,
                "longitude": -88.0197982788086,
            })
        );
    }

    #[test]
    fn geolocation_request_parses_the_identifier() {
        let request: GeolocationRequest =
            serde_json::from_value(json!({ "geo_identifier": "example.com" })).unwrap();
        assert_eq!(request.geo_identifier, "example.com");
    }
}
