use crate::core::Waypoint;
use crate::route::RouteError;
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

/// Public Nominatim instance
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim's usage policy requires an identifying agent
const USER_AGENT: &str = "GPS-Location-Simulator/1.0";

/// Reverse geocoder turning coordinates into a short place name
pub struct Geocoder {
    client: reqwest::Client,
    base_url: String,
}

impl Geocoder {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RouteError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Place name for a coordinate, or the formatted coordinate on failure
    pub async fn location_name(&self, waypoint: Waypoint) -> String {
        match self.lookup(waypoint).await {
            Ok(Some(name)) => name,
            Ok(None) => waypoint.to_string(),
            Err(e) => {
                warn!("Could not get location name: {}", e);
                waypoint.to_string()
            }
        }
    }

    async fn lookup(&self, waypoint: Waypoint) -> Result<Option<String>, RouteError> {
        let url = format!(
            "{}/reverse?lat={}&lon={}&format=json&accept-language=en",
            self.base_url, waypoint.lat, waypoint.lon
        );
        let data: Value = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(format_place(&data))
    }
}

/// Build `"<first component> - <city> - <country>"` from a reverse response,
/// falling back to `display_name`
pub fn format_place(data: &Value) -> Option<String> {
    if let Some(address) = data.get("address").and_then(Value::as_object) {
        let mut parts: Vec<&str> = Vec::new();

        if let Some(first) = address.values().next().and_then(Value::as_str) {
            parts.push(first);
        }
        for key in ["city", "country"] {
            if let Some(value) = address.get(key).and_then(Value::as_str) {
                parts.push(value);
            }
        }

        if !parts.is_empty() {
            return Some(parts.join(" - "));
        }
    }

    data.get("display_name")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_place_from_address() {
        let data = json!({
            "display_name": "Ferry Building, San Francisco, California, United States",
            "address": {
                "building": "Ferry Building",
                "road": "The Embarcadero",
                "city": "San Francisco",
                "country": "United States"
            }
        });
        assert_eq!(
            format_place(&data).unwrap(),
            "Ferry Building - San Francisco - United States"
        );
    }

    #[test]
    fn test_format_place_falls_back_to_display_name() {
        let data = json!({"display_name": "Somewhere", "address": {}});
        assert_eq!(format_place(&data).unwrap(), "Somewhere");
        assert_eq!(format_place(&json!({"error": "Unable to geocode"})), None);
    }

    #[tokio::test]
    async fn test_location_name_falls_back_to_coordinates() {
        // Nothing listens on the discard port
        let geocoder = Geocoder::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        let name = geocoder.location_name(Waypoint { lat: 1.0, lon: 2.0 }).await;
        assert_eq!(name, "1.00000, 2.00000");
    }
}
