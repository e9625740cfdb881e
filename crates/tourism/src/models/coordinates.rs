use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Structured form of an itinerary, one entry per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSet {
    pub days: Vec<DayPlan>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: u32,
    pub locations: Vec<Location>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    pub address: String,
    pub name: String,
}

impl CoordinateSet {
    /// Parse the raw text returned by the coordinates stage.
    ///
    /// The text must be the bare JSON document; markdown fences are rejected.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Every location across all days, in itinerary order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.days.iter().flat_map(|day| day.locations.iter())
    }
}

impl FromStr for CoordinateSet {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARIS: &str = r#"{
        "days": [
            {
                "day": 1,
                "locations": [
                    {"lat": 48.8606, "lon": 2.3376, "address": "Rue de Rivoli, 75001 Paris", "name": "Louvre Museum"},
                    {"lat": 48.8600, "lon": 2.3266, "address": "1 Rue de la Legion d'Honneur, 75007 Paris", "name": "Musee d'Orsay"}
                ]
            },
            {
                "day": 2,
                "locations": [
                    {"lat": 48.8867, "lon": 2.3431, "address": "35 Rue du Chevalier de la Barre, 75018 Paris", "name": "Sacre-Coeur"}
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_coordinate_set() {
        let set = CoordinateSet::parse(PARIS).unwrap();

        assert_eq!(set.days.len(), 2);
        assert_eq!(set.days[0].day, 1);
        assert_eq!(set.days[0].locations[0].name, "Louvre Museum");
        assert_eq!(set.days[1].locations[0].lat, 48.8867);
    }

    #[test]
    fn test_locations_are_flattened_in_order() {
        let set: CoordinateSet = PARIS.parse().unwrap();
        let names: Vec<&str> = set.locations().map(|l| l.name.as_str()).collect();

        assert_eq!(names, vec!["Louvre Museum", "Musee d'Orsay", "Sacre-Coeur"]);
    }

    #[test]
    fn test_parse_rejects_markdown_fence() {
        let fenced = format!("```json\n{}\n```", PARIS);
        assert!(CoordinateSet::parse(&fenced).is_err());
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        let text = r#"{"days": [{"day": 1, "locations": [{"lat": 1.0, "lon": 2.0}]}]}"#;
        assert!(CoordinateSet::parse(text).is_err());
    }
}
