use crate::model::VehicleListing;
use serde_json::Value;
use tracing::warn;

/// Turns a `/search` or `/scrape/{location}` body into a flat listing collection.
///
/// A flat array is used as-is. A mapping keyed by location yields the entry for
/// `location` when it exists, otherwise every entry flattened in the order the
/// backend sent them.
/// Bodies matching neither shape normalize to an empty collection.
pub fn normalize_listings(data: Value, location: &str) -> Vec<VehicleListing> {
    match data {
        Value::Array(items) => collect_listings(items),
        Value::Object(map) => {
            let selected = map.get(location).filter(|v| !v.is_null()).cloned();
            match selected {
                Some(Value::Array(items)) => collect_listings(items),
                Some(other) => {
                    warn!("Entry for '{}' is not a list: {}", location, other);
                    Vec::new()
                }
                None => map
                    .into_iter()
                    .flat_map(|(key, value)| match value {
                        Value::Array(items) => items,
                        other => {
                            warn!("Ignoring non-list entry '{}': {}", key, other);
                            Vec::new()
                        }
                    })
                    .filter_map(parse_listing)
                    .collect(),
            }
        }
        other => {
            warn!("Unexpected response shape: {}", other);
            Vec::new()
        }
    }
}

fn collect_listings(items: Vec<Value>) -> Vec<VehicleListing> {
    items.into_iter().filter_map(parse_listing).collect()
}

fn parse_listing(item: Value) -> Option<VehicleListing> {
    match serde_json::from_value::<VehicleListing>(item) {
        Ok(listing) => Some(listing),
        Err(e) => {
            warn!("Skipping malformed listing: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn titles(listings: &[VehicleListing]) -> Vec<&str> {
        listings.iter().filter_map(|l| l.title()).collect()
    }

    fn by_location() -> Value {
        json!({
            "Ottawa": [
                {"title": "2008 HONDA CIVIC", "branch": "Ottawa"},
                {"title": "2012 FORD ESCAPE", "branch": "Ottawa"},
                {"title": "2005 TOYOTA COROLLA", "branch": "Ottawa"}
            ],
            "Cornwall": [
                {"title": "2010 MAZDA 3", "branch": "Cornwall"},
                {"title": "2014 KIA RIO", "branch": "Cornwall"}
            ]
        })
    }

    #[test]
    fn requested_location_is_selected_from_mapping() {
        let listings = normalize_listings(by_location(), "Ottawa");
        assert_eq!(
            titles(&listings),
            vec!["2008 HONDA CIVIC", "2012 FORD ESCAPE", "2005 TOYOTA COROLLA"]
        );
    }

    #[test]
    fn unknown_location_flattens_every_entry() {
        let listings = normalize_listings(by_location(), "All Locations");
        assert_eq!(listings.len(), 5);
    }

    #[test]
    fn flat_array_is_used_as_is() {
        let data = json!([{"title": "2001 DODGE NEON"}, {"title": "2003 DODGE CARAVAN"}]);
        assert_eq!(normalize_listings(data, "Ottawa").len(), 2);
    }

    #[test]
    fn unexpected_shapes_become_empty() {
        assert!(normalize_listings(json!("nope"), "Ottawa").is_empty());
        assert!(normalize_listings(Value::Null, "").is_empty());
        assert!(normalize_listings(json!({"error": "driver crashed"}), "").is_empty());
    }

    #[test]
    fn malformed_items_are_skipped() {
        let data = json!([{"title": "2007 CHEVROLET COBALT"}, 42, {"title": 7}]);
        assert_eq!(titles(&normalize_listings(data, "")), vec!["2007 CHEVROLET COBALT"]);
    }

    #[test]
    fn empty_entry_for_location_stays_empty() {
        let data = json!({"Gatineau": [], "Ottawa": [{"title": "2009 NISSAN VERSA"}]});
        assert!(normalize_listings(data, "Gatineau").is_empty());
    }
}
