// Core structs: VehicleListing, AnalysisRecord, derived stats and errors
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// One salvage-yard vehicle as returned by `/search` and `/scrape/{location}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VehicleListing {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub date_listed: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub detail_url: Option<String>,
    #[serde(default)]
    pub row: Option<String>,
}

impl VehicleListing {
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    pub fn branch(&self) -> Option<&str> {
        non_empty(&self.branch)
    }

    pub fn date_listed(&self) -> Option<&str> {
        non_empty(&self.date_listed)
    }

    pub fn image_url(&self) -> Option<&str> {
        non_empty(&self.image_url)
    }

    pub fn detail_url(&self) -> Option<&str> {
        non_empty(&self.detail_url)
    }

    pub fn row(&self) -> Option<&str> {
        non_empty(&self.row).filter(|r| *r != "N/A")
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

/// Sold items grouped by name for one vehicle title.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisRecord {
    pub item_name: String,
    #[serde(deserialize_with = "lenient_price")]
    pub average_price: f64,
    pub frequency: u64,
    #[serde(default)]
    pub date_range: Option<DateRange>,
}

/// Body of `/scrape_ebay/{title}`.
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub analysis: Vec<AnalysisRecord>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Accepts both `412.5` and `"412.50"`.
fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Price {
        Number(f64),
        Text(String),
    }

    match Price::deserialize(deserializer)? {
        Price::Number(n) => Ok(n),
        Price::Text(s) => s
            .trim()
            .trim_start_matches('$')
            .parse::<f64>()
            .map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceBucket {
    pub min: i64,
    pub max: i64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub min_price: f64,
    pub max_price: f64,
    pub total_listings: u64,
    pub date_start: String,
    pub date_end: String,
}

/// Form fields posted to `/search`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchForm {
    pub make: String,
    pub model: String,
    pub year: String,
    pub location: String,
}

impl SearchForm {
    pub fn as_pairs(&self) -> [(&'static str, &str); 4] {
        [
            ("make", self.make.trim()),
            ("model", self.model.trim()),
            ("year", self.year.trim()),
            ("location", self.location.trim()),
        ]
    }
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend responded with status {0}")]
    Status(reqwest::StatusCode),
    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_treats_blank_fields_as_missing() {
        let listing: VehicleListing =
            serde_json::from_str(r#"{"title":"2009 FORD FOCUS","branch":"  ","date_listed":""}"#)
                .unwrap();
        assert_eq!(listing.title(), Some("2009 FORD FOCUS"));
        assert_eq!(listing.branch(), None);
        assert_eq!(listing.date_listed(), None);
    }

    #[test]
    fn analysis_record_accepts_string_prices() {
        let record: AnalysisRecord = serde_json::from_str(
            r#"{"item_name":"Alternator","average_price":"245.50","frequency":3}"#,
        )
        .unwrap();
        assert_eq!(record.average_price, 245.5);
        assert!(record.date_range.is_none());
    }

    #[test]
    fn analysis_response_defaults_missing_analysis() {
        let body: AnalysisResponse =
            serde_json::from_str(r#"{"error":"browser failed"}"#).unwrap();
        assert!(body.analysis.is_empty());
        assert_eq!(body.error.as_deref(), Some("browser failed"));
    }

    #[test]
    fn search_form_trims_values() {
        let form = SearchForm {
            make: " Honda ".into(),
            model: "Civic".into(),
            year: "2015 ".into(),
            location: String::new(),
        };
        assert_eq!(form.as_pairs()[0], ("make", "Honda"));
        assert_eq!(form.as_pairs()[2], ("year", "2015"));
    }
}
