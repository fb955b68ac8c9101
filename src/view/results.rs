use crate::links::build_search_url;
use crate::model::VehicleListing;
use crate::utils::format_clock;
use crate::view::analysis::AnalysisView;
use chrono::{DateTime, Local};

pub const LOADING: &str = "Loading...";
pub const NO_VEHICLES: &str = "No vehicles found to display.";

const NO_TITLE: &str = "No Title Available";
const NO_LOCATION: &str = "Location Not Specified";
const NO_DATE: &str = "Date Not Specified";

/// What the results area currently shows.
#[derive(Debug, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Message(String),
    ResultsList,
    AnalysisDetail(Box<AnalysisView>),
}

/// Display model for one listing.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleCard {
    pub number: usize,
    pub title: String,
    pub location: String,
    pub date_listed: String,
    pub row: Option<String>,
    pub image_url: Option<String>,
    pub detail_url: Option<String>,
    pub marketplace_url: String,
}

impl VehicleCard {
    fn from_listing(number: usize, listing: &VehicleListing) -> Self {
        let title = listing.title().unwrap_or(NO_TITLE).to_string();
        Self {
            number,
            marketplace_url: build_search_url(&title),
            title,
            location: listing.branch().unwrap_or(NO_LOCATION).to_string(),
            date_listed: listing.date_listed().unwrap_or(NO_DATE).to_string(),
            row: listing.row().map(String::from),
            image_url: listing.image_url().map(String::from),
            detail_url: listing.detail_url().map(String::from),
        }
    }

    /// Title sent to `/scrape_ebay`. Cards with the same title share one analysis.
    pub fn analysis_key(&self) -> &str {
        &self.title
    }
}

/// Owns the single results area and the last list it displayed, so leaving an
/// analysis panel goes back to that list without another request.
#[derive(Debug, Default)]
pub struct ResultsView {
    state: ViewState,
    listings: Vec<VehicleListing>,
    displayed_at: Option<DateTime<Local>>,
}

impl ResultsView {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn show_loading(&mut self) {
        self.state = ViewState::Loading;
    }

    pub fn show_message(&mut self, text: impl Into<String>) {
        self.state = ViewState::Message(text.into());
    }

    /// Stores `listings` as the current list and shows them as cards.
    pub fn render(&mut self, listings: Vec<VehicleListing>) {
        self.state = if listings.is_empty() {
            ViewState::Message(NO_VEHICLES.to_string())
        } else {
            ViewState::ResultsList
        };
        self.listings = listings;
        self.displayed_at = Some(Local::now());
    }

    pub fn show_analysis(&mut self, view: AnalysisView) {
        self.state = ViewState::AnalysisDetail(Box::new(view));
    }

    /// Leaves the analysis panel for the stored list. Returns false when no
    /// analysis panel is mounted. The list keeps the time it was fetched.
    pub fn back(&mut self) -> bool {
        if !matches!(self.state, ViewState::AnalysisDetail(_)) {
            return false;
        }
        self.state = if self.listings.is_empty() {
            ViewState::Message(NO_VEHICLES.to_string())
        } else {
            ViewState::ResultsList
        };
        true
    }

    pub fn analysis(&self) -> Option<&AnalysisView> {
        match &self.state {
            ViewState::AnalysisDetail(view) => Some(view.as_ref()),
            _ => None,
        }
    }

    pub fn analysis_mut(&mut self) -> Option<&mut AnalysisView> {
        match &mut self.state {
            ViewState::AnalysisDetail(view) => Some(view.as_mut()),
            _ => None,
        }
    }

    pub fn cards(&self) -> Vec<VehicleCard> {
        self.listings
            .iter()
            .enumerate()
            .map(|(i, listing)| VehicleCard::from_listing(i + 1, listing))
            .collect()
    }

    /// Card by its 1-based number, only while the list is on screen.
    pub fn card(&self, number: usize) -> Option<VehicleCard> {
        if !matches!(self.state, ViewState::ResultsList) {
            return None;
        }
        let listing = self.listings.get(number.checked_sub(1)?)?;
        Some(VehicleCard::from_listing(number, listing))
    }

    pub fn draw(&self) -> String {
        match &self.state {
            ViewState::Idle => "Type /help to see the available commands.\n".to_string(),
            ViewState::Loading => format!("{}\n", LOADING),
            ViewState::Message(text) => format!("{}\n", text),
            ViewState::ResultsList => self.draw_cards(),
            ViewState::AnalysisDetail(view) => view.draw(),
        }
    }

    fn draw_cards(&self) -> String {
        let mut out = format!("Showing {} vehicles", self.listings.len());
        if let Some(at) = self.displayed_at {
            out.push_str(&format!(" (updated {})", format_clock(at)));
        }
        out.push_str("\n\n");

        for card in self.cards() {
            out.push_str(&format!("[{}] {}\n", card.number, card.title));
            out.push_str(&format!("    Location: {}\n", card.location));
            out.push_str(&format!("    Date Listed: {}\n", card.date_listed));
            if let Some(row) = &card.row {
                out.push_str(&format!("    Row: {}\n", row));
            }
            if let Some(url) = &card.image_url {
                out.push_str(&format!("    Photo: {}\n", url));
            }
            if let Some(url) = &card.detail_url {
                out.push_str(&format!("    Details: {}\n", url));
            }
            out.push_str(&format!("    eBay Price Comparison: {}\n", card.marketplace_url));
            out.push_str(&format!("    View Price Analysis: /analysis {}\n\n", card.number));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnalysisRecord;
    use crate::view::chart::BarChart;

    fn listing(title: &str, branch: &str, date: &str) -> VehicleListing {
        VehicleListing {
            title: Some(title.to_string()),
            branch: Some(branch.to_string()),
            date_listed: Some(date.to_string()),
            ..VehicleListing::default()
        }
    }

    fn analysis() -> AnalysisView {
        let records = vec![AnalysisRecord {
            item_name: "Door handle".to_string(),
            average_price: 180.0,
            frequency: 2,
            date_range: None,
        }];
        AnalysisView::new(records, "2008 HONDA CIVIC", &BarChart::default()).unwrap()
    }

    #[test]
    fn starts_idle() {
        assert!(matches!(ResultsView::new().state(), ViewState::Idle));
    }

    #[test]
    fn empty_list_shows_message() {
        let mut view = ResultsView::new();
        view.render(Vec::new());
        assert_eq!(view.draw(), "No vehicles found to display.\n");
    }

    #[test]
    fn cards_fall_back_for_missing_fields() {
        let mut view = ResultsView::new();
        view.render(vec![VehicleListing::default()]);
        let card = view.card(1).unwrap();
        assert_eq!(card.title, "No Title Available");
        assert_eq!(card.location, "Location Not Specified");
        assert_eq!(card.date_listed, "Date Not Specified");
        assert!(card.marketplace_url.contains("_nkw=No%2BTitle%2BAvailable"));
    }

    #[test]
    fn cards_render_every_listing() {
        let mut view = ResultsView::new();
        view.render(vec![
            listing("2008 HONDA CIVIC", "Ottawa", "2024-05-01"),
            listing("2012 FORD ESCAPE", "Cornwall", "2024-05-02"),
        ]);
        let out = view.draw();
        assert!(out.starts_with("Showing 2 vehicles"));
        assert!(out.contains("[1] 2008 HONDA CIVIC\n    Location: Ottawa\n    Date Listed: 2024-05-01\n"));
        assert!(out.contains("[2] 2012 FORD ESCAPE"));
        assert!(out.contains("View Price Analysis: /analysis 2"));
        assert!(out.contains("https://www.ebay.com/sch/i.html?_nkw=2012%2BFORD%2BESCAPE"));
    }

    #[test]
    fn card_numbers_are_one_based() {
        let mut view = ResultsView::new();
        view.render(vec![listing("2008 HONDA CIVIC", "Ottawa", "2024-05-01")]);
        assert!(view.card(0).is_none());
        assert!(view.card(2).is_none());
        assert_eq!(view.card(1).unwrap().analysis_key(), "2008 HONDA CIVIC");
    }

    #[test]
    fn back_restores_the_stored_list() {
        let mut view = ResultsView::new();
        view.render(vec![
            listing("2008 HONDA CIVIC", "Ottawa", "2024-05-01"),
            listing("2012 FORD ESCAPE", "Cornwall", "2024-05-02"),
        ]);
        let fetched_at = view.displayed_at;
        view.show_analysis(analysis());
        assert!(view.card(1).is_none());
        assert!(view.draw().contains("Price Analysis for 2008 HONDA CIVIC"));

        assert!(view.back());
        assert!(matches!(view.state(), ViewState::ResultsList));
        assert_eq!(view.cards().len(), 2);
        assert_eq!(view.displayed_at, fetched_at);
        assert!(!view.back());
    }

    #[test]
    fn duplicate_titles_share_an_analysis_key() {
        let mut view = ResultsView::new();
        view.render(vec![
            listing("2005 TOYOTA COROLLA", "Ottawa", "2024-05-01"),
            listing("2005 TOYOTA COROLLA", "Gatineau", "2024-05-03"),
        ]);
        let first = view.card(1).unwrap();
        let second = view.card(2).unwrap();
        assert_ne!(first.location, second.location);
        assert_eq!(first.analysis_key(), second.analysis_key());
    }
}
