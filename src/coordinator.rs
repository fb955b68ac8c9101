// Issues backend requests and applies their results to the results area
use crate::backend::Backend;
use crate::model::{AnalysisRecord, RequestError, SearchForm, VehicleListing};
use crate::normalizer::normalize_listings;
use crate::view::{AnalysisView, BarChart, ChartReady, ResultsView};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{error, info, warn};

pub const SEARCH_EMPTY: &str = "No vehicles found matching your criteria.";
pub const SEARCH_FAILED: &str = "An error occurred while searching for vehicles. Please try again.";
pub const SCRAPE_EMPTY: &str = "No vehicles found for this location.";
pub const SCRAPE_FAILED: &str = "An error occurred while scraping. Please try again.";
pub const ANALYSIS_EMPTY: &str = "No analysis data available.";
pub const ANALYSIS_FAILED: &str =
    "An error occurred while fetching price analysis. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingSource {
    Search,
    Scrape,
}

/// A finished request, delivered back to the event loop.
#[derive(Debug)]
pub enum Completion {
    Listings {
        source: ListingSource,
        result: Result<Vec<VehicleListing>, RequestError>,
    },
    Analysis {
        title: String,
        result: Result<Vec<AnalysisRecord>, RequestError>,
        chart: Arc<BarChart>,
    },
}

/// Starts requests on background tasks. Nothing is cancelled: when requests
/// overlap, whichever completion reaches the event loop last is what stays on screen.
pub struct RequestCoordinator {
    backend: Arc<dyn Backend>,
    chart: ChartReady,
    completions: UnboundedSender<Completion>,
}

impl RequestCoordinator {
    pub fn new(
        backend: Arc<dyn Backend>,
        chart: ChartReady,
        completions: UnboundedSender<Completion>,
    ) -> Self {
        Self {
            backend,
            chart,
            completions,
        }
    }

    pub fn search(&self, view: &mut ResultsView, form: SearchForm) {
        view.show_loading();
        info!(
            "Searching make='{}' model='{}' year='{}' location='{}'",
            form.make, form.model, form.year, form.location
        );
        let backend = self.backend.clone();
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let location = form.location.trim().to_string();
            let result = backend
                .search(&form)
                .await
                .map(|data| normalize_listings(data, &location));
            deliver(
                &completions,
                Completion::Listings {
                    source: ListingSource::Search,
                    result,
                },
            );
        });
    }

    pub fn scrape_location(&self, view: &mut ResultsView, location: &str) {
        view.show_loading();
        info!("Scraping location '{}'", location);
        let backend = self.backend.clone();
        let completions = self.completions.clone();
        let location = location.to_string();
        tokio::spawn(async move {
            let result = backend
                .scrape_location(&location)
                .await
                .map(|data| normalize_listings(data, &location));
            deliver(
                &completions,
                Completion::Listings {
                    source: ListingSource::Scrape,
                    result,
                },
            );
        });
    }

    /// Requests the sold-price analysis for a vehicle title. The completion
    /// is only delivered once the chart renderer is ready.
    pub fn analyze(&self, view: &mut ResultsView, title: &str) {
        view.show_loading();
        info!("Requesting price analysis for '{}'", title);
        let backend = self.backend.clone();
        let completions = self.completions.clone();
        let chart = self.chart.clone();
        let title = title.to_string();
        tokio::spawn(async move {
            let result = backend.price_analysis(&title).await.map(|body| {
                if let Some(reason) = body.error {
                    warn!("Backend reported an analysis error for '{}': {}", title, reason);
                }
                body.analysis
            });
            let chart = chart.ready().await;
            deliver(
                &completions,
                Completion::Analysis {
                    title,
                    result,
                    chart,
                },
            );
        });
    }

    /// Applies a completion to the results area.
    pub fn complete(view: &mut ResultsView, completion: Completion) {
        match completion {
            Completion::Listings { source, result } => {
                let (empty, failed) = match source {
                    ListingSource::Search => (SEARCH_EMPTY, SEARCH_FAILED),
                    ListingSource::Scrape => (SCRAPE_EMPTY, SCRAPE_FAILED),
                };
                match result {
                    Ok(listings) if listings.is_empty() => view.show_message(empty),
                    Ok(listings) => {
                        info!("Received {} vehicles", listings.len());
                        view.render(listings);
                    }
                    Err(e) => {
                        error!("{:?} error: {}", source, e);
                        view.show_message(failed);
                    }
                }
            }
            Completion::Analysis {
                title,
                result,
                chart,
            } => match result {
                Ok(records) => {
                    info!("Received {} analysis records for '{}'", records.len(), title);
                    match AnalysisView::new(records, title, &chart) {
                        Some(panel) => view.show_analysis(panel),
                        None => view.show_message(ANALYSIS_EMPTY),
                    }
                }
                Err(e) => {
                    error!("Analysis error for '{}': {}", title, e);
                    view.show_message(ANALYSIS_FAILED);
                }
            },
        }
    }
}

fn deliver(completions: &UnboundedSender<Completion>, completion: Completion) {
    if completions.send(completion).is_err() {
        warn!("Event loop is gone, dropping completed request");
    }
}
