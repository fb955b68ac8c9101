// User commands: the buttons, links and table headers of the search page
use crate::analyzer::SortColumn;
use crate::config::AppConfig;
use crate::coordinator::RequestCoordinator;
use crate::model::SearchForm;
use crate::view::ResultsView;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

pub const HELP: &str = "📋 Available commands:
/search make=<make> model=<model> year=<year> [location=<location>] - search the inventory
/scrape <location> - latest arrivals for one yard
/locations - configured yards
/analysis <card#> - sold-price analysis for a vehicle
/link <card#> - eBay price comparison link for a vehicle
/sort <item_name|average_price|frequency> - sort the analysis table
/open <row#> - eBay link for one analysed item
/back - back to the results
/help - command list
/quit - exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(SearchForm),
    Scrape(String),
    Locations,
    Analysis(usize),
    Link(usize),
    Sort(SortColumn),
    Open(usize),
    Back,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type /help for a list of commands.")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Unknown search field '{0}' (expected make, model, year or location)")]
    UnknownField(String),
    #[error("Unknown column '{0}' (expected item_name, average_price or frequency)")]
    UnknownColumn(String),
    #[error("Unknown location '{0}'. Type /locations to list them.")]
    UnknownLocation(String),
    #[error("No card #{0} on screen")]
    NoCard(usize),
    #[error("No row #{0} in the analysis table")]
    NoRow(usize),
    #[error("No price analysis is open")]
    NoAnalysis,
    #[error("Nothing to go back to")]
    NothingToGoBack,
}

/// What the front-end has to print after a command.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// The whole results area changed.
    Redraw,
    /// Only the analysis table changed.
    Table,
    Print(String),
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    match name {
        "/search" => parse_search(rest).map(Command::Search),
        "/scrape" if !rest.is_empty() => Ok(Command::Scrape(rest.to_string())),
        "/scrape" => Err(CommandError::Usage("/scrape <location>")),
        "/locations" => Ok(Command::Locations),
        "/analysis" => parse_number(rest, "/analysis <card#>").map(Command::Analysis),
        "/link" => parse_number(rest, "/link <card#>").map(Command::Link),
        "/sort" if rest.is_empty() => Err(CommandError::Usage(
            "/sort <item_name|average_price|frequency>",
        )),
        "/sort" => rest
            .parse::<SortColumn>()
            .map(Command::Sort)
            .map_err(CommandError::UnknownColumn),
        "/open" => parse_number(rest, "/open <row#>").map(Command::Open),
        "/back" => Ok(Command::Back),
        "/help" => Ok(Command::Help),
        "/quit" | "/exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_number(arg: &str, usage: &'static str) -> Result<usize, CommandError> {
    arg.parse().map_err(|_| CommandError::Usage(usage))
}

fn parse_search(args: &str) -> Result<SearchForm, CommandError> {
    let mut form = SearchForm::default();
    for token in split_args(args) {
        let Some((field, value)) = token.split_once('=') else {
            return Err(CommandError::Usage(
                "/search make=<make> model=<model> year=<year> [location=<location>]",
            ));
        };
        let slot = match field {
            "make" => &mut form.make,
            "model" => &mut form.model,
            "year" => &mut form.year,
            "location" => &mut form.location,
            other => return Err(CommandError::UnknownField(other.to_string())),
        };
        *slot = value.to_string();
    }
    Ok(form)
}

/// Whitespace-separated arguments; double quotes group words.
fn split_args(args: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for c in args.chars() {
        match c {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// State owned by the event loop: the results area plus what commands need to reach the backend.
pub struct Session {
    pub view: ResultsView,
    config: Arc<AppConfig>,
    coordinator: RequestCoordinator,
}

impl Session {
    pub fn new(config: Arc<AppConfig>, coordinator: RequestCoordinator) -> Self {
        Self {
            view: ResultsView::new(),
            config,
            coordinator,
        }
    }

    pub fn handle_command(&mut self, command: Command) -> Result<Outcome, CommandError> {
        info!("Handling command: {:?}", command);
        match command {
            Command::Search(form) => {
                self.coordinator.search(&mut self.view, form);
                Ok(Outcome::Redraw)
            }
            Command::Scrape(name) => {
                let location = self
                    .config
                    .find_location(&name)
                    .ok_or(CommandError::UnknownLocation(name))?;
                self.coordinator.scrape_location(&mut self.view, location);
                Ok(Outcome::Redraw)
            }
            Command::Locations => Ok(Outcome::Print(format!(
                "📍 Locations: {}",
                self.config.locations.join(", ")
            ))),
            Command::Analysis(number) => {
                let card = self.view.card(number).ok_or(CommandError::NoCard(number))?;
                self.coordinator.analyze(&mut self.view, card.analysis_key());
                Ok(Outcome::Redraw)
            }
            Command::Link(number) => {
                let card = self.view.card(number).ok_or(CommandError::NoCard(number))?;
                Ok(Outcome::Print(format!("🔗 {}", card.marketplace_url)))
            }
            Command::Sort(column) => {
                let panel = self.view.analysis_mut().ok_or(CommandError::NoAnalysis)?;
                panel.sort(column);
                Ok(Outcome::Table)
            }
            Command::Open(number) => {
                let panel = self.view.analysis().ok_or(CommandError::NoAnalysis)?;
                let url = panel.row_link(number).ok_or(CommandError::NoRow(number))?;
                Ok(Outcome::Print(format!("🔗 Open in a new tab: {}", url)))
            }
            Command::Back => {
                if self.view.back() {
                    Ok(Outcome::Redraw)
                } else {
                    Err(CommandError::NothingToGoBack)
                }
            }
            Command::Help => Ok(Outcome::Print(HELP.to_string())),
            Command::Quit => Ok(Outcome::Quit),
        }
    }
}
