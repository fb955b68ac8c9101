use crate::analyzer::{SortColumn, SortState, compute_buckets, compute_summary, sort_by};
use crate::links::build_search_url;
use crate::model::{AnalysisRecord, SummaryStats};
use crate::utils::{format_money, percent_of};
use crate::view::chart::BarChart;

pub const BACK_CONTROL: &str = "← Back to Results  (/back)";

/// One table row as displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub number: usize,
    pub item_name: String,
    pub average_price: String,
    pub frequency: u64,
    pub percent: String,
}

/// Price analysis panel for one vehicle.
///
/// Header, stats strip and chart are rendered once when the panel is mounted;
/// sorting only rebuilds the table.
#[derive(Debug)]
pub struct AnalysisView {
    title: String,
    records: Vec<AnalysisRecord>,
    stats: SummaryStats,
    sort: SortState,
    header: String,
    chart: String,
}

impl AnalysisView {
    /// Mounts the panel; `None` when there is nothing to analyse.
    pub fn new(records: Vec<AnalysisRecord>, title: impl Into<String>, chart: &BarChart) -> Option<Self> {
        let title = title.into();
        let stats = compute_summary(&records)?;
        let header = draw_header(&title, &stats);
        let chart = chart.render(&compute_buckets(&records));

        Some(Self {
            title,
            records,
            stats,
            sort: SortState::default(),
            header,
            chart,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Header click: re-sorts every record and flips the column direction.
    /// Returns true when the new order is ascending.
    pub fn sort(&mut self, column: SortColumn) -> bool {
        let ascending = self.sort.toggle(column);
        sort_by(&mut self.records, column, ascending);
        ascending
    }

    pub fn rows(&self) -> Vec<TableRow> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| TableRow {
                number: i + 1,
                item_name: r.item_name.clone(),
                average_price: format_money(r.average_price),
                frequency: r.frequency,
                percent: format!("({}%)", percent_of(r.frequency, self.stats.total_listings)),
            })
            .collect()
    }

    /// Marketplace search for the item in row `number` (1-based).
    pub fn row_link(&self, number: usize) -> Option<String> {
        let record = self.records.get(number.checked_sub(1)?)?;
        Some(build_search_url(&record.item_name))
    }

    pub fn table(&self) -> String {
        let rows = self.rows();
        let headings = [
            format!("Item Name {}", self.sort.indicator(SortColumn::ItemName)),
            format!("Average Price {}", self.sort.indicator(SortColumn::AveragePrice)),
            format!("Frequency (% of total) {}", self.sort.indicator(SortColumn::Frequency)),
        ];
        let number_width = rows.len().to_string().len().max(1);
        let name_width = rows
            .iter()
            .map(|r| r.item_name.chars().count())
            .chain([headings[0].chars().count()])
            .max()
            .unwrap_or(0);
        let price_width = rows
            .iter()
            .map(|r| r.average_price.len())
            .chain([headings[1].chars().count()])
            .max()
            .unwrap_or(0);

        let mut out = format!(
            "{:>nw$}  {:<name$} | {:<price$} | {}\n",
            "#",
            headings[0],
            headings[1],
            headings[2],
            nw = number_width,
            name = name_width,
            price = price_width
        );
        for row in rows {
            out.push_str(&format!(
                "{:>nw$}  {:<name$} | {:<price$} | {} {}\n",
                row.number,
                row.item_name,
                row.average_price,
                row.frequency,
                row.percent,
                nw = number_width,
                name = name_width,
                price = price_width
            ));
        }
        out
    }

    pub fn draw(&self) -> String {
        format!(
            "{}\n{}\n{}\n{}\n",
            self.header,
            self.chart,
            self.table(),
            BACK_CONTROL
        )
    }
}

fn draw_header(title: &str, stats: &SummaryStats) -> String {
    format!(
        "{}\nPrice Analysis for {}\n\nPrice Range: {} - {}\nTotal Listings: {}\nDate Range: {} - {}\n",
        BACK_CONTROL,
        title,
        format_money(stats.min_price),
        format_money(stats.max_price),
        stats.total_listings,
        stats.date_start,
        stats.date_end
    )
}
