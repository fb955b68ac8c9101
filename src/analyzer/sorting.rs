use crate::model::AnalysisRecord;
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    ItemName,
    AveragePrice,
    Frequency,
}

impl SortColumn {
    pub const ALL: [SortColumn; 3] = [
        SortColumn::ItemName,
        SortColumn::AveragePrice,
        SortColumn::Frequency,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SortColumn::ItemName => "item_name",
            SortColumn::AveragePrice => "average_price",
            SortColumn::Frequency => "frequency",
        }
    }

    fn compare(self, a: &AnalysisRecord, b: &AnalysisRecord) -> Ordering {
        match self {
            SortColumn::ItemName => a.item_name.cmp(&b.item_name),
            SortColumn::AveragePrice => a.average_price.total_cmp(&b.average_price),
            SortColumn::Frequency => a.frequency.cmp(&b.frequency),
        }
    }
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortColumn::ALL
            .into_iter()
            .find(|c| c.key() == s.trim())
            .ok_or_else(|| s.to_string())
    }
}

/// Sorts in place and hands the same slice back. Equal keys keep their order.
pub fn sort_by(
    records: &mut [AnalysisRecord],
    column: SortColumn,
    ascending: bool,
) -> &mut [AnalysisRecord] {
    records.sort_by(|a, b| {
        let ord = column.compare(a, b);
        if ascending { ord } else { ord.reverse() }
    });
    records
}

/// Which table header currently carries the sort indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    sorted: Option<(SortColumn, bool)>,
}

impl SortState {
    /// Registers a header click and returns the direction to sort in
    /// (`true` for ascending). Any other column loses its indicator.
    pub fn toggle(&mut self, column: SortColumn) -> bool {
        let ascending = !matches!(self.sorted, Some((c, true)) if c == column);
        self.sorted = Some((column, ascending));
        ascending
    }

    pub fn indicator(&self, column: SortColumn) -> &'static str {
        match self.sorted {
            Some((c, true)) if c == column => "▲",
            Some((c, false)) if c == column => "▼",
            _ => "↕",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, price: f64, frequency: u64) -> AnalysisRecord {
        AnalysisRecord {
            item_name: name.to_string(),
            average_price: price,
            frequency,
            date_range: None,
        }
    }

    fn names(records: &[AnalysisRecord]) -> Vec<&str> {
        records.iter().map(|r| r.item_name.as_str()).collect()
    }

    fn sample() -> Vec<AnalysisRecord> {
        vec![
            record("Headlight", 210.0, 3),
            record("Alternator", 455.99, 1),
            record("Tail light", 160.5, 8),
            record("Bumper", 320.0, 2),
        ]
    }

    #[test]
    fn sorts_by_price_numerically() {
        let mut records = sample();
        sort_by(&mut records, SortColumn::AveragePrice, true);
        assert_eq!(names(&records), vec!["Tail light", "Headlight", "Bumper", "Alternator"]);
    }

    #[test]
    fn returns_the_sorted_collection() {
        let mut records = sample();
        let sorted = sort_by(&mut records, SortColumn::ItemName, true);
        assert_eq!(sorted[0].item_name, "Alternator");
    }

    #[test]
    fn ascending_twice_is_idempotent() {
        let mut records = sample();
        sort_by(&mut records, SortColumn::Frequency, true);
        let once = records.clone();
        sort_by(&mut records, SortColumn::Frequency, true);
        assert_eq!(records, once);
    }

    #[test]
    fn descending_reverses_ascending_without_ties() {
        let mut records = sample();
        sort_by(&mut records, SortColumn::AveragePrice, true);
        let mut reversed = records.clone();
        reversed.reverse();
        sort_by(&mut records, SortColumn::AveragePrice, false);
        assert_eq!(records, reversed);
    }

    #[test]
    fn ties_keep_relative_order() {
        let mut records = vec![
            record("Fender LH", 200.0, 2),
            record("Grille", 150.0, 5),
            record("Fender RH", 200.0, 2),
        ];
        sort_by(&mut records, SortColumn::Frequency, false);
        assert_eq!(names(&records), vec!["Grille", "Fender LH", "Fender RH"]);
        sort_by(&mut records, SortColumn::AveragePrice, true);
        assert_eq!(names(&records), vec!["Grille", "Fender LH", "Fender RH"]);
    }

    #[test]
    fn toggle_flips_direction_and_moves_indicator() {
        let mut state = SortState::default();
        assert!(state.toggle(SortColumn::AveragePrice));
        assert_eq!(state.indicator(SortColumn::AveragePrice), "▲");
        assert!(!state.toggle(SortColumn::AveragePrice));
        assert_eq!(state.indicator(SortColumn::AveragePrice), "▼");
        assert!(state.toggle(SortColumn::AveragePrice));

        assert!(state.toggle(SortColumn::Frequency));
        assert_eq!(state.indicator(SortColumn::AveragePrice), "↕");
        assert_eq!(state.indicator(SortColumn::Frequency), "▲");
    }

    #[test]
    fn column_parses_from_header_key() {
        assert_eq!("average_price".parse::<SortColumn>(), Ok(SortColumn::AveragePrice));
        assert_eq!(" item_name".parse::<SortColumn>(), Ok(SortColumn::ItemName));
        assert!("price".parse::<SortColumn>().is_err());
    }
}
