use crate::model::{AnalysisRecord, PriceBucket, SummaryStats};

pub const BUCKET_COUNT: usize = 10;

const NOT_AVAILABLE: &str = "N/A";

/// Price range, listing total and a representative date range.
///
/// The date range comes from the first record only. Returns `None` for an
/// empty collection.
pub fn compute_summary(records: &[AnalysisRecord]) -> Option<SummaryStats> {
    let (min_price, max_price) = price_bounds(records)?;
    let total_listings = records.iter().map(|r| r.frequency).sum();
    let (date_start, date_end) = match records.first().and_then(|r| r.date_range.as_ref()) {
        Some(range) => (or_not_available(&range.start), or_not_available(&range.end)),
        None => (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string()),
    };

    Some(SummaryStats {
        min_price,
        max_price,
        total_listings,
        date_start,
        date_end,
    })
}

/// Splits `[min, max]` of the average prices into ten equal-width buckets and
/// adds each record's frequency to the bucket its price falls in.
///
/// Bucket bounds are rounded for display; membership uses the exact width.
/// Prices sitting on `max` land in the last bucket, and a single-price
/// collection lands entirely in the first one.
pub fn compute_buckets(records: &[AnalysisRecord]) -> Vec<PriceBucket> {
    let Some((min, max)) = price_bounds(records) else {
        return Vec::new();
    };
    let width = (max - min) / BUCKET_COUNT as f64;

    let mut buckets: Vec<PriceBucket> = (0..BUCKET_COUNT)
        .map(|i| PriceBucket {
            min: round_half_up(min + i as f64 * width),
            max: round_half_up(min + (i + 1) as f64 * width),
            count: 0,
        })
        .collect();

    for record in records {
        let index = if width == 0.0 {
            0
        } else {
            (((record.average_price - min) / width).floor() as usize).min(BUCKET_COUNT - 1)
        };
        buckets[index].count += record.frequency;
    }

    buckets
}

fn price_bounds(records: &[AnalysisRecord]) -> Option<(f64, f64)> {
    if records.is_empty() {
        return None;
    }
    Some(records.iter().map(|r| r.average_price).fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), p| (lo.min(p), hi.max(p)),
    ))
}

fn or_not_available(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
