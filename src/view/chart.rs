// Price distribution bar chart and its startup loader
use crate::model::PriceBucket;
use futures::future::{BoxFuture, FutureExt, Shared};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub bar_width: usize,
    pub bar_glyph: char,
    pub title: String,
    pub y_label: String,
    pub x_label: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            bar_width: 40,
            bar_glyph: '█',
            title: "Price Distribution".to_string(),
            y_label: "Number of Listings".to_string(),
            x_label: "Price Range".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BarChart {
    style: ChartStyle,
}

impl BarChart {
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }

    /// One horizontal bar per bucket, scaled to the largest count.
    pub fn render(&self, buckets: &[PriceBucket]) -> String {
        let labels: Vec<String> = buckets
            .iter()
            .map(|b| format!("${}-${}", b.min, b.max))
            .collect();
        let label_width = labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .max(self.style.x_label.chars().count());
        let peak = buckets.iter().map(|b| b.count).max().unwrap_or(0);

        let mut out = format!("{}\n", self.style.title);
        out.push_str(&format!(
            "{:<width$} | {}\n",
            self.style.x_label,
            self.style.y_label,
            width = label_width
        ));
        for (label, bucket) in labels.iter().zip(buckets) {
            let bar: String = std::iter::repeat_n(self.style.bar_glyph, self.bar_len(bucket.count, peak))
                .collect();
            out.push_str(&format!(
                "{:<width$} | {} {}\n",
                label,
                bar,
                bucket.count,
                width = label_width
            ));
        }
        out
    }

    fn bar_len(&self, count: u64, peak: u64) -> usize {
        if count == 0 || peak == 0 {
            return 0;
        }
        let scaled = (count as f64 / peak as f64 * self.style.bar_width as f64).round() as usize;
        scaled.max(1)
    }
}

/// Resolves once the chart renderer has been loaded at startup.
/// Every clone awaits the same load.
#[derive(Clone)]
pub struct ChartReady(Shared<BoxFuture<'static, Arc<BarChart>>>);

impl ChartReady {
    /// Starts loading the chart style in the background. Must be called inside a tokio runtime.
    pub fn load(style_path: Option<PathBuf>) -> Self {
        let task = tokio::spawn(load_chart(style_path));
        let ready = async move {
            match task.await {
                Ok(chart) => Arc::new(chart),
                Err(e) => {
                    warn!("Chart loader failed, using default style: {:?}", e);
                    Arc::new(BarChart::default())
                }
            }
        };
        Self(ready.boxed().shared())
    }

    #[cfg(test)]
    pub fn loaded(chart: BarChart) -> Self {
        Self::pending(futures::future::ready(Arc::new(chart)))
    }

    /// Readiness driven by an arbitrary future.
    #[cfg(test)]
    pub fn pending(ready: impl Future<Output = Arc<BarChart>> + Send + 'static) -> Self {
        Self(ready.boxed().shared())
    }

    pub async fn ready(&self) -> Arc<BarChart> {
        self.0.clone().await
    }
}

async fn load_chart(style_path: Option<PathBuf>) -> BarChart {
    let Some(path) = style_path else {
        return BarChart::default();
    };
    match tokio::fs::read_to_string(&path).await {
        Ok(text) => match serde_json::from_str::<ChartStyle>(&text) {
            Ok(style) => {
                info!("Chart style loaded from {}", path.display());
                BarChart::new(style)
            }
            Err(e) => {
                warn!("Invalid chart style {}: {}", path.display(), e);
                BarChart::default()
            }
        },
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("No chart style at {}, using defaults", path.display());
            BarChart::default()
        }
        Err(e) => {
            warn!("Cannot read chart style {}: {}", path.display(), e);
            BarChart::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(min: i64, max: i64, count: u64) -> PriceBucket {
        PriceBucket { min, max, count }
    }

    #[test]
    fn bars_scale_to_the_peak() {
        let chart = BarChart::new(ChartStyle {
            bar_width: 10,
            bar_glyph: '#',
            ..ChartStyle::default()
        });
        let out = chart.render(&[bucket(150, 195, 10), bucket(195, 240, 1), bucket(240, 285, 0)]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Price Distribution");
        assert!(lines[1].starts_with("Price Range"));
        assert!(lines[2].ends_with("| ########## 10"));
        assert!(lines[3].ends_with("| # 1"));
        assert!(lines[4].ends_with("|  0"));
    }

    #[test]
    fn labels_are_dollar_ranges() {
        let out = BarChart::default().render(&[bucket(100, 100, 5)]);
        assert!(out.contains("$100-$100"));
    }

    #[tokio::test]
    async fn missing_style_file_resolves_to_default() {
        let ready = ChartReady::load(Some(PathBuf::from("no-such-dir/chart.json")));
        let chart = ready.ready().await;
        assert_eq!(chart.style.bar_width, 40);
        // a second waiter gets the same chart
        assert!(Arc::ptr_eq(&chart, &ready.clone().ready().await));
    }

    #[tokio::test]
    async fn style_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.json");
        tokio::fs::write(&path, r#"{"bar_width": 12, "title": "Sold Prices"}"#)
            .await
            .unwrap();
        let chart = ChartReady::load(Some(path)).ready().await;
        assert_eq!(chart.style.bar_width, 12);
        assert_eq!(chart.style.title, "Sold Prices");
        assert_eq!(chart.style.bar_glyph, '█');
    }
}
