// ── Chart series ──

use serde::Serialize;
use strum::Display;

/// Palette slot for a series. Renderers map these onto real colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SeriesColor {
    Blue,
    Green,
    Gray,
    Orange,
    Purple,
}

/// One named numeric sequence, aligned by position with the records it
/// was projected from. `None` is a gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: &'static str,
    pub color: SeriesColor,
    pub values: Vec<Option<f64>>,
}

impl Series {
    pub fn new(label: &'static str, color: SeriesColor, values: Vec<Option<f64>>) -> Self {
        Self {
            label,
            color,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(index, value)` pairs with gaps skipped, for plotting.
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (i as f64, v)))
            .collect()
    }

    /// Largest present value.
    pub fn max(&self) -> Option<f64> {
        self.values.iter().flatten().copied().reduce(f64::max)
    }
}

/// Labels plus series, ready to hand to a renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// `[0, max]` over every series, with a floor so flat charts still render.
    pub fn y_bounds(&self) -> [f64; 2] {
        let max = self
            .series
            .iter()
            .filter_map(Series::max)
            .reduce(f64::max)
            .unwrap_or(0.0);
        [0.0, (max * 1.1).max(1.0)]
    }
}
