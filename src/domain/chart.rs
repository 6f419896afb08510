// Rendering descriptions projected into display surfaces
use serde::Serialize;

/// Everything a surface can show. A render always replaces the whole value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rendering {
    Text { text: String },
    Pie(PieChart),
    Line(LineChart),
    Bar(BarChart),
}

impl Rendering {
    pub fn text(text: impl Into<String>) -> Self {
        Rendering::Text { text: text.into() }
    }
}

#[cfg(test)]
impl Rendering {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Rendering::Text { text } => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    Hidden,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub legend: LegendPosition,
    pub slices: Vec<PieSlice>,
}

#[cfg(test)]
impl PieChart {
    pub fn slice(&self, label: &str) -> Option<&PieSlice> {
        self.slices.iter().find(|s| s.label == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TickFormat {
    Plain,
    Currency { decimals: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YAxis {
    pub begin_at_zero: bool,
    pub ticks: TickFormat,
    /// Lower bound for the plotted values, see [`YAxis::fit`].
    pub min: f64,
}

impl YAxis {
    /// Axis whose lower bound covers `values`, clamped to zero when
    /// `begin_at_zero` is set.
    pub fn fit(begin_at_zero: bool, ticks: TickFormat, values: &[f64]) -> Self {
        Self {
            begin_at_zero,
            ticks,
            min: Self::lower_bound(begin_at_zero, values),
        }
    }

    fn lower_bound(begin_at_zero: bool, values: &[f64]) -> f64 {
        let lowest = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(f64::INFINITY, f64::min);
        let lowest = if lowest.is_finite() { lowest } else { 0.0 };
        if begin_at_zero { lowest.min(0.0) } else { lowest }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub title: String,
    pub dataset_label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub border_color: String,
    pub fill_color: String,
    pub tension: f64,
    pub fill: bool,
    pub legend: LegendPosition,
    pub y_axis: YAxis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub dataset_label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub color: String,
    pub legend: LegendPosition,
    pub y_axis: YAxis,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_clamped_at_zero() {
        let fit = |values: &[f64]| YAxis::fit(true, TickFormat::Plain, values).min;
        assert_eq!(fit(&[12.0, 40.0]), 0.0);
        assert_eq!(fit(&[-5.0, 40.0]), -5.0);
        assert_eq!(fit(&[f64::NAN]), 0.0);
        assert_eq!(fit(&[]), 0.0);

        let free = YAxis::fit(false, TickFormat::Currency { decimals: 0 }, &[12.0, 40.0]);
        assert_eq!(free.min, 12.0);
    }

    #[test]
    fn test_currency_ticks_serialize() {
        let json = serde_json::to_value(TickFormat::Currency { decimals: 0 }).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "currency", "decimals": 0}));
    }

    #[test]
    fn test_rendering_serializes_with_kind_tag() {
        let json = serde_json::to_value(Rendering::text("42")).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "text", "text": "42"}));
    }
}
