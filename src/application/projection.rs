// Projections - turn fetched metrics into surface renderings
use crate::domain::chart::{
    BarChart, LegendPosition, LineChart, PieChart, PieSlice, Rendering, TickFormat, YAxis,
};
use crate::domain::dashboard::{
    AppointmentState, APPOINTMENT_CHART, DEPARTMENT_CHART, KPI_TILES, REVENUE_CHART,
};
use crate::domain::metrics::{MetricSnapshot, SeriesPoint};

const REVENUE_BORDER: &str = "#667eea";
const REVENUE_FILL: &str = "rgba(102, 126, 234, 0.1)";
const REVENUE_TENSION: f64 = 0.4;
const DEPARTMENT_COLOR: &str = "#764ba2";

/// One KPI label per tile, in tile order.
pub fn kpi_renderings(snapshot: &MetricSnapshot) -> Vec<(&'static str, Rendering)> {
    KPI_TILES
        .iter()
        .map(|tile| {
            let text = tile.format.apply(snapshot.value_or_zero(tile.field));
            (tile.surface, Rendering::text(text))
        })
        .collect()
}

pub fn appointment_pie(snapshot: &MetricSnapshot) -> (&'static str, Rendering) {
    let slices = AppointmentState::ORDERED
        .iter()
        .map(|state| PieSlice {
            label: state.label().to_string(),
            value: snapshot.value_or_zero(state.field()),
            color: state.color().to_string(),
        })
        .collect();

    let chart = PieChart {
        title: "Appointment Status Distribution".to_string(),
        legend: LegendPosition::Bottom,
        slices,
    };
    (APPOINTMENT_CHART, Rendering::Pie(chart))
}

pub fn revenue_line(points: &[SeriesPoint]) -> (&'static str, Rendering) {
    let (labels, values) = split_series(points);
    let y_axis = YAxis::fit(true, TickFormat::Currency { decimals: 0 }, &values);
    let chart = LineChart {
        title: "Monthly Revenue Trend".to_string(),
        dataset_label: "Revenue".to_string(),
        labels,
        values,
        border_color: REVENUE_BORDER.to_string(),
        fill_color: REVENUE_FILL.to_string(),
        tension: REVENUE_TENSION,
        fill: true,
        legend: LegendPosition::Hidden,
        y_axis,
    };
    (REVENUE_CHART, Rendering::Line(chart))
}

pub fn department_bar(points: &[SeriesPoint]) -> (&'static str, Rendering) {
    let (labels, values) = split_series(points);
    let y_axis = YAxis::fit(true, TickFormat::Plain, &values);
    let chart = BarChart {
        title: "Appointments by Department".to_string(),
        dataset_label: "Appointments".to_string(),
        labels,
        values,
        color: DEPARTMENT_COLOR.to_string(),
        legend: LegendPosition::Hidden,
        y_axis,
    };
    (DEPARTMENT_CHART, Rendering::Bar(chart))
}

fn split_series(points: &[SeriesPoint]) -> (Vec<String>, Vec<f64>) {
    points
        .iter()
        .map(|p| {
            let value = if p.value.is_finite() { p.value } else { 0.0 };
            (p.category.clone(), value)
        })
        .unzip()
}
