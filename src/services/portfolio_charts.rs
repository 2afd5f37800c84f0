use plotters::prelude::*;
use thiserror::Error;

use crate::services::projection::{PROJECTION_YEARS, ProjectionSeries, SeriesColor};

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("nothing to plot")]
    Empty,
    #[error("failed to render chart: {0}")]
    Render(String),
}

/// Cap rate and cash-on-cash of one simulated property.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorBar {
    pub label: String,
    pub cap_rate: f64,
    pub cash_on_cash: f64,
}

const CAP_RATE_COLOR: RGBColor = RGBColor(75, 192, 192);
const CASH_ON_CASH_COLOR: RGBColor = RGBColor(153, 102, 255);
// Each property takes three x slots: cap rate, cash-on-cash, gap.
const SLOTS_PER_PROPERTY: i32 = 3;

pub async fn write_indicator_chart_png(
    output_path: &str,
    bars: &[IndicatorBar],
) -> Result<(), ChartError> {
    if bars.is_empty() {
        return Err(ChartError::Empty);
    }
    let output_path = output_path.to_string();
    let bars = bars.to_vec();
    tokio::task::spawn_blocking(move || render_indicator_chart(&output_path, &bars))
        .await
        .map_err(|e| ChartError::Render(e.to_string()))?
}

pub async fn write_projection_chart_png(
    output_path: &str,
    series: &[ProjectionSeries],
) -> Result<(), ChartError> {
    if series.is_empty() {
        return Err(ChartError::Empty);
    }
    let output_path = output_path.to_string();
    let series = series.to_vec();
    tokio::task::spawn_blocking(move || render_projection_chart(&output_path, &series))
        .await
        .map_err(|e| ChartError::Render(e.to_string()))?
}

fn render_indicator_chart(output_path: &str, bars: &[IndicatorBar]) -> Result<(), ChartError> {
    let values = bars
        .iter()
        .flat_map(|bar| [bar.cap_rate, bar.cash_on_cash]);
    let (y_min, y_max) = value_range(values);
    let max_x = bars.len() as i32 * SLOTS_PER_PROPERTY;

    let root = BitMapBackend::new(output_path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::Render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Investment Indicators", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(0..max_x, y_min..y_max)
        .map_err(|e| ChartError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .y_desc("Percent")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_labels(max_x as usize + 1)
        .x_label_formatter(&|slot| {
            if *slot % SLOTS_PER_PROPERTY != 1 {
                return String::new();
            }
            bars.get((*slot / SLOTS_PER_PROPERTY) as usize)
                .map(|bar| bar.label.clone())
                .unwrap_or_default()
        })
        .draw()
        .map_err(|e| ChartError::Render(e.to_string()))?;

    let cap_rate_style = ShapeStyle::from(&CAP_RATE_COLOR.mix(0.6)).filled();
    chart
        .draw_series(bars.iter().enumerate().map(|(idx, bar)| {
            let x = idx as i32 * SLOTS_PER_PROPERTY;
            Rectangle::new([(x, 0.0), (x + 1, bar.cap_rate)], cap_rate_style)
        }))
        .map_err(|e| ChartError::Render(e.to_string()))?
        .label("Cap rate (%)")
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], cap_rate_style));

    let cash_on_cash_style = ShapeStyle::from(&CASH_ON_CASH_COLOR.mix(0.6)).filled();
    chart
        .draw_series(bars.iter().enumerate().map(|(idx, bar)| {
            let x = idx as i32 * SLOTS_PER_PROPERTY + 1;
            Rectangle::new([(x, 0.0), (x + 1, bar.cash_on_cash)], cash_on_cash_style)
        }))
        .map_err(|e| ChartError::Render(e.to_string()))?
        .label("Cash on cash (%)")
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], cash_on_cash_style));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| ChartError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| ChartError::Render(e.to_string()))?;
    Ok(())
}

fn render_projection_chart(
    output_path: &str,
    series: &[ProjectionSeries],
) -> Result<(), ChartError> {
    let values = series
        .iter()
        .flat_map(|s| s.points.iter().map(|point| point.value));
    let (y_min, y_max) = value_range(values);
    let last_year = PROJECTION_YEARS[PROJECTION_YEARS.len() - 1];

    let root = BitMapBackend::new(output_path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::Render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Property Value Over Time", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(90)
        .build_cartesian_2d(0u32..last_year, y_min..y_max)
        .map_err(|e| ChartError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Years")
        .y_desc("Value")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_labels(PROJECTION_YEARS.len())
        .y_label_formatter(&|value| format!("{value:.0}"))
        .draw()
        .map_err(|e| ChartError::Render(e.to_string()))?;

    for s in series {
        let color = rgb(s.color);
        chart
            .draw_series(LineSeries::new(
                s.points.iter().map(|point| (point.year, point.value)),
                color.stroke_width(2),
            ))
            .map_err(|e| ChartError::Render(e.to_string()))?
            .label(s.label.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| ChartError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| ChartError::Render(e.to_string()))?;
    Ok(())
}

fn rgb(color: SeriesColor) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

/// Y range that always includes zero and never collapses to a single value.
fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), value| {
        (lo.min(value), hi.max(value))
    });
    let padding = ((max - min) * 0.1).max(1.0);
    let low = if min < 0.0 { min - padding } else { 0.0 };
    (low, max + padding)
}
