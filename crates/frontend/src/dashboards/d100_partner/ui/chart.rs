//! Простая SVG-отрисовка подготовленных рядов.

use leptos::prelude::*;

use crate::dashboards::d100_partner::period::{ChartKind, ChartSeries};
use crate::dashboards::d100_partner::state::ChartSlot;
use crate::dashboards::d100_partner::store::use_dashboard_store;

const WIDTH: f64 = 320.0;
const HEIGHT: f64 = 160.0;
const PADDING: f64 = 24.0;
const BAR_COLORS: [&str; 3] = ["#007bff", "#6c757d", "#22c55e"];

/// Координаты точек линейного графика в пределах области рисования
pub fn line_points(series: &ChartSeries) -> Vec<(f64, f64)> {
    let max = series.max_value().max(1) as f64;
    let count = series.values.len();
    let step = if count > 1 {
        (WIDTH - 2.0 * PADDING) / (count - 1) as f64
    } else {
        0.0
    };
    series
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = PADDING + step * i as f64;
            let y = HEIGHT - PADDING - (*v as f64 / max) * (HEIGHT - 2.0 * PADDING);
            (x, y)
        })
        .collect()
}

fn render_line(series: ChartSeries) -> AnyView {
    let points = line_points(&series);
    let polyline = points
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ");
    let labels = points
        .iter()
        .zip(series.labels.iter())
        .map(|((x, _), label)| {
            view! {
                <text x=format!("{:.1}", x) y=(HEIGHT - 6.0).to_string() text-anchor="middle" class="chart-label">
                    {label.clone()}
                </text>
            }
        })
        .collect_view();
    let dots = points
        .iter()
        .zip(series.values.iter())
        .map(|((x, y), value)| {
            view! {
                <circle cx=format!("{:.1}", x) cy=format!("{:.1}", y) r="3" fill="#007bff">
                    <title>{value.to_string()}</title>
                </circle>
            }
        })
        .collect_view();

    view! {
        <svg viewBox=format!("0 0 {} {}", WIDTH, HEIGHT) class="chart" role="img" aria-label=series.dataset_label>
            <polyline points=polyline fill="none" stroke="#007bff" stroke-width="2" />
            {dots}
            {labels}
        </svg>
    }
    .into_any()
}

fn render_bars(series: ChartSeries) -> AnyView {
    let max = series.max_value().max(1) as f64;
    let count = series.values.len().max(1) as f64;
    let row_height = (HEIGHT - PADDING) / count;
    let label_width = 90.0;
    let bars = series
        .labels
        .iter()
        .zip(series.values.iter())
        .enumerate()
        .map(|(i, (label, value))| {
            let y = PADDING / 2.0 + row_height * i as f64;
            let width = (*value as f64 / max) * (WIDTH - label_width - PADDING);
            let color = BAR_COLORS[i % BAR_COLORS.len()];
            view! {
                <g>
                    <text x="0" y=format!("{:.1}", y + row_height / 2.0) class="chart-label">
                        {label.clone()}
                    </text>
                    <rect
                        x=label_width.to_string()
                        y=format!("{:.1}", y + 4.0)
                        width=format!("{:.1}", width)
                        height=format!("{:.1}", row_height - 8.0)
                        fill=color
                    >
                        <title>{value.to_string()}</title>
                    </rect>
                </g>
            }
        })
        .collect_view();

    view! {
        <svg viewBox=format!("0 0 {} {}", WIDTH, HEIGHT) class="chart" role="img" aria-label=series.dataset_label>
            {bars}
        </svg>
    }
    .into_any()
}

/// Место для графика: показывает ряд, пока он есть на поверхности графиков
#[component]
pub fn ChartCanvas(slot: ChartSlot) -> impl IntoView {
    let store = use_dashboard_store();

    view! {
        <div id=slot.element_id() class="chart-container">
            {move || match store.chart(slot) {
                Some(series) => match series.kind {
                    ChartKind::Line => render_line(series),
                    ChartKind::HorizontalBar => render_bars(series),
                },
                None => view! { <div class="chart-placeholder"></div> }.into_any(),
            }}
        </div>
    }
}
