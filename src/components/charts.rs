//! SVG charts for a summary: a pie of the type distribution and a bar
//! chart of the three averages.
//!
//! Geometry is computed by plain functions so it can be tested without a DOM.

use std::f64::consts::PI;

use leptos::prelude::*;

use crate::commands::{EquipmentSummary, TypeDistribution};
use crate::format::metric;

const PIE_RADIUS: f64 = 90.0;
const PIE_CENTER: f64 = 100.0;

const BAR_WIDTH: f64 = 60.0;
const BAR_GAP: f64 = 30.0;
const BAR_AREA_HEIGHT: f64 = 160.0;
const BAR_BASELINE: f64 = 180.0;

const PALETTE: [&str; 8] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#ff9da7",
];

pub fn slice_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// One pie slice as an SVG path.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub count: u64,
    pub path: String,
}

/// Slices in distribution order. Zero-count entries are skipped; a single
/// non-empty entry becomes a full circle.
pub fn pie_slices(distribution: &TypeDistribution) -> Vec<Slice> {
    let total = distribution.total();
    if total == 0 {
        return Vec::new();
    }

    let entries: Vec<&(String, u64)> = distribution.0.iter().filter(|(_, c)| *c > 0).collect();
    if entries.len() == 1 {
        let (label, count) = entries[0];
        return vec![Slice {
            label: label.clone(),
            count: *count,
            path: full_circle(),
        }];
    }

    let mut start = -PI / 2.0;
    entries
        .into_iter()
        .map(|(label, count)| {
            let sweep = 2.0 * PI * (*count as f64) / (total as f64);
            let path = arc_path(start, start + sweep);
            start += sweep;
            Slice {
                label: label.clone(),
                count: *count,
                path,
            }
        })
        .collect()
}

fn point(angle: f64) -> (f64, f64) {
    (
        PIE_CENTER + PIE_RADIUS * angle.cos(),
        PIE_CENTER + PIE_RADIUS * angle.sin(),
    )
}

fn arc_path(start: f64, end: f64) -> String {
    let (x0, y0) = point(start);
    let (x1, y1) = point(end);
    let large_arc = if end - start > PI { 1 } else { 0 };
    format!(
        "M {c:.2} {c:.2} L {x0:.2} {y0:.2} A {r:.2} {r:.2} 0 {large_arc} 1 {x1:.2} {y1:.2} Z",
        c = PIE_CENTER,
        r = PIE_RADIUS,
    )
}

fn full_circle() -> String {
    let top = PIE_CENTER - PIE_RADIUS;
    let bottom = PIE_CENTER + PIE_RADIUS;
    format!(
        "M {c:.2} {top:.2} A {r:.2} {r:.2} 0 1 1 {c:.2} {bottom:.2} A {r:.2} {r:.2} 0 1 1 {c:.2} {top:.2} Z",
        c = PIE_CENTER,
        r = PIE_RADIUS,
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: &'static str,
    pub value: f64,
    pub x: f64,
    pub height: f64,
}

/// Bars scaled against the largest average. Negative and non-finite
/// values draw as empty bars.
pub fn average_bars(summary: &EquipmentSummary) -> Vec<Bar> {
    let values = [
        ("Flowrate", summary.avg_flowrate),
        ("Pressure", summary.avg_pressure),
        ("Temperature", summary.avg_temperature),
    ];
    let drawable = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
    let max = values.iter().map(|(_, v)| drawable(*v)).fold(0.0, f64::max);

    values
        .iter()
        .enumerate()
        .map(|(i, (label, value))| Bar {
            label,
            value: *value,
            x: BAR_GAP + i as f64 * (BAR_WIDTH + BAR_GAP),
            height: if max > 0.0 {
                drawable(*value) / max * BAR_AREA_HEIGHT
            } else {
                0.0
            },
        })
        .collect()
}

#[component]
pub fn TypePieChart(distribution: TypeDistribution) -> impl IntoView {
    let slices = pie_slices(&distribution);
    if slices.is_empty() {
        return view! { <p class="chart-empty">"No equipment types to chart"</p> }.into_any();
    }

    view! {
        <div class="chart pie-chart">
            <h3>"Equipment Type Distribution"</h3>
            <svg viewBox="0 0 200 200" width="200" height="200">
                {slices.iter().enumerate().map(|(i, s)| {
                    view! {
                        <path d=s.path.clone() fill=slice_color(i)>
                            <title>{format!("{}: {}", s.label, s.count)}</title>
                        </path>
                    }
                }).collect::<Vec<_>>()}
            </svg>
            <ul class="chart-legend">
                {slices.into_iter().enumerate().map(|(i, s)| {
                    view! {
                        <li>
                            <span class="legend-swatch" style=format!("background: {}", slice_color(i))></span>
                            {format!("{} ({})", s.label, s.count)}
                        </li>
                    }
                }).collect::<Vec<_>>()}
            </ul>
        </div>
    }
    .into_any()
}

#[component]
pub fn AverageBarChart(summary: EquipmentSummary) -> impl IntoView {
    let bars = average_bars(&summary);
    let width = BAR_GAP + bars.len() as f64 * (BAR_WIDTH + BAR_GAP);

    view! {
        <div class="chart bar-chart">
            <h3>"Average Parameters"</h3>
            <svg viewBox=format!("0 0 {} 210", width) width=width height="210">
                <line x1="0" y1=BAR_BASELINE x2=width y2=BAR_BASELINE class="chart-axis" />
                {bars.into_iter().enumerate().map(|(i, bar)| {
                    view! {
                        <g>
                            <rect
                                x=bar.x
                                y={BAR_BASELINE - bar.height}
                                width=BAR_WIDTH
                                height=bar.height
                                fill=slice_color(i)
                            />
                            <text x={bar.x + BAR_WIDTH / 2.0} y={BAR_BASELINE - bar.height - 4.0} text-anchor="middle" class="chart-value">
                                {metric(bar.value)}
                            </text>
                            <text x={bar.x + BAR_WIDTH / 2.0} y={BAR_BASELINE + 18.0} text-anchor="middle" class="chart-label">
                                {bar.label}
                            </text>
                        </g>
                    }
                }).collect::<Vec<_>>()}
            </svg>
        </div>
    }
}
