use leptos::prelude::*;

use crate::commands::EquipmentSummary;
use crate::format::metric;

#[component]
pub fn SummaryCards(summary: EquipmentSummary) -> impl IntoView {
    let cards = [
        ("Total Equipment", summary.total_count.to_string(), "metric-count"),
        ("Avg Flowrate", metric(summary.avg_flowrate), "metric-flowrate"),
        ("Avg Pressure", metric(summary.avg_pressure), "metric-pressure"),
        ("Avg Temperature", metric(summary.avg_temperature), "metric-temperature"),
    ];

    view! {
        <div class="summary-cards">
            {cards.into_iter().map(|(label, value, class)| {
                view! {
                    <div class="card summary-card">
                        <h3 class="summary-card-label">{label}</h3>
                        <p class=format!("summary-card-value {}", class)>{value}</p>
                    </div>
                }
            }).collect::<Vec<_>>()}
        </div>
    }
}
