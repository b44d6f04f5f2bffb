use leptos::prelude::*;

use crate::commands::HistoryEntry;
use crate::format::{metric, timestamp, type_labels};

/// Past uploads, most recent first as delivered by the backend.
#[component]
pub fn HistoryList(entries: Vec<HistoryEntry>) -> impl IntoView {
    view! {
        <div class="history-list">
            {entries.into_iter().map(|entry| {
                let s = entry.summary;
                view! {
                    <div class="card history-item">
                        <div class="history-item-header">
                            <h3>{format!("Dataset #{}", entry.id)}</h3>
                            <span class="history-date">{timestamp(&entry.uploaded_at)}</span>
                        </div>
                        <div class="history-metrics">
                            <span>{format!("Total Equipment: {}", s.total_count)}</span>
                            <span>{format!("Avg Flowrate: {}", metric(s.avg_flowrate))}</span>
                            <span>{format!("Avg Pressure: {}", metric(s.avg_pressure))}</span>
                            <span>{format!("Avg Temperature: {}", metric(s.avg_temperature))}</span>
                        </div>
                        <p class="history-types">{format!("Types: {}", type_labels(&s.type_distribution))}</p>
                    </div>
                }
            }).collect::<Vec<_>>()}
        </div>
    }
}
