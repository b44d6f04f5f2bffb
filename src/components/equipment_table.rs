use leptos::prelude::*;

use crate::commands::EquipmentRow;
use crate::format::cell;

const HEADERS: [&str; 5] = ["Equipment Name", "Type", "Flowrate", "Pressure", "Temperature"];

#[component]
pub fn EquipmentTable(rows: Vec<EquipmentRow>) -> impl IntoView {
    if rows.is_empty() {
        return view! { <p class="table-empty">"No equipment data available"</p> }.into_any();
    }

    view! {
        <table class="table equipment-table">
            <thead>
                <tr>
                    {HEADERS.iter().map(|h| view! { <th>{*h}</th> }).collect::<Vec<_>>()}
                </tr>
            </thead>
            <tbody>
                {rows.into_iter().map(|row| {
                    view! {
                        <tr>
                            <td>{row.name}</td>
                            <td>{row.equipment_type}</td>
                            <td class="numeric">{cell(row.flowrate)}</td>
                            <td class="numeric">{cell(row.pressure)}</td>
                            <td class="numeric">{cell(row.temperature)}</td>
                        </tr>
                    }
                }).collect::<Vec<_>>()}
            </tbody>
        </table>
    }
    .into_any()
}
