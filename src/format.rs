//! Display formatting for summary values.

use crate::commands::{EquipmentSummary, HistoryEntry, TypeDistribution};

/// Averages with two decimals. Non-finite values show as `0.00`.
pub fn metric(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}", value)
    } else {
        "0.00".to_string()
    }
}

/// A raw table cell; missing numbers stay blank.
pub fn cell(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => v.to_string(),
        _ => String::new(),
    }
}

/// `2025-02-03T14:05:09.481223Z` -> `2025-02-03 14:05:09`
pub fn timestamp(raw: &str) -> String {
    match raw.get(..19) {
        Some(head) => head.replacen('T', " ", 1),
        None => raw.to_string(),
    }
}

pub fn type_labels(distribution: &TypeDistribution) -> String {
    distribution.labels().collect::<Vec<_>>().join(", ")
}

/// Password of the generated PDF: `equi` + sum of the digits of the equipment count.
pub fn report_password(total_count: u64) -> String {
    let digit_sum: u32 = total_count
        .to_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .sum();
    format!("equi{}", digit_sum)
}

pub const NO_SUMMARY_FOR_REPORT: &str = "Please upload a CSV file first";
pub const NO_HISTORY_FOR_REPORT: &str = "No data available to generate PDF";

/// Upload view: a report needs a current summary. Returns its equipment count.
pub fn report_guard(summary: Option<&EquipmentSummary>) -> Result<u64, &'static str> {
    summary.map(|s| s.total_count).ok_or(NO_SUMMARY_FOR_REPORT)
}

/// History view: a report needs at least one loaded entry.
pub fn history_report_guard(entries: Option<&[HistoryEntry]>) -> Result<(), &'static str> {
    match entries {
        Some(list) if !list.is_empty() => Ok(()),
        _ => Err(NO_HISTORY_FOR_REPORT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_summary_metrics() {
        assert_eq!(metric(0.0), "0.00");
        assert_eq!(metric(f64::NAN), "0.00");
        assert_eq!(metric(118.416), "118.42");
    }

    #[test]
    fn test_cells() {
        assert_eq!(cell(Some(120.0)), "120");
        assert_eq!(cell(Some(5.25)), "5.25");
        assert_eq!(cell(None), "");
    }

    #[test]
    fn test_timestamp() {
        assert_eq!(timestamp("2025-02-03T14:05:09.481223Z"), "2025-02-03 14:05:09");
        assert_eq!(timestamp("2025-02-03T14:05:09+00:00"), "2025-02-03 14:05:09");
        assert_eq!(timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_type_labels_keep_order() {
        let dist = TypeDistribution(vec![("Reactor".into(), 2), ("Pump".into(), 1)]);
        assert_eq!(type_labels(&dist), "Reactor, Pump");
        assert_eq!(type_labels(&TypeDistribution::default()), "");
    }

    fn summary(total_count: u64) -> EquipmentSummary {
        EquipmentSummary {
            total_count,
            avg_flowrate: 0.0,
            avg_pressure: 0.0,
            avg_temperature: 0.0,
            type_distribution: TypeDistribution::default(),
            equipment_data: Vec::new(),
        }
    }

    #[test]
    fn test_report_needs_current_summary() {
        assert_eq!(report_guard(None), Err("Please upload a CSV file first"));
        assert_eq!(report_guard(Some(&summary(15))), Ok(15));
        assert_eq!(report_guard(Some(&summary(0))), Ok(0));
    }

    #[test]
    fn test_history_report_needs_entries() {
        let entry = HistoryEntry {
            id: 7,
            uploaded_at: "2025-02-03T14:05:09Z".to_string(),
            summary: summary(3),
        };
        assert_eq!(history_report_guard(None), Err("No data available to generate PDF"));
        assert_eq!(history_report_guard(Some(&[][..])), Err("No data available to generate PDF"));
        assert_eq!(history_report_guard(Some(&[entry][..])), Ok(()));
    }

    #[test]
    fn test_report_password() {
        assert_eq!(report_password(15), "equi6");
        assert_eq!(report_password(0), "equi0");
        assert_eq!(report_password(199), "equi19");
    }
}
