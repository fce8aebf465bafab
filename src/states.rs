//! Target-region state filter.
//!
//! Campaigns only dial a fixed set of 20 states. Long names are mapped to
//! postal codes and everything outside the set is dropped.

use crate::{error::Result, frame::RawTable, project::CanonicalRecord};

pub const STATE_CODES: [(&str, &str); 20] = [
    ("Florida", "FL"),
    ("Georgia", "GA"),
    ("South Carolina", "SC"),
    ("North Carolina", "NC"),
    ("Virginia", "VA"),
    ("Maryland", "MD"),
    ("Tennessee", "TN"),
    ("Kentucky", "KY"),
    ("Ohio", "OH"),
    ("Michigan", "MI"),
    ("Indiana", "IN"),
    ("Illinois", "IL"),
    ("Missouri", "MO"),
    ("Louisiana", "LA"),
    ("Texas", "TX"),
    ("Oklahoma", "OK"),
    ("Kansas", "KS"),
    ("Colorado", "CO"),
    ("Utah", "UT"),
    ("Nevada", "NV"),
];

/// Postal code for a state in the target set, given either its long name or
/// its code (both compared case-insensitively after trimming).
pub fn state_code(value: &str) -> Option<&'static str> {
    let value = value.trim();
    STATE_CODES
        .iter()
        .find(|(name, code)| name.eq_ignore_ascii_case(value) || code.eq_ignore_ascii_case(value))
        .map(|(_, code)| *code)
}

/// Rewrites `state` to its code and keeps only target-state records.
/// Returns the number of records removed.
pub fn filter_records(records: &mut Vec<CanonicalRecord>) -> usize {
    let before = records.len();
    records.retain_mut(|record| match state_code(&record.state) {
        Some(code) => {
            record.state = code.to_string();
            true
        }
        None => false,
    });
    before - records.len()
}

/// Same as [`filter_records`] for an arbitrary table with a `column` of states.
pub fn filter_table(table: &mut RawTable, column: &str) -> Result<usize> {
    let idx = table.require_column(column)?;
    for row in table.rows_mut() {
        if let Some(code) = state_code(&row[idx]) {
            row[idx] = code.to_string();
        }
    }
    let before = table.len();
    table.retain_rows(|row| state_code(&row[idx]).is_some());
    Ok(before - table.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NormalizeError;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn state_code_maps_names_and_codes() {
        assert_eq!(state_code("Florida"), Some("FL"));
        assert_eq!(state_code(" north carolina "), Some("NC"));
        assert_eq!(state_code("tx"), Some("TX"));
        assert_eq!(state_code("California"), None);
        assert_eq!(state_code(""), None);
    }

    #[test]
    fn filter_records_rewrites_and_drops() {
        let mut records = vec![
            CanonicalRecord {
                state: "Florida".into(),
                ..CanonicalRecord::default()
            },
            CanonicalRecord {
                state: "Oregon".into(),
                ..CanonicalRecord::default()
            },
            CanonicalRecord::default(),
        ];
        assert_eq!(filter_records(&mut records), 2);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].state, "FL");
    }

    #[test]
    fn filter_table_requires_state_column() {
        let mut table = RawTable::new("leads.csv", strings(&["Name"]), Vec::new());
        let err = filter_table(&mut table, "State").expect_err("missing column");
        assert!(matches!(err, NormalizeError::MissingColumn { .. }));

        let mut table = RawTable::new(
            "leads.csv",
            strings(&["Name", "State"]),
            vec![strings(&["Ann", "Texas"]), strings(&["Bob", "Maine"])],
        );
        assert_eq!(filter_table(&mut table, "State").expect("filter"), 1);
        assert_eq!(table.rows(), &[strings(&["Ann", "TX"])]);
    }
}
