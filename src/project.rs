//! Projection of one raw table onto the seven canonical lead columns.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    expand::{PHONE_COLUMN, PhoneLayout, PhoneShape},
    fields::{CanonicalField, FieldMatcher, Target},
    frame::RawTable,
    values::{clean_phone, split_full_name},
};

/// One output row. Field order is the canonical column order, which is what
/// `csv::Writer::serialize` emits as the header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub first_name: String,
    pub last_name: String,
    pub business_name: String,
    pub phone: String,
    pub state: String,
    pub zip: String,
    pub email: String,
}

impl CanonicalRecord {
    pub fn field(&self, field: CanonicalField) -> &str {
        match field {
            CanonicalField::FirstName => &self.first_name,
            CanonicalField::LastName => &self.last_name,
            CanonicalField::BusinessName => &self.business_name,
            CanonicalField::Phone => &self.phone,
            CanonicalField::State => &self.state,
            CanonicalField::Zip => &self.zip,
            CanonicalField::Email => &self.email,
        }
    }

    pub fn field_mut(&mut self, field: CanonicalField) -> &mut String {
        match field {
            CanonicalField::FirstName => &mut self.first_name,
            CanonicalField::LastName => &mut self.last_name,
            CanonicalField::BusinessName => &mut self.business_name,
            CanonicalField::Phone => &mut self.phone,
            CanonicalField::State => &mut self.state,
            CanonicalField::Zip => &mut self.zip,
            CanonicalField::Email => &mut self.email,
        }
    }

    /// Sets `field` unless an earlier column already gave it a value.
    fn fill(&mut self, field: CanonicalField, value: String) {
        let slot = self.field_mut(field);
        if slot.is_empty() {
            *slot = value;
        }
    }

    pub fn values(&self) -> Vec<String> {
        CanonicalField::ALL
            .iter()
            .map(|f| self.field(*f).to_string())
            .collect()
    }
}

/// What happened to a table's columns during projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionReport {
    pub table: String,
    pub shape: PhoneShape,
    pub matched: Vec<(String, Target)>,
    pub dropped: Vec<String>,
    pub raw_rows: usize,
    pub expanded_rows: usize,
}

#[derive(Debug, Clone)]
pub struct ProjectedTable {
    pub records: Vec<CanonicalRecord>,
    pub report: ProjectionReport,
}

/// Expands phones, then maps every column through `matcher`.
///
/// When several columns feed the same canonical field, the first column in
/// header order with a non-empty value wins for that row.
pub fn project_table(table: &RawTable, matcher: &FieldMatcher) -> ProjectedTable {
    let layout = PhoneLayout::detect(table.headers(), matcher);
    let headers = layout.output_headers(table.headers(), PHONE_COLUMN);

    let mut matched = Vec::new();
    let mut dropped = Vec::new();
    let mut plan = Vec::new();
    for (idx, header) in headers.iter().enumerate() {
        match matcher.match_column(header) {
            Some(target) => {
                debug!("{}: '{}' -> {}", table.name(), header, target);
                matched.push((header.clone(), target));
                plan.push((idx, target));
            }
            None => {
                debug!("{}: dropping unmatched column '{}'", table.name(), header);
                dropped.push(header.clone());
            }
        }
    }

    let mut records = Vec::with_capacity(table.len());
    for row in table.rows() {
        for expanded in layout.expand_record(row) {
            let mut record = CanonicalRecord::default();
            for (idx, target) in &plan {
                let value = expanded.get(*idx).map(|v| v.trim()).unwrap_or_default();
                match target {
                    Target::NamePair => {
                        let (first, last) = split_full_name(value);
                        record.fill(CanonicalField::FirstName, first);
                        record.fill(CanonicalField::LastName, last);
                    }
                    Target::Field(CanonicalField::Phone) => {
                        record.fill(CanonicalField::Phone, clean_phone(value));
                    }
                    Target::Field(field) => record.fill(*field, value.to_string()),
                }
            }
            records.push(record);
        }
    }

    let report = ProjectionReport {
        table: table.name().to_string(),
        shape: layout.shape().clone(),
        matched,
        dropped,
        raw_rows: table.len(),
        expanded_rows: records.len(),
    };
    ProjectedTable { records, report }
}
