//! Phone fan-out: one output record per distinct valid phone number.
//!
//! Lead exports carry phones either spread over several columns
//! (`Mobile Phone`, `Business Phone`, ...) or packed into one cell as a
//! comma-separated list, and sometimes both. [`PhoneLayout`] is detected once
//! per table from its headers and then turns each raw record into records that
//! hold every non-phone cell unchanged plus exactly one phone cell.

use itertools::Itertools;
use log::debug;

use crate::{
    fields::{CanonicalField, FieldMatcher, Target},
    frame::RawTable,
    values::{clean_phone, is_valid_phone},
};

/// Header of the single phone column produced during batch normalization.
pub const PHONE_COLUMN: &str = "phone";

/// How phone data is laid out in a table's columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneShape {
    None,
    /// One phone-bearing column whose cells may hold comma-separated lists.
    Delimited(usize),
    /// Several phone-bearing columns, each fanned out in header order.
    MultiColumn(Vec<usize>),
}

impl PhoneShape {
    pub fn columns(&self) -> &[usize] {
        match self {
            PhoneShape::None => &[],
            PhoneShape::Delimited(idx) => std::slice::from_ref(idx),
            PhoneShape::MultiColumn(cols) => cols,
        }
    }
}

/// A column bears phones if its name says so or the matcher routes it to `phone`.
pub fn is_phone_column(header: &str, matcher: &FieldMatcher) -> bool {
    header.to_lowercase().contains("phone")
        || matcher.match_column(header) == Some(Target::Field(CanonicalField::Phone))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneLayout {
    shape: PhoneShape,
    passthrough: Vec<usize>,
}

impl PhoneLayout {
    pub fn detect(headers: &[String], matcher: &FieldMatcher) -> Self {
        let (phones, passthrough): (Vec<usize>, Vec<usize>) = (0..headers.len())
            .partition(|idx| is_phone_column(&headers[*idx], matcher));
        let shape = match phones.as_slice() {
            [] => PhoneShape::None,
            [single] => PhoneShape::Delimited(*single),
            _ => PhoneShape::MultiColumn(phones),
        };
        Self { shape, passthrough }
    }

    pub fn shape(&self) -> &PhoneShape {
        &self.shape
    }

    /// Non-phone headers in their original order, then `phone_header`.
    pub fn output_headers(&self, headers: &[String], phone_header: &str) -> Vec<String> {
        self.passthrough
            .iter()
            .map(|idx| headers[*idx].clone())
            .chain(std::iter::once(phone_header.to_string()))
            .collect()
    }

    /// Distinct cleaned phone numbers of `row`, in column then list order.
    pub fn phone_numbers(&self, row: &[String]) -> Vec<String> {
        self.shape
            .columns()
            .iter()
            .filter_map(|idx| row.get(*idx))
            .flat_map(|cell| phone_candidates(cell))
            .filter(|candidate| is_valid_phone(candidate))
            .map(clean_phone)
            .filter(|phone| !phone.is_empty())
            .unique()
            .collect()
    }

    /// Fans `row` out into one record per phone number. A row without any
    /// usable number still yields a single record with an empty phone.
    pub fn expand_record(&self, row: &[String]) -> Vec<Vec<String>> {
        let base = self
            .passthrough
            .iter()
            .map(|idx| row.get(*idx).cloned().unwrap_or_default())
            .collect::<Vec<_>>();
        let phones = self.phone_numbers(row);
        if phones.is_empty() {
            return vec![with_phone(&base, String::new())];
        }
        phones
            .into_iter()
            .map(|phone| with_phone(&base, phone))
            .collect()
    }
}

fn with_phone(base: &[String], phone: String) -> Vec<String> {
    let mut record = Vec::with_capacity(base.len() + 1);
    record.extend_from_slice(base);
    record.push(phone);
    record
}

/// Splits a phone cell into raw candidates.
///
/// Segments are trimmed; blanks and `nan` placeholders are skipped, and a
/// trailing `.0` left behind by float round-tripping is removed.
pub fn phone_candidates(cell: &str) -> impl Iterator<Item = &str> {
    cell.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty() && !segment.eq_ignore_ascii_case("nan"))
        .map(|segment| segment.strip_suffix(".0").unwrap_or(segment))
}

/// Expands every row of `table`, naming the single phone column `phone_header`.
pub fn expand_table(table: &RawTable, matcher: &FieldMatcher, phone_header: &str) -> RawTable {
    let layout = PhoneLayout::detect(table.headers(), matcher);
    debug!(
        "{}: phone layout {:?} over {} row(s)",
        table.name(),
        layout.shape(),
        table.len()
    );
    let headers = layout.output_headers(table.headers(), phone_header);
    let rows = table
        .rows()
        .iter()
        .flat_map(|row| layout.expand_record(row))
        .collect();
    RawTable::new(table.name(), headers, rows)
}
