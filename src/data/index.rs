use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::model::{Field, Row};

// ---------------------------------------------------------------------------
// OptionIndex – the values offered by each selector
// ---------------------------------------------------------------------------

/// Distinct, sorted option lists derived from a row set.
///
/// Built in one pass by [`OptionIndex::from_rows`] and never patched
/// afterwards: when the rows change, a fresh index replaces this one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionIndex {
    /// Trimmed, non-empty company names in ascending order.
    pub companies: Vec<String>,
    /// Trimmed, non-empty fuel types in ascending order.
    pub fuel_types: Vec<String>,
    /// Parsable years, newest first.
    pub years: Vec<i32>,
    /// Company → its trimmed, non-empty model names in ascending order.
    pub models_by_company: BTreeMap<String, Vec<String>>,
}

impl OptionIndex {
    /// Derive every option list from `rows`. Pure and deterministic.
    pub fn from_rows(rows: &[Row]) -> Self {
        let companies = distinct_sorted(rows.iter().map(|r| r.company.as_str()));
        let fuel_types = distinct_sorted(rows.iter().map(|r| r.fuel_type.as_str()));

        let years: BTreeSet<i32> = rows.iter().filter_map(Row::year).collect();
        let years = years.into_iter().rev().collect();

        let mut grouped: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();
        for row in rows {
            let company = row.company.trim();
            let model = row.name.trim();
            if company.is_empty() || model.is_empty() {
                continue;
            }
            grouped.entry(company.to_string()).or_default().insert(model);
        }
        let models_by_company = grouped
            .into_iter()
            .map(|(company, models)| (company, distinct_sorted(models.into_iter())))
            .collect();

        Self {
            companies,
            fuel_types,
            years,
            models_by_company,
        }
    }

    /// Models offered once `company` is chosen; empty for unknown companies.
    pub fn models_for(&self, company: &str) -> &[String] {
        self.models_by_company
            .get(company)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether `value` is currently offered for `field`. Models are checked
    /// against the given company's list; odometer readings are free-form.
    pub fn offers(&self, field: Field, value: &str, company: &str) -> bool {
        match field {
            Field::Company => self.companies.iter().any(|c| c == value),
            Field::Model => self.models_for(company).iter().any(|m| m == value),
            Field::Year => value
                .trim()
                .parse::<i32>()
                .is_ok_and(|y| self.years.contains(&y)),
            Field::FuelType => self.fuel_types.iter().any(|f| f == value),
            Field::KmsDriven => true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty() && self.fuel_types.is_empty() && self.years.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Trim, drop empties, deduplicate, and sort in display order.
fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let unique: BTreeSet<&str> = values.map(str::trim).filter(|v| !v.is_empty()).collect();
    let mut out: Vec<String> = unique.into_iter().map(str::to_string).collect();
    out.sort_by(|a, b| display_cmp(a, b));
    out
}

/// Ordering that ignores case and accents first, then breaks ties on the
/// exact text. `"bmw"` sorts next to `"BMW"` and `"Škoda"` next to `"Skoda"`.
pub fn display_cmp(a: &str, b: &str) -> Ordering {
    folded(a).cmp(folded(b)).then_with(|| a.cmp(b))
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}
