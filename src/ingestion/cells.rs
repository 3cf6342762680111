//! Cell and header helpers shared by the CSV and XLSX readers.

use std::collections::{HashMap, HashSet};

use crate::types::Value;

/// Cell texts treated as missing when no explicit list is configured.
///
/// Matches the default NA set of common dataframe readers.
pub const DEFAULT_NULL_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Converts a raw text cell into a [`Value`].
///
/// The text is trimmed; empty text and configured null sentinels become [`Value::Missing`].
pub(crate) fn text_cell(raw: &str, null_values: &[String]) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() || null_values.iter().any(|n| n == trimmed) {
        Value::Missing
    } else {
        Value::Text(trimmed.to_owned())
    }
}

/// Makes header names usable as unique column keys.
///
/// - blank names become `Unnamed: {index}`
/// - repeated names get `.1`, `.2`, ... appended (skipping suffixes already taken)
pub(crate) fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    let mut used: HashSet<String> = HashSet::new();
    let mut suffixes: HashMap<String, usize> = HashMap::new();

    for (idx, name) in raw.into_iter().enumerate() {
        let trimmed = name.as_ref().trim();
        let base = if trimmed.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            trimmed.to_owned()
        };

        let mut candidate = base.clone();
        while used.contains(&candidate) {
            let n = suffixes.entry(base.clone()).or_insert(0);
            *n += 1;
            candidate = format!("{base}.{n}");
        }
        used.insert(candidate.clone());
        out.push(candidate);
    }
    out
}
