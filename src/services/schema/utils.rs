use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

const NULL_TOKENS: &[&str] = &["NA", "N/A", "n/a", "#N/A", "NULL", "null", "NaN", "nan", "None"];

static DATE_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{1,4}[-/.]\d{1,2}[-/.]\d{1,4}([ T]\d{1,2}:\d{2}(:\d{2})?)?$")
        .expect("date shape pattern is valid")
});

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
];

pub fn is_null(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || NULL_TOKENS.contains(&trimmed)
}

pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if !DATE_SHAPE.is_match(trimmed) {
        return None;
    }

    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Makes header names unique, keeping the first occurrence untouched.
pub fn clean_column_name(name: &str, index: usize, existing_names: &mut HashSet<String>) -> String {
    let trimmed = name.trim();
    let base_name = if trimmed.is_empty() {
        format!("Unnamed: {}", index)
    } else {
        trimmed.to_string()
    };

    // If the name already exists, add a numeric suffix
    let mut cleaned = base_name.clone();
    let mut counter = 1;
    while !existing_names.insert(cleaned.clone()) {
        cleaned = format!("{}.{}", base_name, counter);
        counter += 1;
    }

    cleaned
}
