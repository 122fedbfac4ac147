//! Per-column profiling.
//!
//! Type inference and cardinality estimates look only at the sampled rows,
//! while numeric and date summaries scan the full column. The scan is cheap
//! and keeps `min`, `max` and `sum` exact for the whole file.

use std::collections::HashSet;

use smallvec::SmallVec;

use super::loader::TabularSample;
use super::patterns::{lookup_field, SapField};
use super::types::*;
use super::utils::{parse_date, parse_number};

pub const DEFAULT_SAMPLE_SIZE: usize = 5000;
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq)]
pub struct ProfilerConfig {
    /// Files with more rows than this are sampled down to this many rows
    pub sample_size: usize,
    /// Seed for the sampling RNG
    pub seed: u64,
    /// Share of non-null sampled values that must parse as numbers
    pub numeric_threshold: f64,
    /// Share of non-null sampled values that must parse as dates
    pub date_threshold: f64,
    /// Distinct/sampled-rows ratio below which a column is categorical
    pub categorical_ratio: f64,
    /// Below this many non-null values, single-valued columns and repeating
    /// declared code fields are categorical
    pub small_sample_rows: usize,
    /// Skip numeric and date coercion for SAP fields declared as character types
    pub respect_declared_types: bool,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            seed: DEFAULT_SEED,
            numeric_threshold: 0.9,
            date_threshold: 0.9,
            categorical_ratio: 0.1,
            small_sample_rows: 50,
            respect_declared_types: true,
        }
    }
}

pub fn profile_column(
    name: &str,
    column: &[Option<String>],
    sample: &TabularSample,
    config: &ProfilerConfig,
) -> ColumnProfile {
    let sampled: Vec<&str> = sample.values(column).flatten().collect();
    let sampled_rows = sample.len();
    let null_count = sampled_rows - sampled.len();
    let distinct: HashSet<&str> = sampled.iter().copied().collect();

    let sap_field = lookup_field(name);
    let data_category = classify(&sampled, distinct.len(), sampled_rows, sap_field, config);

    let statistics = match data_category {
        DataCategory::Numeric => numeric_summary(column).map(ColumnStatistics::Numeric),
        DataCategory::Date => date_summary(column).map(ColumnStatistics::Date),
        _ => None,
    };

    ColumnProfile {
        name: name.to_string(),
        dtype: primitive_type(&sampled),
        null_count,
        null_percentage: percentage(null_count, sampled_rows),
        unique_count: distinct.len(),
        unique_percentage: percentage(distinct.len(), sampled_rows),
        data_category,
        patterns: data_category.value_pattern().into_iter().collect::<SmallVec<_>>(),
        statistics,
        sap_patterns: sap_field.map(|field| field.pattern).into_iter().collect::<SmallVec<_>>(),
        description: None,
    }
}

fn classify(
    values: &[&str],
    distinct_count: usize,
    sampled_rows: usize,
    sap_field: Option<SapField>,
    config: &ProfilerConfig,
) -> DataCategory {
    if values.is_empty() {
        return DataCategory::Empty;
    }

    let declared_character = config.respect_declared_types
        && sap_field.map_or(false, |field| field.declared.is_character());

    if !declared_character {
        let total = values.len() as f64;

        let numeric = values.iter().filter(|v| parse_number(v).is_some()).count();
        if numeric as f64 / total >= config.numeric_threshold {
            return DataCategory::Numeric;
        }

        let dates = values.iter().filter(|v| parse_date(v).is_some()).count();
        if dates as f64 / total >= config.date_threshold {
            return DataCategory::Date;
        }
    }

    let distinct_ratio = distinct_count as f64 / sampled_rows as f64;
    let small_code_column = is_small_code_column(values, distinct_count, declared_character, config);
    if distinct_ratio < config.categorical_ratio || small_code_column {
        DataCategory::Categorical
    } else {
        DataCategory::Text
    }
}

/// Categorical override for samples under `small_sample_rows`: a single repeated
/// value, or a declared code field with repeats.
fn is_small_code_column(
    values: &[&str],
    distinct_count: usize,
    declared_character: bool,
    config: &ProfilerConfig,
) -> bool {
    if values.len() >= config.small_sample_rows || distinct_count == values.len() {
        return false;
    }
    distinct_count == 1 || declared_character
}

fn primitive_type(values: &[&str]) -> PrimitiveType {
    if values.is_empty() {
        PrimitiveType::Empty
    } else if values.iter().all(|v| v.trim().parse::<i64>().is_ok()) {
        PrimitiveType::Integer
    } else if values.iter().all(|v| parse_number(v).is_some()) {
        PrimitiveType::Float
    } else {
        PrimitiveType::String
    }
}

pub fn numeric_summary(column: &[Option<String>]) -> Option<NumericSummary> {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for number in column.iter().flatten().filter_map(|v| parse_number(v)) {
        count += 1;
        sum += number;
        min = min.min(number);
        max = max.max(number);
    }

    if count == 0 {
        return None;
    }

    Some(NumericSummary {
        min,
        max,
        mean: sum / count as f64,
        sum,
    })
}

pub fn date_summary(column: &[Option<String>]) -> Option<DateSummary> {
    let mut dates = column.iter().flatten().filter_map(|v| parse_date(v));
    let first = dates.next()?;
    let (min, max) = dates.fold((first, first), |(min, max), date| (min.min(date), max.max(date)));

    Some(DateSummary {
        min_date: min.format("%Y-%m-%dT%H:%M:%S").to_string(),
        max_date: max.format("%Y-%m-%dT%H:%M:%S").to_string(),
        date_range_days: (max - min).num_days(),
    })
}
