use serde::Serialize;
use smallvec::SmallVec;

use super::patterns::SapPattern;
use crate::services::mapper::SchemaCoverage;

/// Column name to profile, in header order.
pub type ColumnAnalysis = Vec<(String, ColumnProfile)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Integer,
    Float,
    String,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataCategory {
    Numeric,
    Date,
    Categorical,
    Text,
    Empty,
}

impl DataCategory {
    /// Value-level pattern reported alongside the category; empty columns have none.
    pub fn value_pattern(&self) -> Option<&'static str> {
        match self {
            DataCategory::Numeric => Some("numeric_values"),
            DataCategory::Date => Some("date_values"),
            DataCategory::Categorical => Some("categorical_values"),
            DataCategory::Text => Some("text_values"),
            DataCategory::Empty => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub sum: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateSummary {
    pub min_date: String,
    pub max_date: String,
    pub date_range_days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColumnStatistics {
    Numeric(NumericSummary),
    Date(DateSummary),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: PrimitiveType,
    pub null_count: usize,
    pub null_percentage: f64,
    pub unique_count: usize,
    pub unique_percentage: f64,
    pub data_category: DataCategory,
    pub patterns: SmallVec<[&'static str; 1]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<ColumnStatistics>,
    pub sap_patterns: SmallVec<[SapPattern; 1]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ColumnProfile {
    pub fn numeric_summary(&self) -> Option<&NumericSummary> {
        match &self.statistics {
            Some(ColumnStatistics::Numeric(summary)) => Some(summary),
            _ => None,
        }
    }

    pub fn date_summary(&self) -> Option<&DateSummary> {
        match &self.statistics {
            Some(ColumnStatistics::Date(summary)) => Some(summary),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileInfo {
    pub total_rows: usize,
    pub total_columns: usize,
    pub file_size_mb: f64,
    pub analyzed_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataQuality {
    pub null_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataInsights {
    pub data_quality: DataQuality,
    pub business_insights: Vec<String>,
    pub anomalies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaAnalysis {
    pub file_info: FileInfo,
    pub sap_table_type: super::patterns::SapTableType,
    #[serde(serialize_with = "serialize_ordered")]
    pub column_analysis: ColumnAnalysis,
    pub data_insights: DataInsights,
    pub query_suggestions: Vec<String>,
    pub schema_summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_coverage: Option<SchemaCoverage>,
}

impl SchemaAnalysis {
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.column_analysis
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, profile)| profile)
    }
}

fn serialize_ordered<S>(columns: &ColumnAnalysis, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(columns.len()))?;
    for (name, profile) in columns {
        map.serialize_entry(name, profile)?;
    }
    map.end()
}

/// Rounds to two decimals, the precision every percentage in an analysis is reported at.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round2(part as f64 / whole as f64 * 100.0)
}
