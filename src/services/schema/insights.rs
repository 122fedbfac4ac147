use super::patterns::SapTableType;
use super::types::{round2, ColumnAnalysis, DataInsights, DataQuality};

const GENERIC_SUGGESTIONS: &[&str] = &["Show all records", "Find records with specific criteria"];

fn suggestions_for(table_type: SapTableType) -> &'static [&'static str] {
    match table_type {
        SapTableType::Bkpf => &[
            "Show documents posted in the last 30 days",
            "Which document types have the highest volume?",
            "Find documents with specific posting dates",
        ],
        SapTableType::Bseg => &[
            "Show line items with amounts over $10,000",
            "Which accounts have the most transactions?",
            "Find debit vs credit entries",
        ],
        SapTableType::Lfa1 => &["Show vendors by location", "Find vendors with specific names"],
        SapTableType::Kna1 => &["Show customers by location", "Find customers with specific names"],
        SapTableType::Skat | SapTableType::Unknown => GENERIC_SUGGESTIONS,
    }
}

pub fn aggregate(columns: &ColumnAnalysis, analyzed_rows: usize) -> DataInsights {
    let total_cells = columns.len() * analyzed_rows;
    let null_cells: usize = columns.iter().map(|(_, profile)| profile.null_count).sum();

    let null_percentage = if total_cells == 0 {
        0.0
    } else {
        round2(null_cells as f64 / total_cells as f64 * 100.0)
    };

    DataInsights {
        data_quality: DataQuality { null_percentage },
        business_insights: Vec::new(),
        anomalies: Vec::new(),
    }
}

pub fn suggest_queries(table_type: SapTableType) -> Vec<String> {
    suggestions_for(table_type)
        .iter()
        .map(|suggestion| suggestion.to_string())
        .collect()
}

pub fn schema_summary(table_type: SapTableType, column_count: usize) -> String {
    format!("This appears to be a {} table with {} columns.", table_type, column_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::schema::types::{ColumnProfile, DataCategory, PrimitiveType};
    use smallvec::SmallVec;

    fn profile(name: &str, null_count: usize) -> (String, ColumnProfile) {
        (
            name.to_string(),
            ColumnProfile {
                name: name.to_string(),
                dtype: PrimitiveType::String,
                null_count,
                null_percentage: 0.0,
                unique_count: 1,
                unique_percentage: 0.0,
                data_category: DataCategory::Text,
                patterns: SmallVec::new(),
                statistics: None,
                sap_patterns: SmallVec::new(),
                description: None,
            },
        )
    }

    #[test]
    fn null_percentage_spans_all_cells() {
        let columns = vec![profile("A", 1), profile("B", 0), profile("C", 2)];
        let insights = aggregate(&columns, 9);
        // 3 of 27 cells
        assert_eq!(insights.data_quality.null_percentage, 11.11);
        assert!(insights.business_insights.is_empty());
        assert!(insights.anomalies.is_empty());
    }

    #[test]
    fn null_percentage_with_no_cells() {
        assert_eq!(aggregate(&Vec::new(), 10).data_quality.null_percentage, 0.0);
        assert_eq!(aggregate(&vec![profile("A", 0)], 0).data_quality.null_percentage, 0.0);
    }

    #[test]
    fn suggestions_fall_back_to_generic() {
        assert_eq!(suggest_queries(SapTableType::Bkpf).len(), 3);
        assert_eq!(suggest_queries(SapTableType::Lfa1)[0], "Show vendors by location");
        assert_eq!(
            suggest_queries(SapTableType::Skat),
            vec!["Show all records", "Find records with specific criteria"]
        );
        assert_eq!(suggest_queries(SapTableType::Unknown), suggest_queries(SapTableType::Skat));
    }

    #[test]
    fn summary_sentence() {
        assert_eq!(
            schema_summary(SapTableType::Kna1, 6),
            "This appears to be a KNA1 table with 6 columns."
        );
    }
}
