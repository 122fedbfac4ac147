use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub file_path: String,
    pub sample_size: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ColumnDescriptionResponse {
    pub table: String,
    pub table_description: String,
    pub column: String,
    pub description: String,
}
