pub mod analyzer;
pub mod insights;
pub mod loader;
pub mod patterns;
pub mod profiler;
pub mod types;
pub mod utils;

pub use analyzer::SchemaAnalyzer;
pub use patterns::{SapPattern, SapTableType};
pub use profiler::ProfilerConfig;
pub use types::*;
