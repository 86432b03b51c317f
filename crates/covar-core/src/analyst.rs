use crate::error::AnalysisResult;
use crate::statistics::StatisticsResult;

/// Text shown when the service answers without any prose.
pub const EMPTY_ANALYSIS: &str = "No analysis could be generated.";

/// A remote service that explains a statistics result in prose.
pub trait Analyst {
    fn summarize(&self, stats: &StatisticsResult) -> AnalysisResult<String>;
}
