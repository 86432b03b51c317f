//! Request text for the natural-language interpretation of a result.

use crate::observation::Observation;
use crate::statistics::StatisticsResult;

/// Observations included verbatim in the request before it is truncated.
pub const PREVIEW_LIMIT: usize = 50;

/// Fractional digits for every statistic quoted in the request.
const PROMPT_DIGITS: usize = 4;

pub const SYSTEM_INSTRUCTION: &str =
    "You are a helpful statistical analysis assistant. Be concise and accurate.";

/// Build the analysis request for `stats`.
pub fn build_prompt(stats: &StatisticsResult) -> String {
    format!(
        "As a senior statistician, analyze the following covariance calculation results.\n\
         \n\
         **Statistics:**\n\
         - N (Sample Size): {n}\n\
         - Mean X: {mean_x:.d$}\n\
         - Mean Y: {mean_y:.d$}\n\
         - Sample Covariance: {sample:.d$}\n\
         - Population Covariance: {population:.d$}\n\
         \n\
         **Data:**\n\
         {data}\n\
         \n\
         **Task:**\n\
         1. Interpret the covariance value (positive, negative, or near zero) and what it implies about the relationship between X and Y.\n\
         2. Explain the difference between the sample and population covariance in this context.\n\
         3. Briefly mention if the relationship appears linear or if there might be outliers based on the provided data points.\n\
         4. Keep the tone professional but accessible. Use Markdown formatting.\n",
        n = stats.n,
        mean_x = stats.mean_x,
        mean_y = stats.mean_y,
        sample = stats.sample_covariance,
        population = stats.population_covariance,
        data = data_summary(stats),
        d = PROMPT_DIGITS,
    )
}

/// The dataset as JSON, truncated to [`PREVIEW_LIMIT`] observations with the
/// true total still reported.
pub fn data_summary(stats: &StatisticsResult) -> String {
    if stats.data.len() > PREVIEW_LIMIT {
        format!(
            "First {PREVIEW_LIMIT} points: {}... (Total {} points)",
            to_json(stats.data.head(PREVIEW_LIMIT)),
            stats.n
        )
    } else {
        to_json(stats.data.observations())
    }
}

fn to_json(observations: &[Observation]) -> String {
    serde_json::to_string(observations).unwrap_or_else(|_| "[]".into())
}
