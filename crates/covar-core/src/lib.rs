pub mod analyst;
pub mod error;
pub mod observation;
pub mod parse;
pub mod plot;
pub mod prompt;
pub mod state;
pub mod statistics;

pub use analyst::{Analyst, EMPTY_ANALYSIS};
pub use error::{AnalysisError, AnalysisResult, InputError, InputResult};
pub use observation::{Dataset, Observation, Variable};
pub use parse::parse_input_data;
pub use plot::{scatter_rows, Domain, PlotBounds};
pub use prompt::{build_prompt, SYSTEM_INSTRUCTION};
pub use state::{Action, AnalysisState, AppState, Effect, DEFAULT_INPUT_X, DEFAULT_INPUT_Y};
pub use statistics::{calculate_statistics, CovarianceSign, StatisticsResult};
