//! Application state and the transitions the presentation layer drives.
//!
//! Every user action is an [`Action`] applied to [`AppState`]. Actions that
//! need the remote analyst return an [`Effect`]; the caller runs it and feeds
//! the outcome back as another action, so the state itself never performs I/O.

use serde::{Deserialize, Serialize};

use crate::analyst::Analyst;
use crate::parse::parse_input_data;
use crate::statistics::{calculate_statistics, StatisticsResult};

pub const DEFAULT_INPUT_X: &str = "1, 2, 3, 4, 5";
pub const DEFAULT_INPUT_Y: &str = "2, 4, 6, 8, 10";

// ---------------------------------------------------------------------------
// AnalysisState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum AnalysisState {
    #[default]
    Idle,
    Loading,
    Ready(String),
    Failed(String),
}

impl AnalysisState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

// ---------------------------------------------------------------------------
// Action / Effect
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetInputX(String),
    SetInputY(String),
    ParseAndCompute,
    Clear,
    RequestAnalysis,
    AnalysisSucceeded(String),
    AnalysisFailed(String),
}

/// Work the caller must perform on behalf of the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Analyze(StatisticsResult),
}

impl Effect {
    /// Run the effect and turn its outcome into the follow-up action.
    pub fn run(&self, analyst: &dyn Analyst) -> Action {
        match self {
            Self::Analyze(stats) => match analyst.summarize(stats) {
                Ok(text) => Action::AnalysisSucceeded(text),
                Err(e) => Action::AnalysisFailed(e.to_string()),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub input_x: String,
    pub input_y: String,
    pub error: Option<String>,
    pub stats: Option<StatisticsResult>,
    pub analysis: AnalysisState,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_X, DEFAULT_INPUT_Y)
    }
}

impl AppState {
    pub fn new(input_x: impl Into<String>, input_y: impl Into<String>) -> Self {
        Self {
            input_x: input_x.into(),
            input_y: input_y.into(),
            error: None,
            stats: None,
            analysis: AnalysisState::Idle,
        }
    }

    /// Apply one transition. Returns the effect the caller has to run, if any.
    pub fn apply(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::SetInputX(text) => self.input_x = text,
            Action::SetInputY(text) => self.input_y = text,
            Action::ParseAndCompute => self.compute(),
            Action::Clear => {
                self.input_x.clear();
                self.input_y.clear();
                self.error = None;
                self.stats = None;
                self.analysis = AnalysisState::Idle;
            }
            Action::RequestAnalysis => {
                if self.analysis.is_loading() {
                    return None;
                }
                let stats = self.stats.clone()?;
                self.analysis = AnalysisState::Loading;
                return Some(Effect::Analyze(stats));
            }
            Action::AnalysisSucceeded(text) => {
                if self.analysis.is_loading() {
                    self.analysis = AnalysisState::Ready(text);
                }
            }
            Action::AnalysisFailed(message) => {
                if self.analysis.is_loading() {
                    self.analysis = AnalysisState::Failed(message);
                }
            }
        }
        None
    }

    /// Apply `action` and run any resulting effects to completion.
    pub fn dispatch(&mut self, action: Action, analyst: &dyn Analyst) {
        let mut pending = self.apply(action);
        while let Some(effect) = pending {
            let next = effect.run(analyst);
            pending = self.apply(next);
        }
    }

    /// A failed parse leaves the previous result in place.
    fn compute(&mut self) {
        self.error = None;
        match parse_input_data(&self.input_x, &self.input_y) {
            Ok(data) => {
                self.stats = Some(calculate_statistics(data));
                self.analysis = AnalysisState::Idle;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}
