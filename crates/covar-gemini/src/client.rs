use std::time::Duration;

use tracing::{debug, warn};

use covar_core::{
    build_prompt, AnalysisError, AnalysisResult, Analyst, StatisticsResult, EMPTY_ANALYSIS,
    SYSTEM_INSTRUCTION,
};

use crate::protocol::{error_message, GenerateRequest, GenerateResponse};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variables consulted, in order, when no key is configured.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Connection settings for [`GeminiAnalyst`].
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
    /// Explicit key; environment variables are used when `None`.
    pub api_key: Option<String>,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            model: DEFAULT_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            api_key: None,
        }
    }
}

/// [`Analyst`] backed by the Gemini `generateContent` endpoint.
pub struct GeminiAnalyst {
    settings: GeminiSettings,
    api_key: Option<String>,
    agent: ureq::Agent,
}

impl GeminiAnalyst {
    pub fn new(settings: GeminiSettings) -> Self {
        let api_key = resolve_api_key(settings.api_key.as_deref(), |var| {
            std::env::var(var).ok()
        });
        let agent = ureq::AgentBuilder::new().timeout(settings.timeout).build();
        Self {
            settings,
            api_key,
            agent,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.model
        )
    }

    fn generate(&self, key: &str, prompt: &str) -> AnalysisResult<String> {
        let body = GenerateRequest::new(SYSTEM_INSTRUCTION, prompt, self.settings.temperature);
        let url = self.url();
        debug!(%url, prompt_len = prompt.len(), "requesting analysis");

        let response = match self
            .agent
            .post(&url)
            .set("x-goog-api-key", key)
            .set("Content-Type", "application/json")
            .send_json(&body)
        {
            Ok(resp) => resp,
            Err(ureq::Error::Status(status, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                return Err(AnalysisError::Service {
                    status,
                    message: error_message(&body),
                });
            }
            Err(e) => return Err(AnalysisError::Network(e.to_string())),
        };

        let parsed: GenerateResponse = response
            .into_json()
            .map_err(|e| AnalysisError::Malformed(e.to_string()))?;
        Ok(text_or_fallback(parsed.text()))
    }
}

impl Analyst for GeminiAnalyst {
    fn summarize(&self, stats: &StatisticsResult) -> AnalysisResult<String> {
        let Some(key) = self.api_key.as_deref() else {
            warn!("analysis requested without an API key");
            return Err(AnalysisError::MissingCredential);
        };
        let prompt = build_prompt(stats);
        self.generate(key, &prompt).inspect_err(|e| {
            warn!("analysis failed: {e}");
        })
    }
}

/// First non-blank key from the explicit value or the environment.
fn resolve_api_key(
    explicit: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    explicit
        .map(str::to_string)
        .into_iter()
        .chain(API_KEY_VARS.iter().filter_map(|var| env(var)))
        .map(|k| k.trim().to_string())
        .find(|k| !k.is_empty())
}

fn text_or_fallback(text: String) -> String {
    if text.trim().is_empty() {
        EMPTY_ANALYSIS.to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covar_core::{calculate_statistics, parse_input_data};

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_explicit_key_wins() {
        let key = resolve_api_key(Some("cfg-key"), |_| Some("env-key".into()));
        assert_eq!(key.as_deref(), Some("cfg-key"));
    }

    #[test]
    fn test_env_fallback_order() {
        let env = |var: &str| match var {
            "API_KEY" => Some("legacy".to_string()),
            "GEMINI_API_KEY" => Some("primary".to_string()),
            _ => None,
        };
        assert_eq!(resolve_api_key(None, env).as_deref(), Some("primary"));

        let legacy_only = |var: &str| (var == "API_KEY").then(|| "legacy".to_string());
        assert_eq!(resolve_api_key(None, legacy_only).as_deref(), Some("legacy"));
    }

    #[test]
    fn test_blank_keys_ignored() {
        assert_eq!(resolve_api_key(Some("   "), no_env), None);
        assert_eq!(resolve_api_key(None, no_env), None);
    }

    #[test]
    fn test_missing_credential_skips_network() {
        let analyst = GeminiAnalyst {
            settings: GeminiSettings {
                endpoint: "http://127.0.0.1:9".into(),
                ..GeminiSettings::default()
            },
            api_key: None,
            agent: ureq::AgentBuilder::new().build(),
        };
        assert!(!analyst.has_credential());
        let stats = calculate_statistics(parse_input_data("1 2", "3 4").unwrap());
        assert_eq!(
            analyst.summarize(&stats),
            Err(AnalysisError::MissingCredential)
        );
    }

    #[test]
    fn test_url_built_from_endpoint_and_model() {
        let analyst = GeminiAnalyst::new(GeminiSettings {
            endpoint: "https://example.test/v1beta/".into(),
            api_key: Some("k".into()),
            ..GeminiSettings::default()
        });
        assert_eq!(
            analyst.url(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(analyst.model(), DEFAULT_MODEL);
    }

    #[test]
    fn test_empty_text_falls_back() {
        assert_eq!(text_or_fallback("  \n".into()), EMPTY_ANALYSIS);
        assert_eq!(text_or_fallback("**Positive**".into()), "**Positive**");
    }
}
