//! Gemini-backed implementation of [`covar_core::Analyst`].

pub mod client;
pub mod protocol;

pub use client::{
    GeminiAnalyst, GeminiSettings, API_KEY_VARS, DEFAULT_ENDPOINT, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS,
};
