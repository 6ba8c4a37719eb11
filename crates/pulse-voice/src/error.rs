//! Error types for pulse-voice.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("Auto-trade API error: {0}")]
    Api(String),

    #[error("Dispatch failed: {0}")]
    Dispatch(String),
}

pub type VoiceResult<T> = Result<T, VoiceError>;
