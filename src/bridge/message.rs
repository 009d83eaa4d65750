use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message posted by the hosted page to the shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Uncaught error or unhandled rejection inside the page.
    JsError {
        message: String,
        #[serde(default)]
        stack: Option<String>,
        #[serde(default)]
        url: Option<String>,
    },
    /// The page changed the volume of one of its media elements.
    VolumeChange { volume: f64 },
    /// Any `type` this shell does not know yet.
    #[serde(other)]
    Unknown,
}

/// Message posted by the shell into the hosted page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    SystemVolumeChange { volume: f64 },
}

impl OutboundMessage {
    pub fn to_wire(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("payload does not match a bridge message: {0}")]
    InvalidShape(#[source] serde_json::Error),
}

impl BridgeError {
    pub fn reason(&self) -> &'static str {
        match self {
            BridgeError::InvalidJson(_) => "invalid_json",
            BridgeError::InvalidShape(_) => "invalid_shape",
        }
    }
}

/// Decode one inbound payload.
///
/// Unknown `type` values decode to [`InboundMessage::Unknown`] rather than an
/// error; a missing `type`, a non-object payload or ill-typed fields are
/// [`BridgeError::InvalidShape`].
pub fn parse_inbound(raw: &str) -> Result<InboundMessage, BridgeError> {
    serde_json::from_str(raw).map_err(|e| {
        if e.is_syntax() || e.is_eof() {
            BridgeError::InvalidJson(e)
        } else {
            BridgeError::InvalidShape(e)
        }
    })
}
