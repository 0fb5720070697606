use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use thiserror::Error;
use user_dynamics_core::SimulationParameters;

const SCENARIO_DOMAIN: &str = "flow";
const SCENARIO_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded scenario payload.
pub(crate) const SCENARIO_HEADER: &str = "flow:v1";
/// Delimiter used to separate the prefix, version and payload.
const FIELD_DELIMITER: char = ':';

/// Encodes parameters into a single-line string that reproduces a run.
pub(crate) fn encode(parameters: &SimulationParameters) -> Result<String, ScenarioTransferError> {
    let json = serde_json::to_vec(parameters).map_err(ScenarioTransferError::InvalidPayload)?;
    let encoded = STANDARD_NO_PAD.encode(json);
    Ok(format!("{SCENARIO_HEADER}{FIELD_DELIMITER}{encoded}"))
}

/// Decodes parameters from the provided scenario string.
///
/// Decoded parameters are not validated; callers validate them with the rest
/// of the configuration.
pub(crate) fn decode(value: &str) -> Result<SimulationParameters, ScenarioTransferError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ScenarioTransferError::EmptyPayload);
    }

    let mut parts = trimmed.splitn(3, FIELD_DELIMITER);
    let domain = parts.next().ok_or(ScenarioTransferError::MissingPrefix)?;
    let version = parts.next().ok_or(ScenarioTransferError::MissingVersion)?;
    let payload = parts.next().ok_or(ScenarioTransferError::MissingPayload)?;

    if domain != SCENARIO_DOMAIN {
        return Err(ScenarioTransferError::InvalidPrefix(domain.to_owned()));
    }
    if version != SCENARIO_VERSION {
        return Err(ScenarioTransferError::UnsupportedVersion(version.to_owned()));
    }

    let bytes = STANDARD_NO_PAD
        .decode(payload.as_bytes())
        .map_err(ScenarioTransferError::InvalidEncoding)?;
    serde_json::from_slice(&bytes).map_err(ScenarioTransferError::InvalidPayload)
}

/// Errors that can occur while decoding scenario strings.
#[derive(Debug, Error)]
pub(crate) enum ScenarioTransferError {
    /// The provided string was empty or contained only whitespace.
    #[error("scenario code was empty")]
    EmptyPayload,
    /// The prefix segment was missing.
    #[error("scenario code is missing the prefix")]
    MissingPrefix,
    /// The version segment was missing.
    #[error("scenario code is missing the version")]
    MissingVersion,
    /// The payload segment was missing.
    #[error("scenario code is missing the payload")]
    MissingPayload,
    /// The prefix segment did not name a user flow scenario.
    #[error("scenario prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The version identifier is not understood.
    #[error("scenario version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode scenario payload: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The payload could not be (de)serialised.
    #[error("could not parse scenario payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
}
