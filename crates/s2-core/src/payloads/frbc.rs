//! Fill-rate-based-control (FRBC) payloads.
//!
//! The FRBC family describes a storage-backed resource: what the storage
//! looks like, how full it is, what the actuators are doing, and the
//! forecasts and targets that drive them. Operation-mode internals
//! (elements, transitions, timers) stay opaque `Value`s.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A closed numeric range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NumberRange {
    /// Lower bound, inclusive.
    pub start_of_range: f64,
    /// Upper bound, inclusive.
    pub end_of_range: f64,
}

/// Payload of an `FRBC.ActuatorStatus` message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrbcActuatorStatusPayload {
    /// Wire message id.
    pub message_id: String,
    /// Actuator this status concerns.
    pub actuator_id: String,
    /// Operation mode currently active.
    pub active_operation_mode_id: String,
    /// Position within the active mode, `0.0..=1.0`.
    pub operation_mode_factor: f64,
    /// Mode active before the last transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_operation_mode_id: Option<String>,
    /// When the last transition happened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition_timestamp: Option<DateTime<Utc>>,
}

/// One interval of a fill-level target profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FillLevelTargetElement {
    /// Interval length in milliseconds.
    pub duration: i64,
    /// Fill level the storage should stay within.
    pub fill_level_range: NumberRange,
}

/// Payload of an `FRBC.FillLevelTargetProfile` message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrbcFillLevelTargetProfilePayload {
    /// Wire message id.
    pub message_id: String,
    /// Start of the first interval.
    pub start_time: DateTime<Utc>,
    /// Contiguous target intervals.
    pub elements: Vec<FillLevelTargetElement>,
}

/// Payload of an `FRBC.Instruction` message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrbcInstructionPayload {
    /// Wire message id.
    pub message_id: String,
    /// Id of the instruction itself, referenced by status updates and
    /// revocations.
    pub id: String,
    /// Actuator being instructed.
    pub actuator_id: String,
    /// Operation mode to switch to.
    pub operation_mode: String,
    /// Position within that mode, `0.0..=1.0`.
    pub operation_mode_factor: f64,
    /// When to execute.
    pub execution_time: DateTime<Utc>,
    /// Whether this instruction stems from an abnormal condition.
    pub abnormal_condition: bool,
}

/// One band of leakage behaviour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeakageElement {
    /// Fill levels this band applies to.
    pub fill_level_range: NumberRange,
    /// Fill-level loss per second while in this band.
    pub leakage_rate: f64,
}

/// Payload of an `FRBC.LeakageBehaviour` message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrbcLeakageBehaviourPayload {
    /// Wire message id.
    pub message_id: String,
    /// When this behaviour description takes effect.
    pub valid_from: DateTime<Utc>,
    /// Leakage bands covering the fill-level range.
    pub elements: Vec<LeakageElement>,
}

/// Payload of an `FRBC.StorageStatus` message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrbcStorageStatusPayload {
    /// Wire message id.
    pub message_id: String,
    /// Current fill level, within the advertised range.
    pub present_fill_level: f64,
}

/// One actuator of the system description.
///
/// Operation modes, transitions, and timers are deeply nested wire
/// structures nothing downstream consumes field-by-field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActuatorDescription {
    /// Stable actuator id.
    pub id: String,
    /// Human-readable label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic_label: Option<String>,
    /// Commodities this actuator can move.
    pub supported_commodities: Vec<String>,
    /// Operation modes, kept opaque.
    pub operation_modes: Vec<Value>,
    /// Allowed mode transitions, kept opaque.
    pub transitions: Vec<Value>,
    /// Transition timers, kept opaque.
    pub timers: Vec<Value>,
}

/// Storage half of the system description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageDescription {
    /// Human-readable label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic_label: Option<String>,
    /// Unit label for fill-level values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_level_label: Option<String>,
    /// Whether leakage-behaviour messages will follow.
    pub provides_leakage_behaviour: bool,
    /// Whether fill-level target profiles will follow.
    pub provides_fill_level_target_profile: bool,
    /// Whether usage forecasts will follow.
    pub provides_usage_forecast: bool,
    /// Fill levels the storage can physically reach.
    pub fill_level_range: NumberRange,
}

/// Payload of an `FRBC.SystemDescription` message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrbcSystemDescriptionPayload {
    /// Wire message id.
    pub message_id: String,
    /// When this description takes effect.
    pub valid_from: DateTime<Utc>,
    /// The actuators of the system.
    pub actuators: Vec<ActuatorDescription>,
    /// The storage the actuators act on.
    pub storage: StorageDescription,
}

/// Payload of an `FRBC.TimerStatus` message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrbcTimerStatusPayload {
    /// Wire message id.
    pub message_id: String,
    /// Timer this status concerns.
    pub timer_id: String,
    /// Actuator the timer belongs to.
    pub actuator_id: String,
    /// When the timer will have (or has) run out.
    pub finished_at: DateTime<Utc>,
}

/// One interval of a usage forecast.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UsageForecastElement {
    /// Interval length in milliseconds.
    pub duration: i64,
    /// Absolute upper bound on the usage rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_rate_upper_limit: Option<f64>,
    /// 95th-percentile upper bound.
    #[serde(rename = "usage_rate_upper_95PPR", skip_serializing_if = "Option::is_none")]
    pub usage_rate_upper_95_ppr: Option<f64>,
    /// 68th-percentile upper bound.
    #[serde(rename = "usage_rate_upper_68PPR", skip_serializing_if = "Option::is_none")]
    pub usage_rate_upper_68_ppr: Option<f64>,
    /// Expected usage rate.
    pub usage_rate_expected: f64,
    /// 68th-percentile lower bound.
    #[serde(rename = "usage_rate_lower_68PPR", skip_serializing_if = "Option::is_none")]
    pub usage_rate_lower_68_ppr: Option<f64>,
    /// 95th-percentile lower bound.
    #[serde(rename = "usage_rate_lower_95PPR", skip_serializing_if = "Option::is_none")]
    pub usage_rate_lower_95_ppr: Option<f64>,
    /// Absolute lower bound on the usage rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_rate_lower_limit: Option<f64>,
}

/// Payload of an `FRBC.UsageForecast` message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrbcUsageForecastPayload {
    /// Wire message id.
    pub message_id: String,
    /// Start of the first interval.
    pub start_time: DateTime<Utc>,
    /// Contiguous forecast intervals.
    pub elements: Vec<UsageForecastElement>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
