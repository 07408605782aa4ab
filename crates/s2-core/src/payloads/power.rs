//! Power forecast and measurement payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One forecast band for a single commodity quantity.
///
/// The percentile bounds keep their wire suffixes (`_95PPR`, `_68PPR`);
/// only the expected value is mandatory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerForecastValue {
    /// Absolute upper bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_upper_limit: Option<f64>,
    /// 95th-percentile upper bound.
    #[serde(rename = "value_upper_95PPR", skip_serializing_if = "Option::is_none")]
    pub value_upper_95_ppr: Option<f64>,
    /// 68th-percentile upper bound.
    #[serde(rename = "value_upper_68PPR", skip_serializing_if = "Option::is_none")]
    pub value_upper_68_ppr: Option<f64>,
    /// Expected value.
    pub value_expected: f64,
    /// 68th-percentile lower bound.
    #[serde(rename = "value_lower_68PPR", skip_serializing_if = "Option::is_none")]
    pub value_lower_68_ppr: Option<f64>,
    /// 95th-percentile lower bound.
    #[serde(rename = "value_lower_95PPR", skip_serializing_if = "Option::is_none")]
    pub value_lower_95_ppr: Option<f64>,
    /// Absolute lower bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_lower_limit: Option<f64>,
    /// Commodity quantity wire string (`"ELECTRIC.POWER.L1"`, …).
    pub commodity_quantity: String,
}

/// One forecast interval.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerForecastElement {
    /// Interval length in milliseconds.
    pub duration: i64,
    /// Forecast bands, one per commodity quantity.
    pub power_values: Vec<PowerForecastValue>,
}

/// Payload of a `PowerForecast` message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerForecastPayload {
    /// Wire message id.
    pub message_id: String,
    /// Start of the first interval.
    pub start_time: DateTime<Utc>,
    /// Contiguous forecast intervals.
    pub elements: Vec<PowerForecastElement>,
}

/// One measured value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerValue {
    /// Commodity quantity wire string.
    pub commodity_quantity: String,
    /// Measured value in the quantity's unit.
    pub value: f64,
}

/// Payload of a `PowerMeasurement` message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerMeasurementPayload {
    /// Wire message id.
    pub message_id: String,
    /// When the measurement was taken.
    pub measurement_timestamp: DateTime<Utc>,
    /// Measured values, one per commodity quantity.
    pub values: Vec<PowerValue>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
