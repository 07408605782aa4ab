//! Session-management payloads: resource-manager capability
//! advertisement, control-type selection, and session requests.

use serde::{Deserialize, Serialize};

/// Control schemes a resource manager can operate under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlType {
    /// CEM constrains power draw to an envelope.
    PowerEnvelopeBasedControl,
    /// CEM sends power profiles to follow.
    PowerProfileBasedControl,
    /// CEM picks from advertised operation modes.
    OperationModeBasedControl,
    /// Fill-rate-based control (the FRBC message family).
    FillRateBasedControl,
    /// Device runs on demand, CEM only observes.
    DemandDrivenBasedControl,
    /// Device cannot be controlled at all. Spelling is fixed by the
    /// wire format.
    NotControlable,
    /// No control type chosen yet.
    NoSelection,
}

/// `SessionRequest.request` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionRequestKind {
    /// Tear down and re-establish the session.
    Reconnect,
    /// End the session.
    Terminate,
}

/// One (role, commodity) pair a resource manager fulfils.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoleDetails {
    /// Energy role for this commodity.
    pub role: String,
    /// Commodity wire string (`"ELECTRICITY"`, `"GAS"`, …).
    pub commodity: String,
}

/// Payload of a `ResourceManagerDetails` message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceManagerDetailsPayload {
    /// Wire message id.
    pub message_id: String,
    /// Stable identifier of the resource.
    pub resource_id: String,
    /// Human-readable name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Energy roles the resource fulfils.
    pub roles: Vec<RoleDetails>,
    /// Manufacturer name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    /// Model name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Serial number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    /// Firmware version string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<String>,
    /// Worst-case delay between instruction receipt and execution,
    /// in milliseconds.
    pub instruction_processing_delay: i64,
    /// Control types the resource supports.
    pub available_control_types: Vec<ControlType>,
    /// ISO 4217 currency for cost-related fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Whether the resource sends `FRBC.UsageForecast` messages.
    pub provides_forecast: bool,
    /// Commodity quantities covered by `PowerMeasurement` messages.
    pub provides_power_measurement_types: Vec<String>,
}

/// Payload of a `SelectControlType` message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectControlTypePayload {
    /// Wire message id.
    pub message_id: String,
    /// The control type the CEM has chosen.
    pub control_type: ControlType,
}

/// Payload of a `SessionRequest` message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionRequestPayload {
    /// Wire message id.
    pub message_id: String,
    /// What the sender wants done with the session.
    pub request: SessionRequestKind,
    /// Optional human-readable explanation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic_label: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
