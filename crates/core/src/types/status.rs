//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Support ticket status.
///
/// Serialized exactly as the backend spells it (`"InProgress"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TicketStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TicketStatus {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "InProgress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "pending" => Ok(Self::Pending),
            "inprogress" => Ok(Self::InProgress),
            "completed" | "complete" => Ok(Self::Completed),
            "cancelled" | "cancel" => Ok(Self::Cancelled),
            _ => Err(format!("invalid ticket status: {s}")),
        }
    }
}

/// Trip (ride) status as reported in trip histories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TripStatus {
    Completed,
    Cancelled,
    /// Any in-flight or backend-specific state.
    #[serde(other)]
    Other,
}

/// A driver document section that an admin can verify or reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationSection {
    /// Bank account details.
    Bank,
    /// Vehicle registration details.
    Vehicle,
    /// Driving license.
    License,
    /// Final admin approval of the driver profile.
    Profile,
}

impl std::fmt::Display for VerificationSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bank => write!(f, "bank"),
            Self::Vehicle => write!(f, "vehicle"),
            Self::License => write!(f, "license"),
            Self::Profile => write!(f, "profile"),
        }
    }
}

impl std::str::FromStr for VerificationSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bank" => Ok(Self::Bank),
            "vehicle" => Ok(Self::Vehicle),
            "license" => Ok(Self::License),
            "profile" | "admin" => Ok(Self::Profile),
            _ => Err(format!("invalid verification section: {s}")),
        }
    }
}

/// Kind of editable static content page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaticContentKind {
    /// Terms and conditions.
    #[serde(rename = "TERMCONDITION")]
    TermsAndConditions,
    /// Privacy policy.
    #[serde(rename = "POLICY")]
    Policy,
}

impl StaticContentKind {
    /// Wire representation used in the `type` field and query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TermsAndConditions => "TERMCONDITION",
            Self::Policy => "POLICY",
        }
    }
}

impl std::fmt::Display for StaticContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StaticContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "terms" | "termcondition" => Ok(Self::TermsAndConditions),
            "policy" => Ok(Self::Policy),
            _ => Err(format!("invalid content kind: {s} (expected terms or policy)")),
        }
    }
}
