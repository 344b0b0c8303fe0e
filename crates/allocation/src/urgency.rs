use serde::{Deserialize, Serialize};

/// Coarse triage label for a whole optimization batch.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
}

impl core::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            UrgencyLevel::Low => "low",
            UrgencyLevel::Medium => "medium",
            UrgencyLevel::High => "high",
        })
    }
}

/// How a batch is classified. Exactly one policy applies per engine.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum UrgencyPolicy {
    /// Classify by aggregate expected waste (units).
    WasteThreshold { high_above: f64, medium_above: f64 },
    /// Classify by the closest per-item expiry (days).
    ExpiryThreshold {
        high_within_days: i64,
        medium_within_days: i64,
    },
}

impl UrgencyPolicy {
    /// `> 20` units high, `> 10` medium.
    pub const fn waste_threshold() -> Self {
        UrgencyPolicy::WasteThreshold {
            high_above: 20.0,
            medium_above: 10.0,
        }
    }

    /// `<= 2` days high, `<= 5` medium.
    pub const fn expiry_threshold() -> Self {
        UrgencyPolicy::ExpiryThreshold {
            high_within_days: 2,
            medium_within_days: 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UrgencyPolicy::WasteThreshold { .. } => "waste-threshold",
            UrgencyPolicy::ExpiryThreshold { .. } => "expiry-threshold",
        }
    }

    pub fn classify(&self, total_expected_waste: f64, closest_expiry_days: i64) -> UrgencyLevel {
        match *self {
            UrgencyPolicy::WasteThreshold {
                high_above,
                medium_above,
            } => {
                if total_expected_waste > high_above {
                    UrgencyLevel::High
                } else if total_expected_waste > medium_above {
                    UrgencyLevel::Medium
                } else {
                    UrgencyLevel::Low
                }
            }
            UrgencyPolicy::ExpiryThreshold {
                high_within_days,
                medium_within_days,
            } => {
                if closest_expiry_days <= high_within_days {
                    UrgencyLevel::High
                } else if closest_expiry_days <= medium_within_days {
                    UrgencyLevel::Medium
                } else {
                    UrgencyLevel::Low
                }
            }
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        match *self {
            UrgencyPolicy::WasteThreshold {
                high_above,
                medium_above,
            } => {
                if !(high_above.is_finite() && medium_above.is_finite()) {
                    return Err("waste thresholds must be finite".to_string());
                }
                if high_above < medium_above {
                    return Err("high waste threshold must not be below the medium one".to_string());
                }
            }
            UrgencyPolicy::ExpiryThreshold {
                high_within_days,
                medium_within_days,
            } => {
                if high_within_days > medium_within_days {
                    return Err("high expiry threshold must not exceed the medium one".to_string());
                }
            }
        }
        Ok(())
    }
}

impl Default for UrgencyPolicy {
    fn default() -> Self {
        Self::expiry_threshold()
    }
}

/// Parses a policy name into its default thresholds.
impl core::str::FromStr for UrgencyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "waste-threshold" => Ok(Self::waste_threshold()),
            "expiry-threshold" => Ok(Self::expiry_threshold()),
            other => Err(format!(
                "unknown urgency policy: {other} (expected waste-threshold|expiry-threshold)"
            )),
        }
    }
}
