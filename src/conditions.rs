//! Adverse condition classification
//!
//! A fixed, ordered table of threshold rules is evaluated against the daily
//! metrics. Every rule whose predicate holds contributes one match; the order
//! of matches follows the table, not any notion of severity.

use serde::Serialize;

use crate::models::DailyMetrics;

/// Mean temperature above which a day is very hot (°C)
pub const HOT_THRESHOLD: f64 = 35.0;
/// Mean temperature below which a day is very cold (°C)
pub const COLD_THRESHOLD: f64 = 5.0;
/// Peak wind speed above which a day is very windy (km/h)
pub const WIND_THRESHOLD: f64 = 40.0;
/// Daily precipitation above which a day is very wet (mm)
pub const PRECIPITATION_THRESHOLD: f64 = 10.0;
/// Mean relative humidity above which a day is very uncomfortable (%)
pub const HUMIDITY_THRESHOLD: f64 = 80.0;

/// The five adverse conditions the classifier knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    VeryHot,
    VeryCold,
    VeryWindy,
    VeryWet,
    VeryUncomfortable,
}

impl ConditionKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ConditionKind::VeryHot => "Very Hot",
            ConditionKind::VeryCold => "Very Cold",
            ConditionKind::VeryWindy => "Very Windy",
            ConditionKind::VeryWet => "Very Wet",
            ConditionKind::VeryUncomfortable => "Very Uncomfortable",
        }
    }
}

/// One row of the rule table
#[derive(Debug, Clone, Copy)]
pub struct ConditionRule {
    pub kind: ConditionKind,
    pub applies: fn(&DailyMetrics) -> bool,
    pub icon: &'static str,
    pub risk: &'static str,
    pub advice: &'static str,
    pub color: &'static str,
}

impl ConditionRule {
    pub(crate) fn to_match(&self) -> ConditionMatch {
        ConditionMatch {
            kind: self.kind,
            label: self.kind.label(),
            icon: self.icon,
            risk: self.risk,
            advice: self.advice,
            color: self.color,
        }
    }
}

/// A rule that matched, with its display fields
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConditionMatch {
    #[serde(skip)]
    pub kind: ConditionKind,
    pub label: &'static str,
    pub icon: &'static str,
    pub risk: &'static str,
    pub advice: &'static str,
    pub color: &'static str,
}

fn is_very_hot(metrics: &DailyMetrics) -> bool {
    metrics.mean_temperature > HOT_THRESHOLD
}

fn is_very_cold(metrics: &DailyMetrics) -> bool {
    metrics.mean_temperature < COLD_THRESHOLD
}

fn is_very_windy(metrics: &DailyMetrics) -> bool {
    metrics.max_wind_speed > WIND_THRESHOLD
}

fn is_very_wet(metrics: &DailyMetrics) -> bool {
    metrics.total_precipitation > PRECIPITATION_THRESHOLD
}

fn is_very_uncomfortable(metrics: &DailyMetrics) -> bool {
    metrics.mean_humidity > HUMIDITY_THRESHOLD
}

/// Rule table, in evaluation order.
pub static CONDITION_RULES: [ConditionRule; 5] = [
    ConditionRule {
        kind: ConditionKind::VeryHot,
        applies: is_very_hot,
        icon: "☀️",
        risk: "⚠️ Very Hot",
        advice: "Pack extra water and sunscreen.",
        color: "red",
    },
    ConditionRule {
        kind: ConditionKind::VeryCold,
        applies: is_very_cold,
        icon: "❄️",
        risk: "⚠️ Very Cold",
        advice: "Dress warmly and watch for ice.",
        color: "blue",
    },
    ConditionRule {
        kind: ConditionKind::VeryWindy,
        applies: is_very_windy,
        icon: "💨",
        risk: "⚠️ Very Windy",
        advice: "Secure loose items and avoid open areas.",
        color: "gray",
    },
    ConditionRule {
        kind: ConditionKind::VeryWet,
        applies: is_very_wet,
        icon: "🌧️",
        risk: "⚠️ Very Wet",
        advice: "Bring rain gear and waterproof shoes.",
        color: "darkblue",
    },
    ConditionRule {
        kind: ConditionKind::VeryUncomfortable,
        applies: is_very_uncomfortable,
        icon: "😓",
        risk: "⚠️ Very Uncomfortable",
        advice: "Stay hydrated and take breaks.",
        color: "orange",
    },
];

/// Evaluate every rule against `metrics` and collect the matches in table order.
#[must_use]
pub fn classify(metrics: &DailyMetrics) -> Vec<ConditionMatch> {
    CONDITION_RULES
        .iter()
        .filter(|rule| (rule.applies)(metrics))
        .map(ConditionRule::to_match)
        .collect()
}
