//! Summary sentence for a set of matched conditions.

use crate::conditions::{ConditionKind, ConditionMatch};

/// The recommendation shown to the user, one per report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    GreatDay,
    PlanIndoors,
    WindCaution,
    DressWarmly,
    CheckConditions,
}

impl Recommendation {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Recommendation::GreatDay => "Great day for outdoor activities!",
            Recommendation::PlanIndoors => {
                "This day looks uncomfortable for hiking. Best to plan indoors."
            }
            Recommendation::WindCaution => "Windy conditions. Caution advised for outdoor events.",
            Recommendation::DressWarmly => "Dress warmly for outdoor activities.",
            Recommendation::CheckConditions => "Check conditions before heading out.",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the recommendation for `conditions`.
///
/// Precedence is fixed and independent of rule order: heat, rain and humidity
/// outrank wind, which outranks cold.
#[must_use]
pub fn summarize(conditions: &[ConditionMatch]) -> Recommendation {
    if conditions.is_empty() {
        return Recommendation::GreatDay;
    }

    let has = |kind: ConditionKind| conditions.iter().any(|c| c.kind == kind);

    if has(ConditionKind::VeryHot)
        || has(ConditionKind::VeryWet)
        || has(ConditionKind::VeryUncomfortable)
    {
        Recommendation::PlanIndoors
    } else if has(ConditionKind::VeryWindy) {
        Recommendation::WindCaution
    } else if has(ConditionKind::VeryCold) {
        Recommendation::DressWarmly
    } else {
        Recommendation::CheckConditions
    }
}
