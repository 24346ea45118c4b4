use serde::{Deserialize, Serialize};

/// Maximum war attacks obtainable in one scoring period.
pub const DEFAULT_WAR_MAX_ATTEMPTS: f64 = 10.0;
/// Maximum CWL attacks obtainable in one scoring period.
pub const DEFAULT_CWL_MAX_ATTEMPTS: f64 = 7.0;
/// Logistic steepness of the participation curve.
pub const DEFAULT_STEEPNESS: f64 = 8.0;
/// Participation ratio at which the factor is exactly 0.5.
pub const DEFAULT_MIDPOINT: f64 = 0.5;
/// Decimal places kept on skill and final scores before ranking.
pub const DEFAULT_PRECISION: u32 = 2;

/// Main scoring configuration.
///
/// Every field has a default, so an empty `scoring:` block (or none at all)
/// yields the canonical formula.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   weights: { skill: 0.32, gold: 0.05, games: 0.21, events: 0.42 }
///   skill_split: { war: 0.6, cwl: 0.4 }
///   war_max_attempts: 10
///   cwl_max_attempts: 7
///   steepness: 8
///   precision: 2
///   clamp_stars: false
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    /// Blend of skill and secondary metrics in the final score
    pub weights: CompositeWeights,

    /// Blend of war and CWL inside the skill score
    pub skill_split: SkillSplit,

    /// Attempt ceiling used to compute war participation
    pub war_max_attempts: f64,

    /// Attempt ceiling used to compute CWL participation
    pub cwl_max_attempts: f64,

    /// Steepness `k` of the logistic participation curve
    pub steepness: f64,

    /// Participation ratio where the curve crosses 0.5
    pub midpoint: f64,

    /// Round skill and final scores to this many decimals (None = no rounding)
    pub precision: Option<u32>,

    /// Clamp stars to 3 per attempt before computing efficiency
    pub clamp_stars: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: CompositeWeights::default(),
            skill_split: SkillSplit::default(),
            war_max_attempts: DEFAULT_WAR_MAX_ATTEMPTS,
            cwl_max_attempts: DEFAULT_CWL_MAX_ATTEMPTS,
            steepness: DEFAULT_STEEPNESS,
            midpoint: DEFAULT_MIDPOINT,
            precision: Some(DEFAULT_PRECISION),
            clamp_stars: false,
        }
    }
}

/// Weights of the four components of the final score. Must sum to 1.0.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CompositeWeights {
    pub skill: f64,
    pub gold: f64,
    pub games: f64,
    pub events: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            skill: 0.32,
            gold: 0.05,
            games: 0.21,
            events: 0.42,
        }
    }
}

impl CompositeWeights {
    pub fn total(&self) -> f64 {
        self.skill + self.gold + self.games + self.events
    }
}

/// Share of war vs CWL in the skill score. Must sum to 1.0.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SkillSplit {
    pub war: f64,
    pub cwl: f64,
}

impl Default for SkillSplit {
    fn default() -> Self {
        Self { war: 0.6, cwl: 0.4 }
    }
}

impl SkillSplit {
    pub fn total(&self) -> f64 {
        self.war + self.cwl
    }
}
