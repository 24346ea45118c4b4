use super::config::ScoringConfig;

/// Allowed drift of a weight vector's sum from 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let weights = &config.weights;
    for (name, value) in [
        ("skill", weights.skill),
        ("gold", weights.gold),
        ("games", weights.games),
        ("events", weights.events),
    ] {
        if !value.is_finite() || value < 0.0 {
            errors.push(format!(
                "scoring.weights.{}: must be a non-negative number, got {}",
                name, value
            ));
        }
    }
    let total = weights.total();
    if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        errors.push(format!("scoring.weights: must sum to 1.0, got {}", total));
    }

    let split = &config.skill_split;
    for (name, value) in [("war", split.war), ("cwl", split.cwl)] {
        if !value.is_finite() || value < 0.0 {
            errors.push(format!(
                "scoring.skill_split.{}: must be a non-negative number, got {}",
                name, value
            ));
        }
    }
    let total = split.total();
    if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        errors.push(format!("scoring.skill_split: must sum to 1.0, got {}", total));
    }

    for (name, value) in [
        ("war_max_attempts", config.war_max_attempts),
        ("cwl_max_attempts", config.cwl_max_attempts),
        ("steepness", config.steepness),
    ] {
        if !value.is_finite() || value <= 0.0 {
            errors.push(format!("scoring.{}: must be positive, got {}", name, value));
        }
    }

    if !(0.0..=1.0).contains(&config.midpoint) {
        errors.push(format!(
            "scoring.midpoint: must be between 0 and 1, got {}",
            config.midpoint
        ));
    }

    if let Some(precision) = config.precision {
        if precision > 10 {
            errors.push(format!(
                "scoring.precision: at most 10 decimal places, got {}",
                precision
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
