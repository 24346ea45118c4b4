/// Stars attainable on a single attempt.
pub const MAX_STARS_PER_ATTEMPT: f64 = 3.0;

/// Stars earned per attempt, normalized to the 3-star cap.
///
/// Zero attempts count as one so a member who never attacked scores 0
/// instead of dividing by zero. Stars above `3 x attempts` are kept unless
/// `clamp_stars` is set, which lets the result exceed 1.0 on bad data.
pub fn efficiency(stars: f64, attempts: f64, clamp_stars: bool) -> f64 {
    let stars = if clamp_stars {
        stars.min(attempts * MAX_STARS_PER_ATTEMPT)
    } else {
        stars
    };
    stars / attempts.max(1.0) / MAX_STARS_PER_ATTEMPT
}

/// Logistic participation factor in (0, 1).
///
/// `1 / (1 + e^(-k * (attempts / max_attempts - midpoint)))`. Members far
/// below the midpoint are discounted towards 0; at or above the ceiling the
/// factor approaches 1.
pub fn participation_factor(attempts: f64, max_attempts: f64, steepness: f64, midpoint: f64) -> f64 {
    let ratio = attempts / max_attempts;
    1.0 / (1.0 + (-steepness * (ratio - midpoint)).exp())
}

/// Per-category result: raw efficiency, participation discount and their product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryScore {
    pub efficiency: f64,
    pub participation_factor: f64,
    pub fair_score: f64,
}

impl CategoryScore {
    pub fn compute(
        stars: f64,
        attempts: f64,
        max_attempts: f64,
        steepness: f64,
        midpoint: f64,
        clamp_stars: bool,
    ) -> Self {
        let efficiency = efficiency(stars, attempts, clamp_stars);
        let participation_factor = participation_factor(attempts, max_attempts, steepness, midpoint);
        Self {
            efficiency,
            participation_factor,
            fair_score: efficiency * participation_factor,
        }
    }
}
