use chrono::NaiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Size {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Risk {
    Low,
    Medium,
    High,
}

/// A near-Earth object and its closest approach within the fetched window.
#[derive(Debug, Clone, PartialEq)]
pub struct NearEarthObject {
    pub id: String,
    pub reference_id: String,
    pub name: String,
    pub absolute_magnitude: f64,
    /// Meters, mean of the estimated minimum and maximum.
    pub estimated_diameter: f64,
    pub is_potentially_hazardous: bool,
    pub close_approach: NaiveDateTime,
    /// Kilometers per second.
    pub relative_velocity: f64,
    /// Kilometers.
    pub miss_distance: f64,
    pub orbiting_body: String,
    /// Position of the diameter between the smallest and largest of its feed, in [0, 1].
    pub normalized_diameter: f64,
    pub normalized_relative_velocity: f64,
    pub normalized_miss_distance: f64,
}

const SMALL_DIAMETER_LIMIT: f64 = 100.0;
const MEDIUM_DIAMETER_LIMIT: f64 = 250.0;
const LOW_RISK_LIMIT: f64 = 80_000.0;
const MEDIUM_RISK_LIMIT: f64 = 500_000.0;

impl NearEarthObject {
    pub fn size(&self) -> Size {
        if self.estimated_diameter < SMALL_DIAMETER_LIMIT {
            Size::Small
        } else if self.estimated_diameter < MEDIUM_DIAMETER_LIMIT {
            Size::Medium
        } else {
            Size::Large
        }
    }

    /// Loose "doomsday" score: bigger, faster and closer objects score higher.
    pub fn doom_score(&self) -> f64 {
        self.estimated_diameter * self.relative_velocity.powi(2) / self.miss_distance.powf(1.2)
            * 10_000_000_000.0
    }

    pub fn risk(&self) -> Risk {
        let score = self.doom_score();
        if score < LOW_RISK_LIMIT {
            Risk::Low
        } else if score < MEDIUM_RISK_LIMIT {
            Risk::Medium
        } else {
            Risk::High
        }
    }
}
