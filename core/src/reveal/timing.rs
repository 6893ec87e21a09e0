//! Entrance Timing
//!
//! Easing curves and the per-token entrance effect of the staged reveal.
//! The entrance runs on wall time since the token appeared, so it is
//! independent of the stage timer that decides *when* a token appears.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Easing functions for smooth entrances
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// No easing (constant speed)
    Linear,

    /// Slow start, fast end
    EaseIn,

    /// Fast start, slow end
    #[default]
    EaseOut,

    /// Slow start and end
    EaseInOut,

    /// Cubic ease out
    EaseOutCubic,

    /// Overshoot then settle
    EaseOutBack,
}

impl EasingFunction {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t).powi(2),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Self::EaseOutBack => {
                let c1 = 1.70158;
                let c3 = c1 + 1.0;
                let t_minus_1 = t - 1.0;
                1.0 + c3 * t_minus_1.powi(3) + c1 * t_minus_1.powi(2)
            }
        }
    }
}

/// Where a token slides in from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntranceDirection {
    /// From the row above
    #[default]
    Top,
    /// From the row below
    Bottom,
}

/// Visual state of one token's entrance at an instant
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entrance {
    /// 0.0 (invisible) to 1.0 (fully shown)
    pub opacity: f32,
    /// Row offset from the baseline (negative = above)
    pub offset: i16,
}

impl Entrance {
    /// Fully arrived
    pub const SETTLED: Self = Self {
        opacity: 1.0,
        offset: 0,
    };

    /// Entrance state after `elapsed` of a `duration`-long entrance
    #[must_use]
    pub fn at(
        elapsed: Duration,
        duration: Duration,
        direction: EntranceDirection,
        easing: EasingFunction,
    ) -> Self {
        if duration.is_zero() || elapsed >= duration {
            return Self::SETTLED;
        }

        let t = elapsed.as_secs_f32() / duration.as_secs_f32();
        let eased = easing.apply(t).clamp(0.0, 1.0);

        // One row of travel, snapped to the grid halfway through
        let rows = if eased < 0.5 { 1 } else { 0 };
        let offset = match direction {
            EntranceDirection::Top => -rows,
            EntranceDirection::Bottom => rows,
        };

        Self {
            opacity: eased,
            offset,
        }
    }

    /// Whether the entrance has finished
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.offset == 0 && self.opacity >= 1.0
    }
}
