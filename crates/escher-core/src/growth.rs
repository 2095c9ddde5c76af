//! House growth policies.
//!
//! A policy owns the single animated scalar (the house's extent along its
//! growth axis) and advances it once per update. Two behaviors exist:
//!
//! - [`GrowthPolicy::Breathing`]: an endless cosine oscillation in
//!   `[0, 2 * max_depth]`. Each house gets its own speed, so the city moves
//!   out of phase.
//! - [`GrowthPolicy::GrowOnce`]: a linear ramp from `start` to `target` that
//!   latches `done` once it arrives.

use serde::{Deserialize, Serialize};

use crate::error::{require_positive, SceneError};

/// Growth state for one house.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum GrowthPolicy {
    /// Infinite cosine breathing.
    Breathing {
        /// Accumulated oscillator phase in radians
        phase: f64,
        /// Phase increment per frame
        speed: f64,
        /// Half of the peak extent
        max_depth: f64,
    },
    /// One-shot linear growth.
    GrowOnce {
        start: f64,
        target: f64,
        /// Extent gained per frame
        step: f64,
        /// Frames of growth applied so far
        elapsed: f64,
        /// Frames needed to reach the target, `ceil((target - start) / step)`
        required: f64,
        done: bool,
    },
}

impl GrowthPolicy {
    /// Creates a breathing policy starting at phase zero (peak extent).
    ///
    /// A speed of zero is allowed and yields a static house.
    pub fn breathing(speed: f64, max_depth: f64) -> Result<Self, SceneError> {
        if !speed.is_finite() {
            return Err(SceneError::config(format!(
                "breathing speed must be finite, got {}",
                speed
            )));
        }
        if !(max_depth.is_finite() && max_depth >= 0.0) {
            return Err(SceneError::InvalidDimension {
                what: "max_depth",
                value: max_depth,
            });
        }

        Ok(GrowthPolicy::Breathing {
            phase: 0.0,
            speed,
            max_depth,
        })
    }

    /// Creates a grow-once policy ramping from `start` to `target`.
    ///
    /// A `start` at or beyond `target` is already done.
    pub fn grow_once(start: f64, target: f64, step: f64) -> Result<Self, SceneError> {
        let step = require_positive("growth step", step)?;
        if !start.is_finite() || !target.is_finite() {
            return Err(SceneError::config(format!(
                "growth range must be finite, got {} -> {}",
                start, target
            )));
        }

        let required = ((target - start) / step).ceil().max(0.0);
        Ok(GrowthPolicy::GrowOnce {
            start,
            target,
            step,
            elapsed: 0.0,
            required,
            done: required == 0.0,
        })
    }

    /// Current value of the animated scalar.
    pub fn extent(&self) -> f64 {
        match *self {
            GrowthPolicy::Breathing {
                phase, max_depth, ..
            } => (phase.cos() + 1.0) * max_depth,
            GrowthPolicy::GrowOnce {
                start,
                target,
                step,
                elapsed,
                done,
                ..
            } => {
                if done {
                    target
                } else {
                    (start + step * elapsed).min(target)
                }
            }
        }
    }

    /// Whether growth has finished. Breathing never finishes.
    pub fn is_done(&self) -> bool {
        match self {
            GrowthPolicy::Breathing { .. } => false,
            GrowthPolicy::GrowOnce { done, .. } => *done,
        }
    }

    /// Advances the policy by `dt` frames.
    ///
    /// Returns true when the extent may have changed and dependent geometry
    /// needs to be rewritten.
    pub fn advance(&mut self, dt: f64) -> bool {
        match self {
            GrowthPolicy::Breathing { phase, speed, .. } => {
                let delta = *speed * dt;
                if delta == 0.0 {
                    return false;
                }
                *phase += delta;
                true
            }
            GrowthPolicy::GrowOnce {
                elapsed,
                required,
                done,
                ..
            } => {
                if *done || dt <= 0.0 {
                    return false;
                }
                *elapsed += dt;
                if *elapsed >= *required {
                    *done = true;
                    tracing::trace!(frames = *elapsed, "growth reached target");
                }
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breathing_starts_at_peak() {
        let policy = GrowthPolicy::breathing(0.05, 0.1).unwrap();
        assert!((policy.extent() - 0.2).abs() < 1e-12);
        assert!(!policy.is_done());
    }

    #[test]
    fn test_breathing_stays_in_range() {
        let max_depth = 0.1;
        for speed in [0.013, 0.05, 0.5, 1.7, -0.3] {
            let mut policy = GrowthPolicy::breathing(speed, max_depth).unwrap();
            let mut last_phase = 0.0;
            for _ in 0..2000 {
                policy.advance(1.0);
                let extent = policy.extent();
                assert!(extent >= 0.0 && extent <= 2.0 * max_depth + 1e-12);
                assert!(!policy.is_done());

                if let GrowthPolicy::Breathing { phase, .. } = policy {
                    // Phase moves monotonically in the direction of speed
                    if speed > 0.0 {
                        assert!(phase > last_phase);
                    } else {
                        assert!(phase < last_phase);
                    }
                    last_phase = phase;
                }
            }
        }
    }

    #[test]
    fn test_breathing_zero_speed_is_static() {
        let mut policy = GrowthPolicy::breathing(0.0, 0.1).unwrap();
        let before = policy.extent();
        for _ in 0..100 {
            assert!(!policy.advance(1.0));
        }
        assert_eq!(policy.extent(), before);
    }

    #[test]
    fn test_breathing_rejects_bad_input() {
        assert!(GrowthPolicy::breathing(f64::NAN, 0.1).is_err());
        assert!(GrowthPolicy::breathing(0.1, -0.1).is_err());
    }

    #[test]
    fn test_grow_once_converges_exactly() {
        let (start, target, step) = (0.0, 1.0, 0.5 / 64.0);
        let mut policy = GrowthPolicy::grow_once(start, target, step).unwrap();
        let ticks = ((target - start) / step).ceil() as usize;
        assert_eq!(ticks, 128);

        let mut last = policy.extent();
        for tick in 1..=ticks {
            assert!(!policy.is_done(), "done too early at tick {}", tick);
            policy.advance(1.0);
            let extent = policy.extent();
            assert!(extent >= last);
            last = extent;
        }

        assert!(policy.is_done());
        assert_eq!(policy.extent(), target);
    }

    #[test]
    fn test_grow_once_clamps_uneven_step() {
        // 0.7 / 0.3 is not a whole number of steps
        let mut policy = GrowthPolicy::grow_once(0.0, 0.7, 0.3).unwrap();
        for _ in 0..3 {
            policy.advance(1.0);
        }
        assert!(policy.is_done());
        assert_eq!(policy.extent(), 0.7);
    }

    #[test]
    fn test_grow_once_is_latched() {
        let mut policy = GrowthPolicy::grow_once(0.0, 0.1, 0.05).unwrap();
        policy.advance(1.0);
        policy.advance(1.0);
        assert!(policy.is_done());

        let snapshot = policy.clone();
        for _ in 0..10 {
            assert!(!policy.advance(1.0));
        }
        assert_eq!(policy, snapshot);
    }

    #[test]
    fn test_grow_once_already_at_target() {
        let policy = GrowthPolicy::grow_once(2.0, 1.0, 0.1).unwrap();
        assert!(policy.is_done());
        assert_eq!(policy.extent(), 1.0);
    }

    #[test]
    fn test_grow_once_fractional_dt() {
        let mut policy = GrowthPolicy::grow_once(0.0, 1.0, 0.25).unwrap();
        for _ in 0..7 {
            policy.advance(0.5);
        }
        assert!(!policy.is_done());
        assert!((policy.extent() - 0.875).abs() < 1e-12);
        policy.advance(0.5);
        assert!(policy.is_done());
    }

    #[test]
    fn test_grow_once_rejects_bad_step() {
        assert!(matches!(
            GrowthPolicy::grow_once(0.0, 1.0, 0.0),
            Err(SceneError::InvalidDimension { .. })
        ));
        assert!(GrowthPolicy::grow_once(0.0, f64::INFINITY, 0.1).is_err());
    }

    #[test]
    fn test_policy_serialization_tag() {
        let policy = GrowthPolicy::breathing(0.1, 0.2).unwrap();
        let json = serde_json::to_string(&policy).unwrap();
        assert!(json.contains(r#""policy":"breathing""#));
    }
}
