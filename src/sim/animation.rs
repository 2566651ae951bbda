//! Per-stage animation state
//!
//! Each visible stage owns one persistent [`AnimatedEntity`] holding its
//! current (not target) radius and position. Entities are created lazily the
//! first time their stage becomes visible and survive every subsequent layout
//! change, so retargeting mid-flight continues seamlessly from the current
//! value. Each tick, every entity moves toward its layout target under the
//! same exponential-decay law.

use std::collections::HashMap;

use glam::Vec3;
use serde::Serialize;

use crate::consts::{ENTRY_RADIUS, SMOOTH_RATE};
use crate::sim::layout::LayoutEntry;

/// Mutable animation record for one stage, keyed by stage index
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AnimatedEntity {
    pub current_radius: f32,
    pub current_position: Vec3,
}

/// Owns all animation records and advances them once per tick
#[derive(Debug, Default)]
pub struct AnimationController {
    entities: HashMap<usize, AnimatedEntity>,
}

impl AnimationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entities (stages that have appeared at least once)
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, stage_index: usize) -> Option<&AnimatedEntity> {
        self.entities.get(&stage_index)
    }

    /// Advance every entity with a layout target by one timestep.
    ///
    /// A stage seen for the first time gets its entity created here. A stage
    /// whose first appearance is as the active stage starts oversized at
    /// [`ENTRY_RADIUS`] so it visibly shrinks into place; stage 0, the first
    /// of the whole sequence, starts at its target instead (no entry
    /// animation). Positions always seed at target.
    pub fn tick(&mut self, layout: &[LayoutEntry], active_index: usize, dt: f32) {
        let blend = (SMOOTH_RATE * dt).min(1.0);

        for entry in layout {
            let target_radius = entry.radius;
            let target_position = Vec3::new(entry.center_offset, 0.0, 0.0);

            let entity = self.entities.entry(entry.stage_index).or_insert_with(|| {
                let first_as_active = entry.stage_index == active_index && entry.stage_index != 0;
                AnimatedEntity {
                    current_radius: if first_as_active {
                        ENTRY_RADIUS
                    } else {
                        target_radius
                    },
                    current_position: target_position,
                }
            });

            // Straight-line decay toward the target, each axis independent
            entity.current_radius += (target_radius - entity.current_radius) * blend;
            entity.current_position = entity
                .current_position
                .lerp(target_position, blend);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BASE_RADIUS, SIM_DT};

    fn entry(stage_index: usize, radius: f32, center_offset: f32) -> LayoutEntry {
        LayoutEntry {
            stage_index,
            radius,
            center_offset,
        }
    }

    #[test]
    fn test_lazy_creation() {
        let mut anim = AnimationController::new();
        assert!(anim.is_empty());

        anim.tick(&[entry(0, BASE_RADIUS, 0.0)], 0, SIM_DT);
        assert_eq!(anim.len(), 1);
        assert!(anim.get(1).is_none());

        // Advancing to stage 1 creates exactly one more entity
        let layout = [entry(0, 1.0, -6.0), entry(1, BASE_RADIUS, 0.0)];
        anim.tick(&layout, 1, SIM_DT);
        assert_eq!(anim.len(), 2);
    }

    #[test]
    fn test_first_stage_starts_at_target() {
        let mut anim = AnimationController::new();
        anim.tick(&[entry(0, BASE_RADIUS, 0.0)], 0, SIM_DT);
        let e = anim.get(0).unwrap();
        assert_eq!(e.current_radius, BASE_RADIUS);
        assert_eq!(e.current_position, Vec3::ZERO);
    }

    #[test]
    fn test_new_active_stage_starts_oversized() {
        let mut anim = AnimationController::new();
        anim.tick(&[entry(0, BASE_RADIUS, 0.0)], 0, SIM_DT);

        let layout = [entry(0, 1.0, -6.0), entry(1, BASE_RADIUS, 0.0)];
        anim.tick(&layout, 1, SIM_DT);
        let e = anim.get(1).unwrap();
        // One tick of shrinking from ENTRY_RADIUS, still far above target
        assert!(e.current_radius > BASE_RADIUS);
        assert!(e.current_radius < ENTRY_RADIUS);
    }

    #[test]
    fn test_retarget_continues_from_current_value() {
        let mut anim = AnimationController::new();
        anim.tick(&[entry(0, BASE_RADIUS, 0.0)], 0, SIM_DT);

        // Stage 0 demoted: target shrinks and shifts left
        let layout = [entry(0, 0.5, -8.0), entry(1, BASE_RADIUS, 0.0)];
        anim.tick(&layout, 1, SIM_DT);
        let e = anim.get(0).unwrap();
        assert!(e.current_radius < BASE_RADIUS && e.current_radius > 0.5);
        assert!(e.current_position.x < 0.0 && e.current_position.x > -8.0);
    }

    #[test]
    fn test_monotonic_convergence() {
        let mut anim = AnimationController::new();
        anim.tick(&[entry(0, BASE_RADIUS, 0.0)], 0, SIM_DT);

        let layout = [entry(0, 0.02, -10.0), entry(1, BASE_RADIUS, 0.0)];
        let mut prev_err = f32::INFINITY;
        for _ in 0..2000 {
            anim.tick(&layout, 1, SIM_DT);
            let e = anim.get(0).unwrap();
            let err = (e.current_radius - 0.02).abs() + (e.current_position.x + 10.0).abs();
            assert!(err <= prev_err, "distance to target grew: {err} > {prev_err}");
            prev_err = err;
        }
        // Converged within tolerance after a bounded number of ticks
        assert!(prev_err < 1e-3);
    }

    #[test]
    fn test_huge_dt_snaps_without_overshoot() {
        let mut anim = AnimationController::new();
        anim.tick(&[entry(0, BASE_RADIUS, 0.0)], 0, 0.0);

        let layout = [entry(0, 1.0, -5.0), entry(1, BASE_RADIUS, 0.0)];
        anim.tick(&layout, 1, 100.0);
        let e = anim.get(0).unwrap();
        assert_eq!(e.current_radius, 1.0);
        assert_eq!(e.current_position.x, -5.0);
    }
}
