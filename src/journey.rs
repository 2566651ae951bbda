//! Journey state and the render boundary
//!
//! [`Journey`] is the single owner of all mutable visual state: the active
//! stage index, the current layout, the per-stage animation records, and the
//! camera. Navigation mutators recompute the layout eagerly and
//! synchronously; `tick` only advances smoothing. Renderers consume the
//! read-only [`RenderFrame`] snapshot and never mutate core state.

use glam::Vec3;
use serde::Serialize;

use crate::catalog::StageCatalog;
use crate::sim::animation::AnimationController;
use crate::sim::layout::{LayoutEntry, compute_layout};
use crate::sim::view::{CameraState, Viewport, compute_view};

/// Per-tick visual state for one stage sphere
#[derive(Debug, Clone, Serialize)]
pub struct EntityVisual {
    pub id: &'static str,
    pub current_radius: f32,
    pub current_position: Vec3,
    pub rotation_axis: Vec3,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderFrame {
    /// Live stage spheres in catalog order
    pub entities: Vec<EntityVisual>,
    /// The fixed-size reference object, only while its stage is active
    pub reference: Option<EntityVisual>,
    pub camera_position: Vec3,
    pub camera_look_at: Vec3,
}

/// Owns navigation, layout, animation, and camera state
pub struct Journey {
    catalog: StageCatalog,
    /// `None` is the intro (journey not started)
    stage_index: Option<usize>,
    layout: Vec<LayoutEntry>,
    animation: AnimationController,
    camera: CameraState,
    viewport: Viewport,
}

impl Journey {
    pub fn new(catalog: StageCatalog) -> Self {
        Self {
            catalog,
            stage_index: None,
            layout: Vec::new(),
            animation: AnimationController::new(),
            camera: CameraState::new(),
            viewport: Viewport::default(),
        }
    }

    pub fn catalog(&self) -> &StageCatalog {
        &self.catalog
    }

    /// Active stage index, `None` during the intro
    pub fn stage_index(&self) -> Option<usize> {
        self.stage_index
    }

    pub fn active_stage(&self) -> Option<&crate::catalog::Stage> {
        self.stage_index.and_then(|i| self.catalog.get(i))
    }

    pub fn layout(&self) -> &[LayoutEntry] {
        &self.layout
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    /// Begin the journey at stage 0 (host calls this on puzzle success)
    pub fn start(&mut self) {
        self.set_stage(0);
    }

    /// Step to the next stage; no-op past the end. From the intro this
    /// starts at stage 0.
    pub fn advance(&mut self) {
        let next = self.stage_index.map_or(0, |i| i + 1);
        if next < self.catalog.len() {
            self.set_stage(next);
        }
    }

    /// Step to the previous stage; clamped at stage 0, never back into the
    /// intro. No-op during the intro.
    pub fn retreat(&mut self) {
        if let Some(i) = self.stage_index
            && i > 0
        {
            self.set_stage(i - 1);
        }
    }

    /// Return to the intro. Animation records persist: stages already seen
    /// keep their current values and pick up seamlessly on restart.
    pub fn reset(&mut self) {
        self.stage_index = None;
        self.layout.clear();
    }

    fn set_stage(&mut self, index: usize) {
        self.stage_index = Some(index);
        // Eager, synchronous recompute; the tick loop never does this
        self.layout = compute_layout(&self.catalog, index);
        if let Some(stage) = self.catalog.get(index) {
            log::debug!("stage {} ({}) active, {} visible", index, stage.id, self.layout.len());
        }
    }

    /// Advance animation and camera by one timestep
    pub fn tick(&mut self, dt: f32) {
        if let Some(index) = self.stage_index {
            self.animation.tick(&self.layout, index, dt);
        }
        let target = compute_view(&self.catalog, self.stage_index, &self.layout, self.viewport);
        self.camera.tick(target, dt);
    }

    /// Snapshot the current (not target) visual state for rendering
    pub fn frame(&self) -> RenderFrame {
        // Layout order is stage order, so iteration is deterministic
        let entities = self
            .layout
            .iter()
            .filter_map(|entry| {
                let entity = self.animation.get(entry.stage_index)?;
                let stage = self.catalog.get(entry.stage_index)?;
                Some(EntityVisual {
                    id: stage.id,
                    current_radius: entity.current_radius,
                    current_position: entity.current_position,
                    rotation_axis: stage.rotation_axis,
                })
            })
            .collect();

        let reference = self
            .stage_index
            .filter(|&i| self.catalog.is_reference(i))
            .and_then(|i| self.catalog.get(i))
            .and_then(|stage| {
                let geometry = stage.reference?;
                Some(EntityVisual {
                    id: stage.id,
                    current_radius: geometry.radius,
                    current_position: geometry.position,
                    rotation_axis: stage.rotation_axis,
                })
            });

        RenderFrame {
            entities,
            reference,
            camera_position: self.camera.position,
            camera_look_at: self.camera.look_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BASE_RADIUS, SIM_DT};

    fn journey() -> Journey {
        Journey::new(StageCatalog::builtin())
    }

    #[test]
    fn test_starts_in_intro() {
        let j = journey();
        assert_eq!(j.stage_index(), None);
        assert!(j.layout().is_empty());
        assert!(j.frame().entities.is_empty());
    }

    #[test]
    fn test_start_and_advance() {
        let mut j = journey();
        j.start();
        assert_eq!(j.stage_index(), Some(0));
        assert_eq!(j.layout().len(), 1);

        j.advance();
        assert_eq!(j.stage_index(), Some(1));
        assert_eq!(j.layout().len(), 2);
    }

    #[test]
    fn test_advance_clamps_at_end() {
        let mut j = journey();
        j.start();
        for _ in 0..50 {
            j.advance();
        }
        assert_eq!(j.stage_index(), Some(j.catalog().len() - 1));
    }

    #[test]
    fn test_retreat_clamps_at_start() {
        let mut j = journey();
        // No-op during the intro
        j.retreat();
        assert_eq!(j.stage_index(), None);

        j.start();
        j.advance();
        j.retreat();
        assert_eq!(j.stage_index(), Some(0));
        j.retreat();
        assert_eq!(j.stage_index(), Some(0));
    }

    #[test]
    fn test_frame_contents_in_stage_order() {
        let mut j = journey();
        j.start();
        j.tick(SIM_DT);
        j.advance();
        j.advance();
        j.tick(SIM_DT);

        let frame = j.frame();
        assert_eq!(frame.entities.len(), 3);
        assert_eq!(frame.entities[0].id, "humans");
        assert_eq!(frame.entities[1].id, "trees");
        assert_eq!(frame.entities[2].id, "cells");
        assert!(frame.reference.is_none());
    }

    #[test]
    fn test_reference_visible_at_terminal_stage() {
        let mut j = journey();
        j.start();
        for _ in 0..10 {
            j.advance();
        }
        j.tick(SIM_DT);

        let frame = j.frame();
        let reference = frame.reference.expect("reference stage visible");
        assert_eq!(reference.id, "sun");
        assert_eq!(reference.current_radius, 400.0);
        // Numeric stages stay visible behind the reference object
        assert_eq!(frame.entities.len(), 10);
    }

    #[test]
    fn test_camera_converges_on_active_framing() {
        let mut j = journey();
        j.start();
        for _ in 0..5000 {
            j.tick(SIM_DT);
        }
        let frame = j.frame();
        // Stage 0 framing: look at origin, eye lifted half a radius
        assert!(frame.camera_look_at.length() < 1e-2);
        assert!((frame.camera_position.y - BASE_RADIUS * 0.5).abs() < 1e-2);
    }

    #[test]
    fn test_entities_persist_across_reset() {
        let mut j = journey();
        j.start();
        j.advance();
        j.tick(SIM_DT);

        j.reset();
        assert_eq!(j.stage_index(), None);

        // Restarting does not replay the entry animation for stage 1: its
        // record survived and resumes from its current value
        j.start();
        j.advance();
        j.tick(SIM_DT);
        let e = j.frame().entities[1].clone();
        assert!(e.current_radius < crate::consts::ENTRY_RADIUS * 0.99);
    }
}
