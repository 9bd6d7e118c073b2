use eframe::egui::Vec2;

pub(in crate::app) const MIN_SCALE: f32 = 0.5;
pub(in crate::app) const MAX_SCALE: f32 = 4.0;
const WHEEL_ZOOM_RATE: f32 = 0.001;

/// View transform for the graph canvas: pan offset in screen pixels plus a
/// clamped zoom scale. Reset to identity at the start of every render pass;
/// only the interaction controller mutates it. Screen coordinates are
/// relative to the canvas origin.
#[derive(Clone, Copy, Debug)]
pub(in crate::app) struct Camera {
    pub offset: Vec2,
    pub scale: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl Camera {
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world * self.scale + self.offset
    }

    pub fn to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.offset) / self.scale
    }

    pub fn pan_by(&mut self, screen_delta: Vec2) {
        self.offset += screen_delta;
    }

    /// Rescale about a screen point so the world point under it stays put.
    /// Positive wheel delta zooms in.
    pub fn zoom_at(&mut self, pointer: Vec2, wheel_delta: f32) {
        let previous = self.scale;
        self.scale =
            (previous * (1.0 + wheel_delta * WHEEL_ZOOM_RATE)).clamp(MIN_SCALE, MAX_SCALE);
        self.offset = pointer - (pointer - self.offset) * (self.scale / previous);
    }
}
