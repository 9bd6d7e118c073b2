use eframe::egui::Vec2;

use super::camera::Camera;
use super::highlight::Selection;
use super::scene::Scene;
use super::sim::Simulation;

/// Screen-space pick distance for links, converted to world units by the
/// current zoom. Thin strokes are unreliable click targets; picking is a
/// distance computation, never pointer capture on the stroke itself.
const LINK_PICK_THRESHOLD: f32 = 25.0;

/// Node hit targets are this multiple of the visible marker radius.
const NODE_HIT_SCALE: f32 = 3.0;

enum PointerState {
    Idle,
    Panning,
    Dragging { node: usize, grab_offset: Vec2 },
}

/// Pointer state machine for the graph canvas. All positions are screen
/// coordinates relative to the canvas origin; the camera maps them into
/// simulation space.
pub(in crate::app) struct Interaction {
    state: PointerState,
}

impl Interaction {
    pub fn new() -> Self {
        Self {
            state: PointerState::Idle,
        }
    }

    /// Invalidates any captured drag state. Called whenever the scene is
    /// rebuilt, since captured node indices die with the old arena.
    pub fn reset(&mut self) {
        self.state = PointerState::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, PointerState::Dragging { .. })
    }

    /// Pointer pressed: a node hit target starts a drag (the simulation must
    /// not fight the pointer, so it stops immediately), empty background
    /// starts a pan.
    pub fn pointer_down(
        &mut self,
        screen: Vec2,
        scene: &mut Scene,
        camera: &Camera,
        simulation: &mut Simulation,
    ) {
        let world = camera.to_world(screen);

        if let Some(index) = hit_node(scene, world) {
            simulation.stop();
            let node = &mut scene.nodes[index];
            node.vel = Vec2::ZERO;
            self.state = PointerState::Dragging {
                node: index,
                grab_offset: node.pos - world,
            };
        } else {
            self.state = PointerState::Panning;
        }
    }

    /// Pointer moved while pressed. Returns true when the move changed
    /// anything that needs a repaint.
    pub fn pointer_move(
        &mut self,
        screen: Vec2,
        screen_delta: Vec2,
        scene: &mut Scene,
        camera: &mut Camera,
    ) -> bool {
        match self.state {
            PointerState::Dragging { node, grab_offset } => {
                if let Some(sim_node) = scene.nodes.get_mut(node) {
                    sim_node.pos = camera.to_world(screen) + grab_offset;
                }
                true
            }
            PointerState::Panning => {
                camera.pan_by(screen_delta);
                true
            }
            PointerState::Idle => false,
        }
    }

    /// Pointer released or left the canvas; every such path drops captured
    /// drag state.
    pub fn pointer_up(&mut self) {
        self.state = PointerState::Idle;
    }

    /// Resolve a genuine click (not a drag release). Node hit targets take
    /// precedence; otherwise the nearest link within the pick threshold is
    /// selected; otherwise the selection clears.
    pub fn click(&self, screen: Vec2, scene: &Scene, camera: &Camera) -> Selection {
        let world = camera.to_world(screen);

        if let Some(index) = hit_node(scene, world) {
            return Selection::Node(index);
        }

        let threshold = LINK_PICK_THRESHOLD / camera.scale;
        nearest_link(scene, world)
            .filter(|&(_, distance)| distance <= threshold)
            .map(|(index, _)| Selection::Link(index))
            .unwrap_or(Selection::None)
    }
}

pub(in crate::app) fn hovered_node(scene: &Scene, camera: &Camera, screen: Vec2) -> Option<usize> {
    hit_node(scene, camera.to_world(screen))
}

fn hit_node(scene: &Scene, world: Vec2) -> Option<usize> {
    scene
        .nodes
        .iter()
        .enumerate()
        .filter_map(|(index, node)| {
            let distance = (node.pos - world).length();
            (distance <= node.radius() * NODE_HIT_SCALE).then_some((index, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}

fn nearest_link(scene: &Scene, world: Vec2) -> Option<(usize, f32)> {
    scene
        .links
        .iter()
        .enumerate()
        .map(|(index, link)| {
            let distance = point_segment_distance(
                world,
                scene.nodes[link.source].pos,
                scene.nodes[link.target].pos,
            );
            (index, distance)
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Distance from a point to a segment: projection clamped to the segment,
/// with zero-length segments degrading to point distance.
fn point_segment_distance(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let length_sq = ab.length_sq();
    if length_sq <= f32::EPSILON {
        return (point - a).length();
    }

    let t = ((point - a).dot(ab) / length_sq).clamp(0.0, 1.0);
    (point - (a + ab * t)).length()
}

#[cfg(test)]
mod tests {
    use super::super::scene::tests::{VIEWPORT, dataset, link, node};
    use super::*;
    use eframe::egui::vec2;

    fn segment_scene() -> Scene {
        let data = dataset(
            vec![node("a", "startup", None), node("b", "investor", None)],
            vec![link("a", "b")],
        );
        let mut scene = Scene::build(&data, VIEWPORT);
        scene.nodes[0].pos = vec2(100.0, 100.0);
        scene.nodes[1].pos = vec2(300.0, 100.0);
        scene
    }

    #[test]
    fn point_segment_distance_projects_and_clamps() {
        let a = vec2(0.0, 0.0);
        let b = vec2(100.0, 0.0);

        assert_eq!(point_segment_distance(vec2(50.0, 30.0), a, b), 30.0);
        assert_eq!(point_segment_distance(vec2(-40.0, 0.0), a, b), 40.0);
        assert_eq!(point_segment_distance(vec2(130.0, 40.0), a, b), 50.0);
        assert_eq!(point_segment_distance(vec2(3.0, 4.0), a, a), 5.0);
    }

    #[test]
    fn click_within_threshold_picks_the_link() {
        let scene = segment_scene();
        let camera = Camera::default();
        let interaction = Interaction::new();

        assert_eq!(
            interaction.click(vec2(200.0, 124.0), &scene, &camera),
            Selection::Link(0)
        );
        assert_eq!(
            interaction.click(vec2(200.0, 126.0), &scene, &camera),
            Selection::None
        );
    }

    #[test]
    fn click_on_a_node_hit_target_wins_over_links() {
        let scene = segment_scene();
        let camera = Camera::default();
        let interaction = Interaction::new();

        // 10 units from node a: inside the 3x oversized target, on the link.
        assert_eq!(
            interaction.click(vec2(110.0, 100.0), &scene, &camera),
            Selection::Node(0)
        );
    }

    #[test]
    fn drag_preserves_the_grab_offset() {
        let mut scene = segment_scene();
        let mut camera = Camera {
            offset: vec2(30.0, -10.0),
            scale: 2.0,
        };
        let mut simulation = Simulation::new();
        simulation.start();

        let start = scene.nodes[0].pos;
        // Press 4 world units off-center: screen of (104, 102).
        let press = camera.to_screen(vec2(104.0, 102.0));
        let mut interaction = Interaction::new();
        interaction.pointer_down(press, &mut scene, &camera, &mut simulation);

        assert!(interaction.is_dragging());
        assert!(!simulation.is_running());
        assert_eq!(scene.nodes[0].vel, Vec2::ZERO);

        let pointer = press + vec2(50.0, -20.0);
        interaction.pointer_move(pointer, vec2(50.0, -20.0), &mut scene, &mut camera);

        // The node tracks the pointer exactly: screen delta over the zoom.
        let expected = start + vec2(50.0, -20.0) / camera.scale;
        assert!((scene.nodes[0].pos - expected).length() < 1e-3);
    }

    #[test]
    fn release_clears_drag_state() {
        let mut scene = segment_scene();
        let mut camera = Camera::default();
        let mut simulation = Simulation::new();
        let mut interaction = Interaction::new();

        interaction.pointer_down(vec2(100.0, 100.0), &mut scene, &camera, &mut simulation);
        assert!(interaction.is_dragging());

        interaction.pointer_up();
        assert!(!interaction.is_dragging());

        let before = scene.nodes[0].pos;
        let moved =
            interaction.pointer_move(vec2(500.0, 500.0), vec2(5.0, 5.0), &mut scene, &mut camera);
        assert!(!moved);
        assert_eq!(scene.nodes[0].pos, before);
    }

    #[test]
    fn press_on_empty_background_pans() {
        let mut scene = segment_scene();
        let mut camera = Camera::default();
        let mut simulation = Simulation::new();
        simulation.start();
        let mut interaction = Interaction::new();

        interaction.pointer_down(vec2(700.0, 700.0), &mut scene, &camera, &mut simulation);
        assert!(!interaction.is_dragging());
        // Pans leave the simulation alone.
        assert!(simulation.is_running());

        interaction.pointer_move(vec2(712.0, 695.0), vec2(12.0, -5.0), &mut scene, &mut camera);
        assert_eq!(camera.offset, vec2(12.0, -5.0));
    }
}
