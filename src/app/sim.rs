use eframe::egui::{Vec2, vec2};

use super::scene::Scene;

pub(in crate::app) const MAX_TICKS: usize = 100;

const LINK_DISTANCE: f32 = 90.0;
const LINK_STRENGTH: f32 = 0.015;
const CHARGE_STRENGTH: f32 = -200.0;
const CHARGE_SOFTENING: f32 = 0.01;
const CENTER_STRENGTH: f32 = 0.0015;
const CLUSTER_STRENGTH: f32 = 0.1;
const DAMPING: f32 = 0.75;

/// Tick scheduler for the layout simulation. Runs for a fixed budget of
/// `MAX_TICKS` ticks per render pass, one tick per host frame, and stops
/// early when a node drag begins or the scene is rebuilt.
pub(in crate::app) struct Simulation {
    ticks: usize,
    running: bool,
}

impl Simulation {
    pub fn new() -> Self {
        Self {
            ticks: 0,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.ticks = 0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Advance one tick if running. Returns whether a tick ran.
    pub fn step(&mut self, scene: &mut Scene) -> bool {
        if !self.running {
            return false;
        }

        step_forces(scene);
        self.ticks += 1;
        if self.ticks >= MAX_TICKS {
            self.running = false;
        }
        true
    }
}

fn step_forces(scene: &mut Scene) {
    for node in &mut scene.nodes {
        node.force = Vec2::ZERO;
    }

    // Hooke spring toward the rest length; distance floored to dodge the
    // divide when endpoints coincide.
    for link in &scene.links {
        let delta = scene.nodes[link.target].pos - scene.nodes[link.source].pos;
        let distance = delta.length().max(1.0);
        let stretch = distance - LINK_DISTANCE;
        let pull = delta * (LINK_STRENGTH * stretch / distance);

        scene.nodes[link.source].force += pull;
        scene.nodes[link.target].force -= pull;
    }

    // Pairwise charge. O(N^2), fine for tens of nodes; swap for Barnes-Hut
    // or a spatial grid before feeding this hundreds of nodes.
    for i in 0..scene.nodes.len() {
        for j in (i + 1)..scene.nodes.len() {
            let delta = scene.nodes[j].pos - scene.nodes[i].pos;
            let dist_sq = delta.length_sq();
            let distance = dist_sq.sqrt();
            let direction = if distance > 1e-4 {
                delta / distance
            } else {
                vec2(1.0, 0.0)
            };

            // Negative strength repels.
            let push = direction * (CHARGE_STRENGTH / (dist_sq + CHARGE_SOFTENING));
            scene.nodes[i].force += push;
            scene.nodes[j].force -= push;
        }
    }

    let center = scene.viewport * 0.5;
    for node in &mut scene.nodes {
        node.force += (center - node.pos) * CENTER_STRENGTH;

        if let Some(&cluster) = scene.cluster_centers.get(node.category) {
            node.force += (cluster - node.pos) * CLUSTER_STRENGTH;
        }
    }

    // Velocity decay applies after all forces have accumulated.
    for node in &mut scene.nodes {
        node.vel = (node.vel + node.force) * DAMPING;
        node.pos += node.vel;
        debug_assert!(node.pos.x.is_finite() && node.pos.y.is_finite());
    }
}
