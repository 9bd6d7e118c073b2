use std::collections::HashSet;

use eframe::egui::{
    self, Align2, Color32, CursorIcon, FontId, Painter, Rect, Sense, Stroke, Ui, vec2,
};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::camera::Camera;
use super::highlight::{Emphasis, Selection, compute_emphasis};
use super::interaction::hovered_node;
use super::scene::Scene;
use super::ViewModel;

impl ViewModel {
    /// Starts a fresh render pass: the previous arena, camera, captured drag
    /// state and selection are all replaced before the new scene exists, so
    /// nothing from the old pass can write into the new one.
    fn rebuild_scene(&mut self, rect: Rect) {
        self.interaction.reset();
        self.camera = Camera::default();
        self.scene = Some(Scene::build(&self.data, rect.size()));
        self.selection = Selection::None;
        self.hovered = None;
        self.refresh_emphasis();
        self.simulation.start();
        self.scene_dirty = false;
    }

    pub(in crate::app) fn set_selection(&mut self, selection: Selection) {
        if self.selection != selection
            && let Some(scene) = &self.scene
        {
            match selection {
                Selection::None => log::debug!("selection cleared"),
                Selection::Node(index) => {
                    if let Some(node) = scene.nodes.get(index) {
                        log::debug!("node selected: {}", node.id);
                    }
                }
                Selection::Link(index) => {
                    if let Some(link) = scene.links.get(index) {
                        log::debug!(
                            "link selected: {} -> {}",
                            scene.nodes[link.source].id,
                            scene.nodes[link.target].id
                        );
                    }
                }
            }
        }

        self.selection = selection;
        self.refresh_emphasis();
    }

    fn refresh_emphasis(&mut self) {
        self.emphasis = match &self.scene {
            Some(scene) => compute_emphasis(scene, self.selection),
            None => Emphasis::empty(),
        };
    }

    /// Node indices matching the search query. Active only while nothing is
    /// selected, mirroring how selection emphasis takes priority.
    fn search_matches(&self, scene: &Scene) -> Option<HashSet<usize>> {
        if !self.selection.is_none() {
            return None;
        }

        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        let matcher = SkimMatcherV2::default();
        Some(
            scene
                .nodes
                .iter()
                .enumerate()
                .filter_map(|(index, node)| {
                    matcher.fuzzy_match(&node.name, query).map(|_| index)
                })
                .collect(),
        )
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        if self.scene_dirty || self.scene.is_none() {
            self.rebuild_scene(rect);
        }

        let painter = ui.painter_at(rect);
        draw_background(&painter, rect, self.camera);

        let origin = rect.left_top();

        // Wheel zoom is allowed in every pointer state.
        if response.hovered() {
            let scroll = ui.input(|input| input.raw_scroll_delta.y);
            if scroll.abs() > f32::EPSILON {
                let pointer = ui
                    .input(|input| input.pointer.hover_pos())
                    .unwrap_or_else(|| rect.center());
                self.camera.zoom_at(pointer - origin, scroll);
            }
        }

        let hover_pos = ui.input(|input| input.pointer.hover_pos());
        let pointer_up_anywhere = ui.input(|input| !input.pointer.any_down());

        let mut pending_selection = None;
        let hovered;
        {
            let Some(scene) = self.scene.as_mut() else {
                return;
            };

            if response.drag_started_by(egui::PointerButton::Primary)
                && let Some(press) = response.interact_pointer_pos()
            {
                self.interaction.pointer_down(
                    press - origin,
                    scene,
                    &self.camera,
                    &mut self.simulation,
                );
            }

            if response.dragged_by(egui::PointerButton::Primary)
                && let Some(pointer) = response.interact_pointer_pos()
            {
                self.interaction.pointer_move(
                    pointer - origin,
                    response.drag_delta(),
                    scene,
                    &mut self.camera,
                );
            }

            // Release and pointer-leave both end the gesture; a release
            // outside the canvas must not leave a captured node behind.
            if response.drag_stopped() || pointer_up_anywhere {
                self.interaction.pointer_up();
            }

            if response.clicked()
                && let Some(pos) = response.interact_pointer_pos()
            {
                pending_selection = Some(self.interaction.click(pos - origin, scene, &self.camera));
            }

            if self.simulation.is_running() {
                self.simulation.step(scene);
            }

            hovered = hover_pos
                .filter(|_| response.hovered())
                .and_then(|pointer| hovered_node(scene, &self.camera, pointer - origin));
            self.hovered = hovered;
        }

        if self.simulation.is_running() || response.dragged() || self.interaction.is_dragging() {
            ui.ctx().request_repaint();
        }

        if let Some(selection) = pending_selection {
            self.set_selection(selection);
        }

        if hovered.is_some() {
            ui.output_mut(|output| output.cursor_icon = CursorIcon::PointingHand);
        }

        let Some(scene) = self.scene.as_ref() else {
            return;
        };
        let camera = self.camera;
        let search_matches = self.search_matches(scene);

        for (index, link) in scene.links.iter().enumerate() {
            let start = origin + camera.to_screen(scene.nodes[link.source].pos);
            let end = origin + camera.to_screen(scene.nodes[link.target].pos);

            let alpha = self.emphasis.link_alpha.get(index).copied().unwrap_or(1.0);
            let width = self.emphasis.link_stroke.get(index).copied().unwrap_or(1.5);
            painter.line_segment(
                [start, end],
                Stroke::new(
                    (width * camera.scale).clamp(0.5, 6.0),
                    fade(scene.kind_color(link), alpha),
                ),
            );
        }

        for (index, node) in scene.nodes.iter().enumerate() {
            let position = origin + camera.to_screen(node.pos);
            let radius = node.radius() * camera.scale;

            let mut alpha = self.emphasis.node_alpha.get(index).copied().unwrap_or(1.0);
            if let Some(matches) = &search_matches
                && !matches.contains(&index)
            {
                alpha *= 0.3;
            }
            let stroke_width = self.emphasis.node_stroke.get(index).copied().unwrap_or(1.5);

            painter.circle_filled(position, radius, fade(scene.category_color(node), alpha));
            painter.circle_stroke(
                position,
                radius,
                Stroke::new(
                    (stroke_width * camera.scale).clamp(0.8, 7.0),
                    fade(Color32::from_gray(235), alpha),
                ),
            );

            let label_pos = origin + camera.to_screen(node.pos - vec2(0.0, 14.0));
            painter.text(
                label_pos,
                Align2::CENTER_CENTER,
                &node.name,
                FontId::proportional((11.0 * camera.scale).clamp(8.0, 26.0)),
                fade(Color32::from_gray(222), alpha),
            );
        }

        if let Some(index) = hovered
            && let Some(node) = scene.nodes.get(index)
        {
            let caption = format!(
                "{}  |  {}  |  {} links",
                node.name,
                scene.categories[node.category].key,
                scene.neighbours[index].len()
            );
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                caption,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }
    }
}

fn fade(color: Color32, alpha: f32) -> Color32 {
    let alpha = alpha.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (color.a() as f32 * alpha) as u8,
    )
}

fn draw_background(painter: &Painter, rect: Rect, camera: Camera) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(16, 20, 26));

    let step = (64.0 * camera.scale.clamp(0.6, 1.8)).max(24.0);
    let grid = Stroke::new(1.0, Color32::from_rgba_unmultiplied(58, 68, 80, 60));

    let mut x = rect.left() + camera.offset.x.rem_euclid(step);
    while x < rect.right() {
        painter.line_segment(
            [egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())],
            grid,
        );
        x += step;
    }

    let mut y = rect.top() + camera.offset.y.rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment(
            [egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)],
            grid,
        );
        y += step;
    }
}
