use eframe::egui::{RichText, Ui};

use super::super::ViewModel;
use super::super::highlight::Selection;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Details");
        ui.add_space(6.0);

        let mut pending = None;

        match (self.selection, &self.scene) {
            (_, None) => {
                ui.label("The graph has not been laid out yet.");
            }
            (Selection::None, Some(_)) => {
                ui.label("Select an organization, person or relationship in the graph.");
            }
            (Selection::Node(index), Some(scene)) => {
                let Some(node) = scene.nodes.get(index) else {
                    ui.label("The selected node no longer exists.");
                    return;
                };

                ui.label(RichText::new(node.name.as_str()).strong());
                ui.small(node.id.as_str());
                ui.add_space(6.0);
                ui.label(format!("Category: {}", scene.categories[node.category].key));
                if let Some(size) = node.size {
                    ui.label(format!("Size: {size:.1}"));
                }
                if !node.description.is_empty() {
                    ui.add_space(4.0);
                    ui.label(node.description.as_str());
                }

                ui.separator();
                ui.label(RichText::new("Connections").strong());
                let mut neighbours = scene.neighbours[index].iter().copied().collect::<Vec<_>>();
                neighbours.sort_unstable();
                if neighbours.is_empty() {
                    ui.label("No recorded relationships.");
                }
                for neighbour in neighbours {
                    if let Some(other) = scene.nodes.get(neighbour)
                        && ui.link(other.name.as_str()).clicked()
                    {
                        pending = Some(Selection::Node(neighbour));
                    }
                }
            }
            (Selection::Link(index), Some(scene)) => {
                let Some(link) = scene.links.get(index) else {
                    ui.label("The selected relationship no longer exists.");
                    return;
                };

                let source = &scene.nodes[link.source];
                let target = &scene.nodes[link.target];

                ui.label(RichText::new(link.kind.as_str()).strong());
                ui.add_space(6.0);
                ui.label(format!("{} — {}", source.name, target.name));
                if !link.description.is_empty() {
                    ui.add_space(4.0);
                    ui.label(link.description.as_str());
                }

                ui.separator();
                ui.label(RichText::new("Endpoints").strong());
                for endpoint in [link.source, link.target] {
                    if ui.link(scene.nodes[endpoint].name.as_str()).clicked() {
                        pending = Some(Selection::Node(endpoint));
                    }
                }
            }
        }

        if !self.selection.is_none() {
            ui.add_space(8.0);
            if ui.button("Clear selection").clicked() {
                pending = Some(Selection::None);
            }
        }

        if let Some(selection) = pending {
            self.set_selection(selection);
        }
    }
}
