use eframe::egui::{self, Align, Color32, Context, Layout, RichText, Ui};

use crate::ecosystem::EcosystemData;

use super::super::camera::Camera;
use super::super::highlight::{Emphasis, Selection};
use super::super::interaction::Interaction;
use super::super::sim::{MAX_TICKS, Simulation};
use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(data: EcosystemData) -> Self {
        Self {
            data,
            scene: None,
            scene_dirty: true,
            simulation: Simulation::new(),
            camera: Camera::default(),
            interaction: Interaction::new(),
            selection: Selection::None,
            emphasis: Emphasis::empty(),
            search: String::new(),
            hovered: None,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        dataset_path: &str,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("ecoscope");
                    ui.separator();
                    ui.label(format!("dataset: {dataset_path}"));
                    if let Some(scene) = &self.scene {
                        ui.label(format!(
                            "{} nodes, {} links",
                            scene.nodes.len(),
                            scene.links.len()
                        ));
                        if scene.dropped_links > 0 {
                            ui.colored_label(
                                Color32::from_rgb(230, 170, 80),
                                format!("{} links dropped", scene.dropped_links),
                            );
                        }
                    }
                    if self.simulation.is_running() {
                        ui.label(format!(
                            "settling {}/{}",
                            self.simulation.ticks(),
                            MAX_TICKS
                        ));
                    }
                    ui.separator();
                    ui.label("search:");
                    ui.text_edit_singleline(&mut self.search);

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if is_loading {
                            ui.spinner();
                        }
                        if ui
                            .add_enabled(!is_loading, egui::Button::new("Reload"))
                            .clicked()
                        {
                            *reload_requested = true;
                        }
                        if ui.button("Re-run layout").clicked() {
                            self.scene_dirty = true;
                        }
                    });
                });
            });

        egui::SidePanel::right("inspector")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                self.draw_details(ui);
                ui.separator();
                self.draw_legend(ui);
                ui.separator();
                self.draw_directory(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_graph(ui);
        });
    }

    fn draw_legend(&self, ui: &mut Ui) {
        let Some(scene) = &self.scene else {
            return;
        };

        ui.label(RichText::new("Categories").strong());
        for style in &scene.categories {
            ui.horizontal(|ui| {
                ui.label(RichText::new("●").color(style.color));
                ui.label(style.key.as_str());
            });
        }

        if !scene.kind_colors.is_empty() {
            ui.add_space(4.0);
            ui.label(RichText::new("Relationships").strong());
            let mut kinds = scene.kind_colors.iter().collect::<Vec<_>>();
            kinds.sort_by(|a, b| a.0.cmp(b.0));
            for (kind, color) in kinds {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("—").color(*color));
                    ui.label(kind.as_str());
                });
            }
        }
    }

    fn draw_directory(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Directory").strong());

        let mut pending = None;
        if let Some(scene) = &self.scene {
            egui::ScrollArea::vertical()
                .id_salt("directory_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for (index, node) in scene.nodes.iter().enumerate() {
                        let selected = self.selection == Selection::Node(index);
                        if ui.selectable_label(selected, node.name.as_str()).clicked() {
                            pending = Some(if selected {
                                Selection::None
                            } else {
                                Selection::Node(index)
                            });
                        }
                    }
                });
        }

        if let Some(selection) = pending {
            self.set_selection(selection);
        }
    }
}
