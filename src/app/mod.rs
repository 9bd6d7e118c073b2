use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};

use crate::ecosystem::{EcosystemData, load_ecosystem};

mod camera;
mod highlight;
mod interaction;
mod scene;
mod sim;
mod ui;
mod view;

use camera::Camera;
use highlight::{Emphasis, Selection};
use interaction::Interaction;
use scene::Scene;
use sim::Simulation;

pub struct EcoscopeApp {
    dataset_path: String,
    state: AppState,
    reload_rx: Option<Receiver<Result<EcosystemData, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<EcosystemData, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    data: EcosystemData,
    scene: Option<Scene>,
    scene_dirty: bool,
    simulation: Simulation,
    camera: Camera,
    interaction: Interaction,
    selection: Selection,
    emphasis: Emphasis,
    search: String,
    hovered: Option<usize>,
}

impl EcoscopeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, dataset_path: String) -> Self {
        let state = Self::start_load(dataset_path.clone());
        Self {
            dataset_path,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(dataset_path: String) -> Receiver<Result<EcosystemData, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_ecosystem(&dataset_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(dataset_path: String) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(dataset_path),
        }
    }
}

impl eframe::App for EcoscopeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(data) => AppState::Ready(Box::new(ViewModel::new(data))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading ecosystem dataset...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load ecosystem dataset");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.dataset_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.dataset_path, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.dataset_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            transition = Some(match result {
                                Ok(data) => AppState::Ready(Box::new(ViewModel::new(data))),
                                Err(error) => AppState::Error(error),
                            });
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
