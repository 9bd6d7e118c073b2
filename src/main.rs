mod app;
mod ecosystem;
mod util;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Ecosystem dataset file (JSON: nodes, links, category colors).
    #[arg(long, default_value = "data/ecosystem.json")]
    dataset: String,
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1360.0, 880.0]),
        ..Default::default()
    };

    eframe::run_native(
        "ecoscope",
        options,
        Box::new(move |cc| Ok(Box::new(app::EcoscopeApp::new(cc, args.dataset.clone())))),
    )
}
