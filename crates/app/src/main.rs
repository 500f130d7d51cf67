mod state;
mod ui;

use eframe::egui;
use state::{AppState, Settings};

struct TreechartApp {
    state: AppState,
}

impl TreechartApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings: Settings = cc
            .storage
            .and_then(|s| eframe::get_value(s, eframe::APP_KEY))
            .unwrap_or_default();
        tracing::info!(dataset = %settings.dataset, "starting");
        let mut state = AppState::new(settings);
        state.start_load();
        Self { state }
    }
}

impl eframe::App for TreechartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::draw(&mut self.state, ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.state.settings());
    }
}

fn main() -> anyhow::Result<()> {
    treechart_core::logging::init("info");
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1060.0, 1000.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Treemap Charts",
        options,
        Box::new(|cc| Ok(Box::new(TreechartApp::new(cc)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
