use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use treechart_core::dataset::DatasetKey;
use treechart_core::hierarchy::Hierarchy;
use treechart_core::loader::{DatasetSource, FileSource, HttpSource};
use treechart_core::tooltip::Tooltip;
use treechart_core::treemap::Squarify;
use treechart_core::{ChartError, ChartLayout, Generation, RenderConfig};

/// Settings persisted between sessions.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    pub dataset: DatasetKey,
}

pub struct LoadMsg {
    pub generation: u64,
    pub result: Result<Hierarchy, ChartError>,
}

pub struct AppState {
    pub dataset: DatasetKey,
    /// Local file overriding the dataset URL, if one was opened.
    pub input: Option<PathBuf>,
    pub generation: Generation,
    load_tx: Sender<LoadMsg>,
    load_rx: Receiver<LoadMsg>,
    pub loading: bool,
    pub tree: Option<Hierarchy>,
    pub chart: Option<ChartLayout>,
    laid_out_width: f64,
    pub tooltip: Tooltip,
    pub error: Option<String>,
    pub loaded_at: Option<chrono::DateTime<chrono::Local>>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let (load_tx, load_rx) = unbounded();
        Self {
            dataset: settings.dataset,
            input: None,
            generation: Generation::default(),
            load_tx,
            load_rx,
            loading: false,
            tree: None,
            chart: None,
            laid_out_width: 0.0,
            tooltip: Tooltip::default(),
            error: None,
            loaded_at: None,
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            dataset: self.dataset,
        }
    }

    /// Starts a fresh load, discarding the current chart. Any load still in
    /// flight is superseded and its result dropped on arrival.
    pub fn start_load(&mut self) {
        let generation = self.generation.next();
        self.loading = true;
        self.tree = None;
        self.chart = None;
        self.error = None;
        self.tooltip.on_pointer_out();

        let descriptor = self.dataset.descriptor();
        let input = self.input.clone();
        let tx = self.load_tx.clone();
        std::thread::spawn(move || {
            let source: Box<dyn DatasetSource> = match input {
                Some(path) => Box::new(FileSource::new(path)),
                None => Box::new(HttpSource::default()),
            };
            let result = source
                .fetch(descriptor)
                .and_then(|doc| Hierarchy::build(&doc));
            let _ = tx.send(LoadMsg { generation, result });
        });
    }

    pub fn select_dataset(&mut self, key: DatasetKey) {
        self.dataset = key;
        self.input = None;
        self.start_load();
    }

    pub fn open_file(&mut self, path: PathBuf) {
        self.input = Some(path);
        self.start_load();
    }

    /// Drains finished loads. Returns true when state changed.
    pub fn poll_load(&mut self) -> bool {
        let mut changed = false;
        while let Ok(msg) = self.load_rx.try_recv() {
            if !self.generation.is_current(msg.generation) {
                continue;
            }
            changed = true;
            self.loading = false;
            match msg.result {
                Ok(tree) => {
                    self.tree = Some(tree);
                    self.chart = None;
                    self.loaded_at = Some(chrono::Local::now());
                }
                Err(e) => {
                    tracing::error!(error = %e, "dataset load failed");
                    self.error = Some(e.to_string());
                }
            }
        }
        changed
    }

    /// Re-lays out the loaded tree when the container width changed.
    pub fn layout_for(&mut self, container_width: f64) -> Option<&ChartLayout> {
        let tree = self.tree.as_mut()?;
        if self.chart.is_none() || (self.laid_out_width - container_width).abs() > 0.5 {
            let config = RenderConfig {
                container_width,
                ..RenderConfig::default()
            };
            self.chart = Some(ChartLayout::compute(
                self.dataset.descriptor(),
                tree,
                &config,
                &Squarify::default(),
            ));
            self.laid_out_width = container_width;
        }
        self.chart.as_ref()
    }
}
