use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use treechart_core::dimensions::Margins;
use treechart_core::loader::{DatasetSource, FileSource, HttpSource};
use treechart_core::treemap::Squarify;
use treechart_core::{export, html, svg, RenderConfig};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Svg,
    Html,
}

#[derive(Parser, Debug)]
#[command(name = "treechart-cli", about = "Treemap chart renderer")]
struct Args {
    /// Dataset key: kickstarter, videogames or movies (anything else uses kickstarter)
    #[arg(short, long)]
    data: Option<String>,
    /// Host container width in pixels
    #[arg(short, long, default_value_t = 1020.0)]
    width: f64,
    /// Read the dataset document from a local file instead of its URL
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Chart output path; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,
    /// Also write the computed tiles as JSON
    #[arg(long)]
    json: Option<PathBuf>,
    /// Also write the computed tiles as CSV
    #[arg(long)]
    csv: Option<PathBuf>,
    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,
}

fn main() -> anyhow::Result<()> {
    treechart_core::logging::init("info");
    let args = Args::parse();

    let config = RenderConfig {
        dataset: args.data.clone(),
        container_width: args.width,
        margins: Margins::default(),
    };
    let source: Box<dyn DatasetSource> = match &args.input {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(HttpSource::new(Duration::from_secs(args.timeout))),
    };

    let chart = treechart_core::render(&config, source.as_ref(), &Squarify::default())
        .context("rendering treemap")?;

    let doc = match args.format {
        Format::Svg => svg::render(&chart),
        Format::Html => html::render_page(&chart),
    };
    match &args.output {
        Some(path) => std::fs::write(path, doc)
            .with_context(|| format!("writing {}", path.display()))?,
        None => print!("{doc}"),
    }

    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&export::to_json(&chart))?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &args.csv {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        export::to_csv(&chart, std::io::BufWriter::new(file))?;
    }

    tracing::info!(
        dataset = %chart.dataset.key,
        cells = chart.cells.len(),
        categories = chart.legend.entries.len(),
        total = chart.total,
        "rendered"
    );
    Ok(())
}
