//! Integration tests: dataset document → hierarchy → tiles → SVG/HTML.

use pretty_assertions::assert_eq;
use treechart_core::color::ColorScale;
use treechart_core::dataset::{select, DatasetDescriptor};
use treechart_core::hierarchy::Hierarchy;
use treechart_core::loader::{parse_dataset, DatasetSource, FileSource};
use treechart_core::model::DatasetNode;
use treechart_core::tooltip::Tooltip;
use treechart_core::treemap::Squarify;
use treechart_core::{export, html, render, svg, ChartLayout, RenderConfig};

const FIXTURE: &str = include_str!("fixtures/video_games_sample.json");

fn config(container_width: f64) -> RenderConfig {
    RenderConfig {
        dataset: Some("videogames".into()),
        container_width,
        ..RenderConfig::default()
    }
}

fn fixture_chart(container_width: f64) -> ChartLayout {
    let doc = parse_dataset(FIXTURE).unwrap();
    let mut tree = Hierarchy::build(&doc).unwrap();
    ChartLayout::compute(
        select(Some("videogames")),
        &mut tree,
        &config(container_width),
        &Squarify::default(),
    )
}

// ─── End-to-end two-leaf scenario ───────────────────────────────────────

#[test]
fn two_leaves_split_area_one_to_three() {
    let doc = DatasetNode::group(
        "root",
        vec![
            DatasetNode::leaf("A", "X", 10.0),
            DatasetNode::leaf("B", "X", 30.0),
        ],
    );
    let mut tree = Hierarchy::build(&doc).unwrap();
    // 420 wide container → 400 × 320 chart area.
    let chart = ChartLayout::compute(select(None), &mut tree, &config(420.0), &Squarify::default());
    assert_eq!((chart.dims.width, chart.dims.height), (400.0, 320.0));

    let area = |name: &str| {
        chart
            .cells
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.rect.area())
            .unwrap()
    };
    let ratio = area("B") / area("A");
    assert!((ratio - 3.0).abs() < 0.05, "ratio {ratio}");

    let x = ColorScale::from_categories(["X"]).color_of("X");
    assert!(chart.cells.iter().all(|c| c.fill == x));
    let labels: Vec<_> = chart.legend.entries.iter().map(|e| e.category.as_str()).collect();
    assert_eq!(labels, vec!["X"]);
    assert_eq!(chart.legend.entries[0].color, x);
}

// ─── Hierarchy and tiling invariants on a realistic document ────────────

#[test]
fn root_total_matches_leaf_sum() {
    let doc = parse_dataset(FIXTURE).unwrap();
    let tree = Hierarchy::build(&doc).unwrap();
    let sum: f64 = tree.leaves().iter().map(|l| l.value.unwrap_or(0.0)).sum();
    assert!((tree.total() - sum).abs() < 1e-9);
    assert_eq!(tree.leaves().len(), 12);
}

#[test]
fn tiles_are_disjoint_and_fill_the_chart() {
    let chart = fixture_chart(1020.0);
    let cells = &chart.cells;
    for (i, a) in cells.iter().enumerate() {
        for b in &cells[i + 1..] {
            assert!(!a.rect.intersects(&b.rect), "{} overlaps {}", a.name, b.name);
        }
    }
    let full = chart.dims.width * chart.dims.height;
    let covered: f64 = cells.iter().map(|c| c.rect.area()).sum();
    let gaps: f64 = cells.iter().map(|c| c.rect.width() + c.rect.height() + 1.0).sum();
    assert!(covered <= full + 1e-6);
    assert!(covered >= full - gaps, "covered {covered} of {full}");
}

#[test]
fn bigger_value_never_gets_smaller_tile_among_siblings() {
    let chart = fixture_chart(1020.0);
    let wii: Vec<_> = chart.cells.iter().filter(|c| c.category_str() == "Wii").collect();
    assert_eq!(wii[0].name, "Wii Sports");
    for pair in wii.windows(2) {
        assert!(pair[0].value >= pair[1].value);
        assert!(pair[0].rect.area() >= pair[1].rect.area());
    }
}

#[test]
fn fills_match_legend_swatches() {
    let chart = fixture_chart(1020.0);
    for entry in &chart.legend.entries {
        for cell in chart.cells.iter().filter(|c| c.category_str() == entry.category) {
            assert_eq!(cell.fill, entry.color);
        }
    }
    let order: Vec<_> = chart.legend.entries.iter().map(|e| e.category.as_str()).collect();
    assert_eq!(order, vec!["Wii", "DS", "NES", "GB", "X360"]);
}

// ─── Apply stage ────────────────────────────────────────────────────────

#[test]
fn svg_exposes_inspectable_attributes() {
    let chart = fixture_chart(1020.0);
    let out = svg::render(&chart);
    assert!(out.starts_with("<svg id=\"tree-map\""));
    assert!(out.contains("viewBox=\"0 0 1020 960\""));
    assert!(out.contains("<text id=\"title\""));
    assert!(out.contains(">Video Game Sales</text>"));
    assert!(out.contains("data-name=\"Wii Sports\" data-category=\"Wii\" data-value=\"82.53\""));
    assert_eq!(out.matches("class=\"tile\"").count(), 12);
    assert_eq!(out.matches("class=\"legend-item\"").count(), 5);
    assert!(out.contains("<clipPath id=\"clip-11\">"));
    assert!(out.contains("<tspan x=\"4\" y=\"23\">Red/</tspan>"));
}

#[test]
fn html_page_carries_hidden_tooltip() {
    let chart = fixture_chart(1020.0);
    let page = html::render_page(&chart);
    assert!(page.contains("<div id=\"tooltip\" style=\"position: absolute; opacity: 0;"));
    assert!(page.contains("tooltip.style.opacity = 0.9;"));
    assert!(page.contains("e.pageY + -28"));
    assert!(page.contains("id=\"tree-map\""));
}

#[test]
fn tooltip_follows_pointer_over_cells() {
    let chart = fixture_chart(1020.0);
    let mut tip = Tooltip::default();
    assert_eq!(tip.opacity(), 0.0);

    let cell = &chart.cells[3];
    let (x, y) = (cell.rect.x0 + 1.0, cell.rect.y0 + 1.0);
    let hit = chart.hit(x, y).unwrap();
    assert_eq!(hit.name, cell.name);
    tip.on_pointer_move(hit.tooltip(), x, y);
    assert_eq!(tip.opacity(), 0.9);
    assert_eq!(
        tip.content().unwrap().data_value(),
        cell.value.unwrap().to_string()
    );
    tip.on_pointer_out();
    assert_eq!(tip.opacity(), 0.0);
}

#[test]
fn exports_one_row_per_cell() {
    let chart = fixture_chart(1020.0);
    let mut buf = Vec::new();
    export::to_csv(&chart, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(text.lines().count(), 13);
    assert!(text.starts_with("id,name,category,value,x0,y0,x1,y1,fill"));

    let json = export::to_json(&chart);
    assert_eq!(json["dataset"], "videogames");
    assert_eq!(json["cells"].as_array().unwrap().len(), 12);
}

// ─── Full pipeline through a file source ────────────────────────────────

struct Broken;

impl DatasetSource for Broken {
    fn fetch(&self, _: &DatasetDescriptor) -> treechart_core::Result<DatasetNode> {
        parse_dataset("{\"name\": ")
    }
}

#[test]
fn file_source_renders_like_inline_fixture() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/video_games_sample.json");
    let chart = render(&config(1020.0), &FileSource::new(path), &Squarify::default()).unwrap();
    assert_eq!(chart, fixture_chart(1020.0));
}

#[test]
fn malformed_payload_renders_nothing() {
    let err = render(&config(1020.0), &Broken, &Squarify::default()).unwrap_err();
    assert!(matches!(err, treechart_core::ChartError::Parse(_)));
}

#[test]
fn unknown_key_renders_default_dataset() {
    let src = FileSource::new(
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/video_games_sample.json"),
    );
    let cfg = RenderConfig {
        dataset: Some("foo".into()),
        ..config(1020.0)
    };
    let chart = render(&cfg, &src, &Squarify::default()).unwrap();
    assert_eq!(chart.dataset, *select(None));
}
