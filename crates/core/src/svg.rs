use crate::chart::{Cell, ChartLayout};
use crate::legend::Legend;

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Renders the chart as a standalone `<svg id="tree-map">` element.
pub fn render(chart: &ChartLayout) -> String {
    let dims = &chart.dims;
    let (vw, vh) = dims.view_box();
    let mut svg = String::with_capacity(512 + chart.cells.len() * 512);

    svg.push_str(&format!(
        "<svg id=\"tree-map\" xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\">\n",
        vw.max(0.0),
        vh.max(0.0)
    ));
    svg.push_str("<style>\n");
    svg.push_str("  text { font-family: system-ui, sans-serif; }\n");
    svg.push_str("  .cell text { pointer-events: none; }\n");
    svg.push_str("</style>\n");
    svg.push_str(&format!(
        "<g transform=\"translate({},{})\">\n",
        dims.margins.left, dims.margins.top
    ));

    let h = &chart.header;
    for (id, item) in [("title", &h.title), ("description", &h.description)] {
        svg.push_str(&format!(
            "  <text id=\"{}\" x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"{}\">{}</text>\n",
            id,
            item.x,
            item.y,
            item.font_size.max(0.0),
            escape(&item.text)
        ));
    }

    for cell in &chart.cells {
        render_cell(&mut svg, cell);
    }
    render_legend(&mut svg, &chart.legend);

    svg.push_str("</g>\n</svg>\n");
    svg
}

fn render_cell(out: &mut String, cell: &Cell) {
    let r = &cell.rect;
    let (w, h) = (r.width(), r.height());
    out.push_str(&format!(
        "  <g class=\"cell\" transform=\"translate({},{})\">\n",
        r.x0, r.y0
    ));
    out.push_str(&format!(
        "    <rect class=\"tile\" data-id=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" data-name=\"{}\" data-category=\"{}\" data-value=\"{}\" />\n",
        escape(&cell.path_id),
        w,
        h,
        cell.fill,
        escape(&cell.name),
        escape(cell.category_str()),
        cell.value.unwrap_or(0.0)
    ));
    out.push_str(&format!(
        "    <clipPath id=\"{}\"><rect width=\"{}\" height=\"{}\" /></clipPath>\n",
        cell.clip_id, w, h
    ));
    out.push_str(&format!(
        "    <text clip-path=\"url(#{})\" font-size=\"{}\">",
        cell.clip_id, cell.font_size
    ));
    for line in &cell.lines {
        out.push_str(&format!(
            "<tspan x=\"{}\" y=\"{}\">{}</tspan>",
            line.x,
            line.y,
            escape(&line.text)
        ));
    }
    out.push_str("</text>\n  </g>\n");
}

fn render_legend(out: &mut String, legend: &Legend) {
    out.push_str(&format!(
        "  <g id=\"legend\" transform=\"translate({},{})\">\n",
        legend.origin.0, legend.origin.1
    ));
    let s = legend.swatch_size;
    for e in &legend.entries {
        out.push_str(&format!(
            "    <g transform=\"translate({},{})\"><rect class=\"legend-item\" width=\"{}\" height=\"{}\" fill=\"{}\" /><text x=\"{}\" y=\"{}\" font-size=\"{}\">{}</text></g>\n",
            e.x,
            e.y,
            s,
            s,
            e.color,
            s + 3.0,
            s - 2.0,
            legend.text_size,
            escape(&e.category)
        ));
    }
    out.push_str("  </g>\n");
}
