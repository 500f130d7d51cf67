//! Self-contained HTML page: the chart SVG plus a body-level `#tooltip`
//! driven by pointer events on the tiles.

use crate::chart::ChartLayout;
use crate::svg::{self, escape};
use crate::tooltip::{POINTER_OFFSET, VISIBLE_OPACITY};

pub fn render_page(chart: &ChartLayout) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <div id="visualization-container">
{svg}    </div>
    <div id="tooltip" style="position: absolute; opacity: 0; pointer-events: none;"></div>
    <script>{js}</script>
</body>
</html>
"#,
        title = escape(chart.dataset.title),
        css = inline_css(),
        svg = svg::render(chart),
        js = inline_javascript(),
    )
}

fn inline_css() -> &'static str {
    r#"
        body { margin: 0; font-family: system-ui, sans-serif; background: #fafafa; }
        #visualization-container { max-width: 1020px; margin: 0 auto; }
        #tree-map { width: 100%; height: auto; display: block; }
        #tooltip {
            background: #ffffe0; border: 1px solid #999; border-radius: 4px;
            padding: 6px 8px; font-size: 12px; line-height: 1.4; white-space: nowrap;
        }
    "#
}

fn inline_javascript() -> String {
    format!(
        r#"
        (function () {{
            var tooltip = document.getElementById('tooltip');
            function esc(s) {{
                var d = document.createElement('div');
                d.textContent = s == null ? '' : s;
                return d.innerHTML;
            }}
            document.querySelectorAll('#tree-map .tile').forEach(function (tile) {{
                tile.addEventListener('mousemove', function (e) {{
                    var value = tile.getAttribute('data-value') || '0';
                    tooltip.style.opacity = {opacity};
                    tooltip.setAttribute('data-value', value);
                    tooltip.innerHTML =
                        'Name: ' + esc(tile.getAttribute('data-name')) +
                        '<br>Category: ' + esc(tile.getAttribute('data-category')) +
                        '<br>Value: ' + esc(Number(value).toLocaleString('en-US'));
                    tooltip.style.left = (e.pageX + {dx}) + 'px';
                    tooltip.style.top = (e.pageY + {dy}) + 'px';
                }});
                tile.addEventListener('mouseout', function () {{
                    tooltip.style.opacity = 0;
                }});
            }});
        }})();
    "#,
        opacity = VISIBLE_OPACITY,
        dx = POINTER_OFFSET.0,
        dy = POINTER_OFFSET.1,
    )
}
