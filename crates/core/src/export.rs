use crate::chart::ChartLayout;

pub fn to_csv(chart: &ChartLayout, mut w: impl std::io::Write) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(&mut w);
    writer.write_record([
        "id", "name", "category", "value", "x0", "y0", "x1", "y1", "fill",
    ])?;
    for c in &chart.cells {
        writer.write_record([
            c.path_id.clone(),
            c.name.clone(),
            c.category_str().to_string(),
            c.value.unwrap_or(0.0).to_string(),
            c.rect.x0.to_string(),
            c.rect.y0.to_string(),
            c.rect.x1.to_string(),
            c.rect.y1.to_string(),
            c.fill.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn to_json(chart: &ChartLayout) -> serde_json::Value {
    serde_json::json!({
        "generated_at": chrono::Local::now().to_rfc3339(),
        "dataset": chart.dataset.key.as_str(),
        "title": chart.dataset.title,
        "width": chart.dims.width,
        "height": chart.dims.height,
        "total": chart.total,
        "cells": chart.cells.iter().map(|c| serde_json::json!({
            "id": c.path_id,
            "name": c.name,
            "category": c.category_str(),
            "value": c.value.unwrap_or(0.0),
            "rect": c.rect,
            "fill": c.fill,
        })).collect::<Vec<_>>(),
        "legend": chart.legend.entries.iter().map(|e| serde_json::json!({
            "category": e.category,
            "color": e.color,
            "row": e.row,
            "col": e.col,
        })).collect::<Vec<_>>(),
    })
}
