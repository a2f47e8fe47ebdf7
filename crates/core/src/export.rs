use crate::color::ColorMap;
use crate::format;
use crate::model::*;

pub fn to_csv(hierarchy: &Hierarchy, colors: &ColorMap, mut w: impl std::io::Write) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(&mut w);
    writer
        .write_record(["name", "category", "value", "display", "x0", "y0", "x1", "y1", "color"])
        .ok();
    for leaf in hierarchy.leaves() {
        let category = leaf.category.as_deref().unwrap_or_default();
        let rect = leaf.rect.unwrap_or_default();
        let color = colors.get(category).map(|c| c.css()).unwrap_or_default();
        writer.write_record([
            leaf.name.clone(),
            category.to_string(),
            format::raw_value(leaf.value),
            format::usd(leaf.value),
            rect.x0.to_string(),
            rect.y0.to_string(),
            rect.x1.to_string(),
            rect.y1.to_string(),
            color,
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn to_json(hierarchy: &Hierarchy, colors: &ColorMap) -> serde_json::Value {
    serde_json::json!({
        "root": hierarchy.root.0,
        "legend": colors.iter().map(|(name, color)| serde_json::json!({
            "category": name,
            "color": color.css(),
        })).collect::<Vec<_>>(),
        "nodes": hierarchy.nodes.iter().map(|n| serde_json::json!({
            "id": n.id.0,
            "parent": n.parent.as_ref().map(|p| p.0),
            "name": n.name,
            "category": n.category,
            "value": n.value,
            "aggregate": n.aggregate,
            "children": n.children.iter().map(|c| c.0).collect::<Vec<_>>(),
            "rect": n.rect.map(|r| serde_json::json!([r.x0, r.y0, r.x1, r.y1])),
        })).collect::<Vec<_>>()
    })
}

pub fn to_pdf(
    hierarchy: &Hierarchy,
    title: &str,
    out: &std::path::Path,
) -> Result<(), Box<dyn std::error::Error>> {
    use printpdf::*;
    let (doc, page1, layer1) = PdfDocument::new(title, Mm(210.0), Mm(297.0), "Layer 1");
    let layer = doc.get_page(page1).get_layer(layer1);
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;

    layer.use_text(title, 14.0, Mm(15.0), Mm(280.0), &font);
    let stamp = chrono::Local::now().format("Generated %Y-%m-%d %H:%M");
    layer.use_text(stamp.to_string(), 9.0, Mm(15.0), Mm(274.0), &font);

    let mut y = 264.0;
    for &id in &hierarchy.get(hierarchy.root).children {
        let node = hierarchy.get(id);
        let line = format!("{}: {}", node.name, format::usd(node.aggregate));
        layer.use_text(line, 11.0, Mm(15.0), Mm(y), &font);
        y -= 6.0;
        if y < 15.0 {
            break;
        }
    }

    let file = std::fs::File::create(out)?;
    let mut buf = std::io::BufWriter::new(file);
    doc.save(&mut buf)?;
    Ok(())
}
