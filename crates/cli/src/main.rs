use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;

use moviemap_core::{color::ColorMap, export, format, hierarchy, render, search, treemap};
use moviemap_core::{ChartOptions, DataNode};

const DEFAULT_URL: &str = "https://cdn.rawgit.com/freeCodeCamp/testable-projects-fcc/a80ce8f9/src/data/tree_map/movie-data.json";

#[derive(Parser, Debug)]
#[command(name = "moviemap", about = "Movie revenue treemap chart generator")]
struct Args {
    /// Remote dataset URL (ignored when --input is given)
    #[arg(long, default_value = DEFAULT_URL)]
    url: String,
    /// Read the dataset from a local JSON file instead of fetching
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Output path; format is taken from the extension
    /// (.html, .svg, .json, .csv, .pdf)
    #[arg(short, long, default_value = "chart.html")]
    out: PathBuf,
    /// Chart title
    #[arg(long)]
    title: Option<String>,
    /// Chart description line
    #[arg(long)]
    description: Option<String>,
    /// Fuzzy-search leaves by name and print matches instead of rendering
    #[arg(long)]
    find: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let dataset = load_dataset(&args)?;
    let mut hierarchy = hierarchy::build(&dataset)?;

    if let Some(query) = &args.find {
        let hits = search::find_leaves(&hierarchy, query);
        if hits.is_empty() {
            println!("No match for {:?}", query);
            return Ok(());
        }
        for (leaf, score) in hits {
            println!(
                "{}  ({})  {}  [score {}]",
                leaf.name,
                leaf.category.as_deref().unwrap_or("-"),
                format::usd(leaf.value),
                score
            );
        }
        return Ok(());
    }

    let mut opts = ChartOptions::default();
    if let Some(title) = args.title {
        opts.title = title;
    }
    if let Some(description) = args.description {
        opts.description = description;
    }

    let colors = ColorMap::assign(&hierarchy.categories());
    treemap::layout(&mut hierarchy, opts.plot_width(), opts.plot_height());

    let ext = args
        .out
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("html")
        .to_ascii_lowercase();
    match ext.as_str() {
        "html" => std::fs::write(&args.out, render::render_html(&hierarchy, &colors, &opts))?,
        "svg" => std::fs::write(&args.out, render::render_svg(&hierarchy, &colors, &opts))?,
        "json" => {
            let dump = export::to_json(&hierarchy, &colors);
            std::fs::write(&args.out, serde_json::to_string_pretty(&dump)?)?;
        }
        "csv" => {
            let file = File::create(&args.out)
                .with_context(|| format!("creating {}", args.out.display()))?;
            export::to_csv(&hierarchy, &colors, file)?;
        }
        "pdf" => export::to_pdf(&hierarchy, &opts.title, &args.out)
            .map_err(|e| anyhow::anyhow!("writing pdf: {}", e))?,
        other => anyhow::bail!("unsupported output format {:?}", other),
    }

    println!(
        "Wrote {} ({} tiles, {} categories, total {})",
        args.out.display(),
        hierarchy.leaves().filter(|n| n.rect.is_some()).count(),
        colors.len(),
        format::usd(hierarchy.get(hierarchy.root).aggregate)
    );
    Ok(())
}

fn load_dataset(args: &Args) -> anyhow::Result<DataNode> {
    if let Some(path) = &args.input {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let dataset =
            serde_json::from_reader(file).with_context(|| format!("parsing {}", path.display()))?;
        return Ok(dataset);
    }
    tracing::info!("fetching dataset from {}", args.url);
    let body = reqwest::blocking::get(&args.url)
        .with_context(|| format!("fetching {}", args.url))?
        .error_for_status()
        .context("dataset endpoint returned an error status")?
        .text()
        .context("reading dataset body")?;
    serde_json::from_str(&body).context("parsing dataset JSON")
}
