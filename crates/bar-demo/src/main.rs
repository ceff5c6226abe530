// File: crates/bar-demo/src/main.rs
// Summary: Host for the bar chart: loads a category/amount CSV, replays viewport resizes, writes SVG and PNG.

use anyhow::{Context, Result};
use bar_core::{BarChart, Cell, ChartOptions, DataView, RedrawPolicy, Scene, UpdateOptions, Viewport};
use bar_render_skia::{RasterOptions, SkiaRasterizer};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "bar-demo",
    about = "Render a categorical bar chart from a two-column CSV (category, amount)"
)]
struct Cli {
    /// CSV with a header row; first column is the category, second the amount.
    input: PathBuf,

    /// Viewport as WIDTHxHEIGHT. Repeat to simulate resize events on one chart.
    #[arg(long = "size", value_parser = parse_size, default_value = "600x400")]
    sizes: Vec<Viewport>,

    #[arg(short, long, default_value = "target/out")]
    out_dir: PathBuf,

    /// Also rasterize each frame to PNG.
    #[arg(long, default_value_t = false)]
    png: bool,

    #[arg(long, value_enum, default_value_t = PolicyArg::Incremental)]
    policy: PolicyArg,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PolicyArg {
    Incremental,
    ClearAll,
}

impl From<PolicyArg> for RedrawPolicy {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::Incremental => RedrawPolicy::Incremental,
            PolicyArg::ClearAll => RedrawPolicy::ClearAll,
        }
    }
}

fn parse_size(raw: &str) -> Result<Viewport, String> {
    let (w, h) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{raw}'"))?;
    let dim = |s: &str| s.trim().parse::<f64>().map_err(|e| format!("bad dimension '{s}': {e}"));
    Ok(Viewport::new(dim(w)?, dim(h)?))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let path = resolve_path(&cli.input)?;
    println!("Using input file: {}", path.display());

    let view = load_table_csv(&path)
        .with_context(|| format!("failed to load CSV '{}'", path.display()))?;
    println!("Loaded {} rows", view.table.rows.len());

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating {}", cli.out_dir.display()))?;

    let scene = Scene::new();
    let root = scene.root();
    let options = ChartOptions { redraw: cli.policy.into(), ..ChartOptions::default() };
    let mut chart: BarChart<Scene> = BarChart::with_options(scene, root, options);
    let rasterizer = cli.png.then(SkiaRasterizer::new);
    let raster_opts = RasterOptions::default();

    for viewport in &cli.sizes {
        chart.update(&UpdateOptions::new(*viewport, view.clone()));
        let stats = chart.stats();
        if let Some(e) = &stats.conversion_error {
            eprintln!("warning: {e}; drew an empty chart");
        }
        log::info!(
            "{}x{}: {} bars (+{} ~{} -{})",
            viewport.width, viewport.height, stats.records,
            stats.join.entered, stats.join.updated, stats.join.exited
        );

        let out_svg = out_name_with(&cli.out_dir, &path, *viewport, "svg");
        let markup = chart
            .surface()
            .to_svg_string()
            .context("chart canvas missing from scene")?;
        std::fs::write(&out_svg, markup).with_context(|| format!("writing {}", out_svg.display()))?;
        println!("Wrote {}", out_svg.display());

        if let Some(r) = &rasterizer {
            let out_png = out_svg.with_extension("png");
            r.render_to_png(chart.surface(), &raster_opts, &out_png)?;
            println!("Wrote {}", out_png.display());
        }
    }
    Ok(())
}

fn resolve_path(p: &Path) -> Result<PathBuf> {
    if p.exists() {
        return Ok(p.to_path_buf());
    }
    anyhow::bail!("file not found: {}", p.display());
}

/// Output file name like <dir>/bars_<stem>_<w>x<h>.<ext>
fn out_name_with(dir: &Path, input: &Path, viewport: Viewport, ext: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    dir.join(format!("bars_{}_{}x{}.{}", stem, viewport.width, viewport.height, ext))
}

/// Every field becomes a text cell; short rows are kept for the converter to judge.
fn load_table_csv(path: &Path) -> Result<DataView> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::None)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(str::to_string).collect::<Vec<_>>();
    log::debug!("headers: {:?}", headers);

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for (i, rec) in rdr.records().enumerate() {
        let rec = rec.with_context(|| format!("reading CSV record {}", i + 1))?;
        rows.push(rec.iter().map(Cell::from).collect());
    }
    Ok(DataView::from_rows(rows))
}
