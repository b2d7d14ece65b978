//! Serialize the rendered figure and the optional run summary.
//!
//! The figure arrives as one SVG document and leaves as:
//! - a PDF page sized in inches (`svg2pdf`)
//! - a PNG raster at one pixel per SVG user unit (`resvg`)
//!
//! Both converters build on the same `usvg` release, so the SVG is parsed
//! once and the system fonts are loaded once per run.
//!
//! Existing files are overwritten.

use std::fs::File;
use std::path::{Path, PathBuf};

use resvg::{tiny_skia, usvg};

use crate::domain::RunSummary;
use crate::error::{AppError, RenderError};

/// Families tried, in order, for the generic `sans-serif` family.
const SANS_CANDIDATES: [&str; 6] = [
    "DejaVu Sans",
    "Arial",
    "Helvetica",
    "Liberation Sans",
    "Noto Sans",
    "FreeSans",
];

/// Paths written by `write_figure`.
#[derive(Debug, Clone)]
pub struct FigurePaths {
    pub pdf: PathBuf,
    pub png: PathBuf,
}

/// Parser options with the system fonts loaded and `sans-serif` resolved.
fn font_options() -> usvg::Options<'static> {
    let mut options = usvg::Options::default();
    let db = options.fontdb_mut();
    db.load_system_fonts();
    let sans = pick_sans_family(db.faces().flat_map(|f| f.families.iter().map(|(name, _)| name.as_str())));
    if let Some(family) = sans {
        db.set_sans_serif_family(family);
    }
    options
}

fn parse_svg(svg: &str, options: &usvg::Options<'_>) -> Result<usvg::Tree, RenderError> {
    usvg::Tree::from_str(svg, options).map_err(|e| RenderError::Svg(e.to_string()))
}

/// `dpi` maps SVG pixels to PDF points, so a 300px-wide figure at 100 dpi
/// becomes a 3 inch page.
fn tree_to_pdf(tree: &usvg::Tree, dpi: u32) -> Result<Vec<u8>, RenderError> {
    let mut page = svg2pdf::PageOptions::default();
    page.dpi = dpi as f32;
    svg2pdf::to_pdf(tree, svg2pdf::ConversionOptions::default(), page).map_err(|e| RenderError::Pdf(e.to_string()))
}

fn tree_to_png(tree: &usvg::Tree) -> Result<Vec<u8>, RenderError> {
    let size = tree.size().to_int_size();
    let (width, height) = (size.width(), size.height());
    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or(RenderError::RasterSize { width, height })?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap.encode_png().map_err(|e| RenderError::Png(e.to_string()))
}

/// Convert the SVG into a single-page PDF.
pub fn svg_to_pdf(svg: &str, dpi: u32) -> Result<Vec<u8>, RenderError> {
    tree_to_pdf(&parse_svg(svg, &font_options())?, dpi)
}

/// Rasterize the SVG into PNG bytes.
pub fn svg_to_png(svg: &str) -> Result<Vec<u8>, RenderError> {
    tree_to_png(&parse_svg(svg, &font_options())?)
}

/// Write the figure to the given PDF and PNG paths.
pub fn write_figure(svg: &str, pdf_path: &Path, png_path: &Path, dpi: u32) -> Result<FigurePaths, AppError> {
    let tree = parse_svg(svg, &font_options())?;

    let pdf = tree_to_pdf(&tree, dpi)?;
    write_bytes(pdf_path, &pdf, "PDF")?;

    let png = tree_to_png(&tree)?;
    write_bytes(png_path, &png, "PNG")?;

    Ok(FigurePaths {
        pdf: pdf_path.to_path_buf(),
        png: png_path.to_path_buf(),
    })
}

/// Write the run summary as pretty JSON.
pub fn write_summary_json(path: &Path, summary: &RunSummary) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create summary JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, summary)
        .map_err(|e| AppError::new(2, format!("Failed to write summary JSON: {e}")))?;

    Ok(())
}

fn write_bytes(path: &Path, bytes: &[u8], kind: &str) -> Result<(), AppError> {
    std::fs::write(path, bytes)
        .map_err(|e| AppError::new(2, format!("Failed to write {kind} '{}': {e}", path.display())))?;
    log::info!("Wrote {kind} ({} bytes) to {}", bytes.len(), path.display());
    Ok(())
}

/// First candidate sans-serif family that is actually installed.
fn pick_sans_family<'a>(installed: impl Iterator<Item = &'a str>) -> Option<&'static str> {
    let installed: Vec<&str> = installed.collect();
    SANS_CANDIDATES
        .iter()
        .copied()
        .find(|candidate| installed.iter().any(|name| name.eq_ignore_ascii_case(candidate)))
}
