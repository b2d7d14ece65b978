//! Plotters-powered rendering of a `Figure` into an SVG document.
//!
//! The figure is drawn exactly once. The resulting SVG is the single source
//! for both file outputs (see `io::export`), so the PDF and the PNG always
//! show the same picture.
//!
//! Styling mirrors a minimal matplotlib look:
//! - only the left and bottom axis lines (Plotters never draws a box)
//! - x ticks at the configured positions only, no y ticks
//! - a frameless, transparent legend

use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::error::RenderError;
use crate::plot::figure::{Figure, LegendCorner, Rgba, SeriesStyle};

type DrawResult<T> = Result<T, DrawingAreaErrorKind<std::io::Error>>;

/// Width reserved for the legend marker in front of each label, in pixels.
const LEGEND_MARKER_PX: f64 = 30.0;

/// Average glyph width as a fraction of the font size.
const GLYPH_WIDTH_EM: f64 = 0.55;

/// Outward x tick length, in points.
const TICK_LENGTH_PT: f64 = 3.5;

/// Render the figure and return the SVG document.
pub fn render_svg(figure: &Figure) -> Result<String, RenderError> {
    let bounds = figure.bounds().ok_or(RenderError::Empty)?;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, figure.size).into_drawing_area();
        draw_figure(&root, figure, bounds).map_err(|e| RenderError::Draw(e.to_string()))?;
    }
    Ok(svg)
}

/// Pixel sizes derived from the figure's point sizes.
struct Layout {
    tick_px: f64,
    label_px: f64,
    legend_px: f64,
    margin: u32,
    x_label_area: u32,
    y_label_area: u32,
}

impl Layout {
    fn new(figure: &Figure) -> Self {
        let style = &figure.style;
        let tick_px = figure.pt_to_px(style.tick_font_pt);
        let label_px = figure.pt_to_px(style.label_font_pt);
        let legend_px = figure.pt_to_px(style.legend_font_pt);

        // Tick labels and the axis description share the bottom strip; the
        // description sits right under the ticks.
        let x_label_area = (tick_px * 1.4 + label_px * 1.1).ceil() as u32;
        // No y tick labels, only the rotated description.
        let y_label_area = (label_px * 1.4).ceil() as u32;
        let margin = (style.pad * label_px).ceil().max(1.0) as u32;

        Self {
            tick_px,
            label_px,
            legend_px,
            margin,
            x_label_area,
            y_label_area,
        }
    }

    /// Plotting area size in pixels.
    fn plot_area(&self, size: (u32, u32)) -> (f64, f64) {
        let w = f64::from(size.0) - f64::from(self.y_label_area) - 2.0 * f64::from(self.margin);
        let h = f64::from(size.1) - f64::from(self.x_label_area) - 2.0 * f64::from(self.margin);
        (w.max(1.0), h.max(1.0))
    }

    /// Estimated legend box as a fraction of the plotting area.
    fn legend_fraction(&self, figure: &Figure) -> (f64, f64) {
        let labels: Vec<&str> = figure.series.iter().filter_map(|s| s.label.as_deref()).collect();
        let longest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        let (w, h) = self.plot_area(figure.size);
        let box_w = longest as f64 * GLYPH_WIDTH_EM * self.legend_px + LEGEND_MARKER_PX;
        let box_h = labels.len() as f64 * self.legend_px * 1.3;
        ((box_w / w).min(1.0), (box_h / h).min(1.0))
    }
}

fn draw_figure(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    figure: &Figure,
    bounds: ([f64; 2], [f64; 2]),
) -> DrawResult<()> {
    let ([x0, x1], [y0, y1]) = bounds;
    let layout = Layout::new(figure);
    let style = &figure.style;

    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .margin(layout.margin)
        .x_label_area_size(layout.x_label_area)
        .y_label_area_size(layout.y_label_area)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    // Plotters picks its own tick positions, so the mesh draws axis lines and
    // descriptions only. The x ticks are drawn by hand below.
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(0)
        .y_labels(0)
        .x_desc(style.x_label.as_str())
        .y_desc(style.y_label.as_str())
        .axis_desc_style(("sans-serif", layout.label_px).into_font().color(&BLACK))
        .axis_style(&BLACK)
        .draw()?;

    draw_x_ticks(root, &chart, figure, &layout)?;

    // 1) Paint every series in z-order, without legend entries.
    for idx in figure.paint_order() {
        let series = &figure.series[idx];
        let points = series.points.iter().copied();
        match series.style {
            SeriesStyle::Line { color, width_pt } => {
                let line = to_color(color).stroke_width(stroke_px(figure, width_pt));
                chart.draw_series(LineSeries::new(points, line))?;
            }
            SeriesStyle::Cross { color, size_pt } => {
                let half = marker_radius(figure, size_pt);
                let stroke = to_color(color).stroke_width(stroke_px(figure, 1.0));
                chart.draw_series(points.map(|p| Cross::new(p, half, stroke)))?;
            }
            SeriesStyle::Dot { color, size_pt } => {
                let radius = marker_radius(figure, size_pt);
                let fill = to_color(color).filled();
                chart.draw_series(points.map(|p| Circle::new(p, radius, fill)))?;
            }
        }
    }

    // 2) Register legend entries in declaration order. Empty series carry only
    //    the label and the legend glyph.
    for series in &figure.series {
        let Some(label) = series.label.as_deref() else {
            continue;
        };
        match series.style {
            SeriesStyle::Line { color, width_pt } => {
                let line = to_color(color).stroke_width(stroke_px(figure, width_pt));
                chart
                    .draw_series(std::iter::empty::<PathElement<(f64, f64)>>())?
                    .label(label)
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line));
            }
            SeriesStyle::Cross { color, size_pt } => {
                let half = marker_radius(figure, size_pt);
                let stroke = to_color(color).stroke_width(stroke_px(figure, 1.0));
                chart
                    .draw_series(std::iter::empty::<Cross<(f64, f64), i32>>())?
                    .label(label)
                    .legend(move |(x, y)| Cross::new((x + 10, y), half, stroke));
            }
            SeriesStyle::Dot { color, size_pt } => {
                let radius = marker_radius(figure, size_pt);
                let fill = to_color(color).filled();
                chart
                    .draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())?
                    .label(label)
                    .legend(move |(x, y)| Circle::new((x + 10, y), radius, fill));
            }
        }
    }

    let corner = figure.best_legend_corner(layout.legend_fraction(figure));
    chart
        .configure_series_labels()
        .position(to_position(corner))
        .label_font(("sans-serif", layout.legend_px).into_font().color(&BLACK))
        .border_style(&WHITE.mix(0.0))
        .background_style(&WHITE.mix(0.0))
        .draw()?;

    root.present()?;
    Ok(())
}

/// Outward tick marks with centered labels at `style.x_ticks`.
fn draw_x_ticks(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    chart: &ChartContext<'_, SVGBackend<'_>, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    figure: &Figure,
    layout: &Layout,
) -> DrawResult<()> {
    let style = &figure.style;
    let y_axis = chart.y_range().start;
    let tick_len = figure.pt_to_px(TICK_LENGTH_PT).round().max(1.0) as i32;
    let stroke = BLACK.stroke_width(stroke_px(figure, 0.8));
    let font = ("sans-serif", layout.tick_px)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));

    for &tick in &style.x_ticks {
        let (px, py) = chart.backend_coord(&(tick, y_axis));
        root.draw(&PathElement::new(vec![(px, py), (px, py + tick_len)], stroke))?;
        // `{}` prints -1.0 as "-1".
        root.draw(&Text::new(format!("{tick}"), (px, py + tick_len + 1), font.clone()))?;
    }
    Ok(())
}

fn to_color(c: Rgba) -> RGBAColor {
    RGBAColor(c.r, c.g, c.b, c.alpha)
}

fn to_position(corner: LegendCorner) -> SeriesLabelPosition {
    match corner {
        LegendCorner::UpperRight => SeriesLabelPosition::UpperRight,
        LegendCorner::UpperLeft => SeriesLabelPosition::UpperLeft,
        LegendCorner::LowerLeft => SeriesLabelPosition::LowerLeft,
        LegendCorner::LowerRight => SeriesLabelPosition::LowerRight,
    }
}

fn stroke_px(figure: &Figure, width_pt: f64) -> u32 {
    figure.pt_to_px(width_pt).round().max(1.0) as u32
}

/// Marker sizes are diameters in points; Plotters wants a radius in pixels.
fn marker_radius(figure: &Figure, size_pt: f64) -> i32 {
    (figure.pt_to_px(size_pt) / 2.0).round().max(1.0) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RunConfig, SampleSet};
    use crate::plot::figure::{FigureData, generalization_figure};

    fn sample_figure() -> Figure {
        let train = SampleSet {
            x: vec![-0.8, 0.1, 0.6],
            y: vec![0.2, -0.1, 0.3],
        };
        let held_out = SampleSet {
            x: vec![-0.2, 0.9],
            y: vec![0.0, -0.4],
        };
        let grid = [-1.0, 0.0, 1.0];
        let data = FigureData {
            train: &train,
            held_out: &held_out,
            grid: &grid,
            predictions: &[0.1, 0.0, 0.2],
            truth: &[-0.2, 0.0, 0.0],
        };
        generalization_figure(&data, &RunConfig::default())
    }

    /// Contents of every `<text>` element, in document order.
    fn text_contents(svg: &str) -> Vec<&str> {
        svg.split("<text")
            .skip(1)
            .filter_map(|chunk| {
                let start = chunk.find('>')? + 1;
                let end = chunk.find("</text>")?;
                Some(chunk[start..end].trim())
            })
            .collect()
    }

    #[test]
    fn renders_svg_with_labels() {
        let svg = render_svg(&sample_figure()).unwrap();
        assert!(svg.contains("<svg"), "not an SVG document");
        assert!(svg.contains(r#"width="300""#) && svg.contains(r#"height="250""#));
        assert!(svg.contains("Model predictions"));
        assert!(svg.contains("Measurement"));
    }

    #[test]
    fn only_the_configured_x_ticks_are_labelled() {
        let svg = render_svg(&sample_figure()).unwrap();
        let mut texts = text_contents(&svg);
        texts.sort_unstable();
        let mut expected = vec![
            "-1",
            "1",
            "Measurement",
            "Predicted outcome",
            "Data used for model fit",
            "Model predictions",
            "New data (generalization)",
        ];
        expected.sort_unstable();
        // No y tick text and no extra x ticks.
        assert_eq!(texts, expected);
    }

    #[test]
    fn empty_figure_is_rejected() {
        let mut fig = sample_figure();
        for s in &mut fig.series {
            s.points.clear();
        }
        assert!(matches!(render_svg(&fig), Err(RenderError::Empty)));
    }

    #[test]
    fn layout_fits_inside_figure() {
        let fig = sample_figure();
        let layout = Layout::new(&fig);
        let (w, h) = layout.plot_area(fig.size);
        assert!(w > 200.0 && h > 150.0, "plot area {w}x{h} too small");
        let (fw, fh) = layout.legend_fraction(&fig);
        assert!(fw > 0.0 && fw <= 1.0);
        assert!(fh > 0.0 && fh <= 1.0);
    }

    #[test]
    fn marker_sizes_scale_with_dpi() {
        let fig = sample_figure();
        // 10pt at 100 dpi is ~13.9px across.
        assert_eq!(marker_radius(&fig, 10.0), 7);
        assert_eq!(stroke_px(&fig, 1.5), 2);
    }
}
