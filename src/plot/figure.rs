//! Render-only figure description.
//!
//! The figure is data-driven: all series, styles and bounds are computed here,
//! outside the drawing code. This keeps `render` focused on drawing and makes
//! layout decisions (bounds, legend corner) testable without a backend.

use crate::domain::{RunConfig, SampleSet};

/// An RGBA color with alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f64,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    /// Matplotlib's default first cycle color (`C0`).
    pub const C0: Rgba = Rgba::rgb(0x1f, 0x77, 0xb4);
    /// Gray level 0.9.
    pub const LIGHT_GRAY: Rgba = Rgba::rgb(230, 230, 230);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }
}

/// How a series is drawn. Sizes are in points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeriesStyle {
    Line { color: Rgba, width_pt: f64 },
    /// Diagonal `x` markers.
    Cross { color: Rgba, size_pt: f64 },
    /// Filled dots without an edge.
    Dot { color: Rgba, size_pt: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend text; `None` keeps the series out of the legend.
    pub label: Option<String>,
    pub style: SeriesStyle,
    /// Painting order: lower values are drawn first.
    pub z_order: i32,
    pub points: Vec<(f64, f64)>,
}

/// Legend placement inside the plotting area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendCorner {
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
}

impl LegendCorner {
    /// Candidate order; ties resolve to the earliest entry.
    pub const ALL: [LegendCorner; 4] = [
        LegendCorner::UpperRight,
        LegendCorner::UpperLeft,
        LegendCorner::LowerLeft,
        LegendCorner::LowerRight,
    ];
}

/// Text and spacing settings, in points.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureStyle {
    pub x_label: String,
    pub y_label: String,
    /// Tick positions on the x axis; the y axis has none.
    pub x_ticks: Vec<f64>,
    pub tick_font_pt: f64,
    pub label_font_pt: f64,
    pub legend_font_pt: f64,
    /// Outer padding as a fraction of the label font size.
    pub pad: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Size in pixels.
    pub size: (u32, u32),
    pub dpi: u32,
    /// Series in declaration (legend) order.
    pub series: Vec<Series>,
    pub style: FigureStyle,
}

impl Figure {
    /// Convert points to pixels at the figure's DPI.
    pub fn pt_to_px(&self, pt: f64) -> f64 {
        pt * f64::from(self.dpi) / 72.0
    }

    /// Tight data bounds over every series: `([x0, x1], [y0, y1])`.
    ///
    /// Degenerate spans are widened by 0.5 on each side.
    pub fn bounds(&self) -> Option<([f64; 2], [f64; 2])> {
        let mut x0 = f64::INFINITY;
        let mut x1 = f64::NEG_INFINITY;
        let mut y0 = f64::INFINITY;
        let mut y1 = f64::NEG_INFINITY;

        for &(x, y) in self.series.iter().flat_map(|s| s.points.iter()) {
            if !(x.is_finite() && y.is_finite()) {
                continue;
            }
            x0 = x0.min(x);
            x1 = x1.max(x);
            y0 = y0.min(y);
            y1 = y1.max(y);
        }

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) {
            return None;
        }
        if x1 - x0 < 1e-12 {
            x0 -= 0.5;
            x1 += 0.5;
        }
        if y1 - y0 < 1e-12 {
            y0 -= 0.5;
            y1 += 0.5;
        }
        Some(([x0, x1], [y0, y1]))
    }

    /// Indices of `series` sorted by z-order (stable for equal z).
    pub fn paint_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.series.len()).collect();
        order.sort_by_key(|&i| self.series[i].z_order);
        order
    }

    /// Pick the corner whose legend box covers the fewest data points.
    ///
    /// The legend box spans `box_frac` of the plotting area in each direction.
    pub fn best_legend_corner(&self, box_frac: (f64, f64)) -> LegendCorner {
        let Some(([x0, x1], [y0, y1])) = self.bounds() else {
            return LegendCorner::UpperRight;
        };
        let (fw, fh) = box_frac;

        let mut counts = [0usize; 4];
        for &(x, y) in self.series.iter().flat_map(|s| s.points.iter()) {
            let u = (x - x0) / (x1 - x0);
            let v = (y - y0) / (y1 - y0);
            for (corner, count) in LegendCorner::ALL.iter().zip(counts.iter_mut()) {
                let inside = match corner {
                    LegendCorner::UpperRight => u >= 1.0 - fw && v >= 1.0 - fh,
                    LegendCorner::UpperLeft => u <= fw && v >= 1.0 - fh,
                    LegendCorner::LowerLeft => u <= fw && v <= fh,
                    LegendCorner::LowerRight => u >= 1.0 - fw && v <= fh,
                };
                if inside {
                    *count += 1;
                }
            }
        }

        // `min_by_key` keeps the first of equal minima.
        let best = counts
            .iter()
            .enumerate()
            .min_by_key(|&(_, count)| *count)
            .map_or(0, |(i, _)| i);
        LegendCorner::ALL[best]
    }
}

/// Inputs for the generalization-error figure.
pub struct FigureData<'a> {
    pub train: &'a SampleSet,
    pub held_out: &'a SampleSet,
    pub grid: &'a [f64],
    pub predictions: &'a [f64],
    pub truth: &'a [f64],
}

/// Build the generalization-error figure.
///
/// Legend order follows declaration order; painting follows z-order so the
/// training crosses sit above everything and the background layers below.
pub fn generalization_figure(data: &FigureData<'_>, config: &RunConfig) -> Figure {
    let curve = |ys: &[f64]| -> Vec<(f64, f64)> {
        data.grid.iter().copied().zip(ys.iter().copied()).collect()
    };

    let series = vec![
        Series {
            label: Some("Data used for model fit".to_string()),
            style: SeriesStyle::Cross {
                color: Rgba::BLACK,
                size_pt: 10.0,
            },
            z_order: 100,
            points: data.train.points().collect(),
        },
        Series {
            label: Some("Model predictions".to_string()),
            style: SeriesStyle::Line {
                color: Rgba::C0,
                width_pt: 1.5,
            },
            z_order: 2,
            points: curve(data.predictions),
        },
        Series {
            label: None,
            style: SeriesStyle::Line {
                color: Rgba::LIGHT_GRAY,
                width_pt: 1.5,
            },
            z_order: 0,
            points: curve(data.truth),
        },
        Series {
            label: Some("New data (generalization)".to_string()),
            style: SeriesStyle::Dot {
                color: Rgba::BLACK.with_alpha(0.2),
                size_pt: 5.0,
            },
            z_order: 0,
            points: data.held_out.points().collect(),
        },
    ];

    let (lo, hi) = config.x_range;
    Figure {
        size: config.figure_pixels(),
        dpi: config.dpi,
        series,
        style: FigureStyle {
            x_label: "Measurement".to_string(),
            y_label: "Predicted outcome".to_string(),
            x_ticks: vec![lo, hi],
            tick_font_pt: 6.0,
            label_font_pt: 10.0,
            legend_font_pt: 10.0,
            pad: 0.1,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn figure_with(points: Vec<(f64, f64)>) -> Figure {
        Figure {
            size: (300, 250),
            dpi: 100,
            series: vec![Series {
                label: None,
                style: SeriesStyle::Dot {
                    color: Rgba::BLACK,
                    size_pt: 5.0,
                },
                z_order: 0,
                points,
            }],
            style: FigureStyle {
                x_label: String::new(),
                y_label: String::new(),
                x_ticks: vec![],
                tick_font_pt: 6.0,
                label_font_pt: 10.0,
                legend_font_pt: 10.0,
                pad: 0.1,
            },
        }
    }

    #[test]
    fn bounds_are_tight_and_skip_non_finite() {
        let fig = figure_with(vec![(-1.0, 2.0), (1.0, -3.0), (f64::NAN, 100.0)]);
        assert_eq!(fig.bounds(), Some(([-1.0, 1.0], [-3.0, 2.0])));
    }

    #[test]
    fn degenerate_bounds_are_widened() {
        let fig = figure_with(vec![(0.0, 1.0)]);
        assert_eq!(fig.bounds(), Some(([-0.5, 0.5], [0.5, 1.5])));
        assert_eq!(figure_with(vec![]).bounds(), None);
    }

    #[test]
    fn legend_avoids_occupied_corners() {
        // Two points in every corner except the lower-left one.
        let fig = figure_with(vec![
            (10.0, 10.0),
            (9.0, 9.0),
            (0.0, 10.0),
            (1.0, 9.0),
            (10.0, 0.0),
            (9.0, 1.0),
            (5.0, 5.0),
        ]);
        assert_eq!(fig.best_legend_corner((0.4, 0.4)), LegendCorner::LowerLeft);
    }

    #[test]
    fn legend_prefers_upper_right_on_ties() {
        let fig = figure_with(vec![(0.0, 0.0), (10.0, 10.0), (0.0, 10.0), (10.0, 0.0)]);
        assert_eq!(fig.best_legend_corner((0.4, 0.4)), LegendCorner::UpperRight);
    }

    #[test]
    fn generalization_figure_layers_and_legend() {
        let train = SampleSet {
            x: vec![0.0, 0.5],
            y: vec![0.1, 0.2],
        };
        let held_out = SampleSet {
            x: vec![-0.5],
            y: vec![0.3],
        };
        let grid = [-1.0, 1.0];
        let data = FigureData {
            train: &train,
            held_out: &held_out,
            grid: &grid,
            predictions: &[0.0, 0.1],
            truth: &[-0.2, 0.0],
        };
        let fig = generalization_figure(&data, &RunConfig::default());

        let labels: Vec<_> = fig.series.iter().filter_map(|s| s.label.as_deref()).collect();
        assert_eq!(
            labels,
            vec!["Data used for model fit", "Model predictions", "New data (generalization)"]
        );
        // Truth and held-out first (declaration order among equal z), crosses last.
        assert_eq!(fig.paint_order(), vec![2, 3, 1, 0]);
        assert_eq!(fig.size, (300, 250));
        assert_eq!(fig.style.x_ticks, vec![-1.0, 1.0]);
        assert!((fig.pt_to_px(72.0) - 100.0).abs() < 1e-12);
    }
}
