//! SVG rendering of a [`FieldPlot`] with `plotters`.

use std::path::Path;

use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::charges::Polarity;
use crate::errors::FieldError;
use crate::math::{Scalar, R2};
use crate::plot::FieldPlot;

/// Colours and sizes of the rendered figure.
#[derive(Debug, Clone)]
pub struct PlotStyle {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Figure caption.
    pub title: String,
    /// Streamline colour.
    pub line_color: RGBColor,
    /// Streamline stroke width in pixels.
    pub line_width: u32,
    /// Marker colour for positive charges.
    pub positive_color: RGBColor,
    /// Marker colour for negative charges.
    pub negative_color: RGBColor,
    /// Marker radius in pixels.
    pub marker_size: u32,
    /// Arrow head length as a fraction of the domain span.
    pub arrow_size: Scalar,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            title: "Electrostatic field".to_owned(),
            line_color: BLACK,
            line_width: 1,
            positive_color: RED,
            negative_color: BLUE,
            marker_size: 8,
            arrow_size: 0.012,
        }
    }
}

impl PlotStyle {
    /// Same style at a different image size.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    const fn marker_color(&self, polarity: Polarity) -> Option<RGBColor> {
        match polarity {
            Polarity::Positive => Some(self.positive_color),
            Polarity::Negative => Some(self.negative_color),
            Polarity::Neutral => None,
        }
    }
}

/// Draws `plot` into an SVG file at `path`.
pub fn render_svg(plot: &FieldPlot, path: impl AsRef<Path>, style: &PlotStyle) -> Result<(), FieldError> {
    let path = path.as_ref();
    let root = SVGBackend::new(path, (style.width, style.height)).into_drawing_area();
    draw(&root, plot, style).map_err(|e| FieldError::Render(e.to_string()))?;
    info!("saved field plot: {}", path.display());
    Ok(())
}

/// Draws `plot` into an in-memory SVG document.
pub fn render_svg_string(plot: &FieldPlot, style: &PlotStyle) -> Result<String, FieldError> {
    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, (style.width, style.height)).into_drawing_area();
        draw(&root, plot, style).map_err(|e| FieldError::Render(e.to_string()))?;
    }
    Ok(buffer)
}

fn draw(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    plot: &FieldPlot,
    style: &PlotStyle,
) -> Result<(), Box<dyn std::error::Error>> {
    root.fill(&WHITE)?;

    let (lo, hi) = (plot.grid.min, plot.grid.max);
    let mut chart = ChartBuilder::on(root)
        .caption(&style.title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(lo..hi, lo..hi)?;

    chart.configure_mesh().x_desc("X").y_desc("Y").draw()?;

    let line_style = style.line_color.stroke_width(style.line_width);
    let head = style.arrow_size * plot.grid.span();
    for line in &plot.streamlines {
        chart.draw_series(LineSeries::new(
            line.points().iter().map(|p| (p.x, p.y)),
            line_style,
        ))?;
        if let Some((at, dir)) = line.arrow() {
            let tip = at + dir * head;
            let side = R2::new(-dir.y, dir.x) * (0.5 * head);
            let back = at - dir * (0.5 * head);
            let (left, right) = (back + side, back - side);
            let triangle = vec![(tip.x, tip.y), (left.x, left.y), (right.x, right.y)];
            chart.draw_series(std::iter::once(Polygon::new(triangle, style.line_color.filled())))?;
        }
    }

    for marker in &plot.markers {
        let Some(color) = style.marker_color(marker.polarity) else {
            continue;
        };
        let size = style.marker_size;
        let series = chart.draw_series(std::iter::once(Circle::new(
            (marker.position.x, marker.position.y),
            size,
            color.filled(),
        )))?;
        if let Some(label) = marker.label() {
            series
                .label(label)
                .legend(move |(x, y)| Circle::new((x, y), size.min(5), color.filled()));
        }
    }

    if plot.legend_entries().next().is_some() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerMiddle)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}
