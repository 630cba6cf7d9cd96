use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use shared::{format_grouped, Series};
use std::f64::consts::TAU;
use web_sys::HtmlCanvasElement;

use super::definitions::{BarStyle, ChartKind, DonutStyle, LineStyle, AXIS_TEXT, EMPTY_RING, GRID_LINE, LEGEND_TEXT};
use super::geometry::{self, LEGEND_SWATCH};
use crate::services::DashboardError;

type Area = DrawingArea<CanvasBackend, Shift>;

const LEGEND_FONT_PX: u32 = 14;
const LEGEND_MARGIN: u32 = 12;
const SLICE_BORDER: u32 = 4;

/// A chart bound to one canvas, holding the series it currently shows.
///
/// Created once per canvas; later data goes through [`ChartHandle::update`]
/// so a refresh never stacks a second chart on the same element.
pub struct ChartHandle {
    canvas: HtmlCanvasElement,
    kind: ChartKind,
    series: Series,
}

impl ChartHandle {
    pub fn create(canvas: HtmlCanvasElement, kind: ChartKind, series: Series) -> Result<Self, DashboardError> {
        let handle = Self { canvas, kind, series };
        handle.redraw()?;
        Ok(handle)
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn category_count(&self) -> usize {
        self.series.category_count()
    }

    /// Replace the data in place and draw again
    pub fn update(&mut self, update: Series) -> Result<(), DashboardError> {
        self.series.apply(update);
        self.redraw()
    }

    pub fn redraw(&self) -> Result<(), DashboardError> {
        let (width, height) = geometry::canvas_size(
            (self.canvas.client_width(), self.canvas.client_height()),
            (self.canvas.width(), self.canvas.height()),
        );
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        let backend = CanvasBackend::with_canvas_object(self.canvas.clone())
            .ok_or_else(|| DashboardError::Render("canvas has no 2d context".to_string()))?;
        let root = backend.into_drawing_area();
        root.fill(&WHITE).map_err(DashboardError::render)?;

        match &self.kind {
            ChartKind::Donut(style) => draw_donut(&root, &self.series, style)?,
            ChartKind::Bar(style) => draw_bar(&root, &self.series, style)?,
            ChartKind::Line(style) => draw_line(&root, &self.series, style)?,
        }

        root.present().map_err(DashboardError::render)
    }
}

fn legend_font() -> TextStyle<'static> {
    ("sans-serif", f64::from(LEGEND_FONT_PX)).into_font().color(&LEGEND_TEXT)
}

fn segment_label(labels: &[String], value: &SegmentValue<usize>) -> String {
    match value {
        SegmentValue::CenterOf(index) | SegmentValue::Exact(index) => {
            labels.get(*index).cloned().unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    }
}

fn draw_empty(root: &Area) -> Result<(), DashboardError> {
    let (width, height) = root.dim_in_pixel();
    let message = "No data";
    let x = (width / 2) as i32 - (geometry::estimate_text_width(message, LEGEND_FONT_PX) / 2) as i32;
    root.draw(&Text::new(message.to_string(), (x, (height / 2) as i32), legend_font()))
        .map_err(DashboardError::render)
}

fn draw_donut(root: &Area, series: &Series, style: &DonutStyle) -> Result<(), DashboardError> {
    let (width, height) = root.dim_in_pixel();

    let labels: Vec<String> = series
        .labels()
        .iter()
        .zip(series.values())
        .map(|(label, value)| style.legend_label(label, *value))
        .collect();
    let (legend, legend_height) = geometry::legend_layout(&labels, LEGEND_FONT_PX, width, 0);

    let plot_height = height.saturating_sub(legend_height + LEGEND_MARGIN);
    let center = ((width / 2) as i32, (plot_height / 2) as i32);
    let outer = width.min(plot_height) as f64 / 2.0 * style.radius;
    let inner = outer * style.cutout;

    let slices = geometry::donut_slices(series.values());
    if slices.is_empty() {
        let ring = geometry::ring_segment(center, outer, inner, 0.0, TAU);
        root.draw(&Polygon::new(ring, EMPTY_RING.filled()))
            .map_err(DashboardError::render)?;
    }

    for slice in &slices {
        let mut ring = geometry::ring_segment(center, outer, inner, slice.start, slice.end);
        root.draw(&Polygon::new(ring.clone(), style.color_for(slice.index).filled()))
            .map_err(DashboardError::render)?;

        if let Some(first) = ring.first().copied() {
            ring.push(first);
        }
        root.draw(&PathElement::new(ring, WHITE.stroke_width(SLICE_BORDER)))
            .map_err(DashboardError::render)?;
    }

    let legend_top = (plot_height + LEGEND_MARGIN) as i32;
    let swatch = LEGEND_SWATCH as i32;
    for item in legend {
        let y = legend_top + item.y;
        root.draw(&Rectangle::new(
            [(item.x, y), (item.x + swatch, y + swatch)],
            style.color_for(item.index).filled(),
        ))
        .map_err(DashboardError::render)?;
        root.draw(&Text::new(labels[item.index].clone(), (item.x + swatch + 6, y - 1), legend_font()))
            .map_err(DashboardError::render)?;
    }

    Ok(())
}

fn draw_bar(root: &Area, series: &Series, style: &BarStyle) -> Result<(), DashboardError> {
    if series.is_empty() {
        return draw_empty(root);
    }
    let labels = series.labels();
    let last = series.category_count() - 1;
    let y_max = geometry::value_axis_max(series.max_value());

    let mut chart = ChartBuilder::on(root)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0..last).into_segmented(), 0f64..y_max)
        .map_err(DashboardError::render)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|v| segment_label(labels, v))
        .y_label_formatter(&|v| format_grouped(*v))
        .y_desc(style.series_label)
        .label_style(("sans-serif", 12, &AXIS_TEXT))
        .axis_style(&GRID_LINE)
        .bold_line_style(&GRID_LINE)
        .light_line_style(&WHITE)
        .draw()
        .map_err(DashboardError::render)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(style.color.filled())
                .margin(12)
                .data(series.values().iter().enumerate().map(|(index, value)| (index, *value))),
        )
        .map_err(DashboardError::render)?;

    Ok(())
}

fn draw_line(root: &Area, series: &Series, style: &LineStyle) -> Result<(), DashboardError> {
    if series.is_empty() {
        return draw_empty(root);
    }
    let labels = series.labels();
    let last = series.category_count() - 1;
    let y_min = series.values().iter().copied().fold(0.0, f64::min);
    let y_max = geometry::value_axis_max(series.max_value());

    let mut chart = ChartBuilder::on(root)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d((0..last).into_segmented(), y_min..y_max)
        .map_err(DashboardError::render)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|v| segment_label(labels, v))
        .y_label_formatter(&|v| format_grouped(*v))
        .y_desc(style.series_label)
        .label_style(("sans-serif", 12, &AXIS_TEXT))
        .axis_style(&GRID_LINE)
        .bold_line_style(&GRID_LINE)
        .light_line_style(&WHITE)
        .draw()
        .map_err(DashboardError::render)?;

    let points: Vec<(SegmentValue<usize>, f64)> = series
        .values()
        .iter()
        .enumerate()
        .map(|(index, value)| (SegmentValue::CenterOf(index), *value))
        .collect();

    if style.fill {
        chart
            .draw_series(AreaSeries::new(points.clone(), 0.0, style.line.mix(0.2)))
            .map_err(DashboardError::render)?;
    }

    chart
        .draw_series(LineSeries::new(points.clone(), style.line.stroke_width(3)))
        .map_err(DashboardError::render)?;

    chart
        .draw_series(points.into_iter().map(|point| Circle::new(point, 4, style.point.filled())))
        .map_err(DashboardError::render)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_labels_follow_series() {
        let labels = vec!["Grade 1".to_string(), "Grade 2".to_string()];
        assert_eq!(segment_label(&labels, &SegmentValue::CenterOf(1)), "Grade 2");
        assert_eq!(segment_label(&labels, &SegmentValue::Exact(0)), "Grade 1");
        assert_eq!(segment_label(&labels, &SegmentValue::CenterOf(5)), "");
        assert_eq!(segment_label(&labels, &SegmentValue::Last), "");
    }
}
