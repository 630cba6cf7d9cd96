use plotters::style::RGBColor;
use shared::ChartEndpoint;

pub const LEGEND_TEXT: RGBColor = RGBColor(55, 65, 81);
pub const AXIS_TEXT: RGBColor = RGBColor(107, 114, 128);
pub const GRID_LINE: RGBColor = RGBColor(229, 231, 235);
pub const EMPTY_RING: RGBColor = RGBColor(243, 244, 246);

#[derive(Debug, Clone, PartialEq)]
pub struct DonutStyle {
    pub palette: &'static [RGBColor],
    /// Hole size as a fraction of the ring's outer radius
    pub cutout: f64,
    /// Outer radius as a fraction of the available half extent
    pub radius: f64,
    /// Appended to the value in legend entries, e.g. "Paid: 12 invoices"
    pub legend_suffix: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarStyle {
    pub color: RGBColor,
    pub series_label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub line: RGBColor,
    pub point: RGBColor,
    pub fill: bool,
    pub series_label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    Donut(DonutStyle),
    Bar(BarStyle),
    Line(LineStyle),
}

/// Which canvas shows which endpoint, and how
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDefinition {
    pub canvas_id: &'static str,
    pub endpoint: ChartEndpoint,
    /// Tag used in log lines
    pub component: &'static str,
    pub kind: ChartKind,
}

const FEES_PALETTE: [RGBColor; 4] = [
    RGBColor(199, 210, 254),
    RGBColor(16, 185, 129),
    RGBColor(245, 158, 11),
    RGBColor(239, 68, 68),
];

// Paid, Unpaid, Opening Balance
const INVOICE_PALETTE: [RGBColor; 3] = [
    RGBColor(20, 184, 166),
    RGBColor(244, 63, 94),
    RGBColor(245, 158, 11),
];

pub fn fees_status() -> ChartDefinition {
    ChartDefinition {
        canvas_id: "feesStatusChart",
        endpoint: ChartEndpoint::FeesStatus,
        component: "fees-status-chart",
        kind: ChartKind::Donut(DonutStyle {
            palette: &FEES_PALETTE,
            cutout: 0.7,
            radius: 0.65,
            legend_suffix: None,
        }),
    }
}

pub fn students_by_division() -> ChartDefinition {
    ChartDefinition {
        canvas_id: "studentsByDivisionChart",
        endpoint: ChartEndpoint::StudentsByDivision,
        component: "students-by-division-chart",
        kind: ChartKind::Bar(BarStyle {
            color: RGBColor(59, 130, 246),
            series_label: "Students",
        }),
    }
}

pub fn monthly_collections() -> ChartDefinition {
    ChartDefinition {
        canvas_id: "monthlyCollectionsChart",
        endpoint: ChartEndpoint::MonthlyCollections,
        component: "monthly-collections-chart",
        kind: ChartKind::Line(LineStyle {
            line: RGBColor(16, 185, 129),
            point: RGBColor(16, 185, 129),
            fill: true,
            series_label: "Collections (Br.)",
        }),
    }
}

pub fn revenue_trend() -> ChartDefinition {
    ChartDefinition {
        canvas_id: "revenueTrendChart",
        endpoint: ChartEndpoint::RevenueTrend,
        component: "revenue-trend-chart",
        kind: ChartKind::Line(LineStyle {
            line: RGBColor(165, 180, 252),
            point: RGBColor(99, 102, 241),
            fill: false,
            series_label: "Revenue (Br.)",
        }),
    }
}

pub fn invoice_status() -> ChartDefinition {
    ChartDefinition {
        canvas_id: "invoiceStatusChart",
        endpoint: ChartEndpoint::InvoiceStatus,
        component: "invoice-status-chart",
        kind: ChartKind::Donut(DonutStyle {
            palette: &INVOICE_PALETTE,
            cutout: 0.7,
            radius: 0.65,
            legend_suffix: Some("invoices"),
        }),
    }
}

/// Charts that are fetched and drawn once per page load
pub fn one_shot_charts() -> [ChartDefinition; 4] {
    [
        fees_status(),
        students_by_division(),
        monthly_collections(),
        revenue_trend(),
    ]
}

impl DonutStyle {
    /// Palette colours repeat when there are more slices than colours
    pub fn color_for(&self, index: usize) -> RGBColor {
        if self.palette.is_empty() {
            return GRID_LINE;
        }
        self.palette[index % self.palette.len()]
    }

    pub fn legend_label(&self, label: &str, value: f64) -> String {
        match self.legend_suffix {
            Some(suffix) => format!("{}: {} {}", label, shared::format_grouped(value), suffix),
            None => label.to_string(),
        }
    }
}
