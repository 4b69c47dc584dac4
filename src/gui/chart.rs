use crate::{
    axes::{date_label_indices, WeightAxis},
    log_format::DATE_FORMAT,
    trend::Trend,
};

use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style, Stylize},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};

const OUTER_BAND: Color = Color::Rgb(0xaa, 0xaa, 0xaa);
const INNER_BAND: Color = Color::Rgb(0x88, 0x44, 0x44);

/// Room taken up by the border, the y labels, and the x labels, roughly.
const Y_LABEL_WIDTH: u16 = 5;
const X_LABEL_ROWS: u16 = 4;

type Points = Vec<(f64, f64)>;

/// Owns the point lists behind every dataset of the weight chart, since
/// ratatui datasets only borrow their data.
pub struct ChartData {
    measured: Points,
    average: Points,
    inner: Points,
    outer: Points,
    grid: Vec<Points>,
    axis: WeightAxis,
    x_max: f64,
    x_labels: Vec<String>,
    y_labels: Vec<String>,
}

impl ChartData {
    /// Lay out the chart of `trend` for a frame of the given size. `dates`
    /// holds one date per measurement.
    pub fn new(trend: &Trend, dates: &[NaiveDate], area: Rect) -> Self {
        let (lo, hi) = trend.raw_range();
        let axis = WeightAxis::for_range(lo, hi);

        let cols = area.width.saturating_sub(Y_LABEL_WIDTH + 2).max(1);
        let rows = area.height.saturating_sub(X_LABEL_ROWS + 2).max(1);
        let x_max = (trend.len().saturating_sub(1) as f64).max(1.0);

        // braille cells are two dots wide and four dots tall
        let x_res = x_max / (cols as f64 * 2.0);
        let y_res = (axis.max - axis.min) / (rows as f64 * 4.0);

        let measured = trend
            .raw
            .iter()
            .enumerate()
            .map(|(i, &w)| (i as f64, w))
            .collect();
        let average = trend
            .average
            .iter()
            .enumerate()
            .map(|(i, &w)| (i as f64, w))
            .collect();
        let inner = fill_between(&trend.inner.lower, &trend.inner.upper, x_res, y_res);
        let outer = fill_between(&trend.outer.lower, &trend.outer.upper, x_res, y_res);
        let grid = axis
            .visible_major()
            .map(|y| vec![(0.0, y), (x_max, y)])
            .collect();

        let x_labels = date_label_indices(trend.len(), cols)
            .into_iter()
            .filter_map(|i| dates.get(i))
            .map(|d| d.format(DATE_FORMAT).to_string())
            .collect();
        let y_labels = axis.labels(rows);

        ChartData {
            measured,
            average,
            inner,
            outer,
            grid,
            axis,
            x_max,
            x_labels,
            y_labels,
        }
    }

    /// The chart widget, borrowing the points held here.
    pub fn chart(&self) -> Chart<'_> {
        let mut datasets = vec![
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(OUTER_BAND))
                .data(&self.outer),
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(INNER_BAND))
                .data(&self.inner),
        ];
        datasets.extend(self.grid.iter().map(|line| {
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::DarkGray))
                .data(line)
        }));
        datasets.push(
            Dataset::default()
                .name("trend")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Red))
                .data(&self.average),
        );
        datasets.push(
            Dataset::default()
                .name("measured")
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::White))
                .data(&self.measured),
        );

        Chart::new(datasets)
            .block(
                Block::default()
                    .title(" Weight trend ".magenta().bold())
                    .borders(Borders::ALL),
            )
            .x_axis(
                Axis::default()
                    .title("Date".red())
                    .style(Style::default().fg(Color::White))
                    .bounds([0.0, self.x_max])
                    .labels(self.x_labels.iter().cloned().map(Span::from).collect()),
            )
            .y_axis(
                Axis::default()
                    .title("Weight [kg]".red())
                    .style(Style::default().fg(Color::White))
                    .bounds([self.axis.min, self.axis.max])
                    .labels(self.y_labels.iter().cloned().map(Span::from).collect()),
            )
    }
}

/// Points that fill the area between two curves, sampled every `x_res`
/// along the series and every `y_res` vertically.
pub fn fill_between(lower: &[f64], upper: &[f64], x_res: f64, y_res: f64) -> Points {
    let len = lower.len().min(upper.len());
    if len == 0 || !(x_res > 0.0) || !(y_res > 0.0) {
        return Vec::new();
    }

    let at = |curve: &[f64], x: f64| {
        let i = (x.floor() as usize).min(len - 1);
        let j = (i + 1).min(len - 1);
        curve[i] + (x - i as f64) * (curve[j] - curve[i])
    };

    let last = (len - 1) as f64;
    let mut points = Vec::new();
    let mut x = 0.0;
    while x <= last {
        let (a, b) = (at(lower, x), at(upper, x));
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let mut y = lo;
        while y < hi {
            points.push((x, y));
            y += y_res;
        }
        points.push((x, hi));
        x += x_res;
    }
    points
}

/// Render the chart into an off-screen buffer and return it as text, one
/// line per row.
pub fn render_to_string(trend: &Trend, dates: &[NaiveDate], width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    let data = ChartData::new(trend, dates, area);
    data.chart().render(area, &mut buf);

    let mut out = String::new();
    for y in 0..area.height {
        let row: String = (0..area.width)
            .map(|x| buf.get(x, y).symbol())
            .collect();
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}
