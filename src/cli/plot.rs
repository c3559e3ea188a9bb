//! SVG figures made of one or several panels
//!
//! A `Figure` lays out panels on a grid. Panels are charts over categories or
//! continuous values (bars, lines, filled lines, stacked areas, scatter points,
//! optionally against a secondary axis), pies, horizontal bar charts and
//! boxed text notes.

use std::path::Path;

use svg::{
    node::{
        self,
        element::{Circle, Group, Line, Path as Outline, Polygon, Polyline, Rectangle, Text},
    },
    Document,
};

use crate::lib::{error::Error, metrics};

pub const BLUE: &str = "#3498db";
pub const RED: &str = "#e74c3c";
pub const GREEN: &str = "#2ecc71";
pub const ORANGE: &str = "#f39c12";
pub const PURPLE: &str = "#9b59b6";
pub const DARK_GREEN: &str = "#27ae60";

const GRID: &str = "#dddddd";
const NOTE_FILL: &str = "wheat";

/// How a series is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    /// side by side with the other bar series
    Bars,
    /// solid line with point markers
    Line,
    /// dashed line without markers
    Dashed,
    /// line with the area below it shaded
    Filled,
    /// area stacked on top of the previous stacked series
    Stacked,
    Scatter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Primary,
    Secondary,
}

#[derive(Debug, Clone)]
pub struct Series {
    label: String,
    color: &'static str,
    mark: Mark,
    axis: Axis,
    points: Vec<(f64, f64)>,
    /// per-point override of `color`
    colors: Option<Vec<&'static str>>,
    /// text drawn above each point
    notes: Option<Vec<String>>,
}

impl Series {
    /// One value per category, in category order
    pub fn new<S>(label: S, color: &'static str, mark: Mark, values: &[f64]) -> Self
    where
        S: ToString,
    {
        Self {
            label: label.to_string(),
            color,
            mark,
            axis: Axis::Primary,
            points: values.iter().enumerate().map(|(i, &v)| (i as f64, v)).collect(),
            colors: None,
            notes: None,
        }
    }

    /// Free `(x, y)` points
    pub fn scatter<S>(label: S, color: &'static str, xs: &[f64], ys: &[f64]) -> Self
    where
        S: ToString,
    {
        Self {
            points: xs.iter().copied().zip(ys.iter().copied()).collect(),
            ..Self::new(label, color, Mark::Scatter, &[])
        }
    }

    pub fn secondary(mut self) -> Self {
        self.axis = Axis::Secondary;
        self
    }

    pub fn colored(mut self, colors: Vec<&'static str>) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn annotated(mut self, notes: Vec<String>) -> Self {
        self.notes = Some(notes);
        self
    }

    fn color_at(&self, i: usize) -> &'static str {
        self.colors
            .as_ref()
            .and_then(|c| c.get(i).copied())
            .unwrap_or(self.color)
    }

    fn grounded(&self) -> bool {
        matches!(self.mark, Mark::Bars | Mark::Filled | Mark::Stacked)
    }
}

#[derive(Debug, Clone)]
pub enum Domain {
    /// evenly spaced labeled slots
    Categories(Vec<String>),
    /// numeric x values
    Continuous,
}

#[derive(Debug, Clone)]
pub struct Chart {
    title: String,
    x_label: String,
    y_label: String,
    y2_label: String,
    domain: Domain,
    series: Vec<Series>,
    legend: bool,
}

impl Chart {
    pub fn categorical<S>(title: S, categories: &[String]) -> Self
    where
        S: ToString,
    {
        Self {
            title: title.to_string(),
            x_label: String::new(),
            y_label: String::new(),
            y2_label: String::new(),
            domain: Domain::Categories(categories.to_vec()),
            series: Vec::new(),
            legend: true,
        }
    }

    pub fn continuous<S>(title: S) -> Self
    where
        S: ToString,
    {
        Self {
            domain: Domain::Continuous,
            ..Self::categorical(title, &[])
        }
    }

    pub fn labels<S, T>(mut self, x: S, y: T) -> Self
    where
        S: ToString,
        T: ToString,
    {
        self.x_label = x.to_string();
        self.y_label = y.to_string();
        self
    }

    pub fn secondary_label<S>(mut self, y2: S) -> Self
    where
        S: ToString,
    {
        self.y2_label = y2.to_string();
        self
    }

    pub fn with(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn without_legend(mut self) -> Self {
        self.legend = false;
        self
    }
}

#[derive(Debug, Clone)]
struct Slice {
    label: String,
    color: &'static str,
    percent: f64,
}

#[derive(Debug, Clone)]
pub struct Pie {
    title: String,
    slices: Vec<Slice>,
}

impl Pie {
    /// Fails if the parts do not add up to a positive total
    pub fn new<S>(title: S, parts: &[(&str, &'static str, f64)]) -> Result<Self, Error>
    where
        S: ToString,
    {
        let total = parts.iter().map(|p| p.2).sum::<f64>();
        let slices = parts
            .iter()
            .map(|&(label, color, value)| {
                Ok(Slice {
                    label: label.to_string(),
                    color,
                    percent: metrics::share(value, total)?,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(Self {
            title: title.to_string(),
            slices,
        })
    }

    #[cfg(test)]
    pub fn percents(&self) -> Vec<f64> {
        self.slices.iter().map(|s| s.percent).collect()
    }
}

#[derive(Debug, Clone)]
struct Level {
    label: String,
    color: &'static str,
    value: f64,
    note: String,
}

/// Horizontal bars, one per labeled row
#[derive(Debug, Clone)]
pub struct HBarChart {
    title: String,
    x_label: String,
    levels: Vec<Level>,
}

impl HBarChart {
    pub fn new<S, T>(title: S, x_label: T) -> Self
    where
        S: ToString,
        T: ToString,
    {
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            levels: Vec::new(),
        }
    }

    pub fn bar<S, N>(mut self, label: S, color: &'static str, value: f64, note: N) -> Self
    where
        S: ToString,
        N: ToString,
    {
        self.levels.push(Level {
            label: label.to_string(),
            color,
            value,
            note: note.to_string(),
        });
        self
    }
}

/// Monospace text in a box
#[derive(Debug, Clone)]
pub struct Note {
    lines: Vec<String>,
}

impl Note {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.lines().map(String::from).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Panel {
    Chart(Chart),
    Pie(Pie),
    HBars(HBarChart),
    Note(Note),
}

impl From<Chart> for Panel {
    fn from(c: Chart) -> Self {
        Panel::Chart(c)
    }
}

impl From<Pie> for Panel {
    fn from(p: Pie) -> Self {
        Panel::Pie(p)
    }
}

impl From<HBarChart> for Panel {
    fn from(h: HBarChart) -> Self {
        Panel::HBars(h)
    }
}

impl From<Note> for Panel {
    fn from(n: Note) -> Self {
        Panel::Note(n)
    }
}

/// Panels on a grid with an optional overall title
#[derive(Debug, Clone)]
pub struct Figure {
    title: Option<String>,
    columns: usize,
    cell: (f64, f64),
    panels: Vec<Panel>,
}

impl Figure {
    /// One panel on its own
    pub fn single<P>(panel: P) -> Self
    where
        P: Into<Panel>,
    {
        let panel = panel.into();
        let cell = match panel {
            Panel::Pie(_) => (700.0, 700.0),
            _ => (1000.0, 560.0),
        };
        Self {
            title: None,
            columns: 1,
            cell,
            panels: vec![panel],
        }
    }

    /// Panels two per row
    pub fn grid(panels: Vec<Panel>) -> Self {
        Self {
            title: None,
            columns: 2,
            cell: (720.0, 500.0),
            panels,
        }
    }

    pub fn with_title<S>(mut self, title: S) -> Self
    where
        S: ToString,
    {
        self.title = Some(title.to_string());
        self
    }

    pub fn to_document(&self) -> Document {
        let (cw, ch) = self.cell;
        let rows = (self.panels.len() + self.columns - 1) / self.columns;
        let header = if self.title.is_some() { 50.0 } else { 0.0 };
        let width = cw * self.columns as f64;
        let height = header + ch * rows.max(1) as f64;
        let mut doc = Document::new()
            .set("viewBox", (0.0, 0.0, width, height))
            .set("width", width)
            .set("height", height)
            .add(
                Rectangle::new()
                    .set("width", width)
                    .set("height", height)
                    .set("fill", "white"),
            );
        if let Some(title) = &self.title {
            doc = doc.add(text(title.as_str(), width / 2.0, 32.0, 20.0, "middle").set("font-weight", "bold"));
        }
        for (i, panel) in self.panels.iter().enumerate() {
            let x = (i % self.columns) as f64 * cw;
            let y = header + (i / self.columns) as f64 * ch;
            let group = panel
                .render(cw, ch)
                .set("transform", format!("translate({},{})", x, y));
            doc = doc.add(group);
        }
        doc
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        svg::save(path, &self.to_document())?;
        log::info!("saved figure to {}", path.display());
        Ok(())
    }
}

impl Panel {
    fn render(&self, w: f64, h: f64) -> Group {
        match self {
            Panel::Chart(c) => c.render(w, h),
            Panel::Pie(p) => p.render(w, h),
            Panel::HBars(b) => b.render(w, h),
            Panel::Note(n) => n.render(w, h),
        }
    }
}

/// Linear map from `lo..hi` onto `from..to`
#[derive(Debug, Clone, Copy)]
struct Scale {
    lo: f64,
    hi: f64,
    from: f64,
    to: f64,
}

impl Scale {
    fn map(&self, v: f64) -> f64 {
        self.from + (v - self.lo) / (self.hi - self.lo) * (self.to - self.from)
    }

    /// `count + 1` evenly spaced values from `lo` to `hi`
    fn ticks(&self, count: usize) -> Vec<f64> {
        (0..=count)
            .map(|i| self.lo + (self.hi - self.lo) * i as f64 / count as f64)
            .collect()
    }
}

// padded range of `values`, including 0 when `grounded`
fn span<I>(values: I, grounded: bool) -> (f64, f64)
where
    I: Iterator<Item = f64>,
{
    let (mut lo, mut hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if grounded {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    if hi - lo < f64::EPSILON {
        hi = lo + 1.0;
    }
    let pad = (hi - lo) * 0.08;
    if !(grounded && lo == 0.0) {
        lo -= pad;
    }
    (lo, hi + pad)
}

fn tick_label(v: f64, range: f64) -> String {
    if range >= 10.0 {
        format!("{:.0}", v)
    } else {
        format!("{:.1}", v)
    }
}

fn text<S>(content: S, x: f64, y: f64, size: f64, anchor: &str) -> Text
where
    S: Into<String>,
{
    Text::new()
        .set("x", x)
        .set("y", y)
        .set("font-size", size)
        .set("font-family", "sans-serif")
        .set("text-anchor", anchor)
        .add(node::Text::new(content))
}

fn line(x1: f64, y1: f64, x2: f64, y2: f64, color: &str, width: f64) -> Line {
    Line::new()
        .set("x1", x1)
        .set("y1", y1)
        .set("x2", x2)
        .set("y2", y2)
        .set("stroke", color)
        .set("stroke-width", width)
}

fn points(pts: &[(f64, f64)]) -> String {
    pts.iter()
        .map(|(x, y)| format!("{:.2},{:.2}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn title(content: &str, w: f64) -> Text {
    text(content, w / 2.0, 24.0, 15.0, "middle").set("font-weight", "bold")
}

impl Chart {
    /// Values as they will be plotted on `axis`, stacks accumulated
    fn plotted(&self, axis: Axis) -> Vec<f64> {
        let mut base: Vec<f64> = Vec::new();
        let mut out = Vec::new();
        for s in self.series.iter().filter(|s| s.axis == axis) {
            for (i, &(_, y)) in s.points.iter().enumerate() {
                if s.mark == Mark::Stacked {
                    if base.len() <= i {
                        base.resize(i + 1, 0.0);
                    }
                    base[i] += y;
                    out.push(base[i]);
                } else {
                    out.push(y);
                }
            }
        }
        out
    }

    fn y_scale(&self, axis: Axis, top: f64, bottom: f64) -> Option<Scale> {
        if !self.series.iter().any(|s| s.axis == axis) {
            return None;
        }
        let grounded = self.series.iter().any(|s| s.axis == axis && s.grounded());
        let (lo, hi) = span(self.plotted(axis).into_iter(), grounded);
        Some(Scale {
            lo,
            hi,
            from: bottom,
            to: top,
        })
    }

    fn x_scale(&self, left: f64, right: f64) -> Scale {
        let (lo, hi) = match &self.domain {
            Domain::Categories(c) => (-0.5, c.len().max(1) as f64 - 0.5),
            Domain::Continuous => span(
                self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0)),
                false,
            ),
        };
        Scale {
            lo,
            hi,
            from: left,
            to: right,
        }
    }

    fn render(&self, w: f64, h: f64) -> Group {
        let secondary = self.series.iter().any(|s| s.axis == Axis::Secondary);
        let (left, top) = (80.0, 44.0);
        let right = w - if secondary { 80.0 } else { 30.0 };
        let bottom = h - 60.0;
        let xs = self.x_scale(left, right);
        let y1 = self
            .y_scale(Axis::Primary, top, bottom)
            .unwrap_or(Scale { lo: 0.0, hi: 1.0, from: bottom, to: top });
        let y2 = self.y_scale(Axis::Secondary, top, bottom);
        let scale_of = |axis: Axis| match (axis, y2) {
            (Axis::Secondary, Some(s)) => s,
            _ => y1,
        };

        let mut g = Group::new().add(title(&self.title, w));

        // grid and tick labels
        for v in y1.ticks(5) {
            let y = y1.map(v);
            g = g
                .add(line(left, y, right, y, GRID, 1.0))
                .add(text(tick_label(v, y1.hi - y1.lo), left - 6.0, y + 4.0, 10.0, "end"));
        }
        if let Some(y2) = y2 {
            for v in y2.ticks(5) {
                g = g.add(text(tick_label(v, y2.hi - y2.lo), right + 6.0, y2.map(v) + 4.0, 10.0, "start"));
            }
        }
        match &self.domain {
            Domain::Categories(cats) => {
                for (i, c) in cats.iter().enumerate() {
                    g = g.add(text(c.as_str(), xs.map(i as f64), bottom + 16.0, 10.0, "middle"));
                }
            }
            Domain::Continuous => {
                for v in xs.ticks(5) {
                    g = g.add(text(tick_label(v, xs.hi - xs.lo), xs.map(v), bottom + 16.0, 10.0, "middle"));
                }
            }
        }

        // stacked areas first so that everything else stays visible
        let mut base: Vec<f64> = Vec::new();
        for s in self.series.iter().filter(|s| s.mark == Mark::Stacked) {
            let ys = scale_of(s.axis);
            base.resize(base.len().max(s.points.len()), 0.0);
            let upper = s
                .points
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| (xs.map(x), ys.map(base[i] + y)))
                .collect::<Vec<_>>();
            let lower = s
                .points
                .iter()
                .enumerate()
                .rev()
                .map(|(i, &(x, _))| (xs.map(x), ys.map(base[i])))
                .collect::<Vec<_>>();
            for (i, &(_, y)) in s.points.iter().enumerate() {
                base[i] += y;
            }
            let outline = upper.into_iter().chain(lower).collect::<Vec<_>>();
            g = g.add(
                Polygon::new()
                    .set("points", points(&outline))
                    .set("fill", s.color)
                    .set("fill-opacity", 0.8),
            );
        }

        let bar_series = self.series.iter().filter(|s| s.mark == Mark::Bars).count().max(1);
        let slot = (xs.map(1.0) - xs.map(0.0)).abs();
        let bar_width = slot * 0.8 / bar_series as f64;
        let mut bar_index = 0;
        for s in &self.series {
            let ys = scale_of(s.axis);
            let pts = s
                .points
                .iter()
                .map(|&(x, y)| (xs.map(x), ys.map(y)))
                .collect::<Vec<_>>();
            match s.mark {
                Mark::Stacked => {}
                Mark::Bars => {
                    let zero = ys.map(0.0);
                    for (i, &(x, y)) in pts.iter().enumerate() {
                        let x0 = x - slot * 0.4 + bar_index as f64 * bar_width;
                        g = g.add(
                            Rectangle::new()
                                .set("x", x0)
                                .set("y", y.min(zero))
                                .set("width", bar_width)
                                .set("height", (zero - y).abs())
                                .set("fill", s.color_at(i))
                                .set("fill-opacity", 0.85),
                        );
                        if let Some(note) = s.notes.as_ref().and_then(|n| n.get(i)) {
                            g = g.add(text(note.as_str(), x0 + bar_width / 2.0, y.min(zero) - 4.0, 8.0, "middle"));
                        }
                    }
                    bar_index += 1;
                }
                Mark::Filled => {
                    let zero = ys.map(0.0);
                    let mut area = pts.clone();
                    if let (Some(&(first, _)), Some(&(last, _))) = (pts.first(), pts.last()) {
                        area.push((last, zero));
                        area.push((first, zero));
                    }
                    g = g.add(
                        Polygon::new()
                            .set("points", points(&area))
                            .set("fill", s.color)
                            .set("fill-opacity", 0.3),
                    );
                    g = draw_line(g, s, &pts, false);
                }
                Mark::Line => g = draw_line(g, s, &pts, false),
                Mark::Dashed => g = draw_line(g, s, &pts, true),
                Mark::Scatter => {
                    for &(x, y) in &pts {
                        g = g.add(
                            Circle::new()
                                .set("cx", x)
                                .set("cy", y)
                                .set("r", 6.0)
                                .set("fill", s.color)
                                .set("fill-opacity", 0.6),
                        );
                    }
                }
            }
        }

        // axes
        if y1.lo < 0.0 && y1.hi > 0.0 {
            let zero = y1.map(0.0);
            g = g.add(line(left, zero, right, zero, "black", 0.8));
        }
        g = g
            .add(line(left, top, left, bottom, "black", 1.5))
            .add(line(left, bottom, right, bottom, "black", 1.5));
        if secondary {
            g = g.add(line(right, top, right, bottom, "black", 1.5));
        }
        let middle = (top + bottom) / 2.0;
        g = g
            .add(text(self.x_label.as_str(), (left + right) / 2.0, h - 20.0, 12.0, "middle"))
            .add(
                text(self.y_label.as_str(), 20.0, middle, 12.0, "middle")
                    .set("transform", format!("rotate(-90 20 {})", middle)),
            );
        if secondary {
            let x = w - 16.0;
            g = g.add(
                text(self.y2_label.as_str(), x, middle, 12.0, "middle")
                    .set("transform", format!("rotate(-90 {} {})", x, middle)),
            );
        }

        if self.legend {
            let labeled = self.series.iter().filter(|s| !s.label.is_empty());
            for (i, s) in labeled.enumerate() {
                let y = top + 10.0 + i as f64 * 16.0;
                g = g
                    .add(
                        Rectangle::new()
                            .set("x", left + 10.0)
                            .set("y", y)
                            .set("width", 12.0)
                            .set("height", 12.0)
                            .set("fill", s.color),
                    )
                    .add(text(s.label.as_str(), left + 28.0, y + 10.0, 11.0, "start"));
            }
        }
        g
    }
}

fn draw_line(g: Group, s: &Series, pts: &[(f64, f64)], dashed: bool) -> Group {
    let mut poly = Polyline::new()
        .set("points", points(pts))
        .set("fill", "none")
        .set("stroke", s.color)
        .set("stroke-width", 2.0);
    if dashed {
        poly = poly.set("stroke-dasharray", "8,4");
    }
    let mut g = g.add(poly);
    if !dashed {
        for &(x, y) in pts {
            g = g.add(Circle::new().set("cx", x).set("cy", y).set("r", 4.0).set("fill", s.color));
        }
    }
    g
}

impl Pie {
    fn render(&self, w: f64, h: f64) -> Group {
        let (cx, cy) = (w / 2.0, h / 2.0 + 10.0);
        let r = w.min(h) * 0.33;
        let at = |deg: f64, radius: f64| {
            let a = deg.to_radians();
            (cx + radius * a.cos(), cy - radius * a.sin())
        };
        let mut g = Group::new().add(title(&self.title, w));
        // counterclockwise from the top
        let mut start = 90.0;
        for s in &self.slices {
            if s.percent <= 0.0 {
                continue;
            }
            let sweep = s.percent / 100.0 * 360.0;
            let end = start + sweep;
            if sweep >= 359.999 {
                g = g.add(Circle::new().set("cx", cx).set("cy", cy).set("r", r).set("fill", s.color));
            } else {
                let (x0, y0) = at(start, r);
                let (x1, y1) = at(end, r);
                let large = if sweep > 180.0 { 1 } else { 0 };
                let d = format!(
                    "M {:.2} {:.2} L {:.2} {:.2} A {:.2} {:.2} 0 {} 0 {:.2} {:.2} Z",
                    cx, cy, x0, y0, r, r, large, x1, y1
                );
                g = g.add(
                    Outline::new()
                        .set("d", d)
                        .set("fill", s.color)
                        .set("stroke", "white")
                        .set("stroke-width", 1.5),
                );
            }
            let mid = start + sweep / 2.0;
            let (px, py) = at(mid, r * 0.6);
            let (lx, ly) = at(mid, r * 1.12);
            let anchor = if mid.to_radians().cos() >= 0.0 { "start" } else { "end" };
            g = g
                .add(text(format!("{:.1}%", s.percent), px, py + 4.0, 12.0, "middle"))
                .add(text(s.label.as_str(), lx, ly + 4.0, 13.0, anchor));
            start = end;
        }
        g
    }
}

impl HBarChart {
    fn render(&self, w: f64, h: f64) -> Group {
        let (left, top, right, bottom) = (110.0, 44.0, w - 70.0, h - 60.0);
        let mut g = Group::new().add(title(&self.title, w));
        let max = self.levels.iter().map(|l| l.value).fold(0.0, f64::max);
        let xs = Scale {
            lo: 0.0,
            hi: if max > 0.0 { max * 1.15 } else { 1.0 },
            from: left,
            to: right,
        };
        for v in xs.ticks(5) {
            let x = xs.map(v);
            g = g
                .add(line(x, top, x, bottom, GRID, 1.0))
                .add(text(tick_label(v, xs.hi - xs.lo), x, bottom + 16.0, 10.0, "middle"));
        }
        let slot = (bottom - top) / self.levels.len().max(1) as f64;
        for (i, l) in self.levels.iter().enumerate() {
            let y = top + slot * i as f64 + slot * 0.2;
            let end = xs.map(l.value.max(0.0));
            g = g
                .add(
                    Rectangle::new()
                        .set("x", left)
                        .set("y", y)
                        .set("width", end - left)
                        .set("height", slot * 0.6)
                        .set("fill", l.color),
                )
                .add(text(l.label.as_str(), left - 6.0, y + slot * 0.35, 11.0, "end"))
                .add(text(l.note.as_str(), end + 4.0, y + slot * 0.35, 11.0, "start"));
        }
        g.add(line(left, top, left, bottom, "black", 1.5))
            .add(line(left, bottom, right, bottom, "black", 1.5))
            .add(text(self.x_label.as_str(), (left + right) / 2.0, h - 20.0, 12.0, "middle"))
    }
}

impl Note {
    fn render(&self, w: f64, h: f64) -> Group {
        let (x, y) = (30.0, 30.0);
        let mut g = Group::new().add(
            Rectangle::new()
                .set("x", x)
                .set("y", y)
                .set("width", w - 2.0 * x)
                .set("height", h - 2.0 * y)
                .set("rx", 10.0)
                .set("fill", NOTE_FILL)
                .set("fill-opacity", 0.5),
        );
        for (i, l) in self.lines.iter().enumerate() {
            g = g.add(
                text(l.as_str(), x + 16.0, y + 24.0 + i as f64 * 16.0, 12.0, "start")
                    .set("font-family", "monospace")
                    .set("xml:space", "preserve"),
            );
        }
        g
    }
}
