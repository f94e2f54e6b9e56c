//! Widget-space geometry shared by the plan builder and the painter

use speedo_types::GaugeMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotate clockwise (screen coordinates, y down) around `center`.
    pub fn rotate_around(self, center: Point, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Point {
            x: center.x + dx * cos - dy * sin,
            y: center.y + dx * sin + dy * cos,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Padding {
    pub fn uniform(value: f64) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

/// The gauge occupies the largest square that fits the widget, centered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeLayout {
    pub side: f64,
    pub center: Point,
    /// Translation that centers the square inside the widget
    pub offset: Point,
    /// Rectangle the rim arc is inscribed in (inset by half the rim width)
    pub arc_rect: Rect,
    pub padding: Padding,
    pub metrics: GaugeMetrics,
}

impl GaugeLayout {
    pub fn new(width: f64, height: f64, padding: Padding, metrics: GaugeMetrics) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);
        let side = width.min(height);
        let half_rim = metrics.rim_width / 2.0;

        Self {
            side,
            center: Point::new(side / 2.0, side / 2.0),
            offset: Point::new((width - side) / 2.0, (height - side) / 2.0),
            arc_rect: Rect {
                left: half_rim + padding.left,
                top: half_rim + padding.top,
                right: side - half_rim - padding.right,
                bottom: side - half_rim - padding.bottom,
            },
            padding,
            metrics,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.arc_rect.width() <= 0.0 || self.arc_rect.height() <= 0.0
    }
}
