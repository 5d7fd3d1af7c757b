//! Draw-command interface
//!
//! The simulation never talks to a graphics API. Every entity describes itself
//! through [`Renderer`]; a backend (or the [`DrawList`] recorder used by tests
//! and the headless driver) consumes the calls.

pub mod palette;

pub use palette::Color;

use glam::Vec2;

/// Stroke settings applied to subsequent shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub width: f32,
    pub color: Color,
    pub alpha: f32,
    /// Rounded line caps (used for open arcs)
    pub round_cap: bool,
}

impl LineStyle {
    pub fn new(width: f32, color: Color) -> Self {
        Self {
            width,
            color,
            alpha: 1.0,
            round_cap: false,
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn rounded(mut self) -> Self {
        self.round_cap = true;
        self
    }
}

/// Sink for the per-frame drawing calls issued by the simulation
pub trait Renderer {
    fn line_style(&mut self, style: LineStyle);
    /// Fill subsequent closed shapes until [`Renderer::end_fill`]
    fn begin_fill(&mut self, color: Color, alpha: f32);
    fn end_fill(&mut self);
    /// Closed polygon through the points, in order
    fn draw_polygon(&mut self, points: &[Vec2]);
    fn draw_circle(&mut self, center: Vec2, radius: f32);
    /// Single open segment
    fn draw_line(&mut self, from: Vec2, to: Vec2);
    /// Drop everything accumulated so far
    fn clear(&mut self);
}

/// A recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    LineStyle(LineStyle),
    BeginFill { color: Color, alpha: f32 },
    EndFill,
    Polygon(Vec<Vec2>),
    Circle { center: Vec2, radius: f32 },
    Line { from: Vec2, to: Vec2 },
}

/// Renderer that records commands in order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All recorded polygons
    pub fn polygons(&self) -> impl Iterator<Item = &[Vec2]> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Polygon(points) => Some(points.as_slice()),
            _ => None,
        })
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }
}

impl Renderer for DrawList {
    fn line_style(&mut self, style: LineStyle) {
        self.commands.push(DrawCommand::LineStyle(style));
    }

    fn begin_fill(&mut self, color: Color, alpha: f32) {
        self.commands.push(DrawCommand::BeginFill { color, alpha });
    }

    fn end_fill(&mut self) {
        self.commands.push(DrawCommand::EndFill);
    }

    fn draw_polygon(&mut self, points: &[Vec2]) {
        self.commands.push(DrawCommand::Polygon(points.to_vec()));
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::Circle { center, radius });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2) {
        self.commands.push(DrawCommand::Line { from, to });
    }

    fn clear(&mut self) {
        self.commands.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_list_records_in_order() {
        let mut list = DrawList::new();
        list.line_style(LineStyle::new(2.0, palette::RED));
        list.draw_circle(Vec2::ZERO, 100.0);
        list.draw_polygon(&[Vec2::ZERO, Vec2::X, Vec2::Y]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.circle_count(), 1);
        assert_eq!(list.polygons().count(), 1);

        list.clear();
        assert!(list.is_empty());
    }
}
