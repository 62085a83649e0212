//! Overlay drawing surface.
//!
//! The overlay never talks to a graphics API directly. It issues primitive
//! draw calls against a [`DrawSurface`] supplied by the host for the current
//! frame. [`CommandBuffer`] is a surface that records the calls as
//! [`RenderCommand`]s for inspection.

use hitmark_shared::Vec2;

use crate::style::Color;

/// A draw call issued by the overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Circle outline.
    Circle {
        /// Center in screen space.
        center: Vec2,
        /// Radius in pixels.
        radius: f32,
        /// Stroke color.
        color: Color,
        /// Stroke width in pixels.
        stroke_width: f32,
        /// Number of segments approximating the circle.
        segments: u32,
    },
    /// Straight line.
    Line {
        /// Start point.
        from: Vec2,
        /// End point.
        to: Vec2,
        /// Line thickness in pixels.
        thickness: f32,
        /// Line color.
        color: Color,
    },
    /// Text label.
    Text {
        /// Anchor position.
        position: Vec2,
        /// Text content.
        text: String,
        /// Text color.
        color: Color,
    },
}

impl RenderCommand {
    /// Color the command is drawn with.
    #[must_use]
    pub fn color(&self) -> Color {
        match self {
            Self::Circle { color, .. } | Self::Line { color, .. } | Self::Text { color, .. } => {
                *color
            }
        }
    }
}

/// Immediate-mode drawing backend for one frame.
pub trait DrawSurface {
    /// Draws a circle outline.
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color, stroke_width: f32, segments: u32);

    /// Draws a line segment.
    fn draw_line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color);

    /// Draws a text label anchored at `position`.
    fn draw_string(&mut self, position: Vec2, text: &str, color: Color);
}

/// Surface that records every draw call.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<RenderCommand>,
}

impl CommandBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self { commands: Vec::with_capacity(256) }
    }

    /// Clears recorded commands for a new frame.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
    }

    /// Recorded commands, in issue order.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Returns the total command count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if nothing was drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterates recorded circles.
    pub fn circles(&self) -> impl Iterator<Item = &RenderCommand> {
        self.commands.iter().filter(|c| matches!(c, RenderCommand::Circle { .. }))
    }

    /// Iterates recorded lines.
    pub fn lines(&self) -> impl Iterator<Item = &RenderCommand> {
        self.commands.iter().filter(|c| matches!(c, RenderCommand::Line { .. }))
    }

    /// Iterates recorded text labels.
    pub fn texts(&self) -> impl Iterator<Item = &RenderCommand> {
        self.commands.iter().filter(|c| matches!(c, RenderCommand::Text { .. }))
    }
}

impl DrawSurface for CommandBuffer {
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color, stroke_width: f32, segments: u32) {
        self.commands.push(RenderCommand::Circle { center, radius, color, stroke_width, segments });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color) {
        self.commands.push(RenderCommand::Line { from, to, thickness, color });
    }

    fn draw_string(&mut self, position: Vec2, text: &str, color: Color) {
        self.commands.push(RenderCommand::Text { position, text: text.to_owned(), color });
    }
}
