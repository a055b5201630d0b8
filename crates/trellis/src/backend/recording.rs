use std::fmt;

use crate::{
    error::{Error, Result},
    geom::{LineSegment, Rect},
    render::Surface,
    style::{Align, Color},
};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A solid rectangle.
    Fill(Rect, Color),
    /// A rectangle outline with its thickness.
    Stroke(Rect, Color, f32),
    /// A text run.
    Text {
        /// Layout rectangle.
        rect: Rect,
        /// The text.
        text: String,
        /// Text color.
        color: Color,
        /// Placement inside the rectangle.
        align: Align,
    },
    /// A line segment with its thickness.
    Line(LineSegment, Color, f32),
    /// A clip push.
    PushClip(Rect),
    /// A clip pop.
    PopClip,
}

/// Format a rect as `x,y wxh`.
struct R(Rect);

impl fmt::Display for R {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{} {}x{}", self.0.tl.x, self.0.tl.y, self.0.w, self.0.h)
    }
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fill(r, _) => write!(f, "fill {}", R(*r)),
            Self::Stroke(r, _, t) => write!(f, "stroke {} ({t})", R(*r)),
            Self::Text { rect, text, .. } => write!(f, "text {} {text:?}", R(*rect)),
            Self::Line(s, _, t) => {
                write!(f, "line {},{} -> {},{} ({t})", s.a.x, s.a.y, s.b.x, s.b.y)
            }
            Self::PushClip(r) => write!(f, "push_clip {}", R(*r)),
            Self::PopClip => write!(f, "pop_clip"),
        }
    }
}

/// A surface that logs every call, for asserting on render output without
/// pixels.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    /// Calls in the order they arrived.
    commands: Vec<DrawCommand>,
    /// Clips currently pushed.
    clips: Vec<Rect>,
}

impl RecordingSurface {
    /// An empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded call.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Discard the recording.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.clips.clear();
    }

    /// All text runs, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Return true if any text run contains the substring.
    pub fn contains_text(&self, txt: &str) -> bool {
        self.texts().iter().any(|t| t.contains(txt))
    }

    /// Number of clips currently pushed.
    pub fn clip_depth(&self) -> usize {
        self.clips.len()
    }

    /// The innermost pushed clip.
    pub fn clip(&self) -> Option<Rect> {
        self.clips.last().copied()
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<()> {
        self.commands.push(DrawCommand::Fill(rect, color));
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: f32) -> Result<()> {
        self.commands.push(DrawCommand::Stroke(rect, color, thickness));
        Ok(())
    }

    fn text(&mut self, rect: Rect, text: &str, color: Color, align: Align) -> Result<()> {
        self.commands.push(DrawCommand::Text {
            rect,
            text: text.to_string(),
            color,
            align,
        });
        Ok(())
    }

    fn line(&mut self, segment: LineSegment, color: Color, thickness: f32) -> Result<()> {
        self.commands.push(DrawCommand::Line(segment, color, thickness));
        Ok(())
    }

    fn push_clip(&mut self, rect: Rect) -> Result<()> {
        self.clips.push(rect);
        self.commands.push(DrawCommand::PushClip(rect));
        Ok(())
    }

    fn pop_clip(&mut self) -> Result<()> {
        if self.clips.pop().is_none() {
            return Err(Error::Render("clip stack underflow".into()));
        }
        self.commands.push(DrawCommand::PopClip);
        Ok(())
    }
}
