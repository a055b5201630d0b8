use crate::{
    Result,
    geom::{LineSegment, Rect},
    style::{Align, Color},
};

/// The trait implemented by drawing backends. All coordinates are absolute
/// surface units.
pub trait Surface {
    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<()>;
    /// Outline a rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: f32) -> Result<()>;
    /// Draw a single line of text aligned inside a rectangle.
    fn text(&mut self, rect: Rect, text: &str, color: Color, align: Align) -> Result<()>;
    /// Draw a line segment.
    fn line(&mut self, segment: LineSegment, color: Color, thickness: f32) -> Result<()>;
    /// Restrict subsequent drawing to a rectangle until the matching pop.
    fn push_clip(&mut self, rect: Rect) -> Result<()>;
    /// Remove the most recently pushed clip.
    fn pop_clip(&mut self) -> Result<()>;
}

/// A renderer that tracks the active clip region over a surface.
///
/// Primitives wholly outside the active clip are culled before they reach the
/// surface; anything overlapping it is passed through, and the surface's own
/// clip does the rest.
pub struct Render<'a> {
    /// The backend we draw into.
    surface: &'a mut dyn Surface,
    /// Effective clips, innermost last. Each entry is already intersected
    /// with the one below it.
    clips: Vec<Rect>,
}

impl<'a> Render<'a> {
    /// Wrap a surface with an empty clip stack.
    pub fn new(surface: &'a mut dyn Surface) -> Self {
        Self {
            surface,
            clips: Vec::new(),
        }
    }

    /// The active clip, if any.
    pub fn clip(&self) -> Option<Rect> {
        self.clips.last().copied()
    }

    /// Number of clips currently pushed.
    pub fn clip_depth(&self) -> usize {
        self.clips.len()
    }

    /// Would anything of `rect` show through the active clip? Touching edges
    /// count as overlap, an empty clip shows nothing.
    pub fn is_visible(&self, rect: &Rect) -> bool {
        match self.clip() {
            None => true,
            Some(c) if c.is_empty() => false,
            Some(c) => {
                rect.left() <= c.right()
                    && rect.right() >= c.left()
                    && rect.top() <= c.bottom()
                    && rect.bottom() >= c.top()
            }
        }
    }

    /// Fill a rectangle.
    pub fn fill(&mut self, rect: Rect, color: Color) -> Result<()> {
        if self.is_visible(&rect) {
            self.surface.fill_rect(rect, color)?;
        }
        Ok(())
    }

    /// Outline a rectangle.
    pub fn stroke(&mut self, rect: Rect, color: Color, thickness: f32) -> Result<()> {
        if self.is_visible(&rect) {
            self.surface.stroke_rect(rect, color, thickness)?;
        }
        Ok(())
    }

    /// Draw text aligned inside a rectangle.
    pub fn text(&mut self, rect: Rect, text: &str, color: Color, align: Align) -> Result<()> {
        if !text.is_empty() && self.is_visible(&rect) {
            self.surface.text(rect, text, color, align)?;
        }
        Ok(())
    }

    /// Draw a line segment.
    pub fn line(&mut self, segment: LineSegment, color: Color, thickness: f32) -> Result<()> {
        let bounds = Rect::from_edges(
            segment.a.x.min(segment.b.x),
            segment.a.y.min(segment.b.y),
            segment.a.x.max(segment.b.x),
            segment.a.y.max(segment.b.y),
        );
        if self.is_visible(&bounds) {
            self.surface.line(segment, color, thickness)?;
        }
        Ok(())
    }

    /// Run `f` with drawing restricted to `rect` intersected with the active
    /// clip. The clip is popped again whether or not `f` succeeds.
    pub fn with_clip<T>(
        &mut self,
        rect: Rect,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let effective = match self.clip() {
            Some(outer) => rect
                .intersect(&outer)
                .unwrap_or_else(|| Rect::at(rect.tl, Default::default())),
            None => rect,
        };
        self.surface.push_clip(effective)?;
        self.clips.push(effective);
        let out = f(self);
        self.clips.pop();
        let popped = self.surface.pop_clip();
        let out = out?;
        popped?;
        Ok(out)
    }
}
