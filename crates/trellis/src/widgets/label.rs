use crate::{
    Context, ViewContext,
    error::Result,
    event::PointerEvent,
    render::Render,
    style::{Align, Color},
    widget::{EventOutcome, Widget},
};

/// A run of static text. Labels never consume pointer events.
#[derive(Debug, Clone)]
pub struct Label {
    /// The text.
    text: String,
    /// Text color.
    color: Color,
    /// Placement in the node rect.
    align: Align,
}

impl Label {
    /// Construct a left-aligned label.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: Color::rgb(220, 220, 225),
            align: Align::LEFT,
        }
    }

    /// Build a label with a text color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Build a label with an alignment.
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// The label text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the label text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// The text color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// The alignment.
    pub fn align(&self) -> Align {
        self.align
    }
}

impl Widget for Label {
    fn render(&mut self, r: &mut Render, ctx: &dyn ViewContext) -> Result<()> {
        r.text(ctx.absolute_rect(), &self.text, self.color, self.align)
    }

    fn on_pointer_move(
        &mut self,
        _event: &PointerEvent,
        _ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    fn on_pointer_down(
        &mut self,
        _event: &PointerEvent,
        _ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    fn on_pointer_up(
        &mut self,
        _event: &PointerEvent,
        _ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Tree, backend::RecordingSurface, geom::Rect, style::HAlign};

    #[test]
    fn renders_and_ignores_input() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let id = tree.add_child(root, Label::new("hello").with_align(Align::CENTER))?;
        tree.set_relative_rect(id, Rect::new(0.0, 0.0, 50.0, 10.0))?;

        assert_eq!(tree.pointer_down((5.0, 5.0))?, EventOutcome::Ignore);
        tree.pointer_move((5.0, 5.0))?;
        assert!(!tree.node(id).is_some_and(|n| n.hovered() || n.pressed()));

        let mut s = RecordingSurface::new();
        tree.render(&mut s)?;
        assert_eq!(s.texts(), vec!["hello"]);
        assert_eq!(tree.widget(id)?.align().h, HAlign::Center);
        Ok(())
    }
}
