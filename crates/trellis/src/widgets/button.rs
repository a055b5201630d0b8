use tracing::debug;

use crate::{
    Context, ViewContext,
    error::Result,
    render::Render,
    style::{Align, Color},
    widget::Widget,
};

/// Button palette, one fill per visual state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonColors {
    /// Fill at rest.
    pub normal: Color,
    /// Fill under the pointer.
    pub hovered: Color,
    /// Fill while held.
    pub pressed: Color,
    /// Fill while disabled.
    pub disabled: Color,
    /// Outline.
    pub border: Color,
    /// Label text.
    pub text: Color,
}

impl Default for ButtonColors {
    fn default() -> Self {
        Self {
            normal: Color::rgb(60, 64, 84),
            hovered: Color::rgb(76, 82, 108),
            pressed: Color::rgb(40, 44, 60),
            disabled: Color::rgb(50, 50, 54),
            border: Color::rgb(100, 106, 130),
            text: Color::rgb(235, 235, 240),
        }
    }
}

/// A push button that runs a callback when released over itself.
pub struct Button {
    /// Button label.
    label: String,
    /// Palette.
    colors: ButtonColors,
    /// Invoked on activation.
    on_click: Option<Box<dyn FnMut()>>,
}

impl Button {
    /// Construct a new button with a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            colors: ButtonColors::default(),
            on_click: None,
        }
    }

    /// Build a button that runs `f` when clicked.
    pub fn with_on_click(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    /// Build a button with a palette.
    pub fn with_colors(mut self, colors: ButtonColors) -> Self {
        self.colors = colors;
        self
    }

    /// Return the button label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the button label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Replace the click callback.
    pub fn set_on_click(&mut self, f: impl FnMut() + 'static) {
        self.on_click = Some(Box::new(f));
    }

    /// Fill for the given state, by priority disabled > pressed > hovered.
    fn fill(&self, enabled: bool, pressed: bool, hovered: bool) -> Color {
        if !enabled {
            self.colors.disabled
        } else if pressed {
            self.colors.pressed
        } else if hovered {
            self.colors.hovered
        } else {
            self.colors.normal
        }
    }
}

impl Default for Button {
    fn default() -> Self {
        Self::new("")
    }
}

impl Widget for Button {
    fn render(&mut self, r: &mut Render, ctx: &dyn ViewContext) -> Result<()> {
        let node = ctx.node();
        let rect = ctx.absolute_rect();
        r.fill(rect, self.fill(node.enabled(), node.pressed(), node.hovered()))?;
        r.stroke(rect, self.colors.border, 1.0)?;
        r.text(rect, &self.label, self.colors.text, Align::CENTER)
    }

    fn activate(&mut self, _ctx: &mut dyn Context) -> Result<()> {
        debug!(label = %self.label, "button clicked");
        if let Some(f) = self.on_click.as_mut() {
            f();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;
    use crate::{
        Tree,
        backend::{DrawCommand, RecordingSurface},
        geom::Rect,
    };

    fn setup() -> Result<(Tree, crate::TypedId<Button>, Rc<Cell<u32>>)> {
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let mut tree = Tree::new();
        let root = tree.root_id();
        let id = tree.add_child(
            root,
            Button::new("ok").with_on_click(move || counter.set(counter.get() + 1)),
        )?;
        tree.set_relative_rect(id, Rect::new(10.0, 10.0, 40.0, 20.0))?;
        Ok((tree, id, clicks))
    }

    #[test]
    fn click_inside() -> Result<()> {
        let (mut tree, id, clicks) = setup()?;
        assert!(tree.pointer_down((20.0, 20.0))?.is_handled());
        assert!(tree.node(id).is_some_and(|n| n.pressed()));
        tree.pointer_up((20.0, 20.0))?;
        assert_eq!(clicks.get(), 1);
        assert!(!tree.node(id).is_some_and(|n| n.pressed()));
        Ok(())
    }

    #[test]
    fn release_outside_cancels() -> Result<()> {
        let (mut tree, id, clicks) = setup()?;
        tree.pointer_down((20.0, 20.0))?;
        tree.pointer_up((200.0, 200.0))?;
        assert_eq!(clicks.get(), 0);
        assert!(!tree.node(id).is_some_and(|n| n.pressed()));
        Ok(())
    }

    #[test]
    fn disabled_never_presses() -> Result<()> {
        let (mut tree, id, clicks) = setup()?;
        tree.set_enabled(id, false);
        assert_eq!(tree.pointer_down((20.0, 20.0))?, crate::EventOutcome::Ignore);
        tree.pointer_up((20.0, 20.0))?;
        assert_eq!(clicks.get(), 0);

        let mut s = RecordingSurface::new();
        tree.render(&mut s)?;
        let colors = ButtonColors::default();
        assert_eq!(
            s.commands()[0],
            DrawCommand::Fill(Rect::new(10.0, 10.0, 40.0, 20.0), colors.disabled)
        );
        Ok(())
    }

    #[test]
    fn fill_priority() {
        let b = Button::new("x");
        let c = ButtonColors::default();
        assert_eq!(b.fill(false, true, true), c.disabled);
        assert_eq!(b.fill(true, true, true), c.pressed);
        assert_eq!(b.fill(true, false, true), c.hovered);
        assert_eq!(b.fill(true, false, false), c.normal);
    }
}
