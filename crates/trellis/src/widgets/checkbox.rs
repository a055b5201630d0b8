use tracing::debug;

use crate::{
    Context, ViewContext,
    error::Result,
    geom::Rect,
    render::Render,
    style::{Align, Color},
    widget::Widget,
};

/// Gap between the indicator box and the label.
const LABEL_GAP: f32 = 6.0;

/// Checkbox palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckboxColors {
    /// Indicator fill.
    pub box_fill: Color,
    /// Indicator fill under the pointer.
    pub box_hover: Color,
    /// Indicator outline.
    pub border: Color,
    /// Mark drawn inside the indicator when checked.
    pub accent: Color,
    /// Label text.
    pub text: Color,
}

impl Default for CheckboxColors {
    fn default() -> Self {
        Self {
            box_fill: Color::rgb(40, 42, 54),
            box_hover: Color::rgb(56, 60, 78),
            border: Color::rgb(110, 116, 140),
            accent: Color::rgb(90, 170, 255),
            text: Color::rgb(225, 225, 230),
        }
    }
}

/// A labelled two-state toggle.
pub struct Checkbox {
    /// Label drawn beside the indicator.
    label: String,
    /// Current state.
    checked: bool,
    /// Side of the indicator square.
    box_size: f32,
    /// Palette.
    colors: CheckboxColors,
    /// Invoked with the new state after each toggle.
    on_toggle: Option<Box<dyn FnMut(bool)>>,
}

impl Checkbox {
    /// Construct an unchecked checkbox.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            checked: false,
            box_size: 14.0,
            colors: CheckboxColors::default(),
            on_toggle: None,
        }
    }

    /// Build a checkbox with an initial state.
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Build a checkbox with an indicator size.
    pub fn with_box_size(mut self, size: f32) -> Self {
        self.box_size = size.max(0.0);
        self
    }

    /// Build a checkbox with a palette.
    pub fn with_colors(mut self, colors: CheckboxColors) -> Self {
        self.colors = colors;
        self
    }

    /// Build a checkbox that runs `f` with the new state after each toggle.
    pub fn with_on_toggle(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.on_toggle = Some(Box::new(f));
        self
    }

    /// Current state.
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Set the state without notifying.
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    /// The label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Indicator square for a node at `rect`, vertically centered on the left.
    fn indicator(&self, rect: Rect) -> Rect {
        let side = self.box_size.min(rect.h).min(rect.w);
        Rect::new(rect.left(), rect.top() + (rect.h - side) / 2.0, side, side)
    }
}

impl Widget for Checkbox {
    fn render(&mut self, r: &mut Render, ctx: &dyn ViewContext) -> Result<()> {
        let rect = ctx.absolute_rect();
        let indicator = self.indicator(rect);
        let fill = if ctx.node().hovered() {
            self.colors.box_hover
        } else {
            self.colors.box_fill
        };
        r.fill(indicator, fill)?;
        if self.checked {
            let inset = (indicator.w / 4.0).floor();
            let mark = Rect::new(
                indicator.left() + inset,
                indicator.top() + inset,
                (indicator.w - 2.0 * inset).max(0.0),
                (indicator.h - 2.0 * inset).max(0.0),
            );
            r.fill(mark, self.colors.accent)?;
        }
        r.stroke(indicator, self.colors.border, 1.0)?;

        let text_left = indicator.right() + LABEL_GAP;
        let text = Rect::from_edges(text_left, rect.top(), rect.right(), rect.bottom());
        r.text(text, &self.label, self.colors.text, Align::LEFT)
    }

    fn activate(&mut self, _ctx: &mut dyn Context) -> Result<()> {
        self.checked = !self.checked;
        debug!(label = %self.label, checked = self.checked, "checkbox toggled");
        if let Some(f) = self.on_toggle.as_mut() {
            f(self.checked);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{Tree, backend::RecordingSurface};

    #[test]
    fn toggles_and_notifies() -> Result<()> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let mut tree = Tree::new();
        let root = tree.root_id();
        let id = tree.add_child(
            root,
            Checkbox::new("opt").with_on_toggle(move |v| log.borrow_mut().push(v)),
        )?;
        tree.set_relative_rect(id, Rect::new(0.0, 0.0, 100.0, 20.0))?;

        for _ in 0..2 {
            tree.pointer_down((5.0, 5.0))?;
            tree.pointer_up((5.0, 5.0))?;
        }
        assert_eq!(*seen.borrow(), vec![true, false]);
        assert!(!tree.widget(id)?.is_checked());

        tree.with_widget(id, |w, _| {
            w.set_checked(true);
            Ok(())
        })?;
        assert_eq!(seen.borrow().len(), 2);
        Ok(())
    }

    #[test]
    fn accent_only_when_checked() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let id = tree.add_child(root, Checkbox::new("opt"))?;
        tree.set_relative_rect(id, Rect::new(0.0, 0.0, 100.0, 20.0))?;

        let mut s = RecordingSurface::new();
        tree.render(&mut s)?;
        let unchecked = s.commands().len();

        tree.with_widget(id, |w, _| {
            w.set_checked(true);
            Ok(())
        })?;
        s.clear();
        tree.render(&mut s)?;
        assert_eq!(s.commands().len(), unchecked + 1);
        assert!(s.contains_text("opt"));
        Ok(())
    }

    #[test]
    fn indicator_centered() {
        let c = Checkbox::new("x");
        assert_eq!(
            c.indicator(Rect::new(0.0, 0.0, 100.0, 20.0)),
            Rect::new(0.0, 3.0, 14.0, 14.0)
        );
    }
}
