use tracing::trace;

use crate::{
    Context, ViewContext,
    error::Result,
    event::PointerEvent,
    geom::Rect,
    render::Render,
    style::{Align, Color},
    widget::{EventOutcome, Widget},
};

/// Height of the caption row above the track.
const CAPTION_HEIGHT: f32 = 16.0;
/// Gap between the caption row and the track.
const CAPTION_PAD: f32 = 2.0;

/// Slider palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderColors {
    /// Track fill.
    pub track: Color,
    /// Handle fill.
    pub handle: Color,
    /// Handle fill while hovered or dragged.
    pub handle_active: Color,
    /// Caption and value text.
    pub text: Color,
}

impl Default for SliderColors {
    fn default() -> Self {
        Self {
            track: Color::rgb(44, 46, 60),
            handle: Color::rgb(130, 136, 160),
            handle_active: Color::rgb(90, 170, 255),
            text: Color::rgb(225, 225, 230),
        }
    }
}

/// A horizontal value picker.
///
/// A press anywhere on the track starts a drag and snaps the handle to the
/// pointer. The value is mapped linearly from the handle offset, then snapped
/// to `step` when `step > 0`.
///
/// When there is a caption to show, a text row sits above the track with the
/// label on the left and the value on the right. The track fills the rest of
/// the node.
pub struct Slider {
    /// Caption text.
    label: String,
    /// Draw the caption.
    show_label: bool,
    /// Draw the value.
    show_value: bool,
    /// Lower bound.
    min: f32,
    /// Upper bound.
    max: f32,
    /// Snap increment, counted from `min`. Zero disables snapping.
    step: f32,
    /// Current value, always within bounds.
    value: f32,
    /// Width of the handle.
    handle_width: f32,
    /// Decimal places shown in the value text.
    precision: usize,
    /// A drag session is active.
    dragging: bool,
    /// Palette.
    colors: SliderColors,
    /// Invoked with the new value whenever a drag changes it.
    on_change: Option<Box<dyn FnMut(f32)>>,
}

impl Slider {
    /// Construct a slider over `[min, max]`. Inverted bounds are swapped and
    /// the value is clamped.
    pub fn new(min: f32, max: f32, value: f32) -> Self {
        let (min, max) = if max < min { (max, min) } else { (min, max) };
        Self {
            label: String::new(),
            show_label: true,
            show_value: true,
            min,
            max,
            step: 0.0,
            value: value.clamp(min, max),
            handle_width: 10.0,
            precision: 0,
            dragging: false,
            colors: SliderColors::default(),
            on_change: None,
        }
    }

    /// Build a slider with a caption.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Build a slider that shows or hides its caption.
    pub fn with_show_label(mut self, show: bool) -> Self {
        self.show_label = show;
        self
    }

    /// Build a slider that shows or hides its value.
    pub fn with_show_value(mut self, show: bool) -> Self {
        self.show_value = show;
        self
    }

    /// Build a slider that snaps to multiples of `step` from the minimum.
    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step.max(0.0);
        self.value = self.snap(self.value);
        self
    }

    /// Build a slider with a handle width.
    pub fn with_handle_width(mut self, width: f32) -> Self {
        self.handle_width = width.max(0.0);
        self
    }

    /// Build a slider that shows `precision` decimal places.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Build a slider with a palette.
    pub fn with_colors(mut self, colors: SliderColors) -> Self {
        self.colors = colors;
        self
    }

    /// Build a slider that runs `f` when a drag changes the value.
    pub fn with_on_change(mut self, f: impl FnMut(f32) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Caption text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the caption text.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Current value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Lower bound.
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Is a drag session active?
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Set the value, clamped and snapped, without notifying.
    pub fn set_value(&mut self, value: f32) {
        self.value = self.snap(value.clamp(self.min, self.max));
    }

    /// The value text as rendered.
    pub fn display_value(&self) -> String {
        format!("{:.*}", self.precision, self.value)
    }

    /// Height taken by the caption row, zero when there is nothing to show.
    pub fn caption_offset(&self) -> f32 {
        let label = self.show_label && !self.label.is_empty();
        if label || self.show_value {
            CAPTION_HEIGHT + CAPTION_PAD
        } else {
            0.0
        }
    }

    /// Split a node rect into the caption row and the track.
    fn split(&self, rect: Rect) -> (Rect, Rect) {
        rect.carve_top(self.caption_offset())
    }

    /// Snap to the step grid and clamp.
    fn snap(&self, value: f32) -> f32 {
        let v = if self.step > 0.0 {
            self.min + ((value - self.min) / self.step).round() * self.step
        } else {
            value
        };
        v.clamp(self.min, self.max)
    }

    /// Map a pointer x onto the value range for a track at `track`.
    pub fn value_at(&self, track: Rect, x: f32) -> f32 {
        let span = track.w - self.handle_width;
        if span <= 0.0 || self.max == self.min {
            return self.min;
        }
        let offset = (x - track.left() - self.handle_width / 2.0).clamp(0.0, span);
        let t = offset / span;
        self.snap(self.min + t * (self.max - self.min))
    }

    /// Handle rect for a track at `track`.
    fn handle(&self, track: Rect) -> Rect {
        let span = (track.w - self.handle_width).max(0.0);
        let t = if self.max > self.min {
            (self.value - self.min) / (self.max - self.min)
        } else {
            0.0
        };
        Rect::new(
            track.left() + t * span,
            track.top(),
            self.handle_width.min(track.w),
            track.h,
        )
    }

    /// Recompute the value from a pointer position, notifying on change.
    fn update(&mut self, x: f32, ctx: &dyn Context) {
        let value = self.value_at(self.split(ctx.absolute_rect()).1, x);
        if value != self.value {
            trace!(from = self.value, to = value, "slider value changed");
            self.value = value;
            if let Some(f) = self.on_change.as_mut() {
                f(value);
            }
        }
    }
}

impl Widget for Slider {
    fn render(&mut self, r: &mut Render, ctx: &dyn ViewContext) -> Result<()> {
        let (caption, track) = self.split(ctx.absolute_rect());
        r.fill(track, self.colors.track)?;
        let handle = if self.dragging || ctx.node().hovered() {
            self.colors.handle_active
        } else {
            self.colors.handle
        };
        r.fill(self.handle(track), handle)?;
        let (caption, _) = caption.carve_top(CAPTION_HEIGHT);
        if self.show_label {
            r.text(caption, &self.label, self.colors.text, Align::LEFT)?;
        }
        if self.show_value && !caption.is_empty() {
            r.text(caption, &self.display_value(), self.colors.text, Align::RIGHT)?;
        }
        Ok(())
    }

    fn on_pointer_move(
        &mut self,
        event: &PointerEvent,
        ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        let hovered = ctx.hit_test(event.location);
        ctx.set_hovered(hovered);
        if self.dragging {
            self.update(event.location.x, ctx);
        }
        Ok(self.dragging.into())
    }

    fn on_pointer_down(
        &mut self,
        event: &PointerEvent,
        ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        let (_, track) = self.split(ctx.absolute_rect());
        let on_track = track.contains_point(event.location) && ctx.hit_test(event.location);
        if !event.is_primary() || !ctx.node().enabled() || !on_track {
            return Ok(EventOutcome::Ignore);
        }
        self.dragging = true;
        ctx.set_pressed(true);
        self.update(event.location.x, ctx);
        Ok(EventOutcome::Handle)
    }

    fn on_pointer_up(
        &mut self,
        _event: &PointerEvent,
        ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        let was = self.dragging;
        self.dragging = false;
        ctx.set_pressed(false);
        Ok(was.into())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{Tree, TypedId, backend::{DrawCommand, RecordingSurface}};

    /// A node whose track row spans y 58..78 below the caption.
    const TRACK: Rect = Rect::new(10.0, 40.0, 110.0, 38.0);

    fn setup(slider: Slider) -> Result<(Tree, TypedId<Slider>)> {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let id = tree.add_child(root, slider)?;
        tree.set_relative_rect(id, TRACK)?;
        Ok((tree, id))
    }

    #[test]
    fn mapping() {
        let s = Slider::new(0.0, 100.0, 0.0);
        assert_eq!(s.value_at(TRACK, 65.0), 50.0);
        assert_eq!(s.value_at(TRACK, -100.0), 0.0);
        assert_eq!(s.value_at(TRACK, 1000.0), 100.0);
        let stepped = Slider::new(0.0, 100.0, 0.0).with_step(25.0);
        assert_eq!(stepped.value_at(TRACK, 50.0), 25.0);
        let degenerate = Slider::new(5.0, 5.0, 5.0);
        assert_eq!(degenerate.value_at(TRACK, 100.0), 5.0);
        let narrow = Slider::new(0.0, 10.0, 3.0).with_handle_width(200.0);
        assert_eq!(narrow.value_at(TRACK, 100.0), 0.0);
    }

    #[test]
    fn drag_notifies_on_change_only() -> Result<()> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let (mut tree, id) =
            setup(Slider::new(0.0, 100.0, 0.0).with_on_change(move |v| log.borrow_mut().push(v)))?;

        assert!(tree.pointer_down((65.0, 70.0))?.is_handled());
        assert_eq!(tree.widget(id)?.value(), 50.0);
        tree.pointer_move((65.0, 70.0))?;
        tree.pointer_move((500.0, 500.0))?;
        assert_eq!(tree.widget(id)?.value(), 100.0);
        tree.pointer_up((500.0, 500.0))?;
        assert!(!tree.widget(id)?.is_dragging());
        tree.pointer_move((15.0, 70.0))?;
        assert_eq!(tree.widget(id)?.value(), 100.0);
        assert_eq!(*seen.borrow(), vec![50.0, 100.0]);
        Ok(())
    }

    #[test]
    fn press_outside_track_ignored() -> Result<()> {
        let (mut tree, id) = setup(Slider::new(0.0, 100.0, 20.0))?;
        assert!(!tree.pointer_down((65.0, 10.0))?.is_handled());
        assert!(!tree.pointer_down((65.0, 45.0))?.is_handled());
        assert!(!tree.widget(id)?.is_dragging());
        assert_eq!(tree.widget(id)?.value(), 20.0);
        Ok(())
    }

    #[test]
    fn press_at_track_middle_maps_to_midpoint() -> Result<()> {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let id = tree.add_child(root, Slider::new(0.0, 100.0, 0.0).with_step(1.0))?;
        tree.set_relative_rect(id, Rect::new(20.0, 0.0, 140.0, 40.0))?;
        assert_eq!(tree.widget(id)?.handle_width, 10.0);
        tree.pointer_down((20.0 + 70.0, 30.0))?;
        assert_eq!(tree.widget(id)?.value(), 50.0);
        Ok(())
    }

    #[test]
    fn caption_row_above_track() -> Result<()> {
        let (mut tree, _) = setup(Slider::new(0.0, 100.0, 40.0).with_label("Volume"))?;
        let mut s = RecordingSurface::new();
        tree.render(&mut s)?;
        let caption = Rect::new(10.0, 40.0, 110.0, 16.0);
        let texts: Vec<_> = s
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { rect, text, align, .. } => Some((*rect, text.as_str(), *align)),
                _ => None,
            })
            .collect();
        assert_eq!(
            texts,
            vec![(caption, "Volume", Align::LEFT), (caption, "40", Align::RIGHT)]
        );
        let colors = SliderColors::default();
        assert!(s.commands().contains(&DrawCommand::Fill(
            Rect::new(10.0, 58.0, 110.0, 20.0),
            colors.track
        )));
        Ok(())
    }

    #[test]
    fn bare_slider_has_no_caption_row() -> Result<()> {
        let bare = Slider::new(0.0, 1.0, 0.0).with_show_value(false);
        assert_eq!(bare.caption_offset(), 0.0);
        let hidden_label = Slider::new(0.0, 1.0, 0.0)
            .with_label("x")
            .with_show_label(false)
            .with_show_value(false);
        assert_eq!(hidden_label.caption_offset(), 0.0);
        assert_eq!(Slider::new(0.0, 1.0, 0.0).with_label("x").caption_offset(), 18.0);

        let (mut tree, id) = setup(bare)?;
        assert!(tree.pointer_down((65.0, 41.0))?.is_handled());
        assert!(tree.widget(id)?.is_dragging());
        let mut s = RecordingSurface::new();
        tree.render(&mut s)?;
        assert!(s.texts().is_empty());
        Ok(())
    }

    #[test]
    fn programmatic_set() {
        let mut s = Slider::new(10.0, 0.0, 50.0).with_step(2.5).with_precision(1);
        assert_eq!((s.min(), s.max(), s.value()), (0.0, 10.0, 10.0));
        s.set_value(3.6);
        assert_eq!(s.value(), 2.5);
        assert_eq!(s.display_value(), "2.5");
    }
}
