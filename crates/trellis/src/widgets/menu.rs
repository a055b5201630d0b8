use tracing::debug;

use super::{Chrome, ChromeKind};
use crate::{
    Context, ViewContext,
    config::MenuConfig,
    error::{Error, Result},
    event::PointerEvent,
    geom::{Expanse, LineSegment, Point, Rect},
    id::{NodeId, TypedId},
    layout::LayoutCursor,
    node::Node,
    render::Render,
    style::Align,
    widget::{EventOutcome, Widget},
};

/// Gap between the title strip edge and the controls.
const CONTROL_INSET: f32 = 2.0;
/// Left inset of the title text.
const TITLE_INSET: f32 = 6.0;
/// Diagonal strokes in the resize affordance.
const HANDLE_STROKES: usize = 3;
/// Distance between resize strokes.
const HANDLE_SPACING: f32 = 3.0;
/// Distance of the resize strokes from the outer corner.
const HANDLE_PADDING: f32 = 2.0;

/// An active drag.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    /// Pointer offset from the menu's top-left when the drag began.
    grab: Point,
}

/// An active resize.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ResizeSession {
    /// Offset from the pointer to the menu's bottom-right when the resize
    /// began.
    corner_offset: Point,
}

/// Chrome node ids, created on mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ChromeIds {
    /// Title strip.
    title: NodeId,
    /// Close control.
    close: NodeId,
    /// Collapse control.
    collapse: NodeId,
}

/// A floating container with a title strip, close and collapse controls, and
/// a bottom-right resize handle.
///
/// The chrome lives in the same child list as body children; the menu tells
/// them apart by id. While a drag or resize is active the menu acts on moves
/// itself instead of forwarding them, and any release ends the session.
#[derive(Debug)]
pub struct Menu {
    /// Title text.
    title: String,
    /// Geometry, flags and palette.
    config: MenuConfig,
    /// Body hidden, only the title strip remains.
    collapsed: bool,
    /// Active drag, exclusive with `resize`.
    drag: Option<DragSession>,
    /// Active resize, exclusive with `drag`.
    resize: Option<ResizeSession>,
    /// Chrome ids, set once mounted.
    chrome: Option<ChromeIds>,
    /// Stacking cursor for the current layout session.
    cursor: Option<LayoutCursor>,
}

impl Menu {
    /// Construct a menu with the default configuration.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            config: MenuConfig::default(),
            collapsed: false,
            drag: None,
            resize: None,
            chrome: None,
            cursor: None,
        }
    }

    /// Build a menu with a configuration.
    pub fn with_config(mut self, config: MenuConfig) -> Self {
        self.config = config;
        self
    }

    /// The title text.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replace the title text.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// The configuration.
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Is the body hidden?
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Collapse or expand the body.
    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    /// Is a drag active?
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Is a resize active?
    pub fn is_resizing(&self) -> bool {
        self.resize.is_some()
    }

    /// The node standing for a piece of chrome, once mounted.
    pub fn chrome(&self, kind: ChromeKind) -> Option<NodeId> {
        self.chrome.map(|ids| match kind {
            ChromeKind::TitleBar => ids.title,
            ChromeKind::Close => ids.close,
            ChromeKind::Collapse => ids.collapse,
        })
    }

    /// Children that are not chrome, in insertion order.
    pub fn body_children(&self, ctx: &dyn ViewContext) -> Vec<NodeId> {
        let chrome = self.chrome;
        ctx.children()
            .into_iter()
            .filter(|id| {
                chrome.is_none_or(|c| *id != c.title && *id != c.close && *id != c.collapse)
            })
            .collect()
    }

    /// Start a layout session with the cursor at `(x, y)` below the title
    /// strip.
    pub fn begin_layout(&mut self, x: f32, y: f32) {
        let th = self.config.effective_title_height();
        self.cursor = Some(LayoutCursor::new(x, y + th, self.config.spacing));
    }

    /// Attach a detached node and place it at the cursor with its effective
    /// size.
    pub fn add_child_with_layout(
        &mut self,
        ctx: &mut dyn Context,
        child: impl Into<NodeId>,
    ) -> Result<()> {
        let child = child.into();
        let Some(cursor) = self.cursor.as_mut() else {
            return Err(Error::InvalidOperation(
                "add_child_with_layout outside a layout session".into(),
            ));
        };
        ctx.attach(child)?;
        let size = ctx.tree().effective_size(child)?;
        let rect = cursor.place(size);
        ctx.set_rect_of(child, rect)
    }

    /// Create a node for `widget` and lay it out as the next child.
    pub fn add_widget_with_layout<W>(
        &mut self,
        ctx: &mut dyn Context,
        widget: W,
        preferred: Option<Expanse>,
    ) -> Result<TypedId<W>>
    where
        W: Widget + 'static,
    {
        let id = ctx.create(widget.into())?;
        ctx.set_preferred_size_of(id, preferred)?;
        self.add_child_with_layout(ctx, id)?;
        Ok(TypedId::new(id))
    }

    /// End a layout session. Further additions keep stacking below the last
    /// one.
    pub fn end_layout(&mut self) {}

    /// Split a menu rect into its title strip and body.
    fn split(&self, rect: Rect) -> (Rect, Rect) {
        rect.carve_top(self.config.effective_title_height())
    }

    /// Title strip in absolute coordinates.
    fn title_strip(&self, abs: Rect) -> Rect {
        self.split(abs).0
    }

    /// Resize square in absolute coordinates.
    fn resize_square(&self, abs: Rect) -> Rect {
        abs.bottom_right_square(self.config.resize_handle)
    }

    /// Paint a control glyph, highlighted while hovered.
    fn render_control(
        &self,
        r: &mut Render,
        ctx: &dyn ViewContext,
        id: NodeId,
        glyph: &str,
    ) -> Result<()> {
        let rect = ctx.absolute_rect_of(id)?;
        let colors = &self.config.colors;
        let color = if ctx.node_of(id).is_some_and(Node::hovered) {
            colors.control_hover
        } else {
            colors.control
        };
        r.text(rect, glyph, color, Align::CENTER)
    }

    /// Paint the diagonal strokes of the resize affordance, kept inside the
    /// outer edge.
    fn render_resize_handle(&self, r: &mut Render, abs: Rect) -> Result<()> {
        let sq = self.resize_square(abs);
        let x1 = (sq.right() - HANDLE_PADDING).max(sq.left());
        let y1 = (sq.bottom() - HANDLE_PADDING).max(sq.top());
        for i in 0..HANDLE_STROKES {
            let offset = i as f32 * HANDLE_SPACING;
            let start = Point::new((sq.left() + offset).min(x1), y1);
            let end = Point::new(x1, (sq.top() + offset).min(y1));
            r.line(
                LineSegment::new(start, end),
                self.config.colors.resize_handle,
                1.0,
            )?;
        }
        Ok(())
    }
}

impl Widget for Menu {
    fn on_mount(&mut self, ctx: &mut dyn Context) -> Result<()> {
        let title = ctx.add_child(Chrome::new(ChromeKind::TitleBar).into())?;
        let close = ctx.add_child(Chrome::new(ChromeKind::Close).into())?;
        let collapse = ctx.add_child(Chrome::new(ChromeKind::Collapse).into())?;
        if !self.config.title_bar {
            for id in [title, close, collapse] {
                ctx.set_visible_of(id, false);
            }
        }
        self.chrome = Some(ChromeIds {
            title,
            close,
            collapse,
        });
        self.on_layout(ctx)
    }

    fn on_layout(&mut self, ctx: &mut dyn Context) -> Result<()> {
        let (strip, body) = self.split(ctx.rect().size().rect());
        if let Some(ids) = self.chrome {
            ctx.set_rect_of(ids.title, strip)?;
            // Controls sit right to left, each in a slot of its side plus the inset.
            let side = (strip.h - 2.0 * CONTROL_INSET).max(0.0);
            let (rest, close) = strip.carve_right(side + CONTROL_INSET);
            let (_, collapse) = rest.carve_right(side + CONTROL_INSET);
            for (id, slot) in [(ids.close, close), (ids.collapse, collapse)] {
                let control = Rect::new(slot.left(), slot.top() + CONTROL_INSET, side, side);
                ctx.set_rect_of(id, control)?;
            }
        }
        ctx.set_clip(self.config.clip.then_some(body));
        Ok(())
    }

    fn render(&mut self, r: &mut Render, ctx: &dyn ViewContext) -> Result<()> {
        let abs = ctx.absolute_rect();
        let (strip, body) = self.split(abs);
        let colors = self.config.colors;

        if self.config.background && !self.collapsed {
            r.fill(body, colors.background)?;
        }

        if self.config.title_bar {
            r.fill(strip, colors.title_background)?;
            r.line(
                LineSegment::horizontal(Point::new(abs.left(), strip.bottom()), abs.w),
                colors.separator,
                1.0,
            )?;
            let text = Rect::from_edges(
                strip.left() + TITLE_INSET,
                strip.top(),
                strip.right(),
                strip.bottom(),
            );
            r.text(text, &self.title, colors.title_text, Align::LEFT)?;
            if let Some(ids) = self.chrome {
                self.render_control(r, ctx, ids.close, "×")?;
                let arrow = if self.collapsed { "▸" } else { "▾" };
                self.render_control(r, ctx, ids.collapse, arrow)?;
            }
        }

        self.render_resize_handle(r, abs)?;
        let outline = if self.collapsed { strip } else { abs };
        r.stroke(outline, colors.outline, 1.0)
    }

    fn paints_children(&self) -> bool {
        !self.collapsed
    }

    fn on_pointer_down(
        &mut self,
        event: &PointerEvent,
        ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        let p = event.location;
        if !ctx.hit_test(p) {
            return Ok(EventOutcome::Ignore);
        }

        if event.is_primary() {
            let abs = ctx.absolute_rect();
            if self.config.resizable && self.resize_square(abs).contains_point(p) {
                self.drag = None;
                self.resize = Some(ResizeSession {
                    corner_offset: abs.br() - p,
                });
                debug!(title = %self.title, "resize started");
                return Ok(EventOutcome::Handle);
            }

            if let Some(ids) = self.chrome
                && self.config.title_bar
                && self.title_strip(abs).contains_point(p)
            {
                if ctx.contains_of(ids.close, p) {
                    debug!(title = %self.title, "menu closed");
                    ctx.set_visible(false);
                } else if ctx.contains_of(ids.collapse, p) {
                    self.collapsed = !self.collapsed;
                    debug!(title = %self.title, collapsed = self.collapsed, "menu collapse toggled");
                } else {
                    self.resize = None;
                    self.drag = Some(DragSession { grab: p - abs.tl });
                    debug!(title = %self.title, "drag started");
                }
                return Ok(EventOutcome::Handle);
            }
        }

        if self.collapsed {
            return Ok(EventOutcome::Ignore);
        }
        ctx.forward_first(event)?;
        Ok(EventOutcome::Handle)
    }

    fn on_pointer_move(
        &mut self,
        event: &PointerEvent,
        ctx: &mut dyn Context,
    ) -> Result<EventOutcome> {
        let p = event.location;

        if let Some(resize) = self.resize {
            let abs = ctx.absolute_rect();
            let corner = p + resize.corner_offset;
            let size = Expanse::new(corner.x - abs.left(), corner.y - abs.top())
                .at_least(self.config.min_size);
            let tl = ctx.rect().tl;
            ctx.set_rect(Rect::at(tl, size))?;
            self.on_layout(ctx)?;
            return Ok(EventOutcome::Handle);
        }

        if let Some(drag) = self.drag {
            ctx.set_absolute_position(p - drag.grab)?;
            return Ok(EventOutcome::Handle);
        }

        let hovered = ctx.hit_test(p);
        ctx.set_hovered(hovered);

        if self.collapsed {
            let mut outcome = EventOutcome::Ignore;
            if let Some(ids) = self.chrome {
                for id in [ids.collapse, ids.close, ids.title] {
                    outcome = outcome.or(ctx.dispatch(id, event)?);
                }
            }
            return Ok(outcome);
        }
        ctx.forward_all(event)
    }

    fn on_pointer_up(&mut self, event: &PointerEvent, ctx: &mut dyn Context) -> Result<EventOutcome> {
        let capturing = self.drag.is_some() || self.resize.is_some();
        if capturing {
            debug!(title = %self.title, "capture released");
        }
        self.drag = None;
        self.resize = None;
        let forwarded = ctx.forward_all(event)?;
        Ok((capturing || forwarded.is_handled() || ctx.hit_test(event.location)).into())
    }

    fn on_click(&mut self, event: &PointerEvent, ctx: &mut dyn Context) -> Result<EventOutcome> {
        if self.collapsed || !ctx.hit_test(event.location) {
            return Ok(EventOutcome::Ignore);
        }
        ctx.forward_first(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Tree, widgets::Label};

    fn setup(config: MenuConfig) -> Result<(Tree, TypedId<Menu>)> {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let id = tree.add_child(root, Menu::new("Menu").with_config(config))?;
        tree.set_relative_rect(id, Rect::new(10.0, 10.0, 300.0, 200.0))?;
        Ok((tree, id))
    }

    #[test]
    fn chrome_layout() -> Result<()> {
        let (tree, id) = setup(MenuConfig::default())?;
        let menu = tree.widget(id)?;
        let close = menu.chrome(ChromeKind::Close).and_then(|c| tree.node(c));
        let collapse = menu.chrome(ChromeKind::Collapse).and_then(|c| tree.node(c));
        let title = menu.chrome(ChromeKind::TitleBar).and_then(|c| tree.node(c));
        assert_eq!(close.map(Node::rect), Some(Rect::new(280.0, 2.0, 18.0, 18.0)));
        assert_eq!(collapse.map(Node::rect), Some(Rect::new(260.0, 2.0, 18.0, 18.0)));
        assert_eq!(title.map(Node::rect), Some(Rect::new(0.0, 0.0, 300.0, 22.0)));
        assert_eq!(
            tree.node(id).and_then(Node::clip),
            Some(Rect::new(0.0, 22.0, 300.0, 178.0))
        );
        Ok(())
    }

    #[test]
    fn layout_requires_session() -> Result<()> {
        let (mut tree, id) = setup(MenuConfig::default())?;
        let child = tree.add(Label::new("x"))?;
        let out = tree.with_widget(id, |m, ctx| m.add_child_with_layout(ctx, child));
        assert!(matches!(out, Err(Error::InvalidOperation(_))));
        assert!(tree.node(child).is_some_and(|n| n.parent().is_none()));
        Ok(())
    }

    #[test]
    fn layout_stacks_below_title() -> Result<()> {
        let (mut tree, id) = setup(MenuConfig::default())?;
        let (a, b) = tree.with_widget(id, |m, ctx| {
            m.begin_layout(0.0, 0.0);
            let a = m.add_widget_with_layout(ctx, Label::new("a"), Some(Expanse::new(120.0, 26.0)))?;
            let b = m.add_widget_with_layout(ctx, Label::new("b"), Some(Expanse::new(80.0, 20.0)))?;
            m.end_layout();
            Ok((a, b))
        })?;
        assert_eq!(tree.node(a).map(Node::rect), Some(Rect::new(0.0, 22.0, 120.0, 26.0)));
        assert_eq!(tree.node(b).map(Node::rect), Some(Rect::new(0.0, 52.0, 80.0, 20.0)));
        let menu = tree.widget(id)?;
        assert_eq!(tree.node(id).map(|n| n.children().len()), Some(5));
        let view = crate::context::TreeView::new(&tree, id.id());
        assert_eq!(menu.body_children(&view), vec![a.id(), b.id()]);
        Ok(())
    }

    #[test]
    fn no_title_bar() -> Result<()> {
        let config = MenuConfig {
            title_bar: false,
            ..MenuConfig::default()
        };
        let (mut tree, id) = setup(config)?;
        let title = tree.widget(id)?.chrome(ChromeKind::TitleBar);
        assert!(title.and_then(|t| tree.node(t)).is_some_and(|n| !n.visible()));

        tree.pointer_down((100.0, 10.0))?;
        assert!(!tree.widget(id)?.is_dragging());
        assert_eq!(tree.node(id).and_then(Node::clip), Some(Rect::new(0.0, 0.0, 300.0, 200.0)));
        Ok(())
    }

    #[test]
    fn resize_disabled() -> Result<()> {
        let config = MenuConfig {
            resizable: false,
            ..MenuConfig::default()
        };
        let (mut tree, id) = setup(config)?;
        tree.pointer_down((308.0, 208.0))?;
        assert!(!tree.widget(id)?.is_resizing());
        Ok(())
    }
}
