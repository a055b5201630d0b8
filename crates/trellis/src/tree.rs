//! The node arena: ownership, geometry, dispatch and the render walker.

use std::any::Any;

use slotmap::SlotMap;
use tracing::{debug, trace};

use crate::{
    Context,
    context::{TreeContext, TreeView},
    error::{Error, Result},
    event::{Action, Button, PointerEvent},
    geom::{Expanse, Point, Rect},
    id::{NodeId, TypedId},
    node::Node,
    render::{Render, Surface},
    widget::{EventOutcome, Widget},
    widgets::Root,
};

/// A retained tree of widgets.
///
/// Parents own their children exclusively: removing a node removes its whole
/// subtree. Children hold their parent's id for upward lookups only.
pub struct Tree {
    /// Node storage arena.
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// Root node ID.
    root: NodeId,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Create a tree with a [`Root`] widget that forwards events to its
    /// children.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new(Box::new(Root::new())));
        Self { nodes, root }
    }

    /// Create a tree with a custom root widget. The root's relative rect is
    /// its absolute rect.
    pub fn with_root<W>(widget: W) -> Result<Self>
    where
        W: Widget + 'static,
    {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new(Box::new(widget)));
        let mut tree = Self { nodes, root };
        tree.mount(root)?;
        Ok(tree)
    }

    /// The root node ID.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Node data, if the node exists.
    pub fn node(&self, id: impl Into<NodeId>) -> Option<&Node> {
        self.nodes.get(id.into())
    }

    /// Number of nodes in the arena, including detached ones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the arena holds no nodes. A tree always has a root, so this is
    /// only true transiently.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node or fail.
    fn get(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(Error::NodeNotFound(id))
    }

    /// Look up a node mutably or fail.
    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))
    }

    /// Create a detached node and run its mount hook.
    pub fn add<W>(&mut self, widget: W) -> Result<TypedId<W>>
    where
        W: Widget + 'static,
    {
        Ok(TypedId::new(self.add_boxed(Box::new(widget))?))
    }

    /// Create a detached node from a boxed widget and run its mount hook.
    pub fn add_boxed(&mut self, widget: Box<dyn Widget>) -> Result<NodeId> {
        let id = self.nodes.insert(Node::new(widget));
        trace!(?id, name = self.nodes[id].name, "node created");
        if let Err(e) = self.mount(id) {
            self.remove_subtree(id)?;
            return Err(e);
        }
        Ok(id)
    }

    /// Create a node and attach it as the last child of `parent`.
    pub fn add_child<W>(&mut self, parent: impl Into<NodeId>, widget: W) -> Result<TypedId<W>>
    where
        W: Widget + 'static,
    {
        let parent = parent.into();
        self.get(parent)?;
        let child = self.add(widget)?;
        self.attach(parent, child)?;
        Ok(child)
    }

    /// Run a node's mount hook.
    fn mount(&mut self, id: NodeId) -> Result<()> {
        self.with_widget_mut(id, |w, tree| {
            let mut ctx = TreeContext::new(tree, id);
            w.on_mount(&mut ctx)
        })?
    }

    /// Attach a detached node as the last child of `parent`, transferring
    /// ownership. A node can have only one parent.
    pub fn attach(&mut self, parent: impl Into<NodeId>, child: impl Into<NodeId>) -> Result<()> {
        let parent = parent.into();
        let child = child.into();
        self.get(parent)?;
        if self.get(child)?.parent.is_some() || child == self.root {
            return Err(Error::AlreadyAttached(child));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(Error::WouldCreateCycle { parent, child });
        }
        self.get_mut(child)?.parent = Some(parent);
        self.get_mut(parent)?.children.push(child);
        trace!(?parent, ?child, "node attached");
        Ok(())
    }

    /// Detach a child from its parent, leaving it alive and parentless.
    pub fn detach(&mut self, child: impl Into<NodeId>) -> Result<()> {
        let child = child.into();
        let Some(parent) = self.get(child)?.parent else {
            return Ok(());
        };
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|id| *id != child);
        }
        self.get_mut(child)?.parent = None;
        Ok(())
    }

    /// Remove a node and all its descendants, children before parents.
    pub fn remove_subtree(&mut self, id: impl Into<NodeId>) -> Result<()> {
        let id = id.into();
        if id == self.root {
            return Err(Error::InvalidOperation("cannot remove root".into()));
        }
        self.detach(id)?;
        for node in self.subtree_post_order(id) {
            self.nodes.remove(node);
        }
        trace!(?id, "subtree removed");
        Ok(())
    }

    /// Remove every child subtree of `parent`.
    pub fn clear_children(&mut self, parent: impl Into<NodeId>) -> Result<()> {
        let parent = parent.into();
        let children = self.get(parent)?.children.clone();
        for child in children.into_iter().rev() {
            self.remove_subtree(child)?;
        }
        Ok(())
    }

    /// Is `ancestor` a strict ancestor of `node`?
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Collect a subtree in post-order, including the root.
    fn subtree_post_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![(root, false)];
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                out.push(id);
                continue;
            }
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            stack.push((id, true));
            for child in node.children.iter().rev() {
                stack.push((*child, false));
            }
        }
        out
    }

    /// Set the root's size. The root sits at the surface origin.
    pub fn set_root_size(&mut self, size: Expanse) -> Result<()> {
        debug!(w = size.w, h = size.h, "root resized");
        let root = self.root;
        let tl = self.get(root)?.rect.tl;
        self.set_relative_rect(root, Rect::at(tl, size))
    }

    /// Replace a node's rect relative to its parent, then run its layout hook.
    pub fn set_relative_rect(&mut self, id: impl Into<NodeId>, rect: Rect) -> Result<()> {
        let id = id.into();
        self.apply_rect(id, rect)?;
        self.relayout(id)
    }

    /// Replace a node's rect from relative edges, then run its layout hook.
    /// Inverted edges are rejected.
    pub fn set_relative_edges(
        &mut self,
        id: impl Into<NodeId>,
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
    ) -> Result<()> {
        self.set_relative_rect(id, Rect::try_from_edges(left, top, right, bottom)?)
    }

    /// Place a node at an absolute position with a size, then run its layout
    /// hook.
    pub fn set_absolute_pos_and_size(
        &mut self,
        id: impl Into<NodeId>,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    ) -> Result<()> {
        let id = id.into();
        let origin = self.parent_origin(id)?;
        let rect = Rect::new(x - origin.x, y - origin.y, w.max(0.0), h.max(0.0));
        self.set_relative_rect(id, rect)
    }

    /// Move a node relative to its parent, keeping its size, then run its
    /// layout hook.
    pub fn set_position(&mut self, id: impl Into<NodeId>, p: Point) -> Result<()> {
        let id = id.into();
        let size = self.get(id)?.rect.size();
        self.set_relative_rect(id, Rect::at(p, size))
    }

    /// Store a rect without running the layout hook.
    pub(crate) fn apply_rect(&mut self, id: NodeId, rect: Rect) -> Result<()> {
        self.get_mut(id)?.rect = rect;
        Ok(())
    }

    /// Move a node so its top-left lands on an absolute point, keeping its
    /// size. The layout hook is not run, since a move does not change the
    /// relative positions of anything inside the node.
    pub(crate) fn set_absolute_position(&mut self, id: NodeId, p: Point) -> Result<()> {
        let origin = self.parent_origin(id)?;
        let node = self.get_mut(id)?;
        node.rect.tl = p - origin;
        Ok(())
    }

    /// Run a node's layout hook.
    pub fn relayout(&mut self, id: impl Into<NodeId>) -> Result<()> {
        let id = id.into();
        self.with_widget_mut(id, |w, tree| {
            let mut ctx = TreeContext::new(tree, id);
            w.on_layout(&mut ctx)
        })?
    }

    /// Set or clear a node's preferred size hint, then run its layout hook.
    pub fn set_preferred_size(
        &mut self,
        id: impl Into<NodeId>,
        size: Option<Expanse>,
    ) -> Result<()> {
        let id = id.into();
        self.get_mut(id)?.preferred = size;
        self.relayout(id)
    }

    /// The size layout assigns to a node.
    pub fn effective_size(&self, id: impl Into<NodeId>) -> Result<Expanse> {
        Ok(self.get(id.into())?.effective_size())
    }

    /// Absolute position of the parent's top-left, or the origin for a
    /// parentless node.
    fn parent_origin(&self, id: NodeId) -> Result<Point> {
        match self.get(id)?.parent {
            Some(parent) => self.absolute_position(parent),
            None => Ok(Point::zero()),
        }
    }

    /// Absolute position of a node's top-left corner. Walks the parent chain
    /// on every call.
    pub fn absolute_position(&self, id: impl Into<NodeId>) -> Result<Point> {
        let mut p = Point::zero();
        let mut current = Some(id.into());
        while let Some(id) = current {
            let node = self.get(id)?;
            p = p + node.rect.tl;
            current = node.parent;
        }
        Ok(p)
    }

    /// Absolute left edge of a node.
    pub fn absolute_x(&self, id: impl Into<NodeId>) -> Result<f32> {
        Ok(self.absolute_position(id)?.x)
    }

    /// Absolute top edge of a node.
    pub fn absolute_y(&self, id: impl Into<NodeId>) -> Result<f32> {
        Ok(self.absolute_position(id)?.y)
    }

    /// Absolute rect of a node.
    pub fn absolute_rect(&self, id: impl Into<NodeId>) -> Result<Rect> {
        let id = id.into();
        let size = self.get(id)?.rect.size();
        Ok(Rect::at(self.absolute_position(id)?, size))
    }

    /// Absolute clip region a node imposes on its children, if any.
    pub fn clip_rect(&self, id: impl Into<NodeId>) -> Result<Option<Rect>> {
        let id = id.into();
        match self.get(id)?.clip {
            Some(clip) => Ok(Some(clip.shift(self.absolute_position(id)?))),
            None => Ok(None),
        }
    }

    /// Pure geometric containment: is `p` inside the node's absolute rect,
    /// edges inclusive?
    pub fn contains(&self, id: impl Into<NodeId>, p: Point) -> Result<bool> {
        Ok(self.absolute_rect(id)?.contains_point(p))
    }

    /// Containment that also honors the clip region of every ancestor, so a
    /// node scrolled or pushed outside its container's visible area cannot be
    /// hit.
    pub fn hit_test(&self, id: impl Into<NodeId>, p: Point) -> Result<bool> {
        let id = id.into();
        if !self.contains(id, p)? {
            return Ok(false);
        }
        let mut current = self.get(id)?.parent;
        while let Some(ancestor) = current {
            if let Some(clip) = self.clip_rect(ancestor)?
                && !clip.contains_point(p)
            {
                return Ok(false);
            }
            current = self.get(ancestor)?.parent;
        }
        Ok(true)
    }

    /// Show or hide a node. Returns true if the flag changed.
    pub fn set_visible(&mut self, id: impl Into<NodeId>, visible: bool) -> bool {
        match self.nodes.get_mut(id.into()) {
            Some(node) if node.visible != visible => {
                node.visible = visible;
                true
            }
            _ => false,
        }
    }

    /// Enable or disable a node. Returns true if the flag changed.
    pub fn set_enabled(&mut self, id: impl Into<NodeId>, enabled: bool) -> bool {
        match self.nodes.get_mut(id.into()) {
            Some(node) if node.enabled != enabled => {
                node.enabled = enabled;
                if !enabled {
                    node.pressed = false;
                }
                true
            }
            _ => false,
        }
    }

    /// Shared access to a typed widget.
    pub fn widget<W>(&self, id: TypedId<W>) -> Result<&W>
    where
        W: Widget + 'static,
    {
        let nid = id.id();
        let widget = self
            .get(nid)?
            .widget
            .as_deref()
            .ok_or(Error::WidgetBorrowed(nid))?;
        (widget as &dyn Any)
            .downcast_ref::<W>()
            .ok_or_else(Error::widget_type::<W>)
    }

    /// Execute a closure with mutable access to a typed widget and a context
    /// for its node.
    pub fn with_widget<W, R>(
        &mut self,
        id: TypedId<W>,
        f: impl FnOnce(&mut W, &mut dyn Context) -> Result<R>,
    ) -> Result<R>
    where
        W: Widget + 'static,
    {
        let nid = id.id();
        self.with_widget_mut(nid, |widget, tree| {
            let any = widget as &mut dyn Any;
            let widget = any
                .downcast_mut::<W>()
                .ok_or_else(Error::widget_type::<W>)?;
            let mut ctx = TreeContext::new(tree, nid);
            f(widget, &mut ctx)
        })?
    }

    /// Take a widget out of its slot for a single call, so it can mutate the
    /// tree it lives in, then put it back.
    pub(crate) fn with_widget_mut<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn Widget, &mut Self) -> R,
    ) -> Result<R> {
        let mut widget = self
            .get_mut(id)?
            .widget
            .take()
            .ok_or(Error::WidgetBorrowed(id))?;
        let out = f(widget.as_mut(), self);
        // The widget may have removed its own node; it is dropped then.
        if let Some(node) = self.nodes.get_mut(id) {
            node.widget = Some(widget);
        }
        Ok(out)
    }

    /// Deliver an event to the root.
    pub fn dispatch(&mut self, event: &PointerEvent) -> Result<EventOutcome> {
        self.dispatch_to(self.root, event)
    }

    /// Deliver an event to a single node. Hidden nodes ignore everything.
    pub fn dispatch_to(
        &mut self,
        id: impl Into<NodeId>,
        event: &PointerEvent,
    ) -> Result<EventOutcome> {
        let id = id.into();
        if !self.get(id)?.visible {
            return Ok(EventOutcome::Ignore);
        }
        self.with_widget_mut(id, |w, tree| {
            let mut ctx = TreeContext::new(tree, id);
            match event.action {
                Action::Move => w.on_pointer_move(event, &mut ctx),
                Action::Down => w.on_pointer_down(event, &mut ctx),
                Action::Up => w.on_pointer_up(event, &mut ctx),
                Action::Click => w.on_click(event, &mut ctx),
            }
        })?
    }

    /// Deliver a pointer move to the root.
    pub fn pointer_move(&mut self, p: impl Into<Point>) -> Result<EventOutcome> {
        self.dispatch(&PointerEvent::moved(p))
    }

    /// Deliver a primary button press to the root.
    pub fn pointer_down(&mut self, p: impl Into<Point>) -> Result<EventOutcome> {
        self.dispatch(&PointerEvent::down(Button::Left, p))
    }

    /// Deliver a primary button release to the root.
    pub fn pointer_up(&mut self, p: impl Into<Point>) -> Result<EventOutcome> {
        self.dispatch(&PointerEvent::up(Button::Left, p))
    }

    /// Deliver a primary button click to the root.
    pub fn click(&mut self, p: impl Into<Point>) -> Result<EventOutcome> {
        self.dispatch(&PointerEvent::click(Button::Left, p))
    }

    /// Paint the tree onto a surface: each node before its children, children
    /// in insertion order, hidden subtrees skipped.
    pub fn render(&mut self, surface: &mut dyn Surface) -> Result<()> {
        let mut r = Render::new(surface);
        self.render_node(self.root, &mut r)?;
        debug_assert_eq!(r.clip_depth(), 0, "clip stack leaked");
        Ok(())
    }

    /// Paint one subtree.
    fn render_node(&mut self, id: NodeId, r: &mut Render<'_>) -> Result<()> {
        let (visible, clip, children) = {
            let node = self.get(id)?;
            (node.visible, node.clip, node.children.clone())
        };
        if !visible {
            return Ok(());
        }

        let outer = self.absolute_rect(id)?;
        if r.is_visible(&outer) {
            self.with_widget_mut(id, |w, tree| {
                let ctx = TreeView::new(tree, id);
                w.render(r, &ctx)
            })??;
        }

        let descend = self
            .nodes
            .get(id)
            .and_then(|n| n.widget.as_deref())
            .is_none_or(|w| w.paints_children());
        if !descend || children.is_empty() {
            return Ok(());
        }

        match clip {
            Some(clip) => {
                let clip = clip.shift(outer.tl);
                r.with_clip(clip, |r| self.render_children(&children, r))
            }
            None => self.render_children(&children, r),
        }
    }

    /// Paint a list of sibling subtrees in order.
    fn render_children(&mut self, children: &[NodeId], r: &mut Render<'_>) -> Result<()> {
        for child in children {
            self.render_node(*child, r)?;
        }
        Ok(())
    }
}
