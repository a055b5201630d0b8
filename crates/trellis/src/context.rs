//! Contexts handed to widgets while they render or handle events.

use crate::{
    error::{Error, Result},
    event::PointerEvent,
    geom::{Expanse, Point, Rect},
    id::NodeId,
    node::Node,
    tree::Tree,
    widget::{EventOutcome, Widget},
};

/// Read-only context available to widgets during render and event handling.
pub trait ViewContext {
    /// The node currently executing.
    fn node_id(&self) -> NodeId;

    /// The tree the node lives in.
    fn tree(&self) -> &Tree;

    /// Data for the current node.
    ///
    /// The executing node always exists; a missing node is an arena bug.
    fn node(&self) -> &Node {
        self.tree()
            .node(self.node_id())
            .unwrap_or_else(|| unreachable!("executing node is missing from the arena"))
    }

    /// Data for another node.
    fn node_of(&self, node: NodeId) -> Option<&Node> {
        self.tree().node(node)
    }

    /// Rect of the current node relative to its parent.
    fn rect(&self) -> Rect {
        self.node().rect()
    }

    /// Absolute rect of the current node.
    fn absolute_rect(&self) -> Rect {
        self.tree()
            .absolute_rect(self.node_id())
            .unwrap_or_else(|_| self.rect())
    }

    /// Absolute rect of another node.
    fn absolute_rect_of(&self, node: NodeId) -> Result<Rect> {
        self.tree().absolute_rect(node)
    }

    /// Hit-test the current node, honoring ancestor clip regions.
    fn hit_test(&self, p: Point) -> bool {
        self.tree().hit_test(self.node_id(), p).unwrap_or(false)
    }

    /// Pure geometric containment test against another node's absolute rect.
    fn contains_of(&self, node: NodeId, p: Point) -> bool {
        self.tree().contains(node, p).unwrap_or(false)
    }

    /// Children of the current node in paint order.
    fn children(&self) -> Vec<NodeId> {
        self.node().children().to_vec()
    }

    /// Parent of the current node.
    fn parent(&self) -> Option<NodeId> {
        self.node().parent()
    }
}

/// Mutable context available to widgets during event handling and layout.
pub trait Context: ViewContext {
    /// Mutable access to the tree.
    fn tree_mut(&mut self) -> &mut Tree;

    /// Set the hover flag on the current node.
    fn set_hovered(&mut self, hovered: bool) {
        let id = self.node_id();
        if let Some(node) = self.tree_mut().nodes.get_mut(id) {
            node.hovered = hovered;
        }
    }

    /// Set the pressed flag on the current node.
    fn set_pressed(&mut self, pressed: bool) {
        let id = self.node_id();
        if let Some(node) = self.tree_mut().nodes.get_mut(id) {
            node.pressed = pressed;
        }
    }

    /// Show or hide the current node.
    fn set_visible(&mut self, visible: bool) {
        let id = self.node_id();
        self.tree_mut().set_visible(id, visible);
    }

    /// Show or hide another node.
    fn set_visible_of(&mut self, node: NodeId, visible: bool) {
        self.tree_mut().set_visible(node, visible);
    }

    /// Replace the current node's relative rect.
    ///
    /// The current widget is executing, so its own `on_layout` is not run;
    /// a widget that resizes itself re-runs its layout directly.
    fn set_rect(&mut self, rect: Rect) -> Result<()> {
        let id = self.node_id();
        self.tree_mut().apply_rect(id, rect)
    }

    /// Move the current node so its top-left lands on an absolute point.
    fn set_absolute_position(&mut self, p: Point) -> Result<()> {
        let id = self.node_id();
        self.tree_mut().set_absolute_position(id, p)
    }

    /// Replace another node's relative rect and run its layout hook.
    fn set_rect_of(&mut self, node: NodeId, rect: Rect) -> Result<()> {
        self.tree_mut().set_relative_rect(node, rect)
    }

    /// Set the preferred size hint of another node.
    fn set_preferred_size_of(&mut self, node: NodeId, size: Option<Expanse>) -> Result<()> {
        self.tree_mut().set_preferred_size(node, size)
    }

    /// Restrict painting and hit-testing of the current node's children to a
    /// rect relative to the node. `None` removes the restriction.
    fn set_clip(&mut self, clip: Option<Rect>) {
        let id = self.node_id();
        if let Some(node) = self.tree_mut().nodes.get_mut(id) {
            node.clip = clip;
        }
    }

    /// Create a detached node.
    fn create(&mut self, widget: Box<dyn Widget>) -> Result<NodeId> {
        self.tree_mut().add_boxed(widget)
    }

    /// Attach a detached node as the last child of the current node.
    fn attach(&mut self, child: NodeId) -> Result<()> {
        let id = self.node_id();
        self.tree_mut().attach(id, child)
    }

    /// Create a node and attach it as the last child of the current node.
    fn add_child(&mut self, widget: Box<dyn Widget>) -> Result<NodeId> {
        let child = self.create(widget)?;
        self.attach(child)?;
        Ok(child)
    }

    /// Remove a child subtree of the current node.
    fn remove_child(&mut self, child: NodeId) -> Result<()> {
        if self.node_of(child).and_then(Node::parent) != Some(self.node_id()) {
            return Err(Error::InvalidOperation(format!(
                "{child:?} is not a child of {:?}",
                self.node_id()
            )));
        }
        self.tree_mut().remove_subtree(child)
    }

    /// Deliver an event to a single node.
    fn dispatch(&mut self, node: NodeId, event: &PointerEvent) -> Result<EventOutcome> {
        self.tree_mut().dispatch_to(node, event)
    }

    /// Deliver an event to every child, topmost first. Claims if any child
    /// claimed.
    fn forward_all(&mut self, event: &PointerEvent) -> Result<EventOutcome> {
        let mut outcome = EventOutcome::Ignore;
        for child in self.children().into_iter().rev() {
            outcome = outcome.or(self.dispatch(child, event)?);
        }
        Ok(outcome)
    }

    /// Deliver an event to children, topmost first, stopping at the first
    /// child that claims it.
    fn forward_first(&mut self, event: &PointerEvent) -> Result<EventOutcome> {
        for child in self.children().into_iter().rev() {
            if self.dispatch(child, event)?.is_handled() {
                return Ok(EventOutcome::Handle);
            }
        }
        Ok(EventOutcome::Ignore)
    }
}

/// Mutable context over the tree for one node.
pub struct TreeContext<'a> {
    /// The tree.
    tree: &'a mut Tree,
    /// The executing node.
    id: NodeId,
}

impl<'a> TreeContext<'a> {
    /// Construct a context for `id`.
    pub(crate) fn new(tree: &'a mut Tree, id: NodeId) -> Self {
        Self { tree, id }
    }
}

impl ViewContext for TreeContext<'_> {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn tree(&self) -> &Tree {
        self.tree
    }
}

impl Context for TreeContext<'_> {
    fn tree_mut(&mut self) -> &mut Tree {
        self.tree
    }
}

/// Read-only context over the tree for one node.
pub struct TreeView<'a> {
    /// The tree.
    tree: &'a Tree,
    /// The executing node.
    id: NodeId,
}

impl<'a> TreeView<'a> {
    /// Construct a view context for `id`.
    pub(crate) fn new(tree: &'a Tree, id: NodeId) -> Self {
        Self { tree, id }
    }
}

impl ViewContext for TreeView<'_> {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn tree(&self) -> &Tree {
        self.tree
    }
}
