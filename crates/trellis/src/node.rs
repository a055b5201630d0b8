use crate::{
    geom::{Expanse, Rect},
    id::NodeId,
    widget::Widget,
};

/// Node data stored in the arena.
pub struct Node {
    /// Widget behavior and state. Empty while the widget is executing.
    pub(crate) widget: Option<Box<dyn Widget>>,
    /// Name reported by the widget at insertion.
    pub(crate) name: &'static str,

    /// Parent in the arena tree. Used for lookups only.
    pub(crate) parent: Option<NodeId>,
    /// Children in paint order, back to front.
    pub(crate) children: Vec<NodeId>,

    /// Rect relative to the parent's top-left corner.
    pub(crate) rect: Rect,
    /// Size hint used by layout in place of the actual size.
    pub(crate) preferred: Option<Expanse>,
    /// Region, relative to this node, that children are confined to.
    pub(crate) clip: Option<Rect>,

    /// Hidden nodes are neither painted nor dispatched to.
    pub(crate) visible: bool,
    /// Disabled nodes render but do not press.
    pub(crate) enabled: bool,
    /// Pointer is over the node.
    pub(crate) hovered: bool,
    /// Primary button went down over the node and has not been released.
    pub(crate) pressed: bool,
}

impl Node {
    /// Construct a detached node around a widget.
    pub(crate) fn new(widget: Box<dyn Widget>) -> Self {
        let name = widget.name();
        Self {
            widget: Some(widget),
            name,
            parent: None,
            children: Vec::new(),
            rect: Rect::zero(),
            preferred: None,
            clip: None,
            visible: true,
            enabled: true,
            hovered: false,
            pressed: false,
        }
    }

    /// Return the node's widget name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Return the node's parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Return the node's children.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Rect relative to the parent.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Relative left edge.
    pub fn x(&self) -> f32 {
        self.rect.left()
    }

    /// Relative top edge.
    pub fn y(&self) -> f32 {
        self.rect.top()
    }

    /// Width.
    pub fn width(&self) -> f32 {
        self.rect.w
    }

    /// Height.
    pub fn height(&self) -> f32 {
        self.rect.h
    }

    /// Preferred size hint, if one was set.
    pub fn preferred(&self) -> Option<Expanse> {
        self.preferred
    }

    /// The size used by layout: the preferred size if set, else the actual size.
    pub fn effective_size(&self) -> Expanse {
        self.preferred.unwrap_or_else(|| self.rect.size())
    }

    /// Child clip region relative to this node, if any.
    pub fn clip(&self) -> Option<Rect> {
        self.clip
    }

    /// Is the node visible?
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Is the node enabled?
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Is the pointer over the node?
    pub fn hovered(&self) -> bool {
        self.hovered
    }

    /// Is the node pressed?
    pub fn pressed(&self) -> bool {
        self.pressed
    }
}
