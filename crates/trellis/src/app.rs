//! Per-tick entry points for a host.

use tracing::debug;

use crate::{
    error::Result,
    event::Action,
    input::{InputRouter, PointerState},
    render::Surface,
    tree::Tree,
    widget::EventOutcome,
};

/// Host-side session state, passed to every tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Is the UI shown?
    pub visible: bool,
    /// Has the host been asked to shut down?
    pub exit_requested: bool,
    /// Number of updates run.
    pub tick: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            visible: true,
            exit_requested: false,
            tick: 0,
        }
    }
}

impl Session {
    /// A visible session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip visibility. Returns the new state.
    pub fn toggle_visible(&mut self) -> bool {
        self.visible = !self.visible;
        debug!(visible = self.visible, "session visibility toggled");
        self.visible
    }

    /// Ask the host to shut down.
    pub fn request_exit(&mut self) {
        debug!("exit requested");
        self.exit_requested = true;
    }
}

/// A widget tree plus the router that feeds it.
pub struct App {
    /// The widget tree.
    tree: Tree,
    /// Edge detector.
    router: InputRouter,
}

impl App {
    /// Build the tree once with `init`.
    pub fn new(init: impl FnOnce(&mut Tree) -> Result<()>) -> Result<Self> {
        let mut tree = Tree::new();
        init(&mut tree)?;
        Ok(Self {
            tree,
            router: InputRouter::new(),
        })
    }

    /// The widget tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Mutable access to the widget tree.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// Sample the pointer and dispatch the resulting events.
    ///
    /// The router samples even while hidden, so edges that happen while the
    /// UI is away never fire when it comes back. Hidden releases still reach
    /// the tree so drag, resize and slider captures end with the button.
    pub fn update(&mut self, session: &mut Session, state: PointerState) -> Result<EventOutcome> {
        session.tick += 1;
        if !session.visible {
            for event in self.router.poll(&state) {
                if event.action == Action::Up {
                    self.tree.dispatch(&event)?;
                }
            }
            return Ok(EventOutcome::Ignore);
        }
        self.router.route(&state, &mut self.tree)
    }

    /// Paint the tree if the session is visible.
    pub fn render(&mut self, session: &Session, surface: &mut dyn Surface) -> Result<()> {
        if session.visible {
            self.tree.render(surface)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        TypedId,
        backend::RecordingSurface,
        geom::{Point, Rect},
        widgets::{Checkbox, Menu},
    };

    #[test]
    fn hidden_session_drops_edges() -> Result<()> {
        let mut app = App::new(|tree| {
            let root = tree.root_id();
            let id = tree.add_child(root, Checkbox::new("c"))?;
            tree.set_relative_rect(id, Rect::new(0.0, 0.0, 50.0, 20.0))
        })?;
        let mut session = Session::new();
        let root = app.tree().root_id();
        let id: TypedId<Checkbox> = TypedId::new(app.tree().node(root).unwrap().children()[0]);

        session.toggle_visible();
        app.update(&mut session, PointerState::pressed((5.0, 5.0)))?;
        session.toggle_visible();
        app.update(&mut session, PointerState::at((5.0, 5.0)))?;
        assert_eq!(session.tick, 2);
        assert!(!app.tree().widget(id)?.is_checked());

        let mut s = RecordingSurface::new();
        session.toggle_visible();
        app.render(&session, &mut s)?;
        assert!(s.commands().is_empty());
        Ok(())
    }

    #[test]
    fn hidden_release_ends_drag() -> Result<()> {
        let mut app = App::new(|tree| {
            let root = tree.root_id();
            let menu = tree.add_child(root, Menu::new("m"))?;
            tree.set_relative_rect(menu, Rect::new(10.0, 10.0, 300.0, 200.0))
        })?;
        let root = app.tree().root_id();
        let menu: TypedId<Menu> = TypedId::new(app.tree().node(root).unwrap().children()[0]);
        let mut session = Session::new();

        app.update(&mut session, PointerState::pressed((25.0, 18.0)))?;
        assert!(app.tree().widget(menu)?.is_dragging());
        session.toggle_visible();
        app.update(&mut session, PointerState::at((25.0, 18.0)))?;
        assert!(!app.tree().widget(menu)?.is_dragging());
        session.toggle_visible();
        app.update(&mut session, PointerState::at((200.0, 150.0)))?;
        assert!(!app.tree().widget(menu)?.is_dragging());
        assert_eq!(app.tree().absolute_position(menu)?, Point::new(10.0, 10.0));
        Ok(())
    }

    #[test]
    fn exit() {
        let mut s = Session::new();
        assert!(!s.exit_requested);
        s.request_exit();
        assert!(s.exit_requested);
    }
}
