use trellis::{
    backend::{DrawCommand, RecordingSurface},
    config::{MenuColors, MenuConfig},
    geom::{Expanse, Point, Rect},
    node::Node,
    widgets::{Button, Label, Menu},
    *,
};

fn menu_tree(config: MenuConfig) -> Result<(Tree, TypedId<Menu>)> {
    let mut tree = Tree::new();
    let root = tree.root_id();
    let menu = tree.add_child(root, Menu::new("Panel").with_config(config))?;
    tree.set_relative_rect(menu, Rect::new(10.0, 10.0, 300.0, 200.0))?;
    Ok((tree, menu))
}

fn render(tree: &mut Tree) -> Result<RecordingSurface> {
    let mut s = RecordingSurface::new();
    tree.render(&mut s)?;
    Ok(s)
}

#[test]
fn menu_paint_order() -> Result<()> {
    let (mut tree, menu) = menu_tree(MenuConfig::default())?;
    let label = tree.add_child(menu, Label::new("body"))?;
    tree.set_relative_rect(label, Rect::new(0.0, 22.0, 100.0, 20.0))?;
    let s = render(&mut tree)?;
    let colors = MenuColors::default();
    let cmds = s.commands();

    assert_eq!(
        cmds[0],
        DrawCommand::Fill(Rect::new(10.0, 32.0, 300.0, 178.0), colors.background)
    );
    assert_eq!(
        cmds[1],
        DrawCommand::Fill(Rect::new(10.0, 10.0, 300.0, 22.0), colors.title_background)
    );
    assert_eq!(s.texts(), vec!["Panel", "×", "▾", "body"]);
    assert!(cmds.contains(&DrawCommand::Stroke(
        Rect::new(10.0, 10.0, 300.0, 200.0),
        colors.outline,
        1.0
    )));

    let push = cmds
        .iter()
        .position(|c| *c == DrawCommand::PushClip(Rect::new(10.0, 32.0, 300.0, 178.0)));
    let body = cmds
        .iter()
        .position(|c| matches!(c, DrawCommand::Text { text, .. } if text == "body"));
    let pop = cmds.iter().position(|c| *c == DrawCommand::PopClip);
    assert!(push < body && body < pop);
    assert_eq!(pop, Some(cmds.len() - 1));
    assert_eq!(s.clip_depth(), 0);
    Ok(())
}

#[test]
fn resize_strokes_stay_inside() -> Result<()> {
    let (mut tree, menu) = menu_tree(MenuConfig::default())?;
    let s = render(&mut tree)?;
    let outer = tree.absolute_rect(menu)?;
    let strokes: Vec<_> = s
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Line(seg, color, _) if *color == MenuColors::default().resize_handle => {
                Some(*seg)
            }
            _ => None,
        })
        .collect();
    assert_eq!(strokes.len(), 3);
    for seg in strokes {
        assert!(outer.contains_point(seg.a) && outer.contains_point(seg.b));
    }
    Ok(())
}

#[test]
fn collapsed_paints_chrome_only() -> Result<()> {
    let (mut tree, menu) = menu_tree(MenuConfig::default())?;
    let label = tree.add_child(menu, Label::new("body"))?;
    tree.set_relative_rect(label, Rect::new(0.0, 22.0, 100.0, 20.0))?;
    tree.with_widget(menu, |m, _| {
        m.set_collapsed(true);
        Ok(())
    })?;
    let s = render(&mut tree)?;
    assert_eq!(s.texts(), vec!["Panel", "×", "▸"]);
    assert!(s.commands().contains(&DrawCommand::Stroke(
        Rect::new(10.0, 10.0, 300.0, 22.0),
        MenuColors::default().outline,
        1.0
    )));
    assert!(!s.commands().iter().any(|c| matches!(c, DrawCommand::PushClip(_))));
    let background = MenuColors::default().background;
    assert!(!s
        .commands()
        .iter()
        .any(|c| matches!(c, DrawCommand::Fill(_, color) if *color == background)));
    Ok(())
}

#[test]
fn child_outside_clip_not_painted_or_hit() -> Result<()> {
    let (mut tree, menu) = menu_tree(MenuConfig::default())?;
    let button = tree.add_child(menu, Button::new("hidden"))?;
    tree.set_relative_rect(button, Rect::new(0.0, 0.0, 50.0, 20.0))?;

    let s = render(&mut tree)?;
    assert!(!s.contains_text("hidden"));

    let inside = Point::new(20.0, 15.0);
    assert!(tree.contains(button, inside)?);
    assert!(!tree.hit_test(button, inside)?);
    tree.pointer_move(inside)?;
    assert!(!tree.node(button).is_some_and(Node::hovered));
    Ok(())
}

#[test]
fn unclipped_menu_paints_overflow() -> Result<()> {
    let config = MenuConfig {
        clip: false,
        ..MenuConfig::default()
    };
    let (mut tree, menu) = menu_tree(config)?;
    let label = tree.add_child(menu, Label::new("overflow"))?;
    tree.set_relative_rect(label, Rect::new(0.0, 500.0, 50.0, 20.0))?;
    let s = render(&mut tree)?;
    assert!(s.contains_text("overflow"));
    assert!(tree.hit_test(label, Point::new(20.0, 515.0))?);
    Ok(())
}

#[test]
fn nested_clips_balance() -> Result<()> {
    let (mut tree, outer) = menu_tree(MenuConfig::default())?;
    let inner = tree.add_child(outer, Menu::new("Inner"))?;
    tree.set_relative_rect(inner, Rect::new(10.0, 30.0, 100.0, 100.0))?;
    let deep = tree.add_child(inner, Label::new("deep"))?;
    tree.set_relative_rect(deep, Rect::new(0.0, 40.0, 80.0, 20.0))?;
    tree.set_preferred_size(deep, Some(Expanse::new(10.0, 10.0)))?;

    let s = render(&mut tree)?;
    let pushes: Vec<_> = s
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::PushClip(r) => Some(*r),
            _ => None,
        })
        .collect();
    assert_eq!(
        pushes,
        vec![
            Rect::new(10.0, 32.0, 300.0, 178.0),
            Rect::new(20.0, 62.0, 100.0, 78.0),
        ]
    );
    let pops = s
        .commands()
        .iter()
        .filter(|c| **c == DrawCommand::PopClip)
        .count();
    assert_eq!(pops, 2);
    assert!(s.contains_text("deep"));
    assert_eq!(tree.effective_size(deep)?, Expanse::new(10.0, 10.0));
    Ok(())
}

#[test]
fn hidden_subtree_skipped() -> Result<()> {
    let (mut tree, menu) = menu_tree(MenuConfig::default())?;
    let label = tree.add_child(menu, Label::new("gone"))?;
    tree.set_relative_rect(label, Rect::new(0.0, 22.0, 100.0, 20.0))?;
    tree.set_visible(label, false);
    let s = render(&mut tree)?;
    assert!(!s.contains_text("gone"));
    Ok(())
}
