use proptest::prelude::*;
use trellis::{
    geom::{Point, Rect},
    input::{ButtonSet, InputRouter, PointerState},
    event::Button as PointerButton,
    widgets::{Checkbox, Label, Menu, Slider},
    *,
};

fn coord() -> impl Strategy<Value = f32> {
    (-200i32..600).prop_map(|v| v as f32)
}

fn sample() -> impl Strategy<Value = PointerState> {
    (coord(), coord(), any::<bool>()).prop_map(|(x, y, down)| PointerState {
        position: Point::new(x, y),
        buttons: ButtonSet::none().with(PointerButton::Left, down),
    })
}

fn menu_tree() -> Result<(Tree, TypedId<Menu>)> {
    let mut tree = Tree::new();
    let root = tree.root_id();
    let menu = tree.add_child(root, Menu::new("p"))?;
    tree.set_relative_rect(menu, Rect::new(10.0, 10.0, 300.0, 200.0))?;
    Ok((tree, menu))
}

proptest! {
    #[test]
    fn absolute_is_sum_of_offsets(offsets in prop::collection::vec((coord(), coord()), 1..8)) {
        let mut tree = Tree::new();
        let mut parent = tree.root_id();
        let mut expected = Point::zero();
        for (x, y) in offsets {
            let id = tree.add_child(parent, Label::new("n"))?.id();
            tree.set_relative_rect(id, Rect::new(x, y, 10.0, 10.0))?;
            expected = expected + Point::new(x, y);
            prop_assert_eq!(tree.absolute_position(id)?, expected);
            let parent_abs = tree.absolute_position(parent)?;
            prop_assert_eq!(tree.absolute_x(id)?, parent_abs.x + x);
            prop_assert_eq!(tree.absolute_y(id)?, parent_abs.y + y);
            parent = id;
        }
    }

    #[test]
    fn slider_value_in_bounds(
        min in -50i32..50,
        span in 0i32..200,
        step in 0u8..20,
        samples in prop::collection::vec(sample(), 1..40),
    ) {
        let (min, max) = (min as f32, (min + span) as f32);
        let mut tree = Tree::new();
        let root = tree.root_id();
        let slider = tree.add_child(root, Slider::new(min, max, min).with_step(step as f32))?;
        tree.set_relative_rect(slider, Rect::new(20.0, 20.0, 140.0, 40.0))?;
        let mut router = InputRouter::new();
        for s in samples {
            router.route(&s, &mut tree)?;
            let v = tree.widget(slider)?.value();
            prop_assert!(v >= min && v <= max, "{} outside [{}, {}]", v, min, max);
        }
    }

    #[test]
    fn capture_exclusive_and_released(samples in prop::collection::vec(sample(), 1..40)) {
        let (mut tree, menu) = menu_tree()?;
        let mut router = InputRouter::new();
        for s in samples {
            let was_down = router.previous().left;
            router.route(&s, &mut tree)?;
            let m = tree.widget(menu)?;
            prop_assert!(!(m.is_dragging() && m.is_resizing()));
            if was_down && !s.buttons.left {
                prop_assert!(!m.is_dragging() && !m.is_resizing());
            }
            if tree.node(menu).is_some_and(|n| !n.visible()) {
                break;
            }
        }
    }

    #[test]
    fn resize_never_below_floor(moves in prop::collection::vec((coord(), coord()), 1..20)) {
        let (mut tree, menu) = menu_tree()?;
        tree.pointer_down((309.0, 209.0))?;
        prop_assert!(tree.widget(menu)?.is_resizing());
        for (x, y) in moves {
            tree.pointer_move((x, y))?;
            let size = tree.node(menu).map(|n| n.rect().size()).unwrap_or_default();
            prop_assert!(size.w >= 50.0 && size.h >= 50.0);
        }
    }

    #[test]
    fn checkbox_flips_only_on_release_inside(
        down in (coord(), coord()),
        up in (coord(), coord()),
    ) {
        let mut tree = Tree::new();
        let root = tree.root_id();
        let bounds = Rect::new(0.0, 0.0, 100.0, 20.0);
        let cb = tree.add_child(root, Checkbox::new("c"))?;
        tree.set_relative_rect(cb, bounds)?;
        let (down, up) = (Point::new(down.0, down.1), Point::new(up.0, up.1));
        tree.pointer_down(down)?;
        tree.pointer_up(up)?;
        let expected = bounds.contains_point(down) && bounds.contains_point(up);
        prop_assert_eq!(tree.widget(cb)?.is_checked(), expected);
    }
}
