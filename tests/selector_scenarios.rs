use plant_area_selector_lib::{
    parse_event_script, process_layout_session, AreaSelector, Config, ImageLayout, PointerEvent,
    Rectangle, SelectorState, MIN_SELECTION_SIZE,
};

fn selector(width: f64, height: f64) -> AreaSelector {
    let mut selector = AreaSelector::new(MIN_SELECTION_SIZE);
    selector.load_image(ImageLayout::new(width, height));
    selector
}

fn drag(selector: &mut AreaSelector, from: (f64, f64), to: (f64, f64)) -> Option<Rectangle> {
    selector.press(from.0, from.1);
    selector.move_to(to.0, to.1);
    selector.release();
    selector.selection()
}

#[test]
fn drag_down_right_is_accepted() {
    let mut selector = selector(200.0, 200.0);
    let rect = drag(&mut selector, (50.0, 50.0), (100.0, 100.0));
    assert_eq!(rect, Some(Rectangle::new(50.0, 50.0, 50.0, 50.0)));
    assert!(selector.selection_state().visible);
}

#[test]
fn short_drag_is_rejected() {
    let mut selector = selector(200.0, 200.0);
    assert_eq!(drag(&mut selector, (50.0, 50.0), (55.0, 52.0)), None);
    assert!(!selector.selection_state().visible);
}

#[test]
fn drag_past_the_corner_is_clamped_and_accepted() {
    let mut selector = selector(200.0, 200.0);
    selector.press(190.0, 190.0);
    selector.move_to(250.0, 250.0);
    assert_eq!(selector.selection_state().rect, Rectangle::new(190.0, 190.0, 10.0, 10.0));

    selector.release();
    assert_eq!(selector.selection(), Some(Rectangle::new(190.0, 190.0, 10.0, 10.0)));
}

#[test]
fn drag_toward_the_origin_collapses_and_is_rejected() {
    let mut selector = selector(200.0, 200.0);
    selector.press(50.0, 50.0);
    selector.move_to(30.0, 30.0);
    assert_eq!(selector.selection_state().rect, Rectangle::new(50.0, 50.0, 0.0, 0.0));

    selector.release();
    assert_eq!(selector.selection(), None);
}

#[test]
fn every_press_inside_the_image_starts_empty() {
    let mut selector = selector(120.0, 80.0);
    for px in (0..=120).step_by(15) {
        for py in (0..=80).step_by(10) {
            selector.press(px as f64, py as f64);
            let state = selector.selection_state();
            assert!(state.visible);
            assert_eq!(state.rect, Rectangle::new(px as f64, py as f64, 0.0, 0.0));
        }
    }
}

#[test]
fn moves_never_leave_the_image() {
    let layout = ImageLayout::new(150.0, 90.0);
    let mut selector = AreaSelector::default();
    selector.load_image(layout);

    let presses = [(0.0, 0.0), (75.0, 45.0), (149.0, 89.0), (150.0, 90.0), (10.5, 80.25)];
    let moves = [
        (-50.0, -50.0),
        (0.0, 0.0),
        (30.0, 300.0),
        (300.0, 30.0),
        (149.9, 89.9),
        (1000.0, 1000.0),
        (75.0, 45.0),
    ];

    for &(px, py) in &presses {
        selector.press(px, py);
        for &(mx, my) in &moves {
            selector.move_to(mx, my);
            let rect = selector.selection_state().rect;
            assert!(rect.width >= 0.0 && rect.height >= 0.0);
            assert!(rect.fits_within(&layout), "{:?} escaped {:?}", rect, layout);
        }
    }
}

#[test]
fn repeating_the_last_move_changes_nothing() {
    let mut selector = selector(200.0, 200.0);
    selector.press(20.0, 30.0);
    selector.move_to(90.0, 120.0);
    let once = *selector.state();

    for _ in 0..5 {
        assert!(!selector.move_to(90.0, 120.0));
    }
    assert_eq!(*selector.state(), once);

    selector.release();
    assert_eq!(selector.selection(), Some(Rectangle::new(20.0, 30.0, 70.0, 90.0)));
}

#[test]
fn release_keeps_the_last_move_not_the_release_position() {
    let mut selector = selector(200.0, 200.0);
    selector.press(10.0, 10.0);
    selector.move_to(40.0, 60.0);
    selector.handle(&PointerEvent::release(190.0, 190.0));
    assert_eq!(selector.selection(), Some(Rectangle::new(10.0, 10.0, 30.0, 50.0)));
}

#[test]
fn thin_selections_are_rejected_on_either_axis() {
    let mut selector = selector(200.0, 200.0);
    assert_eq!(drag(&mut selector, (10.0, 10.0), (100.0, 19.0)), None);
    assert_eq!(drag(&mut selector, (10.0, 10.0), (19.0, 100.0)), None);
    assert!(drag(&mut selector, (10.0, 10.0), (20.0, 20.0)).is_some());
}

#[test]
fn new_image_clears_dragging_and_finalized_states() {
    let mut selector = selector(200.0, 200.0);

    selector.press(10.0, 10.0);
    selector.move_to(80.0, 80.0);
    selector.load_image(ImageLayout::new(300.0, 300.0));
    assert_eq!(*selector.state(), SelectorState::Idle);

    drag(&mut selector, (10.0, 10.0), (80.0, 80.0));
    selector.load_image(ImageLayout::new(300.0, 300.0));
    assert_eq!(selector.selection(), None);
}

#[test]
fn scripted_scenario_matches_live_events() {
    let steps = parse_event_script(
        "load 200 200\n\
         press 190 190\n\
         move 250 250\n\
         release\n",
    )
    .unwrap();

    let outcome = process_layout_session(&steps, &Config::default());
    assert_eq!(outcome.selection, Some(Rectangle::new(190.0, 190.0, 10.0, 10.0)));
}
