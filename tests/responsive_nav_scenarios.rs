//! End-to-end scenarios for the navigation state model: sibling
//! exclusivity, edge flipping and the mobile/desktop mode transition.

use nav_controller::prelude::*;

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Desktop navbar with one list of two dropdowns, each owning one
/// nested submenu.
fn desktop_nav() -> (NavModel, [MenuId; 2], [MenuId; 2]) {
    let mut nav = NavModel::new(1024.0);
    let a = nav.add_dropdown(Some(0));
    let b = nav.add_dropdown(Some(0));
    let a_sub = nav.add_nested(a).unwrap();
    let b_sub = nav.add_nested(b).unwrap();
    (nav, [a, b], [a_sub, b_sub])
}

#[test]
fn opening_a_sibling_dropdown_closes_the_other() {
    init_logs();
    let (mut nav, [a, b], _) = desktop_nav();

    assert!(nav.toggle(a).unwrap());
    assert!(nav.is_open(a).unwrap());

    assert!(nav.toggle(b).unwrap());
    assert!(!nav.is_open(a).unwrap());
    assert!(nav.is_open(b).unwrap());
}

#[test]
fn dropdowns_in_different_lists_do_not_compete() {
    let mut nav = NavModel::new(1024.0);
    let main = nav.add_dropdown(Some(0));
    let footer = nav.add_dropdown(Some(1));

    nav.toggle(main).unwrap();
    nav.toggle(footer).unwrap();

    assert!(nav.is_open(main).unwrap());
    assert!(nav.is_open(footer).unwrap());
}

#[test]
fn nested_exclusivity_is_scoped_to_the_parent_dropdown() {
    let (mut nav, _, [a_sub, b_sub]) = desktop_nav();

    nav.toggle(a_sub).unwrap();
    nav.toggle(b_sub).unwrap();

    // Different parents: both stay open.
    assert!(nav.is_open(a_sub).unwrap());
    assert!(nav.is_open(b_sub).unwrap());

    let mut nav = NavModel::new(1024.0);
    let dropdown = nav.add_dropdown(Some(0));
    let first = nav.add_nested(dropdown).unwrap();
    let second = nav.add_nested(dropdown).unwrap();

    nav.toggle(first).unwrap();
    nav.toggle(second).unwrap();

    // Same parent: the earlier one closes.
    assert!(!nav.is_open(first).unwrap());
    assert!(nav.is_open(second).unwrap());
}

#[test]
fn close_everything_is_idempotent() {
    let (mut nav, [a, _], [a_sub, _]) = desktop_nav();
    nav.toggle(a).unwrap();
    nav.toggle(a_sub).unwrap();
    nav.toggle_mobile();

    nav.close_everything();
    let once = nav.snapshot();
    nav.close_everything();
    assert_eq!(nav.snapshot(), once);

    assert!(!nav.mobile_open());
    assert!(nav.open_menus().is_empty());
}

#[test]
fn toggling_open_then_closed_restores_the_original_state() {
    let (mut nav, [a, _], _) = desktop_nav();
    let before = nav.snapshot();

    nav.toggle(a).unwrap();
    nav.toggle(a).unwrap();

    assert_eq!(nav.snapshot(), before);
}

#[test]
fn menu_near_the_right_viewport_edge_flips_left() {
    let (mut nav, [a, _], _) = desktop_nav();
    nav.toggle(a).unwrap();

    // 1010 > 1024 - 20: flip.
    nav.adjust_position(a, 1010.0).unwrap();
    assert_eq!(nav.alignment(a).unwrap(), Alignment::FlippedLeft);

    // Exactly at the buffer line: no flip.
    nav.adjust_position(a, 1004.0).unwrap();
    assert_eq!(nav.alignment(a).unwrap(), Alignment::Normal);
}

#[test]
fn resize_across_the_mode_boundary_closes_everything() {
    init_logs();
    let (mut nav, [a, _], _) = desktop_nav();
    nav.toggle(a).unwrap();

    assert_eq!(nav.handle_resize(600.0), ResizeEffect::Closed);
    assert!(!nav.is_open(a).unwrap());
    assert_eq!(nav.viewport_mode(), ViewportMode::Mobile);

    // The cached mode was updated: a second mobile-range resize is not
    // another transition.
    let effect = nav.handle_resize(500.0);
    assert_eq!(effect, ResizeEffect::Remeasure(Vec::new()));
}

#[test]
fn resize_within_a_mode_hands_back_open_menus_for_remeasurement() {
    let (mut nav, [a, _], [a_sub, _]) = desktop_nav();
    nav.toggle(a).unwrap();
    nav.toggle(a_sub).unwrap();
    nav.adjust_position(a, 1010.0).unwrap();

    let effect = nav.handle_resize(1400.0);
    assert_eq!(effect, ResizeEffect::Remeasure(vec![a, a_sub]));

    // Re-measurement on the wider viewport clears the flip.
    nav.adjust_position(a, 1010.0).unwrap();
    assert_eq!(nav.alignment(a).unwrap(), Alignment::Normal);
}

#[test]
fn escape_closes_mobile_menu_and_nested_menus_together() {
    let mut nav = NavModel::new(600.0);
    let dropdown = nav.add_dropdown(Some(0));
    let sub = nav.add_nested(dropdown).unwrap();

    nav.toggle_mobile();
    nav.toggle(dropdown).unwrap();
    nav.toggle(sub).unwrap();
    assert!(nav.mobile_open());
    assert!(nav.is_open(sub).unwrap());

    // Escape key path.
    nav.close_everything();

    assert!(!nav.mobile_open());
    assert!(!nav.is_open(dropdown).unwrap());
    assert!(!nav.is_open(sub).unwrap());
}

#[test]
fn snapshot_serializes_for_console_inspection() {
    let (mut nav, [a, _], _) = desktop_nav();
    nav.toggle(a).unwrap();
    nav.adjust_position(a, 1010.0).unwrap();

    let json = serde_json::to_value(nav.snapshot()).unwrap();
    assert_eq!(json["mode"], "desktop");
    assert_eq!(json["dropdowns"][0]["open"], true);
    assert_eq!(json["dropdowns"][0]["alignment"], "flipped-left");
}

#[test]
fn scenario_two_dropdowns_at_desktop_width() {
    let (mut nav, [a, b], _) = desktop_nav();

    nav.toggle(a).unwrap();
    assert!(nav.is_open(a).unwrap());

    nav.toggle(b).unwrap();
    assert!(!nav.is_open(a).unwrap());
    assert!(nav.is_open(b).unwrap());

    let snap = nav.snapshot();
    assert_eq!(snap.mode, ViewportMode::Desktop);
    assert!(!snap.dropdowns[0].open);
    assert!(snap.dropdowns[1].open);
}
