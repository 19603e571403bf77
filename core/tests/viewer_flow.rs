use folio_core::{
    clamp_zoom, fragment_for, fragment_shows_projects, touch_distance, Pager, Pinch, RenderSeq,
    ToggleState, ZOOM_MAX, ZOOM_MIN,
};

#[test]
fn walk_to_last_page_of_five() {
    let mut pager = Pager::new();
    pager.set_total(5);
    for _ in 0..4 {
        assert!(pager.next().is_some());
    }
    assert_eq!(pager.label(), "Page 5 of 5");
    assert!(!pager.can_next());
    assert!(pager.can_prev());
    // One more is a no-op.
    assert_eq!(pager.next(), None);
    assert_eq!(pager.current(), 5);
}

#[test]
fn superseding_navigation_wins_over_stale_completion() {
    let mut pager = Pager::new();
    let mut seq = RenderSeq::new();
    pager.set_total(5);

    // Navigate to page 2, render A starts.
    let page_a = pager.next().unwrap();
    let pass_a = seq.begin();

    // Before A completes, navigate to page 3; render B starts.
    let page_b = pager.next().unwrap();
    let pass_b = seq.begin();

    // B completes first and is applied; A's late completion is dropped.
    let mut displayed = None;
    if seq.finish(&pass_b) {
        displayed = Some(page_b);
    }
    if seq.finish(&pass_a) {
        displayed = Some(page_a);
    }
    assert_eq!(displayed, Some(3));
}

#[test]
fn pinch_zoom_funnels_through_clamp() {
    let pinch = Pinch::begin(touch_distance(30.0, 40.0), 1.0);
    // Raw ratio per the gesture, clamped at the application funnel.
    let raw = pinch.zoom_for(500.0);
    assert!((raw - 10.0).abs() < 1e-9);
    assert_eq!(clamp_zoom(raw), ZOOM_MAX);
    assert_eq!(clamp_zoom(pinch.zoom_for(1.0)), ZOOM_MIN);
}

#[test]
fn toggle_sequence_matches_last_direction() {
    let mut state = ToggleState::from_fragment("");
    state.show_projects();
    state.show_landing();
    state.show_projects();
    assert!(state.projects_visible());
    assert_eq!(fragment_for(state.projects_visible()), Some("projects"));

    state.show_landing();
    assert_eq!(fragment_for(state.projects_visible()), None);
}

#[test]
fn deep_link_restores_without_rewrite() {
    let hash = "#projects";
    let state = ToggleState::from_fragment(hash);
    assert!(state.projects_visible());
    // The fragment the state would write is the one already present,
    // so restoring from a deep link needs no URL update.
    assert!(fragment_shows_projects(hash));
    assert_eq!(fragment_for(true), Some("projects"));
}
