//! End-to-end behaviour of the selection screen through the public API.

use std::collections::BTreeMap;

use skiphire::app::{CloseToken, SelectionPhase};
use skiphire::ui::BodyState;
use skiphire::{handle_event, initialize, Action, AppState, Config, Event, SkipHireError};

const ENDPOINT: &str = "https://api.example/skips";

fn fallback_screen() -> AppState {
    initialize(&Config::default())
}

fn live_screen() -> (AppState, u64) {
    let config = Config {
        endpoint: Some(ENDPOINT.to_string()),
        ..Config::default()
    };
    let mut state = initialize(&config);
    let (_, actions) = handle_event(&mut state, &Event::EndpointChanged(Some(ENDPOINT.to_string()))).unwrap();
    let request_id = match actions.as_slice() {
        [Action::FetchOfferings(request)] => request.id,
        other => panic!("expected one fetch, got {other:?}"),
    };
    (state, request_id)
}

fn respond(state: &mut AppState, request_id: u64, status: u16, body: &str) -> bool {
    let event = Event::OfferingsResponse {
        request_id,
        status,
        has_headers: true,
        body: body.as_bytes().to_vec(),
    };
    handle_event(state, &event).unwrap().0
}

fn visible_sizes(state: &AppState) -> Vec<u32> {
    state.visible_offerings.iter().map(|o| o.size).collect()
}

fn scheduled_token(actions: &[Action]) -> CloseToken {
    match actions {
        [Action::ScheduleClose { token, .. }] => *token,
        other => panic!("expected a scheduled close, got {other:?}"),
    }
}

#[test]
fn select_unselect_and_close_cycle() {
    let mut state = fallback_screen();
    assert_eq!(state.selection.phase(), SelectionPhase::None);
    assert!(state.compute_viewmodel(40, 120).summary.is_none());

    handle_event(&mut state, &Event::Select(2)).unwrap();
    assert_eq!(state.selection.selected_id(), Some(2));
    let summary = state.compute_viewmodel(40, 120).summary.unwrap();
    assert_eq!(summary.title, "6 Yard Skip");
    assert!(!summary.closing);

    let (_, actions) = handle_event(&mut state, &Event::Unselect).unwrap();
    let token = scheduled_token(&actions);
    assert_eq!(state.selection.phase(), SelectionPhase::Closing);
    assert!(state.compute_viewmodel(40, 120).summary.unwrap().closing);

    let (render, _) = handle_event(&mut state, &Event::CloseTimerFired(token)).unwrap();
    assert!(render);
    assert_eq!(state.selection.phase(), SelectionPhase::None);
    assert!(state.compute_viewmodel(40, 120).summary.is_none());
}

#[test]
fn continue_hands_off_only_with_a_selection() {
    let mut state = fallback_screen();
    let (_, actions) = handle_event(&mut state, &Event::Continue).unwrap();
    assert!(actions.is_empty());

    handle_event(&mut state, &Event::Select(3)).unwrap();
    let (_, actions) = handle_event(&mut state, &Event::Continue).unwrap();
    match actions.as_slice() {
        [Action::Continue(handoff)] => {
            assert_eq!(handoff.offering_id, 3);
            assert_eq!(handoff.size, 8);
            assert_eq!(handoff.display_price, 354);
        }
        other => panic!("expected a hand-off, got {other:?}"),
    }
}

#[test]
fn search_and_road_filter_narrow_the_fallback_list() {
    let mut state = fallback_screen();

    handle_event(&mut state, &Event::SearchChanged("1".to_string())).unwrap();
    assert_eq!(visible_sizes(&state), vec![10, 12]);

    handle_event(&mut state, &Event::SearchChanged(String::new())).unwrap();
    handle_event(&mut state, &Event::AllowedOnRoadChanged(true)).unwrap();
    assert_eq!(visible_sizes(&state), vec![4, 6, 8]);

    handle_event(&mut state, &Event::SearchChanged("1".to_string())).unwrap();
    assert!(state.visible_offerings.is_empty());
    match state.compute_viewmodel(40, 120).body {
        BodyState::Empty(empty) => assert_eq!(empty.message, "No skips match your filters"),
        other => panic!("expected empty state, got {other:?}"),
    }
}

#[test]
fn filtered_out_selection_stays_selected() {
    let mut state = fallback_screen();
    handle_event(&mut state, &Event::Select(5)).unwrap();
    handle_event(&mut state, &Event::AllowedOnRoadChanged(true)).unwrap();

    assert_eq!(state.selection.selected_id(), Some(5));
    assert!(state.compute_viewmodel(40, 120).summary.is_some());
}

#[test]
fn server_error_is_shown_with_retry() {
    let (mut state, request_id) = live_screen();
    assert!(state.fetch.is_loading());
    assert!(matches!(state.compute_viewmodel(40, 120).body, BodyState::Loading));

    assert!(respond(&mut state, request_id, 500, ""));
    assert!(!state.fetch.is_loading());
    assert!(state.fetch.data().is_empty());
    assert_eq!(state.fetch.error(), Some("HTTP error! status: 500"));

    match state.compute_viewmodel(40, 120).body {
        BodyState::Error(info) => assert_eq!(info.message, "HTTP error! status: 500"),
        other => panic!("expected error body, got {other:?}"),
    }

    let (_, actions) = handle_event(&mut state, &Event::Retry).unwrap();
    assert!(matches!(actions.as_slice(), [Action::FetchOfferings(_)]));
    assert!(state.fetch.is_loading());
    assert!(state.fetch.error().is_none());
}

#[test]
fn transport_failure_is_reported() {
    let (mut state, request_id) = live_screen();
    let event = Event::OfferingsResponse {
        request_id,
        status: 400,
        has_headers: false,
        body: b"connection refused".to_vec(),
    };
    handle_event(&mut state, &event).unwrap();

    let expected = SkipHireError::Transport("connection refused".to_string()).to_string();
    assert_eq!(state.fetch.error(), Some(expected.as_str()));
}

#[test]
fn live_offerings_replace_the_fallback_in_order() {
    let (mut state, request_id) = live_screen();
    let body = r#"[
        {"id": 17, "size": 20, "hire_period_days": 14, "price_before_vat": 500, "vat": 20},
        {"id": 11, "size": 6, "hire_period_days": 7, "price_before_vat": 250, "vat": 20}
    ]"#;

    assert!(respond(&mut state, request_id, 200, body));
    let ids: Vec<u64> = state.fetch.data().iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![17, 11]);
    assert_eq!(visible_sizes(&state), vec![20, 6]);
    assert!(state.compute_viewmodel(40, 120).notices.is_empty());
}

#[test]
fn empty_live_list_shows_empty_state() {
    let (mut state, request_id) = live_screen();
    respond(&mut state, request_id, 200, "[]");

    match state.compute_viewmodel(40, 120).body {
        BodyState::Empty(empty) => assert_eq!(empty.message, "No skips available"),
        other => panic!("expected empty state, got {other:?}"),
    }
}

#[test]
fn selection_missing_from_new_data_is_cleared() {
    let (mut state, request_id) = live_screen();
    let first = r#"[{"id": 11, "size": 6, "hire_period_days": 7, "price_before_vat": 250, "vat": 20}]"#;
    respond(&mut state, request_id, 200, first);
    handle_event(&mut state, &Event::Select(11)).unwrap();

    let (_, actions) = handle_event(&mut state, &Event::Retry).unwrap();
    let retry_id = match actions.as_slice() {
        [Action::FetchOfferings(request)] => request.id,
        other => panic!("expected a fetch, got {other:?}"),
    };
    let second = r#"[{"id": 12, "size": 8, "hire_period_days": 7, "price_before_vat": 300, "vat": 20}]"#;
    respond(&mut state, retry_id, 200, second);

    assert_eq!(state.selection.phase(), SelectionPhase::None);
    assert!(state.compute_viewmodel(40, 120).summary.is_none());
}

#[test]
fn stale_response_is_ignored() {
    let (mut state, first_id) = live_screen();
    let moved = "https://api.example/v2/skips".to_string();
    let (_, actions) = handle_event(&mut state, &Event::EndpointChanged(Some(moved))).unwrap();
    let second_id = match actions.as_slice() {
        [Action::FetchOfferings(request)] => request.id,
        other => panic!("expected a fetch, got {other:?}"),
    };
    assert_ne!(first_id, second_id);

    let body = r#"[{"id": 11, "size": 6, "hire_period_days": 7, "price_before_vat": 250, "vat": 20}]"#;
    assert!(!respond(&mut state, first_id, 200, body));
    assert!(state.fetch.is_loading());
    assert!(state.fetch.data().is_empty());
}

#[test]
fn stale_close_timer_does_not_clear_a_new_selection() {
    let mut state = fallback_screen();
    handle_event(&mut state, &Event::Select(1)).unwrap();
    let (_, actions) = handle_event(&mut state, &Event::Unselect).unwrap();
    let stale = scheduled_token(&actions);

    handle_event(&mut state, &Event::Select(4)).unwrap();
    let (render, _) = handle_event(&mut state, &Event::CloseTimerFired(stale)).unwrap();

    assert!(!render);
    assert_eq!(state.selection.selected_id(), Some(4));
}

#[test]
fn events_after_teardown_are_ignored() {
    let mut state = fallback_screen();
    handle_event(&mut state, &Event::Select(2)).unwrap();
    let (_, actions) = handle_event(&mut state, &Event::Unselect).unwrap();
    let token = scheduled_token(&actions);

    handle_event(&mut state, &Event::Teardown).unwrap();
    assert_eq!(state.selection.phase(), SelectionPhase::None);

    for event in [
        Event::CloseTimerFired(token),
        Event::Select(3),
        Event::SearchChanged("8".to_string()),
        Event::Retry,
    ] {
        let (render, actions) = handle_event(&mut state, &event).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }
    assert_eq!(state.selection.phase(), SelectionPhase::None);
    assert!(state.filters.search.is_empty());
}

#[test]
fn close_focus_tears_down_and_closes() {
    let mut state = fallback_screen();
    let (_, actions) = handle_event(&mut state, &Event::CloseFocus).unwrap();
    assert_eq!(actions, vec![Action::CloseFocus]);
    assert!(state.torn_down);
}

#[test]
fn unknown_step_is_reported_and_defaults_apply() {
    let mut map = BTreeMap::new();
    map.insert("steps".to_string(), "postcode,teleport".to_string());
    map.insert("endpoint".to_string(), ENDPOINT.to_string());

    assert!(matches!(Config::from_zellij(&map), Err(SkipHireError::Config(_))));

    let (config, error) = Config::from_zellij_or_defaults(&map);
    assert!(error.is_some());
    assert_eq!(config.endpoint.as_deref(), Some(ENDPOINT));
    assert_eq!(config.steps.len(), 6);
}

#[test]
fn selecting_an_unlisted_offering_leaves_nothing_selected() {
    let mut state = fallback_screen();
    let (render, _) = handle_event(&mut state, &Event::Select(99)).unwrap();

    assert!(!render);
    assert_eq!(state.selection.phase(), SelectionPhase::None);
    assert!(state.compute_viewmodel(40, 120).summary.is_none());
}

#[test]
fn denied_network_access_is_shown_as_retryable_error() {
    let config = Config {
        endpoint: Some(ENDPOINT.to_string()),
        ..Config::default()
    };
    let mut state = initialize(&config);
    handle_event(&mut state, &Event::NetworkUnavailable("network access was denied".to_string())).unwrap();

    match state.compute_viewmodel(40, 120).body {
        BodyState::Error(info) => {
            assert_eq!(info.message, "Failed to fetch skip data: network access was denied");
            assert_eq!(info.retry_hint, "Press R to try again");
        }
        other => panic!("expected error body, got {other:?}"),
    }
    assert!(state.compute_viewmodel(40, 120).footer.keybindings.contains("R: retry"));

    let (_, actions) = handle_event(&mut state, &Event::Retry).unwrap();
    assert_eq!(actions, vec![Action::RequestNetworkAccess]);
}
