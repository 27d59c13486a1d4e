//! External tests for the view state machine — transition gating, initial
//! view selection, and navigation affordances over the public API.

use device_console::views::{initial, nav_state, resolve, View};

// -- Transition gating ------------------------------------------------------

#[test]
fn test_control_requires_session() {
    assert_eq!(resolve(View::Control, false), View::Login);
}

#[test]
fn test_light_requires_session() {
    assert_eq!(resolve(View::Light, false), View::Login);
}

#[test]
fn test_unauthenticated_never_reaches_protected_views() {
    for view in View::ALL {
        assert!(!resolve(view, false).is_protected());
    }
}

#[test]
fn test_public_views_pass_through_without_session() {
    assert_eq!(resolve(View::Welcome, false), View::Welcome);
    assert_eq!(resolve(View::Register, false), View::Register);
    assert_eq!(resolve(View::Login, false), View::Login);
}

#[test]
fn test_authenticated_home_is_control() {
    assert_eq!(resolve(View::Welcome, true), View::Control);
    assert_eq!(resolve(View::Register, true), View::Control);
    assert_eq!(resolve(View::Login, true), View::Control);
}

#[test]
fn test_authenticated_protected_views_pass_through() {
    assert_eq!(resolve(View::Control, true), View::Control);
    assert_eq!(resolve(View::Light, true), View::Light);
}

#[test]
fn test_resolve_is_idempotent() {
    for view in View::ALL {
        for authenticated in [false, true] {
            let once = resolve(view, authenticated);
            assert_eq!(resolve(once, authenticated), once);
        }
    }
}

// -- Initial view -----------------------------------------------------------

#[test]
fn test_initial_view_without_session_is_welcome() {
    assert_eq!(initial(false), View::Welcome);
}

#[test]
fn test_initial_view_with_session_is_control() {
    assert_eq!(initial(true), View::Control);
}

// -- Navigation affordances -------------------------------------------------

#[test]
fn test_logout_affordance_tracks_session() {
    assert!(nav_state(View::Control, true).logout_visible);
    assert!(!nav_state(View::Welcome, false).logout_visible);
}

#[test]
fn test_active_link_matches_current_view() {
    for view in View::ALL {
        assert_eq!(nav_state(view, true).active, view);
    }
}

// -- View parsing and display -----------------------------------------------

#[test]
fn test_view_display_is_lowercase() {
    for view in View::ALL {
        let name = view.to_string();
        assert!(name.chars().all(|c| c.is_lowercase()));
    }
}

#[test]
fn test_view_parse_round_trip() {
    for view in View::ALL {
        assert_eq!(View::from_str_loose(&view.to_string()).unwrap(), view);
    }
}

#[test]
fn test_view_parse_dashboard_alias() {
    assert_eq!(View::from_str_loose("dashboard").unwrap(), View::Control);
}

#[test]
fn test_view_parse_unknown_is_err() {
    assert!(View::from_str_loose("garage").is_err());
}
