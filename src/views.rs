//! View state machine: a closed set of screens and the pure transition
//! function that gates the protected ones on session presence.

// ---------------------------------------------------------------------------
// View enum
// ---------------------------------------------------------------------------

/// Exactly one view is current at any time. `Control` and `Light` are the
/// protected screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Welcome,
    Register,
    Login,
    Control,
    Light,
}

impl View {
    pub fn from_str_loose(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "welcome" | "home" => Ok(View::Welcome),
            "register" => Ok(View::Register),
            "login" => Ok(View::Login),
            "control" | "dashboard" => Ok(View::Control),
            "light" => Ok(View::Light),
            _ => Err(format!("Unknown view: {}", s)),
        }
    }

    pub fn is_protected(&self) -> bool {
        matches!(self, View::Control | View::Light)
    }

    /// All views, in navigation order.
    pub const ALL: [View; 5] = [
        View::Welcome,
        View::Register,
        View::Login,
        View::Control,
        View::Light,
    ];
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            View::Welcome => write!(f, "welcome"),
            View::Register => write!(f, "register"),
            View::Login => write!(f, "login"),
            View::Control => write!(f, "control"),
            View::Light => write!(f, "light"),
        }
    }
}

// ---------------------------------------------------------------------------
// Transition function
// ---------------------------------------------------------------------------

/// Compute the view actually displayed for a navigation request.
///
/// Protected views requested without a session resolve to `Login`. With a
/// session, the pre-login screens resolve to `Control` — an authenticated
/// user's "home". Everything else resolves to itself.
pub fn resolve(requested: View, authenticated: bool) -> View {
    if !authenticated && requested.is_protected() {
        return View::Login;
    }
    if authenticated && matches!(requested, View::Welcome | View::Register | View::Login) {
        return View::Control;
    }
    requested
}

/// The view shown once at startup, from session presence alone.
pub fn initial(authenticated: bool) -> View {
    if authenticated {
        View::Control
    } else {
        View::Welcome
    }
}

// ---------------------------------------------------------------------------
// Navigation affordances
// ---------------------------------------------------------------------------

/// What the navigation chrome shows for the current transition: which link
/// is highlighted and whether the logout affordance is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavState {
    pub active: View,
    pub logout_visible: bool,
}

pub fn nav_state(current: View, authenticated: bool) -> NavState {
    NavState {
        active: current,
        logout_visible: authenticated,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(View::Control, View::Login)]
    #[case(View::Light, View::Login)]
    fn protected_views_resolve_to_login_without_session(
        #[case] requested: View,
        #[case] expected: View,
    ) {
        assert_eq!(resolve(requested, false), expected);
    }

    #[rstest]
    #[case(View::Welcome)]
    #[case(View::Register)]
    #[case(View::Login)]
    fn public_views_resolve_directly_without_session(#[case] requested: View) {
        assert_eq!(resolve(requested, false), requested);
    }

    #[rstest]
    #[case(View::Welcome)]
    #[case(View::Register)]
    #[case(View::Login)]
    fn pre_login_views_resolve_to_control_with_session(#[case] requested: View) {
        assert_eq!(resolve(requested, true), View::Control);
    }

    #[rstest]
    #[case(View::Control)]
    #[case(View::Light)]
    fn protected_views_resolve_directly_with_session(#[case] requested: View) {
        assert_eq!(resolve(requested, true), requested);
    }

    #[test]
    fn resolved_view_is_never_protected_without_session() {
        for view in View::ALL {
            assert!(
                !resolve(view, false).is_protected(),
                "{view} resolved to a protected view while unauthenticated"
            );
        }
    }

    #[test]
    fn initial_view_follows_session_presence() {
        assert_eq!(initial(false), View::Welcome);
        assert_eq!(initial(true), View::Control);
    }

    #[test]
    fn protected_flag_matches_view_set() {
        assert!(View::Control.is_protected());
        assert!(View::Light.is_protected());
        assert!(!View::Welcome.is_protected());
        assert!(!View::Register.is_protected());
        assert!(!View::Login.is_protected());
    }

    #[test]
    fn from_str_loose_round_trips_display() {
        for view in View::ALL {
            assert_eq!(View::from_str_loose(&view.to_string()).unwrap(), view);
        }
    }

    #[test]
    fn from_str_loose_accepts_aliases_and_case() {
        assert_eq!(View::from_str_loose("Dashboard").unwrap(), View::Control);
        assert_eq!(View::from_str_loose("HOME").unwrap(), View::Welcome);
        assert!(View::from_str_loose("settings").is_err());
    }

    #[test]
    fn nav_state_reflects_authentication() {
        let out = nav_state(View::Welcome, false);
        assert_eq!(out.active, View::Welcome);
        assert!(!out.logout_visible);

        let out = nav_state(View::Control, true);
        assert_eq!(out.active, View::Control);
        assert!(out.logout_visible);
    }
}
