pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod session;
pub mod views;

use tracing::{debug, warn};

use api::{Action, DeviceApi, DeviceStatus, LogEntry};
use error::Error;
use render::{Flow, MessageSlot, Render, Severity};
use session::{KeyValueStore, SessionStore};
use views::{initial, nav_state, resolve, View};

// ---------------------------------------------------------------------------
// User-facing message strings
// ---------------------------------------------------------------------------

pub const MSG_REGISTER_REQUIRED: &str = "Device name and enroll ID are required.";
pub const MSG_REGISTER_OK: &str = "Device registered successfully.";
pub const MSG_REGISTER_FAILED: &str = "Could not register the device. Try again.";
pub const MSG_REGISTER_OFFLINE: &str = "Network error: could not reach the server.";

pub const MSG_LOGIN_REQUIRED: &str = "Enroll ID is required.";
pub const MSG_LOGIN_FAILED: &str = "Enroll ID not found.";
pub const MSG_LOGIN_OFFLINE: &str = "Connection failed. Try again.";

pub const MSG_SESSION_SAVE_FAILED: &str = "Logged in, but the session could not be saved.";

// ---------------------------------------------------------------------------
// Console — view/session state machine and device control flow
// ---------------------------------------------------------------------------

/// The application: session, remote API, current view, and the render
/// target they are projected into.
///
/// All work is driven by explicit calls (one per user event). Each flow
/// holds an in-flight flag so a duplicate submission is dropped while its
/// request is pending, and a generation counter lets a response that was
/// superseded by logout (or by a newer fetch) be discarded instead of
/// rendered.
pub struct Console<A: DeviceApi, S: KeyValueStore, R: Render> {
    api: A,
    session: SessionStore<S>,
    render: R,
    view: View,
    generation: u64,
    register_in_flight: bool,
    login_in_flight: bool,
    command_in_flight: bool,
}

impl<A: DeviceApi, S: KeyValueStore, R: Render> Console<A, S, R> {
    pub fn new(api: A, session: SessionStore<S>, render: R) -> Self {
        let view = initial(session.is_authenticated());
        Self {
            api,
            session,
            render,
            view,
            generation: 0,
            register_in_flight: false,
            login_in_flight: false,
            command_in_flight: false,
        }
    }

    pub fn current_view(&self) -> View {
        self.view
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Paint the initial view, chosen once from session presence.
    pub async fn startup(&mut self) {
        self.show();
        self.enter_view_effects(self.view).await;
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Resolve a navigation request against the session and switch views.
    /// Entering a protected view re-synchronizes it with remote state.
    pub async fn navigate(&mut self, requested: View) {
        let resolved = resolve(requested, self.session.is_authenticated());
        if resolved != requested {
            debug!(%requested, %resolved, "navigation redirected");
        }
        self.view = resolved;
        self.show();
        self.enter_view_effects(resolved).await;
    }

    fn show(&mut self) {
        let authenticated = self.session.is_authenticated();
        self.render
            .show_view(self.view, nav_state(self.view, authenticated));
    }

    async fn enter_view_effects(&mut self, view: View) {
        match view {
            View::Control => {
                self.render_identity();
                self.refresh_status().await;
                self.refresh_logs().await;
            }
            View::Light => {
                self.refresh_status().await;
            }
            _ => {}
        }
    }

    fn render_identity(&mut self) {
        let device_name = self.session.device_name();
        let enroll_id = self.session.enroll_id();
        self.render
            .identity(device_name.as_deref(), enroll_id.as_deref());
    }

    // -----------------------------------------------------------------------
    // Registration flow
    // -----------------------------------------------------------------------

    pub async fn submit_register(&mut self, device_name: &str, enroll_id: &str) {
        let device_name = device_name.trim();
        let enroll_id = enroll_id.trim();

        self.render.clear_message(MessageSlot::Register);

        if device_name.is_empty() || enroll_id.is_empty() {
            self.render
                .message(MessageSlot::Register, Severity::Error, MSG_REGISTER_REQUIRED);
            return;
        }

        if self.register_in_flight {
            debug!("register dropped: request already in flight");
            return;
        }
        self.register_in_flight = true;
        self.render.set_busy(Flow::Register, true);

        let result = self.api.register(device_name, enroll_id).await;
        match result {
            Ok(ack) => {
                let text = ack.message.as_deref().unwrap_or(MSG_REGISTER_OK);
                self.render
                    .message(MessageSlot::Register, Severity::Success, text);
                self.render.reset_register_form();
            }
            Err(err) => {
                self.flow_failure(MessageSlot::Register, err, MSG_REGISTER_FAILED, MSG_REGISTER_OFFLINE);
            }
        }

        self.register_in_flight = false;
        self.render.set_busy(Flow::Register, false);
    }

    // -----------------------------------------------------------------------
    // Login flow
    // -----------------------------------------------------------------------

    pub async fn submit_login(&mut self, enroll_id: &str) {
        let enroll_id = enroll_id.trim();

        self.render.clear_message(MessageSlot::Login);

        if enroll_id.is_empty() {
            self.render
                .message(MessageSlot::Login, Severity::Error, MSG_LOGIN_REQUIRED);
            return;
        }

        if self.login_in_flight {
            debug!("login dropped: request already in flight");
            return;
        }
        self.login_in_flight = true;
        self.render.set_busy(Flow::Login, true);

        let result = self.api.login(enroll_id).await;
        match result {
            Ok(ok) => {
                if let Err(err) = self.session.login(&ok.token, &ok.device_name, &ok.enroll_id) {
                    warn!(error = %err, "session write failed after login");
                    self.render
                        .message(MessageSlot::Login, Severity::Error, MSG_SESSION_SAVE_FAILED);
                } else {
                    self.navigate(View::Control).await;
                }
            }
            Err(err) => {
                self.flow_failure(MessageSlot::Login, err, MSG_LOGIN_FAILED, MSG_LOGIN_OFFLINE);
            }
        }

        self.login_in_flight = false;
        self.render.set_busy(Flow::Login, false);
    }

    // -----------------------------------------------------------------------
    // Device commands and refresh
    // -----------------------------------------------------------------------

    /// Issue an on/off command. Without a session this is a silent no-op;
    /// failures are diagnostic-logged only, since the control view has no
    /// message slot. A successful command re-reads status and logs.
    pub async fn command(&mut self, action: Action) {
        let Some(token) = self.session.token() else {
            debug!(%action, "command ignored: no session");
            return;
        };

        if self.command_in_flight {
            debug!(%action, "command dropped: request already in flight");
            return;
        }
        self.command_in_flight = true;
        self.render.set_busy(Flow::Command, true);

        let device_id = self.session.enroll_id().unwrap_or_default();
        let result = self.api.send_command(&token, action, &device_id).await;
        match result {
            Ok(()) => {
                self.refresh_status().await;
                self.refresh_logs().await;
            }
            Err(err) => {
                warn!(error = %err, %action, "device command failed");
            }
        }

        self.command_in_flight = false;
        self.render.set_busy(Flow::Command, false);
    }

    pub async fn refresh_status(&mut self) {
        let Some(token) = self.session.token() else {
            debug!("status refresh ignored: no session");
            return;
        };
        let generation = self.next_generation();
        let result = self.api.fetch_status(&token).await;
        self.apply_status(generation, result);
    }

    pub async fn refresh_logs(&mut self) {
        let Some(token) = self.session.token() else {
            debug!("log refresh ignored: no session");
            return;
        };
        let generation = self.next_generation();
        let result = self.api.fetch_logs(&token).await;
        self.apply_logs(generation, result);
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Render a fetched status unless it was superseded (by logout or a
    /// newer fetch) while in flight.
    fn apply_status(&mut self, generation: u64, result: error::Result<DeviceStatus>) {
        if generation != self.generation || !self.session.is_authenticated() {
            debug!(generation, current = self.generation, "stale status response discarded");
            return;
        }
        match result {
            Ok(status) => self.render.status(&status),
            Err(err) => warn!(error = %err, "status refresh failed"),
        }
    }

    /// Replace the displayed log table wholesale, unless superseded.
    fn apply_logs(&mut self, generation: u64, result: error::Result<Vec<LogEntry>>) {
        if generation != self.generation || !self.session.is_authenticated() {
            debug!(generation, current = self.generation, "stale log response discarded");
            return;
        }
        match result {
            Ok(entries) => self.render.logs(&entries),
            Err(err) => warn!(error = %err, "log refresh failed"),
        }
    }

    // -----------------------------------------------------------------------
    // Logout
    // -----------------------------------------------------------------------

    /// Destroy the session, supersede any in-flight responses, and return to
    /// the welcome view with the identity display cleared. Idempotent.
    pub async fn logout(&mut self) {
        if let Err(err) = self.session.logout() {
            warn!(error = %err, "session clear failed");
        }
        self.generation += 1;
        self.navigate(View::Welcome).await;
        self.render.identity(None, None);
    }

    // -----------------------------------------------------------------------
    // Failure → message mapping (taxonomy (b) and (c))
    // -----------------------------------------------------------------------

    fn flow_failure(
        &mut self,
        slot: MessageSlot,
        err: Error,
        rejected_fallback: &str,
        offline_text: &str,
    ) {
        warn!(error = %err, ?slot, "flow request failed");
        let text = if let Some(message) = err.server_message() {
            message.to_string()
        } else if err.is_connectivity() {
            offline_text.to_string()
        } else {
            rejected_fallback.to_string()
        };
        self.render.message(slot, Severity::Error, &text);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
