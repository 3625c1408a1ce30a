//! Browser update lifecycle.
//!
//! ```text
//!        UpdateFound / Reload            ControllerChanged
//!  Idle ────────────────────► UpdateAvailable ─────────────► Reloading
//!   ▲                                                            │
//!   └──────────────────────────── PageLoaded ────────────────────┘
//! ```
//!
//! `register.js` carries no transition logic of its own: it looks up
//! [`transition_table`], which is produced by running [`UpdateLifecycle::handle`]
//! over every state and event pair.

/// Page-side view of the service worker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpdateState {
    #[default]
    Idle,
    UpdateAvailable,
    Reloading,
}

impl UpdateState {
    pub const ALL: [Self; 3] = [Self::Idle, Self::UpdateAvailable, Self::Reloading];

    pub const fn js_name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::UpdateAvailable => "update-available",
            Self::Reloading => "reloading",
        }
    }
}

/// Signals observed from the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateEvent {
    /// `register()` rejected (unsupported runtime, insecure origin, ...).
    RegistrationFailed,
    /// A new worker finished installing while an old one controls the page.
    UpdateFound,
    /// The new worker took control of the page.
    ControllerChanged,
    /// A fresh document finished loading.
    PageLoaded,
}

impl UpdateEvent {
    pub const ALL: [Self; 4] = [
        Self::RegistrationFailed,
        Self::UpdateFound,
        Self::ControllerChanged,
        Self::PageLoaded,
    ];

    pub const fn js_name(self) -> &'static str {
        match self {
            Self::RegistrationFailed => "registration-failed",
            Self::UpdateFound => "update-found",
            Self::ControllerChanged => "controller-changed",
            Self::PageLoaded => "page-loaded",
        }
    }
}

/// What the page must do in response to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateAction {
    Reload,
}

/// The update state machine for one loaded page.
#[derive(Debug, Default)]
pub struct UpdateLifecycle {
    state: UpdateState,
}

impl UpdateLifecycle {
    pub const fn starting_at(state: UpdateState) -> Self {
        Self { state }
    }

    pub const fn state(&self) -> UpdateState {
        self.state
    }

    /// Feed one event. At most one `Reload` is produced per detected update;
    /// repeated signals while an update is pending are ignored.
    pub fn handle(&mut self, event: UpdateEvent) -> Option<UpdateAction> {
        use UpdateEvent as E;
        use UpdateState as S;

        match (self.state, event) {
            (_, E::RegistrationFailed) => None,
            (S::Idle, E::UpdateFound) => {
                self.state = S::UpdateAvailable;
                Some(UpdateAction::Reload)
            }
            (S::UpdateAvailable, E::ControllerChanged) => {
                self.state = S::Reloading;
                None
            }
            (S::Reloading, E::PageLoaded) => {
                self.state = S::Idle;
                None
            }
            _ => None,
        }
    }
}

/// One effective edge of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: UpdateState,
    pub event: UpdateEvent,
    pub to: UpdateState,
    pub reload: bool,
}

/// Every `(state, event)` pair that changes state or asks for a reload.
///
/// Pairs missing from the table are ignored by the page.
pub fn transition_table() -> Vec<Transition> {
    let mut table = Vec::new();
    for from in UpdateState::ALL {
        for event in UpdateEvent::ALL {
            let mut lifecycle = UpdateLifecycle::starting_at(from);
            let action = lifecycle.handle(event);
            let to = lifecycle.state();
            if to != from || action.is_some() {
                table.push(Transition {
                    from,
                    event,
                    to,
                    reload: action == Some(UpdateAction::Reload),
                });
            }
        }
    }
    table
}
