//! Voice-command targets.
//!
//! A matched voice command resolves to a `CommandAction`; the dispatcher in
//! `pulse-voice` executes it against the navigation, toast and API seams.

use serde::{Deserialize, Serialize};

/// Application routes reachable by voice navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Home,
    Analytics,
    Alerts,
    Broker,
    Portfolio,
    Market,
}

impl Route {
    /// Path of the route in the assistant SPA.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Analytics => "/analytics",
            Route::Alerts => "/alerts",
            Route::Broker => "/broker",
            Route::Portfolio => "/portfolio",
            Route::Market => "/market",
        }
    }
}

/// Effect bound to a voice-command pattern.
///
/// Parameterized commands (`CreateAlert`, `AnalyzeStock`) receive the
/// captured wildcard text separately at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandAction {
    /// Navigate to a fixed route and announce it.
    Navigate { route: Route, announcement: String },
    /// Stop the speech capture feed. Capture lifecycle is owned by the
    /// caller; this only signals.
    StopListening,
    /// Open the help affordance (decoupled surface, reached via a side
    /// channel rather than a direct call).
    OpenHelp,
    /// Open the alerts page pre-seeded with the captured symbol.
    CreateAlert,
    /// Open analytics for the captured symbol.
    AnalyzeStock,
    /// Toggle the first auto-trade configuration on or off.
    SetAutoTrade { enabled: bool },
    /// Navigate home and announce the auto-trade config form.
    CreateAutoTradeConfig,
}
