//! Command dispatch against the application's effect seams.
//!
//! The dispatcher is the only place voice commands touch the outside
//! world: navigation, transient toasts, the speech-capture switch and
//! the auto-trade REST endpoints. Every seam is a trait so tests inject
//! fakes and the binary injects the real implementations.

use std::pin::Pin;
use std::sync::Arc;

use parking_lot::RwLock;
use pulse_core::{AutoTradeConfig, CommandAction, Route};
use pulse_notify::{Toast, ToastSink};
use tracing::{debug, warn};

use crate::error::VoiceResult;

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Navigation seam: routes the SPA to a page.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Speech-capture switch. The capture lifecycle is owned elsewhere; the
/// dispatcher only signals it to stop.
pub trait CaptureControl: Send + Sync {
    fn stop(&self);
}

/// Help affordance. Registered late because the help surface is a
/// decoupled component; commands reach it through this side channel,
/// never through a direct call.
pub trait HelpSurface: Send + Sync {
    fn open(&self);
}

/// Auto-trade configuration endpoints.
pub trait AutoTradeApi: Send + Sync {
    fn list_configs(&self) -> BoxFuture<'_, VoiceResult<Vec<AutoTradeConfig>>>;
    fn toggle_config(&self, id: i64, enabled: bool) -> BoxFuture<'_, VoiceResult<()>>;
}

/// Executes matched command actions.
pub struct CommandDispatcher {
    navigator: Arc<dyn Navigator>,
    toasts: Arc<dyn ToastSink>,
    auto_trade: Arc<dyn AutoTradeApi>,
    capture: Arc<dyn CaptureControl>,
    help: RwLock<Option<Arc<dyn HelpSurface>>>,
}

impl CommandDispatcher {
    pub fn new(
        navigator: Arc<dyn Navigator>,
        toasts: Arc<dyn ToastSink>,
        auto_trade: Arc<dyn AutoTradeApi>,
        capture: Arc<dyn CaptureControl>,
    ) -> Self {
        Self {
            navigator,
            toasts,
            auto_trade,
            capture,
            help: RwLock::new(None),
        }
    }

    /// Register the help surface once it exists.
    pub fn register_help_surface(&self, surface: Arc<dyn HelpSurface>) {
        *self.help.write() = Some(surface);
    }

    /// Execute one action. Failures surface as toasts and log lines;
    /// nothing propagates out of dispatch.
    pub async fn dispatch(&self, action: CommandAction, capture: Option<String>) {
        match action {
            CommandAction::Navigate {
                route,
                announcement,
            } => {
                self.navigator.navigate(route);
                self.toasts.toast(Toast::info("Navigation", announcement));
            }

            CommandAction::StopListening => {
                self.capture.stop();
                self.toasts.toast(Toast::info("Voice", "Stopped listening"));
            }

            CommandAction::OpenHelp => {
                let surface = self.help.read().clone();
                match surface {
                    Some(surface) => surface.open(),
                    None => debug!("Help surface not registered, command ignored"),
                }
            }

            CommandAction::CreateAlert => {
                let Some(symbol) = capture else {
                    warn!("Create-alert command matched without a symbol capture");
                    return;
                };
                let symbol = symbol.to_uppercase();
                self.navigator.navigate(Route::Alerts);
                self.toasts
                    .toast(Toast::info("Alerts", format!("Creating alert for {symbol}")));
            }

            CommandAction::AnalyzeStock => {
                let Some(symbol) = capture else {
                    warn!("Analyze-stock command matched without a symbol capture");
                    return;
                };
                let symbol = symbol.to_uppercase();
                self.navigator.navigate(Route::Analytics);
                self.toasts
                    .toast(Toast::info("Analytics", format!("Analyzing {symbol}")));
            }

            CommandAction::SetAutoTrade { enabled } => {
                self.set_auto_trade(enabled).await;
            }

            CommandAction::CreateAutoTradeConfig => {
                self.navigator.navigate(Route::Home);
                self.toasts.toast(Toast::info(
                    "Auto trade",
                    "Opening auto-trade configuration form",
                ));
            }
        }
    }

    /// Toggle the first configuration in server order.
    ///
    /// Deliberately not symbol-aware: the voice command addresses "auto
    /// trade" as a whole and the server decides ordering.
    async fn set_auto_trade(&self, enabled: bool) {
        let verb = if enabled { "enable" } else { "disable" };

        let configs = match self.auto_trade.list_configs().await {
            Ok(configs) => configs,
            Err(e) => {
                warn!(error = %e, "Auto-trade config listing failed");
                self.toasts.toast(Toast::error(
                    "Auto trade",
                    format!("Failed to {verb} auto trading"),
                ));
                return;
            }
        };

        let Some(first) = configs.first() else {
            self.toasts.toast(Toast::info(
                "Auto trade",
                "No auto-trade configurations found",
            ));
            return;
        };

        match self.auto_trade.toggle_config(first.id, enabled).await {
            Ok(()) => {
                let state = if enabled { "enabled" } else { "disabled" };
                self.toasts
                    .toast(Toast::success("Auto trade", format!("Auto trading {state}")));
            }
            Err(e) => {
                warn!(error = %e, config_id = first.id, "Auto-trade toggle failed");
                self.toasts.toast(Toast::error(
                    "Auto trade",
                    format!("Failed to {verb} auto trading"),
                ));
            }
        }
    }
}
