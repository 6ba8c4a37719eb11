//! Ordered command registry.
//!
//! The table is assembled once at session start from four groups in a
//! fixed order: navigation, system, trading shortcuts, auto-trade. The
//! order is load-bearing: patterns are tried in registration order and
//! the first satisfied match wins, so two patterns sharing a prefix
//! resolve to the earlier registration.

use pulse_core::{CommandAction, Route};
use tracing::debug;

use crate::matcher::{normalize, CommandPattern, MatchMode};

/// Default similarity threshold for fuzzy wildcard commands.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.7;

/// One pattern-to-action binding.
#[derive(Debug, Clone)]
pub struct VoiceCommand {
    pub pattern: CommandPattern,
    pub mode: MatchMode,
    pub action: CommandAction,
}

impl VoiceCommand {
    pub fn exact(pattern: &str, action: CommandAction) -> Self {
        Self {
            pattern: CommandPattern::parse(pattern),
            mode: MatchMode::Exact,
            action,
        }
    }

    pub fn fuzzy(pattern: &str, threshold: f64, action: CommandAction) -> Self {
        Self {
            pattern: CommandPattern::parse(pattern),
            mode: MatchMode::Fuzzy { threshold },
            action,
        }
    }
}

/// A satisfied match: the bound action plus any captured wildcard text.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedCommand {
    pub action: CommandAction,
    pub capture: Option<String>,
}

/// Ordered pattern registry.
pub struct CommandDispatchTable {
    commands: Vec<VoiceCommand>,
}

impl CommandDispatchTable {
    /// Build a table from an explicit ordered command list.
    pub fn new(commands: Vec<VoiceCommand>) -> Self {
        Self { commands }
    }

    /// The assistant's standard command set, groups concatenated in the
    /// fixed order: navigation, system, trading, auto-trade.
    pub fn standard(fuzzy_threshold: f64) -> Self {
        let mut commands = Vec::new();

        // Navigation
        commands.push(VoiceCommand::exact(
            "go to home",
            CommandAction::Navigate {
                route: Route::Home,
                announcement: "Going to home".to_string(),
            },
        ));
        commands.push(VoiceCommand::exact(
            "go to advanced analytics",
            CommandAction::Navigate {
                route: Route::Analytics,
                announcement: "Opening advanced analytics".to_string(),
            },
        ));
        commands.push(VoiceCommand::exact(
            "go to alerts",
            CommandAction::Navigate {
                route: Route::Alerts,
                announcement: "Opening alerts".to_string(),
            },
        ));
        commands.push(VoiceCommand::exact(
            "go to broker",
            CommandAction::Navigate {
                route: Route::Broker,
                announcement: "Opening broker connections".to_string(),
            },
        ));

        // System
        commands.push(VoiceCommand::exact(
            "stop listening",
            CommandAction::StopListening,
        ));
        commands.push(VoiceCommand::exact("help", CommandAction::OpenHelp));

        // Trading shortcuts
        commands.push(VoiceCommand::exact(
            "show my positions",
            CommandAction::Navigate {
                route: Route::Portfolio,
                announcement: "Showing your positions".to_string(),
            },
        ));
        commands.push(VoiceCommand::exact(
            "show market overview",
            CommandAction::Navigate {
                route: Route::Market,
                announcement: "Showing market overview".to_string(),
            },
        ));
        commands.push(VoiceCommand::fuzzy(
            "create alert for *",
            fuzzy_threshold,
            CommandAction::CreateAlert,
        ));
        commands.push(VoiceCommand::fuzzy(
            "analyze stock *",
            fuzzy_threshold,
            CommandAction::AnalyzeStock,
        ));

        // Auto-trade
        commands.push(VoiceCommand::exact(
            "enable auto trade",
            CommandAction::SetAutoTrade { enabled: true },
        ));
        commands.push(VoiceCommand::exact(
            "disable auto trade",
            CommandAction::SetAutoTrade { enabled: false },
        ));
        commands.push(VoiceCommand::exact(
            "create auto trade config",
            CommandAction::CreateAutoTradeConfig,
        ));

        Self { commands }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Match a raw transcript. First satisfied command wins; matching
    /// stops there.
    pub fn match_transcript(&self, transcript: &str) -> Option<MatchedCommand> {
        let normalized = normalize(transcript);
        if normalized.is_empty() {
            return None;
        }

        for command in &self.commands {
            if let Some(capture) = command.pattern.match_normalized(&normalized, command.mode) {
                debug!(?command.action, ?capture, "Voice command matched");
                return Some(MatchedCommand {
                    action: command.action.clone(),
                    capture,
                });
            }
        }
        None
    }
}

impl Default for CommandDispatchTable {
    fn default() -> Self {
        Self::standard(DEFAULT_FUZZY_THRESHOLD)
    }
}
