//! Voice-command routing for the TradePulse assistant.
//!
//! A continuous speech transcript is matched against an ordered command
//! table (exact and fuzzy patterns, first match wins) and the bound
//! action is dispatched against the navigation, toast and API seams.

pub mod dispatch;
pub mod error;
pub mod matcher;
pub mod router;
pub mod table;

pub use dispatch::{
    AutoTradeApi, BoxFuture, CaptureControl, CommandDispatcher, HelpSurface, Navigator,
};
pub use error::{VoiceError, VoiceResult};
pub use matcher::{normalize, similarity, CommandPattern, MatchMode};
pub use router::VoiceCommandRouter;
pub use table::{CommandDispatchTable, MatchedCommand, VoiceCommand};
