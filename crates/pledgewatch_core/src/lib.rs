//! Pledgewatch core: reward scanning, tier tracking and the pure poll state machine.
mod effect;
mod markup;
mod msg;
mod page;
mod record;
pub mod scanner;
mod select;
mod state;
mod tracker;
mod update;

pub use effect::{Effect, ExitReason};
pub use markup::{Attribute, Attributes, TagEvent};
pub use msg::Msg;
pub use page::{pledge_page_url, UrlError};
pub use record::{normalize_whitespace, parse_amount, RewardRecord, StatusTokens};
pub use scanner::{scan, ScanContext, TagScanner};
pub use select::{
    apply_criteria, menu_lines, parse_amount_arg, parse_menu_choice, MenuError, Selection,
    SelectionCriteria,
};
pub use state::{Phase, WatchState};
pub use tracker::{find_record, TierChange, TierRemaining, TrackedTier, TrackingSet};
pub use update::update;
