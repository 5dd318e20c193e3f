//! Single-pass extraction of limited reward tiers from a markup event stream.
//!
//! The scanner never builds a document tree. It keeps one [`ScanContext`]
//! value holding which blocks are open and what has been accumulated for the
//! current tier, and advances it one [`TagEvent`] at a time with [`step`].
use crate::markup::{Attributes, TagEvent};
use crate::record::{normalize_whitespace, parse_amount, RewardRecord, StatusTokens};

const REWARD_TAG: &str = "li";
const CONTROL_TAG: &str = "input";
const PARAGRAPH_TAG: &str = "p";

const REWARD_MARKER: &str = "reward";
const LIMITED_MARKER: &str = "disabled";
const REMAINING_MARKER: &str = "remaining";

/// Fields collected for the reward block currently being scanned.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PendingReward {
    pub status: StatusTokens,
    pub value: Option<f64>,
    pub id: Option<String>,
    pub remaining: String,
    pub description: String,
}

impl PendingReward {
    fn opened(status: StatusTokens) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Builds the record if the block turned out to be a real limited tier.
    fn into_record(self) -> Option<RewardRecord> {
        if self.remaining.is_empty() {
            return None;
        }
        Some(RewardRecord {
            value: self.value?,
            id: self.id?,
            status: self.status,
            remaining: self.remaining,
            description: normalize_whitespace(&self.description),
        })
    }
}

/// Scanner state between two events.
///
/// `reward` is `Some` while inside a qualifying list item; `nested_items`
/// counts list items opened inside it so the block closes on its own end tag.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanContext {
    pub reward: Option<PendingReward>,
    pub nested_items: usize,
    pub in_remaining: bool,
    pub in_description: bool,
}

impl ScanContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_reward_block(&self) -> bool {
        self.reward.is_some()
    }

    /// True when no block of any kind is open.
    pub fn is_outside(&self) -> bool {
        self.reward.is_none() && !self.in_remaining && !self.in_description
    }
}

/// Pure transition function: applies one event and returns any finished record.
pub fn step(mut ctx: ScanContext, event: &TagEvent) -> (ScanContext, Option<RewardRecord>) {
    let emitted = match event {
        TagEvent::Start { name, attrs } => {
            on_start(&mut ctx, name, attrs);
            None
        }
        TagEvent::End { name } => on_end(&mut ctx, name),
        TagEvent::Text(text) => {
            on_text(&mut ctx, text);
            None
        }
    };
    (ctx, emitted)
}

fn on_start(ctx: &mut ScanContext, name: &str, attrs: &Attributes) {
    let in_reward = ctx.in_reward_block();

    if in_reward && is_tag(name, REWARD_TAG) {
        ctx.nested_items += 1;
        return;
    }

    // A bare paragraph inside a tier is its description; this is the only
    // place where a missing class attribute matters.
    let Some(class) = attrs.class_tokens() else {
        if in_reward && is_tag(name, PARAGRAPH_TAG) {
            ctx.in_description = true;
        }
        return;
    };

    if let Some(pending) = ctx.reward.as_mut() {
        if is_tag(name, CONTROL_TAG) {
            if let Some(title) = attrs.get("title") {
                pending.value = parse_amount(title);
                pending.id = attrs.get("id").map(ToOwned::to_owned);
            }
        } else if is_tag(name, PARAGRAPH_TAG) && class.is_only(REMAINING_MARKER) {
            ctx.in_remaining = true;
        }
        return;
    }

    if is_tag(name, REWARD_TAG) && class.contains(REWARD_MARKER) && class.contains(LIMITED_MARKER)
    {
        ctx.reward = Some(PendingReward::opened(class));
        ctx.nested_items = 0;
    }
}

fn on_end(ctx: &mut ScanContext, name: &str) -> Option<RewardRecord> {
    if is_tag(name, PARAGRAPH_TAG) {
        ctx.in_remaining = false;
        ctx.in_description = false;
        return None;
    }

    if !is_tag(name, REWARD_TAG) || !ctx.in_reward_block() {
        return None;
    }
    if ctx.nested_items > 0 {
        ctx.nested_items -= 1;
        return None;
    }

    ctx.in_remaining = false;
    ctx.in_description = false;
    ctx.reward.take().and_then(PendingReward::into_record)
}

fn on_text(ctx: &mut ScanContext, text: &str) {
    let Some(pending) = ctx.reward.as_mut() else {
        return;
    };
    if ctx.in_remaining {
        pending.remaining.push_str(text);
    }
    if ctx.in_description {
        pending.description.push_str(text);
    }
}

fn is_tag(name: &str, expected: &str) -> bool {
    name.eq_ignore_ascii_case(expected)
}

/// Streaming wrapper around [`step`] for callers that feed events one by one.
#[derive(Debug, Default)]
pub struct TagScanner {
    ctx: ScanContext,
    records: Vec<RewardRecord>,
}

impl TagScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, event: &TagEvent) {
        let (ctx, emitted) = step(std::mem::take(&mut self.ctx), event);
        self.ctx = ctx;
        if let Some(record) = emitted {
            self.records.push(record);
        }
    }

    pub fn context(&self) -> &ScanContext {
        &self.ctx
    }

    /// Returns the records emitted so far. A block still open at this point is dropped.
    pub fn finish(self) -> Vec<RewardRecord> {
        self.records
    }
}

/// Scans a complete event sequence and returns the limited tiers in document order.
pub fn scan<'a, I>(events: I) -> Vec<RewardRecord>
where
    I: IntoIterator<Item = &'a TagEvent>,
{
    let mut scanner = TagScanner::new();
    for event in events {
        scanner.feed(event);
    }
    scanner.finish()
}
