//! Chat-bubble grouping for one loaded page.
//!
//! Each message gets a [`RenderGroup`]: whether a day separator goes before
//! it, and where it sits inside a run of consecutive messages from the same
//! author. Only the first message of a run shows the author/time header.
//!
//! Grouping never looks past the page it is given. The first message of a page
//! always starts a run, even when the previous page ended with the same author.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Message, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPosition {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderGroup {
    pub day_boundary: bool,
    pub run_position: RunPosition,
    pub show_meta: bool,
}

/// What counts as "the same author" when building runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthorIdentity {
    /// `(name, role)`; two different people on the same side start separate runs
    #[default]
    NameAndRole,
    /// Role only; any consecutive messages from the same side form one run
    RoleOnly,
}

impl AuthorIdentity {
    fn same_author(&self, a: &Message, b: &Message) -> bool {
        match self {
            AuthorIdentity::NameAndRole => a.author_key() == b.author_key(),
            AuthorIdentity::RoleOnly => a.author.role == b.author.role,
        }
    }
}

/// A day separator placed before `message_index`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayMarker {
    pub message_index: usize,
    pub date: NaiveDate,
}

/// Group a page using `(name, role)` identity
pub fn group(messages: &[Message]) -> Vec<RenderGroup> {
    group_with(messages, AuthorIdentity::NameAndRole)
}

pub fn group_with(messages: &[Message], identity: AuthorIdentity) -> Vec<RenderGroup> {
    messages
        .iter()
        .enumerate()
        .map(|(i, msg)| {
            let prev = i.checked_sub(1).map(|p| &messages[p]);
            let next = messages.get(i + 1);

            let day_boundary = prev.is_none_or(|p| p.day() != msg.day());
            let continues_prev = prev.is_some_and(|p| identity.same_author(p, msg));
            let continues_next = next.is_some_and(|n| identity.same_author(msg, n));

            let run_position = match (continues_prev, continues_next) {
                (false, _) => RunPosition::Start,
                (true, true) => RunPosition::Middle,
                (true, false) => RunPosition::End,
            };

            RenderGroup {
                day_boundary,
                run_position,
                show_meta: run_position == RunPosition::Start,
            }
        })
        .collect()
}

/// Day separators of a grouped page, in message order
pub fn day_markers(messages: &[Message], groups: &[RenderGroup]) -> Vec<DayMarker> {
    messages
        .iter()
        .zip(groups)
        .enumerate()
        .filter(|(_, (_, g))| g.day_boundary)
        .map(|(message_index, (msg, _))| DayMarker { message_index, date: msg.day() })
        .collect()
}

/// Side of the conversation a bubble is drawn on
pub fn is_outgoing(message: &Message) -> bool {
    message.author.role == Role::Me
}
