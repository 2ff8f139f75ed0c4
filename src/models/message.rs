use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Which side of the dialog a message came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[serde(rename = "self")]
    Me,
    Other,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Me => "self",
            Role::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vk_id: Option<u64>,
}

/// Attachment kinds produced by the exporter's taxonomy.
///
/// Anything the viewer does not recognise deserializes to [`AttachmentKind::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Photo,
    Video,
    VoiceMessage,
    AudioTrack,
    Sticker,
    Link,
    ForwardedMessages,
    WallPost,
    Gift,
    Call,
    Story,
    Playlist,
    Map,
    #[serde(other)]
    Unknown,
}

impl AttachmentKind {
    /// Short label used by the renderers
    pub fn label(&self) -> &'static str {
        match self {
            AttachmentKind::Photo => "photo",
            AttachmentKind::Video => "video",
            AttachmentKind::VoiceMessage => "voice message",
            AttachmentKind::AudioTrack => "audio",
            AttachmentKind::Sticker => "sticker",
            AttachmentKind::Link => "link",
            AttachmentKind::ForwardedMessages => "forwarded messages",
            AttachmentKind::WallPost => "wall post",
            AttachmentKind::Gift => "gift",
            AttachmentKind::Call => "call",
            AttachmentKind::Story => "story",
            AttachmentKind::Playlist => "playlist",
            AttachmentKind::Map => "map",
            AttachmentKind::Unknown => "attachment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    #[serde(default)]
    pub local_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(
        deserialize_with = "crate::parsers::deserializers::deserialize_datetime",
        serialize_with = "crate::parsers::deserializers::serialize_datetime"
    )]
    pub datetime: NaiveDateTime,
    pub author: Author,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_nullable_vec")]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub edited: bool,
}

impl Message {
    /// Calendar day of the message, as written by the exporter
    pub fn day(&self) -> NaiveDate {
        self.datetime.date()
    }

    /// Message text, or the empty string when absent
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Identity used for run grouping: `(name, role)`
    pub fn author_key(&self) -> (&str, Role) {
        (self.author.name.as_str(), self.author.role)
    }
}
