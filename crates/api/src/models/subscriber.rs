//! Newsletter subscriber domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use shopfront_core::{Email, SubscriberId};

/// A newsletter subscriber.
///
/// At most one subscriber exists per normalized email. Unsubscribing only
/// clears `is_active`; subscribing again reactivates the same record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subscriber {
    /// Store-assigned identifier.
    #[serde(rename = "_id")]
    pub id: SubscriberId,
    /// Normalized (trimmed, lowercased) email address.
    pub email: Email,
    /// When the subscriber first signed up.
    pub subscribed_at: DateTime<Utc>,
    /// Whether the subscriber currently receives the newsletter.
    pub is_active: bool,
}

/// Result of a subscribe request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscribeOutcome {
    /// A new subscriber record was inserted.
    Created(SubscriberId),
    /// The email was already active; nothing changed.
    AlreadySubscribed(SubscriberId),
    /// An inactive subscriber was switched back on.
    Reactivated(SubscriberId),
}

impl SubscribeOutcome {
    /// The subscriber this outcome refers to.
    #[must_use]
    pub const fn id(&self) -> &SubscriberId {
        match self {
            Self::Created(id) | Self::AlreadySubscribed(id) | Self::Reactivated(id) => id,
        }
    }

    /// Whether an inactive subscriber was reactivated.
    #[must_use]
    pub const fn reactivated(&self) -> bool {
        matches!(self, Self::Reactivated(_))
    }
}
