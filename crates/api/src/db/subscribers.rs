//! Subscriber repository for newsletter operations.
//!
//! Subscribers are keyed by normalized email. Unsubscribing flips `is_active`
//! rather than deleting, so a later subscribe reactivates the same document.

use chrono::{DateTime, Utc};
use mongodb::bson::{self, Document, doc};

use shopfront_core::{Email, SubscriberId};

use super::{DocumentStore, RepositoryError, SUBSCRIBERS, StoreError};
use crate::models::{SubscribeOutcome, Subscriber};

/// Repository for newsletter subscriber operations.
pub struct SubscriberRepository<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> SubscriberRepository<'a> {
    /// Create a new subscriber repository.
    #[must_use]
    pub const fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Get a subscriber by email, active or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored document is invalid.
    pub async fn find_by_email(&self, email: &Email) -> Result<Option<Subscriber>, RepositoryError> {
        self.store
            .find_one(SUBSCRIBERS, doc! { "email": email.as_str() })
            .await?
            .as_ref()
            .map(subscriber_from_document)
            .transpose()
    }

    /// Subscribe an email, creating or reactivating its record.
    ///
    /// - Active subscriber: nothing changes, `AlreadySubscribed`
    /// - Inactive subscriber: `is_active` is set again, `Reactivated`
    /// - Unknown email: a new active subscriber is inserted, `Created`
    ///
    /// Losing an insert race against a concurrent subscribe for the same
    /// email resolves to `AlreadySubscribed`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the store fails.
    pub async fn subscribe(&self, email: &Email) -> Result<SubscribeOutcome, RepositoryError> {
        if let Some(existing) = self.find_by_email(email).await? {
            if existing.is_active {
                return Ok(SubscribeOutcome::AlreadySubscribed(existing.id));
            }

            self.set_active(email, true).await?;
            tracing::info!(subscriber_id = %existing.id, "Subscriber reactivated");
            return Ok(SubscribeOutcome::Reactivated(existing.id));
        }

        let document = doc! {
            "email": email.as_str(),
            "subscribed_at": bson::DateTime::from_millis(Utc::now().timestamp_millis()),
            "is_active": true,
        };

        match self.store.insert_one(SUBSCRIBERS, document).await {
            Ok(id) => Ok(SubscribeOutcome::Created(SubscriberId::new(id.to_hex()))),
            Err(StoreError::DuplicateKey(key)) => {
                tracing::debug!(%key, "Concurrent subscribe detected");
                let existing = self
                    .find_by_email(email)
                    .await?
                    .ok_or(RepositoryError::NotFound)?;
                Ok(SubscribeOutcome::AlreadySubscribed(existing.id))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Deactivate a subscriber.
    ///
    /// Returns `false` if no subscriber has this email. Unsubscribing an
    /// already inactive subscriber succeeds: the result reports whether a
    /// document matched, not whether it was modified, so a repeated
    /// unsubscribe is not mistaken for an unknown email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the update fails.
    pub async fn unsubscribe(&self, email: &Email) -> Result<bool, RepositoryError> {
        self.set_active(email, false).await
    }

    /// List subscribers that currently receive the newsletter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored document is invalid.
    pub async fn list_active(&self) -> Result<Vec<Subscriber>, RepositoryError> {
        let documents = self
            .store
            .find(SUBSCRIBERS, doc! { "is_active": true })
            .await?;
        documents.iter().map(subscriber_from_document).collect()
    }

    async fn set_active(&self, email: &Email, is_active: bool) -> Result<bool, RepositoryError> {
        let outcome = self
            .store
            .update_one(
                SUBSCRIBERS,
                doc! { "email": email.as_str() },
                doc! { "is_active": is_active },
            )
            .await?;
        Ok(outcome.matched > 0)
    }
}

fn subscriber_from_document(document: &Document) -> Result<Subscriber, RepositoryError> {
    let id = document
        .get_object_id("_id")
        .map_err(|e| corrupt("_id", &e))?;
    let email = document
        .get_str("email")
        .map_err(|e| corrupt("email", &e))
        .and_then(|raw| Email::parse(raw).map_err(|e| corrupt("email", &e)))?;
    let subscribed_at = document
        .get_datetime("subscribed_at")
        .map_err(|e| corrupt("subscribed_at", &e))
        .and_then(|at| {
            DateTime::<Utc>::from_timestamp_millis(at.timestamp_millis())
                .ok_or_else(|| corrupt("subscribed_at", &"out of range"))
        })?;
    let is_active = document
        .get_bool("is_active")
        .map_err(|e| corrupt("is_active", &e))?;

    Ok(Subscriber {
        id: SubscriberId::new(id.to_hex()),
        email,
        subscribed_at,
        is_active,
    })
}

fn corrupt(field: &str, error: &dyn std::fmt::Display) -> RepositoryError {
    RepositoryError::DataCorruption(format!("invalid subscriber {field}: {error}"))
}
