//! Booking payout status.
//!
//! The only transition owned here is "hold": it overwrites the booking's
//! `payoutStatus` with `held`. The prior status is not read or checked, so
//! holding an already-held booking is a no-op in effect.

use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

use crate::errors::BookingError;
use crate::store::{Document, DocumentStore};

pub const BOOKINGS: &str = "bookings";
pub const PAYOUT_STATUS_FIELD: &str = "payoutStatus";

/// Where a booking's payment sits in its settlement lifecycle.
///
/// Only `held` is known to this crate. Any other value written by the
/// owning system is carried through as `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayoutStatus {
    Held,
    Other(String),
}

impl PayoutStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PayoutStatus::Held => "held",
            PayoutStatus::Other(s) => s.as_str(),
        }
    }
}

impl From<&str> for PayoutStatus {
    fn from(s: &str) -> Self {
        match s {
            "held" => PayoutStatus::Held,
            other => PayoutStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PayoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PayoutStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PayoutStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(PayoutStatus::from(s.as_str()))
    }
}

/// Read view of a booking document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_status: Option<PayoutStatus>,
    #[serde(flatten)]
    pub fields: Document,
}

impl Booking {
    pub fn from_document(id: impl Into<String>, mut doc: Document) -> Self {
        // the store key is authoritative
        doc.remove("id");
        let payout_status = match doc.remove(PAYOUT_STATUS_FIELD) {
            Some(Value::String(s)) => Some(PayoutStatus::from(s.as_str())),
            Some(other) => {
                // keep non-string values where the owner put them
                doc.insert(PAYOUT_STATUS_FIELD.to_string(), other);
                None
            }
            None => None,
        };

        Self {
            id: id.into(),
            payout_status,
            fields: doc,
        }
    }

    pub fn is_held(&self) -> bool {
        self.payout_status == Some(PayoutStatus::Held)
    }
}

/// Updates booking payout status against an injected document store.
#[derive(Clone)]
pub struct PayoutService {
    store: Arc<dyn DocumentStore>,
}

impl PayoutService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Set `payoutStatus` to `held` on the identified booking.
    ///
    /// Writes that single field and nothing else.
    pub async fn hold(&self, booking_id: &str) -> Result<()> {
        let booking_id = require_booking_id(booking_id)?;

        let mut fields = Document::new();
        fields.insert(
            PAYOUT_STATUS_FIELD.to_string(),
            json!(PayoutStatus::Held.as_str()),
        );

        self.store
            .update(BOOKINGS, booking_id, fields)
            .await
            .with_context(|| format!("holding payout for booking {booking_id}"))?;

        tracing::info!(booking_id = booking_id, status = "held", "payout.hold");
        Ok(())
    }

    pub async fn booking(&self, booking_id: &str) -> Result<Booking> {
        let booking_id = require_booking_id(booking_id)?;
        let doc = self.store.get(BOOKINGS, booking_id).await?;
        Ok(Booking::from_document(booking_id, doc))
    }
}

/// Ids are opaque: only blank ones are refused, the rest reach the store verbatim.
fn require_booking_id(booking_id: &str) -> Result<&str> {
    if booking_id.trim().is_empty() {
        return Err(BookingError::bad_request("Booking id must not be empty").into_anyhow());
    }
    Ok(booking_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::store::MemoryStore;
    use async_trait::async_trait;

    async fn seeded() -> (Arc<MemoryStore>, PayoutService) {
        let store = Arc::new(MemoryStore::new());
        let doc = json!({
            "payoutStatus": "released",
            "amount": 120,
            "creatorId": "c1",
        });
        store
            .insert(BOOKINGS, "b1", doc.as_object().cloned().unwrap())
            .await
            .unwrap();
        let svc = PayoutService::new(store.clone());
        (store, svc)
    }

    #[tokio::test]
    async fn hold_sets_status_and_leaves_other_fields() {
        let (store, svc) = seeded().await;

        svc.hold("b1").await.unwrap();

        let doc = store.get(BOOKINGS, "b1").await.unwrap();
        assert_eq!(
            Value::Object(doc),
            json!({"payoutStatus": "held", "amount": 120, "creatorId": "c1"})
        );
    }

    #[tokio::test]
    async fn hold_twice_matches_hold_once() {
        let (store, svc) = seeded().await;

        svc.hold("b1").await.unwrap();
        let once = store.get(BOOKINGS, "b1").await.unwrap();
        svc.hold("b1").await.unwrap();
        let twice = store.get(BOOKINGS, "b1").await.unwrap();

        assert_eq!(once, twice);
        assert!(svc.booking("b1").await.unwrap().is_held());
    }

    #[tokio::test]
    async fn hold_missing_booking_is_not_found_and_creates_nothing() {
        let (store, svc) = seeded().await;

        let err = svc.hold("nope").await.unwrap_err();

        assert_eq!(BookingError::kind_of(&err), Some(ErrorKind::NotFound));
        assert_eq!(store.len(BOOKINGS).await, 1);
    }

    #[tokio::test]
    async fn hold_does_not_normalise_padded_ids() {
        let (store, svc) = seeded().await;

        let err = svc.hold(" b1").await.unwrap_err();

        assert_eq!(BookingError::kind_of(&err), Some(ErrorKind::NotFound));
        let doc = store.get(BOOKINGS, "b1").await.unwrap();
        assert_eq!(doc["payoutStatus"], json!("released"));
        assert!(svc.booking("b1 ").await.is_err());
    }

    #[tokio::test]
    async fn hold_rejects_blank_id() {
        let (_, svc) = seeded().await;
        let err = svc.hold("   ").await.unwrap_err();
        assert_eq!(BookingError::kind_of(&err), Some(ErrorKind::BadRequest));
    }

    struct DownStore;

    #[async_trait]
    impl DocumentStore for DownStore {
        async fn get(&self, _collection: &str, _id: &str) -> Result<Document> {
            Err(BookingError::store_unavailable("store offline").into_anyhow())
        }

        async fn update(&self, _collection: &str, _id: &str, _fields: Document) -> Result<()> {
            Err(BookingError::store_unavailable("store offline").into_anyhow())
        }
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_unavailable() {
        let svc = PayoutService::new(Arc::new(DownStore));
        let err = svc.hold("b1").await.unwrap_err();
        assert_eq!(BookingError::kind_of(&err), Some(ErrorKind::Unavailable));
    }

    #[test]
    fn stored_id_field_does_not_duplicate_key() {
        let booking = Booking::from_document(
            "b3",
            json!({"id": "legacy", "payoutStatus": "held"})
                .as_object()
                .cloned()
                .unwrap(),
        );
        assert_eq!(
            serde_json::to_value(&booking).unwrap(),
            json!({"id": "b3", "payoutStatus": "held"})
        );
    }

    #[test]
    fn unknown_statuses_round_trip_verbatim() {
        let booking = Booking::from_document(
            "b2",
            json!({"payoutStatus": "refunded", "note": "x"})
                .as_object()
                .cloned()
                .unwrap(),
        );
        assert_eq!(
            booking.payout_status,
            Some(PayoutStatus::Other("refunded".to_string()))
        );
        assert_eq!(
            serde_json::to_value(&booking).unwrap(),
            json!({"id": "b2", "payoutStatus": "refunded", "note": "x"})
        );
    }
}
