use bson::{doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::Client;
use std::sync::Arc;

use crate::models::trip::Itinerary;

const DB_NAME: &str = "WeekendWanderer";
const ITINERARIES_COLLECTION: &str = "Itineraries";

/// Keyed itinerary storage. Every per-id operation filters on both `_id` and
/// `userId`, so ownership is enforced by the query itself and a caller can
/// never read or delete another user's record.
#[derive(Clone)]
pub struct TripStore {
    client: Arc<Client>,
}

impl TripStore {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    fn collection(&self) -> mongodb::Collection<Itinerary> {
        self.client
            .database(DB_NAME)
            .collection(ITINERARIES_COLLECTION)
    }

    pub async fn insert(&self, itinerary: &Itinerary) -> Result<ObjectId, mongodb::error::Error> {
        let result = self.collection().insert_one(itinerary).await?;
        Ok(result.inserted_id.as_object_id().unwrap_or_default())
    }

    /// All itineraries owned by the user, newest first.
    pub async fn list_for_user(
        &self,
        user_id: ObjectId,
    ) -> Result<Vec<Itinerary>, mongodb::error::Error> {
        let cursor = self
            .collection()
            .find(doc! { "userId": user_id })
            .sort(doc! { "createdAt": -1 })
            .await?;

        cursor.try_collect().await
    }

    pub async fn find_for_user(
        &self,
        id: ObjectId,
        user_id: ObjectId,
    ) -> Result<Option<Itinerary>, mongodb::error::Error> {
        self.collection()
            .find_one(doc! { "_id": id, "userId": user_id })
            .await
    }

    /// Returns false when no owned record matched.
    pub async fn set_favorite(
        &self,
        id: ObjectId,
        user_id: ObjectId,
        favorite: bool,
    ) -> Result<bool, mongodb::error::Error> {
        let result = self
            .collection()
            .update_one(
                doc! { "_id": id, "userId": user_id },
                doc! { "$set": { "favorite": favorite } },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    /// Returns false when no owned record matched.
    pub async fn delete_for_user(
        &self,
        id: ObjectId,
        user_id: ObjectId,
    ) -> Result<bool, mongodb::error::Error> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": id, "userId": user_id })
            .await?;

        Ok(result.deleted_count > 0)
    }
}
