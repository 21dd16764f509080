//! The scripted CRUD sequence over the `students` collection.

use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    options::FindOptions,
};
use service_core::database::MongoDb;
use service_core::error::AppError;

use crate::models::{seed_students, Student, StudentSummary};

pub const COLLECTION: &str = "students";

/// Counts observed during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrudReport {
    pub inserted: usize,
    pub listed: usize,
    pub matched: u64,
    pub modified: u64,
    pub deleted: u64,
    pub remaining: u64,
}

/// Runs create, read, update, delete and count against `students`.
pub async fn run(db: &MongoDb) -> Result<CrudReport, AppError> {
    let students = db.collection::<Student>(COLLECTION);
    // Reads decode loosely; other documents in the collection may not be students.
    let raw = students.clone_with_type::<Document>();

    // CREATE
    let created = students
        .insert_many(seed_students(Utc::now()), None)
        .await?;
    let mut inserted: Vec<(usize, Bson)> = created.inserted_ids.into_iter().collect();
    inserted.sort_by_key(|(index, _)| *index);
    let inserted_ids: Vec<Bson> = inserted.into_iter().map(|(_, id)| id).collect();
    tracing::info!(inserted_ids = ?inserted_ids, "CREATE");

    // READ one
    let first_id = inserted_ids
        .first()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("insert_many returned no ids"))?;
    let one = raw.find_one(doc! { "_id": first_id }, None).await?;
    tracing::info!(student = ?one, "READ one");

    // READ many: newest ten, projected
    let options = FindOptions::builder()
        .projection(doc! { "name": 1, "course": 1, "grade": 1 })
        .sort(doc! { "createdAt": -1 })
        .limit(10)
        .build();
    let all: Vec<StudentSummary> = students
        .clone_with_type::<StudentSummary>()
        .find(doc! {}, options)
        .await?
        .try_collect()
        .await?;
    tracing::info!(students = ?all, "READ many (top 10)");

    // UPDATE
    let updated = students
        .update_one(
            doc! { "name": "Moise" },
            doc! {
                "$set": { "grade": "A+" },
                "$currentDate": { "updatedAt": true },
            },
            None,
        )
        .await?;
    tracing::info!(
        matched = updated.matched_count,
        modified = updated.modified_count,
        "UPDATE"
    );

    let after_update = raw.find_one(doc! { "name": "Moise" }, None).await?;
    tracing::info!(student = ?after_update, "After update");

    // DELETE
    let deleted = students.delete_one(doc! { "name": "Ada" }, None).await?;
    tracing::info!(deleted = deleted.deleted_count, "DELETE");

    // COUNT
    let remaining = students.count_documents(doc! {}, None).await?;
    tracing::info!(remaining, "Documents left in collection");

    Ok(CrudReport {
        inserted: inserted_ids.len(),
        listed: all.len(),
        matched: updated.matched_count,
        modified: updated.modified_count,
        deleted: deleted.deleted_count,
        remaining,
    })
}
