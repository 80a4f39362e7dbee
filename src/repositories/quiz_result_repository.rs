use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, from_document, oid::ObjectId},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::QuizResult,
    models::dto::response::QuizStats,
};

#[async_trait]
pub trait QuizResultRepository: Send + Sync {
    /// Append-only insert; results are never updated once written.
    async fn insert(&self, result: QuizResult) -> AppResult<QuizResult>;
    /// Newest-first page of a user's results, with the per-track details
    /// projected out.
    async fn find_page_for_user(
        &self,
        user_id: &ObjectId,
        skip: i64,
        limit: i64,
    ) -> AppResult<Vec<QuizResult>>;
    async fn count_for_user(&self, user_id: &ObjectId) -> AppResult<i64>;
    /// Group-by reduction over all of a user's results, computed at read
    /// time rather than maintained incrementally.
    async fn aggregate_stats(&self, user_id: &ObjectId) -> AppResult<QuizStats>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoQuizResultRepository {
    collection: Collection<QuizResult>,
}

impl MongoQuizResultRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quiz_results");
        Self { collection }
    }
}

#[async_trait]
impl QuizResultRepository for MongoQuizResultRepository {
    async fn insert(&self, mut result: QuizResult) -> AppResult<QuizResult> {
        let inserted = self.collection.insert_one(&result).await?;
        result.id = inserted.inserted_id.as_object_id();
        Ok(result)
    }

    async fn find_page_for_user(
        &self,
        user_id: &ObjectId,
        skip: i64,
        limit: i64,
    ) -> AppResult<Vec<QuizResult>> {
        let cursor = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "date": -1 })
            .skip(skip.max(0) as u64)
            .limit(limit)
            .projection(doc! { "tracks": 0 })
            .await?;

        let results: Vec<QuizResult> = cursor.try_collect().await?;
        Ok(results)
    }

    async fn count_for_user(&self, user_id: &ObjectId) -> AppResult<i64> {
        let count = self
            .collection
            .count_documents(doc! { "user_id": user_id })
            .await?;
        Ok(count as i64)
    }

    async fn aggregate_stats(&self, user_id: &ObjectId) -> AppResult<QuizStats> {
        let pipeline = vec![
            doc! { "$match": { "user_id": user_id } },
            doc! { "$group": {
                "_id": null,
                "totalQuizzes": { "$sum": 1 },
                "averageScore": { "$avg": "$percentage" },
                "bestScore": { "$max": "$percentage" },
                "totalCorrect": { "$sum": "$score" },
                "totalQuestions": { "$sum": "$total_questions" },
            } },
            doc! { "$project": { "_id": 0 } },
        ];

        let mut cursor = self.collection.aggregate(pipeline).await?;

        match cursor.try_next().await? {
            Some(document) => {
                let stats = from_document(document).map_err(crate::errors::AppError::from)?;
                Ok(stats)
            }
            None => Ok(QuizStats::default()),
        }
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let user_date_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "date": -1 })
            .options(IndexOptions::builder().name("user_date".to_string()).build())
            .build();

        let date_index = IndexModel::builder()
            .keys(doc! { "date": -1 })
            .options(IndexOptions::builder().name("date_desc".to_string()).build())
            .build();

        let percentage_index = IndexModel::builder()
            .keys(doc! { "percentage": -1 })
            .options(
                IndexOptions::builder()
                    .name("percentage_desc".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(user_date_index).await?;
        self.collection.create_index(date_index).await?;
        self.collection.create_index(percentage_index).await?;

        log::info!("Created indexes on quiz_results collection");

        Ok(())
    }
}
