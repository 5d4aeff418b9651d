//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides `MongoSaleStore`, a [`SaleStore`] backed by a single collection
//! (by default `products`) in a `mongodb::Database`.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag:
//! ```toml
//! [dependencies]
//! transactions-api = { version = "0.1", features = ["mongodb_backend"] }
//! ```
//!
//! # Storage model
//!
//! Each record is one document. `_id` is a driver-generated ObjectId and is
//! exposed to clients as its hex string. `dateOfSale` is stored as a native
//! BSON date so the month filter can run server-side with `$month`, which
//! evaluates in UTC like the in-memory store does.
//!
//! # Re-seeding
//!
//! `replace_all` keeps the trait's two-step delete-then-insert. Multi-document
//! transactions require a replica set, which is not assumed, so a reader that
//! races a re-seed can observe an empty or partially filled collection.

use crate::core::error::StorageError;
use crate::core::query::{Pagination, RecordFilter};
use crate::core::record::{NewSaleRecord, SaleRecord};
use crate::core::service::SaleStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::{Client, Collection, Database};

const BACKEND: &str = "mongodb";

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a seed record into a BSON document without `_id`
fn record_to_document(record: &NewSaleRecord) -> Document {
    let mut doc = doc! {
        "title": &record.title,
        "description": &record.description,
        "price": record.price,
        "category": &record.category,
        "sold": record.sold,
        "dateOfSale": chrono_to_bson(record.date_of_sale),
    };
    if let Some(image) = &record.image {
        doc.insert("image", image);
    }
    doc
}

/// Convert a stored document back into a sale record
fn document_to_record(doc: &Document) -> Result<SaleRecord, StorageError> {
    let id = match doc.get("_id") {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => return Err(StorageError::serialization(BACKEND, "document has no _id")),
    };

    let text = |key: &str| {
        doc.get_str(key)
            .map(str::to_string)
            .map_err(|e| StorageError::serialization(BACKEND, format!("field '{key}': {e}")))
    };

    let price = match doc.get("price") {
        Some(Bson::Double(v)) => *v,
        Some(Bson::Int32(v)) => f64::from(*v),
        // seed prices are far below 2^53
        Some(Bson::Int64(v)) => *v as f64,
        other => {
            return Err(StorageError::serialization(
                BACKEND,
                format!("field 'price' is not numeric: {other:?}"),
            ));
        }
    };

    let sold = doc
        .get_bool("sold")
        .map_err(|e| StorageError::serialization(BACKEND, format!("field 'sold': {e}")))?;

    let date_of_sale = doc
        .get_datetime("dateOfSale")
        .map_err(|e| StorageError::serialization(BACKEND, format!("field 'dateOfSale': {e}")))
        .and_then(|dt| bson_to_chrono(*dt))?;

    Ok(SaleRecord {
        id,
        title: text("title")?,
        description: text("description")?,
        price,
        category: text("category")?,
        image: doc.get_str("image").ok().map(str::to_string),
        sold,
        date_of_sale,
    })
}

fn chrono_to_bson(dt: DateTime<Utc>) -> mongodb::bson::DateTime {
    mongodb::bson::DateTime::from_millis(dt.timestamp_millis())
}

fn bson_to_chrono(dt: mongodb::bson::DateTime) -> Result<DateTime<Utc>, StorageError> {
    DateTime::from_timestamp_millis(dt.timestamp_millis()).ok_or_else(|| {
        StorageError::serialization(BACKEND, format!("dateOfSale out of range: {dt}"))
    })
}

/// Case-insensitive literal substring match
fn contains_ignore_case(needle: &str) -> Document {
    doc! { "$regex": regex::escape(needle), "$options": "i" }
}

/// Translate a [`RecordFilter`] into a MongoDB query document
fn filter_to_document(filter: &RecordFilter) -> Document {
    let mut query = Document::new();

    if let Some(title) = &filter.title {
        query.insert("title", contains_ignore_case(title));
    }
    if let Some(description) = &filter.description {
        query.insert("description", contains_ignore_case(description));
    }
    if let Some(price) = filter.price {
        query.insert("price", price);
    }

    let month = i32::try_from(filter.month.number()).unwrap_or_default();
    query.insert(
        "$expr",
        doc! { "$eq": [ { "$month": "$dateOfSale" }, month ] },
    );

    query
}

// ---------------------------------------------------------------------------
// MongoSaleStore
// ---------------------------------------------------------------------------

/// Sale record store backed by MongoDB.
///
/// # Example
///
/// ```rust,ignore
/// use mongodb::Client;
/// use transactions::storage::MongoSaleStore;
///
/// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
/// let store = MongoSaleStore::new(client.database("transactions"), "products");
/// let inserted = store.insert_many(records).await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoSaleStore {
    database: Database,
    collection_name: String,
}

impl MongoSaleStore {
    /// Create a store over `collection` in the given database.
    pub fn new(database: Database, collection: impl Into<String>) -> Self {
        Self {
            database,
            collection_name: collection.into(),
        }
    }

    /// Connect with a connection string and verify the server answers.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, StorageError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| StorageError::ConnectionError {
                backend: BACKEND.to_string(),
                message: e.to_string(),
            })?;

        let database = client.database(database);
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StorageError::ConnectionError {
                backend: BACKEND.to_string(),
                message: e.to_string(),
            })?;

        tracing::info!(database = database.name(), collection, "connected to MongoDB");
        Ok(Self::new(database, collection))
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Raw handle to the records collection.
    pub fn collection(&self) -> Collection<Document> {
        self.database.collection(&self.collection_name)
    }
}

#[async_trait]
impl SaleStore for MongoSaleStore {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    async fn insert_many(&self, records: Vec<NewSaleRecord>) -> Result<usize, StorageError> {
        if records.is_empty() {
            return Ok(0);
        }

        let docs: Vec<Document> = records.iter().map(record_to_document).collect();
        let result = self
            .collection()
            .insert_many(docs)
            .await
            .map_err(|e| StorageError::query(BACKEND, format!("insert_many failed: {e}")))?;

        Ok(result.inserted_ids.len())
    }

    async fn delete_all(&self) -> Result<u64, StorageError> {
        let result = self
            .collection()
            .delete_many(doc! {})
            .await
            .map_err(|e| StorageError::query(BACKEND, format!("delete_many failed: {e}")))?;

        Ok(result.deleted_count)
    }

    async fn find(
        &self,
        filter: &RecordFilter,
        page: Option<Pagination>,
    ) -> Result<Vec<SaleRecord>, StorageError> {
        let query = filter_to_document(filter);
        tracing::debug!(%query, "mongodb find");

        // natural order is unstable across pages; sort on _id
        let collection = self.collection();
        let mut find = collection.find(query).sort(doc! { "_id": 1 });
        if let Some(page) = page {
            find = find
                .skip(page.skip())
                .limit(i64::try_from(page.limit).unwrap_or(i64::MAX));
        }

        let cursor = find
            .await
            .map_err(|e| StorageError::query(BACKEND, format!("find failed: {e}")))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| StorageError::query(BACKEND, format!("failed to collect results: {e}")))?;

        docs.iter().map(document_to_record).collect()
    }

    async fn count(&self) -> Result<u64, StorageError> {
        self.collection()
            .count_documents(doc! {})
            .await
            .map_err(|e| StorageError::query(BACKEND, format!("count failed: {e}")))
    }
}
