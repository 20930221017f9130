use anyhow::Context;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};

use crate::config::Config;
use crate::domain::errors::AppError;
use crate::domain::models::Geolocation;
use crate::domain::ports::store::GeolocationStore;

const COLLECTION_NAME: &str = "geolocations";

/// Connects to MongoDB and verifies the connection with a ping. The service
/// must not become ready unless this succeeds.
pub async fn init_db(config: &Config) -> anyhow::Result<Database> {
    let client = Client::with_uri_str(&config.mongo_uri)
        .await
        .context("Database connection failed")?;
    let database = client.database(&config.mongo_db_name);
    database
        .run_command(doc! { "ping": 1 })
        .await
        .context("Database connection failed")?;
    tracing::info!("database connection initialized successfully");
    Ok(database)
}

/// MongoDB-backed record store. One document per IP, backed by a unique
/// index so concurrent identical creates cannot both insert.
#[derive(Clone)]
pub struct MongoGeolocationStore {
    collection: Collection<Geolocation>,
}

impl MongoGeolocationStore {
    pub async fn new(database: &Database) -> Result<Self, AppError> {
        let collection = database.collection::<Geolocation>(COLLECTION_NAME);

        let index = IndexModel::builder()
            .keys(doc! { "ip": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        collection.create_index(index).await.map_err(|e| {
            tracing::error!("database error during index creation: {}", e);
            AppError::StorageError("Failed to create the unique index on 'ip'.".to_string())
        })?;

        Ok(Self { collection })
    }
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        _ => false,
    }
}

#[async_trait]
impl GeolocationStore for MongoGeolocationStore {
    async fn create(&self, record: Geolocation) -> Result<Geolocation, AppError> {
        let existing = self
            .collection
            .find_one(doc! { "ip": &record.ip })
            .await
            .map_err(|e| {
                tracing::error!("database error during document lookup: {}", e);
                AppError::StorageError(format!("Failed to get a document with IP {}.", record.ip))
            })?;
        if existing.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "Object with IP '{}' already exists in the database.",
                record.ip
            )));
        }

        match self.collection.insert_one(&record).await {
            Ok(_) => Ok(record),
            // The unique index rejected a concurrent insert for the same IP.
            Err(e) if is_duplicate_key(&e) => Err(AppError::AlreadyExists(format!(
                "Object with IP '{}' already exists in the database.",
                record.ip
            ))),
            Err(e) => {
                tracing::error!("database error during document creation: {}", e);
                Err(AppError::StorageError(format!(
                    "Failed to insert a document with IP {} into the database.",
                    record.ip
                )))
            }
        }
    }

    async fn get_by_ip(&self, ip: &str) -> Result<Geolocation, AppError> {
        let document = self
            .collection
            .find_one(doc! { "ip": ip })
            .await
            .map_err(|e| {
                tracing::error!("database error during document retrieval: {}", e);
                AppError::StorageError(format!("Failed to get a document with IP {}.", ip))
            })?;
        document.ok_or_else(|| {
            AppError::NotFound(format!("Object with an IP address {} not found.", ip))
        })
    }

    async fn delete(&self, ip: &str) -> Result<bool, AppError> {
        let result = self
            .collection
            .delete_one(doc! { "ip": ip })
            .await
            .map_err(|e| {
                tracing::error!("database error during document deletion: {}", e);
                AppError::StorageError(format!("Failed to delete a document with IP {}.", ip))
            })?;
        Ok(result.deleted_count > 0)
    }

    async fn list_all(&self) -> Result<Vec<Geolocation>, AppError> {
        let storage_error = |e: mongodb::error::Error| {
            tracing::error!("database error during documents retrieval: {}", e);
            AppError::StorageError("Failed to get all the geolocation documents.".to_string())
        };

        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(storage_error)?;
        cursor.try_collect().await.map_err(storage_error)
    }
}
