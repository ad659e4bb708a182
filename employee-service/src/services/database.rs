use crate::config::MongoConfig;
use crate::models::{Employee, EmployeeUpdate};
use crate::services::store::EmployeeStore;
use anyhow::Context;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::ClientOptions,
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    /// Connects and pings once; the process should not serve without a store.
    pub async fn connect(config: &MongoConfig) -> Result<Self, AppError> {
        tracing::info!(uri = %config.uri, "Connecting to MongoDB");

        let mut client_options = ClientOptions::parse(&config.uri).await.map_err(|e| {
            tracing::error!("Failed to parse MongoDB connection string: {}", e);
            AppError::from(e)
        })?;
        client_options.app_name = Some("employee-service".to_string());
        client_options.connect_timeout = Some(config.connect_timeout());
        client_options.server_selection_timeout = Some(config.connect_timeout());

        let client = MongoClient::with_options(client_options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(&config.database);
        let mongo = Self { client, db };

        mongo.health_check().await?;
        tracing::info!(database = %config.database, "Successfully connected to MongoDB database");
        Ok(mongo)
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn employees(&self, collection: &str) -> Collection<Employee> {
        self.db.collection(collection)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

/// [`EmployeeStore`] backed by a MongoDB collection.
#[derive(Clone)]
pub struct MongoEmployeeStore {
    db: MongoDb,
    collection: Collection<Employee>,
}

impl MongoEmployeeStore {
    pub fn new(db: MongoDb, collection: &str) -> Self {
        let collection = db.employees(collection);
        Self { db, collection }
    }
}

#[async_trait]
impl EmployeeStore for MongoEmployeeStore {
    async fn list(&self) -> anyhow::Result<Vec<Employee>> {
        let cursor = self.collection.find(doc! {}, None).await?;
        let employees: Vec<Employee> = cursor.try_collect().await?;
        Ok(employees)
    }

    async fn insert(&self, employee: &Employee) -> anyhow::Result<ObjectId> {
        let result = self.collection.insert_one(employee, None).await?;
        result
            .inserted_id
            .as_object_id()
            .context("store assigned a non-ObjectId _id")
    }

    async fn find_by_id(&self, id: ObjectId) -> anyhow::Result<Option<Employee>> {
        Ok(self.collection.find_one(doc! { "_id": id }, None).await?)
    }

    async fn update_fields(&self, id: ObjectId, update: &EmployeeUpdate) -> anyhow::Result<bool> {
        // Matched count only; the stored document is never decoded here.
        let result = self
            .collection
            .update_one(doc! { "_id": id }, update.to_set_document(), None)
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete_by_id(&self, id: ObjectId) -> anyhow::Result<u64> {
        let result = self.collection.delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.db.health_check().await?;
        Ok(())
    }
}
