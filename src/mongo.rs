// src/mongo.rs
use crate::config::ConnectionConfig;
use crate::options::{find_one_options, find_options, ModifyOptions, QueryOptions};

use bson::{doc, Bson, Document};
use futures::stream::TryStreamExt;
use mongodb::error::Result;
use mongodb::options::{ClientOptions, FindOneAndUpdateOptions, UpdateModifications};
use mongodb::{Client, Collection, Cursor, Database};
use tracing::{debug, info};

/// Async facade over one database. Cloning shares the underlying client.
#[derive(Debug, Clone)]
pub struct MongoApi {
    client: Client,
    db: Database,
}

impl MongoApi {
    /// Opens the client and, unless `config.verify` is off, pings the
    /// deployment so bad hosts or credentials fail here.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let mut client_options = ClientOptions::parse(config.connection_string()).await?;
        config.apply(&mut client_options);
        let client = Client::with_options(client_options)?;

        if config.verify {
            client.database("admin").run_command(doc! { "ping": 1 }).await?;
        }

        info!(host = %config.host, db = %config.db_name, "connected to MongoDB");
        Ok(Self::from_client(client, &config.db_name))
    }

    /// Wraps an already configured client.
    pub fn from_client(client: Client, db_name: &str) -> Self {
        let db = client.database(db_name);
        Self { client, db }
    }

    pub fn database_name(&self) -> &str {
        self.db.name()
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn collection(&self, collection: &str) -> Collection<Document> {
        self.db.collection::<Document>(collection)
    }

    pub async fn close(self) {
        info!(db = %self.db.name(), "closing MongoDB client");
        self.client.shutdown().await;
    }

    pub async fn find_one(
        &self,
        collection: &str,
        filter: Document,
        options: impl Into<Option<QueryOptions>>,
    ) -> Result<Option<Document>> {
        debug!(collection, "find_one");
        self.collection(collection)
            .find_one(filter)
            .with_options(find_one_options(options))
            .await
    }

    /// Runs the query and collects every match.
    pub async fn find(
        &self,
        collection: &str,
        filter: Document,
        options: impl Into<Option<QueryOptions>>,
    ) -> Result<Vec<Document>> {
        let docs: Vec<Document> = self.cursor(collection, filter, options).await?.try_collect().await?;
        debug!(collection, returned = docs.len(), "find");
        Ok(docs)
    }

    /// Like `find`, but hands back the driver cursor so results stream in.
    pub async fn cursor(
        &self,
        collection: &str,
        filter: Document,
        options: impl Into<Option<QueryOptions>>,
    ) -> Result<Cursor<Document>> {
        self.collection(collection)
            .find(filter)
            .with_options(find_options(options))
            .await
    }

    pub async fn insert_one(&self, collection: &str, document: Document) -> Result<Bson> {
        let result = self.collection(collection).insert_one(document).await?;
        debug!(collection, id = %result.inserted_id, "insert_one");
        Ok(result.inserted_id)
    }

    /// Ids come back in input order. Nothing is sent for an empty batch.
    pub async fn insert<I>(&self, collection: &str, documents: I) -> Result<Vec<Bson>>
    where
        I: IntoIterator<Item = Document>,
    {
        let documents: Vec<Document> = documents.into_iter().collect();
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let result = self.collection(collection).insert_many(documents).await?;
        let ids = ordered_ids(result.inserted_ids);
        debug!(collection, inserted = ids.len(), "insert");
        Ok(ids)
    }

    pub async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: impl Into<UpdateModifications>,
        upsert: bool,
    ) -> Result<u64> {
        let result = self
            .collection(collection)
            .update_one(filter, update)
            .upsert(upsert)
            .await?;
        debug!(collection, modified = result.modified_count, "update_one");
        Ok(result.modified_count)
    }

    pub async fn update(
        &self,
        collection: &str,
        filter: Document,
        update: impl Into<UpdateModifications>,
        upsert: bool,
    ) -> Result<u64> {
        let result = self
            .collection(collection)
            .update_many(filter, update)
            .upsert(upsert)
            .await?;
        debug!(collection, modified = result.modified_count, "update");
        Ok(result.modified_count)
    }

    pub async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64> {
        let result = self.collection(collection).delete_one(filter).await?;
        debug!(collection, deleted = result.deleted_count, "delete_one");
        Ok(result.deleted_count)
    }

    pub async fn delete(&self, collection: &str, filter: Document) -> Result<u64> {
        let result = self.collection(collection).delete_many(filter).await?;
        debug!(collection, deleted = result.deleted_count, "delete");
        Ok(result.deleted_count)
    }

    pub async fn count(&self, collection: &str, filter: Document) -> Result<u64> {
        let count = self.collection(collection).count_documents(filter).await?;
        debug!(collection, count, "count");
        Ok(count)
    }

    pub async fn aggregate<I>(&self, collection: &str, pipeline: I) -> Result<Vec<Document>>
    where
        I: IntoIterator<Item = Document>,
    {
        debug!(collection, "aggregate");
        self.collection(collection)
            .aggregate(pipeline)
            .await?
            .try_collect()
            .await
    }

    /// Atomically updates one match. Returns the post-update document unless
    /// `options.return_document` says otherwise.
    pub async fn find_one_and_update(
        &self,
        collection: &str,
        filter: Document,
        update: impl Into<UpdateModifications>,
        options: impl Into<Option<ModifyOptions>>,
    ) -> Result<Option<Document>> {
        debug!(collection, "find_one_and_update");
        let options = options.into().unwrap_or_default();
        self.collection(collection)
            .find_one_and_update(filter, update)
            .with_options(FindOneAndUpdateOptions::from(options))
            .await
    }
}

pub(crate) fn ordered_ids(ids: std::collections::HashMap<usize, Bson>) -> Vec<Bson> {
    let mut ids: Vec<(usize, Bson)> = ids.into_iter().collect();
    ids.sort_by_key(|(index, _)| *index);
    ids.into_iter().map(|(_, id)| id).collect()
}
