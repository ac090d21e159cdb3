// src/sync.rs
//! Blocking twin of [`crate::MongoApi`], built on the driver's `sync` API.
//! Each call blocks the calling thread for the round trip.

use crate::config::ConnectionConfig;
use crate::mongo::ordered_ids;
use crate::options::{find_one_options, find_options, ModifyOptions, QueryOptions};

use bson::{doc, Bson, Document};
use mongodb::error::Result;
use mongodb::options::{ClientOptions, FindOneAndUpdateOptions, UpdateModifications};
use mongodb::sync::{Client, Collection, Cursor, Database};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct MongoApi {
    client: Client,
    db: Database,
}

impl MongoApi {
    pub fn connect(config: &ConnectionConfig) -> Result<Self> {
        let mut client_options = ClientOptions::parse(config.connection_string()).run()?;
        config.apply(&mut client_options);
        let client = Client::with_options(client_options)?;

        if config.verify {
            client.database("admin").run_command(doc! { "ping": 1 }).run()?;
        }

        info!(host = %config.host, db = %config.db_name, "connected to MongoDB (sync)");
        Ok(Self::from_client(client, &config.db_name))
    }

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

    pub fn close(self) {
        info!(db = %self.db.name(), "closing MongoDB client (sync)");
        self.client.shutdown().run();
    }

    pub fn find_one(
        &self,
        collection: &str,
        filter: Document,
        options: impl Into<Option<QueryOptions>>,
    ) -> Result<Option<Document>> {
        debug!(collection, "find_one");
        self.collection(collection)
            .find_one(filter)
            .with_options(find_one_options(options))
            .run()
    }

    pub fn find(
        &self,
        collection: &str,
        filter: Document,
        options: impl Into<Option<QueryOptions>>,
    ) -> Result<Vec<Document>> {
        let docs = self
            .cursor(collection, filter, options)?
            .collect::<Result<Vec<Document>>>()?;
        debug!(collection, returned = docs.len(), "find");
        Ok(docs)
    }

    pub fn cursor(
        &self,
        collection: &str,
        filter: Document,
        options: impl Into<Option<QueryOptions>>,
    ) -> Result<Cursor<Document>> {
        self.collection(collection)
            .find(filter)
            .with_options(find_options(options))
            .run()
    }

    pub fn insert_one(&self, collection: &str, document: Document) -> Result<Bson> {
        let result = self.collection(collection).insert_one(document).run()?;
        debug!(collection, id = %result.inserted_id, "insert_one");
        Ok(result.inserted_id)
    }

    pub fn insert<I>(&self, collection: &str, documents: I) -> Result<Vec<Bson>>
    where
        I: IntoIterator<Item = Document>,
    {
        let documents: Vec<Document> = documents.into_iter().collect();
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let result = self.collection(collection).insert_many(documents).run()?;
        let ids = ordered_ids(result.inserted_ids);
        debug!(collection, inserted = ids.len(), "insert");
        Ok(ids)
    }

    pub fn update_one(
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
            .run()?;
        debug!(collection, modified = result.modified_count, "update_one");
        Ok(result.modified_count)
    }

    pub fn update(
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
            .run()?;
        debug!(collection, modified = result.modified_count, "update");
        Ok(result.modified_count)
    }

    pub fn delete_one(&self, collection: &str, filter: Document) -> Result<u64> {
        let result = self.collection(collection).delete_one(filter).run()?;
        debug!(collection, deleted = result.deleted_count, "delete_one");
        Ok(result.deleted_count)
    }

    pub fn delete(&self, collection: &str, filter: Document) -> Result<u64> {
        let result = self.collection(collection).delete_many(filter).run()?;
        debug!(collection, deleted = result.deleted_count, "delete");
        Ok(result.deleted_count)
    }

    pub fn count(&self, collection: &str, filter: Document) -> Result<u64> {
        let count = self.collection(collection).count_documents(filter).run()?;
        debug!(collection, count, "count");
        Ok(count)
    }

    pub fn aggregate<I>(&self, collection: &str, pipeline: I) -> Result<Vec<Document>>
    where
        I: IntoIterator<Item = Document>,
    {
        debug!(collection, "aggregate");
        self.collection(collection)
            .aggregate(pipeline)
            .run()?
            .collect()
    }

    pub fn find_one_and_update(
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
            .run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Service;

    #[test]
    fn malformed_host_fails_at_connect() {
        let config = ConnectionConfig::new("localhost:notaport", "cinema", "ana", "pw")
            .with_service(Service::Mongodb);
        assert!(MongoApi::connect(&config).is_err());
    }

    #[test]
    fn unreachable_host_fails_at_connect() {
        let config = ConnectionConfig::new("127.0.0.1:1", "cinema", "ana", "pw")
            .with_server_selection_timeout(std::time::Duration::from_millis(300));
        assert!(config.verify);
        assert!(MongoApi::connect(&config).is_err());
    }

    #[test]
    fn unverified_client_binds_one_database() {
        let config = ConnectionConfig::new("localhost:27017", "cinema", "ana", "pw")
            .with_service(Service::Mongodb)
            .with_verify(false);
        let api = MongoApi::connect(&config).unwrap();
        assert_eq!(api.database_name(), "cinema");
        assert_eq!(api.collection("movies").name(), "movies");
    }
}
