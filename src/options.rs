// src/options.rs
//! Per-call knobs for reads and find-and-modify, mapped onto the driver's
//! option types. `None` anywhere means "driver default".

use bson::Document;
use mongodb::options::{FindOneAndUpdateOptions, FindOneOptions, FindOptions, ReturnDocument};

#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Fields to include or exclude, e.g. `doc! { "name": 1, "_id": 0 }`.
    pub projection: Option<Document>,
    /// Sort order, e.g. `doc! { "length": -1 }`.
    pub sort: Option<Document>,
    pub skip: Option<u64>,
    /// Ignored by `find_one`.
    pub limit: Option<i64>,
}

impl QueryOptions {
    pub fn projection(mut self, projection: Document) -> Self {
        self.projection = Some(projection);
        self
    }

    pub fn sort(mut self, sort: Document) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl From<QueryOptions> for FindOptions {
    fn from(opts: QueryOptions) -> Self {
        FindOptions::builder()
            .projection(opts.projection)
            .sort(opts.sort)
            .skip(opts.skip)
            .limit(opts.limit)
            .build()
    }
}

impl From<QueryOptions> for FindOneOptions {
    fn from(opts: QueryOptions) -> Self {
        FindOneOptions::builder()
            .projection(opts.projection)
            .sort(opts.sort)
            .skip(opts.skip)
            .build()
    }
}

/// Options for `find_one_and_update`.
#[derive(Debug, Clone)]
pub struct ModifyOptions {
    pub projection: Option<Document>,
    pub sort: Option<Document>,
    pub upsert: bool,
    pub return_document: ReturnDocument,
}

impl Default for ModifyOptions {
    fn default() -> Self {
        Self {
            projection: None,
            sort: None,
            upsert: false,
            return_document: ReturnDocument::After,
        }
    }
}

impl From<ModifyOptions> for FindOneAndUpdateOptions {
    fn from(opts: ModifyOptions) -> Self {
        FindOneAndUpdateOptions::builder()
            .projection(opts.projection)
            .sort(opts.sort)
            .upsert(opts.upsert)
            .return_document(opts.return_document)
            .build()
    }
}

pub(crate) fn find_options(options: impl Into<Option<QueryOptions>>) -> Option<FindOptions> {
    options.into().map(Into::into)
}

pub(crate) fn find_one_options(options: impl Into<Option<QueryOptions>>) -> Option<FindOneOptions> {
    options.into().map(Into::into)
}
