//! Collection-name based CRUD helpers over the MongoDB driver.
//!
//! A [`MongoApi`] is bound to a single database at connect time; every call
//! names the collection and forwards to the driver unchanged, errors included.
//!
//! ```no_run
//! use bson::doc;
//! use mongo_api::{ConnectionConfig, MongoApi, Service};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = ConnectionConfig::new("cluster0.example.mongodb.net", "cinema", "ana", "pw")
//!     .with_service(Service::MongodbSrv);
//! let api = MongoApi::connect(&config).await?;
//!
//! api.insert_one("movies", doc! { "name": "First Man", "length": 141 }).await?;
//! let movie = api.find_one("movies", doc! { "name": "First Man" }, None).await?;
//! assert!(movie.is_some());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod mongo;
pub mod options;
#[cfg(feature = "sync")]
pub mod sync;

pub use config::{ConnectionConfig, Service};
pub use mongo::MongoApi;
pub use options::{ModifyOptions, QueryOptions};

pub use mongodb::options::ReturnDocument;
