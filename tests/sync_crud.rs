#![cfg(feature = "sync")]

use bson::{doc, oid::ObjectId};
use mongo_api::sync::MongoApi;
use mongo_api::ConnectionConfig;

fn connect() -> Option<MongoApi> {
    let config = match ConnectionConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("skipping live MongoDB test: {}", e);
            return None;
        }
    };
    Some(MongoApi::connect(&config).expect("connect to test deployment"))
}

#[test]
fn blocking_round_trip() {
    let Some(api) = connect() else { return };
    let movies = format!("movies_{}", ObjectId::new().to_hex());

    let id = api
        .insert_one(&movies, doc! { "name": "First Man", "length": 141 })
        .unwrap();
    let found = api
        .find_one(&movies, doc! { "name": "First Man" }, None)
        .unwrap()
        .unwrap();
    assert_eq!(found.get("_id"), Some(&id));

    api.insert(&movies, vec![doc! { "name": "Apollo 13" }, doc! { "name": "Moon" }])
        .unwrap();
    assert_eq!(api.count(&movies, doc! {}).unwrap(), 3);
    assert_eq!(api.find(&movies, doc! {}, None).unwrap().len(), 3);

    assert_eq!(
        api.update(&movies, doc! {}, doc! { "$set": { "space": true } }, false)
            .unwrap(),
        3
    );
    assert_eq!(api.delete_one(&movies, doc! { "name": "Nope" }).unwrap(), 0);
    assert_eq!(api.delete(&movies, doc! { "space": true }).unwrap(), 3);

    api.collection(&movies).drop().run().unwrap();
    api.close();
}
