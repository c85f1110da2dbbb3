//! MongoDB connection bootstrap.

use std::time::Duration;

use bson::doc;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Database, IndexModel};
use tracing::info;

use crate::adapters::{posts_mongo, profiles_mongo, users_mongo};
use crate::error::AppError;
use crate::infra::db_errors::map_mongo_err;

/// Fail fast instead of hanging on an unreachable server.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Connect, verify the server answers, and make sure the unique indexes
/// exist.
pub async fn connect(uri: &str, db_name: &str) -> Result<Database, AppError> {
    info!(db = %db_name, "Connecting to MongoDB");

    let mut options = ClientOptions::parse(uri)
        .await
        .map_err(|e| AppError::config(format!("Invalid MongoDB URI: {e}")))?;
    apply_default_timeouts(&mut options);

    let client = Client::with_options(options)
        .map_err(|e| AppError::config(format!("Invalid MongoDB options: {e}")))?;

    let db = client.database(db_name);
    db.run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| AppError::from(map_mongo_err(e)))?;

    ensure_indexes(&db).await?;

    info!(db = %db_name, "Connected to MongoDB");
    Ok(db)
}

/// Timeouts given in the URI win; only unset ones get the default.
fn apply_default_timeouts(options: &mut ClientOptions) {
    options
        .server_selection_timeout
        .get_or_insert(DEFAULT_CONNECT_TIMEOUT);
    options.connect_timeout.get_or_insert(DEFAULT_CONNECT_TIMEOUT);
}

/// Create the unique indexes the stores rely on. Idempotent.
pub async fn ensure_indexes(db: &Database) -> Result<(), AppError> {
    let unique = || IndexOptions::builder().unique(true).build();

    db.collection::<bson::Document>(users_mongo::COLLECTION)
        .create_index(
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(unique())
                .build(),
        )
        .await
        .map_err(|e| AppError::from(map_mongo_err(e)))?;

    db.collection::<bson::Document>(profiles_mongo::COLLECTION)
        .create_index(
            IndexModel::builder()
                .keys(doc! { "user": 1 })
                .options(unique())
                .build(),
        )
        .await
        .map_err(|e| AppError::from(map_mongo_err(e)))?;

    db.collection::<bson::Document>(posts_mongo::COLLECTION)
        .create_index(IndexModel::builder().keys(doc! { "date": -1 }).build())
        .await
        .map_err(|e| AppError::from(map_mongo_err(e)))?;

    Ok(())
}
