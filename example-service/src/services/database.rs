use super::RepositoryError;
use mongodb::{bson::doc, options::ClientOptions, Client as MongoClient, Database};
use std::time::Duration;

const APP_NAME: &str = "example-service";

/// Connection to the document store, shared by every repository.
///
/// The driver pools connections internally and the handle is cheap to clone,
/// so concurrent requests use it without extra locking.
#[derive(Clone, Debug)]
pub struct StoreClient {
    client: MongoClient,
    db: Database,
    timeout: Duration,
}

impl StoreClient {
    /// Connect and verify the store answers a ping.
    ///
    /// URI parsing, connection and the ping each run within `timeout`. Any
    /// failure is a [`RepositoryError::Connection`]; there is no retry.
    pub async fn connect(
        uri: &str,
        database: &str,
        timeout: Duration,
    ) -> Result<Self, RepositoryError> {
        tracing::info!(database = %database, timeout_secs = timeout.as_secs_f64(), "Connecting to MongoDB");

        let mut options = tokio::time::timeout(timeout, ClientOptions::parse(uri))
            .await
            .map_err(|_| {
                RepositoryError::Connection(anyhow::anyhow!(
                    "resolving connection string timed out after {:?}",
                    timeout
                ))
            })?
            .map_err(|e| {
                tracing::error!("Failed to parse MongoDB connection string: {}", e);
                RepositoryError::Connection(e.into())
            })?;
        options.app_name = Some(APP_NAME.to_string());
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            RepositoryError::Connection(e.into())
        })?;

        let store = Self {
            db: client.database(database),
            client,
            timeout,
        };

        store.ping().await.map_err(|e| {
            tracing::error!("MongoDB did not answer ping: {}", e);
            match e {
                RepositoryError::StoreRead(cause) => RepositoryError::Connection(cause),
                other => other,
            }
        })?;

        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(store)
    }

    /// Bounded liveness probe.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        ping_database(&self.client.database("admin"), self.timeout).await
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Release the connection pool. Best effort: the outcome is logged only.
    pub async fn disconnect(self) {
        let timeout = self.timeout;
        match tokio::time::timeout(timeout, self.client.shutdown()).await {
            Ok(()) => tracing::info!("Disconnected from MongoDB"),
            Err(_) => tracing::warn!(
                timeout_secs = timeout.as_secs_f64(),
                "MongoDB disconnect did not finish in time"
            ),
        }
    }
}

/// Run `{ ping: 1 }` against `db` within `timeout`.
pub(crate) async fn ping_database(db: &Database, timeout: Duration) -> Result<(), RepositoryError> {
    match tokio::time::timeout(timeout, db.run_command(doc! { "ping": 1 }, None)).await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => Err(RepositoryError::StoreRead(e.into())),
        Err(_) => Err(RepositoryError::StoreRead(anyhow::anyhow!(
            "ping timed out after {:?}",
            timeout
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn unreachable_store_fails_within_bound() {
        let bound = Duration::from_millis(500);
        let started = Instant::now();

        let result = StoreClient::connect("mongodb://127.0.0.1:1", "example_test", bound).await;

        assert!(matches!(result, Err(RepositoryError::Connection(_))));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn malformed_uri_is_a_connection_error() {
        let result =
            StoreClient::connect("not-a-mongo-uri", "example_test", Duration::from_secs(1)).await;
        assert!(matches!(result, Err(RepositoryError::Connection(_))));
    }
}
