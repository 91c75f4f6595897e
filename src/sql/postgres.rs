//! PostgreSQL driver behind the SQL probe capabilities

use super::{ConnectionDescriptor, DatabaseClient, DbConnection, DbCursor};
use crate::{
    error::{AppError, Result},
    probe::with_timeout,
};
use async_trait::async_trait;
use futures::StreamExt;
use std::pin::Pin;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_postgres::{types::ToSql, Client, NoTls, RowStream};

/// Connects with `tokio-postgres` over plain TCP
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresClient;

impl PostgresClient {
    pub fn new() -> Self {
        Self
    }
}

/// Driver configuration for `descriptor`; the service name is the database
pub fn build_config(descriptor: &ConnectionDescriptor) -> tokio_postgres::Config {
    let mut config = tokio_postgres::Config::new();
    config
        .host(&descriptor.host)
        .port(descriptor.port)
        .dbname(&descriptor.service)
        .user(&descriptor.user)
        .connect_timeout(descriptor.timeout)
        .application_name(env!("CARGO_PKG_NAME"));
    if !descriptor.password.is_empty() {
        config.password(&descriptor.password);
    }
    config
}

#[async_trait]
impl DatabaseClient for PostgresClient {
    async fn connect(&self, descriptor: &ConnectionDescriptor) -> Result<Box<dyn DbConnection>> {
        let config = build_config(descriptor);
        let (client, connection) = with_timeout(descriptor.timeout, "Database connect", async {
            config
                .connect(NoTls)
                .await
                .map_err(|e| AppError::connection(e.to_string()))
        })
        .await?;

        // Errors on the socket surface through the client
        let task = tokio::spawn(async move {
            let _ = connection.await;
        });

        Ok(Box::new(PostgresConnection {
            client: Arc::new(client),
            task,
        }))
    }
}

struct PostgresConnection {
    client: Arc<Client>,
    task: JoinHandle<()>,
}

impl Drop for PostgresConnection {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[async_trait]
impl DbConnection for PostgresConnection {
    async fn cursor(&self) -> Result<Box<dyn DbCursor>> {
        Ok(Box::new(PostgresCursor {
            client: self.client.clone(),
            rows: None,
        }))
    }
}

struct PostgresCursor {
    client: Arc<Client>,
    rows: Option<Pin<Box<RowStream>>>,
}

#[async_trait]
impl DbCursor for PostgresCursor {
    async fn execute(&mut self, sql: &str) -> Result<()> {
        self.rows = None;
        let stream = self
            .client
            .query_raw(sql, std::iter::empty::<&(dyn ToSql + Sync)>())
            .await?;
        self.rows = Some(Box::pin(stream));
        Ok(())
    }

    async fn fetch_all(&mut self) -> Result<u64> {
        let Some(mut stream) = self.rows.take() else {
            return Ok(0);
        };
        let mut fetched = 0;
        while let Some(row) = stream.next().await {
            row?;
            fetched += 1;
        }
        Ok(fetched)
    }

    async fn fetch_many(&mut self, batch_size: u32) -> Result<u64> {
        let Some(stream) = self.rows.as_mut() else {
            return Ok(0);
        };
        let mut fetched = 0;
        while fetched < u64::from(batch_size) {
            match stream.next().await {
                Some(row) => {
                    row?;
                    fetched += 1;
                }
                None => {
                    self.rows = None;
                    break;
                }
            }
        }
        Ok(fetched)
    }
}
