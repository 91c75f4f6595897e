//! SQL execution probe with fresh or reused connections

use super::{run_one_sql_execution, ConnectionDescriptor, DatabaseClient, DbConnection, DbCursor, HardParse};
use crate::{
    error::{AppError, ErrorContext, Result},
    models::TrialOutcome,
    probe::Probe,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How connections are managed across trials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConnectionMode {
    /// New connection and cursor for every trial; connect time is not measured
    #[default]
    Fresh,
    /// One connection and cursor opened up front and shared by all trials
    Reuse,
}

/// What a SQL trial executes
#[derive(Debug, Clone)]
pub struct SqlSettings {
    pub queries: Vec<String>,
    /// Rows per fetch, 0 to fetch everything at once
    pub batch_size: u32,
    pub hard_parse: Option<HardParse>,
    pub mode: ConnectionMode,
}

impl SqlSettings {
    pub fn new(queries: Vec<String>) -> Self {
        Self {
            queries,
            batch_size: crate::defaults::DEFAULT_BATCH_SIZE,
            hard_parse: None,
            mode: ConnectionMode::default(),
        }
    }
}

/// Open connection together with its cursor
struct Session {
    // Field order matters: the cursor is dropped before its connection
    cursor: Box<dyn DbCursor>,
    _connection: Box<dyn DbConnection>,
}

/// Probe timing SQL statement execution
pub struct SqlProbe {
    client: Arc<dyn DatabaseClient>,
    descriptor: ConnectionDescriptor,
    settings: SqlSettings,
    session: Option<Session>,
}

impl SqlProbe {
    /// Create a probe; at least one statement is required
    pub fn new(
        client: Arc<dyn DatabaseClient>,
        descriptor: ConnectionDescriptor,
        settings: SqlSettings,
    ) -> Result<Self> {
        if settings.queries.is_empty() {
            return Err(AppError::validation("No SQL statements to execute"));
        }
        Ok(Self {
            client,
            descriptor,
            settings,
            session: None,
        })
    }

    pub fn settings(&self) -> &SqlSettings {
        &self.settings
    }
}

async fn open_session(
    client: &dyn DatabaseClient,
    descriptor: &ConnectionDescriptor,
) -> Result<Session> {
    let connection = client
        .connect(descriptor)
        .await
        .with_context(|| format!("Connecting to {}", descriptor))?;
    let cursor = connection.cursor().await?;
    Ok(Session {
        cursor,
        _connection: connection,
    })
}

async fn execute_on(
    cursor: &mut dyn DbCursor,
    settings: &SqlSettings,
    timeout: std::time::Duration,
) -> TrialOutcome {
    run_one_sql_execution(
        cursor,
        &settings.queries,
        settings.batch_size,
        settings.hard_parse.as_ref(),
        timeout,
    )
    .await
}

#[async_trait]
impl Probe for SqlProbe {
    fn describe(&self) -> String {
        let mode = match self.settings.mode {
            ConnectionMode::Fresh => "new connection per trial",
            ConnectionMode::Reuse => "reused connection",
        };
        let hard_parse = if self.settings.hard_parse.is_some() { ", hard parse" } else { "" };
        format!(
            "SQL execution on {}:{}/{} ({} statement(s), {}{})",
            self.descriptor.host,
            self.descriptor.port,
            self.descriptor.service,
            self.settings.queries.len(),
            mode,
            hard_parse
        )
    }

    async fn prepare(&mut self) -> Result<()> {
        if self.settings.mode == ConnectionMode::Reuse {
            self.session = Some(open_session(self.client.as_ref(), &self.descriptor).await?);
        }
        Ok(())
    }

    async fn attempt(&mut self) -> TrialOutcome {
        let timeout = self.descriptor.timeout;
        match self.settings.mode {
            ConnectionMode::Fresh => {
                match open_session(self.client.as_ref(), &self.descriptor).await {
                    Ok(mut session) => execute_on(session.cursor.as_mut(), &self.settings, timeout).await,
                    Err(error) => TrialOutcome::from_error(&error, timeout),
                }
            }
            ConnectionMode::Reuse => match self.session.as_mut() {
                Some(session) => execute_on(session.cursor.as_mut(), &self.settings, timeout).await,
                None => TrialOutcome::failure(
                    AppError::internal("Reused connection is not open").trial_detail(),
                ),
            },
        }
    }
}
