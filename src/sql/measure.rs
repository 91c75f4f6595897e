//! Timing of SQL statement execution

use super::{DbCursor, HardParse};
use crate::{
    error::{AppError, Result},
    models::{elapsed_ms, TrialOutcome},
};
use std::time::{Duration, Instant};

/// Duration and row count of one statement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryMeasurement {
    pub duration_ms: f64,
    pub rows: u64,
}

/// Execute `queries` in order on `cursor`, timing each one
///
/// The timer covers execution plus draining every row. With `batch_size == 0`
/// the rows are fetched in one call, otherwise in batches until an empty
/// batch comes back. Only the last statement's measurement is returned; the
/// earlier statements run but their timings are dropped.
pub async fn measure_queries(
    cursor: &mut dyn DbCursor,
    queries: &[String],
    batch_size: u32,
    hard_parse: Option<&HardParse>,
) -> Result<QueryMeasurement> {
    let mut last = None;

    for query in queries {
        let statement = match hard_parse {
            Some(hard_parse) => hard_parse.rewrite(query),
            None => query.clone(),
        };

        let start = Instant::now();
        cursor.execute(&statement).await?;
        let rows = if batch_size == 0 {
            cursor.fetch_all().await?
        } else {
            let mut rows = 0;
            loop {
                let fetched = cursor.fetch_many(batch_size).await?;
                if fetched == 0 {
                    break;
                }
                rows += fetched;
            }
            rows
        };
        let elapsed = start.elapsed();

        last = Some(QueryMeasurement {
            duration_ms: elapsed_ms(elapsed),
            rows,
        });
    }

    last.ok_or_else(|| AppError::validation("No SQL statements to execute"))
}

/// Run one SQL trial on an open cursor and classify the result
pub async fn run_one_sql_execution(
    cursor: &mut dyn DbCursor,
    queries: &[String],
    batch_size: u32,
    hard_parse: Option<&HardParse>,
    timeout: Duration,
) -> TrialOutcome {
    match measure_queries(cursor, queries, batch_size, hard_parse).await {
        Ok(measurement) => TrialOutcome::success_with_rows(measurement.duration_ms, measurement.rows),
        Err(error) => TrialOutcome::from_error(&error, timeout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::Clock;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;

    /// Cursor serving a fixed number of rows per statement
    #[derive(Default)]
    struct FakeCursor {
        rows_per_statement: u64,
        remaining: u64,
        executed: Vec<String>,
        batch_calls: u32,
        fail_on: Option<String>,
    }

    #[async_trait]
    impl DbCursor for FakeCursor {
        async fn execute(&mut self, sql: &str) -> Result<()> {
            if self.fail_on.as_deref() == Some(sql) {
                return Err(AppError::database("ORA-00942: table or view does not exist"));
            }
            self.executed.push(sql.to_string());
            self.remaining = self.rows_per_statement;
            Ok(())
        }

        async fn fetch_all(&mut self) -> Result<u64> {
            Ok(std::mem::take(&mut self.remaining))
        }

        async fn fetch_many(&mut self, batch_size: u32) -> Result<u64> {
            self.batch_calls += 1;
            let fetched = self.remaining.min(batch_size as u64);
            self.remaining -= fetched;
            Ok(fetched)
        }
    }

    fn queries(list: &[&str]) -> Vec<String> {
        list.iter().map(|q| q.to_string()).collect()
    }

    #[tokio::test]
    async fn test_fetch_all() {
        let mut cursor = FakeCursor { rows_per_statement: 7, ..Default::default() };
        let measurement = measure_queries(&mut cursor, &queries(&["SELECT 1"]), 0, None)
            .await
            .unwrap();
        assert_eq!(measurement.rows, 7);
        assert_eq!(cursor.batch_calls, 0);
        assert!(measurement.duration_ms >= 0.0);
    }

    #[tokio::test]
    async fn test_fetch_many_sums_batches_until_empty() {
        let mut cursor = FakeCursor { rows_per_statement: 10, ..Default::default() };
        let measurement = measure_queries(&mut cursor, &queries(&["SELECT 1"]), 3, None)
            .await
            .unwrap();
        assert_eq!(measurement.rows, 10);
        // 3 + 3 + 3 + 1, then the empty batch
        assert_eq!(cursor.batch_calls, 5);
    }

    #[tokio::test]
    async fn test_all_statements_run_last_one_counts() {
        let mut cursor = FakeCursor { rows_per_statement: 2, ..Default::default() };
        let list = queries(&["SELECT a FROM t1", "SELECT b FROM t2"]);
        let measurement = measure_queries(&mut cursor, &list, 0, None).await.unwrap();
        assert_eq!(cursor.executed, list);
        assert_eq!(measurement.rows, 2);
    }

    #[tokio::test]
    async fn test_hard_parse_rewrites_every_statement() {
        struct FixedClock(AtomicI64);
        impl Clock for FixedClock {
            fn now_millis(&self) -> i64 {
                self.0.fetch_add(1, Ordering::SeqCst)
            }
        }

        let hard_parse = HardParse::with_clock(Arc::new(FixedClock(AtomicI64::new(5))));
        let mut cursor = FakeCursor::default();
        measure_queries(&mut cursor, &queries(&["SELECT 1", "SELECT 1"]), 0, Some(&hard_parse))
            .await
            .unwrap();

        assert_eq!(cursor.executed[0], "SELECT 1 /* hard parse interrupt: 5 */ ");
        assert_eq!(cursor.executed[1], "SELECT 1 /* hard parse interrupt: 6 */ ");
    }

    #[tokio::test]
    async fn test_empty_statement_list_rejected() {
        let mut cursor = FakeCursor::default();
        let error = measure_queries(&mut cursor, &[], 0, None).await.unwrap_err();
        assert_eq!(error.category(), "VALIDATION");
    }

    #[tokio::test]
    async fn test_database_error_becomes_failure() {
        let mut cursor = FakeCursor {
            fail_on: Some("SELECT * FROM missing".to_string()),
            ..Default::default()
        };
        let outcome = run_one_sql_execution(
            &mut cursor,
            &queries(&["SELECT * FROM missing"]),
            0,
            None,
            Duration::from_secs(2),
        )
        .await;

        match outcome {
            TrialOutcome::Failure(detail) => {
                assert!(detail.starts_with("[DATABASE]"));
                assert!(detail.contains("ORA-00942"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_success_carries_rows() {
        let mut cursor = FakeCursor { rows_per_statement: 4, ..Default::default() };
        let outcome = run_one_sql_execution(&mut cursor, &queries(&["SELECT 1"]), 2, None, Duration::from_secs(2)).await;
        assert!(matches!(outcome, TrialOutcome::Success { rows: Some(4), .. }));
    }
}
