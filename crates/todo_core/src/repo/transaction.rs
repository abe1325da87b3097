//! Transaction scope helper for multi-statement writes.
//!
//! # Invariants
//! - Work either commits as a whole or is rolled back.
//! - A failed rollback is reported together with the error that caused it.
//! - A transaction SQLite already aborted (`RAISE(ROLLBACK)`, `SQLITE_FULL`)
//!   is not rolled back twice and reports only its cause.

use crate::repo::error::{RepoError, RepoResult};
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Runs `work` inside a `BEGIN IMMEDIATE` transaction on `conn`.
///
/// The write lock is taken up front so concurrent writers queue on the busy
/// timeout instead of failing mid-transaction on lock upgrade.
pub(crate) fn with_immediate_tx<T, F>(conn: &Connection, work: F) -> RepoResult<T>
where
    F: FnOnce(&Transaction<'_>) -> RepoResult<T>,
{
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    match work(&tx) {
        Ok(value) => {
            tx.commit()?;
            Ok(value)
        }
        Err(cause) => {
            let aborted_by_engine = tx.is_autocommit();
            Err(abandon(cause, aborted_by_engine, || tx.rollback()))
        }
    }
}

/// Resolves the error to report for a failed transaction body.
fn abandon<F>(cause: RepoError, aborted_by_engine: bool, rollback: F) -> RepoError
where
    F: FnOnce() -> rusqlite::Result<()>,
{
    if aborted_by_engine {
        return cause;
    }
    match rollback() {
        Ok(()) => cause,
        Err(rollback) => RepoError::RollbackFailed {
            cause: Box::new(cause),
            rollback,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{abandon, with_immediate_tx};
    use crate::repo::error::{Entity, RepoError};
    use rusqlite::Connection;

    fn conn_with_table() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (v INTEGER NOT NULL);")
            .unwrap();
        conn
    }

    fn row_count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM t;", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn error_in_work_rolls_back_earlier_statements() {
        let conn = conn_with_table();
        let err = with_immediate_tx(&conn, |tx| -> Result<(), RepoError> {
            tx.execute("INSERT INTO t (v) VALUES (1);", [])?;
            Err(RepoError::NotFound(Entity::List, 1))
        })
        .unwrap_err();

        assert!(matches!(err, RepoError::NotFound(Entity::List, 1)));
        assert_eq!(row_count(&conn), 0);
        assert!(conn.is_autocommit());
    }

    #[test]
    fn transaction_aborted_by_sqlite_reports_only_the_cause() {
        let conn = conn_with_table();
        conn.execute_batch(
            "CREATE TEMP TRIGGER abort_second BEFORE INSERT ON t WHEN NEW.v = 2
             BEGIN
                SELECT RAISE(ROLLBACK, 'boom');
             END;",
        )
        .unwrap();

        let err = with_immediate_tx(&conn, |tx| {
            tx.execute("INSERT INTO t (v) VALUES (1);", [])?;
            tx.execute("INSERT INTO t (v) VALUES (2);", [])?;
            Ok(())
        })
        .unwrap_err();

        assert!(matches!(err, RepoError::Db(_)), "unexpected error: {err}");
        assert!(err.to_string().contains("boom"));
        assert_eq!(row_count(&conn), 0);
        assert!(conn.is_autocommit());
    }

    #[test]
    fn failed_rollback_keeps_both_errors() {
        let err = abandon(RepoError::NotFound(Entity::List, 3), false, || {
            Err(rusqlite::Error::InvalidQuery)
        });

        match err {
            RepoError::RollbackFailed { cause, rollback } => {
                assert!(matches!(*cause, RepoError::NotFound(Entity::List, 3)));
                assert!(matches!(rollback, rusqlite::Error::InvalidQuery));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn engine_aborted_transaction_is_not_rolled_back_again() {
        let err = abandon(RepoError::EmptyUpdate, true, || {
            panic!("rollback must not run after an engine abort")
        });
        assert!(matches!(err, RepoError::EmptyUpdate));
    }

    #[test]
    fn successful_work_is_committed() {
        let conn = conn_with_table();
        let value = with_immediate_tx(&conn, |tx| {
            tx.execute("INSERT INTO t (v) VALUES (7);", [])?;
            Ok(tx.last_insert_rowid())
        })
        .unwrap();

        assert_eq!(value, 1);
        assert_eq!(row_count(&conn), 1);
    }
}
