//! SQLite-backed store of inquirers and their logged interactions.
//!
//! The registry keeps the session's inquiry records in memory; this store is
//! what survives across runs. Its two tables mirror the intake desk's log
//! book: who asked (`inquirer`) and each call they made (`inquiry_log`).

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};

/// A row from the `inquirer` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InquirerRow {
    /// Row ID, assigned by SQLite.
    pub id: i64,
    /// First name.
    pub first_name: String,
    /// Last name; the schema allows this to be absent.
    pub last_name: Option<String>,
    /// Services phone number.
    pub phone: String,
}

/// A row from the `inquiry_log` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionRow {
    /// Row ID, assigned by SQLite.
    pub id: i64,
    /// The `inquirer` row this call belongs to.
    pub inquirer: i64,
    /// The date of the call, as entered.
    pub call_date: String,
    /// What the caller reported.
    pub details: String,
}

/// The persistent inquirer/interaction store.
#[derive(Debug)]
pub struct InquiryLog {
    conn: Connection,
}

impl InquiryLog {
    /// Opens (or creates) a store at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema cannot
    /// be created.
    pub fn open(path: &Path) -> Result<Self, Error> {
        Self::prepare(Connection::open(path)?)
    }

    /// Opens a transient in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub fn open_in_memory() -> Result<Self, Error> {
        Self::prepare(Connection::open_in_memory()?)
    }

    fn prepare(conn: Connection) -> Result<Self, Error> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS inquirer (
                id INTEGER PRIMARY KEY,
                firstname TEXT NOT NULL,
                lastname TEXT,
                phonenumber TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS inquiry_log (
                id INTEGER PRIMARY KEY,
                inquirer INTEGER NOT NULL REFERENCES inquirer(id),
                calldate TEXT NOT NULL,
                details TEXT NOT NULL
            );",
        )?;
        Ok(Self { conn })
    }

    /// Inserts an inquirer row and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_inquirer(
        &self,
        first_name: &str,
        last_name: Option<&str>,
        phone: &str,
    ) -> Result<i64, Error> {
        self.conn.execute(
            "INSERT INTO inquirer (firstname, lastname, phonenumber) VALUES (?1, ?2, ?3)",
            params![first_name, last_name, phone],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Inserts an interaction row for an existing inquirer and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_interaction(
        &self,
        inquirer: i64,
        call_date: &str,
        details: &str,
    ) -> Result<i64, Error> {
        self.conn.execute(
            "INSERT INTO inquiry_log (inquirer, calldate, details) VALUES (?1, ?2, ?3)",
            params![inquirer, call_date, details],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Reports whether an inquirer row with the given ID exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn contains_inquirer(&self, id: i64) -> Result<bool, Error> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM inquirer WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn find_inquirer(
        &self,
        first_name: &str,
        last_name: Option<&str>,
        phone: &str,
    ) -> Result<Option<i64>, Error> {
        // `IS` instead of `=` so a NULL last name still matches.
        let id = self
            .conn
            .query_row(
                "SELECT id FROM inquirer
                 WHERE firstname = ?1 AND lastname IS ?2 AND phonenumber = ?3",
                params![first_name, last_name, phone],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    /// Records a complete inquiry: the inquirer row is reused when one with
    /// the same identity tuple exists, otherwise inserted, and the
    /// interaction is appended against it.
    ///
    /// Returns the inquirer row's ID.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the statements fail.
    pub fn record(
        &self,
        first_name: &str,
        last_name: Option<&str>,
        phone: &str,
        call_date: &str,
        details: &str,
    ) -> Result<i64, Error> {
        let inquirer = match self.find_inquirer(first_name, last_name, phone)? {
            Some(id) => id,
            None => self.insert_inquirer(first_name, last_name, phone)?,
        };
        self.insert_interaction(inquirer, call_date, details)?;
        Ok(inquirer)
    }

    /// Returns every inquirer row, in ID order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn inquirers(&self) -> Result<Vec<InquirerRow>, Error> {
        let mut statement = self
            .conn
            .prepare("SELECT id, firstname, lastname, phonenumber FROM inquirer ORDER BY id")?;
        let rows = statement.query_map([], |row| {
            Ok(InquirerRow {
                id: row.get(0)?,
                first_name: row.get(1)?,
                last_name: row.get(2)?,
                phone: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    /// Returns every interaction row, in ID order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn interactions(&self) -> Result<Vec<InteractionRow>, Error> {
        let mut statement = self
            .conn
            .prepare("SELECT id, inquirer, calldate, details FROM inquiry_log ORDER BY id")?;
        let rows = statement.query_map([], |row| {
            Ok(InteractionRow {
                id: row.get(0)?,
                inquirer: row.get(1)?,
                call_date: row.get(2)?,
                details: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<_, _>>()?)
    }
}

/// Errors arising from the inquiry store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The underlying SQLite operation failed.
    #[error("inquiry store error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InquiryLog {
        InquiryLog::open_in_memory().unwrap()
    }

    #[test]
    fn inserted_rows_come_back_in_order() {
        let store = store();

        let nia = store
            .insert_inquirer("Nia", Some("Brown"), "555-0100")
            .unwrap();
        let omar = store.insert_inquirer("Omar", None, "555-0101").unwrap();
        store
            .insert_interaction(nia, "2024-03-05", "seen near the river")
            .unwrap();
        store
            .insert_interaction(omar, "2024-03-06", "asked about shelter b")
            .unwrap();

        let inquirers = store.inquirers().unwrap();
        assert_eq!(inquirers.len(), 2);
        assert_eq!(inquirers[0].first_name, "Nia");
        assert_eq!(inquirers[0].last_name.as_deref(), Some("Brown"));
        assert_eq!(inquirers[1].first_name, "Omar");
        assert_eq!(inquirers[1].last_name, None);

        let interactions = store.interactions().unwrap();
        assert_eq!(interactions.len(), 2);
        assert_eq!(interactions[0].inquirer, nia);
        assert_eq!(interactions[0].details, "seen near the river");
        assert_eq!(interactions[1].inquirer, omar);
    }

    #[test]
    fn contains_inquirer_checks_by_row_id() {
        let store = store();
        let id = store
            .insert_inquirer("Nia", Some("Brown"), "555-0100")
            .unwrap();

        assert!(store.contains_inquirer(id).unwrap());
        assert!(!store.contains_inquirer(id + 1).unwrap());
    }

    #[test]
    fn record_reuses_an_existing_inquirer_row() {
        let store = store();

        let first = store
            .record("Nia", Some("Brown"), "555-0100", "2024-03-05", "first call")
            .unwrap();
        let second = store
            .record("Nia", Some("Brown"), "555-0100", "2024-03-06", "second call")
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(store.inquirers().unwrap().len(), 1);
        assert_eq!(store.interactions().unwrap().len(), 2);
    }

    #[test]
    fn record_matches_null_last_names() {
        let store = store();

        let first = store
            .record("Omar", None, "555-0101", "2024-03-05", "first call")
            .unwrap();
        let second = store
            .record("Omar", None, "555-0101", "2024-03-06", "second call")
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(store.inquirers().unwrap().len(), 1);
    }

    #[test]
    fn different_identity_tuples_get_separate_rows() {
        let store = store();

        store
            .record("Nia", Some("Brown"), "555-0100", "2024-03-05", "x")
            .unwrap();
        store
            .record("Nia", Some("Brown"), "555-0199", "2024-03-05", "x")
            .unwrap();
        store
            .record("Nia", None, "555-0100", "2024-03-05", "x")
            .unwrap();

        assert_eq!(store.inquirers().unwrap().len(), 3);
    }

    #[test]
    fn reopening_a_file_backed_store_keeps_rows() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("inquiries.db");

        {
            let store = InquiryLog::open(&path).unwrap();
            store
                .record("Nia", Some("Brown"), "555-0100", "2024-03-05", "x")
                .unwrap();
        }

        let reopened = InquiryLog::open(&path).unwrap();
        assert_eq!(reopened.inquirers().unwrap().len(), 1);
        assert_eq!(reopened.interactions().unwrap().len(), 1);
    }
}
