#![allow(dead_code)]

use borrowbot_store::{db, migrations, StoreDescriptor};
use rusqlite::{params, Connection};
use tempfile::TempDir;

pub const RETRIEVED: &str = "2019-03-02 08:00:00";

/// Migrated on-disk database; keep the `TempDir` alive for the test's duration
pub struct TestDb {
    pub dir: TempDir,
    pub store: StoreDescriptor,
    pub conn: Connection,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let writable = StoreDescriptor::new(dir.path().join("borrow.db")).writable();
        let mut conn = db::open(&writable).expect("open");
        migrations::apply_migrations(&mut conn).expect("migrations");
        Self {
            store: StoreDescriptor::new(writable.path()),
            dir,
            conn,
        }
    }

    pub fn insert_submission(&self, id: &str, num_comments: i64) {
        self.conn
            .execute(
                "INSERT INTO submissions VALUES (?1, ?2, '2019-03-01 12:30:00', 12, ?3,
                 'https://forum.test', 0.93, '/r/borrow', 'borrow', 't5_2sfoe',
                 '[REQ] ($100)', 'Need help', 'alice', 't2_alice')",
                params![id, RETRIEVED, num_comments],
            )
            .expect("insert submission");
    }

    pub fn insert_comment(&self, id: &str, link: &str, created: &str) {
        self.conn
            .execute(
                "INSERT INTO comments VALUES (?1, ?2, ?3, 1, 'borrow', 't5_2sfoe', ?4, ?4,
                 '$loan 100', 'bob', 't2_bob')",
                params![id, RETRIEVED, created, link],
            )
            .expect("insert comment");
    }

    pub fn insert_user(&self, id: &str, name: &str) {
        self.conn
            .execute(
                "INSERT INTO user_lookup VALUES (?1, ?2, ?3)",
                params![id, name, RETRIEVED],
            )
            .expect("insert user");
    }

    pub fn insert_loan_request(&self, id: &str) {
        self.conn
            .execute(
                "INSERT INTO loan_requests VALUES (?1, ?2, 't3_abc', '2019-03-01 12:30:00',
                 '2019-03-01 12:31:05', '2019-03-29', 't2_alice', 'Springfield, IL, USA',
                 '100.00', '120.00', 0, 1, 0, 1)",
                params![id, RETRIEVED],
            )
            .expect("insert loan request");
    }
}
