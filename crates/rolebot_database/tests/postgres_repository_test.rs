//! PostgreSQL repository tests.
//!
//! Each test runs inside a test transaction that is never committed.
//! Requires `DATABASE_URL` pointing at a scratch database.

use diesel::Connection;
use rolebot_core::{NewRole, NewRoleList};
use rolebot_database::{
    PgRoleListRepository, PgRoleRepository, establish_connection_from_env, run_pending_migrations,
};
use rolebot_interface::{RoleListRepository, RoleRepository};
use std::sync::Arc;
use tokio::sync::Mutex;

fn test_connection() -> Arc<Mutex<diesel::PgConnection>> {
    let mut conn = establish_connection_from_env().expect("DATABASE_URL must be set");
    run_pending_migrations(&mut conn).expect("migrations apply");
    conn.begin_test_transaction()
        .expect("test transaction starts");
    Arc::new(Mutex::new(conn))
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn test_role_round_trip_and_uniqueness() {
    let repo = PgRoleRepository::from_arc(test_connection());

    let role = repo
        .create(&NewRole::new("pg-test-100", "Admin"))
        .await
        .unwrap();
    let found = repo.get_by_external_id("pg-test-100").await.unwrap();
    assert_eq!(found, Some(role));

    let err = repo
        .create(&NewRole::new("pg-test-100", "Admin"))
        .await
        .unwrap_err();
    assert!(err.is_unique_violation());
}

#[tokio::test]
#[ignore] // Requires PostgreSQL
async fn test_role_list_members_and_summary() {
    let conn = test_connection();
    let roles = PgRoleRepository::from_arc(Arc::clone(&conn));
    let lists = PgRoleListRepository::from_arc(conn);

    let admin = roles
        .create(&NewRole::new("pg-test-200", "Admin"))
        .await
        .unwrap();
    let list = lists
        .create(&NewRoleList::new("Staff").with_description("People in charge"))
        .await
        .unwrap();
    list.add_member(&admin, "🛡️").await.unwrap();

    let reopened = lists.get(list.role_list().id).await.unwrap().unwrap();
    assert_eq!(reopened.list_members().await.unwrap(), vec![admin.clone()]);

    let summary = lists.summarize().await.unwrap();
    let staff = summary
        .iter()
        .find(|s| s.role_list.id == list.role_list().id)
        .unwrap();
    assert_eq!(staff.role_count, 1);

    // Leaves the transaction aborted, so it goes last.
    let err = list.add_member(&admin, "🛡️").await.unwrap_err();
    assert!(err.is_unique_violation());
}
