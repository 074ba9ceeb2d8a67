//! Tests for the in-memory repositories.

use rolebot_core::{NewRole, NewRoleList};
use rolebot_database::{InMemoryRoleListRepository, InMemoryRoleRepository};
use rolebot_interface::{RoleListRepository, RoleRepository};

#[tokio::test]
async fn test_create_assigns_sequential_ids() {
    let repo = InMemoryRoleRepository::new();

    let first = repo.create(&NewRole::new("100", "Admin")).await.unwrap();
    let second = repo.create(&NewRole::new("200", "Mod")).await.unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(repo.len().await, 2);
}

#[tokio::test]
async fn test_duplicate_external_id_is_unique_violation() {
    let repo = InMemoryRoleRepository::new();
    repo.create(&NewRole::new("100", "Admin")).await.unwrap();

    let err = repo
        .create(&NewRole::new("100", "Admin again"))
        .await
        .unwrap_err();

    assert!(err.is_unique_violation());
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_get_by_external_id_missing_is_none() {
    let repo = InMemoryRoleRepository::new();
    assert!(repo.get_by_external_id("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn test_role_list_handle_scopes_members() {
    let roles = InMemoryRoleRepository::new();
    let lists = InMemoryRoleListRepository::new();

    let admin = roles.create(&NewRole::new("100", "Admin")).await.unwrap();
    let colours = lists.create(&NewRoleList::new("Colours")).await.unwrap();
    let games = lists
        .create(&NewRoleList::new("Games").with_description("What you play"))
        .await
        .unwrap();

    colours.add_member(&admin, "🔴").await.unwrap();

    let members = colours.list_members().await.unwrap();
    assert_eq!(members, vec![admin]);
    assert!(games.list_members().await.unwrap().is_empty());
    assert_eq!(games.role_list().description, "What you play");
}

#[tokio::test]
async fn test_emoji_unique_within_list_only() {
    let roles = InMemoryRoleRepository::new();
    let lists = InMemoryRoleListRepository::new();

    let admin = roles.create(&NewRole::new("100", "Admin")).await.unwrap();
    let mod_role = roles.create(&NewRole::new("200", "Mod")).await.unwrap();
    let first = lists.create(&NewRoleList::new("First")).await.unwrap();
    let second = lists.create(&NewRoleList::new("Second")).await.unwrap();

    first.add_member(&admin, "⭐").await.unwrap();
    let err = first.add_member(&mod_role, "⭐").await.unwrap_err();
    assert!(err.is_unique_violation());

    second.add_member(&mod_role, "⭐").await.unwrap();
}

#[tokio::test]
async fn test_get_reopens_handle_and_summarize_counts() {
    let roles = InMemoryRoleRepository::new();
    let lists = InMemoryRoleListRepository::new();

    let admin = roles.create(&NewRole::new("100", "Admin")).await.unwrap();
    let created = lists.create(&NewRoleList::new("Staff")).await.unwrap();
    lists.create(&NewRoleList::new("Empty")).await.unwrap();
    created.add_member(&admin, "🛡️").await.unwrap();

    let reopened = lists.get(created.role_list().id).await.unwrap().unwrap();
    let entries = reopened.list_entries().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].emoji, "🛡️");

    assert!(lists.get(999).await.unwrap().is_none());

    let summary = lists.summarize().await.unwrap();
    let counts: Vec<(&str, i64)> = summary
        .iter()
        .map(|s| (s.role_list.name.as_str(), s.role_count))
        .collect();
    assert_eq!(counts, vec![("Staff", 1), ("Empty", 0)]);
}
