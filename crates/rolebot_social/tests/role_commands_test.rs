//! Tests for the role-list command group against in-memory storage.

use async_trait::async_trait;
use rolebot_cache::{ExternalRoleCache, RoleCacheConfig};
use rolebot_core::{ExternalRole, NewExternalRole};
use rolebot_database::{InMemoryRoleListRepository, InMemoryRoleRepository};
use rolebot_error::RolebotResult;
use rolebot_interface::{ExternalRoleSource, RoleRepository};
use rolebot_social::{
    CommandInvocation, CommandOption, CommandRegistry, CommandReply, CommandRouter,
    register_role_commands,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// Guild double issuing sequential role IDs.
#[derive(Default)]
struct FakeGuild {
    roles: Mutex<HashMap<String, ExternalRole>>,
    next: AtomicUsize,
}

#[async_trait]
impl ExternalRoleSource for FakeGuild {
    async fn create(&self, new_role: &NewExternalRole) -> RolebotResult<ExternalRole> {
        let id = 5000 + self.next.fetch_add(1, Ordering::SeqCst);
        let role = ExternalRole {
            external_id: id.to_string(),
            name: new_role.name.clone(),
        };
        self.roles
            .lock()
            .await
            .insert(role.external_id.clone(), role.clone());
        Ok(role)
    }

    async fn get_by_external_id(&self, external_id: &str) -> RolebotResult<Option<ExternalRole>> {
        Ok(self.roles.lock().await.get(external_id).cloned())
    }
}

struct Harness {
    router: CommandRouter,
    roles: Arc<InMemoryRoleRepository>,
    guild: Arc<FakeGuild>,
}

fn harness() -> Harness {
    let roles = Arc::new(InMemoryRoleRepository::new());
    let guild = Arc::new(FakeGuild::default());
    let lists = Arc::new(InMemoryRoleListRepository::new());
    let cache = ExternalRoleCache::new(roles.clone(), guild.clone(), RoleCacheConfig::default());

    let mut registry = CommandRegistry::new();
    register_role_commands(&mut registry, lists, cache);

    Harness {
        router: CommandRouter::new(registry),
        roles,
        guild,
    }
}

fn role_list(sub: &str, options: Vec<CommandOption>) -> CommandInvocation {
    CommandInvocation::new("role-list", vec![CommandOption::sub_command(sub, options)])
}

fn success(reply: CommandReply) -> rolebot_social::CommandResponse {
    match reply {
        CommandReply::Success(Some(response)) => response,
        other => panic!("expected a response, got {other:?}"),
    }
}

fn failure(reply: CommandReply) -> String {
    match reply {
        CommandReply::Failure { message } => message,
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_registers_every_role_list_command() {
    let h = harness();
    assert_eq!(
        h.router.registry().names(),
        vec![
            "role-list add-role",
            "role-list create",
            "role-list create-role",
            "role-list list",
            "role-list roles",
        ]
    );

    let mut expected = rolebot_social::role_command_names();
    expected.sort();
    assert_eq!(h.router.registry().names(), expected);
}

#[tokio::test]
async fn test_create_then_list() {
    let h = harness();

    let empty = success(h.router.dispatch(&role_list("list", vec![])).await);
    assert!(empty.description().contains("No role lists"));

    let created = success(
        h.router
            .dispatch(&role_list(
                "create",
                vec![
                    CommandOption::string("name", "Colours"),
                    CommandOption::string("description", "Pick a colour"),
                ],
            ))
            .await,
    );
    assert_eq!(created.title(), "Role list created");
    assert_eq!(created.description(), "Colours");

    let listed = success(h.router.dispatch(&role_list("list", vec![])).await);
    assert_eq!(listed.fields().len(), 1);
    assert_eq!(listed.fields()[0].name(), "#1 Colours");
    assert_eq!(listed.fields()[0].value(), "Pick a colour (0 roles)");
}

#[tokio::test]
async fn test_create_role_then_add_existing_role() {
    let h = harness();
    h.router
        .dispatch(&role_list(
            "create",
            vec![CommandOption::string("name", "Colours")],
        ))
        .await;

    let created = success(
        h.router
            .dispatch(&role_list(
                "create-role",
                vec![
                    CommandOption::integer("list-id", 1),
                    CommandOption::string("name", "Red"),
                    CommandOption::string("emoji", "🔴"),
                ],
            ))
            .await,
    );
    assert_eq!(created.description(), "🔴 Red");
    assert_eq!(h.roles.len().await, 1);

    // A role that exists in the guild but not locally is pulled in by the cache.
    h.guild
        .create(&NewExternalRole {
            name: "Blue".to_string(),
        })
        .await
        .unwrap();
    success(
        h.router
            .dispatch(&role_list(
                "add-role",
                vec![
                    CommandOption::integer("list-id", 1),
                    CommandOption::string("role-id", "5001"),
                    CommandOption::string("emoji", "🔵"),
                ],
            ))
            .await,
    );
    assert!(h.roles.get_by_external_id("5001").await.unwrap().is_some());

    let roles = success(
        h.router
            .dispatch(&role_list("roles", vec![CommandOption::integer("list-id", 1)]))
            .await,
    );
    let entries: Vec<(&str, &str)> = roles
        .fields()
        .iter()
        .map(|f| (f.name().as_str(), f.value().as_str()))
        .collect();
    assert_eq!(entries, vec![("🔴", "Red"), ("🔵", "Blue")]);
}

#[tokio::test]
async fn test_user_facing_failures() {
    let h = harness();
    h.router
        .dispatch(&role_list(
            "create",
            vec![CommandOption::string("name", "Colours")],
        ))
        .await;

    let missing_list = failure(
        h.router
            .dispatch(&role_list("roles", vec![CommandOption::integer("list-id", 9)]))
            .await,
    );
    assert_eq!(missing_list, "Role list 9 does not exist.");

    let missing_role = failure(
        h.router
            .dispatch(&role_list(
                "add-role",
                vec![
                    CommandOption::integer("list-id", 1),
                    CommandOption::string("role-id", "424242"),
                    CommandOption::string("emoji", "⭐"),
                ],
            ))
            .await,
    );
    assert_eq!(missing_role, "Role 424242 does not exist.");

    let create_red = || {
        role_list(
            "create-role",
            vec![
                CommandOption::integer("list-id", 1),
                CommandOption::string("name", "Red"),
                CommandOption::string("emoji", "🔴"),
            ],
        )
    };
    success(h.router.dispatch(&create_red()).await);
    let duplicate = failure(h.router.dispatch(&create_red()).await);
    assert_eq!(duplicate, "🔴 is already used in this list.");
}

#[tokio::test]
async fn test_create_role_checks_list_before_creating() {
    let h = harness();

    let reply = h
        .router
        .dispatch(&role_list(
            "create-role",
            vec![
                CommandOption::integer("list-id", 3),
                CommandOption::string("name", "Red"),
                CommandOption::string("emoji", "🔴"),
            ],
        ))
        .await;

    assert_eq!(failure(reply), "Role list 3 does not exist.");
    assert!(h.guild.roles.lock().await.is_empty());
}

#[tokio::test]
async fn test_create_role_with_taken_emoji_leaves_guild_untouched() {
    let h = harness();
    h.router
        .dispatch(&role_list(
            "create",
            vec![CommandOption::string("name", "Colours")],
        ))
        .await;

    let create = |name: &str| {
        role_list(
            "create-role",
            vec![
                CommandOption::integer("list-id", 1),
                CommandOption::string("name", name),
                CommandOption::string("emoji", "X"),
            ],
        )
    };
    success(h.router.dispatch(&create("Red")).await);
    assert_eq!(h.guild.roles.lock().await.len(), 1);

    for _ in 0..2 {
        let reply = failure(h.router.dispatch(&create("Green")).await);
        assert_eq!(reply, "X is already used in this list.");
    }

    assert_eq!(h.guild.roles.lock().await.len(), 1);
    assert_eq!(h.roles.len().await, 1);
}
