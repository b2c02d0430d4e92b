use std::time::Duration;

use permission_application::{PlayerRoleRepository, RoleRepository};
use permission_core::{AppError, PlayerId};
use permission_domain::{PermissionNode, PermissionState, Player, Role};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use super::PostgresPermissionRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(4)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres permission repository tests: {error}");
    }

    Some(pool)
}

fn repository(pool: PgPool) -> PostgresPermissionRepository {
    PostgresPermissionRepository::new(pool, Duration::from_secs(5))
}

#[tokio::test]
async fn stalled_statement_times_out_as_internal() {
    let Ok(pool) =
        PgPoolOptions::new().connect_lazy("postgres://localhost/permission_unreachable")
    else {
        panic!("lazy pool should build without connecting");
    };
    let repository = PostgresPermissionRepository::new(pool, Duration::from_millis(50));

    let result = repository
        .bounded(
            "list roles",
            std::future::pending::<Result<(), sqlx::Error>>(),
            |error| AppError::Internal(error.to_string()),
        )
        .await;

    assert!(matches!(
        result,
        Err(AppError::Internal(ref message)) if message.contains("timed out after 50 ms")
    ));
}

fn unique_role_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

fn role(id: &str, priority: u32, display_name: Option<&str>) -> Role {
    match Role::new(id, priority, display_name.map(str::to_owned)) {
        Ok(role) => role,
        Err(error) => panic!("invalid test role: {error}"),
    }
}

#[tokio::test]
async fn role_roundtrip_preserves_permissions() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = repository(pool);
    let role_id = unique_role_id("admin");
    let Ok(node) = PermissionNode::new("admin.ban", PermissionState::Deny) else {
        panic!("node should be valid");
    };
    let Ok(stored) = Role::with_permissions(
        role_id.as_str(),
        u32::MAX,
        Some("[Admin] {{username}}".to_owned()),
        vec![node],
    ) else {
        panic!("role should be valid");
    };

    assert!(repository.insert_role(&stored).await.is_ok());
    let found = repository.find_role(role_id.as_str()).await;

    assert!(matches!(found, Ok(Some(ref role)) if *role == stored));
    assert!(matches!(repository.role_exists(role_id.as_str()).await, Ok(true)));
    let listed = repository.list_roles().await;
    assert!(matches!(listed, Ok(roles) if roles.iter().any(|role| role.id() == role_id)));
}

#[tokio::test]
async fn duplicate_role_insert_is_conflict() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = repository(pool);
    let role_id = unique_role_id("dup");

    assert!(repository.insert_role(&role(&role_id, 1, None)).await.is_ok());
    let second = repository.insert_role(&role(&role_id, 2, None)).await;

    assert!(matches!(second, Err(AppError::Conflict { .. })));
}

#[tokio::test]
async fn replace_updates_stored_role_and_reports_missing() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = repository(pool);
    let role_id = unique_role_id("vip");
    assert!(repository.insert_role(&role(&role_id, 10, None)).await.is_ok());

    let replaced = repository
        .replace_role(&role(&role_id, 3, Some("VIP")))
        .await;
    let missing = repository
        .replace_role(&role(&unique_role_id("ghost"), 3, None))
        .await;

    assert!(replaced.is_ok());
    let found = repository.find_role(role_id.as_str()).await;
    assert!(matches!(found, Ok(Some(ref role)) if role.priority() == 3 && role.display_name() == Some("VIP")));
    assert!(matches!(missing, Err(AppError::NotFound { .. })));
}

#[tokio::test]
async fn player_set_mutations_report_existence_and_change() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = repository(pool);
    let player_id = PlayerId::new();

    let absent = repository.add_role_to_player(player_id, "admin").await;
    assert!(matches!(absent, Ok(change) if !change.player_existed && !change.changed));

    assert!(repository.insert_player(&Player::new(player_id)).await.is_ok());
    let duplicate = repository.insert_player(&Player::new(player_id)).await;
    assert!(matches!(duplicate, Err(AppError::Conflict { .. })));

    let added = repository.add_role_to_player(player_id, "admin").await;
    let repeated = repository.add_role_to_player(player_id, "admin").await;
    assert!(matches!(added, Ok(change) if change.player_existed && change.changed));
    assert!(matches!(repeated, Ok(change) if change.player_existed && !change.changed));

    let removed = repository.remove_role_from_player(player_id, "admin").await;
    let removed_again = repository.remove_role_from_player(player_id, "admin").await;
    assert!(matches!(removed, Ok(change) if change.changed));
    assert!(matches!(removed_again, Ok(change) if change.player_existed && !change.changed));

    let found = repository.find_player(player_id).await;
    assert!(matches!(found, Ok(Some(ref player)) if *player == Player::new(player_id)));
}

#[tokio::test]
async fn concurrent_adds_of_the_same_role_change_the_set_once() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = repository(pool);
    let player_id = PlayerId::new();
    assert!(repository.insert_player(&Player::new(player_id)).await.is_ok());

    let attempts = (0..8).map(|_| {
        let repository = repository.clone();
        tokio::spawn(async move { repository.add_role_to_player(player_id, "admin").await })
    });
    let mut changed = 0;
    for attempt in attempts.collect::<Vec<_>>() {
        match attempt.await {
            Ok(Ok(change)) if change.changed => changed += 1,
            Ok(Ok(_)) => {}
            Ok(Err(error)) => panic!("add failed: {error}"),
            Err(error) => panic!("task failed: {error}"),
        }
    }

    assert_eq!(changed, 1);
}
