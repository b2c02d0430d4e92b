use std::sync::Arc;

use permission_application::{PlayerRoleRepository, RoleRepository};
use permission_core::{AppError, PlayerId};
use permission_domain::{DEFAULT_ROLE_ID, Player, Role};

use super::InMemoryPermissionRepository;

fn role(id: &str, priority: u32) -> Role {
    match Role::new(id, priority, None) {
        Ok(role) => role,
        Err(error) => panic!("invalid test role: {error}"),
    }
}

#[tokio::test]
async fn roles_list_in_insertion_order() {
    let repository = InMemoryPermissionRepository::new();

    for id in ["zeta", "alpha", "mid"] {
        assert!(repository.insert_role(&role(id, 1)).await.is_ok());
    }
    let listed = repository.list_roles().await;

    let Ok(listed) = listed else {
        panic!("roles should list");
    };
    let ids: Vec<&str> = listed.iter().map(Role::id).collect();
    assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
}

#[tokio::test]
async fn insert_and_replace_enforce_presence() {
    let repository = InMemoryPermissionRepository::new();

    assert!(repository.insert_role(&role("admin", 5)).await.is_ok());
    let duplicate = repository.insert_role(&role("admin", 6)).await;
    let missing = repository.replace_role(&role("ghost", 1)).await;
    let replaced = repository.replace_role(&role("admin", 1)).await;

    assert!(matches!(duplicate, Err(AppError::Conflict { .. })));
    assert!(matches!(missing, Err(AppError::NotFound { .. })));
    assert!(replaced.is_ok());
    assert!(matches!(
        repository.find_role("admin").await,
        Ok(Some(ref role)) if role.priority() == 1
    ));
    assert!(matches!(repository.role_exists("ghost").await, Ok(false)));
}

#[tokio::test]
async fn set_mutations_on_missing_player_report_absence() {
    let repository = InMemoryPermissionRepository::new();

    let added = repository.add_role_to_player(PlayerId::new(), "admin").await;
    let removed = repository
        .remove_role_from_player(PlayerId::new(), "admin")
        .await;

    assert!(matches!(added, Ok(change) if !change.player_existed && !change.changed));
    assert!(matches!(removed, Ok(change) if !change.player_existed && !change.changed));
}

#[tokio::test]
async fn concurrent_adds_change_the_set_once() {
    let repository = Arc::new(InMemoryPermissionRepository::new());
    let player_id = PlayerId::new();
    assert!(repository.insert_player(&Player::new(player_id)).await.is_ok());

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let repository = repository.clone();
            tokio::spawn(async move { repository.add_role_to_player(player_id, "admin").await })
        })
        .collect();
    let mut changed = 0;
    for handle in handles {
        if let Ok(Ok(change)) = handle.await
            && change.changed
        {
            changed += 1;
        }
    }

    assert_eq!(changed, 1);
    let found = repository.find_player(player_id).await;
    assert!(matches!(
        found,
        Ok(Some(ref player)) if player.role_ids().contains("admin") && player.role_ids().contains(DEFAULT_ROLE_ID)
    ));
}
