use super::*;

impl PostgresPermissionRepository {
    pub(super) async fn find_player_impl(&self, player_id: PlayerId) -> AppResult<Option<Player>> {
        let row = self
            .bounded(
                "find player",
                sqlx::query_as::<_, PlayerRow>(
                    r#"
                    SELECT id, role_ids
                    FROM players
                    WHERE id = $1
                    "#,
                )
                .bind(player_id.as_uuid())
                .fetch_optional(&self.pool),
                |error| {
                    AppError::Internal(format!("failed to find player '{player_id}': {error}"))
                },
            )
            .await?;

        Ok(row.map(Player::from))
    }

    pub(super) async fn insert_player_impl(&self, player: &Player) -> AppResult<()> {
        let player_id = player.id();
        let role_ids: Vec<String> = player.role_ids().iter().cloned().collect();

        self.bounded(
            "insert player",
            sqlx::query(
                r#"
                INSERT INTO players (id, role_ids)
                VALUES ($1, $2)
                "#,
            )
            .bind(player_id.as_uuid())
            .bind(role_ids)
            .execute(&self.pool),
            |error| {
                if is_unique_violation(&error) {
                    return AppError::conflict(format!("player '{player_id}' already exists"));
                }

                AppError::Internal(format!("failed to insert player '{player_id}': {error}"))
            },
        )
        .await
        .map(|_| ())
    }

    pub(super) async fn add_role_to_player_impl(
        &self,
        player_id: PlayerId,
        role_id: &str,
    ) -> AppResult<RoleSetChange> {
        // The guarded UPDATE is re-evaluated against the committed row when it
        // races another writer, so only one concurrent add can report a change.
        let row = self
            .bounded(
                "add role to player",
                sqlx::query_as::<_, RoleSetChangeRow>(
                    r#"
                    WITH target AS (
                        SELECT id FROM players WHERE id = $1
                    ),
                    updated AS (
                        UPDATE players
                        SET role_ids = array_append(role_ids, $2::TEXT),
                            updated_at = now()
                        WHERE id = $1 AND NOT ($2::TEXT = ANY (role_ids))
                        RETURNING id
                    )
                    SELECT
                        EXISTS (SELECT 1 FROM target) AS player_existed,
                        EXISTS (SELECT 1 FROM updated) AS changed
                    "#,
                )
                .bind(player_id.as_uuid())
                .bind(role_id)
                .fetch_one(&self.pool),
                |error| {
                    AppError::Internal(format!(
                        "failed to add role '{role_id}' to player '{player_id}': {error}"
                    ))
                },
            )
            .await?;

        Ok(row.into())
    }

    pub(super) async fn remove_role_from_player_impl(
        &self,
        player_id: PlayerId,
        role_id: &str,
    ) -> AppResult<RoleSetChange> {
        let row = self
            .bounded(
                "remove role from player",
                sqlx::query_as::<_, RoleSetChangeRow>(
                    r#"
                    WITH target AS (
                        SELECT id FROM players WHERE id = $1
                    ),
                    updated AS (
                        UPDATE players
                        SET role_ids = array_remove(role_ids, $2::TEXT),
                            updated_at = now()
                        WHERE id = $1 AND $2::TEXT = ANY (role_ids)
                        RETURNING id
                    )
                    SELECT
                        EXISTS (SELECT 1 FROM target) AS player_existed,
                        EXISTS (SELECT 1 FROM updated) AS changed
                    "#,
                )
                .bind(player_id.as_uuid())
                .bind(role_id)
                .fetch_one(&self.pool),
                |error| {
                    AppError::Internal(format!(
                        "failed to remove role '{role_id}' from player '{player_id}': {error}"
                    ))
                },
            )
            .await?;

        Ok(row.into())
    }
}
