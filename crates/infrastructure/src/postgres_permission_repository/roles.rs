use super::*;

impl PostgresPermissionRepository {
    pub(super) async fn list_roles_impl(&self) -> AppResult<Vec<Role>> {
        let rows = self
            .bounded(
                "list roles",
                sqlx::query_as::<_, RoleRow>(
                    r#"
                    SELECT id, priority, display_name, permissions
                    FROM roles
                    ORDER BY created_at, id
                    "#,
                )
                .fetch_all(&self.pool),
                |error| AppError::Internal(format!("failed to list roles: {error}")),
            )
            .await?;

        rows.into_iter().map(RoleRow::into_role).collect()
    }

    pub(super) async fn find_role_impl(&self, role_id: &str) -> AppResult<Option<Role>> {
        let row = self
            .bounded(
                "find role",
                sqlx::query_as::<_, RoleRow>(
                    r#"
                    SELECT id, priority, display_name, permissions
                    FROM roles
                    WHERE id = $1
                    "#,
                )
                .bind(role_id)
                .fetch_optional(&self.pool),
                |error| AppError::Internal(format!("failed to find role '{role_id}': {error}")),
            )
            .await?;

        row.map(RoleRow::into_role).transpose()
    }

    pub(super) async fn role_exists_impl(&self, role_id: &str) -> AppResult<bool> {
        self.bounded(
            "check role existence",
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM roles WHERE id = $1)")
                .bind(role_id)
                .fetch_one(&self.pool),
            |error| {
                AppError::Internal(format!(
                    "failed to check whether role '{role_id}' exists: {error}"
                ))
            },
        )
        .await
    }

    pub(super) async fn insert_role_impl(&self, role: &Role) -> AppResult<()> {
        let role_id = role.id();

        self.bounded(
            "insert role",
            sqlx::query(
                r#"
                INSERT INTO roles (id, priority, display_name, permissions)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(role_id)
            .bind(i64::from(role.priority()))
            .bind(role.display_name())
            .bind(permissions_document(role))
            .execute(&self.pool),
            |error| {
                if is_unique_violation(&error) {
                    return AppError::conflict(format!("role '{role_id}' already exists"));
                }

                AppError::Internal(format!("failed to insert role '{role_id}': {error}"))
            },
        )
        .await
        .map(|_| ())
    }

    pub(super) async fn replace_role_impl(&self, role: &Role) -> AppResult<()> {
        let role_id = role.id();

        let result = self
            .bounded(
                "replace role",
                sqlx::query(
                    r#"
                    UPDATE roles
                    SET priority = $2,
                        display_name = $3,
                        permissions = $4,
                        updated_at = now()
                    WHERE id = $1
                    "#,
                )
                .bind(role_id)
                .bind(i64::from(role.priority()))
                .bind(role.display_name())
                .bind(permissions_document(role))
                .execute(&self.pool),
                |error| AppError::Internal(format!("failed to replace role '{role_id}': {error}")),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("role '{role_id}' does not exist")));
        }

        Ok(())
    }
}
