use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    application::repos::{
        CreateModuleParams, ModulesRepo, ModulesWriteRepo, RepoError, SortOrderUpdate,
        UpdateModuleParams,
    },
    domain::entities::ModuleRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct ModuleRow {
    id: Uuid,
    course_id: Uuid,
    title: String,
    description: String,
    sort_order: i32,
}

impl From<ModuleRow> for ModuleRecord {
    fn from(row: ModuleRow) -> Self {
        Self {
            id: row.id,
            course_id: row.course_id,
            title: row.title,
            description: row.description,
            sort_order: row.sort_order,
        }
    }
}

#[async_trait]
impl ModulesRepo for PostgresRepositories {
    async fn list_modules(&self, course_id: Uuid) -> Result<Vec<ModuleRecord>, RepoError> {
        let rows = sqlx::query_as::<_, ModuleRow>(
            r#"
            SELECT id, course_id, title, description, sort_order
            FROM modules
            WHERE course_id = $1
            ORDER BY sort_order, id
            "#,
        )
        .bind(course_id)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ModuleRecord::from).collect())
    }

    async fn find_module(&self, owner: &str, id: Uuid) -> Result<Option<ModuleRecord>, RepoError> {
        let row = sqlx::query_as::<_, ModuleRow>(
            r#"
            SELECT m.id, m.course_id, m.title, m.description, m.sort_order
            FROM modules m
            INNER JOIN courses c ON c.id = m.course_id
            WHERE m.id = $1 AND c.owner = $2
            "#,
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(ModuleRecord::from))
    }

    async fn max_sort_order(&self, course_id: Uuid) -> Result<Option<i32>, RepoError> {
        sqlx::query_scalar::<_, Option<i32>>(
            "SELECT MAX(sort_order) FROM modules WHERE course_id = $1",
        )
        .bind(course_id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl ModulesWriteRepo for PostgresRepositories {
    async fn create_module(&self, params: CreateModuleParams) -> Result<ModuleRecord, RepoError> {
        let row = sqlx::query_as::<_, ModuleRow>(
            r#"
            INSERT INTO modules (id, course_id, title, description, sort_order)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, course_id, title, description, sort_order
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(params.course_id)
        .bind(params.title)
        .bind(params.description)
        .bind(params.sort_order)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn update_module(&self, params: UpdateModuleParams) -> Result<ModuleRecord, RepoError> {
        let row = sqlx::query_as::<_, ModuleRow>(
            r#"
            UPDATE modules
            SET title = $2, description = $3
            WHERE id = $1
            RETURNING id, course_id, title, description, sort_order
            "#,
        )
        .bind(params.id)
        .bind(params.title)
        .bind(params.description)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn delete_module(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tx = self.begin().await.map_err(map_sqlx_error)?;

        sqlx::query(
            r#"
            DELETE FROM content_items
            WHERE id IN (SELECT item_id FROM contents WHERE module_id = $1)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        let result = sqlx::query("DELETE FROM modules WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        tx.commit().await.map_err(map_sqlx_error)
    }

    async fn apply_module_order(
        &self,
        owner: &str,
        updates: &[SortOrderUpdate],
    ) -> Result<u64, RepoError> {
        let mut tx = self.begin().await.map_err(map_sqlx_error)?;
        let mut applied = 0u64;

        for update in updates {
            let result = sqlx::query(
                r#"
                UPDATE modules m
                SET sort_order = $2
                FROM courses c
                WHERE m.id = $1 AND c.id = m.course_id AND c.owner = $3
                "#,
            )
            .bind(update.id)
            .bind(update.sort_order)
            .bind(owner)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
            applied += result.rows_affected();
        }

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(applied)
    }
}
