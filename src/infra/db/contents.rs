use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{
        ContentsRepo, ContentsWriteRepo, CreateContentParams, RepoError, SortOrderUpdate,
        UpdateContentItemParams,
    },
    domain::{
        entities::{ContentItemRecord, ContentRecord},
        types::ContentKind,
    },
};

use super::{PostgresRepositories, map_sqlx_error};

const CONTENT_SELECT: &str = r#"
    SELECT ct.id, ct.module_id, ct.sort_order,
           i.id AS item_id, i.owner, i.kind, i.title, i.body, i.file_path, i.url,
           i.created_at, i.updated_at
    FROM contents ct
    INNER JOIN content_items i ON i.id = ct.item_id
"#;

#[derive(sqlx::FromRow)]
struct ContentItemRow {
    id: Uuid,
    owner: String,
    kind: ContentKind,
    title: String,
    body: Option<String>,
    file_path: Option<String>,
    url: Option<String>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<ContentItemRow> for ContentItemRecord {
    fn from(row: ContentItemRow) -> Self {
        Self {
            id: row.id,
            owner: row.owner,
            kind: row.kind,
            title: row.title,
            body: row.body,
            file_path: row.file_path,
            url: row.url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ContentRow {
    id: Uuid,
    module_id: Uuid,
    sort_order: i32,
    item_id: Uuid,
    owner: String,
    kind: ContentKind,
    title: String,
    body: Option<String>,
    file_path: Option<String>,
    url: Option<String>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<ContentRow> for ContentRecord {
    fn from(row: ContentRow) -> Self {
        Self {
            id: row.id,
            module_id: row.module_id,
            sort_order: row.sort_order,
            item: ContentItemRecord {
                id: row.item_id,
                owner: row.owner,
                kind: row.kind,
                title: row.title,
                body: row.body,
                file_path: row.file_path,
                url: row.url,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

#[async_trait]
impl ContentsRepo for PostgresRepositories {
    async fn list_contents(&self, module_id: Uuid) -> Result<Vec<ContentRecord>, RepoError> {
        let sql = format!("{CONTENT_SELECT} WHERE ct.module_id = $1 ORDER BY ct.sort_order, ct.id");
        let rows = sqlx::query_as::<_, ContentRow>(&sql)
            .bind(module_id)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ContentRecord::from).collect())
    }

    async fn find_content(&self, owner: &str, id: Uuid) -> Result<Option<ContentRecord>, RepoError> {
        let sql = format!(
            "{CONTENT_SELECT} \
             INNER JOIN modules m ON m.id = ct.module_id \
             INNER JOIN courses c ON c.id = m.course_id \
             WHERE ct.id = $1 AND c.owner = $2"
        );
        let row = sqlx::query_as::<_, ContentRow>(&sql)
            .bind(id)
            .bind(owner)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(ContentRecord::from))
    }

    async fn find_item(
        &self,
        owner: &str,
        module_id: Uuid,
        item_id: Uuid,
    ) -> Result<Option<ContentItemRecord>, RepoError> {
        let sql = format!(
            "{CONTENT_SELECT} \
             INNER JOIN modules m ON m.id = ct.module_id \
             INNER JOIN courses c ON c.id = m.course_id \
             WHERE i.id = $1 AND ct.module_id = $2 AND c.owner = $3"
        );
        let row = sqlx::query_as::<_, ContentRow>(&sql)
            .bind(item_id)
            .bind(module_id)
            .bind(owner)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(|row| ContentRecord::from(row).item))
    }

    async fn max_sort_order(&self, module_id: Uuid) -> Result<Option<i32>, RepoError> {
        sqlx::query_scalar::<_, Option<i32>>(
            "SELECT MAX(sort_order) FROM contents WHERE module_id = $1",
        )
        .bind(module_id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl ContentsWriteRepo for PostgresRepositories {
    async fn create_content(&self, params: CreateContentParams) -> Result<ContentRecord, RepoError> {
        let CreateContentParams {
            module_id,
            owner,
            sort_order,
            fields,
        } = params;
        let now = OffsetDateTime::now_utc();
        let mut tx = self.begin().await.map_err(map_sqlx_error)?;

        let item = sqlx::query_as::<_, ContentItemRow>(
            r#"
            INSERT INTO content_items (id, owner, kind, title, body, file_path, url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING id, owner, kind, title, body, file_path, url, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(fields.kind)
        .bind(fields.title)
        .bind(fields.body)
        .bind(fields.file_path)
        .bind(fields.url)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        let content_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO contents (id, module_id, item_id, sort_order)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(content_id)
        .bind(module_id)
        .bind(item.id)
        .bind(sort_order)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;

        Ok(ContentRecord {
            id: content_id,
            module_id,
            sort_order,
            item: item.into(),
        })
    }

    async fn update_item(
        &self,
        params: UpdateContentItemParams,
    ) -> Result<ContentItemRecord, RepoError> {
        let UpdateContentItemParams {
            item_id,
            owner,
            fields,
        } = params;

        let row = sqlx::query_as::<_, ContentItemRow>(
            r#"
            UPDATE content_items
            SET title = $3, body = $4, file_path = $5, url = $6, updated_at = $7
            WHERE id = $1 AND owner = $2 AND kind = $8
            RETURNING id, owner, kind, title, body, file_path, url, created_at, updated_at
            "#,
        )
        .bind(item_id)
        .bind(owner)
        .bind(fields.title)
        .bind(fields.body)
        .bind(fields.file_path)
        .bind(fields.url)
        .bind(OffsetDateTime::now_utc())
        .bind(fields.kind)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn delete_content(&self, id: Uuid) -> Result<(), RepoError> {
        // The content row goes with its item through the foreign key cascade.
        let result = sqlx::query(
            r#"
            DELETE FROM content_items
            WHERE id = (SELECT item_id FROM contents WHERE id = $1)
            "#,
        )
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn apply_content_order(
        &self,
        owner: &str,
        updates: &[SortOrderUpdate],
    ) -> Result<u64, RepoError> {
        let mut tx = self.begin().await.map_err(map_sqlx_error)?;
        let mut applied = 0u64;

        for update in updates {
            let result = sqlx::query(
                r#"
                UPDATE contents ct
                SET sort_order = $2
                FROM modules m, courses c
                WHERE ct.id = $1
                  AND m.id = ct.module_id
                  AND c.id = m.course_id
                  AND c.owner = $3
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
