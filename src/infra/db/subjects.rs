use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    application::repos::{RepoError, SubjectsRepo},
    domain::entities::SubjectRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct SubjectRow {
    id: Uuid,
    title: String,
    slug: String,
}

impl From<SubjectRow> for SubjectRecord {
    fn from(row: SubjectRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            slug: row.slug,
        }
    }
}

#[async_trait]
impl SubjectsRepo for PostgresRepositories {
    async fn list_subjects(&self) -> Result<Vec<SubjectRecord>, RepoError> {
        let rows = sqlx::query_as::<_, SubjectRow>(
            r#"
            SELECT id, title, slug
            FROM subjects
            ORDER BY title
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(SubjectRecord::from).collect())
    }

    async fn find_subject(&self, id: Uuid) -> Result<Option<SubjectRecord>, RepoError> {
        let row = sqlx::query_as::<_, SubjectRow>(
            r#"
            SELECT id, title, slug
            FROM subjects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(SubjectRecord::from))
    }
}
