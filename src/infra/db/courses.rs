use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{
        CoursesRepo, CoursesWriteRepo, CreateCourseParams, RepoError, UpdateCourseParams,
    },
    domain::entities::CourseRecord,
};

use super::{PostgresRepositories, map_sqlx_error};

const COURSE_COLUMNS: &str = "c.id, c.owner, c.subject_id, s.title AS subject_title, \
     c.title, c.slug, c.overview, c.created_at";

#[derive(sqlx::FromRow)]
struct CourseRow {
    id: Uuid,
    owner: String,
    subject_id: Uuid,
    subject_title: String,
    title: String,
    slug: String,
    overview: String,
    created_at: OffsetDateTime,
}

impl From<CourseRow> for CourseRecord {
    fn from(row: CourseRow) -> Self {
        Self {
            id: row.id,
            owner: row.owner,
            subject_id: row.subject_id,
            subject_title: row.subject_title,
            title: row.title,
            slug: row.slug,
            overview: row.overview,
            created_at: row.created_at,
        }
    }
}

impl PostgresRepositories {
    fn course_select<'q>() -> QueryBuilder<'q, Postgres> {
        let mut qb = QueryBuilder::new("SELECT ");
        qb.push(COURSE_COLUMNS);
        qb.push(" FROM courses c INNER JOIN subjects s ON s.id = c.subject_id WHERE 1=1");
        qb
    }

    async fn fetch_course(&self, id: Uuid) -> Result<CourseRecord, RepoError> {
        let mut qb = Self::course_select();
        qb.push(" AND c.id = ");
        qb.push_bind(id);

        qb.build_query_as::<CourseRow>()
            .fetch_one(self.pool())
            .await
            .map(CourseRecord::from)
            .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl CoursesRepo for PostgresRepositories {
    async fn list_courses(&self, owner: &str) -> Result<Vec<CourseRecord>, RepoError> {
        let mut qb = Self::course_select();
        qb.push(" AND c.owner = ");
        qb.push_bind(owner);
        qb.push(" ORDER BY c.created_at DESC, c.id DESC");

        let rows = qb
            .build_query_as::<CourseRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(CourseRecord::from).collect())
    }

    async fn find_course(&self, owner: &str, id: Uuid) -> Result<Option<CourseRecord>, RepoError> {
        let mut qb = Self::course_select();
        qb.push(" AND c.owner = ");
        qb.push_bind(owner);
        qb.push(" AND c.id = ");
        qb.push_bind(id);

        let row = qb
            .build_query_as::<CourseRow>()
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(CourseRecord::from))
    }

    async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, RepoError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM courses
                WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(slug)
        .bind(exclude)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl CoursesWriteRepo for PostgresRepositories {
    async fn create_course(&self, params: CreateCourseParams) -> Result<CourseRecord, RepoError> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO courses (id, owner, subject_id, title, slug, overview, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(id)
        .bind(&params.owner)
        .bind(params.subject_id)
        .bind(&params.title)
        .bind(&params.slug)
        .bind(&params.overview)
        .bind(OffsetDateTime::now_utc())
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        self.fetch_course(id).await
    }

    async fn update_course(&self, params: UpdateCourseParams) -> Result<CourseRecord, RepoError> {
        let result = sqlx::query(
            r#"
            UPDATE courses
            SET subject_id = $3, title = $4, slug = $5, overview = $6
            WHERE id = $1 AND owner = $2
            "#,
        )
        .bind(params.id)
        .bind(&params.owner)
        .bind(params.subject_id)
        .bind(&params.title)
        .bind(&params.slug)
        .bind(&params.overview)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        self.fetch_course(params.id).await
    }

    async fn delete_course(&self, owner: &str, id: Uuid) -> Result<(), RepoError> {
        let mut tx = self.begin().await.map_err(map_sqlx_error)?;

        // Items are not reachable through the course cascade.
        sqlx::query(
            r#"
            DELETE FROM content_items
            WHERE id IN (
                SELECT ct.item_id
                FROM contents ct
                INNER JOIN modules m ON m.id = ct.module_id
                INNER JOIN courses c ON c.id = m.course_id
                WHERE c.id = $1 AND c.owner = $2
            )
            "#,
        )
        .bind(id)
        .bind(owner)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        let result = sqlx::query("DELETE FROM courses WHERE id = $1 AND owner = $2")
            .bind(id)
            .bind(owner)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        tx.commit().await.map_err(map_sqlx_error)
    }
}
