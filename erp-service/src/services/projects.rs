//! Project operations.

use crate::models::{CreateProject, ListProjectsFilter, Project, ProjectStatus, UpdateProject};
use crate::services::metrics::DB_QUERY_DURATION;
use crate::services::Database;
use service_core::error::AppError;
use tracing::{info, instrument};

impl Database {
    #[instrument(skip(self, input))]
    pub async fn create_project(&self, input: &CreateProject) -> Result<Project, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_project"])
            .start_timer();

        let status = input.status.unwrap_or(ProjectStatus::Active);
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, client_id, location, budget, start_date, deadline, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, client_id, location, budget, start_date, deadline, status, created_utc
            "#,
        )
        .bind(&input.name)
        .bind(input.client_id)
        .bind(&input.location)
        .bind(input.budget)
        .bind(input.start_date)
        .bind(input.deadline)
        .bind(status.as_str())
        .fetch_one(self.pool())
        .await?;

        timer.observe_duration();
        info!(project_id = project.id, "Project created");

        Ok(project)
    }

    #[instrument(skip(self, filter))]
    pub async fn list_projects(
        &self,
        filter: &ListProjectsFilter,
    ) -> Result<Vec<Project>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_projects"])
            .start_timer();

        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, client_id, location, budget, start_date, deadline, status, created_utc
            FROM projects
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::bigint IS NULL OR client_id = $2)
              AND ($3::text IS NULL OR name ILIKE '%' || $3 || '%')
            ORDER BY created_utc DESC, id DESC
            "#,
        )
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.client_id)
        .bind(&filter.search)
        .fetch_all(self.pool())
        .await?;

        timer.observe_duration();

        Ok(projects)
    }

    #[instrument(skip(self))]
    pub async fn get_project(&self, id: i64) -> Result<Option<Project>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_project"])
            .start_timer();

        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, client_id, location, budget, start_date, deadline, status, created_utc
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        timer.observe_duration();

        Ok(project)
    }

    #[instrument(skip(self, input))]
    pub async fn update_project(
        &self,
        id: i64,
        input: &UpdateProject,
    ) -> Result<Option<Project>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_project"])
            .start_timer();

        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET name = COALESCE($2, name),
                client_id = COALESCE($3, client_id),
                location = COALESCE($4, location),
                budget = COALESCE($5, budget),
                start_date = COALESCE($6, start_date),
                deadline = COALESCE($7, deadline),
                status = COALESCE($8, status)
            WHERE id = $1
            RETURNING id, name, client_id, location, budget, start_date, deadline, status, created_utc
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.client_id)
        .bind(&input.location)
        .bind(input.budget)
        .bind(input.start_date)
        .bind(input.deadline)
        .bind(input.status.map(|s| s.as_str()))
        .fetch_optional(self.pool())
        .await?;

        timer.observe_duration();
        if project.is_some() {
            info!(project_id = id, "Project updated");
        }

        Ok(project)
    }

    #[instrument(skip(self))]
    pub async fn delete_project(&self, id: i64) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_project"])
            .start_timer();

        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        timer.observe_duration();
        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(project_id = id, "Project deleted");
        }

        Ok(deleted)
    }
}
