use orderdesk_access::{ProjectSet, resolve_memberships};
use orderdesk_auth::{AuthenticatedUser, RequestContext};
use orderdesk_core::AppError;
use sqlx::PgPool;

/// The caller's projects; empty for anonymous callers.
pub async fn caller_projects(db: &PgPool, ctx: &RequestContext) -> Result<ProjectSet, AppError> {
    resolve_memberships(db, &ctx.principal).await
}

/// Writes to project-scoped resources need a signed-in caller.
pub fn require_authenticated(ctx: &RequestContext) -> Result<&AuthenticatedUser, AppError> {
    ctx.user()
        .ok_or_else(|| AppError::unauthorized("Authentication required".to_string()))
}

/// A project outside the caller's membership is reported as missing.
pub fn ensure_member(projects: &ProjectSet, project_id: i64) -> Result<(), AppError> {
    if projects.contains(project_id) {
        Ok(())
    } else {
        Err(AppError::not_found(anyhow::anyhow!("Project not found")))
    }
}

pub fn ensure_all_members(projects: &ProjectSet, project_ids: &[i64]) -> Result<(), AppError> {
    project_ids
        .iter()
        .try_for_each(|id| ensure_member(projects, *id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_ensure_member_hides_foreign_project() {
        let projects: ProjectSet = [1, 2].into_iter().collect();
        assert!(ensure_member(&projects, 2).is_ok());

        let err = ensure_member(&projects, 3).unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Project not found");
    }

    #[test]
    fn test_ensure_all_members() {
        let projects: ProjectSet = [1, 2].into_iter().collect();
        assert!(ensure_all_members(&projects, &[1, 2]).is_ok());
        assert!(ensure_all_members(&projects, &[1, 5]).is_err());
        assert!(ensure_all_members(&ProjectSet::empty(), &[1]).is_err());
    }

    #[test]
    fn test_require_authenticated_rejects_anonymous() {
        let err = require_authenticated(&RequestContext::anonymous()).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }
}
