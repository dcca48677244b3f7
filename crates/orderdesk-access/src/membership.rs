//! Project membership resolution.

use std::collections::BTreeSet;
use std::future::Future;

use sqlx::PgPool;
use tracing::instrument;

use orderdesk_auth::Principal;
use orderdesk_core::AppError;

/// The projects a principal belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectSet(BTreeSet<i64>);

impl ProjectSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, project_id: i64) -> bool {
        self.0.contains(&project_id)
    }

    pub fn intersects(&self, project_ids: &[i64]) -> bool {
        project_ids.iter().any(|id| self.0.contains(id))
    }

    /// Ascending ids, ready to bind as a Postgres `BIGINT[]`.
    pub fn to_vec(&self) -> Vec<i64> {
        self.0.iter().copied().collect()
    }
}

impl FromIterator<i64> for ProjectSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Store query: "list all projects for user U".
pub trait MembershipStore: Send + Sync {
    fn project_ids_for_user(
        &self,
        user_id: i64,
    ) -> impl Future<Output = Result<Vec<i64>, AppError>> + Send;
}

impl MembershipStore for PgPool {
    async fn project_ids_for_user(&self, user_id: i64) -> Result<Vec<i64>, AppError> {
        let rows = sqlx::query_scalar::<_, i64>(
            "SELECT project_id FROM project_users WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(self)
        .await?;
        Ok(rows)
    }
}

/// Returns the principal's projects.
///
/// Anonymous principals get the empty set without touching the store. Store
/// failures propagate: a request that cannot establish membership fails
/// instead of guessing.
#[instrument(skip(store, principal), fields(user_id = ?principal.user_id()))]
pub async fn resolve_memberships<S: MembershipStore>(
    store: &S,
    principal: &Principal,
) -> Result<ProjectSet, AppError> {
    let Some(user_id) = principal.user_id() else {
        return Ok(ProjectSet::empty());
    };

    let ids = store.project_ids_for_user(user_id).await?;
    Ok(ids.into_iter().collect())
}
