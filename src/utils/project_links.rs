//! Join-table maintenance for resources linked to many projects.
//!
//! A caller only ever edits the links to projects it belongs to. Links to
//! other projects are left in place, so one tenant cannot detach a shared
//! warehouse or carrier from another.

use orderdesk_access::ProjectSet;
use sqlx::{Postgres, Transaction};

/// A resource table and its `(resource_id, project_id)` join table.
#[derive(Debug, Clone, Copy)]
pub struct LinkTable {
    pub resource: &'static str,
    pub table: &'static str,
    pub owner_column: &'static str,
}

pub const WAREHOUSE_PROJECTS: LinkTable = LinkTable {
    resource: "warehouses",
    table: "warehouse_projects",
    owner_column: "warehouse_id",
};

pub const CARRIER_PROJECTS: LinkTable = LinkTable {
    resource: "carriers",
    table: "carrier_projects",
    owner_column: "carrier_id",
};

impl LinkTable {
    pub async fn insert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner_id: i64,
        project_ids: &[i64],
    ) -> Result<(), sqlx::Error> {
        let sql = format!(
            "INSERT INTO {} ({}, project_id) SELECT $1, UNNEST($2::BIGINT[]) ON CONFLICT DO NOTHING",
            self.table, self.owner_column
        );
        sqlx::query(&sql)
            .bind(owner_id)
            .bind(project_ids)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Replaces the links that fall inside `caller_projects` with `project_ids`.
    pub async fn replace_within(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner_id: i64,
        caller_projects: &ProjectSet,
        project_ids: &[i64],
    ) -> Result<(), sqlx::Error> {
        self.detach_within(tx, owner_id, caller_projects).await?;
        self.insert(tx, owner_id, project_ids).await
    }

    /// Drops the links that fall inside `caller_projects` and returns how
    /// many links to other projects remain.
    pub async fn detach_within(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner_id: i64,
        caller_projects: &ProjectSet,
    ) -> Result<i64, sqlx::Error> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = $1 AND project_id = ANY($2)",
            self.table, self.owner_column
        );
        sqlx::query(&sql)
            .bind(owner_id)
            .bind(caller_projects.to_vec())
            .execute(&mut **tx)
            .await?;

        let sql = format!("SELECT COUNT(*) FROM {} WHERE {} = $1", self.table, self.owner_column);
        sqlx::query_scalar::<_, i64>(&sql)
            .bind(owner_id)
            .fetch_one(&mut **tx)
            .await
    }

    /// Whether another resource sharing one of `project_ids` already uses
    /// `lookup_code`. Lookup codes are unique per project, so rows in
    /// projects the caller cannot see never collide.
    ///
    /// Holds a transaction-scoped advisory lock on the code until commit, so
    /// concurrent writers of the same code are serialized.
    pub async fn lookup_code_taken(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        lookup_code: &str,
        project_ids: &[i64],
        except_id: Option<i64>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(format!("{}:{}", self.resource, lookup_code))
            .execute(&mut **tx)
            .await?;

        let sql = format!(
            r#"SELECT EXISTS (
                   SELECT 1 FROM {resource} r
                   JOIN {table} l ON l.{owner} = r.id
                   WHERE r.lookup_code = $1 AND l.project_id = ANY($2) AND r.id <> $3
               )"#,
            resource = self.resource,
            table = self.table,
            owner = self.owner_column,
        );
        sqlx::query_scalar::<_, bool>(&sql)
            .bind(lookup_code)
            .bind(project_ids)
            .bind(except_id.unwrap_or(0))
            .fetch_one(&mut **tx)
            .await
    }
}

/// The caller's share of a resource's links after an update: the new list
/// when one was given, otherwise the caller's existing links.
pub fn caller_links(
    caller_projects: &ProjectSet,
    existing: &[i64],
    replacement: Option<&[i64]>,
) -> Vec<i64> {
    match replacement {
        Some(ids) => ids.to_vec(),
        None => existing
            .iter()
            .copied()
            .filter(|id| caller_projects.contains(*id))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_links_keeps_only_own_existing_links() {
        let caller: ProjectSet = [1, 3].into_iter().collect();
        assert_eq!(caller_links(&caller, &[1, 2, 3], None), vec![1, 3]);
    }

    #[test]
    fn test_caller_links_prefers_replacement() {
        let caller: ProjectSet = [1, 3].into_iter().collect();
        assert_eq!(caller_links(&caller, &[1, 2], Some(&[3])), vec![3]);
    }
}
