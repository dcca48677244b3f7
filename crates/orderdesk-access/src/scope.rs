//! Project-scoped visibility.
//!
//! A protected resource is visible iff the principal is authenticated and at
//! least one of the resource's projects is in the principal's [`ProjectSet`].
//! Warehouses and carriers reach projects through a join table and may list
//! several; orders carry a single `project_id`. Both shapes implement
//! [`ProjectScoped`] so one filter serves them all.
//!
//! Services push the same rule down into SQL (`project_id = ANY($1)`); the
//! in-memory filter here is the reference the SQL must agree with.

use std::future::Future;

use crate::membership::ProjectSet;

pub trait ProjectScoped {
    /// Identifier used for ordering and de-duplication.
    fn scope_id(&self) -> i64;
    /// Projects the resource is associated with.
    fn project_ids(&self) -> &[i64];
}

/// Whether one resource is visible to holders of `projects`.
pub fn is_visible<R: ProjectScoped>(resource: &R, projects: &ProjectSet) -> bool {
    projects.intersects(resource.project_ids())
}

/// Filters `candidates` down to the visible subset, ordered by id, each
/// resource once even when it shares several projects with the principal.
pub fn visible<R: ProjectScoped>(candidates: Vec<R>, projects: &ProjectSet) -> Vec<R> {
    if projects.is_empty() {
        return Vec::new();
    }

    let mut out: Vec<R> = candidates
        .into_iter()
        .filter(|r| is_visible(r, projects))
        .collect();
    out.sort_by_key(|r| r.scope_id());
    out.dedup_by_key(|r| r.scope_id());
    out
}

/// Runs a project-filtered store query, skipping it entirely for an empty set.
///
/// Some query shapes treat an empty filter as "no filter"; short-circuiting
/// here means an empty membership can never widen into "everything".
pub async fn scoped_fetch<T, E, F, Fut>(projects: &ProjectSet, fetch: F) -> Result<Vec<T>, E>
where
    F: FnOnce(Vec<i64>) -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
{
    if projects.is_empty() {
        return Ok(Vec::new());
    }
    fetch(projects.to_vec()).await
}

/// Single-row variant of [`scoped_fetch`].
pub async fn scoped_fetch_one<T, E, F, Fut>(
    projects: &ProjectSet,
    fetch: F,
) -> Result<Option<T>, E>
where
    F: FnOnce(Vec<i64>) -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    if projects.is_empty() {
        return Ok(None);
    }
    fetch(projects.to_vec()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug, Clone, PartialEq)]
    struct Warehouse {
        id: i64,
        projects: Vec<i64>,
    }

    impl ProjectScoped for Warehouse {
        fn scope_id(&self) -> i64 {
            self.id
        }
        fn project_ids(&self) -> &[i64] {
            &self.projects
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Order {
        id: i64,
        project: [i64; 1],
    }

    impl ProjectScoped for Order {
        fn scope_id(&self) -> i64 {
            self.id
        }
        fn project_ids(&self) -> &[i64] {
            &self.project
        }
    }

    fn wh(id: i64, projects: &[i64]) -> Warehouse {
        Warehouse {
            id,
            projects: projects.to_vec(),
        }
    }

    fn ids<R: ProjectScoped>(rows: &[R]) -> Vec<i64> {
        rows.iter().map(|r| r.scope_id()).collect()
    }

    #[test]
    fn test_warehouse_scenario() {
        let member_of: ProjectSet = [1].into_iter().collect();
        let warehouses = vec![wh(1, &[1, 2]), wh(2, &[2]), wh(3, &[1])];
        assert_eq!(ids(&visible(warehouses, &member_of)), vec![1, 3]);
    }

    #[test]
    fn test_order_scenario() {
        let member_of: ProjectSet = [5, 6].into_iter().collect();
        let orders = vec![
            Order { id: 1, project: [5] },
            Order { id: 2, project: [7] },
        ];
        assert_eq!(ids(&visible(orders, &member_of)), vec![1]);
    }

    #[test]
    fn test_empty_set_sees_nothing() {
        let warehouses = vec![wh(1, &[1]), wh(2, &[2])];
        assert!(visible(warehouses, &ProjectSet::empty()).is_empty());
    }

    #[test]
    fn test_visibility_matches_intersection_rule() {
        let all_projects = [1_i64, 2, 3];
        let candidates: Vec<Warehouse> = vec![
            wh(1, &[]),
            wh(2, &[1]),
            wh(3, &[2, 3]),
            wh(4, &[1, 2, 3]),
            wh(5, &[3]),
        ];

        for mask in 0..8u8 {
            let member_of: ProjectSet = all_projects
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1u8 << *i) != 0)
                .map(|(_, p)| *p)
                .collect();
            let got = ids(&visible(candidates.clone(), &member_of));
            let expected: Vec<i64> = candidates
                .iter()
                .filter(|w| w.projects.iter().any(|p| member_of.contains(*p)))
                .map(|w| w.id)
                .collect();
            assert_eq!(got, expected, "membership {:?}", member_of.to_vec());
        }
    }

    #[test]
    fn test_duplicates_removed_and_ordered() {
        let member_of: ProjectSet = [1, 2].into_iter().collect();
        // A join over two shared projects yields the row twice.
        let joined = vec![wh(9, &[1, 2]), wh(4, &[1]), wh(9, &[1, 2])];
        let first = visible(joined.clone(), &member_of);
        let second = visible(joined, &member_of);
        assert_eq!(ids(&first), vec![4, 9]);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_scoped_fetch_short_circuits_on_empty_set() {
        let called = Cell::new(false);
        let rows: Result<Vec<i64>, ()> = scoped_fetch(&ProjectSet::empty(), |_| {
            called.set(true);
            async { Ok(vec![1, 2, 3]) }
        })
        .await;
        assert_eq!(rows, Ok(vec![]));
        assert!(!called.get());
    }

    #[tokio::test]
    async fn test_scoped_fetch_passes_sorted_ids() {
        let member_of: ProjectSet = [7, 3].into_iter().collect();
        let rows: Result<Vec<i64>, ()> =
            scoped_fetch(&member_of, |ids| async move { Ok(ids) }).await;
        assert_eq!(rows, Ok(vec![3, 7]));
    }

    #[tokio::test]
    async fn test_scoped_fetch_one_short_circuits() {
        let row: Result<Option<i64>, ()> =
            scoped_fetch_one(&ProjectSet::empty(), |_| async { Ok(Some(1)) }).await;
        assert_eq!(row, Ok(None));
    }
}
