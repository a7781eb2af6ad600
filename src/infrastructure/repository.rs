//! # Glossary Repository
//!
//! Reads and writes acronyms and explanations through a single connection.
//! The caller owns the unit of work: it opens a transaction, hands the connection to
//! `Repository::new`, and commits once the command has been handled. Dropping the
//! transaction instead rolls every write back.

use crate::application::utils::normalize_acronym;
use crate::domain::types::{Acronym, AuthoredExplanation, Explanation, UserId};
use chrono::Utc;
use sqlx::SqliteConnection;
use std::collections::HashMap;

pub struct Repository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> Repository<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Case-insensitive lookup; `key` is normalized before querying.
    pub async fn find_acronym(&mut self, key: &str) -> Result<Option<Acronym>, sqlx::Error> {
        sqlx::query_as::<_, Acronym>("SELECT id, acronym FROM acronyms WHERE acronym = ?")
            .bind(normalize_acronym(key))
            .fetch_optional(&mut *self.conn)
            .await
    }

    pub async fn find_or_create_acronym(&mut self, key: &str) -> Result<Acronym, sqlx::Error> {
        if let Some(existing) = self.find_acronym(key).await? {
            return Ok(existing);
        }

        let acronym = normalize_acronym(key);
        let result = sqlx::query("INSERT INTO acronyms (acronym) VALUES (?)")
            .bind(&acronym)
            .execute(&mut *self.conn)
            .await?;

        tracing::debug!("Created acronym {}", acronym);
        Ok(Acronym {
            id: result.last_insert_rowid(),
            acronym,
        })
    }

    /// Explanations of `acronym` in creation order.
    pub async fn explanations(
        &mut self,
        acronym: &Acronym,
    ) -> Result<Vec<Explanation>, sqlx::Error> {
        sqlx::query_as::<_, Explanation>(
            r#"
            SELECT id, acronym_id, explanation, author_id
            FROM explanations
            WHERE acronym_id = ?
            ORDER BY id
            "#,
        )
        .bind(acronym.id)
        .fetch_all(&mut *self.conn)
        .await
    }

    /// Exact, case-sensitive match on the explanation text.
    pub async fn find_explanation(
        &mut self,
        acronym: &Acronym,
        text: &str,
    ) -> Result<Option<Explanation>, sqlx::Error> {
        sqlx::query_as::<_, Explanation>(
            r#"
            SELECT id, acronym_id, explanation, author_id
            FROM explanations
            WHERE acronym_id = ? AND explanation = ?
            "#,
        )
        .bind(acronym.id)
        .bind(text)
        .fetch_optional(&mut *self.conn)
        .await
    }

    pub async fn create_explanation(
        &mut self,
        acronym: &Acronym,
        author: Option<&UserId>,
        text: &str,
    ) -> Result<Explanation, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO explanations (acronym_id, explanation, author_id, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(acronym.id)
        .bind(text)
        .bind(author.map(UserId::as_str))
        .bind(Utc::now())
        .execute(&mut *self.conn)
        .await?;

        Ok(Explanation {
            id: result.last_insert_rowid(),
            acronym_id: acronym.id,
            explanation: text.to_string(),
            author_id: author.map(|a| a.as_str().to_string()),
        })
    }

    /// Replaces the text and hands authorship to `new_author`.
    pub async fn update_explanation(
        &mut self,
        target: &Explanation,
        new_text: &str,
        new_author: &UserId,
    ) -> Result<Explanation, sqlx::Error> {
        sqlx::query("UPDATE explanations SET explanation = ?, author_id = ? WHERE id = ?")
            .bind(new_text)
            .bind(new_author.as_str())
            .bind(target.id)
            .execute(&mut *self.conn)
            .await?;

        Ok(Explanation {
            explanation: new_text.to_string(),
            author_id: Some(new_author.as_str().to_string()),
            ..target.clone()
        })
    }

    /// Removes `target`, and its acronym too if nothing else explains it.
    pub async fn delete_explanation(&mut self, target: &Explanation) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM explanations WHERE id = ?")
            .bind(target.id)
            .execute(&mut *self.conn)
            .await?;
        self.prune_acronyms().await
    }

    /// Every explanation written by `user`. Acronyms appear in the order the user first
    /// explained them; within an acronym, explanations keep their creation order.
    pub async fn explanations_by_author(
        &mut self,
        user: &UserId,
    ) -> Result<Vec<AuthoredExplanation>, sqlx::Error> {
        let rows = sqlx::query_as::<_, AuthoredExplanation>(
            r#"
            SELECT a.acronym AS acronym, e.explanation AS explanation
            FROM explanations e
            JOIN acronyms a ON a.id = e.acronym_id
            WHERE e.author_id = ?
            ORDER BY e.id
            "#,
        )
        .bind(user.as_str())
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(group_by_acronym(rows))
    }

    pub async fn has_explanations_by_author(&mut self, user: &UserId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM explanations WHERE author_id = ?)")
                .bind(user.as_str())
                .fetch_one(&mut *self.conn)
                .await?;
        Ok(exists)
    }

    /// Deletes every explanation written by `user`, returning how many were removed.
    pub async fn delete_explanations_by_author(
        &mut self,
        user: &UserId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM explanations WHERE author_id = ?")
            .bind(user.as_str())
            .execute(&mut *self.conn)
            .await?;
        self.prune_acronyms().await?;
        Ok(result.rows_affected())
    }

    async fn prune_acronyms(&mut self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            DELETE FROM acronyms
            WHERE NOT EXISTS (SELECT 1 FROM explanations e WHERE e.acronym_id = acronyms.id)
            "#,
        )
        .execute(&mut *self.conn)
        .await?;
        Ok(())
    }
}

/// Stable grouping: keeps first-seen acronym order and the relative order inside each group.
fn group_by_acronym(rows: Vec<AuthoredExplanation>) -> Vec<AuthoredExplanation> {
    let total = rows.len();
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<AuthoredExplanation>> = Vec::new();
    for row in rows {
        let slot = *slots.entry(row.acronym.clone()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(row);
    }

    let mut grouped = Vec::with_capacity(total);
    grouped.extend(groups.into_iter().flatten());
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::memory_pool;

    fn authored(acronym: &str, explanation: &str) -> AuthoredExplanation {
        AuthoredExplanation {
            acronym: acronym.to_string(),
            explanation: explanation.to_string(),
        }
    }

    #[test]
    fn test_group_by_acronym_is_stable() {
        let rows = vec![
            authored("A", "1"),
            authored("B", "1"),
            authored("A", "2"),
            authored("C", "1"),
            authored("B", "2"),
        ];
        assert_eq!(
            group_by_acronym(rows),
            vec![
                authored("A", "1"),
                authored("A", "2"),
                authored("B", "1"),
                authored("B", "2"),
                authored("C", "1"),
            ]
        );
    }

    #[tokio::test]
    async fn test_find_or_create_is_case_insensitive() {
        let pool = memory_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Repository::new(&mut conn);

        let created = repo.find_or_create_acronym("Test").await.unwrap();
        assert_eq!(created.acronym, "TEST");

        let again = repo.find_or_create_acronym(" test ").await.unwrap();
        assert_eq!(again, created);
        assert_eq!(repo.find_acronym("tEsT").await.unwrap(), Some(created));
        assert_eq!(repo.find_acronym("OTHER").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_reassigns_author() {
        let pool = memory_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Repository::new(&mut conn);
        let user = UserId::new("USER_A");

        let acronym = repo.find_or_create_acronym("TEST").await.unwrap();
        let original = repo.create_explanation(&acronym, None, "A").await.unwrap();
        assert_eq!(original.author_id, None);

        let updated = repo.update_explanation(&original, "B", &user).await.unwrap();
        assert_eq!(updated.id, original.id);

        let stored = repo.find_explanation(&acronym, "B").await.unwrap().unwrap();
        assert_eq!(stored, updated);
        assert_eq!(stored.author_id.as_deref(), Some("USER_A"));
        assert!(repo.find_explanation(&acronym, "A").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_deleting_last_explanation_removes_acronym() {
        let pool = memory_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Repository::new(&mut conn);
        let user = UserId::new("USER_A");

        let acronym = repo.find_or_create_acronym("TEST").await.unwrap();
        let first = repo.create_explanation(&acronym, Some(&user), "one").await.unwrap();
        let second = repo.create_explanation(&acronym, Some(&user), "two").await.unwrap();

        repo.delete_explanation(&first).await.unwrap();
        assert!(repo.find_acronym("TEST").await.unwrap().is_some());
        assert_eq!(repo.explanations(&acronym).await.unwrap(), vec![second.clone()]);

        repo.delete_explanation(&second).await.unwrap();
        assert!(repo.find_acronym("TEST").await.unwrap().is_none());

        let recreated = repo.find_or_create_acronym("test").await.unwrap();
        assert_eq!(recreated.acronym, "TEST");
    }

    #[tokio::test]
    async fn test_delete_by_author_leaves_other_authors() {
        let pool = memory_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Repository::new(&mut conn);
        let a = UserId::new("USER_A");
        let b = UserId::new("USER_B");

        let shared = repo.find_or_create_acronym("SHARED").await.unwrap();
        let only_a = repo.find_or_create_acronym("ONLY_A").await.unwrap();
        repo.create_explanation(&shared, Some(&a), "by a").await.unwrap();
        let kept = repo.create_explanation(&shared, Some(&b), "by b").await.unwrap();
        repo.create_explanation(&only_a, Some(&a), "also by a").await.unwrap();

        assert!(repo.has_explanations_by_author(&a).await.unwrap());
        assert!(!repo.has_explanations_by_author(&UserId::new("USER_C")).await.unwrap());

        assert_eq!(repo.delete_explanations_by_author(&a).await.unwrap(), 2);
        assert!(!repo.has_explanations_by_author(&a).await.unwrap());
        assert!(repo.has_explanations_by_author(&b).await.unwrap());
        assert_eq!(repo.explanations(&shared).await.unwrap(), vec![kept]);
        assert!(repo.find_acronym("ONLY_A").await.unwrap().is_none());
        assert!(repo.explanations_by_author(&a).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_uncommitted_writes_roll_back() {
        let pool = memory_pool().await;
        {
            let mut tx = pool.begin().await.unwrap();
            let mut repo = Repository::new(&mut tx);
            let acronym = repo.find_or_create_acronym("TEST").await.unwrap();
            repo.create_explanation(&acronym, None, "lost").await.unwrap();
        }

        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Repository::new(&mut conn);
        assert!(repo.find_acronym("TEST").await.unwrap().is_none());
    }
}
