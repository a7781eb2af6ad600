//! # Glossary Engine
//!
//! Decides whether a parsed [`Directive`] is allowed for the acting user and applies it
//! through the [`Repository`]. Every check runs before the first write, so a rejected
//! command leaves storage untouched.

use crate::application::utils::compare_case_insensitive;
use crate::domain::types::{
    Acronym, AuthorAction, Directive, Explanation, MAX_EXPLANATION_LENGTH, Reply, UserId,
};
use crate::infrastructure::repository::Repository;
use sqlx::SqliteConnection;

/// Result of resolving the explanation an update or delete refers to.
enum Target {
    Editable(Acronym, Explanation),
    Rejected(Reply),
}

pub struct GlossaryEngine<'c> {
    repo: Repository<'c>,
}

impl<'c> GlossaryEngine<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self {
            repo: Repository::new(conn),
        }
    }

    pub async fn execute(
        &mut self,
        user: &UserId,
        directive: Directive,
    ) -> Result<Reply, sqlx::Error> {
        match directive {
            Directive::Help => Ok(Reply::Help),
            Directive::Lookup { acronym } => self.lookup(&acronym).await,
            Directive::Create { acronym, text } => self.create(user, &acronym, &text).await,
            Directive::Update { acronym, old, new } => {
                self.update(user, &acronym, &old, &new).await
            }
            Directive::Delete { acronym, old } => self.delete(user, &acronym, &old).await,
            Directive::MyExplanations(action) => match action {
                AuthorAction::List => self.list_own(user).await,
                AuthorAction::RequestDelete => self.request_delete_own(user).await,
                AuthorAction::ConfirmDelete => self.delete_own(user).await,
            },
        }
    }

    async fn lookup(&mut self, acronym: &str) -> Result<Reply, sqlx::Error> {
        let Some(found) = self.repo.find_acronym(acronym).await? else {
            return Ok(Reply::AcronymNotFound);
        };

        let mut texts: Vec<String> = self
            .repo
            .explanations(&found)
            .await?
            .into_iter()
            .map(|e| e.explanation)
            .collect();
        if texts.is_empty() {
            return Ok(Reply::AcronymNotFound);
        }

        texts.sort_by(|a, b| compare_case_insensitive(a, b));
        Ok(Reply::Explanations(texts))
    }

    async fn create(
        &mut self,
        user: &UserId,
        acronym: &str,
        text: &str,
    ) -> Result<Reply, sqlx::Error> {
        if is_too_long(text) {
            return Ok(Reply::ExplanationTooLong);
        }

        if let Some(existing) = self.repo.find_acronym(acronym).await? {
            if self.repo.find_explanation(&existing, text).await?.is_some() {
                return Ok(duplicate(&existing, text));
            }
        }

        let target = self.repo.find_or_create_acronym(acronym).await?;
        self.repo.create_explanation(&target, Some(user), text).await?;
        tracing::info!("{} saved an explanation for {}", user, target.acronym);
        Ok(Reply::ExplanationSaved)
    }

    async fn update(
        &mut self,
        user: &UserId,
        acronym: &str,
        old: &str,
        new: &str,
    ) -> Result<Reply, sqlx::Error> {
        if is_too_long(new) {
            return Ok(Reply::ExplanationTooLong);
        }

        let (acronym, explanation) = match self.resolve(user, acronym, old).await? {
            Target::Editable(acronym, explanation) => (acronym, explanation),
            Target::Rejected(reply) => return Ok(reply),
        };

        if old != new && self.repo.find_explanation(&acronym, new).await?.is_some() {
            return Ok(duplicate(&acronym, new));
        }

        self.repo.update_explanation(&explanation, new, user).await?;
        tracing::info!("{} updated an explanation of {}", user, acronym.acronym);
        Ok(Reply::ExplanationUpdated)
    }

    async fn delete(
        &mut self,
        user: &UserId,
        acronym: &str,
        old: &str,
    ) -> Result<Reply, sqlx::Error> {
        let (acronym, explanation) = match self.resolve(user, acronym, old).await? {
            Target::Editable(acronym, explanation) => (acronym, explanation),
            Target::Rejected(reply) => return Ok(reply),
        };

        self.repo.delete_explanation(&explanation).await?;
        tracing::info!("{} removed an explanation of {}", user, acronym.acronym);
        Ok(Reply::ExplanationRemoved)
    }

    /// Acronym must exist, the old text must match exactly, and the user must own it
    /// (or nobody does).
    async fn resolve(
        &mut self,
        user: &UserId,
        acronym: &str,
        old: &str,
    ) -> Result<Target, sqlx::Error> {
        let Some(acronym) = self.repo.find_acronym(acronym).await? else {
            return Ok(Target::Rejected(Reply::AcronymNotFound));
        };
        let Some(explanation) = self.repo.find_explanation(&acronym, old).await? else {
            return Ok(Target::Rejected(Reply::ExplanationNotFound));
        };
        if !explanation.editable_by(user) {
            tracing::warn!(
                "{} may not modify explanation {} of {}",
                user,
                explanation.id,
                acronym.acronym
            );
            return Ok(Target::Rejected(Reply::InsufficientPrivileges));
        }
        Ok(Target::Editable(acronym, explanation))
    }

    async fn list_own(&mut self, user: &UserId) -> Result<Reply, sqlx::Error> {
        let entries = self.repo.explanations_by_author(user).await?;
        if entries.is_empty() {
            return Ok(Reply::AuthorNoExplanations);
        }
        Ok(Reply::AuthorExplanations(entries))
    }

    async fn request_delete_own(&mut self, user: &UserId) -> Result<Reply, sqlx::Error> {
        if !self.repo.has_explanations_by_author(user).await? {
            return Ok(Reply::AuthorNoExplanations);
        }
        Ok(Reply::AuthorConfirmDelete)
    }

    async fn delete_own(&mut self, user: &UserId) -> Result<Reply, sqlx::Error> {
        let removed = self.repo.delete_explanations_by_author(user).await?;
        tracing::info!("{} deleted all {} of their explanations", user, removed);
        Ok(Reply::AuthorExplanationsDeleted)
    }
}

fn is_too_long(text: &str) -> bool {
    text.chars().count() > MAX_EXPLANATION_LENGTH
}

fn duplicate(acronym: &Acronym, text: &str) -> Reply {
    Reply::DuplicateExplanation {
        acronym: acronym.acronym.clone(),
        explanation: text.to_string(),
    }
}
