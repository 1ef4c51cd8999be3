use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain model for a book record as held in the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    /// Normalized form of the title; unique across books and recomputed
    /// whenever the title changes.
    pub slug: String,
    pub year: i64,
    /// Authoring user's id. None for a book owned by nobody (the state
    /// a user-delete cascade leaves behind).
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Derive the URL-safe slug for a title.
    ///
    /// Lowercases, maps every non-alphanumeric run to a single hyphen,
    /// and trims leading/trailing hyphens, so "Go in Action" and
    /// "go   IN action!" both normalize to "go-in-action".
    pub fn slugify(title: &str) -> String {
        let mut slug = String::with_capacity(title.len());
        let mut pending_hyphen = false;
        for c in title.chars() {
            if c.is_alphanumeric() {
                if pending_hyphen && !slug.is_empty() {
                    slug.push('-');
                }
                pending_hyphen = false;
                for lower in c.to_lowercase() {
                    slug.push(lower);
                }
            } else {
                pending_hyphen = true;
            }
        }
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic_title() {
        assert_eq!(Book::slugify("Go in Action"), "go-in-action");
    }

    #[test]
    fn slugify_collapses_separator_runs() {
        assert_eq!(Book::slugify("go   IN action!"), "go-in-action");
        assert_eq!(Book::slugify("The C++ Programming Language"), "the-c-programming-language");
    }

    #[test]
    fn slugify_trims_edges() {
        assert_eq!(Book::slugify("  Dune  "), "dune");
        assert_eq!(Book::slugify("!!!"), "");
    }

    #[test]
    fn slugify_is_stable_under_itself() {
        let once = Book::slugify("Systems Performance, 2nd Edition");
        assert_eq!(Book::slugify(&once), once);
    }
}
