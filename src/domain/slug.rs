//! Slug helpers for course and subject URLs.
//!
//! Slug derivation is kept pure; callers provide the uniqueness check so that
//! persistence conflicts are resolved against whatever store they use.

use std::future::Future;

use slug::slugify;
use thiserror::Error;

const MAX_SUFFIX_ATTEMPTS: usize = 32;
const MAX_SLUG_LEN: usize = 200;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug source text is empty")]
    EmptyInput,
    #[error("failed to derive slug from `{input}`")]
    Unrepresentable { input: String },
    #[error("slug `{slug}` is not in canonical form")]
    NotCanonical { slug: String },
    #[error("exhausted attempts to find a unique slug for `{base}`")]
    Exhausted { base: String },
}

#[derive(Debug, Error)]
pub enum SlugAsyncError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    #[error(transparent)]
    Slug(#[from] SlugError),
    #[error(transparent)]
    Predicate(E),
}

/// Derive a base slug from human-readable text.
pub fn derive_slug(input: &str) -> Result<String, SlugError> {
    if input.trim().is_empty() {
        return Err(SlugError::EmptyInput);
    }

    let mut candidate = slugify(input);
    if candidate.len() > MAX_SLUG_LEN {
        candidate.truncate(MAX_SLUG_LEN);
        candidate = candidate.trim_end_matches('-').to_string();
    }

    if candidate.is_empty() {
        return Err(SlugError::Unrepresentable {
            input: input.to_string(),
        });
    }

    Ok(candidate)
}

/// Accept a user-supplied slug only when it is already canonical.
pub fn validate_slug(value: &str) -> Result<String, SlugError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SlugError::EmptyInput);
    }
    if trimmed.len() > MAX_SLUG_LEN || slugify(trimmed) != trimmed {
        return Err(SlugError::NotCanonical {
            slug: trimmed.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Produce a slug that the async `is_unique` predicate accepts, suffixing a
/// counter (`-2`, `-3`, …) on collisions.
pub async fn generate_unique_slug_async<F, Fut, E>(
    input: &str,
    mut is_unique: F,
) -> Result<String, SlugAsyncError<E>>
where
    F: FnMut(&str) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    let base = derive_slug(input)?;

    if is_unique(&base).await.map_err(SlugAsyncError::Predicate)? {
        return Ok(base);
    }

    for attempt in 2..=MAX_SUFFIX_ATTEMPTS + 1 {
        let candidate = format!("{base}-{attempt}");
        if is_unique(&candidate)
            .await
            .map_err(SlugAsyncError::Predicate)?
        {
            return Ok(candidate);
        }
    }

    Err(SlugAsyncError::Slug(SlugError::Exhausted { base }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_slug_normalises_titles() {
        assert_eq!(
            derive_slug("Intro to Django & Rust").unwrap(),
            "intro-to-django-rust"
        );
    }

    #[test]
    fn derive_slug_rejects_blank_input() {
        assert_eq!(derive_slug("   "), Err(SlugError::EmptyInput));
    }

    #[test]
    fn validate_slug_requires_canonical_form() {
        assert_eq!(validate_slug(" python-101 ").unwrap(), "python-101");
        assert!(matches!(
            validate_slug("Python 101"),
            Err(SlugError::NotCanonical { .. })
        ));
    }

    #[tokio::test]
    async fn unique_slug_appends_counter() {
        use std::sync::Arc;
        use tokio::sync::Mutex;

        let existing = Arc::new(Mutex::new(vec!["data-structures".to_string()]));

        let slug = generate_unique_slug_async("Data Structures", |candidate| {
            let existing = existing.clone();
            let candidate = candidate.to_string();
            async move {
                let guard = existing.lock().await;
                Ok::<bool, std::convert::Infallible>(!guard.contains(&candidate))
            }
        })
        .await
        .expect("unique slug");

        assert_eq!(slug, "data-structures-2");
    }
}
