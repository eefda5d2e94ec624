//! Short link allocation, resolution and click registration.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::entities::{LinkStats, ShortLink};
use crate::domain::repositories::{LinkRepository, StoreError};
use crate::utils::code_generator::generate_code;
use crate::utils::url_validator::{UrlValidator, ValidationError, normalize};

/// Number of random candidates tried before giving up.
pub const MAX_GENERATION_ATTEMPTS: usize = 5;

/// Length of generated codes when not configured otherwise.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Errors produced by [`LinkService`].
///
/// Storage failures are classified into these variants at the call site;
/// callers never see a [`StoreError`].
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("invalid URL: {0}")]
    InvalidUrl(ValidationError),

    #[error("invalid custom code: {0}")]
    InvalidCustomCode(ValidationError),

    #[error("could not generate a free short code after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    #[error("short code '{0}' is already in use")]
    CodeAlreadyInUse(String),

    #[error("short code '{0}' not found")]
    NotFound(String),

    #[error("short code '{0}' has expired")]
    Expired(String),

    #[error("random source failure: {0}")]
    Randomness(getrandom::Error),

    #[error("storage failure: {0}")]
    Store(String),
}

impl From<StoreError> for LinkError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateCode(code) => LinkError::CodeAlreadyInUse(code),
            StoreError::NotFound(code) => LinkError::NotFound(code),
            StoreError::Backend(message) => LinkError::Store(message),
        }
    }
}

/// Input for [`LinkService::shorten`].
#[derive(Debug, Clone, Default)]
pub struct ShortenCommand {
    pub url: String,
    pub custom_code: Option<String>,
    /// Seconds until expiry. Zero or negative means the link never expires.
    pub ttl_seconds: Option<i64>,
}

/// Service for creating, resolving and counting short links.
///
/// Holds no locks. Uniqueness of codes is decided by the repository's
/// atomic `save`; the existence check in the generation loop only avoids
/// wasting attempts on codes that are already taken.
pub struct LinkService<R: LinkRepository + ?Sized = dyn LinkRepository> {
    repository: Arc<R>,
    validator: UrlValidator,
    code_length: usize,
}

impl<R: LinkRepository + ?Sized> LinkService<R> {
    /// Creates a new link service.
    pub fn new(repository: Arc<R>, validator: UrlValidator, code_length: usize) -> Self {
        Self {
            repository,
            validator,
            code_length,
        }
    }

    /// Creates a short link.
    ///
    /// # Allocation
    ///
    /// 1. The target URL is normalized (`https://` added when missing) and validated
    /// 2. A custom code is validated and used as-is; no codes are generated
    /// 3. Otherwise up to [`MAX_GENERATION_ATTEMPTS`] random codes are tried
    ///    against an existence check
    /// 4. `expires_at` is set only for a positive TTL
    /// 5. The link is saved with insert-if-absent semantics
    ///
    /// A conflict at step 5 is reported, never retried.
    ///
    /// # Errors
    ///
    /// - [`LinkError::InvalidUrl`] / [`LinkError::InvalidCustomCode`] for bad input
    /// - [`LinkError::GenerationExhausted`] if every candidate was taken
    /// - [`LinkError::CodeAlreadyInUse`] if another writer saved the code first
    /// - [`LinkError::Randomness`] / [`LinkError::Store`] on infrastructure failure
    pub async fn shorten(&self, command: ShortenCommand) -> Result<ShortLink, LinkError> {
        let target_url = normalize(&command.url);
        self.validator
            .validate_url(&target_url)
            .map_err(LinkError::InvalidUrl)?;

        let code = match command.custom_code {
            Some(custom) => {
                self.validator
                    .validate_custom_code(&custom)
                    .map_err(LinkError::InvalidCustomCode)?;
                custom
            }
            None => self.generate_unique_code().await?,
        };

        let link = ShortLink::new(code, target_url, command.ttl_seconds);
        self.repository.save(&link).await?;

        tracing::info!(code = %link.code, target = %link.target_url, "Short link created");

        Ok(link)
    }

    /// Looks up a live link.
    ///
    /// Expiry is checked against the current time on every call.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] if no link has this code and
    /// [`LinkError::Expired`] if the link is past its expiry time.
    pub async fn resolve(&self, code: &str) -> Result<ShortLink, LinkError> {
        let link = self.repository.get_by_code(code).await?;

        if link.is_expired() {
            return Err(LinkError::Expired(link.code));
        }

        Ok(link)
    }

    /// Resolves the code again, then adds one to its click counter.
    ///
    /// Runs from the background click worker, not the redirect path.
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve`], plus storage failures from the increment.
    pub async fn register_click(&self, code: &str) -> Result<(), LinkError> {
        self.resolve(code).await?;
        self.repository.increment_clicks(code).await?;
        Ok(())
    }

    /// Returns statistics for a link, including expired ones.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] if no link has this code.
    pub async fn get_stats(&self, code: &str) -> Result<LinkStats, LinkError> {
        Ok(self.repository.get_stats(code).await?)
    }

    /// Deletes a link, including expired ones.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] if no link has this code.
    pub async fn delete(&self, code: &str) -> Result<(), LinkError> {
        self.repository.delete_by_code(code).await?;
        tracing::info!(code = %code, "Short link deleted");
        Ok(())
    }

    /// Checks that the underlying store is reachable.
    pub async fn health_check(&self) -> Result<(), LinkError> {
        Ok(self.repository.ping().await?)
    }

    async fn generate_unique_code(&self) -> Result<String, LinkError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let candidate = generate_code(self.code_length).map_err(LinkError::Randomness)?;

            match self.repository.get_by_code(&candidate).await {
                Err(StoreError::NotFound(_)) => return Ok(candidate),
                Ok(_) => {
                    tracing::debug!(attempt, code = %candidate, "Generated code already taken");
                }
                Err(e) => return Err(e.into()),
            }
        }

        metrics::counter!("code_generation_exhausted_total").increment(1);
        tracing::warn!(
            attempts = MAX_GENERATION_ATTEMPTS,
            "Short code generation exhausted"
        );

        Err(LinkError::GenerationExhausted {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }
}
