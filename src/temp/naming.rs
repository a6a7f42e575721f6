/*!
 * Name Generation
 * Builds candidate paths from decoration and an entropy source
 */

use super::types::{ResourceKind, ResourceRequest};
use std::path::PathBuf;
use std::sync::Arc;
use time::OffsetDateTime;
use uuid::Uuid;

/// Hex characters taken from a v4 UUID (60 random bits)
const RANDOM_HEX_LEN: usize = 16;

/// Source of the random part of a generated name
pub trait TokenSource: Send + Sync {
    fn token(&self) -> String;
}

/// UUID-backed token source
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTokens;

impl TokenSource for RandomTokens {
    fn token(&self) -> String {
        let mut hex = Uuid::new_v4().simple().to_string();
        hex.truncate(RANDOM_HEX_LEN);
        hex
    }
}

impl<F> TokenSource for F
where
    F: Fn() -> String + Send + Sync,
{
    fn token(&self) -> String {
        self()
    }
}

/// Builds `dir/prefix + YYYYMMDD-pid-random + suffix`
#[derive(Clone)]
pub struct NameGenerator {
    root: PathBuf,
    file_prefix: String,
    dir_prefix: String,
    tokens: Arc<dyn TokenSource>,
}

impl NameGenerator {
    pub fn new(root: PathBuf, file_prefix: String, dir_prefix: String) -> Self {
        Self::with_tokens(root, file_prefix, dir_prefix, Arc::new(RandomTokens))
    }

    pub fn with_tokens(
        root: PathBuf,
        file_prefix: String,
        dir_prefix: String,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        Self {
            root,
            file_prefix,
            dir_prefix,
            tokens,
        }
    }

    /// Directory used when the request names none
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Generate a candidate path; never touches the filesystem
    pub fn generate(&self, request: &ResourceRequest, kind: ResourceKind) -> PathBuf {
        let dir = request.dir.as_ref().unwrap_or(&self.root);
        let prefix = request.prefix.as_deref().unwrap_or(match kind {
            ResourceKind::File => self.file_prefix.as_str(),
            ResourceKind::Directory => self.dir_prefix.as_str(),
        });
        let suffix = request.suffix.as_deref().unwrap_or("");

        dir.join(format!("{}{}{}", prefix, self.stem(), suffix))
    }

    fn stem(&self) -> String {
        let today = OffsetDateTime::now_utc().date();
        format!(
            "{:04}{:02}{:02}-{}-{}",
            today.year(),
            u8::from(today.month()),
            today.day(),
            std::process::id(),
            self.tokens.token()
        )
    }
}

impl std::fmt::Debug for NameGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameGenerator")
            .field("root", &self.root)
            .field("file_prefix", &self.file_prefix)
            .field("dir_prefix", &self.dir_prefix)
            .finish_non_exhaustive()
    }
}
