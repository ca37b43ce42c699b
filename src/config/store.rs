//! Scoped key/value settings.
//!
//! A setting lives at one of three writable [`Scope`]s. Reads take a
//! [`Lookup`], which is either one exact scope or the inherited chain
//! (branch, then local, then global). Writing to "inherited" is not
//! representable.

use crate::git::GitError;

/// A writable configuration tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Scope {
    /// Per-user, shared by every repository.
    Global,
    /// Per-repository.
    Local,
    /// Per-repository and per-branch: keyed by the checked-out branch.
    Branch,
}

/// Where a read looks for a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    At(Scope),
    /// Search [`INHERITED_CHAIN`] and take the first non-empty value.
    Inherited,
}

impl From<Scope> for Lookup {
    fn from(scope: Scope) -> Self {
        Lookup::At(scope)
    }
}

impl std::fmt::Display for Lookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lookup::At(scope) => write!(f, "{scope}"),
            Lookup::Inherited => f.write_str("inherited"),
        }
    }
}

/// Scopes searched by [`Lookup::Inherited`], most specific first.
pub const INHERITED_CHAIN: [Scope; 3] = [Scope::Branch, Scope::Local, Scope::Global];

/// Storage for scoped settings.
///
/// `read` returns `None` for a key that isn't set at exactly `scope`.
/// Implementations fold the branch name into the key for [`Scope::Branch`].
pub trait ConfigBackend {
    fn read(&self, key: &str, scope: Scope) -> anyhow::Result<Option<String>>;
    fn write(&self, key: &str, value: &str, scope: Scope) -> anyhow::Result<()>;
}

/// Resolves settings against a [`ConfigBackend`].
///
/// Unset and empty are the same thing here: `get` returns `""` for both.
#[derive(Clone, Copy)]
pub struct ConfigStore<'a> {
    backend: &'a dyn ConfigBackend,
}

impl<'a> ConfigStore<'a> {
    pub fn new(backend: &'a dyn ConfigBackend) -> Self {
        Self { backend }
    }

    /// The value of `key` visible at `lookup`, or an empty string.
    pub fn get(&self, key: &str, lookup: impl Into<Lookup>) -> anyhow::Result<String> {
        match lookup.into() {
            Lookup::At(scope) => Ok(self.read_trimmed(key, scope)?.unwrap_or_default()),
            Lookup::Inherited => {
                for scope in INHERITED_CHAIN {
                    let found = match self.read_trimmed(key, scope) {
                        // Detached HEAD has no branch slot; the wider scopes still apply
                        Err(e) if is_detached_head(&e) => continue,
                        other => other?,
                    };
                    if let Some(value) = found {
                        log::debug!("{key} resolved at {scope} scope");
                        return Ok(value);
                    }
                }
                Ok(String::new())
            }
        }
    }

    /// Store `value` for `key` at exactly `scope`.
    pub fn set(&self, key: &str, value: &str, scope: Scope) -> anyhow::Result<()> {
        log::info!("Saving {key} at {scope} scope");
        self.backend.write(key, value, scope)
    }

    fn read_trimmed(&self, key: &str, scope: Scope) -> anyhow::Result<Option<String>> {
        Ok(self
            .backend
            .read(key, scope)?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty()))
    }
}

fn is_detached_head(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<GitError>(), Some(GitError::DetachedHead { .. }))
}
