//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the front desk
//! service. Environment variables are only read by the binary; this module provides the parsers
//! for their raw values so request-time code never touches the process environment.

use crate::constants::DEFAULT_PAGE_SIZE;
use crate::query::SortKey;
use crate::{FrontDeskError, FrontDeskResult};
use std::path::{Path, PathBuf};

/// Where the initial records come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeedSource {
    /// The built-in demo patients and appointments.
    Builtin,
    /// Start with an empty store.
    Empty,
    /// A YAML fixture file.
    File(PathBuf),
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    page_size: usize,
    default_sort: SortKey,
    seed: SeedSource,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            default_sort: SortKey::default(),
            seed: SeedSource::Builtin,
        }
    }
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`FrontDeskError::InvalidInput`] if `page_size` is zero.
    pub fn new(page_size: usize, default_sort: SortKey, seed: SeedSource) -> FrontDeskResult<Self> {
        if page_size == 0 {
            return Err(FrontDeskError::InvalidInput(
                "page_size must be greater than zero".into(),
            ));
        }

        Ok(Self {
            page_size,
            default_sort,
            seed,
        })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn default_sort(&self) -> SortKey {
        self.default_sort
    }

    pub fn seed(&self) -> &SeedSource {
        &self.seed
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the page size from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default of 20.
pub fn page_size_from_env_value(value: Option<String>) -> FrontDeskResult<usize> {
    match non_blank(value) {
        None => Ok(DEFAULT_PAGE_SIZE),
        Some(v) => match v.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(FrontDeskError::InvalidInput(format!(
                "page size must be a positive integer, got '{v}'"
            ))),
        },
    }
}

/// Parse the default sort key from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns `date-latest`.
pub fn default_sort_from_env_value(value: Option<String>) -> FrontDeskResult<SortKey> {
    let parsed = non_blank(value).map(|v| v.parse::<SortKey>()).transpose()?;
    Ok(parsed.unwrap_or_default())
}

/// Parse the seed source from an optional string value.
///
/// `None`, empty and `builtin` select the built-in fixtures, `none` an empty store. Anything
/// else is a path that must name an existing file.
pub fn seed_source_from_env_value(value: Option<String>) -> FrontDeskResult<SeedSource> {
    let Some(v) = non_blank(value) else {
        return Ok(SeedSource::Builtin);
    };

    match v.to_ascii_lowercase().as_str() {
        "builtin" => Ok(SeedSource::Builtin),
        "none" => Ok(SeedSource::Empty),
        _ => {
            let path = Path::new(&v);
            if !path.is_file() {
                return Err(FrontDeskError::InvalidInput(format!(
                    "seed file '{}' does not exist",
                    path.display()
                )));
            }
            Ok(SeedSource::File(path.to_path_buf()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_page_size() {
        assert!(CoreConfig::new(0, SortKey::NameAsc, SeedSource::Empty).is_err());
        let cfg = CoreConfig::new(5, SortKey::NameAsc, SeedSource::Empty).unwrap();
        assert_eq!(cfg.page_size(), 5);
        assert_eq!(cfg.default_sort(), SortKey::NameAsc);
        assert_eq!(cfg.seed(), &SeedSource::Empty);
    }

    #[test]
    fn test_defaults() {
        let cfg = CoreConfig::default();
        assert_eq!(cfg.page_size(), 20);
        assert_eq!(cfg.default_sort(), SortKey::DateLatest);
        assert_eq!(cfg.seed(), &SeedSource::Builtin);
    }

    #[test]
    fn test_page_size_from_env_value() {
        assert_eq!(page_size_from_env_value(None).unwrap(), 20);
        assert_eq!(page_size_from_env_value(Some("  ".into())).unwrap(), 20);
        assert_eq!(page_size_from_env_value(Some(" 50 ".into())).unwrap(), 50);
        assert!(page_size_from_env_value(Some("0".into())).is_err());
        assert!(page_size_from_env_value(Some("ten".into())).is_err());
    }

    #[test]
    fn test_default_sort_from_env_value() {
        assert_eq!(default_sort_from_env_value(None).unwrap(), SortKey::DateLatest);
        assert_eq!(
            default_sort_from_env_value(Some("status-desc".into())).unwrap(),
            SortKey::StatusDesc
        );
        assert!(default_sort_from_env_value(Some("latest".into())).is_err());
    }

    #[test]
    fn test_seed_source_from_env_value() {
        assert_eq!(seed_source_from_env_value(None).unwrap(), SeedSource::Builtin);
        assert_eq!(
            seed_source_from_env_value(Some("BUILTIN".into())).unwrap(),
            SeedSource::Builtin
        );
        assert_eq!(
            seed_source_from_env_value(Some("none".into())).unwrap(),
            SeedSource::Empty
        );

        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_string_lossy().into_owned();
        assert_eq!(
            seed_source_from_env_value(Some(path)).unwrap(),
            SeedSource::File(file.path().to_path_buf())
        );

        assert!(seed_source_from_env_value(Some("/definitely/not/here.yaml".into())).is_err());
    }
}
