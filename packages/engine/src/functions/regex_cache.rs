//! Compiled pattern cache for `match()` and `search()`

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use regex::Regex;

/// Patterns kept by the process-wide cache
pub const DEFAULT_CAPACITY: usize = 64;

/// Bounded cache of compiled regular expressions, keyed by source text
///
/// Once full, new patterns are still compiled but no longer stored.
#[derive(Debug)]
pub struct RegexCache {
    cache: RwLock<HashMap<String, Regex>>,
    capacity: usize,
}

impl RegexCache {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    /// Compiled form of `pattern`, from the cache when possible
    ///
    /// # Errors
    ///
    /// Returns the compiler's error when `pattern` is not a valid regular expression.
    pub fn get_or_compile(&self, pattern: &str) -> Result<Regex, regex::Error> {
        if let Ok(cache) = self.cache.read() {
            if let Some(regex) = cache.get(pattern) {
                log::debug!("regex cache hit for {pattern:?}");
                return Ok(regex.clone());
            }
        }

        log::debug!("regex cache miss for {pattern:?}");
        let regex = Regex::new(pattern)?;

        if let Ok(mut cache) = self.cache.write() {
            if cache.len() < self.capacity {
                cache.insert(pattern.to_string(), regex.clone());
            }
        }
        Ok(regex)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.read().map_or(0, |cache| cache.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RegexCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

pub static REGEX_CACHE: Lazy<RegexCache> = Lazy::new(RegexCache::default);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_patterns_are_reused() {
        let cache = RegexCache::new(4);
        assert!(cache.get_or_compile("a+").unwrap().is_match("caat"));
        assert!(cache.get_or_compile("a+").is_ok());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn capacity_bounds_storage_not_compilation() {
        let cache = RegexCache::new(1);
        cache.get_or_compile("a").unwrap();
        assert!(cache.get_or_compile("b").unwrap().is_match("b"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn invalid_patterns_are_not_cached() {
        let cache = RegexCache::new(4);
        assert!(cache.get_or_compile("(").is_err());
        assert!(cache.is_empty());
    }
}
