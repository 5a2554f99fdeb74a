use crate::core::{EntityError, Result};
use lru::LruCache;
use regex::{Regex, RegexBuilder};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

const REGEX_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(200) {
    Some(capacity) => capacity,
    None => NonZeroUsize::MIN,
};

lazy_static::lazy_static! {
    static ref REGEX_LRU_CACHE: Arc<Mutex<LruCache<String, Arc<Regex>>>> =
        Arc::new(Mutex::new(LruCache::new(REGEX_CACHE_CAPACITY)));
}

/// Returns the compiled regex for `pattern`, compiling and caching it on first use.
///
/// Patterns are unanchored: `"x"` matches any text containing an `x`.
pub fn compile(pattern: &str, case_insensitive: bool) -> Result<Arc<Regex>> {
    let cache_key = if case_insensitive {
        format!("i:{}", pattern)
    } else {
        format!("s:{}", pattern)
    };

    {
        let mut cache = REGEX_LRU_CACHE.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(regex) = cache.get(&cache_key) {
            return Ok(Arc::clone(regex));
        }
    }

    let compiled = RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|e| EntityError::InvalidPattern(format!("'{}': {}", pattern, e)))?;
    let compiled = Arc::new(compiled);

    {
        let mut cache = REGEX_LRU_CACHE.lock().unwrap_or_else(|e| e.into_inner());
        cache.put(cache_key, Arc::clone(&compiled));
    }

    Ok(compiled)
}

#[inline]
pub fn is_match(text: &str, pattern: &str, case_insensitive: bool) -> Result<bool> {
    Ok(compile(pattern, case_insensitive)?.is_match(text))
}
