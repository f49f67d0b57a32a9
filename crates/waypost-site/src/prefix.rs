//! Longest-prefix matching shared by locale and sidebar lookups.
//!
//! Both tables are keyed by URL path prefixes and resolved the same way, so
//! the selection rule lives in one place.

/// Select the entry whose key is the longest literal prefix of `path`.
///
/// Keys are compared byte-for-byte with no normalization. Among keys of
/// equal length the first one yielded wins, which only matters for tables
/// that have not been validated (validated tables never contain two equal
/// keys, and two distinct keys of equal length cannot both prefix one path).
pub(crate) fn longest_prefix<'a, T>(
    path: &str,
    entries: impl IntoIterator<Item = (&'a str, T)>,
) -> Option<(&'a str, T)> {
    let mut best: Option<(&'a str, T)> = None;
    for (key, value) in entries {
        if !path.starts_with(key) {
            continue;
        }
        if best.as_ref().is_none_or(|(current, _)| key.len() > current.len()) {
            best = Some((key, value));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pick<'a>(path: &str, keys: &[&'a str]) -> Option<(&'a str, usize)> {
        longest_prefix(path, keys.iter().enumerate().map(|(i, k)| (*k, i)))
    }

    #[test]
    fn test_longest_prefix_prefers_most_specific() {
        let keys = ["/", "/guide/", "/guide/advanced/"];

        assert_eq!(
            pick("/guide/advanced/cache.html", &keys),
            Some(("/guide/advanced/", 2))
        );
        assert_eq!(pick("/guide/intro.html", &keys), Some(("/guide/", 1)));
        assert_eq!(pick("/about/", &keys), Some(("/", 0)));
    }

    #[test]
    fn test_longest_prefix_no_match_returns_none() {
        assert_eq!(pick("/about/", &["/guide/", "/api/"]), None);
    }

    #[test]
    fn test_longest_prefix_is_literal() {
        // No trailing-slash normalization: "/guide" is not under "/guide/"
        assert_eq!(pick("/guide", &["/guide/"]), None);
        // No case folding
        assert_eq!(pick("/Guide/intro", &["/guide/"]), None);
    }

    #[test]
    fn test_longest_prefix_equal_length_keeps_first() {
        assert_eq!(pick("/js/intro", &["/js/", "/js/"]), Some(("/js/", 0)));
    }

    #[test]
    fn test_longest_prefix_order_independent_for_distinct_lengths() {
        let forward = pick("/a/b/c", &["/a/", "/a/b/"]);
        let backward = pick("/a/b/c", &["/a/b/", "/a/"]);

        assert_eq!(forward.map(|(k, _)| k), Some("/a/b/"));
        assert_eq!(backward.map(|(k, _)| k), Some("/a/b/"));
    }
}
