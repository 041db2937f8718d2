use regex::Regex;
use std::sync::LazyLock;

static HOTFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)hotfix\s*:").expect("hotfix pattern compiles"));

/// A title containing `hotfix:` (any case, optional spaces before the colon)
/// bypasses the restriction.
pub fn is_exempt(title: &str) -> bool {
    HOTFIX.is_match(title)
}
