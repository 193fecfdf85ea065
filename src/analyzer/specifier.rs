use once_cell::sync::Lazy;
use regex::Regex;

/// Python dependency specifier: `name [extras] (@ url | versionspec)? (; markers)?`.
///
/// Only the name is validated; everything after it is optional and anything
/// following a direct reference or version clause is ignored.
static SPECIFIER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?P<name>[a-zA-Z0-9](?:[a-zA-Z0-9._-]*[a-zA-Z0-9])?)\b\s*(?P<extras>\[[^\[\]]*\])?\s*(?:@.+|(?P<versionspec>[(<>=!~][^;]*)?).*",
    )
    .expect("specifier pattern is valid")
});

/// Canonical package name of a raw specifier, or `None` when it does not
/// start with a valid package name.
pub fn parse_name(spec: &str) -> Option<&str> {
    SPECIFIER_RE
        .captures(spec)
        .and_then(|caps| caps.name("name"))
        .map(|m| m.as_str())
}
