//! Objectclass normalization and composite ids.

/// Separator used in namespaced class names.
const NAMESPACE_SEPARATOR: char = '\\';

/// Flatten a namespaced class name into a token usable in queries and ids.
///
/// One leading separator is dropped and every remaining separator becomes a dash,
/// so `\Foo\Bar\Baz` and `Foo\Bar\Baz` both normalize to `Foo-Bar-Baz`.
pub fn normalize_objectclass(objectclass: &str) -> String {
    objectclass
        .strip_prefix(NAMESPACE_SEPARATOR)
        .unwrap_or(objectclass)
        .replace(NAMESPACE_SEPARATOR, "-")
}

/// Build the index-wide unique key `<normalized-objectclass>:<objectid>`.
pub fn composite_id(objectclass: &str, object_id: i64) -> String {
    format!("{}:{}", normalize_objectclass(objectclass), object_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_leading_separator() {
        assert_eq!(normalize_objectclass("\\Foo\\Bar\\Baz"), "Foo-Bar-Baz");
    }

    #[test]
    fn test_normalize_without_leading_separator() {
        assert_eq!(normalize_objectclass("Foo\\Bar"), "Foo-Bar");
    }

    #[test]
    fn test_normalize_strips_only_one_leading_separator() {
        assert_eq!(normalize_objectclass("\\\\Foo"), "-Foo");
    }

    #[test]
    fn test_normalize_is_idempotent_on_flat_names() {
        assert_eq!(normalize_objectclass("Foo-Bar"), "Foo-Bar");
        assert_eq!(normalize_objectclass(""), "");
    }

    #[test]
    fn test_composite_id() {
        assert_eq!(composite_id("\\Foo\\Bar", 42), "Foo-Bar:42");
        assert_eq!(composite_id("Foo-Bar", 42), "Foo-Bar:42");
    }
}
