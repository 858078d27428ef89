//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version string, e.g. `tugwar 0.1.0 (2026-10-19, a1b2c3d)`.
pub fn version_line() -> String {
    format!(
        "tugwar {} ({}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_is_short_hash_or_unknown() {
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_date_is_iso_day() {
        assert_eq!(BUILD_DATE.len(), 10);
        assert_eq!(BUILD_DATE.matches('-').count(), 2);
    }

    #[test]
    fn test_version_line_names_package() {
        let line = version_line();
        assert!(line.starts_with("tugwar "));
        assert!(line.contains(env!("CARGO_PKG_VERSION")));
        assert!(line.contains(BUILD_COMMIT));
    }
}
