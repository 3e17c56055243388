//! Path utilities

use std::path::Path;

/// Normalize path separators to forward slashes (for report and archive entry names)
pub fn normalize_path<P: AsRef<Path>>(path: P) -> String {
    path.as_ref().to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("config\\ftbquests\\lang"), "config/ftbquests/lang");
        assert_eq!(normalize_path("a/b.json"), "a/b.json");
    }
}
