pub mod io;
pub mod net;

use std::path::{Component, Path};

// to prevent directory traversal attacks we ensure the path consists of exactly one normal
// component
pub fn path_is_valid(path: &str) -> bool {
    let path = Path::new(path);
    let mut components = path.components().peekable();

    if let Some(first) = components.peek() {
        if !matches!(first, Component::Normal(_)) {
            return false;
        }
    }

    components.count() == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_is_valid() {
        assert!(path_is_valid("0b7c6f2e.png"));
        assert!(path_is_valid("noext"));
        assert!(!path_is_valid(""));
        assert!(!path_is_valid(".."));
        assert!(!path_is_valid("../secret.txt"));
        assert!(!path_is_valid("a/b.txt"));
        assert!(!path_is_valid("/etc/passwd"));
        assert!(!path_is_valid("./a.txt/.."));
    }
}
