//! Enforces the file-for-file mirror between src and tests/unit

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    // Entry points and module organization files don't need mirrors
    fn is_structural(relative: &str) -> bool {
        relative == "main.rs" || relative == "lib.rs" || relative.ends_with("mod.rs")
    }

    fn rust_files_under(root: &Path) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        collect(root, root, &mut found).unwrap_or_else(|error| {
            assert!(!root.exists(), "failed to scan {}: {error}", root.display());
        });
        found
    }

    fn collect(dir: &Path, base: &Path, found: &mut BTreeSet<String>) -> Result<(), io::Error> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                collect(&path, base, found)?;
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                let relative = path
                    .strip_prefix(base)
                    .map_err(|_strip_error| io::Error::other("path outside scan root"))?;
                found.insert(relative.to_string_lossy().to_string());
            }
        }
        Ok(())
    }

    #[test]
    fn test_every_source_file_has_a_unit_test_mirror() {
        let sources = rust_files_under(Path::new("src"));
        let mirrors = rust_files_under(Path::new("tests/unit"));

        let missing: Vec<&String> = sources
            .iter()
            .filter(|relative| !is_structural(relative) && !mirrors.contains(*relative))
            .collect();

        assert!(
            missing.is_empty(),
            "src files without a tests/unit counterpart: {missing:?}"
        );
    }

    #[test]
    fn test_every_unit_test_file_mirrors_a_source_file() {
        let sources = rust_files_under(Path::new("src"));
        let mirrors = rust_files_under(Path::new("tests/unit"));

        let orphaned: Vec<&String> = mirrors
            .iter()
            .filter(|relative| !is_structural(relative) && !sources.contains(*relative))
            .collect();

        assert!(
            orphaned.is_empty(),
            "tests/unit files without a src counterpart: {orphaned:?}"
        );
    }

    #[test]
    fn test_every_test_file_contains_tests() {
        let mut empty = Vec::new();
        for relative in rust_files_under(Path::new("tests")) {
            if is_structural(&relative) || relative.ends_with("main.rs") {
                continue;
            }
            let content = fs::read_to_string(Path::new("tests").join(&relative))
                .unwrap_or_default();
            if !content.contains("#[test]") {
                empty.push(relative);
            }
        }

        assert!(
            empty.is_empty(),
            "test files without any #[test] function: {empty:?}"
        );
    }
}
