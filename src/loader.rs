//! Resource fixture loading.

use crate::errors::{BugmarkError, BugmarkResult};
use crate::fixture::Fixture;
use std::fs;
use std::path::Path;

/// Load `relative` (as produced by a resource template) from under `root`.
///
/// The returned fixture's virtual path is `relative` itself, so diagnostics
/// and reports name the resource the way the template does.
pub fn load_resource(root: &Path, relative: &str) -> BugmarkResult<Fixture> {
    let path = root.join(relative);
    let content = fs::read_to_string(&path).map_err(|e| BugmarkError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(Fixture::from_resource(relative, &content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::FixtureOrigin;

    #[test]
    fn test_load_resource() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("testdata")).unwrap();
        fs::write(
            dir.path().join("testdata/FooBar.java"),
            "class FooBar {\n}\n",
        )
        .unwrap();

        let fixture = load_resource(dir.path(), "testdata/FooBar.java").unwrap();
        assert_eq!(fixture.path, "testdata/FooBar.java");
        assert_eq!(fixture.lines, vec!["class FooBar {", "}"]);
        assert_eq!(fixture.origin, FixtureOrigin::Resource);
    }

    #[test]
    fn test_missing_resource() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_resource(dir.path(), "testdata/Missing.java").unwrap_err();
        match err {
            BugmarkError::Load { path, .. } => assert!(path.ends_with("Missing.java")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
