//! Placement check: does each declared asset exist under the project root?
use std::path::{Component, Path, PathBuf};

/// Return the declared assets with no filesystem entry, in declared order.
///
/// Directories count as present, so Flutter folder declarations such as
/// `assets/icons/` pass when the folder exists.
pub fn check_placement(root: &Path, assets: &[String]) -> Vec<String> {
    assets
        .iter()
        .filter(|asset| {
            let path = resolve_under_root(root, asset);
            let exists = path.exists();
            tracing::debug!(asset = asset.as_str(), exists, "placement");
            !exists
        })
        .cloned()
        .collect()
}

/// Join `asset` onto `root`, dropping any root or drive prefix so a leading
/// `/` never escapes the project.
pub fn resolve_under_root(root: &Path, asset: &str) -> PathBuf {
    let relative: PathBuf = Path::new(asset)
        .components()
        .filter(|component| {
            matches!(
                component,
                Component::Normal(_) | Component::CurDir | Component::ParentDir
            )
        })
        .collect();
    root.join(relative)
}

#[cfg(test)]
mod tests {
    use super::{check_placement, resolve_under_root};

    #[test]
    fn reports_only_absent_assets_in_declared_order() {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(root.path().join("assets/icons")).expect("create dirs");
        std::fs::write(root.path().join("assets/logo.png"), b"png").expect("write asset");

        let declared = vec![
            "assets/z_ghost.png".to_string(),
            "assets/logo.png".to_string(),
            "assets/icons/".to_string(),
            "assets/a_ghost.png".to_string(),
            "assets/z_ghost.png".to_string(),
        ];
        let missing = check_placement(root.path(), &declared);

        assert_eq!(
            missing,
            vec![
                "assets/z_ghost.png",
                "assets/a_ghost.png",
                "assets/z_ghost.png"
            ]
        );
        assert!(missing.iter().all(|asset| declared.contains(asset)));
    }

    #[test]
    fn empty_declaration_has_nothing_missing() {
        let root = tempfile::tempdir().expect("create temp dir");
        assert!(check_placement(root.path(), &[]).is_empty());
    }

    #[test]
    fn leading_slash_stays_under_the_project_root() {
        let root = tempfile::tempdir().expect("create temp dir");
        let outside = tempfile::tempdir().expect("create outside dir");
        std::fs::create_dir_all(root.path().join("assets")).expect("create dirs");
        std::fs::write(root.path().join("assets/logo.png"), b"png").expect("write asset");

        let outside_abs = outside.path().display().to_string();
        let declared = vec!["/assets/logo.png".to_string(), outside_abs.clone()];
        let missing = check_placement(root.path(), &declared);

        assert_eq!(missing, vec![outside_abs]);
        assert!(resolve_under_root(root.path(), "/assets/logo.png").starts_with(root.path()));
    }
}
