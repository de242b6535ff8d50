//! Path helpers shared by the builder and the command layer.

use std::path::{Path, PathBuf};

/// Get the base path from a config file path (its parent directory).
pub fn base_path_from_config(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Where a rendered root template lands in the output directory.
///
/// The template keeps its file name: `index.html` -> `<output>/index.html`,
/// `pages/home.html` -> `<output>/home.html`.
pub fn template_output_path(template: &str, output_dir: &Path) -> PathBuf {
    let name = Path::new(template)
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("index.html"));
    output_dir.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_path_from_config() {
        assert_eq!(
            base_path_from_config(Path::new("/project/mdpress.yaml")),
            PathBuf::from("/project")
        );
        assert_eq!(
            base_path_from_config(Path::new("mdpress.yaml")),
            PathBuf::from("")
        );
    }

    #[test]
    fn test_template_output_path() {
        assert_eq!(
            template_output_path("index.html", Path::new("/site/dist")),
            PathBuf::from("/site/dist/index.html")
        );
        assert_eq!(
            template_output_path("pages/home.html", Path::new("dist")),
            PathBuf::from("dist/home.html")
        );
    }
}
