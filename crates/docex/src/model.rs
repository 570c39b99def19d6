//! Documentation model loading.

use std::fs;
use std::path::Path;

use docex_model::Repository;

use crate::error::CliError;

/// Read a JSON documentation model.
///
/// Relative diagram paths are resolved against the model file's directory.
pub(crate) fn load_model(path: &Path) -> Result<Repository, CliError> {
    let content = fs::read_to_string(path).map_err(|source| CliError::ModelIo {
        path: path.to_path_buf(),
        source,
    })?;
    let mut repository: Repository =
        serde_json::from_str(&content).map_err(|source| CliError::Model {
            path: path.to_path_buf(),
            source,
        })?;

    let base = path.parent().unwrap_or(Path::new("."));
    resolve_diagram_paths(&mut repository, base);

    tracing::debug!(
        path = %path.display(),
        namespaces = repository.namespaces.len(),
        types = repository.type_count(),
        "Loaded model"
    );
    Ok(repository)
}

fn resolve_diagram_paths(repository: &mut Repository, base: &Path) {
    let types = repository
        .namespaces
        .iter_mut()
        .flat_map(|ns| ns.types.iter_mut());
    for type_decl in types {
        if let Some(diagram) = &mut type_decl.class_diagram_path
            && diagram.is_relative()
            && !diagram.as_os_str().is_empty()
        {
            *diagram = base.join(&*diagram);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const MODEL: &str = r#"{
        "namespaces": [{
            "fullname": "Demo",
            "types": [
                { "fullname": "Demo.A", "name": "A", "class_diagram_path": "diagrams/a.png" },
                { "fullname": "Demo.B", "name": "B", "class_diagram_path": "/abs/b.png" },
                { "fullname": "Demo.C", "name": "C", "class_diagram_path": "" },
                { "fullname": "Demo.D", "name": "D" }
            ]
        }]
    }"#;

    #[test]
    fn test_load_model_resolves_relative_diagrams() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, MODEL).unwrap();

        let repo = load_model(&path).unwrap();

        let diagrams: Vec<_> = repo.namespaces[0]
            .types
            .iter()
            .map(|t| t.class_diagram_path.clone())
            .collect();
        assert_eq!(
            diagrams,
            [
                Some(dir.path().join("diagrams/a.png")),
                Some(PathBuf::from("/abs/b.png")),
                Some(PathBuf::new()),
                None,
            ]
        );
    }

    #[test]
    fn test_load_model_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_model(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CliError::ModelIo { .. }));
    }

    #[test]
    fn test_load_model_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, r#"{"namespaces": [{"types": []}]}"#).unwrap();

        let err = load_model(&path).unwrap_err();
        assert!(matches!(err, CliError::Model { .. }));
        assert!(err.to_string().contains("model.json"));
    }
}
