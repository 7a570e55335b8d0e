use super::error::{DocumentRole, MigrationError};
use std::fs;
use std::path::{Path, PathBuf};

/// Artifact written when no output name is given
pub const DEFAULT_ARTIFACT_NAME: &str = "new_code.js";

/// Prefix prepended to a user-supplied output name
pub const ARTIFACT_PREFIX: &str = "new_";

/// Language tag used when fencing the user's code in the prompt
pub const DEFAULT_LANGUAGE: &str = "javascript";

/// Locations of the two externally maintained documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPaths {
    pub guide: PathBuf,
    pub reference: PathBuf,
}

impl DocumentPaths {
    pub fn new(guide: impl Into<PathBuf>, reference: impl Into<PathBuf>) -> Self {
        Self {
            guide: guide.into(),
            reference: reference.into(),
        }
    }
}

impl Default for DocumentPaths {
    fn default() -> Self {
        Self::new("migrate.md", "sdk.md")
    }
}

/// Derives the artifact path from an optional output name.
///
/// `foo.js` becomes `new_foo.js`; a directory component is kept, so
/// `src/foo.js` becomes `src/new_foo.js`.
pub fn artifact_path_for(name: Option<&str>) -> PathBuf {
    let name = match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name,
        None => return PathBuf::from(DEFAULT_ARTIFACT_NAME),
    };

    let path = Path::new(name);
    match path.file_name() {
        Some(file_name) => {
            let prefixed = format!("{}{}", ARTIFACT_PREFIX, file_name.to_string_lossy());
            path.with_file_name(prefixed)
        }
        None => PathBuf::from(DEFAULT_ARTIFACT_NAME),
    }
}

/// One migration job, immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRequest {
    source_code: String,
    guide_document: String,
    reference_document: String,
    artifact_path: PathBuf,
    language: String,
}

impl MigrationRequest {
    /// Builds a request from in-memory parts. The source code is trimmed and
    /// must not be empty.
    pub fn new(
        source_code: impl AsRef<str>,
        guide_document: impl Into<String>,
        reference_document: impl Into<String>,
        artifact_path: impl Into<PathBuf>,
    ) -> Result<Self, MigrationError> {
        let source_code = source_code.as_ref().trim();
        if source_code.is_empty() {
            return Err(MigrationError::EmptyInput);
        }

        Ok(Self {
            source_code: source_code.to_string(),
            guide_document: guide_document.into(),
            reference_document: reference_document.into(),
            artifact_path: artifact_path.into(),
            language: DEFAULT_LANGUAGE.to_string(),
        })
    }

    /// Builds a request, reading both documents from disk.
    ///
    /// Input is checked before the documents are touched.
    pub fn load(
        source_code: impl AsRef<str>,
        documents: &DocumentPaths,
        artifact_path: impl Into<PathBuf>,
    ) -> Result<Self, MigrationError> {
        if source_code.as_ref().trim().is_empty() {
            return Err(MigrationError::EmptyInput);
        }

        let guide = read_document(&documents.guide, DocumentRole::Guide)?;
        let reference = read_document(&documents.reference, DocumentRole::Reference)?;

        Self::new(source_code, guide, reference, artifact_path)
    }

    /// Sets the language tag used to fence the source code in the prompt
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn source_code(&self) -> &str {
        &self.source_code
    }

    pub fn guide_document(&self) -> &str {
        &self.guide_document
    }

    pub fn reference_document(&self) -> &str {
        &self.reference_document
    }

    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

fn read_document(path: &Path, role: DocumentRole) -> Result<String, MigrationError> {
    fs::read_to_string(path).map_err(|source| MigrationError::DocumentUnavailable {
        role,
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_artifact_path_default() {
        assert_eq!(artifact_path_for(None), PathBuf::from("new_code.js"));
        assert_eq!(artifact_path_for(Some("  ")), PathBuf::from("new_code.js"));
    }

    #[test]
    fn test_artifact_path_prefixes_file_name() {
        assert_eq!(artifact_path_for(Some("app.js")), PathBuf::from("new_app.js"));
        assert_eq!(
            artifact_path_for(Some("src/app.js")),
            PathBuf::from("src/new_app.js")
        );
    }

    #[test]
    fn test_new_trims_source() {
        let request = MigrationRequest::new("  code();\n", "guide", "ref", "out.js").unwrap();
        assert_eq!(request.source_code(), "code();");
        assert_eq!(request.language(), "javascript");
    }

    #[test]
    fn test_new_rejects_empty_source() {
        let err = MigrationRequest::new(" \n\t", "guide", "ref", "out.js").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn test_empty_documents_are_allowed() {
        let request = MigrationRequest::new("code();", "", "", "out.js").unwrap();
        assert!(request.guide_document().is_empty());
        assert!(request.reference_document().is_empty());
    }

    #[test]
    fn test_load_reads_documents() {
        let dir = TempDir::new().unwrap();
        let guide = dir.path().join("migrate.md");
        let reference = dir.path().join("sdk.md");
        fs::write(&guide, "# Guide").unwrap();
        fs::write(&reference, "# SDK").unwrap();

        let request = MigrationRequest::load(
            "old();",
            &DocumentPaths::new(&guide, &reference),
            "new_code.js",
        )
        .unwrap();

        assert_eq!(request.guide_document(), "# Guide");
        assert_eq!(request.reference_document(), "# SDK");
        assert_eq!(request.artifact_path(), Path::new("new_code.js"));
    }

    #[test]
    fn test_load_missing_reference() {
        let dir = TempDir::new().unwrap();
        let guide = dir.path().join("migrate.md");
        fs::write(&guide, "# Guide").unwrap();

        let err = MigrationRequest::load(
            "old();",
            &DocumentPaths::new(&guide, dir.path().join("missing.md")),
            "new_code.js",
        )
        .unwrap_err();

        match err {
            MigrationError::DocumentUnavailable { role, .. } => {
                assert_eq!(role, DocumentRole::Reference)
            }
            other => panic!("Expected DocumentUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_load_checks_input_first() {
        let err = MigrationRequest::load(
            "",
            &DocumentPaths::new("/nonexistent/a.md", "/nonexistent/b.md"),
            "new_code.js",
        )
        .unwrap_err();
        assert!(matches!(err, MigrationError::EmptyInput));
    }
}
