// ABOUTME: Layout file persistence
// Resolves layout names inside the layout directory, loads documents into
// session models and writes captured sessions without clobbering files

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::layout::{normalize, PathContext, Session, SessionDocument, ValidationError};

/// Appended to layout names that carry no known extension.
pub const DEFAULT_EXTENSION: &str = "yml";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("layout directory {0} does not exist, create it or pass --layout-dir")]
    MissingDir(PathBuf),

    #[error("layout directory {0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("no such layout file: {0}")]
    NotFound(PathBuf),

    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("failed to parse layout {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("failed to serialize layout {path}: {message}")]
    Serialize { path: PathBuf, message: String },

    #[error("invalid layout: {0}")]
    Invalid(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// On-disk encoding, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::Json,
            _ => Self::Yaml,
        }
    }

    fn is_known_extension(ext: &str) -> bool {
        matches!(ext, "yml" | "yaml" | "json")
    }
}

pub fn parse_document(content: &str, format: DocumentFormat, path: &Path) -> Result<SessionDocument, StoreError> {
    let parsed = match format {
        DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        DocumentFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| StoreError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

pub fn render_document(doc: &SessionDocument, format: DocumentFormat, path: &Path) -> Result<String, StoreError> {
    let rendered = match format {
        DocumentFormat::Yaml => serde_yaml::to_string(doc).map_err(|e| e.to_string()),
        DocumentFormat::Json => serde_json::to_string_pretty(doc).map_err(|e| e.to_string()),
    };
    rendered.map_err(|message| StoreError::Serialize {
        path: path.to_path_buf(),
        message,
    })
}

/// Reads, parses and normalizes a single layout file.
pub fn load_session_file(path: &Path, paths: &PathContext) -> Result<Session, StoreError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => StoreError::NotFound(path.to_path_buf()),
        _ => StoreError::Io(e),
    })?;
    let doc = parse_document(&content, DocumentFormat::from_path(path), path)?;
    Ok(normalize(doc, paths)?)
}

/// Refuses sessions without windows or panes and never overwrites `path`.
pub fn save_session_file(session: &Session, path: &Path) -> Result<(), StoreError> {
    session.validate()?;
    let rendered = render_document(&session.to_document(), DocumentFormat::from_path(path), path)?;

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => StoreError::AlreadyExists(path.to_path_buf()),
            _ => StoreError::Io(e),
        })?;
    file.write_all(rendered.as_bytes())?;
    Ok(())
}

/// Directory of layout files addressed by name.
#[derive(Debug, Clone)]
pub struct LayoutStore {
    layout_dir: PathBuf,
}

impl LayoutStore {
    pub fn new(layout_dir: impl Into<PathBuf>) -> Self {
        Self {
            layout_dir: layout_dir.into(),
        }
    }

    /// The layout directory is never created implicitly.
    pub fn ensure_dir(&self) -> Result<(), StoreError> {
        match fs::metadata(&self.layout_dir) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(StoreError::NotADirectory(self.layout_dir.clone())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StoreError::MissingDir(self.layout_dir.clone()))
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// `name` plus `.yml` unless it already ends in a known extension.
    pub fn layout_path(&self, name: &str) -> PathBuf {
        let known = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(DocumentFormat::is_known_extension);
        if known {
            self.layout_dir.join(name)
        } else {
            self.layout_dir.join(format!("{name}.{DEFAULT_EXTENSION}"))
        }
    }

    pub fn load(&self, name: &str, paths: &PathContext) -> Result<Session, StoreError> {
        self.ensure_dir()?;
        let path = self.layout_path(name);
        info!("Loading layout from {}", path.display());
        load_session_file(&path, paths)
    }

    pub fn save(&self, name: &str, session: &Session) -> Result<PathBuf, StoreError> {
        self.ensure_dir()?;
        let path = self.layout_path(name);
        save_session_file(session, &path)?;
        info!("Wrote layout to {}", path.display());
        Ok(path)
    }
}
