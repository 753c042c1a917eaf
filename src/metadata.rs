//! Release identity extraction from `.csproj` project descriptors.
use log::*;
use quick_xml::{Reader, events::Event};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{Result, error::ReleaseError};

/// Extension of project descriptors searched for in the working directory.
pub const DESCRIPTOR_EXTENSION: &str = "csproj";

pub const RELEASE_TITLE_TAG: &str = "PackageReleaseTitle";
pub const RELEASE_NOTES_TAG: &str = "PackageReleaseNotes";
pub const REPOSITORY_URL_TAG: &str = "RepositoryUrl";
pub const PACKAGE_ID_TAG: &str = "PackageId";
pub const VERSION_TAG: &str = "Version";

/// Every element a descriptor must carry for a release to proceed.
pub const REQUIRED_TAGS: [&str; 5] = [
    RELEASE_TITLE_TAG,
    RELEASE_NOTES_TAG,
    REPOSITORY_URL_TAG,
    PACKAGE_ID_TAG,
    VERSION_TAG,
];

/// Immutable release metadata read once from the project descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseIdentity {
    /// Release tag, always `v` followed by the version.
    pub tag: String,
    pub title: String,
    pub notes: String,
    pub package_id: String,
    pub version: String,
    pub repository_url: String,
}

impl ReleaseIdentity {
    /// Builds the identity from raw field values, deriving the tag.
    pub fn new(
        title: impl Into<String>,
        notes: impl Into<String>,
        repository_url: impl Into<String>,
        package_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        let version = version.into();

        Self {
            tag: format!("v{version}"),
            title: title.into(),
            notes: notes.into(),
            package_id: package_id.into(),
            version,
            repository_url: repository_url.into(),
        }
    }

    /// Reads and parses the descriptor at `path`.
    pub fn from_descriptor(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ReleaseError::not_found("project descriptor", path));
        }

        debug!("reading project descriptor {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Extracts the identity from descriptor XML content.
    pub fn parse(content: &str) -> Result<Self> {
        let values = extract_elements(content, &REQUIRED_TAGS)?;

        let missing = REQUIRED_TAGS
            .iter()
            .zip(values.iter())
            .filter(|(_, value)| value.is_none())
            .map(|(tag, _)| tag.to_string())
            .collect::<Vec<_>>();

        if !missing.is_empty() {
            return Err(ReleaseError::MissingField { missing });
        }

        let mut fields = values.into_iter().map(Option::unwrap_or_default);
        let mut next = || fields.next().unwrap_or_default();

        let title = next();
        let notes = next();
        let repository_url = next();
        let package_id = next();
        let version = next();

        Ok(Self::new(title, notes, repository_url, package_id, version))
    }

    /// Package file name without extension, `{package_id}.{version}`.
    pub fn package_stem(&self) -> String {
        format!("{}.{}", self.package_id, self.version)
    }
}

/// Resolves the descriptor to use. An empty or non-existent `project` falls
/// back to the first descriptor found in `work_dir`.
pub fn locate_descriptor(
    project: Option<&Path>,
    work_dir: &Path,
) -> Result<PathBuf> {
    if let Some(project) = project
        && !project.as_os_str().is_empty()
    {
        if project.is_file() {
            return Ok(project.to_path_buf());
        }
        warn!(
            "project descriptor {} does not exist: searching {}",
            project.display(),
            work_dir.display()
        );
    }

    let mut found = fs::read_dir(work_dir)
        .map_err(|_| {
            ReleaseError::not_found("working directory", work_dir)
        })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext == DESCRIPTOR_EXTENSION)
        })
        .collect::<Vec<_>>();

    found.sort();

    match found.into_iter().next() {
        Some(path) => {
            info!("using project descriptor {}", path.display());
            Ok(path)
        }
        None => Err(ReleaseError::not_found(
            format!("*.{DESCRIPTOR_EXTENSION} file in directory"),
            work_dir,
        )),
    }
}

/// Collects the text of the first element (in document order, at any depth)
/// whose local name matches each of `names`. A match yields the
/// concatenation of all text beneath it.
fn extract_elements(
    content: &str,
    names: &[&str],
) -> Result<Vec<Option<String>>> {
    let mut reader = Reader::from_str(content);
    let mut values: Vec<Option<String>> = vec![None; names.len()];
    // (index into names, depth the element opened at, collected text)
    let mut capturing: Vec<(usize, usize, String)> = vec![];
    let mut depth = 0;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                depth += 1;
                if let Some(idx) =
                    wanted(names, e.local_name().as_ref(), &values, &capturing)
                {
                    capturing.push((idx, depth, String::new()));
                }
            }
            Event::Empty(e) => {
                if let Some(idx) =
                    wanted(names, e.local_name().as_ref(), &values, &capturing)
                {
                    values[idx] = Some(String::new());
                }
            }
            Event::End(_) => {
                while capturing.last().is_some_and(|(_, d, _)| *d == depth) {
                    if let Some((idx, _, text)) = capturing.pop() {
                        values[idx] = Some(text);
                    }
                }
                depth -= 1;
            }
            Event::Text(e) => {
                if !capturing.is_empty() {
                    let text = e.unescape()?;
                    for (_, _, buf) in capturing.iter_mut() {
                        buf.push_str(&text);
                    }
                }
            }
            Event::CData(e) => {
                if !capturing.is_empty() {
                    let text = String::from_utf8(e.into_inner().into_owned())?;
                    for (_, _, buf) in capturing.iter_mut() {
                        buf.push_str(&text);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(values)
}

/// Index of the requested element `local` names, unless it was already
/// found or is still open.
fn wanted(
    names: &[&str],
    local: &[u8],
    values: &[Option<String>],
    capturing: &[(usize, usize, String)],
) -> Option<usize> {
    let idx = names.iter().position(|name| name.as_bytes() == local)?;

    if values[idx].is_some() || capturing.iter().any(|(i, _, _)| *i == idx) {
        return None;
    }

    Some(idx)
}
