//! # Manifest Loading
//!
//! This module turns a repo-style XML manifest into the structured
//! [`Manifest`] consumed by the verification engine. Only the fields needed
//! for verification are extracted:
//!
//! ```xml
//! <manifest>
//!   <remote name="aosp" fetch="android.googlesource.com" />
//!   <project name="platform/frameworks/base" path="frameworks/base"
//!            remote="aosp" revision="main" />
//!   <remove-project name="platform/packages/apps/Browser2" />
//! </manifest>
//! ```
//!
//! Anything else in the document (`<default>`, `<include>`, comments,
//! unknown attributes) is ignored. There is no implicit default remote: a
//! project without a `remote` attribute keeps `remote: None` and is reported
//! as such by the engine.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::warn;
use serde::Serialize;
use xot::Xot;

use crate::error::{Error, Result};
use crate::resolver::normalize_fetch_prefix;

/// A named upstream host under which project repositories live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteSpec {
    pub name: String,
    /// Fetch prefix, normalized: scheme present and exactly one trailing `/`.
    pub fetch_prefix: String,
}

impl RemoteSpec {
    /// Create a remote, normalizing the raw `fetch` attribute.
    pub fn new(name: impl Into<String>, fetch: &str) -> Self {
        Self {
            name: name.into(),
            fetch_prefix: normalize_fetch_prefix(fetch),
        }
    }
}

/// One declared repository reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSpec {
    pub name: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    pub remote: Option<String>,
}

impl ProjectSpec {
    /// Create a project whose checkout path defaults to its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: name.clone(),
            name,
            revision: None,
            remote: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = Some(revision.into());
        self
    }

    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = Some(remote.into());
        self
    }
}

/// The parts of a manifest the verifier cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Remotes keyed by name.
    pub remotes: BTreeMap<String, RemoteSpec>,
    /// Projects in document order.
    pub projects: Vec<ProjectSpec>,
    /// Names listed in `<remove-project>` elements. These are never checked.
    pub removed_projects: Vec<String>,
    /// Remote names in the order they were first declared.
    remote_order: Vec<String>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a remote, replacing any earlier remote with the same name.
    ///
    /// A redefined remote keeps the position of its first declaration.
    pub fn add_remote(&mut self, remote: RemoteSpec) {
        let name = remote.name.clone();
        if self.remotes.insert(name.clone(), remote).is_none() {
            self.remote_order.push(name);
        }
    }

    /// Remotes in declaration order.
    pub fn remotes_in_order(&self) -> impl Iterator<Item = &RemoteSpec> + '_ {
        self.remote_order
            .iter()
            .filter_map(|name| self.remotes.get(name))
    }

    pub fn add_project(&mut self, project: ProjectSpec) {
        self.projects.push(project);
    }
}

/// Load and parse a manifest file.
pub fn from_file(path: &Path) -> Result<Manifest> {
    let content = fs::read_to_string(path).map_err(|source| Error::ManifestRead {
        path: path.display().to_string(),
        source,
    })?;
    parse(&content)
}

/// Parse a manifest document from a string.
pub fn parse(xml: &str) -> Result<Manifest> {
    let mut xot = Xot::new();

    let manifest_name = xot.add_name("manifest");
    let remote_name = xot.add_name("remote");
    let project_name = xot.add_name("project");
    let remove_project_name = xot.add_name("remove-project");
    let name_attr = xot.add_name("name");
    let fetch_attr = xot.add_name("fetch");
    let path_attr = xot.add_name("path");
    let revision_attr = xot.add_name("revision");
    let remote_attr = xot.add_name("remote");

    let document = xot.parse(xml).map_err(|e| Error::ManifestParse {
        message: e.to_string(),
        hint: Some("check that the manifest is well-formed XML".to_string()),
    })?;
    let root = xot
        .document_element(document)
        .map_err(|e| Error::ManifestParse {
            message: e.to_string(),
            hint: None,
        })?;

    let is_manifest = xot
        .element(root)
        .is_some_and(|element| element.name() == manifest_name);
    if !is_manifest {
        return Err(Error::ManifestParse {
            message: "root element is not <manifest>".to_string(),
            hint: Some("the document must be wrapped in <manifest>...</manifest>".to_string()),
        });
    }

    let non_empty = |value: Option<&str>| value.filter(|v| !v.is_empty()).map(str::to_string);

    let mut manifest = Manifest::new();
    for child in xot.children(root) {
        let Some(element) = xot.element(child) else {
            continue;
        };
        let tag = element.name();

        if tag == remote_name {
            let name = non_empty(xot.get_attribute(child, name_attr));
            let fetch = non_empty(xot.get_attribute(child, fetch_attr));
            match (name, fetch) {
                (Some(name), Some(fetch)) => manifest.add_remote(RemoteSpec::new(name, &fetch)),
                (name, _) => warn!(
                    "Skipping <remote> {}: both 'name' and 'fetch' are required",
                    name.unwrap_or_else(|| "(unnamed)".to_string())
                ),
            }
        } else if tag == project_name {
            let Some(name) = non_empty(xot.get_attribute(child, name_attr)) else {
                warn!("Skipping <project> without a 'name' attribute");
                continue;
            };
            let mut project = ProjectSpec::new(name);
            if let Some(path) = non_empty(xot.get_attribute(child, path_attr)) {
                project.path = path;
            }
            project.revision = non_empty(xot.get_attribute(child, revision_attr));
            project.remote = non_empty(xot.get_attribute(child, remote_attr));
            manifest.add_project(project);
        } else if tag == remove_project_name {
            if let Some(name) = non_empty(xot.get_attribute(child, name_attr)) {
                manifest.removed_projects.push(name);
            }
        }
    }

    Ok(manifest)
}
