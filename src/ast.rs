//! Ant project model structures.
//!
//! This module defines the typed representation of a parsed Ant build file.
//! The parser in [`crate::project`] fills these records in a single pass over
//! the XML document; nothing mutates them afterwards.
//!
//! ```rust
//! use antgraph::ast::{Project, Target, Task, TaskKind};
//! use camino::Utf8PathBuf;
//!
//! let project = Project {
//!     file: Utf8PathBuf::from("build.xml"),
//!     name: "demo".into(),
//!     default_target: Some("build".into()),
//!     targets: vec![Target {
//!         name: "build".into(),
//!         depends: vec!["clean".into()],
//!         tasks: vec![Task {
//!             kind: TaskKind::AntCall,
//!             target: Some("package".into()),
//!             file: None,
//!         }],
//!     }],
//! };
//! assert!(project.is_default(&project.targets[0]));
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use std::fmt;

/// A single parsed build file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    /// File identity: the path exactly as it was supplied.
    pub file: Utf8PathBuf,
    /// Value of the `name` attribute on `<project>`.
    pub name: String,
    /// Value of the `default` attribute on `<project>`, when present.
    pub default_target: Option<String>,
    /// Declared targets in document order.
    pub targets: Vec<Target>,
}

impl Project {
    /// Return `true` when `target` is the project's declared default target.
    ///
    /// A project without a `default` attribute has no default target.
    #[must_use]
    pub fn is_default(&self, target: &Target) -> bool {
        self.default_target.as_deref() == Some(target.name.as_str())
    }
}

/// A named unit of work declared with `<target>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    /// Target name, unique within its project.
    pub name: String,
    /// Entries of the `depends` attribute in declaration order. Duplicates are
    /// kept.
    pub depends: Vec<String>,
    /// Call-like elements found beneath the target, in document order.
    pub tasks: Vec<Task>,
}

/// A call-like reference to another target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    /// Element the reference came from.
    pub kind: TaskKind,
    /// Raw `target` attribute.
    pub target: Option<String>,
    /// Raw file attribute; `None` or empty means the owning project's file.
    pub file: Option<Utf8PathBuf>,
}

impl Task {
    /// Target name this task refers to, ignoring empty attributes.
    #[must_use]
    pub fn target_name(&self) -> Option<&str> {
        self.target.as_deref().filter(|t| !t.is_empty())
    }

    /// Resolve the file the referenced target lives in.
    ///
    /// Falls back to `owner` when the task carries no file attribute or an
    /// empty one.
    #[must_use]
    pub fn resolve_file<'a>(&'a self, owner: &'a Utf8Path) -> &'a Utf8Path {
        match self.file.as_deref() {
            Some(file) if !file.as_str().is_empty() => file,
            _ => owner,
        }
    }
}

/// The three element kinds recognised as cross-target calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// `<antcall target="..."/>`: call a target in the same file.
    AntCall,
    /// `<runtarget target="..."/>`: run a target in the same file.
    RunTarget,
    /// `<ant antfile="..." target="..."/>`: call a target in another file.
    Ant,
}

impl TaskKind {
    /// Every recognised kind.
    pub const ALL: [Self; 3] = [Self::AntCall, Self::RunTarget, Self::Ant];

    /// XML element name for this kind. Also used as the edge label.
    #[must_use]
    pub const fn element_name(self) -> &'static str {
        match self {
            Self::AntCall => "antcall",
            Self::RunTarget => "runtarget",
            Self::Ant => "ant",
        }
    }

    /// Attribute holding the external file reference, if this kind has one.
    #[must_use]
    pub const fn file_attribute(self) -> Option<&'static str> {
        match self {
            Self::Ant => Some("antfile"),
            Self::AntCall | Self::RunTarget => None,
        }
    }

    /// Map an element name onto a kind.
    #[must_use]
    pub fn from_element(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.element_name() == name)
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name())
    }
}
