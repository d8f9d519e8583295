//! Frontend route table
//!
//! Maps browser paths to the views of the single-page app:
//!
//! | Path | Name | View |
//! |---|---|---|
//! | `/` | `home` | project list / import |
//! | `/wiki/:project` | `wiki` | wiki of one project |

use std::fmt;

/// A resolved frontend route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Wiki { project: String },
}

impl Route {
    /// Resolve a request path.
    ///
    /// Query string and fragment are ignored and a single trailing slash is
    /// tolerated. The `project` parameter must be one non-empty segment and is
    /// percent-decoded. Returns `None` for paths outside the table.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(&['?', '#'][..]).next().unwrap_or_default();
        let path = match path.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => path,
        };

        if path == "/" {
            return Some(Self::Home);
        }

        let segment = path.strip_prefix("/wiki/")?;
        if segment.is_empty() || segment.contains('/') {
            return None;
        }

        let project = urlencoding::decode(segment).ok()?.into_owned();
        Some(Self::Wiki { project })
    }

    /// Route name used by the view layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Wiki { .. } => "wiki",
        }
    }

    /// Canonical path, with the project percent-encoded.
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Wiki { project } => format!("/wiki/{}", urlencoding::encode(project)),
        }
    }

    /// Project parameter, if the route has one.
    pub fn project(&self) -> Option<&str> {
        match self {
            Self::Home => None,
            Self::Wiki { project } => Some(project),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
