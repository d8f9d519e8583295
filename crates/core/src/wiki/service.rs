//! Wiki overview - the data the wiki view needs on first load

use ewiki_domain::Result;
use futures::try_join;
use serde_json::json;
use tracing::debug;

use super::ports::WikiBackend;

/// Readme and module list of one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiOverview {
    pub project: String,
    pub readme: String,
    pub modules: Vec<String>,
}

impl WikiOverview {
    /// JSON rendering used by the CLI.
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "project": self.project,
            "readme": self.readme,
            "modules": self.modules,
        })
    }
}

/// Fetch a project's readme and module list.
///
/// Both requests are in flight at the same time; the first failure is
/// returned and the other result is discarded.
pub async fn load_overview(backend: &dyn WikiBackend, project: &str) -> Result<WikiOverview> {
    let (readme, modules) =
        try_join!(backend.project_readme(project), backend.list_modules(project))?;

    debug!(project, modules = modules.len(), "loaded wiki overview");

    Ok(WikiOverview { project: project.to_string(), readme, modules })
}
