//! Bundle orchestration.
//!
//! The [`Bundler`] dispatches a source project to the assembler matching
//! its kind and reports the produced artifact paths.

use crate::bundler::error::Result;
use crate::bundler::platform::{application, framework};
use crate::bundler::project::{ProjectKind, SourceProject};
use crate::bundler::templates::Templates;
use std::path::{Path, PathBuf};

/// Assembles whatever the project's kind calls for: a `.woa` bundle
/// directory for applications, an augmented jar for frameworks.
#[derive(Debug)]
pub struct Bundler {
    project: SourceProject,
    templates: Templates,
}

impl Bundler {
    /// Creates a bundler with the built-in templates.
    pub fn new(project: SourceProject) -> Self {
        Self::with_templates(project, Templates::default())
    }

    /// Creates a bundler with caller-supplied templates.
    pub fn with_templates(project: SourceProject, templates: Templates) -> Self {
        Self { project, templates }
    }

    /// Returns a reference to the project being bundled.
    pub fn project(&self) -> &SourceProject {
        &self.project
    }

    /// Runs the assembly and returns the produced artifact paths.
    ///
    /// `target_dir` and `extract_webserver_resources` only apply to
    /// application bundles; a framework's deliverable is its own jar.
    pub async fn bundle(
        &self,
        target_dir: &Path,
        extract_webserver_resources: bool,
    ) -> Result<Vec<PathBuf>> {
        match self.project.kind() {
            ProjectKind::Application => {
                let woa = application::bundle_project(
                    &self.project,
                    &self.templates,
                    target_dir,
                    extract_webserver_resources,
                )
                .await?;

                Ok(vec![woa.woa_path().to_path_buf()])
            }
            ProjectKind::Framework => {
                framework::bundle_project(&self.project).await?;

                Ok(vec![self.project.jar_path().to_path_buf()])
            }
        }
    }
}
