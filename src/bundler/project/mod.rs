//! Source project descriptor.
//!
//! A [`SourceProject`] describes a compiled WebObjects project the moment
//! packaging begins: the jar produced by compilation, the resolved
//! dependency list, and the source resource folders. It is constructed
//! once per build via [`SourceProjectBuilder`] and immutable afterwards.

use crate::bundler::error::{Error, Result};
use std::path::{Path, PathBuf};

/// JVM flag the WebObjects runtime cannot start without on modern JDKs;
/// injected into every project's options when absent.
const REQUIRED_JVM_EXPORT: &str = "--add-exports java.base/sun.security.action=ALL-UNNAMED";

/// Default name of the source folder holding WO bundle resources.
pub const DEFAULT_WORESOURCES_FOLDER_NAME: &str = "woresources";

/// Whether the project builds into a WOA application bundle or a WOF
/// framework jar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectKind {
    Application,
    Framework,
}

impl ProjectKind {
    pub fn is_app(self) -> bool {
        self == ProjectKind::Application
    }

    pub fn is_framework(self) -> bool {
        self == ProjectKind::Framework
    }
}

/// A resolved project dependency along with some metadata.
#[derive(Clone, Debug)]
pub struct Dependency {
    group_id: String,
    artifact_id: String,
    version: String,
    jar_path: PathBuf,
}

impl Dependency {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        jar_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            jar_path: jar_path.into(),
        }
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Path to the dependency's resolved jar on disk.
    pub fn jar_path(&self) -> &Path {
        &self.jar_path
    }
}

/// Source for packaging of a WO build (application or framework).
#[derive(Clone, Debug)]
pub struct SourceProject {
    name: String,
    version: String,
    kind: ProjectKind,
    principal_class: Option<String>,
    jvm_options: String,
    jar_path: PathBuf,
    dependencies: Vec<Dependency>,
    components_dir: PathBuf,
    woresources_dir: PathBuf,
    webserver_resources_dir: PathBuf,
}

impl SourceProject {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn kind(&self) -> ProjectKind {
        self.kind
    }

    /// For applications this is the main class; for frameworks the
    /// framework's principal class, which may be absent.
    pub fn principal_class(&self) -> Option<&str> {
        self.principal_class.as_deref()
    }

    /// Arguments passed to the launch scripts' JVM. Always contains the
    /// `--add-exports` flag the runtime requires.
    pub fn jvm_options(&self) -> &str {
        &self.jvm_options
    }

    /// Path to the jar produced by the project's compilation, before any
    /// packaging happened.
    pub fn jar_path(&self) -> &Path {
        &self.jar_path
    }

    /// Resolved dependencies (direct and transitive), in resolution order.
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Path to source components
    pub fn components_dir(&self) -> &Path {
        &self.components_dir
    }

    /// Path to source woresources
    pub fn woresources_dir(&self) -> &Path {
        &self.woresources_dir
    }

    /// Path to source webserver-resources
    pub fn webserver_resources_dir(&self) -> &Path {
        &self.webserver_resources_dir
    }

    /// The name of the jar that holds the compiled sources inside the
    /// bundle. Lowercased project name with `.jar` appended.
    pub fn target_jar_name(&self) -> String {
        format!("{}.jar", self.name.to_lowercase())
    }
}

/// Builder for constructing a [`SourceProject`].
///
/// `build()` validates the metadata the assemblers depend on: applications
/// must name a principal class, frameworks need not.
#[derive(Default)]
pub struct SourceProjectBuilder {
    name: Option<String>,
    version: Option<String>,
    kind: Option<ProjectKind>,
    principal_class: Option<String>,
    jvm_options: Option<String>,
    jar_path: Option<PathBuf>,
    dependencies: Vec<Dependency>,
    project_dir: Option<PathBuf>,
    woresources_folder_name: Option<String>,
}

impl SourceProjectBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the project name, used for the bundle folder and jar names.
    ///
    /// Required.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the project version.
    ///
    /// Required.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets whether an application bundle or a framework jar is built.
    ///
    /// Required.
    pub fn kind(mut self, kind: ProjectKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the principal class. Required for applications.
    pub fn principal_class(mut self, principal_class: Option<String>) -> Self {
        self.principal_class = principal_class;
        self
    }

    /// Sets extra JVM options for the launch scripts.
    ///
    /// Default: only the required `--add-exports` flag.
    pub fn jvm_options(mut self, jvm_options: impl Into<String>) -> Self {
        self.jvm_options = Some(jvm_options.into());
        self
    }

    /// Sets the path to the compiled project jar.
    ///
    /// Required.
    pub fn jar_path(mut self, jar_path: impl Into<PathBuf>) -> Self {
        self.jar_path = Some(jar_path.into());
        self
    }

    /// Sets the resolved dependency list.
    ///
    /// Default: empty.
    pub fn dependencies(mut self, dependencies: Vec<Dependency>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Sets the project root; source resource folders are resolved under
    /// `src/main/` inside it.
    ///
    /// Required.
    pub fn project_dir(mut self, project_dir: impl Into<PathBuf>) -> Self {
        self.project_dir = Some(project_dir.into());
        self
    }

    /// Sets the name of the bundle folder that contains WO resources.
    ///
    /// Default: `woresources`.
    pub fn woresources_folder_name(mut self, name: impl Into<String>) -> Self {
        self.woresources_folder_name = Some(name.into());
        self
    }

    /// Builds the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if a required field is missing, or if
    /// an application project has no principal class.
    pub fn build(self) -> Result<SourceProject> {
        let name = require(self.name, "name")?;
        let version = require(self.version, "version")?;
        let kind = require(self.kind, "kind")?;
        let jar_path = require(self.jar_path, "jar_path")?;
        let project_dir = require(self.project_dir, "project_dir")?;

        let principal_class = self.principal_class.filter(|c| !c.is_empty());

        if kind.is_app() && principal_class.is_none() {
            return Err(Error::Validation(
                "an application must name a principal class (principalClass in build.properties)"
                    .to_string(),
            ));
        }

        let woresources_folder_name = self
            .woresources_folder_name
            .unwrap_or_else(|| DEFAULT_WORESOURCES_FOLDER_NAME.to_string());

        let source_main = project_dir.join("src/main");

        Ok(SourceProject {
            name,
            version,
            kind,
            principal_class,
            jvm_options: with_required_export(self.jvm_options.unwrap_or_default()),
            jar_path,
            dependencies: self.dependencies,
            components_dir: source_main.join("components"),
            woresources_dir: source_main.join(&woresources_folder_name),
            webserver_resources_dir: source_main.join("webserver-resources"),
        })
    }
}

fn require<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| Error::Validation(format!("{field} is required")))
}

fn with_required_export(jvm_options: String) -> String {
    if jvm_options.contains(REQUIRED_JVM_EXPORT) {
        jvm_options
    } else if jvm_options.is_empty() {
        REQUIRED_JVM_EXPORT.to_string()
    } else {
        format!("{jvm_options} {REQUIRED_JVM_EXPORT}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> SourceProjectBuilder {
        SourceProjectBuilder::new()
            .name("Demo")
            .version("1.0")
            .jar_path("/tmp/demo/target/demo-1.0.jar")
            .project_dir("/tmp/demo")
    }

    #[test]
    fn application_requires_principal_class() {
        let err = builder().kind(ProjectKind::Application).build();
        assert!(matches!(err, Err(Error::Validation(_))));

        let ok = builder()
            .kind(ProjectKind::Application)
            .principal_class(Some("com.example.Application".to_string()))
            .build();
        assert!(ok.is_ok());
    }

    #[test]
    fn framework_does_not_require_principal_class() {
        let project = builder().kind(ProjectKind::Framework).build().unwrap();
        assert!(project.principal_class().is_none());
    }

    #[test]
    fn target_jar_name_is_lowercased() {
        let project = builder().kind(ProjectKind::Framework).build().unwrap();
        assert_eq!(project.target_jar_name(), "demo.jar");
    }

    #[test]
    fn jvm_options_always_carry_the_required_export() {
        let project = builder().kind(ProjectKind::Framework).build().unwrap();
        assert_eq!(project.jvm_options(), REQUIRED_JVM_EXPORT);

        let project = builder()
            .kind(ProjectKind::Framework)
            .jvm_options("-Xmx512m")
            .build()
            .unwrap();
        assert_eq!(
            project.jvm_options(),
            format!("-Xmx512m {REQUIRED_JVM_EXPORT}")
        );
    }

    #[test]
    fn resource_dirs_live_under_src_main() {
        let project = builder()
            .kind(ProjectKind::Framework)
            .woresources_folder_name("resources")
            .build()
            .unwrap();

        assert_eq!(
            project.components_dir(),
            Path::new("/tmp/demo/src/main/components")
        );
        assert_eq!(
            project.woresources_dir(),
            Path::new("/tmp/demo/src/main/resources")
        );
        assert_eq!(
            project.webserver_resources_dir(),
            Path::new("/tmp/demo/src/main/webserver-resources")
        );
    }
}
