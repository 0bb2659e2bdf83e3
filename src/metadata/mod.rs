//! Build metadata from the project's build.properties file.
//!
//! WebObjects projects carry a `build.properties` file in the project root
//! with the launch configuration the pom does not know about: the
//! principal class, JVM options, and an optional project-name override.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::collections::HashMap;
use std::path::Path;

/// Keys a build cannot proceed without. `principalClass` is only required
/// for applications and is validated by the project builder, not here.
const REQUIRED_PROPERTIES: &[&str] = &["principalClass"];

/// Wrapper for the build.properties file
#[derive(Clone, Debug, Default)]
pub struct BuildProperties {
    properties: HashMap<String, String>,
}

impl BuildProperties {
    /// Parses the `build.properties` file in `project_dir`.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the required keys when the file
    /// is missing, or a filesystem error if it cannot be read.
    pub fn from_project_dir(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join("build.properties");

        if !path.exists() {
            return Err(Error::Validation(format!(
                "build.properties not found in project root ({}). To build a project, a file \
                 called 'build.properties' must exist in the root and for applications must \
                 contain at least the properties {REQUIRED_PROPERTIES:?}",
                path.display()
            )));
        }

        let content =
            std::fs::read_to_string(&path).fs_context("reading build.properties", &path)?;

        Ok(Self::parse(&content))
    }

    /// Parses java.util.Properties-style `key=value` lines. `#` and `!`
    /// start comment lines; whitespace around keys and values is trimmed.
    pub fn parse(content: &str) -> Self {
        let mut properties = HashMap::new();

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            if let Some((key, value)) = line.split_once(['=', ':']) {
                properties.insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        Self { properties }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// The project name override, if present.
    pub fn project_name(&self) -> Option<&str> {
        self.get("project.name")
    }

    /// The application's main class, or a framework's principal class.
    pub fn principal_class(&self) -> Option<&str> {
        self.get("principalClass")
    }

    /// Extra arguments for the launch scripts' JVM.
    pub fn jvm_options(&self) -> Option<&str> {
        self.get("jvmOptions")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_keys_values_and_comments() {
        let properties = BuildProperties::parse(
            "# build configuration\n\
             project.name = Demo\n\
             principalClass=com.example.Application\n\
             ! another comment\n\
             jvmOptions = -Xmx512m -Dfoo=bar\n",
        );

        assert_eq!(properties.project_name(), Some("Demo"));
        assert_eq!(
            properties.principal_class(),
            Some("com.example.Application")
        );
        assert_eq!(properties.jvm_options(), Some("-Xmx512m -Dfoo=bar"));
        assert_eq!(properties.get("missing"), None);
    }

    #[test]
    fn missing_file_is_a_validation_error() {
        let tmp = TempDir::new().unwrap();

        let err = BuildProperties::from_project_dir(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("build.properties"));
    }

    #[test]
    fn reads_the_file_from_the_project_root() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("build.properties"),
            "principalClass=com.example.Main\n",
        )
        .unwrap();

        let properties = BuildProperties::from_project_dir(tmp.path()).unwrap();
        assert_eq!(properties.principal_class(), Some("com.example.Main"));
    }
}
