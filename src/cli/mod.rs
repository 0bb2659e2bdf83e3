//! Command line interface for the bundle assembler.
//!
//! Binds arguments and the project's build.properties into a
//! [`SourceProject`], then hands it to the [`Bundler`].

mod args;

pub use args::Args;

use crate::bundler::{Bundler, Dependency, ProjectKind, SourceProjectBuilder};
use crate::error::{CliError, Result};
use crate::metadata::BuildProperties;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();

    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let kind = match args.kind.as_str() {
        "application" => ProjectKind::Application,
        _ => ProjectKind::Framework,
    };

    let properties = BuildProperties::from_project_dir(&args.project_dir)?;

    let name = properties
        .project_name()
        .map(str::to_string)
        .unwrap_or_else(|| args.name.clone());

    let mut builder = SourceProjectBuilder::new()
        .name(name)
        .version(&args.version)
        .kind(kind)
        .principal_class(properties.principal_class().map(str::to_string))
        .jar_path(&args.jar)
        .project_dir(&args.project_dir)
        .woresources_folder_name(&args.woresources_folder_name)
        .dependencies(parse_dependencies(&args.dependencies)?);

    if let Some(jvm_options) = properties.jvm_options() {
        builder = builder.jvm_options(jvm_options);
    }

    let project = builder.build()?;

    let target_dir = args
        .target_dir
        .unwrap_or_else(|| args.project_dir.join("target"));

    let artifacts = Bundler::new(project)
        .bundle(&target_dir, args.extract_webserver_resources)
        .await?;

    for artifact in artifacts {
        println!("Created: {}", artifact.display());
    }

    Ok(0)
}

/// Parses `GROUP:ARTIFACT:VERSION:JAR_PATH` dependency specs.
fn parse_dependencies(specs: &[String]) -> Result<Vec<Dependency>> {
    let mut dependencies = Vec::with_capacity(specs.len());

    for spec in specs {
        let mut parts = spec.splitn(4, ':');

        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(group), Some(artifact), Some(version), Some(path))
                if !group.is_empty() && !artifact.is_empty() && !path.is_empty() =>
            {
                dependencies.push(Dependency::new(group, artifact, version, path));
            }
            _ => {
                return Err(CliError::InvalidArguments {
                    reason: format!(
                        "Invalid dependency: {spec}. Expected GROUP:ARTIFACT:VERSION:JAR_PATH"
                    ),
                }
                .into());
            }
        }
    }

    Ok(dependencies)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dependency_specs() {
        let deps = parse_dependencies(&[
            "com.acme:widgets:2.0:/repo/widgets-2.0.jar".to_string(),
        ])
        .unwrap();

        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].group_id(), "com.acme");
        assert_eq!(deps[0].artifact_id(), "widgets");
        assert_eq!(deps[0].version(), "2.0");
        assert_eq!(
            deps[0].jar_path(),
            std::path::Path::new("/repo/widgets-2.0.jar")
        );
    }

    #[test]
    fn rejects_malformed_dependency_specs() {
        assert!(parse_dependencies(&["com.acme:widgets".to_string()]).is_err());
        assert!(parse_dependencies(&["::2.0:/repo/x.jar".to_string()]).is_err());
    }
}
