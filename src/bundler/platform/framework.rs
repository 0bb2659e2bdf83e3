//! Framework (WOF) packaging.
//!
//! A framework is delivered as its own jar: the source resource folders
//! and the Info.plist are written into the compiled archive, and no bundle
//! directory is produced.

use crate::bundler::error::Result;
use crate::bundler::plist::{build_info_plist, serialize};
use crate::bundler::project::SourceProject;
use crate::bundler::utils::jar;

/// Packages a framework project by augmenting its compiled jar in place.
///
/// Components and woresources land under `Resources/`, webserver resources
/// under `WebServerResources/`, and the framework-variant Info.plist at
/// `Resources/Info.plist`. A missing source folder is skipped with a
/// warning.
pub async fn bundle_project(project: &SourceProject) -> Result<()> {
    let jar_path = project.jar_path();

    log::info!("Packaging framework jar for {}", project.name());

    let injections = [
        (project.components_dir(), "Resources"),
        (project.woresources_dir(), "Resources"),
        (project.webserver_resources_dir(), "WebServerResources"),
    ];

    for (source, folder_name) in injections {
        if !source.is_dir() {
            log::warn!("{} does not exist, skipping", source.display());
            continue;
        }

        jar::inject_dir(source, folder_name, jar_path).await?;
    }

    let info_plist = serialize(&build_info_plist(project));
    jar::inject_file_content(&info_plist, "Resources/Info.plist", jar_path).await?;

    log::info!("✓ Packaged {}", jar_path.display());

    Ok(())
}
