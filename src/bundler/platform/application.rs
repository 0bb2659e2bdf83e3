//! Application (WOA) bundle assembly.

use crate::bundler::error::{Error, Result};
use crate::bundler::plist::{build_info_plist, serialize};
use crate::bundler::project::SourceProject;
use crate::bundler::templates::Templates;
use crate::bundler::utils::{fs as fsutil, jar};
use crate::bundler::utils::fs::OnConflict;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::woa::Woa;

/// Assembles the `<name>.woa` bundle for an application project under
/// `target_dir`.
///
/// The bundle layout, classpath files, Info.plist and launch scripts are
/// produced in a fixed sequence of independent filesystem steps; the first
/// failure aborts the assembly and leaves whatever was already written in
/// place for the next build to overwrite.
///
/// With `extract_webserver_resources` set, the web-facing portion of the
/// bundle is additionally copied out into a sibling
/// `<name>.woa.webserverresources` directory for web-server-only
/// deployment.
pub async fn bundle_project(
    project: &SourceProject,
    templates: &Templates,
    target_dir: &Path,
    extract_webserver_resources: bool,
) -> Result<Woa> {
    let application_name = project.name();

    log::info!("Assembling application bundle for {application_name}");

    // The WOA bundle, the destination for our build.
    let woa = Woa::create(target_dir, application_name)?;

    // Copy the app jar to the woa.
    let app_jar_name = project.target_jar_name();
    fsutil::copy_file(project.jar_path(), &woa.java_path()?.join(&app_jar_name)).await?;

    // The classpath starts with the Java folder itself, then the app jar,
    // then every dependency jar in resolution order.
    let mut classpath_entries = Vec::new();
    classpath_entries.push("APPROOT/Resources/Java/".to_string());
    classpath_entries.push(format!("APPROOT/Resources/Java/{app_jar_name}"));

    copy_dependency_jars(project, &woa, &mut classpath_entries).await?;
    extract_framework_web_server_resources(project, &woa).await?;
    copy_source_resources(project, &woa).await?;
    write_classpath_files(project, templates, &woa, &classpath_entries).await?;

    // Nobody remembers what the subpaths file does, but the deployment
    // tools expect it to exist.
    fs::write(
        woa.windows_path()?.join("SUBPATHS.TXT"),
        &templates.subpaths,
    )
    .await?;

    let info_plist = serialize(&build_info_plist(project));
    fs::write(woa.contents_path()?.join("Info.plist"), info_plist).await?;

    write_launch_scripts(templates, &woa, application_name).await?;

    if extract_webserver_resources {
        extract_web_server_bundle(&woa, target_dir, application_name).await?;
    }

    log::info!("✓ Assembled {}", woa.woa_path().display());

    Ok(woa)
}

/// Copies every resolved dependency jar into
/// `Resources/Java/<group as path>/<artifact>/<version>/<filename>` and
/// records its bundle-relative classpath entry.
async fn copy_dependency_jars(
    project: &SourceProject,
    woa: &Woa,
    classpath_entries: &mut Vec<String>,
) -> Result<()> {
    for dependency in project.dependencies() {
        log::debug!(
            "Copying dependency {}:{}:{}",
            dependency.group_id(),
            dependency.artifact_id(),
            dependency.version()
        );

        let jar_file_name = dependency
            .jar_path()
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                Error::Validation(format!(
                    "dependency {}:{} has no usable jar file name",
                    dependency.group_id(),
                    dependency.artifact_id()
                ))
            })?;

        let relative_folder = format!(
            "{}/{}/{}",
            dependency.group_id().replace('.', "/"),
            dependency.artifact_id(),
            dependency.version()
        );
        let jar_folder = fsutil::ensure_dir(&woa.java_path()?.join(&relative_folder))?;
        fsutil::copy_file(dependency.jar_path(), &jar_folder.join(jar_file_name)).await?;

        classpath_entries.push(format!(
            "APPROOT/Resources/Java/{relative_folder}/{jar_file_name}"
        ));
    }

    Ok(())
}

/// Extracts `WebServerResources` from every dependency jar that actually
/// carries one, into `Contents/Frameworks/<artifact>.framework/`.
async fn extract_framework_web_server_resources(
    project: &SourceProject,
    woa: &Woa,
) -> Result<()> {
    for dependency in project.dependencies() {
        if !jar::has_top_level_folder(dependency.jar_path(), "WebServerResources").await? {
            continue;
        }

        let framework_dir = woa
            .frameworks_path()?
            .join(format!("{}.framework", dependency.artifact_id()));
        jar::extract_folder(dependency.jar_path(), "WebServerResources", &framework_dir).await?;
    }

    Ok(())
}

/// Copies the project's source resource folders into the bundle. A missing
/// folder is not an error; the step is skipped with a warning.
async fn copy_source_resources(project: &SourceProject, woa: &Woa) -> Result<()> {
    let copies = [
        (project.components_dir(), woa.resources_path()?),
        (project.woresources_dir(), woa.resources_path()?),
        (
            project.webserver_resources_dir(),
            woa.web_server_resources_path()?,
        ),
    ];

    for (source, destination) in copies {
        if !source.is_dir() {
            log::warn!("{} does not exist, skipping", source.display());
            continue;
        }

        fsutil::copy_dir_contents(source, &destination, OnConflict::Skip).await?;
    }

    Ok(())
}

/// Writes the four classpath files. MacOS, MacOS X Server and UNIX share
/// one newline-joined rendition; the Windows file is CRLF-joined with
/// backslashed entry paths.
async fn write_classpath_files(
    project: &SourceProject,
    templates: &Templates,
    woa: &Woa,
    classpath_entries: &[String],
) -> Result<()> {
    let header = templates.render_classpath_header(project)?;

    let standard = format!("{header}{}", classpath_entries.join("\n"));
    fs::write(woa.unix_path()?.join("UNIXClassPath.txt"), &standard).await?;
    fs::write(woa.macos_path()?.join("MacOSClassPath.txt"), &standard).await?;
    fs::write(woa.macos_path()?.join("MacOSXServerClassPath.txt"), &standard).await?;

    let windows = format!(
        "{header}{}",
        classpath_entries.join("\r\n").replace('/', "\\")
    );
    fs::write(woa.windows_path()?.join("CLSSPATH.TXT"), &windows).await?;

    Ok(())
}

/// Writes the launch scripts and marks them executable. Each script lives
/// at the bundle root and is replicated into its platform subfolder; the
/// deployment tools look for it in both places.
async fn write_launch_scripts(
    templates: &Templates,
    woa: &Woa,
    application_name: &str,
) -> Result<()> {
    let unix_scripts = [
        woa.woa_path().join(application_name),
        woa.macos_path()?.join(application_name),
    ];

    for path in &unix_scripts {
        fs::write(path, &templates.launch_script).await?;
        fsutil::make_user_executable(path).await?;
    }

    let windows_scripts = [
        woa.woa_path().join(format!("{application_name}.cmd")),
        woa.windows_path()?.join(format!("{application_name}.cmd")),
    ];

    for path in &windows_scripts {
        fs::write(path, &templates.launch_script_cmd).await?;
        fsutil::make_user_executable(path).await?;
    }

    Ok(())
}

/// Copies the bundle's `WebServerResources` and `Frameworks` trees into a
/// sibling `<name>.woa.webserverresources` directory, for deployments that
/// serve static content from a separate web server.
async fn extract_web_server_bundle(
    woa: &Woa,
    target_dir: &Path,
    application_name: &str,
) -> Result<()> {
    let contents = fsutil::ensure_dir(
        &target_dir
            .join(format!("{application_name}.woa.webserverresources"))
            .join("Contents"),
    )?;

    let trees: [(PathBuf, &str); 2] = [
        (woa.web_server_resources_path()?, "WebServerResources"),
        (woa.frameworks_path()?, "Frameworks"),
    ];

    for (source, name) in trees {
        fsutil::copy_dir_contents(&source, &contents.join(name), OnConflict::Overwrite).await?;
    }

    Ok(())
}
