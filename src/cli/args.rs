//! Command line argument parsing and validation.

use clap::Parser;
use std::path::PathBuf;

/// WOA/WOF bundle assembler for WebObjects and Wonder projects
#[derive(Parser, Debug)]
// clap's own -V/--version flag is disabled; --version is the project
// version being bundled.
#[command(
    name = "wobundle",
    about = "Assembles WOA application bundles and WOF framework jars",
    long_about = "Assembles WebObjects deliverables from a compiled project jar and its \
resolved dependencies.

Applications become a <name>.woa bundle directory in the target directory; frameworks \
get their resources and Info.plist written into the compiled jar itself.

Usage:
  wobundle --kind application --name Demo --version 1.0 --jar target/demo-1.0.jar \\
      --dependency com.acme:widgets:2.0:/path/to/widgets-2.0.jar

Exit code 0 = the deliverable exists."
)]
pub struct Args {
    /// Project kind: application or framework
    #[arg(short, long, value_name = "KIND")]
    pub kind: String,

    /// Project name; the bundle and jar are named after it
    #[arg(short, long, value_name = "NAME")]
    pub name: String,

    /// Project version
    #[arg(short = 'V', long, value_name = "VERSION")]
    pub version: String,

    /// Path to the compiled project jar
    #[arg(short, long, value_name = "PATH")]
    pub jar: PathBuf,

    /// Project root directory, holding build.properties and src/main
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Directory the .woa bundle is assembled in (applications only)
    #[arg(short, long, value_name = "DIR")]
    pub target_dir: Option<PathBuf>,

    /// Resolved dependency as GROUP:ARTIFACT:VERSION:JAR_PATH; repeatable
    #[arg(short, long = "dependency", value_name = "SPEC")]
    pub dependencies: Vec<String>,

    /// Name of the source folder holding WO bundle resources
    #[arg(long, value_name = "NAME", default_value = "woresources")]
    pub woresources_folder_name: String,

    /// Also copy WebServerResources and Frameworks into a sibling
    /// <name>.woa.webserverresources directory
    #[arg(long)]
    pub extract_webserver_resources: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        let valid_kinds = ["application", "framework"];
        if !valid_kinds.contains(&self.kind.as_str()) {
            return Err(format!(
                "Invalid kind: {}. Valid kinds: {}",
                self.kind,
                valid_kinds.join(", ")
            ));
        }

        for spec in &self.dependencies {
            if spec.splitn(4, ':').count() != 4 {
                return Err(format!(
                    "Invalid dependency: {spec}. Expected GROUP:ARTIFACT:VERSION:JAR_PATH"
                ));
            }
        }

        Ok(())
    }
}
