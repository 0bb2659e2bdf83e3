//! Launch-script and classpath-file templates.
//!
//! Template text is held by an explicit [`Templates`] value constructed by
//! the caller and handed to the assemblers, so embedders can swap any of
//! the texts without touching the assembly code. Rendering uses Handlebars
//! with escaping disabled; the launch scripts and the subpaths file are
//! emitted verbatim.

use crate::bundler::error::Result;
use crate::bundler::project::SourceProject;
use handlebars::Handlebars;
use std::collections::BTreeMap;

/// Header of the classpath files. The launch scripts read the `==` header
/// lines back at startup, so the keys are part of the bundle contract.
const CLASSPATH_TEMPLATE: &str = "\
# JVM == java
# JVMOptions == {{jvm_options}}
# JDB == jdb
# JDBOptions ==
# ApplicationClass == {{application_class}}
";

/// Windows subpath list, written verbatim to `Windows/SUBPATHS.TXT`.
const SUBPATHS_TEMPLATE: &str = "\
APPROOT\\
APPROOT\\Contents\\Windows\\
APPROOT\\Contents\\Resources\\
APPROOT\\Contents\\Resources\\Java\\
WOROOT\\Library\\Frameworks\\
LOCALROOT\\Library\\Frameworks\\
";

/// Bourne launch script written to the bundle root and `Contents/MacOS`.
/// Fully static: launch configuration comes from the classpath file.
const LAUNCH_SCRIPT_TEMPLATE: &str = r#"#!/bin/sh
#
# Launches a WebObjects application bundle. The JVM, its options, the
# application class and the classpath all come from the UNIX classpath
# file written at assembly time.

SELFDIR="$(cd "$(dirname "$0")" && pwd)"
cd "${SELFDIR}"

CPFILE="Contents/UNIX/UNIXClassPath.txt"

# The same script is replicated into Contents/MacOS.
if [ ! -f "${CPFILE}" ]; then
    CPFILE="../UNIX/UNIXClassPath.txt"
    cd ../..
fi

if [ ! -f "${CPFILE}" ]; then
    echo "$0: no UNIXClassPath.txt found, this does not look like a WOA bundle" >&2
    exit 1
fi

JVM="$(sed -n 's|^# JVM == ||p' "${CPFILE}")"
JVM_OPTIONS="$(sed -n 's|^# JVMOptions == ||p' "${CPFILE}")"
APPLICATION_CLASS="$(sed -n 's|^# ApplicationClass == ||p' "${CPFILE}")"
CLASSPATH="$(grep -v '^#' "${CPFILE}" | sed 's|^APPROOT/|Contents/|' | tr '\n' ':')"

exec "${JVM:-java}" ${JVM_OPTIONS} -classpath "${CLASSPATH}" "${APPLICATION_CLASS}" "$@"
"#;

/// Windows launch script written to the bundle root and `Contents/Windows`.
const LAUNCH_SCRIPT_CMD_TEMPLATE: &str = "\
@echo off\r
rem Launches a WebObjects application bundle using the configuration in\r
rem the Windows classpath file.\r
\r
setlocal EnableDelayedExpansion\r
cd /d \"%~dp0\"\r
\r
set CPFILE=Contents\\Windows\\CLSSPATH.TXT\r
if not exist \"%CPFILE%\" set CPFILE=CLSSPATH.TXT\r
\r
set CLASSPATH=\r
set APPCLASS=\r
set JVMOPTS=\r
\r
for /f \"usebackq tokens=* delims=\" %%l in (\"%CPFILE%\") do (\r
    set LINE=%%l\r
    if \"!LINE:~0,21!\" == \"# ApplicationClass ==\" set APPCLASS=!LINE:~22!\r
    if \"!LINE:~0,15!\" == \"# JVMOptions ==\" set JVMOPTS=!LINE:~16!\r
    if not \"!LINE:~0,1!\" == \"#\" set CLASSPATH=!CLASSPATH!;!LINE:APPROOT=Contents!\r
)\r
\r
java %JVMOPTS% -classpath \"%CLASSPATH%\" %APPCLASS% %*\r
";

/// The template texts used when assembling an application bundle.
///
/// `Default` supplies the built-in texts; construct the struct directly to
/// override any of them.
#[derive(Clone, Debug)]
pub struct Templates {
    /// Classpath file header; rendered with `application_class` and
    /// `jvm_options`.
    pub classpath: String,
    /// `Windows/SUBPATHS.TXT` content, written verbatim.
    pub subpaths: String,
    /// UNIX/macOS launch script, written verbatim.
    pub launch_script: String,
    /// Windows launch script, written verbatim.
    pub launch_script_cmd: String,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            classpath: CLASSPATH_TEMPLATE.to_string(),
            subpaths: SUBPATHS_TEMPLATE.to_string(),
            launch_script: LAUNCH_SCRIPT_TEMPLATE.to_string(),
            launch_script_cmd: LAUNCH_SCRIPT_CMD_TEMPLATE.to_string(),
        }
    }
}

impl Templates {
    /// Renders the classpath file header for the given project.
    pub fn render_classpath_header(&self, project: &SourceProject) -> Result<String> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);

        let mut data = BTreeMap::new();
        data.insert(
            "application_class",
            project.principal_class().unwrap_or_default().to_string(),
        );
        data.insert("jvm_options", project.jvm_options().to_string());

        Ok(handlebars.render_template(&self.classpath, &data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::project::{ProjectKind, SourceProjectBuilder};

    #[test]
    fn classpath_header_substitutes_class_and_options() {
        let project = SourceProjectBuilder::new()
            .name("Demo")
            .version("1.0")
            .kind(ProjectKind::Application)
            .principal_class(Some("com.example.Application".to_string()))
            .jvm_options("-Xmx512m")
            .jar_path("/tmp/demo/target/demo-1.0.jar")
            .project_dir("/tmp/demo")
            .build()
            .unwrap();

        let header = Templates::default().render_classpath_header(&project).unwrap();

        assert!(header.contains("# ApplicationClass == com.example.Application"));
        assert!(header.contains("-Xmx512m"));
        assert!(header.ends_with('\n'));
    }

    #[test]
    fn launch_scripts_are_static() {
        let templates = Templates::default();
        assert!(!templates.launch_script.contains("{{"));
        assert!(!templates.launch_script_cmd.contains("{{"));
        assert!(!templates.subpaths.contains("{{"));
    }
}
