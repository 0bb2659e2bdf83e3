//! Info.plist construction.
//!
//! Builds the property-list dictionary the WebObjects runtime reads from
//! `Contents/Info.plist` (applications) or `Resources/Info.plist`
//! (frameworks). Key order matches the documents WOLips used to generate.

use super::{PlistDict, PlistValue};
use crate::bundler::project::SourceProject;

/// Builds the Info.plist value tree for the given project.
///
/// Application and framework plists share most keys; the bundle type,
/// icon, and Java root paths differ, and only frameworks advertise their
/// components and principal class.
pub fn build_info_plist(project: &SourceProject) -> PlistValue {
    let name = project.name();
    let version = project.version();
    let jar_name = project.target_jar_name();
    let is_app = project.kind().is_app();

    let mut java = PlistDict::new();
    java.insert("JVMVersion", "1.5+");

    let mut plist = PlistDict::new();
    plist.insert("NSExecutable", name);
    plist.insert("CFBundleDevelopmentRegion", "English");
    plist.insert("CFBundleExecutable", name);
    plist.insert("CFBundleGetInfoString", "");
    plist.insert(
        "CFBundleIconFile",
        if is_app { "WOAfile.icns" } else { "" },
    );
    plist.insert("CFBundleIdentifier", "com.apple.myapp");
    plist.insert("CFBundleInfoDictionaryVersion", "6.0");
    plist.insert("CFBundleName", if is_app { "WOA" } else { "WOF" });
    plist.insert("CFBundlePackageType", if is_app { "APPL" } else { "FMWK" });
    plist.insert("CFBundleShortVersionString", version);
    plist.insert("CFBundleSignature", "webo");
    plist.insert("CFBundleVersion", version);
    plist.insert("Java", java);
    plist.insert(
        "NSJavaClientRoot",
        if is_app {
            "Contents/WebServerResources/Java"
        } else {
            "WebServerResources/Java"
        },
    );
    plist.insert("NSJavaNeeded", true);
    plist.insert(
        "NSJavaPath",
        PlistValue::Array(vec![jar_name.as_str().into()]),
    );
    plist.insert("NSJavaPathClient", jar_name.as_str());
    plist.insert(
        "NSJavaRoot",
        if is_app {
            "Contents/Resources/Java"
        } else {
            "Resources/Java"
        },
    );

    if project.kind().is_framework() {
        plist.insert("Has_WOComponents", true);

        if let Some(principal_class) = project.principal_class() {
            plist.insert("NSPrincipalClass", principal_class);
        }
    }

    plist.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::plist::serialize;
    use crate::bundler::project::{ProjectKind, SourceProjectBuilder};

    fn project(kind: ProjectKind) -> SourceProject {
        SourceProjectBuilder::new()
            .name("Demo")
            .version("1.0")
            .kind(kind)
            .principal_class(Some("com.example.Main".to_string()))
            .jar_path("/tmp/demo/target/demo-1.0.jar")
            .project_dir("/tmp/demo")
            .build()
            .unwrap()
    }

    #[test]
    fn application_plist_uses_bundle_relative_java_roots() {
        let serialized = serialize(&build_info_plist(&project(ProjectKind::Application)));

        assert!(serialized.contains("<string>APPL</string>"));
        assert!(serialized.contains("<string>WOA</string>"));
        assert!(serialized.contains("<string>Contents/Resources/Java</string>"));
        assert!(serialized.contains("<string>Contents/WebServerResources/Java</string>"));
        assert!(serialized.contains("<string>WOAfile.icns</string>"));
    }

    #[test]
    fn framework_plist_declares_components_and_principal_class() {
        let serialized = serialize(&build_info_plist(&project(ProjectKind::Framework)));

        assert!(serialized.contains("<string>FMWK</string>"));
        assert!(serialized.contains("<string>WOF</string>"));
        assert!(serialized.contains("<key>Has_WOComponents</key>"));
        assert!(serialized.contains("<key>NSPrincipalClass</key>"));
        assert!(serialized.contains("<string>com.example.Main</string>"));
        assert!(serialized.contains("<string>Resources/Java</string>"));
    }

    #[test]
    fn application_plist_has_no_framework_only_keys() {
        let serialized = serialize(&build_info_plist(&project(ProjectKind::Application)));

        assert!(!serialized.contains("Has_WOComponents"));
        assert!(!serialized.contains("NSPrincipalClass"));
    }

    #[test]
    fn framework_without_principal_class_omits_the_key() {
        let project = SourceProjectBuilder::new()
            .name("Widgets")
            .version("2.0")
            .kind(ProjectKind::Framework)
            .jar_path("/tmp/widgets/target/widgets-2.0.jar")
            .project_dir("/tmp/widgets")
            .build()
            .unwrap();

        let serialized = serialize(&build_info_plist(&project));

        assert!(serialized.contains("<key>Has_WOComponents</key>"));
        assert!(!serialized.contains("NSPrincipalClass"));
    }

    #[test]
    fn java_paths_name_the_target_jar() {
        let serialized = serialize(&build_info_plist(&project(ProjectKind::Application)));

        assert!(serialized.contains("<key>NSJavaPath</key>"));
        assert!(serialized.contains("<string>demo.jar</string>"));
        assert!(serialized.contains("<key>NSJavaNeeded</key>"));
        assert!(serialized.contains("<true/>"));
    }
}
