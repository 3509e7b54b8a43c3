use crate::config::Credentials;
use crate::model::ProjectType;
use crate::options::ScanOptions;

pub const TOKEN_PROPERTY: &str = "blackduck.api.token";

const NPM_EXCLUDED_DETECTORS: &str = "GIT";

fn property(name: &str, value: impl std::fmt::Display) -> String {
    format!("--{name}={value}")
}

/// Assemble the scanner arguments for the validated options.
pub fn build_flags(options: &ScanOptions, credentials: &Credentials) -> Vec<String> {
    let mut flags = vec![
        property("blackduck.url", &credentials.url),
        property(TOKEN_PROPERTY, &credentials.token),
        property("logging.level.detect", &options.log_level),
        property("detect.project.name", &options.project_name),
        property("detect.project.version.name", &options.version),
        property("detect.project.version.phase", options.phase),
        property("detect.source.path", options.source_path.display()),
        property("detect.code.location.name", options.code_location_name()),
        property("detect.detector.search.depth", &options.search_depth),
        property("detect.excluded.directories.defaults.disabled", true),
    ];

    match options.project_type {
        ProjectType::Maven => {
            flags.push(property("detect.detector.types", "MAVEN"));
            flags.push(property("detect.maven.excluded.scopes", &options.maven_excluded_scopes));
            if let Some(build_command) = maven_build_command(options) {
                flags.push(property("detect.maven.build.command", build_command));
            }
        }
        ProjectType::Npm => {
            let tools = if options.signature_scan { "DETECTOR,SIGNATURE_SCAN" } else { "DETECTOR" };
            flags.push(property("detect.tools", tools));
            flags.push(property("detect.excluded.detector.types", NPM_EXCLUDED_DETECTORS));
            flags.push(property("detect.npm.include.dev.dependencies", false));
            flags.push(property("detect.excluded.directories", &options.excluded_directories));
        }
        ProjectType::Ios => {
            flags.push(property("detect.detector.types", "COCOAPODS"));
        }
        ProjectType::Android => {
            flags.push(property("detect.detector.types", "GRADLE"));
            if let Some(project) = &options.gradle_project {
                flags.push(property("detect.gradle.included.projects", project));
                flags.push(property(
                    "detect.gradle.included.configurations",
                    &options.gradle_configuration,
                ));
            }
        }
    }

    flags
}

fn maven_build_command(options: &ScanOptions) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(projects) = &options.maven_projects {
        parts.push(format!("-pl {projects}"));
    }
    if let Some(profiles) = &options.maven_profiles {
        parts.push(format!("-P {profiles}"));
    }
    if parts.is_empty() { None } else { Some(parts.join(" ")) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{ScanRequest, validate};
    use tempfile::TempDir;

    fn credentials() -> Credentials {
        Credentials {
            url: "https://hub.example.com".to_string(),
            token: "secret".to_string(),
            script_url: "https://detect.example.com/detect.sh".to_string(),
        }
    }

    fn options_for(dir: &TempDir, tweak: impl FnOnce(&mut ScanRequest)) -> ScanOptions {
        let mut request = ScanRequest {
            source_path: dir.path().to_path_buf(),
            ..ScanRequest::default()
        };
        tweak(&mut request);
        validate(request).unwrap()
    }

    fn has(flags: &[String], expected: &str) -> bool {
        flags.iter().any(|flag| flag == expected)
    }

    #[test]
    fn common_flags_are_always_present() {
        let dir = TempDir::new().unwrap();
        let options = options_for(&dir, |r| {
            r.project_type = Some("ios".to_string());
            r.project_name = Some("app".to_string());
        });
        let flags = build_flags(&options, &credentials());

        assert_eq!(flags[0], "--blackduck.url=https://hub.example.com");
        assert_eq!(flags[1], "--blackduck.api.token=secret");
        assert!(has(&flags, "--logging.level.detect=INFO"));
        assert!(has(&flags, "--detect.project.name=app"));
        assert!(has(&flags, "--detect.project.version.name=latest"));
        assert!(has(&flags, "--detect.project.version.phase=DEVELOPMENT"));
        assert!(has(&flags, &format!("--detect.source.path={}", dir.path().display())));
        assert!(has(&flags, "--detect.code.location.name=app/latest"));
        assert!(has(&flags, "--detect.detector.search.depth=0"));
        assert!(has(&flags, "--detect.excluded.directories.defaults.disabled=true"));
        assert!(has(&flags, "--detect.detector.types=COCOAPODS"));
    }

    #[test]
    fn maven_scan_uses_maven_detector() {
        let dir = TempDir::new().unwrap();
        let options = options_for(&dir, |r| {
            r.project_type = Some("maven".to_string());
            r.project_name = Some("foo".to_string());
            r.version = "1.0".to_string();
        });
        let flags = build_flags(&options, &credentials());

        assert!(has(&flags, "--detect.project.version.name=1.0"));
        assert!(has(&flags, "--detect.project.version.phase=PRERELEASE"));
        assert!(has(&flags, "--detect.detector.types=MAVEN"));
        assert!(has(&flags, "--detect.maven.excluded.scopes=test"));
        assert!(!flags.iter().any(|f| f.starts_with("--detect.maven.build.command")));
    }

    #[test]
    fn maven_projects_and_profiles_form_build_command() {
        let dir = TempDir::new().unwrap();
        let options = options_for(&dir, |r| {
            r.project_type = Some("maven".to_string());
            r.project_name = Some("foo".to_string());
            r.maven_projects = Some("core,api".to_string());
            r.maven_profiles = Some("ci".to_string());
        });
        let flags = build_flags(&options, &credentials());

        assert!(has(&flags, "--detect.maven.build.command=-pl core,api -P ci"));
    }

    #[test]
    fn npm_signature_scan_adds_tool_and_exclusions() {
        let dir = TempDir::new().unwrap();
        let options = options_for(&dir, |r| {
            r.project_type = Some("npm".to_string());
            r.project_name = Some("bar".to_string());
            r.signature_scan = true;
        });
        let flags = build_flags(&options, &credentials());

        assert!(has(&flags, "--detect.tools=DETECTOR,SIGNATURE_SCAN"));
        assert!(has(&flags, "--detect.excluded.directories=/collections/,/portals/"));
        assert!(has(&flags, "--detect.excluded.detector.types=GIT"));
        assert!(has(&flags, "--detect.npm.include.dev.dependencies=false"));
    }

    #[test]
    fn npm_without_signature_scan_runs_detectors_only() {
        let dir = TempDir::new().unwrap();
        let options = options_for(&dir, |r| {
            r.project_type = Some("npm".to_string());
            r.project_name = Some("bar".to_string());
        });
        let flags = build_flags(&options, &credentials());

        assert!(has(&flags, "--detect.tools=DETECTOR"));
    }

    #[test]
    fn android_narrows_to_gradle_project() {
        let dir = TempDir::new().unwrap();
        let plain = options_for(&dir, |r| {
            r.project_type = Some("android".to_string());
            r.project_name = Some("droid".to_string());
        });
        let flags = build_flags(&plain, &credentials());
        assert!(has(&flags, "--detect.detector.types=GRADLE"));
        assert!(!flags.iter().any(|f| f.starts_with("--detect.gradle.included")));

        let narrowed = options_for(&dir, |r| {
            r.project_type = Some("android".to_string());
            r.project_name = Some("droid".to_string());
            r.gradle_project = Some("app".to_string());
        });
        let flags = build_flags(&narrowed, &credentials());
        assert!(has(&flags, "--detect.gradle.included.projects=app"));
        assert!(has(
            &flags,
            "--detect.gradle.included.configurations=releaseRuntimeClasspath"
        ));
    }
}
