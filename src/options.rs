use std::path::PathBuf;

use crate::error::AppError;
use crate::model::{ProjectType, VersionPhase};

pub const DEFAULT_VERSION: &str = "latest";
pub const DEFAULT_SOURCE_PATH: &str = ".";
pub const DEFAULT_LOG_LEVEL: &str = "INFO";
pub const DEFAULT_SEARCH_DEPTH: &str = "0";
pub const DEFAULT_MAVEN_EXCLUDED_SCOPES: &str = "test";
pub const DEFAULT_GRADLE_CONFIGURATION: &str = "releaseRuntimeClasspath";
pub const DEFAULT_EXCLUDED_DIRECTORIES: &str = "/collections/,/portals/";

/// Options exactly as they were given on the command line, defaults applied.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub project_type: Option<String>,
    pub project_name: Option<String>,
    pub version: String,
    pub source_path: PathBuf,
    pub log_level: String,
    pub search_depth: String,
    pub phase: Option<String>,
    pub classifier: Option<String>,
    pub maven_excluded_scopes: String,
    pub maven_profiles: Option<String>,
    pub maven_projects: Option<String>,
    pub gradle_project: Option<String>,
    pub gradle_configuration: String,
    pub signature_scan: bool,
    pub excluded_directories: String,
}

impl Default for ScanRequest {
    fn default() -> Self {
        ScanRequest {
            project_type: None,
            project_name: None,
            version: DEFAULT_VERSION.to_string(),
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            search_depth: DEFAULT_SEARCH_DEPTH.to_string(),
            phase: None,
            classifier: None,
            maven_excluded_scopes: DEFAULT_MAVEN_EXCLUDED_SCOPES.to_string(),
            maven_profiles: None,
            maven_projects: None,
            gradle_project: None,
            gradle_configuration: DEFAULT_GRADLE_CONFIGURATION.to_string(),
            signature_scan: false,
            excluded_directories: DEFAULT_EXCLUDED_DIRECTORIES.to_string(),
        }
    }
}

/// Validated scan options, ready to be turned into scanner flags.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub project_type: ProjectType,
    pub project_name: String,
    pub version: String,
    pub source_path: PathBuf,
    pub log_level: String,
    pub search_depth: String,
    pub phase: VersionPhase,
    pub classifier: Option<String>,
    pub maven_excluded_scopes: String,
    pub maven_profiles: Option<String>,
    pub maven_projects: Option<String>,
    pub gradle_project: Option<String>,
    pub gradle_configuration: String,
    pub signature_scan: bool,
    pub excluded_directories: String,
}

impl ScanOptions {
    /// Suffix appended to the generated code location name.
    pub fn classifier_suffix(&self) -> String {
        match &self.classifier {
            Some(classifier) => format!("-{classifier}"),
            None => String::new(),
        }
    }

    pub fn code_location_name(&self) -> String {
        format!("{}/{}{}", self.project_name, self.version, self.classifier_suffix())
    }
}

pub fn validate(request: ScanRequest) -> Result<ScanOptions, AppError> {
    let raw_type = non_empty(request.project_type)
        .ok_or(AppError::MissingRequiredOption("projectType"))?;
    let project_type = ProjectType::from_name(&raw_type)
        .ok_or(AppError::UnsupportedProjectType(raw_type))?;

    let project_name = non_empty(request.project_name)
        .ok_or(AppError::MissingRequiredOption("projectName"))?;

    if !request.source_path.exists() {
        return Err(AppError::InvalidSourcePath(request.source_path));
    }

    let phase = match non_empty(request.phase) {
        Some(value) => {
            VersionPhase::from_name(&value).ok_or(AppError::UnsupportedVersionPhase(value))?
        }
        None => VersionPhase::default_for_version(&request.version),
    };

    Ok(ScanOptions {
        project_type,
        project_name,
        version: request.version,
        source_path: request.source_path,
        log_level: request.log_level,
        search_depth: request.search_depth,
        phase,
        classifier: non_empty(request.classifier),
        maven_excluded_scopes: request.maven_excluded_scopes,
        maven_profiles: non_empty(request.maven_profiles),
        maven_projects: non_empty(request.maven_projects),
        gradle_project: non_empty(request.gradle_project),
        gradle_configuration: request.gradle_configuration,
        signature_scan: request.signature_scan,
        excluded_directories: request.excluded_directories,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
