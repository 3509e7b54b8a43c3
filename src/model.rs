use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectType {
    Npm,
    Maven,
    Ios,
    Android,
}

impl ProjectType {
    pub const ALL: [ProjectType; 4] =
        [ProjectType::Npm, ProjectType::Maven, ProjectType::Ios, ProjectType::Android];

    pub fn from_name(value: &str) -> Option<Self> {
        match value {
            "npm" => Some(ProjectType::Npm),
            "maven" => Some(ProjectType::Maven),
            "ios" => Some(ProjectType::Ios),
            "android" => Some(ProjectType::Android),
            _ => None,
        }
    }

    /// Comma-separated list of every supported type, for messages.
    pub fn supported_names() -> String {
        ProjectType::ALL.map(|project_type| project_type.as_str()).join(", ")
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Npm => "npm",
            ProjectType::Maven => "maven",
            ProjectType::Ios => "ios",
            ProjectType::Android => "android",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle phase recorded on the project version in the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionPhase {
    Planning,
    Development,
    Prerelease,
    Released,
    Deprecated,
    Archived,
}

impl VersionPhase {
    pub const ALL: [VersionPhase; 6] = [
        VersionPhase::Planning,
        VersionPhase::Development,
        VersionPhase::Prerelease,
        VersionPhase::Released,
        VersionPhase::Deprecated,
        VersionPhase::Archived,
    ];

    pub fn from_name(value: &str) -> Option<Self> {
        VersionPhase::ALL.into_iter().find(|phase| phase.as_str().eq_ignore_ascii_case(value))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VersionPhase::Planning => "PLANNING",
            VersionPhase::Development => "DEVELOPMENT",
            VersionPhase::Prerelease => "PRERELEASE",
            VersionPhase::Released => "RELEASED",
            VersionPhase::Deprecated => "DEPRECATED",
            VersionPhase::Archived => "ARCHIVED",
        }
    }

    /// Phase used when none is given: unversioned scans track ongoing development.
    pub fn default_for_version(version: &str) -> Self {
        if version == "latest" { VersionPhase::Development } else { VersionPhase::Prerelease }
    }
}

impl fmt::Display for VersionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
