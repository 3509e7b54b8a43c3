use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgAction, CommandFactory, Parser};

use crate::error::AppError;
use crate::options::{
    DEFAULT_EXCLUDED_DIRECTORIES, DEFAULT_GRADLE_CONFIGURATION, DEFAULT_LOG_LEVEL,
    DEFAULT_MAVEN_EXCLUDED_SCOPES, DEFAULT_SEARCH_DEPTH, DEFAULT_SOURCE_PATH, DEFAULT_VERSION,
    ScanRequest,
};

#[derive(Parser, Debug)]
#[command(
    name = "hubscan",
    about = "Run a software composition analysis scan for an npm, maven, ios or android project.",
    disable_version_flag = true,
    args_override_self = true
)]
pub struct Cli {
    /// Project type: npm, maven, ios or android.
    #[arg(long = "projectType", value_name = "TYPE")]
    pub project_type: Option<String>,

    /// Project name in the hub.
    #[arg(long = "projectName", value_name = "NAME")]
    pub project_name: Option<String>,

    /// Project version name.
    #[arg(long = "version", value_name = "VERSION", default_value = DEFAULT_VERSION)]
    pub version: String,

    /// Directory to scan.
    #[arg(long = "sourcePath", value_name = "PATH", default_value = DEFAULT_SOURCE_PATH)]
    pub source_path: PathBuf,

    /// Scanner log level.
    #[arg(long = "logLevel", value_name = "LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// How many directory levels below the source path detectors search.
    #[arg(long = "detectSearchDepth", value_name = "DEPTH", default_value = DEFAULT_SEARCH_DEPTH)]
    pub search_depth: String,

    /// Version phase (defaults to DEVELOPMENT for 'latest', PRERELEASE otherwise).
    #[arg(long = "detectProjectVersionPhase", value_name = "PHASE")]
    pub phase: Option<String>,

    /// Suffix appended to the code location name.
    #[arg(long = "detectCodeLocationClassifier", value_name = "CLASSIFIER")]
    pub classifier: Option<String>,

    /// Maven scopes left out of the scan.
    #[arg(long = "detectMavenExcludedScopes", value_name = "SCOPES", default_value = DEFAULT_MAVEN_EXCLUDED_SCOPES)]
    pub maven_excluded_scopes: String,

    /// Maven profiles to activate.
    #[arg(long = "detectMavenProfiles", value_name = "PROFILES")]
    pub maven_profiles: Option<String>,

    /// Maven reactor projects to build.
    #[arg(long = "detectMavenProjects", value_name = "PROJECTS")]
    pub maven_projects: Option<String>,

    /// Gradle project to scan (android only).
    #[arg(long = "detectGradleProject", value_name = "PROJECT")]
    pub gradle_project: Option<String>,

    /// Gradle configuration to scan (android only).
    #[arg(long = "detectGradleConfiguration", value_name = "CONFIGURATION", default_value = DEFAULT_GRADLE_CONFIGURATION)]
    pub gradle_configuration: String,

    /// Also run the signature scanner (npm only).
    #[arg(long = "enableSignatureScan", action = ArgAction::SetTrue)]
    pub signature_scan: bool,

    /// Directories excluded from the signature scan (npm only).
    #[arg(long = "detectExcludedDirectories", value_name = "DIRS", default_value = DEFAULT_EXCLUDED_DIRECTORIES)]
    pub excluded_directories: String,

    /// Exit with status 1 instead of 0 when anything fails.
    #[arg(long = "fail", action = ArgAction::SetTrue)]
    pub fail: bool,

    /// Print the scanner command line instead of running it.
    #[arg(long = "dryRun", action = ArgAction::SetTrue)]
    pub dry_run: bool,
}

impl Cli {
    pub fn into_request(self) -> ScanRequest {
        ScanRequest {
            project_type: self.project_type,
            project_name: self.project_name,
            version: self.version,
            source_path: self.source_path,
            log_level: self.log_level,
            search_depth: self.search_depth,
            phase: self.phase,
            classifier: self.classifier,
            maven_excluded_scopes: self.maven_excluded_scopes,
            maven_profiles: self.maven_profiles,
            maven_projects: self.maven_projects,
            gradle_project: self.gradle_project,
            gradle_configuration: self.gradle_configuration,
            signature_scan: self.signature_scan,
            excluded_directories: self.excluded_directories,
        }
    }
}

/// Outcome of reading the command line.
#[derive(Debug)]
pub enum Parsed {
    Run(Box<Cli>),
    /// Help text to print before exiting successfully.
    Help(String),
}

pub fn parse_from<I, T>(args: I) -> Result<Parsed, AppError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    check_flag_values(&args)?;

    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(Parsed::Run(Box::new(cli))),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp => Ok(Parsed::Help(err.render().to_string())),
            kind => Err(map_clap_error(kind, &err)),
        },
    }
}

/// A value-taking flag must be followed by a token that is not itself flag-like.
fn check_flag_values(args: &[OsString]) -> Result<(), AppError> {
    let command = Cli::command();
    let takes_value = |token: &str| {
        command.get_arguments().any(|arg| {
            arg.get_action().takes_values()
                && arg.get_long().is_some_and(|long| token.strip_prefix("--") == Some(long))
        })
    };

    let mut tokens = args.iter().skip(1);
    while let Some(token) = tokens.next() {
        let Some(token) = token.to_str() else { continue };
        if !takes_value(token) {
            continue;
        }
        match tokens.next() {
            Some(value) if !value.to_string_lossy().starts_with('-') => {}
            _ => return Err(AppError::MissingFlagValue(token.to_string())),
        }
    }
    Ok(())
}

/// `--fail` has to be honoured even when parsing itself fails.
pub fn wants_fail<I, T>(args: I) -> bool
where
    I: IntoIterator<Item = T>,
    T: AsRef<std::ffi::OsStr>,
{
    args.into_iter().any(|arg| arg.as_ref() == "--fail")
}

fn map_clap_error(kind: ErrorKind, err: &clap::Error) -> AppError {
    let offending = match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(value)) => Some(value.clone()),
        _ => None,
    };

    match (kind, offending) {
        (ErrorKind::UnknownArgument, Some(flag)) => AppError::UnsupportedFlag(flag),
        (ErrorKind::InvalidValue, Some(flag)) => {
            AppError::MissingFlagValue(flag.split_whitespace().next().unwrap_or(&flag).to_string())
        }
        _ => AppError::Usage(first_line(&err.to_string())),
    }
}

fn first_line(rendered: &str) -> String {
    let line = rendered.lines().next().unwrap_or_default();
    line.trim_start_matches("error: ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Parsed, AppError> {
        parse_from(std::iter::once("hubscan").chain(args.iter().copied()))
    }

    fn cli(args: &[&str]) -> Cli {
        match parse(args).unwrap() {
            Parsed::Run(cli) => *cli,
            Parsed::Help(_) => panic!("unexpected help output"),
        }
    }

    #[test]
    fn defaults_are_applied() {
        let cli = cli(&["--projectType", "npm", "--projectName", "bar"]);
        assert_eq!(cli.version, "latest");
        assert_eq!(cli.source_path, PathBuf::from("."));
        assert_eq!(cli.log_level, "INFO");
        assert_eq!(cli.search_depth, "0");
        assert_eq!(cli.maven_excluded_scopes, "test");
        assert_eq!(cli.gradle_configuration, "releaseRuntimeClasspath");
        assert_eq!(cli.excluded_directories, "/collections/,/portals/");
        assert!(!cli.signature_scan);
        assert!(!cli.fail);
    }

    #[test]
    fn version_is_a_scan_option() {
        let cli = cli(&["--projectType", "maven", "--projectName", "foo", "--version", "1.0"]);
        assert_eq!(cli.version, "1.0");
    }

    #[test]
    fn repeated_flag_keeps_last_value() {
        let cli = cli(&["--projectName", "one", "--projectName", "two"]);
        assert_eq!(cli.project_name.as_deref(), Some("two"));
    }

    #[test]
    fn unknown_flag_is_unsupported() {
        let err = parse(&["--foo", "bar"]).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFlag(ref f) if f == "--foo"));
    }

    #[test]
    fn flag_without_value_is_reported() {
        let err = parse(&["--projectType", "npm", "--projectName"]).unwrap_err();
        assert!(matches!(err, AppError::MissingFlagValue(ref f) if f == "--projectName"));
    }

    #[test]
    fn flag_followed_by_flag_is_reported() {
        let err = parse(&["--projectName", "--projectType", "npm"]).unwrap_err();
        assert!(matches!(err, AppError::MissingFlagValue(ref f) if f == "--projectName"));
    }

    #[test]
    fn flag_followed_by_unknown_flag_is_reported() {
        let err = parse(&["--projectName", "--foo"]).unwrap_err();
        assert!(matches!(err, AppError::MissingFlagValue(ref f) if f == "--projectName"));
    }

    #[test]
    fn hyphen_value_is_reported() {
        let err = parse(&["--projectType", "npm", "--detectSearchDepth", "-1"]).unwrap_err();
        assert!(matches!(err, AppError::MissingFlagValue(ref f) if f == "--detectSearchDepth"));
    }

    #[test]
    fn switches_do_not_consume_values() {
        let cli = cli(&["--enableSignatureScan", "--projectName", "bar", "--fail"]);
        assert!(cli.signature_scan);
        assert!(cli.fail);
        assert_eq!(cli.project_name.as_deref(), Some("bar"));
    }

    #[test]
    fn help_is_not_an_error() {
        assert!(matches!(parse(&["--help"]).unwrap(), Parsed::Help(_)));
    }

    #[test]
    fn fail_switch_is_detected_in_raw_args() {
        assert!(wants_fail(["hubscan", "--foo", "--fail"]));
        assert!(!wants_fail(["hubscan", "--projectType", "npm"]));
    }
}
