use std::ffi::OsString;
use std::process::ExitCode;

use hubscan::cli::{Parsed, parse_from, wants_fail};
use hubscan::command::build_flags;
use hubscan::config::{Config, Credentials};
use hubscan::error::AppError;
use hubscan::logging::init_tracing;
use hubscan::options::validate;
use hubscan::runner::{DetectRunner, display_command, execute};

fn main() -> ExitCode {
    let args: Vec<OsString> = std::env::args_os().collect();
    let fail = wants_fail(&args);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err}");
            if fail { ExitCode::FAILURE } else { ExitCode::SUCCESS }
        }
    }
}

fn run(args: Vec<OsString>) -> Result<(), AppError> {
    let cli = match parse_from(args)? {
        Parsed::Run(cli) => *cli,
        Parsed::Help(help) => {
            print!("{help}");
            return Ok(());
        }
    };
    let dry_run = cli.dry_run;

    let options = validate(cli.into_request())?;
    init_tracing(&options.log_level);
    tracing::info!(
        project = %options.project_name,
        project_type = %options.project_type,
        phase = %options.phase,
        "validated scan options"
    );

    let config = Config::load()?;
    let credentials = Credentials::from_process_env(&config)?;

    if dry_run {
        let flags = build_flags(&options, &credentials);
        println!("{}", display_command(&flags));
        return Ok(());
    }

    let runner = DetectRunner::new(credentials.script_url.clone());
    execute(&options, &credentials, &runner)
}
