//! CLI demo entry point.
//!
//! # Responsibility
//! - Run a scripted page session against the in-memory host: one simulate
//!   click, then one form submission per positional value.
//! - Print each submission outcome and the final rendered document.

use clap::Parser;
use log::debug;
use pagewire_core::{
    init_logging, init_stderr_logging, install_on_ready, HostSurface, LogLevel, MemoryHost,
    NodeId, PageConfig, SubmitOutcome,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;

/// Scripted page session over the in-memory host
#[derive(Debug, Parser)]
#[command(name = "pagewire", version, long_about = None)]
struct CliArgs {
    /// Page configuration as JSON
    #[arg(long = "config", value_name = "FILE")]
    config_path: Option<PathBuf>,

    /// Absolute directory for rolling log files (stderr when omitted)
    #[arg(long, value_name = "DIR")]
    log_dir: Option<String>,

    /// Log verbosity: trace|debug|info|warn|error
    #[arg(long, default_value = "warn", value_parser = str::parse::<LogLevel>)]
    level: LogLevel,

    /// Values submitted through the form, in order
    values: Vec<String>,
}

fn load_config(path: Option<&Path>) -> Result<PageConfig, String> {
    let Some(path) = path else {
        return Ok(PageConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read config `{}`: {err}", path.display()))?;
    PageConfig::from_json_str(&raw).map_err(|err| format!("{}: {err}", path.display()))
}

fn run(args: CliArgs) -> Result<(), String> {
    let level = args.level.as_str();
    match args.log_dir.as_deref() {
        Some(dir) => init_logging(level, dir),
        None => init_stderr_logging(level),
    }
    .map_err(|err| err.to_string())?;

    let config = load_config(args.config_path.as_deref())?;
    let host = Rc::new(MemoryHost::with_standard_page(&config).map_err(|err| err.to_string())?);
    start_page(&host, &config)?;
    debug!("event=cli_session module=cli status=ready values={}", args.values.len());

    if let Some(button) = host.element_by_id(&config.element_ids.simulate_click) {
        host.click(button).map_err(|err| err.to_string())?;
    }
    for value in &args.values {
        match submit_value(&host, &config, value)? {
            Some(SubmitOutcome::Accepted(_)) => println!("accepted  {value:?}"),
            Some(SubmitOutcome::Rejected(message)) => {
                println!("rejected  {value:?}: {message}")
            }
            None => break,
        }
    }

    host.scheduler().run_until_idle();
    print!(
        "{}",
        host.render(host.document())
            .map_err(|err| err.to_string())?
    );
    Ok(())
}

fn start_page(host: &Rc<MemoryHost>, config: &PageConfig) -> Result<(), String> {
    if !install_on_ready(Some(host), config) {
        return Err("failed to install page handlers".to_string());
    }
    host.fire_dom_content_loaded()
        .map_err(|err| err.to_string())?;
    Ok(())
}

/// Types `value` into the form input and submits it.
///
/// A submission counts as accepted when the content region gained an item.
/// Returns `None` when the form or its input is missing.
fn submit_value(
    host: &MemoryHost,
    config: &PageConfig,
    value: &str,
) -> Result<Option<SubmitOutcome>, String> {
    let ids = &config.element_ids;
    let (Some(form), Some(input)) = (
        host.element_by_id(&ids.user_form),
        host.element_by_id(&ids.user_input),
    ) else {
        return Ok(None);
    };
    let content = host.element_by_id(&ids.dynamic_content);

    let before = child_count(host, content)?;
    host.set_input_value(input, value)
        .map_err(|err| err.to_string())?;
    host.submit(form).map_err(|err| err.to_string())?;
    if child_count(host, content)? > before {
        return Ok(Some(SubmitOutcome::Accepted(value.trim().to_string())));
    }
    let message = match host.element_by_id(&ids.error_message) {
        Some(status) => host.text(status).map_err(|err| err.to_string())?,
        None => String::new(),
    };
    Ok(Some(SubmitOutcome::Rejected(message)))
}

fn child_count(host: &MemoryHost, region: Option<NodeId>) -> Result<usize, String> {
    match region {
        Some(region) => host
            .children(region)
            .map(|children| children.len())
            .map_err(|err| err.to_string()),
        None => Ok(0),
    }
}

fn main() -> ExitCode {
    match run(CliArgs::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("pagewire: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{start_page, submit_value, CliArgs};
    use clap::Parser;
    use pagewire_core::{HostSurface, LogLevel, MemoryHost, PageConfig, SubmitOutcome};
    use std::rc::Rc;

    fn started_page(config: &PageConfig) -> Rc<MemoryHost> {
        let host = Rc::new(MemoryHost::with_standard_page(config).expect("standard page"));
        start_page(&host, config).expect("start");
        host
    }

    #[test]
    fn splits_flags_from_values() {
        let parsed =
            CliArgs::try_parse_from(["pagewire", "--level", "debug", "abc", "--", "--config"])
                .expect("valid args");
        assert_eq!(parsed.level, LogLevel::Debug);
        assert_eq!(parsed.config_path, None);
        assert_eq!(parsed.values, vec!["abc", "--config"]);
    }

    #[test]
    fn level_defaults_to_warn() {
        let parsed = CliArgs::try_parse_from(["pagewire"]).expect("valid args");
        assert_eq!(parsed.level, LogLevel::Warn);
        assert!(parsed.values.is_empty());
    }

    #[test]
    fn rejects_flag_without_value() {
        let err = CliArgs::try_parse_from(["pagewire", "--config"]).expect_err("missing value");
        assert!(err.to_string().contains("--config"));
    }

    #[test]
    fn rejects_unknown_level_while_parsing() {
        let err = CliArgs::try_parse_from(["pagewire", "--level", "verbose"])
            .expect_err("unknown level");
        assert!(err.to_string().contains("verbose"));
    }
    #[test]
    fn submit_value_reports_accepted_and_rejected() {
        let config = PageConfig::default();
        let host = started_page(&config);

        assert_eq!(
            submit_value(&host, &config, " hello ").expect("submit"),
            Some(SubmitOutcome::Accepted("hello".to_string()))
        );
        assert_eq!(
            submit_value(&host, &config, "ab").expect("submit"),
            Some(SubmitOutcome::Rejected(
                "Input must be at least 3 characters long.".to_string()
            ))
        );
    }

    #[test]
    fn rejection_is_reported_without_status_region() {
        let config = PageConfig::default();
        let host = started_page(&config);
        let status = host.element_by_id("error-message").expect("status region");
        host.detach(status).expect("detach");

        assert_eq!(
            submit_value(&host, &config, "ab").expect("submit"),
            Some(SubmitOutcome::Rejected(String::new()))
        );
    }
}
