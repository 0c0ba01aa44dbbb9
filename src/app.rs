use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use clap::{error::ErrorKind, Parser};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use crate::cli::args::{CliArgs, Command, ViewArgs};
use crate::cli::validation;
use crate::client::{ClientOptions, HttpLogStore, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECONDS};
use crate::config::{self, ConfigFile};
use crate::controller::Session;
use crate::filter::{dates, FilterCriteria};
use crate::output::{self, OutputFormat};
use crate::pager::DEFAULT_PAGE_SIZE;
use crate::shell;
use crate::submission::SubmissionInput;

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

#[derive(Clone, Debug)]
struct RunConfig {
    client: ClientOptions,
    page_size: usize,
    output_format: OutputFormat,
    no_color: bool,
    verbose: u8,
    command: Command,
}

fn view_settings(view: &ViewArgs, cfg: &ConfigFile) -> Result<(usize, OutputFormat), String> {
    let page_size = view.page_size.or(cfg.page_size).unwrap_or(DEFAULT_PAGE_SIZE);
    if page_size == 0 {
        return Err("invalid page_size in config, expected positive integer".to_string());
    }
    let output_format = match view.output_format.as_deref().or(cfg.output_format.as_deref()) {
        Some(raw) => OutputFormat::parse(raw)
            .ok_or_else(|| format!("invalid output format '{raw}', expected text or json"))?,
        None => OutputFormat::Text,
    };
    Ok((page_size, output_format))
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };
    let verbose = args.verbose.max(cfg.verbose.unwrap_or(0));

    let timeout_seconds = args.timeout.or(cfg.timeout).unwrap_or(DEFAULT_TIMEOUT_SECONDS);
    if timeout_seconds == 0 {
        return Err("invalid timeout in config, expected positive number of seconds".to_string());
    }
    let client = ClientOptions {
        api_url: args
            .api_url
            .or(cfg.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        api_key: args
            .api_key
            .or_else(config::api_key_from_env)
            .or(cfg.api_key.clone()),
        timeout_seconds,
        proxy: args.proxy.or(cfg.proxy.clone()),
    };

    let default_view = ViewArgs::default();
    let view = match &args.command {
        Command::List(list) => &list.view,
        Command::Submit(submit) => &submit.view,
        Command::Shell(view) => view,
        Command::InitConfig => &default_view,
    };
    let (page_size, output_format) = view_settings(view, &cfg)?;

    Ok(RunConfig {
        client,
        page_size,
        output_format,
        no_color,
        verbose,
        command: args.command,
    })
}

fn init_logging(verbose: u8, no_color: bool) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,logbook={level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .try_init();
}

fn emit(bytes: &[u8]) -> Result<(), String> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(bytes)
        .and_then(|_| stdout.flush())
        .map_err(|e| format!("failed to write output: {e}"))
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    let store = HttpLogStore::new(&run.client).map_err(|e| e.to_string())?;
    let mut session = Session::new(store, run.page_size);
    let text = run.output_format == OutputFormat::Text;

    match run.command {
        Command::List(list) => {
            if text {
                format_kv_line("API", &run.client.api_url);
            }
            let date = match list.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
                Some(raw) => Some(dates::parse_filter_date(raw)?),
                None => None,
            };
            let criteria = FilterCriteria::new(list.type_filter.unwrap_or_default(), date);
            if text && !criteria.is_empty() {
                format_kv_line(
                    "Filters",
                    &format!(
                        "type={} date={}",
                        if criteria.type_substring.is_empty() {
                            "any"
                        } else {
                            criteria.type_substring.as_str()
                        },
                        criteria
                            .date
                            .map(|d| d.to_string())
                            .unwrap_or_else(|| "any".to_string())
                    ),
                );
            }
            session
                .browse(criteria, list.page)
                .await
                .map_err(|e| format!("failed to fetch logs: {e}"))?;
            if text {
                println!();
            }
            emit(&output::render(session.state(), run.output_format))
        }
        Command::Submit(submit) => {
            let input = SubmissionInput::new(submit.datetime, submit.description);
            let done = session
                .submit(input)
                .await
                .map_err(|e| format!("failed to submit entry: {e}"))?;
            if text {
                format_kv_line(
                    "Created",
                    &format!("{} {}", done.record.event_type, done.record.event_date),
                );
            }
            if let Some(e) = done.reload_error {
                return Err(format!("entry created but the list could not be refreshed: {e}"));
            }
            if text {
                println!();
            }
            emit(&output::render(session.state(), run.output_format))
        }
        Command::Shell(_) => {
            if let Err(e) = session.load().await {
                eprintln!("error: {e} (use 'reload' to retry)");
            }
            let mut stdout = tokio::io::stdout();
            shell::run(
                &mut session,
                BufReader::new(tokio::io::stdin()),
                &mut stdout,
                run.output_format,
            )
            .await
        }
        Command::InitConfig => Ok(()),
    }
}

fn init_config(path: Option<PathBuf>) -> Result<(), String> {
    let path = path
        .or_else(config::default_config_path)
        .ok_or_else(|| "could not determine home directory for config".to_string())?;
    if config::ensure_default_config_file(&path)? {
        format_kv_line("Config", &format!("wrote {}", path.display()));
    } else {
        format_kv_line("Config", &format!("{} already exists", path.display()));
    }
    Ok(())
}

/// Parses `argv`. `Ok(None)` means help or version was printed and there is
/// nothing left to run. Usage errors come back without clap's `error: `
/// prefix since the caller adds its own.
fn parse_args<I, T>(argv: I) -> Result<Option<CliArgs>, String>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match CliArgs::try_parse_from(argv) {
        Ok(args) => Ok(Some(args)),
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{e}");
                Ok(None)
            }
            _ => {
                let msg = e.to_string();
                let msg = msg.trim();
                Err(msg.strip_prefix("error:").unwrap_or(msg).trim_start().to_string())
            }
        },
    }
}

pub fn run_cli() -> Result<(), String> {
    let Some(args) = parse_args(std::env::args_os())? else {
        return Ok(());
    };

    let user_config_path = args.config.clone().map(|p| config::expand_tilde(&p));
    if let Command::InitConfig = args.command {
        return init_config(user_config_path);
    }
    let cfg = match user_config_path.as_ref() {
        Some(path) => config::load_config(path, false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;
    if run.no_color {
        colored::control::set_override(false);
    }
    init_logging(run.verbose, run.no_color);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}
