use crate::cli::args::{CliArgs, Command, ViewArgs};
use crate::filter::dates;
use crate::output::OutputFormat;

fn validate_view(view: &ViewArgs) -> Result<(), String> {
    if view.page_size == Some(0) {
        return Err("invalid page-size, expected positive integer".to_string());
    }
    if let Some(raw) = view.output_format.as_deref() {
        OutputFormat::parse(raw)
            .ok_or_else(|| format!("invalid --format '{raw}', expected text or json"))?;
    }
    Ok(())
}

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if args.timeout == Some(0) {
        return Err("invalid timeout, expected positive number of seconds".to_string());
    }
    match &args.command {
        Command::List(list) => {
            if list.page == Some(0) {
                return Err("invalid page, pages start at 1".to_string());
            }
            if let Some(raw) = list.date.as_deref().filter(|d| !d.trim().is_empty()) {
                dates::parse_filter_date(raw).map_err(|e| format!("invalid --date '{raw}': {e}"))?;
            }
            validate_view(&list.view)
        }
        Command::Submit(submit) => validate_view(&submit.view),
        Command::Shell(view) => validate_view(view),
        Command::InitConfig => Ok(()),
    }
}
