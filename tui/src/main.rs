use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::Result;
use quickpick_core::InputFormat;
use quickpick_core::parse_candidates;
use quickpick_tui::PickerOutcome;
use quickpick_tui::app;
use quickpick_tui::cli::Cli;
use quickpick_tui::logging;
use tracing::info;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let _log_guard = logging::init(cli.log_file.as_deref())?;

    let config = cli.picker_config()?;
    let input = cli.read_input()?;
    let candidates = parse_candidates(&input, InputFormat::from(cli.format))?;
    info!(count = candidates.len(), "loaded candidates");

    match app::run(&config, candidates)? {
        PickerOutcome::Selected(selection) => {
            if cli.print_json {
                println!("{}", serde_json::to_string(selection.candidate.as_ref())?);
            } else {
                println!("{}", selection.candidate.name);
            }
            Ok(ExitCode::SUCCESS)
        }
        PickerOutcome::Cancelled => Ok(ExitCode::FAILURE),
    }
}
