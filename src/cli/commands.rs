use crate::analyzers::{DisposalAnalyzer, DisposalFrequencies};
use crate::cli::args::{Cli, Commands, InputOptions};
use crate::config::Settings;
use crate::error::Result;
use crate::models::WasteKind;
use crate::processors::{IntegrityChecker, PipelineOutput, WastePipeline};
use crate::readers::WasteReportReader;
use crate::utils::filename::generate_default_chart_filename;
use crate::utils::progress::ProgressReporter;
use crate::writers::{NormalizedCsvWriter, RunSummary, SummaryWriter, SvgChartWriter};
use std::path::PathBuf;
use tracing::{debug, info};

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Process {
            input,
            output_dir,
            normalized_output,
            summary_json,
            no_charts,
        } => {
            let mut settings = load_settings(&input)?;
            if let Some(dir) = output_dir {
                settings.output_dir = dir;
            }

            let output = load_and_normalize(&settings, cli.quiet)?;
            let checker = IntegrityChecker::new();
            let report = checker.check(&output);

            let analyzer = DisposalAnalyzer::new();
            let frequencies: Vec<DisposalFrequencies> = WasteKind::all()
                .into_iter()
                .map(|kind| analyzer.frequencies(&output.table, kind))
                .collect();

            for freq in &frequencies {
                println!("\n{}", freq.summary());
            }

            if !no_charts {
                let chart_writer = SvgChartWriter::new()
                    .with_size(settings.chart_width, settings.chart_height)
                    .with_subtitle(&settings.chart_subtitle);
                for freq in &frequencies {
                    let path = generate_default_chart_filename(&settings.output_dir, freq.kind);
                    chart_writer.write_chart(freq, &path)?;
                    println!("{} chart: {}", freq.kind, path.display());
                }
            }

            if let Some(path) = normalized_output {
                NormalizedCsvWriter::new().write_table(&output.table, &path)?;
                println!("Normalized table: {}", path.display());
            }

            println!("\n{}", checker.generate_summary(&report));

            if let Some(path) = summary_json {
                let summary = RunSummary::new(&settings.input_path, frequencies, report);
                SummaryWriter::new().write_summary(&summary, &path)?;
                println!("Summary: {}", path.display());
            }

            println!("Processing complete!");
        }

        Commands::Validate { input } => {
            let settings = load_settings(&input)?;
            let output = load_and_normalize(&settings, cli.quiet)?;

            let checker = IntegrityChecker::new();
            let report = checker.check(&output);
            println!("\n{}", checker.generate_summary(&report));

            if report.unclassified_records == 0 && report.untranslated_periods.is_empty() {
                println!("✅ Every record was fully normalized");
            } else {
                println!(
                    "⚠️  {} records with unrecognized units, {} untranslated period codes",
                    report.unclassified_records,
                    report.untranslated_periods.len()
                );
            }
        }
    }

    Ok(())
}

/// Set up structured logging based on CLI flags
pub fn setup_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let log_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pa_waste_processor={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

fn load_settings(input: &InputOptions) -> Result<Settings> {
    let mut settings = Settings::load(input.config.as_deref())?;
    apply_input_overrides(&mut settings, input);
    settings.validate()?;
    Ok(settings)
}

fn apply_input_overrides(settings: &mut Settings, input: &InputOptions) {
    if let Some(path) = &input.input_file {
        settings.input_path = PathBuf::from(path);
    }
    if let Some(encoding) = &input.encoding {
        settings.encoding = encoding.clone();
    }
    if input.mmap {
        settings.use_mmap = true;
    }
    if let Some(workers) = input.max_workers {
        settings.max_workers = workers;
    }
}

fn load_and_normalize(settings: &Settings, quiet: bool) -> Result<PipelineOutput> {
    info!("Input file: {}", settings.input_path.display());

    let progress = ProgressReporter::new_spinner("Loading waste report...", quiet);
    let reader =
        WasteReportReader::with_encoding(&settings.encoding)?.with_mmap(settings.use_mmap);
    debug!("Decoding input as {}", reader.encoding_name());

    let raw = reader.read_table(&settings.input_path)?;
    let output = WastePipeline::new(settings.max_workers).run(raw, Some(&progress))?;

    progress.finish_with_message(&format!("Normalized {} records", output.table.len()));
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_overrides() {
        let mut settings = Settings::default();
        let input = InputOptions {
            input_file: Some(PathBuf::from("2019.csv")),
            encoding: Some("utf-8".to_string()),
            mmap: true,
            max_workers: Some(3),
            ..Default::default()
        };

        apply_input_overrides(&mut settings, &input);

        assert_eq!(settings.input_path, PathBuf::from("2019.csv"));
        assert_eq!(settings.encoding, "utf-8");
        assert!(settings.use_mmap);
        assert_eq!(settings.max_workers, 3);
    }
}
