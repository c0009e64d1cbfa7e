use bolivia_stats::config::AppConfig;
use bolivia_stats::error::AppError;
use bolivia_stats::export::{
    combined_csv, text_report, workbook_bytes, ExportBundle, ExportFormat,
};
use bolivia_stats::sections::section_view;
use chrono::Local;
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use tracing::info;

#[derive(ValueEnum, Debug, Clone, Copy)]
pub(crate) enum ExportFormatArg {
    Csv,
    Workbook,
    Report,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(value: ExportFormatArg) -> Self {
        match value {
            ExportFormatArg::Csv => ExportFormat::Csv,
            ExportFormatArg::Workbook => ExportFormat::Workbook,
            ExportFormatArg::Report => ExportFormat::Report,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Output format for the bundle
    #[arg(long, value_enum, default_value_t = ExportFormatArg::Csv)]
    pub(crate) format: ExportFormatArg,
    /// Directory the dated file is written into
    #[arg(long, default_value = ".")]
    pub(crate) out_dir: PathBuf,
}

/// The `summary` subcommand: metric cards per enabled section, stdout.
pub(crate) fn run_summary() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    println!("{} — {}", config.dashboard.title, config.dashboard.subtitle);

    for &section in &config.dashboard.sections {
        let view = section_view(section, None, false);
        println!();
        println!("== {} ==", view.label);
        for card in &view.metrics {
            println!("  {}: {} ({})", card.label, card.value, card.caption);
        }
    }
    Ok(())
}

/// The `export` subcommand: build the bundle and write one dated file.
pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let now = Local::now();
    let bundle = ExportBundle::for_dashboard(&config.dashboard, now.date_naive());
    let format: ExportFormat = args.format.into();

    let bytes = match format {
        ExportFormat::Csv => combined_csv(&bundle)
            .map_err(AppError::from)?
            .into_bytes(),
        ExportFormat::Workbook => workbook_bytes(&bundle).map_err(AppError::from)?,
        ExportFormat::Report => {
            text_report(&bundle, &config.dashboard, now.naive_local()).into_bytes()
        }
    };

    let path = args.out_dir.join(format.file_name(now.date_naive()));
    std::fs::write(&path, bytes)?;
    info!(path = %path.display(), "export written");
    println!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_writes_one_dated_csv() {
        let dir = tempfile::tempdir().expect("temp dir");
        let args = ExportArgs {
            format: ExportFormatArg::Csv,
            out_dir: dir.path().to_path_buf(),
        };
        run_export(args).expect("export succeeds");

        let mut entries = std::fs::read_dir(dir.path())
            .expect("directory reads")
            .map(|entry| entry.expect("entry reads").file_name())
            .collect::<Vec<_>>();
        assert_eq!(entries.len(), 1);

        let name = entries.pop().expect("one file");
        let name = name.to_string_lossy();
        assert!(name.starts_with("bolivia_datos_"));
        assert!(name.ends_with(".csv"));
    }
}
