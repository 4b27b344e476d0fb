mod banks;
mod batch;
mod export;
mod files;
mod form;
mod format;
mod logging;
mod models;
mod pdf;
mod raster;
mod render;
mod rib;
mod util;

use banks::{is_known_bank, BANKS, OTHER_BANK};
use clap::{Parser, Subcommand};
use export::{ExportStatus, Exporter, EXPORT_FILENAME};
use files::{display_file_name, read_logo_data_url, DiskSaver};
use form::FormState;
use pdf::PdfPackager;
use raster::BitmapRasterizer;
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "rib-gen")]
#[command(about = "RIB (relevé d'identité bancaire) PDF generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate RIB.pdf from the field flags
    Export(ExportArgs),
    /// Print the live preview of the form to the terminal
    Preview(PreviewArgs),
    /// Generate one PDF per row of a CSV form file
    Batch(BatchArgs),
    /// List the known banks
    Banks,
}

#[derive(Parser)]
struct FieldArgs {
    /// Bank from the fixed list, or AUTRE for a custom bank
    #[arg(long, default_value = "")]
    bank: String,
    /// Custom bank name, required with --bank AUTRE
    #[arg(long, default_value = "")]
    bank_name: String,
    /// Local logo image embedded into the document
    #[arg(long)]
    logo: Option<PathBuf>,
    #[arg(long, default_value = "")]
    iban: String,
    #[arg(long, default_value = "")]
    bic: String,
    /// Account holder full name
    #[arg(long, default_value = "")]
    holder: String,
    /// Address line, repeatable
    #[arg(long = "address-line")]
    address_lines: Vec<String>,
}

#[derive(Parser)]
struct ExportArgs {
    #[command(flatten)]
    fields: FieldArgs,
    #[arg(long, default_value = "data/output")]
    output_dir: PathBuf,
}

#[derive(Parser)]
struct PreviewArgs {
    #[command(flatten)]
    fields: FieldArgs,
}

#[derive(Parser)]
struct BatchArgs {
    #[arg(long, default_value = "data/forms.csv")]
    input: PathBuf,
    #[arg(long, default_value = "data/output")]
    output_dir: PathBuf,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    logging::init_logging("rib-gen")?;
    let cli = Cli::parse();
    match cli.command {
        Command::Export(args) => run_export(args),
        Command::Preview(args) => run_preview(args),
        Command::Batch(args) => run_batch(args),
        Command::Banks => run_banks(),
    }
}

fn run_export(args: ExportArgs) -> Result<(), String> {
    let mut form = build_form(&args.fields)?;
    ensure_ready(&form)?;
    if let Some(name) = form.logo_file_name() {
        log::info!("Using logo file {name}");
    }

    let rasterizer = BitmapRasterizer::new()?;
    let packager = PdfPackager;
    let saver = DiskSaver::new(&args.output_dir);
    let mut exporter = Exporter::new();

    let start = Instant::now();
    match exporter.export(&mut form, &rasterizer, &packager, &saver, EXPORT_FILENAME) {
        ExportStatus::Completed => {
            emit_info_line(&format!(
                "PDF output: {}",
                saver.target(EXPORT_FILENAME).display()
            ));
            emit_info_line(&format!("Export time: {} ms", start.elapsed().as_millis()));
            Ok(())
        }
        ExportStatus::Failed => Err(form.error().unwrap_or("export failed").to_string()),
        ExportStatus::Rejected => Err("export rejected: form is not ready".to_string()),
    }
}

fn run_preview(args: PreviewArgs) -> Result<(), String> {
    let form = build_form(&args.fields)?;
    for line in render::preview_lines(form.data()) {
        println!("{line}");
    }
    Ok(())
}

fn run_batch(args: BatchArgs) -> Result<(), String> {
    let input = File::open(&args.input)
        .map_err(|err| format!("cannot open {}: {}", args.input.display(), err))?;

    let rasterizer = BitmapRasterizer::new()?;
    let packager = PdfPackager;
    let saver = DiskSaver::new(&args.output_dir);

    let start = Instant::now();
    let summary = batch::export_batch(input, &rasterizer, &packager, &saver)?;

    emit_info_line(&format!(
        "Batch: input={} output_dir={}",
        args.input.display(),
        args.output_dir.display()
    ));
    emit_info_line(&format!(
        "Batch rows: total={} exported={} skipped={} failed={}",
        summary.total_rows, summary.exported, summary.skipped, summary.failed
    ));
    emit_info_line(&format!("Batch time: {} ms", start.elapsed().as_millis()));

    if summary.failed > 0 {
        return Err(format!(
            "batch finished with {} failed row(s)",
            summary.failed
        ));
    }
    Ok(())
}

fn run_banks() -> Result<(), String> {
    for bank in BANKS {
        if *bank == OTHER_BANK {
            println!("{bank} (nom et logo libres)");
        } else if banks::bank_logo(bank).is_some() {
            println!("{bank} (logo fourni)");
        } else {
            println!("{bank}");
        }
    }
    Ok(())
}

fn build_form(fields: &FieldArgs) -> Result<FormState, String> {
    let mut form = FormState::new();
    if !fields.bank.is_empty() {
        if !is_known_bank(&fields.bank) {
            return Err(format!(
                "unknown bank: {} (see `rib-gen banks`, or use {OTHER_BANK} with --bank-name)",
                fields.bank
            ));
        }
        form.set_bank(&fields.bank);
    }
    if !fields.bank_name.is_empty() {
        if fields.bank != OTHER_BANK {
            return Err(format!(
                "--bank-name only applies with --bank {OTHER_BANK}"
            ));
        }
        form.set_custom_bank_name(&fields.bank_name);
    }
    if let Some(path) = &fields.logo {
        let data_url = read_logo_data_url(path)?;
        form.attach_logo(data_url, display_file_name(path));
    }
    form.set_iban(&fields.iban);
    form.set_bic(&fields.bic);
    form.set_holder_name(&fields.holder);
    form.set_address(&fields.address_lines.join("\n"));
    Ok(form)
}

fn ensure_ready(form: &FormState) -> Result<(), String> {
    if form.is_export_ready() {
        return Ok(());
    }
    let data = form.data();
    let mut missing = Vec::new();
    if data.bank.is_empty() {
        missing.push("--bank");
    }
    if data.bank == OTHER_BANK && data.custom_bank_name.is_empty() {
        missing.push("--bank-name");
    }
    if data.iban.is_empty() {
        missing.push("--iban");
    }
    if data.bic.is_empty() {
        missing.push("--bic");
    }
    if data.holder_name.is_empty() {
        missing.push("--holder");
    }
    Err(format!("missing required fields: {}", missing.join(", ")))
}

fn emit_info_line(message: &str) {
    if log::log_enabled!(log::Level::Info) {
        log::info!("{}", message);
    } else {
        println!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> FieldArgs {
        FieldArgs {
            bank: String::new(),
            bank_name: String::new(),
            logo: None,
            iban: String::new(),
            bic: String::new(),
            holder: String::new(),
            address_lines: Vec::new(),
        }
    }

    #[test]
    fn custom_name_is_refused_for_a_non_sentinel_bank() {
        let mut args = fields();
        args.bank = "LCL".to_string();
        args.bank_name = "Autre Nom".to_string();
        assert!(build_form(&args).is_err());
    }

    #[test]
    fn custom_name_is_accepted_with_the_sentinel_bank() {
        let mut args = fields();
        args.bank = OTHER_BANK.to_string();
        args.bank_name = "Ma Banque Personnelle".to_string();
        let form = build_form(&args).unwrap();
        assert_eq!(form.data().custom_bank_name, "Ma Banque Personnelle");
    }

    #[test]
    fn unknown_bank_is_refused() {
        let mut args = fields();
        args.bank = "Banque Imaginaire".to_string();
        assert!(build_form(&args).is_err());
    }

    #[test]
    fn missing_fields_are_listed_by_flag() {
        let mut args = fields();
        args.bank = "LCL".to_string();
        let form = build_form(&args).unwrap();
        let message = ensure_ready(&form).unwrap_err();
        assert!(message.contains("--iban"));
        assert!(message.contains("--bic"));
        assert!(message.contains("--holder"));
        assert!(!message.contains("--bank-name"));
    }
}
