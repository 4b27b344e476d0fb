use crate::banks::{is_known_bank, OTHER_BANK};
use crate::export::{DocumentPackager, ExportStatus, Exporter, FileSaver, SurfaceRasterizer};
use crate::files::{display_file_name, read_logo_data_url};
use crate::form::FormState;
use crate::util::slugify;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// One CSV row of the batch input. Only `bank` is mandatory in the
/// header; everything else defaults to empty and the usual readiness rule
/// decides whether the row exports.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchRow {
    pub bank: String,
    #[serde(default)]
    pub bank_name: String,
    /// Local path to a logo image, embedded as a data URL when readable.
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub iban: String,
    #[serde(default)]
    pub bic: String,
    #[serde(default)]
    pub holder_name: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub total_rows: usize,
    pub exported: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Exports one PDF per ready row. Rows that fail readiness are skipped
/// with a warning; collaborator failures are counted but do not abort the
/// run, matching the retryable single-export behavior.
pub fn export_batch<R, P, S>(
    input: impl Read,
    rasterizer: &R,
    packager: &P,
    saver: &S,
) -> Result<BatchSummary, String>
where
    R: SurfaceRasterizer,
    P: DocumentPackager,
    S: FileSaver,
{
    let mut reader = csv::Reader::from_reader(input);
    let mut exporter = Exporter::new();
    let mut summary = BatchSummary::default();

    for (index, result) in reader.deserialize().enumerate() {
        let row: BatchRow = result.map_err(|err| err.to_string())?;
        summary.total_rows += 1;
        let row_number = index + 1;

        if !row.bank.is_empty() && !is_known_bank(&row.bank) {
            log::warn!("row {row_number}: unknown bank '{}', skipped", row.bank);
            summary.skipped += 1;
            continue;
        }

        let mut form = form_from_row(&row, row_number);
        if !form.is_export_ready() {
            log::warn!("row {row_number}: required fields missing, skipped");
            summary.skipped += 1;
            continue;
        }

        let filename = row_filename(row_number, form.data().display_bank_name(), &form.data().holder_name);
        match exporter.export(&mut form, rasterizer, packager, saver, &filename) {
            ExportStatus::Completed => {
                log::info!("row {row_number}: exported {filename}");
                summary.exported += 1;
            }
            ExportStatus::Failed => {
                log::warn!(
                    "row {row_number}: {}",
                    form.error().unwrap_or("export failed")
                );
                summary.failed += 1;
            }
            ExportStatus::Rejected => {
                summary.skipped += 1;
            }
        }
    }

    Ok(summary)
}

fn form_from_row(row: &BatchRow, row_number: usize) -> FormState {
    let mut form = FormState::new();
    form.set_bank(&row.bank);
    if !row.bank_name.is_empty() {
        if row.bank == OTHER_BANK {
            form.set_custom_bank_name(&row.bank_name);
        } else {
            log::warn!("row {row_number}: bank_name only applies with bank {OTHER_BANK}, ignored");
        }
    }
    if let Some(logo) = row.logo.as_deref().filter(|logo| !logo.is_empty()) {
        let path = Path::new(logo);
        match read_logo_data_url(path) {
            Ok(data_url) => form.attach_logo(data_url, display_file_name(path)),
            Err(err) => log::warn!("row {row_number}: logo ignored: {err}"),
        }
    }
    form.set_iban(&row.iban);
    form.set_bic(&row.bic);
    form.set_holder_name(&row.holder_name);
    form.set_address(&row.address);
    form
}

fn row_filename(row_number: usize, bank_name: &str, holder_name: &str) -> String {
    let base = if holder_name.is_empty() { bank_name } else { holder_name };
    let slug = slugify(base);
    if slug.is_empty() {
        format!("RIB_{row_number}.pdf")
    } else {
        format!("RIB_{row_number}_{slug}.pdf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{PageGeometry, RasterOptions};
    use crate::render::Surface;
    use image::RgbImage;
    use std::cell::RefCell;

    struct OkRasterizer;
    impl SurfaceRasterizer for OkRasterizer {
        fn rasterize(&self, _: &Surface, _: &RasterOptions) -> Result<RgbImage, String> {
            Ok(RgbImage::new(2, 2))
        }
    }

    struct OkPackager;
    impl DocumentPackager for OkPackager {
        fn package(&self, _: &RgbImage, _: PageGeometry) -> Result<Vec<u8>, String> {
            Ok(b"%PDF".to_vec())
        }
    }

    struct RecordingSaver {
        saved: RefCell<Vec<String>>,
    }
    impl FileSaver for RecordingSaver {
        fn save(&self, filename: &str, _: &[u8]) -> Result<(), String> {
            self.saved.borrow_mut().push(filename.to_string());
            Ok(())
        }
    }

    const CSV: &str = "\
bank,bank_name,logo,iban,bic,holder_name,address
LCL,,,FR7630004000050012345678901,LCLFRPPXXX,Jean Dupont,75001 Paris
AUTRE,,,FR7630004000050012345678901,LCLFRPPXXX,Sans Banque,
AUTRE,Ma Banque,,FR7612345000050012345678901,ABCDFRPP,Marie Martin,
";

    #[test]
    fn ready_rows_export_and_unready_rows_are_skipped() {
        let saver = RecordingSaver {
            saved: RefCell::new(Vec::new()),
        };
        let summary =
            export_batch(CSV.as_bytes(), &OkRasterizer, &OkPackager, &saver).unwrap();

        assert_eq!(summary.total_rows, 3);
        assert_eq!(summary.exported, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 0);
        let saved = saver.saved.borrow();
        assert_eq!(saved.as_slice(), ["RIB_1_jean-dupont.pdf", "RIB_3_marie-martin.pdf"]);
    }

    #[test]
    fn collaborator_failure_is_counted_but_does_not_abort() {
        struct FailingPackager;
        impl DocumentPackager for FailingPackager {
            fn package(&self, _: &RgbImage, _: PageGeometry) -> Result<Vec<u8>, String> {
                Err("out of ink".to_string())
            }
        }
        let saver = RecordingSaver {
            saved: RefCell::new(Vec::new()),
        };
        let summary =
            export_batch(CSV.as_bytes(), &OkRasterizer, &FailingPackager, &saver).unwrap();
        assert_eq!(summary.exported, 0);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.skipped, 1);
        assert!(saver.saved.borrow().is_empty());
    }

    #[test]
    fn unknown_bank_rows_are_skipped_without_exporting() {
        let csv = "\
bank,bank_name,logo,iban,bic,holder_name,address
Banque Imaginaire,,,FR7630004000050012345678901,LCLFRPPXXX,Jean Dupont,
lcl,,,FR7630004000050012345678901,LCLFRPPXXX,Jean Dupont,
LCL,,,FR7630004000050012345678901,LCLFRPPXXX,Jean Dupont,
";
        let saver = RecordingSaver {
            saved: RefCell::new(Vec::new()),
        };
        let summary = export_batch(csv.as_bytes(), &OkRasterizer, &OkPackager, &saver).unwrap();
        assert_eq!(summary.total_rows, 3);
        assert_eq!(summary.exported, 1);
        assert_eq!(summary.skipped, 2);
        assert_eq!(saver.saved.borrow().as_slice(), ["RIB_3_jean-dupont.pdf"]);
    }

    #[test]
    fn bank_name_is_ignored_for_non_sentinel_banks() {
        let csv = "\
bank,bank_name,logo,iban,bic,holder_name,address
LCL,Autre Nom,,FR7630004000050012345678901,LCLFRPPXXX,Jean Dupont,
";
        let saver = RecordingSaver {
            saved: RefCell::new(Vec::new()),
        };
        let summary = export_batch(csv.as_bytes(), &OkRasterizer, &OkPackager, &saver).unwrap();
        assert_eq!(summary.exported, 1);
    }

    #[test]
    fn malformed_csv_aborts_with_an_error() {
        let broken = "bank,iban\nLCL"; // truncated record
        let saver = RecordingSaver {
            saved: RefCell::new(Vec::new()),
        };
        assert!(export_batch(broken.as_bytes(), &OkRasterizer, &OkPackager, &saver).is_err());
    }
}
