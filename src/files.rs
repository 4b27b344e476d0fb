use crate::export::FileSaver;
use base64::{engine::general_purpose, Engine};
use std::fs;
use std::path::{Path, PathBuf};

/// Saves finished documents into a fixed output directory.
pub struct DiskSaver {
    dir: PathBuf,
}

impl DiskSaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn target(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

impl FileSaver for DiskSaver {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<(), String> {
        fs::create_dir_all(&self.dir).map_err(|err| err.to_string())?;
        fs::write(self.target(filename), bytes).map_err(|err| err.to_string())
    }
}

// Media types accepted by the original file picker.
fn media_type_for_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Reads a local image file into an embeddable `data:` URL. The only
/// filtering is the extension check, mirroring the accept filter of the
/// original file picker.
pub fn read_logo_data_url(path: &Path) -> Result<String, String> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let media_type = media_type_for_extension(&extension)
        .ok_or_else(|| format!("unsupported logo file type: {}", path.display()))?;
    let bytes =
        fs::read(path).map_err(|err| format!("cannot read logo {}: {}", path.display(), err))?;
    Ok(format!(
        "data:{media_type};base64,{}",
        general_purpose::STANDARD.encode(bytes)
    ))
}

/// Filename shown for an uploaded logo.
pub fn display_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_map_to_media_types() {
        assert_eq!(media_type_for_extension("png"), Some("image/png"));
        assert_eq!(media_type_for_extension("jpeg"), Some("image/jpeg"));
        assert_eq!(media_type_for_extension("svg"), Some("image/svg+xml"));
        assert_eq!(media_type_for_extension("pdf"), None);
    }

    #[test]
    fn logo_read_produces_a_data_url() {
        let path = std::env::temp_dir().join("rib_gen_logo_test.png");
        fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();
        let data_url = read_logo_data_url(&path).unwrap();
        fs::remove_file(&path).ok();
        assert!(data_url.starts_with("data:image/png;base64,"));
        assert_eq!(data_url, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn unsupported_extension_is_refused() {
        let path = Path::new("logo.txt");
        assert!(read_logo_data_url(path).is_err());
    }

    #[test]
    fn saver_writes_under_its_directory() {
        let dir = std::env::temp_dir().join("rib_gen_saver_test");
        let saver = DiskSaver::new(&dir);
        saver.save("RIB.pdf", b"%PDF-stub").unwrap();
        let written = fs::read(saver.target("RIB.pdf")).unwrap();
        fs::remove_dir_all(&dir).ok();
        assert_eq!(written, b"%PDF-stub");
    }
}
