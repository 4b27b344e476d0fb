use crate::banks::{bank_logo, OTHER_BANK};
use crate::format::{format_bic, format_iban};
use crate::models::RibData;

/// Single source of truth for the form: the document record, the display
/// name of an uploaded logo file, and the message of the last failed
/// export. Any field edit clears the pending error.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    data: RibData,
    logo_file_name: Option<String>,
    error: Option<String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &RibData {
        &self.data
    }

    pub fn logo_file_name(&self) -> Option<&str> {
        self.logo_file_name.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn is_export_ready(&self) -> bool {
        self.data.is_export_ready()
    }

    /// The one cross-field transition: the logo is always replaced from
    /// the lookup table, and choosing a concrete bank discards any custom
    /// name and uploaded logo. Switching back to the sentinel never
    /// restores what was discarded.
    pub fn set_bank(&mut self, bank: &str) {
        self.touch();
        self.data.bank = bank.to_string();
        self.data.bank_logo = bank_logo(bank).map(str::to_string);
        if bank != OTHER_BANK {
            self.data.custom_bank_name.clear();
            self.logo_file_name = None;
        }
    }

    pub fn set_custom_bank_name(&mut self, name: &str) {
        self.touch();
        self.data.custom_bank_name = name.to_string();
    }

    pub fn set_iban(&mut self, input: &str) {
        self.touch();
        self.data.iban = format_iban(input);
    }

    pub fn set_bic(&mut self, input: &str) {
        self.touch();
        self.data.bic = format_bic(input);
    }

    pub fn set_holder_name(&mut self, name: &str) {
        self.touch();
        self.data.holder_name = name.to_string();
    }

    pub fn set_address(&mut self, address: &str) {
        self.touch();
        self.data.address = address.to_string();
    }

    /// Replaces the logo with an uploaded image payload (a data URL) and
    /// records its display filename.
    pub fn attach_logo(&mut self, data_url: String, file_name: String) {
        self.touch();
        self.data.bank_logo = Some(data_url);
        self.logo_file_name = Some(file_name);
    }

    /// Back to the empty initial record, after a successful export.
    pub fn reset(&mut self) {
        self.data = RibData::default();
        self.logo_file_name = None;
    }

    fn touch(&mut self) {
        self.error = None;
    }
}
