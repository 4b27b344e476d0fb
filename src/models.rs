use crate::banks::OTHER_BANK;

/// One RIB document to produce. `iban` and `bic` always hold the
/// display-formatted strings (grouped, uppercased); the raw form is derived
/// on demand. `address` is newline-delimited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RibData {
    pub bank: String,
    pub custom_bank_name: String,
    /// Data URL of an uploaded image, or a URL from the bank logo lookup.
    pub bank_logo: Option<String>,
    pub iban: String,
    pub bic: String,
    pub holder_name: String,
    pub address: String,
}

impl RibData {
    /// Bank name printed on the document: the custom name when the
    /// sentinel bank is selected, the selected bank otherwise.
    pub fn display_bank_name(&self) -> &str {
        if self.bank == OTHER_BANK {
            &self.custom_bank_name
        } else {
            &self.bank
        }
    }

    /// A document can be exported once the bank is chosen (with a custom
    /// name when the sentinel is selected) and IBAN, BIC and holder are
    /// filled in. The address stays optional.
    pub fn is_export_ready(&self) -> bool {
        !self.bank.is_empty()
            && (self.bank != OTHER_BANK || !self.custom_bank_name.is_empty())
            && !self.iban.is_empty()
            && !self.bic.is_empty()
            && !self.holder_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> RibData {
        RibData {
            bank: "LCL".to_string(),
            custom_bank_name: String::new(),
            bank_logo: None,
            iban: "FR76 3000 4000 0500 1234 5678 901".to_string(),
            bic: "LCLFRPPXXX".to_string(),
            holder_name: "Jean Dupont".to_string(),
            address: "123 Rue de la République\n75001 Paris".to_string(),
        }
    }

    #[test]
    fn filled_known_bank_is_ready() {
        assert!(filled().is_export_ready());
    }

    #[test]
    fn sentinel_bank_requires_custom_name() {
        let mut data = filled();
        data.bank = OTHER_BANK.to_string();
        assert!(!data.is_export_ready());
        data.custom_bank_name = "Ma Banque Personnelle".to_string();
        assert!(data.is_export_ready());
    }

    #[test]
    fn missing_required_fields_block_readiness() {
        let clears: [fn(&mut RibData); 4] = [
            |data| data.bank.clear(),
            |data| data.iban.clear(),
            |data| data.bic.clear(),
            |data| data.holder_name.clear(),
        ];
        for clear in clears {
            let mut data = filled();
            clear(&mut data);
            assert!(!data.is_export_ready());
        }
        let mut data = filled();
        data.address.clear();
        assert!(data.is_export_ready(), "address is optional");
    }

    #[test]
    fn display_bank_name_follows_the_sentinel() {
        let mut data = filled();
        assert_eq!(data.display_bank_name(), "LCL");
        data.bank = OTHER_BANK.to_string();
        data.custom_bank_name = "Ma Banque".to_string();
        assert_eq!(data.display_bank_name(), "Ma Banque");
    }
}
