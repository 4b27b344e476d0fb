/// Positional sub-fields of a French IBAN, as printed on a RIB.
///
/// Offsets are byte positions into the whitespace-stripped IBAN: the two
/// country letters and two check digits come first, then bank code [4,9),
/// branch code [9,14), account number [14,25) and national check key
/// [25,27). A short IBAN yields whatever characters exist in each range,
/// possibly nothing; no padding and no error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RibParts {
    pub bank_code: String,
    pub branch_code: String,
    pub account_number: String,
    pub check_key: String,
}

const BANK_CODE: (usize, usize) = (4, 9);
const BRANCH_CODE: (usize, usize) = (9, 14);
const ACCOUNT_NUMBER: (usize, usize) = (14, 25);
const CHECK_KEY: (usize, usize) = (25, 27);

impl RibParts {
    /// Derives the sub-fields from a display-formatted (or raw) IBAN.
    pub fn from_iban(iban: &str) -> Self {
        let raw: String = iban.chars().filter(|ch| !ch.is_whitespace()).collect();
        Self {
            bank_code: slice(&raw, BANK_CODE),
            branch_code: slice(&raw, BRANCH_CODE),
            account_number: slice(&raw, ACCOUNT_NUMBER),
            check_key: slice(&raw, CHECK_KEY),
        }
    }
}

fn slice(raw: &str, (start, end): (usize, usize)) -> String {
    let end = end.min(raw.len());
    if start >= end {
        return String::new();
    }
    raw.get(start..end).unwrap_or("").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_length_iban_splits_at_fixed_offsets() {
        let parts = RibParts::from_iban("FR7630004000050012345678901");
        assert_eq!(parts.bank_code, "30004");
        assert_eq!(parts.branch_code, "00050");
        assert_eq!(parts.account_number, "00123456789");
        assert_eq!(parts.check_key, "01");
    }

    #[test]
    fn formatted_iban_derives_the_same_as_raw() {
        let raw = RibParts::from_iban("FR7630004000050012345678901");
        let formatted = RibParts::from_iban("FR76 3000 4000 0500 1234 5678 901");
        assert_eq!(raw, formatted);
    }

    #[test]
    fn short_iban_yields_partial_or_empty_fields() {
        let parts = RibParts::from_iban("FR76300");
        assert_eq!(parts.bank_code, "300");
        assert_eq!(parts.branch_code, "");
        assert_eq!(parts.account_number, "");
        assert_eq!(parts.check_key, "");

        let parts = RibParts::from_iban("FR7630004000050012");
        assert_eq!(parts.bank_code, "30004");
        assert_eq!(parts.branch_code, "00050");
        assert_eq!(parts.account_number, "0012");
        assert_eq!(parts.check_key, "");
    }

    #[test]
    fn empty_iban_yields_all_empty_fields() {
        let parts = RibParts::from_iban("");
        assert_eq!(parts.bank_code, "");
        assert_eq!(parts.branch_code, "");
        assert_eq!(parts.account_number, "");
        assert_eq!(parts.check_key, "");
    }
}
