/// Maximum number of raw characters kept from an IBAN entry (French IBANs
/// are exactly 27 characters long).
pub const IBAN_MAX_LEN: usize = 27;
/// Maximum number of raw characters kept from a BIC entry.
pub const BIC_MAX_LEN: usize = 11;
/// IBAN display grouping width.
pub const IBAN_GROUP_LEN: usize = 4;

fn normalize(input: &str, max_len: usize) -> String {
    input
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_uppercase())
        .take(max_len)
        .collect()
}

/// Display formatter applied to every IBAN edit: keep the first 27
/// alphanumeric characters, uppercased, regrouped with a space after every
/// 4 characters. The last group may be shorter; empty input stays empty.
pub fn format_iban(input: &str) -> String {
    let normalized = normalize(input, IBAN_MAX_LEN);
    let groups: Vec<&str> = normalized
        .as_bytes()
        .chunks(IBAN_GROUP_LEN)
        // Normalization leaves ASCII only, so chunk boundaries are valid.
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect();
    groups.join(" ")
}

/// Display formatter applied to every BIC edit: first 11 alphanumeric
/// characters, uppercased, no grouping.
pub fn format_bic(input: &str) -> String {
    normalize(input, BIC_MAX_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iban_strips_and_groups() {
        assert_eq!(
            format_iban("fr76 3000-4000_0500.0012 3456 789"),
            "FR76 3000 4000 0500 0012 3456 789"
        );
    }

    #[test]
    fn iban_truncates_to_27_raw_characters() {
        let long = "FR763000400005000123456789012345";
        let formatted = format_iban(long);
        let raw: String = formatted.chars().filter(|ch| *ch != ' ').collect();
        assert_eq!(raw.len(), IBAN_MAX_LEN);
        assert_eq!(raw, "FR7630004000050001234567890");
    }

    #[test]
    fn iban_groups_are_at_most_four_wide() {
        for input in ["", "F", "FR76", "FR7630", "FR76300040000500012345678"] {
            let formatted = format_iban(input);
            for group in formatted.split(' ') {
                assert!(group.len() <= IBAN_GROUP_LEN, "group {group:?} too wide");
                assert!(group.chars().all(|ch| ch.is_ascii_alphanumeric()));
            }
        }
    }

    #[test]
    fn iban_empty_input_yields_empty_output() {
        assert_eq!(format_iban(""), "");
        assert_eq!(format_iban(" .-/"), "");
    }

    #[test]
    fn bic_strips_uppercases_and_truncates() {
        assert_eq!(format_bic("bnpa fr pp xxx 123"), "BNPAFRPPXXX");
        assert_eq!(format_bic("agrifrpp"), "AGRIFRPP");
        assert_eq!(format_bic(""), "");
    }

    #[test]
    fn formatters_are_idempotent() {
        for input in [
            "fr7630004000050001234567890",
            "FR76 3000 4000 0500 0123 4567 890",
            "short",
            "",
            "bnpafrppxxx",
        ] {
            let iban = format_iban(input);
            assert_eq!(format_iban(&iban), iban);
            let bic = format_bic(input);
            assert_eq!(format_bic(&bic), bic);
        }
    }
}
