/// Sentinel bank choice: the bank is not in the fixed list and the user
/// supplies the name (and optionally a logo) themselves.
pub const OTHER_BANK: &str = "AUTRE";

pub const BANKS: &[&str] = &[
    "BNP Paribas",
    "Société Générale",
    "Crédit Agricole",
    "Crédit Mutuel",
    "CIC",
    "Banque Populaire",
    "Caisse d'Épargne",
    "La Banque Postale",
    "LCL",
    "HSBC",
    "Boursorama Banque",
    "Fortuneo",
    "Hello bank!",
    "N26",
    "Revolut",
    OTHER_BANK,
];

const BANK_LOGOS: &[(&str, &str)] = &[
    ("BNP Paribas", "https://logo.clearbit.com/bnpparibas.com"),
    ("Société Générale", "https://logo.clearbit.com/societegenerale.fr"),
    ("Crédit Agricole", "https://logo.clearbit.com/credit-agricole.fr"),
    ("Crédit Mutuel", "https://logo.clearbit.com/creditmutuel.fr"),
    ("CIC", "https://logo.clearbit.com/cic.fr"),
    ("Banque Populaire", "https://logo.clearbit.com/banquepopulaire.fr"),
    ("Caisse d'Épargne", "https://logo.clearbit.com/caisse-epargne.fr"),
    ("La Banque Postale", "https://logo.clearbit.com/labanquepostale.fr"),
    ("LCL", "https://logo.clearbit.com/lcl.fr"),
    ("HSBC", "https://logo.clearbit.com/hsbc.fr"),
    ("Boursorama Banque", "https://logo.clearbit.com/boursorama.com"),
    ("Fortuneo", "https://logo.clearbit.com/fortuneo.fr"),
    ("Hello bank!", "https://logo.clearbit.com/hellobank.fr"),
    ("N26", "https://logo.clearbit.com/n26.com"),
    ("Revolut", "https://logo.clearbit.com/revolut.com"),
];

pub fn bank_logo(bank: &str) -> Option<&'static str> {
    BANK_LOGOS
        .iter()
        .find(|(name, _)| *name == bank)
        .map(|(_, url)| *url)
}

pub fn is_known_bank(bank: &str) -> bool {
    BANKS.iter().any(|name| *name == bank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_listed_but_has_no_logo() {
        assert!(is_known_bank(OTHER_BANK));
        assert_eq!(bank_logo(OTHER_BANK), None);
    }

    #[test]
    fn every_non_sentinel_bank_has_a_logo_entry() {
        for bank in BANKS.iter().filter(|bank| **bank != OTHER_BANK) {
            assert!(bank_logo(bank).is_some(), "missing logo for {bank}");
        }
    }

    #[test]
    fn unknown_bank_has_no_logo() {
        assert!(!is_known_bank("Banque Imaginaire"));
        assert_eq!(bank_logo("Banque Imaginaire"), None);
    }
}
