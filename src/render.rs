use crate::models::RibData;
use crate::rib::RibParts;

/// Logical pixel size of the print template (A4 landscape at 72 dpi).
pub const TEMPLATE_WIDTH: u32 = 842;
pub const TEMPLATE_HEIGHT: u32 = 595;

pub const TITLE: &str = "RELEVÉ D'IDENTITÉ BANCAIRE";

const FOOTER_LINE_1: &str = "Ce relevé est destiné à être remis, sur leur demande, à vos créanciers ou débiteurs appelés à faire inscrire des opérations à votre compte (virement, paiement de quittance, etc.).";
const FOOTER_LINE_2: &str = "Son utilisation vous garantit le bon enregistrement des opérations en cause et vous évite ainsi des réclamations pour erreurs ou retards d'imputation.";

// Placeholders shown by the live preview when derived fields are empty.
// The print template never substitutes these: the exported document must
// not fabricate digits.
const PLACEHOLDER_BANK_CODE: &str = "00000";
const PLACEHOLDER_BRANCH_CODE: &str = "00000";
const PLACEHOLDER_ACCOUNT_NUMBER: &str = "00000000000";
const PLACEHOLDER_CHECK_KEY: &str = "00";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };
pub const BLACK: Color = Color { r: 17, g: 24, b: 39 };
pub const ORANGE: Color = Color { r: 249, g: 115, b: 22 };
pub const GRAY: Color = Color { r: 55, g: 65, b: 81 };
pub const LIGHT_GRAY: Color = Color { r: 107, g: 114, b: 128 };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Mono,
    MonoBold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// One draw operation on the print surface. Coordinates are logical
/// pixels with the origin at the top-left; text `y` is the top of the
/// line box and `x` the anchor for the chosen alignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Text {
        x: f32,
        y: f32,
        px: f32,
        font: FontStyle,
        color: Color,
        align: Align,
        text: String,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        data_url: String,
    },
}

/// The renderable print surface handed to the rasterizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
    pub items: Vec<Item>,
}

impl Surface {
    fn text(&mut self, x: f32, y: f32, px: f32, font: FontStyle, color: Color, text: &str) {
        self.items.push(Item::Text {
            x,
            y,
            px,
            font,
            color,
            align: Align::Left,
            text: text.to_string(),
        });
    }

    fn text_aligned(
        &mut self,
        x: f32,
        y: f32,
        px: f32,
        font: FontStyle,
        color: Color,
        align: Align,
        text: &str,
    ) {
        self.items.push(Item::Text {
            x,
            y,
            px,
            font,
            color,
            align,
            text: text.to_string(),
        });
    }

    fn fill(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.items.push(Item::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn outline(&mut self, x: f32, y: f32, width: f32, height: f32, thickness: f32, color: Color) {
        self.fill(x, y, width, thickness, color);
        self.fill(x, y + height - thickness, width, thickness, color);
        self.fill(x, y, thickness, height, color);
        self.fill(x + width - thickness, y, thickness, height, color);
    }
}

const MARGIN: f32 = 40.0;
const CONTENT_WIDTH: f32 = TEMPLATE_WIDTH as f32 - 2.0 * MARGIN;
const BORDER: f32 = 2.0;
const CELL_PAD: f32 = 8.0;

/// Builds the print template surface for the exported document. Empty
/// derived fields stay empty here; see [`preview_lines`] for the
/// placeholder-substituting live preview.
pub fn print_template(data: &RibData) -> Surface {
    let parts = RibParts::from_iban(&data.iban);
    let mut surface = Surface {
        width: TEMPLATE_WIDTH,
        height: TEMPLATE_HEIGHT,
        items: Vec::new(),
    };

    // Header: logo box on the left, title right-aligned.
    if let Some(logo) = data.bank_logo.as_deref() {
        surface.items.push(Item::Image {
            x: MARGIN,
            y: MARGIN,
            width: 192.0,
            height: 96.0,
            data_url: logo.to_string(),
        });
    }
    surface.text_aligned(
        TEMPLATE_WIDTH as f32 - MARGIN,
        MARGIN + 4.0,
        18.0,
        FontStyle::Bold,
        BLACK,
        Align::Right,
        TITLE,
    );

    // Section rule, then bank and holder columns.
    let section_top = 184.0;
    surface.fill(MARGIN, section_top, CONTENT_WIDTH, BORDER, ORANGE);

    let col_gap = 64.0;
    let col_width = (CONTENT_WIDTH - col_gap) / 2.0;
    let right_col = MARGIN + col_width + col_gap;

    surface.text(MARGIN, section_top + 12.0, 14.0, FontStyle::Bold, ORANGE, "BANQUE");
    let bank_name = non_empty_or(data.display_bank_name(), "...");
    surface.text(MARGIN, section_top + 36.0, 18.0, FontStyle::Bold, BLACK, bank_name);

    surface.text(right_col, section_top + 12.0, 14.0, FontStyle::Bold, ORANGE, "TITULAIRE");
    let holder = non_empty_or(&data.holder_name, "...");
    surface.text(right_col, section_top + 36.0, 14.0, FontStyle::Bold, BLACK, holder);
    let mut line_y = section_top + 56.0;
    for line in data.address.split('\n').filter(|line| !line.is_empty()) {
        surface.text(right_col, line_y, 14.0, FontStyle::Regular, BLACK, line);
        line_y += 18.0;
    }

    // Account parts table: code banque / code guichet / n° de compte / clé.
    let table_top = 320.0;
    let row_height = 48.0;
    let widths = fr_widths(CONTENT_WIDTH, &[1.5, 1.5, 3.0, 1.0]);
    let labels = ["Code banque", "Code guichet", "N° de compte", "Clé"];
    let values = [
        parts.bank_code.as_str(),
        parts.branch_code.as_str(),
        parts.account_number.as_str(),
        parts.check_key.as_str(),
    ];
    surface.outline(MARGIN, table_top, CONTENT_WIDTH, row_height, BORDER, BLACK);
    let mut x = MARGIN;
    for (index, ((label, value), width)) in labels.iter().zip(values).zip(&widths).enumerate() {
        if index > 0 {
            surface.fill(x, table_top, BORDER, row_height, BLACK);
        }
        surface.text(x + CELL_PAD, table_top + 6.0, 11.0, FontStyle::Regular, GRAY, label);
        surface.text(x + CELL_PAD, table_top + 24.0, 15.0, FontStyle::MonoBold, ORANGE, value);
        x += width;
    }

    // IBAN / BIC table just below.
    let iban_top = table_top + row_height + 4.0;
    let iban_width = CONTENT_WIDTH * 2.0 / 3.0;
    surface.outline(MARGIN, iban_top, CONTENT_WIDTH, row_height, BORDER, BLACK);
    surface.fill(MARGIN + iban_width, iban_top, BORDER, row_height, BLACK);
    surface.text(
        MARGIN + CELL_PAD,
        iban_top + 6.0,
        11.0,
        FontStyle::Regular,
        GRAY,
        "IBAN (International bank account number)",
    );
    surface.text(
        MARGIN + CELL_PAD,
        iban_top + 24.0,
        15.0,
        FontStyle::Mono,
        BLACK,
        &data.iban,
    );
    surface.text(
        MARGIN + iban_width + CELL_PAD,
        iban_top + 6.0,
        11.0,
        FontStyle::Regular,
        GRAY,
        "BIC",
    );
    surface.text(
        MARGIN + iban_width + CELL_PAD,
        iban_top + 24.0,
        15.0,
        FontStyle::Mono,
        BLACK,
        &data.bic,
    );

    // Legal footer, centered.
    let center = TEMPLATE_WIDTH as f32 / 2.0;
    surface.text_aligned(center, 548.0, 8.0, FontStyle::Regular, LIGHT_GRAY, Align::Center, FOOTER_LINE_1);
    surface.text_aligned(center, 562.0, 8.0, FontStyle::Regular, LIGHT_GRAY, Align::Center, FOOTER_LINE_2);

    surface
}

/// Terminal rendition of the live preview. Empty derived fields show the
/// fixed zero placeholders and empty text fields show `...`, as the live
/// preview does; only the print template keeps them empty.
pub fn preview_lines(data: &RibData) -> Vec<String> {
    let parts = RibParts::from_iban(&data.iban);
    let bank_code = non_empty_or(&parts.bank_code, PLACEHOLDER_BANK_CODE);
    let branch_code = non_empty_or(&parts.branch_code, PLACEHOLDER_BRANCH_CODE);
    let account_number = non_empty_or(&parts.account_number, PLACEHOLDER_ACCOUNT_NUMBER);
    let check_key = non_empty_or(&parts.check_key, PLACEHOLDER_CHECK_KEY);

    let mut lines = Vec::new();
    lines.push(TITLE.to_string());
    lines.push(String::new());
    lines.push(format!("Banque      : {}", non_empty_or(data.display_bank_name(), "...")));
    lines.push(format!("Titulaire   : {}", non_empty_or(&data.holder_name, "...")));
    for line in data.address.split('\n').filter(|line| !line.is_empty()) {
        lines.push(format!("              {line}"));
    }
    lines.push(String::new());
    lines.push(format!(
        "Code banque: {bank_code}  Code guichet: {branch_code}  N° de compte: {account_number}  Clé: {check_key}"
    ));
    lines.push(format!("IBAN        : {}", non_empty_or(&data.iban, "...")));
    lines.push(format!("BIC         : {}", non_empty_or(&data.bic, "...")));
    lines
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

fn fr_widths(total: f32, fractions: &[f32]) -> Vec<f32> {
    let sum: f32 = fractions.iter().sum();
    fractions.iter().map(|fr| total * fr / sum).collect()
}
