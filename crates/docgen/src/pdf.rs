//! Painted PDF letter rendering.
//!
//! A4 portrait, builtin Helvetica fonts, manual line wrapping and page
//! breaks. The layout mirrors the docx renderer section for section.

use std::io::BufWriter;

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use chainletter_common::error::AppError;

use crate::{LETTER_TITLE, LetterData};

const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const MARGIN: f64 = 20.0;
const WRAP_COLUMNS: usize = 90;
const PT_TO_MM: f64 = 0.3528;

/// Render the letter as a PDF byte buffer.
pub fn render(letter: &LetterData) -> Result<Vec<u8>, AppError> {
    let (doc, page, layer) = PdfDocument::new(
        LETTER_TITLE,
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::Render(format!("pdf font setup failed: {}", e)))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::Render(format!("pdf font setup failed: {}", e)))?;

    let mut painter = Painter {
        layer: doc.get_page(page).get_layer(layer),
        doc,
        regular,
        bold,
        y: PAGE_HEIGHT - MARGIN,
    };

    painter.centered(&letter.agency_header, 16.0);
    painter.centered(&letter.agency_unit, 13.0);
    painter.centered(LETTER_TITLE, 13.0);
    painter.space(6.0);
    painter.right_aligned(&letter.date_line, 10.0);
    painter.space(6.0);

    painter.label("Recipients:");
    for recipient in &letter.recipients {
        painter.wrapped(
            &format!("\u{2022} {} ({})", recipient.name, recipient.emails.join(", ")),
            10.0,
        );
    }
    painter.space(4.0);

    painter.wrapped(&letter.body, 11.0);
    painter.space(4.0);

    painter.label("Reported addresses:");
    for group in &letter.address_groups {
        painter.bold_line(&group.label, 11.0);
        for address in &group.addresses {
            painter.wrapped(&format!("\u{2022} {}", address), 10.0);
        }
    }

    if let Some(contact) = &letter.contact {
        painter.space(4.0);
        painter.label("Point of contact:");
        if contact.title.is_empty() {
            painter.line(&contact.name, 10.0);
        } else {
            painter.line(&format!("{} ({})", contact.name, contact.title), 10.0);
        }
        if !contact.phone.is_empty() {
            painter.line(&format!("Phone: {}", contact.phone), 10.0);
        }
        if !contact.email.is_empty() {
            painter.line(&format!("Email: {}", contact.email), 10.0);
        }
        if !contact.office.is_empty() {
            painter.line(&format!("Office: {}", contact.office), 10.0);
        }
    }

    if let Some(activity) = &letter.activity {
        painter.space(4.0);
        painter.label("Nature of activity:");
        painter.wrapped(activity, 10.0);
    }

    if let Some(signature) = &letter.signature {
        painter.space(10.0);
        painter.right_aligned(&format!("{} {}", signature.title, signature.name), 11.0);
    }

    painter.footer("Document generated by the ChainLetter system");

    let Painter { doc, .. } = painter;
    let mut bytes: Vec<u8> = Vec::new();
    {
        let mut writer = BufWriter::new(&mut bytes);
        doc.save(&mut writer)
            .map_err(|e| AppError::Render(format!("pdf save failed: {}", e)))?;
    }

    tracing::debug!(
        recipients = letter.recipients.len(),
        groups = letter.address_groups.len(),
        "Rendered pdf letter"
    );
    Ok(bytes)
}

/// Tracks the write cursor down the page and opens a new page when a section
/// would run into the bottom margin.
struct Painter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f64,
}

impl Painter {
    fn ensure_room(&mut self, font_size: f64) {
        if page_break_needed(self.y, font_size) {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn advance(&mut self, font_size: f64) {
        // Point-to-millimeter line advance with a little leading.
        self.y -= font_size * PT_TO_MM * 1.4;
    }

    fn space(&mut self, mm: f64) {
        self.y -= mm;
    }

    fn line(&mut self, text: &str, font_size: f64) {
        self.ensure_room(font_size);
        self.layer
            .use_text(text, font_size, Mm(MARGIN), Mm(self.y), &self.regular);
        self.advance(font_size);
    }

    fn bold_line(&mut self, text: &str, font_size: f64) {
        self.ensure_room(font_size);
        self.layer
            .use_text(text, font_size, Mm(MARGIN), Mm(self.y), &self.bold);
        self.advance(font_size);
    }

    fn label(&mut self, text: &str) {
        self.bold_line(text, 12.0);
    }

    fn centered(&mut self, text: &str, font_size: f64) {
        self.ensure_room(font_size);
        let x = (PAGE_WIDTH - text_width_mm(text, font_size)) / 2.0;
        self.layer
            .use_text(text, font_size, Mm(x.max(MARGIN)), Mm(self.y), &self.bold);
        self.advance(font_size);
    }

    fn right_aligned(&mut self, text: &str, font_size: f64) {
        self.ensure_room(font_size);
        let x = PAGE_WIDTH - MARGIN - text_width_mm(text, font_size);
        self.layer
            .use_text(text, font_size, Mm(x.max(MARGIN)), Mm(self.y), &self.regular);
        self.advance(font_size);
    }

    fn wrapped(&mut self, text: &str, font_size: f64) {
        for line in wrap(text, WRAP_COLUMNS) {
            if line.is_empty() {
                self.advance(font_size);
            } else {
                self.line(&line, font_size);
            }
        }
    }

    fn footer(&mut self, text: &str) {
        let x = (PAGE_WIDTH - text_width_mm(text, 8.0)) / 2.0;
        self.layer
            .use_text(text, 8.0, Mm(x.max(MARGIN)), Mm(10.0), &self.regular);
    }
}

/// The line to paint is `font_size` points tall; compare in millimeters
/// against the bottom margin.
fn page_break_needed(y: f64, font_size: f64) -> bool {
    y - font_size * PT_TO_MM < MARGIN
}

/// Approximate Helvetica advance width; good enough for centering and
/// right-alignment of short heading lines.
fn text_width_mm(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * PT_TO_MM * 0.52
}

/// Greedy word wrap preserving explicit line breaks.
fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for raw in text.lines() {
        let mut current = String::new();
        for word in raw.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.len() + 1 + word.len() <= columns {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
