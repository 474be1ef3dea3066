//! Programmatic Word letter rendering.

use std::io::Cursor;

use docx_rs::{AlignmentType, Docx, Paragraph, Run};

use chainletter_common::error::AppError;

use crate::{LETTER_TITLE, LetterData};

/// Render the letter as a `.docx` byte buffer.
pub fn render(letter: &LetterData) -> Result<Vec<u8>, AppError> {
    let mut doc = Docx::new()
        .add_paragraph(centered(&letter.agency_header, 32))
        .add_paragraph(centered(&letter.agency_unit, 28))
        .add_paragraph(centered(LETTER_TITLE, 26))
        .add_paragraph(blank())
        .add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(letter.date_line.as_str()))
                .align(AlignmentType::Right),
        )
        .add_paragraph(blank())
        .add_paragraph(bold_label("Recipients:"));

    for recipient in &letter.recipients {
        doc = doc.add_paragraph(bullet(&format!(
            "{} ({})",
            recipient.name,
            recipient.emails.join(", ")
        )));
    }

    doc = doc
        .add_paragraph(blank())
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(letter.body.as_str())))
        .add_paragraph(blank())
        .add_paragraph(bold_label("Reported addresses:"));

    for group in &letter.address_groups {
        doc = doc.add_paragraph(bold_label(&group.label));
        for address in &group.addresses {
            doc = doc.add_paragraph(bullet(address));
        }
    }

    if let Some(contact) = &letter.contact {
        doc = doc
            .add_paragraph(blank())
            .add_paragraph(bold_label("Point of contact:"))
            .add_paragraph(plain(&contact_headline(contact)));
        if !contact.phone.is_empty() {
            doc = doc.add_paragraph(plain(&format!("Phone: {}", contact.phone)));
        }
        if !contact.email.is_empty() {
            doc = doc.add_paragraph(plain(&format!("Email: {}", contact.email)));
        }
        if !contact.office.is_empty() {
            doc = doc.add_paragraph(plain(&format!("Office: {}", contact.office)));
        }
    }

    if let Some(activity) = &letter.activity {
        doc = doc
            .add_paragraph(blank())
            .add_paragraph(bold_label("Nature of activity:"))
            .add_paragraph(plain(activity));
    }

    if let Some(signature) = &letter.signature {
        doc = doc.add_paragraph(blank()).add_paragraph(
            Paragraph::new()
                .add_run(
                    Run::new()
                        .add_text(format!("{} {}", signature.title, signature.name))
                        .bold(),
                )
                .align(AlignmentType::Right),
        );
    }

    let mut cursor = Cursor::new(Vec::new());
    doc.build()
        .pack(&mut cursor)
        .map_err(|e| AppError::Render(format!("docx packing failed: {}", e)))?;

    tracing::debug!(
        recipients = letter.recipients.len(),
        groups = letter.address_groups.len(),
        "Rendered docx letter"
    );
    Ok(cursor.into_inner())
}

fn centered(text: &str, half_points: usize) -> Paragraph {
    Paragraph::new()
        .add_run(Run::new().add_text(text).bold().size(half_points))
        .align(AlignmentType::Center)
}

fn bold_label(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text).bold())
}

fn plain(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

fn bullet(text: &str) -> Paragraph {
    // Literal bullet glyph; the letter does not use Word list numbering.
    Paragraph::new().add_run(Run::new().add_text(format!("\u{2022} {}", text)))
}

fn blank() -> Paragraph {
    Paragraph::new()
}

fn contact_headline(contact: &chainletter_common::types::PointOfContact) -> String {
    if contact.title.is_empty() {
        contact.name.clone()
    } else {
        format!("{} ({})", contact.name, contact.title)
    }
}
