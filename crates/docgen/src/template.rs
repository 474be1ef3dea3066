//! Placeholder substitution into uploaded `.docx` templates.
//!
//! A template is an ordinary Word document containing `{tag}` placeholders in
//! its text. Substitution rewrites the archive entry by entry, replacing tags
//! inside `word/document.xml` and copying everything else through untouched.

use std::collections::HashMap;
use std::io::{Cursor, Read, Write};

use once_cell::sync::Lazy;
use regex::Regex;
use zip::ZipArchive;
use zip::write::{SimpleFileOptions, ZipWriter};

use chainletter_common::error::AppError;

const DOCUMENT_XML: &str = "word/document.xml";

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").unwrap());

/// Replace `{tag}` placeholders in a template with the given values.
///
/// Unknown tags are left in place so a half-filled template is visible in the
/// output rather than silently blanked. Values are XML-escaped.
pub fn substitute(
    template: &[u8],
    values: &HashMap<String, String>,
) -> Result<Vec<u8>, AppError> {
    let mut archive = open_archive(template)?;
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| AppError::Template(format!("unreadable template entry: {}", e)))?;
        let name = entry.name().to_string();

        let mut contents = Vec::new();
        entry.read_to_end(&mut contents)?;

        if name == DOCUMENT_XML {
            let xml = String::from_utf8(contents)
                .map_err(|_| AppError::Template("document.xml is not valid UTF-8".to_string()))?;
            contents = apply_tags(&xml, values).into_bytes();
        }

        writer
            .start_file(name, SimpleFileOptions::default())
            .map_err(|e| AppError::Template(format!("template rewrite failed: {}", e)))?;
        writer.write_all(&contents)?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| AppError::Template(format!("template rewrite failed: {}", e)))?;

    tracing::debug!(values = values.len(), "Template substitution complete");
    Ok(cursor.into_inner())
}

/// List the distinct `{tag}` placeholders of a template, in order of first
/// appearance. This backs the template preview.
pub fn tags(template: &[u8]) -> Result<Vec<String>, AppError> {
    let mut archive = open_archive(template)?;
    let mut entry = archive
        .by_name(DOCUMENT_XML)
        .map_err(|_| AppError::Template("template has no word/document.xml".to_string()))?;

    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|_| AppError::Template("document.xml is not valid UTF-8".to_string()))?;

    let mut seen = Vec::new();
    for caps in TAG_RE.captures_iter(&xml) {
        let tag = caps[1].to_string();
        if !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    Ok(seen)
}

fn open_archive(template: &[u8]) -> Result<ZipArchive<Cursor<&[u8]>>, AppError> {
    ZipArchive::new(Cursor::new(template))
        .map_err(|e| AppError::Template(format!("not a valid docx archive: {}", e)))
}

fn apply_tags(xml: &str, values: &HashMap<String, String>) -> String {
    TAG_RE
        .replace_all(xml, |caps: &regex::Captures<'_>| match values.get(&caps[1]) {
            Some(value) => xml_escape(value),
            None => caps[0].to_string(),
        })
        .into_owned()
}

fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
