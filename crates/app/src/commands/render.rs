//! Render command - print the XML document for a draft

use std::path::Path;

use anyhow::{Result, bail};
use chrono::NaiveDate;
use einvoice_invoicing::{render_document, render_document_today, validate};

pub fn run(path: &Path, date: Option<NaiveDate>) -> Result<()> {
    let draft = super::load_draft(path)?;
    if let Err(errors) = validate(&draft) {
        super::print_validation_errors(&errors);
        bail!(errors);
    }

    let processed = draft.process();
    let document = match date {
        Some(date) => render_document(&processed, date),
        None => render_document_today(&processed),
    };
    println!("{document}");
    Ok(())
}
