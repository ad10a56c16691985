//! Form command handler

use anyhow::{Context, Result};
use colored::*;
use pier_client::form::AutoSubmitForm;
use pier_core::OrderedMap;
use std::path::PathBuf;

/// Render an auto-submitting form to stdout or `out`
pub fn render_form(
    action: String,
    method: &str,
    params: Vec<(String, String)>,
    out: Option<PathBuf>,
) -> Result<()> {
    let params: OrderedMap<String, String> = params.into_iter().collect();
    let html = AutoSubmitForm::new(action, method, params)?.render()?;

    match out {
        Some(path) => {
            std::fs::write(&path, html)
                .with_context(|| format!("Failed to write form to {}", path.display()))?;
            eprintln!(
                "{}",
                format!("✓ Form written to {}", path.display()).green().bold()
            );
        }
        None => print!("{}", html),
    }

    Ok(())
}
