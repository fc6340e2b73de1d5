use std::sync::LazyLock;

use log::{debug, error, info};
use regex::{NoExpand, Regex};
use thiserror::Error;

use super::format::Document;
use crate::palette::{IndexGrid, Palette};

/// Matches the empty `pixels` array left by the generic pass.
static PIXELS_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""pixels"\s*:\s*\[\s*\]"#).expect("placeholder pattern is valid")
});
const ROW_INDENT: &str = "    ";
const CLOSE_INDENT: &str = "  ";

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Malformed template: expected exactly one empty \"pixels\" placeholder, found {0}")]
    MalformedTemplate(usize),
    #[error("Failed to serialize document metadata")]
    Serialize(#[from] serde_json::Error),
}

/// Renders the document text for an already built palette and grid.
///
/// Everything except `pixels` goes through serde_json's pretty printer with
/// `pixels` left as an empty array. That placeholder is then replaced with a
/// dense block holding one grid row per line.
///
/// # Errors
/// - Returns `EmitError::MalformedTemplate` if the placeholder is missing or
///   appears more than once in the generic output
pub fn emit(
    name: &str,
    width: usize,
    height: usize,
    palette: &Palette,
    grid: &IndexGrid,
) -> Result<String, EmitError> {
    info!("Starting document emission for '{}'", name);

    // Step 1: Generic pass with an empty pixels array
    let template = Document::new(name, width, height, palette, Vec::new());
    let pretty = serde_json::to_string_pretty(&template)?;
    debug!(
        "Metadata serialized: {} palette entries, {} bytes",
        template.palette.len(),
        pretty.len()
    );

    // Step 2: Dense pixel block
    let block = render_pixels_block(grid);
    debug!("Pixel block rendered with {} rows", grid.len());

    // Step 3: Merge
    let document = substitute_placeholder(&pretty, &block)?;

    info!("Document emission completed successfully");
    Ok(document)
}

/// Formats the grid as a `"pixels": [...]` member, one `[i,i,...]` row per
/// line, indented to sit inside the top-level object.
pub fn render_pixels_block(grid: &IndexGrid) -> String {
    let rows: Vec<String> = grid
        .iter()
        .map(|row| {
            let cells: Vec<String> = row.iter().map(usize::to_string).collect();
            format!("{}[{}]", ROW_INDENT, cells.join(","))
        })
        .collect();

    let mut block = String::from("\"pixels\": [\n");
    if !rows.is_empty() {
        block.push_str(&rows.join(",\n"));
        block.push('\n');
    }
    block.push_str(CLOSE_INDENT);
    block.push(']');
    block
}

/// Replaces the single empty `pixels` array in `template` with `block`,
/// copied verbatim.
pub fn substitute_placeholder(template: &str, block: &str) -> Result<String, EmitError> {
    let placeholder = &*PIXELS_PLACEHOLDER;

    let found = placeholder.find_iter(template).count();
    if found != 1 {
        error!(
            "Expected exactly one pixels placeholder in template, found {}",
            found
        );
        return Err(EmitError::MalformedTemplate(found));
    }

    Ok(placeholder.replace(template, NoExpand(block)).into_owned())
}
