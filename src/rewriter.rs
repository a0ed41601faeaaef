// Insert-or-update of the decoration fields in .tres text.
// Everything outside the two managed fields is left byte-for-byte intact.
use crate::error::AssetError;
use crate::generator::Decoration;
use lazy_static::lazy_static;
use regex::{NoExpand, Regex};
use tracing::debug;

// Any assignment of a managed key matches its field pattern. The expected
// value form is tried first; anything else is taken up to the end of the line.
lazy_static! {
    static ref BASE_COLOR_ANCHOR: Regex = Regex::new(r"\bbase_color[ \t]*=").unwrap();
    static ref SECONDARY_COLOR_FIELD: Regex =
        Regex::new(r"\bsecondary_color[ \t]*=[ \t]*(?:Color\([^)]*\)|[^\r\n]*)").unwrap();
    static ref GRADIENT_TYPE_FIELD: Regex =
        Regex::new(r#"\bgradient_type[ \t]*=[ \t]*(?:&?"[^"\r\n]*"|[^\r\n]*)"#).unwrap();
}

/// How a managed field was written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEdit {
    /// New line added below its anchor
    Inserted,
    /// Existing assignments overwritten in place (count)
    Replaced(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub text: String,
    pub secondary: FieldEdit,
    pub gradient: FieldEdit,
}

/// Apply `decoration` to `text`.
///
/// `secondary_color` goes below the `base_color` line when absent,
/// `gradient_type` below the `secondary_color` line when absent.
pub fn rewrite(text: &str, decoration: &Decoration) -> Result<Rewrite, AssetError> {
    let secondary_line = format!("secondary_color = {}", decoration.secondary);
    let (text, secondary) = upsert(
        text,
        &SECONDARY_COLOR_FIELD,
        &BASE_COLOR_ANCHOR,
        &secondary_line,
    )
    .ok_or(AssetError::MissingField)?;

    let gradient_line = format!("gradient_type = \"{}\"", decoration.gradient);
    let (text, gradient) = upsert(
        &text,
        &GRADIENT_TYPE_FIELD,
        &SECONDARY_COLOR_FIELD,
        &gradient_line,
    )
    .ok_or(AssetError::MissingField)?;

    Ok(Rewrite {
        text,
        secondary,
        gradient,
    })
}

/// Replace every match of `field`, or insert `line` after the first `anchor`
/// line. `None` when neither the field nor the anchor is present.
fn upsert(text: &str, field: &Regex, anchor: &Regex, line: &str) -> Option<(String, FieldEdit)> {
    let mut existing = 0;
    for stale in field.find_iter(text) {
        debug!("Replacing {:?}", stale.as_str());
        existing += 1;
    }
    if existing > 0 {
        let replaced = field.replace_all(text, NoExpand(line)).into_owned();
        return Some((replaced, FieldEdit::Replaced(existing)));
    }

    let anchor = anchor.find(text)?;
    Some((insert_after_line(text, anchor.start(), line), FieldEdit::Inserted))
}

/// Insert `line` as a new line following the line containing byte `pos`,
/// reusing that line's terminator style
fn insert_after_line(text: &str, pos: usize, line: &str) -> String {
    let line_end = text[pos..].find('\n').map_or(text.len(), |i| pos + i);
    let (content_end, eol) = if line_end > pos && text[..line_end].ends_with('\r') {
        (line_end - 1, "\r\n")
    } else {
        (line_end, "\n")
    };

    let mut out = String::with_capacity(text.len() + line.len() + eol.len());
    out.push_str(&text[..content_end]);
    out.push_str(eol);
    out.push_str(line);
    out.push_str(&text[content_end..]);
    out
}
