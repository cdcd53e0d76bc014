use crate::Result;
use crate::schema::SchemaDocument;
use core::fmt::Write;
use ohno::IntoAppError;

/// Write the document as pretty-printed JSON.
pub fn generate<W: Write>(document: &SchemaDocument, writer: &mut W) -> Result<()> {
    write!(writer, "{}", serde_json::to_string_pretty(document)?)?;
    Ok(())
}

/// Read a document previously written by [`generate`].
pub fn parse(text: &str) -> Result<SchemaDocument> {
    serde_json::from_str(text).into_app_err("parsing schema document")
}
