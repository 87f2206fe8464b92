//! Single-pass XML driver.
//!
//! Pulls events from `quick-xml` and forwards them to [`ParseContext`].
//! No tree is built; the only state is the context.

use std::collections::HashSet;
use std::str;

use quick_xml::{
    Reader,
    escape::resolve_predefined_entity,
    events::{BytesRef, Event},
};

use super::context::ParseContext;
use super::error::ParseError;
use super::record::Located;
use super::{ErrorPolicy, ExtractOptions, Extraction};
use crate::{debug, log};

/// Extract resource records from sitemap XML.
///
/// Records come back sorted by their decoded URL path (stable, byte-wise).
/// Under [`ErrorPolicy::Strict`] a malformed document is an error and no
/// records are returned; under [`ErrorPolicy::Lenient`] the records completed
/// before the error are kept and the error is stored on the result.
pub fn extract(xml: &[u8], options: &ExtractOptions) -> Result<Extraction, ParseError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);
    reader.config_mut().check_end_names = true;

    let mut ctx = ParseContext::new(options.mode);

    let truncated = match drive(&mut reader, &mut ctx) {
        Ok(()) => None,
        Err(err) if options.policy == ErrorPolicy::Lenient => {
            log!("warning"; "{}, keeping {} record(s) read before it", err, ctx.record_count());
            Some(err)
        }
        Err(err) => return Err(err),
    };

    if ctx.root() == Some("sitemapindex") {
        log!("warning"; "sitemap index files are not followed, no records extracted");
    }

    let (mut records, dropped) = ctx.finish();
    records.sort_by_cached_key(|record| record.route());

    if options.dedup {
        let before = records.len();
        let mut seen = HashSet::new();
        records.retain(|record| seen.insert((record.kind(), record.location().clone())));
        debug!("extract"; "dedup removed {} record(s)", before - records.len());
    }

    let extraction = Extraction {
        records,
        dropped,
        truncated,
    };

    if options.dedup {
        let repeated = extraction.repeated_routes();
        if repeated > 0 {
            log!("warning"; "{} record(s) share a path with another record, restfile keys repeat", repeated);
        }
    }

    Ok(extraction)
}

/// Run the event loop to end of input.
fn drive(reader: &mut Reader<&[u8]>, ctx: &mut ParseContext) -> Result<(), ParseError> {
    loop {
        let position = reader.buffer_position();
        let event = reader
            .read_event()
            .map_err(|e| ParseError::malformed(reader.error_position(), e.to_string()))?;

        match event {
            Event::Start(e) => {
                ensure_single_root(ctx, position)?;
                ctx.start(utf8(e.name().into_inner(), position)?);
            }
            Event::End(e) => ctx.end(utf8(e.name().into_inner(), position)?),
            Event::Empty(e) => {
                ensure_single_root(ctx, position)?;
                let name = utf8(e.name().into_inner(), position)?;
                ctx.start(name);
                ctx.end(name);
            }
            Event::Text(e) => {
                let text = utf8(&e, position)?;
                if !text.trim().is_empty() {
                    ensure_inside_root(ctx, position)?;
                }
                ctx.text(text);
            }
            Event::CData(e) => {
                ensure_inside_root(ctx, position)?;
                ctx.text(utf8(&e, position)?);
            }
            Event::GeneralRef(e) => {
                ensure_inside_root(ctx, position)?;
                ctx.text(&resolve_reference(&e, position)?);
            }
            Event::Eof => return finish_document(ctx, reader.buffer_position()),
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }
}

/// A document has exactly one top-level element.
fn ensure_single_root(ctx: &ParseContext, position: u64) -> Result<(), ParseError> {
    if ctx.current().is_none() && ctx.root().is_some() {
        return Err(ParseError::malformed(position, "content after the document element"));
    }
    Ok(())
}

/// Character data is only allowed inside the document element.
fn ensure_inside_root(ctx: &ParseContext, position: u64) -> Result<(), ParseError> {
    if ctx.current().is_some() {
        return Ok(());
    }
    let message = match ctx.root() {
        Some(_) => "content after the document element",
        None => "text before the document element",
    };
    Err(ParseError::malformed(position, message))
}

/// End of input is only fine after the document element has closed.
fn finish_document(ctx: &ParseContext, position: u64) -> Result<(), ParseError> {
    if ctx.root().is_none() {
        return Err(ParseError::malformed(position, "document has no root element"));
    }
    if let Some(open) = ctx.current() {
        return Err(ParseError::malformed(
            position,
            format!("unexpected end of document, <{open}> is not closed"),
        ));
    }
    Ok(())
}

fn utf8(bytes: &[u8], position: u64) -> Result<&str, ParseError> {
    str::from_utf8(bytes).map_err(|e| ParseError::malformed(position, e.to_string()))
}

/// Resolve `&name;` / `&#N;` / `&#xN;` to its text.
fn resolve_reference(reference: &BytesRef<'_>, position: u64) -> Result<String, ParseError> {
    let name = utf8(reference, position)?;

    if reference.is_char_ref() {
        return match reference.resolve_char_ref() {
            Ok(Some(ch)) => Ok(ch.to_string()),
            Ok(None) | Err(_) => Err(ParseError::malformed(
                position,
                format!("invalid character reference `&{name};`"),
            )),
        };
    }

    resolve_predefined_entity(name)
        .map(str::to_string)
        .ok_or_else(|| ParseError::malformed(position, format!("unknown entity `&{name};`")))
}
