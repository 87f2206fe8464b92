//! Per-pass parser state.
//!
//! The XML driver feeds `start` / `text` / `end` into a [`ParseContext`];
//! the context owns every buffer and every emitted record, so nothing
//! survives a pass except what [`ParseContext::finish`] hands back.

use url::Url;

use super::ExtractMode;
use super::error::InvalidRecord;
use super::record::{ImageRecord, PageRecord, RecordKind, ResourceRecord};
use crate::{debug, log};

/// Text accumulators for one open `<url>` or `<image:image>`.
#[derive(Debug)]
struct FieldSet {
    kind: RecordKind,
    /// Same order as `kind.fields()`; `None` until the field's tag opens.
    values: Vec<Option<String>>,
}

impl FieldSet {
    fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            values: vec![None; kind.fields().len()],
        }
    }

    fn slot(&mut self, field: &str) -> Option<&mut Option<String>> {
        let index = self.kind.fields().iter().position(|f| *f == field)?;
        self.values.get_mut(index)
    }

    fn has(&self, field: &str) -> bool {
        self.kind.fields().contains(&field)
    }

    /// Trim every present value, keeping absent ones absent.
    fn into_trimmed(self) -> Vec<(&'static str, Option<String>)> {
        self.kind
            .fields()
            .iter()
            .copied()
            .zip(self.values)
            .map(|(key, value)| (key, value.map(|v| v.trim().to_string())))
            .collect()
    }
}

/// A pending loc-only buffer.
#[derive(Debug)]
struct LocBuffer {
    kind: RecordKind,
    text: String,
}

/// Working state of a single extraction pass.
#[derive(Debug)]
pub(super) struct ParseContext {
    mode: ExtractMode,
    /// Open element names, innermost last (the "current" element).
    elements: Vec<String>,
    /// Open record field sets, innermost last (full mode).
    open: Vec<FieldSet>,
    /// Open location buffers, innermost last (loc-only mode).
    locs: Vec<LocBuffer>,
    root: Option<String>,
    records: Vec<ResourceRecord>,
    dropped: Vec<InvalidRecord>,
}

impl ParseContext {
    pub fn new(mode: ExtractMode) -> Self {
        Self {
            mode,
            elements: Vec::new(),
            open: Vec::new(),
            locs: Vec::new(),
            root: None,
            records: Vec::new(),
            dropped: Vec::new(),
        }
    }

    /// Name of the innermost open element.
    pub fn current(&self) -> Option<&str> {
        self.elements.last().map(String::as_str)
    }

    /// Name of the document element, once seen.
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    // ------------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------------

    pub fn start(&mut self, name: &str) {
        if self.root.is_none() {
            self.root = Some(name.to_string());
        }
        self.elements.push(name.to_string());

        match self.mode {
            ExtractMode::Full => {
                if let Some(kind) = RecordKind::from_element(name) {
                    self.open.push(FieldSet::new(kind));
                } else if let Some(set) = self.owner_of(name) {
                    // Duplicate tags share the first buffer.
                    if let Some(slot) = set.slot(name) {
                        slot.get_or_insert_with(String::new);
                    }
                }
            }
            ExtractMode::LocOnly => {
                if let Some(kind) = RecordKind::from_location_field(name) {
                    self.locs.push(LocBuffer {
                        kind,
                        text: String::new(),
                    });
                }
            }
        }
    }

    /// Append character data to the buffer of the current element, if any.
    ///
    /// May be called several times per text node; always appends.
    pub fn text(&mut self, text: &str) {
        let Some(current) = self.elements.last() else {
            return;
        };

        match self.mode {
            ExtractMode::Full => {
                let Some(index) = self.open.iter().rposition(|set| set.has(current)) else {
                    return;
                };
                let current = current.clone();
                if let Some(buffer) = self.open[index].slot(&current).and_then(Option::as_mut) {
                    buffer.push_str(text);
                }
            }
            ExtractMode::LocOnly => {
                if RecordKind::from_location_field(current).is_some()
                    && let Some(top) = self.locs.last_mut()
                {
                    top.text.push_str(text);
                }
            }
        }
    }

    pub fn end(&mut self, name: &str) {
        self.elements.pop();

        match self.mode {
            ExtractMode::Full => {
                let Some(kind) = RecordKind::from_element(name) else {
                    return;
                };
                if let Some(index) = self.open.iter().rposition(|set| set.kind == kind) {
                    let set = self.open.remove(index);
                    self.complete(set.kind, set.into_trimmed());
                }
            }
            ExtractMode::LocOnly => {
                if RecordKind::from_location_field(name).is_none() {
                    return;
                }
                if let Some(buffer) = self.locs.pop() {
                    let location = buffer.text.trim().to_string();
                    let field = buffer.kind.location_field();
                    self.complete(buffer.kind, vec![(field, Some(location))]);
                }
            }
        }
    }

    /// Hand back the records and drop diagnostics collected so far.
    ///
    /// Records still open (unterminated) are discarded.
    pub fn finish(self) -> (Vec<ResourceRecord>, Vec<InvalidRecord>) {
        (self.records, self.dropped)
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    /// Innermost open field set that buffers `field`.
    fn owner_of(&mut self, field: &str) -> Option<&mut FieldSet> {
        self.open.iter_mut().rev().find(|set| set.has(field))
    }

    /// Validate a completed field map and emit a record or a diagnostic.
    fn complete(&mut self, kind: RecordKind, fields: Vec<(&'static str, Option<String>)>) {
        let location = fields.first().and_then(|(_, value)| value.as_deref());

        match validate_location(location) {
            Ok(location) => {
                debug!("extract"; "<{}> {}", kind.element(), location);
                self.records.push(build_record(kind, location, fields));
            }
            Err(reason) => {
                let invalid = InvalidRecord {
                    kind,
                    fields,
                    reason,
                };
                log!("warning"; "dropped {}", invalid);
                self.dropped.push(invalid);
            }
        }
    }
}

/// Location must be present, non-empty, absolute and hierarchical.
fn validate_location(raw: Option<&str>) -> Result<Url, String> {
    let raw = match raw {
        None => return Err("missing location".to_string()),
        Some("") => return Err("empty location".to_string()),
        Some(raw) => raw,
    };

    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if url.cannot_be_a_base() {
        return Err("not a hierarchical URL".to_string());
    }
    Ok(url)
}

fn build_record(
    kind: RecordKind,
    location: Url,
    fields: Vec<(&'static str, Option<String>)>,
) -> ResourceRecord {
    let mut fields = fields.into_iter().skip(1);
    let mut next = || fields.next().and_then(|(_, value)| value);

    match kind {
        RecordKind::Page => PageRecord {
            change_frequency: next(),
            priority: next(),
            last_modified: next(),
            ..PageRecord::bare(location)
        }
        .into(),
        RecordKind::Image => ImageRecord {
            location,
            title: next(),
        }
        .into(),
    }
}
