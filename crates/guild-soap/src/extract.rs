//! Field extraction from decoded response bodies.
//!
//! Extraction works on the document-order stream of elements rather than on
//! the response structure. This mirrors how the service's responses have
//! always been read and relies on field tag names not being reused inside
//! unrelated substructures of the same response.

use crate::element::Element;

/// Field values of one extracted record, keyed by tag name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Value of `tag`, or the empty string when the record has no such field.
    pub fn get(&self, tag: &str) -> &str {
        self.fields
            .iter()
            .find(|(name, _)| name == tag)
            .map_or("", |(_, value)| value.as_str())
    }

    fn insert(&mut self, tag: &str, value: &str) {
        self.fields.push((tag.to_string(), value.to_string()));
    }
}

/// Text of the first element named `tag` below `root`, in document order.
///
/// First occurrence wins, wherever it sits in the tree. A matching element
/// with no text yields `""`.
pub fn extract_scalar<'e>(root: &'e Element, tag: &str) -> Option<&'e str> {
    first_match(root.descendants(), tag)
}

/// Splits the element stream below `root` at every `item_start_tag` and reads
/// `field_tags` from each window.
///
/// Elements before the first start tag are discarded. A window runs from just
/// after one start tag up to the next, and each field takes the first match
/// inside it. Missing fields become `""`.
///
/// Weak point: windows follow the stream, not the structure. A field that
/// precedes the start tag inside its own record (such as `id` before `name`)
/// lands in the previous record's window, where it is either taken as that
/// record's value or shadowed by an earlier match.
pub fn extract_group(root: &Element, item_start_tag: &str, field_tags: &[&str]) -> Vec<Record> {
    let stream: Vec<&Element> = root.descendants().collect();
    let starts: Vec<usize> = stream
        .iter()
        .enumerate()
        .filter(|(_, element)| element.tag() == item_start_tag)
        .map(|(index, _)| index)
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(nth, &start)| {
            let end = starts.get(nth + 1).copied().unwrap_or(stream.len());
            let window = &stream[start + 1..end];

            let mut record = Record::default();
            record.insert(item_start_tag, stream[start].text().unwrap_or_default());
            for tag in field_tags {
                let value = first_match(window.iter().copied(), tag).unwrap_or_default();
                record.insert(tag, value);
            }
            record
        })
        .collect()
}

/// Reads a single record over the whole tree, or `None` when `primary_tag`
/// appears nowhere in it.
pub fn extract_single(root: &Element, primary_tag: &str, field_tags: &[&str]) -> Option<Record> {
    let primary = extract_scalar(root, primary_tag)?;

    let mut record = Record::default();
    record.insert(primary_tag, primary);
    for tag in field_tags.iter().filter(|tag| **tag != primary_tag) {
        record.insert(tag, extract_scalar(root, tag).unwrap_or_default());
    }
    Some(record)
}

fn first_match<'e>(mut elements: impl Iterator<Item = &'e Element>, tag: &str) -> Option<&'e str> {
    elements
        .find(|element| element.tag() == tag)
        .map(|element| element.text().unwrap_or_default())
}
