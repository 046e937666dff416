//! Pure field extraction over property value lists.
//!
//! These functions turn one property's list of value entries into the string
//! a given export column wants. They are total: missing fields, empty lists,
//! and non-matching selectors all yield the empty string. List order is
//! preserved as received — nothing here sorts.

use crate::types::{PropertyValue, RawRecord};

/// Numeric property selector the API attaches to each value entry.
///
/// The same property name can carry entries for different semantic roles, so
/// columns select by id rather than by name alone.
pub type PropertyId = u64;

/// How a metadata column sources its value from a property's entry list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtractMode {
    /// Literal value of the first entry matching the selector
    Scalar(PropertyId),
    /// Link rendering of the first entry matching the selector
    Linked(PropertyId),
    /// All literal values, then all link renderings, joined by `;`
    Combined,
}

/// Binding of one export column to the property it sources from
#[derive(Clone, Copy, Debug)]
pub struct FieldBinding {
    /// Export column name
    pub field: &'static str,
    /// Omeka property term, e.g. `dcterms:title`
    pub property: &'static str,
    /// Extraction mode, with the selector where one applies
    pub mode: ExtractMode,
}

/// Column-to-property bindings for the 16 metadata columns, in export order.
///
/// The selectors are the stock Omeka S property ids for the Dublin Core
/// vocabulary. Items and media share this table.
pub const METADATA_BINDINGS: [FieldBinding; 16] = [
    FieldBinding {
        field: "title",
        property: "dcterms:title",
        mode: ExtractMode::Scalar(1),
    },
    FieldBinding {
        field: "description",
        property: "dcterms:description",
        mode: ExtractMode::Scalar(4),
    },
    FieldBinding {
        field: "subject",
        property: "dcterms:subject",
        mode: ExtractMode::Combined,
    },
    FieldBinding {
        field: "era",
        property: "dcterms:temporal",
        mode: ExtractMode::Scalar(41),
    },
    FieldBinding {
        field: "isPartOf",
        property: "dcterms:isPartOf",
        mode: ExtractMode::Combined,
    },
    FieldBinding {
        field: "creator",
        property: "dcterms:creator",
        mode: ExtractMode::Combined,
    },
    FieldBinding {
        field: "publisher",
        property: "dcterms:publisher",
        mode: ExtractMode::Combined,
    },
    FieldBinding {
        field: "source",
        property: "dcterms:source",
        mode: ExtractMode::Combined,
    },
    FieldBinding {
        field: "date",
        property: "dcterms:date",
        mode: ExtractMode::Scalar(7),
    },
    FieldBinding {
        field: "type",
        property: "dcterms:type",
        mode: ExtractMode::Linked(8),
    },
    FieldBinding {
        field: "format",
        property: "dcterms:format",
        mode: ExtractMode::Scalar(9),
    },
    FieldBinding {
        field: "extent",
        property: "dcterms:extent",
        mode: ExtractMode::Scalar(25),
    },
    FieldBinding {
        field: "language",
        property: "dcterms:language",
        mode: ExtractMode::Scalar(12),
    },
    FieldBinding {
        field: "relation",
        property: "dcterms:relation",
        mode: ExtractMode::Combined,
    },
    FieldBinding {
        field: "rights",
        property: "dcterms:rights",
        mode: ExtractMode::Scalar(15),
    },
    FieldBinding {
        field: "license",
        property: "dcterms:license",
        mode: ExtractMode::Scalar(49),
    },
];

/// Literal value of the first entry matching `selector`, or ""
pub fn extract_scalar(values: &[PropertyValue], selector: PropertyId) -> String {
    values
        .iter()
        .find(|entry| entry.property_id == Some(selector))
        .and_then(|entry| entry.value.clone())
        .unwrap_or_default()
}

/// Link rendering of the first entry matching `selector`, or "".
///
/// With a label the rendering is `[label](identifier)`; without one it is the
/// bare identifier.
pub fn extract_linked(values: &[PropertyValue], selector: PropertyId) -> String {
    values
        .iter()
        .find(|entry| entry.property_id == Some(selector))
        .map(render_link)
        .unwrap_or_default()
}

/// All literal values, then all link renderings of identifier-bearing
/// entries, in list order, joined by `;`.
///
/// The two passes are independent: an entry carrying both a literal value and
/// an identifier contributes to both. Downstream exports have always had this
/// shape, so it stays.
pub fn extract_combined(values: &[PropertyValue]) -> String {
    let mut parts: Vec<String> = values
        .iter()
        .filter_map(|entry| entry.value.clone())
        .collect();
    parts.extend(
        values
            .iter()
            .filter(|entry| entry.id.is_some())
            .map(render_link),
    );
    parts.join(";")
}

/// Apply one binding to a record's property bag
pub fn extract_field(record: &RawRecord, binding: &FieldBinding) -> String {
    let values = record.property(binding.property);
    match binding.mode {
        ExtractMode::Scalar(selector) => extract_scalar(&values, selector),
        ExtractMode::Linked(selector) => extract_linked(&values, selector),
        ExtractMode::Combined => extract_combined(&values),
    }
}

fn render_link(entry: &PropertyValue) -> String {
    let id = entry.id.as_deref().unwrap_or_default();
    match entry.label.as_deref() {
        Some(label) => format!("[{label}]({id})"),
        None => id.to_string(),
    }
}
