//! Core types: raw Omeka S records and the normalized export row

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One entry in a property's value list, as the Omeka S API represents it.
///
/// Every field is optional because the API mixes literal values
/// (`@value`), linked resources (`@id`, optionally with `o:label`), and
/// bookkeeping keys in the same list. Extraction is total: absent fields
/// simply contribute nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyValue {
    /// Numeric property selector the API attaches to each entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<u64>,

    /// Literal value
    #[serde(rename = "@value", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Linked resource identifier (URI)
    #[serde(rename = "@id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display label for a linked resource
    #[serde(rename = "o:label", default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Raw API representation of an item or a media record.
///
/// Transient: produced by a listing fetch, consumed immediately by
/// normalization. Property bags stay as raw JSON until a specific property
/// is asked for, so loosely-typed or unexpected keys can never fail a whole
/// record.
#[derive(Clone, Debug, Deserialize)]
pub struct RawRecord {
    /// Numeric record identifier
    #[serde(rename = "o:id")]
    pub id: u64,

    /// Thumbnail URLs keyed by size name ("large", "medium", "square")
    #[serde(rename = "thumbnail_display_urls", default)]
    pub thumbnail_urls: HashMap<String, Option<String>>,

    /// Alt text for the record's image
    #[serde(rename = "o:alt_text", default)]
    pub alt_text: Option<String>,

    /// Mime type — present on media records only
    #[serde(rename = "o:media_type", default)]
    pub media_type: Option<String>,

    /// Everything else, including the `dcterms:*` property bags
    #[serde(flatten)]
    properties: HashMap<String, serde_json::Value>,
}

impl RawRecord {
    /// The value list of a named property, empty when the property is absent
    /// or not shaped like a value list. Never fails.
    pub fn property(&self, name: &str) -> Vec<PropertyValue> {
        self.properties
            .get(name)
            .and_then(|raw| serde_json::from_value(raw.clone()).ok())
            .unwrap_or_default()
    }

    /// URL of the "large" thumbnail, if the record carries a usable one
    pub fn large_thumbnail(&self) -> Option<&str> {
        self.thumbnail_urls
            .get("large")
            .and_then(Option::as_deref)
            .filter(|url| !url.is_empty())
    }
}

/// Classification tag selecting how a row's asset is later rendered
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayTemplate {
    /// Top-level item (always)
    CompoundObject,
    /// Media with an image mime type
    Image,
    /// Media with a PDF mime type
    Pdf,
    /// Media with a geo+json mime type
    Geodata,
    /// Any other media
    Record,
}

impl DisplayTemplate {
    /// Infer a media template from a mime type by case-insensitive substring
    /// match, in priority order: image, pdf, geo+json, then the catch-all.
    pub fn from_media_type(media_type: &str) -> Self {
        let media_type = media_type.to_ascii_lowercase();
        if media_type.contains("image") {
            Self::Image
        } else if media_type.contains("pdf") {
            Self::Pdf
        } else if media_type.contains("geo+json") {
            Self::Geodata
        } else {
            Self::Record
        }
    }

    /// The literal written into the export
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CompoundObject => "compound_object",
            Self::Image => "image",
            Self::Pdf => "pdf",
            Self::Geodata => "geodata",
            Self::Record => "record",
        }
    }
}

/// Column names of the export, in the exact order they are written
pub const FIELD_NAMES: [&str; 23] = [
    "objectid",
    "parentid",
    "title",
    "description",
    "subject",
    "era",
    "isPartOf",
    "creator",
    "publisher",
    "source",
    "date",
    "type",
    "format",
    "extent",
    "language",
    "relation",
    "rights",
    "license",
    "display_template",
    "object_location",
    "image_small",
    "image_thumb",
    "image_alt_text",
];

/// One normalized export row: the fixed 23-column flat schema.
///
/// `objectid` is always the source record's numeric id rendered as a string;
/// `parentid` is empty for item rows and the owning item's id for media rows.
/// All metadata fields default to the empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutputRow {
    /// Source record id
    pub objectid: String,
    /// Owning item id (media rows only)
    pub parentid: String,
    /// dcterms:title
    pub title: String,
    /// dcterms:description
    pub description: String,
    /// dcterms:subject (combined)
    pub subject: String,
    /// dcterms:temporal
    pub era: String,
    /// dcterms:isPartOf (combined)
    pub is_part_of: String,
    /// dcterms:creator (combined)
    pub creator: String,
    /// dcterms:publisher (combined)
    pub publisher: String,
    /// dcterms:source (combined)
    pub source: String,
    /// dcterms:date
    pub date: String,
    /// dcterms:type (linked)
    pub r#type: String,
    /// dcterms:format
    pub format: String,
    /// dcterms:extent
    pub extent: String,
    /// dcterms:language
    pub language: String,
    /// dcterms:relation (combined)
    pub relation: String,
    /// dcterms:rights
    pub rights: String,
    /// dcterms:license
    pub license: String,
    /// Rendering classification (see [`DisplayTemplate`])
    pub display_template: String,
    /// Relative path of the downloaded asset
    pub object_location: String,
    /// Same path, reused for the small rendition
    pub image_small: String,
    /// Same path, reused for the thumbnail rendition
    pub image_thumb: String,
    /// Alt text carried over verbatim
    pub image_alt_text: String,
}

impl OutputRow {
    /// Field values in [`FIELD_NAMES`] order
    pub fn fields(&self) -> [&str; 23] {
        [
            &self.objectid,
            &self.parentid,
            &self.title,
            &self.description,
            &self.subject,
            &self.era,
            &self.is_part_of,
            &self.creator,
            &self.publisher,
            &self.source,
            &self.date,
            &self.r#type,
            &self.format,
            &self.extent,
            &self.language,
            &self.relation,
            &self.rights,
            &self.license,
            &self.display_template,
            &self.object_location,
            &self.image_small,
            &self.image_thumb,
            &self.image_alt_text,
        ]
    }
}
