//! Record normalization — one flat export row per raw API record

use crate::extract::{self, METADATA_BINDINGS};
use crate::fetch::AssetFetcher;
use crate::types::{DisplayTemplate, OutputRow, RawRecord};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::warn;

/// Maps raw item and media records into export rows.
///
/// Extraction is total, so normalization never fails: missing properties
/// become empty strings, and a failed asset download is logged and the row
/// emitted anyway, its location fields pointing at where the asset would
/// have landed.
pub struct Normalizer<'a> {
    fetcher: &'a AssetFetcher,
    objects_dir: &'a str,
}

impl<'a> Normalizer<'a> {
    /// Create a normalizer writing assets under `objects_dir`
    pub fn new(fetcher: &'a AssetFetcher, objects_dir: &'a str) -> Self {
        Self {
            fetcher,
            objects_dir,
        }
    }

    /// Normalize a top-level item: empty parent, `compound_object` template
    pub async fn normalize_item(&self, record: &RawRecord) -> OutputRow {
        self.normalize(record, String::new(), DisplayTemplate::CompoundObject)
            .await
    }

    /// Normalize a media record owned by `parent_id`, inferring the template
    /// from its mime type
    pub async fn normalize_media(&self, record: &RawRecord, parent_id: u64) -> OutputRow {
        let template = record
            .media_type
            .as_deref()
            .map(DisplayTemplate::from_media_type)
            .unwrap_or(DisplayTemplate::Record);
        self.normalize(record, parent_id.to_string(), template).await
    }

    async fn normalize(
        &self,
        record: &RawRecord,
        parentid: String,
        template: DisplayTemplate,
    ) -> OutputRow {
        let location = self.mirror_thumbnail(record).await;

        let mut meta: HashMap<&str, String> = METADATA_BINDINGS
            .iter()
            .map(|binding| (binding.field, extract::extract_field(record, binding)))
            .collect();
        let mut take = |field: &str| meta.remove(field).unwrap_or_default();

        OutputRow {
            objectid: record.id.to_string(),
            parentid,
            title: take("title"),
            description: take("description"),
            subject: take("subject"),
            era: take("era"),
            is_part_of: take("isPartOf"),
            creator: take("creator"),
            publisher: take("publisher"),
            source: take("source"),
            date: take("date"),
            r#type: take("type"),
            format: take("format"),
            extent: take("extent"),
            language: take("language"),
            relation: take("relation"),
            rights: take("rights"),
            license: take("license"),
            display_template: template.as_str().to_string(),
            object_location: location.clone(),
            image_small: location.clone(),
            image_thumb: location,
            image_alt_text: record.alt_text.clone().unwrap_or_default(),
        }
    }

    /// Download the record's "large" thumbnail to `<objects_dir>/<id>.jpg`.
    ///
    /// Returns the relative path recorded in the row, empty when the record
    /// has no usable thumbnail. The path is returned even when the download
    /// fails, so the export keeps pointing at where the asset belongs.
    async fn mirror_thumbnail(&self, record: &RawRecord) -> String {
        let Some(url) = record.large_thumbnail() else {
            return String::new();
        };

        let location = format!("{}/{}.jpg", self.objects_dir, record.id);
        if let Err(e) = self
            .fetcher
            .download(url, &PathBuf::from(&location))
            .await
        {
            warn!(record_id = record.id, url, error = %e, "thumbnail download failed, keeping its path in the export");
        }
        location
    }
}
