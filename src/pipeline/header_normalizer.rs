// ==========================================
// Hệ thống mẻ thép - header normalizer
// ==========================================
// Maps arbitrary/localized column headers onto canonical fields. Plant
// reports mix English and Vietnamese spellings with inconsistent casing,
// accents and separators.
// ==========================================

use crate::config::headers::{lookup_header, CanonicalField};
use crate::pipeline::error::PipelineError;
use std::collections::HashMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub struct HeaderNormalizer;

impl HeaderNormalizer {
    /// Produce the canonical lookup key for a raw header string:
    /// lower-case, NFD-decompose and drop combining marks, fold `đ` to
    /// `d` (it has no canonical decomposition), strip whitespace and
    /// underscores.
    pub fn normalize_key(raw: &str) -> String {
        raw.to_lowercase()
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .map(|c| if c == 'đ' { 'd' } else { c })
            .filter(|c| !c.is_whitespace() && *c != '_')
            .collect()
    }

    /// Map a header row to `column index → canonical field`.
    ///
    /// Unrecognized headers are dropped silently. When two columns map to
    /// the same canonical field the first one wins. Missing any required
    /// field aborts the whole parse with a single blocking error naming
    /// the missing canonical fields.
    pub fn map_columns(
        headers: &[String],
    ) -> Result<HashMap<usize, CanonicalField>, PipelineError> {
        let mut columns: HashMap<usize, CanonicalField> = HashMap::new();
        let mut mapped: Vec<CanonicalField> = Vec::new();

        for (idx, raw) in headers.iter().enumerate() {
            let key = Self::normalize_key(raw);
            if let Some(field) = lookup_header(&key) {
                if !mapped.contains(&field) {
                    mapped.push(field);
                    columns.insert(idx, field);
                }
            }
        }

        let missing: Vec<String> = CanonicalField::REQUIRED
            .iter()
            .filter(|f| !mapped.contains(f))
            .map(|f| f.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(PipelineError::MissingColumns { missing });
        }

        Ok(columns)
    }
}
