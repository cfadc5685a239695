// src/document.rs
//
// The merged site document and the state object that owns it.
//
// - SiteDocument: category name → JSON value, exactly as site-data.json has it.
// - CategoryDocument: what a resolver hands back for one category.
// - SiteState: explicit holder with a lifecycle; the startup flow is the only
//              writer, renderers read afterwards.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::core::Record;
use crate::error::{SourceError, SourceResult};

/* ---------------- Category document ---------------- */

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CategoryDocument {
    /// Rows parsed from a spreadsheet export.
    Records(Vec<Record>),
    /// Verbatim field from the local document; shape is category-specific.
    Value(Value),
}

impl CategoryDocument {
    pub fn empty() -> Self {
        CategoryDocument::Records(Vec::new())
    }

    /// Length when this is a sequence of any kind.
    pub fn len(&self) -> Option<usize> {
        match self {
            CategoryDocument::Records(rows) => Some(rows.len()),
            CategoryDocument::Value(Value::Array(items)) => Some(items.len()),
            CategoryDocument::Value(_) => None,
        }
    }

    /// The only shape allowed to overwrite an existing category.
    pub fn is_non_empty_sequence(&self) -> bool {
        self.len().is_some_and(|n| n > 0)
    }

    pub fn to_value(&self) -> Value {
        match self {
            CategoryDocument::Records(rows) => Value::Array(rows.iter().map(Record::to_value).collect()),
            CategoryDocument::Value(v) => v.clone(),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            CategoryDocument::Value(v) => v,
            records => records.to_value(),
        }
    }
}

/// Loose truthiness as the page scripts see it: null, false, 0 and ""
/// are "nothing"; arrays and objects always count, even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/* ---------------- Site document ---------------- */

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteDocument {
    fields: Map<String, Value>,
}

impl SiteDocument {
    /// Parse site-data.json. The top level has to be an object.
    pub fn from_json(text: &str) -> SourceResult<Self> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(SourceError::NotAnObject),
        }
    }

    pub fn category(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn set_category(&mut self, name: &str, doc: CategoryDocument) {
        self.fields.insert(s!(name), doc.into_value());
    }

    /// Array entries of a category; missing or non-array → empty.
    pub fn items(&self, name: &str) -> &[Value] {
        match self.fields.get(name) {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        }
    }

    pub fn to_json_pretty(&self) -> SourceResult<String> {
        Ok(serde_json::to_string_pretty(&self.fields)?)
    }

    /// Built-in document used when site-data.json cannot be loaded, so the
    /// pages always have organization info and one sample of each list.
    pub fn fallback() -> Self {
        let doc = json!({
            "organization": {
                "name": "社團法人宜蘭縣長期照護及社會福祉推廣協會",
                "shortName": "社團法人宜蘭縣長期照護及社會福祉推廣協會",
                "tagline": "專業照護、在地深耕、溫暖相伴",
                "stats": { "served": 5000, "years": 10, "locations": 8 }
            },
            "serviceTypes": [
                {
                    "id": "elder-care",
                    "name": "長者照顧服務",
                    "shortDescription": "提供日間照顧服務，讓長者在熟悉的社區環境中獲得生活照顧、健康促進及休閒社會參與活動。",
                    "icon": "ph-house",
                    "serviceItems": ["日間照顧", "健康促進", "社會參與"]
                },
                {
                    "id": "dementia-center",
                    "name": "失智社區服務據點",
                    "shortDescription": "提供在地化之失智照護與支持服務，協助長者維持生活功能。",
                    "icon": "ph-brain",
                    "serviceItems": ["認知促進", "共餐服務", "照顧者支持"]
                },
                {
                    "id": "assistive-devices",
                    "name": "輔具資源服務",
                    "shortDescription": "提供單一窗口之輔具服務，協助民眾獲得適當輔具。",
                    "icon": "ph-wheelchair",
                    "serviceItems": ["輔具借用", "輔具評估", "居家無障礙評估"]
                }
            ],
            "serviceLocations": [
                {
                    "id": "babao",
                    "name": "八寶社區長照機構",
                    "locationType": "長照機構",
                    "township": "冬山",
                    "address": "宜蘭縣冬山鄉八寶路 25 號",
                    "phone": "+886 3 958 1020",
                    "serviceHours": "週一至週五 08:00-17:00"
                }
            ],
            "news": [
                {
                    "id": "news-001",
                    "title": "歡迎蒞臨本會官方網站",
                    "category": "公告",
                    "summary": "社團法人宜蘭縣長期照護及社會福祉推廣協會官方網站正式上線。",
                    "publishDate": "2026-02-10"
                }
            ]
        });

        match doc {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }
}

/* ---------------- Site state ---------------- */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Uninitialized,
    /// Baseline from site-data.json.
    Populated,
    /// Baseline is the built-in fallback document.
    Fallback,
    /// At least one category was overwritten from a remote source.
    Patched,
}

/// Owner of the merged document. Passed by reference to the resolver and
/// to whatever renders the pages.
#[derive(Clone, Debug, Default)]
pub struct SiteState {
    document: Option<SiteDocument>,
    phase: Phase,
}

impl SiteState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn document(&self) -> Option<&SiteDocument> {
        self.document.as_ref()
    }

    /// Document for readers; installs the fallback if nothing was loaded.
    pub fn document_or_fallback(&mut self) -> &SiteDocument {
        if self.document.is_none() {
            self.install_fallback();
        }
        self.document.get_or_insert_with(SiteDocument::fallback)
    }

    pub fn populate(&mut self, doc: SiteDocument) {
        self.document = Some(doc);
        self.phase = Phase::Populated;
    }

    /// Cache `doc` only when nothing is cached yet. Returns whether it was kept.
    pub fn populate_if_empty(&mut self, doc: SiteDocument) -> bool {
        if self.document.is_some() {
            return false;
        }
        self.populate(doc);
        true
    }

    pub fn install_fallback(&mut self) {
        self.document = Some(SiteDocument::fallback());
        self.phase = Phase::Fallback;
    }

    /// Cached entry for `category`, if present and not null/false/0/"".
    pub fn cached_category(&self, category: &str) -> Option<&Value> {
        self.document
            .as_ref()?
            .category(category)
            .filter(|v| is_truthy(v))
    }

    /// Overwrite `category` with `doc` only if `doc` is a non-empty sequence.
    /// Anything else leaves the current value untouched.
    pub fn merge_category(&mut self, category: &str, doc: CategoryDocument) -> bool {
        if !doc.is_non_empty_sequence() {
            logd!("keeping existing {category}: replacement is empty");
            return false;
        }
        self.document
            .get_or_insert_with(SiteDocument::default)
            .set_category(category, doc);
        self.phase = Phase::Patched;
        true
    }
}
