//! Catalog entity types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Top-level browsing tab. Each tab owns a fixed set of categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Patentes,
    Laboratorios,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Patentes, Tab::Laboratorios];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Patentes => "patentes",
            Self::Laboratorios => "laboratorios",
        }
    }

    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "patentes" => Some(Self::Patentes),
            "laboratorios" => Some(Self::Laboratorios),
            _ => None,
        }
    }

    /// Categories shown under this tab, in canonical order.
    pub fn categories(&self) -> &'static [Category] {
        match self {
            Self::Patentes => &Category::PATENT_TYPES,
            Self::Laboratorios => &Category::LAB_AREAS,
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dataset partition: a patent type or a laboratory area.
///
/// A record belongs to exactly one category, decided by the dataset file it
/// was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "patentes-invencao")]
    PatentesInvencao,
    #[serde(rename = "patentes-utilidade")]
    PatentesUtilidade,
    #[serde(rename = "desenhos-industriais")]
    DesenhosIndustriais,
    #[serde(rename = "programas-computadores")]
    ProgramasComputadores,
    #[serde(rename = "ciencias humanas")]
    CienciasHumanas,
    #[serde(rename = "ciencias biologicas")]
    CienciasBiologicas,
    #[serde(rename = "ciencias agrarias")]
    CienciasAgrarias,
    #[serde(rename = "ciencias exatas e da terra")]
    CienciasExatasETerra,
    #[serde(rename = "ciencias da saude")]
    CienciasSaude,
    #[serde(rename = "ciencias sociais aplicadas")]
    CienciasSociaisAplicadas,
}

impl Category {
    pub const PATENT_TYPES: [Category; 4] = [
        Category::PatentesInvencao,
        Category::PatentesUtilidade,
        Category::DesenhosIndustriais,
        Category::ProgramasComputadores,
    ];

    pub const LAB_AREAS: [Category; 6] = [
        Category::CienciasHumanas,
        Category::CienciasBiologicas,
        Category::CienciasAgrarias,
        Category::CienciasExatasETerra,
        Category::CienciasSaude,
        Category::CienciasSociaisAplicadas,
    ];

    /// Every category, patents first.
    pub fn all() -> impl Iterator<Item = Category> {
        Self::PATENT_TYPES
            .into_iter()
            .chain(Self::LAB_AREAS)
    }

    /// Canonical key, as used by the filter buttons.
    pub fn key(&self) -> &'static str {
        match self {
            Self::PatentesInvencao => "patentes-invencao",
            Self::PatentesUtilidade => "patentes-utilidade",
            Self::DesenhosIndustriais => "desenhos-industriais",
            Self::ProgramasComputadores => "programas-computadores",
            Self::CienciasHumanas => "ciencias humanas",
            Self::CienciasBiologicas => "ciencias biologicas",
            Self::CienciasAgrarias => "ciencias agrarias",
            Self::CienciasExatasETerra => "ciencias exatas e da terra",
            Self::CienciasSaude => "ciencias da saude",
            Self::CienciasSociaisAplicadas => "ciencias sociais aplicadas",
        }
    }

    pub fn tab(&self) -> Tab {
        match self {
            Self::PatentesInvencao
            | Self::PatentesUtilidade
            | Self::DesenhosIndustriais
            | Self::ProgramasComputadores => Tab::Patentes,
            _ => Tab::Laboratorios,
        }
    }

    /// Parse a canonical key. Laboratory areas are also accepted in their
    /// hyphenated form (`ciencias-da-saude`).
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase();
        Self::all().find(|c| c.key() == wanted || c.key().replace(' ', "-") == wanted)
    }

    /// Dataset file relative to the data root.
    pub fn dataset_path(&self) -> PathBuf {
        match self.tab() {
            Tab::Patentes => PathBuf::from("patentes").join(format!("{}.json", self.key())),
            Tab::Laboratorios => PathBuf::from("laboratorios").join(format!(
                "laboratorios-{}.json",
                self.key().replace(' ', "-")
            )),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Opaque record identifier; datasets use both strings and numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordId {
    Text(String),
    Number(serde_json::Number),
}

impl RecordId {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Text(s)),
            Value::Number(n) => Some(Self::Number(n)),
            _ => None,
        }
    }

    /// Text form, as handed to the detail page.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
        }
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Value of a field outside the known schema.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    /// String elements of a JSON array. Non-string elements are dropped.
    TextList(Vec<String>),
    /// Numbers, booleans, objects and null. Never searched.
    Other(Value),
}

impl FieldValue {
    /// String contents, empty for [`FieldValue::Other`].
    pub fn texts(&self) -> &[String] {
        match self {
            Self::Text(s) => std::slice::from_ref(s),
            Self::TextList(items) => items,
            Self::Other(_) => &[],
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::TextList(
                items
                    .into_iter()
                    .filter_map(|v| match v {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            other => Self::Other(other),
        }
    }
}

/// One catalog entry (patent or laboratory).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: Option<RecordId>,
    pub nome: Option<String>,
    pub titulo: Option<String>,
    pub natureza: Option<String>,
    /// Remaining fields, keyed by name.
    pub fields: BTreeMap<String, FieldValue>,
    pub category: Category,
}

impl Record {
    /// Build a record from one JSON object of a dataset.
    ///
    /// Known text fields holding a non-string value are treated as absent.
    pub fn from_json(category: Category, object: Map<String, Value>) -> Self {
        let mut record = Self {
            id: None,
            nome: None,
            titulo: None,
            natureza: None,
            fields: BTreeMap::new(),
            category,
        };
        for (key, value) in object {
            match key.as_str() {
                "id" => record.id = RecordId::from_value(value),
                "nome" => record.nome = text_value(value),
                "titulo" => record.titulo = text_value(value),
                "natureza" => record.natureza = text_value(value),
                _ => {
                    record.fields.insert(key, FieldValue::from(value));
                }
            }
        }
        record
    }

    /// Name used for sorting and labels: `nome`, then `titulo`, then "".
    pub fn display_name(&self) -> &str {
        self.nome
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.titulo.as_deref())
            .unwrap_or("")
    }

    /// Every string value that takes part in free-text search.
    pub fn searchable_text(&self) -> impl Iterator<Item = &str> {
        let id = match &self.id {
            Some(RecordId::Text(s)) => Some(s.as_str()),
            _ => None,
        };
        let known = [
            id,
            self.nome.as_deref(),
            self.titulo.as_deref(),
            self.natureza.as_deref(),
        ];
        let extra = self
            .fields
            .values()
            .flat_map(FieldValue::texts)
            .map(String::as_str);
        known.into_iter().flatten().chain(extra)
    }
}

fn text_value(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        _ => None,
    }
}
