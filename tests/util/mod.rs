use catalog_search::model::types::{Category, Record};
use catalog_search::store::RecordStore;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Captures tracing output for tests.
#[allow(dead_code)]
pub struct TestTracing {
    buffer: std::sync::Arc<std::sync::Mutex<Vec<u8>>>,
}

#[allow(dead_code)]
impl TestTracing {
    pub fn new() -> Self {
        Self {
            buffer: std::sync::Arc::new(std::sync::Mutex::new(Vec::new())),
        }
    }

    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.buffer.clone();
        let make_writer = move || TestWriter(writer.clone());
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(make_writer)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn output(&self) -> String {
        let buf = self.buffer.lock().unwrap();
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Assert that the captured log output contains the provided substring.
    pub fn assert_contains(&self, needle: &str) {
        let out = self.output();
        assert!(
            out.contains(needle),
            "expected logs to contain `{needle}`, got:\n{out}"
        );
    }
}

struct TestWriter(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for TestWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut guard = self.0.lock().unwrap();
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Build one record of `category` from a JSON object literal.
#[allow(dead_code)]
pub fn record(category: Category, value: Value) -> Record {
    match value {
        Value::Object(m) => Record::from_json(category, m),
        other => panic!("record fixture must be an object, got {other}"),
    }
}

/// In-memory store from `(category, [objects])` pairs.
#[allow(dead_code)]
pub fn store_of(entries: &[(Category, Vec<Value>)]) -> RecordStore {
    let mut collections: HashMap<Category, Vec<Record>> = HashMap::new();
    for (category, values) in entries {
        collections
            .entry(*category)
            .or_default()
            .extend(values.iter().cloned().map(|v| record(*category, v)));
    }
    RecordStore::from_collections(collections)
}

/// On-disk catalog laid out like the published data directory.
///
/// Every category gets a dataset file; categories without fixture data get
/// an empty array.
#[allow(dead_code)]
pub struct CatalogFixture {
    pub dir: TempDir,
}

#[allow(dead_code)]
impl CatalogFixture {
    pub fn new(entries: &[(Category, Vec<Value>)]) -> Self {
        let dir = TempDir::new().expect("tempdir");
        for category in Category::all() {
            let values: Vec<Value> = entries
                .iter()
                .filter(|(c, _)| *c == category)
                .flat_map(|(_, v)| v.iter().cloned())
                .collect();
            write_dataset(dir.path(), category, &Value::Array(values).to_string());
        }
        Self { dir }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    pub fn overwrite(&self, category: Category, body: &str) {
        write_dataset(self.dir.path(), category, body);
    }

    pub fn remove(&self, category: Category) {
        std::fs::remove_file(self.dir.path().join(category.dataset_path())).expect("remove dataset");
    }
}

#[allow(dead_code)]
pub fn write_dataset(root: &Path, category: Category, body: &str) {
    let path = root.join(category.dataset_path());
    std::fs::create_dir_all(path.parent().expect("dataset parent")).expect("create data dir");
    std::fs::write(path, body).expect("write dataset");
}

/// Small catalog used across integration tests.
#[allow(dead_code)]
pub fn sample_entries() -> Vec<(Category, Vec<Value>)> {
    vec![
        (
            Category::PatentesUtilidade,
            vec![
                json!({"id": "pu-1", "nome": "Dispositivo Eletrônico", "natureza": "Patente", "inventores": ["Ana Lúcia"]}),
                json!({"id": "pu-2", "nome": "3D Printer", "natureza": "Patente"}),
                json!({"id": "pu-3", "nome": "Ábaco", "natureza": "Marca"}),
            ],
        ),
        (
            Category::PatentesInvencao,
            vec![
                json!({"id": "pi-1", "nome": "Zebra", "natureza": "Patente"}),
                json!({"id": "pi-2", "nome": "água", "ano": 2019}),
            ],
        ),
        (
            Category::DesenhosIndustriais,
            vec![
                json!({"id": 10, "nome": "cadeira ergonômica"}),
                json!({"id": 11, "titulo": "Luminária"}),
            ],
        ),
        (
            Category::ProgramasComputadores,
            vec![json!({"id": "pc-1", "nome": "lab-soft"})],
        ),
        (
            Category::CienciasSaude,
            vec![
                json!({"id": "ls-1", "nome": "laboratorio de imunologia", "coordenador": "José"}),
                json!({"id": "ls-2", "nome": "LABORATORIO DE FARMACOLOGIA"}),
            ],
        ),
        (
            Category::CienciasHumanas,
            vec![json!({"id": "lh-1", "nome": "nucleo de historia - campus centro"})],
        ),
    ]
}
