//! Glyphs lens (Nerd Font icons)
//!
//! Same refresher mechanism as the files lens, but the source of truth
//! is a remote JSON table. A download happens only on cold start or when
//! the user asks for one.
//!
//! The durable copy is not the downloaded payload byte for byte: the store
//! re-encodes the decoded table in the upstream `name -> {char, code}`
//! shape, so the upstream `METADATA` record is not kept.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use crate::cache::{RefreshError, Refresher, Snapshot, Source, StartupRefresh, Store, StoreError};
use crate::config;
use crate::lens::{self, Lens, LensError, clipboard};
use crate::model::{ActionKind, ContextAction, Entry};

pub const NAME: &str = "Glyphs";
pub const NAMESPACE: &str = "glyphs";
pub const GLYPH_URL: &str =
    "https://raw.githubusercontent.com/ryanoasis/nerd-fonts/refs/heads/master/glyphnames.json";
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// One named glyph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub name: String,
    pub ch: String,
    pub code: String,
}

/// On-disk record shape: `{"name": {"char": "..", "code": ".."}}`
#[derive(Serialize)]
struct GlyphRecord<'a> {
    #[serde(rename = "char")]
    ch: &'a str,
    code: &'a str,
}

/// Decode a glyph table
///
/// Records without a `char` (such as the table's `METADATA` block) are
/// skipped. Output is sorted by name.
pub fn parse_table(data: &[u8]) -> Result<Vec<Glyph>, serde_json::Error> {
    let raw: BTreeMap<String, serde_json::Value> = serde_json::from_slice(data)?;
    Ok(raw
        .into_iter()
        .filter_map(|(name, record)| {
            let ch = record.get("char")?.as_str()?.to_string();
            let code = record
                .get("code")
                .and_then(|c| c.as_str())
                .unwrap_or_default()
                .to_string();
            Some(Glyph { name, ch, code })
        })
        .collect())
}

/// Encode glyphs back into the table format
pub fn encode_table(glyphs: &[Glyph]) -> Result<Vec<u8>, serde_json::Error> {
    let table: BTreeMap<&str, GlyphRecord<'_>> = glyphs
        .iter()
        .map(|g| {
            (
                g.name.as_str(),
                GlyphRecord {
                    ch: &g.ch,
                    code: &g.code,
                },
            )
        })
        .collect();
    serde_json::to_vec(&table)
}

/// Downloads the glyph table over HTTP
#[derive(Debug, Clone)]
pub struct GlyphDownloader {
    url: String,
}

impl GlyphDownloader {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Source<Glyph> for GlyphDownloader {
    fn compute(&self) -> Result<Vec<Glyph>, RefreshError> {
        tracing::info!(url = %self.url, "downloading glyph table");
        let client = reqwest::blocking::Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .build()?;
        let response = client.get(&self.url).send()?;
        if !response.status().is_success() {
            return Err(RefreshError::Status(response.status().as_u16()));
        }
        let body = response.bytes()?;
        Ok(parse_table(&body)?)
    }
}

/// Durable glyph table at `<cache>/lantern/glyphs/glyphnames.json`
///
/// Writes the decoded glyphs back in the upstream schema; records without a
/// `char` (such as `METADATA`) are gone by then.
#[derive(Debug, Clone)]
pub struct GlyphStore {
    path: PathBuf,
}

impl GlyphStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Store<Glyph> for GlyphStore {
    fn load(&self) -> Result<Snapshot<Glyph>, StoreError> {
        let (data, modified) = crate::cache::read_file(&self.path)?;
        Ok(Snapshot::taken_at(parse_table(&data)?, modified))
    }

    fn save(&self, items: &[Glyph]) -> Result<(), StoreError> {
        crate::cache::write_file(&self.path, &encode_table(items)?)
    }
}

/// Glyph search; Enter copies the glyph
#[derive(Debug)]
pub struct GlyphsLens {
    table: Refresher<Glyph>,
}

impl GlyphsLens {
    pub fn from_config() -> Self {
        let store = config::lens_cache_dir(NAMESPACE).map(|dir| {
            Box::new(GlyphStore::new(dir.join("glyphnames.json"))) as Box<dyn Store<Glyph>>
        });
        Self::new(Box::new(GlyphDownloader::new(GLYPH_URL)), store)
    }

    pub fn new(source: Box<dyn Source<Glyph>>, store: Option<Box<dyn Store<Glyph>>>) -> Self {
        Self {
            table: Refresher::open(NAMESPACE, source, store, StartupRefresh::WhenCold),
        }
    }

    pub fn table(&self) -> &Refresher<Glyph> {
        &self.table
    }
}

impl Lens for GlyphsLens {
    fn name(&self) -> &str {
        NAME
    }

    fn revision(&self) -> u64 {
        self.table.revision()
    }

    fn search(&self, query: &str) -> Result<Vec<Entry>, LensError> {
        let query = lens::normalize_query(query);
        let snapshot = self.table.current();
        Ok(snapshot
            .items()
            .iter()
            .filter(|g| lens::matches_query(&g.name, &query) || lens::matches_query(&g.ch, &query))
            .map(|g| Entry::new(&g.name, &g.name, &g.ch, format!("Code: {}", g.code)))
            .collect())
    }

    fn enter(&self, entry: &Entry) -> Result<(), LensError> {
        clipboard::copy_to_clipboard(&entry.icon)
    }

    fn context_actions(&self, entry: &Entry) -> Vec<ContextAction> {
        vec![ContextAction::new(
            "Redownload glyph table",
            entry.clone(),
            ActionKind::Refresh,
        )]
    }

    fn run_action(&self, action: &ContextAction) -> Result<(), LensError> {
        match action.kind {
            ActionKind::Refresh => {
                if !self.table.trigger_refresh() {
                    tracing::info!("glyph download already running");
                }
                Ok(())
            }
            _ => lens::run_standard_action(NAME, action),
        }
    }
}
