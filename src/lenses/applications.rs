//! Applications lens
//!
//! Launchers defined one per file in `<config>/lantern/applications/*.yaml`.

use std::path::Path;

use crate::config::{self, AppConfig};
use crate::lens::{self, Lens, LensError, launch};
use crate::model::{ActionKind, ContextAction, Entry};

pub const NAME: &str = "Applications";
pub const NAMESPACE: &str = "applications";

#[derive(Debug, Default)]
pub struct ApplicationsLens {
    apps: Vec<AppConfig>,
}

impl ApplicationsLens {
    pub fn from_config() -> Self {
        match config::lens_config_dir(NAMESPACE) {
            Some(dir) => Self::from_dir(&dir),
            None => Self::default(),
        }
    }

    pub fn from_dir(dir: &Path) -> Self {
        let apps = config::load_applications(dir);
        tracing::info!(count = apps.len(), "applications loaded");
        Self::new(apps)
    }

    pub fn new(apps: Vec<AppConfig>) -> Self {
        Self { apps }
    }

    fn find(&self, id: &str) -> Option<&AppConfig> {
        self.apps.iter().find(|app| app.name == id)
    }
}

impl Lens for ApplicationsLens {
    fn name(&self) -> &str {
        NAME
    }

    fn search(&self, query: &str) -> Result<Vec<Entry>, LensError> {
        let query = lens::normalize_query(query);
        Ok(self
            .apps
            .iter()
            .filter(|app| lens::matches_query(&app.name, &query))
            .map(|app| Entry::new(&app.name, &app.name, &app.icon, &app.description))
            .collect())
    }

    fn enter(&self, entry: &Entry) -> Result<(), LensError> {
        let app = self
            .find(&entry.id)
            .ok_or_else(|| LensError::UnknownEntry(entry.id.clone()))?;
        launch::spawn_shell(&app.command)
    }

    fn context_actions(&self, entry: &Entry) -> Vec<ContextAction> {
        self.find(&entry.id)
            .map(|app| {
                app.context
                    .iter()
                    .map(|ctx| {
                        ContextAction::new(
                            &ctx.name,
                            entry.clone(),
                            ActionKind::Command(ctx.command.clone()),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
