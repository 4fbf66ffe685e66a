//! Power lens
//!
//! Fixed list of session actions, each handed to `systemctl`.

use crate::lens::{self, Lens, LensError, launch};
use crate::model::{ContextAction, Entry};

pub const NAME: &str = "Power";
const SYSTEMCTL: &str = "systemctl";

/// One power action: (id, icon, description, systemctl verb)
const ACTIONS: &[(&str, &str, &str, &str)] = &[
    ("Shutdown", "⏻", "Power off the machine", "poweroff"),
    ("Reboot", "", "Restart the machine", "reboot"),
    ("Suspend", "󰤄", "Suspend to RAM", "suspend"),
];

#[derive(Debug, Default)]
pub struct PowerLens;

impl PowerLens {
    pub fn new() -> Self {
        Self
    }

    /// `systemctl` verb for an entry id
    pub fn verb_for(id: &str) -> Option<&'static str> {
        ACTIONS
            .iter()
            .find(|(name, ..)| *name == id)
            .map(|(.., verb)| *verb)
    }
}

impl Lens for PowerLens {
    fn name(&self) -> &str {
        NAME
    }

    fn search(&self, query: &str) -> Result<Vec<Entry>, LensError> {
        let query = lens::normalize_query(query);
        Ok(ACTIONS
            .iter()
            .filter(|(name, ..)| lens::matches_query(name, &query))
            .map(|(name, icon, description, _)| Entry::new(*name, *name, *icon, *description))
            .collect())
    }

    fn enter(&self, entry: &Entry) -> Result<(), LensError> {
        let verb =
            Self::verb_for(&entry.id).ok_or_else(|| LensError::UnknownEntry(entry.id.clone()))?;
        launch::spawn_detached(SYSTEMCTL, &[verb])
    }

    fn context_actions(&self, _entry: &Entry) -> Vec<ContextAction> {
        Vec::new()
    }
}
