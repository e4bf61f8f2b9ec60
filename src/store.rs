//! The externally-owned client collection.
//!
//! The engine itself is stateless: it reads an immutable snapshot and every
//! mutation produces a whole replacement collection. `ClientStore` is the
//! owner of that collection — either purely in memory (sample mode) or
//! backed by a JSON snapshot file that is rewritten on every replace. The
//! real hosted backend plays this same role in production; its persistence
//! format is its own business.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{Client, ClientLog};
use crate::presets::sample_clients;
use crate::tasks;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read data file: {0}")]
    ReadError(String),
    #[error("Failed to parse data file: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Failed to write data file: {0}")]
    WriteError(String),
    #[error("Failed to create data directory: {0}")]
    DirectoryError(String),
    #[error("Unknown client: {0}")]
    UnknownClient(String),
    #[error("Unknown log entry: {0}")]
    UnknownLog(String),
}

pub struct ClientStore {
    clients: Vec<Client>,
    /// Backing snapshot file; `None` means in-memory only.
    path: Option<PathBuf>,
}

impl ClientStore {
    /// A store that never touches disk. Used for sample mode and tests.
    pub fn in_memory(clients: Vec<Client>) -> Self {
        Self {
            clients,
            path: None,
        }
    }

    /// Open a JSON-backed store, seeding the file with the sample
    /// collection when it doesn't exist yet.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StoreError::DirectoryError(e.to_string()))?;
            }
        }

        let mut store = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| StoreError::ReadError(e.to_string()))?;
            let clients: Vec<Client> = serde_json::from_str(&contents)?;
            info!(count = clients.len(), path = %path.display(), "loaded client snapshot");
            Self {
                clients,
                path: Some(path.to_path_buf()),
            }
        } else {
            info!(path = %path.display(), "no data file yet, seeding sample clients");
            Self {
                clients: sample_clients(),
                path: Some(path.to_path_buf()),
            }
        };

        store.persist()?;
        Ok(store)
    }

    /// Immutable snapshot handed to the derivation engine.
    pub fn snapshot(&self) -> &[Client] {
        &self.clients
    }

    /// Replace the whole collection (the only write primitive) and persist
    /// when file-backed.
    pub fn replace(&mut self, clients: Vec<Client>) -> Result<(), StoreError> {
        self.clients = clients;
        self.persist()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(&self.clients)?;
        std::fs::write(path, json).map_err(|e| StoreError::WriteError(e.to_string()))?;
        debug!(count = self.clients.len(), "persisted client snapshot");
        Ok(())
    }

    pub fn find_client(&self, client_id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == client_id)
    }

    fn owns_log(&self, log_id: &str) -> bool {
        self.clients
            .iter()
            .any(|c| c.logs.iter().any(|l| l.id == log_id))
    }

    /// Append a new client record.
    pub fn add_client(&mut self, client: Client) -> Result<(), StoreError> {
        let mut next = self.clients.clone();
        next.push(client);
        self.replace(next)
    }

    /// Replace one client record wholesale (how every detail edit lands).
    pub fn update_client(&mut self, updated: Client) -> Result<(), StoreError> {
        if self.find_client(&updated.id).is_none() {
            return Err(StoreError::UnknownClient(updated.id));
        }
        let next = self
            .clients
            .iter()
            .map(|c| if c.id == updated.id { updated.clone() } else { c.clone() })
            .collect();
        self.replace(next)
    }

    /// Append a follow-up log to one client.
    pub fn add_log(&mut self, client_id: &str, log: ClientLog) -> Result<(), StoreError> {
        if self.find_client(client_id).is_none() {
            return Err(StoreError::UnknownClient(client_id.to_string()));
        }
        let next = self
            .clients
            .iter()
            .map(|c| {
                let mut c = c.clone();
                if c.id == client_id {
                    c.logs.push(log.clone());
                }
                c
            })
            .collect();
        self.replace(next)
    }

    /// Clear the next action on one log entry.
    pub fn complete_task(&mut self, log_id: &str) -> Result<(), StoreError> {
        if !self.owns_log(log_id) {
            return Err(StoreError::UnknownLog(log_id.to_string()));
        }
        let next = tasks::complete_task(&self.clients, log_id);
        self.replace(next)
    }

    /// Move one log entry's next action to a new due date.
    pub fn postpone_task(&mut self, log_id: &str, new_due: NaiveDate) -> Result<(), StoreError> {
        if !self.owns_log(log_id) {
            return Err(StoreError::UnknownLog(log_id.to_string()));
        }
        let next = tasks::postpone_task(&self.clients, log_id, new_due);
        self.replace(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Urgency;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn open_seeds_sample_clients_when_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("clients.json");

        let store = ClientStore::open(&path).unwrap();
        assert_eq!(store.snapshot().len(), sample_clients().len());
        assert!(path.exists());
    }

    #[test]
    fn replace_persists_and_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clients.json");

        let mut store = ClientStore::open(&path).unwrap();
        let mut one = Client::new("测试客户".to_string());
        one.id = "only".to_string();
        one.urgency = Urgency::High;
        store.replace(vec![one]).unwrap();

        let reopened = ClientStore::open(&path).unwrap();
        assert_eq!(reopened.snapshot().len(), 1);
        assert_eq!(reopened.snapshot()[0].id, "only");
        assert_eq!(reopened.snapshot()[0].urgency, Urgency::High);
    }

    #[test]
    fn complete_task_clears_the_log_fields() {
        let mut store = ClientStore::in_memory(sample_clients());
        store.complete_task("c1-log-2").unwrap();

        let c1 = store.find_client("c1").unwrap();
        let log = c1.logs.iter().find(|l| l.id == "c1-log-2").unwrap();
        assert!(log.next_action.is_none());
        assert!(log.next_action_todo.is_none());
    }

    #[test]
    fn postpone_requires_a_known_log() {
        let mut store = ClientStore::in_memory(sample_clients());
        let err = store.postpone_task("no-such-log", date(2025, 3, 1)).unwrap_err();
        assert!(matches!(err, StoreError::UnknownLog(_)));
    }

    #[test]
    fn add_log_rejects_unknown_clients() {
        let mut store = ClientStore::in_memory(Vec::new());
        let err = store
            .add_log("ghost", ClientLog::new("跟进".to_string()))
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownClient(_)));
    }

    #[test]
    fn update_client_replaces_the_whole_record() {
        let mut store = ClientStore::in_memory(sample_clients());
        let mut edited = store.find_client("c2").unwrap().clone();
        edited.status = "看房中".to_string();
        edited.urgency = Urgency::High;
        store.update_client(edited).unwrap();

        let c2 = store.find_client("c2").unwrap();
        assert_eq!(c2.status, "看房中");
        assert_eq!(c2.urgency, Urgency::High);
    }
}
