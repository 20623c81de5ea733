//! JSON-backed cabin store
//!
//! Records live in a single JSON file at the configured path. Every
//! mutation persists immediately; there is no in-memory-only state to
//! lose. A missing file is seeded with sample cabins on first load.

use crate::model::cabin::Cabin;
use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::PathBuf;

pub struct CabinStore {
    path: PathBuf,
    cabins: Vec<Cabin>,
    next_id: u64,
}

impl CabinStore {
    /// Load the store from `path`, seeding sample records when the file
    /// does not exist yet.
    pub fn load_or_seed(path: PathBuf) -> Result<Self> {
        let cabins = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("reading cabin data from {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("parsing cabin data in {}", path.display()))?
        } else {
            tracing::info!(path = %path.display(), "no cabin data found, seeding samples");
            seed_cabins()
        };
        let next_id = cabins.iter().map(|c: &Cabin| c.id).max().unwrap_or(0) + 1;
        let store = Self {
            path,
            cabins,
            next_id,
        };
        store.save()?;
        Ok(store)
    }

    pub fn cabins(&self) -> &[Cabin] {
        &self.cabins
    }

    pub fn len(&self) -> usize {
        self.cabins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cabins.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Cabin> {
        self.cabins.iter().find(|cabin| cabin.id == id)
    }

    /// Insert a new record, assigning its id and creation time.
    pub fn create(&mut self, mut cabin: Cabin) -> Result<u64> {
        cabin.id = self.next_id;
        cabin.created_at = Local::now();
        self.next_id += 1;
        let id = cabin.id;
        tracing::info!(id, name = %cabin.name, "cabin created");
        self.cabins.push(cabin);
        self.save()?;
        Ok(id)
    }

    /// Replace the record with the same id.
    pub fn update(&mut self, cabin: Cabin) -> Result<()> {
        let Some(slot) = self.cabins.iter_mut().find(|c| c.id == cabin.id) else {
            anyhow::bail!("no cabin with id {}", cabin.id);
        };
        tracing::info!(id = cabin.id, name = %cabin.name, "cabin updated");
        *slot = cabin;
        self.save()
    }

    pub fn delete(&mut self, id: u64) -> Result<()> {
        let before = self.cabins.len();
        self.cabins.retain(|cabin| cabin.id != id);
        if self.cabins.len() == before {
            anyhow::bail!("no cabin with id {}", id);
        }
        tracing::info!(id, "cabin deleted");
        self.save()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating data directory {}", parent.display()))?;
            }
        }
        let contents = serde_json::to_string_pretty(&self.cabins)?;
        fs::write(&self.path, contents)
            .with_context(|| format!("writing cabin data to {}", self.path.display()))
    }
}

fn seed_cabins() -> Vec<Cabin> {
    let samples: [(&str, u32, f64, f64, &str); 4] = [
        ("Birch", 2, 250.0, 25.0, "Small cosy cabin by the lake"),
        ("Pine", 4, 350.0, 0.0, "Family cabin at the forest edge"),
        ("Cedar", 6, 450.0, 50.0, "Spacious cabin with a sauna"),
        ("Aspen", 8, 600.0, 0.0, "Group lodge with a fireplace hall"),
    ];
    samples
        .iter()
        .enumerate()
        .map(|(index, (name, capacity, price, discount, description))| Cabin {
            id: index as u64 + 1,
            name: (*name).into(),
            max_capacity: *capacity,
            regular_price: *price,
            discount: *discount,
            description: (*description).into(),
            created_at: Local::now(),
        })
        .collect()
}
