use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use crate::{error::AppResult, models::UserRank};

#[derive(Debug, Deserialize)]
struct InteractionRow {
    user_id: String,
    item_id: String,
}

#[derive(Debug, Clone, Default)]
struct UserRecord {
    interactions: usize,
    items: Vec<String>,
}

/// Items each user has interacted with, loaded once from the interaction log
#[derive(Debug, Clone, Default)]
pub struct UserHistory {
    users: HashMap<String, UserRecord>,
    total_interactions: usize,
}

impl UserHistory {
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;
        Self::from_csv(reader)
    }

    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        Self::from_csv(reader)
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> AppResult<Self> {
        let mut users: HashMap<String, UserRecord> = HashMap::new();
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut total_interactions = 0;

        for row in reader.deserialize::<InteractionRow>() {
            let row = row?;
            if row.user_id.is_empty() {
                continue;
            }

            total_interactions += 1;
            let record = users.entry(row.user_id.clone()).or_default();
            record.interactions += 1;

            if !row.item_id.is_empty() && seen.insert((row.user_id, row.item_id.clone())) {
                record.items.push(row.item_id);
            }
        }

        Ok(Self {
            users,
            total_interactions,
        })
    }

    /// Users ordered by interaction count, most active first
    ///
    /// Ties are broken by user id so the listing is stable between calls.
    pub fn ranked_users(&self) -> Vec<UserRank> {
        let mut ranked: Vec<UserRank> = self
            .users
            .iter()
            .map(|(user_id, record)| UserRank {
                user_id: user_id.clone(),
                count: record.interactions,
            })
            .collect();

        ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.user_id.cmp(&b.user_id)));
        ranked
    }

    /// Distinct items of a user in first-seen order, or `None` for an unknown user
    pub fn items_for(&self, user_id: &str) -> Option<&[String]> {
        self.users.get(user_id).map(|record| record.items.as_slice())
    }

    /// Number of interaction rows recorded for a user
    pub fn interaction_count(&self, user_id: &str) -> Option<usize> {
        self.users.get(user_id).map(|record| record.interactions)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn total_interactions(&self) -> usize {
        self.total_interactions
    }
}
