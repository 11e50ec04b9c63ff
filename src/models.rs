use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::notify::{Permission, ShowOutcome};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: Uuid,
    pub name: String,
    pub time: String,
    pub days: BTreeSet<u8>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub streak: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_quote: Option<CachedQuote>,
    #[serde(default)]
    pub permission: Permission,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedQuote {
    pub date: String,
    pub text: String,
    pub author: String,
}

#[derive(Debug, Deserialize)]
pub struct NewHabit {
    pub name: String,
    pub time: String,
    pub days: Vec<u8>,
    #[serde(default)]
    pub description: String,
}

impl NewHabit {
    pub fn into_habit(self) -> Result<Habit, String> {
        if self.name.trim().is_empty() {
            return Err("habit name must not be empty".to_string());
        }
        if !is_valid_time(&self.time) {
            return Err("reminder time must be a 24-hour HH:MM value".to_string());
        }
        if self.days.is_empty() {
            return Err("pick at least one reminder day".to_string());
        }
        if self.days.iter().any(|day| *day > 6) {
            return Err("reminder days must be 0 (Sunday) through 6 (Saturday)".to_string());
        }

        Ok(Habit {
            id: Uuid::new_v4(),
            name: self.name,
            time: self.time,
            days: self.days.into_iter().collect(),
            description: self.description,
            completed: false,
            streak: 0,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct PermissionRequest {
    pub permission: Permission,
}

#[derive(Debug, Serialize)]
pub struct PermissionResponse {
    pub permission: Permission,
}

#[derive(Debug, Serialize)]
pub struct TestNotificationResponse {
    pub outcome: ShowOutcome,
    pub permission: Permission,
}

pub fn is_valid_time(time: &str) -> bool {
    time.len() == 5
        && time.as_bytes()[2] == b':'
        && NaiveTime::parse_from_str(time, "%H:%M").is_ok()
}
