use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{AppData, CachedQuote, Habit};
use crate::notify::Permission;
use crate::storage::persist_data;

#[derive(Clone)]
pub struct HabitStore {
    path: PathBuf,
    data: Arc<Mutex<AppData>>,
}

impl HabitStore {
    pub fn new(path: PathBuf, data: AppData) -> Self {
        Self {
            path,
            data: Arc::new(Mutex::new(data)),
        }
    }

    pub async fn list(&self) -> Vec<Habit> {
        self.data.lock().await.habits.clone()
    }

    pub async fn add(&self, habit: Habit) -> Result<Habit, AppError> {
        let mut data = self.data.lock().await;
        data.habits.push(habit.clone());
        persist_data(&self.path, &data).await?;
        Ok(habit)
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let mut data = self.data.lock().await;
        let before = data.habits.len();
        data.habits.retain(|habit| habit.id != id);
        if data.habits.len() == before {
            return Ok(());
        }
        persist_data(&self.path, &data).await
    }

    pub async fn toggle(&self, id: Uuid) -> Result<Option<Habit>, AppError> {
        let mut data = self.data.lock().await;
        let updated = match data.habits.iter_mut().find(|habit| habit.id == id) {
            Some(habit) => {
                habit.completed = !habit.completed;
                if habit.completed {
                    habit.streak += 1;
                }
                habit.clone()
            }
            None => return Ok(None),
        };
        persist_data(&self.path, &data).await?;
        Ok(Some(updated))
    }

    pub async fn cached_quote(&self) -> Option<CachedQuote> {
        self.data.lock().await.daily_quote.clone()
    }

    pub async fn cache_quote(&self, quote: CachedQuote) -> Result<(), AppError> {
        let mut data = self.data.lock().await;
        data.daily_quote = Some(quote);
        persist_data(&self.path, &data).await
    }

    pub async fn set_permission(&self, permission: Permission) -> Result<(), AppError> {
        let mut data = self.data.lock().await;
        if data.permission == permission {
            return Ok(());
        }
        data.permission = permission;
        persist_data(&self.path, &data).await
    }
}
