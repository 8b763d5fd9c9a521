use crate::models::AppData;
use crate::storage::load_data;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Shared handle to the reminder store. Handlers hold the lock for a whole
/// read or write so every selection pass sees one consistent snapshot.
#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
        }
    }

    pub async fn open(data_path: PathBuf) -> Self {
        let data = load_data(&data_path).await;
        Self::new(data_path, data)
    }
}
