use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub base_path: String,
}

impl AppState {
    pub fn new(db: SqlitePool, base_path: impl Into<String>) -> Self {
        Self {
            db,
            base_path: base_path.into(),
        }
    }

    pub fn list_url(&self) -> String {
        format!("{}/", self.base_path)
    }
}
