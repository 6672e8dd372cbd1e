pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod validation;

pub use db::DbPool;

use config::Config;
use serde_json::Value;
use std::sync::Arc;

use crate::db::{DataLayer, Field};

pub struct AppState {
    pub config: Config,
    pub data: Arc<dyn DataLayer>,
}

impl AppState {
    pub fn new(config: Config, data: Arc<dyn DataLayer>) -> Self {
        Self { config, data }
    }

    /// The company named by the request, falling back to the configured default
    pub fn company(&self, requested: Option<String>) -> Option<String> {
        requested
            .filter(|c| !c.trim().is_empty())
            .or_else(|| self.config.company.default_name.clone())
    }

    /// Put the configured default company into a body that left it out
    pub fn fill_company(&self, field: &mut Field) {
        if validation::is_present(field) {
            return;
        }
        if let Some(name) = &self.config.company.default_name {
            *field = Some(Value::String(name.clone()));
        }
    }
}
