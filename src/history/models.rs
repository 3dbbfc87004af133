use serde::Serialize;
use utoipa::ToSchema;

use crate::db::WeatherQueryRecord;

/// Response wrapper for a user's lookup history
#[derive(Debug, Serialize, ToSchema)]
pub struct HistoryResponse {
    pub count: usize,
    pub queries: Vec<WeatherQueryRecord>,
}

impl From<Vec<WeatherQueryRecord>> for HistoryResponse {
    fn from(queries: Vec<WeatherQueryRecord>) -> Self {
        Self {
            count: queries.len(),
            queries,
        }
    }
}
