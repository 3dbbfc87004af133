use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::FavoriteCity;

/// POST /favorites body
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddFavoriteRequest {
    pub city: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FavoritesResponse {
    pub count: usize,
    pub favorites: Vec<FavoriteCity>,
}

impl From<Vec<FavoriteCity>> for FavoritesResponse {
    fn from(favorites: Vec<FavoriteCity>) -> Self {
        Self {
            count: favorites.len(),
            favorites,
        }
    }
}
