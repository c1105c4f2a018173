use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::ListUsersFilter;
use crate::inbound::http::router::AppState;

/// Optional equality filters, e.g. `?city=London&language=English`
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    city: Option<String>,
    language: Option<String>,
}

impl From<ListUsersQuery> for ListUsersFilter {
    fn from(query: ListUsersQuery) -> Self {
        ListUsersFilter {
            city: query.city,
            language: query.language,
        }
    }
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    let filter = ListUsersFilter::from(query);

    state
        .user_service
        .list_users(&filter)
        .await
        .map_err(ApiError::from)
        .map(|users| ApiSuccess::new(StatusCode::OK, users.iter().map(UserData::from).collect()))
}
