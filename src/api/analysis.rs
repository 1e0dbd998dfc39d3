use crate::error::{AppError, Result};
use crate::types::AggregateResult;
use crate::AppState;
use axum::{
    extract::{RawQuery, State},
    routing::any,
    Json, Router,
};
use serde::Serialize;

/// Response envelope. `error` is empty on success.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub error: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            error: String::new(),
            data,
        }
    }
}

/// First non-empty `commodity` value of a query string. Repeated keys are
/// allowed; later values are ignored.
pub fn commodity_param(query: Option<&str>) -> Result<String> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query.unwrap_or_default())
        .map_err(|e| AppError::BadRequest(format!("invalid query string: {}", e)))?;

    pairs
        .into_iter()
        .find(|(key, _)| key == "commodity")
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::BadRequest("commodity must be specified".to_string()))
}

/// GET /api/v1?commodity=gold
///
/// Any method and any path below `/api/v1` is served the same way.
async fn get_analysis(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<ApiResponse<AggregateResult>>> {
    let commodity = commodity_param(query.as_deref())?;

    let result = state.analysis.analyze(&commodity).await?;
    Ok(Json(ApiResponse::ok(result)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1", any(get_analysis))
        .route("/api/v1/*rest", any(get_analysis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commodity_param() {
        assert_eq!(commodity_param(Some("commodity=gold")).unwrap(), "gold");
        assert_eq!(
            commodity_param(Some("x=1&commodity=Crude%20oil")).unwrap(),
            "Crude oil"
        );
    }

    #[test]
    fn test_commodity_param_first_value_wins() {
        assert_eq!(
            commodity_param(Some("commodity=gold&commodity=silver")).unwrap(),
            "gold"
        );
    }

    #[test]
    fn test_commodity_param_missing() {
        for query in [None, Some(""), Some("commodity="), Some("other=gold")] {
            match commodity_param(query) {
                Err(AppError::BadRequest(msg)) => assert_eq!(msg, "commodity must be specified"),
                other => panic!("expected bad request for {:?}, got {:?}", query, other),
            }
        }
    }

    #[test]
    fn test_envelope_serialization() {
        let json = serde_json::to_value(ApiResponse::ok(42)).unwrap();
        assert_eq!(json["error"], "");
        assert_eq!(json["data"], 42);
    }
}
