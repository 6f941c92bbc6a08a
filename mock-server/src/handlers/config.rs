use axum::Json;

use crate::dto::RequiredConfigs;

/// Nothing is configurable in the mock, so nothing is ever missing.
pub(crate) async fn check_required() -> Json<RequiredConfigs> {
    Json(RequiredConfigs {
        has_required_configs: true,
        missing_configs: Vec::new(),
    })
}
