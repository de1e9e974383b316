use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Engineering")]
    pub name: String,

    #[schema(example = 7)]
    pub manager_id: i64,
}
