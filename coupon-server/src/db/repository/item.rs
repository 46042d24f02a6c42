//! Item Repository

use super::{RepoError, RepoResult};
use shared::models::{Item, ItemCreate};
use sqlx::SqlitePool;

use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Item>> {
    let row = sqlx::query_as::<_, Item>(
        "SELECT id, merchant_id, name, description, unit_price, created_at FROM item WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, merchant_id: i64, data: ItemCreate) -> RepoResult<Item> {
    let name = validate_required_text(Some(&data.name), "Name", MAX_NAME_LEN)
        .map_err(RepoError::Validation)?;
    validate_optional_text(data.description.as_deref(), "Description", MAX_NOTE_LEN)
        .map_err(RepoError::Validation)?;
    if !(data.unit_price >= 0.0) {
        return Err(RepoError::Validation(
            "unit_price must not be negative".into(),
        ));
    }
    let now = shared::util::now_millis();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO item (merchant_id, name, description, unit_price, created_at) VALUES (?1, ?2, ?3, ?4, ?5) RETURNING id",
    )
    .bind(merchant_id)
    .bind(name)
    .bind(&data.description)
    .bind(data.unit_price)
    .bind(now)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create item".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn test_create_item_validates_input() {
        let db = DbService::memory().await.unwrap();
        sqlx::query("INSERT INTO merchant (id, name) VALUES (1, 'A')")
            .execute(&db.pool)
            .await
            .unwrap();

        let item = create(
            &db.pool,
            1,
            ItemCreate { name: " Mug ".into(), description: None, unit_price: 12.5 },
        )
        .await
        .unwrap();
        assert_eq!(item.name, "Mug");
        assert_eq!(item.merchant_id, 1);

        let err = create(
            &db.pool,
            1,
            ItemCreate { name: "".into(), description: None, unit_price: 1.0 },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Validation(msg) if msg == "Name can't be blank"));

        let err = create(
            &db.pool,
            1,
            ItemCreate { name: "Lamp".into(), description: None, unit_price: -1.0 },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }
}
