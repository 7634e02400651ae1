use crate::models::CatalogProduct;
use sqlx::PgPool;

// 表结构:
//   products(seq BIGSERIAL, id TEXT PRIMARY KEY, name TEXT NOT NULL,
//            points_value BIGINT NOT NULL, carbon_emissions DOUBLE PRECISION NOT NULL,
//            plastic_usage DOUBLE PRECISION NOT NULL)
// 目录顺序 = seq 升序

/// 查询全部商品 (按目录顺序)
pub async fn list_all_products(pool: &PgPool) -> Result<Vec<CatalogProduct>, sqlx::Error> {
    sqlx::query_as::<_, CatalogProduct>(
        r#"
        SELECT id, name, points_value, carbon_emissions, plastic_usage
        FROM products
        ORDER BY seq ASC
        "#
    )
    .fetch_all(pool)
    .await
}

/// 按ID查询商品
pub async fn get_product_by_id(
    pool: &PgPool,
    id: &str,
) -> Result<Option<CatalogProduct>, sqlx::Error> {
    sqlx::query_as::<_, CatalogProduct>(
        r#"
        SELECT id, name, points_value, carbon_emissions, plastic_usage
        FROM products
        WHERE id = $1
        "#
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}
