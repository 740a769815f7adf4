//! Product Repository

use super::{RepoError, RepoResult};
use shared::models::{DashboardStats, Product, ProductCreate, ProductFilter, ProductUpdate};
use shared::util::now_millis;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const PRODUCT_SELECT: &str = "SELECT id, name, description, price, category, stock_quantity, image, is_active, created_at, updated_at FROM products";

/// Escape `%`, `_` and `\` so the search term matches literally
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Append the WHERE clause shared by listing and counting
fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &ProductFilter) {
    let mut has_where = false;
    if !filter.include_inactive {
        qb.push(" WHERE is_active = 1");
        has_where = true;
    }
    if let Some(search) = filter.search.as_deref() {
        qb.push(if has_where { " AND " } else { " WHERE " });
        qb.push("LOWER(name) LIKE LOWER(")
            .push_bind(like_pattern(search))
            .push(") ESCAPE '\\'");
    }
}

/// One page of products, newest first
pub async fn find_page(pool: &SqlitePool, filter: &ProductFilter) -> RepoResult<Vec<Product>> {
    let mut qb = QueryBuilder::<Sqlite>::new(PRODUCT_SELECT);
    push_filter(&mut qb, filter);
    qb.push(" ORDER BY created_at DESC, id DESC LIMIT ")
        .push_bind(filter.limit)
        .push(" OFFSET ")
        .push_bind(filter.offset());

    let rows = qb.build_query_as::<Product>().fetch_all(pool).await?;
    Ok(rows)
}

/// Number of products matching the filter, ignoring pagination
pub async fn count(pool: &SqlitePool, filter: &ProductFilter) -> RepoResult<i64> {
    let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM products");
    push_filter(&mut qb, filter);

    let total: i64 = qb.build_query_scalar().fetch_one(pool).await?;
    Ok(total)
}

/// Find a product by id, active or not
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let sql = format!("{PRODUCT_SELECT} WHERE id = ?");
    let product = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(product)
}

/// Whether an active product already uses `name` (case-insensitive)
///
/// `exclude_id` skips the product being edited.
pub async fn exists_active_name(
    pool: &SqlitePool,
    name: &str,
    exclude_id: Option<i64>,
) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar(
        "SELECT id FROM products WHERE LOWER(name) = LOWER(?) AND is_active = 1 AND (? IS NULL OR id != ?) LIMIT 1",
    )
    .bind(name)
    .bind(exclude_id)
    .bind(exclude_id)
    .fetch_optional(pool)
    .await?;
    Ok(found.is_some())
}

/// Insert an active product and return the stored row
pub async fn create(
    pool: &SqlitePool,
    data: &ProductCreate,
    image: Option<&str>,
) -> RepoResult<Product> {
    let now = now_millis();
    let id = sqlx::query(
        "INSERT INTO products (name, description, price, category, stock_quantity, image, is_active, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(&data.category)
    .bind(data.stock_quantity)
    .bind(image)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?
    .last_insert_rowid();

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database(format!("Product {id} missing after insert")))
}

/// Overwrite every field of a product
///
/// The image column is only replaced when `image` is `Some`.
/// Returns `false` when no row has this id.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: &ProductUpdate,
    image: Option<&str>,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE products SET name = ?, description = ?, price = ?, category = ?, stock_quantity = ?, is_active = ?, image = COALESCE(?, image), updated_at = ? WHERE id = ?",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(&data.category)
    .bind(data.stock_quantity)
    .bind(data.is_active)
    .bind(image)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();
    Ok(rows > 0)
}

/// Mark a product inactive; the row is kept
///
/// Returns `false` when no row has this id. Deleting an already inactive
/// product still succeeds.
pub async fn soft_delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE products SET is_active = 0, updated_at = ? WHERE id = ?")
        .bind(now_millis())
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(rows > 0)
}

/// Aggregate totals over active products
pub async fn stats(pool: &SqlitePool) -> RepoResult<DashboardStats> {
    let (total_products, total_value, total_quantity): (i64, f64, i64) = sqlx::query_as(
        "SELECT COUNT(*), CAST(COALESCE(SUM(price * stock_quantity), 0) AS REAL), CAST(COALESCE(SUM(stock_quantity), 0) AS INTEGER) FROM products WHERE is_active = 1",
    )
    .fetch_one(pool)
    .await?;

    Ok(DashboardStats {
        total_products,
        total_value,
        total_quantity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn test_pool() -> SqlitePool {
        DbService::in_memory().await.unwrap().pool
    }

    fn sample(name: &str, price: f64, stock: i64) -> ProductCreate {
        ProductCreate {
            name: name.to_string(),
            description: None,
            price,
            category: "Tools".to_string(),
            stock_quantity: stock,
        }
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("abc"), "%abc%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = test_pool().await;
        let created = create(&pool, &sample("Widget", 9.99, 5), Some("/uploads/image-a.png"))
            .await
            .unwrap();

        assert!(created.id > 0);
        assert!(created.is_active);
        assert_eq!(created.image.as_deref(), Some("/uploads/image-a.png"));
        assert_eq!(created.created_at, created.updated_at);

        let found = find_by_id(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert!(find_by_id(&pool, 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_active_name_is_unique_case_insensitive() {
        let pool = test_pool().await;
        create(&pool, &sample("Widget", 1.0, 1), None).await.unwrap();

        assert!(exists_active_name(&pool, "WIDGET", None).await.unwrap());
        let err = create(&pool, &sample("widget", 2.0, 1), None).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_soft_delete_frees_name() {
        let pool = test_pool().await;
        let first = create(&pool, &sample("Widget", 1.0, 1), None).await.unwrap();

        assert!(soft_delete(&pool, first.id).await.unwrap());
        assert!(!exists_active_name(&pool, "Widget", None).await.unwrap());

        let second = create(&pool, &sample("Widget", 2.0, 1), None).await.unwrap();
        assert_ne!(first.id, second.id);

        let old = find_by_id(&pool, first.id).await.unwrap().unwrap();
        assert!(!old.is_active);
        assert!(!soft_delete(&pool, 999).await.unwrap());
    }

    #[tokio::test]
    async fn test_exists_active_name_excludes_self() {
        let pool = test_pool().await;
        let p = create(&pool, &sample("Widget", 1.0, 1), None).await.unwrap();
        assert!(!exists_active_name(&pool, "widget", Some(p.id)).await.unwrap());
        assert!(exists_active_name(&pool, "widget", Some(p.id + 1)).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_keeps_image_when_none() {
        let pool = test_pool().await;
        let p = create(&pool, &sample("Widget", 1.0, 1), Some("/uploads/old.png"))
            .await
            .unwrap();

        let data = ProductUpdate {
            name: "Widget Pro".into(),
            description: Some("better".into()),
            price: 3.5,
            category: "Tools".into(),
            stock_quantity: 7,
            is_active: true,
        };
        assert!(update(&pool, p.id, &data, None).await.unwrap());
        let after = find_by_id(&pool, p.id).await.unwrap().unwrap();
        assert_eq!(after.name, "Widget Pro");
        assert_eq!(after.image.as_deref(), Some("/uploads/old.png"));
        assert_eq!(after.created_at, p.created_at);

        assert!(update(&pool, p.id, &data, Some("/uploads/new.png")).await.unwrap());
        let after = find_by_id(&pool, p.id).await.unwrap().unwrap();
        assert_eq!(after.image.as_deref(), Some("/uploads/new.png"));

        assert!(!update(&pool, 999, &data, None).await.unwrap());
    }

    #[tokio::test]
    async fn test_page_search_and_count() {
        let pool = test_pool().await;
        for name in ["Blue Pen", "Red Pen", "Stapler", "50% Off Pen"] {
            create(&pool, &sample(name, 1.0, 1), None).await.unwrap();
        }
        let hidden = create(&pool, &sample("Old Pen", 1.0, 1), None).await.unwrap();
        soft_delete(&pool, hidden.id).await.unwrap();

        let filter = ProductFilter {
            search: Some("pen".into()),
            ..Default::default()
        };
        assert_eq!(count(&pool, &filter).await.unwrap(), 3);

        let all = ProductFilter {
            search: Some("pen".into()),
            include_inactive: true,
            ..Default::default()
        };
        assert_eq!(count(&pool, &all).await.unwrap(), 4);

        let literal = ProductFilter {
            search: Some("%".into()),
            ..Default::default()
        };
        let rows = find_page(&pool, &literal).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "50% Off Pen");

        let page = ProductFilter {
            page: 2,
            limit: 2,
            ..Default::default()
        };
        let rows = find_page(&pool, &page).await.unwrap();
        assert_eq!(rows.len(), 2);
        // newest first: page 2 holds the two oldest active rows
        assert_eq!(rows[0].name, "Red Pen");
        assert_eq!(rows[1].name, "Blue Pen");
    }

    #[tokio::test]
    async fn test_stats_over_active_rows() {
        let pool = test_pool().await;
        assert_eq!(
            stats(&pool).await.unwrap(),
            DashboardStats {
                total_products: 0,
                total_value: 0.0,
                total_quantity: 0
            }
        );

        create(&pool, &sample("A", 2.5, 4), None).await.unwrap();
        create(&pool, &sample("B", 10.0, 1), None).await.unwrap();
        let c = create(&pool, &sample("C", 100.0, 100), None).await.unwrap();
        soft_delete(&pool, c.id).await.unwrap();

        let s = stats(&pool).await.unwrap();
        assert_eq!(s.total_products, 2);
        assert!((s.total_value - 20.0).abs() < 1e-9);
        assert_eq!(s.total_quantity, 5);
    }
}
