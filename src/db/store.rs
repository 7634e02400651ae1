use crate::db::queries;
use crate::error::StoreError;
use crate::models::CatalogProduct;
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Deserialize;
use sqlx::PgPool;
use std::io::Read;
use std::path::Path;
use tokio::sync::RwLock;

/// 目录存储接口
///
/// 核心只依赖这两个读操作，不假设存储端能下推过滤/排序。
/// 重试与退避由具体实现自行决定，核心不重试。
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// 全量商品，按目录顺序
    async fn list_all_products(&self) -> Result<Vec<CatalogProduct>, StoreError>;

    async fn get_product_by_id(&self, id: &str) -> Result<Option<CatalogProduct>, StoreError>;
}

/// Postgres 目录
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn list_all_products(&self) -> Result<Vec<CatalogProduct>, StoreError> {
        let products = queries::list_all_products(&self.pool).await?;
        tracing::debug!("Loaded {} products from database", products.len());
        Ok(products)
    }

    async fn get_product_by_id(&self, id: &str) -> Result<Option<CatalogProduct>, StoreError> {
        Ok(queries::get_product_by_id(&self.pool, id).await?)
    }
}

/// CSV 目录行: id,name,points_value,carbon_emissions,plastic_usage
#[derive(Debug, Deserialize)]
struct CatalogCsvRow {
    id: String,
    name: String,
    points_value: i64,
    #[serde(default)]
    carbon_emissions: f64,
    #[serde(default)]
    plastic_usage: f64,
}

impl From<CatalogCsvRow> for CatalogProduct {
    fn from(row: CatalogCsvRow) -> Self {
        CatalogProduct::new(
            row.id,
            row.name,
            row.points_value,
            row.carbon_emissions,
            row.plastic_usage,
        )
    }
}

/// 内存目录 (保序)
///
/// IndexMap 按插入顺序遍历，插入顺序即目录顺序；同 ID 重复插入会原位替换。
#[derive(Default)]
pub struct MemoryCatalogStore {
    products: RwLock<IndexMap<String, CatalogProduct>>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_products(products: impl IntoIterator<Item = CatalogProduct>) -> Self {
        let products = products
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect::<IndexMap<_, _>>();
        Self {
            products: RwLock::new(products),
        }
    }

    /// 从 CSV 读取目录，文件行序即目录顺序
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, StoreError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut products = Vec::new();
        for row in csv_reader.deserialize::<CatalogCsvRow>() {
            let product = CatalogProduct::from(row?);
            if product.name.is_empty() {
                return Err(StoreError::Other(format!(
                    "product {} has an empty name",
                    product.id
                )));
            }
            products.push(product);
        }

        Ok(Self::from_products(products))
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let store = Self::from_csv_reader(file)?;
        tracing::info!("Loaded catalog from {}", path.display());
        Ok(store)
    }

    pub async fn upsert(&self, product: CatalogProduct) {
        let mut products = self.products.write().await;
        products.insert(product.id.clone(), product);
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn list_all_products(&self) -> Result<Vec<CatalogProduct>, StoreError> {
        let products = self.products.read().await;
        Ok(products.values().cloned().collect())
    }

    async fn get_product_by_id(&self, id: &str) -> Result<Option<CatalogProduct>, StoreError> {
        let products = self.products.read().await;
        Ok(products.get(id).cloned())
    }
}
