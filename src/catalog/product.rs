// Product detail resolution
//
// Each identifier on the current page gets its own slot. A slot starts in
// `Loading`, issues `get_items([id])`, and takes the first record of the
// reply. Slots are rebuilt for every page, so nothing is cached across them.

use crate::api::models::{Product, ProductId};
use crate::api::{ApiClient, ApiError};

/// Text shown while a product is being fetched
pub const LOADING_TEXT: &str = "Загрузка данных о продукте...";

/// Resolution state of one slot
#[derive(Debug, Clone, PartialEq)]
pub enum SlotState {
    Loading,
    Loaded(Product),
    /// The fetch failed or returned nothing; still renders as loading
    Failed,
}

/// One product on the current page
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSlot {
    pub id: ProductId,
    pub state: SlotState,
}

impl ProductSlot {
    pub fn new(id: ProductId) -> Self {
        Self {
            id,
            state: SlotState::Loading,
        }
    }

    /// Loaded record, if any
    pub fn product(&self) -> Option<&Product> {
        match &self.state {
            SlotState::Loaded(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        !matches!(self.state, SlotState::Loaded(_))
    }

    /// Apply the outcome of a detail fetch
    ///
    /// Failures are logged and leave the slot showing its placeholder.
    pub fn resolve(&mut self, result: Result<Option<Product>, ApiError>) {
        match result {
            Ok(Some(product)) => self.state = SlotState::Loaded(product),
            Ok(None) => {
                tracing::warn!("get_items returned no record for {}", self.id);
                self.state = SlotState::Failed;
            }
            Err(e) => {
                tracing::error!("Failed to fetch product {}: {}", self.id, e);
                self.state = SlotState::Failed;
            }
        }
    }

    /// Lines for the detail display: id, name, price, brand
    pub fn display_lines(&self) -> Vec<String> {
        match self.product() {
            Some(p) => vec![
                format!("ID: {}", p.id),
                format!("Название: {}", p.product),
                format!("Цена: {}", format_price(p.price)),
                format!("Бренд: {}", p.brand_display()),
            ],
            None => vec![LOADING_TEXT.to_string()],
        }
    }
}

/// Render a price without a trailing ".0" for whole amounts
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 && price.abs() < 1e15 {
        format!("{}", price as i64)
    } else {
        format!("{}", price)
    }
}

/// Fetch the record for one identifier
pub async fn fetch_product(client: &ApiClient, id: &ProductId) -> Result<Option<Product>, ApiError> {
    let mut items = client.get_items(std::slice::from_ref(id)).await?;
    if items.is_empty() {
        return Ok(None);
    }
    Ok(Some(items.swap_remove(0)))
}
