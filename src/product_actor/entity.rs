//! [`Record`] implementation for [`Product`].
//!
//! Manual edits go through `on_update` with the same checks as creation. The
//! low-stock restock is a bulk action, so it runs against every product in one
//! atomic store step.

use super::{ProductAction, ProductActionResult, ProductError};
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::validation::{check_name, check_price, check_stock};
use async_trait::async_trait;
use record_store::Record;

#[async_trait]
impl Record for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            name: check_name(&params.name)?,
            price: check_price(params.price)?,
            stock: check_stock(params.stock)?,
        })
    }

    /// # Fields Updated
    /// - `price`: validated as positive
    /// - `stock`: validated as non-negative
    ///
    /// Both values are checked before either is applied.
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), Self::Error> {
        let price = update.price.map(check_price).transpose()?;
        let stock = update.stock.map(check_stock).transpose()?;
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(stock) = stock {
            self.stock = stock;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, Self::Error> {
        match action {
            ProductAction::Restock { below, amount } => {
                if self.stock >= below {
                    return Ok(ProductActionResult::Unchanged);
                }
                let stock = self
                    .stock
                    .checked_add(amount)
                    .ok_or_else(|| ProductError::StockOverflow {
                        name: self.name.clone(),
                        stock: self.stock,
                        amount,
                    })?;
                self.stock = stock;
                Ok(ProductActionResult::Restocked(self.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;
    use rust_decimal::Decimal;

    fn product(stock: u32) -> Product {
        Product {
            id: ProductId(1),
            name: "Laptop".into(),
            price: Decimal::new(99999, 2),
            stock,
        }
    }

    #[tokio::test]
    async fn restock_only_touches_low_stock() {
        let mut low = product(3);
        let mut high = product(12);

        let restocked = low.handle_action(ProductAction::low_stock_restock(), &()).await.unwrap();
        let unchanged = high.handle_action(ProductAction::low_stock_restock(), &()).await.unwrap();

        assert!(matches!(restocked, ProductActionResult::Restocked(p) if p.stock == 13));
        assert!(matches!(unchanged, ProductActionResult::Unchanged));
        assert_eq!(high.stock, 12);
    }

    #[tokio::test]
    async fn update_is_validated_before_applying() {
        let mut p = product(5);
        let err = p
            .on_update(
                ProductUpdate {
                    price: Some(Decimal::new(500, 2)),
                    stock: Some(-4),
                },
                &(),
            )
            .await
            .unwrap_err();

        assert_eq!(err, ProductError::Invalid(ValidationError::InvalidStock(-4)));
        assert_eq!(p.price, Decimal::new(99999, 2));
    }

    #[test]
    fn create_rejects_non_positive_price() {
        let err = Product::from_create_params(
            ProductId(1),
            ProductCreate {
                name: "Free".into(),
                price: Decimal::ZERO,
                stock: 0,
            },
        )
        .unwrap_err();
        assert_eq!(err.code(), "InvalidPrice");
    }
}
