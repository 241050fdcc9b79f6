//! `ActorEntity` implementation for [`ProductRecord`].

use crate::framework::ActorEntity;
use crate::model::{Product, ProductCreate, ProductId, ProductRecord, ProductUpdate, Stock};
use crate::product_actor::{ProductAction, ProductError};
use async_trait::async_trait;

fn validate_price(price: f64) -> Result<f64, ProductError> {
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(ProductError::Invalid(format!("price {price}")))
    }
}

#[async_trait]
impl ActorEntity for ProductRecord {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = Stock;
    type Context = ();
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        if params.title.trim().is_empty() {
            return Err(ProductError::Invalid("empty title".to_string()));
        }
        let price = validate_price(params.price)?;
        Ok(ProductRecord {
            product: Product::new(id, params.title, price).with_image(params.image),
            stock: params.stock,
        })
    }

    /// Applies the `Some` fields of the update.
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(price) = update.price {
            self.product.price = validate_price(price)?;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: ProductAction, _ctx: &()) -> Result<Stock, Self::Error> {
        match action {
            ProductAction::CheckStock => Ok(self.stock()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(title: &str, price: f64) -> ProductCreate {
        ProductCreate {
            title: title.to_string(),
            price,
            image: "shoe.png".to_string(),
            stock: 4,
        }
    }

    #[test]
    fn test_create_validates_payload() {
        let record = ProductRecord::from_create_params(ProductId(1), params("Shoe", 99.5)).unwrap();
        assert_eq!(record.product.image, "shoe.png");
        assert_eq!(record.stock().amount, 4);

        assert!(ProductRecord::from_create_params(ProductId(2), params("  ", 1.0)).is_err());
        assert!(ProductRecord::from_create_params(ProductId(3), params("Shoe", -1.0)).is_err());
        assert!(ProductRecord::from_create_params(ProductId(4), params("Shoe", f64::NAN)).is_err());
    }

    #[tokio::test]
    async fn test_update_and_check_stock() {
        let mut record = ProductRecord::from_create_params(ProductId(1), params("Shoe", 10.0)).unwrap();
        record
            .on_update(
                ProductUpdate {
                    price: None,
                    stock: Some(9),
                },
                &(),
            )
            .await
            .unwrap();

        let stock = record.handle_action(ProductAction::CheckStock, &()).await.unwrap();
        assert_eq!(stock, Stock { id: ProductId(1), amount: 9 });
        assert_eq!(record.product.price, 10.0);

        let err = record
            .on_update(
                ProductUpdate {
                    price: Some(f64::INFINITY),
                    stock: None,
                },
                &(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::Invalid(_)));
    }
}
