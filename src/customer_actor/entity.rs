//! [`Record`] implementation for [`Customer`].
//!
//! All field validation happens in `from_create_params`; email uniqueness is the
//! store's unique index, keyed on the validated email.

use super::CustomerError;
use crate::model::{Customer, CustomerCreate, CustomerId};
use crate::validation::{check_email, check_name, check_phone};
use async_trait::async_trait;
use record_store::Record;

#[async_trait]
impl Record for Customer {
    type Id = CustomerId;
    type Create = CustomerCreate;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = CustomerError;

    fn from_create_params(id: CustomerId, params: CustomerCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            name: check_name(&params.name)?,
            email: check_email(&params.email)?,
            phone: check_phone(params.phone.as_deref())?,
            created_at: params.created_at,
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.email.clone())
    }

    /// Customers are immutable once created.
    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}
