//! `orderBy` support.
//!
//! An `orderBy` string names one field, in snake_case or camelCase, with an
//! optional leading `-` for descending order. Each record type lists its sortable
//! fields as an explicit enum. Sorting is stable, so ties keep creation order.

use super::QueryError;
use crate::model::{Customer, Order, Product};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy<F> {
    pub field: F,
    pub direction: Direction,
}

/// A record that can be sorted by any of its `Field`s.
pub trait Sortable {
    type Field: Copy;

    /// Resolves a snake_case field name.
    fn field(name: &str) -> Option<Self::Field>;

    fn compare(&self, other: &Self, field: Self::Field) -> Ordering;
}

pub fn parse_order_by<T: Sortable>(spec: &str) -> Result<OrderBy<T::Field>, QueryError> {
    let (direction, name) = match spec.strip_prefix('-') {
        Some(name) => (Direction::Descending, name),
        None => (Direction::Ascending, spec),
    };
    T::field(&to_snake_case(name))
        .map(|field| OrderBy { field, direction })
        .ok_or_else(|| QueryError::InvalidOrderBy(spec.to_string()))
}

/// Sorts `records` in place. `None` or an empty string keeps creation order.
pub fn sort_records<T: Sortable>(records: &mut [T], order_by: Option<&str>) -> Result<(), QueryError> {
    let Some(spec) = order_by.filter(|s| !s.is_empty()) else {
        return Ok(());
    };
    let OrderBy { field, direction } = parse_order_by::<T>(spec)?;
    match direction {
        Direction::Ascending => records.sort_by(|a, b| a.compare(b, field)),
        Direction::Descending => records.sort_by(|a, b| b.compare(a, field)),
    }
    Ok(())
}

fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerField {
    Id,
    Name,
    Email,
    Phone,
    CreatedAt,
}

impl Sortable for Customer {
    type Field = CustomerField;

    fn field(name: &str) -> Option<CustomerField> {
        match name {
            "id" => Some(CustomerField::Id),
            "name" => Some(CustomerField::Name),
            "email" => Some(CustomerField::Email),
            "phone" => Some(CustomerField::Phone),
            "created_at" => Some(CustomerField::CreatedAt),
            _ => None,
        }
    }

    fn compare(&self, other: &Self, field: CustomerField) -> Ordering {
        match field {
            CustomerField::Id => self.id.cmp(&other.id),
            CustomerField::Name => self.name.cmp(&other.name),
            CustomerField::Email => self.email.cmp(&other.email),
            CustomerField::Phone => self.phone.cmp(&other.phone),
            CustomerField::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Id,
    Name,
    Price,
    Stock,
}

impl Sortable for Product {
    type Field = ProductField;

    fn field(name: &str) -> Option<ProductField> {
        match name {
            "id" => Some(ProductField::Id),
            "name" => Some(ProductField::Name),
            "price" => Some(ProductField::Price),
            "stock" => Some(ProductField::Stock),
            _ => None,
        }
    }

    fn compare(&self, other: &Self, field: ProductField) -> Ordering {
        match field {
            ProductField::Id => self.id.cmp(&other.id),
            ProductField::Name => self.name.cmp(&other.name),
            ProductField::Price => self.price.cmp(&other.price),
            ProductField::Stock => self.stock.cmp(&other.stock),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    Id,
    Customer,
    TotalAmount,
    OrderDate,
    Status,
}

impl Sortable for Order {
    type Field = OrderField;

    fn field(name: &str) -> Option<OrderField> {
        match name {
            "id" => Some(OrderField::Id),
            "customer" | "customer_id" => Some(OrderField::Customer),
            "total_amount" => Some(OrderField::TotalAmount),
            "order_date" => Some(OrderField::OrderDate),
            "status" => Some(OrderField::Status),
            _ => None,
        }
    }

    fn compare(&self, other: &Self, field: OrderField) -> Ordering {
        match field {
            OrderField::Id => self.id.cmp(&other.id),
            OrderField::Customer => self.customer_id.cmp(&other.customer_id),
            OrderField::TotalAmount => self.total_amount.cmp(&other.total_amount),
            OrderField::OrderDate => self.order_date.cmp(&other.order_date),
            OrderField::Status => self.status.cmp(&other.status),
        }
    }
}
