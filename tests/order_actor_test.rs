//! The real Order store, run against mocked customer and product stores.

use chrono::{TimeZone, Utc};
use crm::clients::{CustomerClient, OrderClient, ProductClient};
use crm::customer_actor::CustomerError;
use crm::model::{Customer, CustomerId, Order, OrderCreate, Product, ProductId};
use crm::order_actor::OrderError;
use crm::product_actor::ProductError;
use record_store::mock::MockStore;
use record_store::{RecordClient, StoreError};
use rust_decimal::Decimal;

fn alice() -> Customer {
    Customer {
        id: CustomerId(1),
        name: "Alice".into(),
        email: "alice@example.com".into(),
        phone: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn product(id: u32, cents: i64) -> Product {
    Product {
        id: ProductId(id),
        name: format!("Product {id}"),
        price: Decimal::new(cents, 2),
        stock: 5,
    }
}

fn params(product_ids: Vec<u32>) -> OrderCreate {
    OrderCreate {
        customer_id: CustomerId(1),
        product_ids: product_ids.into_iter().map(ProductId).collect(),
        order_date: Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap(),
    }
}

fn spawn_orders(customers: &MockStore<Customer>, products: &MockStore<Product>) -> OrderClient {
    let (store, client) = crm::order_actor::new(8);
    tokio::spawn(store.run((
        CustomerClient::new(customers.client()),
        ProductClient::new(products.client()),
    )));
    client
}

#[tokio::test]
async fn order_total_is_the_sum_of_resolved_prices() {
    let mut customers = MockStore::<Customer>::new();
    let mut products = MockStore::<Product>::new();
    customers.expect_get(CustomerId(1)).return_ok(Some(alice()));
    products
        .expect_get_many()
        .return_ok(vec![product(1, 1000), product(3, 550)]);

    let orders = spawn_orders(&customers, &products);
    let order: Order = orders.create_order(params(vec![1, 2, 3])).await.unwrap();

    assert_eq!(order.total_amount, Decimal::new(1550, 2));
    assert_eq!(order.product_ids, vec![ProductId(1), ProductId(3)]);
    assert_eq!(orders.get(order.id).await.unwrap(), Some(order));

    customers.verify();
    products.verify();
}

#[tokio::test]
async fn unknown_customer_stops_before_products() {
    let mut customers = MockStore::<Customer>::new();
    let products = MockStore::<Product>::new();
    customers.expect_get(CustomerId(1)).return_ok(None);

    let orders = spawn_orders(&customers, &products);
    let err = orders.create_order(params(vec![1])).await.unwrap_err();

    assert_eq!(err, OrderError::CustomerNotFound(CustomerId(1)));
    assert!(orders.list().await.unwrap().is_empty());
    customers.verify();
    products.verify();
}

#[tokio::test]
async fn no_resolved_products_is_rejected() {
    let mut customers = MockStore::<Customer>::new();
    let mut products = MockStore::<Product>::new();
    customers.expect_get(CustomerId(1)).return_ok(Some(alice()));
    products.expect_get_many().return_ok(vec![]);

    let orders = spawn_orders(&customers, &products);
    let err = orders.create_order(params(vec![8, 9])).await.unwrap_err();

    assert_eq!(err, OrderError::NoValidProducts);
    assert_eq!(err.code(), "NoValidProducts");
}

#[tokio::test]
async fn dependency_failures_keep_their_type() {
    let mut customers = MockStore::<Customer>::new();
    let mut products = MockStore::<Product>::new();
    customers.expect_get(CustomerId(1)).return_ok(Some(alice()));
    products.expect_get_many().return_err(StoreError::StoreClosed);
    customers.expect_get(CustomerId(1)).return_err(StoreError::StoreClosed);

    let orders = spawn_orders(&customers, &products);

    let err = orders.create_order(params(vec![1])).await.unwrap_err();
    assert!(matches!(err, OrderError::Product(ProductError::StoreUnavailable(_))));
    assert_eq!(err.code(), "UnknownError");

    let err = orders.create_order(params(vec![1])).await.unwrap_err();
    assert!(matches!(err, OrderError::Customer(CustomerError::StoreUnavailable(_))));

    // Failed creates do not consume IDs.
    customers.expect_get(CustomerId(1)).return_ok(Some(alice()));
    products.expect_get_many().return_ok(vec![product(1, 100)]);
    let order = orders.create_order(params(vec![1])).await.unwrap();
    assert_eq!(order.id.0, 1);
}

#[tokio::test]
async fn overflowing_total_is_rejected_and_the_store_keeps_running() {
    let huge: Decimal = "50000000000000000000000000000".parse().unwrap();
    let mut customers = MockStore::<Customer>::new();
    let mut products = MockStore::<Product>::new();
    customers.expect_get(CustomerId(1)).return_ok(Some(alice()));
    products.expect_get_many().return_ok(vec![
        Product { price: huge, ..product(1, 0) },
        Product { price: huge, ..product(2, 0) },
    ]);

    let orders = spawn_orders(&customers, &products);
    let err = orders.create_order(params(vec![1, 2])).await.unwrap_err();
    assert_eq!(err, OrderError::TotalOverflow);
    assert_eq!(err.code(), "TotalOverflow");

    customers.expect_get(CustomerId(1)).return_ok(Some(alice()));
    products.expect_get_many().return_ok(vec![product(1, 100)]);
    let order = orders.create_order(params(vec![1])).await.unwrap();
    assert_eq!(order.id.0, 1);
    assert_eq!(order.total_amount, Decimal::ONE);
}
