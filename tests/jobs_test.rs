use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use crm::api::{ApiBoundary, ApiResponse, LocalApi, Operation, TransportError};
use crm::config::CrmConfig;
use crm::jobs::{
    register_jobs, FixedClock, HeartbeatJob, Job, LowStockJob, ManualScheduler, MemorySink,
    OrderRemindersJob, ReportJob,
};
use crm::lifecycle::CrmSystem;
use crm::model::{CustomerCreate, OrderCreate, OrderStatus, ProductCreate};
use rust_decimal::Decimal;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Answers each call with the next scripted result.
#[derive(Default)]
struct ScriptedApi {
    answers: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    calls: Mutex<Vec<&'static str>>,
}

impl ScriptedApi {
    fn answering(answers: Vec<Result<ApiResponse, TransportError>>) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.into()),
            calls: Mutex::default(),
        })
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApiBoundary for ScriptedApi {
    async fn execute(&self, operation: Operation) -> Result<ApiResponse, TransportError> {
        self.calls.lock().unwrap().push(operation.name());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected API call")
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap()
}

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(now()))
}

async fn run_heartbeat(answer: Result<ApiResponse, TransportError>) -> Vec<String> {
    let sink = MemorySink::new();
    let api = ScriptedApi::answering(vec![answer]);
    HeartbeatJob::new(api.clone(), Arc::new(sink.clone()), clock())
        .run()
        .await;
    assert_eq!(api.calls(), vec!["hello"]);
    sink.lines()
}

#[tokio::test]
async fn heartbeat_logs_ok_failed_and_error() {
    let ok = run_heartbeat(Ok(ApiResponse::ok(json!("Hello, GraphQL!")))).await;
    assert_eq!(ok, vec!["05/03/2024-14:07:09 CRM is alive (GraphQL OK)"]);

    let odd_body = run_heartbeat(Err(TransportError::UnreadableBody("expected value".into()))).await;
    assert_eq!(odd_body, vec!["05/03/2024-14:07:09 CRM is alive (GraphQL OK)"]);

    let failed = run_heartbeat(Err(TransportError::Status(503))).await;
    assert_eq!(failed, vec!["05/03/2024-14:07:09 CRM is alive (GraphQL FAILED 503)"]);

    let error = run_heartbeat(Err(TransportError::Network("connection refused".into()))).await;
    assert_eq!(
        error,
        vec!["05/03/2024-14:07:09 CRM is alive (GraphQL ERROR: connection refused)"]
    );
}

#[tokio::test]
async fn low_stock_job_logs_restocked_products() {
    let system = CrmSystem::new(8);
    for (name, stock) in [("Pen", 3), ("Desk", 12), ("Lamp", 9)] {
        system
            .products()
            .create_product(ProductCreate {
                name: name.into(),
                price: Decimal::new(500, 2),
                stock,
            })
            .await
            .unwrap();
    }

    let sink = MemorySink::new();
    let api = Arc::new(LocalApi::new(system.service()));
    LowStockJob::new(api, Arc::new(sink.clone()), clock()).run().await;

    assert_eq!(
        sink.lines(),
        vec![
            "05/03/2024-14:07:09 - 2 products updated successfully.",
            "  Updated: Pen -> Stock: 13",
            "  Updated: Lamp -> Stock: 19",
        ]
    );
}

#[tokio::test]
async fn low_stock_job_logs_api_errors() {
    let sink = MemorySink::new();
    let api = ScriptedApi::answering(vec![Ok(ApiResponse::error("UnknownError", "store down"))]);
    LowStockJob::new(api, Arc::new(sink.clone()), clock()).run().await;

    assert_eq!(sink.lines(), vec!["Error at 2024-03-05 14:07:09: UnknownError: store down"]);
}

async fn seed_customer(system: &CrmSystem, email: &str) -> crm::model::CustomerId {
    system
        .customers()
        .create_customer(CustomerCreate {
            name: "Ada".into(),
            email: email.into(),
            phone: None,
            created_at: now(),
        })
        .await
        .unwrap()
        .id
}

async fn seed_product(system: &CrmSystem, price: Decimal) -> crm::model::ProductId {
    system
        .products()
        .create_product(ProductCreate {
            name: "Widget".into(),
            price,
            stock: 5,
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn reminders_cover_recent_pending_orders_only() {
    let system = CrmSystem::new(8);
    let customer = seed_customer(&system, "ada@example.com").await;
    let product = seed_product(&system, Decimal::ONE).await;

    let place = |days_ago: i64| OrderCreate {
        customer_id: customer,
        product_ids: vec![product],
        order_date: now() - TimeDelta::days(days_ago),
    };
    let recent = system.orders().create_order(place(2)).await.unwrap();
    system.orders().create_order(place(10)).await.unwrap();
    let completed = system.orders().create_order(place(1)).await.unwrap();
    system
        .orders()
        .update_status(completed.id, OrderStatus::Completed)
        .await
        .unwrap();
    // Exactly on the cutoff still counts.
    let boundary = system.orders().create_order(place(7)).await.unwrap();

    let sink = MemorySink::new();
    let api = Arc::new(LocalApi::new(system.service()));
    OrderRemindersJob::new(api, Arc::new(sink.clone()), clock()).run().await;

    assert_eq!(
        sink.lines(),
        vec![
            "[2024-03-05 14:07:09] Processing 2 pending orders:".to_string(),
            format!("Order ID: {}, Customer Email: ada@example.com", recent.id.0),
            format!("Order ID: {}, Customer Email: ada@example.com", boundary.id.0),
        ]
    );
}

#[tokio::test]
async fn reminders_page_through_large_results() {
    let system = CrmSystem::new(8);
    let customer = seed_customer(&system, "bulk@example.com").await;
    let product = seed_product(&system, Decimal::ONE).await;
    for _ in 0..120 {
        system
            .orders()
            .create_order(OrderCreate {
                customer_id: customer,
                product_ids: vec![product],
                order_date: now(),
            })
            .await
            .unwrap();
    }

    let sink = MemorySink::new();
    let api = Arc::new(LocalApi::new(system.service()));
    OrderRemindersJob::new(api, Arc::new(sink.clone()), clock()).run().await;

    let lines = sink.lines();
    assert_eq!(lines.len(), 121);
    assert_eq!(lines[0], "[2024-03-05 14:07:09] Processing 120 pending orders:");
    assert_eq!(lines[120], "Order ID: 120, Customer Email: bulk@example.com");
}

#[tokio::test]
async fn reminders_log_fetch_failures() {
    let sink = MemorySink::new();
    let api = ScriptedApi::answering(vec![Err(TransportError::Network("timed out".into()))]);
    OrderRemindersJob::new(api, Arc::new(sink.clone()), clock()).run().await;

    assert_eq!(
        sink.lines(),
        vec!["[2024-03-05 14:07:09] ERROR: Failed to fetch orders - timed out"]
    );
}

#[tokio::test]
async fn report_logs_totals() {
    let system = CrmSystem::new(8);
    let customer = seed_customer(&system, "ada@example.com").await;
    let cheap = seed_product(&system, Decimal::new(550, 2)).await;
    let dear = seed_product(&system, Decimal::new(1000, 2)).await;
    for product_ids in [vec![cheap, dear], vec![dear]] {
        system
            .orders()
            .create_order(OrderCreate {
                customer_id: customer,
                product_ids,
                order_date: now(),
            })
            .await
            .unwrap();
    }

    let sink = MemorySink::new();
    let api = Arc::new(LocalApi::new(system.service()));
    ReportJob::new(api, Arc::new(sink.clone()), clock()).run().await;

    assert_eq!(
        sink.lines(),
        vec!["2024-03-05 14:07:09 - Report: 1 customers, 2 orders, 25.50 revenue"]
    );
}

#[tokio::test]
async fn report_stops_at_the_first_failure() {
    let sink = MemorySink::new();
    let api = ScriptedApi::answering(vec![
        Ok(ApiResponse::ok(json!(3))),
        Err(TransportError::Status(500)),
    ]);
    ReportJob::new(api.clone(), Arc::new(sink.clone()), clock()).run().await;

    assert_eq!(api.calls(), vec!["totalCustomers", "totalOrders"]);
    assert_eq!(sink.lines(), vec!["Error at 2024-03-05 14:07:09: HTTP 500"]);
}

#[tokio::test]
async fn registered_jobs_write_to_their_log_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = CrmConfig {
        log_dir: dir.path().to_path_buf(),
        ..CrmConfig::default()
    };
    let api = ScriptedApi::answering(vec![Ok(ApiResponse::ok(json!("Hello, GraphQL!")))]);

    let mut scheduler = ManualScheduler::new();
    register_jobs(&mut scheduler, &config, api, clock());

    assert_eq!(
        scheduler.registered(),
        vec![
            ("heartbeat", Duration::from_secs(300)),
            ("low-stock", Duration::from_secs(43_200)),
            ("order-reminders", Duration::from_secs(86_400)),
            ("report", Duration::from_secs(604_800)),
        ]
    );

    assert_eq!(scheduler.trigger("heartbeat").await, 1);
    let log = tokio::fs::read_to_string(dir.path().join("crm_heartbeat_log.txt"))
        .await
        .unwrap();
    assert_eq!(log, "05/03/2024-14:07:09 CRM is alive (GraphQL OK)\n");
}

#[tokio::test]
async fn heartbeat_counts_any_success_status_as_alive() {
    use axum::routing::post;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = axum::Router::new().route("/graphql", post(|| async { "not an envelope" }));
    tokio::spawn(async move { axum::serve(listener, app).await });

    let api = crm::api::HttpApi::new(format!("http://{addr}/graphql"), Duration::from_secs(5)).unwrap();
    let sink = MemorySink::new();
    HeartbeatJob::new(Arc::new(api), Arc::new(sink.clone()), clock())
        .run()
        .await;

    assert_eq!(sink.lines(), vec!["05/03/2024-14:07:09 CRM is alive (GraphQL OK)"]);
}
