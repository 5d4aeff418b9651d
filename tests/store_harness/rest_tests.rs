//! REST integration test macro for record store backends.
//!
//! The `rest_integration_tests!` macro drives the full router over a given
//! `SaleStore`: HTTP request → handler → TransactionService → store → JSON.
//! The seed feed is a `StaticSeedSource` holding [`sample_records`](super::sample_records).
//!
//! # Generated Tests
//!
//! ## Initialize
//! - `test_rest_initialize_created`: POST 201 with message and inserted count
//! - `test_rest_initialize_replaces_existing`: N stale records replaced by the 6 fixtures
//!
//! ## Listing
//! - `test_rest_list_defaults_to_march`: no params, March across years
//! - `test_rest_list_title_search`: "blue" matches "Blue Widget" only
//! - `test_rest_list_pagination`: page=2&limit=5 over 8 records returns 3
//!
//! ## Month reports
//! - `test_rest_statistics`: totals for March
//! - `test_rest_statistics_empty_month`: all zero
//! - `test_rest_price_range_boundaries`: 100/101/900/901 land in their bands
//! - `test_rest_category_distribution`: counts per category
//! - `test_rest_combined`: matches the three individual reports
#[macro_export]
macro_rules! rest_integration_tests {
    ($store_factory:expr) => {
        mod rest_integration_tests {
            use super::*;
            use axum::http::StatusCode;
            use axum_test::TestServer;
            use std::sync::Arc;
            use transactions::config::QueryConfig;
            use transactions::core::service::SaleStore;
            use transactions::server::build_router;
            use transactions::storage::StaticSeedSource;
            use transactions::transactions::TransactionService;

            async fn make_server() -> (TestServer, Arc<dyn SaleStore>) {
                let store: Arc<dyn SaleStore> = Arc::new($store_factory);
                let service = TransactionService::new(
                    store.clone(),
                    Arc::new(StaticSeedSource::new(sample_records())),
                    QueryConfig::default(),
                );
                (TestServer::new(build_router(service)), store)
            }

            async fn seeded_server() -> TestServer {
                let (server, _) = make_server().await;
                server
                    .post("/api/initialize")
                    .await
                    .assert_status(StatusCode::CREATED);
                server
            }

            // ==============================================================
            // Initialize
            // ==============================================================

            #[tokio::test]
            async fn test_rest_initialize_created() {
                let (server, store) = make_server().await;

                let response = server.post("/api/initialize").await;

                response.assert_status(StatusCode::CREATED);
                let body: serde_json::Value = response.json();
                assert_eq!(body["message"], "Database initialized successfully");
                assert_eq!(body["inserted"], 6);
                assert_eq!(store.count().await.unwrap(), 6);
            }

            #[tokio::test]
            async fn test_rest_initialize_replaces_existing() {
                let (server, store) = make_server().await;
                store.insert_many(numbered_march_records(4)).await.unwrap();

                server
                    .post("/api/initialize")
                    .await
                    .assert_status(StatusCode::CREATED);

                assert_eq!(store.count().await.unwrap(), 6);
                let body: serde_json::Value = server
                    .get("/api/transactions")
                    .add_query_param("title", "Item")
                    .await
                    .json();
                assert_eq!(body["nbHits"], 0);
            }

            // ==============================================================
            // Listing
            // ==============================================================

            #[tokio::test]
            async fn test_rest_list_defaults_to_march() {
                let server = seeded_server().await;

                let response = server.get("/api/transactions").await;

                response.assert_status(StatusCode::OK);
                let body: serde_json::Value = response.json();
                assert_eq!(body["nbHits"], 4);
                assert_eq!(body["products"].as_array().unwrap().len(), 4);
                let product = &body["products"][0];
                assert!(product["id"].is_string());
                assert!(product["dateOfSale"].is_string());
                assert!(product.get("image").is_none());
            }

            #[tokio::test]
            async fn test_rest_list_title_search() {
                let server = seeded_server().await;

                let body: serde_json::Value = server
                    .get("/api/transactions")
                    .add_query_param("title", "blue")
                    .add_query_param("month", "March")
                    .await
                    .json();

                assert_eq!(body["nbHits"], 1);
                assert_eq!(body["products"][0]["title"], "Blue Widget");
            }

            #[tokio::test]
            async fn test_rest_list_pagination() {
                let (server, store) = make_server().await;
                store.insert_many(numbered_march_records(8)).await.unwrap();

                let response = server
                    .get("/api/transactions")
                    .add_query_param("month", "march")
                    .add_query_param("page", "2")
                    .add_query_param("limit", "5")
                    .await;

                response.assert_status(StatusCode::OK);
                let body: serde_json::Value = response.json();
                assert_eq!(body["nbHits"], 3);
                assert_eq!(body["products"][0]["title"], "Item 5");
            }

            // ==============================================================
            // Month reports
            // ==============================================================

            #[tokio::test]
            async fn test_rest_statistics() {
                let server = seeded_server().await;

                let response = server
                    .get("/api/statistics")
                    .add_query_param("month", "March")
                    .await;

                response.assert_status(StatusCode::OK);
                let body: serde_json::Value = response.json();
                assert_eq!(body["totalSale"], 2002.0);
                assert_eq!(body["totalSoldItems"], 3);
                assert_eq!(body["totalUnsoldItems"], 1);
            }

            #[tokio::test]
            async fn test_rest_statistics_empty_month() {
                let server = seeded_server().await;

                let body: serde_json::Value = server
                    .get("/api/statistics")
                    .add_query_param("month", "June")
                    .await
                    .json();

                assert_eq!(body["totalSale"], 0.0);
                assert_eq!(body["totalSoldItems"], 0);
                assert_eq!(body["totalUnsoldItems"], 0);
            }

            #[tokio::test]
            async fn test_rest_price_range_boundaries() {
                let server = seeded_server().await;

                let response = server
                    .get("/api/price-range")
                    .add_query_param("month", "March")
                    .await;

                response.assert_status(StatusCode::OK);
                let body: serde_json::Value = response.json();
                let bands = body.as_object().unwrap();
                assert_eq!(bands.len(), 10);
                assert_eq!(body["0-100"], 1);
                assert_eq!(body["101-200"], 1);
                assert_eq!(body["801-900"], 1);
                assert_eq!(body["901-above"], 1);
                for label in ["201-300", "301-400", "401-500", "501-600", "601-700", "701-800"] {
                    assert_eq!(body[label], 0, "band {}", label);
                }
            }

            #[tokio::test]
            async fn test_rest_category_distribution() {
                let server = seeded_server().await;

                let body: serde_json::Value = server
                    .get("/api/category-distribution")
                    .add_query_param("month", "MAR")
                    .await
                    .json();

                let categories = body.as_object().unwrap();
                assert_eq!(categories.len(), 3);
                assert_eq!(body["home"], 2);
                assert_eq!(body["widgets"], 1);
                assert_eq!(body["gadgets"], 1);
            }

            #[tokio::test]
            async fn test_rest_combined() {
                let server = seeded_server().await;

                let combined: serde_json::Value = server
                    .get("/api/combined")
                    .add_query_param("month", "March")
                    .await
                    .json();
                let statistics: serde_json::Value = server
                    .get("/api/statistics")
                    .add_query_param("month", "March")
                    .await
                    .json();
                let price_range: serde_json::Value = server
                    .get("/api/price-range")
                    .add_query_param("month", "March")
                    .await
                    .json();
                let categories: serde_json::Value = server
                    .get("/api/category-distribution")
                    .add_query_param("month", "March")
                    .await
                    .json();

                assert_eq!(combined["statistics"], statistics);
                assert_eq!(combined["priceRange"], price_range);
                assert_eq!(combined["categoryDistribution"], categories);
            }
        }
    };
}
