//! Macro-generated test suite for `SaleStore` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//!
//! use store_harness::*;
//! use transactions::storage::InMemorySaleStore;
//!
//! sale_store_tests!(InMemorySaleStore::new());
//! ```
//!
//! # Generated Tests
//!
//! ## Writes
//! - `test_insert_many_and_count`: insert the sample set, count matches
//! - `test_insert_many_empty`: inserting nothing is a no-op
//! - `test_delete_all`: returns the number removed, store is empty after
//! - `test_replace_all_swaps_contents`: N records replaced by M leaves exactly M
//!
//! ## Find
//! - `test_find_month_ignores_year`: March of 2020, 2021 and 2022 all match
//! - `test_find_empty_month`: a month with no sales returns nothing
//! - `test_find_title_case_insensitive`: "blue" matches "Blue Widget"
//! - `test_find_description_substring`: description filter is a substring match
//! - `test_find_exact_price`: price equality, no tolerance
//! - `test_find_metacharacters_are_literal`: regex syntax in search terms is not interpreted
//! - `test_find_pagination_disjoint`: page 2 of 8 with limit 5 holds the last 3
//! - `test_find_page_past_end`: empty page, not an error
//! - `test_find_page_at_skip_limit`: the largest representable skip is an empty page

/// Generate a `SaleStore` conformance test suite.
///
/// `$factory` must evaluate to a fresh, empty store. It is re-evaluated for
/// each test.
#[macro_export]
macro_rules! sale_store_tests {
    ($factory:expr) => {
        mod sale_store_contract_tests {
            use super::*;
            use std::collections::HashSet;
            use transactions::core::month::Month;
            use transactions::core::query::{Pagination, RecordFilter};
            use transactions::core::service::SaleStore;

            // ==================================================================
            // Writes
            // ==================================================================

            #[tokio::test]
            async fn test_insert_many_and_count() {
                let store = $factory;

                let inserted = store.insert_many(sample_records()).await.unwrap();

                assert_eq!(inserted, 6);
                assert_eq!(store.count().await.unwrap(), 6);
            }

            #[tokio::test]
            async fn test_insert_many_empty() {
                let store = $factory;

                assert_eq!(store.insert_many(Vec::new()).await.unwrap(), 0);
                assert_eq!(store.count().await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_delete_all() {
                let store = $factory;
                store.insert_many(sample_records()).await.unwrap();

                assert_eq!(store.delete_all().await.unwrap(), 6);
                assert_eq!(store.count().await.unwrap(), 0);
                assert_eq!(store.delete_all().await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_replace_all_swaps_contents() {
                let store = $factory;
                store.insert_many(numbered_march_records(5)).await.unwrap();

                let inserted = store.replace_all(sample_records()).await.unwrap();

                assert_eq!(inserted, 6);
                assert_eq!(store.count().await.unwrap(), 6);
                let march = store
                    .find(&RecordFilter::for_month(Month::March), None)
                    .await
                    .unwrap();
                assert!(march.iter().all(|r| !r.title.starts_with("Item ")));
            }

            // ==================================================================
            // Find
            // ==================================================================

            #[tokio::test]
            async fn test_find_month_ignores_year() {
                let store = $factory;
                store.insert_many(sample_records()).await.unwrap();

                let found = store
                    .find(&RecordFilter::for_month(Month::March), None)
                    .await
                    .unwrap();

                let found: HashSet<String> = titles(&found).into_iter().collect();
                let expected: HashSet<String> =
                    ["Blue Widget", "Red Gadget", "Green Lamp", "Yellow Chair"]
                        .into_iter()
                        .map(String::from)
                        .collect();
                assert_eq!(found, expected);
            }

            #[tokio::test]
            async fn test_find_empty_month() {
                let store = $factory;
                store.insert_many(sample_records()).await.unwrap();

                let found = store
                    .find(&RecordFilter::for_month(Month::June), None)
                    .await
                    .unwrap();

                assert!(found.is_empty());
            }

            #[tokio::test]
            async fn test_find_title_case_insensitive() {
                let store = $factory;
                store.insert_many(sample_records()).await.unwrap();

                let filter = RecordFilter {
                    title: Some("blue".to_string()),
                    ..RecordFilter::for_month(Month::March)
                };
                let found = store.find(&filter, None).await.unwrap();
                assert_eq!(titles(&found), vec!["Blue Widget".to_string()]);

                let filter = RecordFilter {
                    title: Some("BLUE".to_string()),
                    ..RecordFilter::for_month(Month::July)
                };
                let found = store.find(&filter, None).await.unwrap();
                assert_eq!(titles(&found), vec!["Blue Jacket".to_string()]);
            }

            #[tokio::test]
            async fn test_find_description_substring() {
                let store = $factory;
                store.insert_many(sample_records()).await.unwrap();

                let filter = RecordFilter {
                    description: Some("Blue Shade".to_string()),
                    ..RecordFilter::for_month(Month::March)
                };
                let found = store.find(&filter, None).await.unwrap();

                assert_eq!(titles(&found), vec!["Green Lamp".to_string()]);
            }

            #[tokio::test]
            async fn test_find_exact_price() {
                let store = $factory;
                store.insert_many(sample_records()).await.unwrap();

                let filter = RecordFilter {
                    price: Some(101.0),
                    ..RecordFilter::for_month(Month::March)
                };
                let found = store.find(&filter, None).await.unwrap();
                assert_eq!(titles(&found), vec!["Red Gadget".to_string()]);

                let filter = RecordFilter {
                    price: Some(100.5),
                    ..RecordFilter::for_month(Month::March)
                };
                assert!(store.find(&filter, None).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_find_metacharacters_are_literal() {
                let store = $factory;
                store
                    .insert_many(vec![
                        sale("C++ (Pro)", "Compiler", 50.0, "software", true, sold_on(2021, 3, 2)),
                        sale("Cxx Pro", "Compiler", 50.0, "software", true, sold_on(2021, 3, 3)),
                    ])
                    .await
                    .unwrap();

                let filter = RecordFilter {
                    title: Some("++ (".to_string()),
                    ..RecordFilter::for_month(Month::March)
                };
                let found = store.find(&filter, None).await.unwrap();
                assert_eq!(titles(&found), vec!["C++ (Pro)".to_string()]);

                let filter = RecordFilter {
                    title: Some("c.. pro".to_string()),
                    ..RecordFilter::for_month(Month::March)
                };
                assert!(store.find(&filter, None).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_find_pagination_disjoint() {
                let store = $factory;
                store.insert_many(numbered_march_records(8)).await.unwrap();
                let filter = RecordFilter::for_month(Month::March);

                let first = store
                    .find(&filter, Some(Pagination::new(1, 5)))
                    .await
                    .unwrap();
                let second = store
                    .find(&filter, Some(Pagination::new(2, 5)))
                    .await
                    .unwrap();

                assert_eq!(first.len(), 5);
                assert_eq!(second.len(), 3);
                let first_ids: HashSet<&str> = first.iter().map(|r| r.id.as_str()).collect();
                assert!(second.iter().all(|r| !first_ids.contains(r.id.as_str())));
                assert_eq!(
                    titles(&second),
                    vec!["Item 5".to_string(), "Item 6".to_string(), "Item 7".to_string()]
                );
            }

            #[tokio::test]
            async fn test_find_page_past_end() {
                let store = $factory;
                store.insert_many(numbered_march_records(3)).await.unwrap();

                let found = store
                    .find(
                        &RecordFilter::for_month(Month::March),
                        Some(Pagination::new(4, 10)),
                    )
                    .await
                    .unwrap();

                assert!(found.is_empty());
            }

            #[tokio::test]
            async fn test_find_page_at_skip_limit() {
                let store = $factory;
                store.insert_many(numbered_march_records(3)).await.unwrap();

                let page = Pagination::new(u64::MAX, 100);
                assert_eq!(page.skip(), i64::MAX as u64);
                let found = store
                    .find(&RecordFilter::for_month(Month::March), Some(page))
                    .await
                    .unwrap();

                assert!(found.is_empty());
            }
        }
    };
}
