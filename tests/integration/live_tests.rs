//! Tests against a running backend
//!
//! Run with: TECHLAB_API_URL=http://host:port/api cargo test -- --ignored

use techlab_monitor::{
    config::ApiConfig,
    repository::{Backend, Repository},
};

fn live_repository() -> Repository {
    let base_url =
        std::env::var("TECHLAB_API_URL").unwrap_or_else(|_| "http://localhost:8080/api".to_string());
    Repository::new(&ApiConfig {
        base_url,
        timeout_secs: Some(10),
    })
    .expect("Failed to build repository")
}

#[tokio::test]
#[ignore]
async fn test_live_equipment_listing() {
    let equipment = live_repository()
        .list_equipment()
        .await
        .expect("Failed to list equipment");

    for record in &equipment {
        assert!(!record.name.is_empty());
    }
}

#[tokio::test]
#[ignore]
async fn test_live_specifications_of_first_equipment() {
    let repository = live_repository();
    let equipment = repository
        .list_equipment()
        .await
        .expect("Failed to list equipment");

    if let Some(first) = equipment.first() {
        repository
            .get_specifications(first.id)
            .await
            .expect("Failed to fetch specifications");
    }
}
