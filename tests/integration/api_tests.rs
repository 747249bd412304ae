//! Client tests against the stub API

use std::sync::Arc;

use techlab_monitor::{
    config::{ApiConfig, AppConfig},
    error::CONNECTION_MESSAGE,
    models::{LoginCredentials, SearchQuery, SpecificationKind},
    repository::{Backend, Repository},
    services::directory::StatusChange,
    AppError, AppState,
};

use crate::stub;

fn repository(base_url: &str) -> Repository {
    Repository::new(&ApiConfig {
        base_url: base_url.to_string(),
        timeout_secs: Some(5),
    })
    .expect("Failed to build repository")
}

fn app_state(base_url: &str) -> AppState {
    let mut config = AppConfig::default();
    config.api.base_url = base_url.to_string();
    config.api.timeout_secs = Some(5);
    AppState::new(config).expect("Failed to build state")
}

#[tokio::test]
async fn test_list_equipment() {
    let server = stub::spawn().await;
    let equipment = repository(&server.base_url).list_equipment().await.unwrap();

    assert_eq!(equipment.len(), 3);
    assert_eq!(equipment[1].name, "Laser");
    assert_eq!(equipment[1].quantity, None);
    assert!(equipment[2].is_in_use());
}

#[tokio::test]
async fn test_specification_shapes() {
    let server = stub::spawn().await;
    let repository = repository(&server.base_url);

    let kinds = [
        (1, SpecificationKind::ModelReference),
        (2, SpecificationKind::Cnc),
        (3, SpecificationKind::Software),
    ];
    for (id, kind) in kinds {
        let spec = repository.get_specifications(id).await.unwrap();
        assert_eq!(spec.kind(), kind, "equipment {}", id);
    }

    let cnc = repository.get_specifications(2).await.unwrap();
    assert_eq!(cnc.rows()[2].value, "1200 mm/min");
}

#[tokio::test]
async fn test_specifications_not_found() {
    let server = stub::spawn().await;
    let err = repository(&server.base_url)
        .get_specifications(42)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.user_message(), "Recurso no encontrado");
}

#[tokio::test]
async fn test_authenticate_encodes_query() {
    let server = stub::spawn().await;
    let repository = repository(&server.base_url);

    let user = repository
        .authenticate(&LoginCredentials::new("ana@uni.pe", "s3cret&1"))
        .await
        .unwrap();
    assert_eq!(user.id, 10);
    assert_eq!(user.full_name(), "Ana Quispe");

    let err = repository
        .authenticate(&LoginCredentials::new("ana@uni.pe", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Usuario no encontrado o credenciales incorrectas");
}

#[tokio::test]
async fn test_listings() {
    let server = stub::spawn().await;
    let repository = repository(&server.base_url);

    let loans = repository.list_loans().await.unwrap();
    assert_eq!(loans.len(), 1);
    assert_eq!(loans[0].id, Some(77));

    let users = repository.list_users().await.unwrap();
    assert_eq!(users[0].email, "ana@uni.pe");
}

#[tokio::test]
async fn test_connection_failure() {
    let err = repository("http://127.0.0.1:1/api")
        .list_equipment()
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Connection(_)));
    assert_eq!(err.user_message(), CONNECTION_MESSAGE);
}

#[tokio::test]
async fn test_filtered_view_after_load() {
    let server = stub::spawn().await;
    let mut state = app_state(&server.base_url);
    let directory = &mut state.services.directory;

    directory.load().await.unwrap();
    let view = directory.view(&SearchQuery::default().with_status("EN USO"));
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].name, "Laser");

    let facets = directory.facets();
    assert_eq!(facets.statuses.len(), 2);
    assert_eq!(facets.categories, vec!["CNC", "Computo", "Tools"]);
}

#[tokio::test]
async fn test_status_change_requires_login() {
    let server = stub::spawn().await;
    let mut state = app_state(&server.base_url);
    state.services.directory.load().await.unwrap();
    let before = state.services.directory.records().to_vec();

    let outcome = state.services.change_status(1, "EN USO").await.unwrap();

    assert_eq!(
        outcome,
        StatusChange::LoginRequired {
            revert_to: "DISPONIBLE".to_string()
        }
    );
    assert_eq!(state.services.directory.records(), before.as_slice());
    assert_eq!(server.state.loan_calls(), 0);
}

#[tokio::test]
async fn test_granted_loan_updates_row() {
    let server = stub::spawn().await;
    let mut state = app_state(&server.base_url);
    state.services.directory.load().await.unwrap();
    state
        .services
        .session
        .login(&LoginCredentials::new("ana@uni.pe", "s3cret&1"))
        .await
        .unwrap();
    let before = state.services.directory.records().to_vec();

    let outcome = state.services.change_status(1, "EN USO").await.unwrap();

    match outcome {
        StatusChange::Applied { record, loan } => {
            assert_eq!(record.status, "EN USO");
            assert_eq!(loan.id, Some(77));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    let after = state.services.directory.records();
    assert_eq!(after[0].status, "EN USO");
    assert_eq!(after[1..], before[1..]);
    assert_eq!(server.state.loan_calls(), 1);
}

#[tokio::test]
async fn test_refused_loan_leaves_list_unchanged() {
    let server = stub::spawn().await;
    let mut state = app_state(&server.base_url);
    state.services.directory.load().await.unwrap();
    state
        .services
        .session
        .login(&LoginCredentials::new("ana@uni.pe", "s3cret&1"))
        .await
        .unwrap();
    let before = state.services.directory.records().to_vec();

    let outcome = state.services.change_status(2, "DISPONIBLE").await.unwrap();

    match outcome {
        StatusChange::Failed { revert_to, message } => {
            assert_eq!(revert_to, "EN USO");
            assert_eq!(message, "Error al cambiar estado: El equipo ya se encuentra en uso");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(state.services.directory.records(), before.as_slice());
}

#[tokio::test]
async fn test_specification_viewer() {
    let server = stub::spawn().await;
    let backend = Arc::new(repository(&server.base_url));
    let mut state = AppState::with_backend(AppConfig::default(), backend);
    state.services.directory.load().await.unwrap();

    let laser = state.services.directory.find(2).cloned().unwrap();
    let viewer = &mut state.services.specifications;
    viewer.open(laser).await.unwrap();

    let header = viewer.header();
    assert_eq!(header[2], ("Estado", "En uso".to_string()));
    assert_eq!(header[3], ("Cantidad Disponible", "Limitado".to_string()));
    assert_eq!(viewer.rows()[1].value, "Acrílico");

    viewer.close();
    assert!(viewer.specification().is_none());
}
