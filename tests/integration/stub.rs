//! Stub of the equipment API served on an ephemeral port

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

#[derive(Clone, Default)]
pub struct StubState {
    pub loan_calls: Arc<AtomicUsize>,
}

impl StubState {
    pub fn loan_calls(&self) -> usize {
        self.loan_calls.load(Ordering::SeqCst)
    }
}

/// Running stub: base URL to configure the client with, plus its counters
pub struct StubServer {
    pub base_url: String,
    pub state: StubState,
}

pub async fn spawn() -> StubServer {
    let state = StubState::default();

    let api = Router::new()
        .route("/equipo", get(list_equipment))
        .route("/equipo/:id/especificaciones", get(get_specifications))
        .route("/prestamos", get(list_loans))
        .route("/prestamos/solicitar", post(request_loan))
        .route("/usuario", get(list_users))
        .route("/usuario/find/by/correo-and-password", get(find_user))
        .with_state(state.clone());
    let app = Router::new().nest("/api", api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub listener");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub server failed");
    });

    StubServer {
        base_url: format!("http://{}/api", addr),
        state,
    }
}

pub fn equipment() -> Value {
    json!([
        {
            "idEquipo": 1,
            "nombre": "Drill",
            "categoria": "Tools",
            "cantidad": 4,
            "descripcion": "Cordless drill",
            "marca": "Bosch",
            "estado": "DISPONIBLE"
        },
        {
            "idEquipo": 2,
            "nombre": "Laser",
            "categoria": "CNC",
            "cantidad": null,
            "descripcion": "CO2 laser cutter",
            "marca": "Epilog",
            "estado": "EN USO"
        },
        {
            "idEquipo": 3,
            "nombre": "Workstation",
            "categoria": "Computo",
            "cantidad": 1,
            "descripcion": "Rendering workstation",
            "marca": "Dell",
            "estado": "en_uso"
        }
    ])
}

async fn list_equipment() -> Json<Value> {
    Json(equipment())
}

async fn get_specifications(Path(id): Path<i64>) -> impl IntoResponse {
    match id {
        1 => (
            StatusCode::OK,
            Json(json!({"modelo": "GSR 12V", "referencia": "www.bosch-professional.com"})),
        ),
        2 => (
            StatusCode::OK,
            Json(json!({"areaDeTrabajo": "600x300 mm", "materialDeGrabado": "Acrílico", "velocidadMaxCorte": 1200})),
        ),
        3 => (
            StatusCode::OK,
            Json(json!({"cpu": "Xeon W-2245", "gpu": "RTX A4000", "ramGb": 64})),
        ),
        _ => (StatusCode::NOT_FOUND, Json(json!({"message": "Equipo no encontrado"}))),
    }
}

async fn request_loan(State(state): State<StubState>, Json(body): Json<Value>) -> impl IntoResponse {
    state.loan_calls.fetch_add(1, Ordering::SeqCst);

    if body["idEquipo"] == 2 {
        return (
            StatusCode::CONFLICT,
            Json(json!({"message": "El equipo ya se encuentra en uso"})),
        );
    }

    (
        StatusCode::CREATED,
        Json(json!({
            "idPrestamo": 77,
            "idUsuario": body["idUsuario"],
            "idEquipo": body["idEquipo"],
            "estado": body["estadoEquipo"]
        })),
    )
}

async fn list_loans() -> Json<Value> {
    Json(json!([
        {"idPrestamo": 77, "idUsuario": 10, "idEquipo": 2, "estado": "EN USO"}
    ]))
}

fn ana() -> Value {
    json!({"idUsuario": 10, "correo": "ana@uni.pe", "nombres": "Ana", "apellidos": "Quispe"})
}

async fn list_users() -> Json<Value> {
    Json(json!([ana()]))
}

async fn find_user(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    let email = params.get("correo").map(String::as_str);
    let password = params.get("password").map(String::as_str);

    if email == Some("ana@uni.pe") && password == Some("s3cret&1") {
        (StatusCode::OK, Json(ana()))
    } else {
        (StatusCode::NOT_FOUND, Json(json!({"message": "not found"})))
    }
}
