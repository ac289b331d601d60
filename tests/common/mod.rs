//! Shared wiring for HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::Router;
use http::{header, Method, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use cane_ops::adapters::http::{api_router, AppState};
use cane_ops::adapters::{
    InMemoryBlocStore, InMemoryCropCycleRepository, InMemoryWorkPlanStore, StaticCatalog,
};
use cane_ops::domain::bloc::{Bloc, BlocStatus};
use cane_ops::domain::catalog::{Catalog, Variety, VarietyCategory};
use cane_ops::domain::foundation::{BlocId, VarietyId};
use cane_ops::ports::BackendCapabilities;

pub struct TestApp {
    pub router: Router,
    pub blocs: Arc<InMemoryBlocStore>,
    pub cycles: Arc<InMemoryCropCycleRepository>,
    pub plans: Arc<InMemoryWorkPlanStore>,
}

/// Catalog with the `V1` and `r-579` varieties.
pub fn test_catalog() -> StaticCatalog {
    let variety = |id: &str, name: &str| Variety {
        id: VarietyId::new(id).unwrap(),
        name: name.to_string(),
        category: VarietyCategory::Sugarcane,
        description: None,
    };
    StaticCatalog::new(Catalog {
        varieties: vec![variety("V1", "Variety One"), variety("r-579", "R 579")],
        ..Default::default()
    })
    .unwrap()
}

impl TestApp {
    pub async fn new(capabilities: BackendCapabilities) -> Self {
        Self::with_catalog(capabilities, test_catalog()).await
    }

    /// Blocs `F1` and `F2`, no cycles.
    pub async fn with_catalog(capabilities: BackendCapabilities, catalog: StaticCatalog) -> Self {
        let app = Self::empty(capabilities, catalog);
        for (id, name, area) in [("F1", "North 1", 10.0), ("F2", "South 2", 6.5)] {
            let bloc = Bloc::new(BlocId::new(id).unwrap(), name, area, BlocStatus::Active).unwrap();
            app.blocs.insert(bloc).await;
        }
        app
    }

    /// Empty stores.
    pub fn empty(capabilities: BackendCapabilities, catalog: StaticCatalog) -> Self {
        let blocs = Arc::new(InMemoryBlocStore::new());
        let cycles = Arc::new(InMemoryCropCycleRepository::new(capabilities));
        let plans = Arc::new(InMemoryWorkPlanStore::new());

        let router = api_router(AppState {
            cycles: cycles.clone(),
            blocs: blocs.clone(),
            work_plans: plans.clone(),
            catalog: Arc::new(catalog),
            capabilities,
        });

        Self {
            router,
            blocs,
            cycles,
            plans,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}
