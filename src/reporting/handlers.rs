use axum::{extract::State, Json};
use serde::Serialize;

use crate::app::Adapter;

#[derive(Debug, Serialize)]
pub struct ReportingIndex {
    pub blueprint: &'static str,
    pub adapter: Adapter,
    pub endpoints: [&'static str; 2],
}

#[derive(Debug, Serialize)]
pub struct ReportingStatus {
    pub status: &'static str,
    pub adapter: Adapter,
}

pub async fn index(State(adapter): State<Adapter>) -> Json<ReportingIndex> {
    Json(ReportingIndex {
        blueprint: super::NAME,
        adapter,
        endpoints: [super::INDEX_PATH, super::STATUS_PATH],
    })
}

pub async fn status(State(adapter): State<Adapter>) -> Json<ReportingStatus> {
    Json(ReportingStatus {
        status: "ok",
        adapter,
    })
}
