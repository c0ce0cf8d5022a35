//! Boundary request/response shapes
//!
//! The language-agnostic DTOs an HTTP-facing collaborator maps its routes
//! onto. Field names are wire vocabulary (camelCase); the shapes mirror
//! the service operations one-to-one.

use crate::service::{ServiceError, TransformOutput};
use chartkit_chart::{ChartConfig, ChartId, RenderedChart};
use chartkit_core::ErrorKind;
use serde::{Deserialize, Serialize};

/// `POST /data/transform` request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformRequest {
    pub data_id: String,
    pub expression: String,
}

/// `POST /data/transform` response body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TransformResponse {
    #[serde(rename_all = "camelCase")]
    Success {
        status: &'static str,
        result_data_id: String,
        elapsed_ms: u128,
    },
    Error(ErrorBody),
}

impl From<Result<TransformOutput, ServiceError>> for TransformResponse {
    fn from(result: Result<TransformOutput, ServiceError>) -> Self {
        match result {
            Ok(output) => TransformResponse::Success {
                status: "success",
                result_data_id: output.result_data_id.to_string(),
                elapsed_ms: output.elapsed.as_millis(),
            },
            Err(error) => TransformResponse::Error(error.into()),
        }
    }
}

/// `POST /chart` request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChartRequest {
    pub data_id: String,
    pub chart_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ChartConfig>,
}

/// `POST /chart` response body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChartResponse {
    pub chart_id: String,
    pub rendered_definition: RenderedChart,
}

impl From<(ChartId, RenderedChart)> for CreateChartResponse {
    fn from((id, rendered): (ChartId, RenderedChart)) -> Self {
        Self {
            chart_id: id.to_string(),
            rendered_definition: rendered,
        }
    }
}

/// `PUT /chart/{chartId}` request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChartRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ChartConfig>,
}

/// Error body shared by every endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status: &'static str,
    pub error_kind: ErrorKind,
    pub message: String,
}

impl From<ServiceError> for ErrorBody {
    fn from(error: ServiceError) -> Self {
        Self {
            status: "error",
            error_kind: error.kind,
            message: error.message,
        }
    }
}
