//! `OpenAPI` document describing the public endpoints.

use duet_api_models::{API_PREFIX, HEALTH_PATH, ROOT_MESSAGE, ROOT_PATH};
use serde_json::{Map, Value, json};

/// Build the `OpenAPI` document served from `/docs/openapi.json`.
#[must_use]
pub fn openapi_document() -> Value {
    let root = json!({
        "get": {
            "summary": "Server greeting",
            "operationId": "root",
            "responses": {
                "200": {
                    "description": "Greeting",
                    "content": {"application/json": {"schema": {"$ref": "#/components/schemas/RootResponse"}}}
                }
            }
        }
    });
    let health = json!({
        "get": {
            "summary": "Liveness probe",
            "operationId": "health",
            "responses": {
                "200": {
                    "description": "Backend is up",
                    "content": {"application/json": {"schema": {"$ref": "#/components/schemas/HealthResponse"}}}
                }
            }
        }
    });

    let mut paths = Map::new();
    for prefix in ["", API_PREFIX] {
        paths.insert(format!("{prefix}{ROOT_PATH}"), root.clone());
        paths.insert(format!("{prefix}{HEALTH_PATH}"), health.clone());
    }

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Duet API",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "paths": Value::Object(paths),
        "components": {
            "schemas": {
                "HealthResponse": {
                    "type": "object",
                    "required": ["ok"],
                    "properties": {"ok": {"type": "boolean"}}
                },
                "RootResponse": {
                    "type": "object",
                    "properties": {"message": {"type": "string", "example": ROOT_MESSAGE}}
                },
                "ErrorBody": {
                    "type": "object",
                    "required": ["detail"],
                    "properties": {"detail": {"type": "string"}}
                }
            }
        }
    })
}
