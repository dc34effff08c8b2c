//! Merges the OpenAPI fragments contributed by modules into one document.

use serde_json::{json, Value};
use shelf_kernel::{settings::Settings, ModuleRegistry};

use crate::router::mount_path;

pub const API_TITLE: &str = "Books API";
pub const API_VERSION: &str = "1.0.0";

/// Shared response schemas every module may reference.
fn common_schemas() -> Value {
    json!({
        "ErrorResponse": {
            "type": "object",
            "properties": {
                "message": { "type": "string" }
            },
            "required": ["message"]
        },
        "ValidationErrorResponse": {
            "type": "object",
            "properties": {
                "errors": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "field": { "type": "string" },
                            "location": { "type": "string", "enum": ["body", "params"] },
                            "message": { "type": "string" }
                        },
                        "required": ["field", "location", "message"]
                    }
                }
            },
            "required": ["errors"]
        }
    })
}

/// Build the merged OpenAPI document as raw JSON.
///
/// Module paths are prefixed with the module's mount point; schemas are merged
/// by name, later modules overriding earlier ones.
pub fn openapi_document(registry: &ModuleRegistry, settings: &Settings) -> Value {
    let mut spec = json!({
        "openapi": "3.1.0",
        "info": {
            "title": API_TITLE,
            "version": API_VERSION,
            "description": "A simple books CRUD API backed by MongoDB."
        },
        "servers": [
            { "url": format!("http://localhost:{}", settings.server.port) }
        ],
        "paths": {},
        "components": {
            "schemas": common_schemas()
        }
    });

    spec["paths"]["/healthz"] = json!({
        "get": {
            "summary": "Health check",
            "responses": {
                "200": {
                    "description": "OK",
                    "content": {
                        "text/plain": {
                            "schema": { "type": "string" }
                        }
                    }
                }
            }
        }
    });

    for module in registry.custom_modules() {
        let Some(fragment) = module.openapi() else {
            continue;
        };
        let prefix = mount_path(&settings.server.base_path, module.name());

        if let Some(paths) = fragment.get("paths").and_then(Value::as_object) {
            for (path, item) in paths {
                let full_path = if path == "/" {
                    prefix.clone()
                } else {
                    format!("{}{}", prefix, path)
                };
                spec["paths"][full_path] = item.clone();
            }
        }

        if let Some(schemas) = fragment
            .get("components")
            .and_then(|components| components.get("schemas"))
            .and_then(Value::as_object)
        {
            for (name, schema) in schemas {
                spec["components"]["schemas"][name] = schema.clone();
            }
        }
    }

    spec
}

/// Convert the merged JSON into a typed document for Swagger UI.
pub fn to_utoipa(spec: &Value) -> utoipa::openapi::OpenApi {
    serde_json::from_value(spec.clone()).unwrap_or_else(|error| {
        tracing::warn!(%error, "merged OpenAPI document is not well-formed; serving a stub");
        utoipa::openapi::OpenApiBuilder::new()
            .info(
                utoipa::openapi::InfoBuilder::new()
                    .title(API_TITLE)
                    .version(API_VERSION)
                    .build(),
            )
            .build()
    })
}
