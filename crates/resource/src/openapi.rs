//! OpenAPI fragment describing a resource's five operations.

use serde_json::{json, Value};
use utoipa::{PartialSchema, ToSchema};

use crate::{PathKey, Resource};

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn dto_content(schema: Value) -> Value {
    json!({ "application/json": { "schema": schema } })
}

/// Paths are relative to the module mount point: `""` for the collection, `/{id}` for one item.
pub fn document<R: Resource>() -> Value {
    let schema_name = <R::Dto as ToSchema>::name().into_owned();
    let schema_ref = json!({ "$ref": format!("#/components/schemas/{}", schema_name) });
    let schema = serde_json::to_value(<R::Dto as PartialSchema>::schema())
        .unwrap_or_else(|_| json!({ "type": "object" }));
    let tag = R::TAG;
    let id_schema = <R::Key as PathKey>::schema();
    let id_parameter = json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": id_schema
    });

    json!({
        "paths": {
            "": {
                "get": {
                    "summary": format!("List {}", R::NAME),
                    "operationId": format!("list_{}", R::NAME),
                    "tags": [tag],
                    "responses": {
                        "200": {
                            "description": format!("Every {} item", R::NAME),
                            "content": dto_content(json!({ "type": "array", "items": schema_ref.clone() }))
                        },
                        "500": error_response("Store failure")
                    }
                },
                "post": {
                    "summary": format!("Create {}", R::NAME),
                    "operationId": format!("create_{}", R::NAME),
                    "tags": [tag],
                    "requestBody": {
                        "required": true,
                        "content": dto_content(schema_ref.clone())
                    },
                    "responses": {
                        "201": {
                            "description": "Created; `Location` points at the new item",
                            "headers": {
                                "Location": { "schema": { "type": "string" } }
                            },
                            "content": dto_content(schema_ref.clone())
                        },
                        "400": error_response("Body missing or invalid"),
                        "500": error_response("Store failure")
                    }
                }
            },
            "/{id}": {
                "get": {
                    "summary": format!("Get one {}", R::NAME),
                    "operationId": format!("get_{}", R::NAME),
                    "tags": [tag],
                    "parameters": [id_parameter.clone()],
                    "responses": {
                        "200": {
                            "description": "The requested item",
                            "content": dto_content(schema_ref.clone())
                        },
                        "404": error_response("No item with this id")
                    }
                },
                "put": {
                    "summary": format!("Replace {}", R::NAME),
                    "operationId": format!("update_{}", R::NAME),
                    "tags": [tag],
                    "parameters": [id_parameter.clone()],
                    "requestBody": {
                        "required": true,
                        "content": dto_content(schema_ref.clone())
                    },
                    "responses": {
                        "204": { "description": "Replaced" },
                        "400": error_response("Body missing or invalid"),
                        "404": error_response("No item with this id")
                    }
                },
                "delete": {
                    "summary": format!("Delete {}", R::NAME),
                    "operationId": format!("delete_{}", R::NAME),
                    "tags": [tag],
                    "parameters": [id_parameter],
                    "responses": {
                        "204": { "description": "Deleted" },
                        "404": error_response("No item with this id")
                    }
                }
            }
        },
        "components": {
            "schemas": { schema_name: schema }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Notes;

    #[test]
    fn describes_all_operations() {
        let fragment = document::<Notes>();
        let paths = &fragment["paths"];

        for method in ["get", "post"] {
            assert_eq!(paths[""][method]["tags"][0], "Notes");
        }
        for method in ["get", "put", "delete"] {
            assert_eq!(paths["/{id}"][method]["parameters"][0]["schema"]["type"], "integer");
        }
        assert!(paths[""]["post"]["responses"]["201"].is_object());
        assert!(paths["/{id}"]["delete"]["responses"]["404"].is_object());
    }

    #[test]
    fn embeds_dto_schema() {
        let fragment = document::<Notes>();
        let schema = &fragment["components"]["schemas"]["NoteDto"];

        assert!(schema["properties"]["title"].is_object());
        assert_eq!(
            fragment["paths"][""]["get"]["responses"]["200"]["content"]["application/json"]["schema"]["items"]["$ref"],
            "#/components/schemas/NoteDto"
        );
    }
}
