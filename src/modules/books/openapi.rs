use serde_json::{json, Value};

use super::models::BookLimits;

fn json_content(schema: Value) -> Value {
    json!({ "application/json": { "schema": schema } })
}

fn reference(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{}", name) })
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": json_content(reference("ErrorResponse"))
    })
}

fn validation_response() -> Value {
    json!({
        "description": "Validation failed or the store rejected the request",
        "content": json_content(json!({
            "oneOf": [reference("ValidationErrorResponse"), reference("ErrorResponse")]
        }))
    })
}

fn id_parameter() -> Value {
    json!({
        "name": "id",
        "in": "path",
        "required": true,
        "description": "The book's ObjectId",
        "schema": { "type": "string", "pattern": "^[0-9a-fA-F]{24}$" }
    })
}

/// Fragment describing the books routes relative to the module mount point.
pub fn fragment() -> Value {
    let book_fields = json!({
        "bookName": {
            "type": "string",
            "minLength": BookLimits::NAME_MIN_CHARS,
            "maxLength": BookLimits::NAME_MAX_CHARS
        },
        "price": {
            "type": "number",
            "minimum": BookLimits::PRICE_MIN,
            "maximum": BookLimits::PRICE_MAX
        },
        "countInStock": {
            "type": "integer",
            "minimum": BookLimits::STOCK_MIN,
            "maximum": BookLimits::STOCK_MAX
        },
        "image": {
            "type": "string",
            "description": "http(s) URL of the cover image, or an empty string"
        }
    });

    let mut book_properties = book_fields.clone();
    book_properties["id"] = json!({ "type": "string", "description": "The book's ObjectId" });
    book_properties["dateCreated"] = json!({ "type": "string", "format": "date-time" });

    json!({
        "paths": {
            "/": {
                "get": {
                    "summary": "Get all books",
                    "tags": ["Books"],
                    "responses": {
                        "200": {
                            "description": "A list of books",
                            "content": json_content(json!({ "type": "array", "items": reference("Book") }))
                        },
                        "400": error_response("Error fetching books")
                    }
                },
                "post": {
                    "summary": "Create a new book",
                    "tags": ["Books"],
                    "requestBody": {
                        "required": true,
                        "content": json_content(reference("CreateBook"))
                    },
                    "responses": {
                        "201": {
                            "description": "Book created successfully",
                            "content": json_content(reference("Book"))
                        },
                        "400": validation_response()
                    }
                }
            },
            "/{id}": {
                "get": {
                    "summary": "Get a specific book by ID",
                    "tags": ["Books"],
                    "parameters": [id_parameter()],
                    "responses": {
                        "200": {
                            "description": "Book found",
                            "content": json_content(reference("Book"))
                        },
                        "400": validation_response(),
                        "404": error_response("Book not found")
                    }
                },
                "put": {
                    "summary": "Update a specific book by ID",
                    "tags": ["Books"],
                    "parameters": [id_parameter()],
                    "requestBody": {
                        "required": true,
                        "content": json_content(reference("UpdateBook"))
                    },
                    "responses": {
                        "200": {
                            "description": "Book updated successfully",
                            "content": json_content(reference("Confirmation"))
                        },
                        "400": validation_response(),
                        "404": error_response("Book not found")
                    }
                },
                "delete": {
                    "summary": "Delete a book by ID",
                    "tags": ["Books"],
                    "parameters": [id_parameter()],
                    "responses": {
                        "200": {
                            "description": "Book deleted successfully",
                            "content": json_content(reference("Confirmation"))
                        },
                        "400": validation_response(),
                        "404": error_response("Book not found")
                    }
                }
            },
            "/health": {
                "get": {
                    "summary": "Books health check",
                    "tags": ["Books"],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": { "text/plain": { "schema": { "type": "string" } } }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": book_properties,
                    "required": ["id", "bookName", "price", "countInStock", "image", "dateCreated"]
                },
                "CreateBook": {
                    "type": "object",
                    "properties": book_fields.clone(),
                    "required": ["bookName", "price", "countInStock"]
                },
                "UpdateBook": {
                    "type": "object",
                    "properties": book_fields
                },
                "Confirmation": {
                    "type": "object",
                    "properties": { "message": { "type": "string" } },
                    "required": ["message"]
                }
            }
        }
    })
}
