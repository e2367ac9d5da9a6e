//! Renders a small contact form schema to stdout.
//!
//! Run with `RUST_LOG=debug` to watch capability resolution.

use std::sync::Arc;

use anyhow::Result;
use serde_json::json;

use schemaform::markup::{self, enum_type, string_type, text_type};
use schemaform::{AttrList, CapabilityRegistry, Field, Renderer, Schema};

fn main() -> Result<()> {
    env_logger::init();

    let mut registry = CapabilityRegistry::new();
    markup::install_defaults(&mut registry)?;
    registry.seal();

    let string = string_type();
    let address = Arc::new(
        Schema::new("address")
            .with_field(Field::scalar("street", string.clone()))?
            .with_field(Field::scalar("zip", string.clone()).required())?,
    );

    let contact = Schema::new("contact")
        .with_field(Field::scalar("name", string.clone()).required())?
        .with_field(Field::scalar("email", markup::email_type(string)))?
        .with_field(Field::scalar("message", text_type()))?
        .with_field(Field::scalar(
            "topic",
            enum_type("topic", vec![("sales", "Sales"), ("support", "Support")]),
        ))?
        .with_field(Field::nested("address", address))?;

    let renderer = Renderer::with_defaults(&registry);
    let markup = renderer.render_schema(
        &contact,
        &AttrList::new().with("action", "/contact"),
        &json!({"topic": "support"}),
    )?;
    println!("{markup}");
    Ok(())
}
