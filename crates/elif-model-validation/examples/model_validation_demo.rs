//! Model validation demo: a post with nested comments

use elif_model_validation::{
    CustomValidator, FieldDef, HasMany, LengthValidator, Model, ModelSchema, PatternValidator,
    RequiredValidator, ValidationConfig, Verdict,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let config = ValidationConfig::from_env()?;

    let comment = ModelSchema::builder("Comment")
        .config(config.clone())
        .field(FieldDef::new("author").rule("required", RequiredValidator::new()))
        .field(FieldDef::new("body").rule("length", LengthValidator::new().range(1, 280)))
        .build()?;

    let post = ModelSchema::builder("Post")
        .config(config)
        .field(
            FieldDef::new("title").rule(
                "isLongEnough",
                CustomValidator::new("isLongEnough", |value| {
                    Verdict::check(value.len().is_some_and(|len| len > 10), "Title is not long enough")
                }),
            ),
        )
        .field(FieldDef::new("slug").rule("slug", PatternValidator::slug()))
        .field(
            FieldDef::new("comments")
                .default_value(json!([]))
                .extension(HasMany::new(comment).min_items(1)),
        )
        .build()?;

    println!("📝 Whole-model validation");
    let mut model = Model::from_json(
        post,
        &json!({
            "title": "Short",
            "slug": "Not A Slug",
            "comments": [{ "author": "ana", "body": "Nice!" }, { "author": "", "body": "" }],
            "unknown": true
        }),
    )?;
    model.validate()?;
    println!("  valid: {}", model.is_valid());
    println!("  {}", serde_json::to_string_pretty(&model.errors())?);

    println!("\n🔁 Single-field revalidation");
    model.set("title", "A much longer title")?;
    model.validate_field("title")?;
    println!("  valid: {}", model.is_valid());
    println!("  {}", model.errors());

    println!("\n✅ Fixing everything");
    model.set("slug", "a-much-longer-title")?;
    model.set("comments", json!([{ "author": "ana", "body": "Nice!" }]))?;
    match model.check() {
        Ok(()) => println!("  model is valid"),
        Err(error) => println!("  still invalid: {}", error),
    }

    Ok(())
}
