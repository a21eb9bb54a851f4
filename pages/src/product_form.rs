//! Field set shared by the add and update product pages.

use happyshop_core::domain::Product;
use happyshop_core::{FormDraft, FormSchema, Rule};

pub const IMAGE_FIELDS: [&str; 4] = ["image0", "image1", "image2", "image3"];

pub fn schema() -> FormSchema {
    let mut schema = FormSchema::new()
        .field("title", vec![Rule::required("Title is required")])
        .field("brand", vec![Rule::required("Brand is required")])
        .field("category", vec![Rule::required("Category is required")])
        .field("description", vec![Rule::required("Description is required")])
        .number("price", vec![Rule::required("Price is required")])
        .number(
            "discountPercentage",
            vec![Rule::required("Discount percentage is required")],
        )
        .integer(
            "stockQuantity",
            vec![Rule::required("Stock Quantity is required")],
        )
        .field("thumbnail", vec![Rule::required("Thumbnail is required")]);
    for name in IMAGE_FIELDS {
        schema = schema.field(name, vec![Rule::required("Image is required")]);
    }
    schema.collapse(IMAGE_FIELDS, "images")
}

/// Draft pre-filled with a product's current values.
pub fn draft_from(product: &Product) -> FormDraft {
    let mut draft = FormDraft::new()
        .with("title", product.title.as_str())
        .with("brand", product.brand.id.as_str())
        .with("category", product.category.id.as_str())
        .with("description", product.description.as_str())
        .with("price", product.price.to_string())
        .with("discountPercentage", product.discount_percentage.to_string())
        .with("stockQuantity", product.stock_quantity.to_string())
        .with("thumbnail", product.thumbnail.as_str());
    for (i, name) in IMAGE_FIELDS.iter().enumerate() {
        let image = product.images.get(i).map(String::as_str).unwrap_or_default();
        draft.set(*name, image);
    }
    draft
}
