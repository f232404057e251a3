//! Document title and social metadata from the SEO document.

use serde_json::Value;

use crate::document::{Document, MetaAttr};
use crate::fields::{string_at, strings_at};

/// Display name of the site: `config.name`, then `config.text.name`.
pub fn display_name(config: &Value) -> Option<&str> {
    string_at(config, &["name"]).or_else(|| string_at(config, &["text", "name"]))
}

/// Create or update the title and the fixed set of meta tags.
///
/// Safe to call repeatedly: existing tags are updated in place. Fields missing
/// from `seo` leave their tags as they were.
pub fn update_seo(document: &mut Document, seo: &Value, config: Option<&Value>) {
    let title = string_at(seo, &["title"]);
    if let Some(title) = title.or_else(|| config.and_then(display_name)) {
        document.title = title.to_string();
    }

    let description = string_at(seo, &["description"]).unwrap_or_default();
    let title = title.unwrap_or_default();
    let keywords = strings_at(seo, &["keywords"]).join(", ");

    document.set_meta(MetaAttr::Name, "description", description);
    document.set_meta(MetaAttr::Name, "keywords", &keywords);

    document.set_meta(MetaAttr::Property, "og:title", title);
    document.set_meta(MetaAttr::Property, "og:description", description);
    document.set_meta(MetaAttr::Property, "og:type", "website");

    document.set_meta(MetaAttr::Name, "twitter:card", "summary_large_image");
    document.set_meta(MetaAttr::Name, "twitter:title", title);
    document.set_meta(MetaAttr::Name, "twitter:description", description);

    if let Some(image) = string_at(seo, &["image"]) {
        document.set_meta(MetaAttr::Property, "og:image", image);
        document.set_meta(MetaAttr::Name, "twitter:image", image);
    }
}
