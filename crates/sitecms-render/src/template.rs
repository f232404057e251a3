//! Page markup built from the `text` block of the site config.
//!
//! Every field is optional. Sections whose block is absent are left out, and
//! missing strings render as empty text.

use serde_json::Value;

use crate::document::{Element, Markup, Node};
use crate::fields::{string_at, strings_at, value_at};

pub const NAV_LINKS_ID: &str = "nav-links";
pub const MOBILE_TOGGLE_ID: &str = "mobile-toggle";
pub const HERO_TITLE_ID: &str = "hero-title";
pub const SCROLL_TO_TOP_ID: &str = "scroll-to-top";
pub const SECTION_CLASS: &str = "section";

/// Attribute holding the full heading text revealed by the typewriter.
pub const DATA_TEXT_ATTR: &str = "data-text";

const SECTIONS: [&str; 3] = ["about", "services", "contact"];

pub fn render_template(text: &Value, config: &Value) -> Markup {
    let mut markup = Markup::default();
    let name = string_at(text, &["name"])
        .or_else(|| string_at(config, &["name"]))
        .unwrap_or_default();

    let nav = nav(&mut markup, text, name);
    markup.push(nav);

    let hero = hero(&mut markup, text, name);
    markup.push(hero);

    for id in SECTIONS {
        if let Some(block) = value_at(text, &[id]).filter(|v| !v.is_null()) {
            let element = match id {
                "services" => services(block),
                "contact" => contact(block),
                _ => about(block),
            };
            let node = markup.register(id, element.class(SECTION_CLASS));
            markup.push(node);
        }
    }

    markup.push(footer(text, name));

    let button = markup.register(
        SCROLL_TO_TOP_ID,
        Element::new("button")
            .attr("type", "button")
            .attr("aria-label", string_at(text, &["scrollTop"]).unwrap_or("Top"))
            .text("\u{2191}"),
    );
    markup.push(button);

    markup
}

fn nav(markup: &mut Markup, text: &Value, name: &str) -> Node {
    let links = SECTIONS
        .into_iter()
        .filter_map(|id| {
            let label = string_at(text, &["nav", id]).or_else(|| string_at(text, &[id, "title"]))?;
            Some(Node::Tag(
                Element::new("li")
                    .child(Element::new("a").attr("href", format!("#{}", id)).text(label).into()),
            ))
        })
        .collect::<Vec<Node>>();

    let links = markup.register(NAV_LINKS_ID, Element::new("ul").class("nav-links").children(links));
    let toggle = markup.register(
        MOBILE_TOGGLE_ID,
        Element::new("button")
            .class("mobile-toggle")
            .attr("type", "button")
            .attr("aria-label", "Menu")
            .text("\u{2630}"),
    );

    Element::new("nav")
        .class("navbar")
        .child(Element::new("a").class("logo").attr("href", "#home").text(name).into())
        .child(toggle)
        .child(links)
        .into()
}

fn hero(markup: &mut Markup, text: &Value, name: &str) -> Node {
    let title = markup.register(
        HERO_TITLE_ID,
        Element::new("h1")
            .class("glitch")
            .attr(DATA_TEXT_ATTR, name)
            .text(name),
    );

    let mut hero = Element::new("header").class("hero").attr("id", "home").child(title);
    if let Some(tagline) = string_at(text, &["tagline"]) {
        hero = hero.child(Element::new("p").class("tagline").text(tagline).into());
    }
    if let Some(cta) = string_at(text, &["cta"]) {
        hero = hero.child(Element::new("a").class("cta").attr("href", "#contact").text(cta).into());
    }
    hero.into()
}

fn heading(block: &Value) -> Node {
    Element::new("h2")
        .text(string_at(block, &["title"]).unwrap_or_default())
        .into()
}

fn paragraphs(block: &Value, key: &str) -> Vec<Node> {
    strings_at(block, &[key])
        .into_iter()
        .map(|p| Node::Tag(Element::new("p").text(p)))
        .collect()
}

fn about(block: &Value) -> Element {
    Element::new("section")
        .child(heading(block))
        .children(paragraphs(block, "content"))
}

fn services(block: &Value) -> Element {
    // Either {"title": ..., "items": [...]} or a bare list of items
    let items = match block {
        Value::Array(items) => items.as_slice(),
        _ => value_at(block, &["items"])
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default(),
    };

    let cards = items.iter().map(|item| {
        let card = Element::new("article")
            .class("card")
            .child(
                Element::new("h3")
                    .text(string_at(item, &["title"]).unwrap_or_default())
                    .into(),
            )
            .child(
                Element::new("p")
                    .text(string_at(item, &["description"]).unwrap_or_default())
                    .into(),
            );
        Node::Tag(card)
    });

    Element::new("section")
        .child(heading(block))
        .child(Element::new("div").class("grid").children(cards).into())
}

fn contact(block: &Value) -> Element {
    let mut section = Element::new("section")
        .child(heading(block))
        .children(paragraphs(block, "content"));

    if let Some(email) = string_at(block, &["email"]) {
        section = section.child(
            Element::new("a")
                .class("contact-email")
                .attr("href", format!("mailto:{}", email))
                .text(email)
                .into(),
        );
    }
    if let Some(phone) = string_at(block, &["phone"]) {
        let dial: String = phone.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect();
        section = section.child(
            Element::new("a")
                .class("contact-phone")
                .attr("href", format!("tel:{}", dial))
                .text(phone)
                .into(),
        );
    }
    section
}

fn footer(text: &Value, name: &str) -> Node {
    let line = string_at(text, &["footer"])
        .map(str::to_string)
        .unwrap_or_else(|| name.to_string());
    Element::new("footer").child(Element::new("p").text(line).into()).into()
}
