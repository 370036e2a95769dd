//! App launcher branding: `landing_page_design` and `footer_links`.
//!
//! Both flatten to nothing unless the configuration declares them, so
//! service-side defaults never show up as drift.

use serde_json::{Value, json};

use crate::client::models::{FooterLink, LandingPageDesign};
use crate::error::Result;
use crate::state::ResourceData;

pub fn expand_landing_page_design(d: &ResourceData) -> Result<Option<LandingPageDesign>> {
    d.block("landing_page_design")
}

pub fn flatten_landing_page_design(
    d: &ResourceData,
    design: Option<&LandingPageDesign>,
) -> Value {
    let text = |v: &Option<String>| json!(v.clone().unwrap_or_default());
    match (d.get_ok("landing_page_design"), design) {
        (Some(_), Some(design)) => json!([{
            "title": text(&design.title),
            "message": text(&design.message),
            "button_text_color": text(&design.button_text_color),
            "button_color": text(&design.button_color),
            "image_url": text(&design.image_url),
        }]),
        _ => json!([]),
    }
}

pub fn expand_footer_links(d: &ResourceData) -> Result<Vec<FooterLink>> {
    d.blocks("footer_links")
}

pub fn flatten_footer_links(d: &ResourceData, links: &[FooterLink]) -> Value {
    if d.get_ok("footer_links").is_none() {
        return json!([]);
    }
    Value::Array(
        links
            .iter()
            .map(|link| json!({ "name": link.name, "url": link.url }))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn data(value: Value) -> ResourceData {
        match value {
            Value::Object(map) => ResourceData::new(map),
            _ => ResourceData::new(Map::new()),
        }
    }

    #[test]
    fn test_landing_page_round_trip() {
        let d = data(json!({
            "landing_page_design": [{ "title": "Welcome", "button_color": "#ff0000" }],
        }));
        let design = expand_landing_page_design(&d).unwrap().unwrap();
        assert_eq!(design.title.as_deref(), Some("Welcome"));
        assert!(design.message.is_none());

        let tree = flatten_landing_page_design(&d, Some(&design));
        assert_eq!(tree[0]["button_color"], json!("#ff0000"));
        assert_eq!(tree[0]["message"], json!(""));
    }

    #[test]
    fn test_unconfigured_blocks_flatten_empty() {
        let d = data(json!({}));
        let design = LandingPageDesign {
            title: Some("Service default".to_string()),
            ..Default::default()
        };
        let links = vec![FooterLink {
            name: "Support".to_string(),
            url: "https://support.example.com".to_string(),
        }];
        assert_eq!(flatten_landing_page_design(&d, Some(&design)), json!([]));
        assert_eq!(flatten_footer_links(&d, &links), json!([]));
    }

    #[test]
    fn test_footer_links() {
        let d = data(json!({
            "footer_links": [{ "name": "Support", "url": "https://support.example.com" }],
        }));
        let links = expand_footer_links(&d).unwrap();
        assert_eq!(links[0].name, "Support");
        assert_eq!(
            flatten_footer_links(&d, &links),
            json!([{ "name": "Support", "url": "https://support.example.com" }])
        );
    }
}
