use tracing::{debug, info};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::error::LoadError;
use crate::model::TreeNode;

pub fn parse_tree(raw: &str) -> Result<TreeNode, LoadError> {
    serde_json::from_str(raw).map_err(|e| LoadError::Parse(e.to_string()))
}

fn js_reason(value: &wasm_bindgen::JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Fetches and parses the hierarchy once. No retry, no timeout.
pub async fn fetch_tree(url: &str) -> Result<TreeNode, LoadError> {
    let network = |reason: String| LoadError::Network { url: url.to_string(), reason };
    let body = |reason: String| LoadError::Body { url: url.to_string(), reason };

    debug!(url, "fetching hierarchy");
    let window = web_sys::window().ok_or_else(|| network("no window".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| network(js_reason(&e)))?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| network("response is not a Response".into()))?;
    if !resp.ok() {
        return Err(LoadError::Status { url: url.to_string(), status: resp.status() });
    }
    let text = JsFuture::from(resp.text().map_err(|e| body(js_reason(&e)))?)
        .await
        .map_err(|e| body(js_reason(&e)))?;
    let raw = text.as_string().ok_or_else(|| body("body is not text".into()))?;
    let tree = parse_tree(&raw)?;
    info!(url, nodes = tree.count(), "hierarchy loaded");
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_hierarchy() {
        let tree = parse_tree(
            r#"{ "name": "root", "children": [
                { "name": "A", "size": 10 },
                { "name": "B", "children": [ { "name": "B1", "size": 2.5 } ] }
            ] }"#,
        )
        .unwrap();
        assert_eq!(tree.name, "root");
        assert_eq!(tree.size, None);
        assert_eq!(tree.children[0], TreeNode::leaf("A", 10.0));
        assert_eq!(tree.children[1].children[0].size, Some(2.5));
        assert_eq!(tree.count(), 4);
    }

    #[test]
    fn bundled_data_lays_out_with_four_branches() {
        use crate::layout::{partition, ChildOrder};
        use crate::state::BranchFilter;

        let tree = parse_tree(include_str!("../data/data.json")).unwrap();
        assert_eq!(tree.children.len(), 4);
        let filter = BranchFilter::bind(&tree);
        assert_eq!(filter.checkboxes().len(), 4);
        let layout = partition(&tree, ChildOrder::Preserve).unwrap();
        assert!(layout.max_depth >= 4);
    }

    #[test]
    fn missing_fields_default() {
        let tree = parse_tree(r#"{ "children": [ {} ] }"#).unwrap();
        assert_eq!(tree.name, "");
        assert_eq!(tree.children, vec![TreeNode::default()]);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(parse_tree("{ \"name\": "), Err(LoadError::Parse(_))));
        assert!(matches!(parse_tree("[1, 2]"), Err(LoadError::Parse(_))));
        assert!(matches!(parse_tree(r#"{ "size": "big" }"#), Err(LoadError::Parse(_))));
    }
}
