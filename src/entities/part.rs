//! Part line item and routing records returned by the quoting service

use serde::Deserialize;

/// One part line item on a quote.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartLineItem {
    pub id: String,

    /// Backing item id, when the line item references a catalog item.
    #[serde(default)]
    pub item_id: Option<String>,

    /// Free-text part description. Often multi-line; reports keep the
    /// first line only.
    #[serde(default)]
    pub description: Option<String>,
}

impl PartLineItem {
    /// First line of the description, for report labeling.
    pub fn summary_line(&self) -> &str {
        self.description
            .as_deref()
            .and_then(|d| d.lines().next())
            .unwrap_or("(no description)")
    }
}

/// One routing reference from a part's make summary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingRef {
    pub routing_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_line_item_deserializes() {
        let json = r#"{"id": "pli-1", "itemId": "it-9", "description": "Bracket, left\nRev C, deburr all edges"}"#;
        let part: PartLineItem = serde_json::from_str(json).unwrap();

        assert_eq!(part.id, "pli-1");
        assert_eq!(part.item_id.as_deref(), Some("it-9"));
        assert_eq!(part.summary_line(), "Bracket, left");
    }

    #[test]
    fn test_summary_line_without_description() {
        let json = r#"{"id": "pli-2"}"#;
        let part: PartLineItem = serde_json::from_str(json).unwrap();

        assert_eq!(part.summary_line(), "(no description)");
    }

    #[test]
    fn test_routing_ref_deserializes() {
        let json = r#"{"routingId": "rt-17", "sequence": 10}"#;
        let routing: RoutingRef = serde_json::from_str(json).unwrap();

        assert_eq!(routing.routing_id, "rt-17");
    }
}
