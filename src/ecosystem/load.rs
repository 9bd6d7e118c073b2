use std::fs;

use anyhow::{Context, Result, bail};

use super::EcosystemData;

pub fn load_ecosystem(path: &str) -> Result<EcosystemData> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading dataset file {path}"))?;
    parse_ecosystem(&raw).with_context(|| format!("parsing dataset file {path}"))
}

fn parse_ecosystem(raw: &str) -> Result<EcosystemData> {
    let data: EcosystemData = serde_json::from_str(raw).context("invalid ecosystem JSON")?;

    if data.nodes.is_empty() {
        bail!("dataset contains no nodes");
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_dataset() {
        let raw = r##"{
            "nodes": [
                {"id": "helix", "name": "Helix Bio", "category": "startup", "size": 14.0},
                {"id": "ada", "category": "person"}
            ],
            "links": [
                {"source": "ada", "target": "helix", "type": "employment", "description": "CTO"}
            ],
            "categories": {"startup": "#1f77b4"}
        }"##;

        let data = parse_ecosystem(raw).unwrap();
        assert_eq!(data.nodes.len(), 2);
        assert_eq!(data.links.len(), 1);
        assert_eq!(data.links[0].kind, "employment");
        assert_eq!(data.nodes[0].display_name(), "Helix Bio");
        assert_eq!(data.nodes[1].display_name(), "ada");
        assert!(data.nodes[1].size.is_none());
    }

    #[test]
    fn rejects_empty_and_malformed_datasets() {
        assert!(parse_ecosystem(r#"{"nodes": []}"#).is_err());
        assert!(parse_ecosystem("not json").is_err());
        assert!(parse_ecosystem(r#"{"links": []}"#).is_err());
    }
}
