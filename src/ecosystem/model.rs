use std::collections::HashMap;

use eframe::egui::Color32;
use serde::Deserialize;

use crate::util::parse_hex_color;

const PALETTE: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

pub fn palette_color(index: usize) -> Color32 {
    parse_hex_color(PALETTE[index % PALETTE.len()]).unwrap_or(Color32::GRAY)
}

#[derive(Clone, Debug, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub category: String,
    #[serde(default)]
    pub size: Option<f32>,
    #[serde(default)]
    pub description: Option<String>,
}

impl NodeRecord {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct LinkRecord {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct EcosystemData {
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub links: Vec<LinkRecord>,
    #[serde(default)]
    pub categories: HashMap<String, String>,
}

impl EcosystemData {
    /// Color for a category: explicit dataset color when present, palette otherwise.
    pub fn category_color(&self, category: &str, fallback_index: usize) -> Color32 {
        self.categories
            .get(category)
            .and_then(|hex| parse_hex_color(hex))
            .unwrap_or_else(|| palette_color(fallback_index))
    }
}
