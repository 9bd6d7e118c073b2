use std::collections::{HashMap, HashSet};
use std::f32::consts::TAU;

use eframe::egui::{Color32, Vec2, vec2};

use crate::ecosystem::{EcosystemData, palette_color};
use crate::util::stable_unit_pair;

const DEFAULT_NODE_RADIUS: f32 = 5.0;

/// Category attractors sit on a ring of this radius around the viewport center.
pub(in crate::app) const CLUSTER_RING_RADIUS: f32 = 200.0;

pub(in crate::app) struct SimNode {
    pub id: String,
    pub name: String,
    pub category: usize,
    pub size: Option<f32>,
    pub description: String,
    pub pos: Vec2,
    pub vel: Vec2,
    pub force: Vec2,
}

impl SimNode {
    /// Marker radius in world units. Sized nodes never drop below 4.
    pub fn radius(&self) -> f32 {
        match self.size {
            Some(size) => (3.0 + size * 0.25).max(4.0),
            None => DEFAULT_NODE_RADIUS,
        }
    }
}

pub(in crate::app) struct SimLink {
    pub source: usize,
    pub target: usize,
    pub kind: String,
    pub description: String,
}

pub(in crate::app) struct CategoryStyle {
    pub key: String,
    pub color: Color32,
}

/// Per-render-pass owner of the simulation arena. Rebuilt from scratch on
/// every render pass; indices are only valid against the scene that issued
/// them.
pub(in crate::app) struct Scene {
    pub nodes: Vec<SimNode>,
    pub links: Vec<SimLink>,
    pub index_by_id: HashMap<String, usize>,
    pub neighbours: Vec<HashSet<usize>>,
    pub categories: Vec<CategoryStyle>,
    pub kind_colors: HashMap<String, Color32>,
    pub cluster_centers: Vec<Vec2>,
    pub viewport: Vec2,
    pub dropped_links: usize,
}

impl Scene {
    pub fn build(data: &EcosystemData, viewport: Vec2) -> Self {
        let mut nodes: Vec<SimNode> = Vec::with_capacity(data.nodes.len());
        let mut index_by_id = HashMap::with_capacity(data.nodes.len());
        let mut categories: Vec<CategoryStyle> = Vec::new();
        let mut category_index: HashMap<String, usize> = HashMap::new();

        for record in &data.nodes {
            if index_by_id.contains_key(&record.id) {
                log::warn!("duplicate node id {:?}; keeping the first record", record.id);
                continue;
            }

            let category = match category_index.get(record.category.as_str()) {
                Some(&index) => index,
                None => {
                    let index = categories.len();
                    categories.push(CategoryStyle {
                        key: record.category.clone(),
                        color: data.category_color(&record.category, index),
                    });
                    category_index.insert(record.category.clone(), index);
                    index
                }
            };

            let (ux, uy) = stable_unit_pair(&record.id);
            index_by_id.insert(record.id.clone(), nodes.len());
            nodes.push(SimNode {
                id: record.id.clone(),
                name: record.display_name().to_owned(),
                category,
                size: record.size,
                description: record.description.clone().unwrap_or_default(),
                pos: vec2(ux * viewport.x, uy * viewport.y),
                vel: Vec2::ZERO,
                force: Vec2::ZERO,
            });
        }

        let mut links = Vec::with_capacity(data.links.len());
        let mut kind_colors = HashMap::new();
        let mut dropped_links = 0usize;
        for record in &data.links {
            let (Some(&source), Some(&target)) = (
                index_by_id.get(&record.source),
                index_by_id.get(&record.target),
            ) else {
                log::warn!(
                    "link {} -> {} references an unknown node; dropped",
                    record.source,
                    record.target
                );
                dropped_links += 1;
                continue;
            };

            if !kind_colors.contains_key(&record.kind) {
                kind_colors.insert(record.kind.clone(), palette_color(kind_colors.len()));
            }

            links.push(SimLink {
                source,
                target,
                kind: record.kind.clone(),
                description: record.description.clone(),
            });
        }

        let mut neighbours = vec![HashSet::new(); nodes.len()];
        for link in &links {
            neighbours[link.source].insert(link.target);
            neighbours[link.target].insert(link.source);
        }

        let center = viewport * 0.5;
        let count = categories.len().max(1);
        let cluster_centers = (0..categories.len())
            .map(|index| {
                let angle = TAU * index as f32 / count as f32;
                center + vec2(angle.cos(), angle.sin()) * CLUSTER_RING_RADIUS
            })
            .collect();

        Self {
            nodes,
            links,
            index_by_id,
            neighbours,
            categories,
            kind_colors,
            cluster_centers,
            viewport,
            dropped_links,
        }
    }

    pub fn category_color(&self, node: &SimNode) -> Color32 {
        self.categories
            .get(node.category)
            .map(|style| style.color)
            .unwrap_or(Color32::GRAY)
    }

    pub fn kind_color(&self, link: &SimLink) -> Color32 {
        self.kind_colors
            .get(&link.kind)
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
pub(in crate::app) mod tests {
    use super::*;
    use crate::ecosystem::{LinkRecord, NodeRecord};

    pub fn node(id: &str, category: &str, size: Option<f32>) -> NodeRecord {
        NodeRecord {
            id: id.to_owned(),
            name: None,
            category: category.to_owned(),
            size,
            description: None,
        }
    }

    pub fn link(source: &str, target: &str) -> LinkRecord {
        LinkRecord {
            source: source.to_owned(),
            target: target.to_owned(),
            kind: "partnership".to_owned(),
            description: String::new(),
        }
    }

    pub fn dataset(nodes: Vec<NodeRecord>, links: Vec<LinkRecord>) -> EcosystemData {
        EcosystemData {
            nodes,
            links,
            ..Default::default()
        }
    }

    pub const VIEWPORT: Vec2 = vec2(1000.0, 800.0);

    #[test]
    fn drops_dangling_links_and_counts_the_fault() {
        let data = dataset(vec![node("a", "startup", None)], vec![link("a", "missing")]);
        let scene = Scene::build(&data, VIEWPORT);

        assert_eq!(scene.nodes.len(), 1);
        assert!(scene.links.is_empty());
        assert_eq!(scene.dropped_links, 1);
    }

    #[test]
    fn neighbour_index_is_symmetric() {
        let data = dataset(
            vec![
                node("a", "startup", None),
                node("b", "investor", None),
                node("c", "person", None),
            ],
            vec![link("a", "b"), link("b", "c"), link("c", "a")],
        );
        let scene = Scene::build(&data, VIEWPORT);

        for link in &scene.links {
            assert!(scene.neighbours[link.source].contains(&link.target));
            assert!(scene.neighbours[link.target].contains(&link.source));
        }
    }

    #[test]
    fn initial_positions_are_inside_the_viewport() {
        let data = dataset(
            (0..40)
                .map(|n| node(&format!("node-{n}"), "startup", None))
                .collect(),
            Vec::new(),
        );
        let scene = Scene::build(&data, VIEWPORT);

        for sim_node in &scene.nodes {
            assert!((0.0..VIEWPORT.x).contains(&sim_node.pos.x));
            assert!((0.0..VIEWPORT.y).contains(&sim_node.pos.y));
            assert_eq!(sim_node.vel, Vec2::ZERO);
        }
    }

    #[test]
    fn marker_radius_has_a_legible_floor() {
        let data = dataset(
            vec![
                node("big", "startup", Some(12.0)),
                node("tiny", "startup", Some(0.5)),
                node("unsized", "startup", None),
            ],
            Vec::new(),
        );
        let scene = Scene::build(&data, VIEWPORT);

        assert_eq!(scene.nodes[0].radius(), 6.0);
        assert_eq!(scene.nodes[1].radius(), 4.0);
        assert_eq!(scene.nodes[2].radius(), 5.0);
    }

    #[test]
    fn cluster_centers_follow_category_first_appearance_order() {
        let data = dataset(
            vec![
                node("a", "startup", None),
                node("b", "investor", None),
                node("c", "startup", None),
                node("d", "university", None),
            ],
            Vec::new(),
        );
        let scene = Scene::build(&data, VIEWPORT);

        let keys = scene
            .categories
            .iter()
            .map(|style| style.key.as_str())
            .collect::<Vec<_>>();
        assert_eq!(keys, ["startup", "investor", "university"]);
        assert_eq!(scene.cluster_centers.len(), 3);

        let center = VIEWPORT * 0.5;
        for (index, cluster) in scene.cluster_centers.iter().enumerate() {
            let angle = TAU * index as f32 / 3.0;
            let expected = center + vec2(angle.cos(), angle.sin()) * CLUSTER_RING_RADIUS;
            assert!((*cluster - expected).length() < 1e-3);
        }
    }

    #[test]
    fn duplicate_node_ids_keep_the_first_record() {
        let data = dataset(
            vec![node("a", "startup", Some(10.0)), node("a", "investor", None)],
            Vec::new(),
        );
        let scene = Scene::build(&data, VIEWPORT);

        assert_eq!(scene.nodes.len(), 1);
        assert_eq!(scene.nodes[0].size, Some(10.0));
        assert_eq!(scene.categories.len(), 1);
    }
}
