use super::scene::Scene;

const DIMMED_NODE_ALPHA: f32 = 0.2;
const DIMMED_LINK_ALPHA: f32 = 0.05;
const DEFAULT_LINK_ALPHA: f32 = 0.6;
const DEFAULT_STROKE: f32 = 1.5;
const EMPHASIS_STROKE: f32 = 3.0;

/// At most one entity is selected at a time; selecting one kind clears the
/// other by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum Selection {
    None,
    Node(usize),
    Link(usize),
}

impl Selection {
    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }
}

/// Per-primitive alpha and stroke width, recomputed in one pass whenever the
/// selection changes. Indexed in step with the scene's node/link arenas.
pub(in crate::app) struct Emphasis {
    pub node_alpha: Vec<f32>,
    pub node_stroke: Vec<f32>,
    pub link_alpha: Vec<f32>,
    pub link_stroke: Vec<f32>,
}

impl Emphasis {
    pub fn empty() -> Self {
        Self {
            node_alpha: Vec::new(),
            node_stroke: Vec::new(),
            link_alpha: Vec::new(),
            link_stroke: Vec::new(),
        }
    }
}

pub(in crate::app) fn compute_emphasis(scene: &Scene, selection: Selection) -> Emphasis {
    let mut emphasis = Emphasis {
        node_alpha: vec![1.0; scene.nodes.len()],
        node_stroke: vec![DEFAULT_STROKE; scene.nodes.len()],
        link_alpha: vec![DEFAULT_LINK_ALPHA; scene.links.len()],
        link_stroke: vec![DEFAULT_STROKE; scene.links.len()],
    };

    match selection {
        Selection::None => {}
        Selection::Node(selected) => {
            if selected >= scene.nodes.len() {
                return emphasis;
            }

            for (index, alpha) in emphasis.node_alpha.iter_mut().enumerate() {
                let related =
                    index == selected || scene.neighbours[selected].contains(&index);
                if !related {
                    *alpha = DIMMED_NODE_ALPHA;
                }
            }
            emphasis.node_stroke[selected] = EMPHASIS_STROKE;

            for (index, link) in scene.links.iter().enumerate() {
                if link.source == selected || link.target == selected {
                    emphasis.link_alpha[index] = 1.0;
                } else {
                    emphasis.link_alpha[index] = DIMMED_LINK_ALPHA;
                }
            }
        }
        Selection::Link(selected) => {
            let Some(link) = scene.links.get(selected) else {
                return emphasis;
            };

            for (index, alpha) in emphasis.node_alpha.iter_mut().enumerate() {
                if index == link.source || index == link.target {
                    emphasis.node_stroke[index] = EMPHASIS_STROKE;
                } else {
                    *alpha = DIMMED_NODE_ALPHA;
                }
            }

            for alpha in &mut emphasis.link_alpha {
                *alpha = DIMMED_LINK_ALPHA;
            }
            emphasis.link_alpha[selected] = 1.0;
            emphasis.link_stroke[selected] = EMPHASIS_STROKE;
        }
    }

    emphasis
}

#[cfg(test)]
mod tests {
    use super::super::scene::tests::{VIEWPORT, dataset, link, node};
    use super::*;

    fn five_node_scene() -> Scene {
        // x is linked to y and z; v and w sit apart.
        let data = dataset(
            vec![
                node("x", "startup", None),
                node("y", "investor", None),
                node("z", "person", None),
                node("v", "startup", None),
                node("w", "university", None),
            ],
            vec![link("x", "y"), link("x", "z"), link("v", "w")],
        );
        Scene::build(&data, VIEWPORT)
    }

    #[test]
    fn selecting_a_node_keeps_it_and_its_neighbours_at_full_opacity() {
        let scene = five_node_scene();
        let emphasis = compute_emphasis(&scene, Selection::Node(0));

        let full = emphasis
            .node_alpha
            .iter()
            .filter(|&&alpha| alpha == 1.0)
            .count();
        assert_eq!(full, 3);
        assert_eq!(emphasis.node_alpha[0], 1.0);
        assert_eq!(emphasis.node_alpha[1], 1.0);
        assert_eq!(emphasis.node_alpha[2], 1.0);
        assert_eq!(emphasis.node_alpha[3], DIMMED_NODE_ALPHA);
        assert_eq!(emphasis.node_alpha[4], DIMMED_NODE_ALPHA);

        assert_eq!(emphasis.node_stroke[0], EMPHASIS_STROKE);
        assert_eq!(emphasis.node_stroke[1], DEFAULT_STROKE);

        assert_eq!(emphasis.link_alpha[0], 1.0);
        assert_eq!(emphasis.link_alpha[1], 1.0);
        assert_eq!(emphasis.link_alpha[2], DIMMED_LINK_ALPHA);
    }

    #[test]
    fn selecting_a_link_emphasizes_it_and_its_endpoints() {
        let scene = five_node_scene();
        let emphasis = compute_emphasis(&scene, Selection::Link(2));

        assert_eq!(emphasis.node_alpha[3], 1.0);
        assert_eq!(emphasis.node_alpha[4], 1.0);
        assert_eq!(emphasis.node_stroke[3], EMPHASIS_STROKE);
        assert_eq!(emphasis.node_stroke[4], EMPHASIS_STROKE);
        for index in [0, 1, 2] {
            assert_eq!(emphasis.node_alpha[index], DIMMED_NODE_ALPHA);
        }

        assert_eq!(emphasis.link_alpha[2], 1.0);
        assert_eq!(emphasis.link_stroke[2], EMPHASIS_STROKE);
        assert_eq!(emphasis.link_alpha[0], DIMMED_LINK_ALPHA);
        assert_eq!(emphasis.link_alpha[1], DIMMED_LINK_ALPHA);
    }

    #[test]
    fn clearing_the_selection_restores_defaults() {
        let scene = five_node_scene();
        let emphasis = compute_emphasis(&scene, Selection::None);

        assert!(emphasis.node_alpha.iter().all(|&alpha| alpha == 1.0));
        assert!(emphasis.node_stroke.iter().all(|&w| w == DEFAULT_STROKE));
        assert!(
            emphasis
                .link_alpha
                .iter()
                .all(|&alpha| alpha == DEFAULT_LINK_ALPHA)
        );
    }

    #[test]
    fn selection_is_exclusive_across_any_sequence() {
        // The enum carries at most one entity; replacing it is total.
        let mut selection = Selection::None;
        for next in [
            Selection::Node(1),
            Selection::Link(0),
            Selection::Node(3),
            Selection::None,
            Selection::Link(2),
        ] {
            selection = next;
            let node_selected = matches!(selection, Selection::Node(_));
            let link_selected = matches!(selection, Selection::Link(_));
            assert!(!(node_selected && link_selected));
        }
        assert!(!selection.is_none());
    }

    #[test]
    fn stale_indices_degrade_to_defaults() {
        let scene = five_node_scene();
        let from_node = compute_emphasis(&scene, Selection::Node(99));
        let from_link = compute_emphasis(&scene, Selection::Link(99));

        assert!(from_node.node_alpha.iter().all(|&alpha| alpha == 1.0));
        assert!(from_link.node_alpha.iter().all(|&alpha| alpha == 1.0));
    }
}
