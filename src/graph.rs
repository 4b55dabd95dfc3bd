// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Café Demo Engine - Wallet Graph Visualization

//! Random wallet graph for the 3D hero scene.
//!
//! The scene never sees real data. Layout, per-frame animation and the
//! periodic jitter live here; drawing is left to a [`Renderer`] so the logic
//! runs headless in tests.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::f32::consts::TAU;

use crate::random::RandomSource;

/// Radians per millisecond of idle spin.
const ROTATION_SPEED: f32 = 0.00012;
/// Pulse cycles per millisecond.
const PULSE_SPEED: f32 = 0.0015;
/// Frames longer than this are clamped (tab was in the background).
const MAX_FRAME_MS: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Cafe,
    Pool,
    Wallet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: u32,
    pub kind: NodeKind,
    /// Resting position.
    pub anchor: [f32; 3],
    /// Position after the latest jitter.
    pub position: [f32; 3],
    pub size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: u32,
    pub to: u32,
}

impl GraphEdge {
    /// Undirected edge with `from < to`.
    pub fn new(a: u32, b: u32) -> Self {
        if a <= b { Self { from: a, to: b } } else { Self { from: b, to: a } }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl WalletGraph {
    /// Node 0 is the café hub at the origin. Every later node hangs off a
    /// random earlier one, so the graph is always connected; `extra_edges`
    /// adds cross links on top, skipping duplicates and self-loops.
    pub fn generate<R: RandomSource>(rng: &mut R, node_count: u32, extra_edges: u32, radius: f32) -> Self {
        let mut nodes = Vec::with_capacity(node_count as usize);
        for id in 0..node_count {
            let (kind, anchor, size) = if id == 0 {
                (NodeKind::Cafe, [0.0, 0.0, 0.0], 1.6)
            } else {
                let kind = if rng.next_f64() < 0.15 { NodeKind::Pool } else { NodeKind::Wallet };
                let anchor = shell_point(rng, radius);
                let size = match kind {
                    NodeKind::Pool => 0.9,
                    _ => rng.range_f64(0.25, 0.6) as f32,
                };
                (kind, anchor, size)
            };
            nodes.push(GraphNode { id, kind, anchor, position: anchor, size });
        }

        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for id in 1..node_count {
            let parent = rng.index(id as usize) as u32;
            let edge = GraphEdge::new(parent, id);
            seen.insert(edge);
            edges.push(edge);
        }

        if node_count > 2 {
            let mut added = 0;
            let mut attempts = 0;
            while added < extra_edges && attempts < extra_edges.saturating_mul(8) {
                attempts += 1;
                let a = rng.index(node_count as usize) as u32;
                let b = rng.index(node_count as usize) as u32;
                if a == b {
                    continue;
                }
                let edge = GraphEdge::new(a, b);
                if seen.insert(edge) {
                    edges.push(edge);
                    added += 1;
                }
            }
        }

        Self { nodes, edges }
    }

    /// Nudge every non-hub node to a random point within `amplitude` of its
    /// anchor. Offsets do not accumulate, so nodes never drift away.
    pub fn jitter<R: RandomSource>(&mut self, rng: &mut R, amplitude: f32) {
        let amp = amplitude.abs() as f64;
        for node in self.nodes.iter_mut().filter(|n| n.kind != NodeKind::Cafe) {
            for axis in 0..3 {
                node.position[axis] = node.anchor[axis] + rng.range_f64(-amp, amp) as f32;
            }
        }
    }

    pub fn degree(&self, id: u32) -> usize {
        self.edges.iter().filter(|e| e.from == id || e.to == id).count()
    }
}

/// Uniform point on a sphere shell between 60% and 100% of `radius`.
fn shell_point<R: RandomSource>(rng: &mut R, radius: f32) -> [f32; 3] {
    let theta = (rng.next_f64() as f32) * TAU;
    let phi = (2.0 * rng.next_f64() as f32 - 1.0).clamp(-1.0, 1.0).acos();
    let r = radius * (0.6 + 0.4 * rng.next_f64() as f32);
    [
        r * phi.sin() * theta.cos(),
        r * phi.cos(),
        r * phi.sin() * theta.sin(),
    ]
}

// ─── Rendering ───────────────────────────────────────────────────────────────

/// Per-frame animation state handed to the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameState {
    pub frame: u64,
    /// Scene rotation around the vertical axis, radians in `[0, TAU)`.
    pub rotation: f32,
    /// Hub glow, `[0, 1]`.
    pub pulse: f32,
}

/// Collaborator that actually draws the scene.
pub trait Renderer {
    fn set_nodes(&mut self, nodes: &[GraphNode]);
    fn set_edges(&mut self, edges: &[GraphEdge]);
    fn update_frame(&mut self, frame: &FrameState);
}

/// Keeps the latest scene data for a host that pulls instead of being called.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SnapshotRenderer {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    pub frame: FrameState,
    pub node_updates: u32,
}

impl Renderer for SnapshotRenderer {
    fn set_nodes(&mut self, nodes: &[GraphNode]) {
        self.nodes = nodes.to_vec();
        self.node_updates += 1;
    }

    fn set_edges(&mut self, edges: &[GraphEdge]) {
        self.edges = edges.to_vec();
    }

    fn update_frame(&mut self, frame: &FrameState) {
        self.frame = *frame;
    }
}

pub struct GraphScene<Rd: Renderer> {
    graph: WalletGraph,
    renderer: Rd,
    state: FrameState,
    pulse_phase: f32,
}

impl<Rd: Renderer> GraphScene<Rd> {
    pub fn new(graph: WalletGraph, mut renderer: Rd) -> Self {
        renderer.set_nodes(&graph.nodes);
        renderer.set_edges(&graph.edges);
        Self { graph, renderer, state: FrameState::default(), pulse_phase: 0.0 }
    }

    pub fn graph(&self) -> &WalletGraph {
        &self.graph
    }

    pub fn renderer(&self) -> &Rd {
        &self.renderer
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Animation-frame callback.
    pub fn frame(&mut self, dt_ms: f32) -> FrameState {
        let dt = if dt_ms.is_finite() { dt_ms.clamp(0.0, MAX_FRAME_MS) } else { 0.0 };
        self.state.frame += 1;
        self.state.rotation = (self.state.rotation + dt * ROTATION_SPEED).rem_euclid(TAU);
        self.pulse_phase = (self.pulse_phase + dt * PULSE_SPEED).rem_euclid(1.0);
        self.state.pulse = 0.5 + 0.5 * (self.pulse_phase * TAU).sin();
        self.renderer.update_frame(&self.state);
        self.state
    }

    /// Jitter timer callback.
    pub fn jitter<R: RandomSource>(&mut self, rng: &mut R, amplitude: f32) {
        self.graph.jitter(rng, amplitude);
        self.renderer.set_nodes(&self.graph.nodes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedRandom, SeededRandom};
    use std::collections::VecDeque;

    fn connected(graph: &WalletGraph) -> bool {
        let n = graph.nodes.len();
        if n == 0 {
            return true;
        }
        let mut seen = vec![false; n];
        let mut queue = VecDeque::from([0usize]);
        seen[0] = true;
        while let Some(cur) = queue.pop_front() {
            for e in &graph.edges {
                let next = if e.from as usize == cur {
                    e.to as usize
                } else if e.to as usize == cur {
                    e.from as usize
                } else {
                    continue;
                };
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }
        seen.into_iter().all(|s| s)
    }

    #[test]
    fn generated_graph_is_connected_and_simple() {
        for seed in 0..20 {
            let mut rng = SeededRandom::new(seed);
            let g = WalletGraph::generate(&mut rng, 48, 24, 6.0);
            assert_eq!(g.nodes.len(), 48);
            assert!(connected(&g), "seed {seed} produced a disconnected graph");
            assert!(g.edges.iter().all(|e| e.from < e.to));
            let unique: HashSet<_> = g.edges.iter().collect();
            assert_eq!(unique.len(), g.edges.len());
            assert!(g.edges.len() >= 47);
        }
    }

    #[test]
    fn nodes_sit_inside_the_shell() {
        let mut rng = SeededRandom::new(3);
        let g = WalletGraph::generate(&mut rng, 64, 0, 6.0);
        assert_eq!(g.nodes[0].kind, NodeKind::Cafe);
        for node in &g.nodes[1..] {
            let [x, y, z] = node.anchor;
            let r = (x * x + y * y + z * z).sqrt();
            assert!(r >= 6.0 * 0.6 - 1e-3 && r <= 6.0 + 1e-3, "radius {r}");
        }
    }

    #[test]
    fn same_seed_same_graph() {
        let a = WalletGraph::generate(&mut SeededRandom::new(11), 30, 10, 6.0);
        let b = WalletGraph::generate(&mut SeededRandom::new(11), 30, 10, 6.0);
        assert_eq!(a.nodes, b.nodes);
        assert_eq!(a.edges, b.edges);
    }

    #[test]
    fn tiny_graphs() {
        let mut rng = ScriptedRandom::new(vec![0.5]);
        assert!(WalletGraph::generate(&mut rng, 0, 5, 6.0).nodes.is_empty());
        let two = WalletGraph::generate(&mut rng, 2, 5, 6.0);
        assert_eq!(two.edges, vec![GraphEdge::new(0, 1)]);
        assert_eq!(two.degree(0), 1);
    }

    #[test]
    fn jitter_is_bounded_around_anchor() {
        let mut rng = SeededRandom::new(8);
        let mut g = WalletGraph::generate(&mut rng, 20, 5, 6.0);
        for _ in 0..50 {
            g.jitter(&mut rng, 0.15);
        }
        for node in &g.nodes {
            for axis in 0..3 {
                assert!((node.position[axis] - node.anchor[axis]).abs() <= 0.15 + 1e-5);
            }
        }
        assert_eq!(g.nodes[0].position, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn scene_drives_the_renderer() {
        let mut rng = SeededRandom::new(2);
        let graph = WalletGraph::generate(&mut rng, 10, 3, 6.0);
        let edge_count = graph.edges.len();
        let mut scene = GraphScene::new(graph, SnapshotRenderer::default());
        assert_eq!(scene.renderer().nodes.len(), 10);
        assert_eq!(scene.renderer().edges.len(), edge_count);

        let first = scene.frame(16.0);
        assert_eq!(first.frame, 1);
        assert!(first.rotation > 0.0);
        assert_eq!(scene.renderer().frame, first);

        // A huge gap counts as one capped frame.
        let before = scene.state().rotation;
        scene.frame(60_000.0);
        assert!((scene.state().rotation - before - MAX_FRAME_MS * ROTATION_SPEED).abs() < 1e-6);

        scene.jitter(&mut rng, 0.15);
        assert_eq!(scene.renderer().node_updates, 2);
        assert!((0.0..=1.0).contains(&scene.state().pulse));
    }
}
