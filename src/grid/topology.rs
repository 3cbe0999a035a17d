use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::config::GridConfig;
use crate::error::{Error, Result};

use super::types::Node;

/// Generates the grid's nodes, positions, ratings and neighbor lists.
///
/// Nodes are laid out row-major on a near-square grid. Each node picks a
/// random number of neighbors in `[min_neighbors, max_neighbors]` from its
/// shuffled up/down/left/right cells; when those run out before
/// `min_neighbors` is reached, random other nodes are appended.
///
/// Random draws happen in a fixed order (all ratings, then per node: shuffle,
/// neighbor count, fill draws), so the same config and generator state always
/// produce the same topology.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] if `cfg` fails [`GridConfig::validate`].
///
/// # Examples
///
/// ```
/// use grid_stress::config::GridConfig;
/// use grid_stress::grid::generate_nodes;
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let cfg = GridConfig { num_nodes: 10, ..GridConfig::default() };
/// let mut rng = StdRng::seed_from_u64(42);
/// let nodes = generate_nodes(&cfg, &mut rng).unwrap();
/// assert_eq!(nodes[0].id, "T01");
/// assert_eq!(nodes[9].id, "T10");
/// ```
pub fn generate_nodes(cfg: &GridConfig, rng: &mut StdRng) -> Result<Vec<Node>> {
    let errors = cfg.validate();
    if !errors.is_empty() {
        return Err(Error::InvalidConfig(errors));
    }

    let n = cfg.num_nodes;
    let ids = make_ids(n);
    let (cols, rows) = grid_dimensions(n);
    debug!(num_nodes = n, cols, rows, "laying out grid");

    let mut nodes: Vec<Node> = ids
        .iter()
        .cloned()
        .enumerate()
        .map(|(i, id)| {
            let (row, col) = (i / cols, i % cols);
            let pick = rng.random_range(0..cfg.rating_kva_options.len());
            Node {
                id,
                x: col as f64 * cfg.x_spacing,
                y: (0.0 - row as f64) * cfg.y_spacing,
                rating_kva: cfg.rating_kva_options[pick],
                neighbors: Vec::new(),
            }
        })
        .collect();

    let mut chosen_by_node = Vec::with_capacity(n);
    for i in 0..n {
        let mut candidates: Vec<usize> = adjacent_indices(i, cols, rows)
            .into_iter()
            .filter(|&j| j < n)
            .collect();
        candidates.shuffle(rng);

        let k = rng.random_range(cfg.min_neighbors..=cfg.max_neighbors);
        candidates.truncate(k);
        let mut chosen = candidates;

        if chosen.len() < cfg.min_neighbors {
            warn!(
                node = %nodes[i].id,
                adjacent = chosen.len(),
                min_neighbors = cfg.min_neighbors,
                "grid adjacency exhausted, filling with random nodes"
            );
        }
        // Terminates: validation guarantees min_neighbors <= n - 1.
        while chosen.len() < cfg.min_neighbors {
            let j = rng.random_range(0..n);
            if j != i && !chosen.contains(&j) {
                chosen.push(j);
            }
        }

        chosen_by_node.push(chosen);
    }

    for (node, chosen) in nodes.iter_mut().zip(chosen_by_node) {
        node.neighbors = chosen.into_iter().map(|j| ids[j].clone()).collect();
        debug!(node = %node.id, neighbors = ?node.neighbors, "neighbors selected");
    }

    Ok(nodes)
}

/// Ordinal ids zero-padded to the width of `n`.
fn make_ids(n: usize) -> Vec<String> {
    let width = n.to_string().len();
    (1..=n).map(|i| format!("T{i:0width$}")).collect()
}

/// Returns `(cols, rows)` for a near-square layout of `n` nodes.
pub fn grid_dimensions(n: usize) -> (usize, usize) {
    let cols = ((n as f64).sqrt().ceil() as usize).max(1);
    let rows = n.div_ceil(cols);
    (cols, rows)
}

/// Up, down, left and right cells of `index` that lie inside the grid bounds.
fn adjacent_indices(index: usize, cols: usize, rows: usize) -> Vec<usize> {
    let (r, c) = (index / cols, index % cols);
    let mut out = Vec::with_capacity(4);
    if r > 0 {
        out.push((r - 1) * cols + c);
    }
    if r + 1 < rows {
        out.push((r + 1) * cols + c);
    }
    if c > 0 {
        out.push(r * cols + (c - 1));
    }
    if c + 1 < cols {
        out.push(r * cols + (c + 1));
    }
    out
}
