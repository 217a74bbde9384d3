/// Nearest-neighbour connector lines between word anchors.
///
/// Brute force: every point measures every other point, keeps the `k`
/// closest, and a line is emitted once per unordered pair.
use rayon::prelude::*;
use std::collections::HashSet;

/// Line palette, RGB.
pub const LINE_COLORS: [[u8; 3]; 10] = [
    [0xb7, 0x94, 0xf6], // purple
    [0x4f, 0xd1, 0xc7], // teal
    [0xf6, 0xad, 0x55], // orange
    [0xfc, 0x81, 0x81], // coral
    [0x63, 0xb3, 0xed], // blue
    [0x68, 0xd3, 0x91], // green
    [0xfb, 0xbf, 0x24], // yellow
    [0xa7, 0x8b, 0xfa], // violet
    [0x48, 0xbb, 0x78], // emerald
    [0xed, 0x64, 0xa6], // pink
];

/// Line opacity used by the scene painter.
pub const LINE_OPACITY: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    /// Index of the point the line was discovered from
    pub from: usize,
    /// Index of the neighbour
    pub to: usize,
    pub start: [f32; 3],
    pub end: [f32; 3],
    pub color: [u8; 3],
}

impl Connection {
    /// Unordered pair key, smaller index first.
    pub fn pair(&self) -> (usize, usize) {
        if self.from < self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        }
    }
}

fn distance(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Indices of the `k` nearest other points to `points[i]`, closest first.
fn nearest_of(points: &[[f32; 3]], i: usize, k: usize) -> Vec<usize> {
    let p = &points[i];
    let mut dists: Vec<(usize, f32)> = points
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != i)
        .map(|(j, q)| (j, distance(p, q)))
        .collect();
    dists.sort_by(|a, b| a.1.total_cmp(&b.1));
    dists.into_iter().take(k).map(|(j, _)| j).collect()
}

/// Connect each point to its `k` nearest neighbours without duplicate pairs.
pub fn nearest_connections(points: &[[f32; 3]], k: usize) -> Vec<Connection> {
    // Neighbour search is independent per point; emission stays sequential
    // so the output order does not depend on scheduling.
    let neighbours: Vec<Vec<usize>> = (0..points.len())
        .into_par_iter()
        .map(|i| nearest_of(points, i, k))
        .collect();

    let mut seen: HashSet<(usize, usize)> = HashSet::new();
    let mut conns = Vec::new();

    for (i, near) in neighbours.iter().enumerate() {
        for &j in near {
            let key = if i < j { (i, j) } else { (j, i) };
            if seen.insert(key) {
                conns.push(Connection {
                    from: i,
                    to: j,
                    start: points[i],
                    end: points[j],
                    color: LINE_COLORS[(i + j) % LINE_COLORS.len()],
                });
            }
        }
    }

    conns
}
