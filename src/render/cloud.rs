//! Word cloud scene: keywords placed on a sphere, connector lines between
//! neighbouring anchors, and the per-frame float and hover animation.
use crate::keyword::{font_size, sort_by_weight_desc, Keyword, MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::render::connections::{nearest_connections, Connection};
use crate::render::sphere::sphere_points;

pub const SPHERE_RADIUS: f32 = 6.0;
pub const NEAREST_NEIGHBORS: usize = 5;

const HOVER_SCALE: f32 = 1.3;
/// Fraction of the remaining scale gap closed each frame.
const SCALE_EASE: f32 = 0.1;

const FLOAT_SPEED: f32 = 0.8;
const FLOAT_PHASE: f32 = 0.1;
const FLOAT_AMPLITUDE: f32 = 0.15;

/// A keyword after layout.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub weight: f32,
    /// World-space font size
    pub size: f32,
    /// Anchor on the sphere
    pub base: [f32; 3],
    /// Current hover scale, eases between 1.0 and 1.3
    pub scale: f32,
}

#[derive(Debug, Clone, Default)]
pub struct CloudScene {
    pub words: Vec<PlacedWord>,
    pub points: Vec<[f32; 3]>,
    pub connections: Vec<Connection>,
}

/// Vertical float offset of a word anchored at `base_x`, at time `t` seconds.
pub fn float_offset(t: f32, base_x: f32) -> f32 {
    (t * FLOAT_SPEED + base_x * FLOAT_PHASE).sin() * FLOAT_AMPLITUDE
}

impl CloudScene {
    /// Lay out `keywords`: heaviest first, one sphere point per word.
    pub fn new(keywords: &[Keyword]) -> Self {
        // One point minimum so the connector pass always has something to chew on
        let points = sphere_points(keywords.len().max(1), SPHERE_RADIUS);
        let sorted = sort_by_weight_desc(keywords);

        let words = sorted
            .into_iter()
            .enumerate()
            .map(|(i, k)| PlacedWord {
                size: font_size(k.weight, MIN_FONT_SIZE, MAX_FONT_SIZE),
                base: points[i % points.len()],
                weight: k.weight,
                text: k.word,
                scale: 1.0,
            })
            .collect();

        let connections = nearest_connections(&points, NEAREST_NEIGHBORS);
        log::debug!(
            "cloud scene: {} words, {} connections",
            keywords.len(),
            connections.len()
        );

        Self {
            words,
            points,
            connections,
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Advance hover scaling by one frame.
    pub fn step_hover(&mut self, hovered: Option<usize>) {
        for (i, w) in self.words.iter_mut().enumerate() {
            let target = if hovered == Some(i) { HOVER_SCALE } else { 1.0 };
            w.scale += (target - w.scale) * SCALE_EASE;
        }
    }

    /// Animated world position of word `i` at time `t`.
    pub fn word_position(&self, i: usize, t: f32) -> Option<[f32; 3]> {
        let w = self.words.get(i)?;
        let [x, y, z] = w.base;
        Some([x, y + float_offset(t, x), z])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords() -> Vec<Keyword> {
        vec![
            Keyword::new("budget", 0.2),
            Keyword::new("senate", 1.0),
            Keyword::new("vote", 0.6),
            Keyword::new("deficit", 0.0),
        ]
    }

    #[test]
    fn one_rendered_word_per_keyword() {
        let kws = keywords();
        assert_eq!(CloudScene::new(&kws).len(), kws.len());
        let many: Vec<Keyword> = (0..60).map(|i| Keyword::new(format!("w{}", i), 0.5)).collect();
        assert_eq!(CloudScene::new(&many).len(), 60);
    }

    #[test]
    fn words_placed_heaviest_first() {
        let scene = CloudScene::new(&keywords());
        let order: Vec<&str> = scene.words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(order, vec!["senate", "vote", "budget", "deficit"]);
        assert_eq!(scene.words[0].base, scene.points[0]);
        assert_eq!(scene.words[3].base, scene.points[3]);
    }

    #[test]
    fn sizes_follow_weight() {
        let scene = CloudScene::new(&keywords());
        assert_eq!(scene.words[0].size, MAX_FONT_SIZE);
        assert_eq!(scene.words[3].size, MIN_FONT_SIZE);
        for pair in scene.words.windows(2) {
            assert!(pair[0].size >= pair[1].size);
        }
    }

    #[test]
    fn empty_input_has_no_words_but_one_anchor() {
        let scene = CloudScene::new(&[]);
        assert!(scene.is_empty());
        assert_eq!(scene.points.len(), 1);
        assert!(scene.connections.is_empty());
    }

    #[test]
    fn hover_eases_toward_target_and_back() {
        let mut scene = CloudScene::new(&keywords());
        for _ in 0..200 {
            scene.step_hover(Some(1));
        }
        assert!((scene.words[1].scale - HOVER_SCALE).abs() < 1e-3);
        assert!((scene.words[0].scale - 1.0).abs() < 1e-6);

        scene.step_hover(None);
        assert!(scene.words[1].scale < HOVER_SCALE);
        assert!(scene.words[1].scale > 1.0);
    }

    #[test]
    fn float_stays_within_amplitude() {
        let scene = CloudScene::new(&keywords());
        for step in 0..100 {
            let t = step as f32 * 0.37;
            let p = scene.word_position(0, t).unwrap();
            assert!((p[1] - scene.words[0].base[1]).abs() <= FLOAT_AMPLITUDE + 1e-6);
            assert_eq!(p[0], scene.words[0].base[0]);
        }
        assert!(scene.word_position(99, 0.0).is_none());
    }
}
