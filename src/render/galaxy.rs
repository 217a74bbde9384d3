/// Spiral starfield drawn behind the word cloud.
///
/// Stars sit on eight spiral arms out to radius 50, split into a coloured
/// layer (blue and purple, larger) and a faint white layer (tiny). The field
/// is generated from a seed so the same seed always gives the same sky.

/// Number of stars generated (both layers together).
pub const STAR_COUNT: usize = 800;
const ARMS: usize = 8;
const MAX_RADIUS: f32 = 50.0;
const ARM_TWIST: f32 = 0.5;
const SCATTER: f32 = 5.0;
const THICKNESS: f32 = 20.0;

/// Decorative spin about the y axis, radians per second.
pub const SPIN_SPEED: f32 = 0.01;

/// World-space point size and opacity per layer.
pub const COLORED_SIZE: f32 = 0.1;
pub const COLORED_OPACITY: f32 = 0.7;
pub const WHITE_SIZE: f32 = 0.03;
pub const WHITE_OPACITY: f32 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub position: [f32; 3],
    /// Linear RGB, 0..1
    pub color: [f32; 3],
}

#[derive(Debug, Clone)]
pub struct Galaxy {
    pub colored: Vec<Star>,
    pub white: Vec<Star>,
}

/// splitmix64 finaliser mapped to [0, 1).
fn star_hash(x: u64) -> f32 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^= z >> 31;
    (z >> 40) as f32 / (1u64 << 24) as f32
}

/// Per-star random stream: channel `c` of star `i`.
struct StarRng {
    seed: u64,
    index: u64,
    channel: u64,
}

impl StarRng {
    fn new(seed: u64, index: usize) -> Self {
        Self {
            seed,
            index: index as u64,
            channel: 0,
        }
    }

    fn next(&mut self) -> f32 {
        let v = star_hash(
            self.seed
                .wrapping_mul(0x2545_F491_4F6C_DD1D)
                ^ (self.index << 8)
                ^ self.channel,
        );
        self.channel += 1;
        v
    }
}

impl Galaxy {
    /// Generate the starfield for `seed`.
    pub fn generate(seed: u64) -> Self {
        let mut colored = Vec::new();
        let mut white = Vec::new();

        for i in 0..STAR_COUNT {
            let mut rng = StarRng::new(seed, i);

            let radius = rng.next() * MAX_RADIUS;
            let spin = radius * ARM_TWIST;
            let branch = (i % ARMS) as f32 / ARMS as f32 * std::f32::consts::TAU;

            let x = (branch + spin).cos() * radius + (rng.next() - 0.5) * SCATTER;
            let y = (rng.next() - 0.5) * THICKNESS;
            let z = (branch + spin).sin() * radius + (rng.next() - 0.5) * SCATTER;
            let position = [x, y, z];

            let mix = rng.next();
            if mix < 0.3 {
                // blue
                let color = [0.5 + rng.next() * 0.5, 0.7 + rng.next() * 0.3, 1.0];
                colored.push(Star { position, color });
            } else if mix < 0.6 {
                // purple
                let color = [
                    0.7 + rng.next() * 0.3,
                    0.5 + rng.next() * 0.3,
                    0.8 + rng.next() * 0.2,
                ];
                colored.push(Star { position, color });
            } else {
                let b = 0.8 + rng.next() * 0.2;
                white.push(Star {
                    position,
                    color: [b, b, b],
                });
            }
        }

        Self { colored, white }
    }

    pub fn len(&self) -> usize {
        self.colored.len() + self.white.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Spin a star position about the y axis by `angle` radians.
pub fn spun(position: [f32; 3], angle: f32) -> [f32; 3] {
    let (s, c) = angle.sin_cos();
    [
        position[0] * c + position[2] * s,
        position[1],
        -position[0] * s + position[2] * c,
    ]
}
