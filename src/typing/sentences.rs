use rand::Rng;

pub const SENTENCES: [&str; 8] = [
    "The quick brown fox jumps over the lazy dog.",
    "Success is not the key to happiness. Happiness is the key to success.",
    "Education is the most powerful weapon which you can use to change the world.",
    "Do not wait for leaders; do it alone, person to person.",
    "It always seems impossible until it is done.",
    "Believe you can and you are halfway there.",
    "Act as if what you do makes a difference. It does.",
    "Dream big and dare to fail.",
];

/// Uniform draw from the fixed pool.
pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    SENTENCES[rng.gen_range(0..SENTENCES.len())]
}
