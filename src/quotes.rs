//! Motivational quotes shown in the planner header and the `quote` command.

use rand::Rng;

pub const QUOTES: [&str; 5] = [
    "Study hard, for the well is deep, and our brains are shallow. – Richard Baxter",
    "The beautiful thing about learning is nobody can take it away from you. – B.B. King",
    "Education is the most powerful weapon you can use to change the world. – Nelson Mandela",
    "Push yourself, because no one else is going to do it for you.",
    "Dream big. Study smart. Work hard.",
];

/// Pick a quote uniformly at random.
pub fn random_quote<R: Rng>(rng: &mut R) -> &'static str {
    QUOTES[rng.gen_range(0..QUOTES.len())]
}
