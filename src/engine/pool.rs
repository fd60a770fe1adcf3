//! Content pool builder.
//!
//! Expands each content into one pool entry per required repetition and
//! shuffles the result once.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::Content;

/// Build the shuffled placement pool for one engine run.
pub fn build_pool<'a, R: Rng + ?Sized>(contents: &'a [Content], rng: &mut R) -> Vec<&'a Content> {
    let mut pool: Vec<&Content> = contents
        .iter()
        .flat_map(|c| std::iter::repeat_n(c, c.saturation as usize))
        .collect();
    pool.shuffle(rng);
    pool
}
