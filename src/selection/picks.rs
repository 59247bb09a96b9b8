//! Randomized pick iterators over ranked candidate lists.
//!
//! Both iterators own a private copy of the candidates and remove one per
//! step, so `L` inputs always yield a permutation of length `L`. Consumers
//! typically stop at the first feasible candidate.
//!
//! Picks land near the front, so the candidates sit in a `VecDeque` and a
//! removal only shifts the few elements ahead of it.

use std::collections::VecDeque;

use rand::Rng;

/// Uniform pick among the best `width` remaining candidates.
///
/// # Examples
///
/// ```
/// use u_msvrp::selection::{create_rng, BoundedWidthPick};
///
/// let mut rng = create_rng(7);
/// let mut out: Vec<u32> = BoundedWidthPick::new(vec![1, 2, 3, 4], 2, &mut rng).collect();
/// out.sort();
/// assert_eq!(out, vec![1, 2, 3, 4]);
/// ```
#[derive(Debug)]
pub struct BoundedWidthPick<'r, T, R> {
    options: VecDeque<T>,
    width: usize,
    rng: &'r mut R,
}

impl<'r, T, R: Rng> BoundedWidthPick<'r, T, R> {
    /// `width` is clamped to at least 1.
    pub fn new(options: Vec<T>, width: usize, rng: &'r mut R) -> Self {
        Self {
            options: options.into(),
            width: width.max(1),
            rng,
        }
    }
}

impl<T, R: Rng> Iterator for BoundedWidthPick<'_, T, R> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.options.is_empty() {
            return None;
        }
        let window = self.width.min(self.options.len());
        let idx = self.rng.random_range(0..window);
        self.options.remove(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.options.len(), Some(self.options.len()))
    }
}

impl<T, R: Rng> ExactSizeIterator for BoundedWidthPick<'_, T, R> {}

/// Quasi-geometric pick that favours the front of the list.
///
/// Each step draws `U ~ Uniform(0, 1]` and removes index
/// `floor(ln U / ln beta) mod remaining`. The index follows
/// `P(k) ∝ (1 - beta) · beta^k`: a small `beta` almost always takes the
/// head, a `beta` close to 1 is nearly uniform.
///
/// # Examples
///
/// ```
/// use u_msvrp::selection::{create_rng, BiasedPick};
///
/// let mut rng = create_rng(7);
/// let first = BiasedPick::new(vec!['a', 'b', 'c'], 1e-12, &mut rng).next();
/// assert_eq!(first, Some('a'));
/// ```
#[derive(Debug)]
pub struct BiasedPick<'r, T, R> {
    options: VecDeque<T>,
    log_beta: f64,
    rng: &'r mut R,
}

impl<'r, T, R: Rng> BiasedPick<'r, T, R> {
    /// `beta` must lie in `(0, 1)`; see [`Selection::validate`](super::Selection::validate).
    pub fn new(options: Vec<T>, beta: f64, rng: &'r mut R) -> Self {
        Self {
            options: options.into(),
            log_beta: beta.ln(),
            rng,
        }
    }

    fn draw_index(&mut self) -> usize {
        let u = 1.0 - self.rng.random::<f64>();
        let k = (u.ln() / self.log_beta).floor();
        // `as` saturates, so a huge quotient still lands in range after `%`.
        (k as usize) % self.options.len()
    }
}

impl<T, R: Rng> Iterator for BiasedPick<'_, T, R> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.options.is_empty() {
            return None;
        }
        let idx = self.draw_index();
        self.options.remove(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.options.len(), Some(self.options.len()))
    }
}

impl<T, R: Rng> ExactSizeIterator for BiasedPick<'_, T, R> {}
