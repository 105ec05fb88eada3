//! A module for defining a [`Workload`] that generates synthetic request batches.

use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::seq::{SliceRandom, index};
use rand::{Rng, SeedableRng};
use rand_distr::{Bernoulli, Distribution};
use reqgen_types::{Category, RequestLine};

use crate::batch::Batch;

/// Probability that a line is a verbatim duplicate of an earlier line.
pub const LINE_REUSE_PROBABILITY: f64 = 0.25;

/// The alphabet random patterns are drawn from.
const PATTERN_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Prefix pool for cyclic patterns, shuffled once per generation run.
const CYCLIC_PREFIXES: [char; 12] = ['B', 'C', 'D', 'F', 'G', 'H', 'L', 'M', 'N', 'P', 'R', 'S'];

/// Suffix pool for cyclic patterns, shuffled once per generation run.
const CYCLIC_SUFFIXES: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Duplicates are only emitted once this many lines exist.
const MIN_LINES_FOR_REUSE: usize = 2;

/// Consecutive duplicate fresh draws tolerated before the pattern space is
/// considered exhausted. Only reachable for very short patterns, where the
/// alphabet has fewer distinct strings than the batch has lines.
const MAX_FRESH_COLLISIONS: u32 = 1000;

/// How the regex patterns of a workload are constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternKind {
    /// Patterns of `chars` symbols drawn uniformly from `[a-z0-9]`.
    ///
    /// Fresh patterns are guaranteed distinct within a batch; colliding
    /// draws are discarded and retried.
    Random {
        /// Number of characters per pattern.
        chars: usize,
    },

    /// Two-character patterns built from shuffled prefix/suffix pools,
    /// indexed cyclically by line number.
    ///
    /// With 12 prefixes and 5 suffixes there are only 60 distinct
    /// patterns, so batches beyond that length repeat patterns on
    /// purpose: many structurally similar requests stress the request
    /// path rather than the matcher.
    Cyclic,
}

/// Errors that can occur when building or running a [`Workload`].
#[derive(Debug, thiserror::Error)]
pub enum WorkloadError {
    /// More categories per request were requested than exist.
    #[error("requests can carry at most 6 distinct categories, got {0}")]
    TooManyTypes(usize),

    /// An I/O error while writing a request file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A builder for creating a [`Workload`].
#[derive(Debug)]
pub struct WorkloadBuilder {
    name: String,
    lines: usize,
    types_per_request: usize,
    pattern: PatternKind,
    seed: u64,
}

impl WorkloadBuilder {
    /// The number of request lines to generate.
    pub fn lines(mut self, lines: usize) -> Self {
        self.lines = lines;
        self
    }

    /// The number of distinct categories sampled for each request.
    ///
    /// Must not exceed the six available categories; zero is valid and
    /// produces requests without a category filter.
    pub fn types_per_request(mut self, types: usize) -> Self {
        self.types_per_request = types;
        self
    }

    /// How patterns are constructed, see [`PatternKind`].
    pub fn pattern(mut self, pattern: PatternKind) -> Self {
        self.pattern = pattern;
        self
    }

    /// The RNG seed. Defaults to a random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the parameters and creates the workload instance.
    pub fn build(self) -> Result<Workload, WorkloadError> {
        if self.types_per_request > Category::ALL.len() {
            return Err(WorkloadError::TooManyTypes(self.types_per_request));
        }

        let reuse = Bernoulli::new(LINE_REUSE_PROBABILITY).expect("valid probability");

        Ok(Workload {
            name: self.name,
            lines: self.lines,
            types_per_request: self.types_per_request,
            pattern: self.pattern,
            seed: self.seed,
            reuse,
        })
    }
}

/// Specification of one synthetic request file.
#[derive(Debug)]
pub struct Workload {
    /// Name of the workload for identification in logs and the report.
    name: String,
    /// The number of request lines to generate.
    lines: usize,
    /// The number of distinct categories sampled for each request.
    types_per_request: usize,
    /// How patterns are constructed.
    pattern: PatternKind,
    /// Seed for the RNG driving all sampling decisions.
    seed: u64,
    /// The distribution deciding between a fresh line and a duplicate.
    reuse: Bernoulli,
}

impl Workload {
    /// Constructs a new workload builder with the given name.
    pub fn builder(name: impl Into<String>) -> WorkloadBuilder {
        WorkloadBuilder {
            name: name.into(),
            lines: 100,
            types_per_request: 2,
            pattern: PatternKind::Random { chars: 10 },
            seed: rand::random(),
        }
    }

    /// The name of this workload.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Generates the full request batch.
    ///
    /// Generation is deterministic: calling this twice on the same
    /// workload yields identical batches.
    pub fn generate(&self) -> Batch {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        match self.pattern {
            PatternKind::Random { chars } => self.generate_random(&mut rng, chars),
            PatternKind::Cyclic => self.generate_cyclic(&mut rng),
        }
    }

    /// Samples a distinct category subset, in sampling order.
    fn sample_categories(&self, rng: &mut SmallRng) -> Vec<Category> {
        index::sample(rng, Category::ALL.len(), self.types_per_request)
            .iter()
            .map(|i| Category::ALL[i])
            .collect()
    }

    fn generate_random(&self, rng: &mut SmallRng, chars: usize) -> Batch {
        let mut lines: Vec<RequestLine> = Vec::with_capacity(self.lines);
        let mut used_patterns: HashSet<String> = HashSet::new();
        let mut reused = 0;
        let mut collisions = 0;

        while lines.len() < self.lines {
            if lines.len() >= MIN_LINES_FOR_REUSE && self.reuse.sample(rng) {
                lines.push(lines[rng.random_range(0..lines.len())].clone());
                reused += 1;
                continue;
            }

            let pattern = random_pattern(rng, chars);
            if used_patterns.contains(&pattern) {
                collisions += 1;
                if collisions >= MAX_FRESH_COLLISIONS {
                    // The alphabet has run dry; fall back to a duplicate so
                    // the batch still reaches its full line count. A
                    // collision implies at least one line exists.
                    lines.push(lines[rng.random_range(0..lines.len())].clone());
                    reused += 1;
                    collisions = 0;
                }
                continue;
            }
            collisions = 0;

            let categories = self.sample_categories(rng);
            used_patterns.insert(pattern.clone());
            lines.push(RequestLine::new(categories, pattern));
        }

        Batch::new(lines, reused)
    }

    fn generate_cyclic(&self, rng: &mut SmallRng) -> Batch {
        let mut prefixes = CYCLIC_PREFIXES;
        let mut suffixes = CYCLIC_SUFFIXES;
        prefixes.shuffle(rng);
        suffixes.shuffle(rng);

        let mut lines: Vec<RequestLine> = Vec::with_capacity(self.lines);
        let mut reused = 0;

        // Duplicated iterations consume their index too, so the cyclic
        // walk through the pools skips the slots taken by duplicates.
        for i in 0..self.lines {
            if lines.len() >= MIN_LINES_FOR_REUSE && self.reuse.sample(rng) {
                lines.push(lines[rng.random_range(0..lines.len())].clone());
                reused += 1;
                continue;
            }

            let mut pattern = String::with_capacity(2);
            pattern.push(prefixes[i % prefixes.len()]);
            pattern.push(suffixes[i % suffixes.len()]);
            lines.push(RequestLine::new(self.sample_categories(rng), pattern));
        }

        Batch::new(lines, reused)
    }
}

/// Draws a fresh pattern of `chars` symbols from [`PATTERN_ALPHABET`].
fn random_pattern(rng: &mut SmallRng, chars: usize) -> String {
    (0..chars)
        .map(|_| PATTERN_ALPHABET[rng.random_range(0..PATTERN_ALPHABET.len())] as char)
        .collect()
}
