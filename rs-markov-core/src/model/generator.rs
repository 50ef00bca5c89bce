use crate::error::{MarkovError, MarkovResult};
use crate::model::chain_table::ChainTable;
use crate::model::generation_input::{GenerationInput, StartSeed};
use log::{debug, warn};
use rand::Rng;

/// Characters that end a generated text when they close a token.
pub const TERMINALS: [char; 3] = ['.', '?', '!'];

/// Random walk over a `ChainTable`.
///
/// # Responsibilities
/// - Pick a start key according to `GenerationInput::start_seed`
/// - Extend the text with uniformly drawn successors
/// - Stop on terminal punctuation, on a dead-end key or on the step bound
/// - Retry walks that only reproduce the corpus, up to `nb_try` times
///
/// The generator holds no state between calls; all randomness comes from
/// the `Rng` passed to `generate`.
#[derive(Clone, Debug, Default)]
pub struct TextGenerator {
	input: GenerationInput,
}

impl TextGenerator {
	pub fn new(input: GenerationInput) -> Self {
		Self { input }
	}

	pub fn input(&self) -> &GenerationInput {
		&self.input
	}

	/// Generates a text from `table`, avoiding corpus excerpts if possible.
	///
	/// # Behavior
	/// - Calls `walk`.
	/// - While the result occurs verbatim in the corpus and retries remain,
	///   walks again.
	/// - Returns the first non-excerpt, or the last attempt.
	///
	/// # Errors
	/// See `walk`.
	pub fn generate<R: Rng + ?Sized>(&self, table: &ChainTable, rng: &mut R) -> MarkovResult<String> {
		let mut text = self.walk(table, rng)?;
		let mut nb_try = self.input.nb_try;

		while nb_try > 0 && table.is_excerpt(&text) {
			debug!("Generated text is a corpus excerpt, {} retries left", nb_try);
			text = self.walk(table, rng)?;
			nb_try -= 1;
		}

		Ok(text)
	}

	/// Performs a single walk over `table`.
	///
	/// The start key gives the first `n` tokens. Each step draws a successor
	/// of the last `n` tokens of the output and appends it. The walk stops
	/// right after a token ending in `.`, `?` or `!`, when the last `n`
	/// tokens are not a key, or after `step_limit` successors.
	///
	/// # Errors
	/// - `InvalidStart` if the table has no usable start key
	/// - `UnknownSeed` if a custom start is not a key of the table
	pub fn walk<R: Rng + ?Sized>(&self, table: &ChainTable, rng: &mut R) -> MarkovResult<String> {
		let n = table.n();
		let start = self.select_start(table, rng)?;
		debug!("Start key: {:?}", start);

		let mut words: Vec<String> = start.to_vec();
		let max_steps = self.input.step_limit(table.corpus_len());
		let mut steps = 0;

		loop {
			let key = &words[words.len() - n..];
			if !table.contains_key(key) {
				break;
			}
			if steps >= max_steps {
				warn!("Walk stopped after {} steps without terminal punctuation", steps);
				break;
			}
			let Some(next_word) = table.predict(key, rng) else {
				break;
			};

			let next_word = next_word.to_owned();
			let terminal = is_terminal(&next_word);
			words.push(next_word);
			steps += 1;

			if terminal {
				break;
			}
		}

		Ok(words.join(" "))
	}

	/// Selects the first key of a walk.
	fn select_start<'t, R: Rng + ?Sized>(&self, table: &'t ChainTable, rng: &mut R) -> MarkovResult<&'t [String]> {
		match &self.input.start_seed {
			StartSeed::Capitalized => table.random_start_key(rng).ok_or(MarkovError::InvalidStart),
			StartSeed::Random => table.random_key(rng).ok_or(MarkovError::InvalidStart),
			StartSeed::Custom(seed) => {
				let key: Vec<String> = seed.split_whitespace().map(str::to_owned).collect();
				table
					.find_key(&key)
					.ok_or_else(|| MarkovError::UnknownSeed(seed.clone()))
			}
		}
	}
}

/// A token is terminal when its last character is `.`, `?` or `!`.
pub fn is_terminal(word: &str) -> bool {
	word.chars().last().is_some_and(|c| TERMINALS.contains(&c))
}
