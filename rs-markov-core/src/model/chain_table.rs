use super::state::State;
use crate::error::{MarkovError, MarkovResult};
use indexmap::IndexMap;
use indexmap::map::Entry;
use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;

/// An n-gram key: exactly `n` consecutive tokens of the corpus.
pub type NGramKey = Vec<String>;

/// Represents a word-level Markov chain of order `n`.
///
/// The `ChainTable` maps every n-gram of the corpus (except the last one)
/// to the list of tokens observed right after it.
///
/// # Invariants
/// - `n` is always >= 1
/// - Every key holds exactly `n` tokens
/// - Every successor list is non-empty
/// - `states` iterates in first-seen corpus order
/// - `start_keys` indexes into `states`, keeping only capitalized keys
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainTable {
	/// The order of the chain (number of tokens in a key)
	n: usize,

	/// Key to observed successors, in first-seen order so seeded draws do
	/// not depend on hashing
	states: IndexMap<NGramKey, State>,

	/// Positions in `states` of the sentence-start keys
	start_keys: Vec<usize>,

	/// Corpus tokens joined by single spaces, padded with one space each side
	corpus: String,

	/// Number of tokens in the corpus
	corpus_len: usize,
}

/// Builds a `ChainTable` from raw text.
pub struct ChainBuilder;

impl ChainBuilder {
	/// Converts an externally supplied order into a usable one.
	///
	/// # Errors
	/// Returns `InvalidNGramOrder` if `raw <= 0`.
	pub fn parse_order(raw: i64) -> MarkovResult<usize> {
		if raw <= 0 {
			return Err(MarkovError::InvalidNGramOrder(raw));
		}
		usize::try_from(raw).map_err(|_| MarkovError::InvalidNGramOrder(raw))
	}

	/// Builds the chain table of order `n` for `text`.
	///
	/// Tokens are the whitespace-separated substrings of `text`, punctuation
	/// included. For every position `i` the key `words[i..i + n]` gains the
	/// successor `words[i + n]`. The last `n` tokens have no successor and
	/// therefore no entry.
	///
	/// # Errors
	/// - `InvalidNGramOrder` if `n == 0`
	/// - `CorpusTooShort` if the corpus holds `n` tokens or fewer
	pub fn build(text: &str, n: usize) -> MarkovResult<ChainTable> {
		if n == 0 {
			return Err(MarkovError::InvalidNGramOrder(0));
		}

		let words: Vec<&str> = text.split_whitespace().collect();
		if words.len() <= n {
			return Err(MarkovError::CorpusTooShort { tokens: words.len(), order: n });
		}

		let mut table = ChainTable {
			n,
			states: IndexMap::new(),
			start_keys: Vec::new(),
			corpus: format!(" {} ", words.join(" ")),
			corpus_len: words.len(),
		};

		for window in words.windows(n + 1) {
			let (key, next_word) = window.split_at(n);
			table.add_transition(key, next_word[0]);
		}

		debug!(
			"Built chain table: order {}, {} tokens, {} keys, {} start keys",
			n,
			table.corpus_len,
			table.len(),
			table.start_keys.len()
		);

		Ok(table)
	}
}

impl ChainTable {
	/// Appends `next_word` to the successors of `key`, creating the entry
	/// (and recording it as a start key when capitalized) when absent.
	fn add_transition(&mut self, key: &[&str], next_word: &str) {
		let key: NGramKey = key.iter().map(|&word| word.to_owned()).collect();

		let state = match self.states.entry(key) {
			Entry::Occupied(entry) => entry.into_mut(),
			Entry::Vacant(entry) => {
				if is_sentence_start(entry.key()) {
					self.start_keys.push(entry.index());
				}
				entry.insert(State::new())
			}
		};
		state.add_transition(next_word);
	}

	/// Order of the chain.
	pub fn n(&self) -> usize {
		self.n
	}

	/// Number of distinct keys.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	/// Always `false` for a table produced by `ChainBuilder::build`.
	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Number of tokens of the corpus the table was built from.
	pub fn corpus_len(&self) -> usize {
		self.corpus_len
	}

	/// Returns the successors of `key`, in corpus order.
	pub fn get(&self, key: &[String]) -> Option<&[String]> {
		self.states.get(key).map(State::successors)
	}

	pub fn contains_key(&self, key: &[String]) -> bool {
		self.states.contains_key(key)
	}

	/// Iterates over all keys, in first-seen order.
	pub fn keys(&self) -> impl Iterator<Item = &[String]> {
		self.states.keys().map(Vec::as_slice)
	}

	/// Iterates over the sentence-start keys, in first-seen order.
	pub fn start_keys(&self) -> impl Iterator<Item = &[String]> {
		self.start_keys.iter().filter_map(|&index| self.key_at(index))
	}

	fn key_at(&self, index: usize) -> Option<&[String]> {
		self.states.get_index(index).map(|(key, _)| key.as_slice())
	}

	/// Draws one successor of `key` uniformly.
	///
	/// Returns `None` if `key` is not in the table.
	pub(crate) fn predict<R: Rng + ?Sized>(&self, key: &[String], rng: &mut R) -> Option<&str> {
		self.states.get(key)?.predict(rng)
	}

	/// Draws one sentence-start key uniformly.
	pub(crate) fn random_start_key<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&[String]> {
		self.start_keys
			.choose(rng)
			.and_then(|&index| self.key_at(index))
	}

	/// Draws one key uniformly, capitalized or not.
	pub(crate) fn random_key<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&[String]> {
		if self.states.is_empty() {
			return None;
		}
		self.key_at(rng.random_range(0..self.states.len()))
	}

	/// Returns the stored key equal to `key`, if any.
	pub(crate) fn find_key(&self, key: &[String]) -> Option<&[String]> {
		self.states
			.get_key_value(key)
			.map(|(stored, _)| stored.as_slice())
	}

	/// Whether `text`, once whitespace-normalized, occurs verbatim in the corpus
	/// on token boundaries.
	pub fn is_excerpt(&self, text: &str) -> bool {
		let words: Vec<&str> = text.split_whitespace().collect();
		if words.is_empty() {
			return false;
		}
		self.corpus.contains(&format!(" {} ", words.join(" ")))
	}
}

/// A key starts a sentence when its first token begins with an uppercase letter.
pub(crate) fn is_sentence_start(key: &[String]) -> bool {
	key.first()
		.and_then(|word| word.chars().next())
		.is_some_and(char::is_uppercase)
}
