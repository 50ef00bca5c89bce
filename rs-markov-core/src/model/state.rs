use rand::Rng;
use rand::seq::IndexedRandom;

/// Represents a state in the chain table.
///
/// A `State` belongs to one n-gram key and stores every token observed
/// right after that key, in corpus order.
///
/// Conceptually, this is a node in a Markov chain. Duplicated successors are
/// kept, so a uniform draw over the list is a draw weighted by frequency.
///
/// ## Invariants
/// - `successors` is never empty once the state is stored in a table
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct State {
	/// Observed successors, insertion order, duplicates retained.
	/// Example: ["mary", "juanita"]
	successors: Vec<String>,
}

impl State {
	/// Creates a new empty state.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one occurrence of `next_word` after this state's key.
	pub fn add_transition(&mut self, next_word: &str) {
		self.successors.push(next_word.to_owned());
	}

	/// Returns the successors in insertion order.
	pub fn successors(&self) -> &[String] {
		&self.successors
	}

	/// Draws one successor uniformly from the list.
	///
	/// Returns `None` if the state has no successors.
	pub fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		self.successors.choose(rng).map(String::as_str)
	}
}
