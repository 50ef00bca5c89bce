/// Strategy used to select the starting key when generating a text.
///
/// # Variants
/// - `Capitalized`: draw among the keys whose first token begins with an
///   uppercase letter (sentence starts).
/// - `Random`: draw among every key of the table.
/// - `Custom(String)`: start from the given whitespace-separated tokens,
///   which must form a key of the table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StartSeed {
	#[default]
	Capitalized,
	Random,
	Custom(String),
}

/// Input parameters for a `TextGenerator`.
///
/// # Responsibilities
/// - Bound the length of a walk (`max_steps`)
/// - Control retries when a walk reproduces the corpus verbatim (`nb_try`)
/// - Choose how the first key is picked (`start_seed`)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationInput {
	/// Maximum number of successors appended by one walk.
	/// `0` selects `corpus_len * STEP_FACTOR`.
	pub max_steps: usize,

	/// Number of extra walks attempted when the output is a corpus excerpt.
	pub nb_try: usize,

	/// Start key selection strategy.
	pub start_seed: StartSeed,
}

/// Multiplier applied to the corpus length when `max_steps` is automatic.
pub const STEP_FACTOR: usize = 4;

impl GenerationInput {
	/// Resolves the effective step bound for a corpus of `corpus_len` tokens.
	pub fn step_limit(&self, corpus_len: usize) -> usize {
		if self.max_steps == 0 {
			corpus_len.saturating_mul(STEP_FACTOR).max(1)
		} else {
			self.max_steps
		}
	}
}
