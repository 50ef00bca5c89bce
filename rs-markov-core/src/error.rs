use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarkovError {
	#[error("Invalid n-gram order: {0} (must be >= 1)")]
	InvalidNGramOrder(i64),

	#[error("Corpus too short: {tokens} token(s) for order {order} (need more than {order})")]
	CorpusTooShort { tokens: usize, order: usize },

	#[error("No sentence-start key: no n-gram begins with an uppercase letter")]
	InvalidStart,

	#[error("Unknown start seed: {0:?} is not a key of the chain table")]
	UnknownSeed(String),

	#[error("IO Error: {0}")]
	Io(#[from] std::io::Error),
}

pub type MarkovResult<T> = Result<T, MarkovError>;
