use rs_markov_core::{ChainBuilder, MarkovError, NGramKey};
use rstest::rstest;

const GETTYSBURG: &str = include_str!("data/gettysburg.txt");

fn key(words: &[&str]) -> NGramKey {
	words.iter().map(|w| w.to_string()).collect()
}

#[test]
fn reference_bigrams() {
	let table = ChainBuilder::build("hi there mary hi there juanita", 2).unwrap();

	let mut keys: Vec<NGramKey> = table.keys().map(<[String]>::to_vec).collect();
	keys.sort();
	assert_eq!(
		keys,
		vec![key(&["hi", "there"]), key(&["mary", "hi"]), key(&["there", "mary"])]
	);
	assert_eq!(table.get(&key(&["hi", "there"])).unwrap(), ["mary", "juanita"]);
	assert_eq!(table.get(&key(&["there", "mary"])).unwrap(), ["hi"]);
	assert_eq!(table.get(&key(&["mary", "hi"])).unwrap(), ["there"]);
	assert_eq!(table.get(&key(&["there", "juanita"])), None);
}

#[test]
fn punctuation_stays_attached() {
	let table = ChainBuilder::build("Yes, sir. Yes, madam.", 1).unwrap();
	assert_eq!(table.get(&key(&["Yes,"])).unwrap(), ["sir.", "madam."]);
	assert_eq!(table.get(&key(&["sir."])).unwrap(), ["Yes,"]);
	assert_eq!(table.get(&key(&["Yes"])), None);
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(5)]
fn every_position_contributes_one_successor(#[case] n: usize) {
	let table = ChainBuilder::build(GETTYSBURG, n).unwrap();
	let words: Vec<&str> = GETTYSBURG.split_whitespace().collect();

	let total: usize = table.keys().map(|k| table.get(k).unwrap().len()).sum();
	assert_eq!(total, words.len() - n);
	assert_eq!(table.corpus_len(), words.len());

	for k in table.keys() {
		assert_eq!(k.len(), n);
		assert!(!table.get(k).unwrap().is_empty());
	}
}

#[rstest]
#[case("", 1, 0)]
#[case("lonely", 1, 1)]
#[case("two words", 2, 2)]
#[case("   one \n two  three ", 3, 3)]
#[case("a b c d", 7, 4)]
fn short_corpus_is_rejected(#[case] text: &str, #[case] n: usize, #[case] tokens: usize) {
	match ChainBuilder::build(text, n) {
		Err(MarkovError::CorpusTooShort { tokens: got, order }) => {
			assert_eq!(got, tokens);
			assert_eq!(order, n);
		}
		other => panic!("expected CorpusTooShort, got {other:?}"),
	}
}

#[test]
fn one_successor_is_enough() {
	let table = ChainBuilder::build("two words", 1).unwrap();
	assert_eq!(table.len(), 1);
	assert_eq!(table.get(&key(&["two"])).unwrap(), ["words"]);
}

#[rstest]
#[case(0)]
#[case(-1)]
#[case(i64::MIN)]
fn non_positive_order_is_rejected(#[case] raw: i64) {
	assert!(matches!(
		ChainBuilder::parse_order(raw),
		Err(MarkovError::InvalidNGramOrder(got)) if got == raw
	));
}

#[test]
fn zero_order_build_is_rejected() {
	assert!(matches!(
		ChainBuilder::build(GETTYSBURG, 0),
		Err(MarkovError::InvalidNGramOrder(0))
	));
}

#[test]
fn build_is_idempotent() {
	let first = ChainBuilder::build(GETTYSBURG, 2).unwrap();
	let second = ChainBuilder::build(GETTYSBURG, 2).unwrap();
	assert_eq!(first, second);
	assert!(first.keys().eq(second.keys()));
}

#[test]
fn start_keys_are_capitalized() {
	let table = ChainBuilder::build(GETTYSBURG, 2).unwrap();
	let starts: Vec<&[String]> = table.start_keys().collect();

	assert!(starts.contains(&key(&["Four", "score"]).as_slice()));
	assert!(starts.contains(&key(&["It", "is"]).as_slice()));
	for k in starts {
		assert!(k[0].chars().next().unwrap().is_uppercase());
	}
}
