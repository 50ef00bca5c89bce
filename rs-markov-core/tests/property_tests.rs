use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_markov_core::{ChainBuilder, GenerationInput, MarkovError, TextGenerator};

// --- STRATEGIES ---

// Small vocabulary so keys repeat and chains branch
fn arb_word() -> impl Strategy<Value = String> {
	prop_oneof![
		Just("The".to_owned()),
		Just("A".to_owned()),
		Just("cat".to_owned()),
		Just("dog".to_owned()),
		Just("sat".to_owned()),
		Just("ran,".to_owned()),
		Just("home.".to_owned()),
		Just("why?".to_owned()),
		Just("now!".to_owned()),
		"[a-z]{1,4}",
	]
}

prop_compose! {
	fn arb_corpus()(words in prop::collection::vec(arb_word(), 0..60), sep in "[ \t\n]{1,3}") -> String {
		words.join(&sep)
	}
}

proptest! {
	#[test]
	fn keys_have_order_tokens_and_successors(text in arb_corpus(), n in 1usize..5) {
		let tokens = text.split_whitespace().count();
		match ChainBuilder::build(&text, n) {
			Ok(table) => {
				prop_assert!(tokens > n);
				let mut total = 0;
				for key in table.keys() {
					prop_assert_eq!(key.len(), n);
					let successors = table.get(key).unwrap();
					prop_assert!(!successors.is_empty());
					total += successors.len();
				}
				prop_assert_eq!(total, tokens - n);
			}
			Err(MarkovError::CorpusTooShort { tokens: got, order }) => {
				prop_assert!(tokens <= n);
				prop_assert_eq!(got, tokens);
				prop_assert_eq!(order, n);
			}
			Err(e) => prop_assert!(false, "unexpected error: {}", e),
		}
	}

	#[test]
	fn build_twice_gives_equal_tables(text in arb_corpus(), n in 1usize..4) {
		let first = ChainBuilder::build(&text, n);
		let second = ChainBuilder::build(&text, n);
		match (first, second) {
			(Ok(a), Ok(b)) => prop_assert_eq!(a, b),
			(Err(_), Err(_)) => {}
			_ => prop_assert!(false, "builds disagree"),
		}
	}

	#[test]
	fn generated_text_is_a_bounded_capitalized_path(
		text in arb_corpus(),
		n in 1usize..4,
		seed in any::<u64>(),
		max_steps in 1usize..40,
	) {
		let Ok(table) = ChainBuilder::build(&text, n) else {
			return Ok(());
		};
		let generator = TextGenerator::new(GenerationInput { max_steps, ..Default::default() });
		let mut rng = StdRng::seed_from_u64(seed);

		match generator.generate(&table, &mut rng) {
			Ok(output) => {
				let words: Vec<String> = output.split(' ').map(str::to_owned).collect();
				prop_assert!(words.len() > n);
				prop_assert!(words.len() <= n + max_steps);
				prop_assert!(words[0].chars().next().unwrap().is_uppercase());
				for window in words.windows(n + 1) {
					let (key, next_word) = window.split_at(n);
					let successors = table.get(key);
					prop_assert!(successors.is_some_and(|s| s.contains(&next_word[0])));
				}
			}
			Err(MarkovError::InvalidStart) => {
				prop_assert_eq!(table.start_keys().count(), 0);
			}
			Err(e) => prop_assert!(false, "unexpected error: {}", e),
		}
	}
}

#[test]
fn negative_orders_never_parse() {
	proptest!(|(raw in i64::MIN..=0)| {
		prop_assert!(matches!(
			ChainBuilder::parse_order(raw),
			Err(MarkovError::InvalidNGramOrder(got)) if got == raw
		));
	});
}
