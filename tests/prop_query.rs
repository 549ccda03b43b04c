use proptest::prelude::*;
use todo_api::query::{Filter, QueryParams, TODO_PARAMS, build_query, eval_filter};

fn recognized(key: &str) -> bool {
    TODO_PARAMS.iter().any(|p| p.key == key)
}

proptest! {
    #[test]
    fn unrecognized_keys_always_match_all(pairs in proptest::collection::vec(("[a-zA-Z_]{1,12}", ".{0,24}"), 0..8)) {
        let params: QueryParams = pairs.into_iter().filter(|(k, _)| !recognized(k)).collect();
        prop_assert_eq!(build_query(&params).unwrap().filter, Filter::True);
    }

    #[test]
    fn contains_filter_matches_any_value_containing_the_literal(
        prefix in "\\PC{0,10}", needle in "\\PC{1,10}", suffix in "\\PC{0,10}"
    ) {
        let params: QueryParams = [("contains", needle.as_str())].into_iter().collect();
        let filter = build_query(&params).unwrap().filter;
        let body = format!("{prefix}{needle}{suffix}");
        let doc = bson::doc! { "body": body };
        prop_assert!(eval_filter(&doc, &filter));
    }

    #[test]
    fn limit_accepts_exactly_the_bounded_range(n in -500i64..500) {
        let params: QueryParams = [("limit", n.to_string())].into_iter().collect();
        let result = build_query(&params);
        prop_assert_eq!(result.is_ok(), (1..=150).contains(&n));
    }
}
