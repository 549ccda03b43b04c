#![no_main]
use libfuzzer_sys::fuzz_target;
use todo_api::query::{QueryParams, build_query, eval_filter};

fuzz_target!(|pairs: Vec<(String, String)>| {
    if pairs.len() > 64 { return; }
    let params: QueryParams = pairs.into_iter().collect();
    // Building must never panic, and neither may evaluating what it built.
    if let Ok(q) = build_query(&params) {
        let doc = bson::doc! { "owner": "Kristin", "status": true, "body": "Buy soup", "category": "groceries" };
        let _ = eval_filter(&doc, &q.filter);
    }
});
