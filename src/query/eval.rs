use bson::{Bson, Document as BsonDocument};
use std::cmp::Ordering;

use super::types::{Filter, Order, SortSpec};

pub fn eval_filter(doc: &BsonDocument, filter: &Filter) -> bool {
    match filter {
        Filter::True => true,
        Filter::And(fs) => fs.iter().all(|f| eval_filter(doc, f)),
        Filter::Eq { path, value } => doc.get(path).is_some_and(|v| v == value),
        Filter::Text { path, pattern } => {
            matches!(doc.get(path), Some(Bson::String(s)) if pattern.is_match(s))
        }
    }
}

/// Orders two documents by the sort keys in turn. Missing fields sort first.
pub fn compare_docs(a: &BsonDocument, b: &BsonDocument, sort: &[SortSpec]) -> Ordering {
    for s in sort {
        let ord = match (a.get(&s.field), b.get(&s.field)) {
            (Some(x), Some(y)) => compare_bson(x, y),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        };
        if ord != Ordering::Equal {
            return if s.order == Order::Asc { ord } else { ord.reverse() };
        }
    }
    Ordering::Equal
}

pub fn compare_bson(a: &Bson, b: &Bson) -> Ordering {
    match (a, b) {
        (Bson::String(x), Bson::String(y)) => x.cmp(y),
        (Bson::Boolean(x), Bson::Boolean(y)) => x.cmp(y),
        (Bson::ObjectId(x), Bson::ObjectId(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

// Only the types a todo document can hold get their own rank.
fn type_rank(v: &Bson) -> u8 {
    match v {
        Bson::Null => 0,
        Bson::Boolean(_) => 1,
        Bson::String(_) => 2,
        Bson::ObjectId(_) => 3,
        _ => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::types::TextPattern;
    use bson::doc;

    #[test]
    fn text_match_ignores_case_and_reads_literally() {
        let d = doc! { "category": "Groceries", "body": "cost: $5 (approx.)" };
        let groc = Filter::Text { path: "category".into(), pattern: TextPattern::contains("groc").unwrap() };
        assert!(eval_filter(&d, &groc));
        let dollar = Filter::Text { path: "body".into(), pattern: TextPattern::contains("$5 (").unwrap() };
        assert!(eval_filter(&d, &dollar));
        let dot = Filter::Text { path: "body".into(), pattern: TextPattern::contains("a.p").unwrap() };
        assert!(!eval_filter(&d, &dot));
    }

    #[test]
    fn text_on_non_string_field_never_matches() {
        let d = doc! { "status": true };
        let f = Filter::Text { path: "status".into(), pattern: TextPattern::contains("true").unwrap() };
        assert!(!eval_filter(&d, &f));
    }

    #[test]
    fn eq_and_conjunction() {
        let d = doc! { "owner": "Nic", "status": false };
        let st = Filter::Eq { path: "status".into(), value: false.into() };
        let owner = Filter::Text { path: "owner".into(), pattern: TextPattern::whole_value("nic").unwrap() };
        assert!(eval_filter(&d, &Filter::And(vec![st.clone(), owner])));
        let other = Filter::Text { path: "owner".into(), pattern: TextPattern::whole_value("ni").unwrap() };
        assert!(!eval_filter(&d, &Filter::And(vec![st, other])));
        assert!(eval_filter(&d, &Filter::And(vec![])));
    }

    #[test]
    fn missing_fields_sort_first() {
        let a = doc! { "owner": "Ann" };
        let b = doc! {};
        let spec = [SortSpec { field: "owner".into(), order: Order::Asc }];
        assert_eq!(compare_docs(&a, &b, &spec), Ordering::Greater);
        let desc = [SortSpec { field: "owner".into(), order: Order::Desc }];
        assert_eq!(compare_docs(&a, &b, &desc), Ordering::Less);
    }
}
