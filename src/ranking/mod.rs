use crate::models::SymbolRate;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;

/// Sort key for descending-by-rate ranking. NaN rates sink to the end
/// instead of winning the board.
fn rank_key(rate: f64) -> Reverse<OrderedFloat<f64>> {
    let rate = if rate.is_nan() { f64::NEG_INFINITY } else { rate };
    Reverse(OrderedFloat(rate))
}

/// Returns the `min(n, len)` highest-funding entries, rate descending.
/// The sort is stable, so ties keep their snapshot order.
pub fn top_n(mut entries: Vec<SymbolRate>, n: usize) -> Vec<SymbolRate> {
    entries.sort_by_key(|e| rank_key(e.rate));
    entries.truncate(n);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(symbol: &str, rate: f64) -> SymbolRate {
        SymbolRate {
            symbol: symbol.to_string(),
            rate,
        }
    }

    fn symbols(entries: &[SymbolRate]) -> Vec<&str> {
        entries.iter().map(|e| e.symbol.as_str()).collect()
    }

    #[test]
    fn ranks_descending_by_rate() {
        let ranked = top_n(
            vec![entry("A", 0.0001), entry("B", 0.0050), entry("C", -0.0002)],
            10,
        );
        assert_eq!(symbols(&ranked), vec!["B", "A", "C"]);
    }

    #[test]
    fn returns_exactly_min_of_n_and_len() {
        let entries = vec![entry("A", 0.1), entry("B", 0.2), entry("C", 0.3)];

        assert_eq!(top_n(entries.clone(), 2).len(), 2);
        assert_eq!(top_n(entries.clone(), 3).len(), 3);
        assert_eq!(top_n(entries.clone(), 100).len(), 3);
        assert_eq!(top_n(entries, 0).len(), 0);
    }

    #[test]
    fn ties_keep_snapshot_order() {
        let ranked = top_n(
            vec![
                entry("FIRST", 0.001),
                entry("SECOND", 0.001),
                entry("THIRD", 0.001),
            ],
            10,
        );
        assert_eq!(symbols(&ranked), vec!["FIRST", "SECOND", "THIRD"]);
    }

    #[test]
    fn nan_rates_sort_last() {
        let ranked = top_n(
            vec![entry("NAN", f64::NAN), entry("A", -0.5), entry("B", 0.5)],
            10,
        );
        assert_eq!(symbols(&ranked), vec!["B", "A", "NAN"]);
    }

    #[test]
    fn empty_snapshot_ranks_empty() {
        assert!(top_n(Vec::new(), 20).is_empty());
    }
}
