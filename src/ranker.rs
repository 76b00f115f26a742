use crate::model::Deal;
use std::cmp::Reverse;

/// Orders deals by discount, strongest first.
///
/// The sort is stable, so deals with equal discounts keep their input order,
/// which is source priority order coming out of the pipeline.
pub fn rank(mut deals: Vec<Deal>) -> Vec<Deal> {
    deals.sort_by_key(|deal| Reverse(deal.discount_percent));
    deals
}

/// The `n` best deals of an already ranked slice.
pub fn top(ranked: &[Deal], n: usize) -> &[Deal] {
    &ranked[..n.min(ranked.len())]
}
