//! Ranking of DNS SRV and MX record sets.
//!
//! Pure functions, no I/O. SRV selection is deterministic: lowest priority
//! wins, ties go to the highest weight, and remaining ties to the record seen
//! first. There is no RFC 2782 weighted-random pick.

mod types;

pub use types::{MxRecord, SrvRecord};

/// Picks the preferred SRV record, or `None` for an empty set.
pub fn select_srv(records: &[SrvRecord]) -> Option<&SrvRecord> {
    records.iter().fold(None, |best, record| match best {
        Some(current) if !record.outranks(current) => Some(current),
        _ => Some(record),
    })
}

/// Orders the whole SRV set the way [`select_srv`] picks its head.
pub fn rank_srv(records: &[SrvRecord]) -> Vec<&SrvRecord> {
    let mut ranked: Vec<&SrvRecord> = records.iter().collect();
    ranked.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| b.weight.cmp(&a.weight))
    });
    ranked
}

/// Lowest preference wins; the first record seen wins a tie.
pub fn select_best_mx(records: &[MxRecord]) -> Option<&MxRecord> {
    records.iter().fold(None, |best, record| match best {
        Some(current) if current.preference <= record.preference => Some(current),
        _ => Some(record),
    })
}
