//! Implicit hierarchy rules
//!
//! Parent/child relationships are never stored. They are inferred from the
//! decimal digits of account numbers, one hierarchy level per digit:
//!
//! - literal form: the parent of `1234` is `123` (last digit dropped);
//! - zero-padded form: the parent of `1110` is `1100`, whose parent is
//!   `1000`. The width stays fixed and one significant digit is dropped.
//!
//! A number with a single significant digit (`3`, `20`, `1000`) heads a
//! hierarchy. The literal parent always wins when both forms exist.

use crate::models::AccountNumber;

/// Split a number into its significant part and the count of trailing zeros
fn strip_trailing_zeros(number: AccountNumber) -> (u64, u32) {
    let mut n = number.get();
    let mut zeros = 0;
    while n != 0 && n % 10 == 0 {
        n /= 10;
        zeros += 1;
    }
    (n, zeros)
}

/// Number of significant digits (digits left after trailing zeros are dropped)
pub fn significant_len(number: AccountNumber) -> usize {
    let (significant, _) = strip_trailing_zeros(number);
    AccountNumber::new(significant).digit_count()
}

/// True for numbers that start a hierarchy of their own (`7`, `40`, `1000`)
pub fn is_hierarchy_head(number: AccountNumber) -> bool {
    number.is_positive() && significant_len(number) == 1
}

/// The id with its last decimal digit dropped; single-digit ids have no parent
pub fn implied_parent(number: AccountNumber) -> Option<AccountNumber> {
    let n = number.get();
    (n >= 10).then(|| AccountNumber::new(n / 10))
}

/// Same-width parent with one significant digit fewer
pub fn padded_parent(number: AccountNumber) -> Option<AccountNumber> {
    let (significant, zeros) = strip_trailing_zeros(number);
    if significant < 10 {
        return None;
    }
    let shorter = significant / 10;
    if shorter % 10 == 0 {
        // `1010` would pad back to `1000`, which is two levels up
        return None;
    }
    Some(AccountNumber::new(shorter * 10u64.pow(zeros + 1)))
}

/// Every number that may act as the direct parent, literal form first
pub fn parent_candidates(number: AccountNumber) -> Vec<AccountNumber> {
    implied_parent(number)
        .into_iter()
        .chain(padded_parent(number))
        .collect()
}

/// True when `child` sits exactly one hierarchy level below `parent`
pub fn is_direct_child(parent: AccountNumber, child: AccountNumber) -> bool {
    parent_candidates(child).contains(&parent)
}

/// All ancestor numbers, nearest level first, without duplicates
pub fn ancestor_candidates(number: AccountNumber) -> Vec<AccountNumber> {
    let mut ordered: Vec<AccountNumber> = Vec::new();
    let mut frontier = vec![number];

    while !frontier.is_empty() {
        let mut next = Vec::new();
        for current in frontier {
            for candidate in parent_candidates(current) {
                if !ordered.contains(&candidate) {
                    ordered.push(candidate);
                    next.push(candidate);
                }
            }
        }
        frontier = next;
    }

    ordered
}
