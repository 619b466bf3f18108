//! The largest number that can be written by concatenating a list of
//! non-negative integers in some order.
//!
//! Numbers are kept as decimal strings, so results of any length are exact.

use std::{cmp::Ordering, fs, path::Path};

use log::debug;
use thiserror::Error;

use crate::{error::CollectionError, sorting::insertion_sort_by};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LargestNumberError {
    #[error("{number} does not fit in {target}")]
    OutOfRange { number: String, target: &'static str },

    #[error("Could not read {path}: {message}")]
    Io { path: String, message: String },
}

/// Orders `a` before `b` when `ab` is the larger concatenation.
fn concatenation_order(a: &u32, b: &u32) -> Ordering {
    format!("{}{}", b, a).cmp(&format!("{}{}", a, b))
}

/// Compares two decimal strings without leading zeros.
fn compare_decimal(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// The largest concatenation of `items`, as a decimal string. An empty
/// slice gives `"0"`, and so does a slice of zeros.
pub fn find_largest_number(items: &[u32]) -> String {
    let mut sorted = items.to_vec();
    insertion_sort_by(&mut sorted, concatenation_order);

    let digits: String = sorted.iter().map(u32::to_string).collect();
    match digits.trim_start_matches('0') {
        "" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}

pub fn find_largest_int(items: &[u32]) -> Result<i32, LargestNumberError> {
    parse_in_range(find_largest_number(items), "i32")
}

pub fn find_largest_long(items: &[u32]) -> Result<i64, LargestNumberError> {
    parse_in_range(find_largest_number(items), "i64")
}

fn parse_in_range<N: std::str::FromStr>(
    number: String,
    target: &'static str,
) -> Result<N, LargestNumberError> {
    number
        .parse()
        .map_err(|_| LargestNumberError::OutOfRange { number, target })
}

/// Sum of the largest numbers of every list.
pub fn sum<L: AsRef<[u32]>>(lists: &[L]) -> String {
    lists
        .iter()
        .map(|list| find_largest_number(list.as_ref()))
        .fold("0".to_string(), |total, n| add_decimal(&total, &n))
}

fn add_decimal(a: &str, b: &str) -> String {
    let (mut a, mut b) = (a.bytes().rev(), b.bytes().rev());
    let mut digits = Vec::with_capacity(a.len().max(b.len()) + 1);
    let mut carry = 0;
    loop {
        let (x, y) = (a.next(), b.next());
        if x.is_none() && y.is_none() {
            break;
        }
        let total = x.map_or(0, |d| d - b'0') + y.map_or(0, |d| d - b'0') + carry;
        digits.push(b'0' + total % 10);
        carry = total / 10;
    }
    if carry > 0 {
        digits.push(b'0' + carry);
    }
    digits.iter().rev().map(|&d| char::from(d)).collect()
}

/// The list whose largest number ranks `k`th, counting from 0 for the
/// largest. Lists with equal largest numbers keep their relative order.
pub fn find_kth_largest<L: AsRef<[u32]>>(lists: &[L], k: usize) -> Result<&[u32], CollectionError> {
    if k >= lists.len() {
        return Err(CollectionError::InvalidArgument(format!(
            "k = {k} is not a position in a list of {} arrays",
            lists.len()
        )));
    }

    let mut ranked: Vec<(String, &[u32])> = lists
        .iter()
        .map(|list| (find_largest_number(list.as_ref()), list.as_ref()))
        .collect();
    insertion_sort_by(&mut ranked, |a: &(String, &[u32]), b: &(String, &[u32])| {
        compare_decimal(&b.0, &a.0)
    });
    Ok(ranked[k].1)
}

/// Parses one list per line. Each line contributes its leading run of
/// integers, so a blank line gives an empty list.
pub fn parse_lists(text: &str) -> Vec<Vec<u32>> {
    text.lines()
        .map(|line| {
            line.split_whitespace()
                .map_while(|token| token.parse().ok())
                .collect()
        })
        .collect()
}

pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<Vec<u32>>, LargestNumberError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| LargestNumberError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let lists = parse_lists(&text);
    debug!("read {} lists from {}", lists.len(), path.display());
    Ok(lists)
}
