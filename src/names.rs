//! Name curation: which names are eligible right now and in what rank order.
//!
//! Everything here runs before the layout engine and is pure: the current time and the
//! RNG are supplied by the caller.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A name that may stop being shown after `expires_at`. No expiry means it never lapses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameEntry {
    pub name: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl NameEntry {
    pub fn permanent(name: &str) -> Self {
        Self { name: name.to_string(), expires_at: None }
    }

    pub fn expiring(name: &str, expires_at: DateTime<Utc>) -> Self {
        Self { name: name.to_string(), expires_at: Some(expires_at) }
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|at| at > now)
    }
}

/// Names of entries still active at `now`, in input order.
pub fn active_names(entries: &[NameEntry], now: DateTime<Utc>) -> Vec<&str> {
    entries
        .iter()
        .filter(|e| e.is_active(now))
        .map(|e| e.name.as_str())
        .collect()
}

/// Build a ranked list: `headliner` at rank 0, then `rest` shuffled.
/// Repeats (including of the headliner) are dropped, keeping the first occurrence.
pub fn rank_names<S, R>(headliner: &str, rest: &[S], rng: &mut R) -> Vec<String>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(headliner);

    let mut tail: Vec<String> = rest
        .iter()
        .map(|s| s.as_ref())
        .filter(|s| seen.insert(*s))
        .map(str::to_string)
        .collect();
    tail.shuffle(rng);

    let mut ranked = Vec::with_capacity(tail.len() + 1);
    ranked.push(headliner.to_string());
    ranked.extend(tail);
    ranked
}

/// The full set of names a cloud can draw from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Roster {
    /// Always rank 0.
    pub headliner: String,
    pub permanent: Vec<String>,
    pub expiring: Vec<NameEntry>,
}

impl Roster {
    /// Eligible names at `now`, headliner first and the rest shuffled.
    pub fn ranked<R: Rng + ?Sized>(&self, now: DateTime<Utc>, rng: &mut R) -> Vec<String> {
        let mut pool: Vec<&str> = self.permanent.iter().map(String::as_str).collect();
        pool.extend(active_names(&self.expiring, now));
        rank_names(&self.headliner, &pool, rng)
    }
}

impl Default for Roster {
    fn default() -> Self {
        let permanent = [
            "Mohamed", "Wafa", "Fouad", "Khawla", "Soumaya", "Lina", "Youssef", "Wala", "Ikhlass",
        ];
        let expiring = [
            "Siby", "Naïa", "Zoé", "Liam", "Kyrie Elijah", "Djibril", "Ornella", "Jonas", "Kiara",
        ];
        Self {
            headliner: "MK TheBoss".to_string(),
            permanent: permanent.iter().map(|s| s.to_string()).collect(),
            expiring: expiring.iter().map(|s| NameEntry::permanent(s)).collect(),
        }
    }
}
