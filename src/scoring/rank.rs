use std::cmp::Ordering;

use super::config::ScoringConfig;
use super::engine::{score_roster, ScoreResult};
use crate::roster::Member;

/// A member together with their score and competition rank.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMember {
    pub member: Member,
    pub result: ScoreResult,
    /// 1-based "1224" competition rank
    pub rank: u32,
}

impl ScoredMember {
    pub fn final_score(&self) -> f64 {
        self.result.score
    }
}

/// Ranked output of one scoring pass, ordered by rank ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leaderboard {
    entries: Vec<ScoredMember>,
}

impl Leaderboard {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ScoredMember] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredMember> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rank of the first member with this name, if any.
    pub fn rank_of(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.member.name == name)
            .map(|e| e.rank)
    }
}

impl<'a> IntoIterator for &'a Leaderboard {
    type Item = &'a ScoredMember;
    type IntoIter = std::slice::Iter<'a, ScoredMember>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Sort scored members and assign competition ranks.
///
/// Members tied on score share a rank equal to one plus the number of
/// members with a strictly greater score. Ties are listed by name, then by
/// input order.
pub fn rank_members(scored: Vec<(Member, ScoreResult)>) -> Leaderboard {
    let mut indexed: Vec<(usize, Member, ScoreResult)> = scored
        .into_iter()
        .enumerate()
        .map(|(i, (member, result))| (i, member, result))
        .collect();

    indexed.sort_by(|a, b| {
        // Primary: score descending
        let score_cmp = b.2.score.partial_cmp(&a.2.score).unwrap_or(Ordering::Equal);
        if score_cmp != Ordering::Equal {
            return score_cmp;
        }
        a.1.name.cmp(&b.1.name).then(a.0.cmp(&b.0))
    });

    let mut entries: Vec<ScoredMember> = Vec::with_capacity(indexed.len());
    for (position, (_, member, result)) in indexed.into_iter().enumerate() {
        let rank = match entries.last() {
            Some(prev) if prev.result.score == result.score => prev.rank,
            _ => position as u32 + 1,
        };
        entries.push(ScoredMember {
            member,
            result,
            rank,
        });
    }

    Leaderboard { entries }
}

/// Run the whole scoring pipeline over a normalized roster snapshot.
///
/// Pure and idempotent: the same roster and config always produce the same
/// leaderboard.
pub fn score_leaderboard(members: Vec<Member>, config: &ScoringConfig) -> Leaderboard {
    let results = score_roster(&members, config);
    rank_members(members.into_iter().zip(results).collect())
}
