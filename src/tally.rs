//! In-process aggregation of raw vote and member rows into the shapes the
//! results and members endpoints return. Pure functions, tested without a
//! database.

use crate::db::organization::{InternalMember, OrganizationId, PairId};
use crate::db::vote::{InternalVote, PairVoteCount};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Tally for one candidate pair within an organization.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairResult {
    pub organization_id: OrganizationId,
    pub pair_id: PairId,
    pub vote_count: i64,
    pub total_vote_count: i64,
    pub percentage: f64,
    pub image_file_name: Option<String>,
}

pub fn percentage(vote_count: i64, total_vote_count: i64) -> f64 {
    if total_vote_count == 0 {
        return 0.0;
    }
    vote_count as f64 / total_vote_count as f64 * 100.0
}

/// Groups votes by organization and computes per-pair tallies. Pair counts
/// come from the database aggregate; a pair that appears in the votes but
/// not in `counts` tallies as zero.
pub fn voting_results(
    votes: &[InternalVote],
    counts: &[PairVoteCount],
) -> BTreeMap<OrganizationId, Vec<PairResult>> {
    let mut votes_by_organization: BTreeMap<OrganizationId, Vec<&InternalVote>> = BTreeMap::new();
    for vote in votes {
        votes_by_organization
            .entry(vote.organization_id)
            .or_default()
            .push(vote);
    }

    let mut results = BTreeMap::new();
    for (organization_id, organization_votes) in votes_by_organization {
        let total_vote_count = organization_votes.len() as i64;
        let pair_ids: BTreeSet<PairId> = organization_votes
            .iter()
            .map(|vote| vote.pair_id)
            .collect();

        let pair_results = pair_ids
            .into_iter()
            .map(|pair_id| {
                let detail = counts.iter().find(|count| {
                    count.organization_id == organization_id && count.pair_id == pair_id
                });
                let vote_count = detail.map_or(0, |count| count.vote_count);
                PairResult {
                    organization_id,
                    pair_id,
                    vote_count,
                    total_vote_count,
                    percentage: percentage(vote_count, total_vote_count),
                    image_file_name: detail.and_then(|count| count.image_file_name.clone()),
                }
            })
            .collect();

        results.insert(organization_id, pair_results);
    }

    results
}

/// Groups members by organization, then by pair.
pub fn group_members(
    members: Vec<InternalMember>,
) -> BTreeMap<OrganizationId, BTreeMap<PairId, Vec<InternalMember>>> {
    let mut grouped: BTreeMap<OrganizationId, BTreeMap<PairId, Vec<InternalMember>>> =
        BTreeMap::new();
    for member in members {
        grouped
            .entry(member.organization_id)
            .or_default()
            .entry(member.pair_id)
            .or_default()
            .push(member);
    }
    grouped
}
