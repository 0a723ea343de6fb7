//! Super representative vote reward estimation.
//!
//! Per maintenance period the chain pays a vote reward pool split proportionally to votes, and a
//! block reward pool split evenly among the active SRs. Entries ranked past [`ACTIVE_SR_COUNT`] are
//! candidates and get no block reward.

use crate::address::CandidateAddress;
use crate::chain_client::{SuperRepresentative, TronChainClient};
use crate::errors::{TronStationError, TronStationResult};
use crate::{validate_positive, TronStation};
use futures::future::try_join_all;

pub const TOTAL_VOTE_REWARD: u64 = 23_040;
pub const TOTAL_BLOCK_REWARD: u64 = 2 * TOTAL_VOTE_REWARD;
/// Number of block producing SRs on mainnet.
pub const ACTIVE_SR_COUNT: usize = 27;

const NEW_CANDIDATE_NAME: &str = "New Candidate";
const NEW_SR_NAME: &str = "New SR";
const HYPOTHETICAL_URL: &str = "N/A";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SrRole {
    #[serde(rename = "sr")]
    Sr,
    #[serde(rename = "candidate")]
    Candidate,
    #[serde(rename = "")]
    Unranked,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SrCandidate {
    /// 1-based, 0 until ranked.
    pub rank: usize,
    pub name: String,
    pub url: String,
    pub address: CandidateAddress,
    pub votes: f64,
    pub percentage: f64,
    pub vote_reward: u64,
    pub block_reward: u64,
    pub total_reward: u64,
    pub role: SrRole,
}

impl SrCandidate {
    fn hypothetical(votes: f64, total_votes: f64) -> SrCandidate {
        let vote_reward = vote_reward(votes, total_votes);
        SrCandidate {
            rank: 0,
            name: NEW_CANDIDATE_NAME.to_string(),
            url: HYPOTHETICAL_URL.to_string(),
            address: CandidateAddress::Hypothetical,
            votes,
            percentage: percentage(votes, total_votes),
            vote_reward,
            block_reward: 0,
            total_reward: vote_reward,
            role: SrRole::Candidate,
        }
    }

    fn add_votes(&mut self, votes: f64, total_votes: f64) {
        self.votes += votes;
        self.percentage = percentage(self.votes, total_votes);
        self.vote_reward = vote_reward(self.votes, total_votes);
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SrVoteRewardList {
    pub total_votes: f64,
    /// Number of SRs sharing the block reward pool.
    #[serde(skip)]
    pub sr_amount: usize,
    /// Sorted by votes, descending.
    pub reward_list: Vec<SrCandidate>,
}

/// Entry of [`TronStation::calculate_sr_reward`] with the vote total it was computed against.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SrRewardEstimate {
    pub total_votes: f64,
    #[serde(flatten)]
    pub candidate: SrCandidate,
}

fn percentage(votes: f64, total_votes: f64) -> f64 {
    if total_votes > 0. {
        100. * votes / total_votes
    } else {
        0.
    }
}

fn vote_reward(votes: f64, total_votes: f64) -> u64 {
    if total_votes > 0. {
        (TOTAL_VOTE_REWARD as f64 * (votes / total_votes)).ceil() as u64
    } else {
        0
    }
}

fn block_reward_share(sr_amount: usize) -> u64 {
    if sr_amount == 0 {
        return 0;
    }
    (TOTAL_BLOCK_REWARD as f64 / sr_amount as f64).ceil() as u64
}

/// Stable sort by votes descending, then assign ranks, roles and block rewards.
fn rank_reward_list(reward_list: &mut [SrCandidate], block_reward: u64) {
    reward_list.sort_by(|a, b| b.votes.total_cmp(&a.votes));
    for (index, candidate) in reward_list.iter_mut().enumerate() {
        candidate.rank = index + 1;
        if index < ACTIVE_SR_COUNT {
            candidate.role = SrRole::Sr;
            candidate.block_reward = block_reward;
        } else {
            candidate.role = SrRole::Candidate;
            candidate.block_reward = 0;
        }
        candidate.total_reward = candidate.vote_reward + candidate.block_reward;
    }
}

impl<C: TronChainClient> TronStation<C> {
    /// Display name of an SR: its decoded account name, or its URL.
    async fn sr_display_name(&self, sr: &SuperRepresentative) -> TronStationResult<String> {
        let account = self.client().get_account(&sr.address).await?;
        let hex_name = match account.account_name.or_else(|| sr.account_name.clone()) {
            Some(hex_name) => hex_name,
            None => return Ok(sr.url.clone()),
        };
        match self.client().decode_bytes_to_string(&hex_name) {
            Some(name) => Ok(name),
            None => {
                warn!("Couldn't decode account name '{}' of SR {}", hex_name, sr.address);
                Ok(sr.url.clone())
            },
        }
    }

    /// Current reward distribution among all SRs and candidates.
    pub async fn get_sr_vote_reward_list(&self) -> TronStationResult<SrVoteRewardList> {
        let srs = self.client().list_super_representatives().await?;
        let total_votes: f64 = srs.iter().map(|sr| sr.vote_count.max(0) as f64).sum();
        let sr_amount = if self.is_main() { ACTIVE_SR_COUNT } else { srs.len() };

        // one account request per SR, in flight together
        let names = try_join_all(srs.iter().map(|sr| self.sr_display_name(sr))).await?;

        let mut reward_list: Vec<_> = srs
            .into_iter()
            .zip(names)
            .map(|(sr, name)| {
                let votes = sr.vote_count.max(0) as f64;
                SrCandidate {
                    rank: 0,
                    name,
                    url: sr.url,
                    address: CandidateAddress::Existing(sr.address),
                    votes,
                    percentage: percentage(votes, total_votes),
                    vote_reward: vote_reward(votes, total_votes),
                    block_reward: 0,
                    total_reward: 0,
                    role: SrRole::Unranked,
                }
            })
            .collect();
        rank_reward_list(&mut reward_list, block_reward_share(sr_amount));

        debug!(
            "SR reward list: {} entries, {} total votes, block reward shared by {}",
            reward_list.len(),
            total_votes,
            sr_amount
        );
        Ok(SrVoteRewardList {
            total_votes,
            sr_amount,
            reward_list,
        })
    }

    /// Estimates the rewards of `sr_address` after it receives `votes` more votes.
    ///
    /// An address that is not in the current list is simulated as a new candidate. If the new
    /// candidate ranks among the active SRs it is reported as "New SR" with a block reward share.
    pub async fn calculate_sr_reward(&self, votes: f64, sr_address: &str) -> TronStationResult<SrRewardEstimate> {
        let added_votes = validate_positive("Votes", votes)?;
        let sr_address = self.client().to_canonical_address(sr_address);

        let SrVoteRewardList {
            total_votes,
            sr_amount,
            mut reward_list,
        } = self.get_sr_vote_reward_list().await?;
        if reward_list.is_empty() {
            return Err(TronStationError::UpstreamDataError(
                "Super representative list is empty".to_string(),
            ));
        }

        let total_votes = total_votes + added_votes;
        let is_target = |address: &CandidateAddress| match address {
            CandidateAddress::Existing(address) => self.client().to_canonical_address(address) == sr_address,
            CandidateAddress::Hypothetical => false,
        };

        let is_existing = match reward_list.iter_mut().find(|candidate| is_target(&candidate.address)) {
            Some(candidate) => {
                candidate.add_votes(added_votes, total_votes);
                true
            },
            None => false,
        };
        if !is_existing {
            reward_list.push(SrCandidate::hypothetical(added_votes, total_votes));
        }

        rank_reward_list(&mut reward_list, block_reward_share(sr_amount));

        let mut candidate = reward_list
            .into_iter()
            .find(|candidate| {
                if is_existing {
                    is_target(&candidate.address)
                } else {
                    candidate.address.is_hypothetical()
                }
            })
            .ok_or_else(|| {
                TronStationError::UpstreamDataError(format!("{} is missing from the ranked reward list", sr_address))
            })?;
        if candidate.address.is_hypothetical() && candidate.role == SrRole::Sr {
            candidate.name = NEW_SR_NAME.to_string();
        }

        Ok(SrRewardEstimate { total_votes, candidate })
    }
}
