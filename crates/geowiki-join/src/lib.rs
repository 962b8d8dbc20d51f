//! geowiki-join
//!
//! Key index over the entity stream (`index`), the match pass over the page
//! stream (`matcher`) and the final ordering of joined slots (`ranker`).
pub mod index;
pub mod matcher;
pub mod ranker;

pub use index::{JoinIndex, SlotId};
pub use matcher::{MatchOutcome, MatchStats, Matcher};
pub use ranker::{rank, rank_order};
