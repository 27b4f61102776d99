//! Follow-up message generation
//!
//! Best-effort by contract: any failure in this stage means "no follow-up
//! message", never a failed search.

pub mod classifier;
pub mod sanitize;

pub use classifier::{FollowUpBehavior, FollowUpContext, FollowUpDecision, classify, decide};
pub use sanitize::{NO_REMARK_SENTINEL, follow_up_message, is_no_remark, sanitize};
