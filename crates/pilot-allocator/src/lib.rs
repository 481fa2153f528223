//! Portfolio resource allocation.
//!
//! Each horizon gets a hard cap of `total × target fraction`. Within a horizon,
//! fundable initiatives are served in descending priority order (earlier
//! creation, then id, breaks ties), each receiving
//! `min(request, remaining horizon cap, remaining pool)` until the cap or the
//! pool runs out.
//!
//! The fill is greedy, not optimal, and reproduces exactly from the same
//! snapshot.
//!
//! The allocator only computes an [`AllocationPlan`]; applying it to stored
//! initiatives is the caller's job and must happen in one step.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod allocator;
pub mod plan;
pub mod target;

pub use allocator::{AllocationConstraints, PortfolioAllocator, DEFAULT_BALANCE_TOLERANCE_PCT};
pub use plan::{AllocationPlan, HorizonAllocation, InitiativeAllocation};
pub use target::TargetAllocation;
