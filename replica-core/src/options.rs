// replica-core - Copy options
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Configuration for a copy.

/// What to do with a record member that cannot be both read and written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemberPolicy {
    /// Fail the copy with `UnreadableMember` / `UnwritableMember`
    #[default]
    Strict,
    /// Leave the member at its zero value in the clone
    SkipInaccessible,
}

/// Options for a copy.
///
/// The default is an unbounded traversal with [`MemberPolicy::Strict`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CopyOptions {
    /// Maximum nesting depth, counting the root as 1
    pub max_depth: Option<usize>,
    pub member_policy: MemberPolicy,
}

impl CopyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with `DepthExceeded` instead of descending past `limit` levels.
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    pub fn with_member_policy(mut self, policy: MemberPolicy) -> Self {
        self.member_policy = policy;
        self
    }
}
