//! Process-name prefix filter.

use super::PktapHeader;

/// Decides whether a frame belongs to the process of interest.
///
/// Device-reported names may be truncated to the fixed field width or
/// carry inherited/child-process suffixes, so exact equality is too
/// strict: the target matches if it is a case-sensitive prefix of either
/// the owning or the peer process name.
#[derive(Debug, Clone)]
pub struct ProcessFilter {
    target: String,
}

impl ProcessFilter {
    /// Create a filter for `target`.
    ///
    /// An empty target matches every frame. That is the intentional
    /// "no filter" mode; callers that do not support it must validate
    /// the target before constructing the filter.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// The process name being filtered for.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// True iff the frame described by `header` should be retained.
    pub fn matches(&self, header: &PktapHeader) -> bool {
        header.process_name().starts_with(&self.target)
            || header.peer_process_name().starts_with(&self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pktap::testutil::build_frame;

    fn header_for(process_name: &str, peer_process_name: &str) -> PktapHeader {
        let frame = build_frame(process_name, peer_process_name, 0, b"");
        PktapHeader::parse(&frame).unwrap().0
    }

    #[test]
    fn test_prefix_matches_padded_name() {
        let filter = ProcessFilter::new("Foo");
        assert!(filter.matches(&header_for("FooBar", "")));
    }

    #[test]
    fn test_shorter_name_is_not_a_match() {
        // "Fo" is a prefix of the target, not the other way around.
        let filter = ProcessFilter::new("Foo");
        assert!(!filter.matches(&header_for("Fo", "")));
    }

    #[test]
    fn test_peer_name_alone_matches() {
        let filter = ProcessFilter::new("Foo");
        assert!(filter.matches(&header_for("com.other", "FooDaemon")));
    }

    #[test]
    fn test_case_sensitive() {
        let filter = ProcessFilter::new("Foo");
        assert!(!filter.matches(&header_for("fooBar", "")));
    }

    #[test]
    fn test_exact_match() {
        let filter = ProcessFilter::new("com.test.App");
        assert!(filter.matches(&header_for("com.test.App", "")));
    }

    #[test]
    fn test_empty_target_matches_everything() {
        let filter = ProcessFilter::new("");
        assert!(filter.matches(&header_for("anything", "")));
        assert!(filter.matches(&header_for("", "")));
    }
}
