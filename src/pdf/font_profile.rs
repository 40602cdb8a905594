//! Font-size profiling
//!
//! Ranks the distinct font sizes of a document so the heading classifier
//! can translate "unusually large text" into a Markdown heading level.

/// Number of distinct sizes that participate in the ranking
pub const MAX_RANKED_SIZES: usize = 5;

/// Deepest Markdown heading level
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Ranking of the largest distinct font sizes to heading levels
///
/// Built once per document, immutable afterwards. The largest size maps to
/// level 1, the second-largest to level 2, and so on; sizes outside the top
/// five map to level 0 (body text). Lookups use exact size equality.
#[derive(Debug, Clone, Default)]
pub struct FontSizeMap {
    /// Distinct sizes, descending; at most `MAX_RANKED_SIZES` entries
    ranked: Vec<f64>,
}

impl FontSizeMap {
    /// Build a map from every character size observed in the document
    ///
    /// Non-finite sizes are discarded before ranking.
    pub fn from_sizes(sizes: &[f64]) -> Self {
        let mut ranked: Vec<f64> = sizes.iter().copied().filter(|s| s.is_finite()).collect();
        ranked.sort_by(|a, b| b.total_cmp(a));
        ranked.dedup_by(|a, b| *a == *b);
        ranked.truncate(MAX_RANKED_SIZES);
        Self { ranked }
    }

    /// Map with no entries: every size is body text
    ///
    /// Substituted when the document-wide character scan fails, degrading
    /// heading detection to the geometric and case signals.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Heading level for a font size: 1 for the largest ranked size through
    /// 5 for the smallest, capped at 6; 0 for anything unranked.
    pub fn level_for(&self, size: f64) -> u8 {
        self.ranked
            .iter()
            .position(|s| *s == size)
            .map(|rank| (rank as u8 + 1).min(MAX_HEADING_LEVEL))
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_top_five_distinct_sizes() {
        let map = FontSizeMap::from_sizes(&[8.0, 8.0, 10.0, 12.0, 12.0, 14.0, 20.0]);
        assert_eq!(map.len(), 5);
        assert_eq!(map.level_for(20.0), 1);
        assert_eq!(map.level_for(14.0), 2);
        assert_eq!(map.level_for(12.0), 3);
        assert_eq!(map.level_for(10.0), 4);
        assert_eq!(map.level_for(8.0), 5);
    }

    #[test]
    fn test_unranked_size_is_body_text() {
        let map = FontSizeMap::from_sizes(&[24.0, 20.0, 16.0, 14.0, 12.0, 10.0, 8.0]);
        assert_eq!(map.len(), 5);
        // 10.0 and 8.0 fall outside the top five
        assert_eq!(map.level_for(10.0), 0);
        assert_eq!(map.level_for(8.0), 0);
        assert_eq!(map.level_for(11.5), 0);
    }

    #[test]
    fn test_levels_strictly_increase_as_size_decreases() {
        let sizes = [32.0, 24.0, 18.0, 14.0, 11.0];
        let map = FontSizeMap::from_sizes(&sizes);
        for pair in sizes.windows(2) {
            assert!(map.level_for(pair[0]) < map.level_for(pair[1]));
        }
    }

    #[test]
    fn test_levels_within_bounds() {
        let map = FontSizeMap::from_sizes(&[5.0, 4.0, 3.0, 2.0, 1.0, 0.5]);
        assert!(map.len() <= MAX_RANKED_SIZES);
        for size in [5.0, 4.0, 3.0, 2.0, 1.0] {
            let level = map.level_for(size);
            assert!((1..=MAX_HEADING_LEVEL).contains(&level));
        }
    }

    #[test]
    fn test_empty_map_classifies_nothing() {
        let map = FontSizeMap::empty();
        assert!(map.is_empty());
        assert_eq!(map.level_for(20.0), 0);
    }

    #[test]
    fn test_non_finite_sizes_discarded() {
        let map = FontSizeMap::from_sizes(&[f64::NAN, 12.0, f64::INFINITY, 10.0]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.level_for(12.0), 1);
        assert_eq!(map.level_for(10.0), 2);
    }

    #[test]
    fn test_no_sizes_yields_empty_map() {
        let map = FontSizeMap::from_sizes(&[]);
        assert!(map.is_empty());
    }
}
