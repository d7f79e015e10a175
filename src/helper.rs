use chrono::Utc;

/// Parses a comma-separated tag string into a trimmed, duplicate-free list.
pub fn parse_tags(tags: Option<String>) -> Vec<String> {
    tags.map(|t| {
        normalize_tags(
            t.split(',')
                .map(|s| s.to_string())
                .collect::<Vec<String>>()
                .as_slice(),
        )
    })
    .unwrap_or_default()
}

/// Trims tags, drops empty entries and collapses duplicates while keeping
/// first-occurrence order.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        if !seen.iter().any(|s: &String| s == tag) {
            seen.push(tag.to_string());
        }
    }
    seen
}

/// Allocates opaque, time-based ids.
///
/// Ids are millisecond timestamps bumped past the previously issued value,
/// so ids handed out by one generator are strictly increasing even when
/// allocated within the same millisecond.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { last: 0 }
    }

    /// Returns the next unique id.
    pub fn next_id(&mut self) -> String {
        let mut ts = Utc::now().timestamp_millis();
        if ts <= self.last {
            ts = self.last + 1;
        }
        self.last = ts;
        ts.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tags_trims_and_splits_on_comma() {
        let tags = parse_tags(Some(" home, work ,  ,urgent".to_string()));
        assert_eq!(tags, vec!["home", "work", "urgent"]);
    }

    #[test]
    fn parse_tags_collapses_duplicates() {
        let tags = parse_tags(Some("a,b,a, a ,b".to_string()));
        assert_eq!(tags, vec!["a", "b"]);
    }

    #[test]
    fn parse_tags_handles_none() {
        assert!(parse_tags(None).is_empty());
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut ids = IdGenerator::new();
        let issued: Vec<i64> = (0..100)
            .map(|_| ids.next_id().parse().unwrap())
            .collect();
        assert!(issued.windows(2).all(|w| w[0] < w[1]));
    }
}
