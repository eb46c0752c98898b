use regex::Regex;
use serde::Deserialize;
use tracing::{debug, error};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatcherKind {
    Include,
    NotInclude,
    IncludeAll,
    Regex,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MatcherValue {
    Single(String),
    Multiple(Vec<String>),
}

#[derive(Debug, Deserialize)]
pub struct Matcher {
    pub kind: MatcherKind,
    pub value: MatcherValue,
}

impl Matcher {
    pub fn matches(&self, actual: &str) -> bool {
        debug!("Matching against actual output:\n{}", actual);
        match (&self.kind, &self.value) {
            (MatcherKind::Include, MatcherValue::Single(s)) => actual.contains(s),
            (MatcherKind::NotInclude, MatcherValue::Single(s)) => !actual.contains(s),
            (MatcherKind::IncludeAll, MatcherValue::Multiple(all)) => {
                all.iter().all(|frag| actual.contains(frag))
            }
            (MatcherKind::Regex, MatcherValue::Single(s)) => match Regex::new(s) {
                Ok(re) => re.is_match(actual),
                Err(e) => {
                    error!("Invalid regex: {}", e);
                    false
                }
            },
            (kind, value) => {
                error!("Unsupported matcher: {:?} with {:?}", kind, value);
                false
            }
        }
    }
}
