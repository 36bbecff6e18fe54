//! Rule types shared by the line classifiers.
//!
//! Classifiers hold their heuristics as data: an ordered list of named
//! rules that can be extended without touching the aggregators.

use std::fmt;

type Predicate = Box<dyn Fn(&str) -> bool + Send + Sync>;
type Guard = Box<dyn Fn(&str) -> Decision + Send + Sync>;

/// A named boolean test over one line.
pub struct LineRule {
    name: &'static str,
    predicate: Predicate,
}

impl LineRule {
    /// Create a rule from a predicate.
    pub fn new(
        name: &'static str,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            predicate: Box::new(predicate),
        }
    }

    /// Rule name, used in debug logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Evaluate the rule.
    pub fn matches(&self, line: &str) -> bool {
        (self.predicate)(line)
    }
}

impl fmt::Debug for LineRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LineRule").field(&self.name).finish()
    }
}

/// Outcome of one guard in an ordered chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Stop and classify the line as a match
    Accept,
    /// Stop and classify the line as a non-match
    Reject,
    /// No opinion; ask the next guard
    Pass,
}

/// A named guard clause: the first guard with an opinion decides.
pub struct GuardRule {
    name: &'static str,
    guard: Guard,
}

impl GuardRule {
    /// Create a guard.
    pub fn new(
        name: &'static str,
        guard: impl Fn(&str) -> Decision + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            guard: Box::new(guard),
        }
    }

    /// A guard that accepts when the predicate holds.
    pub fn accept_if(
        name: &'static str,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, move |line| {
            if predicate(line) {
                Decision::Accept
            } else {
                Decision::Pass
            }
        })
    }

    /// A guard that rejects when the predicate holds.
    pub fn reject_if(
        name: &'static str,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, move |line| {
            if predicate(line) {
                Decision::Reject
            } else {
                Decision::Pass
            }
        })
    }

    /// Guard name, used in debug logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Evaluate the guard.
    pub fn decide(&self, line: &str) -> Decision {
        (self.guard)(line)
    }
}

impl fmt::Debug for GuardRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GuardRule").field(&self.name).finish()
    }
}

/// Run an ordered guard chain. Returns the deciding guard's name with the
/// verdict; a chain where no guard has an opinion rejects.
pub fn run_chain(guards: &[GuardRule], line: &str) -> (bool, Option<&'static str>) {
    for guard in guards {
        match guard.decide(line) {
            Decision::Accept => return (true, Some(guard.name())),
            Decision::Reject => return (false, Some(guard.name())),
            Decision::Pass => {}
        }
    }
    (false, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_opinion_wins() {
        let guards = vec![
            GuardRule::reject_if("too_long", |l| l.len() > 5),
            GuardRule::accept_if("has_digit", |l| l.chars().any(|c| c.is_ascii_digit())),
            GuardRule::accept_if("anything", |_| true),
        ];

        assert_eq!(run_chain(&guards, "1234567"), (false, Some("too_long")));
        assert_eq!(run_chain(&guards, "a1"), (true, Some("has_digit")));
        assert_eq!(run_chain(&guards, "ab"), (true, Some("anything")));
    }

    #[test]
    fn test_empty_chain_rejects() {
        assert_eq!(run_chain(&[], "x"), (false, None));
    }

    #[test]
    fn test_line_rule() {
        let rule = LineRule::new("upper", |l| l.chars().all(char::is_uppercase));
        assert_eq!(rule.name(), "upper");
        assert!(rule.matches("ABC"));
        assert!(!rule.matches("AbC"));
        assert_eq!(format!("{:?}", rule), "LineRule(\"upper\")");
    }
}
