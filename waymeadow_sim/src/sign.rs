// Signs, responses, and completion reporting types.
//
// A `Sign` is a fixed-position text marker. Most are purely decorative; the
// interactive ones can show extra information on click, offer a response box,
// and carry a grading function that turns the visitor's response into
// individualized feedback. Interactivity is a tagged variant (`SignKind`), so
// the completion scanner's branching is exhaustive rather than a pile of
// presence checks.
//
// Grading functions are plain `fn(&str) -> String` pointers: pure, total
// string mappings supplied with the authored configuration. They must always
// return a non-empty human-readable string; a panicking grader is a fatal
// configuration bug, not a recoverable condition.
//
// Response records are append-only: resubmitting a sign adds a new record
// rather than replacing the old one, and lookups resolve the latest record
// (highest tick, ties to the most recently appended — see
// `SessionState::latest_response`).
//
// See also: `session.rs` for the phase map, response log, and the completion
// scan itself, `types.rs` for `SignId`.

use crate::types::SignId;
use serde::{Deserialize, Serialize};

/// A pure response-to-feedback mapping supplied per sign.
pub type GradingFn = fn(&str) -> String;

/// How a sign participates in the completion check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionRule {
    /// Must have a non-empty response for the session to complete.
    Required,
    /// Any sign sharing this group id satisfies the group. Used for
    /// mutually-substitutable pairs ("already have one" vs "find one").
    AlternativeGroup(u32),
    /// Never counts toward completion (e.g. the guide-naming sign).
    Excluded,
}

/// Side effect applied when a response is submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseEffect {
    None,
    /// The response renames the guide: it mutates the session's display name
    /// and is excluded from completion.
    SetGuideName,
}

/// What kind of sign this is. Decorative signs stay static; interactive
/// signs drive the `Unopened → InfoShown → Responded` phase machine.
#[allow(unpredictable_function_pointer_comparisons)]
#[derive(Clone, Debug, PartialEq)]
pub enum SignKind {
    Decorative,
    Interactive {
        /// Extra text shown when the sign is opened.
        additional_info: Option<String>,
        /// Whether a response box is offered.
        has_response_box: bool,
        /// Grades the response into feedback at completion time.
        grading: Option<GradingFn>,
        /// Short name used in completion summaries.
        title: Option<String>,
        rule: CompletionRule,
        effect: ResponseEffect,
    },
}

/// A fixed-position text marker in the world. Authored configuration, not
/// derived data.
#[derive(Clone, Debug, PartialEq)]
pub struct Sign {
    /// Multi-line content.
    pub text: String,
    pub font_size: f64,
    /// Anchor y.
    pub top: f64,
    /// Anchor x.
    pub left: f64,
    pub kind: SignKind,
}

impl Sign {
    /// A static, non-interactive sign.
    pub fn decorative(text: impl Into<String>, font_size: f64, top: f64, left: f64) -> Self {
        Self {
            text: text.into(),
            font_size,
            top,
            left,
            kind: SignKind::Decorative,
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self.kind, SignKind::Interactive { .. })
    }

    /// Whether the sign collects a response at all.
    pub fn has_response_box(&self) -> bool {
        matches!(
            self.kind,
            SignKind::Interactive {
                has_response_box: true,
                ..
            }
        )
    }

    /// Whether the sign participates in the completion scan: it collects a
    /// response and is not excluded.
    pub fn counts_toward_completion(&self) -> bool {
        match self.kind {
            SignKind::Interactive {
                has_response_box,
                rule,
                ..
            } => has_response_box && rule != CompletionRule::Excluded,
            SignKind::Decorative => false,
        }
    }

    /// The label used in completion summaries: the title, or the first line
    /// of the sign text when untitled.
    pub fn label(&self) -> String {
        if let SignKind::Interactive {
            title: Some(title), ..
        } = &self.kind
        {
            return title.clone();
        }
        self.text.lines().next().unwrap_or_default().to_string()
    }
}

/// A submitted response. At most one per submission; resubmissions append.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub sign: SignId,
    pub text: String,
    /// Session tick at submission time.
    pub tick: u64,
}

/// Interaction phase of a single sign.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignPhase {
    #[default]
    Unopened,
    InfoShown,
    Responded,
}

/// Feedback for one graded response in a success summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignFeedback {
    pub sign: SignId,
    pub label: String,
    pub response: String,
    pub feedback: String,
}

/// Result of the global completion check.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CompletionOutcome {
    /// At least one required task lacks a non-empty response. `missing`
    /// lists the outstanding tasks by label, in sign order.
    Incomplete { missing: Vec<String> },
    /// Every required task is answered. Each gradable response carries its
    /// own feedback line.
    Complete {
        elapsed_seconds: f64,
        feedback: Vec<SignFeedback>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo_grader(response: &str) -> String {
        format!("noted: {response}")
    }

    fn interactive(rule: CompletionRule, title: Option<&str>) -> Sign {
        Sign {
            text: "What brings you here?\nTell us below.".into(),
            font_size: 14.0,
            top: 10.0,
            left: 20.0,
            kind: SignKind::Interactive {
                additional_info: Some("Any answer works.".into()),
                has_response_box: true,
                grading: Some(echo_grader),
                title: title.map(Into::into),
                rule,
                effect: ResponseEffect::None,
            },
        }
    }

    #[test]
    fn decorative_signs_do_not_count() {
        let sign = Sign::decorative("Welcome to the meadow", 18.0, 0.0, 0.0);
        assert!(!sign.is_interactive());
        assert!(!sign.has_response_box());
        assert!(!sign.counts_toward_completion());
    }

    #[test]
    fn excluded_signs_do_not_count() {
        let sign = interactive(CompletionRule::Excluded, None);
        assert!(sign.has_response_box());
        assert!(!sign.counts_toward_completion());
    }

    #[test]
    fn required_signs_count() {
        assert!(interactive(CompletionRule::Required, None).counts_toward_completion());
    }

    #[test]
    fn label_prefers_title_then_first_line() {
        let titled = interactive(CompletionRule::Required, Some("Intentions"));
        assert_eq!(titled.label(), "Intentions");
        let untitled = interactive(CompletionRule::Required, None);
        assert_eq!(untitled.label(), "What brings you here?");
    }

    #[test]
    fn grading_fn_is_a_plain_pointer() {
        let sign = interactive(CompletionRule::Required, None);
        if let SignKind::Interactive {
            grading: Some(grade),
            ..
        } = sign.kind
        {
            assert_eq!(grade("hello"), "noted: hello");
        } else {
            panic!("expected a grading function");
        }
    }

    #[test]
    fn response_record_serialization_roundtrip() {
        let record = ResponseRecord {
            sign: SignId(3),
            text: "an answer".into(),
            tick: 420,
        };
        let json = serde_json::to_string(&record).unwrap();
        let restored: ResponseRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, restored);
    }

    #[test]
    fn completion_outcome_serializes() {
        let outcome = CompletionOutcome::Incomplete {
            missing: vec!["Intentions".into()],
        };
        let json = serde_json::to_string(&outcome).unwrap();
        let restored: CompletionOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(outcome, restored);
    }
}
