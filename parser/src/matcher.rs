use std::fmt::Display;

use crate::UnbalancedBrackets;

/// Identifier of a single loop, unique within one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label(pub u32);

impl Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "L{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoopFrame {
    pub label: Label,
    pub position: usize,
}

/// Bracket matcher handing out a fresh [`Label`] for every opened loop.
///
/// Closing always pops the innermost open loop, so labels nest the same way
/// brackets do regardless of depth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LoopMatcher {
    stack: Vec<LoopFrame>,
    next_label: u32,
}

impl LoopMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, position: usize) -> Label {
        let label = Label(self.next_label);
        self.next_label += 1;

        self.stack.push(LoopFrame { label, position });

        label
    }

    /// Pops the innermost loop. An unmatched close leaves the stack untouched.
    pub fn close(&mut self, position: usize) -> Result<Label, UnbalancedBrackets> {
        self.stack
            .pop()
            .map(|frame| frame.label)
            .ok_or(UnbalancedBrackets::UnopenedBracket(position))
    }

    /// Consumes the matcher, reporting every loop still open, outermost first.
    pub fn finish(self) -> Vec<UnbalancedBrackets> {
        self.stack
            .into_iter()
            .map(|frame| UnbalancedBrackets::UnclosedBracket(frame.position))
            .collect()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Number of labels handed out so far.
    pub const fn allocated(&self) -> u32 {
        self.next_label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Scanner, Token};
    use proptest::prelude::*;

    /// Returns the (open, close) label sequences and any errors.
    fn walk(source: &[u8]) -> (Vec<Label>, Vec<Label>, Vec<UnbalancedBrackets>) {
        let mut matcher = LoopMatcher::new();
        let (mut opened, mut closed, mut errors) = (Vec::new(), Vec::new(), Vec::new());

        for token in Scanner::unbounded(source) {
            match token {
                Token::LoopStart { position } => opened.push(matcher.open(position)),
                Token::LoopEnd { position } => match matcher.close(position) {
                    Ok(label) => closed.push(label),
                    Err(err) => errors.push(err),
                },
                _ => {}
            }
        }

        errors.extend(matcher.finish());

        (opened, closed, errors)
    }

    #[test]
    fn empty_program_is_balanced() {
        let matcher = LoopMatcher::new();

        assert_eq!(matcher.depth(), 0);
        assert!(matcher.finish().is_empty());
    }

    #[test]
    fn nested_and_sibling_loops() {
        let (opened, closed, errors) = walk(b"[[][[]]][]");

        assert!(errors.is_empty());
        assert_eq!(
            opened,
            [0, 1, 2, 3, 4].map(Label).to_vec(),
        );
        assert_eq!(closed, [1, 3, 2, 0, 4].map(Label).to_vec());
    }

    #[test]
    fn unopened_bracket_keeps_scanning() {
        let (opened, closed, errors) = walk(b"+]-[]]");

        assert_eq!(opened, vec![Label(0)]);
        assert_eq!(closed, vec![Label(0)]);
        assert_eq!(
            errors,
            vec![
                UnbalancedBrackets::UnopenedBracket(1),
                UnbalancedBrackets::UnopenedBracket(5),
            ]
        );
    }

    #[test]
    fn unclosed_brackets_reported_outermost_first() {
        let (_, _, errors) = walk(b"[ [ [ ]");

        assert_eq!(
            errors,
            vec![
                UnbalancedBrackets::UnclosedBracket(0),
                UnbalancedBrackets::UnclosedBracket(2),
            ]
        );
    }

    #[test]
    fn labels_are_not_reused_after_close() {
        let mut matcher = LoopMatcher::new();
        let first = matcher.open(0);
        matcher.close(1).unwrap();
        let second = matcher.open(2);

        assert_ne!(first, second);
        assert_eq!(matcher.allocated(), 2);
    }

    #[test]
    fn label_display() {
        assert_eq!(Label(42).to_string(), "L42");
    }

    fn balanced() -> impl Strategy<Value = String> {
        let leaf = prop_oneof![Just(String::new()), Just("+".to_owned()), Just(">".to_owned())];

        leaf.prop_recursive(6, 64, 4, |inner| {
            prop_oneof![
                inner.clone().prop_map(|body| format!("[{body}]")),
                (inner.clone(), inner).prop_map(|(a, b)| format!("{a}{b}")),
            ]
        })
    }

    proptest! {
        #[test]
        fn balanced_programs_use_distinct_labels(source in balanced()) {
            let loops = source.bytes().filter(|&b| b == b'[').count();
            let (opened, mut closed, errors) = walk(source.as_bytes());

            prop_assert!(errors.is_empty());
            prop_assert_eq!(opened.len(), loops);
            prop_assert_eq!(closed.len(), loops);

            closed.sort();
            prop_assert_eq!(closed, opened);
        }

        #[test]
        fn excess_closes_are_reported(source in balanced(), extra in 1usize..4) {
            let source = format!("{source}{}", "]".repeat(extra));
            let (_, _, errors) = walk(source.as_bytes());

            prop_assert_eq!(errors.len(), extra);
            prop_assert!(errors
                .iter()
                .all(|e| matches!(e, UnbalancedBrackets::UnopenedBracket(_))));
        }

        #[test]
        fn excess_opens_are_reported(source in balanced(), extra in 1usize..4) {
            let source = format!("{}{source}", "[".repeat(extra));
            let (_, _, errors) = walk(source.as_bytes());

            prop_assert_eq!(errors.len(), extra);
            prop_assert!(errors
                .iter()
                .all(|e| matches!(e, UnbalancedBrackets::UnclosedBracket(_))));
        }
    }
}
