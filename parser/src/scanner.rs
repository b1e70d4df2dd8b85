use std::fmt::Display;

/// One of the eight source symbols. Every other byte is a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    MoveRight,
    MoveLeft,
    Increment,
    Decrement,
    Output,
    Input,
    LoopStart,
    LoopEnd,
}

impl Command {
    pub const fn from_byte(byte: u8) -> Option<Self> {
        use Command::*;

        Some(match byte {
            b'>' => MoveRight,
            b'<' => MoveLeft,
            b'+' => Increment,
            b'-' => Decrement,
            b'.' => Output,
            b',' => Input,
            b'[' => LoopStart,
            b']' => LoopEnd,
            _ => return None,
        })
    }

    pub const fn as_byte(self) -> u8 {
        use Command::*;

        match self {
            MoveRight => b'>',
            MoveLeft => b'<',
            Increment => b'+',
            Decrement => b'-',
            Output => b'.',
            Input => b',',
            LoopStart => b'[',
            LoopEnd => b']',
        }
    }

    /// Commands whose repetitions add up and can be folded into a single [`Run`].
    pub const fn is_mutation(self) -> bool {
        matches!(
            self,
            Command::MoveRight | Command::MoveLeft | Command::Increment | Command::Decrement
        )
    }
}

/// A mutation command repeated `count` times, `1 <= count <= cap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    pub command: Command,
    pub count: u32,
}

impl Display for Run {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = self.command.as_byte() as char;

        write!(f, "{}", symbol.to_string().repeat(self.count as usize))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Run(Run),
    Output,
    Input,
    LoopStart { position: usize },
    LoopEnd { position: usize },
}

/// Forward scanner over raw source that folds runs of identical mutation
/// commands, never letting a single run exceed `cap`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scanner<'a> {
    contents: &'a [u8],
    idx: usize,
    cap: u32,
}

impl<'a> Scanner<'a> {
    /// A `cap` of zero is treated as one.
    pub fn new(contents: &'a [u8], cap: u32) -> Self {
        Self {
            contents,
            idx: 0,
            cap: cap.max(1),
        }
    }

    pub fn unbounded(contents: &'a [u8]) -> Self {
        Self::new(contents, u32::MAX)
    }

    pub const fn position(&self) -> usize {
        self.idx
    }

    fn scan_run(&mut self, command: Command) -> Run {
        let byte = command.as_byte();
        let mut count = 1;

        while count < self.cap && self.peek() == Some(byte) {
            count += 1;
            self.idx += 1;
        }

        Run { command, count }
    }

    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek();
        self.idx += 1;

        byte
    }

    fn peek(&self) -> Option<u8> {
        self.contents.get(self.idx).copied()
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let byte = self.next_byte()?;
            let position = self.idx - 1;

            let Some(command) = Command::from_byte(byte) else {
                continue;
            };

            return Some(match command {
                Command::Output => Token::Output,
                Command::Input => Token::Input,
                Command::LoopStart => Token::LoopStart { position },
                Command::LoopEnd => Token::LoopEnd { position },
                mutation => Token::Run(self.scan_run(mutation)),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Command::*, *};
    use proptest::prelude::*;

    fn run(command: Command, count: u32) -> Token {
        Token::Run(Run { command, count })
    }

    macro_rules! test {
        ($name:ident, $input:expr, $cap:expr => $output:expr) => {
            #[test]
            fn $name() {
                let tokens: Vec<_> = Scanner::new($input, $cap).collect();

                assert_eq!(&tokens, $output)
            }
        };
    }

    test!(scan_empty, b"", 10 => &[]);
    test!(scan_comments_only, b"hello world\n", 10 => &[]);
    test!(scan_single, b"+", 10 => &[run(Increment, 1)]);
    test!(
        scan_runs,
        b">>>><<+++---" , 10 =>
        &[run(MoveRight, 4), run(MoveLeft, 2), run(Increment, 3), run(Decrement, 3)]
    );
    test!(
        scan_mixed_signs_do_not_fold,
        b"+-+-", 10 =>
        &[run(Increment, 1), run(Decrement, 1), run(Increment, 1), run(Decrement, 1)]
    );
    test!(
        scan_comment_breaks_run,
        b"++ ++", 10 =>
        &[run(Increment, 2), run(Increment, 2)]
    );
    test!(
        scan_split_at_cap,
        b"+++++++", 3 =>
        &[run(Increment, 3), run(Increment, 3), run(Increment, 1)]
    );
    test!(scan_zero_cap_is_one, b"<<", 0 => &[run(MoveLeft, 1), run(MoveLeft, 1)]);
    test!(
        scan_io_not_folded,
        b"..,,", 10 =>
        &[Token::Output, Token::Output, Token::Input, Token::Input]
    );
    test!(
        scan_loop_positions,
        b"a[-]b", 10 =>
        &[
            Token::LoopStart { position: 1 },
            run(Decrement, 1),
            Token::LoopEnd { position: 3 },
        ]
    );

    #[test]
    fn command_bytes_agree() {
        for byte in b"><+-.,[]" {
            let command = Command::from_byte(*byte).unwrap();
            assert_eq!(command.as_byte(), *byte);
        }
        assert_eq!(Command::from_byte(b'x'), None);
    }

    #[test]
    fn run_displays_as_source() {
        let run = Run {
            command: MoveLeft,
            count: 3,
        };

        assert_eq!(run.to_string(), "<<<");
    }

    proptest! {
        #[test]
        fn runs_cover_every_repetition(n in 1usize..5000, cap in 1u32..300) {
            let source = vec![b'+'; n];
            let counts: Vec<u32> = Scanner::new(&source, cap)
                .map(|token| match token {
                    Token::Run(run) => run.count,
                    other => panic!("unexpected token {other:?}"),
                })
                .collect();

            prop_assert!(counts.iter().all(|&count| count >= 1 && count <= cap));
            prop_assert_eq!(counts.iter().map(|&c| c as usize).sum::<usize>(), n);
        }
    }
}
