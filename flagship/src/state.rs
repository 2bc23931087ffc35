/*!
The state of a parse in progress: which option the dispatcher is currently
feeding, and the raw tokens collected so far for each option.
 */

use flagship_parser::Arg;
use log::debug;

/// Where the next plain value token goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// No option has been seen yet; values go to the positional slot
    Seeking,

    /// Values go to the option at this registration index
    InOption(usize),
}

/**
The raw tokens for every option (and the positional slot) mentioned on the
command line, in the order they appeared.

`None` means the option never appeared. `Some` of an empty list means it
appeared with no values, like a bare `--flag`, which is different.
 */
#[derive(Debug)]
pub(crate) struct Buckets<'arg> {
    pub positional: Option<Vec<&'arg Arg>>,
    pub options: Vec<Option<Vec<&'arg Arg>>>,
}

#[derive(Debug)]
pub(crate) struct State<'arg> {
    cursor: Cursor,
    buckets: Buckets<'arg>,
}

impl<'arg> State<'arg> {
    pub fn new(option_count: usize) -> Self {
        Self {
            cursor: Cursor::Seeking,
            buckets: Buckets {
                positional: None,
                options: (0..option_count).map(|_| None).collect(),
            },
        }
    }

    /// An option marker was seen. Later values belong to it. A repeat
    /// mention reuses the bucket from the earlier one.
    pub fn enter(&mut self, index: usize) {
        self.cursor = Cursor::InOption(index);

        let bucket = &mut self.buckets.options[index];
        match bucket {
            Some(tokens) => debug!(
                "option #{index} seen again; appending to its {} existing tokens",
                tokens.len()
            ),
            None => *bucket = Some(Vec::new()),
        }
    }

    /// A value was seen. It goes to the most recent option, or to the
    /// positional slot if there hasn't been one yet.
    pub fn push(&mut self, value: &'arg Arg) {
        let bucket = match self.cursor {
            Cursor::Seeking => &mut self.buckets.positional,
            Cursor::InOption(index) => &mut self.buckets.options[index],
        };

        bucket.get_or_insert_with(Vec::new).push(value);
    }

    pub fn finish(self) -> Buckets<'arg> {
        self.buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg(s: &str) -> &Arg {
        Arg::new(s.as_bytes())
    }

    #[test]
    fn values_before_any_option_are_positional() {
        let mut state = State::new(2);
        state.push(arg("note"));
        state.enter(1);
        state.push(arg("18"));

        let buckets = state.finish();
        assert_eq!(buckets.positional, Some(vec![arg("note")]));
        assert_eq!(buckets.options, [None, Some(vec![arg("18")])]);
    }

    #[test]
    fn bare_option_gets_an_empty_bucket() {
        let mut state = State::new(1);
        state.enter(0);

        let buckets = state.finish();
        assert_eq!(buckets.positional, None);
        assert_eq!(buckets.options, [Some(vec![])]);
    }

    #[test]
    fn repeated_option_appends() {
        let mut state = State::new(2);
        state.enter(0);
        state.push(arg("1"));
        state.enter(1);
        state.enter(0);
        state.push(arg("3"));

        let buckets = state.finish();
        assert_eq!(buckets.options[0], Some(vec![arg("1"), arg("3")]));
        assert_eq!(buckets.options[1], Some(vec![]));
    }
}
