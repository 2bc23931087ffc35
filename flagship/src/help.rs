/*!
Types describing the shape of a registry for usage messages, plus the
storage for help and version text.
 */

use crate::value::{Value, ValueType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Requirement {
    #[default]
    Optional,
    Mandatory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repetition {
    Single,
    Multiple,
}

/// One of the two options every registry has, `--help` and `--version`.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub long: &'static str,
    pub short: char,
    pub description: &'static str,
}

pub const HELP: Builtin = Builtin {
    long: "help",
    short: 'h',
    description: "display this help message and exit",
};

pub const VERSION: Builtin = Builtin {
    long: "version",
    short: 'v',
    description: "display the version of this program and exit",
};

/// The version reported when the program never called `set_version`
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Help text. Either the caller supplied it, or it's generated the first
/// time it's needed and kept until something it was built from changes.
#[derive(Debug, Default)]
pub(crate) struct TextSlot {
    custom: Option<String>,
    generated: Option<Generated>,
}

/// Generated text, along with the program name it mentions
#[derive(Debug)]
struct Generated {
    program: String,
    text: String,
}

impl TextSlot {
    /// Once set, generation is off for good.
    pub fn set(&mut self, text: String) {
        self.custom = Some(text);
    }

    /// Forget any generated text
    pub fn discard(&mut self) {
        self.generated = None;
    }

    pub fn get_or_generate(&mut self, program: &str, generate: impl FnOnce() -> String) -> &str {
        if let Some(ref text) = self.custom {
            return text;
        }

        let generated = match self.generated.take() {
            Some(generated) if generated.program == program => generated,
            _ => Generated {
                program: program.to_owned(),
                text: generate(),
            },
        };

        &self.generated.insert(generated).text
    }
}

/// A `--long` option, as it appears in the help text. The built-in options
/// have no `value`.
#[derive(Debug, Clone)]
pub struct ParameterOption<'a> {
    pub long: &'a str,
    pub short: Option<char>,
    pub value: Option<ValueType>,
    pub requirement: Requirement,
    pub default: Option<&'a Value>,
    pub description: &'a str,
}

#[derive(Debug, Clone)]
pub struct ParameterPositional<'a> {
    pub value: ValueType,
    pub requirement: Requirement,
    pub default: &'a Value,
    pub description: &'a str,
}

/// Everything the help printer needs to know about a registry. Options are
/// in registration order, with `--help` and `--version` last.
#[derive(Debug, Clone)]
pub struct UsageItems<'a> {
    pub positional: Option<ParameterPositional<'a>>,
    pub options: Vec<ParameterOption<'a>>,
}

impl UsageItems<'_> {
    /// True if at least one option can be left off the command line
    pub fn any_optional(&self) -> bool {
        self.options
            .iter()
            .any(|option| option.requirement == Requirement::Optional)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_text_wins() {
        let mut slot = TextSlot::default();
        slot.set("custom".to_owned());

        assert_eq!(slot.get_or_generate("prog", || panic!("generated")), "custom");
    }

    #[test]
    fn generated_text_is_kept() {
        let mut slot = TextSlot::default();

        assert_eq!(slot.get_or_generate("prog", || "first".to_owned()), "first");
        assert_eq!(slot.get_or_generate("prog", || "second".to_owned()), "first");
    }

    #[test]
    fn generated_text_follows_the_program_name() {
        let mut slot = TextSlot::default();

        assert_eq!(slot.get_or_generate("prog", || "first".to_owned()), "first");
        assert_eq!(slot.get_or_generate("other", || "second".to_owned()), "second");

        slot.discard();
        assert_eq!(slot.get_or_generate("other", || "third".to_owned()), "third");
    }
}
