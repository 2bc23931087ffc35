use core::fmt::{self, Display, Write as _};
use core::iter;

use indent_write::fmt::IndentWriter;
use joinery::JoinableIterator;
use lazy_format::lazy_format;

use crate::errors::ParseError;
use crate::help::{ParameterOption, ParameterPositional, Repetition, Requirement, UsageItems};
use crate::value::{Value, ValueType};

/// Descriptions start at this column, if the item fits before it
const DESCRIPTION_COLUMN: usize = 24;

/// Indent for sections, and for descriptions that don't fit on the same line
/// as their item
const INDENT: &str = "  ";
const DESCRIPTION_INDENT: &str = "        ";

/// A usage error, as printed to stderr: `program: message`
pub fn error_message<'a>(program: &'a str, error: &'a ParseError) -> impl Display + 'a {
    lazy_format!("{program}: {error}")
}

/*
Overall structure:

DESCRIPTION

Usage:
  program [OPTIONS] --name <String> [String...]

Arguments:
  [String...]             things to do [optional, StringVec, default: []]

Options:
  -a, --age <Int>         your age [optional, default: 18]
  -n, --name <String>     your name [required]
  -h, --help              display this help message and exit
 */
pub fn render_help(program: &str, description: &str, items: &UsageItems<'_>, width: usize) -> String {
    HelpText {
        program,
        description,
        items,
        width,
    }
    .to_string()
}

struct HelpText<'a> {
    program: &'a str,
    description: &'a str,
    items: &'a UsageItems<'a>,
    width: usize,
}

impl Display for HelpText<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items = self.items;
        // Everything below a section header is indented
        let width = self.width.saturating_sub(INDENT.len());

        if !self.description.is_empty() {
            writeln!(out, "{}", textwrap::fill(self.description, self.width))?;
            writeln!(out)?;
        }

        section(out, "Usage", |out| {
            write!(out, "{}", self.program)?;

            if items.any_optional() {
                write!(out, " [OPTIONS]")?;
            }

            items
                .options
                .iter()
                .filter(|option| option.requirement == Requirement::Mandatory)
                .try_for_each(|option| write!(out, " {}", option_synopsis(option)))?;

            if let Some(ref positional) = items.positional {
                write!(out, " {}", positional_placeholder(positional))?;
            }

            writeln!(out)
        })?;

        if let Some(ref positional) = items.positional {
            writeln!(out)?;
            section(out, "Arguments", |out| {
                describe(
                    out,
                    positional_placeholder(positional),
                    &annotated(
                        positional.description,
                        positional.requirement,
                        Some(positional.value),
                        Some(positional.default),
                    ),
                    width,
                )
            })?;
        }

        writeln!(out)?;
        section(out, "Options", |out| {
            items.options.iter().try_for_each(|option| {
                describe(
                    out,
                    option_tags(option),
                    &annotated(
                        option.description,
                        option.requirement,
                        option.value,
                        option.default,
                    ),
                    width,
                )
            })
        })
    }
}

/// Write the `header`, then an indented `body`
fn section<O: fmt::Write + ?Sized>(
    out: &mut O,
    header: &str,
    body: impl FnOnce(&mut IndentWriter<&mut O>) -> fmt::Result,
) -> fmt::Result {
    writeln!(out, "{header}:")?;
    body(&mut IndentWriter::new(INDENT, out))
}

/// Describe an item by printing it, followed by its description. Short items
/// share a line with the start of the description; long ones get the
/// description on the following lines. Either way the description is wrapped
/// to `width`.
fn describe(
    out: &mut impl fmt::Write,
    item: impl Display,
    description: &str,
    width: usize,
) -> fmt::Result {
    let item = item.to_string();

    if description.is_empty() {
        return writeln!(out, "{item}");
    }

    if item.len() + 2 <= DESCRIPTION_COLUMN {
        let first = format!("{item:<DESCRIPTION_COLUMN$}");
        let rest = " ".repeat(DESCRIPTION_COLUMN);
        let options = textwrap::Options::new(width)
            .initial_indent(&first)
            .subsequent_indent(&rest);

        writeln!(out, "{}", textwrap::fill(description, options))
    } else {
        let options = textwrap::Options::new(width)
            .initial_indent(DESCRIPTION_INDENT)
            .subsequent_indent(DESCRIPTION_INDENT);

        writeln!(out, "{item}")?;
        writeln!(out, "{}", textwrap::fill(description, options))
    }
}

/// The description, followed by whether the option is required, the type
/// name of vector options, and the default. Options with no value (the
/// builtins) get no note at all.
fn annotated(
    description: &str,
    requirement: Requirement,
    value: Option<ValueType>,
    default: Option<&Value>,
) -> String {
    let note = value.map(|value| {
        // Scalar placeholders already spell out the type name
        let type_name = match value.repetition() {
            Repetition::Multiple => Some(value.name().to_owned()),
            Repetition::Single => None,
        };

        let default = match (requirement, default) {
            (Requirement::Optional, Some(default)) => {
                Some(lazy_format!("default: {}", printable_default(default)).to_string())
            }
            _ => None,
        };

        let requirement = match requirement {
            Requirement::Mandatory => "required",
            Requirement::Optional => "optional",
        };

        let parts = iter::once(requirement.to_owned())
            .chain(type_name)
            .chain(default);

        format!("[{}]", parts.join_with(", "))
    });

    Some(description.to_owned())
        .filter(|description| !description.is_empty())
        .into_iter()
        .chain(note)
        .join_with(" ")
        .to_string()
}

/// Empty strings are shown quoted, so that they're visible at all
fn printable_default(default: &Value) -> String {
    match default {
        Value::Str(s) if s.is_empty() => "\"\"".to_owned(),
        default => default.render(),
    }
}

/// The placeholder for an option's value. Booleans and vectors can appear
/// with no value at all, so theirs are bracketed.
fn value_placeholder(value: ValueType) -> impl Display {
    let element = value.element();

    lazy_format!(match ((value.repetition(), element)) {
        (Repetition::Multiple, _) => "[{element}...]",
        (Repetition::Single, ValueType::Bool) => "[{element}]",
        (Repetition::Single, _) => "<{element}>",
    })
}

fn positional_placeholder(positional: &ParameterPositional<'_>) -> impl Display {
    let element = positional.value.element();

    lazy_format!(match ((positional.requirement, positional.value.repetition())) {
        (Requirement::Mandatory, Repetition::Single) => "<{element}>",
        (Requirement::Mandatory, Repetition::Multiple) => "<{element}>...",
        (Requirement::Optional, Repetition::Single) => "[{element}]",
        (Requirement::Optional, Repetition::Multiple) => "[{element}...]",
    })
}

fn option_tags<'a>(option: &'a ParameterOption<'a>) -> impl Display + 'a {
    let long = option.long;

    let tags = lazy_format!(match (option.short) {
        Some(short) => "-{short}, --{long}",
        None => "    --{long}",
    });

    lazy_format!(match (option.value) {
        None => "{tags}",
        Some(value) => ("{tags} {placeholder}", placeholder = value_placeholder(value)),
    })
}

fn option_synopsis<'a>(option: &'a ParameterOption<'a>) -> impl Display + 'a {
    let long = option.long;

    lazy_format!(match (option.value) {
        None => "--{long}",
        Some(value) => ("--{long} {placeholder}", placeholder = value_placeholder(value)),
    })
}
