use std::ffi::{OsStr, OsString};

use flagship_parser::ArgumentsParser;

/// Owned storage for a full argument vector, program name included.
///
/// This type exists for roughly two purposes: to provide a convenient owned
/// container for args retrieved from [`std::env`], and to be something the
/// parser can borrow from for the length of a parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedArguments {
    arguments: Vec<OsString>,
}

impl LoadedArguments {
    #[must_use]
    pub fn from_env() -> Self {
        std::env::args_os().collect()
    }

    /// The program name, as the OS gave it to us. Usually a path.
    #[must_use]
    pub fn argv0(&self) -> Option<&OsStr> {
        self.arguments.first().map(OsString::as_os_str)
    }

    /// Everything after the program name
    #[must_use]
    pub fn arguments(&self) -> &[OsString] {
        self.arguments.get(1..).unwrap_or(&[])
    }

    pub fn parser(&self) -> ArgumentsParser<impl Iterator<Item = &[u8]>> {
        ArgumentsParser::new(self.arguments().iter().map(|arg| arg.as_encoded_bytes()))
    }
}

impl<T: Into<OsString>> FromIterator<T> for LoadedArguments {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            arguments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argv0_is_split_off() {
        let loaded: LoadedArguments = ["prog", "--name", "Ada"].into_iter().collect();

        assert_eq!(loaded.argv0(), Some(OsStr::new("prog")));
        assert_eq!(loaded.arguments(), ["--name", "Ada"]);
    }

    #[test]
    fn empty() {
        let loaded = LoadedArguments::default();

        assert_eq!(loaded.argv0(), None);
        assert!(loaded.arguments().is_empty());
    }
}
