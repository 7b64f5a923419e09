use core::fmt;

/// A boolean switch accepted by a command, spelled `-<short>` or
/// `--<long>`.
pub struct Flag {
    /// Single-character spelling; also the identity of the parsed flag.
    pub short: char,
    /// Long spelling, without the leading dashes.
    pub long: &'static str,
    /// One-line description used by `help <command>`.
    pub help: &'static str,
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[-{}]", self.short)
    }
}

/// The expected parameter type for a positional command argument.
pub enum Type {
    /// A class or an instance. Consumes the rest of the line so that
    /// expressions with spaces (`[UIApplication sharedApplication]`) work.
    Handle,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Handle => write!(f, "<class or instance>"),
        }
    }
}

/// Full parameter signature of a command.
pub struct Signature {
    /// Accepted switches, in usage order.
    pub flags: &'static [Flag],
    /// Positional parameters, in order.
    pub params: &'static [Type],
    /// One-line description of the command.
    pub help: &'static str,
}

impl Signature {
    fn flag(&self, token: &str) -> Option<Vec<char>> {
        if let Some(long) = token.strip_prefix("--") {
            return self
                .flags
                .iter()
                .find(|f| f.long == long)
                .map(|f| vec![f.short]);
        }

        let shorts = token.strip_prefix('-')?;
        shorts
            .chars()
            .map(|c| self.flags.iter().find(|f| f.short == c).map(|f| f.short))
            .collect()
    }

    /// Parse raw command tokens against this signature.
    ///
    /// Switches come first (`--` ends them), then the positional
    /// parameters. A `Handle` parameter swallows every remaining token.
    ///
    /// # Returns
    ///
    /// `Some(values)` with one `Value::Flag` per switch followed by the
    /// positional values, or `None` if `tokens` do not fit the signature.
    #[must_use]
    pub fn parse<'a>(&self, tokens: &[&'a str]) -> Option<Vec<Value<'a>>> {
        let mut values = Vec::new();
        let mut rest = tokens;

        while let Some((first, tail)) = rest.split_first() {
            if *first == "--" {
                rest = tail;
                break;
            }
            if !first.starts_with('-') || first.len() < 2 {
                break;
            }
            values.extend(self.flag(first)?.into_iter().map(Value::Flag));
            rest = tail;
        }

        for param in self.params {
            match param {
                Type::Handle => {
                    if rest.is_empty() {
                        return None;
                    }
                    values.push(Value::Handle(rest.join(" ")));
                    rest = &[];
                }
            }
        }

        rest.is_empty().then_some(values)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .flags
            .iter()
            .map(ToString::to_string)
            .chain(self.params.iter().map(ToString::to_string))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

#[derive(Debug, PartialEq)]
/// A parsed command argument value.
pub enum Value<'a> {
    /// A switch that was given, identified by its short spelling.
    Flag(char),
    /// A class or instance handle.
    Handle(String),
    /// A borrowed string slice (command names, messages).
    String(&'a str),
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Flag(c) => write!(f, "-{c}"),
            Value::Handle(h) => write!(f, "{h}"),
            Value::String(s) => write!(f, "{s}"),
        }
    }
}

/// Lookup helpers over a parsed argument list.
pub trait Args {
    /// Whether the switch spelled `-<short>` was given.
    fn has_flag(&self, short: char) -> bool;

    /// The first handle argument, if any.
    fn handle(&self) -> Option<&str>;
}

impl Args for [Value<'_>] {
    fn has_flag(&self, short: char) -> bool {
        self.iter().any(|v| *v == Value::Flag(short))
    }

    fn handle(&self) -> Option<&str> {
        self.iter().find_map(|v| match v {
            Value::Handle(h) => Some(h.as_str()),
            _ => None,
        })
    }
}

/// Join a slice of `Value` into a single `String` using `sep` as separator.
///
/// This is a convenience used by handlers when composing user-visible
/// messages from an array of previously parsed `Value` arguments.
pub trait Join {
    /// Join the display representation of `self` using `sep`.
    fn joined(&self, sep: &str) -> String;
}

impl Join for [Value<'_>] {
    fn joined(&self, sep: &str) -> String {
        self.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(sep)
    }
}
