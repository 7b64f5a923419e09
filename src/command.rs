use std::{collections::BTreeMap, io::Write};

use crate::{
    diag::Result,
    handler::{self, CommandFn},
    param::{Flag, Signature, Type, Value},
    session::State,
};

#[derive(PartialEq, Debug)]
enum Status {
    Handled,
    NotHandled,
}

enum Node {
    Command(CommandFn, Signature),
    Alias(&'static str),
    HelpCommand,
}

const PMETHODS_FLAGS: &[Flag] = &[
    Flag {
        short: 'a',
        long: "address",
        help: "Print the implementation address of the method",
    },
    Flag {
        short: 'i',
        long: "instance",
        help: "Print the instance methods",
    },
    Flag {
        short: 'c',
        long: "class",
        help: "Print the class methods",
    },
];

const PPROPERTIES_FLAGS: &[Flag] = &[Flag {
    short: 'v',
    long: "value",
    help: "Print the value of a property",
}];

const NO_PARAMS: Signature = Signature {
    flags: &[],
    params: &[],
    help: "",
};

/// Command registry describing the available session commands and their
/// parameter signatures.
///
/// Nodes live in a `BTreeMap` so help and completion output is stable.
pub struct Registry {
    nodes: BTreeMap<&'static str, Node>,
}

impl Registry {
    fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
        }
    }

    fn register(mut self, name: &'static str, node: Node) -> Self {
        self.nodes.insert(name, node);
        self
    }

    fn alias(self, alias: &'static str, target: &'static str) -> Self {
        self.register(alias, Node::Alias(target))
    }

    fn commands(&self) -> impl Iterator<Item = (&'static str, Option<&Signature>)> + '_ {
        self.nodes.iter().filter_map(|(name, node)| match node {
            Node::Command(_, signature) => Some((*name, Some(signature))),
            Node::HelpCommand => Some((*name, None)),
            Node::Alias(_) => None,
        })
    }

    #[must_use]
    /// Return the command spellings suitable for completion.
    pub fn completions(&self) -> Vec<String> {
        self.commands().map(|(name, _)| name.to_string()).collect()
    }

    #[must_use]
    /// Return human-friendly usage lines for every command, e.g.
    /// `pproperties [-v] <class or instance>`.
    pub fn usages(&self) -> Vec<String> {
        self.commands()
            .map(|(name, signature)| match signature {
                Some(signature) if !signature.to_string().is_empty() => {
                    format!("{name} {signature}")
                }
                _ => name.to_string(),
            })
            .collect()
    }

    fn details(name: &str, signature: &Signature) -> Vec<String> {
        let mut lines = vec![format!("{name} {signature}")];
        if !signature.help.is_empty() {
            lines.push(format!("    {}", signature.help));
        }
        for flag in signature.flags {
            lines.push(format!("    -{}, --{}: {}", flag.short, flag.long, flag.help));
        }
        lines
    }

    fn handle_command(
        handler: CommandFn,
        signature: &Signature,
        rest: &[&str],
        state: &mut State,
    ) -> Result<Status> {
        match signature.parse(rest) {
            Some(parsed) => {
                handler(&parsed, state)?;
                Ok(Status::Handled)
            }
            None => Ok(Status::NotHandled),
        }
    }

    fn handle_help(&self, first: &str, rest: &[&str], state: &mut State) -> Result<()> {
        let lines = match rest {
            [] => self.usages(),
            [name] => match self.resolve(name) {
                Some((name, Node::Command(_, signature))) => Self::details(name, signature),
                Some((name, _)) => vec![name.to_string()],
                None => {
                    let mut path = vec![Value::String(first)];
                    path.extend(rest.iter().map(|s| Value::String(s)));
                    return handler::do_unknown(&path, state);
                }
            },
            _ => {
                let mut path = vec![Value::String(first)];
                path.extend(rest.iter().map(|s| Value::String(s)));
                return handler::do_invalid_arguments(&path, state);
            }
        };

        let lines: Vec<Value> = lines.iter().map(|s| Value::String(s)).collect();
        handler::do_help(&lines, state)
    }

    // Exact name, alias target, or unique prefix.
    fn resolve(&self, name: &str) -> Option<(&'static str, &Node)> {
        if let Some((key, node)) = self.nodes.get_key_value(name) {
            return match node {
                Node::Alias(target) => self.nodes.get_key_value(target).map(|(k, n)| (*k, n)),
                node => Some((*key, node)),
            };
        }

        let mut matches = self.nodes.keys().filter(|k| k.starts_with(name));
        match (matches.next(), matches.next()) {
            (Some(key), None) => self.resolve(key),
            _ => None,
        }
    }

    fn is_ambiguous(&self, name: &str) -> bool {
        self.nodes.keys().filter(|k| k.starts_with(name)).count() > 1
    }

    fn dispatch(&self, args: &[&str], state: &mut State) -> Result<()> {
        let Some((first, rest)) = args.split_first() else {
            return handler::do_nothing(&[], state);
        };

        match self.resolve(first) {
            Some((name, Node::Command(f, signature))) => {
                if Self::handle_command(*f, signature, rest, state)? == Status::NotHandled {
                    let args = format!("{name}: {}", rest.join(" "));
                    handler::do_invalid_arguments(&[Value::String(&args)], state)?;
                }
                Ok(())
            }
            Some((_, Node::HelpCommand)) => self.handle_help(first, rest, state),
            Some((_, Node::Alias(_))) => handler::do_nothing(&[], state),
            None if self.is_ambiguous(first) => {
                handler::do_ambiguous(&[Value::String(first)], state)
            }
            None => {
                let mut path = vec![Value::String(first)];
                path.extend(rest.iter().map(|s| Value::String(s)));
                handler::do_unknown(&path, state)
            }
        }
    }

    /// Parse `input` and dispatch the corresponding command handler.
    ///
    /// # Errors
    ///
    /// Returns an error if the handler fails, e.g. on an invalid class or
    /// instance argument.
    pub fn run(&self, input: &str, state: &mut State) -> Result<()> {
        let args: Vec<&str> = input.split_whitespace().collect();
        self.dispatch(&args, state)
    }

    /// Run `input` and report a failure on the session error stream instead
    /// of propagating it, so one bad invocation does not end the session.
    ///
    /// # Errors
    ///
    /// Returns an error only if the report itself cannot be written.
    pub fn execute(&self, input: &str, state: &mut State) -> Result<()> {
        if let Err(e) = self.run(input, state) {
            writeln!(state.err(), "error: {}", e.message())?;
        }
        Ok(())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
            .register("help", Node::HelpCommand)
            .register(
                "pmethods",
                Node::Command(
                    handler::do_pmethods,
                    Signature {
                        flags: PMETHODS_FLAGS,
                        params: &[Type::Handle],
                        help: "Print the class and instance methods of a class.",
                    },
                ),
            )
            .register(
                "pproperties",
                Node::Command(
                    handler::do_pproperties,
                    Signature {
                        flags: PPROPERTIES_FLAGS,
                        params: &[Type::Handle],
                        help: "Print the properties of a class or instance.",
                    },
                ),
            )
            .register("quit", Node::Command(handler::do_quit, NO_PARAMS))
            .alias("q", "quit")
    }
}
