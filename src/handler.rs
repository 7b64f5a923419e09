use std::io::Write;

use crate::{
    diag::{Error, Result},
    host,
    param::{Args, Join, Value},
    session::{Execution, State},
};

/// Type of a command handler function.
///
/// A `CommandFn` is a function that receives the parsed argument list and
/// a mutable reference to the current session `State` and returns a
/// `Result` indicating success or failure.
pub type CommandFn = fn(&[Value], &mut State) -> Result<()>;

fn exit_with(args: &[Value], state: &mut State, f: CommandFn) -> Result<()> {
    f(args, state)?;
    state.set_execution(Execution::Exit);
    Ok(())
}

fn proceed_with(args: &[Value], state: &mut State, f: CommandFn) -> Result<()> {
    f(args, state)?;
    state.set_execution(Execution::Run);
    Ok(())
}

fn print_methods(
    state: &mut State,
    class: &str,
    prefix: char,
    show_addr: bool,
) -> Result<()> {
    for method in host::methods(state.host(), class)? {
        writeln!(state.out(), "{}", method.line(prefix, show_addr))?;
    }
    Ok(())
}

/// Handler for ambiguous commands (user input matches multiple commands).
///
/// # Errors
///
/// Returns an error if writing the diagnostic fails.
pub fn do_ambiguous(args: &[Value], state: &mut State) -> Result<()> {
    proceed_with(args, state, |args, state| {
        writeln!(state.err(), "{}: ambiguous command", args.joined(" "))?;
        Ok(())
    })
}

/// Print help text for available commands.
///
/// Accepts a list of strings to print, one per line.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn do_help(args: &[Value], state: &mut State) -> Result<()> {
    proceed_with(args, state, |args, state| {
        writeln!(state.out(), "{}", args.joined("\n"))?;
        Ok(())
    })
}

/// Handler for invalid argument errors.
///
/// # Errors
///
/// Returns an error if writing the diagnostic fails.
pub fn do_invalid_arguments(args: &[Value], state: &mut State) -> Result<()> {
    proceed_with(args, state, |args, state| {
        writeln!(state.err(), "{}: invalid arguments", args.joined(" "))?;
        Ok(())
    })
}

/// A no-op handler.
///
/// # Errors
///
/// Never returns an error.
pub fn do_nothing(args: &[Value], state: &mut State) -> Result<()> {
    proceed_with(args, state, |_, _| Ok(()))
}

/// Print the class and/or instance methods of a class or instance.
///
/// Flags: `-c` class methods, `-i` instance methods (both when neither is
/// given, class methods first), `-a` appends implementation addresses.
///
/// # Errors
///
/// Returns the invalid-argument error if the argument is neither a class
/// nor an instance, or any error from the host.
pub fn do_pmethods(args: &[Value], state: &mut State) -> Result<()> {
    proceed_with(args, state, |args, state| {
        let handle = args.handle().ok_or_else(Error::invalid_argument)?;
        let class = host::resolve_class(state.host(), handle)?;
        let show_addr = args.has_flag('a');
        let (class_methods, instance_methods) =
            match (args.has_flag('c'), args.has_flag('i')) {
                (false, false) => (true, true),
                flags => flags,
            };

        if class_methods {
            let meta = state
                .host()
                .object_get_class(&class)?
                .ok_or_else(Error::invalid_argument)?;
            writeln!(state.out(), "Class Methods:")?;
            print_methods(state, &meta, '+', show_addr)?;
        }

        if instance_methods {
            if class_methods {
                writeln!(state.out())?;
            }
            writeln!(state.out(), "Instance Methods:")?;
            print_methods(state, &class, '-', show_addr)?;
        }

        Ok(())
    })
}

/// Print the declared properties of a class or instance.
///
/// With `-v` and an instance argument, each line ends with the current
/// value of the property.
///
/// # Errors
///
/// Returns the invalid-argument error if the argument is neither a class
/// nor an instance, or any error from the host.
pub fn do_pproperties(args: &[Value], state: &mut State) -> Result<()> {
    proceed_with(args, state, |args, state| {
        let handle = args.handle().ok_or_else(Error::invalid_argument)?;
        let target = state.host();
        let class = host::resolve_class(target, handle)?;
        let object = (args.has_flag('v') && !host::is_class_object(target, handle)?)
            .then_some(handle);

        for prop in host::properties(target, &class)? {
            let value = match object {
                Some(object) => host::value(target, object, prop.name())?,
                None => None,
            };
            writeln!(state.out(), "{}", prop.line(value.as_deref()))?;
        }

        Ok(())
    })
}

/// Leave the session.
///
/// # Errors
///
/// Never returns an error.
pub fn do_quit(args: &[Value], state: &mut State) -> Result<()> {
    exit_with(args, state, |_, _| Ok(()))
}

/// Handler for completely unknown commands.
///
/// # Errors
///
/// Returns an error if writing the diagnostic fails.
pub fn do_unknown(args: &[Value], state: &mut State) -> Result<()> {
    proceed_with(args, state, |args, state| {
        writeln!(state.err(), "{}: unknown command", args.joined(" "))?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::snapshot::Snapshot;

    const DOC: &str = r#"{
        "classes": {
            "NSObject": {
                "class_methods": [{
                    "name": "new",
                    "type_encoding": "@16@0:8",
                    "parameters_type": ["@", ":"],
                    "return_type": "@",
                    "implementation": 16
                }]
            },
            "Widget": {
                "superclass": "NSObject",
                "class_methods": [{
                    "name": "widgetWithName:",
                    "type_encoding": "@24@0:8@16",
                    "parameters_type": ["@", ":", "@"],
                    "return_type": "@",
                    "implementation": 32
                }],
                "instance_methods": [{
                    "name": "doSomething:withArg:",
                    "type_encoding": "v32@0:8@16i24",
                    "parameters_type": ["@", ":", "@", "i"],
                    "return_type": "v",
                    "implementation": 48
                }],
                "properties": [{
                    "name": "name",
                    "attributes_string": "T@,R,N",
                    "attributes": { "T": "@", "N": "", "R": "" }
                }]
            }
        },
        "objects": {
            "0xcafe": { "class": "Widget", "values": { "name": "gizmo" } }
        }
    }"#;

    fn run(f: CommandFn, args: &[Value]) -> (Result<()>, String, String) {
        let host = Snapshot::parse(DOC).expect("snapshot");
        let mut out = Vec::new();
        let mut err = Vec::new();
        let res = {
            let mut state = State::new(&host, &mut out, &mut err);
            f(args, &mut state)
        };
        (
            res,
            String::from_utf8(out).expect("utf8"),
            String::from_utf8(err).expect("utf8"),
        )
    }

    fn handle(h: &str) -> Value<'static> {
        Value::Handle(h.to_string())
    }

    #[test]
    fn test_pmethods_both_sections() {
        let (res, out, _) = run(do_pmethods, &[handle("Widget")]);
        assert!(res.is_ok());
        assert_eq!(
            out,
            "Class Methods:\n\
             + (id) widgetWithName:(id)arg0\n\
             \n\
             Instance Methods:\n\
             - (void) doSomething:(id)arg0 withArg:(int)arg1\n"
        );
    }

    #[test]
    fn test_pmethods_instance_only_with_address() {
        let (res, out, _) =
            run(do_pmethods, &[Value::Flag('i'), Value::Flag('a'), handle("0xcafe")]);
        assert!(res.is_ok());
        assert_eq!(
            out,
            "Instance Methods:\n- (void) doSomething:(id)arg0 withArg:(int)arg1 0x30\n"
        );
    }

    #[test]
    fn test_pmethods_class_only() {
        let (res, out, _) = run(do_pmethods, &[Value::Flag('c'), handle("Widget")]);
        assert!(res.is_ok());
        assert_eq!(out, "Class Methods:\n+ (id) widgetWithName:(id)arg0\n");
    }

    #[test]
    fn test_pmethods_invalid_argument() {
        let (res, out, _) = run(do_pmethods, &[handle("0xdead")]);
        let err = res.expect_err("invalid argument");
        assert!(err.message().contains("Please specify an instance or a Class."));
        assert!(out.is_empty());
    }

    #[test]
    fn test_pproperties() {
        let (res, out, _) = run(do_pproperties, &[handle("Widget")]);
        assert!(res.is_ok());
        assert_eq!(out, "@property (nonatomic, assign, readonly) id name\n");
    }

    #[test]
    fn test_pproperties_values() {
        let (res, out, _) = run(do_pproperties, &[Value::Flag('v'), handle("0xcafe")]);
        assert!(res.is_ok());
        assert_eq!(out, "@property (nonatomic, assign, readonly) id name = gizmo\n");

        // A class has no values to show.
        let (res, out, _) = run(do_pproperties, &[Value::Flag('v'), handle("Widget")]);
        assert!(res.is_ok());
        assert_eq!(out, "@property (nonatomic, assign, readonly) id name\n");
    }

    #[test]
    fn test_diagnostics_go_to_err() {
        let (res, out, err) = run(do_unknown, &[Value::String("frob")]);
        assert!(res.is_ok());
        assert!(out.is_empty());
        assert_eq!(err, "frob: unknown command\n");

        let (_, _, err) = run(do_ambiguous, &[Value::String("p")]);
        assert_eq!(err, "p: ambiguous command\n");

        let (_, _, err) = run(do_invalid_arguments, &[Value::String("pmethods: -z")]);
        assert_eq!(err, "pmethods: -z: invalid arguments\n");
    }

    #[test]
    fn test_quit_sets_exit() {
        let host = Snapshot::default();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut state = State::new(&host, &mut out, &mut err);
        do_quit(&[], &mut state).expect("quit");
        assert_eq!(*state.execution(), Execution::Exit);
        do_nothing(&[], &mut state).expect("nothing");
        assert_eq!(*state.execution(), Execution::Run);
    }
}
