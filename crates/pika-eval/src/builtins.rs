//! Builtin functions: `len`, `first`, `last`, `rest`, `push`, `print`.
//!
//! Builtins never mutate their arguments. Anything array-shaped they return
//! is a fresh array.

use std::io::Write;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::object::{Builtin, Object, ObjectType};

type BuiltinResult = Result<Rc<Object>, RuntimeError>;

/// Every builtin, in lookup order.
pub const BUILTINS: &[Builtin] = &[
    Builtin { name: "len", func: len },
    Builtin { name: "first", func: first },
    Builtin { name: "last", func: last },
    Builtin { name: "rest", func: rest },
    Builtin { name: "push", func: push },
    Builtin { name: "print", func: print },
];

/// Find the builtin bound to `name`.
pub fn lookup(name: &str) -> Option<Builtin> {
    BUILTINS.iter().find(|builtin| builtin.name == name).copied()
}

fn check_arity(args: &[Rc<Object>], want: usize) -> Result<(), RuntimeError> {
    if args.len() == want {
        Ok(())
    } else {
        Err(RuntimeError::WrongArgumentCount {
            got: args.len(),
            want,
        })
    }
}

/// The single array argument of `builtin`.
fn array_arg<'a>(
    args: &'a [Rc<Object>],
    builtin: &'static str,
) -> Result<&'a [Rc<Object>], RuntimeError> {
    check_arity(args, 1)?;
    match args[0].as_ref() {
        Object::Array(elements) => Ok(elements.as_slice()),
        other => Err(RuntimeError::InvalidArgument {
            builtin,
            expected: ObjectType::Array,
            got: other.object_type(),
        }),
    }
}

fn integer(n: usize) -> Rc<Object> {
    Rc::new(Object::Integer(i64::try_from(n).unwrap_or(i64::MAX)))
}

fn len(args: &[Rc<Object>], _out: &mut dyn Write) -> BuiltinResult {
    check_arity(args, 1)?;
    match args[0].as_ref() {
        Object::String(s) => Ok(integer(s.len())),
        Object::Array(elements) => Ok(integer(elements.len())),
        other => Err(RuntimeError::UnsupportedArgument {
            builtin: "len",
            got: other.object_type(),
        }),
    }
}

fn first(args: &[Rc<Object>], _out: &mut dyn Write) -> BuiltinResult {
    let elements = array_arg(args, "first")?;
    Ok(elements.first().cloned().unwrap_or_else(Object::null))
}

fn last(args: &[Rc<Object>], _out: &mut dyn Write) -> BuiltinResult {
    let elements = array_arg(args, "last")?;
    Ok(elements.last().cloned().unwrap_or_else(Object::null))
}

fn rest(args: &[Rc<Object>], _out: &mut dyn Write) -> BuiltinResult {
    match array_arg(args, "rest")? {
        [] => Ok(Object::null()),
        [_, tail @ ..] => Ok(Rc::new(Object::Array(tail.to_vec()))),
    }
}

fn push(args: &[Rc<Object>], _out: &mut dyn Write) -> BuiltinResult {
    check_arity(args, 2)?;
    match args[0].as_ref() {
        Object::Array(elements) => {
            let mut extended = Vec::with_capacity(elements.len() + 1);
            extended.extend(elements.iter().cloned());
            extended.push(Rc::clone(&args[1]));
            Ok(Rc::new(Object::Array(extended)))
        }
        other => Err(RuntimeError::InvalidFirstArgument {
            builtin: "push",
            expected: ObjectType::Array,
            got: other.object_type(),
        }),
    }
}

fn print(args: &[Rc<Object>], out: &mut dyn Write) -> BuiltinResult {
    for arg in args {
        writeln!(out, "{arg}").map_err(|e| RuntimeError::Output(e.to_string()))?;
    }
    Ok(Object::null())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: &[Rc<Object>]) -> BuiltinResult {
        let builtin = lookup(name).unwrap();
        (builtin.func)(args, &mut std::io::sink())
    }

    fn int(n: i64) -> Rc<Object> {
        Rc::new(Object::Integer(n))
    }

    fn array(values: &[i64]) -> Rc<Object> {
        Rc::new(Object::Array(values.iter().map(|n| int(*n)).collect()))
    }

    #[test]
    fn test_lookup() {
        for builtin in BUILTINS {
            assert_eq!(lookup(builtin.name), Some(*builtin));
        }
        assert_eq!(lookup("map"), None);
    }

    #[test]
    fn test_len() {
        assert_eq!(call("len", &[Rc::new(Object::String("four".into()))]), Ok(int(4)));
        assert_eq!(call("len", &[Rc::new(Object::String("é".into()))]), Ok(int(2)));
        assert_eq!(call("len", &[array(&[1, 2, 3])]), Ok(int(3)));
        assert_eq!(
            call("len", &[int(1)]),
            Err(RuntimeError::UnsupportedArgument {
                builtin: "len",
                got: ObjectType::Integer
            })
        );
        assert_eq!(
            call("len", &[]),
            Err(RuntimeError::WrongArgumentCount { got: 0, want: 1 })
        );
    }

    #[test]
    fn test_first_last_rest() {
        assert_eq!(call("first", &[array(&[1, 2, 3])]), Ok(int(1)));
        assert_eq!(call("last", &[array(&[1, 2, 3])]), Ok(int(3)));
        assert_eq!(call("rest", &[array(&[1, 2, 3])]), Ok(array(&[2, 3])));
        assert_eq!(call("rest", &[array(&[1])]), Ok(array(&[])));

        for name in ["first", "last", "rest"] {
            assert!(Rc::ptr_eq(&call(name, &[array(&[])]).unwrap(), &Object::null()));
        }
    }

    #[test]
    fn test_push_leaves_source_untouched() {
        let source = array(&[1]);
        let pushed = call("push", &[Rc::clone(&source), int(2)]).unwrap();
        assert_eq!(pushed, array(&[1, 2]));
        assert_eq!(source, array(&[1]));
    }

    #[test]
    fn test_print_writes_lines() {
        let mut out = Vec::new();
        let result = print(&[int(1), Rc::new(Object::String("hi".into()))], &mut out).unwrap();
        assert!(Rc::ptr_eq(&result, &Object::null()));
        assert_eq!(String::from_utf8(out).unwrap(), "1\nhi\n");
    }
}
