use core::fmt;

/// Readable names for the single-character Objective-C type codes.
const PRIMITIVES: &[(u8, &str)] = &[
    (b'c', "char"),
    (b'i', "int"),
    (b's', "short"),
    (b'l', "long"),
    (b'q', "long long"),
    (b'C', "unsigned char"),
    (b'I', "unsigned int"),
    (b'S', "unsigned short"),
    (b'L', "unsigned long"),
    (b'Q', "unsigned long long"),
    (b'f', "float"),
    (b'd', "double"),
    (b'B', "bool"),
    (b'v', "void"),
    (b'*', "char *"),
    (b'#', "Class"),
    (b':', "SEL"),
];

// Method qualifiers that carry no type information (`r` is kept as const).
const QUALIFIERS: &[u8] = b"nNoORVAj";

fn primitive(code: u8) -> Option<&'static str> {
    PRIMITIVES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

#[derive(Debug, PartialEq)]
/// A parsed Objective-C type encoding.
pub enum Encoding {
    /// One of the fixed single-character codes.
    Primitive(&'static str),
    /// `@` or `@"ClassName"`.
    Object(Option<String>),
    /// `@?`, optionally followed by an extended `<...>` signature.
    Block,
    /// `^type`.
    Pointer(Box<Encoding>),
    /// `r` qualified type.
    Const(Box<Encoding>),
    /// `[Ntype]`.
    Array(usize, Box<Encoding>),
    /// `{name=...}`.
    Struct(String),
    /// `(name=...)`.
    Union(String),
    /// `bN`.
    Bitfield(usize),
    /// `?`, typically a function pointer target.
    Unknown,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Primitive(name) => write!(f, "{name}"),
            Encoding::Object(None) => write!(f, "id"),
            Encoding::Object(Some(name)) if name.starts_with('<') => {
                write!(f, "id{name}")
            }
            Encoding::Object(Some(name)) => write!(f, "{name} *"),
            Encoding::Block => write!(f, "block"),
            Encoding::Pointer(inner) => match inner.as_ref() {
                Encoding::Unknown => write!(f, "void *"),
                inner => {
                    let inner = inner.to_string();
                    if inner.ends_with('*') {
                        write!(f, "{inner}*")
                    } else {
                        write!(f, "{inner} *")
                    }
                }
            },
            Encoding::Const(inner) => write!(f, "const {inner}"),
            Encoding::Array(len, inner) => write!(f, "{inner}[{len}]"),
            Encoding::Struct(name) => write!(f, "{}", aggregate("struct", name)),
            Encoding::Union(name) => write!(f, "{}", aggregate("union", name)),
            Encoding::Bitfield(width) => write!(f, "bitfield({width})"),
            Encoding::Unknown => write!(f, "unknown"),
        }
    }
}

fn aggregate(kind: &str, name: &str) -> String {
    if name.is_empty() || name == "?" {
        format!("{kind} ?")
    } else {
        name.to_string()
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn number(&mut self) -> Option<usize> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        self.src[start..self.pos].parse().ok()
    }

    fn until(&mut self, stops: &[u8]) -> Option<&'a str> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if stops.contains(&c) {
                return Some(&self.src[start..self.pos]);
            }
            self.pos += 1;
        }
        None
    }

    // Skips up to and including the bracket closing an already consumed opener.
    fn skip_balanced(&mut self, close: u8) -> Option<()> {
        let mut stack = vec![close];
        while let Some(c) = self.bump() {
            match c {
                b'{' => stack.push(b'}'),
                b'(' => stack.push(b')'),
                b'[' => stack.push(b']'),
                b'<' => stack.push(b'>'),
                b'"' => {
                    self.until(b"\"")?;
                    self.bump();
                }
                c if Some(&c) == stack.last() => {
                    stack.pop();
                    if stack.is_empty() {
                        return Some(());
                    }
                }
                _ => {}
            }
        }
        None
    }

    fn aggregate(&mut self, close: u8) -> Option<String> {
        let name = self.until(&[b'=', close])?.to_string();
        if self.bump()? == b'=' {
            self.skip_balanced(close)?;
        }
        Some(name)
    }

    fn object(&mut self) -> Option<Encoding> {
        match self.peek() {
            Some(b'?') => {
                self.bump();
                if self.peek() == Some(b'<') {
                    self.bump();
                    self.skip_balanced(b'>')?;
                }
                Some(Encoding::Block)
            }
            Some(b'"') => {
                self.bump();
                let name = self.until(b"\"")?.to_string();
                self.bump();
                Some(Encoding::Object(if name.is_empty() {
                    None
                } else {
                    Some(name)
                }))
            }
            _ => Some(Encoding::Object(None)),
        }
    }

    fn parse(&mut self) -> Option<Encoding> {
        while self.peek().is_some_and(|c| QUALIFIERS.contains(&c)) {
            self.bump();
        }

        let c = self.bump()?;
        if let Some(name) = primitive(c) {
            return Some(Encoding::Primitive(name));
        }

        match c {
            b'@' => self.object(),
            b'^' => Some(Encoding::Pointer(Box::new(self.parse()?))),
            b'r' => Some(Encoding::Const(Box::new(self.parse()?))),
            b'[' => {
                let len = self.number()?;
                let inner = self.parse()?;
                (self.bump()? == b']').then(|| Encoding::Array(len, Box::new(inner)))
            }
            b'{' => self.aggregate(b'}').map(Encoding::Struct),
            b'(' => self.aggregate(b')').map(Encoding::Union),
            b'b' => self.number().map(Encoding::Bitfield),
            b'?' => Some(Encoding::Unknown),
            _ => None,
        }
    }
}

impl Encoding {
    #[must_use]
    /// Parse a complete type encoding.
    ///
    /// Trailing frame offsets (as found in raw method type encodings) are
    /// accepted and ignored; any other trailing data makes the parse fail.
    ///
    /// # Returns
    ///
    /// `Some(Encoding)` on success, `None` if `code` is not a type encoding
    /// this parser understands.
    pub fn parse(code: &str) -> Option<Self> {
        let mut parser = Parser::new(code);
        let encoding = parser.parse()?;
        parser
            .rest()
            .bytes()
            .all(|c| c.is_ascii_digit())
            .then_some(encoding)
    }
}

#[must_use]
/// Map a type encoding to a readable type name.
///
/// The documented single-character codes map to their C names (`i` is
/// `int`, `@` is `id`, `:` is `SEL`...). Composite encodings are rendered
/// in a C-like form. Anything that cannot be parsed is returned verbatim.
pub fn decode(code: &str) -> String {
    Encoding::parse(code).map_or_else(|| code.to_string(), |e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_documented_codes() {
        let expected = [
            ("c", "char"),
            ("i", "int"),
            ("s", "short"),
            ("l", "long"),
            ("q", "long long"),
            ("C", "unsigned char"),
            ("I", "unsigned int"),
            ("S", "unsigned short"),
            ("L", "unsigned long"),
            ("Q", "unsigned long long"),
            ("f", "float"),
            ("d", "double"),
            ("B", "bool"),
            ("v", "void"),
            ("*", "char *"),
            ("@", "id"),
            ("#", "Class"),
            (":", "SEL"),
        ];

        for (code, name) in expected {
            assert_eq!(decode(code), name, "code {code}");
        }
    }

    #[test]
    fn test_decode_unknown_is_verbatim() {
        assert_eq!(decode("Z"), "Z");
        assert_eq!(decode(""), "");
        assert_eq!(decode("{broken"), "{broken");
        assert_eq!(decode("ix"), "ix");
    }

    #[test]
    fn test_decode_objects_and_blocks() {
        assert_eq!(decode("@\"NSString\""), "NSString *");
        assert_eq!(decode("@\"<NSCopying>\""), "id<NSCopying>");
        assert_eq!(decode("@?"), "block");
        assert_eq!(decode("@?<v@?@>"), "block");
    }

    #[test]
    fn test_decode_pointers_and_qualifiers() {
        assert_eq!(decode("^i"), "int *");
        assert_eq!(decode("^^{CGPoint=dd}"), "CGPoint **");
        assert_eq!(decode("^?"), "void *");
        assert_eq!(decode("r*"), "const char *");
        assert_eq!(decode("Vv"), "void");
        assert_eq!(decode("No@"), "id");
    }

    #[test]
    fn test_decode_aggregates() {
        assert_eq!(
            decode("{CGRect={CGPoint=dd}{CGSize=dd}}"),
            "CGRect"
        );
        assert_eq!(decode("{?=ii}"), "struct ?");
        assert_eq!(decode("(?=iQ)"), "union ?");
        assert_eq!(decode("{__CFString=}"), "__CFString");
        assert_eq!(decode("{Named=\"a\"@\"NSArray\"}"), "Named");
        assert_eq!(decode("[4i]"), "int[4]");
        assert_eq!(decode("b3"), "bitfield(3)");
    }

    #[test]
    fn test_decode_ignores_frame_offsets() {
        assert_eq!(decode("v16"), "void");
        assert_eq!(Encoding::parse("@24"), Some(Encoding::Object(None)));
    }
}
