//! The `builtins` namespace: functions, types and a few common methods.

/// Whether a builtin is callable code or a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinKind {
    Function,
    Class,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinDoc {
    pub name: &'static str,
    pub kind: BuiltinKind,
    pub doc: &'static str,
    /// Builtin type a call returns, for functions.
    pub returns: Option<&'static str>,
}

/// A method on a builtin type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodDoc {
    pub owner: &'static str,
    pub name: &'static str,
    pub doc: &'static str,
    pub returns: Option<&'static str>,
}

const fn func(name: &'static str, doc: &'static str, returns: Option<&'static str>) -> BuiltinDoc {
    BuiltinDoc {
        name,
        kind: BuiltinKind::Function,
        doc,
        returns,
    }
}

const fn class(name: &'static str, doc: &'static str) -> BuiltinDoc {
    BuiltinDoc {
        name,
        kind: BuiltinKind::Class,
        doc,
        returns: None,
    }
}

static BUILTINS: &[BuiltinDoc] = &[
    func("abs", "abs(x, /)\n\nReturn the absolute value of the argument.", None),
    func("all", "all(iterable, /)\n\nReturn True if bool(x) is True for all values x in the iterable.\n\nIf the iterable is empty, return True.", Some("bool")),
    func("any", "any(iterable, /)\n\nReturn True if bool(x) is True for any x in the iterable.\n\nIf the iterable is empty, return False.", Some("bool")),
    func("callable", "callable(obj, /)\n\nReturn whether the object is callable (i.e., some kind of function).", Some("bool")),
    func("chr", "chr(i, /)\n\nReturn a Unicode string of one character with ordinal i; 0 <= i <= 0x10ffff.", Some("str")),
    func("dir", "dir([object]) -> list of strings\n\nIf called without an argument, return the names in the current scope.", Some("list")),
    func("divmod", "divmod(x, y, /)\n\nReturn the tuple (x//y, x%y).  Invariant: div*y + mod == x.", Some("tuple")),
    func("format", "format(value, format_spec='', /)\n\nReturn type(value).__format__(value, format_spec)", Some("str")),
    func("getattr", "getattr(object, name[, default]) -> value\n\nGet a named attribute from an object; getattr(x, 'y') is equivalent to x.y.", None),
    func("hasattr", "hasattr(obj, name, /)\n\nReturn whether the object has an attribute with the given name.", Some("bool")),
    func("hash", "hash(obj, /)\n\nReturn the hash value for the given object.", Some("int")),
    func("id", "id(obj, /)\n\nReturn the identity of an object.", Some("int")),
    func("input", "input(prompt='', /)\n\nRead a string from standard input.  The trailing newline is stripped.", Some("str")),
    func("isinstance", "isinstance(obj, class_or_tuple, /)\n\nReturn whether an object is an instance of a class or of a subclass thereof.", Some("bool")),
    func("issubclass", "issubclass(cls, class_or_tuple, /)\n\nReturn whether 'cls' is derived from another class or is the same class.", Some("bool")),
    func("iter", "iter(iterable) -> iterator\niter(callable, sentinel) -> iterator\n\nGet an iterator from an object.", None),
    func("len", "len(obj, /)\n\nReturn the number of items in a container.", Some("int")),
    func("max", "max(iterable, *[, default=obj, key=func]) -> value\nmax(arg1, arg2, *args, *[, key=func]) -> value\n\nWith a single iterable argument, return its biggest item.", None),
    func("min", "min(iterable, *[, default=obj, key=func]) -> value\nmin(arg1, arg2, *args, *[, key=func]) -> value\n\nWith a single iterable argument, return its smallest item.", None),
    func("next", "next(iterator[, default])\n\nReturn the next item from the iterator.", None),
    func("open", "open(file, mode='r', buffering=-1, encoding=None, errors=None, newline=None, closefd=True, opener=None)\n\nOpen file and return a stream.  Raise OSError upon failure.", None),
    func("ord", "ord(c, /)\n\nReturn the Unicode code point for a one-character string.", Some("int")),
    func("print", "print(*args, sep=' ', end='\\n', file=None, flush=False)\n\nPrints the values to a stream, or to sys.stdout by default.", Some("NoneType")),
    func("repr", "repr(obj, /)\n\nReturn the canonical string representation of the object.", Some("str")),
    func("round", "round(number, ndigits=None)\n\nRound a number to a given precision in decimal digits.", None),
    func("sorted", "sorted(iterable, /, *, key=None, reverse=False)\n\nReturn a new list containing all items from the iterable in ascending order.", Some("list")),
    func("sum", "sum(iterable, /, start=0)\n\nReturn the sum of a 'start' value (default: 0) plus an iterable of numbers", None),
    func("vars", "vars([object]) -> dictionary\n\nWithout arguments, equivalent to locals().", Some("dict")),
    class("bool", "bool(x) -> bool\n\nReturns True when the argument x is true, False otherwise."),
    class("bytes", "bytes(iterable_of_ints) -> bytes\nbytes(string, encoding[, errors]) -> bytes\n\nConstruct an immutable array of bytes."),
    class("complex", "complex(real=0, imag=0)\n\nCreate a complex number from a real part and an optional imaginary part."),
    class("dict", "dict() -> new empty dictionary\ndict(mapping) -> new dictionary initialized from a mapping object's\n    (key, value) pairs"),
    class("enumerate", "enumerate(iterable, start=0)\n\nReturn an enumerate object."),
    class("filter", "filter(function or None, iterable) --> filter object\n\nReturn an iterator yielding those items of iterable for which function(item)\nis true."),
    class("float", "float(x=0, /)\n\nConvert a string or number to a floating point number, if possible."),
    class("frozenset", "frozenset() -> empty frozenset object\nfrozenset(iterable) -> frozenset object\n\nBuild an immutable unordered collection of unique elements."),
    class("int", "int([x]) -> integer\nint(x, base=10) -> integer\n\nConvert a number or string to an integer, or return 0 if no arguments\nare given."),
    class("list", "list(iterable=(), /)\n\nBuilt-in mutable sequence.\n\nIf no argument is given, the constructor creates a new empty list."),
    class("map", "map(func, *iterables) --> map object\n\nMake an iterator that computes the function using arguments from\neach of the iterables."),
    class("NoneType", "The type of the None singleton."),
    class("object", "object()\n\nThe base class of the class hierarchy."),
    class("property", "property(fget=None, fset=None, fdel=None, doc=None)\n\nProperty attribute."),
    class("range", "range(stop) -> range object\nrange(start, stop[, step]) -> range object\n\nReturn an object that produces a sequence of integers from start (inclusive)\nto stop (exclusive) by step."),
    class("set", "set() -> new empty set object\nset(iterable) -> new set object\n\nBuild an unordered collection of unique elements."),
    class("str", "str(object='') -> str\nstr(bytes_or_buffer[, encoding[, errors]]) -> str\n\nCreate a new string object from the given object."),
    class("super", "super() -> same as super(__class__, <first argument>)\nsuper(type) -> unbound super object"),
    class("tuple", "tuple(iterable=(), /)\n\nBuilt-in immutable sequence.\n\nIf no argument is given, the constructor returns an empty tuple."),
    class("type", "type(object) -> the object's type\ntype(name, bases, dict, **kwds) -> a new type"),
    class("zip", "zip(*iterables, strict=False)\n\nThe zip object yields n-length tuples, where n is the number of iterables\npassed as positional arguments to zip()."),
    class("BaseException", "Common base class for all exceptions"),
    class("Exception", "Common base class for all non-exit exceptions."),
    class("AttributeError", "Attribute not found."),
    class("FileNotFoundError", "File not found."),
    class("ImportError", "Import can't find module, or can't find name in module."),
    class("IndexError", "Sequence index out of range."),
    class("KeyError", "Mapping key not found."),
    class("NotImplementedError", "Method or function hasn't been implemented yet."),
    class("OSError", "Base class for I/O related errors."),
    class("RuntimeError", "Unspecified run-time error."),
    class("StopIteration", "Signal the end from iterator.__next__()."),
    class("TypeError", "Inappropriate argument type."),
    class("ValueError", "Inappropriate argument value (of correct type)."),
    class("ZeroDivisionError", "Second argument to a division or modulo operation was zero."),
];

static METHODS: &[MethodDoc] = &[
    MethodDoc { owner: "str", name: "upper", doc: "upper(self, /)\n\nReturn a copy of the string converted to uppercase.", returns: Some("str") },
    MethodDoc { owner: "str", name: "lower", doc: "lower(self, /)\n\nReturn a copy of the string converted to lowercase.", returns: Some("str") },
    MethodDoc { owner: "str", name: "strip", doc: "strip(self, chars=None, /)\n\nReturn a copy of the string with leading and trailing whitespace removed.", returns: Some("str") },
    MethodDoc { owner: "str", name: "split", doc: "split(self, /, sep=None, maxsplit=-1)\n\nReturn a list of the substrings in the string, using sep as the separator string.", returns: Some("list") },
    MethodDoc { owner: "str", name: "join", doc: "join(self, iterable, /)\n\nConcatenate any number of strings.", returns: Some("str") },
    MethodDoc { owner: "str", name: "format", doc: "format(self, /, *args, **kwargs)\n\nReturn a formatted version of the string, using substitutions from args and kwargs.", returns: Some("str") },
    MethodDoc { owner: "str", name: "startswith", doc: "startswith(self, prefix[, start[, end]], /)\n\nReturn True if the string starts with the specified prefix, False otherwise.", returns: Some("bool") },
    MethodDoc { owner: "str", name: "replace", doc: "replace(self, old, new, /, count=-1)\n\nReturn a copy with all occurrences of substring old replaced by new.", returns: Some("str") },
    MethodDoc { owner: "list", name: "append", doc: "append(self, object, /)\n\nAppend object to the end of the list.", returns: Some("NoneType") },
    MethodDoc { owner: "list", name: "extend", doc: "extend(self, iterable, /)\n\nExtend list by appending elements from the iterable.", returns: Some("NoneType") },
    MethodDoc { owner: "list", name: "pop", doc: "pop(self, index=-1, /)\n\nRemove and return item at index (default last).", returns: None },
    MethodDoc { owner: "list", name: "sort", doc: "sort(self, /, *, key=None, reverse=False)\n\nSort the list in ascending order and return None.", returns: Some("NoneType") },
    MethodDoc { owner: "dict", name: "get", doc: "get(self, key, default=None, /)\n\nReturn the value for key if key is in the dictionary, else default.", returns: None },
    MethodDoc { owner: "dict", name: "items", doc: "items(self, /)\n\nReturn a set-like object providing a view on the dict's items.", returns: None },
    MethodDoc { owner: "dict", name: "keys", doc: "keys(self, /)\n\nReturn a set-like object providing a view on the dict's keys.", returns: None },
    MethodDoc { owner: "dict", name: "values", doc: "values(self, /)\n\nReturn an object providing a view on the dict's values.", returns: None },
];

/// Look up a name in the builtins namespace.
pub fn lookup(name: &str) -> Option<&'static BuiltinDoc> {
    BUILTINS.iter().find(|b| b.name == name)
}

/// Look up a method defined on a builtin type.
pub fn method(owner: &str, name: &str) -> Option<&'static MethodDoc> {
    METHODS
        .iter()
        .find(|m| m.owner == owner && m.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn functions_and_types() {
        let len = lookup("len").unwrap();
        assert_eq!(len.kind, BuiltinKind::Function);
        assert_eq!(len.returns, Some("int"));
        assert_eq!(lookup("int").unwrap().kind, BuiltinKind::Class);
        assert!(lookup("numpy").is_none());
    }

    #[test]
    fn return_types_are_builtin_classes() {
        for b in BUILTINS.iter().filter_map(|b| b.returns) {
            assert_eq!(lookup(b).map(|d| d.kind), Some(BuiltinKind::Class), "{b}");
        }
        for m in METHODS {
            assert_eq!(lookup(m.owner).map(|d| d.kind), Some(BuiltinKind::Class));
        }
    }

    #[test]
    fn methods() {
        assert!(method("str", "upper").is_some());
        assert!(method("list", "upper").is_none());
    }
}
