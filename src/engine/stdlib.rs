//! Standard-library knowledge: module docstrings and well-known members.

use super::SymbolKind;

/// A documented top-level member of a standard-library module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberDoc {
    pub module: &'static str,
    pub name: &'static str,
    pub kind: SymbolKind,
    pub doc: &'static str,
    /// Builtin type returned when the member is called.
    pub returns: Option<&'static str>,
}

/// Docstring of a standard-library module, by dotted name.
pub fn module_doc(name: &str) -> Option<&'static str> {
    let doc = match name {
        "abc" => "Abstract Base Classes (ABCs) according to PEP 3119.",
        "argparse" => "Command-line parsing library\n\nThis module is an optparse-inspired command-line parsing library that:\n\n    - handles both optional and positional arguments\n    - produces highly informative usage messages\n    - supports parsers that dispatch to sub-parsers",
        "array" => "This module defines an object type which can efficiently represent\nan array of basic values: characters, integers, floating-point\nnumbers.",
        "asyncio" => "The asyncio package, tracking PEP 3156.",
        "base64" => "Base16, Base32, Base64 (RFC 3548), Base85 and Ascii85 data encodings",
        "bisect" => "Bisection algorithms.",
        "calendar" => "Calendar printing functions",
        "codecs" => "codecs -- Python Codec Registry, API and helpers.",
        "collections" => "This module implements specialized container datatypes providing\nalternatives to Python's general purpose built-in containers, dict,\nlist, set, and tuple.",
        "collections.abc" => "Abstract Base Classes (ABCs) for collections, according to PEP 3119.",
        "contextlib" => "Utilities for with-statement contexts.  See PEP 343.",
        "copy" => "Generic (shallow and deep) copying operations.",
        "cProfile" => "Python interface for the 'lsprof' profiler.\n   Compatible with the 'profile' module.",
        "csv" => "CSV parsing and writing.",
        "dataclasses" => "Generate special methods on classes that follow the dataclass pattern.",
        "datetime" => "Fast implementation of the datetime type.",
        "decimal" => "Decimal fixed-point and floating-point arithmetic.",
        "difflib" => "Module difflib -- helpers for computing deltas between objects.",
        "email" => "A package for parsing, handling, and generating email messages.",
        "enum" => "Support for enumerations.",
        "fnmatch" => "Filename matching with shell patterns.",
        "fractions" => "Fraction, infinite-precision, rational numbers.",
        "functools" => "functools.py - Tools for working with functions and callable objects",
        "gc" => "This module provides access to the garbage collector for reference cycles.",
        "glob" => "Filename globbing utility.",
        "gzip" => "Functions that read and write gzipped files.",
        "hashlib" => "hashlib module - A common interface to many hash functions.",
        "heapq" => "Heap queue algorithm (a.k.a. priority queue).",
        "hmac" => "HMAC (Keyed-Hashing for Message Authentication) module.",
        "html" => "General functions for HTML manipulation.",
        "http" => "HTTP status codes and reason phrases.",
        "http.client" => "HTTP/1.1 client library",
        "importlib" => "A pure Python implementation of import.",
        "inspect" => "Get useful information from live Python objects.",
        "io" => "The io module provides the Python interfaces to stream handling.",
        "ipaddress" => "A fast, lightweight IPv4/IPv6 manipulation library in Python.",
        "itertools" => "Functional tools for creating and using iterators.",
        "json" => "JSON (JavaScript Object Notation) <https://json.org> is a subset of\nJavaScript syntax (ECMA-262 3rd edition) used as a lightweight data\ninterchange format.",
        "logging" => "Logging package for Python.",
        "math" => "This module provides access to the mathematical functions\ndefined by the C standard.",
        "multiprocessing" => "Process-based parallelism mirroring the threading API.",
        "operator" => "Operator interface.\n\nThis module exports a set of functions implemented in C corresponding\nto the intrinsic operators of Python.",
        "os" => "OS routines for NT or Posix depending on what system we're on.\n\nThis exports:\n  - all functions from posix or nt, e.g. unlink, stat, etc.\n  - os.path is either posixpath or ntpath\n  - os.name is either 'posix' or 'nt'",
        "os.path" => "Common operations on Posix pathnames.\n\nInstead of importing this module directly, import os and refer to\nthis module as os.path.",
        "pathlib" => "Object-oriented filesystem paths.",
        "pickle" => "Create portable serialized representations of Python objects.",
        "platform" => "This module tries to retrieve as much platform-identifying data as\npossible.",
        "pprint" => "Support to pretty-print lists, tuples, & dictionaries recursively.",
        "queue" => "A multi-producer, multi-consumer queue.",
        "random" => "Random variable generators.",
        "re" => "Support for regular expressions (RE).\n\nThis module provides regular expression matching operations similar to\nthose found in Perl.",
        "secrets" => "Generate cryptographically strong pseudo-random numbers suitable for\nmanaging secrets such as account authentication, tokens, and similar.",
        "shlex" => "A lexical analyzer class for simple shell-like syntaxes.",
        "shutil" => "Utility functions for copying and archiving files and directory trees.",
        "signal" => "This module provides mechanisms to use signal handlers in Python.",
        "socket" => "This module provides socket operations and some related functions.",
        "sqlite3" => "The sqlite3 extension module provides a DB-API 2.0 (PEP 249) compliant\ninterface to the SQLite library.",
        "statistics" => "Basic statistics module.",
        "string" => "A collection of string constants.",
        "struct" => "Functions to convert between Python values and C structs.",
        "subprocess" => "Subprocesses with accessible I/O streams\n\nThis module allows you to spawn processes, connect to their\ninput/output/error pipes, and obtain their return codes.",
        "sys" => "This module provides access to some objects used or maintained by the\ninterpreter and to functions that interact strongly with the interpreter.",
        "tempfile" => "Temporary files.",
        "textwrap" => "Text wrapping and filling.",
        "threading" => "Thread module emulating a subset of Java's threading model.",
        "time" => "This module provides various functions to manipulate time values.",
        "timeit" => "Tool for measuring execution time of small code snippets.",
        "traceback" => "Extract, format and print information about Python stack traces.",
        "types" => "Define names for built-in types that aren't directly accessible as a builtin.",
        "typing" => "The typing module: Support for gradual typing as defined by PEP 484 and subsequent PEPs.",
        "unittest" => "Python unit testing framework, based on Erich Gamma's JUnit and Kent Beck's\nSmalltalk testing framework (used with permission).",
        "urllib" => "",
        "urllib.parse" => "Parse (absolute and relative) URLs.",
        "urllib.request" => "An extensible library for opening URLs using a variety of protocols",
        "uuid" => "UUID objects (universally unique identifiers) according to RFC 4122.",
        "warnings" => "Python part of the warnings subsystem.",
        "weakref" => "Weak reference support for Python.",
        "xml" => "Core XML support for Python.",
        "zipfile" => "Read and write ZIP files.",
        "zlib" => "The functions in this module allow compression and decompression using the\nzlib library, which is based on GNU zip.",
        _ => return None,
    };
    Some(doc)
}

const fn function(
    module: &'static str,
    name: &'static str,
    doc: &'static str,
    returns: Option<&'static str>,
) -> MemberDoc {
    MemberDoc {
        module,
        name,
        kind: SymbolKind::Function,
        doc,
        returns,
    }
}

const fn class(module: &'static str, name: &'static str, doc: &'static str) -> MemberDoc {
    MemberDoc {
        module,
        name,
        kind: SymbolKind::Class,
        doc,
        returns: None,
    }
}

const fn instance(
    module: &'static str,
    name: &'static str,
    doc: &'static str,
    of: &'static str,
) -> MemberDoc {
    MemberDoc {
        module,
        name,
        kind: SymbolKind::Instance,
        doc,
        returns: Some(of),
    }
}

static MEMBERS: &[MemberDoc] = &[
    function("os", "getcwd", "getcwd()\n\nReturn a unicode string representing the current working directory.", Some("str")),
    function("os", "listdir", "listdir(path=None)\n\nReturn a list containing the names of the files in the directory.", Some("list")),
    function("os", "getenv", "getenv(key, default=None)\n\nGet an environment variable, return None if it doesn't exist.", None),
    function("os", "makedirs", "makedirs(name, mode=0o777, exist_ok=False)\n\nSuper-mkdir; create a leaf directory and all intermediate ones.", None),
    function("os", "remove", "remove(path, *, dir_fd=None)\n\nRemove a file (same as unlink()).", None),
    instance("os", "environ", "A mapping object representing the string environment.", "dict"),
    instance("os", "sep", "The character used by the operating system to separate pathname components.", "str"),
    function("os.path", "join", "join(a, *p)\n\nJoin two or more pathname components, inserting '/' as needed.", Some("str")),
    function("os.path", "exists", "exists(path)\n\nTest whether a path exists.  Returns False for broken symbolic links", Some("bool")),
    function("os.path", "basename", "basename(p)\n\nReturns the final component of a pathname", Some("str")),
    function("os.path", "dirname", "dirname(p)\n\nReturns the directory component of a pathname", Some("str")),
    instance("sys", "version", "Version information as a string.", "str"),
    instance("sys", "platform", "Platform identifier.", "str"),
    instance("sys", "argv", "Command line arguments passed to a Python script.", "list"),
    instance("sys", "path", "Module search path.", "list"),
    function("sys", "exit", "exit(status=None, /)\n\nExit the interpreter by raising SystemExit(status).", None),
    instance("math", "pi", "The mathematical constant pi = 3.141592...", "float"),
    instance("math", "e", "The mathematical constant e = 2.718281...", "float"),
    function("math", "sqrt", "sqrt(x, /)\n\nReturn the square root of x.", Some("float")),
    function("math", "floor", "floor(x, /)\n\nReturn the floor of x as an Integral.", Some("int")),
    function("math", "ceil", "ceil(x, /)\n\nReturn the ceiling of x as an Integral.", Some("int")),
    function("json", "dumps", "dumps(obj, *, skipkeys=False, ensure_ascii=True, check_circular=True, allow_nan=True, cls=None, indent=None, separators=None, default=None, sort_keys=False, **kw)\n\nSerialize ``obj`` to a JSON formatted ``str``.", Some("str")),
    function("json", "loads", "loads(s, *, cls=None, object_hook=None, parse_float=None, parse_int=None, parse_constant=None, object_pairs_hook=None, **kw)\n\nDeserialize ``s`` (a ``str``, ``bytes`` or ``bytearray`` instance\ncontaining a JSON document) to a Python object.", None),
    function("json", "dump", "dump(obj, fp, *, skipkeys=False, ensure_ascii=True, check_circular=True, allow_nan=True, cls=None, indent=None, separators=None, default=None, sort_keys=False, **kw)\n\nSerialize ``obj`` as a JSON formatted stream to ``fp``.", None),
    function("json", "load", "load(fp, *, cls=None, object_hook=None, parse_float=None, parse_int=None, parse_constant=None, object_pairs_hook=None, **kw)\n\nDeserialize ``fp`` to a Python object.", None),
    function("random", "randint", "randint(a, b)\n\nReturn random integer in range [a, b], including both end points.", Some("int")),
    function("random", "choice", "choice(seq)\n\nChoose a random element from a non-empty sequence.", None),
    function("random", "random", "random()\n\nrandom() -> x in the interval [0, 1).", Some("float")),
    function("re", "compile", "compile(pattern, flags=0)\n\nCompile a regular expression pattern, returning a Pattern object.", None),
    function("re", "match", "match(pattern, string, flags=0)\n\nTry to apply the pattern at the start of the string, returning\na Match object, or None if no match was found.", None),
    function("re", "sub", "sub(pattern, repl, string, count=0, flags=0)\n\nReturn the string obtained by replacing the leftmost\nnon-overlapping occurrences of the pattern in string by the\nreplacement repl.", Some("str")),
    class("collections", "Counter", "Counter(iterable=None, /, **kwds)\n\nDict subclass for counting hashable items.  Sometimes called a bag\nor multiset.  Elements are stored as dictionary keys and their counts\nare stored as dictionary values."),
    class("collections", "defaultdict", "defaultdict(default_factory=None, /, [...])\n\ndefaultdict(default_factory=None, /, [...]) --> dict with default factory"),
    class("collections", "OrderedDict", "OrderedDict(self, /, *args, **kwargs)\n\nDictionary that remembers insertion order"),
    class("collections", "deque", "deque([iterable[, maxlen]])\n\nA list-like sequence optimized for data accesses near its endpoints."),
    function("collections", "namedtuple", "namedtuple(typename, field_names, *, rename=False, defaults=None, module=None)\n\nReturns a new subclass of tuple with named fields.", None),
    class("pathlib", "Path", "Path(*args, **kwargs)\n\nPurePath subclass that can make system calls."),
    class("datetime", "datetime", "datetime(year, month, day[, hour[, minute[, second[, microsecond[,tzinfo]]]]])\n\nThe year, month and day arguments are required. tzinfo may be None, or an\ninstance of a tzinfo subclass. The remaining arguments may be ints."),
    class("datetime", "date", "date(year, month, day)\n\ndate(year, month, day) --> date object"),
    class("datetime", "timedelta", "timedelta(days=0, seconds=0, microseconds=0, milliseconds=0, minutes=0, hours=0, weeks=0)\n\nDifference between two datetime values."),
    function("functools", "reduce", "reduce(function, iterable[, initial], /)\n\nApply a function of two arguments cumulatively to the items of an iterable, from left to right.", None),
    function("functools", "partial", "partial(func, /, *args, **keywords)\n\nCreate a new function with partial application of the given arguments\nand keywords.", None),
    function("functools", "lru_cache", "lru_cache(maxsize=128, typed=False)\n\nLeast-recently-used cache decorator.", None),
    function("itertools", "chain", "chain(*iterables)\n\nReturn a chain object whose .__next__() method returns elements from the\nfirst iterable until it is exhausted, then elements from the next\niterable, until all of the iterables are exhausted.", None),
    function("time", "time", "time()\n\nReturn the current time in seconds since the Epoch.", Some("float")),
    function("time", "sleep", "sleep(seconds)\n\nDelay execution for a given number of seconds.", None),
    function("subprocess", "run", "run(*popenargs, input=None, capture_output=False, timeout=None, check=False, **kwargs)\n\nRun command with arguments and return a CompletedProcess instance.", None),
    class("typing", "Dict", "A generic version of dict."),
    class("typing", "List", "A generic version of list."),
    class("typing", "Optional", "Optional[X] is equivalent to Union[X, None]."),
    class("typing", "Any", "Special type indicating an unconstrained type."),
    class("enum", "Enum", "Enum(value, names=None, *, module=None, qualname=None, type=None, start=1, boundary=None)\n\nCreate a collection of name/value pairs."),
    function("dataclasses", "dataclass", "dataclass(cls=None, /, *, init=True, repr=True, eq=True, order=False, unsafe_hash=False, frozen=False, match_args=True, kw_only=False, slots=False, weakref_slot=False)\n\nAdd dunder methods based on the fields defined in the class.", None),
    function("logging", "getLogger", "getLogger(name=None)\n\nReturn a logger with the specified name, creating it if necessary.", None),
];

/// A documented member of a standard-library module.
pub fn member(module: &str, name: &str) -> Option<&'static MemberDoc> {
    MEMBERS
        .iter()
        .find(|m| m.module == module && m.name == name)
}
