use crate::models::{ImportKind, Language};

/// Categorizes specifiers as local, builtin, or external.
///
/// The builtin name sets are fixed lists; a standard module missing from
/// them is reported as external.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportCategorizer;

impl ImportCategorizer {
    pub fn new() -> Self {
        Self
    }

    /// Categorize a specifier based on its surface form and language
    pub fn categorize(&self, specifier: &str, language: Language) -> ImportKind {
        // 1. Relative or rooted paths
        if is_local_specifier(specifier, language) {
            return ImportKind::Local;
        }

        // 2. Standard library, matched on the leading segment
        match language {
            Language::Python => {
                let base = specifier.split('.').next().unwrap_or(specifier);
                if PYTHON_STDLIB.contains(&base) {
                    return ImportKind::Builtin;
                }
            }
            Language::JavaScript | Language::TypeScript => {
                if specifier.starts_with("node:") {
                    return ImportKind::Builtin;
                }
                // Scoped packages (@scope/name) are never builtin
                if !specifier.starts_with('@') {
                    let base = specifier.split('/').next().unwrap_or(specifier);
                    if NODE_BUILTINS.contains(&base) {
                        return ImportKind::Builtin;
                    }
                }
            }
        }

        // 3. Everything else
        ImportKind::External
    }
}

/// Whether a specifier names a path inside the project
pub fn is_local_specifier(specifier: &str, language: Language) -> bool {
    match language {
        Language::Python => specifier.starts_with('.'),
        Language::JavaScript | Language::TypeScript => {
            specifier.starts_with('.') || specifier.starts_with('/')
        }
    }
}

/// Python standard library modules
const PYTHON_STDLIB: &[&str] = &[
    // Core
    "abc", "aifc", "argparse", "array", "ast", "asynchat", "asyncio",
    "asyncore", "atexit", "audioop", "base64", "bdb", "binascii",
    "binhex", "bisect", "builtins", "bz2",
    // C-Z
    "calendar", "cgi", "cgitb", "chunk", "cmath", "cmd", "code",
    "codecs", "codeop", "collections", "colorsys", "compileall",
    "concurrent", "configparser", "contextlib", "contextvars", "copy",
    "copyreg", "cProfile", "crypt", "csv", "ctypes", "curses",
    // D-E
    "dataclasses", "datetime", "dbm", "decimal", "difflib", "dis",
    "distutils", "doctest", "email", "encodings", "enum", "errno",
    // F-G
    "faulthandler", "fcntl", "filecmp", "fileinput", "fnmatch",
    "fractions", "ftplib", "functools", "gc", "getopt", "getpass",
    "gettext", "glob", "graphlib", "grp", "gzip",
    // H-I
    "hashlib", "heapq", "hmac", "html", "http", "idlelib", "imaplib",
    "imghdr", "imp", "importlib", "inspect", "io", "ipaddress",
    "itertools",
    // J-L
    "json", "keyword", "lib2to3", "linecache", "locale", "logging",
    "lzma",
    // M-N
    "mailbox", "mailcap", "marshal", "math", "mimetypes", "mmap",
    "modulefinder", "multiprocessing", "netrc", "nis", "nntplib",
    "numbers",
    // O-P
    "operator", "optparse", "os", "ossaudiodev", "pathlib", "pdb",
    "pickle", "pickletools", "pipes", "pkgutil", "platform", "plistlib",
    "poplib", "posix", "posixpath", "pprint", "profile", "pstats",
    "pty", "pwd", "py_compile", "pyclbr", "pydoc",
    // Q-R
    "queue", "quopri", "random", "re", "readline", "reprlib",
    "resource", "rlcompleter", "runpy",
    // S
    "sched", "secrets", "select", "selectors", "shelve", "shlex",
    "shutil", "signal", "site", "smtpd", "smtplib", "sndhdr",
    "socket", "socketserver", "spwd", "sqlite3", "ssl", "stat",
    "statistics", "string", "stringprep", "struct", "subprocess",
    "sunau", "symtable", "sys", "sysconfig", "syslog",
    // T
    "tabnanny", "tarfile", "telnetlib", "tempfile", "termios", "test",
    "textwrap", "threading", "time", "timeit", "tkinter", "token",
    "tokenize", "tomllib", "trace", "traceback", "tracemalloc", "tty",
    "turtle", "turtledemo", "types", "typing",
    // U-Z
    "unicodedata", "unittest", "urllib", "uu", "uuid", "venv",
    "warnings", "wave", "weakref", "webbrowser", "winreg", "winsound",
    "wsgiref", "xdrlib", "xml", "xmlrpc", "zipapp", "zipfile",
    "zipimport", "zlib", "zoneinfo",
    // Underscore prefixed
    "_thread", "__future__",
];

/// Node.js builtin modules
const NODE_BUILTINS: &[&str] = &[
    "assert", "async_hooks", "buffer", "child_process", "cluster",
    "console", "constants", "crypto", "dgram", "diagnostics_channel",
    "dns", "domain", "events", "fs", "http", "http2", "https",
    "inspector", "module", "net", "os", "path", "perf_hooks",
    "process", "punycode", "querystring", "readline", "repl",
    "stream", "string_decoder", "sys", "timers", "tls", "trace_events",
    "tty", "url", "util", "v8", "vm", "wasi", "worker_threads", "zlib",
];
