use std::fmt;

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const FG_BLUE: &str = "\x1b[34m";
const FG_CYAN: &str = "\x1b[36m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";
const ICON_STEP: &str = "⏳";

enum Stream {
    Out,
    Err,
}

fn emit(stream: Stream, color: &str, icon: &str, msg: impl fmt::Display) {
    match stream {
        Stream::Out => println!("{color}{BOLD}{icon} {RESET}{msg}"),
        Stream::Err => eprintln!("{color}{BOLD}{icon} {RESET}{msg}"),
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    emit(Stream::Out, FG_BLUE, ICON_INFO, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    emit(Stream::Out, FG_GREEN, ICON_OK, msg);
}

/// Warnings and errors go to stderr.
pub fn warning<T: fmt::Display>(msg: T) {
    emit(Stream::Err, FG_YELLOW, ICON_WARN, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    emit(Stream::Err, FG_RED, ICON_ERR, msg);
}

/// Progress line for long loops, e.g. `[200/450] Processing batch`.
pub fn progress<T: fmt::Display>(done: usize, total: usize, msg: T) {
    emit(
        Stream::Out,
        FG_CYAN,
        ICON_STEP,
        format!("{DIM}[{done}/{total}]{RESET} {msg}"),
    );
}

/// Indented list entry under a previous message.
pub fn item<T: fmt::Display>(msg: T) {
    println!("   • {msg}");
}

/// Section header, printed once per pipeline run
pub fn header<T: fmt::Display>(msg: T) {
    println!("{FG_BLUE}{BOLD}====================== {msg}\n{RESET}");
}
