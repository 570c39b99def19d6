//! `docex formats` command implementation.

use console::Term;
use docex_export::EXPORTER_NAMES;

/// Print one exporter name per line to stdout.
pub(crate) fn list_formats() {
    let term = Term::stdout();
    for name in EXPORTER_NAMES {
        let _ = term.write_line(name);
    }
}
