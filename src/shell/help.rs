//! The built-in `help` command.

use super::output::{OutputMux, LINE_BREAK};
use super::registry::Registry;
use crate::io::Write;
use crate::token;

/// Run `help` with the tokenized argument blob of the submitted line.
///
/// No argument lists every binding in registry order; one argument prints the
/// help of that binding; anything more is an arity error.
pub(crate) fn execute<W: Write, const N: usize>(
    registry: &Registry<'_, N>,
    args: &[u8],
    out: &mut OutputMux<'_, '_, W>,
) {
    match token::get_token_count(args) {
        0 => list(registry, out),
        1 => {
            if let Some(name) = token::get_token(args, 0) {
                describe(registry, name, out);
            }
        }
        _ => {
            out.write_str("Command \"help\" receives one or zero arguments");
            out.write_str(LINE_BREAK);
        }
    }
}

/// Print `Unknown command "<name>"`. Shared with the dispatch path.
pub(crate) fn unknown_command<W: Write>(out: &mut OutputMux<'_, '_, W>, name: &str) {
    out.write_str("Unknown command \"");
    out.write_str(name);
    out.write_str("\"");
    out.write_str(LINE_BREAK);
}

fn list<W: Write, const N: usize>(registry: &Registry<'_, N>, out: &mut OutputMux<'_, '_, W>) {
    for binding in registry.iter() {
        out.write_str(binding.name);
        out.write_str(LINE_BREAK);
        // Every entry gets its help line, empty when no text was registered.
        out.write_byte(b'\t');
        if let Some(help) = binding.help {
            out.write_str(help);
        }
        out.write_str(LINE_BREAK);
    }
}

fn describe<W: Write, const N: usize>(
    registry: &Registry<'_, N>,
    name: &str,
    out: &mut OutputMux<'_, '_, W>,
) {
    match registry.find(name) {
        Some(binding) => match binding.help {
            Some(help) => {
                out.write_str(binding.name);
                out.write_str(LINE_BREAK);
                out.write_byte(b'\t');
                out.write_str(help);
                out.write_str(LINE_BREAK);
            }
            None => {
                out.write_str("No help is available for command \"");
                out.write_str(name);
                out.write_str("\"");
                out.write_str(LINE_BREAK);
            }
        },
        None => unknown_command(out, name),
    }
}
