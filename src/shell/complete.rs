//! Tab completion against the binding registry.

use super::output::{OutputMux, LINE_BREAK};
use super::registry::Registry;
use super::Flags;
use crate::io::Write;

/// Complete the current edit buffer against the registry.
///
/// The candidate set is every binding whose name starts with the buffer
/// content, in registry order. One candidate replaces the buffer and appends
/// a separating space; several candidates extend the buffer to their longest
/// common prefix; when the buffer already is the common prefix the candidates
/// are listed and the prompt line is redrawn underneath.
pub(crate) fn autocomplete<W: Write, const N: usize>(
    registry: &Registry<'_, N>,
    cmd: &mut [u8],
    cmd_size: &mut usize,
    out: &mut OutputMux<'_, '_, W>,
) {
    let limit = cmd.len().saturating_sub(2);
    let size = *cmd_size;

    let mut count = 0usize;
    let mut first: Option<&str> = None;
    let mut lcp = 0usize;
    {
        let prefix = &cmd[..size];
        for binding in registry.iter() {
            if !binding.name.as_bytes().starts_with(prefix) {
                continue;
            }
            count += 1;
            match first {
                None => {
                    first = Some(binding.name);
                    lcp = binding.name.len();
                }
                Some(name) => {
                    lcp = common_prefix_len(name.as_bytes(), binding.name.as_bytes(), lcp);
                }
            }
        }
    }

    let Some(name) = first else {
        return;
    };

    if count == 1 {
        // Replace the buffer with the full name plus a separating space.
        let completed = name.len() + 1;
        if completed > limit {
            return;
        }
        out.write_str(&name[size..]);
        out.write_byte(b' ');
        cmd[..name.len()].copy_from_slice(name.as_bytes());
        cmd[name.len()] = b' ';
        *cmd_size = completed;
        out.flags.insert(Flags::AUTOCOMPLETED);
        out.flush();
        return;
    }

    if lcp > size {
        // Extend to the common prefix without listing anything.
        let target = lcp.min(limit);
        if target > size {
            out.write_str(&name[size..target]);
            cmd[size..target].copy_from_slice(&name.as_bytes()[size..target]);
            *cmd_size = target;
            out.flush();
        }
        return;
    }

    // The buffer already is the common prefix: pull the typed characters off
    // the line, list every candidate, and redraw the prompt with the buffer.
    out.erase(size);
    {
        let prefix = &cmd[..size];
        for binding in registry.iter() {
            if binding.name.as_bytes().starts_with(prefix) {
                out.write_str(binding.name);
                out.write_str(LINE_BREAK);
            }
        }
    }
    out.write_invitation();
    out.write_bytes(&cmd[..size]);
    out.flags.insert(Flags::CANDIDATES_SHOWN);
    out.flush();
}

fn common_prefix_len(a: &[u8], b: &[u8], max: usize) -> usize {
    let cap = max.min(a.len()).min(b.len());
    let mut len = 0;
    while len < cap && a[len] == b[len] {
        len += 1;
    }
    len
}
