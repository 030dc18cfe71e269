//! Command bindings and the append-only registry.

use heapless::Vec;

use super::error::Error;
use super::output::CliOutput;
use crate::token;

/// Name of the built-in listing command. Reserved: it occupies the first
/// registry slot and cannot be rebound.
pub const HELP_COMMAND: &str = "help";

/// Help text of the built-in listing command.
pub(crate) const HELP_SUMMARY: &str = "Print the list of available commands";

/// A command invocation handed to a [`CommandHandler`].
///
/// Borrows the engine's edit buffer for the duration of the call; the name
/// and arguments do not outlive the dispatch.
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    name: &'a str,
    args: &'a str,
    tokenized: bool,
}

impl<'a> Request<'a> {
    pub(crate) fn new(name: &'a str, args: &'a str, tokenized: bool) -> Self {
        Self {
            name,
            args,
            tokenized,
        }
    }

    /// The command name (the first token of the submitted line).
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The argument text after the command name.
    ///
    /// For a binding registered with `tokenize_args` this is the tokenized
    /// blob (null-separated tokens); read it through [`arg`](Request::arg).
    /// Otherwise it is the raw text exactly as typed.
    pub fn args(&self) -> &'a str {
        self.args
    }

    /// `true` when the arguments were tokenized in place before dispatch.
    pub fn tokenized(&self) -> bool {
        self.tokenized
    }

    /// The `index`-th argument token.
    ///
    /// On an untokenized request the whole argument text counts as one token.
    pub fn arg(&self, index: usize) -> Option<&'a str> {
        token::get_token(self.args.as_bytes(), index)
    }

    /// Number of argument tokens.
    pub fn arg_count(&self) -> usize {
        token::get_token_count(self.args.as_bytes())
    }
}

/// A command implementation.
///
/// Implementors carry their own captured state (use interior mutability for
/// anything the handler mutates); the engine only ever takes `&self`. The
/// same trait serves as the session fallback hook installed with
/// [`set_fallback`](crate::shell::Shell::set_fallback), which receives every
/// submitted line that no binding consumed.
pub trait CommandHandler {
    /// Handle one submitted command line.
    ///
    /// `out` prints through the engine's output multiplexer, so handler
    /// output never garbles the terminal.
    fn execute(&self, out: &mut dyn CliOutput, request: Request<'_>);
}

/// A registered association between a command name and its handler.
#[derive(Clone, Copy)]
pub struct Binding<'a> {
    /// Unique command name.
    pub name: &'a str,
    /// One-line help text shown by the built-in `help` command.
    pub help: Option<&'a str>,
    /// Tokenize the argument text in place before invoking the handler.
    pub tokenize_args: bool,
    /// The command implementation. A binding without a handler falls through
    /// to the session fallback hook.
    pub handler: Option<&'a dyn CommandHandler>,
}

impl core::fmt::Debug for Binding<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Binding")
            .field("name", &self.name)
            .field("help", &self.help)
            .field("tokenize_args", &self.tokenize_args)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

/// Append-only binding table.
///
/// Slot 0 always holds the built-in `help` binding; user bindings follow in
/// insertion order, which is also the enumeration order for help listings and
/// completion candidates.
pub(crate) struct Registry<'a, const N: usize> {
    bindings: Vec<Binding<'a>, N>,
}

impl<'a, const N: usize> Registry<'a, N> {
    pub(crate) fn new() -> Self {
        let mut bindings = Vec::new();
        // With a zero-capacity table even the built-in does not fit; `help`
        // still dispatches through its dedicated path.
        let _ = bindings.push(Binding {
            name: HELP_COMMAND,
            help: Some(HELP_SUMMARY),
            tokenize_args: false,
            handler: None,
        });
        Self { bindings }
    }

    pub(crate) fn add(&mut self, binding: Binding<'a>) -> Result<(), Error> {
        if binding.name.is_empty() {
            return Err(Error::InvalidBinding);
        }
        if binding.name == HELP_COMMAND {
            return Err(Error::ReservedCommand);
        }
        if self.find(binding.name).is_some() {
            return Err(Error::DuplicateCommand);
        }
        self.bindings.push(binding).map_err(|_| Error::RegistryFull)
    }

    pub(crate) fn find(&self, name: &str) -> Option<&Binding<'a>> {
        self.bindings.iter().find(|b| b.name == name)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Binding<'a>> {
        self.bindings.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.bindings.len()
    }
}

impl<const N: usize> core::fmt::Debug for Registry<'_, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("len", &self.bindings.len())
            .field("capacity", &N)
            .finish()
    }
}
