//! Engine configuration.

/// Default RX ring capacity in bytes.
pub const DEFAULT_RX_BUFFER_SIZE: usize = 64;
/// Default TX ring capacity in bytes.
pub const DEFAULT_TX_BUFFER_SIZE: usize = 128;
/// Default edit buffer capacity in bytes.
pub const DEFAULT_CMD_BUFFER_SIZE: usize = 64;
/// Default last-submitted-line buffer capacity in bytes.
pub const DEFAULT_HISTORY_BUFFER_SIZE: usize = 64;
/// Default prompt printed at the start of each fresh line.
pub const DEFAULT_INVITATION: &str = "> ";

/// Sizing and presentation options for a [`Shell`](crate::shell::Shell).
///
/// All sizes are in bytes and are carved from the caller's buffer at
/// construction; [`required_size`](Config::required_size) reports the total.
/// The registry capacity is not part of the config: it is the engine's
/// `MAX_BINDINGS` const generic (default 8).
#[derive(Debug, Clone)]
pub struct Config<'a> {
    /// Capacity of the RX ring fed by `receive_char`.
    pub rx_buffer_size: usize,
    /// Capacity of the TX ring the engine stages output through.
    pub tx_buffer_size: usize,
    /// Capacity of the edit buffer. Two bytes are reserved for the
    /// tokenizer's terminators, so the longest accepted line is
    /// `cmd_buffer_size - 2` characters.
    pub cmd_buffer_size: usize,
    /// Capacity of the last-submitted-line buffer.
    pub history_buffer_size: usize,
    /// Prompt printed at the start of each fresh line.
    pub invitation: &'a str,
}

impl Config<'_> {
    /// Total number of arena bytes this configuration carves.
    pub fn required_size(&self) -> usize {
        self.rx_buffer_size + self.tx_buffer_size + self.cmd_buffer_size + self.history_buffer_size
    }
}

impl Default for Config<'_> {
    fn default() -> Self {
        Self {
            rx_buffer_size: DEFAULT_RX_BUFFER_SIZE,
            tx_buffer_size: DEFAULT_TX_BUFFER_SIZE,
            cmd_buffer_size: DEFAULT_CMD_BUFFER_SIZE,
            history_buffer_size: DEFAULT_HISTORY_BUFFER_SIZE,
            invitation: DEFAULT_INVITATION,
        }
    }
}
