// ABOUTME: Writes qrgen completion scripts for the shells clap_complete supports
// ABOUTME: Also holds the install notes printed by `qrgen completions --help`

use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io::Write;

use crate::cli::Cli;

const BIN_NAME: &str = "qrgen";

/// Shown after the long help of the `completions` subcommand
pub const INSTALL_HELP: &str = "\
Installing completions:
  bash        qrgen completions bash > ~/.local/share/bash-completion/completions/qrgen
  zsh         qrgen completions zsh > ~/.zfunc/_qrgen   (with ~/.zfunc on $fpath)
  fish        qrgen completions fish > ~/.config/fish/completions/qrgen.fish
  powershell  qrgen completions powershell >> $PROFILE
  elvish      qrgen completions elvish > ~/.config/elvish/lib/qrgen.elv

Restart the shell afterwards.";

/// Write the completion script for `shell` covering every qrgen subcommand
pub fn write_completions<W: Write>(shell: Shell, writer: &mut W) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, writer);
}
