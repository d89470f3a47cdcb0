use std::io;
use std::path::PathBuf;

use clap::builder::Styles;
use clap::builder::styling::AnsiColor::{BrightBlue, White, Yellow};
use clap::{Parser, ValueEnum};
use clap_complete::Generator;
use clap_complete::shells::{Bash, Elvish, Fish, PowerShell, Zsh};
use clap_complete_nushell::Nushell;
use url::Url;

/// Styling for [`clap`]'s CLI interface.
const STYLES: Styles = Styles::styled()
    .usage(Yellow.on_default().bold())
    .literal(BrightBlue.on_default().bold())
    .placeholder(White.on_default().bold())
    .header(Yellow.on_default().bold());

#[derive(Parser, Debug)]
#[command(version, author, about, styles(STYLES))]
pub struct Options {
    #[command(subcommand)]
    pub subcommand: Subcommand,

    /// How to print the results.
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Base URL of the modrinth API. Overrides `mrinspect.yml`.
    #[arg(long, global = true)]
    pub api_base: Option<Url>,
}

#[derive(clap::Subcommand, Debug)]
pub enum Subcommand {
    /// Validate a modpack index and trace one of its files back to modrinth.
    Info {
        /// The `modrinth.index.json` file to read.
        #[arg(short, long, default_value = "modrinth.index.json")]
        input: PathBuf,

        /// Which entry of the `files` array to inspect, starting from 0.
        #[arg(short, long, default_value_t = 0)]
        file: usize,
    },

    /// Generate shell completions for this tool.
    Completions {
        /// Which shell to generate completions for.
        #[arg(short, long, value_enum)]
        shell: Shell,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum OutputFormat {
    /// Colored, human-readable lines.
    Human,
    /// A single YAML document.
    Yaml,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
#[expect(clippy::enum_variant_names, reason = "powershell for fuck's sake")]
pub enum Shell {
    Bash,
    Elvish,
    Fish,
    PowerShell,
    Zsh,
    Nushell,
}

impl Generator for Shell {
    fn file_name(&self, name: &str) -> String {
        match self {
            Self::Bash => Bash.file_name(name),
            Self::Elvish => Elvish.file_name(name),
            Self::Fish => Fish.file_name(name),
            Self::PowerShell => PowerShell.file_name(name),
            Self::Zsh => Zsh.file_name(name),
            Self::Nushell => Nushell.file_name(name),
        }
    }

    fn generate(&self, cmd: &clap::Command, buf: &mut dyn io::Write) {
        match self {
            Self::Bash => Bash.generate(cmd, buf),
            Self::Elvish => Elvish.generate(cmd, buf),
            Self::Fish => Fish.generate(cmd, buf),
            Self::PowerShell => PowerShell.generate(cmd, buf),
            Self::Zsh => Zsh.generate(cmd, buf),
            Self::Nushell => Nushell.generate(cmd, buf),
        }
    }
}
