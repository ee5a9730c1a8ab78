// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Look up, download and share subtitles through SubDB
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the SubDB hash of a media file
    Hash {
        /// Media file
        file: PathBuf,
    },

    /// List the languages of all subtitles in the database
    Languages,

    /// List the subtitle languages available for a media file
    Search {
        /// Media file
        file: PathBuf,
    },

    /// Download a subtitle for a media file
    Download {
        /// Media file
        file: PathBuf,

        /// Two-letter language code, e.g. "en"
        language: String,

        /// Write the subtitle here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Upload a subtitle for a media file
    Upload {
        /// Media file
        file: PathBuf,

        /// Subtitle file to upload
        subtitle: PathBuf,
    },
}
