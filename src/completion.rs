//! # Shell Completion Module
//!
//! This module provides shell completion functionality for Encore,
//! including:
//! - Generation of completion scripts for various shells
//! - Custom completion for bookmark titles from the database
//! - Integration with clap's completion system
//!
//! ## Usage
//!
//! ```bash
//! # Generate bash completions
//! encore completion bash > ~/.local/share/bash-completion/completions/encore
//!
//! # Generate fish completions with bookmark title completion
//! encore completion-enhanced fish > ~/.config/fish/completions/encore.fish
//! ```

use crate::cli;
use crate::config;
use crate::store::SessionStore;
use anyhow::Result;
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io;

/// Generate shell completions for the given shell
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

/// Map the CLI shell choice to clap_complete's shell type
#[must_use]
pub fn shell_to_completion_shell(shell: &cli::Shell) -> CompletionShell {
    match shell {
        cli::Shell::Bash => CompletionShell::Bash,
        cli::Shell::Zsh => CompletionShell::Zsh,
        cli::Shell::Fish => CompletionShell::Fish,
        cli::Shell::PowerShell => CompletionShell::PowerShell,
        cli::Shell::Elvish => CompletionShell::Elvish,
    }
}

/// Print bookmark titles, one per line, for the completion scripts.
///
/// Used by the hidden `complete-bookmarks` command. Errors are swallowed
/// into an empty listing — a missing database must not break completion.
pub fn print_bookmark_completions() -> Result<()> {
    let Ok(db_path) = config::get_db_path() else {
        return Ok(());
    };
    let Ok(store) = SessionStore::open(&db_path) else {
        return Ok(());
    };

    for bookmark in store.bookmarks().unwrap_or_default() {
        println!("{}", bookmark.title);
    }

    Ok(())
}

/// Generate enhanced fish completion script with bookmark title completion
pub fn generate_enhanced_fish_completion() {
    println!(
        r#"# Enhanced Encore completion script for Fish shell with bookmark title completion
# Install with: encore completion-enhanced fish > ~/.config/fish/completions/encore.fish

# Function to get bookmark title completions
function __encore_complete_bookmarks
    if command -sq encore
        encore complete-bookmarks 2>/dev/null
    end
end

# Clear existing completions to avoid conflicts
complete -c encore -e

# Global options
complete -c encore -s h -l help -d 'Print help information'
complete -c encore -s V -l version -d 'Print version information'
complete -c encore -l database -d 'Path to the session database' -r

# Main commands
complete -c encore -f -n '__fish_is_first_token' -a 'save' -d 'Save a bookmark (named playback session)'
complete -c encore -f -n '__fish_is_first_token' -a 'autosave' -d 'Save an auto-save snapshot'
complete -c encore -f -n '__fish_is_first_token' -a 'bookmarks' -d 'List saved bookmarks, newest first'
complete -c encore -f -n '__fish_is_first_token' -a 'resume' -d 'Print a saved state and its track list'
complete -c encore -f -n '__fish_is_first_token' -a 'remove' -d 'Delete a saved session'
complete -c encore -f -n '__fish_is_first_token' -a 'playlist' -d 'Manage saved playlists'
complete -c encore -f -n '__fish_is_first_token' -a 'completion' -d 'Generate shell completions'
complete -c encore -f -n '__fish_is_first_token' -a 'completion-enhanced' -d 'Generate enhanced shell completions'
complete -c encore -f -n '__fish_is_first_token' -a 'help' -d 'Print help for commands'

# save command - track list input and snapshot options
complete -c encore -n '__fish_seen_subcommand_from save' -l tracks -d 'JSON file containing the track list' -r
complete -c encore -n '__fish_seen_subcommand_from save' -l files -d 'Build the track list from media file paths' -r
complete -c encore -f -n '__fish_seen_subcommand_from save' -l index -d 'Index of the playing track' -r
complete -c encore -f -n '__fish_seen_subcommand_from save' -l position -d 'Playback offset in milliseconds' -r
complete -c encore -f -n '__fish_seen_subcommand_from save' -l shuffle -a 'off on' -d 'Shuffle mode at save time' -r
complete -c encore -f -n '__fish_seen_subcommand_from save' -l repeat -a 'off all track' -d 'Repeat mode at save time' -r

# autosave command - same options as save, no title
complete -c encore -n '__fish_seen_subcommand_from autosave' -l tracks -d 'JSON file containing the track list' -r
complete -c encore -n '__fish_seen_subcommand_from autosave' -l files -d 'Build the track list from media file paths' -r
complete -c encore -f -n '__fish_seen_subcommand_from autosave' -l index -d 'Index of the playing track' -r
complete -c encore -f -n '__fish_seen_subcommand_from autosave' -l position -d 'Playback offset in milliseconds' -r
complete -c encore -f -n '__fish_seen_subcommand_from autosave' -l shuffle -a 'off on' -d 'Shuffle mode at save time' -r
complete -c encore -f -n '__fish_seen_subcommand_from autosave' -l repeat -a 'off all track' -d 'Repeat mode at save time' -r

# resume and remove commands - complete with bookmark titles
complete -c encore -f -n '__fish_seen_subcommand_from resume' -l title -a '(__encore_complete_bookmarks)' -d 'Bookmark title' -r
complete -c encore -f -n '__fish_seen_subcommand_from resume' -l timestamp -d 'Session timestamp' -r
complete -c encore -f -n '__fish_seen_subcommand_from resume' -l json -d 'Emit machine-readable JSON'
complete -c encore -f -n '__fish_seen_subcommand_from remove' -l title -a '(__encore_complete_bookmarks)' -d 'Bookmark title' -r
complete -c encore -f -n '__fish_seen_subcommand_from remove' -l timestamp -d 'Session timestamp' -r

# bookmarks command
complete -c encore -f -n '__fish_seen_subcommand_from bookmarks' -l json -d 'Emit machine-readable JSON'

# playlist subcommands
complete -c encore -f -n '__fish_seen_subcommand_from playlist' -a 'save list show remove remove-track'
"#
    );
}

/// Generate enhanced bash completion script with bookmark title completion
pub fn generate_enhanced_bash_completion() {
    println!(
        r#"# Enhanced Encore completion script for Bash with bookmark title completion
# Install with: encore completion-enhanced bash > ~/.local/share/bash-completion/completions/encore

_encore_bookmarks() {{
    if command -v encore >/dev/null 2>&1; then
        encore complete-bookmarks 2>/dev/null
    fi
}}

_encore() {{
    local cur prev
    COMPREPLY=()
    cur="${{COMP_WORDS[COMP_CWORD]}}"
    prev="${{COMP_WORDS[COMP_CWORD-1]}}"

    case "$prev" in
        --title)
            local IFS=$'\n'
            COMPREPLY=( $(compgen -W "$(_encore_bookmarks)" -- "$cur") )
            return 0
            ;;
        --tracks|--files|--database)
            COMPREPLY=( $(compgen -f -- "$cur") )
            return 0
            ;;
        --shuffle)
            COMPREPLY=( $(compgen -W "off on" -- "$cur") )
            return 0
            ;;
        --repeat)
            COMPREPLY=( $(compgen -W "off all track" -- "$cur") )
            return 0
            ;;
    esac

    if [ "$COMP_CWORD" -eq 1 ]; then
        COMPREPLY=( $(compgen -W "save autosave bookmarks resume remove playlist completion completion-enhanced help" -- "$cur") )
        return 0
    fi

    case "${{COMP_WORDS[1]}}" in
        save|autosave)
            COMPREPLY=( $(compgen -W "--tracks --files --index --position --shuffle --repeat" -- "$cur") )
            ;;
        bookmarks)
            COMPREPLY=( $(compgen -W "--json" -- "$cur") )
            ;;
        resume)
            COMPREPLY=( $(compgen -W "--timestamp --title --json" -- "$cur") )
            ;;
        remove)
            COMPREPLY=( $(compgen -W "--timestamp --title" -- "$cur") )
            ;;
        playlist)
            COMPREPLY=( $(compgen -W "save list show remove remove-track" -- "$cur") )
            ;;
    esac
    return 0
}}

complete -F _encore encore
"#
    );
}
