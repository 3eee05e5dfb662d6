//! Help-output parsing for docker-style command-line tools.
//!
//! Parsing runs in three layers:
//!
//! - [`parse_sections`] groups raw lines under their `Header:` lines and
//!   collects every `Usage:` remainder.
//! - [`parse_switch`] / [`parse_switches`] turn option lines into
//!   [`Switch`](completion_gen_core::Switch) records.
//! - [`parse_subcommands`] walks a command listing, fetches each
//!   subcommand's own help through a
//!   [`HelpSource`](crate::extractor::HelpSource) and builds
//!   [`Subcommand`](completion_gen_core::Subcommand) records.

mod sections;
mod subcommands;
mod switches;

pub use sections::{SectionMap, USAGE, parse_sections};
pub use subcommands::{
    argument_override, build_subcommand, parse_subcommand_line, parse_subcommands,
    parse_usage_arguments,
};
pub use switches::{parse_switch, parse_switches};
